pub mod message_role;
