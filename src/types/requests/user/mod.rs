pub mod update_user_request;
