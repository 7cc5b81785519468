pub mod billing_cycle;
pub mod provider;
pub mod status;
