pub mod create_plan_request;
pub mod subscribe_request;
