pub mod create_branch_request;
pub mod update_branch_request;
