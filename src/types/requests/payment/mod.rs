pub mod checkout_request;
