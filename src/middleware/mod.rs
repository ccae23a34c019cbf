pub mod cors;
pub mod error_handler;
pub mod request_id;

pub use cors::cors_policy;
pub use error_handler::{json_config, json_error_handler, not_found, ErrorLogger};
pub use request_id::RequestId;
