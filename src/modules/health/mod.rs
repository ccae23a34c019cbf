pub mod controllers;

pub use controllers::health_controller::{available_endpoints, configure};
