//! Shared utilities: name and availability zone validation.

pub mod validation;

pub use validation::{validate_availability_zones, validate_environment_name, zone_suffix};
