//! Input validation utilities.
//!
//! This module provides validation for the naming inputs that end up inside
//! resource identities and `Name` tags.

use crate::config::ValidationError;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static ENVIRONMENT_PATTERN: LazyLock<Regex> = LazyLock::new(||
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]*$").unwrap()
);

static AVAILABILITY_ZONE_PATTERN: LazyLock<Regex> = LazyLock::new(||
    Regex::new(r"^[a-z]{2}(-[a-z]+)+-\d+[a-z]$").unwrap()
);

/// Validate an environment name
///
/// The name is combined with tier and availability zone to form resource
/// identities, so it must be non-empty and free of whitespace and separators
/// other than `-` and `_`.
///
/// # Examples
/// ```
/// use tiervpc::utils::validation::validate_environment_name;
///
/// assert!(validate_environment_name("prod").is_ok());
/// assert!(validate_environment_name("").is_err());
/// assert!(validate_environment_name("my env").is_err());
/// ```
pub fn validate_environment_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::InvalidEnvironment(
            "environment name cannot be empty".to_string(),
        ));
    }

    if !ENVIRONMENT_PATTERN.is_match(name) {
        return Err(ValidationError::InvalidEnvironment(format!(
            "'{}' must start with a letter or digit and contain only letters, digits, '-' or '_'",
            name
        )));
    }

    Ok(())
}

/// Validate the availability zone list
///
/// Checks for:
/// - At least one zone
/// - Zone names shaped like `ap-northeast-1a`
/// - No duplicate zones
/// - No duplicate zone suffixes (`1a`, `1c`), which name per-zone route tables
pub fn validate_availability_zones(zones: &[String]) -> Result<(), ValidationError> {
    if zones.is_empty() {
        return Err(ValidationError::InvalidNetwork(
            "availability_zones cannot be empty".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    let mut suffixes = HashSet::new();
    for zone in zones {
        if !AVAILABILITY_ZONE_PATTERN.is_match(zone) {
            return Err(ValidationError::InvalidNetwork(format!(
                "'{}' is not a valid availability zone name",
                zone
            )));
        }
        if !seen.insert(zone.as_str()) {
            return Err(ValidationError::InvalidNetwork(format!(
                "availability zone '{}' is listed more than once",
                zone
            )));
        }
        if !suffixes.insert(zone_suffix(zone)) {
            return Err(ValidationError::InvalidNetwork(format!(
                "availability zone suffix '{}' is used by more than one zone",
                zone_suffix(zone)
            )));
        }
    }

    Ok(())
}

/// Short form of an availability zone, `ap-northeast-1a` -> `1a`
pub fn zone_suffix(zone: &str) -> &str {
    zone.rsplit('-').next().unwrap_or(zone)
}
