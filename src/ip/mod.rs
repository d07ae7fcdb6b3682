//! IP address block handling.
//!
//! This module provides the IPv4 CIDR value type used throughout the
//! topology and the registry that keeps subnet blocks disjoint and inside
//! their parent network.

pub mod cidr;
pub mod registry;

// Re-export commonly used types
pub use cidr::{CidrError, Ipv4Cidr};
pub use registry::CidrRegistry;
