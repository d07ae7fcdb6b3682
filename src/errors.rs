//! Error types for topology construction

use crate::config::ValidationError;
use crate::ip::Ipv4Cidr;
use crate::topology::Tier;
use thiserror::Error;

/// Errors that reject a topology before any of it is produced
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TopologyError {
    /// Environment name or layout parameters are unusable
    #[error(transparent)]
    InvalidInput(#[from] ValidationError),

    #[error("Overlapping subnet: {second} ({second_cidr}) overlaps {first} ({first_cidr})")]
    OverlappingSubnets {
        first: String,
        first_cidr: Ipv4Cidr,
        second: String,
        second_cidr: Ipv4Cidr,
    },

    #[error("Subnet exceeds network range: {subnet} ({cidr}) is not within {network}")]
    SubnetOutOfRange {
        subnet: String,
        cidr: Ipv4Cidr,
        network: Ipv4Cidr,
    },

    #[error("Duplicate resource identity: {0}")]
    DuplicateIdentity(String),

    #[error("NAT gateway {nat} must reside in a public subnet, but {subnet} is in the {tier} tier")]
    NatRequiresPublicSubnet {
        nat: String,
        subnet: String,
        tier: Tier,
    },

    #[error("Dangling reference: {from} refers to {to}, which is not declared before it")]
    DanglingReference { from: String, to: String },

    #[error("Subnet {subnet} is associated with {count} route tables (expected exactly 1)")]
    RouteTableAssociation { subnet: String, count: usize },
}

/// Result type for topology operations
pub type TopologyResult<T> = Result<T, TopologyError>;
