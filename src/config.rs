use crate::ip::Ipv4Cidr;
use crate::topology::Tier;
use crate::utils::validation::{validate_availability_zones, validate_environment_name};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// Egress policy for the app tier
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum NatMode {
    /// One Elastic IP and NAT gateway per availability zone, with a route
    /// table per zone pointing the app subnet at its own zone's gateway
    #[default]
    PerAz,
    /// Reduced layout: no NAT gateways, the app tier has no egress route
    Disabled,
}

/// Complete topology configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct TopologyConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub network: NetworkConfig,
}

impl TopologyConfig {
    /// Default layout for the given environment
    pub fn for_environment(environment: &str) -> Self {
        let mut config = Self::default();
        config.general.environment = environment.to_string();
        config
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_environment_name(&self.general.environment)?;

        if self.general.name.trim().is_empty() {
            return Err(ValidationError::InvalidGeneral(
                "name cannot be empty".to_string(),
            ));
        }

        validate_availability_zones(&self.network.availability_zones)?;

        let zone_count = self.network.availability_zones.len();
        for tier in Tier::ALL {
            let blocks = self.network.tiers.for_tier(tier);
            if blocks.len() != zone_count {
                return Err(ValidationError::InvalidNetwork(format!(
                    "{} tier lists {} CIDR blocks but there are {} availability zones",
                    tier,
                    blocks.len(),
                    zone_count
                )));
            }
        }

        Ok(())
    }
}

/// Naming settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeneralConfig {
    /// Stack name, used as the template description
    #[serde(default = "default_name")]
    pub name: String,
    /// Environment discriminator folded into every resource identity
    #[serde(default)]
    pub environment: String,
}

fn default_name() -> String {
    "basic-vpc".to_string()
}

/// Network layout
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct NetworkConfig {
    pub cidr: Ipv4Cidr,
    pub availability_zones: Vec<String>,
    pub nat: NatMode,
    pub tiers: TierCidrs,
}

/// Subnet blocks per tier, one per availability zone in zone order
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TierCidrs {
    pub public: Vec<Ipv4Cidr>,
    pub app: Vec<Ipv4Cidr>,
    pub db: Vec<Ipv4Cidr>,
}

impl TierCidrs {
    pub fn for_tier(&self, tier: Tier) -> &[Ipv4Cidr] {
        match tier {
            Tier::Public => &self.public,
            Tier::App => &self.app,
            Tier::Db => &self.db,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid environment name: {0}")]
    InvalidEnvironment(String),
    #[error("Invalid general configuration: {0}")]
    InvalidGeneral(String),
    #[error("Invalid network configuration: {0}")]
    InvalidNetwork(String),
}

/// Default implementations
impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            environment: String::new(),
        }
    }
}

const fn block(third_octet: u8) -> Ipv4Cidr {
    Ipv4Cidr::from_parts(Ipv4Addr::new(10, 0, third_octet, 0), 24)
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            cidr: Ipv4Cidr::from_parts(Ipv4Addr::new(10, 0, 0, 0), 16),
            availability_zones: vec![
                "ap-northeast-1a".to_string(),
                "ap-northeast-1c".to_string(),
            ],
            nat: NatMode::PerAz,
            tiers: TierCidrs::default(),
        }
    }
}

impl Default for TierCidrs {
    fn default() -> Self {
        Self {
            public: vec![block(11), block(12)],
            app: vec![block(21), block(22)],
            db: vec![block(31), block(32)],
        }
    }
}
