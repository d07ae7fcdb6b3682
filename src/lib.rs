//! # Tiervpc - Multi-tier virtual private network topology builder
//!
//! This library produces a complete, self-consistent description of a
//! three-tier cloud network for one deployment environment. The description
//! is a plain entity graph; an external provisioning toolkit realizes it.
//!
//! ## Overview
//!
//! One network is split into a public, an application and a database tier,
//! each with one subnet per availability zone. Public subnets reach the
//! internet through a shared internet gateway, application subnets egress
//! through a NAT gateway in their own zone, and database subnets have no
//! route off the network.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `config`: Type-safe configuration structures and YAML parsing
//! - `config_loader`: Configuration file loading and command line overrides
//! - `errors`: Topology error type shared by the builder and verifier
//! - `ip`: CIDR block arithmetic and allocation checks
//! - `topology`: Entity model, builder, routing policy and queries
//! - `provision`: Resource records and template rendering for the provisioning layer
//! - `utils`: Name validation helpers
//! - `orchestrator`: High-level orchestration of document generation
//!
//! ## Example Usage
//!
//! ```rust
//! use tiervpc::topology::{build, Tier};
//!
//! let topology = build("prod")?;
//!
//! assert_eq!(topology.network.id, "vpc-prod");
//! assert_eq!(topology.subnets_in_tier(Tier::App).len(), 2);
//! assert_eq!(topology.nat_gateways.len(), 2);
//! # Ok::<(), tiervpc::errors::TopologyError>(())
//! ```
//!
//! ## Configuration Format
//!
//! Every field is optional; omitted fields fall back to the default layout:
//!
//! ```yaml
//! general:
//!   name: basic-vpc
//!   environment: prod
//!
//! network:
//!   cidr: 10.0.0.0/16
//!   availability_zones: [ap-northeast-1a, ap-northeast-1c]
//!   nat: per_az          # or: disabled
//!   tiers:
//!     public: [10.0.11.0/24, 10.0.12.0/24]
//!     app: [10.0.21.0/24, 10.0.22.0/24]
//!     db: [10.0.31.0/24, 10.0.32.0/24]
//! ```
//!
//! ## Error Handling
//!
//! Library operations return [`errors::TopologyError`]; the configuration
//! loader and orchestrator wrap those in `color_eyre` reports with context.

pub mod config;
pub mod config_loader;
pub mod errors;
pub mod ip;
pub mod topology;
pub mod provision;
pub mod utils;
pub mod orchestrator;
