//! # Provisioning hand-off
//!
//! The topology is only a description; realizing it belongs to an external
//! provisioning toolkit. This module translates the entity graph into the
//! shape that toolkit consumes:
//!
//! - `plan.rs`: one resource record per entity, in dependency order, with
//!   cloud resource types, properties and references
//! - `template.rs`: a declarative JSON template document built from a plan
//!
//! ## Example Generated Structure
//!
//! ```json
//! {
//!   "AWSTemplateFormatVersion": "2010-09-09",
//!   "Resources": {
//!     "VpcProd": {
//!       "Type": "AWS::EC2::VPC",
//!       "Properties": { "CidrBlock": "10.0.0.0/16" }
//!     },
//!     "PublicApNortheast1aProd": {
//!       "Type": "AWS::EC2::Subnet",
//!       "Properties": { "VpcId": { "Ref": "VpcProd" }, "CidrBlock": "10.0.11.0/24" },
//!       "DependsOn": ["VpcProd"]
//!     }
//!   }
//! }
//! ```
//!
//! Nothing here talks to a cloud API; diffing, applying and rolling back are
//! left to the toolkit.

pub mod plan;
pub mod template;

pub use plan::{logical_id, plan, ProvisioningPlan, ResourceRecord};
pub use template::render;
