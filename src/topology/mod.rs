//! Network topology module.
//!
//! This module contains the entity model of a multi-tier virtual private
//! network, the builder that assembles it and the routing policy between
//! tiers.

pub mod types;
pub mod builder;
pub mod routing;
pub mod query;

// Re-export key types and functions for easier access
pub use types::{
    ElasticIp, GatewayAttachment, InternetGateway, NatGateway, Network, NetworkTopology, Resource, Route,
    RouteTable, RouteTarget, Subnet, SubnetRouteTableAssociation, Tag, Tier,
};
pub use builder::{build, build_with};
pub use routing::{build_routing, RoutingLayout};
