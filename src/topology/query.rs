//! Read-only lookups and structural verification over a built topology.

use super::types::{NatGateway, NetworkTopology, Resource, Route, RouteTable, Subnet, Tier};
use crate::errors::{TopologyError, TopologyResult};
use crate::ip::CidrRegistry;
use std::collections::HashSet;

impl NetworkTopology {
    pub fn subnet(&self, id: &str) -> Option<&Subnet> {
        self.subnets.iter().find(|subnet| subnet.id == id)
    }

    pub fn subnets_in_tier(&self, tier: Tier) -> Vec<&Subnet> {
        self.subnets.iter().filter(|subnet| subnet.tier == tier).collect()
    }

    pub fn route_table(&self, id: &str) -> Option<&RouteTable> {
        self.route_tables.iter().find(|table| table.id == id)
    }

    /// The route table a subnet is associated with
    pub fn route_table_for_subnet(&self, subnet_id: &str) -> Option<&RouteTable> {
        let association = self
            .associations
            .iter()
            .find(|assoc| assoc.subnet_id == subnet_id)?;
        self.route_table(&association.route_table_id)
    }

    pub fn routes_in(&self, route_table_id: &str) -> Vec<&Route> {
        self.routes
            .iter()
            .filter(|route| route.route_table_id == route_table_id)
            .collect()
    }

    /// The NAT gateway serving an availability zone
    pub fn nat_gateway_in(&self, availability_zone: &str) -> Option<&NatGateway> {
        self.nat_gateways
            .iter()
            .find(|ngw| ngw.availability_zone == availability_zone)
    }

    /// Re-check the structural guarantees of the graph.
    ///
    /// Checks for:
    /// - Unique identities
    /// - Every reference resolving to an entity declared earlier
    /// - NAT gateways sited in public subnets
    /// - Exactly one route table per subnet
    /// - Subnet blocks disjoint and inside the network block
    pub fn verify(&self) -> TopologyResult<()> {
        let mut declared: HashSet<&str> = HashSet::new();
        for resource in self.resources() {
            for reference in resource.references() {
                if !declared.contains(reference) {
                    return Err(TopologyError::DanglingReference {
                        from: resource.id().to_string(),
                        to: reference.to_string(),
                    });
                }
            }
            if !declared.insert(resource.id()) {
                return Err(TopologyError::DuplicateIdentity(resource.id().to_string()));
            }
        }

        // Routes and associations pointing at an unknown table are skipped by
        // `resources()`, so count them separately
        let listed = self
            .resources()
            .iter()
            .filter(|r| matches!(r, Resource::Route(_) | Resource::Association(_)))
            .count();
        if listed != self.routes.len() + self.associations.len() {
            let orphan = self
                .routes
                .iter()
                .map(|route| (route.id.as_str(), route.route_table_id.as_str()))
                .chain(
                    self.associations
                        .iter()
                        .map(|assoc| (assoc.id.as_str(), assoc.route_table_id.as_str())),
                )
                .find(|(_, table)| self.route_table(table).is_none());
            if let Some((from, to)) = orphan {
                return Err(TopologyError::DanglingReference {
                    from: from.to_string(),
                    to: to.to_string(),
                });
            }
        }

        for nat_gateway in &self.nat_gateways {
            if let Some(subnet) = self.subnet(&nat_gateway.subnet_id) {
                if !subnet.is_public() {
                    return Err(TopologyError::NatRequiresPublicSubnet {
                        nat: nat_gateway.id.clone(),
                        subnet: subnet.id.clone(),
                        tier: subnet.tier,
                    });
                }
            }
        }

        for subnet in &self.subnets {
            let count = self
                .associations
                .iter()
                .filter(|assoc| assoc.subnet_id == subnet.id)
                .count();
            if count != 1 {
                return Err(TopologyError::RouteTableAssociation {
                    subnet: subnet.id.clone(),
                    count,
                });
            }
        }

        let mut registry = CidrRegistry::new(self.network.cidr);
        for subnet in &self.subnets {
            registry.register(&subnet.id, subnet.cidr)?;
        }

        Ok(())
    }
}
