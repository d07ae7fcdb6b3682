//! Route table layout.
//!
//! This file decides which route tables exist, which default route each one
//! carries and which subnets it serves:
//!
//! - public: one shared table, default route to the internet gateway
//! - app: one table per zone, default route to that zone's NAT gateway
//!   (or one shared table with no route when NAT is disabled)
//! - db: one shared table with no route

use super::types::{
    InternetGateway, NatGateway, Network, Route, RouteTable, Subnet, SubnetRouteTableAssociation, Tier,
};
use crate::config::NatMode;
use crate::errors::{TopologyError, TopologyResult};

/// Route tables, routes and associations in creation order
#[derive(Debug, Default)]
pub struct RoutingLayout {
    pub route_tables: Vec<RouteTable>,
    pub routes: Vec<Route>,
    pub associations: Vec<SubnetRouteTableAssociation>,
}

impl RoutingLayout {
    fn add_table(&mut self, table: RouteTable, route: Option<Route>, subnets: &[&Subnet]) {
        for subnet in subnets {
            self.associations.push(SubnetRouteTableAssociation::new(&table, subnet));
        }
        if let Some(route) = route {
            self.routes.push(route);
        }
        self.route_tables.push(table);
    }
}

fn tier_subnets(subnets: &[Subnet], tier: Tier) -> Vec<&Subnet> {
    subnets.iter().filter(|subnet| subnet.tier == tier).collect()
}

/// Lay out the routing for every tier.
///
/// `nat_gateways` must already hold one gateway per zone when `nat` is
/// [`NatMode::PerAz`]; an app subnet whose zone has no gateway is reported as
/// a dangling reference.
pub fn build_routing(
    network: &Network,
    subnets: &[Subnet],
    internet_gateway: &InternetGateway,
    nat_gateways: &[NatGateway],
    nat: NatMode,
) -> TopologyResult<RoutingLayout> {
    let mut layout = RoutingLayout::default();

    // Public tier
    let public = RouteTable::shared(network, Tier::Public);
    let route = Route::default_via_gateway(&public, internet_gateway);
    layout.add_table(public, Some(route), &tier_subnets(subnets, Tier::Public));

    // App tier
    let app_subnets = tier_subnets(subnets, Tier::App);
    match nat {
        NatMode::PerAz => {
            for subnet in app_subnets {
                let nat_gateway = nat_gateways
                    .iter()
                    .find(|ngw| ngw.availability_zone == subnet.availability_zone)
                    .ok_or_else(|| TopologyError::DanglingReference {
                        from: subnet.id.clone(),
                        to: format!("NAT gateway in {}", subnet.availability_zone),
                    })?;

                let table = RouteTable::zonal(network, Tier::App, &subnet.availability_zone);
                let route = Route::default_via_nat(&table, nat_gateway);
                log::debug!("{} egresses through {}", subnet.id, nat_gateway.id);
                layout.add_table(table, Some(route), &[subnet]);
            }
        }
        NatMode::Disabled => {
            let table = RouteTable::shared(network, Tier::App);
            layout.add_table(table, None, &app_subnets);
        }
    }

    // Db tier: isolated by omission
    let db = RouteTable::shared(network, Tier::Db);
    layout.add_table(db, None, &tier_subnets(subnets, Tier::Db));

    Ok(layout)
}
