//! Topology construction.
//!
//! This file assembles the full entity graph in dependency order. Each step
//! only consumes values produced by earlier steps, and nothing is returned
//! unless every step succeeds.

use super::routing::build_routing;
use super::types::{ElasticIp, GatewayAttachment, InternetGateway, NatGateway, Network, NetworkTopology, Subnet, Tier};
use crate::config::{NatMode, TopologyConfig};
use crate::errors::TopologyResult;
use crate::ip::CidrRegistry;
use log::{debug, info};

/// Build the default three-tier, two-zone topology for `environment`.
///
/// # Examples
/// ```
/// use tiervpc::topology::build;
///
/// let topology = build("prod")?;
/// let subnet = topology.subnet("public-ap-northeast-1a-prod").unwrap();
/// assert_eq!(subnet.cidr.to_string(), "10.0.11.0/24");
/// assert!(build("").is_err());
/// # Ok::<(), tiervpc::errors::TopologyError>(())
/// ```
pub fn build(environment: &str) -> TopologyResult<NetworkTopology> {
    build_with(&TopologyConfig::for_environment(environment))
}

/// Build the topology described by `config`.
pub fn build_with(config: &TopologyConfig) -> TopologyResult<NetworkTopology> {
    config.validate()?;

    let environment = config.general.environment.as_str();
    let layout = &config.network;
    debug!("Building topology for environment '{}' in {}", environment, layout.cidr);

    // 1. Network
    let network = Network::new(layout.cidr, environment);

    // 2. Subnets, tier by tier
    let mut registry = CidrRegistry::new(network.cidr);
    let mut subnets = Vec::with_capacity(Tier::ALL.len() * layout.availability_zones.len());
    for tier in Tier::ALL {
        let blocks = layout.tiers.for_tier(tier);
        for (zone, cidr) in layout.availability_zones.iter().zip(blocks) {
            let subnet = Subnet::new(&network, tier, zone, *cidr, environment);
            registry.register(&subnet.id, subnet.cidr)?;
            subnets.push(subnet);
        }
    }
    debug!("Declared {} subnets, {} addresses left unallocated", subnets.len(), registry.unallocated());

    // 3. Internet gateway and its attachment
    let internet_gateway = InternetGateway::new(environment);
    let gateway_attachment = GatewayAttachment::new(&network, &internet_gateway);

    // 4-5. Elastic IPs, then one NAT gateway per public subnet
    let mut elastic_ips = Vec::new();
    let mut nat_gateways = Vec::new();
    if layout.nat == NatMode::PerAz {
        for subnet in subnets.iter().filter(|subnet| subnet.is_public()) {
            elastic_ips.push(ElasticIp::new(&subnet.availability_zone, environment));
        }
        for (subnet, elastic_ip) in subnets.iter().filter(|subnet| subnet.is_public()).zip(&elastic_ips) {
            let nat_gateway = NatGateway::new(subnet, elastic_ip, environment)?;
            debug!("Sited {} in {} behind {}", nat_gateway.id, subnet.id, elastic_ip.id);
            nat_gateways.push(nat_gateway);
        }
    }

    // 6-8. Route tables, default routes and subnet associations
    let routing = build_routing(&network, &subnets, &internet_gateway, &nat_gateways, layout.nat)?;

    let topology = NetworkTopology {
        environment: environment.to_string(),
        network,
        subnets,
        internet_gateway,
        gateway_attachment,
        elastic_ips,
        nat_gateways,
        route_tables: routing.route_tables,
        routes: routing.routes,
        associations: routing.associations,
    };

    info!(
        "Built topology {}: {} subnets, {} NAT gateways, {} route tables, {} resources total",
        topology.network.id,
        topology.subnets.len(),
        topology.nat_gateways.len(),
        topology.route_tables.len(),
        topology.resource_count()
    );

    Ok(topology)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationError;
    use crate::errors::TopologyError;

    #[test]
    fn test_default_counts() {
        let topology = build("prod").unwrap();
        assert_eq!(topology.subnets.len(), 6);
        assert_eq!(topology.elastic_ips.len(), 2);
        assert_eq!(topology.nat_gateways.len(), 2);
        assert_eq!(topology.route_tables.len(), 4);
        assert_eq!(topology.routes.len(), 3);
        assert_eq!(topology.associations.len(), 6);
        assert_eq!(topology.resource_count(), 1 + 6 + 1 + 1 + 2 + 2 + 4 + 3 + 6);
    }

    #[test]
    fn test_subnet_order_is_tier_major() {
        let topology = build("dev").unwrap();
        let ids: Vec<&str> = topology.subnets.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "public-ap-northeast-1a-dev",
                "public-ap-northeast-1c-dev",
                "app-ap-northeast-1a-dev",
                "app-ap-northeast-1c-dev",
                "db-ap-northeast-1a-dev",
                "db-ap-northeast-1c-dev",
            ]
        );
    }

    #[test]
    fn test_empty_environment_rejected() {
        let err = build("").unwrap_err();
        assert!(matches!(
            err,
            TopologyError::InvalidInput(ValidationError::InvalidEnvironment(_))
        ));
    }

    #[test]
    fn test_overlapping_layout_rejected() {
        let mut config = TopologyConfig::for_environment("dev");
        config.network.tiers.db[1] = "10.0.21.0/24".parse().unwrap();

        let err = build_with(&config).unwrap_err();
        assert_eq!(
            err,
            TopologyError::OverlappingSubnets {
                first: "app-ap-northeast-1a-dev".to_string(),
                first_cidr: "10.0.21.0/24".parse().unwrap(),
                second: "db-ap-northeast-1c-dev".to_string(),
                second_cidr: "10.0.21.0/24".parse().unwrap(),
            }
        );
    }

    #[test]
    fn test_out_of_range_layout_rejected() {
        let mut config = TopologyConfig::for_environment("dev");
        config.network.cidr = "10.0.0.0/24".parse().unwrap();

        let err = build_with(&config).unwrap_err();
        assert_eq!(
            err,
            TopologyError::SubnetOutOfRange {
                subnet: "public-ap-northeast-1a-dev".to_string(),
                cidr: "10.0.11.0/24".parse().unwrap(),
                network: "10.0.0.0/24".parse().unwrap(),
            }
        );
    }

    #[test]
    fn test_reduced_layout() {
        let mut config = TopologyConfig::for_environment("dev");
        config.network.nat = NatMode::Disabled;

        let topology = build_with(&config).unwrap();
        assert_eq!(topology.subnets.len(), 6);
        assert!(topology.elastic_ips.is_empty());
        assert!(topology.nat_gateways.is_empty());
        assert_eq!(topology.route_tables.len(), 3);
        assert_eq!(topology.routes.len(), 1);
    }
}
