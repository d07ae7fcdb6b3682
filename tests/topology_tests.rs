#[cfg(test)]
mod topology_tests {
    use std::collections::HashSet;
    use std::io::Write;
    use tempfile::NamedTempFile;

    use tiervpc::config::{NatMode, TopologyConfig};
    use tiervpc::config_loader::{load_config, resolve_config, CliOverrides};
    use tiervpc::errors::TopologyError;
    use tiervpc::ip::Ipv4Cidr;
    use tiervpc::orchestrator::{generate, OutputFormat};
    use tiervpc::provision::plan;
    use tiervpc::topology::{build, build_with, RouteTarget, Tier};

    fn cidr(s: &str) -> Ipv4Cidr {
        s.parse().unwrap()
    }

    #[test]
    fn test_entity_counts() {
        let topology = build("prod").unwrap();

        assert_eq!(topology.subnets.len(), 6);
        assert_eq!(topology.elastic_ips.len(), 2);
        assert_eq!(topology.nat_gateways.len(), 2);
        assert_eq!(topology.route_tables.len(), 4);
        assert_eq!(topology.routes.len(), 3);
        assert_eq!(topology.associations.len(), 6);
        // VPC, IGW, attachment and the collections above
        assert_eq!(topology.resource_count(), 26);
    }

    #[test]
    fn test_build_is_deterministic() {
        assert_eq!(build("prod").unwrap(), build("prod").unwrap());
    }

    #[test]
    fn test_subnets_disjoint_and_contained() {
        let topology = build("dev").unwrap();

        for (i, a) in topology.subnets.iter().enumerate() {
            assert!(topology.network.cidr.contains(&a.cidr), "{} outside network", a.id);
            for b in &topology.subnets[i + 1..] {
                assert!(!a.cidr.overlaps(&b.cidr), "{} overlaps {}", a.id, b.id);
            }
        }
    }

    #[test]
    fn test_identities_unique() {
        let topology = build("prod").unwrap();
        let ids: HashSet<&str> = topology.resources().iter().map(|r| r.id()).collect();
        assert_eq!(ids.len(), topology.resource_count());
    }

    #[test]
    fn test_every_subnet_has_one_route_table() {
        let topology = build("prod").unwrap();

        for subnet in &topology.subnets {
            let count = topology
                .associations
                .iter()
                .filter(|a| a.subnet_id == subnet.id)
                .count();
            assert_eq!(count, 1, "{} has {} route tables", subnet.id, count);
        }
    }

    #[test]
    fn test_app_tier_routes_through_nat_in_same_zone() {
        let topology = build("prod").unwrap();

        for subnet in topology.subnets_in_tier(Tier::App) {
            let table = topology.route_table_for_subnet(&subnet.id).unwrap();
            let routes = topology.routes_in(&table.id);
            assert_eq!(routes.len(), 1);
            assert!(routes[0].is_default());

            let nat_id = match &routes[0].target {
                RouteTarget::NatGateway(id) => id,
                other => panic!("app subnet {} routed via {:?}", subnet.id, other),
            };
            let nat = topology.nat_gateways.iter().find(|n| &n.id == nat_id).unwrap();
            assert_eq!(nat.availability_zone, subnet.availability_zone);

            let host = topology.subnet(&nat.subnet_id).unwrap();
            assert_eq!(host.tier, Tier::Public);
            assert_eq!(host.availability_zone, subnet.availability_zone);
        }
    }

    #[test]
    fn test_public_tier_routes_through_internet_gateway() {
        let topology = build("prod").unwrap();

        for subnet in topology.subnets_in_tier(Tier::Public) {
            let table = topology.route_table_for_subnet(&subnet.id).unwrap();
            assert_eq!(table.id, "rtb-public");

            let routes = topology.routes_in(&table.id);
            assert_eq!(routes.len(), 1);
            assert_eq!(routes[0].target, RouteTarget::InternetGateway("igw-prod".to_string()));
        }
    }

    #[test]
    fn test_db_tier_is_isolated() {
        let topology = build("prod").unwrap();

        for subnet in topology.subnets_in_tier(Tier::Db) {
            let table = topology.route_table_for_subnet(&subnet.id).unwrap();
            assert_eq!(table.id, "rtb-db");
            assert!(topology.routes_in(&table.id).is_empty());
        }
        assert!(topology.nat_gateways.iter().all(|n| !n.subnet_id.starts_with("db-")));
    }

    #[test]
    fn test_prod_identities_and_blocks() {
        let topology = build("prod").unwrap();

        assert_eq!(topology.network.id, "vpc-prod");
        assert_eq!(topology.network.cidr, cidr("10.0.0.0/16"));
        assert_eq!(topology.internet_gateway.id, "igw-prod");

        let subnet = topology.subnet("app-ap-northeast-1c-prod").unwrap();
        assert_eq!(subnet.cidr, cidr("10.0.22.0/24"));
        assert_eq!(subnet.tags[0].value, "app-ap-northeast-1c-prod");

        let db = topology.subnet("db-ap-northeast-1a-prod").unwrap();
        assert_eq!(db.cidr, cidr("10.0.31.0/24"));

        let eip_ids: Vec<&str> = topology.elastic_ips.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(eip_ids, ["eip-eip1a-ap-northeast-1a-prod", "eip-eip1c-ap-northeast-1c-prod"]);

        let nat = topology.nat_gateway_in("ap-northeast-1c").unwrap();
        assert_eq!(nat.id, "ngw-ngw1c-ap-northeast-1c-prod");
        assert_eq!(nat.subnet_id, "public-ap-northeast-1c-prod");
        assert_eq!(nat.elastic_ip_id, "eip-eip1c-ap-northeast-1c-prod");

        let table_ids: Vec<&str> = topology.route_tables.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(table_ids, ["rtb-public", "rtb-app-1a", "rtb-app-1c", "rtb-db"]);
    }

    #[test]
    fn test_environments_do_not_collide() {
        let prod = build("prod").unwrap();
        let dev = build("dev").unwrap();

        let prod_ids: HashSet<&str> = prod.subnets.iter().map(|s| s.id.as_str()).collect();
        assert!(dev.subnets.iter().all(|s| !prod_ids.contains(s.id.as_str())));
    }

    #[test]
    fn test_empty_environment_rejected() {
        assert!(matches!(build(""), Err(TopologyError::InvalidInput(_))));
    }

    #[test]
    fn test_reduced_layout_without_nat() {
        let mut config = TopologyConfig::for_environment("dev");
        config.network.nat = NatMode::Disabled;
        let topology = build_with(&config).unwrap();

        assert!(topology.elastic_ips.is_empty());
        assert!(topology.nat_gateways.is_empty());
        assert_eq!(topology.routes.len(), 1);
        for subnet in topology.subnets_in_tier(Tier::App) {
            let table = topology.route_table_for_subnet(&subnet.id).unwrap();
            assert!(topology.routes_in(&table.id).is_empty());
        }
        assert!(topology.verify().is_ok());
    }

    #[test]
    fn test_custom_layout_from_yaml() {
        let yaml = r#"
general:
  name: three-zone
  environment: stage
network:
  cidr: 172.16.0.0/16
  availability_zones: [eu-west-1a, eu-west-1b, eu-west-1c]
  tiers:
    public: [172.16.0.0/24, 172.16.1.0/24, 172.16.2.0/24]
    app: [172.16.10.0/24, 172.16.11.0/24, 172.16.12.0/24]
    db: [172.16.20.0/24, 172.16.21.0/24, 172.16.22.0/24]
"#;
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", yaml).unwrap();

        let config = load_config(temp_file.path()).unwrap();
        let topology = build_with(&config).unwrap();

        assert_eq!(topology.subnets.len(), 9);
        assert_eq!(topology.nat_gateways.len(), 3);
        assert_eq!(topology.route_tables.len(), 5);
        assert!(topology.route_table("rtb-app-1b").is_some());
        assert!(topology.verify().is_ok());
    }

    #[test]
    fn test_overlapping_yaml_layout_rejected() {
        let yaml = r#"
general:
  environment: stage
network:
  tiers:
    public: [10.0.11.0/24, 10.0.12.0/24]
    app: [10.0.11.0/24, 10.0.22.0/24]
    db: [10.0.31.0/24, 10.0.32.0/24]
"#;
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", yaml).unwrap();

        let config = resolve_config(Some(temp_file.path()), &CliOverrides::default()).unwrap();
        assert!(matches!(
            build_with(&config),
            Err(TopologyError::OverlappingSubnets { .. })
        ));
    }

    #[test]
    fn test_template_covers_every_entity() {
        let topology = build("prod").unwrap();
        let plan = plan(&topology, "basic-vpc").unwrap();
        assert_eq!(plan.records.len(), topology.resource_count());

        let text = generate(&TopologyConfig::for_environment("prod"), OutputFormat::Template).unwrap();
        let template: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(template["Resources"].as_object().unwrap().len(), 26);
    }
}
