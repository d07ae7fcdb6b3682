//! Topology entity definitions.
//!
//! Every entity is a plain value produced once by its constructor. Entities
//! refer to one another by logical identity, never by pointer, so the whole
//! graph is an arena the builder assembles in dependency order.

use crate::errors::{TopologyError, TopologyResult};
use crate::ip::Ipv4Cidr;
use crate::utils::validation::zone_suffix;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Subnet tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Routed to the internet gateway; hosts the NAT gateways
    Public,
    /// Egresses through the NAT gateway of its own zone
    App,
    /// No egress route at all
    Db,
}

impl Tier {
    /// Tiers in construction order
    pub const ALL: [Tier; 3] = [Tier::Public, Tier::App, Tier::Db];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Public => "public",
            Tier::App => "app",
            Tier::Db => "db",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resource tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    /// The `Name` tag carrying a resource's logical identity
    pub fn name(value: &str) -> Self {
        Tag {
            key: "Name".to_string(),
            value: value.to_string(),
        }
    }
}

/// The virtual private network owning every subnet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    pub id: String,
    pub cidr: Ipv4Cidr,
    pub tags: Vec<Tag>,
}

impl Network {
    pub fn new(cidr: Ipv4Cidr, environment: &str) -> Self {
        let id = format!("vpc-{}", environment);
        Network {
            tags: vec![Tag::name(&id)],
            id,
            cidr,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subnet {
    /// `{tier}-{availability_zone}-{environment}`
    pub id: String,
    pub network_id: String,
    pub tier: Tier,
    pub availability_zone: String,
    pub cidr: Ipv4Cidr,
    pub tags: Vec<Tag>,
}

impl Subnet {
    /// Declare a subnet inside `network`.
    ///
    /// Range and overlap checks belong to the caller, which sees every
    /// sibling block; see [`crate::ip::CidrRegistry`].
    pub fn new(network: &Network, tier: Tier, availability_zone: &str, cidr: Ipv4Cidr, environment: &str) -> Self {
        let id = format!("{}-{}-{}", tier, availability_zone, environment);
        Subnet {
            tags: vec![Tag::name(&id)],
            id,
            network_id: network.id.clone(),
            tier,
            availability_zone: availability_zone.to_string(),
            cidr,
        }
    }

    pub fn is_public(&self) -> bool {
        self.tier == Tier::Public
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternetGateway {
    pub id: String,
    pub tags: Vec<Tag>,
}

impl InternetGateway {
    pub fn new(environment: &str) -> Self {
        let id = format!("igw-{}", environment);
        InternetGateway {
            tags: vec![Tag::name(&id)],
            id,
        }
    }
}

/// Attachment of the internet gateway to the network, a resource of its own
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayAttachment {
    pub id: String,
    pub network_id: String,
    pub internet_gateway_id: String,
}

impl GatewayAttachment {
    pub fn new(network: &Network, internet_gateway: &InternetGateway) -> Self {
        GatewayAttachment {
            id: format!("{}-attachment", internet_gateway.id),
            network_id: network.id.clone(),
            internet_gateway_id: internet_gateway.id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElasticIp {
    /// `eip-eip{suffix}-{availability_zone}-{environment}`
    pub id: String,
    pub availability_zone: String,
    pub domain: String,
    pub tags: Vec<Tag>,
}

impl ElasticIp {
    pub fn new(availability_zone: &str, environment: &str) -> Self {
        let id = format!(
            "eip-eip{}-{}-{}",
            zone_suffix(availability_zone),
            availability_zone,
            environment
        );
        ElasticIp {
            tags: vec![Tag::name(&id)],
            id,
            availability_zone: availability_zone.to_string(),
            domain: "vpc".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NatGateway {
    /// `ngw-ngw{suffix}-{availability_zone}-{environment}`
    pub id: String,
    pub availability_zone: String,
    /// Public subnet hosting the gateway
    pub subnet_id: String,
    /// Elastic IP the gateway egresses through
    pub elastic_ip_id: String,
    pub tags: Vec<Tag>,
}

impl NatGateway {
    /// Site a NAT gateway in `subnet`, egressing through `elastic_ip`.
    ///
    /// The subnet must be public; a NAT gateway anywhere else has no route
    /// to the internet itself.
    pub fn new(subnet: &Subnet, elastic_ip: &ElasticIp, environment: &str) -> TopologyResult<Self> {
        let zone = subnet.availability_zone.as_str();
        let id = format!("ngw-ngw{}-{}-{}", zone_suffix(zone), zone, environment);

        if !subnet.is_public() {
            return Err(TopologyError::NatRequiresPublicSubnet {
                nat: id,
                subnet: subnet.id.clone(),
                tier: subnet.tier,
            });
        }

        Ok(NatGateway {
            tags: vec![Tag::name(&id)],
            id,
            availability_zone: zone.to_string(),
            subnet_id: subnet.id.clone(),
            elastic_ip_id: elastic_ip.id.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTable {
    pub id: String,
    pub network_id: String,
    pub tier: Tier,
    /// Set for tables dedicated to a single zone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_zone: Option<String>,
    pub tags: Vec<Tag>,
}

impl RouteTable {
    /// Table shared by every subnet of a tier, `rtb-{tier}`
    pub fn shared(network: &Network, tier: Tier) -> Self {
        let id = format!("rtb-{}", tier);
        RouteTable {
            tags: vec![Tag::name(&id)],
            id,
            network_id: network.id.clone(),
            tier,
            availability_zone: None,
        }
    }

    /// Table for one tier in one zone, `rtb-{tier}-{suffix}`
    pub fn zonal(network: &Network, tier: Tier, availability_zone: &str) -> Self {
        let id = format!("rtb-{}-{}", tier, zone_suffix(availability_zone));
        RouteTable {
            tags: vec![Tag::name(&id)],
            id,
            network_id: network.id.clone(),
            tier,
            availability_zone: Some(availability_zone.to_string()),
        }
    }
}

/// Where a route sends its traffic. Exactly one target per route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum RouteTarget {
    InternetGateway(String),
    NatGateway(String),
}

impl RouteTarget {
    pub fn id(&self) -> &str {
        match self {
            RouteTarget::InternetGateway(id) | RouteTarget::NatGateway(id) => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub id: String,
    pub route_table_id: String,
    pub destination: Ipv4Cidr,
    pub target: RouteTarget,
}

impl Route {
    /// `0.0.0.0/0` through the internet gateway
    pub fn default_via_gateway(route_table: &RouteTable, internet_gateway: &InternetGateway) -> Self {
        Route {
            id: Self::default_route_id(route_table),
            route_table_id: route_table.id.clone(),
            destination: Ipv4Cidr::ANY,
            target: RouteTarget::InternetGateway(internet_gateway.id.clone()),
        }
    }

    /// `0.0.0.0/0` through a NAT gateway
    pub fn default_via_nat(route_table: &RouteTable, nat_gateway: &NatGateway) -> Self {
        Route {
            id: Self::default_route_id(route_table),
            route_table_id: route_table.id.clone(),
            destination: Ipv4Cidr::ANY,
            target: RouteTarget::NatGateway(nat_gateway.id.clone()),
        }
    }

    fn default_route_id(route_table: &RouteTable) -> String {
        let base = route_table.id.trim_start_matches("rtb-");
        format!("{}-route", base)
    }

    pub fn is_default(&self) -> bool {
        self.destination == Ipv4Cidr::ANY
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubnetRouteTableAssociation {
    pub id: String,
    pub route_table_id: String,
    pub subnet_id: String,
}

impl SubnetRouteTableAssociation {
    pub fn new(route_table: &RouteTable, subnet: &Subnet) -> Self {
        SubnetRouteTableAssociation {
            id: format!("rtbassoc-{}", subnet.id),
            route_table_id: route_table.id.clone(),
            subnet_id: subnet.id.clone(),
        }
    }
}

/// Complete network description, ready for the provisioning layer.
///
/// Fields hold each entity kind in creation order; [`NetworkTopology::resources`]
/// walks the whole graph in dependency order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkTopology {
    pub environment: String,
    pub network: Network,
    pub subnets: Vec<Subnet>,
    pub internet_gateway: InternetGateway,
    pub gateway_attachment: GatewayAttachment,
    pub elastic_ips: Vec<ElasticIp>,
    pub nat_gateways: Vec<NatGateway>,
    pub route_tables: Vec<RouteTable>,
    pub routes: Vec<Route>,
    pub associations: Vec<SubnetRouteTableAssociation>,
}

/// Borrowed view of any entity in the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource<'a> {
    Network(&'a Network),
    Subnet(&'a Subnet),
    InternetGateway(&'a InternetGateway),
    GatewayAttachment(&'a GatewayAttachment),
    ElasticIp(&'a ElasticIp),
    NatGateway(&'a NatGateway),
    RouteTable(&'a RouteTable),
    Route(&'a Route),
    Association(&'a SubnetRouteTableAssociation),
}

impl<'a> Resource<'a> {
    pub fn id(&self) -> &'a str {
        match *self {
            Resource::Network(r) => r.id.as_str(),
            Resource::Subnet(r) => r.id.as_str(),
            Resource::InternetGateway(r) => r.id.as_str(),
            Resource::GatewayAttachment(r) => r.id.as_str(),
            Resource::ElasticIp(r) => r.id.as_str(),
            Resource::NatGateway(r) => r.id.as_str(),
            Resource::RouteTable(r) => r.id.as_str(),
            Resource::Route(r) => r.id.as_str(),
            Resource::Association(r) => r.id.as_str(),
        }
    }

    /// Identities this entity depends on
    pub fn references(&self) -> Vec<&'a str> {
        match *self {
            Resource::Network(_) | Resource::InternetGateway(_) | Resource::ElasticIp(_) => vec![],
            Resource::Subnet(r) => vec![r.network_id.as_str()],
            Resource::GatewayAttachment(r) => vec![r.network_id.as_str(), r.internet_gateway_id.as_str()],
            Resource::NatGateway(r) => vec![r.subnet_id.as_str(), r.elastic_ip_id.as_str()],
            Resource::RouteTable(r) => vec![r.network_id.as_str()],
            Resource::Route(r) => vec![r.route_table_id.as_str(), r.target.id()],
            Resource::Association(r) => vec![r.route_table_id.as_str(), r.subnet_id.as_str()],
        }
    }

    pub fn tags(&self) -> &'a [Tag] {
        match *self {
            Resource::Network(r) => &r.tags,
            Resource::Subnet(r) => &r.tags,
            Resource::InternetGateway(r) => &r.tags,
            Resource::ElasticIp(r) => &r.tags,
            Resource::NatGateway(r) => &r.tags,
            Resource::RouteTable(r) => &r.tags,
            Resource::GatewayAttachment(_) | Resource::Route(_) | Resource::Association(_) => &[],
        }
    }
}

impl NetworkTopology {
    /// Every entity in dependency order: network, subnets, internet gateway
    /// and attachment, Elastic IPs, NAT gateways, then each route table
    /// followed by its routes and subnet associations.
    pub fn resources(&self) -> Vec<Resource<'_>> {
        let mut resources = Vec::with_capacity(self.resource_count());
        resources.push(Resource::Network(&self.network));
        resources.extend(self.subnets.iter().map(Resource::Subnet));
        resources.push(Resource::InternetGateway(&self.internet_gateway));
        resources.push(Resource::GatewayAttachment(&self.gateway_attachment));
        resources.extend(self.elastic_ips.iter().map(Resource::ElasticIp));
        resources.extend(self.nat_gateways.iter().map(Resource::NatGateway));

        for table in &self.route_tables {
            resources.push(Resource::RouteTable(table));
            resources.extend(
                self.routes
                    .iter()
                    .filter(|route| route.route_table_id == table.id)
                    .map(Resource::Route),
            );
            resources.extend(
                self.associations
                    .iter()
                    .filter(|assoc| assoc.route_table_id == table.id)
                    .map(Resource::Association),
            );
        }

        resources
    }

    /// Total number of entities in the graph
    pub fn resource_count(&self) -> usize {
        3 + self.subnets.len()
            + self.elastic_ips.len()
            + self.nat_gateways.len()
            + self.route_tables.len()
            + self.routes.len()
            + self.associations.len()
    }
}
