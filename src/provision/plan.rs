//! Resource records for the provisioning layer.
//!
//! Each topology entity becomes one record carrying its cloud resource type,
//! its properties with references to other records, and the records it must
//! follow. Records are emitted in the dependency order of the topology.

use crate::errors::{TopologyError, TopologyResult};
use crate::topology::{NetworkTopology, Resource, RouteTarget, Tag};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;

/// One declared cloud resource
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceRecord {
    /// Logical identity of the entity, also its `Name` tag
    pub name: String,
    /// Alphanumeric identifier used inside templates
    pub logical_id: String,
    pub resource_type: String,
    pub properties: Value,
    /// Logical ids of records this one references
    pub depends_on: Vec<String>,
}

/// Ordered records for one topology
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProvisioningPlan {
    pub description: String,
    pub environment: String,
    pub records: Vec<ResourceRecord>,
}

impl ProvisioningPlan {
    pub fn record(&self, name: &str) -> Option<&ResourceRecord> {
        self.records.iter().find(|record| record.name == name)
    }

    pub fn records_of_type(&self, resource_type: &str) -> Vec<&ResourceRecord> {
        self.records
            .iter()
            .filter(|record| record.resource_type == resource_type)
            .collect()
    }
}

/// Turn an identity such as `public-ap-northeast-1a-prod` into the
/// alphanumeric form `PublicApNortheast1aProd`.
pub fn logical_id(identity: &str) -> String {
    identity
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

fn reference(identity: &str) -> Value {
    json!({ "Ref": logical_id(identity) })
}

fn tags(tags: &[Tag]) -> Value {
    tags.iter()
        .map(|tag| json!({ "Key": tag.key, "Value": tag.value }))
        .collect()
}

fn resource_type(resource: &Resource<'_>) -> &'static str {
    match resource {
        Resource::Network(_) => "AWS::EC2::VPC",
        Resource::Subnet(_) => "AWS::EC2::Subnet",
        Resource::InternetGateway(_) => "AWS::EC2::InternetGateway",
        Resource::GatewayAttachment(_) => "AWS::EC2::VPCGatewayAttachment",
        Resource::ElasticIp(_) => "AWS::EC2::EIP",
        Resource::NatGateway(_) => "AWS::EC2::NatGateway",
        Resource::RouteTable(_) => "AWS::EC2::RouteTable",
        Resource::Route(_) => "AWS::EC2::Route",
        Resource::Association(_) => "AWS::EC2::SubnetRouteTableAssociation",
    }
}

fn properties(resource: &Resource<'_>) -> Value {
    match resource {
        Resource::Network(vpc) => json!({
            "CidrBlock": vpc.cidr.to_string(),
            "Tags": tags(&vpc.tags),
        }),
        Resource::Subnet(subnet) => json!({
            "CidrBlock": subnet.cidr.to_string(),
            "VpcId": reference(&subnet.network_id),
            "AvailabilityZone": subnet.availability_zone,
            "Tags": tags(&subnet.tags),
        }),
        Resource::InternetGateway(igw) => json!({
            "Tags": tags(&igw.tags),
        }),
        Resource::GatewayAttachment(attachment) => json!({
            "VpcId": reference(&attachment.network_id),
            "InternetGatewayId": reference(&attachment.internet_gateway_id),
        }),
        Resource::ElasticIp(eip) => json!({
            "Domain": eip.domain,
            "Tags": tags(&eip.tags),
        }),
        Resource::NatGateway(ngw) => json!({
            "AllocationId": { "Fn::GetAtt": [logical_id(&ngw.elastic_ip_id), "AllocationId"] },
            "SubnetId": reference(&ngw.subnet_id),
            "Tags": tags(&ngw.tags),
        }),
        Resource::RouteTable(table) => json!({
            "VpcId": reference(&table.network_id),
            "Tags": tags(&table.tags),
        }),
        Resource::Route(route) => {
            let mut props = json!({
                "RouteTableId": reference(&route.route_table_id),
                "DestinationCidrBlock": route.destination.to_string(),
            });
            let (key, target) = match &route.target {
                RouteTarget::InternetGateway(id) => ("GatewayId", id),
                RouteTarget::NatGateway(id) => ("NatGatewayId", id),
            };
            props[key] = reference(target);
            props
        }
        Resource::Association(assoc) => json!({
            "RouteTableId": reference(&assoc.route_table_id),
            "SubnetId": reference(&assoc.subnet_id),
        }),
    }
}

/// Produce one record per entity of `topology`, in dependency order.
///
/// Fails if two identities collapse onto the same logical id.
pub fn plan(topology: &NetworkTopology, description: &str) -> TopologyResult<ProvisioningPlan> {
    let mut seen: HashMap<String, String> = HashMap::new();
    let mut records = Vec::with_capacity(topology.resource_count());

    for resource in topology.resources() {
        let name = resource.id().to_string();
        let id = logical_id(&name);
        if let Some(previous) = seen.insert(id.clone(), name.clone()) {
            log::warn!("{} and {} both map to logical id {}", previous, name, id);
            return Err(TopologyError::DuplicateIdentity(id));
        }

        records.push(ResourceRecord {
            logical_id: id,
            resource_type: resource_type(&resource).to_string(),
            properties: properties(&resource),
            depends_on: resource.references().into_iter().map(logical_id).collect(),
            name,
        });
    }

    log::debug!("Planned {} resource records for {}", records.len(), topology.network.id);

    Ok(ProvisioningPlan {
        description: description.to_string(),
        environment: topology.environment.clone(),
        records,
    })
}
