//! Declarative template rendering.
//!
//! Renders a [`ProvisioningPlan`] as a JSON template document: a `Resources`
//! map keyed by logical id, plus `Outputs` exposing the network and subnet
//! ids to dependent stacks.

use super::plan::ProvisioningPlan;
use serde_json::{json, Map, Value};

const FORMAT_VERSION: &str = "2010-09-09";

/// Resource types whose ids are exported
const EXPORTED_TYPES: [&str; 2] = ["AWS::EC2::VPC", "AWS::EC2::Subnet"];

pub fn render(plan: &ProvisioningPlan) -> Value {
    let mut resources = Map::new();
    let mut outputs = Map::new();

    for record in &plan.records {
        let mut resource = json!({
            "Type": record.resource_type,
            "Properties": record.properties,
        });
        if !record.depends_on.is_empty() {
            resource["DependsOn"] = json!(record.depends_on);
        }
        resources.insert(record.logical_id.clone(), resource);

        if EXPORTED_TYPES.contains(&record.resource_type.as_str()) {
            outputs.insert(
                record.logical_id.clone(),
                json!({
                    "Description": record.name,
                    "Value": { "Ref": record.logical_id },
                    "Export": { "Name": record.name },
                }),
            );
        }
    }

    json!({
        "AWSTemplateFormatVersion": FORMAT_VERSION,
        "Description": format!("{} ({})", plan.description, plan.environment),
        "Resources": resources,
        "Outputs": outputs,
    })
}
