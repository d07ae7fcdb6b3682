//! Subnet block registry.
//!
//! This file tracks the CIDR blocks carved out of a network so that every
//! subnet stays inside the parent range and no two subnets share an address.

use super::cidr::Ipv4Cidr;
use crate::errors::{TopologyError, TopologyResult};
use std::collections::HashSet;

/// Registry of subnet blocks allocated from one parent network
#[derive(Debug, Clone)]
pub struct CidrRegistry {
    network: Ipv4Cidr,
    /// Allocated blocks in registration order, with their owning subnet id
    blocks: Vec<(String, Ipv4Cidr)>,
    /// Fast lookup for owner uniqueness
    owners: HashSet<String>,
}

impl CidrRegistry {
    pub fn new(network: Ipv4Cidr) -> Self {
        CidrRegistry {
            network,
            blocks: Vec::new(),
            owners: HashSet::new(),
        }
    }

    pub fn network(&self) -> Ipv4Cidr {
        self.network
    }

    /// Register `cidr` for `owner`.
    ///
    /// Fails if the block leaves the parent network, overlaps a block that is
    /// already registered, or if `owner` already holds a block.
    pub fn register(&mut self, owner: &str, cidr: Ipv4Cidr) -> TopologyResult<()> {
        if !self.network.contains(&cidr) {
            return Err(TopologyError::SubnetOutOfRange {
                subnet: owner.to_string(),
                cidr,
                network: self.network,
            });
        }

        if self.owners.contains(owner) {
            return Err(TopologyError::DuplicateIdentity(owner.to_string()));
        }

        if let Some((existing, existing_cidr)) = self
            .blocks
            .iter()
            .find(|(_, block)| block.overlaps(&cidr))
        {
            return Err(TopologyError::OverlappingSubnets {
                first: existing.clone(),
                first_cidr: *existing_cidr,
                second: owner.to_string(),
                second_cidr: cidr,
            });
        }

        log::debug!("Registered {} for {} in {}", cidr, owner, self.network);
        self.owners.insert(owner.to_string());
        self.blocks.push((owner.to_string(), cidr));
        Ok(())
    }

    /// Get the subnet id that owns the block containing `cidr`, if any
    pub fn owner_of(&self, cidr: &Ipv4Cidr) -> Option<&str> {
        self.blocks
            .iter()
            .find(|(_, block)| block.contains(cidr))
            .map(|(owner, _)| owner.as_str())
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Addresses of the parent network not yet handed to any subnet
    pub fn unallocated(&self) -> u64 {
        let used: u64 = self.blocks.iter().map(|(_, block)| block.size()).sum();
        self.network.size() - used
    }
}
