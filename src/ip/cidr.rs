//! IPv4 CIDR blocks.
//!
//! A block is stored in canonical form: the address is the network address
//! and every host bit is zero. Range arithmetic is done on the `u32` form of
//! the address, so containment and overlap are two comparisons each.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;
use thiserror::Error;

/// CIDR parsing and validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CidrError {
    #[error("Invalid CIDR notation: {0}")]
    InvalidNotation(String),

    #[error("Invalid IPv4 address: {0}")]
    InvalidAddress(String),

    #[error("Invalid prefix length: {0} (must be 0-32)")]
    InvalidPrefixLength(u8),

    #[error("CIDR {given} has host bits set (did you mean {canonical}?)")]
    HostBitsSet { given: String, canonical: String },
}

/// IPv4 network in CIDR notation, e.g. `10.0.11.0/24`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ipv4Cidr {
    address: Ipv4Addr,
    prefix_len: u8,
}

impl Ipv4Cidr {
    /// `0.0.0.0/0`, the destination of a default route.
    pub const ANY: Ipv4Cidr = Ipv4Cidr::from_parts(Ipv4Addr::UNSPECIFIED, 0);

    /// Create a block, rejecting prefixes over 32 and addresses with host bits set.
    pub fn new(address: Ipv4Addr, prefix_len: u8) -> Result<Self, CidrError> {
        if prefix_len > 32 {
            return Err(CidrError::InvalidPrefixLength(prefix_len));
        }

        let raw = u32::from(address);
        let mask = Self::mask_for(prefix_len);
        if raw & !mask != 0 {
            return Err(CidrError::HostBitsSet {
                given: format!("{}/{}", address, prefix_len),
                canonical: format!("{}/{}", Ipv4Addr::from(raw & mask), prefix_len),
            });
        }

        Ok(Self { address, prefix_len })
    }

    /// Build a block from constants known to be canonical.
    pub(crate) const fn from_parts(address: Ipv4Addr, prefix_len: u8) -> Self {
        Self { address, prefix_len }
    }

    fn mask_for(prefix_len: u8) -> u32 {
        if prefix_len == 0 {
            0
        } else {
            u32::MAX << (32 - u32::from(prefix_len))
        }
    }

    pub fn address(&self) -> Ipv4Addr {
        self.address
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    pub fn netmask(&self) -> Ipv4Addr {
        Ipv4Addr::from(Self::mask_for(self.prefix_len))
    }

    /// Last address of the block
    pub fn broadcast(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.last())
    }

    /// Number of addresses covered by the block
    pub fn size(&self) -> u64 {
        1u64 << (32 - u32::from(self.prefix_len))
    }

    fn first(&self) -> u32 {
        u32::from(self.address)
    }

    fn last(&self) -> u32 {
        self.first() | !Self::mask_for(self.prefix_len)
    }

    /// True if `other` lies entirely within this block.
    pub fn contains(&self, other: &Ipv4Cidr) -> bool {
        self.first() <= other.first() && other.last() <= self.last()
    }

    pub fn contains_addr(&self, addr: Ipv4Addr) -> bool {
        let raw = u32::from(addr);
        self.first() <= raw && raw <= self.last()
    }

    /// True if the two blocks share at least one address.
    pub fn overlaps(&self, other: &Ipv4Cidr) -> bool {
        self.first() <= other.last() && other.first() <= self.last()
    }
}

impl fmt::Display for Ipv4Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix_len)
    }
}

impl FromStr for Ipv4Cidr {
    type Err = CidrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr_str, prefix_str) = s
            .trim()
            .split_once('/')
            .ok_or_else(|| CidrError::InvalidNotation(s.to_string()))?;

        let address = addr_str
            .parse::<Ipv4Addr>()
            .map_err(|_| CidrError::InvalidAddress(addr_str.to_string()))?;

        let prefix_len = prefix_str
            .parse::<u8>()
            .map_err(|_| CidrError::InvalidNotation(s.to_string()))?;

        Self::new(address, prefix_len)
    }
}

impl Serialize for Ipv4Cidr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Ipv4Cidr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
