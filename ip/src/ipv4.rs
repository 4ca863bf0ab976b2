// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! IPv4 address type

use crate::IpAddress;
use crate::bytes::AddressBytes;
use crate::cidr::InvalidCidr;
use crate::error::InvalidIpAddress;
use crate::format::{FormatError, NativeFormatter, Notation, ProtocolFormatter, RawAddress};
use core::fmt::{Debug, Display, Formatter};
use core::net::Ipv4Addr;
use core::str::FromStr;

/// An IPv4 address held as 4 raw bytes.
#[must_use]
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Ipv4Address(AddressBytes<4>);

impl Ipv4Address {
    /// Length of the binary form in bytes.
    pub const LENGTH: usize = 4;

    /// Parse an address from dotted-quad notation.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIpAddress`] if the text is not a valid IPv4 address.
    pub fn new(text: &str) -> Result<Self, InvalidIpAddress> {
        Self::with_formatter(text, &NativeFormatter)
    }

    /// Parse an address using the supplied formatter.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIpAddress`] if the formatter rejects the text or produces anything other
    /// than 4 bytes.
    #[tracing::instrument(level = "trace", skip(formatter))]
    pub fn with_formatter(
        text: &str,
        formatter: &dyn ProtocolFormatter,
    ) -> Result<Self, InvalidIpAddress> {
        let raw = formatter
            .parse(text)
            .map_err(|e| InvalidIpAddress::new(text, e))?;
        match raw {
            RawAddress::V4(octets) => Ok(Self(AddressBytes::new(octets))),
            RawAddress::V6(_) => AddressBytes::from_slice(raw.as_bytes())
                .map(Self)
                .map_err(|e| InvalidIpAddress::new(text, e)),
        }
    }

    /// Build an address from its 4 byte binary form.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIpAddress`] if `binary` is not exactly 4 bytes long.
    pub fn from_binary(binary: &[u8]) -> Result<Self, InvalidIpAddress> {
        AddressBytes::from_slice(binary)
            .map(Self)
            .map_err(|e| InvalidIpAddress::from_binary(binary, e))
    }

    /// The underlying bytes.
    pub const fn bytes(&self) -> AddressBytes<4> {
        self.0
    }

    /// A copy of the raw bytes.
    #[must_use]
    pub const fn octets(&self) -> [u8; 4] {
        self.0.octets()
    }

    /// The address in dotted-quad notation.
    #[must_use]
    pub fn dot_address(&self) -> String {
        NativeFormatter::dotted(self.octets())
    }

    /// Render the address with a specific formatter.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError`] if the formatter fails to render the bytes.
    pub fn render_with(
        &self,
        formatter: &dyn ProtocolFormatter,
        notation: Notation,
    ) -> Result<String, FormatError> {
        formatter.render(self.0.as_slice(), notation)
    }

    const LOOPBACK: ([u8; 4], usize) = ([127, 0, 0, 0], 8);
    const MULTICAST: ([u8; 4], usize) = ([224, 0, 0, 0], 4);
    const LINK_LOCAL: ([u8; 4], usize) = ([169, 254, 0, 0], 16);
    const PRIVATE_USE: [([u8; 4], usize); 3] = [
        ([10, 0, 0, 0], 8),
        ([172, 16, 0, 0], 12),
        ([192, 168, 0, 0], 16),
    ];
}

impl IpAddress for Ipv4Address {
    fn binary(&self) -> &[u8] {
        self.0.as_slice()
    }

    fn version(&self) -> u8 {
        4
    }

    fn network_ip(&self, cidr: i32) -> Result<Self, InvalidCidr> {
        self.0.network(cidr).map(Self)
    }

    fn broadcast_ip(&self, cidr: i32) -> Result<Self, InvalidCidr> {
        self.0.broadcast(cidr).map(Self)
    }

    fn in_range(&self, other: &dyn IpAddress, cidr: i32) -> Result<bool, InvalidCidr> {
        let ours = self.0.network(cidr)?;
        match AddressBytes::<4>::from_slice(other.binary()) {
            Ok(theirs) => Ok(ours == theirs.network(cidr)?),
            Err(_) => Ok(false),
        }
    }

    fn is_link_local(&self) -> bool {
        let (block, len) = Self::LINK_LOCAL;
        self.0.within(block, len)
    }

    fn is_loopback(&self) -> bool {
        let (block, len) = Self::LOOPBACK;
        self.0.within(block, len)
    }

    fn is_multicast(&self) -> bool {
        let (block, len) = Self::MULTICAST;
        self.0.within(block, len)
    }

    fn is_private_use(&self) -> bool {
        Self::PRIVATE_USE
            .iter()
            .any(|(block, len)| self.0.within(*block, *len))
    }

    fn is_unspecified(&self) -> bool {
        self.octets() == [0; 4]
    }
}

impl From<[u8; 4]> for Ipv4Address {
    fn from(value: [u8; 4]) -> Self {
        Self(AddressBytes::new(value))
    }
}

impl From<Ipv4Address> for [u8; 4] {
    fn from(value: Ipv4Address) -> Self {
        value.octets()
    }
}

impl From<Ipv4Addr> for Ipv4Address {
    fn from(value: Ipv4Addr) -> Self {
        Self::from(value.octets())
    }
}

impl From<Ipv4Address> for Ipv4Addr {
    fn from(value: Ipv4Address) -> Self {
        Ipv4Addr::from(value.octets())
    }
}

impl FromStr for Ipv4Address {
    type Err = InvalidIpAddress;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Ipv4Address {
    type Error = InvalidIpAddress;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Ipv4Address> for String {
    fn from(value: Ipv4Address) -> Self {
        value.dot_address()
    }
}

impl Display for Ipv4Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.dot_address())
    }
}
