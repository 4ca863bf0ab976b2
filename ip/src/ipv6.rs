// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! IPv6 address type

use crate::IpAddress;
use crate::bytes::AddressBytes;
use crate::cidr::InvalidCidr;
use crate::error::InvalidIpAddress;
use crate::format::{FormatError, NativeFormatter, Notation, ProtocolFormatter, RawAddress};
use crate::strategy::{Compatible, EmbeddingStrategy, Mapped};
use core::fmt::{Debug, Display, Formatter};
use core::net::Ipv6Addr;
use core::str::FromStr;

/// An IPv6 address held as 16 raw bytes.
#[must_use]
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Ipv6Address(AddressBytes<16>);

impl Ipv6Address {
    /// Length of the binary form in bytes.
    pub const LENGTH: usize = 16;

    /// Parse an address from colon-hex notation.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIpAddress`] if the text is not a valid IPv6 address.
    pub fn new(text: &str) -> Result<Self, InvalidIpAddress> {
        Self::with_formatter(text, &NativeFormatter)
    }

    /// Parse an address using the supplied formatter.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIpAddress`] if the formatter rejects the text or produces anything other
    /// than 16 bytes.
    #[tracing::instrument(level = "trace", skip(formatter))]
    pub fn with_formatter(
        text: &str,
        formatter: &dyn ProtocolFormatter,
    ) -> Result<Self, InvalidIpAddress> {
        let raw = formatter
            .parse(text)
            .map_err(|e| InvalidIpAddress::new(text, e))?;
        match raw {
            RawAddress::V6(octets) => Ok(Self(AddressBytes::new(octets))),
            RawAddress::V4(_) => AddressBytes::from_slice(raw.as_bytes())
                .map(Self)
                .map_err(|e| InvalidIpAddress::new(text, e)),
        }
    }

    /// Build an address from its 16 byte binary form.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIpAddress`] if `binary` is not exactly 16 bytes long.
    pub fn from_binary(binary: &[u8]) -> Result<Self, InvalidIpAddress> {
        AddressBytes::from_slice(binary)
            .map(Self)
            .map_err(|e| InvalidIpAddress::from_binary(binary, e))
    }

    /// The underlying bytes.
    pub const fn bytes(&self) -> AddressBytes<16> {
        self.0
    }

    /// A copy of the raw bytes.
    #[must_use]
    pub const fn octets(&self) -> [u8; 16] {
        self.0.octets()
    }

    /// Colon-hex notation with the longest run of zero groups elided (`2001:db8::1`).
    #[must_use]
    pub fn compacted_address(&self) -> String {
        NativeFormatter::compacted(self.octets())
    }

    /// Colon-hex notation with all eight groups written out in full.
    #[must_use]
    pub fn expanded_address(&self) -> String {
        NativeFormatter::expanded(self.octets())
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

    /// Returns true if the address is an IPv4-mapped address (`::ffff:0:0/96`).
    #[must_use]
    pub fn is_mapped(&self) -> bool {
        Mapped.is_embedded(self.0.as_slice())
    }

    /// Returns true if the address is an IPv4-compatible address (`::/96`).
    #[must_use]
    pub fn is_compatible(&self) -> bool {
        Compatible.is_embedded(self.0.as_slice())
    }

    const LOOPBACK: [u8; 16] = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1];
    const MULTICAST: ([u8; 16], usize) = ([0xff, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], 8);
    const LINK_LOCAL: ([u8; 16], usize) =
        ([0xfe, 0x80, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], 10);
    const UNIQUE_LOCAL: ([u8; 16], usize) =
        ([0xfc, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], 7);
}

impl IpAddress for Ipv6Address {
    fn binary(&self) -> &[u8] {
        self.0.as_slice()
    }

    fn version(&self) -> u8 {
        6
    }

    fn network_ip(&self, cidr: i32) -> Result<Self, InvalidCidr> {
        self.0.network(cidr).map(Self)
    }

    fn broadcast_ip(&self, cidr: i32) -> Result<Self, InvalidCidr> {
        self.0.broadcast(cidr).map(Self)
    }

    fn in_range(&self, other: &dyn IpAddress, cidr: i32) -> Result<bool, InvalidCidr> {
        let ours = self.0.network(cidr)?;
        match AddressBytes::<16>::from_slice(other.binary()) {
            Ok(theirs) => Ok(ours == theirs.network(cidr)?),
            Err(_) => Ok(false),
        }
    }

    fn is_link_local(&self) -> bool {
        let (block, len) = Self::LINK_LOCAL;
        self.0.within(block, len)
    }

    fn is_loopback(&self) -> bool {
        self.octets() == Self::LOOPBACK
    }

    fn is_multicast(&self) -> bool {
        let (block, len) = Self::MULTICAST;
        self.0.within(block, len)
    }

    fn is_private_use(&self) -> bool {
        let (block, len) = Self::UNIQUE_LOCAL;
        self.0.within(block, len)
    }

    fn is_unspecified(&self) -> bool {
        self.octets() == [0; 16]
    }
}

impl From<[u8; 16]> for Ipv6Address {
    fn from(value: [u8; 16]) -> Self {
        Self(AddressBytes::new(value))
    }
}

impl From<Ipv6Address> for [u8; 16] {
    fn from(value: Ipv6Address) -> Self {
        value.octets()
    }
}

impl From<Ipv6Addr> for Ipv6Address {
    fn from(value: Ipv6Addr) -> Self {
        Self::from(value.octets())
    }
}

impl From<Ipv6Address> for Ipv6Addr {
    fn from(value: Ipv6Address) -> Self {
        Ipv6Addr::from(value.octets())
    }
}

impl FromStr for Ipv6Address {
    type Err = InvalidIpAddress;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Ipv6Address {
    type Error = InvalidIpAddress;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Ipv6Address> for String {
    fn from(value: Ipv6Address) -> Self {
        value.compacted_address()
    }
}

impl Display for Ipv6Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.compacted_address())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::error::AddressCause;
    use crate::ipv4::Ipv4Address;

    fn ip(text: &str) -> Ipv6Address {
        Ipv6Address::new(text).unwrap()
    }

    #[test]
    fn construction_and_notation() {
        let addr = ip("2001:db8::a60:8a2e:370:7334");
        assert_eq!(addr.version(), 6);
        assert_eq!(addr.binary().len(), Ipv6Address::LENGTH);
        assert_eq!(addr.compacted_address(), "2001:db8::a60:8a2e:370:7334");
        assert_eq!(
            addr.expanded_address(),
            "2001:0db8:0000:0000:0a60:8a2e:0370:7334"
        );
        assert_eq!(addr.to_string(), addr.compacted_address());
        assert_eq!(
            addr.render_with(&NativeFormatter, Notation::Full).unwrap(),
            addr.expanded_address()
        );
        assert_eq!(Ipv6Address::from_binary(addr.binary()).unwrap(), addr);
    }

    #[test]
    fn ipv4_text_is_rejected() {
        let err = Ipv6Address::new("192.0.2.1").unwrap_err();
        assert!(matches!(err.cause(), AddressCause::Length(_)));
        let err = Ipv6Address::new("2001:db8::g").unwrap_err();
        assert!(matches!(err.cause(), AddressCause::Format(_)));
        assert!(Ipv6Address::from_binary(&[0; 15]).is_err());
    }

    #[test]
    fn network_and_broadcast() {
        let addr = ip("2001:db8:a::123");
        assert_eq!(addr.network_ip(64).unwrap(), ip("2001:db8:a::"));
        assert_eq!(
            addr.broadcast_ip(64).unwrap(),
            ip("2001:db8:a:0:ffff:ffff:ffff:ffff")
        );
        assert_eq!(addr.network_ip(36).unwrap(), ip("2001:db8::"));
        assert_eq!(
            addr.broadcast_ip(36).unwrap(),
            ip("2001:db8:fff:ffff:ffff:ffff:ffff:ffff")
        );
        assert_eq!(addr.network_ip(128).unwrap(), addr);
        assert_eq!(addr.network_ip(0).unwrap(), ip("::"));
    }

    #[test]
    fn invalid_cidr() {
        let addr = ip("2001:db8::1");
        assert_eq!(addr.network_ip(-1).unwrap_err(), InvalidCidr::new(-1, 128));
        assert_eq!(addr.network_ip(129).unwrap_err(), InvalidCidr::new(129, 128));
        assert_eq!(addr.broadcast_ip(129).unwrap_err(), InvalidCidr::new(129, 128));
        assert!(addr.in_range(&addr, 129).is_err());
    }

    #[test]
    fn range_containment() {
        let addr = ip("2001:db8::1");
        assert!(addr.in_range(&ip("2001:db8::ffff"), 112).unwrap());
        assert!(!addr.in_range(&ip("2001:db8::1:0"), 112).unwrap());
        assert!(addr.in_range(&ip("2001:db8:ffff::"), 32).unwrap());
        let v4 = Ipv4Address::new("192.0.2.1").unwrap();
        assert!(!addr.in_range(&v4, 0).unwrap());
    }

    #[test]
    fn classification() {
        assert!(ip("::1").is_loopback());
        assert!(!ip("::2").is_loopback());
        assert!(ip("ff02::1").is_multicast());
        assert!(!ip("fe02::1").is_multicast());
        assert!(ip("fe80::1").is_link_local());
        assert!(ip("febf:ffff::1").is_link_local());
        assert!(!ip("fec0::1").is_link_local());
        assert!(ip("fc00::1").is_private_use());
        assert!(ip("fd12:3456::1").is_private_use());
        assert!(!ip("fe00::1").is_private_use());
        assert!(ip("::").is_unspecified());
        assert!(!ip("::1").is_unspecified());
    }

    #[test]
    fn embedded_forms() {
        assert!(ip("::ffff:192.0.2.1").is_mapped());
        assert!(!ip("::ffff:192.0.2.1").is_compatible());
        assert!(ip("::192.0.2.1").is_compatible());
        assert!(!ip("2001:db8::1").is_mapped());
    }

    #[test]
    fn classification_agrees_with_std() {
        bolero::check!()
            .with_type()
            .cloned()
            .for_each(|addr: Ipv6Address| {
                let std = Ipv6Addr::from(addr);
                assert_eq!(addr.is_loopback(), std.is_loopback());
                assert_eq!(addr.is_multicast(), std.is_multicast());
                assert_eq!(addr.is_unspecified(), std.is_unspecified());
                assert_eq!(addr.is_link_local(), std.segments()[0] & 0xffc0 == 0xfe80);
                assert_eq!(addr.is_private_use(), std.segments()[0] & 0xfe00 == 0xfc00);
            });
    }

    #[test]
    fn notation_matches_formatter() {
        bolero::check!()
            .with_type()
            .cloned()
            .for_each(|addr: Ipv6Address| {
                assert_eq!(
                    addr.compacted_address(),
                    NativeFormatter
                        .render(addr.binary(), Notation::Compacted)
                        .unwrap()
                );
                assert_eq!(
                    addr.expanded_address(),
                    NativeFormatter.render(addr.binary(), Notation::Full).unwrap()
                );
                assert_eq!(addr.to_string(), addr.compacted_address());
            });
    }

    #[test]
    fn in_range_is_reflexive() {
        bolero::check!()
            .with_type()
            .cloned()
            .for_each(|(addr, cidr): (Ipv6Address, u8)| {
                let cidr = i32::from(cidr % 129);
                assert!(addr.in_range(&addr, cidr).unwrap());
                assert!(addr.network_ip(cidr).unwrap() <= addr);
                assert!(addr.broadcast_ip(cidr).unwrap() >= addr);
            });
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_compacted_notation() {
        let addr = ip("2001:db8::1");
        let yaml = serde_yaml_ng::to_string(&addr).unwrap();
        assert_eq!(yaml.trim().trim_matches(['\'', '"']), "2001:db8::1");
        let back: Ipv6Address = serde_yaml_ng::from_str(&yaml).unwrap();
        assert_eq!(back, addr);
    }
}
