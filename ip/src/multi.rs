// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Dual-stack address which behaves as IPv4 whenever its 16 bytes carry an embedded IPv4 address.

use crate::IpAddress;
use crate::cidr::InvalidCidr;
use crate::config::default_embedding_strategy;
use crate::error::{InvalidIpAddress, WrongVersion};
use crate::format::{NativeFormatter, ProtocolFormatter, RawAddress};
use crate::ipv4::Ipv4Address;
use crate::ipv6::Ipv6Address;
use crate::strategy::EmbeddingStrategy;
use core::fmt::{Debug, Display, Formatter};
use core::hash::{Hash, Hasher};
use core::str::FromStr;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// Width of an IPv4 address in bits.
const IPV4_BITS: i32 = 32;

/// Number of bits which precede an embedded IPv4 address in the 16 byte form.
const EMBEDDING_PREFIX_BITS: i32 = 96;

/// An address stored as 16 bytes which may carry an embedded IPv4 address.
///
/// Whether the address is *embedded* is decided by its [`EmbeddingStrategy`] and resolved once, on
/// first use.  Embedded addresses report version 4 and compute CIDR arithmetic and classification
/// on the extracted 4 bytes; all other addresses behave exactly as an [`Ipv6Address`].
///
/// Equality and hashing only consider the 16 bytes, not the strategy.
///
/// [`Display`] renders the protocol-appropriate notation, which drops the strategy; an embedded
/// address parsed back from it uses the default strategy.  Use
/// [`MultiAddress::portable_address`] (also used by serde) for text which preserves the bytes.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct MultiAddress {
    inner: Ipv6Address,
    strategy: Arc<dyn EmbeddingStrategy>,
    embedded: OnceLock<bool>,
}

impl MultiAddress {
    /// Length of the binary form in bytes.
    pub const LENGTH: usize = Ipv6Address::LENGTH;

    /// Parse dotted-quad or colon-hex text using the process-wide default strategy.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIpAddress`] if the text is not a valid IPv4 or IPv6 address.
    pub fn new(text: &str) -> Result<Self, InvalidIpAddress> {
        Self::with_strategy(text, default_embedding_strategy())
    }

    /// Parse dotted-quad or colon-hex text, embedding IPv4 addresses with `strategy`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIpAddress`] if the text is not a valid IPv4 or IPv6 address.
    pub fn with_strategy(
        text: &str,
        strategy: Arc<dyn EmbeddingStrategy>,
    ) -> Result<Self, InvalidIpAddress> {
        Self::with_formatter(text, &NativeFormatter, strategy)
    }

    /// Parse text with an explicit formatter and strategy.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIpAddress`] if the formatter rejects the text or the strategy cannot pack
    /// the parsed IPv4 bytes.
    #[tracing::instrument(level = "trace", skip(formatter, strategy))]
    pub fn with_formatter(
        text: &str,
        formatter: &dyn ProtocolFormatter,
        strategy: Arc<dyn EmbeddingStrategy>,
    ) -> Result<Self, InvalidIpAddress> {
        let raw = formatter
            .parse(text)
            .map_err(|e| InvalidIpAddress::new(text, e))?;
        let wide = match raw {
            RawAddress::V4(short) => strategy
                .pack(&short)
                .map_err(|e| InvalidIpAddress::new(text, e))?,
            RawAddress::V6(wide) => wide,
        };
        Ok(Self::assemble(Ipv6Address::from(wide), strategy))
    }

    /// Build an address from 4 or 16 bytes using the process-wide default strategy.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIpAddress`] if `binary` is neither 4 nor 16 bytes long.
    pub fn from_binary(binary: &[u8]) -> Result<Self, InvalidIpAddress> {
        Self::from_binary_with_strategy(binary, default_embedding_strategy())
    }

    /// Build an address from 4 or 16 bytes; 4 bytes are packed with `strategy`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIpAddress`] if `binary` is neither 4 nor 16 bytes long.
    pub fn from_binary_with_strategy(
        binary: &[u8],
        strategy: Arc<dyn EmbeddingStrategy>,
    ) -> Result<Self, InvalidIpAddress> {
        let inner = if binary.len() == Ipv4Address::LENGTH {
            let wide = strategy
                .pack(binary)
                .map_err(|e| InvalidIpAddress::from_binary(binary, e))?;
            Ipv6Address::from(wide)
        } else {
            Ipv6Address::from_binary(binary)?
        };
        Ok(Self::assemble(inner, strategy))
    }

    fn assemble(inner: Ipv6Address, strategy: Arc<dyn EmbeddingStrategy>) -> Self {
        Self {
            inner,
            strategy,
            embedded: OnceLock::new(),
        }
    }

    /// A new address sharing this address' strategy.
    fn sibling(&self, inner: Ipv6Address) -> Self {
        Self::assemble(inner, Arc::clone(&self.strategy))
    }

    /// Returns true if the 16 bytes carry an IPv4 address under this address' strategy.
    #[must_use]
    pub fn is_embedded(&self) -> bool {
        *self
            .embedded
            .get_or_init(|| self.strategy.is_embedded(self.inner.binary()))
    }

    /// The strategy used to embed and detect IPv4 addresses.
    #[must_use]
    pub fn strategy(&self) -> &Arc<dyn EmbeddingStrategy> {
        &self.strategy
    }

    /// The full 16 byte form as an IPv6 address.
    pub const fn ipv6(&self) -> Ipv6Address {
        self.inner
    }

    /// The embedded IPv4 address, if any.
    #[must_use]
    pub fn ipv4(&self) -> Option<Ipv4Address> {
        if !self.is_embedded() {
            return None;
        }
        self.strategy
            .extract_embedded(self.inner.binary())
            .ok()
            .map(Ipv4Address::from)
    }

    /// The embedded address in dotted-quad notation.
    ///
    /// # Errors
    ///
    /// Returns [`WrongVersion`] if the address is not embedded.
    pub fn dot_address(&self) -> Result<String, WrongVersion> {
        self.ipv4()
            .map(|short| short.dot_address())
            .ok_or(WrongVersion {
                expected: 4,
                actual: 6,
                binary: self.inner.bytes(),
            })
    }

    /// Dotted-quad notation if embedded, compacted colon-hex notation otherwise.
    #[must_use]
    pub fn protocol_appropriate_address(&self) -> String {
        match self.ipv4() {
            Some(short) => short.dot_address(),
            None => self.inner.compacted_address(),
        }
    }

    /// Text which parses back to the same 16 bytes under the process-wide default strategy.
    ///
    /// This is the protocol-appropriate notation when the address uses a strategy of the same
    /// name as the default, and the compacted notation otherwise.  Serialization uses this form.
    #[must_use]
    pub fn portable_address(&self) -> String {
        if self.strategy.name() == default_embedding_strategy().name() {
            self.protocol_appropriate_address()
        } else {
            self.compacted_address()
        }
    }

    /// The 16 byte form in compacted colon-hex notation, embedded or not.
    #[must_use]
    pub fn compacted_address(&self) -> String {
        self.inner.compacted_address()
    }

    /// The 16 byte form with all eight groups written out, embedded or not.
    #[must_use]
    pub fn expanded_address(&self) -> String {
        self.inner.expanded_address()
    }

    /// Network or broadcast derivation: as IPv4 when possible, otherwise on all 128 bits.
    fn derive(
        &self,
        cidr: i32,
        narrow: fn(&Ipv4Address, i32) -> Result<Ipv4Address, InvalidCidr>,
        wide: fn(&Ipv6Address, i32) -> Result<Ipv6Address, InvalidCidr>,
    ) -> Result<Self, InvalidCidr> {
        if cidr <= IPV4_BITS && self.is_embedded() {
            match self.strategy.extract_embedded(self.inner.binary()) {
                Ok(short) => {
                    let derived = narrow(&Ipv4Address::from(short), cidr)?;
                    match self.strategy.pack(derived.binary()) {
                        Ok(packed) => return Ok(self.sibling(Ipv6Address::from(packed))),
                        Err(e) => {
                            debug!("re-embedding {derived} failed, falling back to ipv6: {e}");
                        }
                    }
                }
                Err(e) => debug!("falling back to ipv6 for {}: {e}", self.inner),
            }
        }
        wide(&self.inner, cidr).map(|inner| self.sibling(inner))
    }
}

impl IpAddress for MultiAddress {
    fn binary(&self) -> &[u8] {
        self.inner.binary()
    }

    fn version(&self) -> u8 {
        if self.is_embedded() { 4 } else { 6 }
    }

    fn network_ip(&self, cidr: i32) -> Result<Self, InvalidCidr> {
        self.derive(cidr, Ipv4Address::network_ip, Ipv6Address::network_ip)
    }

    fn broadcast_ip(&self, cidr: i32) -> Result<Self, InvalidCidr> {
        self.derive(cidr, Ipv4Address::broadcast_ip, Ipv6Address::broadcast_ip)
    }

    /// Embeddedness of `other` is judged by `self`'s strategy.
    ///
    /// When both addresses are embedded the 128-bit comparison also covers the embedding prefix,
    /// so an IPv4 CIDR keeps its IPv4 meaning.  In every other case the 128-bit comparison uses
    /// `cidr` unchanged.
    fn in_range(&self, other: &dyn IpAddress, cidr: i32) -> Result<bool, InvalidCidr> {
        let mut wide_cidr = cidr;
        if (0..=IPV4_BITS).contains(&cidr)
            && self.is_embedded()
            && other.is_version4()
            && self.strategy.is_embedded(other.binary())
        {
            let ours = self.strategy.extract_embedded(self.inner.binary());
            let theirs = self.strategy.extract_embedded(other.binary());
            match (ours, theirs) {
                (Ok(ours), Ok(theirs)) => {
                    if Ipv4Address::from(ours).in_range(&Ipv4Address::from(theirs), cidr)? {
                        return Ok(true);
                    }
                    wide_cidr = cidr + EMBEDDING_PREFIX_BITS;
                }
                (Err(e), _) | (_, Err(e)) => {
                    debug!("falling back to ipv6 range check for {}: {e}", self.inner);
                }
            }
        }
        self.inner.in_range(other, wide_cidr)
    }

    fn is_link_local(&self) -> bool {
        self.inner.is_link_local() || self.ipv4().is_some_and(|short| short.is_link_local())
    }

    fn is_loopback(&self) -> bool {
        self.inner.is_loopback() || self.ipv4().is_some_and(|short| short.is_loopback())
    }

    fn is_multicast(&self) -> bool {
        self.inner.is_multicast() || self.ipv4().is_some_and(|short| short.is_multicast())
    }

    fn is_private_use(&self) -> bool {
        self.inner.is_private_use() || self.ipv4().is_some_and(|short| short.is_private_use())
    }

    fn is_unspecified(&self) -> bool {
        self.inner.is_unspecified() || self.ipv4().is_some_and(|short| short.is_unspecified())
    }
}

impl PartialEq for MultiAddress {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for MultiAddress {}

impl Hash for MultiAddress {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl Debug for MultiAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MultiAddress")
            .field("address", &self.protocol_appropriate_address())
            .field("strategy", &self.strategy.name())
            .finish()
    }
}

impl Display for MultiAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.protocol_appropriate_address())
    }
}

impl FromStr for MultiAddress {
    type Err = InvalidIpAddress;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for MultiAddress {
    type Error = InvalidIpAddress;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<MultiAddress> for String {
    fn from(value: MultiAddress) -> Self {
        value.portable_address()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::contract::MultiAddressGenerator;
    use crate::error::AddressCause;
    use crate::strategy::{Compatible, ExtractionError, Mapped, PackingError, StrategyKind};
    use std::panic::{RefUnwindSafe, UnwindSafe};
    use tracing_test::traced_test;

    fn mapped(text: &str) -> MultiAddress {
        MultiAddress::with_strategy(text, Arc::new(Mapped)).unwrap()
    }

    fn compatible(text: &str) -> MultiAddress {
        MultiAddress::with_strategy(text, Arc::new(Compatible)).unwrap()
    }

    /// Detects like [`Mapped`] but can never extract.
    #[derive(Debug)]
    struct Unextractable;

    impl EmbeddingStrategy for Unextractable {
        fn name(&self) -> &'static str {
            "unextractable"
        }

        fn is_embedded(&self, binary: &[u8]) -> bool {
            Mapped.is_embedded(binary)
        }

        fn extract(&self, binary: &[u8]) -> Result<[u8; 4], ExtractionError> {
            Err(ExtractionError::WrongLength {
                strategy: self.name(),
                length: binary.len(),
            })
        }

        fn pack(&self, binary: &[u8]) -> Result<[u8; 16], PackingError> {
            Mapped.pack(binary)
        }
    }

    #[test]
    fn embedded_ipv4_under_mapped() {
        let addr = mapped("192.0.2.1");
        assert!(addr.is_embedded());
        assert_eq!(addr.version(), 4);
        assert!(addr.is_version4());
        assert_eq!(addr.dot_address().unwrap(), "192.0.2.1");
        assert_eq!(addr.ipv6().bytes().to_hex(), "00000000000000000000ffffc0000201");
        assert_eq!(addr.binary().len(), MultiAddress::LENGTH);
        assert_eq!(addr.to_string(), "192.0.2.1");
        assert_eq!(addr.compacted_address(), "::ffff:192.0.2.1");
        assert_eq!(
            addr.expanded_address(),
            "0000:0000:0000:0000:0000:ffff:c000:0201"
        );
        assert_eq!(addr.ipv4(), Some(Ipv4Address::new("192.0.2.1").unwrap()));
        assert_eq!(addr.strategy().name(), "mapped");
    }

    #[test]
    fn embedded_ipv4_under_compatible() {
        let addr = compatible("192.0.2.1");
        assert_eq!(addr.version(), 4);
        assert_eq!(addr.ipv6().bytes().to_hex(), "000000000000000000000000c0000201");
        assert_eq!(addr.protocol_appropriate_address(), "192.0.2.1");
        // the same bytes are native under the other strategy
        let native =
            MultiAddress::from_binary_with_strategy(addr.binary(), Arc::new(Mapped)).unwrap();
        assert_eq!(native.version(), 6);
        assert_eq!(native, addr);
    }

    #[test]
    fn native_ipv6() {
        let addr = mapped("2001:db8::1");
        assert!(!addr.is_embedded());
        assert_eq!(addr.version(), 6);
        assert_eq!(addr.ipv4(), None);
        assert_eq!(addr.protocol_appropriate_address(), "2001:db8::1");
        assert_eq!(addr.to_string(), "2001:db8::1");
        let err = addr.dot_address().unwrap_err();
        assert_eq!(err.expected, 4);
        assert_eq!(err.actual, 6);
        assert_eq!(err.binary, addr.ipv6().bytes());
    }

    #[test]
    fn construction_from_binary() {
        let short =
            MultiAddress::from_binary_with_strategy(&[192, 0, 2, 1], Arc::new(Mapped)).unwrap();
        assert_eq!(short, mapped("192.0.2.1"));
        let wide =
            MultiAddress::from_binary_with_strategy(short.binary(), Arc::new(Mapped)).unwrap();
        assert_eq!(wide, short);
        assert_eq!(wide.version(), 4);
        let err =
            MultiAddress::from_binary_with_strategy(&[1, 2, 3], Arc::new(Mapped)).unwrap_err();
        assert_eq!(err.supplied(), "0x010203");
        assert!(matches!(err.cause(), AddressCause::Length(_)));
    }

    #[test]
    fn invalid_text_is_rejected() {
        let err = MultiAddress::with_strategy("abcdefg", Arc::new(Mapped)).unwrap_err();
        assert_eq!(err.supplied(), "abcdefg");
        assert!(matches!(err.cause(), AddressCause::Format(_)));
        assert!(MultiAddress::with_strategy("1.2.3.4.5", Arc::new(Compatible)).is_err());
    }

    #[test]
    fn network_and_broadcast_stay_embedded() {
        let addr = mapped("192.0.2.133");
        let network = addr.network_ip(24).unwrap();
        assert_eq!(network.version(), 4);
        assert_eq!(network.dot_address().unwrap(), "192.0.2.0");
        assert!(Arc::ptr_eq(network.strategy(), addr.strategy()));
        let broadcast = addr.broadcast_ip(25).unwrap();
        assert_eq!(broadcast.dot_address().unwrap(), "192.0.2.255");
        assert_eq!(addr.network_ip(32).unwrap(), addr);
        assert_eq!(addr.network_ip(0).unwrap().dot_address().unwrap(), "0.0.0.0");
    }

    #[test]
    fn wide_cidr_on_embedded_address_uses_ipv6_semantics() {
        let addr = mapped("192.0.2.133");
        let network = addr.network_ip(64).unwrap();
        assert_eq!(network.version(), 6);
        assert!(network.is_unspecified());
        assert_eq!(addr.broadcast_ip(128).unwrap(), addr);
        let err = addr.network_ip(129).unwrap_err();
        assert_eq!(err.width(), 128);
        let err = addr.network_ip(-1).unwrap_err();
        assert_eq!(err.supplied(), -1);
        assert_eq!(err.width(), 32);
    }

    #[test]
    fn native_network_and_broadcast() {
        let addr = mapped("2001:db8:a::123");
        assert_eq!(addr.network_ip(36).unwrap(), mapped("2001:db8::"));
        assert_eq!(
            addr.broadcast_ip(36).unwrap(),
            mapped("2001:db8:fff:ffff:ffff:ffff:ffff:ffff")
        );
        assert_eq!(addr.network_ip(16).unwrap(), mapped("2001::"));
        assert_eq!(addr.network_ip(-3).unwrap_err().width(), 128);
    }

    #[test]
    #[traced_test]
    fn failed_extraction_falls_back_to_ipv6() {
        let addr = MultiAddress::with_strategy("192.0.2.133", Arc::new(Unextractable)).unwrap();
        assert!(addr.is_embedded());
        assert_eq!(addr.ipv4(), None);
        let network = addr.network_ip(24).unwrap();
        assert_eq!(network.ipv6(), Ipv6Address::new("::").unwrap());
        assert!(logs_contain("falling back to ipv6"));
    }

    #[test]
    fn embedded_range_containment() {
        let a = mapped("192.0.2.1");
        let b = mapped("192.0.2.254");
        assert!(a.in_range(&b, 24).unwrap());
        assert!(!a.in_range(&b, 25).unwrap());
        assert!(a.in_range(&b, 0).unwrap());
        assert!(a.in_range(&a, 32).unwrap());
        assert!(!a.in_range(&mapped("198.51.100.1"), 8).unwrap());
        assert!(a.in_range(&b, 96).unwrap());
        assert!(!a.in_range(&b, 128).unwrap());
        assert!(a.in_range(&b, -1).is_err());
        assert!(a.in_range(&b, 129).is_err());
    }

    #[test]
    fn other_is_judged_by_own_strategy() {
        let ours = compatible("192.0.2.1");
        assert!(ours.in_range(&compatible("192.0.2.9"), 24).unwrap());
        assert!(!ours.in_range(&compatible("198.51.100.1"), 8).unwrap());
        let theirs = mapped("198.51.100.1");
        assert_eq!(theirs.version(), 4);
        // not embedded under compatible, so only the leading zero bytes are compared
        assert!(ours.in_range(&theirs, 8).unwrap());
        assert!(ours.in_range(&theirs, 80).unwrap());
        assert!(!ours.in_range(&theirs, 96).unwrap());
    }

    #[test]
    fn zero_cidr_contains_everything() {
        let embedded = mapped("192.0.2.1");
        let native = mapped("2001:db8::1");
        assert!(embedded.in_range(&native, 0).unwrap());
        assert!(native.in_range(&embedded, 0).unwrap());
        assert!(compatible("192.0.2.1").in_range(&embedded, 0).unwrap());
    }

    #[test]
    fn range_containment_is_symmetric_across_families() {
        let embedded = mapped("192.0.2.1");
        let loopback = mapped("::1");
        for cidr in [0, 8, 16, 32] {
            let forward = embedded.in_range(&loopback, cidr).unwrap();
            assert_eq!(forward, loopback.in_range(&embedded, cidr).unwrap());
            assert_eq!(forward, embedded.ipv6().in_range(&loopback, cidr).unwrap());
        }
        assert!(embedded.in_range(&loopback, 8).unwrap());
        assert!(!embedded.in_range(&mapped("2001:db8::1"), 8).unwrap());
    }

    #[test]
    fn mixed_widths_are_not_in_range() {
        let ours = mapped("192.0.2.1");
        let short = Ipv4Address::new("192.0.2.1").unwrap();
        assert!(!ours.in_range(&short, 24).unwrap());
        assert!(!short.in_range(&ours, 24).unwrap());
        assert!(ours.in_range(&ours.ipv6(), 120).unwrap());
    }

    #[test]
    fn native_range_containment() {
        let a = mapped("2001:db8::1");
        assert!(a.in_range(&mapped("2001:db8::ffff"), 64).unwrap());
        assert!(!a.in_range(&mapped("2001:db9::1"), 32).unwrap());
        assert!(!a.in_range(&mapped("192.0.2.1"), 16).unwrap());
    }

    #[test]
    fn classification() {
        assert!(mapped("127.0.0.1").is_loopback());
        assert!(mapped("::1").is_loopback());
        assert!(!mapped("128.0.0.1").is_loopback());
        assert!(mapped("224.0.0.251").is_multicast());
        assert!(mapped("ff02::1").is_multicast());
        assert!(mapped("169.254.10.1").is_link_local());
        assert!(mapped("fe80::1").is_link_local());
        assert!(mapped("10.1.2.3").is_private_use());
        assert!(mapped("172.31.255.255").is_private_use());
        assert!(!mapped("172.32.0.0").is_private_use());
        assert!(mapped("fd00::1").is_private_use());
        assert!(mapped("0.0.0.0").is_unspecified());
        assert!(mapped("::").is_unspecified());
        assert!(!mapped("192.0.2.1").is_unspecified());
        assert!(compatible("10.0.0.1").is_private_use());
    }

    #[test]
    fn equality_ignores_strategy_and_memo() {
        let a = mapped("192.0.2.1");
        let b = mapped("192.0.2.1");
        let _ = a.is_embedded();
        assert_eq!(a, b);
        assert!(a.equals(&b));
        assert!(a.equals(&a.ipv6()));
        let copy = a.clone();
        assert_eq!(copy.version(), 4);
    }

    #[test]
    fn derived_addresses_stay_in_range() {
        bolero::check!()
            .with_type()
            .cloned()
            .for_each(|(addr, cidr): (MultiAddress, u8)| {
                let cidr = i32::from(cidr % 129);
                let network = addr.network_ip(cidr).unwrap();
                let broadcast = addr.broadcast_ip(cidr).unwrap();
                assert!(addr.in_range(&addr, cidr).unwrap());
                if addr.is_embedded() && cidr <= 32 {
                    assert!(network.is_embedded());
                    assert!(broadcast.is_embedded());
                    assert!(addr.in_range(&network, cidr).unwrap());
                    assert!(addr.in_range(&broadcast, cidr).unwrap());
                }
            });
    }

    #[test]
    fn dotted_notation_round_trip() {
        bolero::check!()
            .with_generator(MultiAddressGenerator::new(StrategyKind::Compatible))
            .for_each(|addr: &MultiAddress| {
                let text = addr.protocol_appropriate_address();
                assert_eq!(&compatible(&text), addr);
                assert_eq!(addr.dot_address().is_ok(), addr.is_embedded());
            });
    }

    #[test]
    fn portable_text_preserves_bytes() {
        let addr = compatible("192.0.2.1");
        assert_eq!(addr.to_string(), "192.0.2.1");
        assert_eq!(addr.portable_address(), "::c000:201");
        let back = MultiAddress::new(&addr.portable_address()).unwrap();
        assert_eq!(back, addr);
        assert_eq!(String::from(mapped("192.0.2.1")), "192.0.2.1");
        assert_eq!(String::from(mapped("2001:db8::1")), "2001:db8::1");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip_keeps_bytes_of_other_strategies() {
        for addr in [compatible("192.0.2.1"), compatible("2001:db8::1"), mapped("192.0.2.1")] {
            let yaml = serde_yaml_ng::to_string(&addr).unwrap();
            let back: MultiAddress = serde_yaml_ng::from_str(&yaml).unwrap();
            assert_eq!(back.ipv6(), addr.ipv6());
        }
        let yaml = serde_yaml_ng::to_string(&mapped("192.0.2.1")).unwrap();
        assert_eq!(yaml.trim().trim_matches(['\'', '"']), "192.0.2.1");
    }

    #[test]
    fn usable_across_threads_and_unwinding() {
        fn shareable<T: Send + Sync + RefUnwindSafe + UnwindSafe>() {}
        shareable::<MultiAddress>();
        let addr = mapped("192.0.2.1");
        let version = std::panic::catch_unwind(|| addr.version()).unwrap();
        assert_eq!(version, 4);
    }

    #[test]
    fn debug_names_strategy() {
        let rendered = format!("{:?}", compatible("192.0.2.1"));
        assert_eq!(
            rendered,
            r#"MultiAddress { address: "192.0.2.1", strategy: "compatible" }"#
        );
    }
}
