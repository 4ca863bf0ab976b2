// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Immutable IPv4 / IPv6 address values stored as fixed-width binary sequences.
//!
//! Every address is held as raw bytes: 4 for [`Ipv4Address`], 16 for [`Ipv6Address`] and
//! [`MultiAddress`].  CIDR arithmetic (network, broadcast, range containment) and address-class
//! classification operate directly on those bytes.
//!
//! [`MultiAddress`] stores both families in the same 16-byte form.  IPv4 addresses are embedded
//! into the 16 bytes by an [`EmbeddingStrategy`] ([`Mapped`] by default, or [`Compatible`]) and the
//! address then behaves as IPv4 wherever that makes sense.

#![deny(
    unsafe_code,
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]

pub mod bytes;
pub mod cidr;
pub mod config;
pub mod error;
pub mod format;
pub mod ipv4;
pub mod ipv6;
pub mod multi;
pub mod strategy;

#[cfg(any(test, feature = "bolero"))]
pub mod contract;

pub use bytes::AddressBytes;
pub use cidr::InvalidCidr;
pub use config::{
    DefaultStrategyError, EmbeddingConfig, default_embedding_strategy,
    set_default_embedding_strategy,
};
pub use error::{AddressCause, InvalidIpAddress, IpError, WrongVersion};
pub use format::{FormatError, NativeFormatter, Notation, ProtocolFormatter, RawAddress};
pub use ipv4::Ipv4Address;
pub use ipv6::Ipv6Address;
pub use multi::MultiAddress;
pub use strategy::{
    Compatible, EmbeddingStrategy, ExtractionError, Mapped, PackingError, StrategyKind,
};

use core::fmt::Debug;

/// Behavior shared by every address type in this crate.
///
/// CIDR values are accepted as `i32` so that negative values can be supplied, and rejected.
pub trait IpAddress: Debug {
    /// The raw binary form of the address (4 or 16 bytes).
    fn binary(&self) -> &[u8];

    /// The protocol version this address behaves as (4 or 6).
    fn version(&self) -> u8;

    /// Returns true if the address behaves as an IPv4 address.
    fn is_version4(&self) -> bool {
        self.version() == 4
    }

    /// Returns true if the address behaves as an IPv6 address.
    fn is_version6(&self) -> bool {
        self.version() == 6
    }

    /// Returns the network address of `self` for the given CIDR (all host bits cleared).
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCidr`] if `cidr` is negative or larger than the width of the address.
    fn network_ip(&self, cidr: i32) -> Result<Self, InvalidCidr>
    where
        Self: Sized;

    /// Returns the broadcast address of `self` for the given CIDR (all host bits set).
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCidr`] if `cidr` is negative or larger than the width of the address.
    fn broadcast_ip(&self, cidr: i32) -> Result<Self, InvalidCidr>
    where
        Self: Sized;

    /// Returns true if `other` lies in the same `cidr` network as `self`.
    ///
    /// Addresses of a different binary width are never in range.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCidr`] if `cidr` is not valid for `self`.
    fn in_range(&self, other: &dyn IpAddress, cidr: i32) -> Result<bool, InvalidCidr>;

    /// Returns true if the address is reserved for link-local usage.
    fn is_link_local(&self) -> bool;

    /// Returns true if the address is a loopback address.
    fn is_loopback(&self) -> bool;

    /// Returns true if the address is a multicast address.
    fn is_multicast(&self) -> bool;

    /// Returns true if the address is reserved for private networks.
    fn is_private_use(&self) -> bool;

    /// Returns true if the address is the unspecified address.
    fn is_unspecified(&self) -> bool;

    /// Byte-wise equality against any other address.
    fn equals(&self, other: &dyn IpAddress) -> bool {
        self.binary() == other.binary()
    }
}
