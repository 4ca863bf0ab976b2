// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Fixed-width binary address representation.

use crate::cidr::{InvalidCidr, mask_for_len, netmask};
use core::fmt::{Debug, Display, Formatter, LowerHex};

/// The raw binary form of an address which is exactly `N` bytes wide.
///
/// `AddressBytes<4>` backs IPv4 addresses and `AddressBytes<16>` backs IPv6 (and multi-version)
/// addresses.  The width is part of the type, so a value can never be truncated or padded after
/// construction.
///
/// All CIDR arithmetic lives here, written once for any width.
#[must_use]
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AddressBytes<const N: usize>([u8; N]);

/// An error indicating that a byte sequence has the wrong length for the address it describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("expected a binary sequence of {expected} bytes, got {actual} bytes")]
pub struct InvalidLength {
    /// The length required by the address type
    pub expected: usize,
    /// The length which was supplied
    pub actual: usize,
}

impl<const N: usize> AddressBytes<N> {
    /// Width of the address in bits.
    pub const BITS: usize = N * 8;

    /// Wrap an array of exactly `N` bytes.
    pub const fn new(octets: [u8; N]) -> Self {
        Self(octets)
    }

    /// Copy a slice into a new value.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidLength`] if `binary` is not exactly `N` bytes long.
    pub fn from_slice(binary: &[u8]) -> Result<Self, InvalidLength> {
        <[u8; N]>::try_from(binary)
            .map(Self)
            .map_err(|_| InvalidLength {
                expected: N,
                actual: binary.len(),
            })
    }

    /// Number of bytes in the address.
    #[must_use]
    pub const fn byte_len(&self) -> usize {
        N
    }

    /// A copy of the raw bytes.
    #[must_use]
    pub const fn octets(&self) -> [u8; N] {
        self.0
    }

    /// The raw bytes as a slice.
    #[must_use]
    pub const fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Lowercase hexadecimal representation of the bytes (two digits per byte).
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("{self:x}")
    }

    /// The network address: bytes AND the `cidr` mask.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCidr`] if `cidr` is not in `[0, N * 8]`.
    pub fn network(&self, cidr: i32) -> Result<Self, InvalidCidr> {
        let mask = netmask::<N>(cidr)?;
        Ok(self.masked(&mask))
    }

    /// The broadcast address: bytes OR the inverted `cidr` mask.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCidr`] if `cidr` is not in `[0, N * 8]`.
    pub fn broadcast(&self, cidr: i32) -> Result<Self, InvalidCidr> {
        let mask = netmask::<N>(cidr)?;
        let mut out = self.0;
        for (byte, mask) in out.iter_mut().zip(mask) {
            *byte |= !mask;
        }
        Ok(Self(out))
    }

    /// Returns true if `self` and `other` share the same `cidr` network.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCidr`] if `cidr` is not in `[0, N * 8]`.
    pub fn same_network(&self, other: &Self, cidr: i32) -> Result<bool, InvalidCidr> {
        Ok(self.network(cidr)? == other.network(cidr)?)
    }

    /// Returns true if `self` lies within the fixed block `network/len`.
    ///
    /// Used by the classification predicates, whose blocks are compile time constants.
    #[must_use]
    pub(crate) fn within(&self, network: [u8; N], len: usize) -> bool {
        let mask = mask_for_len::<N>(len);
        self.masked(&mask) == Self(network).masked(&mask)
    }

    fn masked(&self, mask: &[u8; N]) -> Self {
        let mut out = self.0;
        for (byte, mask) in out.iter_mut().zip(mask) {
            *byte &= mask;
        }
        Self(out)
    }
}

impl<const N: usize> From<[u8; N]> for AddressBytes<N> {
    fn from(value: [u8; N]) -> Self {
        Self(value)
    }
}

impl<const N: usize> From<AddressBytes<N>> for [u8; N] {
    fn from(value: AddressBytes<N>) -> Self {
        value.0
    }
}

impl<const N: usize> TryFrom<&[u8]> for AddressBytes<N> {
    type Error = InvalidLength;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(value)
    }
}

impl<const N: usize> AsRef<[u8]> for AddressBytes<N> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> LowerHex for AddressBytes<N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl<const N: usize> Display for AddressBytes<N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{self:x}")
    }
}

impl<const N: usize> Debug for AddressBytes<N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "AddressBytes({self:x})")
    }
}
