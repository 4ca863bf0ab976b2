// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Column types for the address types.

use crate::errors::ConversionError;
use ip::{InvalidIpAddress, IpAddress, Ipv4Address, Ipv6Address, MultiAddress};
use std::fmt::{Debug, Formatter};
use std::io::Read;
use std::marker::PhantomData;
use tracing::debug;

/// An address type which can be stored in a fixed-width binary column.
pub trait StoredAddress: IpAddress + Sized {
    /// Name of the column type
    const COLUMN_NAME: &'static str;
    /// Width of the column in bytes
    const LENGTH: usize;

    /// Parse the textual notation of the address.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIpAddress`] if the text is not an address of this type.
    fn parse(text: &str) -> Result<Self, InvalidIpAddress>;

    /// Rebuild the address from its stored bytes.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIpAddress`] if the bytes are not an address of this type.
    fn decode(binary: &[u8]) -> Result<Self, InvalidIpAddress>;
}

impl StoredAddress for Ipv4Address {
    const COLUMN_NAME: &'static str = "ipv4";
    const LENGTH: usize = Ipv4Address::LENGTH;

    fn parse(text: &str) -> Result<Self, InvalidIpAddress> {
        Ipv4Address::new(text)
    }

    fn decode(binary: &[u8]) -> Result<Self, InvalidIpAddress> {
        Ipv4Address::from_binary(binary)
    }
}

impl StoredAddress for Ipv6Address {
    const COLUMN_NAME: &'static str = "ipv6";
    const LENGTH: usize = Ipv6Address::LENGTH;

    fn parse(text: &str) -> Result<Self, InvalidIpAddress> {
        Ipv6Address::new(text)
    }

    fn decode(binary: &[u8]) -> Result<Self, InvalidIpAddress> {
        Ipv6Address::from_binary(binary)
    }
}

/// Multi-version addresses are read back with the process-wide default embedding strategy.
impl StoredAddress for MultiAddress {
    const COLUMN_NAME: &'static str = "ip";
    const LENGTH: usize = MultiAddress::LENGTH;

    fn parse(text: &str) -> Result<Self, InvalidIpAddress> {
        MultiAddress::new(text)
    }

    fn decode(binary: &[u8]) -> Result<Self, InvalidIpAddress> {
        MultiAddress::from_binary(binary)
    }
}

/// A value as handed back by a database driver.
pub enum StoredValue<A> {
    /// The raw column bytes
    Bytes(Vec<u8>),
    /// A stream yielding the raw column bytes
    Stream(Box<dyn Read>),
    /// An address which has already been converted
    Address(A),
}

impl<A: Debug> Debug for StoredValue<A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StoredValue::Bytes(bytes) => f.debug_tuple("Bytes").field(bytes).finish(),
            StoredValue::Stream(_) => f.write_str("Stream(..)"),
            StoredValue::Address(addr) => f.debug_tuple("Address").field(addr).finish(),
        }
    }
}

impl<A> From<Vec<u8>> for StoredValue<A> {
    fn from(value: Vec<u8>) -> Self {
        StoredValue::Bytes(value)
    }
}

impl<A> From<&[u8]> for StoredValue<A> {
    fn from(value: &[u8]) -> Self {
        StoredValue::Bytes(value.to_vec())
    }
}

/// A `BINARY(n)` column holding addresses of type `A`.
pub struct IpColumn<A>(PhantomData<fn() -> A>);

#[allow(clippy::unused_self)]
impl<A: StoredAddress> IpColumn<A> {
    /// Create a new column type
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }

    /// Name of the column type: `ipv4`, `ipv6` or `ip`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        A::COLUMN_NAME
    }

    /// Width of the column in bytes.
    #[must_use]
    pub const fn length(&self) -> usize {
        A::LENGTH
    }

    /// SQL declaration of the column.
    #[must_use]
    pub fn sql_declaration(&self) -> String {
        format!("BINARY({})", A::LENGTH)
    }

    /// Binary values are opaque, so schema tools need a comment to recover the column type.
    #[must_use]
    pub const fn requires_comment_hint(&self) -> bool {
        true
    }

    /// The bytes to store for `value`.
    #[must_use]
    pub fn to_storage(&self, value: Option<&A>) -> Option<Vec<u8>> {
        value.map(|addr| addr.binary().to_vec())
    }

    /// The bytes to store for the textual notation of an address.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::InvalidAddress`] if the text is not an address of this type.
    pub fn text_to_storage(
        &self,
        text: Option<&str>,
    ) -> Result<Option<Vec<u8>>, ConversionError> {
        text.map(|text| {
            A::parse(text)
                .map(|addr| addr.binary().to_vec())
                .map_err(|e| self.invalid(e))
        })
        .transpose()
    }

    /// Rebuild an address from a stored value.
    ///
    /// # Errors
    ///
    /// * Returns [`ConversionError::Io`] if a stream cannot be read.
    /// * Returns [`ConversionError::InvalidAddress`] if the bytes are not an address of this type.
    pub fn from_storage(
        &self,
        value: Option<StoredValue<A>>,
    ) -> Result<Option<A>, ConversionError> {
        let binary = match value {
            None => return Ok(None),
            Some(StoredValue::Address(addr)) => return Ok(Some(addr)),
            Some(StoredValue::Bytes(bytes)) => bytes,
            Some(StoredValue::Stream(stream)) => {
                // one byte past the column width is enough to reject oversized values
                let limit = u64::try_from(A::LENGTH + 1).unwrap_or(u64::MAX);
                let mut bytes = Vec::with_capacity(A::LENGTH + 1);
                stream.take(limit).read_to_end(&mut bytes).map_err(|source| {
                    debug!("failed to read {} column value: {source}", A::COLUMN_NAME);
                    ConversionError::Io {
                        column: A::COLUMN_NAME,
                        source,
                    }
                })?;
                bytes
            }
        };
        A::decode(&binary).map(Some).map_err(|e| self.invalid(e))
    }

    fn invalid(&self, source: InvalidIpAddress) -> ConversionError {
        debug!("rejected {} column value: {source}", self.name());
        ConversionError::InvalidAddress {
            column: self.name(),
            source,
        }
    }
}

impl<A: StoredAddress> Default for IpColumn<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for IpColumn<A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for IpColumn<A> {}

impl<A: StoredAddress> Debug for IpColumn<A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "IpColumn({})", A::COLUMN_NAME)
    }
}
