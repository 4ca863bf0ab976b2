// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Errors raised while constructing or interrogating addresses.

use crate::bytes::{AddressBytes, InvalidLength};
use crate::cidr::InvalidCidr;
use crate::format::FormatError;
use crate::strategy::{ExtractionError, PackingError};

/// The root cause of an [`InvalidIpAddress`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressCause {
    /// The formatter could not make sense of the text
    #[error(transparent)]
    Format(#[from] FormatError),
    /// The bytes have the wrong length for the address type
    #[error(transparent)]
    Length(#[from] InvalidLength),
    /// A 4 byte sequence could not be embedded into 16 bytes
    #[error(transparent)]
    Packing(#[from] PackingError),
}

/// The supplied text or binary does not describe a valid address of the requested type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("the ip address supplied ({supplied}) is not valid")]
pub struct InvalidIpAddress {
    supplied: String,
    #[source]
    cause: AddressCause,
}

impl InvalidIpAddress {
    /// Record a failure to construct an address from `supplied`.
    ///
    /// Binary input should be supplied in its hex representation.
    pub fn new(supplied: impl Into<String>, cause: impl Into<AddressCause>) -> Self {
        Self {
            supplied: supplied.into(),
            cause: cause.into(),
        }
    }

    /// Record a failure to construct an address from raw bytes.
    pub(crate) fn from_binary(binary: &[u8], cause: impl Into<AddressCause>) -> Self {
        let supplied: String = binary.iter().map(|b| format!("{b:02x}")).collect();
        Self::new(format!("0x{supplied}"), cause)
    }

    /// The text (or hex of the binary) which was rejected.
    #[must_use]
    pub fn supplied(&self) -> &str {
        &self.supplied
    }

    /// Why the input was rejected.
    #[must_use]
    pub fn cause(&self) -> &AddressCause {
        &self.cause
    }
}

/// An accessor which only makes sense for one protocol version was used on the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("expected an ipv{expected} address, but {binary} is an ipv{actual} address")]
pub struct WrongVersion {
    /// The version the accessor requires
    pub expected: u8,
    /// The version of the address
    pub actual: u8,
    /// The binary value of the address
    pub binary: AddressBytes<16>,
}

/// Any error raised by this crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IpError {
    /// See [`InvalidIpAddress`]
    #[error(transparent)]
    InvalidAddress(#[from] InvalidIpAddress),
    /// See [`InvalidCidr`]
    #[error(transparent)]
    InvalidCidr(#[from] InvalidCidr),
    /// See [`ExtractionError`]
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    /// See [`PackingError`]
    #[error(transparent)]
    Packing(#[from] PackingError),
    /// See [`WrongVersion`]
    #[error(transparent)]
    WrongVersion(#[from] WrongVersion),
    /// See [`FormatError`]
    #[error(transparent)]
    Format(#[from] FormatError),
}
