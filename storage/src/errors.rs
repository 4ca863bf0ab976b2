// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

use ip::InvalidIpAddress;

/// A value could not be converted to or from its column representation.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// The value does not describe an address of the column's type
    #[error("could not convert value of {column} column")]
    InvalidAddress {
        /// Name of the column type
        column: &'static str,
        /// Why the value was rejected
        #[source]
        source: InvalidIpAddress,
    },
    /// The stored value could not be read from its stream
    #[error("could not read value of {column} column from stream")]
    Io {
        /// Name of the column type
        column: &'static str,
        /// The underlying read error
        #[source]
        source: std::io::Error,
    },
}

impl ConversionError {
    /// Name of the column type the conversion was attempted for.
    #[must_use]
    pub fn column(&self) -> &'static str {
        match self {
            ConversionError::InvalidAddress { column, .. } | ConversionError::Io { column, .. } => {
                column
            }
        }
    }
}
