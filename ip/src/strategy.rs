// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Policies for embedding a 4 byte IPv4 address inside a 16 byte IPv6 binary sequence.

use core::fmt::Debug;
use std::panic::{RefUnwindSafe, UnwindSafe};
use std::sync::Arc;

/// Length of the fixed prefix which precedes an embedded IPv4 address.
const PREFIX_LEN: usize = 12;

/// Prefix of [IPv4-compatible] IPv6 addresses (`::/96`).
///
/// [IPv4-compatible]: https://datatracker.ietf.org/doc/html/rfc4291#section-2.5.5.1
const COMPATIBLE_PREFIX: [u8; PREFIX_LEN] = [0; PREFIX_LEN];

/// Prefix of [IPv4-mapped] IPv6 addresses (`::ffff:0:0/96`).
///
/// [IPv4-mapped]: https://datatracker.ietf.org/doc/html/rfc4291#section-2.5.5.2
const MAPPED_PREFIX: [u8; PREFIX_LEN] = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff];

/// Error raised when an IPv4 address cannot be extracted from a binary sequence.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionError {
    /// Only 16 byte sequences can carry an embedded address
    #[error("{strategy} strategy cannot extract an ipv4 address from a {length} byte sequence")]
    WrongLength {
        /// Name of the strategy
        strategy: &'static str,
        /// Length of the supplied sequence
        length: usize,
    },
    /// The sequence does not start with the strategy's prefix
    #[error("{strategy} strategy found no embedded ipv4 address in {hex}")]
    NotEmbedded {
        /// Name of the strategy
        strategy: &'static str,
        /// Hex representation of the supplied sequence
        hex: String,
    },
}

/// Error raised when a binary sequence cannot be packed into an IPv6 binary sequence.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{strategy} strategy can only pack 4 byte sequences, got {length} bytes")]
pub struct PackingError {
    /// Name of the strategy
    pub strategy: &'static str,
    /// Length of the supplied sequence
    pub length: usize,
}

/// A policy for storing IPv4 addresses inside 16 byte binary sequences.
///
/// Implementations must be stateless: instances are shared between every address constructed with
/// them.
pub trait EmbeddingStrategy: Debug + Send + Sync + RefUnwindSafe + UnwindSafe {
    /// A stable, human readable name of the strategy.
    fn name(&self) -> &'static str;

    /// Returns true if `binary` is 16 bytes long and carries an embedded IPv4 address.
    fn is_embedded(&self, binary: &[u8]) -> bool;

    /// Returns the IPv4 part of a 16 byte sequence.
    ///
    /// The prefix is not checked; see [`EmbeddingStrategy::extract_embedded`].
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::WrongLength`] if `binary` is not 16 bytes long.
    fn extract(&self, binary: &[u8]) -> Result<[u8; 4], ExtractionError>;

    /// Embed a 4 byte sequence into a 16 byte sequence.
    ///
    /// # Errors
    ///
    /// Returns [`PackingError`] if `binary` is not 4 bytes long.
    fn pack(&self, binary: &[u8]) -> Result<[u8; 16], PackingError>;

    /// Returns the IPv4 part of a 16 byte sequence after checking that it is in fact embedded.
    ///
    /// # Errors
    ///
    /// * Returns [`ExtractionError::WrongLength`] if `binary` is not 16 bytes long.
    /// * Returns [`ExtractionError::NotEmbedded`] if `binary` lacks the strategy's prefix.
    fn extract_embedded(&self, binary: &[u8]) -> Result<[u8; 4], ExtractionError> {
        let short = self.extract(binary)?;
        if !self.is_embedded(binary) {
            return Err(ExtractionError::NotEmbedded {
                strategy: self.name(),
                hex: binary.iter().map(|b| format!("{b:02x}")).collect(),
            });
        }
        Ok(short)
    }
}

fn has_prefix(prefix: &[u8; PREFIX_LEN], binary: &[u8]) -> bool {
    binary.len() == 16 && binary[..PREFIX_LEN] == prefix[..]
}

fn tail(strategy: &'static str, binary: &[u8]) -> Result<[u8; 4], ExtractionError> {
    let binary = <&[u8; 16]>::try_from(binary).map_err(|_| ExtractionError::WrongLength {
        strategy,
        length: binary.len(),
    })?;
    Ok([binary[12], binary[13], binary[14], binary[15]])
}

fn prepend(
    strategy: &'static str,
    prefix: &[u8; PREFIX_LEN],
    binary: &[u8],
) -> Result<[u8; 16], PackingError> {
    let short = <&[u8; 4]>::try_from(binary).map_err(|_| PackingError {
        strategy,
        length: binary.len(),
    })?;
    let mut out = [0u8; 16];
    out[..PREFIX_LEN].copy_from_slice(prefix);
    out[PREFIX_LEN..].copy_from_slice(short);
    Ok(out)
}

/// IPv4-compatible embedding: twelve zero bytes followed by the IPv4 address.
///
/// This format is deprecated by RFC 4291 but still found in stored data.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Compatible;

impl EmbeddingStrategy for Compatible {
    fn name(&self) -> &'static str {
        "compatible"
    }

    fn is_embedded(&self, binary: &[u8]) -> bool {
        has_prefix(&COMPATIBLE_PREFIX, binary)
    }

    fn extract(&self, binary: &[u8]) -> Result<[u8; 4], ExtractionError> {
        tail(self.name(), binary)
    }

    fn pack(&self, binary: &[u8]) -> Result<[u8; 16], PackingError> {
        prepend(self.name(), &COMPATIBLE_PREFIX, binary)
    }
}

/// IPv4-mapped embedding: ten zero bytes, `ff ff`, then the IPv4 address.
///
/// This is the default strategy.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mapped;

impl EmbeddingStrategy for Mapped {
    fn name(&self) -> &'static str {
        "mapped"
    }

    fn is_embedded(&self, binary: &[u8]) -> bool {
        has_prefix(&MAPPED_PREFIX, binary)
    }

    fn extract(&self, binary: &[u8]) -> Result<[u8; 4], ExtractionError> {
        tail(self.name(), binary)
    }

    fn pack(&self, binary: &[u8]) -> Result<[u8; 16], PackingError> {
        prepend(self.name(), &MAPPED_PREFIX, binary)
    }
}

/// Names the built-in strategies, e.g. in configuration.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// [`Compatible`]
    Compatible,
    /// [`Mapped`]
    #[default]
    Mapped,
}

impl StrategyKind {
    /// Build a shareable instance of the named strategy.
    #[must_use]
    pub fn strategy(self) -> Arc<dyn EmbeddingStrategy> {
        match self {
            StrategyKind::Compatible => Arc::new(Compatible),
            StrategyKind::Mapped => Arc::new(Mapped),
        }
    }
}
