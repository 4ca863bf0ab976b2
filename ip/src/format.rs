// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Conversion between textual address notation and raw binary sequences.
//!
//! The address types never inspect text themselves; they hand it to a [`ProtocolFormatter`] and
//! validate the width of whatever bytes come back.

use core::fmt::{Debug, Write};
use core::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use core::str::FromStr;

/// The output of [`ProtocolFormatter::parse`]: exactly 4 or exactly 16 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawAddress {
    /// Dotted-quad notation produced 4 bytes
    V4([u8; 4]),
    /// Colon-hex notation produced 16 bytes
    V6([u8; 16]),
}

impl RawAddress {
    /// The parsed bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            RawAddress::V4(bytes) => bytes,
            RawAddress::V6(bytes) => bytes,
        }
    }
}

/// Textual rendering styles.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notation {
    /// Dotted quad for 4 bytes, colon-hex with the longest run of zero groups elided for 16 bytes.
    #[default]
    Compacted,
    /// Dotted quad for 4 bytes, eight groups of four hex digits for 16 bytes.
    Full,
    /// Dotted quad; only 4 byte sequences are accepted.
    Short,
}

/// Errors raised while converting between text and binary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The text is neither dotted-quad nor colon-hex notation
    #[error("'{0}' is not a valid ip address in protocol notation")]
    Unparsable(String),
    /// The binary sequence cannot be rendered in the requested notation
    #[error("cannot render a {length} byte binary sequence in {notation:?} notation")]
    Unrenderable {
        /// Length of the offending binary sequence
        length: usize,
        /// The notation requested
        notation: Notation,
    },
}

/// Converts between protocol notation and binary sequences.
pub trait ProtocolFormatter: Debug + Send + Sync {
    /// Parse text into 4 (dotted-quad) or 16 (colon-hex) bytes.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Unparsable`] if the text is not a recognized notation.
    fn parse(&self, text: &str) -> Result<RawAddress, FormatError>;

    /// Render a 4 or 16 byte sequence in the requested notation.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Unrenderable`] if the length of `binary` is not supported by the
    /// requested notation.
    fn render(&self, binary: &[u8], notation: Notation) -> Result<String, FormatError>;
}

/// [`ProtocolFormatter`] backed by the standard library's address parser.
///
/// Zone identifiers (`fe80::1%eth0`) are not accepted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NativeFormatter;

impl NativeFormatter {
    /// Dotted-quad notation.
    pub(crate) fn dotted(octets: [u8; 4]) -> String {
        Ipv4Addr::from(octets).to_string()
    }

    /// Colon-hex notation with the longest run of zero groups elided.
    pub(crate) fn compacted(octets: [u8; 16]) -> String {
        Ipv6Addr::from(octets).to_string()
    }

    /// Colon-hex notation with all eight groups written out.
    pub(crate) fn expanded(octets: [u8; 16]) -> String {
        let mut out = String::with_capacity(39);
        for (i, group) in Ipv6Addr::from(octets).segments().iter().enumerate() {
            if i != 0 {
                out.push(':');
            }
            // writing into a String cannot fail
            let _ = write!(out, "{group:04x}");
        }
        out
    }
}

impl ProtocolFormatter for NativeFormatter {
    fn parse(&self, text: &str) -> Result<RawAddress, FormatError> {
        match IpAddr::from_str(text) {
            Ok(IpAddr::V4(addr)) => Ok(RawAddress::V4(addr.octets())),
            Ok(IpAddr::V6(addr)) => Ok(RawAddress::V6(addr.octets())),
            Err(_) => Err(FormatError::Unparsable(text.to_string())),
        }
    }

    fn render(&self, binary: &[u8], notation: Notation) -> Result<String, FormatError> {
        let unrenderable = || FormatError::Unrenderable {
            length: binary.len(),
            notation,
        };
        if let Ok(octets) = <[u8; 4]>::try_from(binary) {
            return Ok(Self::dotted(octets));
        }
        let octets = <[u8; 16]>::try_from(binary).map_err(|_| unrenderable())?;
        match notation {
            Notation::Compacted => Ok(Self::compacted(octets)),
            Notation::Full => Ok(Self::expanded(octets)),
            Notation::Short => Err(unrenderable()),
        }
    }
}
