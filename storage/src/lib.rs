// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Fixed-width binary column adapters for the address types of [`ip`].
//!
//! Addresses are persisted as their raw bytes in `BINARY(n)` columns: 4 bytes for
//! [`Ipv4Address`](ip::Ipv4Address), 16 bytes for [`Ipv6Address`](ip::Ipv6Address) and
//! [`MultiAddress`](ip::MultiAddress).  Absent values pass straight through in both directions.

#![deny(
    unsafe_code,
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]

mod column;
mod errors;

pub use column::{IpColumn, StoredAddress, StoredValue};
pub use errors::ConversionError;
