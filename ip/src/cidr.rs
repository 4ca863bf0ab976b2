// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! CIDR prefix validation and mask construction.
//!
//! Masks are built byte by byte so that the same routine serves 32 and 128 bit addresses without
//! relying on a native integer of that width.

/// An error indicating that a CIDR prefix length is outside `[0, width]` for the address in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("the CIDR {cidr} is not valid; it must be an integer between 0 and {width}")]
pub struct InvalidCidr {
    cidr: i32,
    width: usize,
}

impl InvalidCidr {
    /// Record an illegal `cidr` supplied for an address which is `width` bits wide.
    #[must_use]
    pub const fn new(cidr: i32, width: usize) -> Self {
        Self { cidr, width }
    }

    /// The CIDR value which was rejected.
    #[must_use]
    pub const fn supplied(&self) -> i32 {
        self.cidr
    }

    /// The width (in bits) of the address the CIDR was applied to.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }
}

/// Check that `cidr` is a legal prefix length for an `N` byte address.
///
/// # Errors
///
/// Returns [`InvalidCidr`] if `cidr` is negative or greater than `N * 8`.
pub fn prefix_len<const N: usize>(cidr: i32) -> Result<usize, InvalidCidr> {
    usize::try_from(cidr)
        .ok()
        .filter(|len| *len <= N * 8)
        .ok_or(InvalidCidr::new(cidr, N * 8))
}

/// Build the mask for a validated prefix length: the top `len` bits set, all others clear.
///
/// Lengths beyond `N * 8` saturate to the all-ones mask.
#[must_use]
pub(crate) fn mask_for_len<const N: usize>(len: usize) -> [u8; N] {
    let len = len.min(N * 8);
    let mut mask = [0u8; N];
    let full = len / 8;
    mask[..full].fill(u8::MAX);
    let rem = len % 8;
    if rem != 0 {
        mask[full] = u8::MAX << (8 - rem);
    }
    mask
}

/// Build the network mask of an `N` byte address for the given `cidr`.
///
/// # Errors
///
/// Returns [`InvalidCidr`] if `cidr` is negative or greater than `N * 8`.
pub fn netmask<const N: usize>(cidr: i32) -> Result<[u8; N], InvalidCidr> {
    Ok(mask_for_len::<N>(prefix_len::<N>(cidr)?))
}
