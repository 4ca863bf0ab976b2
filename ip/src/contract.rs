// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! [`bolero`] generators for the address types.

use crate::bytes::AddressBytes;
use crate::ipv4::Ipv4Address;
use crate::ipv6::Ipv6Address;
use crate::multi::MultiAddress;
use crate::strategy::StrategyKind;
use bolero::{Driver, TypeGenerator, ValueGenerator};

impl<const N: usize> TypeGenerator for AddressBytes<N> {
    fn generate<D: Driver>(driver: &mut D) -> Option<Self> {
        Some(AddressBytes::new(driver.produce()?))
    }
}

impl TypeGenerator for Ipv4Address {
    fn generate<D: Driver>(driver: &mut D) -> Option<Self> {
        Some(Ipv4Address::from(driver.produce::<[u8; 4]>()?))
    }
}

impl TypeGenerator for Ipv6Address {
    fn generate<D: Driver>(driver: &mut D) -> Option<Self> {
        Some(Ipv6Address::from(driver.produce::<[u8; 16]>()?))
    }
}

/// Generates embedded and native addresses, in roughly equal measure, under the default
/// [`StrategyKind`].
impl TypeGenerator for MultiAddress {
    fn generate<D: Driver>(driver: &mut D) -> Option<Self> {
        MultiAddressGenerator::new(StrategyKind::default()).generate(driver)
    }
}

/// Value generator of [`MultiAddress`] values using a particular strategy.
///
/// Half of the generated values carry an embedded IPv4 address; the others are arbitrary 16 byte
/// sequences, which are almost never embedded.
#[derive(Debug, Clone, Copy)]
pub struct MultiAddressGenerator {
    strategy: StrategyKind,
}

impl MultiAddressGenerator {
    /// Create a new [`MultiAddressGenerator`]
    #[must_use]
    pub const fn new(strategy: StrategyKind) -> Self {
        Self { strategy }
    }
}

impl ValueGenerator for MultiAddressGenerator {
    type Output = MultiAddress;

    fn generate<D: Driver>(&self, driver: &mut D) -> Option<Self::Output> {
        let strategy = self.strategy.strategy();
        let wide = if driver.produce::<bool>()? {
            strategy.pack(&driver.produce::<[u8; 4]>()?).ok()?
        } else {
            driver.produce::<[u8; 16]>()?
        };
        MultiAddress::from_binary_with_strategy(&wide, strategy).ok()
    }
}
