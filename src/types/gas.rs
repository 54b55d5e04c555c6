// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong type for the network gas price

use serde::{Deserialize, Serialize};

/// Gas price in wei per unit of gas.
///
/// [`GasPrice::ZERO`] doubles as the "not yet available" sentinel returned by
/// [`GasPriceMonitor::read`](crate::GasPriceMonitor::read) before its first
/// successful fetch. Callers must not treat it as a real market price.
///
/// # Example
/// ```
/// use semioquote::GasPrice;
///
/// let price = GasPrice::from_gwei(50);
/// assert_eq!(price.as_wei(), 50_000_000_000);
/// assert!(price.is_available());
/// assert!(!GasPrice::ZERO.is_available());
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct GasPrice(u128);

impl GasPrice {
    /// Sentinel for "no price fetched yet".
    pub const ZERO: Self = Self(0);

    /// Create a new gas price from wei
    pub const fn new(price_wei: u128) -> Self {
        Self(price_wei)
    }

    /// Create from gwei (convenience constructor)
    pub const fn from_gwei(gwei: u64) -> Self {
        Self((gwei as u128).saturating_mul(1_000_000_000))
    }

    /// Get the inner value in wei
    pub const fn as_wei(&self) -> u128 {
        self.0
    }

    /// Whether a real price has been stored (anything but the zero sentinel).
    pub const fn is_available(&self) -> bool {
        self.0 != 0
    }

    /// Convert to gwei as f64 (lossy, for display purposes)
    pub fn as_gwei_f64(&self) -> f64 {
        self.0 as f64 / 1_000_000_000f64
    }
}

impl From<u128> for GasPrice {
    fn from(value: u128) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Display for GasPrice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let gwei = self.as_gwei_f64();
        if gwei >= 1.0 {
            write!(f, "{:.2} gwei", gwei)
        } else {
            write!(f, "{} wei", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gas_price_from_gwei() {
        let price = GasPrice::from_gwei(50);
        assert_eq!(price.as_wei(), 50_000_000_000);
    }

    #[test]
    fn test_zero_is_sentinel() {
        assert_eq!(GasPrice::default(), GasPrice::ZERO);
        assert!(!GasPrice::ZERO.is_available());
        assert!(GasPrice::new(1).is_available());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", GasPrice::new(50_000_000_000)), "50.00 gwei");
        assert_eq!(format!("{}", GasPrice::new(100)), "100 wei");
    }

    #[test]
    fn test_serialization() {
        let price = GasPrice::new(47_888_827);
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "47888827");

        let back: GasPrice = serde_json::from_str(&json).unwrap();
        assert_eq!(back, price);
    }
}
