//! Deployment configuration of a token.
//!
//! A [`TokenConfig`] carries everything a preset needs besides the deployer:
//! metadata, the flat fee and the wrapper fee policy. It can be built from one
//! of the named presets or deserialized, with missing fields falling back to
//! [`TokenConfig::default`].

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::token::vrc25::extensions::{metadata::DEFAULT_DECIMALS, WrapperFees};

/// Deployment parameters of a VRC25 token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    /// Name of the token.
    pub name: String,
    /// Symbol of the token.
    pub symbol: String,
    /// Number of decimals used for display.
    pub decimals: u8,
    /// Flat fee charged per operation at deployment.
    pub min_fee: U256,
    /// Which wrapper legs pay the fee. Ignored by tokens without a wrapper.
    pub wrapper_fees: WrapperFees,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            symbol: String::new(),
            decimals: DEFAULT_DECIMALS,
            min_fee: U256::ZERO,
            wrapper_fees: WrapperFees::default(),
        }
    }
}

impl TokenConfig {
    /// Wrapped TOMO: no fee on either wrapper leg.
    #[must_use]
    pub fn wtomo() -> Self {
        Self {
            name: "Wrapped Tomo".to_owned(),
            symbol: "WTOMO".to_owned(),
            ..Self::default()
        }
    }

    /// Wrapped TOMO with permit support.
    #[must_use]
    pub fn wtomo_permit() -> Self {
        Self { name: "Wrapped Tomo Permit".to_owned(), ..Self::wtomo() }
    }

    /// Wrapped VIC: deposits are free, withdrawals pay the fee.
    #[must_use]
    pub fn wvic() -> Self {
        Self {
            name: "Wrapped Viction".to_owned(),
            symbol: "WVIC".to_owned(),
            wrapper_fees: WrapperFees { deposit: false, withdraw: true },
            ..Self::default()
        }
    }

    /// Sample mintable VRC25 token.
    #[must_use]
    pub fn sample_vrc25() -> Self {
        Self {
            name: "Example Fungible Token".to_owned(),
            symbol: "EFT".to_owned(),
            ..Self::default()
        }
    }

    /// Sets the flat fee charged at deployment.
    #[must_use]
    pub fn with_min_fee(mut self, min_fee: U256) -> Self {
        self.min_fee = min_fee;
        self
    }
}
