//! Mint Requests
//!
//! [`TokenForm`] holds the raw text a user typed into the token creation
//! form. [`TokenForm::to_request`] turns it into a [`MintRequest`], the only
//! thing the submitter consumes.
//!
//! Name and symbol are collected for display but are not written on-chain;
//! a mint account has no room for them.

use crate::error::FormError;
use crate::instruction::checked_base_units;
use serde::{Deserialize, Serialize};

/// Decimals the form starts with.
pub const DEFAULT_DECIMALS: u8 = 9;

/// Initial supply the form starts with.
pub const DEFAULT_INITIAL_SUPPLY: u64 = 1_000_000;

// =============================================================================
// MINT REQUEST
// =============================================================================

/// What to create: built once per submission and passed by value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintRequest {
    /// Display precision of the new token.
    pub decimals: u8,

    /// Whole tokens the creator intends to issue.
    pub initial_supply: u64,
}

impl MintRequest {
    pub fn new(decimals: u8, initial_supply: u64) -> Self {
        Self {
            decimals,
            initial_supply,
        }
    }
}

impl Default for MintRequest {
    fn default() -> Self {
        Self::new(DEFAULT_DECIMALS, DEFAULT_INITIAL_SUPPLY)
    }
}

// =============================================================================
// TOKEN FORM
// =============================================================================

/// Raw form state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenForm {
    pub name: String,
    pub symbol: String,
    pub decimals: String,
    pub initial_supply: String,
}

impl Default for TokenForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            symbol: String::new(),
            decimals: DEFAULT_DECIMALS.to_string(),
            initial_supply: DEFAULT_INITIAL_SUPPLY.to_string(),
        }
    }
}

impl TokenForm {
    /// Validate the numeric fields and build a request.
    ///
    /// Besides parsing, the supply scaled by `10^decimals` must fit in a
    /// `u64`, otherwise the token program could never hold it.
    pub fn to_request(&self) -> Result<MintRequest, FormError> {
        let decimals = self
            .decimals
            .trim()
            .parse::<u8>()
            .map_err(|_| FormError::InvalidDecimals(self.decimals.clone()))?;
        let initial_supply = self
            .initial_supply
            .trim()
            .parse::<u64>()
            .map_err(|_| FormError::InvalidSupply(self.initial_supply.clone()))?;

        checked_base_units(initial_supply, decimals)?;

        Ok(MintRequest::new(decimals, initial_supply))
    }

    /// Label used in log lines and messages, e.g. `My Token (MTK)`.
    pub fn label(&self) -> String {
        match (self.name.trim(), self.symbol.trim()) {
            ("", "") => "unnamed token".to_string(),
            (name, "") => name.to_string(),
            ("", symbol) => symbol.to_string(),
            (name, symbol) => format!("{name} ({symbol})"),
        }
    }
}
