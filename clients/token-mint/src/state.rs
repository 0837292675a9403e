//! Mint Account State
//!
//! Decoding of the 82 byte mint account written by the token program's
//! `InitializeMint`. Used to read back a mint after submission.
//!
//! # Memory Layout (82 bytes total)
//!
//! ```text
//! ┌────────┬──────┬──────────────────┬─────────────────────────────┐
//! │ Offset │ Size │ Field            │ Type                        │
//! ├────────┼──────┼──────────────────┼─────────────────────────────┤
//! │ 0      │ 36   │ mint_authority   │ COption<Pubkey>             │
//! │ 36     │ 8    │ supply           │ u64                         │
//! │ 44     │ 1    │ decimals         │ u8                          │
//! │ 45     │ 1    │ is_initialized   │ bool (0 or 1)               │
//! │ 46     │ 36   │ freeze_authority │ COption<Pubkey>             │
//! └────────┴──────┴──────────────────┴─────────────────────────────┘
//! ```
//!
//! A `COption<Pubkey>` is a 4 byte little-endian tag (0 = None, 1 = Some)
//! followed by 32 pubkey bytes.

use crate::error::InspectError;
use crate::MINT_ACCOUNT_LEN;
use arrayref::{array_ref, array_refs};
use solana_program::pubkey::Pubkey;

/// Decoded mint account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MintInfo {
    /// Who may mint more supply. `None` means the supply is fixed forever.
    pub mint_authority: Option<Pubkey>,

    /// Total base units in existence.
    pub supply: u64,

    /// Display precision.
    pub decimals: u8,

    /// Set by `InitializeMint`.
    pub is_initialized: bool,

    /// Who may freeze token accounts of this mint.
    pub freeze_authority: Option<Pubkey>,
}

impl MintInfo {
    /// Size of a mint account.
    pub const LEN: usize = MINT_ACCOUNT_LEN;

    /// Decode raw account data, checking the length first.
    pub fn unpack(data: &[u8]) -> Result<Self, InspectError> {
        if data.len() != Self::LEN {
            return Err(InspectError::InvalidLength(data.len()));
        }

        let input = array_ref![data, 0, MINT_ACCOUNT_LEN];
        #[allow(clippy::ptr_offset_with_cast)]
        let (mint_authority, supply, decimals, is_initialized, freeze_authority) =
            array_refs![input, 36, 8, 1, 1, 36];

        Ok(MintInfo {
            mint_authority: unpack_coption_pubkey(mint_authority)?,
            supply: u64::from_le_bytes(*supply),
            decimals: decimals[0],
            is_initialized: is_initialized[0] != 0,
            freeze_authority: unpack_coption_pubkey(freeze_authority)?,
        })
    }
}

fn unpack_coption_pubkey(src: &[u8; 36]) -> Result<Option<Pubkey>, InspectError> {
    let (tag, body) = array_refs![src, 4, 32];
    match u32::from_le_bytes(*tag) {
        0 => Ok(None),
        1 => Ok(Some(Pubkey::new_from_array(*body))),
        other => Err(InspectError::InvalidOptionTag(other)),
    }
}
