//! Token Program Instructions
//!
//! Encoding and builders for the token program instructions this crate
//! emits. The byte layout is the SPL Token layout, so the instructions are
//! accepted by the deployed token program.
//!
//! # Instruction Format
//!
//! ```text
//! [discriminant: u8][data: varies]
//! ```
//!
//! # Supported Instructions
//!
//! | Value | Instruction | Used for |
//! |-------|-------------|----------|
//! | 0 | InitializeMint | Second instruction of every mint submission |

use crate::error::FormError;
use solana_program::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    sysvar,
};
use thiserror::Error;

/// Raised by [`TokenInstruction::unpack`] on malformed or unknown data.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid token instruction data")]
pub struct InvalidInstruction;

// =============================================================================
// TOKEN INSTRUCTION ENUM
// =============================================================================

/// Token program instructions understood by this crate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenInstruction {
    /// Initialize a freshly created mint account.
    ///
    /// # Account Requirements
    ///
    /// | # | Account | Writable | Signer | Description |
    /// |---|---------|----------|--------|-------------|
    /// | 0 | mint | ✓ | | The mint to initialize |
    /// | 1 | rent | | | Rent sysvar |
    ///
    /// # Data Layout
    ///
    /// ```text
    /// [0]: discriminant (0)
    /// [1]: decimals (u8)
    /// [2..34]: mint_authority (Pubkey, 32 bytes)
    /// [34]: freeze_authority_option (0 = None, 1 = Some)
    /// [35..67]: freeze_authority (Pubkey, 32 bytes, if option = 1)
    /// ```
    InitializeMint {
        /// Number of base-10 digits to the right of the decimal point
        decimals: u8,

        /// Authority that can mint new tokens
        mint_authority: Pubkey,

        /// Optional authority that can freeze token accounts
        freeze_authority: Option<Pubkey>,
    },
}

impl TokenInstruction {
    /// Parse instruction data.
    pub fn unpack(input: &[u8]) -> Result<Self, InvalidInstruction> {
        let (&discriminant, rest) = input.split_first().ok_or(InvalidInstruction)?;

        Ok(match discriminant {
            0 => {
                // decimals(1) + mint_authority(32) + option(1)
                if rest.len() < 34 {
                    return Err(InvalidInstruction);
                }
                let decimals = rest[0];
                let mint_authority = read_pubkey(&rest[1..33])?;
                let freeze_authority = match rest[33] {
                    0 => None,
                    1 => Some(read_pubkey(rest.get(34..66).ok_or(InvalidInstruction)?)?),
                    _ => return Err(InvalidInstruction),
                };
                TokenInstruction::InitializeMint {
                    decimals,
                    mint_authority,
                    freeze_authority,
                }
            }
            _ => return Err(InvalidInstruction),
        })
    }

    /// Pack instruction into bytes.
    pub fn pack(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(67);
        match self {
            TokenInstruction::InitializeMint {
                decimals,
                mint_authority,
                freeze_authority,
            } => {
                buf.push(0);
                buf.push(*decimals);
                buf.extend_from_slice(mint_authority.as_ref());
                match freeze_authority {
                    Some(authority) => {
                        buf.push(1);
                        buf.extend_from_slice(authority.as_ref());
                    }
                    None => buf.push(0),
                }
            }
        }
        buf
    }
}

fn read_pubkey(bytes: &[u8]) -> Result<Pubkey, InvalidInstruction> {
    let array: [u8; 32] = bytes.try_into().map_err(|_| InvalidInstruction)?;
    Ok(Pubkey::new_from_array(array))
}

// =============================================================================
// INSTRUCTION BUILDERS
// =============================================================================

/// Build an `InitializeMint` instruction for `mint`.
///
/// The mint account must already exist, be owned by `token_program_id`
/// and be exactly 82 bytes, so this instruction always follows the
/// system `CreateAccount` in the same transaction.
pub fn initialize_mint(
    token_program_id: &Pubkey,
    mint: &Pubkey,
    mint_authority: &Pubkey,
    freeze_authority: Option<&Pubkey>,
    decimals: u8,
) -> Instruction {
    Instruction {
        program_id: *token_program_id,
        accounts: vec![
            AccountMeta::new(*mint, false),
            AccountMeta::new_readonly(sysvar::rent::id(), false),
        ],
        data: TokenInstruction::InitializeMint {
            decimals,
            mint_authority: *mint_authority,
            freeze_authority: freeze_authority.copied(),
        }
        .pack(),
    }
}

/// Convert a whole-token amount to base units for a mint with `decimals`.
///
/// Returns `None` on overflow, e.g. a large supply with 18 decimals.
pub fn to_base_units(whole_tokens: u64, decimals: u8) -> Option<u64> {
    10u64
        .checked_pow(u32::from(decimals))
        .and_then(|scale| whole_tokens.checked_mul(scale))
}

/// Same as [`to_base_units`], reporting overflow as a supply error.
pub fn checked_base_units(whole_tokens: u64, decimals: u8) -> Result<u64, FormError> {
    to_base_units(whole_tokens, decimals)
        .ok_or_else(|| FormError::InvalidSupply(format!("{whole_tokens} x 10^{decimals}")))
}
