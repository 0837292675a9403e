//! # Token Mint Submitter
//!
//! Client-side library that creates a new SPL token mint on a Solana cluster
//! on behalf of a connected wallet.
//!
//! ## Overview
//!
//! One submission is a fixed, linear recipe:
//!
//! 1. Generate a fresh mint keypair
//! 2. Query the rent-exempt balance for an 82 byte mint account
//! 3. Build the system `CreateAccount` instruction
//! 4. Build the token program `InitializeMint` instruction
//! 5. Assemble both into one transaction (creation first)
//! 6. Attach the latest blockhash and the wallet as fee payer
//! 7. Ask the wallet to sign (mint keypair co-signs) and broadcast
//! 8. Wait for the cluster to confirm the signature
//!
//! Nothing is retried. A failed attempt is reported once and left alone.
//!
//! ## Collaborators
//!
//! | Trait | Production type | Role |
//! |-------|-----------------|------|
//! | [`WalletAdapter`] | [`KeypairWallet`] | Fee payer, mint authority, signer |
//! | [`NetworkClient`] | [`RpcNetworkClient`] | Rent, blockhash, broadcast, confirmation |
//!
//! Both are traits so that tests can swap in recording doubles.

// =============================================================================
// MODULE DECLARATIONS
// =============================================================================

/// Settings file and CLI override handling
pub mod config;

/// Error types for every layer
pub mod error;

/// Token program instruction encoding and builders
pub mod instruction;

/// Tracing subscriber bootstrap
pub mod logging;

/// Cluster access behind the `NetworkClient` trait
pub mod network;

/// Form input and the validated mint request
pub mod request;

/// Mint account state decoding
pub mod state;

/// The submission routine
pub mod submitter;

/// Wallet capability and the local keypair wallet
pub mod wallet;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use config::{Commitment, SubmitterConfig};
pub use error::{ConfigError, FormError, InspectError, NetworkError, SubmitError, WalletError};
pub use instruction::TokenInstruction;
pub use network::{Confirmation, NetworkClient, RpcNetworkClient};
pub use request::{MintRequest, TokenForm};
pub use state::MintInfo;
pub use submitter::{
    build_mint_transaction, inspect_mint, MintSubmitter, SubmissionResult, SubmitSettings,
};
pub use wallet::{KeypairWallet, WalletAdapter};

// =============================================================================
// CONSTANTS
// =============================================================================

/// Size in bytes of an SPL token mint account.
pub const MINT_ACCOUNT_LEN: usize = 82;

/// The SPL Token program that owns mint accounts.
///
/// This is the id deployed on mainnet-beta, devnet and testnet. Clusters
/// with a different deployment are handled through
/// [`SubmitterConfig::token_program_id`].
pub mod token_program {
    solana_program::declare_id!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");
}
