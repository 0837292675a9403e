//! Error Types
//!
//! Every layer of the submitter has its own error enum:
//!
//! | Enum | Raised by |
//! |------|-----------|
//! | [`SubmitError`] | [`MintSubmitter::submit`](crate::MintSubmitter::submit) |
//! | [`WalletError`] | [`WalletAdapter`](crate::WalletAdapter) implementations |
//! | [`NetworkError`] | [`NetworkClient`](crate::NetworkClient) implementations |
//! | [`FormError`] | [`TokenForm::to_request`](crate::TokenForm::to_request) |
//! | [`ConfigError`] | [`SubmitterConfig`](crate::SubmitterConfig) loading |
//! | [`InspectError`] | [`inspect_mint`](crate::inspect_mint) |
//!
//! # User-facing text
//!
//! The form only ever shows two messages. [`SubmitError::user_message`]
//! collapses the detailed variants into them, while the variants themselves
//! stay available to callers and tests.

use solana_program::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use std::time::Duration;
use thiserror::Error;

/// Shown when the wallet precondition fails.
pub const WALLET_NOT_CONNECTED_MESSAGE: &str = "Wallet not connected. Please connect your wallet.";

/// Shown for every other failure.
pub const CREATION_FAILED_MESSAGE: &str = "Failed to create token.";

// =============================================================================
// SUBMISSION ERRORS
// =============================================================================

/// Ways a single mint submission can fail.
///
/// The variants follow the order of the submission steps. Everything up to
/// and including [`SubmitError::SignRejected`] happens before anything is
/// broadcast, so those failures have no on-chain side effect.
///
/// # Indeterminate outcomes
///
/// [`SubmitError::ConfirmationFailed`] and [`SubmitError::ConfirmationTimedOut`]
/// are raised after the transaction left the wallet. The mint account may or
/// may not exist; both variants carry the mint address and signature so the
/// caller can look it up. Nothing reconciles this automatically.
#[derive(Error, Debug)]
pub enum SubmitError {
    /// The wallet is disconnected or has no public key. No network call was made.
    #[error("wallet not connected")]
    WalletNotConnected,

    /// The rent-exemption query failed.
    #[error("rent exemption query failed: {0}")]
    RentQueryFailed(#[source] NetworkError),

    /// The latest blockhash could not be fetched.
    #[error("latest blockhash unavailable: {0}")]
    BlockhashUnavailable(#[source] NetworkError),

    /// The wallet refused or failed to sign. Nothing was broadcast.
    #[error("wallet rejected the transaction: {0}")]
    SignRejected(String),

    /// The signed transaction could not be broadcast.
    #[error("broadcast failed: {0}")]
    BroadcastFailed(#[source] NetworkError),

    /// The cluster reported the transaction as failed, or the status query broke.
    #[error("transaction {signature} for mint {mint} was not confirmed: {reason}")]
    ConfirmationFailed {
        mint: Pubkey,
        signature: Signature,
        reason: String,
    },

    /// No final status was observed before the confirmation timeout.
    #[error("transaction {signature} for mint {mint} not confirmed after {waited:?}")]
    ConfirmationTimedOut {
        mint: Pubkey,
        signature: Signature,
        waited: Duration,
    },
}

impl SubmitError {
    /// The plain text shown to the user for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            SubmitError::WalletNotConnected => WALLET_NOT_CONNECTED_MESSAGE,
            _ => CREATION_FAILED_MESSAGE,
        }
    }

    /// True when the transaction may have landed on-chain.
    pub fn is_indeterminate(&self) -> bool {
        matches!(
            self,
            SubmitError::ConfirmationFailed { .. } | SubmitError::ConfirmationTimedOut { .. }
        )
    }
}

// =============================================================================
// COLLABORATOR ERRORS
// =============================================================================

/// Errors raised by a [`WalletAdapter`](crate::WalletAdapter).
#[derive(Error, Debug)]
pub enum WalletError {
    /// The wallet is not connected.
    #[error("wallet not connected")]
    NotConnected,

    /// Signing was refused or the signer set did not match the message.
    #[error("signing rejected: {0}")]
    Rejected(String),

    /// The wallet signed, but handing the transaction to the cluster failed.
    #[error("send failed: {0}")]
    Send(#[source] NetworkError),

    /// A keypair file could not be read.
    #[error("failed to load keypair from {path}: {reason}")]
    Keypair { path: String, reason: String },
}

/// Errors raised by a [`NetworkClient`](crate::NetworkClient).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// Transport or JSON-RPC level failure.
    #[error("rpc request failed: {0}")]
    Rpc(String),

    /// The cluster refused the transaction during preflight or processing.
    #[error("transaction rejected: {0}")]
    TransactionRejected(String),
}

// =============================================================================
// INPUT ERRORS
// =============================================================================

/// Errors turning raw form input into a [`MintRequest`](crate::MintRequest).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// Decimals must be an integer between 0 and 255.
    #[error("decimals must be a whole number between 0 and 255, got {0:?}")]
    InvalidDecimals(String),

    /// Supply must be a non-negative integer that fits in 64 bits.
    #[error("initial supply must be a non-negative whole number, got {0:?}")]
    InvalidSupply(String),
}

/// Errors loading or validating [`SubmitterConfig`](crate::SubmitterConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid RPC URL: {0}")]
    InvalidUrl(String),

    #[error("invalid token program id: {0}")]
    InvalidProgramId(String),

    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
}

/// Errors reading back a mint account.
#[derive(Error, Debug)]
pub enum InspectError {
    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("account holds {0} bytes, expected an 82 byte mint")]
    InvalidLength(usize),

    #[error("invalid optional pubkey tag {0}")]
    InvalidOptionTag(u32),
}
