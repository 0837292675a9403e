//! Wallet Capability
//!
//! The submitter only needs three things from a wallet: whether it is
//! connected, its public key, and a way to sign and broadcast a transaction
//! that also carries extra signers. [`WalletAdapter`] is that capability.
//!
//! [`KeypairWallet`] holds a keypair in memory and signs locally. It is the
//! burner wallet used for development clusters and by the command-line
//! front end. Anything holding real funds should sit behind its own adapter.

use crate::error::WalletError;
use crate::network::NetworkClient;
use async_trait::async_trait;
use solana_program::pubkey::Pubkey;
use solana_sdk::{
    signature::{read_keypair_file, Keypair, Signature, Signer},
    transaction::Transaction,
};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

// =============================================================================
// WALLET ADAPTER TRAIT
// =============================================================================

/// A connected wallet as seen by the submitter.
#[async_trait]
pub trait WalletAdapter: Send + Sync {
    /// Whether the user has connected this wallet.
    fn is_connected(&self) -> bool;

    /// The wallet's public key, if it exposes one.
    fn public_key(&self) -> Option<Pubkey>;

    /// Sign `transaction` (adding `extra_signers`) and broadcast it over `network`.
    ///
    /// Implementations must not broadcast when signing fails, and must report
    /// that case as [`WalletError::Rejected`].
    async fn sign_and_send(
        &self,
        transaction: Transaction,
        network: &dyn NetworkClient,
        extra_signers: &[&Keypair],
    ) -> Result<Signature, WalletError>;
}

// =============================================================================
// KEYPAIR WALLET
// =============================================================================

/// In-memory keypair wallet.
pub struct KeypairWallet {
    keypair: Keypair,
    connected: AtomicBool,
}

impl KeypairWallet {
    /// Wrap an existing keypair. The wallet starts connected.
    pub fn new(keypair: Keypair) -> Self {
        Self {
            keypair,
            connected: AtomicBool::new(true),
        }
    }

    /// A throwaway wallet with a fresh keypair and no funds.
    pub fn generate() -> Self {
        let wallet = Self::new(Keypair::new());
        warn!(pubkey = %wallet.keypair.pubkey(), "using a freshly generated burner wallet");
        wallet
    }

    /// Load a keypair file in the Solana CLI JSON format.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, WalletError> {
        let path = path.as_ref();
        let keypair = read_keypair_file(path).map_err(|err| WalletError::Keypair {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
        Ok(Self::new(keypair))
    }

    pub fn connect(&self) {
        self.connected.store(true, Ordering::SeqCst);
    }

    pub fn disconnect(&self) {
        self.connected.store(false, Ordering::SeqCst);
    }

    /// The address that pays fees and becomes mint authority.
    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }
}

#[async_trait]
impl WalletAdapter for KeypairWallet {
    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn public_key(&self) -> Option<Pubkey> {
        self.is_connected().then(|| self.keypair.pubkey())
    }

    async fn sign_and_send(
        &self,
        mut transaction: Transaction,
        network: &dyn NetworkClient,
        extra_signers: &[&Keypair],
    ) -> Result<Signature, WalletError> {
        if !self.is_connected() {
            return Err(WalletError::NotConnected);
        }

        // `&dyn Signer` is not Send, so the signer list must not live across the await.
        {
            let mut signers: Vec<&dyn Signer> = Vec::with_capacity(extra_signers.len() + 1);
            signers.push(&self.keypair);
            signers.extend(extra_signers.iter().map(|keypair| *keypair as &dyn Signer));

            let blockhash = transaction.message.recent_blockhash;
            transaction
                .try_sign(&signers, blockhash)
                .map_err(|err| WalletError::Rejected(err.to_string()))?;
            debug!(signers = signers.len(), "transaction signed");
        }

        network
            .send_transaction(&transaction)
            .await
            .map_err(WalletError::Send)
    }
}
