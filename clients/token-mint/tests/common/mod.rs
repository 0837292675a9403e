//! Shared test doubles for the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use solana_program::{hash::Hash, pubkey::Pubkey};
use solana_sdk::{
    commitment_config::CommitmentConfig,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use token_mint_submitter::{
    Confirmation, KeypairWallet, NetworkClient, NetworkError, SubmitSettings, WalletAdapter,
    WalletError,
};

/// Rent for an 82 byte account on a default cluster.
pub const MINT_RENT: u64 = 1_461_600;

// =============================================================================
// RECORDING NETWORK
// =============================================================================

/// Every call the submitter made, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Rent(usize),
    Blockhash,
    Send(Signature),
    Confirm(Signature),
    AccountData(Pubkey),
}

/// In-memory cluster that records calls and fails on demand.
pub struct MockNetwork {
    pub calls: Mutex<Vec<Call>>,
    pub sent: Mutex<Vec<Transaction>>,
    pub confirmations: Mutex<VecDeque<Confirmation>>,
    pub blockhash: Hash,
    pub fail_rent: bool,
    pub fail_blockhash: bool,
    pub fail_send: bool,
    pub fail_confirm_query: bool,
    /// Returned once the scripted confirmations run out.
    pub final_confirmation: Confirmation,
    pub account: Option<Vec<u8>>,
}

impl Default for MockNetwork {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
            confirmations: Mutex::new(VecDeque::new()),
            blockhash: Hash::new_unique(),
            fail_rent: false,
            fail_blockhash: false,
            fail_send: false,
            fail_confirm_query: false,
            final_confirmation: Confirmation::Confirmed,
            account: None,
        }
    }
}

impl MockNetwork {
    pub fn with_confirmations(confirmations: impl IntoIterator<Item = Confirmation>) -> Self {
        Self {
            confirmations: Mutex::new(confirmations.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<Transaction> {
        self.sent.lock().unwrap().clone()
    }

    pub fn confirm_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Confirm(_)))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl NetworkClient for MockNetwork {
    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64, NetworkError> {
        self.record(Call::Rent(data_len));
        if self.fail_rent {
            return Err(NetworkError::Rpc("connection refused".into()));
        }
        Ok(MINT_RENT)
    }

    async fn latest_blockhash(&self) -> Result<Hash, NetworkError> {
        self.record(Call::Blockhash);
        if self.fail_blockhash {
            return Err(NetworkError::Rpc("timed out".into()));
        }
        Ok(self.blockhash)
    }

    async fn send_transaction(&self, transaction: &Transaction) -> Result<Signature, NetworkError> {
        let signature = transaction.signatures[0];
        self.record(Call::Send(signature));
        if self.fail_send {
            return Err(NetworkError::TransactionRejected(
                "Attempt to debit an account but found no record of a prior credit.".into(),
            ));
        }
        self.sent.lock().unwrap().push(transaction.clone());
        Ok(signature)
    }

    async fn confirm_transaction(
        &self,
        signature: &Signature,
        _commitment: CommitmentConfig,
    ) -> Result<Confirmation, NetworkError> {
        self.record(Call::Confirm(*signature));
        if self.fail_confirm_query {
            return Err(NetworkError::Rpc("node is behind".into()));
        }
        let next = self.confirmations.lock().unwrap().pop_front();
        Ok(next.unwrap_or_else(|| self.final_confirmation.clone()))
    }

    async fn account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, NetworkError> {
        self.record(Call::AccountData(*address));
        Ok(self.account.clone())
    }
}

// =============================================================================
// RECORDING WALLET
// =============================================================================

/// Keypair wallet that remembers the extra signers it was handed and can
/// be told to refuse signing, or to drop its connection just before signing.
pub struct RecordingWallet {
    pub inner: KeypairWallet,
    pub reject: bool,
    pub disconnect_before_signing: bool,
    extra_signers: Mutex<Vec<Vec<Pubkey>>>,
}

impl RecordingWallet {
    pub fn new() -> Self {
        Self::from_keypair(Keypair::new())
    }

    pub fn from_keypair(keypair: Keypair) -> Self {
        Self {
            inner: KeypairWallet::new(keypair),
            reject: false,
            disconnect_before_signing: false,
            extra_signers: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::new()
        }
    }

    pub fn disconnecting() -> Self {
        Self {
            disconnect_before_signing: true,
            ..Self::new()
        }
    }

    pub fn pubkey(&self) -> Pubkey {
        self.inner.pubkey()
    }

    /// Extra signer pubkeys, one entry per `sign_and_send` call.
    pub fn extra_signers(&self) -> Vec<Vec<Pubkey>> {
        self.extra_signers.lock().unwrap().clone()
    }
}

#[async_trait]
impl WalletAdapter for RecordingWallet {
    fn is_connected(&self) -> bool {
        self.inner.is_connected()
    }

    fn public_key(&self) -> Option<Pubkey> {
        self.inner.public_key()
    }

    async fn sign_and_send(
        &self,
        transaction: Transaction,
        network: &dyn NetworkClient,
        extra_signers: &[&Keypair],
    ) -> Result<Signature, WalletError> {
        self.extra_signers
            .lock()
            .unwrap()
            .push(extra_signers.iter().map(|keypair| keypair.pubkey()).collect());
        if self.reject {
            return Err(WalletError::Rejected("User rejected the request.".into()));
        }
        if self.disconnect_before_signing {
            self.inner.disconnect();
        }
        self.inner
            .sign_and_send(transaction, network, extra_signers)
            .await
    }
}

/// Settings with timings short enough for tests.
pub fn fast_settings() -> SubmitSettings {
    SubmitSettings {
        confirm_timeout: Duration::from_millis(200),
        poll_interval: Duration::from_millis(5),
        ..SubmitSettings::default()
    }
}
