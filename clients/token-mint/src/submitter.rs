//! Mint Submission
//!
//! [`MintSubmitter::submit`] creates one token mint per call. The flow is a
//! single linear async task with one early exit (wallet not connected) and
//! one failure path per network round trip.
//!
//! # Transaction Layout
//!
//! | # | Program | Instruction | Signers |
//! |---|---------|-------------|---------|
//! | 0 | System | CreateAccount (82 bytes, owner = token program) | wallet, mint |
//! | 1 | Token | InitializeMint (decimals, authority = wallet) | none |
//!
//! The wallet is fee payer. The mint keypair is generated inside `submit`,
//! co-signs its own creation, and is dropped when `submit` returns.

use crate::error::{SubmitError, WalletError};
use crate::instruction;
use crate::network::{Confirmation, NetworkClient};
use crate::request::MintRequest;
use crate::state::MintInfo;
use crate::wallet::WalletAdapter;
use crate::{config::SubmitterConfig, error::ConfigError, error::InspectError, MINT_ACCOUNT_LEN};
use serde::{Deserialize, Serialize};
use solana_program::{pubkey::Pubkey, system_instruction};
use solana_sdk::{
    commitment_config::CommitmentConfig,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};
use std::time::Duration;
use tracing::{debug, error, info, instrument, trace, warn};

// =============================================================================
// SETTINGS
// =============================================================================

/// Tunables for one [`MintSubmitter`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitSettings {
    /// Owner of the new mint account and target of `InitializeMint`.
    pub token_program_id: Pubkey,

    /// Commitment the confirmation wait targets.
    pub commitment: CommitmentConfig,

    /// Upper bound on the confirmation wait.
    pub confirm_timeout: Duration,

    /// Delay between two status checks.
    pub poll_interval: Duration,
}

impl Default for SubmitSettings {
    fn default() -> Self {
        Self {
            token_program_id: crate::token_program::id(),
            commitment: CommitmentConfig::confirmed(),
            confirm_timeout: Duration::from_secs(60),
            poll_interval: Duration::from_millis(500),
        }
    }
}

// =============================================================================
// SUBMISSION RESULT
// =============================================================================

/// Outcome of a confirmed submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResult {
    /// Address of the new mint, i.e. the token's permanent identity.
    #[serde(with = "base58")]
    pub mint_address: Pubkey,

    /// Signature of the creation transaction.
    #[serde(with = "base58")]
    pub signature: Signature,

    pub decimals: u8,

    /// Whole tokens requested on the form. Not issued: the mint starts with
    /// a supply of zero and the wallet keeps the mint authority.
    pub initial_supply: u64,
}

impl SubmissionResult {
    pub fn mint_address_string(&self) -> String {
        self.mint_address.to_string()
    }

    pub fn signature_string(&self) -> String {
        self.signature.to_string()
    }

    /// The success text shown to the user.
    pub fn message(&self) -> String {
        format!(
            "Token Created! Mint Address: {}\nTransaction Signature: {}",
            self.mint_address, self.signature
        )
    }

    /// States that the requested supply was recorded but not minted.
    pub fn supply_notice(&self) -> String {
        format!(
            "Requested supply of {} tokens was not issued; on-chain supply is 0. \
             Mint authority remains with the wallet.",
            self.initial_supply
        )
    }
}

/// Serialize keys and signatures as their base-58 strings.
mod base58 {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use std::fmt::Display;
    use std::str::FromStr;

    pub fn serialize<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

// =============================================================================
// TRANSACTION ASSEMBLY
// =============================================================================

/// Assemble the unsigned mint creation transaction.
///
/// Account creation comes first: `InitializeMint` fails on an account that
/// does not exist yet. The blockhash is left at its default and attached by
/// the caller right before signing.
pub fn build_mint_transaction(
    payer: &Pubkey,
    mint: &Pubkey,
    lamports: u64,
    request: &MintRequest,
    token_program_id: &Pubkey,
) -> Transaction {
    let create_account = system_instruction::create_account(
        payer,
        mint,
        lamports,
        MINT_ACCOUNT_LEN as u64,
        token_program_id,
    );
    let initialize_mint =
        instruction::initialize_mint(token_program_id, mint, payer, None, request.decimals);

    Transaction::new_with_payer(&[create_account, initialize_mint], Some(payer))
}

/// Read back and decode a mint account. `Ok(None)` if it does not exist.
pub async fn inspect_mint(
    client: &dyn NetworkClient,
    address: &Pubkey,
) -> Result<Option<MintInfo>, InspectError> {
    match client.account_data(address).await? {
        Some(data) => Ok(Some(MintInfo::unpack(&data)?)),
        None => Ok(None),
    }
}

// =============================================================================
// SUBMITTER
// =============================================================================

/// Creates token mints through a [`NetworkClient`].
pub struct MintSubmitter<C> {
    client: C,
    settings: SubmitSettings,
}

impl<C: NetworkClient> MintSubmitter<C> {
    pub fn new(client: C, settings: SubmitSettings) -> Self {
        Self { client, settings }
    }

    /// Build a submitter from validated configuration.
    pub fn from_config(client: C, config: &SubmitterConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(client, config.submit_settings()?))
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn settings(&self) -> &SubmitSettings {
        &self.settings
    }

    /// Read back a mint created by this submitter.
    pub async fn inspect(&self, mint: &Pubkey) -> Result<Option<MintInfo>, InspectError> {
        inspect_mint(&self.client, mint).await
    }

    /// Create a new token mint owned by `wallet`.
    ///
    /// # Errors
    ///
    /// * [`SubmitError::WalletNotConnected`] before any network call
    /// * [`SubmitError::RentQueryFailed`] / [`SubmitError::BlockhashUnavailable`]
    ///   before anything is signed
    /// * [`SubmitError::SignRejected`] with nothing broadcast
    /// * [`SubmitError::BroadcastFailed`] if the cluster refused the transaction
    /// * [`SubmitError::ConfirmationFailed`] / [`SubmitError::ConfirmationTimedOut`]
    ///   after broadcast; the mint may exist
    ///
    /// Nothing is retried.
    #[instrument(
        name = "submit_mint",
        skip_all,
        fields(decimals = request.decimals, initial_supply = request.initial_supply)
    )]
    pub async fn submit(
        &self,
        request: MintRequest,
        wallet: &dyn WalletAdapter,
    ) -> Result<SubmissionResult, SubmitError> {
        let payer = match wallet.public_key() {
            Some(payer) if wallet.is_connected() => payer,
            _ => {
                warn!("wallet not connected, nothing submitted");
                return Err(SubmitError::WalletNotConnected);
            }
        };

        let result = self.submit_connected(request, wallet, payer).await;
        if let Err(err) = &result {
            error!(error = %err, indeterminate = err.is_indeterminate(), "token creation failed");
        }
        result
    }

    async fn submit_connected(
        &self,
        request: MintRequest,
        wallet: &dyn WalletAdapter,
        payer: Pubkey,
    ) -> Result<SubmissionResult, SubmitError> {
        // =====================================================================
        // STEP 1: Fresh mint keypair
        // =====================================================================
        let mint = Keypair::new();
        let mint_address = mint.pubkey();
        info!(mint = %mint_address, payer = %payer, "creating token mint");

        // =====================================================================
        // STEP 2: Rent exemption for the mint account
        // =====================================================================
        let lamports = self
            .client
            .minimum_balance_for_rent_exemption(MINT_ACCOUNT_LEN)
            .await
            .map_err(SubmitError::RentQueryFailed)?;
        debug!(lamports, "rent exemption balance");

        // =====================================================================
        // STEPS 3-5: CreateAccount + InitializeMint, in that order
        // =====================================================================
        let mut transaction = build_mint_transaction(
            &payer,
            &mint_address,
            lamports,
            &request,
            &self.settings.token_program_id,
        );

        // =====================================================================
        // STEP 6: Recent blockhash (fee payer is already the wallet)
        // =====================================================================
        let blockhash = self
            .client
            .latest_blockhash()
            .await
            .map_err(SubmitError::BlockhashUnavailable)?;
        transaction.message.recent_blockhash = blockhash;
        debug!(%blockhash, "attached recent blockhash");

        // =====================================================================
        // STEP 7: Wallet signs, mint co-signs, wallet broadcasts
        // =====================================================================
        let signature = wallet
            .sign_and_send(transaction, &self.client, &[&mint])
            .await
            .map_err(|err| match err {
                WalletError::Send(network) => SubmitError::BroadcastFailed(network),
                other => SubmitError::SignRejected(other.to_string()),
            })?;
        info!(%signature, "transaction broadcast, awaiting confirmation");

        // =====================================================================
        // STEP 8: Confirmation
        // =====================================================================
        self.await_confirmation(mint_address, signature).await?;
        info!(mint = %mint_address, %signature, "token mint created");

        // =====================================================================
        // STEP 9: Result
        // =====================================================================
        Ok(SubmissionResult {
            mint_address,
            signature,
            decimals: request.decimals,
            initial_supply: request.initial_supply,
        })
    }

    async fn await_confirmation(&self, mint: Pubkey, signature: Signature) -> Result<(), SubmitError> {
        let poll = async {
            loop {
                match self
                    .client
                    .confirm_transaction(&signature, self.settings.commitment)
                    .await
                {
                    Ok(Confirmation::Confirmed) => return Ok(()),
                    Ok(Confirmation::Failed(reason)) => return Err(reason),
                    Ok(Confirmation::Pending) => {
                        trace!(%signature, "not confirmed yet");
                        tokio::time::sleep(self.settings.poll_interval).await;
                    }
                    // A broken status query is not retried either.
                    Err(err) => return Err(err.to_string()),
                }
            }
        };

        match tokio::time::timeout(self.settings.confirm_timeout, poll).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(reason)) => Err(SubmitError::ConfirmationFailed {
                mint,
                signature,
                reason,
            }),
            Err(_) => Err(SubmitError::ConfirmationTimedOut {
                mint,
                signature,
                waited: self.settings.confirm_timeout,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::TokenInstruction;
    use solana_program::{system_program, sysvar};

    #[test]
    fn test_creation_precedes_initialization() {
        let payer = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let program = crate::token_program::id();
        let tx = build_mint_transaction(&payer, &mint, 1_461_600, &MintRequest::new(9, 1_000_000), &program);

        let message = &tx.message;
        assert_eq!(message.instructions.len(), 2);

        let first = &message.instructions[0];
        let second = &message.instructions[1];
        assert_eq!(message.account_keys[first.program_id_index as usize], system_program::id());
        assert_eq!(message.account_keys[second.program_id_index as usize], program);

        assert_eq!(
            TokenInstruction::unpack(&second.data),
            Ok(TokenInstruction::InitializeMint {
                decimals: 9,
                mint_authority: payer,
                freeze_authority: None,
            })
        );
        assert!(message.account_keys.contains(&sysvar::rent::id()));
    }

    #[test]
    fn test_payer_and_mint_must_sign() {
        let payer = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let tx = build_mint_transaction(
            &payer,
            &mint,
            1,
            &MintRequest::default(),
            &crate::token_program::id(),
        );

        // Fee payer is always the first key; the mint is the only other signer.
        assert_eq!(tx.message.header.num_required_signatures, 2);
        assert_eq!(tx.message.account_keys[0], payer);
        assert_eq!(tx.message.account_keys[1], mint);
        assert_eq!(tx.signatures.len(), 2);
    }

    #[test]
    fn test_result_serializes_as_base58() {
        let result = SubmissionResult {
            mint_address: Pubkey::new_unique(),
            signature: Signature::new_unique(),
            decimals: 9,
            initial_supply: 1_000_000,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["mint_address"], result.mint_address_string());
        assert_eq!(json["signature"], result.signature_string());

        let parsed: SubmissionResult = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, result);
    }

    #[test]
    fn test_message_mentions_address_and_signature() {
        let result = SubmissionResult {
            mint_address: Pubkey::new_unique(),
            signature: Signature::new_unique(),
            decimals: 0,
            initial_supply: 0,
        };
        let message = result.message();
        assert!(message.starts_with("Token Created!"));
        assert!(message.contains(&result.mint_address_string()));
        assert!(message.contains(&result.signature_string()));
    }

    #[test]
    fn test_supply_notice_says_nothing_was_issued() {
        let result = SubmissionResult {
            mint_address: Pubkey::new_unique(),
            signature: Signature::new_unique(),
            decimals: 9,
            initial_supply: 1_000_000,
        };
        let notice = result.supply_notice();
        assert!(notice.contains("1000000 tokens was not issued"));
        assert!(notice.contains("on-chain supply is 0"));
        assert!(!result.message().contains("supply"));
    }
}

/*
=============================================================================
DETAILED EXPLANATION
=============================================================================

WHY THE MINT KEYPAIR SIGNS
==========================

system_instruction::create_account allocates space at a NEW address.
The runtime only lets an address be allocated if its owner agrees,
so the new account's keypair must sign the transaction:

    signatures[0] = wallet (fee payer, funds the rent)
    signatures[1] = mint   (consents to being created)

The wallet never sees the mint's secret key as "its own" key. It receives
the keypair only as an extra signer for this one transaction.

WHY NOTHING IS RETRIED
======================

Every call generates a new mint keypair, so re-running the flow creates
a DIFFERENT mint. A retry after an ambiguous failure could leave two mints
on-chain. Instead, the two post-broadcast failures carry the mint address
and signature:

    ConfirmationFailed   -> cluster said the transaction failed
                            (or the status query broke)
    ConfirmationTimedOut -> no answer before confirm_timeout

and the caller decides what to do with them.

THE BLOCKHASH WINDOW
====================

A blockhash stays valid for roughly 150 slots (about a minute). The
default confirm_timeout of 60 seconds matches that window: once it has
passed, a transaction that has not landed is unlikely to land at all.
*/
