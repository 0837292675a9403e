//! Cluster Access
//!
//! The submitter never talks to JSON-RPC directly. It goes through the
//! [`NetworkClient`] trait so the cluster can be replaced by an in-process
//! bank or a recording double in tests.
//!
//! [`RpcNetworkClient`] is the production implementation on top of the
//! nonblocking `solana_client` RPC client. Timeouts are whatever that client
//! uses by default.

use crate::error::NetworkError;
use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_program::{hash::Hash, pubkey::Pubkey};
use solana_sdk::{commitment_config::CommitmentConfig, signature::Signature, transaction::Transaction};
use tracing::debug;

/// Status of a broadcast transaction at the requested commitment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Confirmation {
    /// Not yet observed at the requested commitment.
    Pending,

    /// Landed and succeeded.
    Confirmed,

    /// Landed but the transaction failed.
    Failed(String),
}

// =============================================================================
// NETWORK CLIENT TRAIT
// =============================================================================

/// The cluster operations one submission needs.
#[async_trait]
pub trait NetworkClient: Send + Sync {
    /// Lamports an account of `data_len` bytes must hold to be rent exempt.
    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64, NetworkError>;

    /// A recent blockhash to make the transaction valid.
    async fn latest_blockhash(&self) -> Result<Hash, NetworkError>;

    /// Broadcast a fully signed transaction.
    async fn send_transaction(&self, transaction: &Transaction) -> Result<Signature, NetworkError>;

    /// One status check for `signature`. Callers poll.
    async fn confirm_transaction(
        &self,
        signature: &Signature,
        commitment: CommitmentConfig,
    ) -> Result<Confirmation, NetworkError>;

    /// Raw data of `address`, or `None` if the account does not exist.
    async fn account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, NetworkError>;
}

// =============================================================================
// RPC IMPLEMENTATION
// =============================================================================

/// [`NetworkClient`] backed by a JSON-RPC endpoint.
pub struct RpcNetworkClient {
    rpc: RpcClient,
}

impl RpcNetworkClient {
    /// Connect to `url` using `commitment` for reads and preflight.
    pub fn new(url: impl Into<String>, commitment: CommitmentConfig) -> Self {
        Self {
            rpc: RpcClient::new_with_commitment(url.into(), commitment),
        }
    }

    /// Endpoint this client talks to.
    pub fn url(&self) -> String {
        self.rpc.url()
    }
}

fn rpc_error(err: solana_client::client_error::ClientError) -> NetworkError {
    NetworkError::Rpc(err.to_string())
}

#[async_trait]
impl NetworkClient for RpcNetworkClient {
    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64, NetworkError> {
        let lamports = self
            .rpc
            .get_minimum_balance_for_rent_exemption(data_len)
            .await
            .map_err(rpc_error)?;
        debug!(data_len, lamports, "rent exemption balance");
        Ok(lamports)
    }

    async fn latest_blockhash(&self) -> Result<Hash, NetworkError> {
        self.rpc.get_latest_blockhash().await.map_err(rpc_error)
    }

    async fn send_transaction(&self, transaction: &Transaction) -> Result<Signature, NetworkError> {
        self.rpc
            .send_transaction(transaction)
            .await
            .map_err(|err| NetworkError::TransactionRejected(err.to_string()))
    }

    async fn confirm_transaction(
        &self,
        signature: &Signature,
        commitment: CommitmentConfig,
    ) -> Result<Confirmation, NetworkError> {
        let status = self
            .rpc
            .get_signature_status_with_commitment(signature, commitment)
            .await
            .map_err(rpc_error)?;

        Ok(match status {
            None => Confirmation::Pending,
            Some(Ok(())) => Confirmation::Confirmed,
            Some(Err(err)) => Confirmation::Failed(err.to_string()),
        })
    }

    async fn account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, NetworkError> {
        let response = self
            .rpc
            .get_account_with_commitment(address, self.rpc.commitment())
            .await
            .map_err(rpc_error)?;
        Ok(response.value.map(|account| account.data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpc_client_keeps_url() {
        let client = RpcNetworkClient::new("http://localhost:8899", CommitmentConfig::confirmed());
        assert_eq!(client.url(), "http://localhost:8899");
    }
}
