//! Submitter Configuration
//!
//! Settings live in an optional JSON file. Missing fields take their
//! defaults, so an empty object `{}` is a valid config targeting devnet.
//!
//! ```json
//! {
//!   "rpc_url": "https://api.devnet.solana.com",
//!   "commitment": "confirmed",
//!   "confirm_timeout_secs": 60,
//!   "poll_interval_ms": 500,
//!   "token_program_id": "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA"
//! }
//! ```
//!
//! Command-line flags override file values; see the `mint-submitter` binary.

use crate::error::ConfigError;
use crate::submitter::SubmitSettings;
use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;
use solana_sdk::commitment_config::CommitmentConfig;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Devnet, the cluster the token creation form targets by default.
pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";

const DEFAULT_CONFIRM_TIMEOUT_SECS: u64 = 60;
const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

// =============================================================================
// COMMITMENT
// =============================================================================

/// Commitment level to wait for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

impl From<Commitment> for CommitmentConfig {
    fn from(commitment: Commitment) -> Self {
        match commitment {
            Commitment::Processed => CommitmentConfig::processed(),
            Commitment::Confirmed => CommitmentConfig::confirmed(),
            Commitment::Finalized => CommitmentConfig::finalized(),
        }
    }
}

// =============================================================================
// CONFIG
// =============================================================================

/// Everything the submitter and its RPC client need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitterConfig {
    pub rpc_url: String,
    pub commitment: Commitment,
    pub confirm_timeout_secs: u64,
    pub poll_interval_ms: u64,
    /// Must match the token program deployed on the target cluster.
    pub token_program_id: String,
}

impl Default for SubmitterConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            commitment: Commitment::default(),
            confirm_timeout_secs: DEFAULT_CONFIRM_TIMEOUT_SECS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            token_program_id: crate::token_program::id().to_string(),
        }
    }
}

impl SubmitterConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !validate_url(&self.rpc_url) {
            return Err(ConfigError::InvalidUrl(self.rpc_url.clone()));
        }
        self.token_program_id()?;
        if self.confirm_timeout_secs == 0 {
            return Err(ConfigError::ZeroDuration("confirm_timeout_secs"));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroDuration("poll_interval_ms"));
        }
        Ok(())
    }

    pub fn token_program_id(&self) -> Result<Pubkey, ConfigError> {
        Pubkey::from_str(&self.token_program_id)
            .map_err(|_| ConfigError::InvalidProgramId(self.token_program_id.clone()))
    }

    pub fn commitment_config(&self) -> CommitmentConfig {
        self.commitment.into()
    }

    /// Validated settings for [`MintSubmitter`](crate::MintSubmitter).
    pub fn submit_settings(&self) -> Result<SubmitSettings, ConfigError> {
        self.validate()?;
        Ok(SubmitSettings {
            token_program_id: self.token_program_id()?,
            commitment: self.commitment_config(),
            confirm_timeout: Duration::from_secs(self.confirm_timeout_secs),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
        })
    }
}

/// Validate that a URL is well-formed and uses HTTP or HTTPS.
pub fn validate_url(url: &str) -> bool {
    match url::Url::parse(url) {
        Ok(parsed) => {
            let scheme = parsed.scheme();
            (scheme == "http" || scheme == "https") && parsed.host().is_some()
        }
        Err(_) => false,
    }
}
