//! `mint-submitter` - command-line token creation form.
//!
//! ```text
//! mint-submitter --name "Hive Token" --symbol HIVE --decimals 9 --supply 1000000 \
//!     --keypair ~/.config/solana/id.json --verify
//! ```
//!
//! Without `--keypair` a burner wallet is generated, which has no funds and
//! will fail unless the cluster airdrops to it first.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use token_mint_submitter::{
    logging, Commitment, KeypairWallet, MintSubmitter, RpcNetworkClient, SubmitterConfig,
    TokenForm, WalletAdapter,
};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "mint-submitter", about = "Create a new SPL token mint from a wallet", version)]
struct Cli {
    /// Token name (kept off-chain)
    #[arg(long, default_value = "")]
    name: String,

    /// Token symbol (kept off-chain)
    #[arg(long, default_value = "")]
    symbol: String,

    /// Decimal places of the new token
    #[arg(long, default_value = "9")]
    decimals: String,

    /// Initial supply in whole tokens
    #[arg(long, default_value = "1000000")]
    supply: String,

    /// Payer and mint authority keypair file; a burner wallet is generated when omitted
    #[arg(long, env = "MINT_SUBMITTER_KEYPAIR")]
    keypair: Option<PathBuf>,

    /// JSON settings file
    #[arg(long, env = "MINT_SUBMITTER_CONFIG")]
    config: Option<PathBuf>,

    /// RPC endpoint, overrides the settings file
    #[arg(long, env = "MINT_SUBMITTER_RPC_URL")]
    url: Option<String>,

    /// Commitment to wait for, overrides the settings file
    #[arg(long, value_enum)]
    commitment: Option<Commitment>,

    /// Read the mint account back after creation
    #[arg(long)]
    verify: bool,
}

impl Cli {
    fn settings(&self) -> Result<SubmitterConfig> {
        let mut config = match &self.config {
            Some(path) => SubmitterConfig::load(path)?,
            None => SubmitterConfig::default(),
        };
        if let Some(url) = &self.url {
            config.rpc_url = url.clone();
        }
        if let Some(commitment) = self.commitment {
            config.commitment = commitment;
        }
        config.validate()?;
        Ok(config)
    }

    fn form(&self) -> TokenForm {
        TokenForm {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            decimals: self.decimals.clone(),
            initial_supply: self.supply.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    logging::init_logging(logging::DEFAULT_FILTER)?;
    let cli = Cli::parse();

    let config = cli.settings().context("invalid settings")?;
    let form = cli.form();
    let request = match form.to_request() {
        Ok(request) => request,
        Err(err) => {
            eprintln!("{err}");
            return Ok(ExitCode::from(2));
        }
    };

    let wallet = match &cli.keypair {
        Some(path) => KeypairWallet::from_file(path)?,
        None => KeypairWallet::generate(),
    };

    let client = RpcNetworkClient::new(config.rpc_url.clone(), config.commitment_config());
    let submitter = MintSubmitter::from_config(client, &config)?;
    info!(token = %form.label(), url = %config.rpc_url, "submitting token creation");

    let result = match submitter.submit(request, &wallet as &dyn WalletAdapter).await {
        Ok(result) => result,
        Err(err) => {
            println!("{}", err.user_message());
            return Ok(ExitCode::FAILURE);
        }
    };
    println!("{}", result.message());
    println!("{}", result.supply_notice());

    if cli.verify {
        match submitter.inspect(&result.mint_address).await {
            Ok(Some(mint)) => println!(
                "Verified: decimals {}, supply {}, mint authority {}",
                mint.decimals,
                mint.supply,
                mint.mint_authority
                    .map(|authority| authority.to_string())
                    .unwrap_or_else(|| "none".to_string())
            ),
            Ok(None) => warn!(mint = %result.mint_address, "mint account not visible yet"),
            Err(err) => warn!(error = %err, "could not read mint account"),
        }
    }

    Ok(ExitCode::SUCCESS)
}
