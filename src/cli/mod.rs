pub mod commands;
pub mod wallet;

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use oneinch_rs::client::DEFAULT_API_URL;
use oneinch_rs::{Chain, ClientConfig, OneInchApi, QuoteOptions, SwapOptions, DEFAULT_SLIPPAGE};
use std::time::Duration;
use tracing::debug;

use crate::cli::wallet::{LocalWallet, Wallet};

#[derive(Parser)]
#[command(name = "oneinch", about = "Quotes, approvals and swaps through the 1inch aggregation API")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Network name (mainnet, bsc, polygon, ...) or chain id
    #[arg(long, global = true, env = "ONEINCH_CHAIN", default_value = "mainnet")]
    pub chain: Chain,

    /// API root, without version or chain id
    #[arg(long, global = true, env = "ONEINCH_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "ONEINCH_TIMEOUT", default_value_t = 30)]
    pub timeout: u64,

    /// JSON-RPC endpoint used to submit transactions
    #[arg(long, global = true, env = "ONEINCH_RPC_URL")]
    pub rpc_url: Option<String>,

    /// Private key of the sending wallet
    #[arg(long, global = true, env = "ONEINCH_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check that the API is up
    Healthcheck,

    /// Address of the router that needs a token allowance
    #[command(name = "approveSpender", alias = "approve-spender")]
    ApproveSpender,

    /// All tokens known for the chain
    Tokens,

    /// Look up one token by symbol
    Token { symbol: String },

    /// Liquidity sources used for routing
    #[command(name = "liquiditySources", alias = "liquidity-sources")]
    LiquiditySources,

    /// Routing presets
    Presets,

    /// Approve the router to spend a token, or print the unsigned approval
    #[command(name = "approveTransaction", alias = "approve-transaction")]
    ApproveTransaction(ApproveTransactionArgs),

    /// Current allowance granted by a wallet to the router
    #[command(name = "approveAllowance", alias = "approve-allowance")]
    ApproveAllowance {
        symbol: String,
        wallet_address: String,
    },

    /// Quote a swap and print the resulting price
    Quote(QuoteArgs),

    /// Build, sign and submit a swap
    Swap(SwapArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ApproveTransactionArgs {
    pub symbol: String,

    /// Amount to approve; unlimited when omitted
    #[arg(long)]
    pub human_amount: Option<String>,

    /// Print the unsigned transaction instead of submitting it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct QuoteOptionArgs {
    #[arg(long)]
    pub protocols: Option<String>,

    #[arg(long)]
    pub fee: Option<f64>,

    #[arg(long)]
    pub gas_limit: Option<u64>,

    #[arg(long)]
    pub connector_tokens: Option<String>,

    #[arg(long)]
    pub complexity_level: Option<String>,

    #[arg(long)]
    pub main_route_parts: Option<u32>,

    #[arg(long)]
    pub parts: Option<u32>,

    #[arg(long)]
    pub gas_price: Option<String>,
}

impl QuoteOptionArgs {
    pub fn to_options(&self) -> QuoteOptions {
        QuoteOptions {
            fee: self.fee,
            protocols: self.protocols.clone(),
            gas_price: self.gas_price.clone(),
            complexity_level: self.complexity_level.clone(),
            connector_tokens: self.connector_tokens.clone(),
            gas_limit: self.gas_limit,
            parts: self.parts,
            main_route_parts: self.main_route_parts,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct QuoteArgs {
    pub from_symbol: String,
    pub to_symbol: String,
    pub human_amount: String,

    #[command(flatten)]
    pub options: QuoteOptionArgs,
}

#[derive(Args, Debug, Clone)]
pub struct SwapArgs {
    pub from_symbol: String,
    pub to_symbol: String,
    pub human_amount: String,

    /// Maximum slippage in percent
    #[arg(default_value_t = DEFAULT_SLIPPAGE)]
    pub slippage: f64,

    #[command(flatten)]
    pub options: QuoteOptionArgs,

    #[arg(long)]
    pub dest_receiver: Option<String>,

    #[arg(long)]
    pub referrer_address: Option<String>,

    #[arg(long)]
    pub disable_estimate: bool,

    #[arg(long)]
    pub permit: Option<String>,

    #[arg(long)]
    pub burn_chi: bool,

    #[arg(long)]
    pub no_allow_partial_fill: bool,

    /// Print the swap response and price instead of submitting
    #[arg(long)]
    pub dry_run: bool,
}

impl SwapArgs {
    pub fn to_options(&self) -> SwapOptions {
        SwapOptions {
            quote: self.options.to_options(),
            dest_receiver: self.dest_receiver.clone(),
            referrer_address: self.referrer_address.clone(),
            burn_chi: self.burn_chi.then_some(true),
            allow_partial_fill: Some(!self.no_allow_partial_fill),
            disable_estimate: self.disable_estimate.then_some(true),
            permit: self.permit.clone(),
        }
    }
}

/// Process-wide settings, collected once from flags and environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub chain: Chain,
    pub api_url: String,
    pub timeout: Duration,
    pub rpc_url: Option<String>,
    pub private_key: Option<String>,
}

impl From<&GlobalArgs> for Config {
    fn from(args: &GlobalArgs) -> Self {
        Self {
            chain: args.chain,
            api_url: args.api_url.clone(),
            timeout: Duration::from_secs(args.timeout),
            rpc_url: args.rpc_url.clone(),
            private_key: args.private_key.clone(),
        }
    }
}

impl Config {
    pub fn client(&self) -> Result<OneInchApi> {
        let config = ClientConfig {
            api_url: self.api_url.clone(),
            timeout: self.timeout,
        };
        Ok(OneInchApi::with_config(self.chain, config)?)
    }

    pub fn wallet(&self) -> Result<LocalWallet> {
        let rpc_url = self
            .rpc_url
            .as_deref()
            .ok_or_else(|| anyhow!("no RPC URL configured (--rpc-url or ONEINCH_RPC_URL)"))?;
        let private_key = self
            .private_key
            .as_deref()
            .ok_or_else(|| anyhow!("no private key configured (--private-key or ONEINCH_PRIVATE_KEY)"))?;
        LocalWallet::connect(rpc_url, private_key)
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = Config::from(&self.global);
        let api = config.client()?;
        debug!(chain = %config.chain, base_url = api.base_url(), "client ready");

        let output = match self.command {
            Commands::Healthcheck => api.healthcheck().await?,
            Commands::ApproveSpender => api.approve_spender().await?,
            Commands::Tokens => serde_json::to_value(api.tokens().await?)?,
            Commands::Token { symbol } => commands::token(&api, &symbol).await?,
            Commands::LiquiditySources => api.liquidity_sources().await?,
            Commands::Presets => api.presets().await?,
            Commands::ApproveTransaction(args) => {
                let signer = if args.dry_run {
                    None
                } else {
                    Some(config.wallet()?)
                };
                commands::approve_transaction(
                    &api,
                    &args.symbol,
                    args.human_amount.as_deref(),
                    signer.as_ref().map(|w| w as &dyn Wallet),
                )
                .await?
            }
            Commands::ApproveAllowance {
                symbol,
                wallet_address,
            } => commands::approve_allowance(&api, &symbol, &wallet_address).await?,
            Commands::Quote(args) => commands::quote(&api, &args).await?,
            Commands::Swap(args) => {
                let signer = config.wallet()?;
                commands::swap(&api, &signer, &args).await?
            }
        };

        commands::print_json(&output)
    }
}
