//! # oneinch-rs
//!
//! A Rust client for the 1inch DEX aggregation API (v4.0), plus the `oneinch`
//! command-line tool built on top of it.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Parameters |
//! |--------|----------|------------|
//! | `healthcheck` | `/healthcheck` | - |
//! | `approve_spender` | `/approve/spender` | - |
//! | `approve_transaction` | `/approve/transaction` | tokenAddress, amount? |
//! | `approve_allowance` | `/approve/allowance` | tokenAddress, walletAddress |
//! | `liquidity_sources` | `/liquidity-sources` | - |
//! | `tokens` | `/tokens` | - |
//! | `presets` | `/presets` | - |
//! | `quote` | `/quote` | fromTokenAddress, toTokenAddress, amount, [`QuoteOptions`] |
//! | `swap` | `/swap` | fromTokenAddress, toTokenAddress, amount, fromAddress, slippage, [`SwapOptions`] |
//!
//! A missing required parameter fails with [`ErrorKind::Construction`] before
//! anything is sent. Transport and API failures are reported as
//! [`ErrorKind::Timeout`] or [`ErrorKind::Api`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use oneinch_rs::{amount, Chain, OneInchApi, QuoteOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = OneInchApi::new(Chain::Mainnet)?;
//!
//!     let tokens = api.tokens().await?;
//!     let eth = tokens.find_by_symbol("ETH")?;
//!     let usdc = tokens.find_by_symbol("USDC")?;
//!
//!     let raw = amount::to_raw_amount("1.5", eth.decimals)?;
//!     let quote = api
//!         .quote(&eth.address, &usdc.address, &raw, &QuoteOptions::default())
//!         .await?;
//!
//!     println!("{}", serde_json::to_string_pretty(&quote)?);
//!     Ok(())
//! }
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! # Settings can also come from a .env file
//! export ONEINCH_CHAIN=mainnet
//! export ONEINCH_RPC_URL=https://eth.llamarpc.com
//! export ONEINCH_PRIVATE_KEY=0x...
//!
//! oneinch token USDC
//! oneinch quote ETH USDC 1.5 --protocols UNISWAP_V3
//! oneinch approveTransaction USDC --human-amount 100 --dry-run
//! oneinch swap ETH USDC 1.5 1 --dry-run
//! ```

pub mod amount;
pub mod chain;
pub mod client;
pub mod error;
pub mod models;
pub mod params;

pub use chain::Chain;
pub use client::{ClientConfig, OneInchApi};
pub use error::{Error, ErrorKind, Result};
pub use models::{QuoteOptions, SwapOptions, Token, TokenList, TxPayload, DEFAULT_SLIPPAGE};
pub use params::Params;
