use anyhow::{Context, Result};
use oneinch_rs::amount::{calculate_price, to_raw_amount};
use oneinch_rs::{OneInchApi, Token, TxPayload};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

use crate::cli::wallet::Wallet;
use crate::cli::{QuoteArgs, SwapArgs};

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Fetches the chain's token list and picks the single token with `symbol`.
pub async fn resolve_token(api: &OneInchApi, symbol: &str) -> Result<Token> {
    let tokens = api.tokens().await?;
    let token = tokens.find_by_symbol(symbol)?.clone();
    info!(symbol, address = %token.address, decimals = token.decimals, "resolved token");
    Ok(token)
}

pub async fn token(api: &OneInchApi, symbol: &str) -> Result<Value> {
    Ok(serde_json::to_value(resolve_token(api, symbol).await?)?)
}

/// Without a wallet the unsigned approval is returned as is.
pub async fn approve_transaction(
    api: &OneInchApi,
    symbol: &str,
    human_amount: Option<&str>,
    wallet: Option<&dyn Wallet>,
) -> Result<Value> {
    let token = resolve_token(api, symbol).await?;
    let amount = human_amount
        .map(|h| to_raw_amount(h, token.decimals))
        .transpose()?;
    let tx = api
        .approve_transaction(&token.address, amount.as_deref())
        .await?;

    match wallet {
        None => Ok(serde_json::to_value(tx)?),
        Some(wallet) => submit(wallet, tx).await,
    }
}

pub async fn approve_allowance(api: &OneInchApi, symbol: &str, wallet_address: &str) -> Result<Value> {
    let token = resolve_token(api, symbol).await?;
    Ok(api.approve_allowance(&token.address, wallet_address).await?)
}

pub async fn quote(api: &OneInchApi, args: &QuoteArgs) -> Result<Value> {
    let from_token = resolve_token(api, &args.from_symbol).await?;
    let to_token = resolve_token(api, &args.to_symbol).await?;
    let amount = to_raw_amount(&args.human_amount, from_token.decimals)?;

    let response = api
        .quote(
            &from_token.address,
            &to_token.address,
            &amount,
            &args.options.to_options(),
        )
        .await?;
    with_price(response, &from_token, &to_token)
}

pub async fn swap(api: &OneInchApi, wallet: &dyn Wallet, args: &SwapArgs) -> Result<Value> {
    let from_token = resolve_token(api, &args.from_symbol).await?;
    let to_token = resolve_token(api, &args.to_symbol).await?;
    let amount = to_raw_amount(&args.human_amount, from_token.decimals)?;
    let from_address = wallet.address().to_string();

    let response = api
        .swap(
            &from_token.address,
            &to_token.address,
            &amount,
            &from_address,
            args.slippage,
            &args.to_options(),
        )
        .await?;

    if args.dry_run {
        return with_price(response, &from_token, &to_token);
    }

    let tx: TxPayload = serde_json::from_value(
        response
            .get("tx")
            .cloned()
            .context("swap response has no tx")?,
    )
    .context("malformed tx in swap response")?;
    submit(wallet, tx.without_gas()).await
}

async fn submit(wallet: &dyn Wallet, tx: TxPayload) -> Result<Value> {
    let tx_hash = wallet.send_transaction(tx).await?;
    Ok(json!({ "transactionHash": tx_hash }))
}

/// Appends `price` (to-units per from-unit) to a quote or swap response.
pub fn with_price(mut response: Value, from_token: &Token, to_token: &Token) -> Result<Value> {
    let price = {
        let from_amount = response
            .get("fromTokenAmount")
            .and_then(Value::as_str)
            .context("response has no fromTokenAmount")?;
        let to_amount = response
            .get("toTokenAmount")
            .and_then(Value::as_str)
            .context("response has no toTokenAmount")?;
        calculate_price(from_token, from_amount, to_token, to_amount)?
    };

    response
        .as_object_mut()
        .context("response is not a JSON object")?
        .insert("price".to_string(), json!(price));
    Ok(response)
}
