use alloy::network::{EthereumWallet, TransactionBuilder};
use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use oneinch_rs::TxPayload;
use std::str::FromStr;
use tracing::{debug, info};

/// Signs and submits transactions built by the API.
#[async_trait]
pub trait Wallet: Send + Sync {
    fn address(&self) -> Address;

    /// Submits `tx` and waits for its receipt.
    async fn send_transaction(&self, tx: TxPayload) -> Result<TxHash>;
}

/// Local private key plus an HTTP JSON-RPC provider.
pub struct LocalWallet {
    address: Address,
    provider: DynProvider,
}

impl LocalWallet {
    pub fn connect(rpc_url: &str, private_key: &str) -> Result<Self> {
        let signer = parse_private_key(private_key)?;
        let address = signer.address();
        let url: reqwest::Url = rpc_url
            .parse()
            .with_context(|| format!("invalid RPC URL '{}'", rpc_url))?;
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(url)
            .erased();
        Ok(Self { address, provider })
    }
}

#[async_trait]
impl Wallet for LocalWallet {
    fn address(&self) -> Address {
        self.address
    }

    async fn send_transaction(&self, tx: TxPayload) -> Result<TxHash> {
        let request = to_transaction_request(&tx)?;
        debug!(to = %tx.to, from = %self.address, "sending transaction");

        let pending = self
            .provider
            .send_transaction(request)
            .await
            .context("failed to send transaction")?;
        let receipt = pending
            .get_receipt()
            .await
            .context("failed to get transaction receipt")?;

        info!(tx_hash = %receipt.transaction_hash, status = receipt.status(), "transaction mined");
        Ok(receipt.transaction_hash)
    }
}

fn parse_private_key(key: &str) -> Result<PrivateKeySigner> {
    let key = key.trim();
    let key = key.strip_prefix("0x").unwrap_or(key);
    key.parse::<PrivateKeySigner>()
        .map_err(|e| anyhow!("invalid private key: {}", e))
}

/// Numeric fields may be decimal (`"1000"`) or hex (`"0x3e8"`).
fn parse_quantity(field: &str, value: &str) -> Result<U256> {
    U256::from_str(value.trim()).with_context(|| format!("invalid {} '{}'", field, value))
}

pub fn to_transaction_request(tx: &TxPayload) -> Result<TransactionRequest> {
    let to = Address::from_str(&tx.to).with_context(|| format!("invalid to address '{}'", tx.to))?;
    let data = Bytes::from_str(&tx.data).with_context(|| format!("invalid calldata '{}'", tx.data))?;

    let mut request = TransactionRequest::default().with_to(to).with_input(data);

    if let Some(from) = &tx.from {
        let from = Address::from_str(from).with_context(|| format!("invalid from address '{}'", from))?;
        request = request.with_from(from);
    }
    if let Some(value) = &tx.value {
        request = request.with_value(parse_quantity("value", value)?);
    }
    if let Some(gas_price) = &tx.gas_price {
        let gas_price = u128::try_from(parse_quantity("gasPrice", gas_price)?)
            .map_err(|_| anyhow!("gasPrice out of range: {}", gas_price))?;
        request = request.with_gas_price(gas_price);
    }
    if let Some(gas) = &tx.gas {
        let gas = u64::try_from(parse_quantity("gas", gas)?)
            .map_err(|_| anyhow!("gas out of range: {}", gas))?;
        request = request.with_gas_limit(gas);
    }

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::TxKind;

    fn swap_tx() -> TxPayload {
        TxPayload {
            from: Some("0x70997970c51812dc3a010c7d01b50e0d17dc79c8".to_string()),
            to: "0x1111111254fb6c44bac0bed2854e76f90643097d".to_string(),
            data: "0x7c025200deadbeef".to_string(),
            value: Some("1000000000000000000".to_string()),
            gas_price: Some("0x6fc23ac00".to_string()),
            gas: Some("182000".to_string()),
        }
    }

    #[test]
    fn test_to_transaction_request() {
        let request = to_transaction_request(&swap_tx()).unwrap();
        let to = Address::from_str("0x1111111254fb6c44bac0bed2854e76f90643097d").unwrap();
        assert_eq!(request.to, Some(TxKind::Call(to)));
        assert_eq!(request.value, Some(U256::from(10u64).pow(U256::from(18u64))));
        assert_eq!(request.gas_price, Some(30_000_000_000));
        assert_eq!(request.gas, Some(182_000));
        assert_eq!(request.input.input().map(|b| b.len()), Some(8));
    }

    #[test]
    fn test_stripped_gas_is_not_forwarded() {
        let request = to_transaction_request(&swap_tx().without_gas()).unwrap();
        assert_eq!(request.gas, None);
    }

    #[test]
    fn test_invalid_fields_rejected() {
        let mut tx = swap_tx();
        tx.to = "not-an-address".to_string();
        assert!(to_transaction_request(&tx).is_err());

        let mut tx = swap_tx();
        tx.value = Some("1.5".to_string());
        assert!(to_transaction_request(&tx).is_err());
    }

    #[test]
    fn test_parse_private_key() {
        let key = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
        let signer = parse_private_key(key).unwrap();
        assert_eq!(
            signer.address(),
            Address::from_str("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266").unwrap()
        );
        assert!(parse_private_key("0x1234").is_err());
    }
}
