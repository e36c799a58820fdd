use crate::error::{classify_send_error, error_body_message, Error, Result};
use crate::models::{QuoteOptions, SwapOptions, TokenList, TxPayload};
use crate::params::Params;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_API_URL: &str = "https://api.1inch.exchange";
pub const API_VERSION: &str = "v4.0";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root without version or chain, e.g. `https://api.1inch.exchange`.
    pub api_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Client for the aggregation API of one chain.
///
/// Every method issues exactly one GET against
/// `<api_url>/v4.0/<chain_id>/<endpoint>`. Nothing is retried.
pub struct OneInchApi {
    base_url: String,
    chain_id: u64,
    client: reqwest::Client,
}

impl OneInchApi {
    pub fn new(chain_id: impl Into<u64>) -> Result<Self> {
        Self::with_config(chain_id, ClientConfig::default())
    }

    pub fn with_config(chain_id: impl Into<u64>, config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(Error::Transport)?;
        Ok(Self::with_client(chain_id, &config.api_url, client))
    }

    pub fn with_client(chain_id: impl Into<u64>, api_url: &str, client: reqwest::Client) -> Self {
        let chain_id = chain_id.into();
        Self {
            base_url: format!(
                "{}/{}/{}",
                api_url.trim_end_matches('/'),
                API_VERSION,
                chain_id
            ),
            chain_id,
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub async fn healthcheck(&self) -> Result<Value> {
        self.fetch("/healthcheck", &Params::new()).await
    }

    /// Returns `{"address": ...}`, the router that needs an allowance.
    pub async fn approve_spender(&self) -> Result<Value> {
        self.fetch("/approve/spender", &Params::new()).await
    }

    /// Builds the approval transaction for `token_address`. Without an `amount`
    /// the API returns an unlimited approval.
    pub async fn approve_transaction(
        &self,
        token_address: &str,
        amount: Option<&str>,
    ) -> Result<TxPayload> {
        let params = Params::approve_transaction(token_address, amount)?;
        self.fetch("/approve/transaction", &params).await
    }

    pub async fn approve_allowance(&self, token_address: &str, wallet_address: &str) -> Result<Value> {
        let params = Params::approve_allowance(token_address, wallet_address)?;
        self.fetch("/approve/allowance", &params).await
    }

    pub async fn liquidity_sources(&self) -> Result<Value> {
        self.fetch("/liquidity-sources", &Params::new()).await
    }

    pub async fn tokens(&self) -> Result<TokenList> {
        self.fetch("/tokens", &Params::new()).await
    }

    pub async fn presets(&self) -> Result<Value> {
        self.fetch("/presets", &Params::new()).await
    }

    pub async fn quote(
        &self,
        from_token_address: &str,
        to_token_address: &str,
        amount: &str,
        options: &QuoteOptions,
    ) -> Result<Value> {
        let params = Params::quote(from_token_address, to_token_address, amount, options)?;
        self.fetch("/quote", &params).await
    }

    pub async fn swap(
        &self,
        from_token_address: &str,
        to_token_address: &str,
        amount: &str,
        from_address: &str,
        slippage: f64,
        options: &SwapOptions,
    ) -> Result<Value> {
        let params = Params::swap(
            from_token_address,
            to_token_address,
            amount,
            from_address,
            slippage,
            options,
        )?;
        self.fetch("/swap", &params).await
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn fetch<T: DeserializeOwned>(&self, endpoint: &str, params: &Params) -> Result<T> {
        let url = self.build_url(endpoint);
        debug!(%url, params = ?params.keys().collect::<Vec<_>>(), "GET");

        let response = self
            .client
            .get(&url)
            .query(params.pairs())
            .send()
            .await
            .map_err(|e| {
                let err = classify_send_error(e);
                warn!(endpoint, kind = ?err.kind(), error = %err, "request failed");
                err
            })?;

        let status = response.status();
        if !status.is_success() {
            let status_error = response.error_for_status_ref().err();
            let body = response.text().await.unwrap_or_default();
            let message = error_body_message(&body).unwrap_or_else(|| status.to_string());
            warn!(endpoint, %status, %message, "API returned an error");
            return Err(Error::Api {
                message,
                status: Some(status),
                source: status_error,
            });
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_timeout() {
                classify_send_error(e)
            } else {
                Error::Api {
                    message: format!("invalid response body from {}: {}", endpoint, e),
                    status: Some(status),
                    source: Some(e),
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::Chain;

    #[test]
    fn test_base_url() {
        let api = OneInchApi::new(Chain::Bsc).unwrap();
        assert_eq!(api.base_url(), "https://api.1inch.exchange/v4.0/56");
        assert_eq!(api.chain_id(), 56);
    }

    #[test]
    fn test_trailing_slash_removed() {
        let config = ClientConfig {
            api_url: "http://localhost:8080/".to_string(),
            timeout: Duration::from_secs(1),
        };
        let api = OneInchApi::with_config(10u64, config).unwrap();
        assert_eq!(api.build_url("/quote"), "http://localhost:8080/v4.0/10/quote");
    }
}
