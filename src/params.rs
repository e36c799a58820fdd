//! Query parameter building.
//!
//! Every parameterized endpoint builds its query string through [`Params`]:
//! required fields must carry a value or the request is rejected before it is
//! sent, optional fields are appended only when set.

use crate::error::{Error, Result};
use crate::models::{QuoteOptions, SwapOptions};

/// A value that can be rendered into a query parameter.
///
/// `None` means "not set" and so does a non-finite float. Strings are passed
/// through as given.
pub trait ParamValue {
    fn to_param(&self) -> Option<String>;
}

impl ParamValue for str {
    fn to_param(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl ParamValue for String {
    fn to_param(&self) -> Option<String> {
        self.as_str().to_param()
    }
}

impl ParamValue for f64 {
    fn to_param(&self) -> Option<String> {
        self.is_finite().then(|| self.to_string())
    }
}

impl ParamValue for u64 {
    fn to_param(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl ParamValue for u32 {
    fn to_param(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl ParamValue for bool {
    fn to_param(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl<T: ParamValue + ?Sized> ParamValue for &T {
    fn to_param(&self) -> Option<String> {
        (**self).to_param()
    }
}

impl<T: ParamValue> ParamValue for Option<T> {
    fn to_param(&self) -> Option<String> {
        self.as_ref().and_then(ParamValue::to_param)
    }
}

/// Ordered query parameters for a single request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    pairs: Vec<(&'static str, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// A blank string counts as missing here, but is still sent verbatim.
    pub fn required<V: ParamValue>(mut self, name: &'static str, value: V) -> Result<Self> {
        let value = value
            .to_param()
            .filter(|v| !v.trim().is_empty())
            .ok_or(Error::MissingParam(name))?;
        self.pairs.push((name, value));
        Ok(self)
    }

    pub fn optional<V: ParamValue>(mut self, name: &'static str, value: V) -> Self {
        if let Some(value) = value.to_param() {
            self.pairs.push((name, value));
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.pairs.iter().map(|(k, _)| *k)
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// `/approve/transaction`. Leaving `amount` unset asks the API for an
    /// unlimited approval.
    pub fn approve_transaction(token_address: &str, amount: Option<&str>) -> Result<Self> {
        Ok(Self::new()
            .required("tokenAddress", token_address)?
            .optional("amount", amount))
    }

    pub fn approve_allowance(token_address: &str, wallet_address: &str) -> Result<Self> {
        Self::new()
            .required("tokenAddress", token_address)?
            .required("walletAddress", wallet_address)
    }

    pub fn quote(
        from_token_address: &str,
        to_token_address: &str,
        amount: &str,
        options: &QuoteOptions,
    ) -> Result<Self> {
        let params = Self::new()
            .required("fromTokenAddress", from_token_address)?
            .required("toTokenAddress", to_token_address)?
            .required("amount", amount)?;
        Ok(params.with_quote_options(options))
    }

    pub fn swap(
        from_token_address: &str,
        to_token_address: &str,
        amount: &str,
        from_address: &str,
        slippage: f64,
        options: &SwapOptions,
    ) -> Result<Self> {
        let params = Self::new()
            .required("fromTokenAddress", from_token_address)?
            .required("toTokenAddress", to_token_address)?
            .required("amount", amount)?
            .required("fromAddress", from_address)?
            .required("slippage", slippage)?;
        Ok(params
            .with_quote_options(&options.quote)
            .optional("destReceiver", &options.dest_receiver)
            .optional("referrerAddress", &options.referrer_address)
            .optional("burnChi", options.burn_chi)
            .optional("allowPartialFill", options.allow_partial_fill)
            .optional("disableEstimate", options.disable_estimate)
            .optional("permit", &options.permit))
    }

    fn with_quote_options(self, options: &QuoteOptions) -> Self {
        self.optional("fee", options.fee)
            .optional("protocols", &options.protocols)
            .optional("gasPrice", &options.gas_price)
            .optional("complexityLevel", &options.complexity_level)
            .optional("connectorTokens", &options.connector_tokens)
            .optional("gasLimit", options.gas_limit)
            .optional("parts", options.parts)
            .optional("mainRouteParts", options.main_route_parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_without_options_has_only_required_keys() {
        let params = Params::swap("0xA", "0xB", "100", "0xC", 0.5, &SwapOptions::default()).unwrap();
        assert_eq!(
            params.keys().collect::<Vec<_>>(),
            vec!["fromTokenAddress", "toTokenAddress", "amount", "fromAddress", "slippage"]
        );
        assert_eq!(params.get("slippage"), Some("0.5"));
        assert_eq!(params.get("amount"), Some("100"));
    }

    #[test]
    fn test_swap_missing_each_required_field() {
        let opts = SwapOptions::default();
        let err = Params::swap("", "0xB", "100", "0xC", 0.5, &opts).unwrap_err();
        assert!(matches!(err, Error::MissingParam("fromTokenAddress")));
        let err = Params::swap("0xA", "", "100", "0xC", 0.5, &opts).unwrap_err();
        assert!(matches!(err, Error::MissingParam("toTokenAddress")));
        let err = Params::swap("0xA", "0xB", " ", "0xC", 0.5, &opts).unwrap_err();
        assert!(matches!(err, Error::MissingParam("amount")));
        let err = Params::swap("0xA", "0xB", "100", "", 0.5, &opts).unwrap_err();
        assert!(matches!(err, Error::MissingParam("fromAddress")));
        let err = Params::swap("0xA", "0xB", "100", "0xC", f64::NAN, &opts).unwrap_err();
        assert!(matches!(err, Error::MissingParam("slippage")));
    }

    #[test]
    fn test_quote_missing_required_field() {
        let opts = QuoteOptions::default();
        assert!(matches!(
            Params::quote("", "0xB", "1", &opts),
            Err(Error::MissingParam("fromTokenAddress"))
        ));
        assert!(matches!(
            Params::quote("0xA", "", "1", &opts),
            Err(Error::MissingParam("toTokenAddress"))
        ));
        assert!(matches!(
            Params::quote("0xA", "0xB", "", &opts),
            Err(Error::MissingParam("amount"))
        ));
    }

    #[test]
    fn test_quote_options_only_set_fields() {
        let opts = QuoteOptions {
            fee: Some(1.5),
            gas_limit: Some(750_000),
            protocols: Some("UNISWAP_V3,CURVE".to_string()),
            ..Default::default()
        };
        let params = Params::quote("0xA", "0xB", "1000", &opts).unwrap();
        assert_eq!(params.len(), 6);
        assert_eq!(params.get("fee"), Some("1.5"));
        assert_eq!(params.get("gasLimit"), Some("750000"));
        assert_eq!(params.get("protocols"), Some("UNISWAP_V3,CURVE"));
        assert_eq!(params.get("gasPrice"), None);
        assert_eq!(params.get("parts"), None);
    }

    #[test]
    fn test_swap_flags_and_extras() {
        let opts = SwapOptions {
            quote: QuoteOptions {
                main_route_parts: Some(10),
                ..Default::default()
            },
            burn_chi: Some(true),
            allow_partial_fill: Some(false),
            dest_receiver: Some("0xD".to_string()),
            ..Default::default()
        };
        let params = Params::swap("0xA", "0xB", "100", "0xC", 1.0, &opts).unwrap();
        assert_eq!(params.get("mainRouteParts"), Some("10"));
        assert_eq!(params.get("burnChi"), Some("true"));
        assert_eq!(params.get("allowPartialFill"), Some("false"));
        assert_eq!(params.get("destReceiver"), Some("0xD"));
        assert_eq!(params.get("slippage"), Some("1"));
        assert_eq!(params.get("permit"), None);
        assert_eq!(params.get("disableEstimate"), None);
    }

    #[test]
    fn test_set_options_are_sent_verbatim() {
        let opts = SwapOptions {
            quote: QuoteOptions {
                protocols: Some(" UNISWAP_V3 ".to_string()),
                complexity_level: Some(String::new()),
                ..Default::default()
            },
            permit: Some(String::new()),
            ..Default::default()
        };
        let params = Params::swap("0xA", "0xB", "100", "0xC", 1.0, &opts).unwrap();
        assert_eq!(params.get("protocols"), Some(" UNISWAP_V3 "));
        assert_eq!(params.get("complexityLevel"), Some(""));
        assert_eq!(params.get("permit"), Some(""));
        assert_eq!(params.len(), 8);

        let params = Params::approve_transaction(" 0xA ", Some("")).unwrap();
        assert_eq!(params.get("tokenAddress"), Some(" 0xA "));
        assert_eq!(params.get("amount"), Some(""));
    }

    #[test]
    fn test_approve_transaction_amount_is_optional() {
        let params = Params::approve_transaction("0xA", None).unwrap();
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["tokenAddress"]);

        let params = Params::approve_transaction("0xA", Some("100")).unwrap();
        assert_eq!(params.get("amount"), Some("100"));

        assert!(matches!(
            Params::approve_transaction("", Some("100")),
            Err(Error::MissingParam("tokenAddress"))
        ));
    }

    #[test]
    fn test_approve_allowance_requires_both() {
        assert!(Params::approve_allowance("0xA", "0xW").is_ok());
        assert!(matches!(
            Params::approve_allowance("0xA", ""),
            Err(Error::MissingParam("walletAddress"))
        ));
        assert!(matches!(
            Params::approve_allowance("", "0xW"),
            Err(Error::MissingParam("tokenAddress"))
        ));
    }
}
