/// Slippage, in percent, used when the caller does not pick one.
pub const DEFAULT_SLIPPAGE: f64 = 0.5;

/// Optional `/quote` parameters. Unset fields are left out of the request and
/// the API applies its own defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuoteOptions {
    /// Referrer fee in percent, sent as `fee`.
    pub fee: Option<f64>,
    /// Comma-separated liquidity source ids to restrict routing to.
    pub protocols: Option<String>,
    /// Gas price in wei.
    pub gas_price: Option<String>,
    pub complexity_level: Option<String>,
    /// Comma-separated token addresses allowed as intermediate hops.
    pub connector_tokens: Option<String>,
    pub gas_limit: Option<u64>,
    pub parts: Option<u32>,
    pub main_route_parts: Option<u32>,
}

/// Optional `/swap` parameters: everything `/quote` takes plus the swap-only
/// settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SwapOptions {
    pub quote: QuoteOptions,
    /// Recipient of the output tokens when it differs from `fromAddress`.
    pub dest_receiver: Option<String>,
    pub referrer_address: Option<String>,
    pub burn_chi: Option<bool>,
    /// The API treats an unset value as `true`.
    pub allow_partial_fill: Option<bool>,
    pub disable_estimate: Option<bool>,
    /// EIP-2612 permit calldata for the source token.
    pub permit: Option<String>,
}
