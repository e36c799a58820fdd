pub mod options;
pub mod token;
pub mod transaction;

pub use options::{QuoteOptions, SwapOptions, DEFAULT_SLIPPAGE};
pub use token::{Token, TokenList};
pub use transaction::TxPayload;
