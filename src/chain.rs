use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Networks served by the aggregation API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Mainnet,
    Bsc,
    Polygon,
    Optimism,
    Arbitrum,
    Gnosis,
    Avalanche,
    Fantom,
}

#[derive(Debug, Error)]
#[error("unknown chain '{0}'")]
pub struct ParseChainError(String);

impl Chain {
    pub const ALL: [Chain; 8] = [
        Chain::Mainnet,
        Chain::Bsc,
        Chain::Polygon,
        Chain::Optimism,
        Chain::Arbitrum,
        Chain::Gnosis,
        Chain::Avalanche,
        Chain::Fantom,
    ];

    pub fn id(&self) -> u64 {
        match self {
            Chain::Mainnet => 1,
            Chain::Bsc => 56,
            Chain::Polygon => 137,
            Chain::Optimism => 10,
            Chain::Arbitrum => 42161,
            Chain::Gnosis => 100,
            Chain::Avalanche => 43114,
            Chain::Fantom => 250,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Chain::Mainnet => "mainnet",
            Chain::Bsc => "bsc",
            Chain::Polygon => "polygon",
            Chain::Optimism => "optimism",
            Chain::Arbitrum => "arbitrum",
            Chain::Gnosis => "gnosis",
            Chain::Avalanche => "avalanche",
            Chain::Fantom => "fantom",
        }
    }

    pub fn from_id(id: u64) -> Option<Chain> {
        Chain::ALL.into_iter().find(|c| c.id() == id)
    }
}

impl From<Chain> for u64 {
    fn from(chain: Chain) -> u64 {
        chain.id()
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Chain {
    type Err = ParseChainError;

    /// Accepts a network name in any case, or one of the listed numeric ids.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(id) = s.parse::<u64>() {
            return Chain::from_id(id).ok_or_else(|| ParseChainError(s.to_string()));
        }
        match s.to_ascii_lowercase().as_str() {
            "mainnet" | "ethereum" => Ok(Chain::Mainnet),
            "bsc" => Ok(Chain::Bsc),
            "polygon" => Ok(Chain::Polygon),
            "optimism" => Ok(Chain::Optimism),
            "arbitrum" => Ok(Chain::Arbitrum),
            "gnosis" => Ok(Chain::Gnosis),
            "avalanche" | "avalanch" => Ok(Chain::Avalanche),
            "fantom" => Ok(Chain::Fantom),
            _ => Err(ParseChainError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names_case_insensitive() {
        assert_eq!("MAINNET".parse::<Chain>().unwrap(), Chain::Mainnet);
        assert_eq!("bsc".parse::<Chain>().unwrap(), Chain::Bsc);
        assert_eq!("Avalanch".parse::<Chain>().unwrap(), Chain::Avalanche);
        assert!("solana".parse::<Chain>().is_err());
    }

    #[test]
    fn test_parse_numeric_ids() {
        assert_eq!("137".parse::<Chain>().unwrap(), Chain::Polygon);
        assert_eq!("42161".parse::<Chain>().unwrap(), Chain::Arbitrum);
        assert!("5".parse::<Chain>().is_err());
    }

    #[test]
    fn test_ids_round_trip() {
        for chain in Chain::ALL {
            assert_eq!(Chain::from_id(chain.id()), Some(chain));
            assert_eq!(chain.to_string().parse::<Chain>().unwrap(), chain);
        }
    }
}
