use crate::error::{Error, Result};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Token {
    pub address: String,
    pub symbol: String,
    pub decimals: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "logoURI", default, skip_serializing_if = "Option::is_none")]
    pub logo_uri: Option<String>,
    /// Fields this crate does not model (tags, eip2612, ...), kept for output.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Token {
    pub fn new(address: &str, symbol: &str, decimals: u8) -> Self {
        Self {
            address: address.to_string(),
            symbol: symbol.to_string(),
            decimals,
            name: None,
            logo_uri: None,
            extra: serde_json::Map::new(),
        }
    }
}

/// Response of `/tokens`: every token the API knows for the chain, in API order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TokenList {
    #[serde(
        deserialize_with = "deserialize_tokens",
        serialize_with = "serialize_tokens"
    )]
    pub tokens: Vec<Token>,
}

impl TokenList {
    /// Exact, case-sensitive symbol lookup. More than one match is an error
    /// rather than an arbitrary pick.
    pub fn find_by_symbol(&self, symbol: &str) -> Result<&Token> {
        let mut matches = self.tokens.iter().filter(|t| t.symbol == symbol);
        let first = matches
            .next()
            .ok_or_else(|| Error::TokenNotFound(symbol.to_string()))?;
        let others = matches.count();
        if others > 0 {
            return Err(Error::AmbiguousToken {
                symbol: symbol.to_string(),
                count: others + 1,
            });
        }
        Ok(first)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

// The API keys tokens by address; the address is repeated inside each entry.
fn deserialize_tokens<'de, D>(deserializer: D) -> std::result::Result<Vec<Token>, D::Error>
where
    D: Deserializer<'de>,
{
    struct TokenMapVisitor;

    impl<'de> Visitor<'de> for TokenMapVisitor {
        type Value = Vec<Token>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of address to token")
        }

        fn visit_map<A>(self, mut map: A) -> std::result::Result<Vec<Token>, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut tokens = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((_address, token)) = map.next_entry::<String, Token>()? {
                tokens.push(token);
            }
            Ok(tokens)
        }
    }

    deserializer.deserialize_map(TokenMapVisitor)
}

fn serialize_tokens<S>(tokens: &[Token], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(tokens.len()))?;
    for token in tokens {
        map.serialize_entry(&token.address, token)?;
    }
    map.end()
}
