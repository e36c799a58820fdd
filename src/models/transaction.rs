use serde::{Deserialize, Serialize};

/// Unsigned transaction as returned by `/approve/transaction` and in the `tx`
/// field of `/swap`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TxPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    pub to: String,
    #[serde(default)]
    pub data: String,
    #[serde(
        default,
        deserialize_with = "deserialize_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub gas_price: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub gas: Option<String>,
}

impl TxPayload {
    /// Drops the API's gas estimate so the submitting provider estimates it.
    pub fn without_gas(mut self) -> Self {
        self.gas = None;
        self
    }
}

// Quantities arrive either as decimal strings or as plain JSON numbers.
fn deserialize_quantity<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Q {
        Str(String),
        Num(u64),
    }
    let q = Option::<Q>::deserialize(deserializer)?;
    Ok(q.map(|q| match q {
        Q::Str(s) => s,
        Q::Num(n) => n.to_string(),
    }))
}
