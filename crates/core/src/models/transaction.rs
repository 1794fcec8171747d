use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Type of a logged transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Token exchange executed by the agent
    Swap,
    /// Staking conversation logged by the agent (no on-chain amounts)
    Stake,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Swap => write!(f, "swap"),
            TransactionType::Stake => write!(f, "stake"),
        }
    }
}

/// Token balances captured around a swap, as decimal strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenBalances {
    #[serde(default)]
    pub before: BTreeMap<String, String>,
    #[serde(default)]
    pub after: BTreeMap<String, String>,
}

/// Details of a swap record.
///
/// `tokens` and `amounts` are positional: `amounts[i]` is the signed
/// quantity moved for `tokens[i]`. Receipt-only entries carry neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amounts: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balances: Option<TokenBalances>,

    /// Epoch milliseconds
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Full agent response stored alongside the swap (opaque to analytics)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<serde_json::Value>,
}

impl SwapDetails {
    /// A completed two-leg exchange `token_in → token_out`.
    pub fn exchange(
        token_in: impl Into<String>,
        token_out: impl Into<String>,
        amount_in: impl Into<String>,
        amount_out: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            tokens: Some(vec![token_in.into(), token_out.into()]),
            amounts: Some(vec![amount_in.into(), amount_out.into()]),
            balances: None,
            timestamp,
            tx_hash: None,
            status: None,
            response: None,
        }
    }

    pub fn with_balances(mut self, balances: TokenBalances) -> Self {
        self.balances = Some(balances);
        self
    }

    pub fn with_tx_hash(mut self, tx_hash: impl Into<String>) -> Self {
        self.tx_hash = Some(tx_hash.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// True when both `tokens` and `amounts` are present with equal length.
    pub fn is_well_formed(&self) -> bool {
        matches!(
            (&self.tokens, &self.amounts),
            (Some(tokens), Some(amounts)) if tokens.len() == amounts.len()
        )
    }

    /// `(token, parsed amount)` pairs. Empty for malformed swaps.
    pub fn legs(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        let pairs = match (&self.tokens, &self.amounts) {
            (Some(tokens), Some(amounts)) if tokens.len() == amounts.len() => {
                Some(tokens.iter().zip(amounts.iter()))
            }
            _ => None,
        };
        pairs
            .into_iter()
            .flatten()
            .map(|(token, amount)| (token.as_str(), parse_amount(amount)))
    }

    /// Token symbols of this swap, or an empty slice.
    pub fn token_list(&self) -> &[String] {
        self.tokens.as_deref().unwrap_or(&[])
    }

    /// Sum of all parsed amounts (0 when `amounts` is absent).
    pub fn total_amount(&self) -> f64 {
        self.amounts
            .iter()
            .flatten()
            .map(|amount| parse_amount(amount))
            .sum()
    }
}

/// Details of a logged staking conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakeDetails {
    pub user_input: String,
    pub response: String,
    /// Epoch milliseconds
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: i64,
}

/// The `type`-discriminated payload of a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details", rename_all = "lowercase")]
pub enum TransactionKind {
    Swap(SwapDetails),
    Stake(StakeDetails),
}

/// A single entry of a wallet's transaction history.
///
/// Records are append-only: analytics reads them, nothing rewrites them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Unique identifier
    pub id: String,

    #[serde(flatten)]
    pub kind: TransactionKind,
}

impl TransactionRecord {
    pub fn new(kind: TransactionKind) -> Self {
        Self {
            id: format!("tx-{}", Uuid::new_v4()),
            kind,
        }
    }

    /// A completed swap with both legs recorded.
    pub fn swap(
        token_in: impl Into<String>,
        token_out: impl Into<String>,
        amount_in: impl Into<String>,
        amount_out: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self::new(TransactionKind::Swap(SwapDetails::exchange(
            token_in, token_out, amount_in, amount_out, timestamp,
        )))
    }

    /// A receipt-only swap entry: hash and status, no tokens or amounts.
    pub fn swap_receipt(
        tx_hash: impl Into<String>,
        status: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self::new(TransactionKind::Swap(SwapDetails {
            tokens: None,
            amounts: None,
            balances: None,
            timestamp,
            tx_hash: Some(tx_hash.into()),
            status: Some(status.into()),
            response: None,
        }))
    }

    /// A logged staking conversation.
    pub fn stake(
        user_input: impl Into<String>,
        response: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self::new(TransactionKind::Stake(StakeDetails {
            user_input: user_input.into(),
            response: response.into(),
            timestamp,
        }))
    }

    /// Replace the generated id (imports, fixtures).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn transaction_type(&self) -> TransactionType {
        match self.kind {
            TransactionKind::Swap(_) => TransactionType::Swap,
            TransactionKind::Stake(_) => TransactionType::Stake,
        }
    }

    pub fn timestamp(&self) -> i64 {
        match &self.kind {
            TransactionKind::Swap(details) => details.timestamp,
            TransactionKind::Stake(details) => details.timestamp,
        }
    }

    pub fn as_swap(&self) -> Option<&SwapDetails> {
        match &self.kind {
            TransactionKind::Swap(details) => Some(details),
            TransactionKind::Stake(_) => None,
        }
    }

    pub fn is_swap(&self) -> bool {
        matches!(self.kind, TransactionKind::Swap(_))
    }
}

/// Parse a decimal amount string.
///
/// Blank strings are 0, and so is anything that does not parse to a
/// finite number. Never fails.
pub fn parse_amount(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Timestamps written by JavaScript clients may arrive as floats.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTimestamp {
        Int(i64),
        Float(f64),
    }

    Ok(match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::Int(ms) => ms,
        RawTimestamp::Float(ms) => ms as i64,
    })
}
