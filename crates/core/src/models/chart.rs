use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::transaction::TransactionType;

/// A `{token, value}` pair (pie, bar and radar charts).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenValue {
    pub token: String,
    pub value: f64,
}

/// Sum of all token balances after the first `index` records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    /// 1-based record position
    pub index: usize,
    pub total: f64,
}

/// Total amount moved by one swap, keyed by its day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    pub date: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub count: usize,
}

/// Share of one transaction type in the whole history (0..=1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeProportion {
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub value: f64,
}

/// One calendar day with a per-token figure, serialized flat:
/// `{"date": "3/14/2025", "USDC": 2, "UNI": 1}`.
///
/// Only tokens that occurred that day are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTokenRow<T> {
    pub date: String,
    #[serde(flatten)]
    pub tokens: BTreeMap<String, T>,
}

impl<T> DailyTokenRow<T> {
    /// Key of the day column in the flattened row.
    pub const DATE_KEY: &'static str = "date";

    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            tokens: BTreeMap::new(),
        }
    }

    /// Add `value` to `token`'s figure for the day.
    ///
    /// A token named like the day column cannot share the flat row and
    /// is left out; returns `false` in that case.
    pub fn add(&mut self, token: &str, value: T) -> bool
    where
        T: Default + std::ops::AddAssign,
    {
        if token == Self::DATE_KEY {
            return false;
        }
        *self.tokens.entry(token.to_string()).or_default() += value;
        true
    }
}

/// Token appearance counts per day (heatmap).
pub type HeatmapRow = DailyTokenRow<u32>;

/// Summed token amounts per day.
pub type DailyVolumeRow = DailyTokenRow<f64>;

/// A single token leg of a swap, plotted as amount over time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterPoint {
    pub token: String,
    pub amount: f64,
    /// Date-time rendering of the swap timestamp
    pub date: String,
    pub tx_id: String,
}

/// Normalized summary of one record for the activity timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub date: String,
    /// Swap tokens; empty for stakes
    pub tokens: Vec<String>,
    /// Sum of swap amounts; 0 for stakes
    pub amount: f64,
    /// The user's staking request; absent for swaps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
}

/// Every chart series the dashboard renders.
///
/// The frontend renders these as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub pie: Vec<TokenValue>,
    pub bar: Vec<TokenValue>,
    pub line: Vec<LinePoint>,
    pub time: Vec<TimePoint>,
    pub token_distribution: Vec<TokenValue>,
    pub transaction_types: Vec<TypeCount>,
    pub tokens_per_day: Vec<DailyVolumeRow>,
    /// token → running total per record index (stacked area)
    pub per_token_cumulative: BTreeMap<String, Vec<f64>>,
    pub heatmap_data: Vec<HeatmapRow>,
    pub scatter: Vec<ScatterPoint>,
    pub timeline: Vec<TimelineEntry>,
    pub doughnut: Vec<TypeProportion>,
}
