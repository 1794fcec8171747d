use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::chart::ChartData;
use super::transaction::TransactionRecord;

/// token symbol → signed total. Ordered by symbol for stable output.
pub type BalanceMap = BTreeMap<String, f64>;

/// The full analytics payload served to the dashboard.
///
/// Recomputed from the complete history on every request; never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsReport {
    /// Net swap totals over the whole history
    pub balances_now: BalanceMap,

    /// Net swap totals over the records preceding the most recent swap
    pub balances_before: BalanceMap,

    /// `balances_now - balances_before`, for every token in `balances_now`
    pub balance_change: BalanceMap,

    pub chart_data: ChartData,

    /// The input history, echoed back in the order it was analyzed
    pub transactions: Vec<TransactionRecord>,
}
