use std::collections::BTreeMap;

use crate::models::analytics::BalanceMap;
use crate::models::chart::LinePoint;
use crate::models::transaction::TransactionRecord;

/// Builds per-record running series over a transaction history.
pub struct SeriesService;

impl SeriesService {
    pub fn new() -> Self {
        Self
    }

    /// Running total of every token, one entry per record index.
    ///
    /// Entry `i` uses only records `0..=i`. Indices before a token's
    /// first swap hold 0, so every series has exactly `records.len()`
    /// entries and stacks without gaps.
    ///
    /// Single pass: O(records × tokens).
    pub fn per_token_cumulative(&self, records: &[TransactionRecord]) -> BTreeMap<String, Vec<f64>> {
        let mut running = BalanceMap::new();
        let mut cumulative: BTreeMap<String, Vec<f64>> = BTreeMap::new();

        for (idx, record) in records.iter().enumerate() {
            if let Some(details) = record.as_swap() {
                for (token, amount) in details.legs() {
                    *running.entry(token.to_string()).or_insert(0.0) += amount;
                }
            }

            for (token, total) in &running {
                let series = cumulative.entry(token.clone()).or_default();
                // Newly seen token: pad the positions before it
                let fill = series.last().copied().unwrap_or(0.0);
                series.resize(idx, fill);
                series.push(*total);
            }
        }

        cumulative
    }

    /// Sum of all token balances after each record (1-based index).
    pub fn running_totals(&self, records: &[TransactionRecord]) -> Vec<LinePoint> {
        let mut running = BalanceMap::new();
        records
            .iter()
            .enumerate()
            .map(|(idx, record)| {
                if let Some(details) = record.as_swap() {
                    for (token, amount) in details.legs() {
                        *running.entry(token.to_string()).or_insert(0.0) += amount;
                    }
                }
                LinePoint {
                    index: idx + 1,
                    total: running.values().sum(),
                }
            })
            .collect()
    }
}

impl Default for SeriesService {
    fn default() -> Self {
        Self::new()
    }
}
