use std::collections::HashMap;

use crate::models::analytics::BalanceMap;
use crate::models::chart::{DailyTokenRow, DailyVolumeRow, HeatmapRow, ScatterPoint, TimePoint, TokenValue};
use crate::models::transaction::{SwapDetails, TransactionRecord};
use crate::services::date_service::DateService;

/// Generates date-keyed and point-wise chart data sets from swap records.
///
/// Chart data includes:
/// - Token usage counts per calendar day (heatmap)
/// - Token amounts per calendar day
/// - One scatter point per swap leg
/// - Total swap amount per swap (time series)
pub struct ChartService {
    date_service: DateService,
}

impl ChartService {
    pub fn new(date_service: DateService) -> Self {
        Self { date_service }
    }

    /// Count token appearances per day.
    ///
    /// One increment per entry of a swap's `tokens`, regardless of amount.
    /// Only `tokens` is required here; swaps without it are skipped.
    /// Rows follow the order in which days are first seen.
    pub fn token_usage_by_day(&self, records: &[TransactionRecord]) -> Vec<HeatmapRow> {
        self.group_by_day(records, |details| {
            details
                .tokens
                .as_ref()
                .map(|tokens| tokens.iter().map(|token| (token.as_str(), 1)).collect())
        })
    }

    /// Sum parsed amounts per token per day over well-formed swaps.
    pub fn tokens_per_day(&self, records: &[TransactionRecord]) -> Vec<DailyVolumeRow> {
        self.group_by_day(records, |details| {
            details.is_well_formed().then(|| details.legs().collect())
        })
    }

    /// One point per token leg of every well-formed swap.
    pub fn scatter_points(&self, records: &[TransactionRecord]) -> Vec<ScatterPoint> {
        records
            .iter()
            .filter_map(|record| record.as_swap().map(|details| (record, details)))
            .flat_map(|(record, details)| {
                let date = self.date_service.date_time(details.timestamp);
                details.legs().map(move |(token, amount)| ScatterPoint {
                    token: token.to_string(),
                    amount,
                    date: date.clone(),
                    tx_id: record.id.clone(),
                })
            })
            .collect()
    }

    /// Total amount moved per swap record, keyed by day.
    ///
    /// Every swap yields a point; swaps without amounts report 0.
    pub fn swap_volume_series(&self, records: &[TransactionRecord]) -> Vec<TimePoint> {
        records
            .iter()
            .filter_map(TransactionRecord::as_swap)
            .map(|details| TimePoint {
                date: self.date_service.day_key(details.timestamp),
                value: details.total_amount(),
            })
            .collect()
    }

    /// Re-express a balance map as `{token, value}` entries.
    pub fn token_values(&self, balances: &BalanceMap) -> Vec<TokenValue> {
        balances
            .iter()
            .map(|(token, value)| TokenValue {
                token: token.clone(),
                value: *value,
            })
            .collect()
    }

    /// Accumulate per-token figures into day rows, preserving first-seen day order.
    fn group_by_day<T, F>(&self, records: &[TransactionRecord], contributions: F) -> Vec<DailyTokenRow<T>>
    where
        T: Copy + Default + std::ops::AddAssign,
        F: Fn(&SwapDetails) -> Option<Vec<(&str, T)>>,
    {
        let mut rows: Vec<DailyTokenRow<T>> = Vec::new();
        let mut row_index: HashMap<String, usize> = HashMap::new();

        for details in records.iter().filter_map(TransactionRecord::as_swap) {
            let Some(entries) = contributions(details) else {
                continue;
            };

            let day = self.date_service.day_key(details.timestamp);
            let idx = *row_index.entry(day.clone()).or_insert_with(|| {
                rows.push(DailyTokenRow::new(day));
                rows.len() - 1
            });

            let row = &mut rows[idx];
            for (token, value) in entries {
                if !row.add(token, value) {
                    log::warn!("Token symbol '{token}' collides with the day column, left out of day rows");
                }
            }
        }

        rows
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new(DateService::default())
    }
}
