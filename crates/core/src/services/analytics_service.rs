use crate::models::analytics::{BalanceMap, InsightsReport};
use crate::models::chart::ChartData;
use crate::models::settings::Settings;
use crate::models::transaction::TransactionRecord;
use crate::services::activity_service::ActivityService;
use crate::services::balance_service::BalanceService;
use crate::services::chart_service::ChartService;
use crate::services::date_service::DateService;
use crate::services::series_service::SeriesService;

/// Computes the full dashboard report from a transaction history.
///
/// Every derivation reads the same input slice; nothing is cached
/// between calls and the input is never modified.
pub struct AnalyticsService {
    balance_service: BalanceService,
    series_service: SeriesService,
    chart_service: ChartService,
    activity_service: ActivityService,
    timeline_len: usize,
}

impl AnalyticsService {
    pub fn new(settings: &Settings) -> Self {
        let date_service = DateService::from_settings(settings);
        Self {
            balance_service: BalanceService::new(),
            series_service: SeriesService::new(),
            chart_service: ChartService::new(date_service),
            activity_service: ActivityService::new(date_service),
            timeline_len: settings.timeline_len,
        }
    }

    /// Generate the report for `records`, taken in append order.
    ///
    /// Computes:
    /// - Balances now, before the last swap, and their difference
    /// - Per-token cumulative series and running totals
    /// - Day-keyed usage and volume matrices, scatter and time series
    /// - Timeline digest, type counts and proportions
    ///
    /// The records are moved into the report unchanged.
    pub fn build_report(&self, records: Vec<TransactionRecord>) -> InsightsReport {
        let balances_now = self.balance_service.aggregate_balances(&records);
        let balances_before = self.balance_service.balances_before_last_swap(&records);
        let balance_change = self
            .balance_service
            .balance_change(&balances_now, &balances_before);

        let chart_data = self.build_chart_data(&records, &balances_now, &balance_change);

        log::debug!(
            "Built insights report: {} records, {} tokens, {} active days",
            records.len(),
            balances_now.len(),
            chart_data.heatmap_data.len()
        );

        InsightsReport {
            balances_now,
            balances_before,
            balance_change,
            chart_data,
            transactions: records,
        }
    }

    fn build_chart_data(
        &self,
        records: &[TransactionRecord],
        balances_now: &BalanceMap,
        balance_change: &BalanceMap,
    ) -> ChartData {
        let chart = &self.chart_service;
        let activity = &self.activity_service;

        ChartData {
            pie: chart.token_values(balances_now),
            bar: chart.token_values(balance_change),
            line: self.series_service.running_totals(records),
            time: chart.swap_volume_series(records),
            token_distribution: chart.token_values(balances_now),
            transaction_types: activity.type_counts(records),
            tokens_per_day: chart.tokens_per_day(records),
            per_token_cumulative: self.series_service.per_token_cumulative(records),
            heatmap_data: chart.token_usage_by_day(records),
            scatter: chart.scatter_points(records),
            timeline: activity.timeline(records, self.timeline_len),
            doughnut: activity.type_proportions(records),
        }
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}
