// ═══════════════════════════════════════════════════════════════════
// Integration Tests — TransactionInsights facade over real and mock
// stores, end-to-end report properties
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;
use std::collections::BTreeMap;

use defi_insights_core::errors::CoreError;
use defi_insights_core::models::settings::{Settings, StoreSettings};
use defi_insights_core::models::transaction::{
    SwapDetails, TokenBalances, TransactionKind, TransactionRecord, TransactionType,
};
use defi_insights_core::store::memory::InMemoryTransactionStore;
use defi_insights_core::store::traits::TransactionStore;
use defi_insights_core::TransactionInsights;

// 2025-03-14 14:05:09 UTC
const T1: i64 = 1_741_961_109_000;
// 2025-03-15 09:00:00 UTC
const T3: i64 = 1_742_029_200_000;

// ═══════════════════════════════════════════════════════════════════
// Mock Store
// ═══════════════════════════════════════════════════════════════════

/// A store that is always unreachable.
struct FailingStore;

#[async_trait]
impl TransactionStore for FailingStore {
    fn name(&self) -> &str {
        "FailingMock"
    }

    async fn record_transaction(
        &self,
        _wallet: &str,
        _record: TransactionRecord,
    ) -> Result<(), CoreError> {
        Err(CoreError::Store("Simulated outage".into()))
    }

    async fn get_transactions(&self, _wallet: &str) -> Result<Vec<TransactionRecord>, CoreError> {
        Err(CoreError::Store("Simulated outage".into()))
    }

    async fn fetch_all_transactions(&self) -> Result<Vec<TransactionRecord>, CoreError> {
        Err(CoreError::Store("Simulated outage".into()))
    }
}

async fn seeded() -> TransactionInsights {
    let insights = TransactionInsights::in_memory();
    insights
        .record_transaction("0xa", TransactionRecord::swap("USDC", "UNI", "10", "5", T1).with_id("tx-1"))
        .await
        .unwrap();
    insights
        .record_transaction("0xa", TransactionRecord::stake("stake 2", "ok", T1).with_id("tx-2"))
        .await
        .unwrap();
    insights
        .record_transaction("0xa", TransactionRecord::swap("USDC", "UNI", "3", "1", T3).with_id("tx-3"))
        .await
        .unwrap();
    insights
}

fn balances(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
    pairs.iter().map(|(t, v)| (t.to_string(), *v)).collect()
}

// ═══════════════════════════════════════════════════════════════════
// Facade construction
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_in_memory_facade() {
    let insights = TransactionInsights::in_memory();
    assert_eq!(insights.store_name(), "InMemory");
    assert_eq!(insights.settings(), &Settings::default());
    let debug = format!("{insights:?}");
    assert!(debug.contains("TransactionInsights"));
    assert!(debug.contains("InMemory"));
}

#[test]
fn test_from_settings_selects_backend() {
    let dir = tempfile::tempdir().unwrap();
    let file = TransactionInsights::from_settings(Settings {
        store: StoreSettings::File(dir.path().join("walletdata.json")),
        ..Settings::default()
    })
    .unwrap();
    assert_eq!(file.store_name(), "JsonFile");

    let http = TransactionInsights::from_settings(Settings {
        store: StoreSettings::Http("http://localhost:8080/api".into()),
        ..Settings::default()
    })
    .unwrap();
    assert_eq!(http.store_name(), "Http");

    let memory = TransactionInsights::from_settings(Settings::default()).unwrap();
    assert_eq!(memory.store_name(), "InMemory");
}

#[test]
fn test_from_settings_rejects_bad_url() {
    let result = TransactionInsights::from_settings(Settings {
        store: StoreSettings::Http("::".into()),
        ..Settings::default()
    });
    assert!(matches!(result, Err(CoreError::Config(_))));
}

// ═══════════════════════════════════════════════════════════════════
// Reports
// ═══════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_empty_report() {
    let report = TransactionInsights::in_memory().report().await.unwrap();
    assert!(report.balances_now.is_empty());
    assert!(report.chart_data.timeline.is_empty());
    assert!(report.chart_data.doughnut.iter().all(|d| d.value == 0.0));
}

#[tokio::test]
async fn test_scenario_report() {
    let insights = seeded().await;
    let report = insights.report().await.unwrap();

    assert_eq!(report.balances_now, balances(&[("USDC", 13.0), ("UNI", 6.0)]));
    assert_eq!(report.balances_before, balances(&[("USDC", 10.0), ("UNI", 5.0)]));
    assert_eq!(report.balance_change, balances(&[("USDC", 3.0), ("UNI", 1.0)]));
    assert_eq!(report.chart_data.per_token_cumulative["USDC"], vec![10.0, 10.0, 13.0]);
    assert_eq!(report.chart_data.doughnut[0].transaction_type, TransactionType::Swap);
    assert_eq!(report.chart_data.doughnut[0].value, 2.0 / 3.0);
    assert_eq!(report.chart_data.heatmap_data.len(), 2);
    assert_eq!(report.chart_data.scatter.len(), 4);
    assert_eq!(report.transactions.len(), 3);
}

#[tokio::test]
async fn test_report_spans_wallets() {
    let insights = seeded().await;
    insights
        .record_transaction("0xb", TransactionRecord::swap("DAI", "USDC", "-5", "5", T3).with_id("tx-b"))
        .await
        .unwrap();

    let report = insights.report().await.unwrap();
    assert_eq!(report.balances_now["USDC"], 18.0);
    assert_eq!(report.balances_now["DAI"], -5.0);
    // The other wallet's swap is now the last swap in the merged history
    assert_eq!(report.balances_before["USDC"], 13.0);
    assert_eq!(report.balance_change["DAI"], -5.0);
    for series in report.chart_data.per_token_cumulative.values() {
        assert_eq!(series.len(), 4);
    }
}

#[tokio::test]
async fn test_report_for_wallet() {
    let insights = seeded().await;
    insights
        .record_transaction("0xb", TransactionRecord::stake("stake 5", "ok", T3))
        .await
        .unwrap();

    let report = insights.report_for_wallet("0xb").await.unwrap();
    assert!(report.balances_now.is_empty());
    assert_eq!(report.transactions.len(), 1);
    assert_eq!(report.chart_data.doughnut[1].value, 1.0);

    let unknown = insights.report_for_wallet("0xc").await.unwrap();
    assert!(unknown.transactions.is_empty());
}

#[tokio::test]
async fn test_report_from_supplied_records() {
    let insights = TransactionInsights::in_memory();
    let swap = TransactionRecord::new(TransactionKind::Swap(
        SwapDetails::exchange("USDC", "WETH", "-100", "0.05", T1)
            .with_balances(TokenBalances::default())
            .with_tx_hash("0xfeed")
            .with_status("success"),
    ));
    let report = insights.report_from(vec![swap, TransactionRecord::swap_receipt("0x1", "success", T3)]);
    assert_eq!(report.balances_now["WETH"], 0.05);
    // The receipt is the last swap, so the window before it holds the full swap
    assert_eq!(report.balances_before["USDC"], -100.0);
    assert_eq!(report.balance_change["USDC"], 0.0);
    assert_eq!(report.chart_data.time.len(), 2);
}

#[tokio::test]
async fn test_display_offset_flows_into_report() {
    let settings = Settings {
        utc_offset_minutes: 600,
        ..Settings::default()
    };
    let insights = TransactionInsights::new(Box::new(InMemoryTransactionStore::new()), settings);
    let report = insights.report_from(vec![TransactionRecord::swap("USDC", "UNI", "1", "1", T1)]);
    // 14:05 UTC is 00:05 the next day at UTC+10
    assert_eq!(report.chart_data.heatmap_data[0].date, "3/15/2025");
    assert_eq!(report.chart_data.scatter[0].date, "3/15/2025, 12:05:09 AM");
}

#[tokio::test]
async fn test_report_serializes_for_dashboard() {
    let insights = seeded().await;
    let report = insights.report().await.unwrap();
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["balancesNow"]["USDC"], 13.0);
    assert_eq!(value["chartData"]["perTokenCumulative"]["UNI"], serde_json::json!([5.0, 5.0, 6.0]));
    assert_eq!(value["chartData"]["heatmapData"][0]["date"], "3/14/2025");
    assert_eq!(value["chartData"]["heatmapData"][0]["USDC"], 1);
    assert_eq!(value["chartData"]["timeline"][0]["type"], "swap");
    assert_eq!(value["chartData"]["timeline"][1]["desc"], "stake 2");
    assert_eq!(value["chartData"]["scatter"][0]["txId"], "tx-1");
    assert_eq!(value["transactions"][1]["type"], "stake");
}

// ═══════════════════════════════════════════════════════════════════
// Store failures
// ═══════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_store_failure_surfaces_without_partial_report() {
    let insights = TransactionInsights::new(Box::new(FailingStore), Settings::default());
    assert!(matches!(insights.report().await, Err(CoreError::Store(_))));
    assert!(matches!(insights.report_for_wallet("0xa").await, Err(CoreError::Store(_))));
    assert!(matches!(insights.all_transactions().await, Err(CoreError::Store(_))));
}

#[tokio::test]
async fn test_record_and_list_through_facade() {
    let insights = TransactionInsights::in_memory();
    let err = insights
        .record_transaction("", TransactionRecord::stake("x", "y", T1))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));

    insights
        .record_transaction("0xa", TransactionRecord::stake("x", "y", T1).with_id("s1"))
        .await
        .unwrap();
    let history = insights.transactions("0xa").await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, "s1");
    assert_eq!(insights.all_transactions().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_file_backed_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings {
        store: StoreSettings::File(dir.path().join("walletdata.json")),
        ..Settings::default()
    };

    let writer = TransactionInsights::from_settings(settings.clone()).unwrap();
    writer
        .record_transaction("0xa", TransactionRecord::swap("USDC", "UNI", "10", "5", T1))
        .await
        .unwrap();
    writer
        .record_transaction("0xa", TransactionRecord::swap("USDC", "UNI", "3", "1", T3))
        .await
        .unwrap();

    let reader = TransactionInsights::from_settings(settings).unwrap();
    let report = reader.report().await.unwrap();
    assert_eq!(report.balances_now, balances(&[("USDC", 13.0), ("UNI", 6.0)]));
    assert_eq!(report.balance_change, balances(&[("USDC", 3.0), ("UNI", 1.0)]));
}
