pub mod errors;
pub mod models;
pub mod services;
pub mod store;

use models::{
    analytics::InsightsReport,
    settings::{Settings, StoreSettings},
    transaction::TransactionRecord,
};
use services::analytics_service::AnalyticsService;
use store::{
    http::HttpTransactionStore, json_file::JsonFileTransactionStore,
    memory::InMemoryTransactionStore, traits::TransactionStore,
};

use errors::CoreError;

/// Main entry point for the DeFi insights core library.
///
/// Owns the transaction store and the analytics pipeline. The store is
/// injected at construction; nothing is initialised lazily or shared
/// behind a global.
#[must_use]
pub struct TransactionInsights {
    store: Box<dyn TransactionStore>,
    analytics_service: AnalyticsService,
    settings: Settings,
}

impl std::fmt::Debug for TransactionInsights {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionInsights")
            .field("store", &self.store.name())
            .field("settings", &self.settings)
            .finish()
    }
}

impl TransactionInsights {
    /// Build around an explicitly constructed store.
    pub fn new(store: Box<dyn TransactionStore>, settings: Settings) -> Self {
        let analytics_service = AnalyticsService::new(&settings);
        Self {
            store,
            analytics_service,
            settings,
        }
    }

    /// Build with the store backend selected in `settings`.
    pub fn from_settings(settings: Settings) -> Result<Self, CoreError> {
        let store: Box<dyn TransactionStore> = match &settings.store {
            StoreSettings::Memory => Box::new(InMemoryTransactionStore::new()),
            StoreSettings::File(path) => Box::new(JsonFileTransactionStore::new(path.clone())),
            StoreSettings::Http(url) => Box::new(HttpTransactionStore::new(url)?),
        };
        log::info!("Using {} transaction store", store.name());
        Ok(Self::new(store, settings))
    }

    /// An empty in-memory instance with default settings.
    pub fn in_memory() -> Self {
        Self::new(Box::new(InMemoryTransactionStore::new()), Settings::default())
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn store_name(&self) -> &str {
        self.store.name()
    }

    // ── History ─────────────────────────────────────────────────────

    /// Append a record to a wallet's history.
    pub async fn record_transaction(
        &self,
        wallet: &str,
        record: TransactionRecord,
    ) -> Result<(), CoreError> {
        self.store.record_transaction(wallet, record).await
    }

    /// One wallet's history, in append order.
    pub async fn transactions(&self, wallet: &str) -> Result<Vec<TransactionRecord>, CoreError> {
        self.store.get_transactions(wallet).await
    }

    /// Every wallet's history, concatenated.
    pub async fn all_transactions(&self) -> Result<Vec<TransactionRecord>, CoreError> {
        self.store.fetch_all_transactions().await
    }

    // ── Analytics ───────────────────────────────────────────────────

    /// Fetch the full history once and compute the dashboard report.
    ///
    /// A store failure is returned as-is; no partial report is built.
    pub async fn report(&self) -> Result<InsightsReport, CoreError> {
        let records = self.store.fetch_all_transactions().await?;
        Ok(self.analytics_service.build_report(records))
    }

    /// Same as [`TransactionInsights::report`], restricted to one wallet.
    pub async fn report_for_wallet(&self, wallet: &str) -> Result<InsightsReport, CoreError> {
        let records = self.store.get_transactions(wallet).await?;
        Ok(self.analytics_service.build_report(records))
    }

    /// Compute a report over records supplied by the caller.
    #[must_use]
    pub fn report_from(&self, records: Vec<TransactionRecord>) -> InsightsReport {
        self.analytics_service.build_report(records)
    }
}
