use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::transaction::TransactionRecord;
use crate::models::wallet::flatten_histories;

use super::format;
use super::traits::{validate_wallet, TransactionStore};

/// Transaction store reached through a REST gateway over the document store.
///
/// - **Endpoints**: `GET /wallets`, `GET /wallets/{wallet}/transactions`,
///   `POST /wallets/{wallet}/transactions`
/// - **Payloads**: the same JSON shapes the file store keeps on disk.
/// - **Unknown wallets**: a 404 on the per-wallet listing is an empty history.
pub struct HttpTransactionStore {
    client: Client,
    base_url: Url,
}

impl HttpTransactionStore {
    /// Create a store for the gateway rooted at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self::with_client(base_url, client)
    }

    /// Same as [`HttpTransactionStore::new`] with a preconfigured client.
    pub fn with_client(base_url: &str, client: Client) -> Result<Self, CoreError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| CoreError::Config(format!("Invalid store URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(CoreError::Config(format!(
                "Store URL cannot be used as a base: {base_url}"
            )));
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/wallets`
    pub fn wallets_url(&self) -> Url {
        self.endpoint(&["wallets"])
    }

    /// `{base}/wallets/{wallet}/transactions`, with `wallet` percent-encoded.
    pub fn wallet_transactions_url(&self, wallet: &str) -> Url {
        self.endpoint(&["wallets", wallet, "transactions"])
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`: the base URL always has path segments.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn checked(response: Response, url: &Url) -> Result<Response, CoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(CoreError::Api {
            endpoint: url.path().to_string(),
            message: format!("HTTP {status}: {}", body.trim()),
        })
    }
}

#[async_trait]
impl TransactionStore for HttpTransactionStore {
    fn name(&self) -> &str {
        "Http"
    }

    async fn record_transaction(
        &self,
        wallet: &str,
        record: TransactionRecord,
    ) -> Result<(), CoreError> {
        validate_wallet(wallet)?;
        let url = self.wallet_transactions_url(wallet);
        let response = self.client.post(url.clone()).json(&record).send().await?;
        Self::checked(response, &url).await?;
        log::info!("Recorded transaction {} for wallet {wallet}", record.id);
        Ok(())
    }

    async fn get_transactions(&self, wallet: &str) -> Result<Vec<TransactionRecord>, CoreError> {
        let url = self.wallet_transactions_url(wallet);
        let response = self.client.get(url.clone()).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            log::debug!("Wallet {wallet} not found at {url}");
            return Ok(Vec::new());
        }
        let bytes = Self::checked(response, &url).await?.bytes().await?;
        format::parse_transactions(&bytes, wallet)
    }

    async fn fetch_all_transactions(&self) -> Result<Vec<TransactionRecord>, CoreError> {
        let url = self.wallets_url();
        let response = self.client.get(url.clone()).send().await?;
        let bytes = Self::checked(response, &url).await?.bytes().await?;
        let documents = format::parse_wallet_documents(&bytes)?;
        log::debug!("Fetched {} wallet documents from {}", documents.len(), url);
        Ok(flatten_histories(&documents))
    }
}
