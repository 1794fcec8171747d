use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::transaction::TransactionRecord;

/// Trait abstraction for the per-wallet transaction store.
///
/// Each backend (in-memory, JSON file, HTTP gateway) implements this
/// trait; analytics only ever sees the flattened history it returns.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Human-readable name of this store (for logs/errors).
    fn name(&self) -> &str;

    /// Append `record` to `wallet`'s history, creating the wallet on first write.
    ///
    /// Fails with `CoreError::Validation` when `wallet` is empty.
    async fn record_transaction(
        &self,
        wallet: &str,
        record: TransactionRecord,
    ) -> Result<(), CoreError>;

    /// One wallet's history in append order. Unknown wallets are empty.
    async fn get_transactions(&self, wallet: &str) -> Result<Vec<TransactionRecord>, CoreError>;

    /// Every wallet's history, concatenated in wallet order.
    async fn fetch_all_transactions(&self) -> Result<Vec<TransactionRecord>, CoreError>;
}

/// Reject blank wallet addresses before touching any backend.
pub fn validate_wallet(wallet: &str) -> Result<(), CoreError> {
    if wallet.trim().is_empty() {
        return Err(CoreError::Validation(
            "Wallet address is required for logging transaction".into(),
        ));
    }
    Ok(())
}
