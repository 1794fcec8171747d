use async_trait::async_trait;
use std::sync::RwLock;

use crate::errors::CoreError;
use crate::models::transaction::TransactionRecord;
use crate::models::wallet::{flatten_histories, WalletDocument};

use super::traits::{validate_wallet, TransactionStore};

/// Process-local transaction store.
///
/// Wallet documents are kept in creation order, each holding its
/// history in append order.
#[derive(Debug, Default)]
pub struct InMemoryTransactionStore {
    documents: RwLock<Vec<WalletDocument>>,
}

impl InMemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing wallet documents.
    pub fn with_documents(documents: Vec<WalletDocument>) -> Self {
        Self {
            documents: RwLock::new(documents),
        }
    }

    /// Snapshot of all wallet documents.
    pub fn documents(&self) -> Vec<WalletDocument> {
        self.documents
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

/// Append `record` to `wallet`'s document, inserting the document if needed.
fn upsert_record(
    documents: &mut Vec<WalletDocument>,
    wallet: &str,
    record: TransactionRecord,
) {
    match documents.iter_mut().find(|doc| doc.wallet == wallet) {
        Some(doc) => doc.transactions.push(record),
        None => {
            let mut doc = WalletDocument::new(wallet);
            doc.transactions.push(record);
            documents.push(doc);
        }
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    fn name(&self) -> &str {
        "InMemory"
    }

    async fn record_transaction(
        &self,
        wallet: &str,
        record: TransactionRecord,
    ) -> Result<(), CoreError> {
        validate_wallet(wallet)?;
        let mut documents = self.documents.write().unwrap_or_else(|e| e.into_inner());
        upsert_record(&mut documents, wallet, record);
        Ok(())
    }

    async fn get_transactions(&self, wallet: &str) -> Result<Vec<TransactionRecord>, CoreError> {
        let documents = self.documents.read().unwrap_or_else(|e| e.into_inner());
        Ok(documents
            .iter()
            .find(|doc| doc.wallet == wallet)
            .map(|doc| doc.transactions.clone())
            .unwrap_or_default())
    }

    async fn fetch_all_transactions(&self) -> Result<Vec<TransactionRecord>, CoreError> {
        let documents = self.documents.read().unwrap_or_else(|e| e.into_inner());
        Ok(flatten_histories(&documents))
    }
}
