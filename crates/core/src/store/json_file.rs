use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::errors::CoreError;
use crate::models::transaction::TransactionRecord;
use crate::models::wallet::{flatten_histories, WalletDocument};

use super::format;
use super::traits::{validate_wallet, TransactionStore};

/// Transaction store backed by a JSON export of the wallet collection.
///
/// File layout: `[{"wallet": "0x…", "transactions": [...]}, ...]`.
/// A missing file is an empty store. Writes append to the stored JSON
/// tree and rewrite the file; entries the reader skips are kept on disk.
pub struct JsonFileTransactionStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl JsonFileTransactionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every wallet document from disk.
    pub fn load_documents(&self) -> Result<Vec<WalletDocument>, CoreError> {
        match self.read_contents()? {
            Some(bytes) => format::parse_wallet_documents(&bytes),
            None => Ok(Vec::new()),
        }
    }

    /// File contents, or `None` when the file is missing or blank.
    fn read_contents(&self) -> Result<Option<Vec<u8>>, CoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        if !self.path.is_file() {
            return Err(CoreError::Store(format!(
                "{} is not a regular file",
                self.path.display()
            )));
        }
        let bytes = std::fs::read(&self.path)?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        Ok(Some(bytes))
    }
}

#[async_trait]
impl TransactionStore for JsonFileTransactionStore {
    fn name(&self) -> &str {
        "JsonFile"
    }

    async fn record_transaction(
        &self,
        wallet: &str,
        record: TransactionRecord,
    ) -> Result<(), CoreError> {
        validate_wallet(wallet)?;
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let contents = self.read_contents()?;
        log::info!(
            "Recording {} transaction {} for wallet {wallet} in {}",
            record.transaction_type(),
            record.id,
            self.path.display()
        );
        let bytes = format::append_record(contents.as_deref(), wallet, &record)?;
        std::fs::write(&self.path, bytes)?;
        Ok(())
    }

    async fn get_transactions(&self, wallet: &str) -> Result<Vec<TransactionRecord>, CoreError> {
        Ok(self
            .load_documents()?
            .into_iter()
            .find(|doc| doc.wallet == wallet)
            .map(|doc| doc.transactions)
            .unwrap_or_default())
    }

    async fn fetch_all_transactions(&self) -> Result<Vec<TransactionRecord>, CoreError> {
        let documents = self.load_documents()?;
        Ok(flatten_histories(&documents))
    }
}
