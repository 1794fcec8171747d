use serde::{Deserialize, Serialize};

use super::transaction::TransactionRecord;

/// One wallet's transaction history, as stored in the document store.
///
/// History is kept in append order. Documents written before any
/// transaction was logged may lack the `transactions` field entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletDocument {
    /// Wallet address (unique per document)
    pub wallet: String,

    #[serde(default)]
    pub transactions: Vec<TransactionRecord>,
}

impl WalletDocument {
    pub fn new(wallet: impl Into<String>) -> Self {
        Self {
            wallet: wallet.into(),
            transactions: Vec::new(),
        }
    }
}

/// Concatenate every wallet's history in document order.
///
/// No ordering is imposed across wallets; within a wallet, append
/// order is preserved.
pub fn flatten_histories(documents: &[WalletDocument]) -> Vec<TransactionRecord> {
    documents
        .iter()
        .flat_map(|doc| doc.transactions.iter().cloned())
        .collect()
}
