use serde_json::Value;

use crate::errors::CoreError;
use crate::models::transaction::TransactionRecord;
use crate::models::wallet::WalletDocument;

/// Parse a JSON array of wallet documents.
///
/// The top level must be an array. Individual documents without a
/// `wallet` string, and individual records that do not match either
/// record shape, are skipped with a warning so one bad entry cannot
/// take the whole dashboard down.
pub fn parse_wallet_documents(data: &[u8]) -> Result<Vec<WalletDocument>, CoreError> {
    let root: Value = serde_json::from_slice(data)?;
    let Value::Array(raw_docs) = root else {
        return Err(CoreError::Deserialization(
            "Expected a JSON array of wallet documents".into(),
        ));
    };

    let mut documents = Vec::with_capacity(raw_docs.len());
    for (idx, mut raw) in raw_docs.into_iter().enumerate() {
        let Some(wallet) = raw.get("wallet").and_then(Value::as_str).map(str::to_string) else {
            log::warn!("Skipping wallet document #{idx}: missing 'wallet' field");
            continue;
        };

        let transactions = match raw.get_mut("transactions").map(Value::take) {
            Some(Value::Array(items)) => parse_records(items, &wallet),
            Some(Value::Null) | None => Vec::new(),
            Some(_) => {
                log::warn!("Wallet {wallet}: 'transactions' is not an array, treating as empty");
                Vec::new()
            }
        };

        documents.push(WalletDocument {
            wallet,
            transactions,
        });
    }

    Ok(documents)
}

/// Parse a JSON array of transaction records, skipping malformed entries.
pub fn parse_transactions(data: &[u8], wallet: &str) -> Result<Vec<TransactionRecord>, CoreError> {
    let root: Value = serde_json::from_slice(data)?;
    match root {
        Value::Array(items) => Ok(parse_records(items, wallet)),
        _ => Err(CoreError::Deserialization(format!(
            "Expected a JSON array of transactions for wallet {wallet}"
        ))),
    }
}

/// Append `record` to `wallet`'s history inside a raw wallet collection.
///
/// Works on the JSON tree as stored, so documents and records this
/// crate cannot read are written back untouched. `data` of `None` is an
/// empty collection. Returns the pretty-printed collection.
pub fn append_record(
    data: Option<&[u8]>,
    wallet: &str,
    record: &TransactionRecord,
) -> Result<Vec<u8>, CoreError> {
    let mut root = match data {
        Some(bytes) => serde_json::from_slice(bytes)?,
        None => Value::Array(Vec::new()),
    };
    let Value::Array(docs) = &mut root else {
        return Err(CoreError::Deserialization(
            "Expected a JSON array of wallet documents".into(),
        ));
    };

    let entry = serde_json::to_value(record)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize transaction: {e}")))?;

    let existing = docs
        .iter_mut()
        .filter_map(Value::as_object_mut)
        .find(|doc| doc.get("wallet").and_then(Value::as_str) == Some(wallet));
    match existing {
        Some(doc) => match doc.get_mut("transactions") {
            Some(Value::Array(items)) => items.push(entry),
            Some(Value::Null) | None => {
                doc.insert("transactions".into(), Value::Array(vec![entry]));
            }
            Some(_) => {
                return Err(CoreError::Store(format!(
                    "Wallet {wallet}: 'transactions' is not an array, refusing to overwrite"
                )));
            }
        },
        None => docs.push(serde_json::json!({
            "wallet": wallet,
            "transactions": [entry],
        })),
    }

    serde_json::to_vec_pretty(&root)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize wallet documents: {e}")))
}

fn parse_records(items: Vec<Value>, wallet: &str) -> Vec<TransactionRecord> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(idx, item)| match serde_json::from_value::<TransactionRecord>(item) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("Wallet {wallet}: skipping unreadable transaction #{idx}: {e}");
                None
            }
        })
        .collect()
}
