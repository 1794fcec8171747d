use crate::models::analytics::BalanceMap;
use crate::models::transaction::TransactionRecord;

/// Computes net per-token swap totals over transaction histories.
///
/// Pure business logic, no I/O. Stake records and malformed swaps
/// contribute nothing.
pub struct BalanceService;

impl BalanceService {
    pub fn new() -> Self {
        Self
    }

    /// Sum of signed swap amounts per token over `records`.
    pub fn aggregate_balances(&self, records: &[TransactionRecord]) -> BalanceMap {
        let mut balances = BalanceMap::new();
        for details in records.iter().filter_map(TransactionRecord::as_swap) {
            for (token, amount) in details.legs() {
                *balances.entry(token.to_string()).or_insert(0.0) += amount;
            }
        }
        balances
    }

    /// Index of the last swap record (well-formed or not), scanning backward.
    pub fn last_swap_index(&self, records: &[TransactionRecord]) -> Option<usize> {
        records.iter().rposition(TransactionRecord::is_swap)
    }

    /// Balances over every record strictly before the last swap.
    ///
    /// Empty when the history contains no swap.
    pub fn balances_before_last_swap(&self, records: &[TransactionRecord]) -> BalanceMap {
        match self.last_swap_index(records) {
            Some(idx) => self.aggregate_balances(&records[..idx]),
            None => BalanceMap::new(),
        }
    }

    /// `now - before` for every token present in `now`.
    pub fn balance_change(&self, now: &BalanceMap, before: &BalanceMap) -> BalanceMap {
        now.iter()
            .map(|(token, value)| {
                let prior = before.get(token).copied().unwrap_or(0.0);
                (token.clone(), value - prior)
            })
            .collect()
    }
}

impl Default for BalanceService {
    fn default() -> Self {
        Self::new()
    }
}
