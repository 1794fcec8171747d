use crate::models::chart::{TimelineEntry, TypeCount, TypeProportion};
use crate::models::transaction::{TransactionKind, TransactionRecord, TransactionType};
use crate::services::date_service::DateService;

/// Summarizes activity across both record types: recent timeline,
/// per-type counts and proportions.
pub struct ActivityService {
    date_service: DateService,
}

impl ActivityService {
    pub fn new(date_service: DateService) -> Self {
        Self { date_service }
    }

    /// The `limit` most recent records in reverse input order.
    ///
    /// "Recent" means later in the input, not a later timestamp.
    pub fn timeline(&self, records: &[TransactionRecord], limit: usize) -> Vec<TimelineEntry> {
        records
            .iter()
            .rev()
            .take(limit)
            .map(|record| self.timeline_entry(record))
            .collect()
    }

    /// Normalize one record into a timeline entry.
    pub fn timeline_entry(&self, record: &TransactionRecord) -> TimelineEntry {
        let date = self.date_service.date_time(record.timestamp());
        match &record.kind {
            TransactionKind::Swap(details) => TimelineEntry {
                transaction_type: TransactionType::Swap,
                date,
                tokens: details.token_list().to_vec(),
                amount: details.total_amount(),
                desc: None,
            },
            TransactionKind::Stake(details) => TimelineEntry {
                transaction_type: TransactionType::Stake,
                date,
                tokens: Vec::new(),
                amount: 0.0,
                desc: Some(details.user_input.clone()),
            },
        }
    }

    /// Number of swap and stake records, in that order.
    pub fn type_counts(&self, records: &[TransactionRecord]) -> Vec<TypeCount> {
        let (swaps, stakes) = Self::count_by_type(records);
        vec![
            TypeCount {
                transaction_type: TransactionType::Swap,
                count: swaps,
            },
            TypeCount {
                transaction_type: TransactionType::Stake,
                count: stakes,
            },
        ]
    }

    /// Share of swap and stake records in the whole history.
    ///
    /// Both shares are 0 for an empty history.
    pub fn type_proportions(&self, records: &[TransactionRecord]) -> Vec<TypeProportion> {
        let (swaps, stakes) = Self::count_by_type(records);
        let total = records.len();
        let share = |count: usize| {
            if total == 0 {
                0.0
            } else {
                count as f64 / total as f64
            }
        };
        vec![
            TypeProportion {
                transaction_type: TransactionType::Swap,
                value: share(swaps),
            },
            TypeProportion {
                transaction_type: TransactionType::Stake,
                value: share(stakes),
            },
        ]
    }

    fn count_by_type(records: &[TransactionRecord]) -> (usize, usize) {
        records
            .iter()
            .fold((0, 0), |(swaps, stakes), record| match record.kind {
                TransactionKind::Swap(_) => (swaps + 1, stakes),
                TransactionKind::Stake(_) => (swaps, stakes + 1),
            })
    }
}

impl Default for ActivityService {
    fn default() -> Self {
        Self::new(DateService::default())
    }
}
