use chrono::{DateTime, NaiveDateTime, Utc};
use uuid::Uuid;

use crate::{Engine, Entry, ExpenseKind, Money, TransactionKind};

/// Optional narrowing of a history listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    pub kind: Option<TransactionKind>,
    pub driver_id: Option<String>,
}

impl HistoryFilter {
    #[must_use]
    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn driver(mut self, driver_id: impl Into<String>) -> Self {
        self.driver_id = Some(driver_id.into());
        self
    }

    fn matches(&self, kind: TransactionKind, driver_id: &str) -> bool {
        self.kind.is_none_or(|k| k == kind)
            && self.driver_id.as_deref().is_none_or(|d| d == driver_id)
    }
}

/// One row of the merged history of all three collections.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub kind: TransactionKind,
    pub id: Uuid,
    pub driver_id: String,
    pub amount: Money,
    pub date: NaiveDateTime,
    pub created_at: DateTime<Utc>,
    /// Set for expenses only.
    pub expense_kind: Option<ExpenseKind>,
    pub description: Option<String>,
}

impl HistoryEntry {
    fn from_entry<E: Entry>(kind: TransactionKind, entry: &E) -> Self {
        Self {
            kind,
            id: entry.id(),
            driver_id: entry.driver_id().to_string(),
            amount: entry.amount(),
            date: entry.date(),
            created_at: entry.created_at(),
            expense_kind: None,
            description: None,
        }
    }
}

impl Engine {
    /// Merged listing, newest `date` first; ties fall back to the most
    /// recently recorded.
    pub fn history(&self, filter: &HistoryFilter) -> Vec<HistoryEntry> {
        let revenues = self
            .store
            .revenues()
            .iter()
            .map(|r| HistoryEntry::from_entry(TransactionKind::Revenue, r));
        let expenses = self.store.expenses().iter().map(|e| HistoryEntry {
            expense_kind: Some(e.kind),
            description: e.description.clone(),
            ..HistoryEntry::from_entry(TransactionKind::Expense, e)
        });
        let salaries = self
            .store
            .salaries()
            .iter()
            .map(|s| HistoryEntry::from_entry(TransactionKind::Salary, s));

        let mut entries: Vec<HistoryEntry> = revenues
            .chain(expenses)
            .chain(salaries)
            .filter(|h| filter.matches(h.kind, &h.driver_id))
            .collect();
        // Stable sort over the reversed insertion order: full ties list the
        // later insertion first.
        entries.reverse();
        entries.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        entries
    }

    /// The `limit` most recent records of one kind.
    pub fn recent(&self, kind: TransactionKind, limit: usize) -> Vec<HistoryEntry> {
        let mut entries = self.history(&HistoryFilter::default().kind(kind));
        entries.truncate(limit);
        entries
    }

    /// Sum of every record of `kind`, all drivers, all time.
    pub fn lifetime_total(&self, kind: TransactionKind) -> Money {
        match kind {
            TransactionKind::Revenue => self.store.revenues().iter().map(Entry::amount).sum(),
            TransactionKind::Expense => self.store.expenses().iter().map(Entry::amount).sum(),
            TransactionKind::Salary => self.store.salaries().iter().map(Entry::amount).sum(),
        }
    }
}
