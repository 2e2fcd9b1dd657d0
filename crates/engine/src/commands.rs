//! Command structs for engine write operations.
//!
//! These types group the parameters of the add operations, keeping call
//! sites readable whether the data comes from a form or from a chat command.

use chrono::NaiveDateTime;

use crate::{ExpenseKind, Money};

/// Record a revenue.
#[derive(Clone, Debug)]
pub struct NewRevenue {
    pub driver_id: String,
    pub amount: Money,
    /// Defaults to the start of the current day.
    pub date: Option<NaiveDateTime>,
}

impl NewRevenue {
    #[must_use]
    pub fn new(driver_id: impl Into<String>, amount: Money) -> Self {
        Self {
            driver_id: driver_id.into(),
            amount,
            date: None,
        }
    }

    #[must_use]
    pub fn date(mut self, date: NaiveDateTime) -> Self {
        self.date = Some(date);
        self
    }
}

/// Record an expense.
#[derive(Clone, Debug)]
pub struct NewExpense {
    pub driver_id: String,
    pub kind: ExpenseKind,
    pub amount: Money,
    pub date: Option<NaiveDateTime>,
    pub description: Option<String>,
}

impl NewExpense {
    #[must_use]
    pub fn new(driver_id: impl Into<String>, kind: ExpenseKind, amount: Money) -> Self {
        Self {
            driver_id: driver_id.into(),
            kind,
            amount,
            date: None,
            description: None,
        }
    }

    #[must_use]
    pub fn date(mut self, date: NaiveDateTime) -> Self {
        self.date = Some(date);
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Record a salary payment.
#[derive(Clone, Debug)]
pub struct NewSalary {
    pub driver_id: String,
    pub amount: Money,
    pub date: Option<NaiveDateTime>,
}

impl NewSalary {
    #[must_use]
    pub fn new(driver_id: impl Into<String>, amount: Money) -> Self {
        Self {
            driver_id: driver_id.into(),
            amount,
            date: None,
        }
    }

    #[must_use]
    pub fn date(mut self, date: NaiveDateTime) -> Self {
        self.date = Some(date);
        self
    }
}
