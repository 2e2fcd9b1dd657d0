//! Transaction primitives.
//!
//! Revenues, expenses and salaries share the same shape (driver, amount,
//! calendar date, ingestion timestamp); expenses additionally carry a
//! category and an optional description. Records are immutable once stored.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ExpenseKind, Money};

/// Which collection a record belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Revenue,
    Expense,
    Salary,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::Expense => "expense",
            Self::Salary => "salary",
        }
    }

    /// Portuguese label shown to users.
    pub fn label(self) -> &'static str {
        match self {
            Self::Revenue => "Receita",
            Self::Expense => "Despesa",
            Self::Salary => "Salário",
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = crate::EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "revenue" | "revenues" => Ok(Self::Revenue),
            "expense" | "expenses" => Ok(Self::Expense),
            "salary" | "salaries" => Ok(Self::Salary),
            other => Err(crate::EngineError::InvalidFilter(format!(
                "invalid transaction kind: {other}"
            ))),
        }
    }
}

/// Shared read access over the three record types.
///
/// Aggregation and history only ever go through this trait, so the three
/// collections are filtered and summed by the same code.
pub trait Entry {
    fn id(&self) -> Uuid;
    fn driver_id(&self) -> &str;
    fn amount(&self) -> Money;
    /// User-chosen calendar timestamp, wall-clock in the engine's zone.
    fn date(&self) -> NaiveDateTime;
    fn created_at(&self) -> DateTime<Utc>;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revenue {
    pub id: Uuid,
    pub driver_id: String,
    #[serde(rename = "amount_minor")]
    pub amount: Money,
    pub date: NaiveDateTime,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub driver_id: String,
    pub kind: ExpenseKind,
    #[serde(rename = "amount_minor")]
    pub amount: Money,
    pub date: NaiveDateTime,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Salary {
    pub id: Uuid,
    pub driver_id: String,
    #[serde(rename = "amount_minor")]
    pub amount: Money,
    pub date: NaiveDateTime,
    pub created_at: DateTime<Utc>,
}

macro_rules! impl_entry {
    ($ty:ty) => {
        impl Entry for $ty {
            fn id(&self) -> Uuid {
                self.id
            }

            fn driver_id(&self) -> &str {
                &self.driver_id
            }

            fn amount(&self) -> Money {
                self.amount
            }

            fn date(&self) -> NaiveDateTime {
                self.date
            }

            fn created_at(&self) -> DateTime<Utc> {
                self.created_at
            }
        }
    };
}

impl_entry!(Revenue);
impl_entry!(Expense);
impl_entry!(Salary);
