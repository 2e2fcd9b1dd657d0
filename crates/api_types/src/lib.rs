use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod classifier {
    use super::*;

    /// Body of the classify endpoint.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ClassifyRequest {
        pub message: String,
    }

    /// Loosely typed reply produced by the language model.
    ///
    /// Every field is optional on the wire: models drop keys, send numbers as
    /// strings, and invent new `type` values. Normalization into a typed
    /// intent happens in the assistant.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct ClassifierReply {
        #[serde(rename = "type", default)]
        pub kind: String,
        #[serde(default)]
        pub data: Option<CommandData>,
        #[serde(default)]
        pub response: String,
        #[serde(default)]
        pub understood: bool,
    }

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct CommandData {
        #[serde(default)]
        pub driver: Option<String>,
        #[serde(default)]
        pub vehicle: Option<String>,
        /// A JSON number or a numeric string, in meticais.
        #[serde(default)]
        pub amount: Option<serde_json::Value>,
        #[serde(rename = "expenseType", default)]
        pub expense_type: Option<String>,
        #[serde(default)]
        pub description: Option<String>,
    }

    /// Error body of the classify endpoint.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ErrorReply {
        pub error: bool,
        #[serde(rename = "type")]
        pub kind: String,
        pub response: String,
    }

    impl ErrorReply {
        pub fn new(response: impl Into<String>) -> Self {
            Self {
                error: true,
                kind: "error".to_string(),
                response: response.into(),
            }
        }
    }
}

pub mod chat {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ChatRequest {
        pub message: String,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ChatReply {
        pub reply: String,
    }
}

pub mod driver {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct DriverView {
        pub id: String,
        pub name: String,
        pub vehicle: String,
    }
}

pub mod financials {
    use super::*;
    use crate::driver::DriverView;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct DriverFinancialsView {
        pub driver: DriverView,
        pub total_revenue_minor: i64,
        pub total_expenses_minor: i64,
        pub total_salary_minor: i64,
        pub profit_minor: i64,
        pub daily_revenue_minor: i64,
        pub weekly_revenue_minor: i64,
        pub monthly_revenue_minor: i64,
        /// Salary is not subtracted from daily and weekly profit.
        pub daily_profit_minor: i64,
        pub weekly_profit_minor: i64,
        pub monthly_profit_minor: i64,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct CompanyFinancialsView {
        pub total_revenue_minor: i64,
        pub total_expenses_minor: i64,
        pub total_salaries_minor: i64,
        pub total_profit_minor: i64,
        pub daily_revenue_minor: i64,
        pub weekly_revenue_minor: i64,
        pub monthly_revenue_minor: i64,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionKind {
        Revenue,
        Expense,
        Salary,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RevenueNew {
        pub driver_id: String,
        /// Must be > 0.
        pub amount_minor: i64,
        /// Calendar date; today when absent.
        pub date: Option<NaiveDate>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub driver_id: String,
        pub amount_minor: i64,
        /// `fuel`, `maintenance`, `fines` or `other`; free text is mapped the
        /// same way chat input is.
        pub expense_type: Option<String>,
        pub description: Option<String>,
        pub date: Option<NaiveDate>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SalaryNew {
        pub driver_id: String,
        pub amount_minor: i64,
        pub date: Option<NaiveDate>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionCreated {
        pub id: Uuid,
    }

    /// Query string of `/history` and `/export.csv`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct HistoryQuery {
        pub kind: Option<String>,
        pub driver: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: Uuid,
        pub kind: TransactionKind,
        pub driver_id: String,
        pub driver_name: String,
        pub amount_minor: i64,
        pub date: NaiveDateTime,
        pub expense_type: Option<String>,
        pub description: Option<String>,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct HistoryResponse {
        pub transactions: Vec<TransactionView>,
    }
}
