//! Typed intents built from the loosely typed classifier reply.

use api_types::classifier::{ClassifierReply, CommandData};
use engine::{DriverRegistry, ExpenseKind, Money};
use serde_json::Value;

/// Description stored on expenses entered through the chat without one.
pub const DEFAULT_EXPENSE_DESCRIPTION: &str = "Via chat";

/// Validated fields of an add command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Draft {
    /// Canonical driver id.
    pub driver_id: String,
    /// Strictly positive.
    pub amount: Money,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// `None` when the driver or amount is missing or invalid.
    AddRevenue(Option<Draft>),
    AddExpense {
        draft: Option<Draft>,
        kind: ExpenseKind,
        description: String,
    },
    AddSalary(Option<Draft>),
    ListDrivers,
    ListRevenues,
    ListExpenses,
    ListSalaries,
    Summary,
    Help,
    Greeting,
    Question,
    Unrecognized,
}

impl Intent {
    /// Normalizes a wire reply. Never fails: unknown kinds become
    /// [`Intent::Unrecognized`], unusable fields become a `None` draft.
    pub fn from_reply(reply: &ClassifierReply, drivers: &DriverRegistry) -> Self {
        let data = reply.data.as_ref();
        match reply.kind.trim().to_lowercase().as_str() {
            "revenue" => Self::AddRevenue(draft(data, drivers)),
            "expense" => Self::AddExpense {
                draft: draft(data, drivers),
                kind: ExpenseKind::from_label(data.and_then(|d| non_empty(&d.expense_type))),
                description: data
                    .and_then(|d| non_empty(&d.description))
                    .unwrap_or(DEFAULT_EXPENSE_DESCRIPTION)
                    .to_string(),
            },
            "salary" => Self::AddSalary(draft(data, drivers)),
            "list_drivers" => Self::ListDrivers,
            "list_revenues" => Self::ListRevenues,
            "list_expenses" => Self::ListExpenses,
            "list_salaries" => Self::ListSalaries,
            "summary" => Self::Summary,
            "help" => Self::Help,
            "greeting" => Self::Greeting,
            "question" => Self::Question,
            other => {
                tracing::debug!("unknown intent kind {other:?}");
                Self::Unrecognized
            }
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn draft(data: Option<&CommandData>, drivers: &DriverRegistry) -> Option<Draft> {
    let data = data?;
    let driver_id = drivers.canonical_id(non_empty(&data.driver)?)?;
    let amount = amount(data.amount.as_ref()?)?;
    Some(Draft { driver_id, amount })
}

/// Accepts a JSON number or a numeric string, in meticais.
fn amount(value: &Value) -> Option<Money> {
    let money = match value {
        Value::Number(n) => Money::from_major(n.as_f64()?).ok()?,
        Value::String(s) => s.trim().parse::<Money>().ok()?,
        _ => return None,
    };
    (money.is_positive() && money <= Money::MAX_ENTRY).then_some(money)
}
