//! Derived financial views.
//!
//! These are value objects with no lifecycle of their own: they are rebuilt
//! from the store on every query and never patched.

use crate::{Driver, Money};

/// Per-driver figures.
///
/// `daily_profit` and `weekly_profit` subtract expenses only; salary is
/// subtracted from `profit` (lifetime) and `monthly_profit`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DriverFinancials {
    pub driver: Driver,
    pub total_revenue: Money,
    pub total_expenses: Money,
    pub total_salary: Money,
    pub profit: Money,
    pub daily_revenue: Money,
    pub weekly_revenue: Money,
    pub monthly_revenue: Money,
    pub daily_profit: Money,
    pub weekly_profit: Money,
    pub monthly_profit: Money,
}

/// Company-wide figures. Period figures are revenue only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompanyFinancials {
    pub total_revenue: Money,
    pub total_expenses: Money,
    pub total_salaries: Money,
    pub total_profit: Money,
    pub daily_revenue: Money,
    pub weekly_revenue: Money,
    pub monthly_revenue: Money,
}
