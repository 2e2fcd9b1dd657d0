//! Driver directory and financial summaries.

use api_types::{
    driver::DriverView,
    financials::{CompanyFinancialsView, DriverFinancialsView},
};
use axum::{
    Json,
    extract::{Path, State},
};
use engine::{CompanyFinancials, Driver, DriverFinancials, EngineError};

use crate::{ServerError, server::ServerState};

fn driver_view(driver: &Driver) -> DriverView {
    DriverView {
        id: driver.id.clone(),
        name: driver.name.clone(),
        vehicle: driver.vehicle.clone(),
    }
}

fn driver_financials_view(f: &DriverFinancials) -> DriverFinancialsView {
    DriverFinancialsView {
        driver: driver_view(&f.driver),
        total_revenue_minor: f.total_revenue.minor(),
        total_expenses_minor: f.total_expenses.minor(),
        total_salary_minor: f.total_salary.minor(),
        profit_minor: f.profit.minor(),
        daily_revenue_minor: f.daily_revenue.minor(),
        weekly_revenue_minor: f.weekly_revenue.minor(),
        monthly_revenue_minor: f.monthly_revenue.minor(),
        daily_profit_minor: f.daily_profit.minor(),
        weekly_profit_minor: f.weekly_profit.minor(),
        monthly_profit_minor: f.monthly_profit.minor(),
    }
}

fn company_view(f: &CompanyFinancials) -> CompanyFinancialsView {
    CompanyFinancialsView {
        total_revenue_minor: f.total_revenue.minor(),
        total_expenses_minor: f.total_expenses.minor(),
        total_salaries_minor: f.total_salaries.minor(),
        total_profit_minor: f.total_profit.minor(),
        daily_revenue_minor: f.daily_revenue.minor(),
        weekly_revenue_minor: f.weekly_revenue.minor(),
        monthly_revenue_minor: f.monthly_revenue.minor(),
    }
}

pub async fn drivers(State(state): State<ServerState>) -> Json<Vec<DriverView>> {
    let engine = state.engine.read().await;
    Json(engine.drivers().all().iter().map(driver_view).collect())
}

pub async fn company(State(state): State<ServerState>) -> Json<CompanyFinancialsView> {
    let engine = state.engine.read().await;
    Json(company_view(&engine.company_financials()))
}

pub async fn all_drivers(State(state): State<ServerState>) -> Json<Vec<DriverFinancialsView>> {
    let engine = state.engine.read().await;
    Json(
        engine
            .all_drivers_financials()
            .iter()
            .map(driver_financials_view)
            .collect(),
    )
}

pub async fn driver(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<DriverFinancialsView>, ServerError> {
    let engine = state.engine.read().await;
    let financials = engine
        .driver_financials(&id)
        .ok_or(EngineError::KeyNotFound(id))?;
    Ok(Json(driver_financials_view(&financials)))
}
