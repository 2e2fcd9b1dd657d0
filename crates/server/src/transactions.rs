//! Transaction endpoints: create, delete, history and CSV export.

use api_types::transaction::{
    ExpenseNew, HistoryQuery, HistoryResponse, RevenueNew, SalaryNew, TransactionCreated,
    TransactionKind as ApiKind, TransactionView,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use engine::{
    Engine, ExpenseKind, HistoryEntry, HistoryFilter, Money, NewExpense, NewRevenue, NewSalary,
    TransactionKind,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

fn at_midnight(date: Option<NaiveDate>) -> Option<NaiveDateTime> {
    date.map(|d| d.and_time(NaiveTime::MIN))
}

pub async fn revenue_new(
    State(state): State<ServerState>,
    Json(payload): Json<RevenueNew>,
) -> Result<(StatusCode, Json<TransactionCreated>), ServerError> {
    let mut cmd = NewRevenue::new(payload.driver_id, Money::new(payload.amount_minor));
    cmd.date = at_midnight(payload.date);
    let id = state.engine.write().await.add_revenue(cmd)?;

    Ok((StatusCode::CREATED, Json(TransactionCreated { id })))
}

pub async fn expense_new(
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseNew>,
) -> Result<(StatusCode, Json<TransactionCreated>), ServerError> {
    let kind = ExpenseKind::from_label(payload.expense_type.as_deref());
    let mut cmd = NewExpense::new(payload.driver_id, kind, Money::new(payload.amount_minor));
    cmd.date = at_midnight(payload.date);
    cmd.description = payload.description;
    let id = state.engine.write().await.add_expense(cmd)?;

    Ok((StatusCode::CREATED, Json(TransactionCreated { id })))
}

pub async fn salary_new(
    State(state): State<ServerState>,
    Json(payload): Json<SalaryNew>,
) -> Result<(StatusCode, Json<TransactionCreated>), ServerError> {
    let mut cmd = NewSalary::new(payload.driver_id, Money::new(payload.amount_minor));
    cmd.date = at_midnight(payload.date);
    let id = state.engine.write().await.add_salary(cmd)?;

    Ok((StatusCode::CREATED, Json(TransactionCreated { id })))
}

async fn remove(
    state: &ServerState,
    kind: TransactionKind,
    id: Uuid,
) -> Result<StatusCode, ServerError> {
    state.engine.write().await.delete(kind, id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn revenue_delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    remove(&state, TransactionKind::Revenue, id).await
}

pub async fn expense_delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    remove(&state, TransactionKind::Expense, id).await
}

pub async fn salary_delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    remove(&state, TransactionKind::Salary, id).await
}

/// Builds an engine filter; drivers may be given by id or by name.
fn filter(engine: &Engine, query: &HistoryQuery) -> Result<HistoryFilter, ServerError> {
    let mut filter = HistoryFilter::default();
    if let Some(kind) = query.kind.as_deref().filter(|k| !k.trim().is_empty()) {
        filter = filter.kind(TransactionKind::try_from(kind)?);
    }
    if let Some(driver) = query.driver.as_deref() {
        filter.driver_id = engine.drivers().canonical_id(driver);
    }
    Ok(filter)
}

fn api_kind(kind: TransactionKind) -> ApiKind {
    match kind {
        TransactionKind::Revenue => ApiKind::Revenue,
        TransactionKind::Expense => ApiKind::Expense,
        TransactionKind::Salary => ApiKind::Salary,
    }
}

fn transaction_view(engine: &Engine, entry: HistoryEntry) -> TransactionView {
    TransactionView {
        id: entry.id,
        kind: api_kind(entry.kind),
        driver_name: engine.drivers().display_name(&entry.driver_id).to_string(),
        driver_id: entry.driver_id,
        amount_minor: entry.amount.minor(),
        date: entry.date,
        expense_type: entry.expense_kind.map(|k| k.as_str().to_string()),
        description: entry.description,
        created_at: entry.created_at,
    }
}

pub async fn history(
    State(state): State<ServerState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, ServerError> {
    let engine = state.engine.read().await;
    let filter = filter(&engine, &query)?;
    let transactions = engine
        .history(&filter)
        .into_iter()
        .map(|entry| transaction_view(&engine, entry))
        .collect();

    Ok(Json(HistoryResponse { transactions }))
}

pub async fn export(
    State(state): State<ServerState>,
    Query(query): Query<HistoryQuery>,
) -> Result<impl IntoResponse, ServerError> {
    let engine = state.engine.read().await;
    let filter = filter(&engine, &query)?;
    let data = engine.export_csv(&filter)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"transacoes.csv\"",
            ),
        ],
        data,
    ))
}
