//! # Expense Handlers
//!
//! CRUD over the expense ledger plus the running total shown on the
//! dashboard. New ids come from the request time (`EXP-<millis>`).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::info;
use workshop_core::forms::NewExpense;
use workshop_core::Expense;

use crate::error::ApiResult;
use crate::state::{AdminSession, AppState};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseTotal {
    pub total_paise: i64,
    /// Formatted with the configured currency symbol.
    pub display: String,
    pub count: usize,
}

pub async fn list_expenses(_admin: AdminSession, State(state): State<AppState>) -> ApiResult<Json<Vec<Expense>>> {
    Ok(Json(state.store.expenses().list()?))
}

pub async fn get_expense(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Expense>> {
    Ok(Json(state.store.expenses().get(&id)?))
}

pub async fn create_expense(
    _admin: AdminSession,
    State(state): State<AppState>,
    Json(form): Json<NewExpense>,
) -> ApiResult<(StatusCode, Json<Expense>)> {
    let id = state.store.expenses().next_id(state.now().timestamp_millis())?;
    let expense = state.store.expenses().insert(form.into_expense(id)?)?;

    info!(id = %expense.id, category = %expense.category, amount = expense.amount_paise, "Expense recorded");
    Ok((StatusCode::CREATED, Json(expense)))
}

pub async fn update_expense(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(form): Json<NewExpense>,
) -> ApiResult<Json<Expense>> {
    let expense = state.store.expenses().update(form.into_expense(id)?)?;

    info!(id = %expense.id, amount = expense.amount_paise, "Expense updated");
    Ok(Json(expense))
}

pub async fn delete_expense(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let removed = state.store.expenses().delete(&id)?;

    info!(id = %removed.id, "Expense deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn expense_total(_admin: AdminSession, State(state): State<AppState>) -> ApiResult<Json<ExpenseTotal>> {
    let expenses = state.store.expenses();
    let total = expenses.total()?;
    Ok(Json(ExpenseTotal {
        total_paise: total.paise(),
        display: state.config.format_currency(total),
        count: expenses.list()?.len(),
    }))
}
