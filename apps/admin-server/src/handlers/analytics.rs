//! # Sales Analytics Handlers
//!
//! Read-only views over the sale history.
//!
//! ```text
//! GET /api/admin/analytics/top-selling?window=this_month&rankBy=units&limit=10
//! GET /api/admin/analytics/daily?from=2024-08-01&to=2024-08-07
//! GET /api/admin/analytics/monthly?year=2024
//! ```

use axum::extract::{Query, State};
use axum::Json;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use workshop_core::analytics::{
    daily_sales, label_with_catalog, monthly_revenue, top_selling, DailySalesRow, MonthlyRevenueRow, RankBy,
    TimeWindow, TopSellingEntry,
};

use crate::error::{ApiError, ApiResult};
use crate::state::{AdminSession, AppState};

/// Rows in the default daily view, ending today.
const DAILY_DEFAULT_DAYS: i64 = 7;

/// Widest daily range served in one response.
const DAILY_MAX_DAYS: i64 = 366;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TopSellingQuery {
    pub window: TimeWindow,
    pub rank_by: RankBy,
    pub limit: usize,
}

impl Default for TopSellingQuery {
    fn default() -> Self {
        TopSellingQuery {
            window: TimeWindow::default(),
            rank_by: RankBy::default(),
            limit: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopSellingResponse {
    pub window: TimeWindow,
    pub rank_by: RankBy,
    pub entries: Vec<TopSellingEntry>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct DateRangeQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct YearQuery {
    pub year: Option<i32>,
}

pub async fn top_selling_parts(
    _admin: AdminSession,
    State(state): State<AppState>,
    Query(query): Query<TopSellingQuery>,
) -> ApiResult<Json<TopSellingResponse>> {
    let sales = state.store.sales().list()?;
    let parts = state.store.parts().list()?;

    let ranked = top_selling(&sales, query.window, query.rank_by, state.today());
    Ok(Json(TopSellingResponse {
        window: query.window,
        rank_by: query.rank_by,
        entries: label_with_catalog(ranked, &parts, query.limit),
    }))
}

/// Zero-filled daily series. Defaults to the last seven days.
pub async fn daily_sales_series(
    _admin: AdminSession,
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> ApiResult<Json<Vec<DailySalesRow>>> {
    let to = query.to.unwrap_or_else(|| state.today());
    let from = query.from.unwrap_or(to - Duration::days(DAILY_DEFAULT_DAYS - 1));

    if from > to {
        return Err(ApiError::validation("from must not be after to"));
    }
    if (to - from).num_days() >= DAILY_MAX_DAYS {
        return Err(ApiError::validation(format!(
            "Date range is limited to {} days",
            DAILY_MAX_DAYS
        )));
    }

    let sales = state.store.sales().list()?;
    Ok(Json(daily_sales(&sales, from, to)))
}

pub async fn monthly_revenue_series(
    _admin: AdminSession,
    State(state): State<AppState>,
    Query(query): Query<YearQuery>,
) -> ApiResult<Json<Vec<MonthlyRevenueRow>>> {
    let year = query.year.unwrap_or_else(|| state.today().year());
    let sales = state.store.sales().list()?;
    Ok(Json(monthly_revenue(&sales, year)))
}
