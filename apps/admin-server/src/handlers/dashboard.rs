//! Overview cards.

use axum::extract::State;
use axum::Json;
use workshop_core::dashboard::{DashboardSources, DashboardStats};

use crate::error::ApiResult;
use crate::state::{AdminSession, AppState};

pub async fn dashboard(_admin: AdminSession, State(state): State<AppState>) -> ApiResult<Json<DashboardStats>> {
    let store = &state.store;
    let parts = store.parts().list()?;
    let expenses = store.expenses().list()?;
    let bookings = store.bookings().list()?;
    let attendance = store.attendance().list()?;
    let sales = store.sales().list()?;

    let stats = DashboardStats::compute(
        DashboardSources {
            parts: &parts,
            expenses: &expenses,
            bookings: &bookings,
            attendance: &attendance,
            sales: &sales,
        },
        state.today(),
        state.low_stock_threshold(),
    );
    Ok(Json(stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support;

    #[tokio::test]
    async fn test_seeded_overview() {
        let state = test_support::state();
        let admin = test_support::admin(&state);

        let Json(stats) = dashboard(admin, State(state)).await.unwrap();

        assert_eq!(stats.total_stock, 141);
        assert_eq!(stats.low_stock_count, 1);
        assert_eq!(stats.pending_bookings, 2);
        assert_eq!(stats.absent_today, 1);
        assert_eq!(stats.net_profit_paise, stats.revenue_paise - stats.total_expenses_paise);
        assert_eq!(stats.is_profit, stats.net_profit_paise >= 0);
    }
}
