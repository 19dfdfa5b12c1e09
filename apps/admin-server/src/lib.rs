//! # workshop-server: HTTP API for the Workshop Site and Back-Office
//!
//! axum router over [`workshop_store::Store`] and the pure rules in
//! [`workshop_core`].
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Workshop Server                                  │
//! │                                                                         │
//! │  Browser ───► axum (8080) ───► handlers ───► workshop-core rules       │
//! │                   │                │                                    │
//! │                   │                ▼                                    │
//! │            AdminSession       AppState ───► Store (in-memory tables)   │
//! │            extractor          cart / checkout / sessions               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`] - TOML + environment configuration
//! - [`error`] - `ApiError` and its HTTP mapping
//! - [`state`] - Shared state, sessions, cart and checkout locks
//! - [`handlers`] - One module per dashboard area

pub mod config;
pub mod error;
pub mod handlers;
pub mod state;

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{
    analytics, attendance, bookings, cart, checkout, dashboard, expenses, invoices, parts, purchase_orders,
    session, site,
};
use crate::state::AppState;

/// Builds the full API router.
pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(site::health))
        .route("/site", get(site::site_info))
        .route("/services", get(site::services))
        .route("/parts", get(site::public_parts))
        .route("/bookings", post(site::request_booking));

    let admin = Router::new()
        .route("/login", post(session::login))
        .route("/logout", post(session::logout))
        .route("/session", get(session::current_session))
        .route("/dashboard", get(dashboard::dashboard))
        // Inventory
        .route("/parts", get(parts::list_parts).post(parts::create_part))
        .route("/parts/low-stock", get(parts::low_stock_parts))
        .route("/parts/scan/{code}", get(parts::scan_part))
        .route("/parts/{id}", get(parts::get_part).put(parts::update_part))
        // Point of sale
        .route("/cart", get(cart::get_cart).delete(cart::clear_cart))
        .route("/cart/items", post(cart::add_item))
        .route("/cart/items/{id}", put(cart::update_item).delete(cart::remove_item))
        .route("/cart/scan", post(cart::scan_item))
        .route("/checkout", get(checkout::get_checkout))
        .route("/checkout/invoice", post(checkout::generate_invoice))
        .route("/checkout/back", post(checkout::back_to_order))
        .route("/checkout/confirm", post(checkout::confirm_sale))
        .route("/checkout/print", get(checkout::print_invoice))
        .route("/checkout/new", post(checkout::start_new_sale))
        .route("/invoices", get(invoices::list_invoices))
        .route("/invoices/{id}", get(invoices::get_invoice))
        .route("/invoices/{id}/print", get(invoices::print_stored_invoice))
        // Back office
        .route("/expenses", get(expenses::list_expenses).post(expenses::create_expense))
        .route("/expenses/total", get(expenses::expense_total))
        .route(
            "/expenses/{id}",
            get(expenses::get_expense)
                .put(expenses::update_expense)
                .delete(expenses::delete_expense),
        )
        .route("/bookings", get(bookings::list_bookings))
        .route("/bookings/{id}/status", put(bookings::set_booking_status))
        .route("/employees", get(attendance::list_employees))
        .route(
            "/attendance",
            get(attendance::list_attendance).post(attendance::mark_attendance),
        )
        .route("/attendance/calendar", get(attendance::attendance_calendar))
        .route("/attendance/chart", get(attendance::attendance_chart))
        .route("/attendance/weekdays", get(attendance::weekday_absences))
        .route("/analytics/top-selling", get(analytics::top_selling_parts))
        .route("/analytics/daily", get(analytics::daily_sales_series))
        .route("/analytics/monthly", get(analytics::monthly_revenue_series))
        .route("/purchase-orders/draft", post(purchase_orders::draft_purchase_order))
        .route("/purchase-orders/print", post(purchase_orders::print_purchase_order));

    Router::new()
        .nest("/api", public.nest("/admin", admin))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support;
    use crate::state::SESSION_HEADER;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    /// Serves `state` on an ephemeral port and returns the status line of one GET.
    async fn get_status(state: AppState, path: &str, token: Option<&str>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router(state)).await });

        let mut request = format!("GET {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n", path, addr);
        if let Some(token) = token {
            request.push_str(&format!("{}: {}\r\n", SESSION_HEADER, token));
        }
        request.push_str("\r\n");

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();

        response.lines().next().unwrap_or_default().to_string()
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let status = get_status(test_support::state(), "/api/health", None).await;
        assert_eq!(status, "HTTP/1.1 200 OK");
    }

    #[tokio::test]
    async fn test_admin_routes_need_session() {
        let state = test_support::state();
        let session = test_support::admin(&state);

        let anonymous = get_status(state.clone(), "/api/admin/dashboard", None).await;
        assert_eq!(anonymous, "HTTP/1.1 401 Unauthorized");

        let logged_in = get_status(state, "/api/admin/dashboard", Some(&session.token)).await;
        assert_eq!(logged_in, "HTTP/1.1 200 OK");
    }

    #[tokio::test]
    async fn test_static_segments_win_over_ids() {
        let state = test_support::state();
        let session = test_support::admin(&state);

        let status = get_status(state, "/api/admin/parts/low-stock", Some(&session.token)).await;
        assert_eq!(status, "HTTP/1.1 200 OK");
    }

    #[tokio::test]
    async fn test_unknown_part_is_404() {
        let state = test_support::state();
        let session = test_support::admin(&state);

        let status = get_status(state, "/api/admin/parts/PART-999", Some(&session.token)).await;
        assert_eq!(status, "HTTP/1.1 404 Not Found");
    }
}
