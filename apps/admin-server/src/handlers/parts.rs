//! # Inventory Handlers
//!
//! ```text
//! GET  /api/admin/parts?q=&page=        search + paginate
//! POST /api/admin/parts                 add part (PART-nnn)
//! GET  /api/admin/parts/{id}
//! PUT  /api/admin/parts/{id}            edit part
//! GET  /api/admin/parts/scan/{code}     QR payload → part
//! GET  /api/admin/parts/low-stock?q=    restock candidates
//! ```

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;
use workshop_core::catalog::{find_by_scanned_id, paginate, search_by_name, search_low_stock, Page};
use workshop_core::forms::PartForm;
use workshop_core::validation::validate_search_query;
use workshop_core::Part;

use super::PartQuery;
use crate::error::ApiResult;
use crate::state::{AdminSession, AppState};

pub async fn list_parts(
    _admin: AdminSession,
    State(state): State<AppState>,
    Query(query): Query<PartQuery>,
) -> ApiResult<Json<Page<Part>>> {
    let term = validate_search_query(&query.q)?;
    let parts = state.store.parts().list()?;
    let matches: Vec<Part> = search_by_name(&parts, &term).into_iter().cloned().collect();

    Ok(Json(paginate(&matches, query.page, state.config.inventory.parts_per_page)))
}

pub async fn get_part(_admin: AdminSession, State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Part>> {
    Ok(Json(state.store.parts().get(&id)?))
}

pub async fn create_part(
    _admin: AdminSession,
    State(state): State<AppState>,
    Json(form): Json<PartForm>,
) -> ApiResult<(StatusCode, Json<Part>)> {
    let id = state.store.parts().next_id()?;
    let part = state.store.parts().insert(form.into_part(id)?)?;

    info!(id = %part.id, name = %part.name, stock = part.stock, "Part added");
    Ok((StatusCode::CREATED, Json(part)))
}

/// Replaces every editable field; the id stays.
pub async fn update_part(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(form): Json<PartForm>,
) -> ApiResult<Json<Part>> {
    let part = state.store.parts().update(form.into_part(id)?)?;

    info!(id = %part.id, stock = part.stock, "Part updated");
    Ok(Json(part))
}

/// Exact-id lookup for a decoded QR code.
pub async fn scan_part(_admin: AdminSession, State(state): State<AppState>, Path(code): Path<String>) -> ApiResult<Json<Part>> {
    let parts = state.store.parts().list()?;
    let part = find_by_scanned_id(&parts, &code)?;
    Ok(Json(part.clone()))
}

pub async fn low_stock_parts(
    _admin: AdminSession,
    State(state): State<AppState>,
    Query(query): Query<PartQuery>,
) -> ApiResult<Json<Vec<Part>>> {
    let term = validate_search_query(&query.q)?;
    let parts = state.store.parts().list()?;
    let low = search_low_stock(&parts, state.low_stock_threshold(), &term)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(low))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::handlers::test_support;
    use workshop_core::PartCategory;

    fn form(name: &str, stock: i64) -> PartForm {
        PartForm {
            name: name.to_string(),
            category: PartCategory::Electrical,
            mrp_paise: 60_000,
            selling_price_paise: 55_000,
            stock,
            image: None,
            image_hint: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_update_part() {
        let state = test_support::state();
        let admin = test_support::admin(&state);

        let (status, Json(part)) = create_part(admin.clone(), State(state.clone()), Json(form("Headlight Bulb", 12)))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(part.id, "PART-007");

        let Json(updated) = update_part(
            admin.clone(),
            State(state.clone()),
            Path("PART-007".to_string()),
            Json(form("Headlight Bulb H4", 2)),
        )
        .await
        .unwrap();
        assert_eq!(updated.name, "Headlight Bulb H4");

        let Json(low) = low_stock_parts(admin, State(state), Query(PartQuery::default())).await.unwrap();
        let ids: Vec<_> = low.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["PART-003", "PART-007"]);
    }

    #[tokio::test]
    async fn test_update_unknown_part_is_not_found() {
        let state = test_support::state();
        let admin = test_support::admin(&state);

        let err = update_part(admin, State(state), Path("PART-999".to_string()), Json(form("Mirror", 4)))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_create_rejects_price_above_mrp() {
        let state = test_support::state();
        let admin = test_support::admin(&state);
        let mut bad = form("Mirror", 4);
        bad.selling_price_paise = 70_000;

        let err = create_part(admin, State(state.clone()), Json(bad)).await.unwrap_err();

        assert_eq!(err.field.as_deref(), Some("sellingPricePaise"));
        assert_eq!(state.store.parts().list().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_create_rejects_oversized_values() {
        let state = test_support::state();
        let admin = test_support::admin(&state);

        let mut pricey = form("Mirror", 4);
        pricey.mrp_paise = i64::MAX / 2 + 10;
        pricey.selling_price_paise = i64::MAX / 2 + 10;
        let err = create_part(admin.clone(), State(state.clone()), Json(pricey)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.field.as_deref(), Some("mrpPaise"));

        let hoard = form("Mirror", i64::MAX);
        let err = create_part(admin, State(state.clone()), Json(hoard)).await.unwrap_err();
        assert_eq!(err.field.as_deref(), Some("stock"));
        assert_eq!(state.store.parts().list().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_scan_part() {
        let state = test_support::state();
        let admin = test_support::admin(&state);

        let Json(part) = scan_part(admin.clone(), State(state.clone()), Path(" PART-004 ".to_string()))
            .await
            .unwrap();
        assert_eq!(part.name, "Engine Oil (1L)");

        let err = scan_part(admin, State(state), Path("XYZ".to_string())).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_list_parts_search() {
        let state = test_support::state();
        let admin = test_support::admin(&state);

        let Json(page) = list_parts(
            admin,
            State(state),
            Query(PartQuery {
                q: "CLUTCH".to_string(),
                page: 1,
            }),
        )
        .await
        .unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, "PART-002");
    }
}
