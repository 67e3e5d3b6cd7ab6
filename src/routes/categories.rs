use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use crate::db;
use crate::error::AppError;
use crate::filter::{filter_and_sort, FilterParams};
use crate::models::{EventQuery, GetCategoriesResponse, GetCategoryEventsResponse};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/categories", get(list_categories))
        .route("/api/categories/{slug}/events", get(category_events))
}

/// GET /api/categories - The category taxonomy.
async fn list_categories(State(state): State<AppState>) -> Json<GetCategoriesResponse> {
    Json(GetCategoriesResponse {
        categories: state.categories.categories().to_vec(),
    })
}

/// GET /api/categories/{slug}/events - A category page.
///
/// `all` lists every event; so does a slug the taxonomy does not know.
async fn category_events(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<EventQuery>,
) -> Result<Json<GetCategoryEventsResponse>, AppError> {
    let events = db::list_events(&state.pool).await?;
    let params = FilterParams::from(query).category(slug.as_str());
    let events = filter_and_sort(&events, &params, &state.categories);

    Ok(Json(GetCategoryEventsResponse {
        category: state.categories.resolve(&slug).cloned(),
        total: events.len(),
        events,
    }))
}
