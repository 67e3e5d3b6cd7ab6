use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::db;
use crate::error::AppError;
use crate::models::{BookmarkResponse, Event};
use crate::state::AppState;
use crate::user::CurrentUser;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/events/{id}/bookmark",
            get(bookmark_state).put(add).delete(remove),
        )
        .route("/api/me/bookmarks", get(my_bookmarks))
}

async fn bookmark_state(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(event_id): Path<String>,
) -> Result<Json<BookmarkResponse>, AppError> {
    let bookmarked = db::is_bookmarked(&state.pool, &user_id, &event_id).await?;
    Ok(Json(BookmarkResponse {
        event_id,
        bookmarked,
    }))
}

/// PUT /api/events/{id}/bookmark - Idempotent.
async fn add(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(event_id): Path<String>,
) -> Result<Json<BookmarkResponse>, AppError> {
    if db::get_event(&state.pool, &event_id).await?.is_none() {
        return Err(AppError::NotFound("Event"));
    }
    if db::add_bookmark(&state.pool, &user_id, &event_id).await? {
        tracing::debug!("{} bookmarked {}", user_id, event_id);
    }
    Ok(Json(BookmarkResponse {
        event_id,
        bookmarked: true,
    }))
}

/// DELETE /api/events/{id}/bookmark - Removing a missing bookmark is not an error.
async fn remove(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(event_id): Path<String>,
) -> Result<Json<BookmarkResponse>, AppError> {
    db::remove_bookmark(&state.pool, &user_id, &event_id).await?;
    Ok(Json(BookmarkResponse {
        event_id,
        bookmarked: false,
    }))
}

async fn my_bookmarks(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<Vec<Event>>, AppError> {
    Ok(Json(db::list_bookmarked_events(&state.pool, &user_id).await?))
}
