use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::db;
use crate::error::AppError;
use crate::filter::{all_tags, filter_and_sort, FilterParams};
use crate::models::{CreateEventRequest, Event, EventQuery, GetEventsResponse, GetTagsResponse};
use crate::state::AppState;
use crate::user::CurrentUser;
use crate::validation::Validator;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/events", get(list_events).post(create_event))
        .route("/api/events/{id}", get(get_event).delete(delete_event))
        .route("/api/tags", get(list_tags))
}

/// GET /api/events?category=&search=&min_price=&max_price=&tags=&sort=
async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventQuery>,
) -> Result<Json<GetEventsResponse>, AppError> {
    let events = db::list_events(&state.pool).await?;
    let params = FilterParams::from(query);
    let events = filter_and_sort(&events, &params, &state.categories);

    Ok(Json(GetEventsResponse {
        total: events.len(),
        events,
    }))
}

/// GET /api/tags - Distinct tags across all events.
async fn list_tags(State(state): State<AppState>) -> Result<Json<GetTagsResponse>, AppError> {
    let events = db::list_events(&state.pool).await?;
    Ok(Json(GetTagsResponse {
        tags: all_tags(&events),
    }))
}

/// GET /api/events/{id}
async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Event>, AppError> {
    db::get_event(&state.pool, &id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Event"))
}

/// POST /api/events - Create an event organized by the caller.
async fn create_event(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(req): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<Event>), AppError> {
    Validator::validate_new_event(&req, &state.categories)?;

    let event = Event {
        id: Uuid::new_v4().to_string(),
        title: req.title.trim().to_string(),
        description: req.description,
        date: req.date.trim().to_string(),
        time: req.time,
        location: req.location.trim().to_string(),
        category: req.category,
        image_url: req.image_url,
        organizer_id: Some(user_id),
        organizer_name: None,
        price: req.price,
        attendees: 0,
        max_attendees: req.max_attendees,
        tags: req.tags.iter().map(|t| t.trim().to_string()).collect(),
        featured: req.featured,
        created_at: db::now_rfc3339(),
    };
    db::insert_event(&state.pool, &event).await?;
    tracing::info!("Created event {} ({})", event.id, event.title);

    let created = db::get_event(&state.pool, &event.id).await?;
    Ok((StatusCode::CREATED, Json(created.unwrap_or(event))))
}

/// DELETE /api/events/{id} - Organizers can delete their own events.
async fn delete_event(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !db::delete_event(&state.pool, &id, &user_id).await? {
        return Err(AppError::NotFound("Event"));
    }
    tracing::info!("Deleted event {}", id);
    Ok(StatusCode::NO_CONTENT)
}
