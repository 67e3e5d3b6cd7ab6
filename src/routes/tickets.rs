use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::db;
use crate::error::AppError;
use crate::models::{ChatRoom, PurchaseResponse, Ticket};
use crate::payment;
use crate::state::AppState;
use crate::user::CurrentUser;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/events/{id}/tickets", post(purchase))
        .route("/api/events/{id}/chat-room", get(chat_room))
        .route("/api/me/tickets", get(my_tickets))
}

/// POST /api/events/{id}/tickets - Buy a ticket through the simulated checkout.
async fn purchase(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(event_id): Path<String>,
) -> Result<(StatusCode, Json<PurchaseResponse>), AppError> {
    let response =
        payment::purchase_ticket(&state.pool, &user_id, &event_id, state.payment_delay).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/events/{id}/chat-room - The room opened by the event's first sale.
async fn chat_room(
    State(state): State<AppState>,
    CurrentUser(_): CurrentUser,
    Path(event_id): Path<String>,
) -> Result<Json<ChatRoom>, AppError> {
    db::get_chat_room(&state.pool, &event_id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Chat room"))
}

/// GET /api/me/tickets
async fn my_tickets(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<Vec<Ticket>>, AppError> {
    Ok(Json(db::list_tickets_for_user(&state.pool, &user_id).await?))
}
