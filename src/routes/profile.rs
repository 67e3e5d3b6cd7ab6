use axum::{extract::State, routing::get, Json, Router};

use crate::db;
use crate::error::AppError;
use crate::models::{Profile, RoleBody, UpdateProfileRequest};
use crate::state::AppState;
use crate::user::CurrentUser;
use crate::validation::Validator;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/me/profile", get(get_profile).put(put_profile))
        .route("/api/me/role", get(get_role).put(put_role))
}

async fn get_profile(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<Profile>, AppError> {
    db::get_profile(&state.pool, &user_id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Profile"))
}

/// PUT /api/me/profile - Create the profile on first use, then apply the update.
async fn put_profile(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<Profile>, AppError> {
    Validator::validate_profile_update(&req)?;

    let synced = db::sync_profile(
        &state.pool,
        &user_id,
        req.email.as_deref(),
        req.first_name.as_deref(),
        req.last_name.as_deref(),
    )
    .await?;

    let profile = db::update_profile(&state.pool, &user_id, &req)
        .await?
        .unwrap_or(synced);
    Ok(Json(profile))
}

async fn get_role(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<RoleBody>, AppError> {
    let role = db::get_role(&state.pool, &user_id).await?;
    Ok(Json(RoleBody { role }))
}

async fn put_role(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(body): Json<RoleBody>,
) -> Result<Json<RoleBody>, AppError> {
    db::set_role(&state.pool, &user_id, body.role).await?;
    tracing::info!("{} is now {}", user_id, body.role.as_str());
    Ok(Json(body))
}
