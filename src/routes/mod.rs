pub mod bookmarks;
pub mod categories;
pub mod dashboard;
pub mod events;
pub mod health;
pub mod profile;
pub mod tickets;

use axum::Router;

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(events::routes())
        .merge(categories::routes())
        .merge(tickets::routes())
        .merge(bookmarks::routes())
        .merge(profile::routes())
        .merge(dashboard::routes())
        .merge(health::routes())
        .with_state(state)
}
