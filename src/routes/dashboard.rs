use axum::{extract::State, routing::get, Json, Router};
use chrono::{NaiveDate, Utc};

use crate::db;
use crate::error::AppError;
use crate::filter::{filter_and_sort, parse_event_date, FilterParams, SortOption};
use crate::models::{DashboardResponse, Event, OrganizerEvent, Role};
use crate::state::AppState;
use crate::user::CurrentUser;

/// Events suggested on an attendee's dashboard.
const SUGGESTED_EVENTS: usize = 4;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/me/dashboard", get(dashboard))
}

/// GET /api/me/dashboard - Attendees see their tickets, organizers their events.
async fn dashboard(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<DashboardResponse>, AppError> {
    let response = match db::get_role(&state.pool, &user_id).await? {
        Role::Attendee => {
            let by_date = FilterParams::default().sort(SortOption::Date);
            let ticketed = db::list_ticketed_events(&state.pool, &user_id).await?;
            let ticketed = filter_and_sort(&ticketed, &by_date, &state.categories);

            let suggested = db::list_events(&state.pool)
                .await?
                .into_iter()
                .filter(|e| !ticketed.iter().any(|t| t.id == e.id))
                .take(SUGGESTED_EVENTS)
                .collect();

            let (upcoming, past) = split_by_date(ticketed, Utc::now().date_naive());
            DashboardResponse::Attendee {
                upcoming,
                past,
                suggested,
            }
        }
        Role::Organizer => {
            let mut events = Vec::new();
            for event in db::list_events_by_organizer(&state.pool, &user_id).await? {
                let tickets_sold = db::count_tickets_for_event(&state.pool, &event.id).await?;
                events.push(OrganizerEvent {
                    event,
                    tickets_sold,
                });
            }
            DashboardResponse::Organizer { events }
        }
    };

    Ok(Json(response))
}

/// Split events into those on or after `today` and those before it.
/// An event whose date cannot be parsed counts as upcoming.
fn split_by_date(events: Vec<Event>, today: NaiveDate) -> (Vec<Event>, Vec<Event>) {
    events
        .into_iter()
        .partition(|e| parse_event_date(&e.date).map_or(true, |d| d >= today))
}
