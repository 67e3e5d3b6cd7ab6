use serde::{Deserialize, Serialize};

use crate::category::Category;

/// An event as listed, filtered, and sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: String,
    #[serde(default)]
    pub time: String,
    pub location: String,
    pub category: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub organizer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer_name: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub attendees: i64,
    #[serde(default)]
    pub max_attendees: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub created_at: String,
}

/// Row shape of the `events` table; tags are stored as a JSON array.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub category: String,
    pub image_url: String,
    pub organizer_id: Option<String>,
    pub organizer_name: Option<String>,
    pub price: f64,
    pub attendees: i64,
    pub max_attendees: Option<i64>,
    pub tags: String,
    pub featured: bool,
    pub created_at: String,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        let tags = serde_json::from_str(&row.tags).unwrap_or_else(|e| {
            tracing::warn!("Event {} has malformed tags: {}", row.id, e);
            Vec::new()
        });

        Event {
            id: row.id,
            title: row.title,
            description: row.description,
            date: row.date,
            time: row.time,
            location: row.location,
            category: row.category,
            image_url: row.image_url,
            organizer_id: row.organizer_id,
            organizer_name: row.organizer_name,
            price: row.price,
            attendees: row.attendees,
            max_attendees: row.max_attendees,
            tags,
            featured: row.featured,
            created_at: row.created_at,
        }
    }
}

/// Request to create a new event.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub date: String,
    #[serde(default)]
    pub time: String,
    pub location: String,
    pub category: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub price: f64,
    pub max_attendees: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured: bool,
}

/// Query parameters for event listings.
///
/// Numbers arrive as strings so a malformed bound degrades to "no bound"
/// instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct EventQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    /// Comma separated.
    pub tags: Option<String>,
    pub sort: Option<String>,
}

/// Response for event listings.
#[derive(Debug, Serialize)]
pub struct GetEventsResponse {
    pub total: usize,
    pub events: Vec<Event>,
}

/// Response for a category page.
#[derive(Debug, Serialize)]
pub struct GetCategoryEventsResponse {
    /// `None` for the "all" pseudo-category or an unknown slug.
    pub category: Option<Category>,
    pub total: usize,
    pub events: Vec<Event>,
}

#[derive(Debug, Serialize)]
pub struct GetCategoriesResponse {
    pub categories: Vec<Category>,
}

#[derive(Debug, Serialize)]
pub struct GetTagsResponse {
    pub tags: Vec<String>,
}

/// A purchased ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Ticket {
    pub id: String,
    pub user_id: String,
    pub event_id: String,
    pub qr_code: String,
    pub created_at: String,
}

/// The per-event chat room, created on first ticket purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ChatRoom {
    pub id: String,
    pub event_id: String,
    pub created_at: String,
}

/// Response for a ticket purchase.
#[derive(Debug, Serialize)]
pub struct PurchaseResponse {
    pub ticket: Ticket,
    pub chat_room: Option<ChatRoom>,
}

#[derive(Debug, Serialize)]
pub struct BookmarkResponse {
    pub event_id: String,
    pub bookmarked: bool,
}

/// User profile, keyed by the auth provider's user id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Profile {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: String,
}

/// Partial profile update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Attendee,
    Organizer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Attendee => "attendee",
            Role::Organizer => "organizer",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "attendee" => Some(Role::Attendee),
            "organizer" => Some(Role::Organizer),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RoleBody {
    pub role: Role,
}

/// An organizer's event with its sales.
#[derive(Debug, Serialize)]
pub struct OrganizerEvent {
    #[serde(flatten)]
    pub event: Event,
    pub tickets_sold: i64,
}

/// Dashboard contents, shaped by the caller's role.
#[derive(Debug, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum DashboardResponse {
    Attendee {
        upcoming: Vec<Event>,
        past: Vec<Event>,
        suggested: Vec<Event>,
    },
    Organizer {
        events: Vec<OrganizerEvent>,
    },
}
