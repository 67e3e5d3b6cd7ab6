use chrono::{SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

use crate::models::{ChatRoom, Event, EventRow, Profile, Role, Ticket, UpdateProfileRequest};

/// Current time as an RFC 3339 string with millisecond precision.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Initialize database connection pool with recommended pragmas.
pub async fn init_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(5))
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

    // In-memory databases share a cache across connections, where writers
    // lock each other out instead of waiting.
    let max_connections = if database_url.contains(":memory:") { 1 } else { 10 };

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Run database migrations.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(include_str!("../migrations/001_create_tables.sql"))
        .execute(pool)
        .await?;
    Ok(())
}

const SELECT_EVENTS: &str = r#"
    SELECT e.id, e.title, e.description, e.date, e.time, e.location, e.category,
           e.image_url, e.organizer_id,
           NULLIF(TRIM(COALESCE(p.first_name, '') || ' ' || COALESCE(p.last_name, '')), '')
               AS organizer_name,
           e.price, e.attendees, e.max_attendees, e.tags, e.featured, e.created_at
    FROM events e
    LEFT JOIN profiles p ON p.id = e.organizer_id
"#;

/// Insert an event. Fails if the id is taken.
pub async fn insert_event(pool: &SqlitePool, event: &Event) -> Result<(), sqlx::Error> {
    let tags = serde_json::to_string(&event.tags)
        .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

    sqlx::query(
        r#"
        INSERT INTO events (id, title, description, date, time, location, category,
                            image_url, organizer_id, price, attendees, max_attendees,
                            tags, featured, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&event.id)
    .bind(&event.title)
    .bind(&event.description)
    .bind(&event.date)
    .bind(&event.time)
    .bind(&event.location)
    .bind(&event.category)
    .bind(&event.image_url)
    .bind(&event.organizer_id)
    .bind(event.price)
    .bind(event.attendees)
    .bind(event.max_attendees)
    .bind(tags)
    .bind(event.featured)
    .bind(&event.created_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get a single event, with the organizer's name resolved from profiles.
pub async fn get_event(pool: &SqlitePool, id: &str) -> Result<Option<Event>, sqlx::Error> {
    let row = sqlx::query_as::<_, EventRow>(&format!("{} WHERE e.id = ?", SELECT_EVENTS))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(Event::from))
}

/// All events, in insertion order.
pub async fn list_events(pool: &SqlitePool) -> Result<Vec<Event>, sqlx::Error> {
    let rows = sqlx::query_as::<_, EventRow>(&format!("{} ORDER BY e.rowid ASC", SELECT_EVENTS))
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(Event::from).collect())
}

/// Events created by one organizer, in insertion order.
pub async fn list_events_by_organizer(
    pool: &SqlitePool,
    organizer_id: &str,
) -> Result<Vec<Event>, sqlx::Error> {
    let rows = sqlx::query_as::<_, EventRow>(&format!(
        "{} WHERE e.organizer_id = ? ORDER BY e.rowid ASC",
        SELECT_EVENTS
    ))
    .bind(organizer_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Event::from).collect())
}

/// Events the user holds at least one ticket for.
pub async fn list_ticketed_events(
    pool: &SqlitePool,
    user_id: &str,
) -> Result<Vec<Event>, sqlx::Error> {
    let rows = sqlx::query_as::<_, EventRow>(&format!(
        "{} WHERE e.id IN (SELECT event_id FROM tickets WHERE user_id = ?) ORDER BY e.rowid ASC",
        SELECT_EVENTS
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Event::from).collect())
}

/// Events the user has bookmarked, most recent bookmark first.
pub async fn list_bookmarked_events(
    pool: &SqlitePool,
    user_id: &str,
) -> Result<Vec<Event>, sqlx::Error> {
    let rows = sqlx::query_as::<_, EventRow>(&format!(
        "{} JOIN bookmarks b ON b.event_id = e.id WHERE b.user_id = ? \
         ORDER BY b.created_at DESC, e.rowid ASC",
        SELECT_EVENTS
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Event::from).collect())
}

/// Delete an event owned by `organizer_id`. Returns true if a row was removed.
pub async fn delete_event(
    pool: &SqlitePool,
    id: &str,
    organizer_id: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM events WHERE id = ? AND organizer_id = ?")
        .bind(id)
        .bind(organizer_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn count_events(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM events")
        .fetch_one(pool)
        .await
}

/// Insert the given events if the table is empty. Returns how many were inserted.
pub async fn seed_if_empty(pool: &SqlitePool, events: &[Event]) -> Result<usize, sqlx::Error> {
    if count_events(pool).await? > 0 {
        return Ok(0);
    }
    for event in events {
        insert_event(pool, event).await?;
    }
    Ok(events.len())
}

/// Issue a ticket, bumping the event's attendee count.
///
/// Returns `None` when the event does not exist or has no seats left.
pub async fn insert_ticket(
    pool: &SqlitePool,
    user_id: &str,
    event_id: &str,
    qr_code: &str,
) -> Result<Option<Ticket>, sqlx::Error> {
    let id = uuid::Uuid::new_v4().to_string();
    let created_at = now_rfc3339();

    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        INSERT INTO tickets (id, user_id, event_id, qr_code, created_at)
        SELECT ?, ?, e.id, ?, ?
        FROM events e
        WHERE e.id = ?
          AND (e.max_attendees IS NULL
               OR (SELECT COUNT(*) FROM tickets t WHERE t.event_id = e.id) < e.max_attendees)
        "#,
    )
    .bind(&id)
    .bind(user_id)
    .bind(qr_code)
    .bind(&created_at)
    .bind(event_id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        tx.rollback().await?;
        return Ok(None);
    }

    sqlx::query("UPDATE events SET attendees = attendees + 1 WHERE id = ?")
        .bind(event_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(Some(Ticket {
        id,
        user_id: user_id.to_string(),
        event_id: event_id.to_string(),
        qr_code: qr_code.to_string(),
        created_at,
    }))
}

pub async fn list_tickets_for_user(
    pool: &SqlitePool,
    user_id: &str,
) -> Result<Vec<Ticket>, sqlx::Error> {
    sqlx::query_as::<_, Ticket>(
        r#"
        SELECT id, user_id, event_id, qr_code, created_at
        FROM tickets
        WHERE user_id = ?
        ORDER BY created_at ASC, rowid ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn count_tickets_for_event(
    pool: &SqlitePool,
    event_id: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM tickets WHERE event_id = ?")
        .bind(event_id)
        .fetch_one(pool)
        .await
}

/// Bookmark an event. Returns true if the bookmark is new.
pub async fn add_bookmark(
    pool: &SqlitePool,
    user_id: &str,
    event_id: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO bookmarks (user_id, event_id, created_at)
        VALUES (?, ?, ?)
        ON CONFLICT(user_id, event_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(event_id)
    .bind(now_rfc3339())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Remove a bookmark. Returns true if one existed.
pub async fn remove_bookmark(
    pool: &SqlitePool,
    user_id: &str,
    event_id: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM bookmarks WHERE user_id = ? AND event_id = ?")
        .bind(user_id)
        .bind(event_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn is_bookmarked(
    pool: &SqlitePool,
    user_id: &str,
    event_id: &str,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM bookmarks WHERE user_id = ? AND event_id = ?)")
        .bind(user_id)
        .bind(event_id)
        .fetch_one(pool)
        .await
}

/// Create the event's chat room if it has none, and return it.
pub async fn upsert_chat_room(pool: &SqlitePool, event_id: &str) -> Result<ChatRoom, sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO chat_rooms (id, event_id, created_at)
        VALUES (?, ?, ?)
        ON CONFLICT(event_id) DO NOTHING
        "#,
    )
    .bind(uuid::Uuid::new_v4().to_string())
    .bind(event_id)
    .bind(now_rfc3339())
    .execute(pool)
    .await?;

    sqlx::query_as::<_, ChatRoom>("SELECT id, event_id, created_at FROM chat_rooms WHERE event_id = ?")
        .bind(event_id)
        .fetch_one(pool)
        .await
}

pub async fn get_chat_room(
    pool: &SqlitePool,
    event_id: &str,
) -> Result<Option<ChatRoom>, sqlx::Error> {
    sqlx::query_as::<_, ChatRoom>("SELECT id, event_id, created_at FROM chat_rooms WHERE event_id = ?")
        .bind(event_id)
        .fetch_optional(pool)
        .await
}

pub async fn get_profile(pool: &SqlitePool, id: &str) -> Result<Option<Profile>, sqlx::Error> {
    sqlx::query_as::<_, Profile>(
        "SELECT id, first_name, last_name, email, avatar_url, created_at FROM profiles WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Make sure a profile exists for an authenticated user.
///
/// A missing profile is created from the given details. An existing one only
/// has its email filled in if it had none.
pub async fn sync_profile(
    pool: &SqlitePool,
    id: &str,
    email: Option<&str>,
    first_name: Option<&str>,
    last_name: Option<&str>,
) -> Result<Profile, sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO profiles (id, first_name, last_name, email, created_at)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET email = COALESCE(profiles.email, excluded.email)
        "#,
    )
    .bind(id)
    .bind(first_name)
    .bind(last_name)
    .bind(email)
    .bind(now_rfc3339())
    .execute(pool)
    .await?;

    sqlx::query_as::<_, Profile>(
        "SELECT id, first_name, last_name, email, avatar_url, created_at FROM profiles WHERE id = ?",
    )
    .bind(id)
    .fetch_one(pool)
    .await
}

/// Apply a partial update. Returns `None` if the profile does not exist.
pub async fn update_profile(
    pool: &SqlitePool,
    id: &str,
    update: &UpdateProfileRequest,
) -> Result<Option<Profile>, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE profiles
        SET first_name = COALESCE(?, first_name),
            last_name  = COALESCE(?, last_name),
            email      = COALESCE(?, email),
            avatar_url = COALESCE(?, avatar_url)
        WHERE id = ?
        "#,
    )
    .bind(&update.first_name)
    .bind(&update.last_name)
    .bind(&update.email)
    .bind(&update.avatar_url)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    get_profile(pool, id).await
}

/// The user's role; users without an assignment are attendees.
pub async fn get_role(pool: &SqlitePool, user_id: &str) -> Result<Role, sqlx::Error> {
    let role: Option<String> = sqlx::query_scalar("SELECT role FROM user_roles WHERE user_id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(role.as_deref().and_then(Role::parse).unwrap_or_default())
}

pub async fn set_role(pool: &SqlitePool, user_id: &str, role: Role) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO user_roles (user_id, role)
        VALUES (?, ?)
        ON CONFLICT(user_id) DO UPDATE SET role = excluded.role
        "#,
    )
    .bind(user_id)
    .bind(role.as_str())
    .execute(pool)
    .await?;

    Ok(())
}
