//! Simulated ticket checkout.
//!
//! There is no payment provider. A "scan" yields a generated QR code, the
//! configured delay stands in for processing, and then the ticket is issued.

use std::time::Duration;

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::db;
use crate::error::AppError;
use crate::models::PurchaseResponse;

/// Code a simulated QR scan produces for an event.
pub fn scan_qr_code(event_id: &str) -> String {
    format!("EVENTHUB-{}-{}", event_id, Uuid::new_v4())
}

/// Buy one ticket to `event_id` for `user_id`.
pub async fn purchase_ticket(
    pool: &SqlitePool,
    user_id: &str,
    event_id: &str,
    delay: Duration,
) -> Result<PurchaseResponse, AppError> {
    let event = db::get_event(pool, event_id)
        .await?
        .ok_or(AppError::NotFound("Event"))?;

    if let Some(capacity) = event.max_attendees {
        if db::count_tickets_for_event(pool, event_id).await? >= capacity {
            return Err(AppError::SoldOut);
        }
    }

    let qr_code = scan_qr_code(event_id);
    tracing::debug!("Processing payment of {} for event {}", event.price, event_id);
    tokio::time::sleep(delay).await;

    // Seats may have gone while we waited
    let ticket = db::insert_ticket(pool, user_id, event_id, &qr_code)
        .await?
        .ok_or(AppError::SoldOut)?;

    let chat_room = match db::upsert_chat_room(pool, event_id).await {
        Ok(room) => Some(room),
        Err(e) => {
            tracing::error!("Failed to create chat room for event {}: {}", event_id, e);
            None
        }
    };

    tracing::info!("Issued ticket {} for event {} to {}", ticket.id, event_id, user_id);

    Ok(PurchaseResponse { ticket, chat_room })
}
