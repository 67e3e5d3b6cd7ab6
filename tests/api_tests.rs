use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use eventhub::{
    create_router, db, fixtures, init_pool, run_migrations, AppState, CategoryCatalog,
};

/// Create a test app with in-memory database seeded with the demo events.
async fn create_test_app() -> axum::Router {
    let pool = init_pool("sqlite::memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();
    db::seed_if_empty(&pool, &fixtures::demo_events()).await.unwrap();

    let state = AppState::new(pool, CategoryCatalog::default(), Duration::ZERO);
    create_router(state)
}

/// Helper to get response body as string.
async fn body_string(body: Body) -> String {
    let bytes = body.collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_string(response.into_body()).await)
}

async fn get_json(app: &axum::Router, uri: &str, user: Option<&str>) -> serde_json::Value {
    let mut builder = Request::builder().uri(uri);
    if let Some(user) = user {
        builder = builder.header("X-User-Id", user);
    }
    let (status, body) = send(app, builder.body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK, "GET {} -> {}", uri, body);
    serde_json::from_str(&body).unwrap()
}

fn request(method: &str, uri: &str, user: &str, body: Option<&str>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("X-User-Id", user)
        .header("Content-Type", "application/json");
    match body {
        Some(b) => builder.body(Body::from(b.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

fn ids(json: &serde_json::Value) -> Vec<String> {
    json["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap().to_string())
        .collect()
}

// ============================================================================
// Health endpoint tests
// ============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app().await;

    let (status, body) = send(
        &app,
        Request::builder().uri("/health").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

// ============================================================================
// Listing tests
// ============================================================================

#[tokio::test]
async fn test_list_events_featured_first() {
    let app = create_test_app().await;

    let json = get_json(&app, "/api/events", None).await;

    assert_eq!(json["total"], 8);
    assert_eq!(ids(&json), ["1", "2", "4", "3", "5", "6", "7", "8"]);
}

#[tokio::test]
async fn test_list_events_with_filters() {
    let app = create_test_app().await;

    let json = get_json(&app, "/api/events?min_price=0&max_price=100&sort=price-high", None).await;
    assert_eq!(ids(&json), ["6", "3", "7", "5"]);

    let json = get_json(&app, "/api/events?tags=Festival&sort=date", None).await;
    assert_eq!(ids(&json), ["2", "3"]);

    let json = get_json(&app, "/api/events?search=convention&sort=popularity", None).await;
    assert_eq!(ids(&json), ["1", "8"]);
}

#[tokio::test]
async fn test_list_events_malformed_params_are_ignored() {
    let app = create_test_app().await;

    let json = get_json(
        &app,
        "/api/events?min_price=cheap&sort=sideways&category=nonsense",
        None,
    )
    .await;
    assert_eq!(json["total"], 8);
}

#[tokio::test]
async fn test_list_tags() {
    let app = create_test_app().await;

    let json = get_json(&app, "/api/tags", None).await;
    let tags = json["tags"].as_array().unwrap();
    assert_eq!(tags.len(), 14);
    assert_eq!(tags[0], "Art");
}

// ============================================================================
// Category tests
// ============================================================================

#[tokio::test]
async fn test_list_categories() {
    let app = create_test_app().await;

    let json = get_json(&app, "/api/categories", None).await;
    let categories = json["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 8);
    assert_eq!(categories[0]["slug"], "music");
}

#[tokio::test]
async fn test_category_page() {
    let app = create_test_app().await;

    let json = get_json(&app, "/api/categories/business/events?sort=price-low", None).await;
    assert_eq!(json["category"]["title"], "Business Events");
    assert_eq!(ids(&json), ["8", "4"]);

    let json = get_json(&app, "/api/categories/all/events", None).await;
    assert!(json["category"].is_null());
    assert_eq!(json["total"], 8);
}

// ============================================================================
// Event CRUD tests
// ============================================================================

const NEW_EVENT: &str = r#"{
    "title": "Rust Workshop",
    "description": "Hands-on ownership and borrowing",
    "date": "2025-09-01",
    "time": "10:00 AM",
    "location": "Library Hall",
    "category": "Education",
    "price": 20,
    "max_attendees": 1,
    "tags": ["Workshop", "Rust"]
}"#;

#[tokio::test]
async fn test_get_event_detail() {
    let app = create_test_app().await;

    let json = get_json(&app, "/api/events/2", None).await;
    assert_eq!(json["title"], "Summer Music Festival");
    assert_eq!(json["featured"], true);

    let (status, _) = send(
        &app,
        Request::builder()
            .uri("/api/events/404")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_event() {
    let app = create_test_app().await;

    send(
        &app,
        request(
            "PUT",
            "/api/me/profile",
            "org-1",
            Some(r#"{"first_name": "Grace", "last_name": "Hopper"}"#),
        ),
    )
    .await;

    let (status, body) = send(&app, request("POST", "/api/events", "org-1", Some(NEW_EVENT))).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["title"], "Rust Workshop");
    assert_eq!(json["organizer_id"], "org-1");
    assert_eq!(json["organizer_name"], "Grace Hopper");
    assert_eq!(json["attendees"], 0);

    let listing = get_json(&app, "/api/categories/education/events", None).await;
    assert_eq!(listing["total"], 1);
}

#[tokio::test]
async fn test_create_event_requires_user() {
    let app = create_test_app().await;

    let (status, _) = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/api/events")
            .header("Content-Type", "application/json")
            .body(Body::from(NEW_EVENT))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_event_validation() {
    let app = create_test_app().await;

    let bad_category = NEW_EVENT.replace("Education", "Gardening");
    let (status, body) =
        send(&app, request("POST", "/api/events", "org-1", Some(&bad_category))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Unknown category"));

    let negative = NEW_EVENT.replace("\"price\": 20", "\"price\": -20");
    let (status, _) = send(&app, request("POST", "/api/events", "org-1", Some(&negative))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_event_only_by_owner() {
    let app = create_test_app().await;

    let (_, body) = send(&app, request("POST", "/api/events", "org-1", Some(NEW_EVENT))).await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    let uri = format!("/api/events/{}", json["id"].as_str().unwrap());

    let (status, _) = send(&app, request("DELETE", &uri, "org-2", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, request("DELETE", &uri, "org-1", None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let json = get_json(&app, "/api/events", None).await;
    assert_eq!(json["total"], 8);
}

// ============================================================================
// Ticket tests
// ============================================================================

#[tokio::test]
async fn test_purchase_ticket() {
    let app = create_test_app().await;

    let (status, body) = send(&app, request("POST", "/api/events/5/tickets", "u1", None)).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["ticket"]["event_id"], "5");
    assert!(json["ticket"]["qr_code"]
        .as_str()
        .unwrap()
        .starts_with("EVENTHUB-5-"));
    assert_eq!(json["chat_room"]["event_id"], "5");

    let tickets = get_json(&app, "/api/me/tickets", Some("u1")).await;
    assert_eq!(tickets.as_array().unwrap().len(), 1);

    let event = get_json(&app, "/api/events/5", None).await;
    assert_eq!(event["attendees"], 86);
}

#[tokio::test]
async fn test_chat_room_opens_with_first_sale() {
    let app = create_test_app().await;

    let (status, _) = send(&app, request("GET", "/api/events/5/chat-room", "u1", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, request("POST", "/api/events/5/tickets", "u1", None)).await;
    let purchase: serde_json::Value = serde_json::from_str(&body).unwrap();

    let room = get_json(&app, "/api/events/5/chat-room", Some("u2")).await;
    assert_eq!(room["event_id"], "5");
    assert_eq!(room["id"], purchase["chat_room"]["id"]);
}

#[tokio::test]
async fn test_purchase_sold_out_and_missing() {
    let app = create_test_app().await;

    let (_, body) = send(&app, request("POST", "/api/events", "org-1", Some(NEW_EVENT))).await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    let uri = format!("/api/events/{}/tickets", json["id"].as_str().unwrap());

    let (status, _) = send(&app, request("POST", &uri, "u1", None)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(&app, request("POST", &uri, "u2", None)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, request("POST", "/api/events/404/tickets", "u1", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Bookmark tests
// ============================================================================

#[tokio::test]
async fn test_bookmarks_are_idempotent() {
    let app = create_test_app().await;

    let state = get_json(&app, "/api/events/3/bookmark", Some("u1")).await;
    assert_eq!(state["bookmarked"], false);

    for _ in 0..2 {
        let (status, body) = send(&app, request("PUT", "/api/events/3/bookmark", "u1", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"bookmarked\":true"));
    }

    let bookmarks = get_json(&app, "/api/me/bookmarks", Some("u1")).await;
    assert_eq!(bookmarks.as_array().unwrap().len(), 1);
    assert_eq!(bookmarks[0]["id"], "3");

    let (status, _) = send(&app, request("DELETE", "/api/events/3/bookmark", "u1", None)).await;
    assert_eq!(status, StatusCode::OK);

    let state = get_json(&app, "/api/events/3/bookmark", Some("u1")).await;
    assert_eq!(state["bookmarked"], false);
}

#[tokio::test]
async fn test_bookmark_missing_event() {
    let app = create_test_app().await;

    let (status, _) = send(&app, request("PUT", "/api/events/404/bookmark", "u1", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Profile, role, and dashboard tests
// ============================================================================

#[tokio::test]
async fn test_profile_lifecycle() {
    let app = create_test_app().await;

    let (status, _) = send(&app, request("GET", "/api/me/profile", "u1", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        request(
            "PUT",
            "/api/me/profile",
            "u1",
            Some(r#"{"first_name": "Ada", "email": "ada@example.com"}"#),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["first_name"], "Ada");

    send(
        &app,
        request("PUT", "/api/me/profile", "u1", Some(r#"{"last_name": "Lovelace"}"#)),
    )
    .await;

    let profile = get_json(&app, "/api/me/profile", Some("u1")).await;
    assert_eq!(profile["first_name"], "Ada");
    assert_eq!(profile["last_name"], "Lovelace");
    assert_eq!(profile["email"], "ada@example.com");
}

#[tokio::test]
async fn test_role_defaults_to_attendee() {
    let app = create_test_app().await;

    let json = get_json(&app, "/api/me/role", Some("u1")).await;
    assert_eq!(json["role"], "attendee");

    let (status, _) = send(
        &app,
        request("PUT", "/api/me/role", "u1", Some(r#"{"role": "organizer"}"#)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let json = get_json(&app, "/api/me/role", Some("u1")).await;
    assert_eq!(json["role"], "organizer");

    let (status, _) = send(
        &app,
        request("PUT", "/api/me/role", "u1", Some(r#"{"role": "admin"}"#)),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_attendee_dashboard() {
    let app = create_test_app().await;

    let future = NEW_EVENT.replace("2025-09-01", "2099-09-01");
    let (_, body) = send(&app, request("POST", "/api/events", "org-1", Some(&future))).await;
    let created: serde_json::Value = serde_json::from_str(&body).unwrap();
    let future_id = created["id"].as_str().unwrap().to_string();

    send(&app, request("POST", "/api/events/7/tickets", "u1", None)).await;
    send(&app, request("POST", "/api/events/1/tickets", "u1", None)).await;
    let uri = format!("/api/events/{}/tickets", future_id);
    send(&app, request("POST", &uri, "u1", None)).await;

    let json = get_json(&app, "/api/me/dashboard", Some("u1")).await;
    assert_eq!(json["role"], "attendee");

    let list = |key: &str| -> Vec<String> {
        json[key]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["id"].as_str().unwrap().to_string())
            .collect()
    };

    // The demo events all took place in 2025
    assert_eq!(list("upcoming"), [future_id]);
    assert_eq!(list("past"), ["1", "7"]);
    assert_eq!(list("suggested"), ["2", "3", "4", "5"]);
}

#[tokio::test]
async fn test_organizer_dashboard() {
    let app = create_test_app().await;

    send(
        &app,
        request("PUT", "/api/me/role", "org-1", Some(r#"{"role": "organizer"}"#)),
    )
    .await;
    let (_, body) = send(&app, request("POST", "/api/events", "org-1", Some(NEW_EVENT))).await;
    let created: serde_json::Value = serde_json::from_str(&body).unwrap();
    let uri = format!("/api/events/{}/tickets", created["id"].as_str().unwrap());
    send(&app, request("POST", &uri, "u1", None)).await;

    let json = get_json(&app, "/api/me/dashboard", Some("org-1")).await;
    assert_eq!(json["role"], "organizer");
    let events = json["events"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["title"], "Rust Workshop");
    assert_eq!(events[0]["tickets_sold"], 1);
}

#[tokio::test]
async fn test_me_endpoints_require_user() {
    let app = create_test_app().await;

    for uri in ["/api/me/tickets", "/api/me/bookmarks", "/api/me/dashboard", "/api/me/role"] {
        let (status, _) = send(
            &app,
            Request::builder().uri(uri).body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
    }
}
