//! HTTP client against an in-process platform stub
//!
//! Each test starts an axum server on an ephemeral localhost port and points
//! `HttpApiClient` at it.

use std::time::Duration;

use axum::{
    extract::Path,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use vibes_invite::api::{ApiError, EventsApi, GuestsApi, HttpApiClient};
use vibes_invite::types::{EventCategory, EventDraft, NewGuest, RsvpStatus};

const TOKEN: &str = "test-token";

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", TOKEN))
}

async fn list_events(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "no token"})));
    }
    (
        StatusCode::OK,
        Json(json!({
            "data": [
                {
                    "_id": "665f1c",
                    "name_title": "Rooftop Launch",
                    "venue_name": "Sky Bar",
                    "date": "2025-07-15",
                    "time": "20:00",
                    "max_capacity": 100
                },
                { "event_id": 7, "name_title": "Gala" }
            ]
        })),
    )
}

async fn create_event(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["title"].as_str().unwrap_or_default().is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"message": "title is required"})),
        );
    }
    let mut created = body.clone();
    created["_id"] = json!("new-event");
    (StatusCode::CREATED, Json(json!({ "data": created })))
}

async fn participants(Path(event_id): Path<String>) -> (StatusCode, Json<Value>) {
    if event_id != "665f1c" {
        return (StatusCode::NOT_FOUND, Json(json!({"message": "no such event"})));
    }
    (
        StatusCode::OK,
        Json(json!([
            { "_id": "g1", "name": "Ana", "email": "ana@example.com", "invite_status": "accepted" },
            { "_id": 2, "email": "bo@example.com", "plus_ones": 1 }
        ])),
    )
}

async fn create_guest(Json(body): Json<Value>) -> Json<Value> {
    assert_eq!(body["event_id"], "665f1c");
    // the platform only echoes the new id
    Json(json!({ "data": { "guest_id": "g-new" } }))
}

async fn rate_limited() -> (StatusCode, HeaderMap, &'static str) {
    let mut headers = HeaderMap::new();
    headers.insert("retry-after", "30".parse().unwrap());
    (StatusCode::TOO_MANY_REQUESTS, headers, "slow down")
}

/// Serve the stub and return its base URL
async fn start_stub() -> String {
    let app = Router::new()
        .route("/api/events/getByAuth", get(list_events))
        .route("/api/events", post(create_event))
        .route("/api/events/:id/participants", get(participants))
        .route("/api/master/guest/create", post(create_guest))
        .route("/busy/api/events/getByAuth", get(rate_limited));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client(base_url: &str, token: Option<&str>) -> HttpApiClient {
    HttpApiClient::new(
        base_url,
        token.map(str::to_string),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn lists_events_in_platform_shape() {
    let base = start_stub().await;
    let events = client(&base, Some(TOKEN)).list_events().await.unwrap();

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].id, "665f1c");
    assert_eq!(events[0].title, "Rooftop Launch");
    assert_eq!(events[0].venue, "Sky Bar");
    assert_eq!(events[0].capacity, 100);
    assert_eq!(events[1].id, "7");
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let base = start_stub().await;
    let err = client(&base, None).list_events().await.unwrap_err();
    assert!(err.is_auth_error());
    assert!(matches!(err, ApiError::Unauthorized { .. }));
}

#[tokio::test]
async fn creates_event_from_draft() {
    let base = start_stub().await;
    let draft = EventDraft {
        title: "Test Party".to_string(),
        date: "2025-07-15".to_string(),
        time: "20:00".to_string(),
        venue: "Sky Bar".to_string(),
        category: Some(EventCategory::Party),
        capacity: Some(50),
        ..Default::default()
    };
    let event = client(&base, Some(TOKEN)).create_event(&draft).await.unwrap();

    assert_eq!(event.id, "new-event");
    assert_eq!(event.title, "Test Party");
    assert_eq!(event.venue, "Sky Bar");
}

#[tokio::test]
async fn rejected_draft_surfaces_server_message() {
    let base = start_stub().await;
    let err = client(&base, Some(TOKEN))
        .create_event(&EventDraft::default())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("title is required"));
}

#[tokio::test]
async fn lists_and_adapts_guests() {
    let base = start_stub().await;
    let guests = client(&base, Some(TOKEN)).list_guests("665f1c").await.unwrap();

    assert_eq!(guests.len(), 2);
    assert_eq!(guests[0].rsvp_status, RsvpStatus::Accepted);
    assert_eq!(guests[1].id, "2");
    assert_eq!(guests[1].name, "bo@example.com");
    assert_eq!(guests[1].plus_ones, 1);
}

#[tokio::test]
async fn unknown_event_is_not_found() {
    let base = start_stub().await;
    let err = client(&base, Some(TOKEN))
        .list_guests("missing")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));
}

#[tokio::test]
async fn invited_guest_keeps_typed_details() {
    let base = start_stub().await;
    let new_guest = NewGuest {
        name: "Cy".to_string(),
        email: "cy@example.com".to_string(),
        phone: Some("555-0100".to_string()),
        note: None,
    };
    let guest = client(&base, Some(TOKEN))
        .invite_guest("665f1c", &new_guest)
        .await
        .unwrap();

    assert_eq!(guest.id, "g-new");
    assert_eq!(guest.name, "Cy");
    assert_eq!(guest.email, "cy@example.com");
    assert_eq!(guest.phone.as_deref(), Some("555-0100"));
}

#[tokio::test]
async fn rate_limit_reads_retry_after() {
    let base = start_stub().await;
    let err = client(&format!("{}/busy", base), Some(TOKEN))
        .list_events()
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::RateLimited {
            endpoint: "/api/events/getByAuth".to_string(),
            retry_after_secs: Some(30),
        }
    );
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    // port 9 (discard) on localhost is never served by the stub
    let err = client("http://127.0.0.1:9", Some(TOKEN))
        .list_events()
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NetworkError { .. }));
}
