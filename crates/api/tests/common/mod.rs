//! Shared harness for HTTP integration tests.
//!
//! Builds the production router over a `#[sqlx::test]` pool, mints tokens
//! with the test secret, and seeds catalog and membership rows.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use camara_api::auth::jwt::{generate_access_token, JwtConfig};
use camara_api::config::ServerConfig;
use camara_api::router::build_app_router;
use camara_api::state::AppState;
use camara_core::booking::BookingRules;
use camara_core::roles::{ROLE_MEMBER, ROLE_STAFF, ROLE_USER};
use camara_core::types::{DbId, Timestamp};
use camara_db::models::member::UpsertMember;
use camara_db::models::place::CreatePlace;
use camara_db::models::place_type::CreatePlaceType;
use camara_db::repositories::{MemberRepo, PlaceRepo, PlaceTypeRepo};
use chrono::{Duration, NaiveTime, Utc};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tower::ServiceExt;

pub const STAFF_ID: DbId = 1;
pub const MEMBER_ID: DbId = 10;
pub const OTHER_MEMBER_ID: DbId = 11;
pub const NON_MEMBER_ID: DbId = 20;

/// Build a test `ServerConfig` with safe defaults and UTC booking rules.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
        booking: BookingRules::default(),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    build_app_router(AppState::new(pool, config.clone()), &config)
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

fn token(user_id: DbId, role: &str) -> String {
    generate_access_token(user_id, "Test User", role, &test_config().jwt).unwrap()
}

pub fn staff_token() -> String {
    token(STAFF_ID, ROLE_STAFF)
}

pub fn member_token(user_id: DbId) -> String {
    token(user_id, ROLE_MEMBER)
}

pub fn user_token(user_id: DbId) -> String {
    token(user_id, ROLE_USER)
}

// ---------------------------------------------------------------------------
// Seed data
// ---------------------------------------------------------------------------

/// Enroll `user_id` as an active member.
pub async fn enroll_member(pool: &PgPool, user_id: DbId) {
    MemberRepo::upsert(
        pool,
        &UpsertMember {
            user_id,
            display_name: format!("Member {user_id}"),
            is_active: true,
        },
    )
    .await
    .unwrap();
}

/// "Meeting Room" type (capacity 12, 25.00/h) with one place; returns
/// `(place_type_id, place_id)`.
pub async fn seed_meeting_room(pool: &PgPool) -> (DbId, DbId) {
    let place_type = PlaceTypeRepo::create(
        pool,
        &CreatePlaceType {
            name: "Meeting Room".to_string(),
            description: Some("Rooms for board meetings".to_string()),
            max_capacity: 12,
            price_per_hour: Decimal::new(2500, 2),
        },
    )
    .await
    .unwrap();

    let place = PlaceRepo::create(
        pool,
        &CreatePlace {
            place_type_id: place_type.id,
            name: "Sala Directorio".to_string(),
            location: Some("Second floor".to_string()),
            description: None,
            equipment: Some("Projector, whiteboard".to_string()),
        },
    )
    .await
    .unwrap();

    (place_type.id, place.id)
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// `hour:minute` UTC, `days` from today.
pub fn days_ahead_at(days: i64, hour: u32, minute: u32) -> Timestamp {
    let date = (Utc::now() + Duration::days(days)).date_naive();
    date.and_time(NaiveTime::from_hms_opt(hour, minute, 0).unwrap())
        .and_utc()
}

/// RFC 3339 with a `Z` suffix, safe to put in a query string.
pub fn rfc3339(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::get(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::post(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::put(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
