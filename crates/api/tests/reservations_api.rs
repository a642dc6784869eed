//! Integration tests for the reservation workflow over HTTP.

mod common;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use camara_api::error::AppError;
use camara_core::audit::actions;
use camara_core::audit::subjects;
use camara_db::models::reservation::CreateReservation;
use camara_db::repositories::{AuditLogRepo, ReservationRepo};
use common::{
    body_json, days_ahead_at, enroll_member, get_auth, member_token, post_json_auth,
    rfc3339, seed_meeting_room, staff_token, user_token, MEMBER_ID, NON_MEMBER_ID,
    OTHER_MEMBER_ID,
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::json;
use sqlx::PgPool;

fn request_body(place_id: i64, day: i64, start: (u32, u32), end: (u32, u32)) -> serde_json::Value {
    json!({
        "place_id": place_id,
        "start_time": days_ahead_at(day, start.0, start.1),
        "end_time": days_ahead_at(day, end.0, end.1),
        "purpose": "Board meeting",
        "party_size": 10,
    })
}

/// Create a reservation as `MEMBER_ID` and return its id.
async fn create_as_member(pool: &PgPool, body: serde_json::Value) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response =
        post_json_auth(app, "/api/v1/reservations", body, &member_token(MEMBER_ID)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

async fn approve(pool: &PgPool, id: i64) -> axum::response::Response {
    let app = common::build_test_app(pool.clone());
    post_json_auth(
        app,
        &format!("/api/v1/reservations/{id}/approve"),
        json!({ "admin_notes": "Coffee service included" }),
        &staff_token(),
    )
    .await
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn member_requests_pending_reservation_with_cost(pool: PgPool) {
    let (_, place_id) = seed_meeting_room(&pool).await;
    enroll_member(&pool, MEMBER_ID).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/reservations",
        request_body(place_id, 7, (9, 0), (11, 0)),
        &member_token(MEMBER_ID),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "pending");
    assert_eq!(json["data"]["requester_id"], MEMBER_ID);
    assert_eq!(json["data"]["place_name"], "Sala Directorio");
    assert_eq!(json["data"]["cost_total"], "50.00");
    assert!(json["data"]["approved_by"].is_null());

    let id = json["data"]["id"].as_i64().unwrap();
    let entries = AuditLogRepo::list_for_subject(&pool, subjects::RESERVATION, id)
        .await
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, actions::RESERVATION_CREATE);
    assert_eq!(entries[0].actor_id, MEMBER_ID);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn overlapping_request_rejected_while_first_is_pending(pool: PgPool) {
    let (_, place_id) = seed_meeting_room(&pool).await;
    enroll_member(&pool, MEMBER_ID).await;
    enroll_member(&pool, OTHER_MEMBER_ID).await;
    create_as_member(&pool, request_body(place_id, 7, (9, 0), (11, 0))).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/reservations",
        request_body(place_id, 7, (10, 30), (12, 0)),
        &member_token(OTHER_MEMBER_ID),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "SLOT_UNAVAILABLE");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn back_to_back_request_accepted_after_approval(pool: PgPool) {
    let (_, place_id) = seed_meeting_room(&pool).await;
    enroll_member(&pool, MEMBER_ID).await;
    let first = create_as_member(&pool, request_body(place_id, 7, (9, 0), (11, 0))).await;

    let response = approve(&pool, first).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "approved");
    assert_eq!(json["data"]["approved_by"], common::STAFF_ID);
    assert_eq!(json["data"]["admin_notes"], "Coffee service included");
    assert!(json["data"]["approved_at"].is_string());

    create_as_member(&pool, request_body(place_id, 7, (11, 0), (13, 0))).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn past_start_rejected(pool: PgPool) {
    let (_, place_id) = seed_meeting_room(&pool).await;
    enroll_member(&pool, MEMBER_ID).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/reservations",
        request_body(place_id, -1, (9, 0), (11, 0)),
        &member_token(MEMBER_ID),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_IN_FUTURE");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn party_larger_than_capacity_rejected(pool: PgPool) {
    let (_, place_id) = seed_meeting_room(&pool).await;
    enroll_member(&pool, MEMBER_ID).await;

    let mut body = request_body(place_id, 7, (9, 0), (11, 0));
    body["party_size"] = json!(13);
    let app = common::build_test_app(pool);
    let response =
        post_json_auth(app, "/api/v1/reservations", body, &member_token(MEMBER_ID)).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CAPACITY_EXCEEDED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn outside_operating_hours_rejected(pool: PgPool) {
    let (_, place_id) = seed_meeting_room(&pool).await;
    enroll_member(&pool, MEMBER_ID).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/reservations",
        request_body(place_id, 7, (6, 0), (9, 0)),
        &member_token(MEMBER_ID),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "OUTSIDE_OPERATING_HOURS");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn blank_purpose_is_a_validation_error(pool: PgPool) {
    let (_, place_id) = seed_meeting_room(&pool).await;
    enroll_member(&pool, MEMBER_ID).await;

    let mut body = request_body(place_id, 7, (9, 0), (11, 0));
    body["purpose"] = json!("   ");
    let app = common::build_test_app(pool);
    let response =
        post_json_auth(app, "/api/v1/reservations", body, &member_token(MEMBER_ID)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_member_cannot_request(pool: PgPool) {
    let (_, place_id) = seed_meeting_room(&pool).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/reservations",
        request_body(place_id, 7, (9, 0), (11, 0)),
        &user_token(NON_MEMBER_ID),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_place_is_not_found(pool: PgPool) {
    enroll_member(&pool, MEMBER_ID).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/reservations",
        request_body(9999, 7, (9, 0), (11, 0)),
        &member_token(MEMBER_ID),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn request_without_token_is_unauthorized(pool: PgPool) {
    let (_, place_id) = seed_meeting_room(&pool).await;

    let app = common::build_test_app(pool);
    let response = common::post_json(
        app,
        "/api/v1/reservations",
        request_body(place_id, 7, (9, 0), (11, 0)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn cancel_approved_then_cancel_again(pool: PgPool) {
    let (_, place_id) = seed_meeting_room(&pool).await;
    enroll_member(&pool, MEMBER_ID).await;
    let id = create_as_member(&pool, request_body(place_id, 7, (9, 0), (11, 0))).await;
    assert_eq!(approve(&pool, id).await.status(), StatusCode::OK);

    let uri = format!("/api/v1/reservations/{id}/cancel");
    let app = common::build_test_app(pool.clone());
    let response = common::post_auth(app, &uri, &member_token(MEMBER_ID)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "cancelled");

    let app = common::build_test_app(pool.clone());
    let response = common::post_auth(app, &uri, &member_token(MEMBER_ID)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_TRANSITION");

    // The cancelled slot is free again.
    create_as_member(&pool, request_body(place_id, 7, (9, 0), (11, 0))).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn stranger_cannot_cancel_or_view(pool: PgPool) {
    let (_, place_id) = seed_meeting_room(&pool).await;
    enroll_member(&pool, MEMBER_ID).await;
    enroll_member(&pool, OTHER_MEMBER_ID).await;
    let id = create_as_member(&pool, request_body(place_id, 7, (9, 0), (11, 0))).await;

    let app = common::build_test_app(pool.clone());
    let response = common::post_auth(
        app,
        &format!("/api/v1/reservations/{id}/cancel"),
        &member_token(OTHER_MEMBER_ID),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(
        app,
        &format!("/api/v1/reservations/{id}"),
        &member_token(OTHER_MEMBER_ID),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/api/v1/reservations/{id}"), &staff_token()).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn approving_twice_is_an_invalid_transition(pool: PgPool) {
    let (_, place_id) = seed_meeting_room(&pool).await;
    enroll_member(&pool, MEMBER_ID).await;
    let id = create_as_member(&pool, request_body(place_id, 7, (9, 0), (11, 0))).await;

    assert_eq!(approve(&pool, id).await.status(), StatusCode::OK);
    let response = approve(&pool, id).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_TRANSITION");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn member_cannot_approve(pool: PgPool) {
    let (_, place_id) = seed_meeting_room(&pool).await;
    enroll_member(&pool, MEMBER_ID).await;
    let id = create_as_member(&pool, request_body(place_id, 7, (9, 0), (11, 0))).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/reservations/{id}/approve"),
        json!({}),
        &member_token(MEMBER_ID),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rejection_releases_the_slot(pool: PgPool) {
    let (_, place_id) = seed_meeting_room(&pool).await;
    enroll_member(&pool, MEMBER_ID).await;
    let id = create_as_member(&pool, request_body(place_id, 7, (9, 0), (11, 0))).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/reservations/{id}/reject"),
        json!({ "admin_notes": "Room under maintenance" }),
        &staff_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "rejected");
    assert_eq!(json["data"]["admin_notes"], "Room under maintenance");

    create_as_member(&pool, request_body(place_id, 7, (10, 0), (12, 0))).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn approve_and_reject_without_a_body(pool: PgPool) {
    let (_, place_id) = seed_meeting_room(&pool).await;
    enroll_member(&pool, MEMBER_ID).await;
    let first = create_as_member(&pool, request_body(place_id, 7, (9, 0), (11, 0))).await;
    let second = create_as_member(&pool, request_body(place_id, 8, (9, 0), (11, 0))).await;

    let app = common::build_test_app(pool.clone());
    let response = common::post_auth(
        app,
        &format!("/api/v1/reservations/{first}/approve"),
        &staff_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "approved");
    assert!(json["data"]["admin_notes"].is_null());

    let app = common::build_test_app(pool);
    let response = common::post_auth(
        app,
        &format!("/api/v1/reservations/{second}/reject"),
        &staff_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "rejected");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn completing_before_the_end_fails(pool: PgPool) {
    let (_, place_id) = seed_meeting_room(&pool).await;
    enroll_member(&pool, MEMBER_ID).await;
    let id = create_as_member(&pool, request_body(place_id, 7, (9, 0), (11, 0))).await;
    assert_eq!(approve(&pool, id).await.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = common::post_auth(
        app,
        &format!("/api/v1/reservations/{id}/complete"),
        &staff_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_TRANSITION");
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn availability_reflects_blocking_reservations(pool: PgPool) {
    let (_, place_id) = seed_meeting_room(&pool).await;
    enroll_member(&pool, MEMBER_ID).await;
    create_as_member(&pool, request_body(place_id, 7, (9, 0), (11, 0))).await;

    let probe = |start: (u32, u32), end: (u32, u32)| {
        format!(
            "/api/v1/reservations/availability?place_id={place_id}&start_time={}&end_time={}",
            rfc3339(days_ahead_at(7, start.0, start.1)),
            rfc3339(days_ahead_at(7, end.0, end.1)),
        )
    };

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &probe((10, 0), (12, 0)), &member_token(MEMBER_ID)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["available"], false);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &probe((11, 0), (12, 0)), &member_token(MEMBER_ID)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["available"], true);

    let app = common::build_test_app(pool);
    let response = get_auth(app, &probe((12, 0), (11, 0)), &member_token(MEMBER_ID)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["code"], "INVALID_INTERVAL");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn quote_prices_the_interval(pool: PgPool) {
    let (_, place_id) = seed_meeting_room(&pool).await;

    let uri = format!(
        "/api/v1/reservations/quote?place_id={place_id}&start_time={}&end_time={}",
        rfc3339(days_ahead_at(7, 9, 0)),
        rfc3339(days_ahead_at(7, 10, 30)),
    );
    let app = common::build_test_app(pool);
    let response = get_auth(app, &uri, &member_token(MEMBER_ID)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let hours: Decimal = json["data"]["duration_hours"].as_str().unwrap().parse().unwrap();
    assert_eq!(hours, Decimal::new(15, 1));
    assert_eq!(json["data"]["cost_total"], "37.50");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn my_reservations_lists_only_own(pool: PgPool) {
    let (_, place_id) = seed_meeting_room(&pool).await;
    enroll_member(&pool, MEMBER_ID).await;
    create_as_member(&pool, request_body(place_id, 7, (9, 0), (11, 0))).await;
    create_as_member(&pool, request_body(place_id, 8, (9, 0), (11, 0))).await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/reservations/mine", &member_token(MEMBER_ID)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    // Latest start first.
    assert!(rows[0]["start_time"].as_str() > rows[1]["start_time"].as_str());

    let app = common::build_test_app(pool);
    let response =
        get_auth(app, "/api/v1/reservations/mine", &member_token(OTHER_MEMBER_ID)).await;
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn staff_panel_filters_by_status(pool: PgPool) {
    let (_, place_id) = seed_meeting_room(&pool).await;
    enroll_member(&pool, MEMBER_ID).await;
    let first = create_as_member(&pool, request_body(place_id, 7, (9, 0), (11, 0))).await;
    create_as_member(&pool, request_body(place_id, 8, (9, 0), (11, 0))).await;
    assert_eq!(approve(&pool, first).await.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(
        app,
        "/api/v1/admin/reservations?status=pending",
        &staff_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["status"], "pending");

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/admin/reservations?status=bogus", &staff_token()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        "/api/v1/admin/reservations",
        &member_token(MEMBER_ID),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_overlapping_requests_admit_exactly_one(pool: PgPool) {
    let (_, place_id) = seed_meeting_room(&pool).await;
    enroll_member(&pool, MEMBER_ID).await;
    enroll_member(&pool, OTHER_MEMBER_ID).await;

    let first_token = member_token(MEMBER_ID);
    let second_token = member_token(OTHER_MEMBER_ID);
    let first = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/reservations",
        request_body(place_id, 7, (9, 0), (11, 0)),
        &first_token,
    );
    let second = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/reservations",
        request_body(place_id, 7, (10, 0), (12, 0)),
        &second_token,
    );
    let (first, second) = tokio::join!(first, second);

    let mut statuses = [first.status().as_u16(), second.status().as_u16()];
    statuses.sort_unstable();
    assert_eq!(statuses, [201, 409]);

    let loser = if first.status() == StatusCode::CONFLICT { first } else { second };
    assert_eq!(body_json(loser).await["code"], "SLOT_UNAVAILABLE");

    let blocking = ReservationRepo::list_blocking_overlapping(
        &pool,
        place_id,
        days_ahead_at(7, 9, 0),
        days_ahead_at(7, 12, 0),
        None,
    )
    .await
    .unwrap();
    assert_eq!(blocking.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn exclusion_violation_surfaces_as_slot_unavailable(pool: PgPool) {
    let (_, place_id) = seed_meeting_room(&pool).await;
    insert_directly(&pool, place_id, (9, 0), (11, 0))
        .await
        .unwrap();

    // Written straight to storage, past the validator and the place lock.
    let err = insert_directly(&pool, place_id, (10, 0), (12, 0))
        .await
        .unwrap_err();
    let response = AppError::Database(err).into_response();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "SLOT_UNAVAILABLE");
}

async fn insert_directly(
    pool: &PgPool,
    place_id: i64,
    start: (u32, u32),
    end: (u32, u32),
) -> Result<i64, sqlx::Error> {
    let input = CreateReservation {
        requester_id: MEMBER_ID,
        place_id,
        start_time: days_ahead_at(7, start.0, start.1),
        end_time: days_ahead_at(7, end.0, end.1),
        purpose: "Board meeting".to_string(),
        description: None,
        party_size: 4,
    };
    let mut conn = pool.acquire().await?;
    Ok(ReservationRepo::insert(&mut conn, &input, Utc::now()).await?.id)
}
