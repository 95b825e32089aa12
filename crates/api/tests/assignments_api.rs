//! HTTP-level tests for `/listings/assignments/`.
//!
//! Every app is built with the clock pinned to 2023-01-01 (see `common::today`).

mod common;

use axum::http::StatusCode;
use common::{body_json, date, get, post_json, post_raw, today};
use listings_core::types::DbId;
use listings_db::models::assignment::CreateAssignment;
use listings_db::models::listing::CreateListing;
use listings_db::repositories::{AssignmentRepo, ListingRepo};
use serde_json::json;
use sqlx::PgPool;

const ENDPOINT: &str = "/listings/assignments/";

struct Seed {
    ross: DbId,
    phoebe: DbId,
}

/// Two listings, each with one assignment:
/// Ross 2023-02-07..2023-02-15 and Phoebe 2023-04-01..2023-04-04.
async fn seed(pool: &PgPool) -> Seed {
    let ross = create_listing(pool, "Ross", "Geller").await;
    let phoebe = create_listing(pool, "Phoebe", "Buffay").await;
    create_assignment(pool, ross, date(2023, 2, 7), date(2023, 2, 15)).await;
    create_assignment(pool, phoebe, date(2023, 4, 1), date(2023, 4, 4)).await;
    Seed { ross, phoebe }
}

async fn create_listing(pool: &PgPool, first_name: &str, last_name: &str) -> DbId {
    let input = CreateListing {
        first_name: first_name.into(),
        last_name: last_name.into(),
    };
    ListingRepo::create(pool, &input).await.unwrap().id
}

async fn create_assignment(
    pool: &PgPool,
    listing_id: DbId,
    start_date: chrono::NaiveDate,
    end_date: chrono::NaiveDate,
) {
    let input = CreateAssignment {
        listing_id,
        start_date,
        end_date,
    };
    AssignmentRepo::create(pool, &input).await.unwrap();
}

async fn count(pool: &PgPool) -> i64 {
    AssignmentRepo::count(pool).await.unwrap()
}

fn days_from_today(days: i64) -> String {
    (today() + chrono::Duration::days(days)).to_string()
}

// ---------------------------------------------------------------------------
// Acceptance
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn future_non_overlapping_assignment_is_created(pool: PgPool) {
    let seed = seed(&pool).await;
    let app = common::build_test_app(pool.clone());

    let response = post_json(
        app,
        ENDPOINT,
        json!({
            "start_date": days_from_today(1),
            "end_date": days_from_today(5),
            "listing": seed.ross,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(
        json,
        json!({
            "start_date": "2023-01-02",
            "end_date": "2023-01-06",
            "listing": seed.ross,
        })
    );
    assert_eq!(count(&pool).await, 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn adjacent_interval_after_existing_is_accepted(pool: PgPool) {
    let seed = seed(&pool).await;
    let app = common::build_test_app(pool.clone());

    let response = post_json(
        app,
        ENDPOINT,
        json!({ "start_date": "2023-02-16", "end_date": "2023-02-20", "listing": seed.ross }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(count(&pool).await, 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn overlap_is_scoped_to_the_listing(pool: PgPool) {
    let seed = seed(&pool).await;
    let app = common::build_test_app(pool.clone());

    // Ross is busy on these dates, Phoebe is not.
    let response = post_json(
        app,
        ENDPOINT,
        json!({ "start_date": "2023-02-10", "end_date": "2023-02-12", "listing": seed.phoebe }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(count(&pool).await, 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn listing_may_be_given_as_a_string(pool: PgPool) {
    let seed = seed(&pool).await;
    let app = common::build_test_app(pool.clone());

    let response = post_json(
        app,
        ENDPOINT,
        json!({ "start_date": "2023-03-01", "end_date": "2023-03-02", "listing": seed.ross.to_string() }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
}

// ---------------------------------------------------------------------------
// Business rules
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn start_date_of_today_is_rejected(pool: PgPool) {
    let seed = seed(&pool).await;
    let app = common::build_test_app(pool.clone());

    let response = post_json(
        app,
        ENDPOINT,
        json!({
            "start_date": days_from_today(0),
            "end_date": days_from_today(5),
            "listing": seed.ross,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Assignment must start tomorrow or later.");
    assert_eq!(count(&pool).await, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn past_start_date_is_rejected(pool: PgPool) {
    let seed = seed(&pool).await;
    let app = common::build_test_app(pool.clone());

    let response = post_json(
        app,
        ENDPOINT,
        json!({ "start_date": "2022-06-01", "end_date": "2022-06-03", "listing": seed.phoebe }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(count(&pool).await, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn overlapping_assignment_is_rejected(pool: PgPool) {
    let seed = seed(&pool).await;
    let app = common::build_test_app(pool.clone());

    let response = post_json(
        app,
        ENDPOINT,
        json!({ "start_date": "2023-02-14", "end_date": "2023-02-20", "listing": seed.ross }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Assignment overlaps with existing assignments.");
    assert_eq!(count(&pool).await, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn touching_boundary_day_counts_as_overlap(pool: PgPool) {
    let seed = seed(&pool).await;
    let app = common::build_test_app(pool.clone());

    let response = post_json(
        app,
        ENDPOINT,
        json!({ "start_date": "2023-02-01", "end_date": "2023-02-07", "listing": seed.ross }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(count(&pool).await, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn future_start_rule_is_checked_before_overlap(pool: PgPool) {
    let seed = seed(&pool).await;
    // With "today" inside Ross's assignment both rules fail; the start rule wins.
    let app = common::build_test_app_on(pool.clone(), date(2023, 2, 10));

    let response = post_json(
        app,
        ENDPOINT,
        json!({ "start_date": "2023-02-09", "end_date": "2023-02-12", "listing": seed.ross }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Assignment must start tomorrow or later.");
}

// ---------------------------------------------------------------------------
// Malformed input
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_payload_reports_required_fields(pool: PgPool) {
    seed(&pool).await;
    let app = common::build_test_app(pool.clone());

    let response = post_json(app, ENDPOINT, json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    for field in ["start_date", "end_date", "listing"] {
        assert_eq!(json["fields"][field], json!(["This field is required."]));
    }
    assert_eq!(count(&pool).await, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_listing_is_rejected(pool: PgPool) {
    seed(&pool).await;
    let app = common::build_test_app(pool.clone());

    let response = post_json(
        app,
        ENDPOINT,
        json!({
            "start_date": days_from_today(1),
            "end_date": days_from_today(5),
            "listing": 999,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["fields"]["listing"],
        json!(["Invalid pk \"999\" - object does not exist."])
    );
    assert_eq!(count(&pool).await, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_date_format_is_rejected(pool: PgPool) {
    let seed = seed(&pool).await;
    let app = common::build_test_app(pool.clone());

    let response = post_json(
        app,
        ENDPOINT,
        json!({
            "start_date": "invalid_date_format",
            "end_date": days_from_today(5),
            "listing": seed.ross,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["fields"]["start_date"],
        json!(["Date has wrong format. Use one of these formats instead: YYYY-MM-DD."])
    );
    assert!(json["fields"].get("end_date").is_none());
    assert_eq!(count(&pool).await, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn signed_or_five_digit_year_is_rejected(pool: PgPool) {
    let seed = seed(&pool).await;

    for start in ["+262142-01-01", "12023-02-07"] {
        let response = post_json(
            common::build_test_app(pool.clone()),
            ENDPOINT,
            json!({ "start_date": start, "end_date": "2023-03-02", "listing": seed.ross }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{start}");
        let json = body_json(response).await;
        assert_eq!(
            json["fields"]["start_date"],
            json!(["Date has wrong format. Use one of these formats instead: YYYY-MM-DD."])
        );
    }
    assert_eq!(count(&pool).await, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_integer_listing_is_rejected(pool: PgPool) {
    seed(&pool).await;
    let app = common::build_test_app(pool.clone());

    let response = post_json(
        app,
        ENDPOINT,
        json!({ "start_date": "2023-03-01", "end_date": "2023-03-02", "listing": true }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["fields"]["listing"],
        json!(["Incorrect type. Expected pk value, received bool."])
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unparsable_body_is_a_bad_request(pool: PgPool) {
    seed(&pool).await;
    let app = common::build_test_app(pool.clone());

    let response = post_raw(app, ENDPOINT, "{not json").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(count(&pool).await, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn array_body_is_a_bad_request(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let response = post_json(app, ENDPOINT, json!([1, 2])).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["error"],
        "Invalid data. Expected a dictionary, but got list."
    );
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_overlapping_creates_store_exactly_one(pool: PgPool) {
    let listing = create_listing(&pool, "Ross", "Geller").await;

    // Every request covers 2023-03-01, so at most one may win.
    let handles: Vec<_> = (1..=8)
        .map(|i| {
            let app = common::build_test_app(pool.clone());
            let body = json!({
                "start_date": "2023-03-01",
                "end_date": format!("2023-03-1{i}"),
                "listing": listing,
            });
            tokio::spawn(async move { post_json(app, ENDPOINT, body).await.status() })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            StatusCode::CREATED => created += 1,
            status => assert_eq!(status, StatusCode::BAD_REQUEST),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(count(&pool).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_creates_for_different_listings_all_succeed(pool: PgPool) {
    let ross = create_listing(&pool, "Ross", "Geller").await;
    let phoebe = create_listing(&pool, "Phoebe", "Buffay").await;

    let handles: Vec<_> = [ross, phoebe]
        .into_iter()
        .map(|listing| {
            let app = common::build_test_app(pool.clone());
            let body = json!({
                "start_date": "2023-03-01",
                "end_date": "2023-03-05",
                "listing": listing,
            });
            tokio::spawn(async move { post_json(app, ENDPOINT, body).await.status() })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::CREATED);
    }
    assert_eq!(count(&pool).await, 2);
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_returns_assignments_in_creation_order(pool: PgPool) {
    let seed = seed(&pool).await;
    let app = common::build_test_app(pool);

    let response = get(app, ENDPOINT).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!([
            { "start_date": "2023-02-07", "end_date": "2023-02-15", "listing": seed.ross },
            { "start_date": "2023-04-01", "end_date": "2023-04-04", "listing": seed.phoebe },
        ])
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn created_assignment_appears_in_listing_ids(pool: PgPool) {
    let seed = seed(&pool).await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        ENDPOINT,
        json!({ "start_date": "2023-02-16", "end_date": "2023-02-20", "listing": seed.ross }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get(
        common::build_test_app(pool),
        &format!("/listings/{}/", seed.ross),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["assignments"].as_array().unwrap().len(), 2);
}
