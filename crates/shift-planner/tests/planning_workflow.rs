//! End-to-end scenarios for worker registration and shift scheduling.
//!
//! Requests go through the public HTTP router backed by the in-memory store so the
//! conflict rules, status codes and messages are checked exactly as a client sees them.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use shift_planner::planning::{planning_router, MemoryPlanningStore, PlanningService};

fn router() -> Router {
    let store = Arc::new(MemoryPlanningStore::new());
    planning_router(Arc::new(PlanningService::new(store)))
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).expect("serialize"))),
        None => builder.body(Body::empty()),
    }
    .expect("request builds");

    router.clone().oneshot(request).await.expect("route executes")
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json payload")
}

async fn register_bob(router: &Router) {
    let response = send(
        router,
        Method::POST,
        "/workers",
        Some(json!({ "id": 1, "name": "Bob" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

async fn add_shift(router: &Router, slot: u8, date: &str) -> Response {
    send(
        router,
        Method::POST,
        "/shifts",
        Some(json!({ "worker_id": 1, "slot": slot, "date": date })),
    )
    .await
}

#[tokio::test]
async fn worker_can_be_created_and_fetched() {
    let router = router();
    register_bob(&router).await;

    let response = send(&router, Method::GET, "/workers/1", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "id": 1, "name": "Bob" }));
}

#[tokio::test]
async fn created_shift_is_listed_for_worker() {
    let router = router();
    register_bob(&router).await;

    let response = add_shift(&router, 1, "2020-10-10").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send(&router, Method::GET, "/shifts/worker/1", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!([{ "date": "2020-10-10", "slot": 1 }])
    );
}

#[tokio::test]
async fn no_two_shifts_on_same_day() {
    let router = router();
    register_bob(&router).await;
    assert_eq!(
        add_shift(&router, 2, "2020-01-10").await.status(),
        StatusCode::CREATED
    );

    let response = add_shift(&router, 1, "2020-01-10").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Worker already has a shift for 2020-01-10" })
    );
}

#[tokio::test]
async fn no_consecutive_shift_after_previous_evening() {
    let router = router();
    register_bob(&router).await;
    assert_eq!(
        add_shift(&router, 3, "2020-02-10").await.status(),
        StatusCode::CREATED
    );

    let response = add_shift(&router, 1, "2020-02-11").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Worker has a shift on the previous day from 16 to 24, leading to two consecutive shifts" })
    );
}

#[tokio::test]
async fn no_consecutive_shift_before_next_morning() {
    let router = router();
    register_bob(&router).await;
    assert_eq!(
        add_shift(&router, 1, "2020-03-10").await.status(),
        StatusCode::CREATED
    );

    let response = add_shift(&router, 3, "2020-03-09").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Worker has a shift on the next day from 0 to 8, leading to two consecutive shifts" })
    );
}

#[tokio::test]
async fn deleted_worker_is_gone_with_its_shifts() {
    let router = router();
    register_bob(&router).await;
    assert_eq!(
        add_shift(&router, 2, "2020-04-01").await.status(),
        StatusCode::CREATED
    );

    let response = send(&router, Method::DELETE, "/workers/1", None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&router, Method::GET, "/workers/1", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&router, Method::GET, "/shifts/worker/1", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    register_bob(&router).await;
    let response = send(&router, Method::GET, "/shifts/worker/1", None).await;
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn rejected_shift_leaves_schedule_untouched() {
    let router = router();
    register_bob(&router).await;
    assert_eq!(
        add_shift(&router, 3, "2020-05-10").await.status(),
        StatusCode::CREATED
    );
    assert_eq!(
        add_shift(&router, 1, "2020-05-11").await.status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        add_shift(&router, 2, "2020-05-11").await.status(),
        StatusCode::CREATED
    );

    let response = send(&router, Method::GET, "/shifts/worker/1", None).await;
    let listed = body_json(response).await;
    assert_eq!(
        listed,
        json!([
            { "date": "2020-05-10", "slot": 3 },
            { "date": "2020-05-11", "slot": 2 }
        ])
    );
}

#[tokio::test]
async fn malformed_dates_are_rejected_before_validation() {
    let router = router();
    register_bob(&router).await;

    let response = add_shift(&router, 1, "2020-13-40").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
