use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{NewShift, Page, ShiftId, Worker, WorkerId};
use super::repository::PlanningRepository;
use super::service::{PlanningError, PlanningService};

pub const SERVICE_BANNER: &str = "planning app v 0.1";

/// Router builder exposing worker and shift endpoints.
pub fn planning_router<R>(service: Arc<PlanningService<R>>) -> Router
where
    R: PlanningRepository + 'static,
{
    Router::new()
        .route("/", get(banner_handler))
        .route(
            "/workers",
            post(create_worker_handler::<R>).get(list_workers_handler::<R>),
        )
        .route(
            "/workers/:id",
            get(get_worker_handler::<R>).delete(delete_worker_handler::<R>),
        )
        .route("/shifts", post(create_shift_handler::<R>))
        .route("/shifts/:id", delete(delete_shift_handler::<R>))
        .route(
            "/shifts/worker/:worker_id",
            get(worker_shifts_handler::<R>).delete(delete_worker_shifts_handler::<R>),
        )
        .with_state(service)
}

/// Raw pagination query; negative values are rejected rather than clamped.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PageQuery {
    pub(crate) skip: Option<i64>,
    pub(crate) limit: Option<i64>,
}

impl PageQuery {
    pub(crate) fn into_page(self, default_limit: usize) -> Result<Page, PlanningError> {
        let skip = self.skip.unwrap_or(0);
        let limit = self
            .limit
            .unwrap_or_else(|| i64::try_from(default_limit).unwrap_or(i64::MAX));

        match (usize::try_from(skip), usize::try_from(limit)) {
            (Ok(skip), Ok(limit)) => Ok(Page::new(skip, limit)),
            _ => Err(PlanningError::InvalidPagination { skip, limit }),
        }
    }
}

pub(crate) async fn banner_handler() -> Json<&'static str> {
    Json(SERVICE_BANNER)
}

pub(crate) async fn create_worker_handler<R>(
    State(service): State<Arc<PlanningService<R>>>,
    Json(worker): Json<Worker>,
) -> Response
where
    R: PlanningRepository + 'static,
{
    match service.create_worker(worker.id, worker.name) {
        Ok(worker) => (StatusCode::CREATED, Json(worker)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_workers_handler<R>(
    State(service): State<Arc<PlanningService<R>>>,
    Query(query): Query<PageQuery>,
) -> Response
where
    R: PlanningRepository + 'static,
{
    let result = query
        .into_page(service.limits().default_limit)
        .and_then(|page| service.list_workers(page));

    match result {
        Ok(workers) => (StatusCode::OK, Json(workers)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn get_worker_handler<R>(
    State(service): State<Arc<PlanningService<R>>>,
    Path(id): Path<i64>,
) -> Response
where
    R: PlanningRepository + 'static,
{
    match service.get_worker(WorkerId(id)) {
        Ok(worker) => (StatusCode::OK, Json(worker)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_worker_handler<R>(
    State(service): State<Arc<PlanningService<R>>>,
    Path(id): Path<i64>,
) -> Response
where
    R: PlanningRepository + 'static,
{
    match service.delete_worker(WorkerId(id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create_shift_handler<R>(
    State(service): State<Arc<PlanningService<R>>>,
    Json(shift): Json<NewShift>,
) -> Response
where
    R: PlanningRepository + 'static,
{
    match service.create_shift(shift) {
        Ok(shift) => (StatusCode::CREATED, Json(shift)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_shift_handler<R>(
    State(service): State<Arc<PlanningService<R>>>,
    Path(id): Path<i64>,
) -> Response
where
    R: PlanningRepository + 'static,
{
    match service.delete_shift(ShiftId(id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn worker_shifts_handler<R>(
    State(service): State<Arc<PlanningService<R>>>,
    Path(worker_id): Path<i64>,
) -> Response
where
    R: PlanningRepository + 'static,
{
    match service.list_worker_shifts(WorkerId(worker_id)) {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_worker_shifts_handler<R>(
    State(service): State<Arc<PlanningService<R>>>,
    Path(worker_id): Path<i64>,
) -> Response
where
    R: PlanningRepository + 'static,
{
    match service.delete_worker_shifts(WorkerId(worker_id)) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) fn status_for(err: &PlanningError) -> StatusCode {
    match err {
        PlanningError::WorkerNotFound(_) | PlanningError::ShiftNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        PlanningError::DuplicateWorker(_)
        | PlanningError::Conflict { .. }
        | PlanningError::InvalidPagination { .. } => StatusCode::BAD_REQUEST,
        PlanningError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: PlanningError) -> Response {
    let payload = json!({
        "error": err.to_string(),
    });
    (status_for(&err), Json(payload)).into_response()
}
