use std::sync::Arc;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::planning::domain::{NewShift, Page, Shift, ShiftEntry, ShiftId, Worker, WorkerId};
use crate::planning::repository::{PlanningRepository, PlanningSession, RepositoryError};
use crate::planning::slot::Slot;
use crate::planning::{planning_router, MemoryPlanningStore, PlanningService};

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn entry(year: i32, month: u32, day: u32, slot: Slot) -> ShiftEntry {
    ShiftEntry::new(date(year, month, day), slot)
}

pub(super) fn new_shift(worker: i64, on: NaiveDate, slot: Slot) -> NewShift {
    NewShift {
        worker_id: WorkerId(worker),
        slot,
        date: on,
    }
}

pub(super) fn build_service() -> (PlanningService<MemoryPlanningStore>, Arc<MemoryPlanningStore>) {
    let store = Arc::new(MemoryPlanningStore::new());
    (PlanningService::new(store.clone()), store)
}

/// Service with worker 1 ("Bob") already registered.
pub(super) fn service_with_bob() -> PlanningService<MemoryPlanningStore> {
    let (service, _) = build_service();
    service
        .create_worker(WorkerId(1), Some("Bob".to_string()))
        .expect("worker created");
    service
}

pub(super) fn planning_router_with_service(
    service: PlanningService<MemoryPlanningStore>,
) -> axum::Router {
    planning_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// Store whose sessions can never be opened.
pub(super) struct UnavailableRepository;

pub(super) struct NeverSession;

impl PlanningRepository for UnavailableRepository {
    type Session<'a> = NeverSession;

    fn begin(&self) -> Result<Self::Session<'_>, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }
}

impl PlanningSession for NeverSession {
    fn insert_worker(&mut self, _worker: Worker) -> Result<Worker, RepositoryError> {
        unreachable!("sessions are never opened")
    }

    fn fetch_worker(&mut self, _id: WorkerId) -> Result<Option<Worker>, RepositoryError> {
        unreachable!("sessions are never opened")
    }

    fn delete_worker(&mut self, _id: WorkerId) -> Result<(), RepositoryError> {
        unreachable!("sessions are never opened")
    }

    fn list_workers(&mut self, _page: Page) -> Result<Vec<Worker>, RepositoryError> {
        unreachable!("sessions are never opened")
    }

    fn insert_shift(&mut self, _shift: NewShift) -> Result<Shift, RepositoryError> {
        unreachable!("sessions are never opened")
    }

    fn fetch_shift(&mut self, _id: ShiftId) -> Result<Option<Shift>, RepositoryError> {
        unreachable!("sessions are never opened")
    }

    fn delete_shift(&mut self, _id: ShiftId) -> Result<(), RepositoryError> {
        unreachable!("sessions are never opened")
    }

    fn worker_shifts(&mut self, _worker_id: WorkerId) -> Result<Vec<ShiftEntry>, RepositoryError> {
        unreachable!("sessions are never opened")
    }

    fn delete_worker_shifts(&mut self, _worker_id: WorkerId) -> Result<usize, RepositoryError> {
        unreachable!("sessions are never opened")
    }

    fn commit(self) -> Result<(), RepositoryError> {
        unreachable!("sessions are never opened")
    }
}
