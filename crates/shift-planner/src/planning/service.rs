use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::conflict::{self, ConflictKind};
use super::domain::{NewShift, Page, Shift, ShiftEntry, ShiftId, Worker, WorkerId};
use super::repository::{PlanningRepository, PlanningSession, RepositoryError};

pub const DEFAULT_PAGE_LIMIT: usize = 100;
pub const DEFAULT_MAX_PAGE_LIMIT: usize = 1000;

/// Pagination bounds applied to worker listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_limit: usize,
    pub max_limit: usize,
}

impl PageLimits {
    pub fn clamp(&self, page: Page) -> Page {
        Page::new(page.skip, page.limit.min(self.max_limit))
    }
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_PAGE_LIMIT,
            max_limit: DEFAULT_MAX_PAGE_LIMIT,
        }
    }
}

/// Service enforcing worker existence, shift conflicts, and cascading deletes.
pub struct PlanningService<R> {
    repository: Arc<R>,
    limits: PageLimits,
}

impl<R> PlanningService<R>
where
    R: PlanningRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_limits(repository, PageLimits::default())
    }

    pub fn with_limits(repository: Arc<R>, limits: PageLimits) -> Self {
        Self { repository, limits }
    }

    pub fn limits(&self) -> PageLimits {
        self.limits
    }

    pub fn create_worker(
        &self,
        id: WorkerId,
        name: Option<String>,
    ) -> Result<Worker, PlanningError> {
        let mut session = self.repository.begin()?;
        if session.fetch_worker(id)?.is_some() {
            return Err(PlanningError::DuplicateWorker(id));
        }

        let worker = session
            .insert_worker(Worker::new(id, name))
            .map_err(|err| match err {
                RepositoryError::Conflict => PlanningError::DuplicateWorker(id),
                other => other.into(),
            })?;
        session.commit()?;

        info!(worker_id = %id, "worker created");
        Ok(worker)
    }

    /// Delete a worker and every shift it owns in a single session.
    pub fn delete_worker(&self, id: WorkerId) -> Result<(), PlanningError> {
        let mut session = self.repository.begin()?;
        require_worker(&mut session, id)?;
        let removed = session.delete_worker_shifts(id)?;
        session.delete_worker(id)?;
        session.commit()?;

        info!(worker_id = %id, shifts_removed = removed, "worker deleted");
        Ok(())
    }

    /// Page through workers; the limit is clamped to the configured maximum.
    pub fn list_workers(&self, page: Page) -> Result<Vec<Worker>, PlanningError> {
        let page = self.limits.clamp(page);
        let mut session = self.repository.begin()?;
        let workers = session.list_workers(page)?;

        debug!(
            skip = page.skip,
            limit = page.limit,
            returned = workers.len(),
            "workers listed"
        );
        Ok(workers)
    }

    pub fn get_worker(&self, id: WorkerId) -> Result<Worker, PlanningError> {
        let mut session = self.repository.begin()?;
        require_worker(&mut session, id)
    }

    /// Validate a candidate shift against the worker's schedule and store it.
    ///
    /// Lookup, validation and insert share one session, so a concurrent request for the
    /// same worker observes either none or all of this shift.
    pub fn create_shift(&self, shift: NewShift) -> Result<Shift, PlanningError> {
        let mut session = self.repository.begin()?;
        require_worker(&mut session, shift.worker_id)?;

        let existing = session.worker_shifts(shift.worker_id)?;
        if let Err(kind) = conflict::validate(&existing, &shift.entry()) {
            warn!(
                worker_id = %shift.worker_id,
                date = %shift.date,
                slot = shift.slot.code(),
                ?kind,
                "shift rejected"
            );
            return Err(PlanningError::Conflict {
                date: shift.date,
                kind,
            });
        }

        let stored = session.insert_shift(shift)?;
        session.commit()?;

        info!(
            shift_id = %stored.id,
            worker_id = %stored.worker_id,
            date = %stored.date,
            slot = stored.slot.code(),
            "shift created"
        );
        Ok(stored)
    }

    pub fn get_shift(&self, id: ShiftId) -> Result<Shift, PlanningError> {
        let mut session = self.repository.begin()?;
        session
            .fetch_shift(id)?
            .ok_or(PlanningError::ShiftNotFound(id))
    }

    pub fn list_worker_shifts(
        &self,
        worker_id: WorkerId,
    ) -> Result<Vec<ShiftEntry>, PlanningError> {
        let mut session = self.repository.begin()?;
        require_worker(&mut session, worker_id)?;
        let entries = session.worker_shifts(worker_id)?;

        debug!(worker_id = %worker_id, returned = entries.len(), "worker shifts listed");
        Ok(entries)
    }

    pub fn delete_shift(&self, id: ShiftId) -> Result<(), PlanningError> {
        let mut session = self.repository.begin()?;
        session.delete_shift(id).map_err(|err| match err {
            RepositoryError::NotFound => PlanningError::ShiftNotFound(id),
            other => other.into(),
        })?;
        session.commit()?;

        info!(shift_id = %id, "shift deleted");
        Ok(())
    }

    /// Remove every shift owned by a worker, returning how many were deleted.
    pub fn delete_worker_shifts(&self, worker_id: WorkerId) -> Result<usize, PlanningError> {
        let mut session = self.repository.begin()?;
        require_worker(&mut session, worker_id)?;
        let removed = session.delete_worker_shifts(worker_id)?;
        session.commit()?;

        info!(worker_id = %worker_id, shifts_removed = removed, "worker shifts cleared");
        Ok(removed)
    }
}

fn require_worker<S: PlanningSession>(
    session: &mut S,
    id: WorkerId,
) -> Result<Worker, PlanningError> {
    session
        .fetch_worker(id)?
        .ok_or(PlanningError::WorkerNotFound(id))
}

/// Error raised by the planning service.
#[derive(Debug, thiserror::Error)]
pub enum PlanningError {
    #[error("Worker with id {0} not found")]
    WorkerNotFound(WorkerId),
    #[error("Shift with id {0} not found")]
    ShiftNotFound(ShiftId),
    #[error("Worker already exists.")]
    DuplicateWorker(WorkerId),
    #[error("{}", conflict_message(.date, .kind))]
    Conflict { date: NaiveDate, kind: ConflictKind },
    #[error("pagination parameters must be non-negative (skip={skip}, limit={limit})")]
    InvalidPagination { skip: i64, limit: i64 },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

fn conflict_message(date: &NaiveDate, kind: &ConflictKind) -> String {
    match kind {
        ConflictKind::SameDay => format!("Worker already has a shift for {date}"),
        ConflictKind::PreviousDayConsecutive => {
            "Worker has a shift on the previous day from 16 to 24, leading to two consecutive shifts"
                .to_string()
        }
        ConflictKind::NextDayConsecutive => {
            "Worker has a shift on the next day from 0 to 8, leading to two consecutive shifts"
                .to_string()
        }
    }
}
