use super::domain::{NewShift, Page, Shift, ShiftEntry, ShiftId, Worker, WorkerId};

/// Storage abstraction so the service module can be exercised in isolation.
///
/// All reads and writes go through a [`PlanningSession`]. A session that is dropped
/// without [`PlanningSession::commit`] must leave the store exactly as it found it, and
/// the store must not let two sessions interleave their read-validate-write sequences
/// for the same worker.
pub trait PlanningRepository: Send + Sync {
    type Session<'a>: PlanningSession
    where
        Self: 'a;

    fn begin(&self) -> Result<Self::Session<'_>, RepositoryError>;
}

/// Scoped unit of work against the planning store.
pub trait PlanningSession {
    fn insert_worker(&mut self, worker: Worker) -> Result<Worker, RepositoryError>;
    fn fetch_worker(&mut self, id: WorkerId) -> Result<Option<Worker>, RepositoryError>;
    /// Removes the worker together with every shift that references it.
    fn delete_worker(&mut self, id: WorkerId) -> Result<(), RepositoryError>;
    fn list_workers(&mut self, page: Page) -> Result<Vec<Worker>, RepositoryError>;

    fn insert_shift(&mut self, shift: NewShift) -> Result<Shift, RepositoryError>;
    fn fetch_shift(&mut self, id: ShiftId) -> Result<Option<Shift>, RepositoryError>;
    fn delete_shift(&mut self, id: ShiftId) -> Result<(), RepositoryError>;
    fn worker_shifts(&mut self, worker_id: WorkerId) -> Result<Vec<ShiftEntry>, RepositoryError>;
    fn delete_worker_shifts(&mut self, worker_id: WorkerId) -> Result<usize, RepositoryError>;

    fn commit(self) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
