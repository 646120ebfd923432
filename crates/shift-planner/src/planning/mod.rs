//! Worker and shift planning: slot model, conflict rules, storage, and HTTP routes.

pub mod conflict;
pub mod domain;
pub mod repository;
pub mod router;
pub mod service;
pub mod slot;
pub mod store;

#[cfg(test)]
mod tests;

pub use conflict::{validate, ConflictKind};
pub use domain::{NewShift, Page, Shift, ShiftEntry, ShiftId, Worker, WorkerId};
pub use repository::{PlanningRepository, PlanningSession, RepositoryError};
pub use router::planning_router;
pub use service::{PageLimits, PlanningError, PlanningService};
pub use slot::{InvalidSlot, Slot};
pub use store::MemoryPlanningStore;
