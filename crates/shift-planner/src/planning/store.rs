use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{NewShift, Page, Shift, ShiftEntry, ShiftId, Worker, WorkerId};
use super::repository::{PlanningRepository, PlanningSession, RepositoryError};

/// Process-local planning store.
///
/// A session holds the store lock until it is committed or dropped, which serializes
/// every read-validate-write sequence. Changes are applied eagerly and recorded in an
/// undo log that is replayed if the session ends without a commit.
#[derive(Debug, Default, Clone)]
pub struct MemoryPlanningStore {
    state: Arc<Mutex<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    workers: BTreeMap<WorkerId, Worker>,
    shifts: BTreeMap<ShiftId, Shift>,
    last_shift_id: i64,
}

#[derive(Debug)]
enum Undo {
    RemoveWorker(WorkerId),
    RestoreWorker(Worker),
    RemoveShift(ShiftId),
    RestoreShift(Shift),
}

impl MemoryPlanningStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlanningRepository for MemoryPlanningStore {
    type Session<'a> = MemorySession<'a>;

    fn begin(&self) -> Result<Self::Session<'_>, RepositoryError> {
        let state = self
            .state
            .lock()
            .map_err(|_| RepositoryError::Unavailable("planning store lock poisoned".into()))?;
        Ok(MemorySession {
            state,
            undo: Vec::new(),
        })
    }
}

pub struct MemorySession<'a> {
    state: MutexGuard<'a, MemoryState>,
    undo: Vec<Undo>,
}

impl MemorySession<'_> {
    fn remove_shift(&mut self, id: ShiftId) -> bool {
        match self.state.shifts.remove(&id) {
            Some(shift) => {
                self.undo.push(Undo::RestoreShift(shift));
                true
            }
            None => false,
        }
    }

    fn shift_ids_for(&self, worker_id: WorkerId) -> Vec<ShiftId> {
        self.state
            .shifts
            .values()
            .filter(|shift| shift.worker_id == worker_id)
            .map(|shift| shift.id)
            .collect()
    }

    fn rollback(&mut self) {
        while let Some(step) = self.undo.pop() {
            match step {
                Undo::RemoveWorker(id) => {
                    self.state.workers.remove(&id);
                }
                Undo::RestoreWorker(worker) => {
                    self.state.workers.insert(worker.id, worker);
                }
                Undo::RemoveShift(id) => {
                    self.state.shifts.remove(&id);
                }
                Undo::RestoreShift(shift) => {
                    self.state.shifts.insert(shift.id, shift);
                }
            }
        }
    }
}

impl PlanningSession for MemorySession<'_> {
    fn insert_worker(&mut self, worker: Worker) -> Result<Worker, RepositoryError> {
        if self.state.workers.contains_key(&worker.id) {
            return Err(RepositoryError::Conflict);
        }
        self.state.workers.insert(worker.id, worker.clone());
        self.undo.push(Undo::RemoveWorker(worker.id));
        Ok(worker)
    }

    fn fetch_worker(&mut self, id: WorkerId) -> Result<Option<Worker>, RepositoryError> {
        Ok(self.state.workers.get(&id).cloned())
    }

    fn delete_worker(&mut self, id: WorkerId) -> Result<(), RepositoryError> {
        let worker = self
            .state
            .workers
            .remove(&id)
            .ok_or(RepositoryError::NotFound)?;
        self.undo.push(Undo::RestoreWorker(worker));
        for shift_id in self.shift_ids_for(id) {
            self.remove_shift(shift_id);
        }
        Ok(())
    }

    fn list_workers(&mut self, page: Page) -> Result<Vec<Worker>, RepositoryError> {
        Ok(self
            .state
            .workers
            .values()
            .skip(page.skip)
            .take(page.limit)
            .cloned()
            .collect())
    }

    fn insert_shift(&mut self, shift: NewShift) -> Result<Shift, RepositoryError> {
        if !self.state.workers.contains_key(&shift.worker_id) {
            return Err(RepositoryError::NotFound);
        }
        self.state.last_shift_id += 1;
        let stored = Shift {
            id: ShiftId(self.state.last_shift_id),
            worker_id: shift.worker_id,
            slot: shift.slot,
            date: shift.date,
        };
        self.state.shifts.insert(stored.id, stored.clone());
        self.undo.push(Undo::RemoveShift(stored.id));
        Ok(stored)
    }

    fn fetch_shift(&mut self, id: ShiftId) -> Result<Option<Shift>, RepositoryError> {
        Ok(self.state.shifts.get(&id).cloned())
    }

    fn delete_shift(&mut self, id: ShiftId) -> Result<(), RepositoryError> {
        if self.remove_shift(id) {
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn worker_shifts(&mut self, worker_id: WorkerId) -> Result<Vec<ShiftEntry>, RepositoryError> {
        let mut entries: Vec<ShiftEntry> = self
            .state
            .shifts
            .values()
            .filter(|shift| shift.worker_id == worker_id)
            .map(Shift::entry)
            .collect();
        entries.sort();
        Ok(entries)
    }

    fn delete_worker_shifts(&mut self, worker_id: WorkerId) -> Result<usize, RepositoryError> {
        let ids = self.shift_ids_for(worker_id);
        for id in &ids {
            self.remove_shift(*id);
        }
        Ok(ids.len())
    }

    fn commit(mut self) -> Result<(), RepositoryError> {
        self.undo.clear();
        Ok(())
    }
}

impl Drop for MemorySession<'_> {
    fn drop(&mut self) {
        self.rollback();
    }
}
