use super::ListBackend;
use crate::error::{RegdeskError, Result};
use std::cell::RefCell;

/// In-memory list backend for testing.
///
/// Uses `RefCell` so `save` can take `&self`, matching [`FsBackend`](super::FsBackend).
pub struct MemBackend<R> {
    records: RefCell<Vec<R>>,
    saves: RefCell<usize>,
    simulate_write_error: RefCell<bool>,
}

impl<R> Default for MemBackend<R> {
    fn default() -> Self {
        Self {
            records: RefCell::new(Vec::new()),
            saves: RefCell::new(0),
            simulate_write_error: RefCell::new(false),
        }
    }
}

impl<R: Clone> MemBackend<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose list starts out holding `records`.
    pub fn with_records(records: Vec<R>) -> Self {
        let backend = Self::default();
        *backend.records.borrow_mut() = records;
        backend
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    pub fn stored(&self) -> Vec<R> {
        self.records.borrow().clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl<R: Clone> ListBackend<R> for MemBackend<R> {
    fn load(&self) -> Vec<R> {
        self.records.borrow().clone()
    }

    fn save(&self, records: &[R]) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(RegdeskError::Store("Simulated write error".to_string()));
        }
        *self.records.borrow_mut() = records.to_vec();
        *self.saves.borrow_mut() += 1;
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
