use super::KeyValueStore;
use crate::error::{Result, ShelfError};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// In-memory key-value store for testing.
///
/// Uses `RefCell` for interior mutability since shelf is single-threaded.
/// Counts writes so tests can assert that every mutation reaches storage.
#[derive(Default)]
pub struct MemBackend {
    entries: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
    simulate_write_error: Cell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, bypassing the write counter.
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Number of successful `set`/`remove` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl KeyValueStore for MemBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(ShelfError::Store("Simulated write error".to_string()));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(ShelfError::Store("Simulated write error".to_string()));
        }
        self.entries.borrow_mut().remove(key);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
