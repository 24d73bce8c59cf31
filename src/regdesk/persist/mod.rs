//! # Persistence
//!
//! Two kinds of files back the desks:
//!
//! - **Reference data** (`MountainList.csv`, `FeastMenu.csv`): delimited text,
//!   read once at startup by [`reference`]. Malformed lines are skipped and
//!   counted in a [`reference::LoadReport`]; the files are never written.
//! - **Transactional lists** (`registrations.dat`, `customers.dat`,
//!   `feast_orders.dat`): a whole-list dump behind [`ListBackend`]. The format is
//!   private to this program (JSON today) and carries no schema version.
//!
//! ## Backends
//!
//! - [`fs::FsBackend`]: production. Saves go through a temp file and a rename so
//!   a crash never leaves a half-written list behind.
//! - [`mem::MemBackend`]: tests. Can simulate write failures.
//!
//! Loading is forgiving: a missing, unreadable, or undecodable list is logged
//! and treated as empty. Saving is not: failures are returned so the caller can
//! report them, and the in-memory store is left untouched either way.

use crate::error::Result;

pub mod fs;
pub mod mem;
pub mod reference;

pub use fs::FsBackend;
pub use mem::MemBackend;

/// Whole-list storage for one record type.
pub trait ListBackend<R> {
    /// Reads the full list. Never fails; problems are logged and yield `[]`.
    fn load(&self) -> Vec<R>;

    /// Replaces the stored list with `records`.
    fn save(&self, records: &[R]) -> Result<()>;

    /// Where the list lives, for messages ("registrations.dat", "memory").
    fn location(&self) -> String;
}
