//! SQLite backend for the venture ledger.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. The ledger table carries triggers that
//! abort any UPDATE or DELETE, making append-only a property of the database
//! itself; the current view is maintained in the same transaction as every
//! ledger insert. Venture ids are allocated monotonically and never reused.

mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
