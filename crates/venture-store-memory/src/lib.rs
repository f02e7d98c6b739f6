//! In-process backend for the venture ledger.
//!
//! Holds the ledger and current view behind one [`std::sync::RwLock`], so
//! the allocate-then-append critical section is a single exclusive write
//! section and reads proceed concurrently. Venture ids are allocated
//! lowest-free and may be reused after retirement — suitable only when no
//! durable history has to resolve an id later.

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::MemoryStore;
