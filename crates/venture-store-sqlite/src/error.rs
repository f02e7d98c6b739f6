//! Error type for `venture-store-sqlite`.

use thiserror::Error;
use venture_core::VentureId;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// A fact with this composite key was already committed. Surfaced to the
  /// caller unchanged; the store never retries on its own.
  #[error("duplicate fact for venture {venture_id} at version {version_time}")]
  Conflict {
    venture_id:   VentureId,
    version_time: i64,
  },

  /// An UPDATE or DELETE reached the ledger and was aborted by its triggers.
  /// Indicates a programming bug in the calling code, never user input.
  #[error("attempted to rewrite the append-only ledger: {0}")]
  ImmutableLedger(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
