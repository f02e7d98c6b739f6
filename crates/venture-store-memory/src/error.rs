//! Error type for `venture-store-memory`.

use thiserror::Error;
use venture_core::VentureId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  /// A fact with this composite key was already committed. Surfaced to the
  /// caller unchanged; the store never retries on its own.
  #[error("duplicate fact for venture {venture_id} at version {version_time}")]
  Conflict {
    venture_id:   VentureId,
    version_time: i64,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
