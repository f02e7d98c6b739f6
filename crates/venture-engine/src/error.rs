//! Error type for `venture-engine`.

use thiserror::Error;
use venture_core::VentureId;

/// An error returned by the write coordinator or query service.
#[derive(Debug, Error)]
pub enum Error {
  /// One or more input violations. Always carries every problem found, not
  /// just the first; the caller's fault and never retried here.
  #[error("validation failed: {}", .0.join("; "))]
  Validation(Vec<String>),

  /// Raised only by [`crate::QueryService::get_one`]; bulk reads omit
  /// missing ids instead.
  #[error("venture {0} not found")]
  NotFound(VentureId),

  /// Underlying storage failure (including allocation races). Opaque to
  /// callers; the detail is logged where it occurs.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn store(
    e: impl std::error::Error + Send + Sync + 'static,
  ) -> Self {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
