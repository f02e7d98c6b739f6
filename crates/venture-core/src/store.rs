//! The `VentureStore` trait implemented by storage backends.
//!
//! Higher layers (`venture-engine`) depend on this abstraction, not on any
//! concrete backend. The trait is the whole write/read surface of a backend:
//! there is deliberately no operation that updates or deletes a committed
//! fact, and no operation that writes the current view directly — the view
//! changes only as a side effect of an append.
//!
//! All methods return `Send` futures so the trait can be used from
//! multi-threaded async runtimes.

use std::future::Future;

use crate::fact::{Fact, FactDraft, VentureId};

/// Abstraction over a venture store backend.
///
/// Both append methods must run the projection sync rule
/// ([`crate::projection::apply`], or its SQL equivalent) atomically with the
/// ledger insert: a crash or error between the two must never leave the view
/// out of step with the ledger.
pub trait VentureStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Appends ───────────────────────────────────────────────────────────

  /// Allocate a fresh venture id and append the venture's first fact, as one
  /// atomic step. Two concurrent calls must never observe the same id.
  fn append_first(
    &self,
    draft: FactDraft,
  ) -> impl Future<Output = Result<Fact, Self::Error>> + Send + '_;

  /// Append a successor fact for an existing venture. The caller supplies
  /// both halves of the composite key; a duplicate
  /// `(venture_id, version_time)` is rejected with the backend's conflict
  /// error and leaves the store untouched.
  fn append(
    &self,
    fact: Fact,
  ) -> impl Future<Output = Result<Fact, Self::Error>> + Send + '_;

  // ── Current-view reads ────────────────────────────────────────────────

  /// The current row for one venture. `None` if it was never created or its
  /// latest fact retired it.
  fn current_view(
    &self,
    id: VentureId,
  ) -> impl Future<Output = Result<Option<Fact>, Self::Error>> + Send + '_;

  /// Current rows for the requested ventures, in request order; ids with no
  /// current row are omitted.
  fn current_view_many(
    &self,
    ids: Vec<VentureId>,
  ) -> impl Future<Output = Result<Vec<Fact>, Self::Error>> + Send + '_;

  /// All current rows, ordered by venture id.
  fn current_view_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Fact>, Self::Error>> + Send + '_;
}
