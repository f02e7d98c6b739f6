//! [`QueryService`] — reads against the current view.
//!
//! All reads go through the projection; the ledger is write-only from the
//! perspective of normal traffic.

use std::sync::Arc;

use venture_core::{fact::VentureId, store::VentureStore, venture::Venture};

use crate::error::{Error, Result};

pub struct QueryService<S> {
  store: Arc<S>,
}

impl<S> QueryService<S>
where
  S: VentureStore,
{
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// The current state of one venture. [`Error::NotFound`] if it was never
  /// created or has been retired.
  pub async fn get_one(&self, id: VentureId) -> Result<Venture> {
    self
      .store
      .current_view(id)
      .await
      .map_err(Error::store)?
      .map(Venture::from)
      .ok_or(Error::NotFound(id))
  }

  /// The current state of the requested ventures, in request order. Missing
  /// ids are omitted, never an error.
  pub async fn get_many(&self, ids: &[VentureId]) -> Result<Vec<Venture>> {
    let facts = self
      .store
      .current_view_many(ids.to_vec())
      .await
      .map_err(Error::store)?;
    Ok(facts.into_iter().map(Venture::from).collect())
  }

  /// All live ventures, ordered by id.
  pub async fn get_all(&self) -> Result<Vec<Venture>> {
    let facts = self.store.current_view_all().await.map_err(Error::store)?;
    Ok(facts.into_iter().map(Venture::from).collect())
  }
}
