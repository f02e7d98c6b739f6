//! [`MemoryStore`] — the in-process implementation of [`VentureStore`].

use std::{collections::BTreeMap, sync::RwLock};

use venture_core::{
  fact::{Fact, FactDraft, VentureId},
  projection::{self, CurrentView},
  store::VentureStore,
};

use crate::{Error, Result};

// ─── Ledger ──────────────────────────────────────────────────────────────────

/// The append-only fact table, keyed by composite identity.
///
/// Deliberately exposes no update or delete operation — immutability of
/// committed facts is a property of this type, not a convention of the
/// calling code.
#[derive(Default)]
pub(crate) struct Ledger {
  pub(crate) facts: BTreeMap<(VentureId, i64), Fact>,
}

impl Ledger {
  fn append(&mut self, fact: Fact) -> Result<Fact> {
    let key = (fact.venture_id, fact.version_time);
    if self.facts.contains_key(&key) {
      return Err(Error::Conflict {
        venture_id:   fact.venture_id,
        version_time: fact.version_time,
      });
    }
    self.facts.insert(key, fact.clone());
    Ok(fact)
  }

  fn len(&self) -> usize { self.facts.len() }
}

// ─── Store ───────────────────────────────────────────────────────────────────

#[derive(Default)]
pub(crate) struct Inner {
  pub(crate) ledger:  Ledger,
  pub(crate) current: CurrentView,
}

/// A venture store held entirely in process memory.
#[derive(Default)]
pub struct MemoryStore {
  pub(crate) inner: RwLock<Inner>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// Number of committed facts. Diagnostic only; the ledger itself is not
  /// readable through the store surface.
  pub fn ledger_len(&self) -> usize {
    self.inner.read().expect("venture store lock poisoned").ledger.len()
  }
}

/// The lowest positive integer not currently in the live set. Retired ids
/// become free again.
fn lowest_free_id(current: &CurrentView) -> VentureId {
  let mut candidate = 1;
  while current.contains_key(&VentureId(candidate)) {
    candidate += 1;
  }
  VentureId(candidate)
}

/// Ledger insert plus projection sync, under the caller's write lock.
fn commit(inner: &mut Inner, fact: Fact) -> Result<Fact> {
  let fact = inner.ledger.append(fact)?;
  projection::apply(&mut inner.current, &fact);
  Ok(fact)
}

// ─── VentureStore impl ───────────────────────────────────────────────────────

impl VentureStore for MemoryStore {
  type Error = Error;

  async fn append_first(&self, draft: FactDraft) -> Result<Fact> {
    let mut inner = self.inner.write().expect("venture store lock poisoned");
    let id = lowest_free_id(&inner.current);
    tracing::debug!(venture_id = %id, "allocated lowest free venture id");
    commit(&mut inner, draft.into_fact(id))
  }

  async fn append(&self, fact: Fact) -> Result<Fact> {
    let mut inner = self.inner.write().expect("venture store lock poisoned");
    commit(&mut inner, fact)
  }

  async fn current_view(&self, id: VentureId) -> Result<Option<Fact>> {
    let inner = self.inner.read().expect("venture store lock poisoned");
    Ok(inner.current.get(&id).cloned())
  }

  async fn current_view_many(&self, ids: Vec<VentureId>) -> Result<Vec<Fact>> {
    let inner = self.inner.read().expect("venture store lock poisoned");
    Ok(
      ids
        .iter()
        .filter_map(|id| inner.current.get(id).cloned())
        .collect(),
    )
  }

  async fn current_view_all(&self) -> Result<Vec<Fact>> {
    let inner = self.inner.read().expect("venture store lock poisoned");
    Ok(inner.current.values().cloned().collect())
  }
}
