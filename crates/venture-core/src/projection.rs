//! The projection sync rule — synchronous derived-view maintenance on write.
//!
//! The current view holds at most one row per venture: the most recently
//! committed fact, unless that fact retired the venture. The rule below is a
//! pure function of the appended fact; backends apply it inside the same
//! transaction (or lock section) as the ledger insert, so readers never
//! observe a fact without its projection effect.

use std::collections::BTreeMap;

use crate::fact::{Fact, VentureId};

/// In-memory shape of the projection: latest live fact per venture, ordered
/// by id.
pub type CurrentView = BTreeMap<VentureId, Fact>;

/// Apply one newly appended fact to the view.
///
/// Idempotent: applying the same fact twice leaves the view unchanged. A
/// non-retired fact for a previously retired venture recreates its row — the
/// rule itself permits revival, though no write path currently exercises it.
pub fn apply(view: &mut CurrentView, fact: &Fact) {
  if fact.retired {
    view.remove(&fact.venture_id);
  } else {
    view.insert(fact.venture_id, fact.clone());
  }
}
