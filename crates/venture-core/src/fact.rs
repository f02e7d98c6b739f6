//! Fact types — the fundamental unit of the venture ledger.
//!
//! A fact is one accepted state transition of a venture. Facts are never
//! updated or deleted; later transitions are recorded as new facts with a
//! later `version_time`, and the current view is derived from them.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ─── VentureId ───────────────────────────────────────────────────────────────

/// Identifier of a venture. Allocated by the store backend, never by callers.
///
/// Serialised as a decimal string, matching the wire form expected by the
/// HTTP collaborators (`"id": "1"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VentureId(pub u64);

impl fmt::Display for VentureId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(&self.0, f)
  }
}

impl FromStr for VentureId {
  type Err = std::num::ParseIntError;

  fn from_str(s: &str) -> Result<Self, Self::Err> { s.parse::<u64>().map(Self) }
}

impl Serialize for VentureId {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&self.0)
  }
}

impl<'de> Deserialize<'de> for VentureId {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = String::deserialize(deserializer)?;
    raw
      .parse()
      .map_err(|_| serde::de::Error::custom(format!("invalid venture id: {raw:?}")))
  }
}

// ─── Fact ────────────────────────────────────────────────────────────────────

/// One immutable ledger row. Once committed, no field ever changes.
///
/// `(venture_id, version_time)` is the composite identity; `version_time` is
/// milliseconds since the epoch and strictly increases per venture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
  pub venture_id:   VentureId,
  pub version_time: i64,
  pub description:  String,
  /// Comma-joined list of positive integer ids; empty when the venture has
  /// no orders.
  pub orders:       String,
  pub state:        String,
  /// A retired fact removes the venture from the current view without
  /// erasing its history.
  pub retired:      bool,
  /// Opaque free-text carried along unchanged.
  pub extra:        String,
}

// ─── FactDraft ───────────────────────────────────────────────────────────────

/// Input to [`crate::store::VentureStore::append_first`].
/// The venture id is always allocated by the store; it is not accepted from
/// callers. A draft always describes a live venture (`retired = false`).
#[derive(Debug, Clone)]
pub struct FactDraft {
  pub version_time: i64,
  pub description:  String,
  pub orders:       String,
  pub state:        String,
  pub extra:        String,
}

impl FactDraft {
  /// Complete the draft with a freshly allocated id.
  pub fn into_fact(self, venture_id: VentureId) -> Fact {
    Fact {
      venture_id,
      version_time: self.version_time,
      description: self.description,
      orders: self.orders,
      state: self.state,
      retired: false,
      extra: self.extra,
    }
  }
}
