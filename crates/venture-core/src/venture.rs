//! The wire form of a venture, as handed to HTTP collaborators.
//!
//! Field names and omission rules match the protocol the surrounding service
//! already speaks: `orders`, `dead`, and `extra` are dropped from the JSON
//! when they carry no information.

use serde::{Deserialize, Serialize};

use crate::fact::{Fact, VentureId};

/// A venture as seen by callers: the projection row of its latest fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venture {
  pub id:            VentureId,
  /// The fact's `version_time`, in milliseconds since the epoch.
  pub last_modified: i64,
  pub description:   String,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub orders:        String,
  pub state:         String,
  #[serde(default, skip_serializing_if = "is_false")]
  pub dead:          bool,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub extra:         String,
}

fn is_false(flag: &bool) -> bool { !*flag }

impl From<Fact> for Venture {
  fn from(fact: Fact) -> Self {
    Self {
      id:            fact.venture_id,
      last_modified: fact.version_time,
      description:   fact.description,
      orders:        fact.orders,
      state:         fact.state,
      dead:          fact.retired,
      extra:         fact.extra,
    }
  }
}
