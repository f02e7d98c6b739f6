//! [`WriteCoordinator`] — validates, normalizes, and applies creation and
//! partial-update requests by appending ledger facts.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use venture_core::{
  fact::{Fact, FactDraft, VentureId},
  store::VentureStore,
  venture::Venture,
};

use crate::{
  error::{Error, Result},
  validate,
};

// ─── Create input ────────────────────────────────────────────────────────────

/// Input to [`WriteCoordinator::create`], as received from collaborators.
/// Free text is normalized and validated before anything is committed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewVenture {
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub state:       String,
  #[serde(default)]
  pub orders:      String,
  #[serde(default)]
  pub extra:       String,
}

// ─── Change set ──────────────────────────────────────────────────────────────

/// A validated set of field updates for [`WriteCoordinator::modify`].
/// Parsed once per request; unknown field names and malformed values are
/// collected into a single validation error before any venture is touched.
#[derive(Debug, Default)]
struct ChangeSet {
  description: Option<String>,
  orders:      Option<String>,
  state:       Option<String>,
  dead:        Option<bool>,
  extra:       Option<String>,
}

impl ChangeSet {
  fn parse(changes: &serde_json::Map<String, Value>) -> Result<Self> {
    let mut set = Self::default();
    let mut problems = Vec::new();

    for (field, value) in changes {
      match field.as_str() {
        "description" => match value.as_str() {
          Some(raw) => {
            let cleaned = validate::clean_text(raw);
            validate::check_required("description", &cleaned, &mut problems);
            set.description = Some(cleaned);
          }
          None => problems.push("description must be a string".to_string()),
        },
        "state" => match value.as_str() {
          Some(raw) => {
            let cleaned = validate::clean_text(raw);
            validate::check_required("state", &cleaned, &mut problems);
            set.state = Some(cleaned);
          }
          None => problems.push("state must be a string".to_string()),
        },
        "orders" => match value.as_str() {
          Some(raw) => {
            let cleaned = validate::clean_orders(raw);
            validate::check_orders(&cleaned, &mut problems);
            set.orders = Some(cleaned);
          }
          None => problems.push("orders must be a string".to_string()),
        },
        "dead" => match value.as_bool() {
          Some(flag) => set.dead = Some(flag),
          None => problems.push("dead must be a boolean".to_string()),
        },
        "extra" => match value.as_str() {
          Some(raw) => set.extra = Some(validate::clean_text(raw)),
          None => problems.push("extra must be a string".to_string()),
        },
        unknown => problems.push(format!("unknown field: {unknown}")),
      }
    }

    if problems.is_empty() {
      Ok(set)
    } else {
      Err(Error::Validation(problems))
    }
  }

  /// Build the successor fact for `current`. The new `version_time` is
  /// strictly later than the current one even when two writes land in the
  /// same millisecond.
  fn apply_to(&self, current: Fact) -> Fact {
    let mut next = current;
    next.version_time =
      Utc::now().timestamp_millis().max(next.version_time + 1);

    if let Some(description) = &self.description {
      next.description = description.clone();
    }
    if let Some(orders) = &self.orders {
      next.orders = orders.clone();
    }
    if let Some(state) = &self.state {
      next.state = state.clone();
    }
    if let Some(dead) = self.dead {
      next.retired = dead;
    }
    if let Some(extra) = &self.extra {
      next.extra = extra.clone();
    }
    next
  }
}

// ─── Coordinator ─────────────────────────────────────────────────────────────

/// The single write path into a venture store.
pub struct WriteCoordinator<S> {
  store: Arc<S>,
}

impl<S> WriteCoordinator<S>
where
  S: VentureStore,
{
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Validate, normalize, and commit a new venture.
  ///
  /// All field problems are accumulated into one
  /// [`Error::Validation`](crate::Error::Validation); nothing is allocated
  /// or appended unless every check passes.
  pub async fn create(&self, input: NewVenture) -> Result<Venture> {
    let description = validate::clean_text(&input.description);
    let state = validate::clean_text(&input.state);
    let orders = validate::clean_orders(&input.orders);
    let extra = validate::clean_text(&input.extra);

    let mut problems = Vec::new();
    validate::check_required("description", &description, &mut problems);
    validate::check_required("state", &state, &mut problems);
    validate::check_orders(&orders, &mut problems);
    if !problems.is_empty() {
      return Err(Error::Validation(problems));
    }

    let draft = FactDraft {
      version_time: Utc::now().timestamp_millis(),
      description,
      orders,
      state,
      extra,
    };

    let fact = self.store.append_first(draft).await.map_err(|e| {
      tracing::warn!(error = %e, "create append failed");
      Error::store(e)
    })?;

    tracing::info!(venture_id = %fact.venture_id, "created venture");
    Ok(Venture::from(fact))
  }

  /// Apply the named fields to every requested venture present in the
  /// current view. Ids with no current row are skipped, not errors; the
  /// result holds only the ventures actually updated.
  pub async fn modify(
    &self,
    ids: &[VentureId],
    changes: &serde_json::Map<String, Value>,
  ) -> Result<Vec<Venture>> {
    let changes = ChangeSet::parse(changes)?;

    let mut updated = Vec::new();
    for &id in ids {
      let current =
        self.store.current_view(id).await.map_err(Error::store)?;
      let Some(current) = current else {
        tracing::debug!(venture_id = %id, "modify skipped absent venture");
        continue;
      };

      let fact =
        self.store.append(changes.apply_to(current)).await.map_err(|e| {
          tracing::warn!(venture_id = %id, error = %e, "modify append failed");
          Error::store(e)
        })?;
      updated.push(Venture::from(fact));
    }

    tracing::info!(count = updated.len(), "modified ventures");
    Ok(updated)
  }
}
