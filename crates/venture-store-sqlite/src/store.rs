//! [`SqliteStore`] — the SQLite implementation of [`VentureStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use venture_core::{
  fact::{Fact, FactDraft, VentureId},
  store::VentureStore,
};

use crate::{Error, Result, schema::SCHEMA};

// ─── Error classification ────────────────────────────────────────────────────

/// Classify a low-level database failure into the ledger taxonomy. A trigger
/// abort carrying the append-only message means something tried to rewrite
/// history.
pub(crate) fn map_db_err(e: tokio_rusqlite::Error) -> Error {
  if let tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(
    _,
    Some(message),
  )) = &e
    && message.contains("append-only")
  {
    return Error::ImmutableLedger(message.clone());
  }
  Error::Database(e)
}

/// Like [`map_db_err`], but a primary-key violation on the insert becomes a
/// [`Error::Conflict`] for the attempted composite key.
pub(crate) fn map_append_err(
  e: tokio_rusqlite::Error,
  venture_id: VentureId,
  version_time: i64,
) -> Error {
  if let tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(
    ffi,
    message,
  )) = &e
    && ffi.code == rusqlite::ErrorCode::ConstraintViolation
    && !message.as_deref().is_some_and(|m| m.contains("append-only"))
  {
    return Error::Conflict { venture_id, version_time };
  }
  map_db_err(e)
}

// ─── Row mapping ─────────────────────────────────────────────────────────────

const FACT_COLUMNS: &str =
  "venture_id, version_time, description, orders, state, retired, extra";

fn fact_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Fact> {
  Ok(Fact {
    venture_id:   VentureId(row.get::<_, i64>(0)? as u64),
    version_time: row.get(1)?,
    description:  row.get(2)?,
    orders:       row.get(3)?,
    state:        row.get(4)?,
    retired:      row.get(5)?,
    extra:        row.get(6)?,
  })
}

/// Append one fact to the ledger.
fn insert_fact(
  tx: &rusqlite::Transaction<'_>,
  fact: &Fact,
) -> rusqlite::Result<()> {
  tx.execute(
    "INSERT INTO ledger (venture_id, version_time, description, orders, state, retired, extra)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    rusqlite::params![
      fact.venture_id.0 as i64,
      fact.version_time,
      fact.description,
      fact.orders,
      fact.state,
      fact.retired,
      fact.extra,
    ],
  )?;
  Ok(())
}

/// The projection sync rule, mirrored as SQL inside the append transaction:
/// a retired fact removes the venture's current row, any other fact upserts
/// it.
fn sync_projection(
  tx: &rusqlite::Transaction<'_>,
  fact: &Fact,
) -> rusqlite::Result<()> {
  if fact.retired {
    tx.execute(
      "DELETE FROM current_view WHERE venture_id = ?1",
      rusqlite::params![fact.venture_id.0 as i64],
    )?;
  } else {
    tx.execute(
      "INSERT INTO current_view (venture_id, version_time, description, orders, state, retired, extra)
       VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
       ON CONFLICT (venture_id) DO UPDATE SET
         version_time = excluded.version_time,
         description  = excluded.description,
         orders       = excluded.orders,
         state        = excluded.state,
         retired      = excluded.retired,
         extra        = excluded.extra",
      rusqlite::params![
        fact.venture_id.0 as i64,
        fact.version_time,
        fact.description,
        fact.orders,
        fact.state,
        fact.retired,
        fact.extra,
      ],
    )?;
  }
  Ok(())
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A venture store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All writes
/// go through one connection, so the allocate-then-append critical section is
/// serialised by construction; the primary key backstops it regardless.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── VentureStore impl ───────────────────────────────────────────────────────

impl VentureStore for SqliteStore {
  type Error = Error;

  async fn append_first(&self, draft: FactDraft) -> Result<Fact> {
    let fact = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        // Monotonic allocation over the whole ledger, retired ventures
        // included, so an id is never reused.
        let next: i64 = tx.query_row(
          "SELECT COALESCE(MAX(venture_id), 0) + 1 FROM ledger",
          [],
          |row| row.get(0),
        )?;
        let fact = draft.into_fact(VentureId(next as u64));
        insert_fact(&tx, &fact)?;
        sync_projection(&tx, &fact)?;
        tx.commit()?;
        Ok(fact)
      })
      .await
      .map_err(map_db_err)?;

    tracing::debug!(venture_id = %fact.venture_id, "allocated venture id");
    Ok(fact)
  }

  async fn append(&self, fact: Fact) -> Result<Fact> {
    let venture_id = fact.venture_id;
    let version_time = fact.version_time;

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        insert_fact(&tx, &fact)?;
        sync_projection(&tx, &fact)?;
        tx.commit()?;
        Ok(fact)
      })
      .await
      .map_err(|e| map_append_err(e, venture_id, version_time))
  }

  async fn current_view(&self, id: VentureId) -> Result<Option<Fact>> {
    self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {FACT_COLUMNS} FROM current_view WHERE venture_id = ?1"),
              rusqlite::params![id.0 as i64],
              fact_from_row,
            )
            .optional()?,
        )
      })
      .await
      .map_err(map_db_err)
  }

  async fn current_view_many(&self, ids: Vec<VentureId>) -> Result<Vec<Fact>> {
    self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {FACT_COLUMNS} FROM current_view WHERE venture_id = ?1"
        ))?;

        let mut found = Vec::with_capacity(ids.len());
        for id in ids {
          let fact = stmt
            .query_row(rusqlite::params![id.0 as i64], fact_from_row)
            .optional()?;
          if let Some(fact) = fact {
            found.push(fact);
          }
        }
        Ok(found)
      })
      .await
      .map_err(map_db_err)
  }

  async fn current_view_all(&self) -> Result<Vec<Fact>> {
    self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {FACT_COLUMNS} FROM current_view ORDER BY venture_id"
        ))?;
        let rows = stmt
          .query_map([], fact_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(map_db_err)
  }
}
