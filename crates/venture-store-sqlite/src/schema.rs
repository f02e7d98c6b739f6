//! SQL schema for the sqlite venture store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- The ledger is strictly append-only. The triggers below make that a rule of
-- the database itself rather than a convention of the calling code.
CREATE TABLE IF NOT EXISTS ledger (
    venture_id   INTEGER NOT NULL,
    version_time INTEGER NOT NULL,   -- ms since epoch; strictly increasing per venture
    description  TEXT    NOT NULL,
    orders       TEXT    NOT NULL DEFAULT '',
    state        TEXT    NOT NULL,
    retired      INTEGER NOT NULL DEFAULT 0,
    extra        TEXT    NOT NULL DEFAULT '',
    PRIMARY KEY (venture_id, version_time)
);

CREATE TRIGGER IF NOT EXISTS ledger_no_update
BEFORE UPDATE ON ledger
BEGIN
    SELECT RAISE(ABORT, 'ledger is append-only');
END;

CREATE TRIGGER IF NOT EXISTS ledger_no_delete
BEFORE DELETE ON ledger
BEGIN
    SELECT RAISE(ABORT, 'ledger is append-only');
END;

-- Derived view: the latest non-retired fact per venture. Written only inside
-- the same transaction as a ledger insert, never independently.
CREATE TABLE IF NOT EXISTS current_view (
    venture_id   INTEGER PRIMARY KEY,
    version_time INTEGER NOT NULL,
    description  TEXT    NOT NULL,
    orders       TEXT    NOT NULL DEFAULT '',
    state        TEXT    NOT NULL,
    retired      INTEGER NOT NULL DEFAULT 0,
    extra        TEXT    NOT NULL DEFAULT ''
);

PRAGMA user_version = 1;
";
