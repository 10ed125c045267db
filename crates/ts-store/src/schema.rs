use rusqlite::Connection;

use crate::error::Result;

pub const SCHEMA_VERSION: i64 = 1;

pub fn initialize(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA journal_mode = WAL;")?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.pragma_update(None, "busy_timeout", 5000)?;

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS metadata (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS behaviors (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            name          TEXT,
            level         TEXT NOT NULL,
            duration      INTEGER NOT NULL,
            mood          INTEGER NOT NULL DEFAULT 3,
            start_ts      INTEGER NOT NULL,
            end_ts        INTEGER NOT NULL,
            base_score    REAL NOT NULL,
            dynamic_coeff REAL NOT NULL,
            final_score   REAL NOT NULL,
            energy_delta  REAL NOT NULL,
            created_ts    INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        );

        CREATE TABLE IF NOT EXISTS user_state (
            id               INTEGER PRIMARY KEY CHECK (id = 1),
            current_energy   REAL NOT NULL,
            last_activity_ts INTEGER,
            first_use_ts     INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS wishes (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            cost        INTEGER NOT NULL,
            status      TEXT NOT NULL DEFAULT 'pending',
            progress    REAL NOT NULL DEFAULT 0.0,
            created_ts  INTEGER NOT NULL,
            redeemed_ts INTEGER
        );

        CREATE INDEX IF NOT EXISTS idx_behaviors_start ON behaviors(start_ts);
        CREATE INDEX IF NOT EXISTS idx_behaviors_level ON behaviors(level);
        CREATE INDEX IF NOT EXISTS idx_wishes_status ON wishes(status);
        ",
    )?;

    conn.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?1)",
        [SCHEMA_VERSION.to_string()],
    )?;

    Ok(())
}

pub fn get_schema_version(conn: &Connection) -> Result<Option<i64>> {
    let mut stmt = conn.prepare("SELECT value FROM metadata WHERE key = 'schema_version'")?;
    let version = stmt
        .query_row([], |row| {
            let v: String = row.get(0)?;
            Ok(v.parse::<i64>().unwrap_or(0))
        })
        .ok();
    Ok(version)
}
