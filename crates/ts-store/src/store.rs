use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};

use ts_core::{
    BehaviorRecord, EngineConfig, LoggedBehavior, RecentWindow, ResolvedLevel, ScoreResult,
    UserState,
};

use crate::error::{Result, StoreError};
use crate::schema;

/// One persisted, scored behavior as read back for display.
#[derive(Clone, Debug)]
pub struct BehaviorRow {
    pub id: i64,
    pub name: Option<String>,
    pub level: ResolvedLevel,
    pub duration: u32,
    pub mood: u8,
    pub start_ts: u64,
    pub end_ts: u64,
    pub final_score: f64,
    pub energy_delta: f64,
}

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    // --- Metadata ---

    pub fn get_metadata(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM metadata WHERE key = ?1")?;
        let result = stmt.query_row([key], |row| row.get(0)).optional()?;
        Ok(result)
    }

    pub fn set_metadata(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    // --- User state ---

    /// Engine-ready snapshot of the single user: energy, the recent-behavior
    /// window oldest→newest, and the beginner flag derived from first use.
    /// Creates the singleton row on first call.
    pub fn load_user_state(&self, config: &EngineConfig, now_ts: u64) -> Result<UserState> {
        self.ensure_user_row(config, now_ts)?;

        let (current_energy, last_activity_ts, first_use_ts) = self.conn.query_row(
            "SELECT current_energy, last_activity_ts, first_use_ts FROM user_state WHERE id = 1",
            [],
            |row| {
                Ok((
                    row.get::<_, f64>(0)?,
                    row.get::<_, Option<i64>>(1)?,
                    row.get::<_, i64>(2)?,
                ))
            },
        )?;

        let recent = self.load_recent_window(config.recent_window)?;
        let beginner_period = now_ts.saturating_sub(first_use_ts as u64)
            < u64::from(config.beginner_period_days) * 86_400;

        Ok(UserState {
            current_energy,
            recent,
            beginner_period,
            last_activity_ts: last_activity_ts.map(|ts| ts as u64),
        })
    }

    fn ensure_user_row(&self, config: &EngineConfig, now_ts: u64) -> Result<()> {
        let exists: Option<i64> = self
            .conn
            .query_row("SELECT id FROM user_state WHERE id = 1", [], |row| {
                row.get(0)
            })
            .optional()?;
        if exists.is_none() {
            let initial = UserState::new(config);
            self.conn.execute(
                "INSERT INTO user_state (id, current_energy, last_activity_ts, first_use_ts)
                 VALUES (1, ?1, NULL, ?2)",
                params![initial.current_energy, now_ts as i64],
            )?;
            tracing::info!("created user state, initial energy {}", initial.current_energy);
        }
        Ok(())
    }

    fn load_recent_window(&self, capacity: usize) -> Result<RecentWindow> {
        let mut stmt = self.conn.prepare(
            "SELECT name, level, duration, end_ts FROM behaviors
             ORDER BY end_ts DESC, id DESC LIMIT ?1",
        )?;

        let mut rows: Vec<LoggedBehavior> = stmt
            .query_map([capacity as i64], |row| {
                Ok((
                    row.get::<_, Option<String>>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, i64>(3)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?
            .into_iter()
            .map(|(name, level, duration, end_ts)| {
                Ok(LoggedBehavior {
                    level: parse_level(&level)?,
                    name,
                    duration: duration as u32,
                    end_ts: end_ts as u64,
                })
            })
            .collect::<Result<_>>()?;

        // Newest-first from the query; the window wants oldest→newest.
        rows.reverse();
        Ok(RecentWindow::from_entries(capacity, rows))
    }

    /// Persist one scored behavior and the updated user state in a single
    /// transaction. Returns the new row id.
    pub fn record_scored(
        &self,
        behavior: &BehaviorRecord,
        result: &ScoreResult,
        state: &UserState,
    ) -> Result<i64> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute(
            "INSERT INTO behaviors (
                name, level, duration, mood, start_ts, end_ts,
                base_score, dynamic_coeff, final_score, energy_delta
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                behavior.name,
                result.resolved_level.as_str(),
                behavior.duration,
                behavior.mood,
                behavior.start_ts as i64,
                behavior.end_ts as i64,
                result.base_score,
                result.dynamic_coeff,
                result.final_score,
                result.energy_delta,
            ],
        )?;
        let row_id = tx.last_insert_rowid();

        tx.execute(
            "UPDATE user_state SET current_energy = ?1, last_activity_ts = ?2 WHERE id = 1",
            params![
                state.current_energy,
                state.last_activity_ts.map(|ts| ts as i64)
            ],
        )?;

        tx.commit()?;
        Ok(row_id)
    }

    /// Persist an energy-only update (passive recovery, daily reset) without
    /// adding a history row.
    pub fn save_energy(&self, state: &UserState) -> Result<()> {
        self.conn.execute(
            "UPDATE user_state SET current_energy = ?1 WHERE id = 1",
            params![state.current_energy],
        )?;
        Ok(())
    }

    // --- History & totals ---

    /// Sum of every final score ever recorded; what wishes redeem against.
    pub fn total_score(&self) -> Result<f64> {
        let total: Option<f64> =
            self.conn
                .query_row("SELECT SUM(final_score) FROM behaviors", [], |row| {
                    row.get(0)
                })?;
        Ok(total.unwrap_or(0.0))
    }

    pub fn recent_records(&self, limit: usize) -> Result<Vec<BehaviorRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, level, duration, mood, start_ts, end_ts, final_score, energy_delta
             FROM behaviors ORDER BY end_ts DESC, id DESC LIMIT ?1",
        )?;
        let rows = stmt
            .query_map([limit as i64], row_to_tuple)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        rows.into_iter().map(tuple_to_row).collect()
    }

    /// Records whose start falls on or after the given day boundary.
    pub fn records_since(&self, since_ts: u64) -> Result<Vec<BehaviorRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, level, duration, mood, start_ts, end_ts, final_score, energy_delta
             FROM behaviors WHERE start_ts >= ?1 ORDER BY start_ts ASC",
        )?;
        let rows = stmt
            .query_map([since_ts as i64], row_to_tuple)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        rows.into_iter().map(tuple_to_row).collect()
    }
}

type RawRow = (
    i64,
    Option<String>,
    String,
    i64,
    i64,
    i64,
    i64,
    f64,
    f64,
);

fn row_to_tuple(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        row.get(8)?,
    ))
}

fn tuple_to_row(raw: RawRow) -> Result<BehaviorRow> {
    let (id, name, level, duration, mood, start_ts, end_ts, final_score, energy_delta) = raw;
    Ok(BehaviorRow {
        id,
        name,
        level: parse_level(&level)?,
        duration: duration as u32,
        mood: mood as u8,
        start_ts: start_ts as u64,
        end_ts: end_ts as u64,
        final_score,
        energy_delta,
    })
}

fn parse_level(s: &str) -> Result<ResolvedLevel> {
    s.parse()
        .map_err(|_| StoreError::InvalidData(format!("unresolvable level in store: '{s}'")))
}
