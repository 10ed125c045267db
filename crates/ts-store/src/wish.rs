//! Wish bookkeeping: point-cost goals redeemed against accumulated score.
//!
//! Plain arithmetic over stored rows; the scoring engine knows nothing
//! about wishes. Progress is total score over cost, capped at 1, and
//! redeeming flips a pending wish once the total covers it.

use rusqlite::{OptionalExtension, params};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::store::Store;

/// Smallest allowed wish cost.
pub const MIN_WISH_COST: i64 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WishStatus {
    Pending,
    Redeemed,
}

impl WishStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            WishStatus::Pending => "pending",
            WishStatus::Redeemed => "redeemed",
        }
    }

    fn parse(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(WishStatus::Pending),
            "redeemed" => Ok(WishStatus::Redeemed),
            other => Err(StoreError::InvalidData(format!(
                "unknown wish status '{other}'"
            ))),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Wish {
    pub id: i64,
    pub name: String,
    pub cost: i64,
    pub status: WishStatus,
    /// Fraction of the cost covered by accumulated score, capped at 1.
    pub progress: f64,
    pub created_ts: u64,
    pub redeemed_ts: Option<u64>,
}

impl Store {
    /// Add a wish. The cost floor keeps goals meaningful.
    pub fn add_wish(&self, name: &str, cost: i64, now_ts: u64) -> Result<i64> {
        if name.trim().is_empty() {
            return Err(StoreError::InvalidData("wish name is empty".to_string()));
        }
        if cost < MIN_WISH_COST {
            return Err(StoreError::InvalidData(format!(
                "wish cost {cost} is below the minimum of {MIN_WISH_COST}"
            )));
        }

        self.conn().execute(
            "INSERT INTO wishes (name, cost, status, progress, created_ts)
             VALUES (?1, ?2, ?3, 0.0, ?4)",
            params![
                name.trim(),
                cost,
                WishStatus::Pending.as_str(),
                now_ts as i64
            ],
        )?;
        Ok(self.conn().last_insert_rowid())
    }

    /// All wishes, newest first, with pending progress refreshed against the
    /// current total score.
    pub fn wishes(&self) -> Result<Vec<Wish>> {
        let total = self.total_score()?;
        self.refresh_wish_progress(total)?;

        let mut stmt = self.conn().prepare(
            "SELECT id, name, cost, status, progress, created_ts, redeemed_ts
             FROM wishes ORDER BY created_ts DESC, id DESC",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, f64>(4)?,
                    row.get::<_, i64>(5)?,
                    row.get::<_, Option<i64>>(6)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, name, cost, status, progress, created_ts, redeemed_ts)| {
                Ok(Wish {
                    id,
                    name,
                    cost,
                    status: WishStatus::parse(&status)?,
                    progress,
                    created_ts: created_ts as u64,
                    redeemed_ts: redeemed_ts.map(|ts| ts as u64),
                })
            })
            .collect()
    }

    /// Redeem a pending wish, gated on the accumulated total covering its
    /// cost. Returns the redeemed wish.
    pub fn redeem_wish(&self, id: i64, now_ts: u64) -> Result<Wish> {
        let total = self.total_score()?;

        let pending: Option<(String, i64, i64)> = self
            .conn()
            .query_row(
                "SELECT name, cost, created_ts FROM wishes WHERE id = ?1 AND status = 'pending'",
                [id],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;
        let (name, cost, created_ts) = pending.ok_or(StoreError::WishNotFound(id))?;

        if total < cost as f64 {
            return Err(StoreError::InsufficientScore { cost, total });
        }

        self.conn().execute(
            "UPDATE wishes SET status = ?1, progress = 1.0, redeemed_ts = ?2
             WHERE id = ?3",
            params![WishStatus::Redeemed.as_str(), now_ts as i64, id],
        )?;
        tracing::info!("redeemed wish '{name}' for {cost} points");

        Ok(Wish {
            id,
            name,
            cost,
            status: WishStatus::Redeemed,
            progress: 1.0,
            created_ts: created_ts as u64,
            redeemed_ts: Some(now_ts),
        })
    }

    fn refresh_wish_progress(&self, total_score: f64) -> Result<()> {
        self.conn().execute(
            "UPDATE wishes SET progress = MIN(1.0, ?1 / cost) WHERE status = 'pending'",
            params![total_score.max(0.0)],
        )?;
        Ok(())
    }
}
