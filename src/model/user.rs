use chrono::NaiveDateTime;
use rocket::serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row of the `leetcode_users` table: the latest fetched stats for a
/// username. `ranking` and `reputation` stay NULL when the profile hides them.
#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
#[serde(crate = "rocket::serde")]
pub struct UserStat {
    pub username: String,
    pub ranking: Option<i64>,
    pub reputation: Option<i64>,
    pub easy: i64,
    pub medium: i64,
    pub hard: i64,
    pub total: i64,
    pub last_updated: NaiveDateTime,
}
