use super::DBResult;
use futures::stream::TryStreamExt;
use sqlx::{Pool, Sqlite};

use crate::model::user::UserStat;

/// One row per username: an existing row is overwritten in place, never
/// duplicated. The username column is UNIQUE COLLATE NOCASE, so "Alice" and
/// "alice" hit the same row.
pub async fn upsert_user_stats(pool: &Pool<Sqlite>, stats: &UserStat) -> DBResult<bool> {
    let mut connection = pool.acquire().await?;
    let r = sqlx::query(
        r#"
        INSERT INTO leetcode_users (username, ranking, reputation, easy, medium, hard, total, last_updated)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (username) DO UPDATE SET
            ranking = excluded.ranking,
            reputation = excluded.reputation,
            easy = excluded.easy,
            medium = excluded.medium,
            hard = excluded.hard,
            total = excluded.total,
            last_updated = excluded.last_updated;
        "#,
    )
    .bind(&stats.username)
    .bind(stats.ranking)
    .bind(stats.reputation)
    .bind(stats.easy)
    .bind(stats.medium)
    .bind(stats.hard)
    .bind(stats.total)
    .bind(stats.last_updated)
    .execute(&mut *connection)
    .await?
    .rows_affected();

    Ok(r > 0)
}

pub async fn get_user(pool: &Pool<Sqlite>, username: &str) -> DBResult<Option<UserStat>> {
    let mut connection = pool.acquire().await?;
    let row = sqlx::query_as::<_, UserStat>(
        r#"
        SELECT username, ranking, reputation, easy, medium, hard, total, last_updated
        FROM leetcode_users WHERE username = $1;
        "#,
    )
    .bind(username)
    .fetch_optional(&mut *connection)
    .await?;

    Ok(row)
}

/// Listing hides rows whose ranking never resolved, and orders by total
/// solved so the leaderboard reads top-down.
pub async fn list_users(pool: &Pool<Sqlite>, limit: i64, offset: i64) -> DBResult<Vec<UserStat>> {
    let mut connection = pool.acquire().await?;
    let rows = sqlx::query_as::<_, UserStat>(
        r#"
        SELECT username, ranking, reputation, easy, medium, hard, total, last_updated
        FROM leetcode_users
        WHERE ranking IS NOT NULL
        ORDER BY total DESC
        LIMIT $1 OFFSET $2;
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(&mut *connection)
    .await?;

    Ok(rows)
}

pub async fn count_users(pool: &Pool<Sqlite>) -> DBResult<i64> {
    let mut connection = pool.acquire().await?;
    let total = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM leetcode_users WHERE ranking IS NOT NULL;
        "#,
    )
    .fetch_one(&mut *connection)
    .await?;

    Ok(total)
}

pub async fn get_all_usernames(pool: &Pool<Sqlite>) -> DBResult<Vec<String>> {
    let mut connection = pool.acquire().await?;
    let names = sqlx::query_scalar::<_, String>(
        r#"
        SELECT username FROM leetcode_users ORDER BY username;
        "#,
    )
    .fetch(&mut *connection)
    .try_collect::<Vec<_>>()
    .await?;

    Ok(names)
}

pub async fn delete_user(pool: &Pool<Sqlite>, username: &str) -> DBResult<bool> {
    let mut connection = pool.acquire().await?;
    let r = sqlx::query(
        r#"
        DELETE FROM leetcode_users WHERE username = $1;
        "#,
    )
    .bind(username)
    .execute(&mut *connection)
    .await?
    .rows_affected();

    Ok(r > 0)
}

pub async fn delete_all_users(pool: &Pool<Sqlite>) -> DBResult<u64> {
    let mut connection = pool.acquire().await?;
    let r = sqlx::query(
        r#"
        DELETE FROM leetcode_users;
        "#,
    )
    .execute(&mut *connection)
    .await?
    .rows_affected();

    Ok(r)
}

pub async fn ping(pool: &Pool<Sqlite>) -> DBResult<i64> {
    let mut connection = pool.acquire().await?;
    let one = sqlx::query_scalar::<_, i64>("SELECT 1;")
        .fetch_one(&mut *connection)
        .await?;

    Ok(one)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> Pool<Sqlite> {
        // One connection, or each pool checkout would see its own :memory: db.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!().run(&pool).await.unwrap();
        pool
    }

    fn ts(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn stats(username: &str, total: i64) -> UserStat {
        UserStat {
            username: username.to_string(),
            ranking: Some(1000),
            reputation: Some(5),
            easy: total,
            medium: 0,
            hard: 0,
            total,
            last_updated: ts(1),
        }
    }

    #[tokio::test]
    async fn upsert_overwrites_in_place() {
        let pool = test_pool().await;

        assert!(upsert_user_stats(&pool, &stats("alice", 10)).await.unwrap());

        let mut updated = stats("alice", 25);
        updated.ranking = Some(900);
        updated.last_updated = ts(2);
        assert!(upsert_user_stats(&pool, &updated).await.unwrap());

        assert_eq!(count_users(&pool).await.unwrap(), 1);
        let row = get_user(&pool, "alice").await.unwrap().unwrap();
        assert_eq!(row.total, 25);
        assert_eq!(row.ranking, Some(900));
        assert_eq!(row.last_updated, ts(2));
    }

    #[tokio::test]
    async fn usernames_are_case_insensitive() {
        let pool = test_pool().await;

        upsert_user_stats(&pool, &stats("Alice", 10)).await.unwrap();
        upsert_user_stats(&pool, &stats("alice", 20)).await.unwrap();

        assert_eq!(count_users(&pool).await.unwrap(), 1);
        assert_eq!(get_user(&pool, "ALICE").await.unwrap().unwrap().total, 20);
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_row() {
        let pool = test_pool().await;

        upsert_user_stats(&pool, &stats("alice", 10)).await.unwrap();
        upsert_user_stats(&pool, &stats("bob", 20)).await.unwrap();

        assert!(delete_user(&pool, "alice").await.unwrap());
        assert!(get_user(&pool, "alice").await.unwrap().is_none());
        assert!(get_user(&pool, "bob").await.unwrap().is_some());

        // Already gone.
        assert!(!delete_user(&pool, "alice").await.unwrap());
    }

    #[tokio::test]
    async fn delete_all_leaves_zero_rows() {
        let pool = test_pool().await;

        upsert_user_stats(&pool, &stats("alice", 10)).await.unwrap();
        upsert_user_stats(&pool, &stats("bob", 20)).await.unwrap();

        assert_eq!(delete_all_users(&pool).await.unwrap(), 2);
        assert_eq!(count_users(&pool).await.unwrap(), 0);
        assert!(get_all_usernames(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn listing_is_sorted_and_paginated() {
        let pool = test_pool().await;

        upsert_user_stats(&pool, &stats("alice", 5)).await.unwrap();
        upsert_user_stats(&pool, &stats("bob", 40)).await.unwrap();
        upsert_user_stats(&pool, &stats("carol", 15)).await.unwrap();

        let first = list_users(&pool, 2, 0).await.unwrap();
        assert_eq!(
            first.iter().map(|u| u.username.as_str()).collect::<Vec<_>>(),
            vec!["bob", "carol"]
        );

        let second = list_users(&pool, 2, 2).await.unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].username, "alice");
    }

    #[tokio::test]
    async fn listing_hides_rows_without_ranking() {
        let pool = test_pool().await;

        let mut hidden = stats("ghost", 10);
        hidden.ranking = None;
        upsert_user_stats(&pool, &hidden).await.unwrap();

        assert_eq!(count_users(&pool).await.unwrap(), 0);
        assert!(list_users(&pool, 10, 0).await.unwrap().is_empty());
        // The row itself still exists.
        assert!(get_user(&pool, "ghost").await.unwrap().is_some());
    }
}
