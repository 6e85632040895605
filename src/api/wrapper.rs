use serde_json::json;
use sqlx::{Pool, Sqlite};
use tokio::time::{sleep, Duration};

use crate::api::leetcode::fetch_or_update_user;
use crate::db::user;
use crate::model::response::{ApiStatus, ResponseWithStatus};
use crate::util::{cache, message};

/// Uploads past this many usernames are silently truncated.
pub const MAX_BATCH_SIZE: usize = 50;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 12;

// Pauses between upstream fetches keep LeetCode from rate-limiting us.
const UPLOAD_FETCH_DELAY: Duration = Duration::from_millis(800);
const REFRESH_FETCH_DELAY: Duration = Duration::from_millis(200);

fn db_error(e: rocket::response::Debug<sqlx::Error>) -> ResponseWithStatus {
    println!("Database error: {:?}", e.0);
    ResponseWithStatus::new(
        ApiStatus::InternalServerError,
        message::MESSAGE_INTERNAL_SERVER_ERROR.to_string(),
        None,
    )
}

/// Trims entries, drops empty ones, and truncates the batch to
/// `MAX_BATCH_SIZE`.
pub fn normalize_usernames(usernames: Vec<String>) -> Vec<String> {
    usernames
        .into_iter()
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .take(MAX_BATCH_SIZE)
        .collect()
}

pub async fn upload_users(pool: &Pool<Sqlite>, usernames: Vec<String>) -> ResponseWithStatus {
    let usernames = normalize_usernames(usernames);
    if usernames.is_empty() {
        return ResponseWithStatus::new(
            ApiStatus::BadRequest,
            message::MESSAGE_NO_USERNAMES.to_string(),
            None,
        );
    }

    let mut success = Vec::new();
    let mut errors = Vec::new();
    for (i, username) in usernames.iter().enumerate() {
        if i > 0 {
            sleep(UPLOAD_FETCH_DELAY).await;
        }
        match fetch_or_update_user(pool, username, false).await {
            Ok(stats) => success.push(stats.username),
            Err(e) => errors.push(format!("{}: {}", username, e)),
        }
    }

    ResponseWithStatus::new(
        ApiStatus::Ok,
        message::MESSAGE_UPLOAD_DONE.to_string(),
        Some(json!({ "success": success, "errors": errors })),
    )
}

/// Re-fetches every stored username with the cache bypassed, overwriting each
/// row in place.
pub async fn refresh_all(pool: &Pool<Sqlite>) -> ResponseWithStatus {
    let usernames = match user::get_all_usernames(pool).await {
        Ok(usernames) => usernames,
        Err(e) => return db_error(e),
    };

    let mut refreshed = Vec::new();
    let mut errors = Vec::new();
    for (i, username) in usernames.iter().enumerate() {
        if i > 0 {
            sleep(REFRESH_FETCH_DELAY).await;
        }
        match fetch_or_update_user(pool, username, true).await {
            Ok(stats) => refreshed.push(stats.username),
            Err(e) => errors.push(format!("{}: {}", username, e)),
        }
    }

    ResponseWithStatus::new(
        ApiStatus::Ok,
        message::MESSAGE_REFRESH_DONE.to_string(),
        Some(json!({ "refreshed": refreshed, "errors": errors })),
    )
}

pub async fn list_users(pool: &Pool<Sqlite>, page: u32, per_page: u32) -> ResponseWithStatus {
    if page == 0 || per_page == 0 {
        return ResponseWithStatus::new(
            ApiStatus::BadRequest,
            message::MESSAGE_INVALID_PAGINATION.to_string(),
            None,
        );
    }

    let total = match user::count_users(pool).await {
        Ok(total) => total,
        Err(e) => return db_error(e),
    };

    // page and per_page arrive as arbitrary u32s; saturate instead of
    // overflowing, an out-of-range page just reads past the last row.
    let limit = per_page as i64;
    let offset = (page as i64 - 1).saturating_mul(limit);
    let users = match user::list_users(pool, limit, offset).await {
        Ok(users) => users,
        Err(e) => return db_error(e),
    };

    ResponseWithStatus::new(
        ApiStatus::Ok,
        message::MESSAGE_STATS_FETCHED.to_string(),
        Some(json!({
            "users": users,
            "page": page,
            "per_page": per_page,
            "total": total,
            "total_pages": (total + limit - 1) / limit,
        })),
    )
}

pub async fn delete_user(pool: &Pool<Sqlite>, username: &str) -> ResponseWithStatus {
    match user::delete_user(pool, username).await {
        Ok(true) => {
            cache::evict(username);
            ResponseWithStatus::new(
                ApiStatus::Ok,
                format!("user '{}' deleted", username),
                None,
            )
        }
        Ok(false) => ResponseWithStatus::new(
            ApiStatus::NotFound,
            message::MESSAGE_USER_NOT_FOUND.to_string(),
            None,
        ),
        Err(e) => db_error(e),
    }
}

pub async fn delete_all_users(pool: &Pool<Sqlite>) -> ResponseWithStatus {
    match user::delete_all_users(pool).await {
        Ok(removed) => {
            cache::clear();
            ResponseWithStatus::new(
                ApiStatus::Ok,
                format!("all users deleted, {} records removed", removed),
                None,
            )
        }
        Err(e) => db_error(e),
    }
}

pub async fn db_health(pool: &Pool<Sqlite>) -> ResponseWithStatus {
    match user::ping(pool).await {
        Ok(one) => ResponseWithStatus::new(
            ApiStatus::Ok,
            message::MESSAGE_DB_OK.to_string(),
            Some(json!({ "test": one })),
        ),
        Err(e) => {
            println!("Database error: {:?}", e.0);
            ResponseWithStatus::new(
                ApiStatus::InternalServerError,
                message::MESSAGE_DB_ERROR.to_string(),
                None,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_of_fifty_is_kept_whole() {
        let batch: Vec<String> = (0..50).map(|i| format!("user{}", i)).collect();
        assert_eq!(normalize_usernames(batch).len(), 50);
    }

    #[test]
    fn entries_past_fifty_are_truncated() {
        let batch: Vec<String> = (0..51).map(|i| format!("user{}", i)).collect();
        let kept = normalize_usernames(batch);
        assert_eq!(kept.len(), MAX_BATCH_SIZE);
        assert_eq!(kept.last().unwrap(), "user49");
    }

    #[test]
    fn blank_entries_are_dropped_before_truncation() {
        let mut batch = vec!["  ".to_string(), "".to_string(), " alice ".to_string()];
        batch.extend((0..50).map(|i| format!("user{}", i)));

        let kept = normalize_usernames(batch);
        assert_eq!(kept.len(), MAX_BATCH_SIZE);
        assert_eq!(kept[0], "alice");
        assert_eq!(kept.last().unwrap(), "user48");
    }
}
