use reqwest::StatusCode;
use serde_json::json;
use sqlx::{Pool, Sqlite};
use tokio::time::{sleep, Duration};

use chrono::Utc;

use crate::db::user::upsert_user_stats;
use crate::model::leetcode::{GraphqlResponse, MatchedUser};
use crate::model::user::UserStat;
use crate::util;

pub type FetchError = Box<dyn std::error::Error + Send + Sync>;

pub static LEETCODE_GRAPHQL_URL: &str = "https://leetcode.com/graphql";

pub static USER_PROFILE_QUERY: &str = r#"
query getUserProfile($username: String!) {
  matchedUser(username: $username) {
    username
    profile {
      ranking
      reputation
    }
    submitStats {
      acSubmissionNum {
        difficulty
        count
      }
    }
  }
}
"#;

const MAX_RETRIES: u32 = 2;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// 429/499 and 5xx are worth another try; other 4xx never recover.
fn is_retryable(status: StatusCode) -> bool {
    status.as_u16() == 429 || status.as_u16() == 499 || status.is_server_error()
}

pub async fn fetch_profile(username: &str) -> Result<GraphqlResponse, FetchError> {
    let headers = util::header::get_common_header();
    let payload = json!({
        "query": USER_PROFILE_QUERY,
        "variables": { "username": username },
    });

    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()?;

    let mut attempt = 0u32;
    loop {
        let result = client
            .post(LEETCODE_GRAPHQL_URL)
            .headers(headers.clone())
            .json(&payload)
            .send()
            .await;

        match result {
            Ok(resp) => {
                let status = resp.status();
                if status.is_success() {
                    return Ok(resp.json::<GraphqlResponse>().await?);
                }
                if is_retryable(status) && attempt < MAX_RETRIES {
                    sleep(Duration::from_secs(1 + attempt as u64)).await;
                    attempt += 1;
                    continue;
                }
                return Err(format!("leetcode returned status {}", status).into());
            }
            Err(e) if (e.is_timeout() || e.is_connect()) && attempt < MAX_RETRIES => {
                sleep(Duration::from_millis(1000 + 500 * attempt as u64)).await;
                attempt += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// A null `matchedUser` means the username does not exist upstream (or the
/// profile is private); that is a fetch failure, not an empty record.
pub fn into_user_stat(resp: GraphqlResponse) -> Result<UserStat, FetchError> {
    let matched = match resp.data.and_then(|d| d.matched_user) {
        Some(matched) => matched,
        None => {
            if let Some(errors) = resp.errors {
                return Err(format!("graphql errors: {}", json!(errors)).into());
            }
            return Err("user not found or profile is private".into());
        }
    };
    Ok(stats_of(matched))
}

fn stats_of(matched: MatchedUser) -> UserStat {
    let (ranking, reputation) = match matched.profile {
        Some(profile) => (profile.ranking, profile.reputation),
        None => (None, None),
    };

    let (mut easy, mut medium, mut hard, mut total) = (0, 0, 0, 0);
    if let Some(submit_stats) = matched.submit_stats {
        for entry in submit_stats.ac_submission_num {
            match entry.difficulty.as_str() {
                "All" => total = entry.count,
                "Easy" => easy = entry.count,
                "Medium" => medium = entry.count,
                "Hard" => hard = entry.count,
                _ => {}
            }
        }
    }

    UserStat {
        username: matched.username,
        ranking,
        reputation,
        easy,
        medium,
        hard,
        total,
        last_updated: Utc::now().naive_utc(),
    }
}

/// Fetch a user's stats and overwrite its row. Unless `force` is set, a
/// fresh cache entry short-circuits the upstream round trip.
pub async fn fetch_or_update_user(
    pool: &Pool<Sqlite>,
    username: &str,
    force: bool,
) -> Result<UserStat, FetchError> {
    if !force {
        if let Some(cached) = util::cache::get(username) {
            return Ok(cached);
        }
    }

    let resp = fetch_profile(username).await?;
    let stats = into_user_stat(resp)?;

    match upsert_user_stats(pool, &stats).await {
        Ok(_) => println!("Stored stats for {}", &stats.username),
        Err(e) => return Err(e.0.into()),
    }
    util::cache::set(username, &stats);

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_profile() {
        let raw = r#"{
            "data": {
                "matchedUser": {
                    "username": "alice",
                    "profile": { "ranking": 1234, "reputation": 56 },
                    "submitStats": {
                        "acSubmissionNum": [
                            { "difficulty": "All", "count": 33 },
                            { "difficulty": "Easy", "count": 10 },
                            { "difficulty": "Medium", "count": 20 },
                            { "difficulty": "Hard", "count": 3 }
                        ]
                    }
                }
            }
        }"#;
        let resp: GraphqlResponse = serde_json::from_str(raw).unwrap();
        let stats = into_user_stat(resp).unwrap();

        assert_eq!(stats.username, "alice");
        assert_eq!(stats.ranking, Some(1234));
        assert_eq!(stats.reputation, Some(56));
        assert_eq!((stats.easy, stats.medium, stats.hard, stats.total), (10, 20, 3, 33));
    }

    #[test]
    fn null_matched_user_is_an_error() {
        let raw = r#"{ "data": { "matchedUser": null } }"#;
        let resp: GraphqlResponse = serde_json::from_str(raw).unwrap();
        let err = into_user_stat(resp).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn graphql_errors_are_surfaced() {
        let raw = r#"{ "errors": [ { "message": "That user does not exist." } ] }"#;
        let resp: GraphqlResponse = serde_json::from_str(raw).unwrap();
        let err = into_user_stat(resp).unwrap_err();
        assert!(err.to_string().contains("graphql errors"));
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn missing_profile_leaves_ranking_null() {
        let raw = r#"{
            "data": {
                "matchedUser": {
                    "username": "bob",
                    "profile": null,
                    "submitStats": { "acSubmissionNum": [ { "difficulty": "All", "count": 7 } ] }
                }
            }
        }"#;
        let resp: GraphqlResponse = serde_json::from_str(raw).unwrap();
        let stats = into_user_stat(resp).unwrap();

        assert_eq!(stats.ranking, None);
        assert_eq!(stats.reputation, None);
        assert_eq!(stats.total, 7);
    }

    #[test]
    fn retryable_statuses() {
        assert!(is_retryable(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_retryable(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(is_retryable(StatusCode::BAD_GATEWAY));
        assert!(!is_retryable(StatusCode::NOT_FOUND));
        assert!(!is_retryable(StatusCode::FORBIDDEN));
    }
}
