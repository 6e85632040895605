use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use lazy_static::lazy_static;

use crate::model::user::UserStat;

/// How long a fetched stats record stays fresh.
pub const TTL: Duration = Duration::from_secs(600);

lazy_static! {
    static ref STATS_CACHE: Mutex<HashMap<String, (Instant, UserStat)>> =
        Mutex::new(HashMap::new());
}

fn key(username: &str) -> String {
    format!("lc:{}", username.to_lowercase())
}

pub fn get(username: &str) -> Option<UserStat> {
    let k = key(username);
    let mut cache = STATS_CACHE.lock().unwrap();
    if let Some((expires, stats)) = cache.get(&k) {
        if Instant::now() < *expires {
            return Some(stats.clone());
        }
    }
    cache.remove(&k);
    None
}

pub fn set(username: &str, stats: &UserStat) {
    set_with_ttl(username, stats, TTL);
}

pub fn set_with_ttl(username: &str, stats: &UserStat, ttl: Duration) {
    let mut cache = STATS_CACHE.lock().unwrap();
    cache.insert(key(username), (Instant::now() + ttl, stats.clone()));
}

pub fn evict(username: &str) {
    let mut cache = STATS_CACHE.lock().unwrap();
    cache.remove(&key(username));
}

pub fn clear() {
    let mut cache = STATS_CACHE.lock().unwrap();
    cache.clear();
}
