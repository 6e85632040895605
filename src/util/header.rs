use reqwest::header;

pub static USER_AGENT: &str = "Mozilla/5.0 (compatible; LeetStats/1.0)";
pub static CONTENT_TYPE: &str = "application/json";
pub static ACCEPT: &str = "application/json";
pub static REFERER: &str = "https://leetcode.com";

/// Browser-like headers; LeetCode serves HTML error pages to bare clients.
pub fn get_common_header() -> header::HeaderMap {
    let mut headers = header::HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, CONTENT_TYPE.parse().unwrap());
    headers.insert(header::USER_AGENT, USER_AGENT.parse().unwrap());
    headers.insert(header::ACCEPT, ACCEPT.parse().unwrap());
    headers.insert(header::REFERER, REFERER.parse().unwrap());
    headers.insert(header::ORIGIN, REFERER.parse().unwrap());
    headers
}
