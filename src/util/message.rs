#[allow(unused)]

pub static MESSAGE_STATS_FETCHED: &str = "stats fetched";
pub static MESSAGE_USER_NOT_FOUND: &str = "user not found";
pub static MESSAGE_NOT_FOUND: &str = "resource not found";

pub static MESSAGE_NO_USERNAMES: &str = "no usernames provided";
pub static MESSAGE_INVALID_PAGINATION: &str = "page and per_page must be positive";
pub static MESSAGE_UPLOAD_DONE: &str = "upload processed";
pub static MESSAGE_REFRESH_DONE: &str = "refresh finished";

pub static MESSAGE_DB_OK: &str = "connected to database";
pub static MESSAGE_DB_ERROR: &str = "database unreachable";
pub static MESSAGE_INTERNAL_SERVER_ERROR: &str = "internal server error";
pub static MESSAGE_TOO_MANY_REQUESTS: &str = "too many requests, slow down";

pub static STATUS_OK: &str = "ok";
pub static STATUS_ERROR: &str = "error";
pub static STATUS_UNAUTHORIZED: &str = "unauthorized";
pub static STATUS_INTERNAL_SERVER_ERROR: &str = "internal server error";
pub static STATUS_FORBIDDEN: &str = "forbidden";
pub static STATUS_NOT_FOUND: &str = "not found";
pub static STATUS_CREATED: &str = "created";
pub static STATUS_BAD_REQUEST: &str = "bad request";
pub static STATUS_TOO_MANY_REQUESTS: &str = "too many requests";
