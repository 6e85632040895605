pub mod leetcode;
pub mod request;
pub mod response;
pub mod user;
