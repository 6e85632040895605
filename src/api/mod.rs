pub mod leetcode;
pub mod wrapper;
