pub mod cache;
pub mod header;
pub mod message;
