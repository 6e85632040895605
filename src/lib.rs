#[macro_use]
extern crate rocket;
extern crate lazy_static;

pub mod api;
pub mod db;
pub mod middleware;
pub mod model;
pub mod routes;
pub mod util;

pub use routes::build;
