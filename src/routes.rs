use rocket::response::status;
use rocket::serde::json::Json;
use rocket::{Build, Rocket, State};
use rocket_governor::RocketGovernor;
use sqlx::{Pool, Sqlite};

use crate::api::wrapper;
use crate::middleware::catcher::{exceed_rate_limit, internal_server_error, not_found};
use crate::middleware::governor::RateLimitGuard;
use crate::model::request::UploadRequest;
use crate::model::response::Response;

#[get("/")]
async fn index() -> &'static str {
    "GET    /api/users?page=&per_page=\n\
     POST   /admin/upload\n\
     POST   /admin/refresh\n\
     DELETE /admin/delete/<username>\n\
     DELETE /admin/delete_all\n\
     GET    /debug/db"
}

#[get("/api/users?<page>&<per_page>")]
async fn list_users(
    pool: &State<Pool<Sqlite>>,
    page: Option<u32>,
    per_page: Option<u32>,
) -> status::Custom<Json<Response>> {
    wrapper::list_users(
        pool,
        page.unwrap_or(wrapper::DEFAULT_PAGE),
        per_page.unwrap_or(wrapper::DEFAULT_PER_PAGE),
    )
    .await
    .respond()
}

#[post("/admin/upload", format = "json", data = "<body>")]
async fn upload(
    _limitguard: RocketGovernor<'_, RateLimitGuard>,
    pool: &State<Pool<Sqlite>>,
    body: Json<UploadRequest>,
) -> status::Custom<Json<Response>> {
    wrapper::upload_users(pool, body.into_inner().usernames)
        .await
        .respond()
}

#[post("/admin/refresh")]
async fn refresh(
    _limitguard: RocketGovernor<'_, RateLimitGuard>,
    pool: &State<Pool<Sqlite>>,
) -> status::Custom<Json<Response>> {
    wrapper::refresh_all(pool).await.respond()
}

#[delete("/admin/delete/<username>")]
async fn delete_user(
    pool: &State<Pool<Sqlite>>,
    username: &str,
) -> status::Custom<Json<Response>> {
    wrapper::delete_user(pool, username).await.respond()
}

#[delete("/admin/delete_all")]
async fn delete_all(pool: &State<Pool<Sqlite>>) -> status::Custom<Json<Response>> {
    wrapper::delete_all_users(pool).await.respond()
}

#[get("/debug/db")]
async fn db_health(pool: &State<Pool<Sqlite>>) -> status::Custom<Json<Response>> {
    wrapper::db_health(pool).await.respond()
}

pub fn build(pool: Pool<Sqlite>) -> Rocket<Build> {
    rocket::build()
        .mount(
            "/",
            routes![
                index, list_users, upload, refresh, delete_user, delete_all, db_health
            ],
        )
        .register(
            "/",
            catchers![not_found, exceed_rate_limit, internal_server_error],
        )
        .manage(pool)
}
