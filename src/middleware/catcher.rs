use rocket::{response::status, serde::json::Json};

use crate::model::response::{ApiStatus, Response, ResponseWithStatus};
use crate::util::message;

#[catch(404)]
pub fn not_found() -> status::Custom<Json<Response>> {
    ResponseWithStatus::new(ApiStatus::NotFound, message::MESSAGE_NOT_FOUND.to_string(), None)
        .respond()
}

#[catch(429)]
pub fn exceed_rate_limit() -> status::Custom<Json<Response>> {
    ResponseWithStatus::new(
        ApiStatus::TooManyRequests,
        message::MESSAGE_TOO_MANY_REQUESTS.to_string(),
        None,
    )
    .respond()
}

#[catch(500)]
pub fn internal_server_error() -> status::Custom<Json<Response>> {
    ResponseWithStatus::new(
        ApiStatus::InternalServerError,
        message::MESSAGE_INTERNAL_SERVER_ERROR.to_string(),
        None,
    )
    .respond()
}
