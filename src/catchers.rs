use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket::{catch, Request};

#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(crate = "rocket::serde")]
pub struct ErrorDetail {
    pub detail: String,
}

/// Renders every error status as `{"detail": <reason>}`.
#[catch(default)]
pub fn default_catcher(status: Status, request: &Request<'_>) -> (Status, Json<ErrorDetail>) {
    tracing::debug!("{} {} failed with {}", request.method(), request.uri(), status);
    let detail = ErrorDetail {
        detail: status.reason_lossy().to_owned(),
    };
    (status, Json(detail))
}
