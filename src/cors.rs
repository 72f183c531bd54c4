use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Method, Status};
use rocket::{options, Request, Response};

const ALLOWED_METHODS: &str = "DELETE, GET, HEAD, OPTIONS, PATCH, POST, PUT";
const PREFLIGHT_MAX_AGE: &str = "600";

/// Allows every origin, method and header, credentials included.
/// A wildcard origin is not valid together with credentials,
/// so the request's `Origin` is echoed back instead.
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Permissive CORS",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, response: &mut Response<'r>) {
        let origin = match request.headers().get_one("Origin") {
            Some(origin) => origin.to_owned(),
            None => return,
        };

        response.set_header(Header::new("Access-Control-Allow-Origin", origin));
        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
        response.adjoin_header(Header::new("Vary", "Origin"));

        if request.method() == Method::Options {
            response.set_header(Header::new("Access-Control-Allow-Methods", ALLOWED_METHODS));
            response.set_header(Header::new("Access-Control-Max-Age", PREFLIGHT_MAX_AGE));
            if let Some(requested) = request.headers().get_one("Access-Control-Request-Headers") {
                response.set_header(Header::new(
                    "Access-Control-Allow-Headers",
                    requested.to_owned(),
                ));
            }
        }
    }
}

/// Answers CORS preflight requests for any path.
#[options("/<_..>")]
pub fn preflight() -> Status {
    Status::Ok
}
