//! handlers/user.rs
//! Identificador opaco del usuario, tomado del header `X-User-Id`.
//! La autenticación vive fuera de este servicio.

use std::future::{ready, Ready};

use actix_web::{dev::Payload, error::ErrorUnauthorized, FromRequest, HttpRequest};

pub const USER_HEADER: &str = "X-User-Id";

#[derive(Debug, Clone)]
pub struct UserId(pub String);

impl FromRequest for UserId {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = req
            .headers()
            .get(USER_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        ready(match user {
            Some(id) => Ok(UserId(id.to_string())),
            None => Err(ErrorUnauthorized("missing X-User-Id header")),
        })
    }
}
