use super::*;
use actix_web::FromRequest;
use actix_web::HttpRequest;
use actix_web::dev::Payload;
use actix_web::web;
use pp_core::ID;
use std::future::Ready;

/// Extractor for requests bearing a valid access token.
/// Access tokens are stateless, so no store is consulted.
pub struct Auth(pub Claims);

impl Auth {
    pub fn claims(&self) -> &Claims {
        &self.0
    }
    pub fn user(&self) -> ID<Member> {
        self.0.user()
    }
}

impl FromRequest for Auth {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;
    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        std::future::ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<Auth, actix_web::Error> {
    let crypto = req
        .app_data::<web::Data<Crypto>>()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("token service not configured"))?;
    let header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| actix_web::error::ErrorUnauthorized("missing authorization header"))?;
    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| actix_web::error::ErrorUnauthorized("invalid authorization format"))?;
    crypto
        .parse(Kind::Access, token)
        .map(Auth)
        .map_err(|e| actix_web::error::ErrorUnauthorized(e.to_string()))
}
