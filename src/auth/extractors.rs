use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::error::AppError;
use crate::models::PublicUser;

/// The identity resolved by `AuthMiddleware`, carried through request
/// extensions as a concrete type and handed to handlers by this extractor.
///
/// Routes using it must sit behind the middleware; if the identity is
/// missing the request is rejected as unauthenticated rather than reaching
/// the handler with no owner to scope queries by.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub PublicUser);

impl FromRequest for CurrentUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<CurrentUser>().cloned() {
            Some(user) => ready(Ok(user)),
            None => {
                let err = AppError::Unauthorized("No authentication token provided".to_string());
                ready(Err(err.into()))
            }
        }
    }
}
