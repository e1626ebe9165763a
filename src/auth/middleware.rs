use std::rc::Rc;

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use sqlx::PgPool;

use crate::auth::extractors::CurrentUser;
use crate::auth::token::verify_token;
use crate::error::AppError;
use crate::models::PublicUser;

/// Request gate: resolves the bearer token to a stored identity before any
/// business handler runs, and short-circuits unauthenticated requests with
/// no side effects. `/health` and the `/auth` endpoints stay open.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            // Health probe and the auth endpoints take no token.
            let path = req.path();
            if path == "/health" || path.starts_with("/auth/") {
                return service.call(req).await;
            }

            let bearer = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.strip_prefix("Bearer "))
                .map(str::to_owned);

            let token = match bearer {
                Some(token) => token,
                None => {
                    return Err(
                        AppError::Unauthorized("No authentication token provided".into()).into(),
                    )
                }
            };

            let claims = verify_token(&token)?;

            // The token only proves an id. The identity is looked up fresh
            // on every request so a deleted account cannot keep
            // authenticating with an old token.
            let pool = req
                .app_data::<web::Data<PgPool>>()
                .cloned()
                .ok_or_else(|| AppError::InternalServerError("Database pool missing".into()))?;

            let user =
                sqlx::query_as::<_, PublicUser>("SELECT id, name, email FROM users WHERE id = $1")
                    .bind(claims.sub)
                    .fetch_optional(&**pool)
                    .await
                    .map_err(AppError::from)?;

            match user {
                Some(user) => {
                    req.extensions_mut().insert(CurrentUser(user));
                    service.call(req).await
                }
                None => Err(AppError::Unauthorized("User not found".into()).into()),
            }
        })
    }
}
