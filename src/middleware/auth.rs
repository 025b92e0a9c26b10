//! Bearer-token authentication.
//!
//! [`JwtAuth`] guards a whole scope: it verifies the token, resolves the
//! user from the store and attaches it to the request. The [`CurrentUser`]
//! and [`AdminUser`] extractors pick the resolved user up; on routes outside
//! a guarded scope they run the same verification themselves, so role-gated
//! handlers stay self-contained.

use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header, web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use sqlx::MySqlPool;
use std::future::{ready, Ready};
use std::rc::Rc;

use crate::config::AuthConfig;
use crate::core::AppError;
use crate::modules::auth::models::User;
use crate::modules::auth::services::token::decode_access_token;

/// Resolve a user from a raw `Authorization` header value.
///
/// The per-request state machine: missing/malformed header, then signature
/// and expiry, then the user lookup. Every failure is Unauthorized.
pub async fn authenticate_token(
    header_value: Option<&str>,
    pool: &MySqlPool,
    auth: &AuthConfig,
) -> crate::core::Result<User> {
    let token = header_value
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::unauthorized("Missing token"))?;

    let claims = decode_access_token(token, &auth.jwt_secret)?;

    let user = sqlx::query_as::<_, User>("SELECT * FROM `user` WHERE `id` = ? LIMIT 1")
        .bind(&claims.user_id)
        .fetch_optional(pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::unauthorized("User not found"))?;

    Ok(user)
}

fn authorization_header(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
}

/// JWT authentication middleware for the authenticated sub-tree.
pub struct JwtAuth {
    pool: MySqlPool,
    auth: AuthConfig,
}

impl JwtAuth {
    pub fn new(pool: MySqlPool, auth: AuthConfig) -> Self {
        Self { pool, auth }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            pool: self.pool.clone(),
            auth: self.auth.clone(),
        }))
    }
}

pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    pool: MySqlPool,
    auth: AuthConfig,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();
        let pool = self.pool.clone();
        let auth = self.auth.clone();

        Box::pin(async move {
            let header_value = authorization_header(req.request());
            let user = authenticate_token(header_value.as_deref(), &pool, &auth)
                .await
                .map_err(Error::from)?;

            req.extensions_mut().insert(user);

            svc.call(req).await
        })
    }
}

/// The authenticated user for the current request.
pub struct CurrentUser(pub User);

impl FromRequest for CurrentUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // fast path: the scope's JwtAuth middleware already resolved the user
        if let Some(user) = req.extensions().get::<User>().cloned() {
            return Box::pin(async move { Ok(CurrentUser(user)) });
        }

        let header_value = authorization_header(req);
        let pool = req.app_data::<web::Data<MySqlPool>>().cloned();
        let auth = req.app_data::<web::Data<AuthConfig>>().cloned();

        Box::pin(async move {
            let pool = pool
                .ok_or_else(|| AppError::Configuration("Database pool not registered".into()))?;
            let auth = auth
                .ok_or_else(|| AppError::Configuration("Auth config not registered".into()))?;
            let user = authenticate_token(header_value.as_deref(), &pool, &auth).await?;
            Ok(CurrentUser(user))
        })
    }
}

/// The authenticated user, required to hold an admin role.
pub struct AdminUser(pub User);

impl FromRequest for AdminUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let current = CurrentUser::from_request(req, payload);
        Box::pin(async move {
            let CurrentUser(user) = current.await?;
            if !user.role.is_admin() {
                return Err(AppError::forbidden(
                    "You don't have permission to access this resource.",
                )
                .into());
            }
            Ok(AdminUser(user))
        })
    }
}
