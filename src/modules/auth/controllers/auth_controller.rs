use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::middleware::auth::CurrentUser;
use crate::modules::auth::models::{UserLogin, UserRegister};
use crate::modules::auth::services::AuthService;

/// Register a new account and return its first token
/// POST /auth/register
pub async fn register(
    service: web::Data<AuthService>,
    body: web::Json<UserRegister>,
) -> Result<HttpResponse, AppError> {
    let out = service.register(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(out))
}

/// Exchange credentials for a token
/// POST /auth/token
pub async fn token(
    service: web::Data<AuthService>,
    body: web::Json<UserLogin>,
) -> Result<HttpResponse, AppError> {
    let out = service.login(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(out))
}

/// Stateless logout; the client discards its token
/// POST /auth/logout
pub async fn logout() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Successfully logged out"
    }))
}

/// The authenticated user with profile
/// GET /auth/me
pub async fn me(
    service: web::Data<AuthService>,
    user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let out = service.me(user.0).await?;
    Ok(HttpResponse::Ok().json(out))
}

/// Configure auth routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(register))
            .route("/token", web::post().to(token))
            .route("/logout", web::post().to(logout))
            .route("/me", web::get().to(me)),
    );
}
