use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::error::AppError;
use crate::core::pagination::PageQuery;
use crate::middleware::auth::{AdminUser, CurrentUser};
use crate::modules::auth::models::{
    ChangePasswordInput, UpdateEmailInput, UserCreate, UserUpdate,
};
use crate::modules::auth::services::UserService;

/// Query parameters for the user listing: the shared paging/search set plus
/// an optional role filter.
#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size", alias = "limit")]
    pub page_size: i64,
    #[serde(default)]
    pub search: String,
    #[serde(default = "default_search_join", rename = "searchJoin")]
    pub search_join: String,
    pub role: Option<String>,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    10
}

fn default_search_join() -> String {
    "and".to_string()
}

impl ListUsersQuery {
    fn page_query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            page_size: self.page_size,
            search: self.search.clone(),
            search_join: self.search_join.clone(),
        }
    }
}

/// Paginated user search
/// GET /users
pub async fn paginated_users(
    service: web::Data<UserService>,
    _user: CurrentUser,
    query: web::Query<ListUsersQuery>,
) -> Result<HttpResponse, AppError> {
    let page = service
        .paginated(&query.page_query(), query.role.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(page))
}

/// Create a user, admin-gated
/// POST /users
pub async fn create_user(
    service: web::Data<UserService>,
    _admin: AdminUser,
    body: web::Json<UserCreate>,
) -> Result<HttpResponse, AppError> {
    let user = service.create(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Partial user update, admin-gated
/// PUT /users/{id}
pub async fn update_user(
    service: web::Data<UserService>,
    _admin: AdminUser,
    path: web::Path<String>,
    body: web::Json<UserUpdate>,
) -> Result<HttpResponse, AppError> {
    let user = service.update(&path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Change the caller's email
/// POST /users/update-email
pub async fn update_email(
    service: web::Data<UserService>,
    user: CurrentUser,
    body: web::Json<UpdateEmailInput>,
) -> Result<HttpResponse, AppError> {
    let out = service.update_email(&user.0, body.into_inner().email).await?;
    Ok(HttpResponse::Ok().json(out))
}

/// Change the caller's password after verifying the old one
/// POST /users/change-password
pub async fn change_password(
    service: web::Data<UserService>,
    user: CurrentUser,
    body: web::Json<ChangePasswordInput>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let out = service
        .change_password(&user.0, &body.old_password, &body.new_password)
        .await?;
    Ok(HttpResponse::Ok().json(out))
}

/// Configure user routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("", web::get().to(paginated_users))
            .route("", web::post().to(create_user))
            .route("/update-email", web::post().to(update_email))
            .route("/change-password", web::post().to(change_password))
            .route("/{id}", web::put().to(update_user)),
    );
}
