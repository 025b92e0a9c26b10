use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::core::pagination::PageQuery;
use crate::middleware::auth::AdminUser;
use crate::modules::types::models::{TypeCreate, TypeUpdate};
use crate::modules::types::services::TypeService;

/// Paginated type listing
/// GET /types
pub async fn paginated_types(
    service: web::Data<TypeService>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let page = service.paginated(&query).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// Get a type by its slug
/// GET /types/{slug}
pub async fn get_type(
    service: web::Data<TypeService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let record = service.get_by_slug(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(record))
}

/// Create a type, admin-gated
/// POST /types
pub async fn create_type(
    service: web::Data<TypeService>,
    _admin: AdminUser,
    body: web::Json<TypeCreate>,
) -> Result<HttpResponse, AppError> {
    let record = service.create(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(record))
}

/// Partial update of a type, admin-gated
/// PUT /types/{id}
pub async fn update_type(
    service: web::Data<TypeService>,
    _admin: AdminUser,
    path: web::Path<i64>,
    body: web::Json<TypeUpdate>,
) -> Result<HttpResponse, AppError> {
    let record = service.update(path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(record))
}

/// Delete a type, admin-gated
/// DELETE /types/{id}
pub async fn delete_type(
    service: web::Data<TypeService>,
    _admin: AdminUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let deleted = service.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(deleted))
}

/// Configure type routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/types")
            .route("", web::get().to(paginated_types))
            .route("", web::post().to(create_type))
            .route("/{slug}", web::get().to(get_type))
            .route("/{id}", web::put().to(update_type))
            .route("/{id}", web::delete().to(delete_type)),
    );
}
