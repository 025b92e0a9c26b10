use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::core::pagination::PageQuery;
use crate::middleware::auth::AdminUser;
use crate::modules::categories::models::{CategoryCreate, CategoryUpdate};
use crate::modules::categories::services::CategoryService;

/// Paginated category listing
/// GET /categories
pub async fn paginated_categories(
    service: web::Data<CategoryService>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let page = service.paginated(&query).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// Get a category by its slug
/// GET /categories/{slug}
pub async fn get_category(
    service: web::Data<CategoryService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let record = service.get_by_slug(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(record))
}

/// Create a category, admin-gated
/// POST /categories
pub async fn create_category(
    service: web::Data<CategoryService>,
    _admin: AdminUser,
    body: web::Json<CategoryCreate>,
) -> Result<HttpResponse, AppError> {
    let record = service.create(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(record))
}

/// Partial update of a category, admin-gated
/// PUT /categories/{id}
pub async fn update_category(
    service: web::Data<CategoryService>,
    _admin: AdminUser,
    path: web::Path<i64>,
    body: web::Json<CategoryUpdate>,
) -> Result<HttpResponse, AppError> {
    let record = service.update(path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(record))
}

/// Delete a category, admin-gated
/// DELETE /categories/{id}
pub async fn delete_category(
    service: web::Data<CategoryService>,
    _admin: AdminUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let deleted = service.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(deleted))
}

/// Configure category routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/categories")
            .route("", web::get().to(paginated_categories))
            .route("", web::post().to(create_category))
            .route("/{slug}", web::get().to(get_category))
            .route("/{id}", web::put().to(update_category))
            .route("/{id}", web::delete().to(delete_category)),
    );
}
