use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::core::pagination::PageQuery;
use crate::middleware::auth::AdminUser;
use crate::modules::tags::models::{TagCreate, TagUpdate};
use crate::modules::tags::services::TagService;

/// Paginated tag listing
/// GET /tags
pub async fn paginated_tags(
    service: web::Data<TagService>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let page = service.paginated(&query).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// Get a tag by its slug
/// GET /tags/{slug}
pub async fn get_tag(
    service: web::Data<TagService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let record = service.get_by_slug(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(record))
}

/// Create a tag, admin-gated
/// POST /tags
pub async fn create_tag(
    service: web::Data<TagService>,
    _admin: AdminUser,
    body: web::Json<TagCreate>,
) -> Result<HttpResponse, AppError> {
    let record = service.create(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(record))
}

/// Partial update of a tag, admin-gated
/// PUT /tags/{id}
pub async fn update_tag(
    service: web::Data<TagService>,
    _admin: AdminUser,
    path: web::Path<i64>,
    body: web::Json<TagUpdate>,
) -> Result<HttpResponse, AppError> {
    let record = service.update(path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(record))
}

/// Delete a tag, admin-gated
/// DELETE /tags/{id}
pub async fn delete_tag(
    service: web::Data<TagService>,
    _admin: AdminUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let deleted = service.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(deleted))
}

/// Configure tag routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/tags")
            .route("", web::get().to(paginated_tags))
            .route("", web::post().to(create_tag))
            .route("/{slug}", web::get().to(get_tag))
            .route("/{id}", web::put().to(update_tag))
            .route("/{id}", web::delete().to(delete_tag)),
    );
}
