use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::core::pagination::PageQuery;
use crate::middleware::auth::AdminUser;
use crate::modules::products::models::{ProductCreate, ProductUpdate};
use crate::modules::products::services::ProductService;

/// Paginated product listing
/// GET /products
pub async fn paginated_products(
    service: web::Data<ProductService>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let page = service.paginated(&query).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// Get a product by its slug
/// GET /products/{slug}
pub async fn get_product(
    service: web::Data<ProductService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let record = service.get_by_slug(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(record))
}

/// Create a product with its relations, admin-gated
/// POST /products
pub async fn create_product(
    service: web::Data<ProductService>,
    _admin: AdminUser,
    body: web::Json<ProductCreate>,
) -> Result<HttpResponse, AppError> {
    let record = service.create(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(record))
}

/// Partial update; supplied category/tag sets replace the links, admin-gated
/// PUT /products/{id}
pub async fn update_product(
    service: web::Data<ProductService>,
    _admin: AdminUser,
    path: web::Path<i64>,
    body: web::Json<ProductUpdate>,
) -> Result<HttpResponse, AppError> {
    let record = service.update(path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(record))
}

/// Delete a product, admin-gated
/// DELETE /products/{id}
pub async fn delete_product(
    service: web::Data<ProductService>,
    _admin: AdminUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let deleted = service.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(deleted))
}

/// Configure product routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/products")
            .route("", web::get().to(paginated_products))
            .route("", web::post().to(create_product))
            .route("/{slug}", web::get().to(get_product))
            .route("/{id}", web::put().to(update_product))
            .route("/{id}", web::delete().to(delete_product)),
    );
}
