use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::core::pagination::PageQuery;
use crate::middleware::auth::CurrentUser;
use crate::modules::wishlists::models::ToggleWishlist;
use crate::modules::wishlists::services::WishlistService;

/// Check whether a product is in the caller's wishlist
/// GET /wishlists/in_wishlist/{product_id}
pub async fn in_wishlist(
    service: web::Data<WishlistService>,
    user: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let present = service.in_wishlist(&user.0.id, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(present))
}

/// Toggle a product in the caller's wishlist
/// POST /wishlists/toggle
pub async fn toggle_wishlist(
    service: web::Data<WishlistService>,
    user: CurrentUser,
    body: web::Json<ToggleWishlist>,
) -> Result<HttpResponse, AppError> {
    let present = service.toggle(&user.0.id, body.product_id).await?;
    Ok(HttpResponse::Ok().json(present))
}

/// The caller's wishlist entries
/// GET /wishlists/my-wishlists
pub async fn my_wishlists(
    service: web::Data<WishlistService>,
    user: CurrentUser,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let page = service.my_wishlists(&user.0.id, &query).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// Remove a wishlist entry by id
/// DELETE /wishlists/{id}
pub async fn remove_wishlist(
    service: web::Data<WishlistService>,
    _user: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let deleted = service.remove(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(deleted))
}

/// Configure wishlist routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/wishlists")
            .route("/in_wishlist/{product_id}", web::get().to(in_wishlist))
            .route("/toggle", web::post().to(toggle_wishlist))
            .route("/my-wishlists", web::get().to(my_wishlists))
            .route("/{id}", web::delete().to(remove_wishlist)),
    );
}
