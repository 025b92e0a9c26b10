use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::repository::Entity;
use crate::modules::products::models::ProductReadSimple;

/// One (user, product) membership row; the pair is unique.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Wishlist {
    pub id: i64,
    pub user_id: String,
    pub product_id: i64,
    pub created_at: DateTime<Utc>,
}

impl Entity for Wishlist {
    const TABLE: &'static str = "wishlist";
    const COLUMNS: &'static [&'static str] = &["id", "user_id", "product_id", "created_at"];
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToggleWishlist {
    pub product_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct WishlistRead {
    pub id: i64,
    pub product: ProductReadSimple,
}
