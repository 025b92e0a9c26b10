use chrono::Utc;
use sqlx::MySqlPool;

use crate::core::query::{Filter, InsertSet, Order};
use crate::core::repository::BaseRepository;
use crate::core::Result;
use crate::modules::wishlists::models::Wishlist;

#[derive(Clone)]
pub struct WishlistRepository {
    base: BaseRepository<Wishlist>,
}

impl WishlistRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            base: BaseRepository::new(pool),
        }
    }

    fn pair_filter(user_id: &str, product_id: i64) -> Filter {
        Filter::eq("user_id", user_id).and(Filter::eq("product_id", product_id))
    }

    pub async fn get_pair(&self, user_id: &str, product_id: i64) -> Result<Option<Wishlist>> {
        self.base.get(&Self::pair_filter(user_id, product_id)).await
    }

    pub async fn pair_exists(&self, user_id: &str, product_id: i64) -> Result<bool> {
        self.base
            .exists(&Self::pair_filter(user_id, product_id))
            .await
    }

    pub async fn add(&self, user_id: &str, product_id: i64) -> Result<Wishlist> {
        let insert = InsertSet::new()
            .set("user_id", user_id)
            .set("product_id", product_id)
            .set("created_at", Utc::now());
        self.base.create(insert).await
    }

    pub async fn paginated_for_user(
        &self,
        user_id: &str,
        page: i64,
        page_size: i64,
    ) -> Result<(i64, Vec<Wishlist>)> {
        self.base
            .paginated(
                page,
                page_size,
                &Filter::eq("user_id", user_id),
                &Order::by_desc("created_at"),
            )
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        self.base.delete(id).await
    }
}
