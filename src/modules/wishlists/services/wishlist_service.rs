use crate::core::pagination::{clamp_page, Page, PageQuery};
use crate::core::{AppError, Result};
use crate::modules::products::models::ProductReadSimple;
use crate::modules::products::repositories::ProductRepository;
use crate::modules::wishlists::models::WishlistRead;
use crate::modules::wishlists::repositories::WishlistRepository;

/// Wishlist membership for the authenticated user.
pub struct WishlistService {
    repository: WishlistRepository,
    products: ProductRepository,
}

impl WishlistService {
    pub fn new(repository: WishlistRepository, products: ProductRepository) -> Self {
        Self {
            repository,
            products,
        }
    }

    /// Add the product when absent, remove it when present. Returns the
    /// resulting membership, so a double toggle restores the original state.
    pub async fn toggle(&self, user_id: &str, product_id: i64) -> Result<bool> {
        self.ensure_product(product_id).await?;

        match self.repository.get_pair(user_id, product_id).await? {
            Some(existing) => {
                self.repository.delete(existing.id).await?;
                Ok(false)
            }
            None => {
                self.repository.add(user_id, product_id).await?;
                Ok(true)
            }
        }
    }

    /// Whether the product is in the user's wishlist.
    pub async fn in_wishlist(&self, user_id: &str, product_id: i64) -> Result<bool> {
        self.ensure_product(product_id).await?;
        self.repository.pair_exists(user_id, product_id).await
    }

    /// The user's wishlist entries with their products embedded.
    pub async fn my_wishlists(
        &self,
        user_id: &str,
        query: &PageQuery,
    ) -> Result<Page<WishlistRead>> {
        let (page, page_size) = clamp_page(query.page, query.page_size);
        let (total, entries) = self
            .repository
            .paginated_for_user(user_id, page, page_size)
            .await?;

        let mut data = Vec::with_capacity(entries.len());
        for entry in entries {
            // rows whose product vanished mid-request are dropped from the page
            if let Some(product) = self.products.get_by_id(entry.product_id).await? {
                data.push(WishlistRead {
                    id: entry.id,
                    product: ProductReadSimple::from(product),
                });
            }
        }
        Ok(Page::new(data, page, page_size, total))
    }

    pub async fn remove(&self, wishlist_id: i64) -> Result<bool> {
        self.repository.delete(wishlist_id).await
    }

    async fn ensure_product(&self, product_id: i64) -> Result<()> {
        if !self.products.exists(product_id).await? {
            return Err(AppError::not_found("Product not found"));
        }
        Ok(())
    }
}
