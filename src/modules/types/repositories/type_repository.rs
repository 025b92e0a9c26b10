use sqlx::MySqlPool;

use crate::core::query::{Filter, InsertSet, Order, UpdateSet};
use crate::core::repository::BaseRepository;
use crate::core::Result;
use crate::modules::types::models::ProductType;

#[derive(Clone)]
pub struct TypeRepository {
    base: BaseRepository<ProductType>,
}

impl TypeRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            base: BaseRepository::new(pool),
        }
    }

    pub async fn paginated(
        &self,
        page: i64,
        page_size: i64,
        filter: &Filter,
    ) -> Result<(i64, Vec<ProductType>)> {
        self.base
            .paginated(page, page_size, filter, &Order::default())
            .await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<ProductType>> {
        self.base.get(&Filter::eq("id", id)).await
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<ProductType>> {
        self.base.get(&Filter::eq("name", name)).await
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<ProductType>> {
        self.base.get(&Filter::eq("slug", slug)).await
    }

    pub async fn create(&self, insert: InsertSet) -> Result<ProductType> {
        self.base.create(insert).await
    }

    pub async fn update(&self, id: i64, patch: UpdateSet) -> Result<()> {
        self.base.update(id, patch).await
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        self.base.delete(id).await
    }

    /// Batched lookup used when embedding types into category/tag reads.
    pub async fn list_by_ids(&self, ids: &[i64]) -> Result<Vec<ProductType>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let filter = ids
            .iter()
            .fold(Filter::All, |acc, id| acc.or(Filter::eq("id", *id)));
        self.base.list(&filter).await
    }
}
