use sqlx::MySqlPool;

use crate::core::query::{Filter, InsertSet, Order, UpdateSet};
use crate::core::repository::BaseRepository;
use crate::core::Result;
use crate::modules::tags::models::Tag;

#[derive(Clone)]
pub struct TagRepository {
    base: BaseRepository<Tag>,
}

impl TagRepository {
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
    ) -> Result<(i64, Vec<Tag>)> {
        self.base
            .paginated(page, page_size, filter, &Order::default())
            .await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Tag>> {
        self.base.get(&Filter::eq("id", id)).await
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<Tag>> {
        self.base.get(&Filter::eq("name", name)).await
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Tag>> {
        self.base.get(&Filter::eq("slug", slug)).await
    }

    pub async fn create(&self, insert: InsertSet) -> Result<Tag> {
        self.base.create(insert).await
    }

    pub async fn update(&self, id: i64, patch: UpdateSet) -> Result<()> {
        self.base.update(id, patch).await
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        self.base.delete(id).await
    }
}
