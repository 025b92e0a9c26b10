use std::collections::HashMap;

use crate::core::pagination::{clamp_page, Page, PageQuery};
use crate::core::search::{parse_search, SearchJoin};
use crate::core::{AppError, Result};
use crate::modules::categories::models::{
    Category, CategoryCreate, CategoryRead, CategoryReadSimple, CategoryUpdate,
};
use crate::modules::categories::repositories::CategoryRepository;
use crate::modules::types::models::TypeRead;
use crate::modules::types::repositories::TypeRepository;

/// Category CRUD; reads embed the owning type.
pub struct CategoryService {
    repository: CategoryRepository,
    types: TypeRepository,
}

impl CategoryService {
    pub fn new(repository: CategoryRepository, types: TypeRepository) -> Self {
        Self { repository, types }
    }

    pub async fn paginated(&self, query: &PageQuery) -> Result<Page<CategoryRead>> {
        let join = SearchJoin::from_param(&query.search_join);
        let filter = parse_search(&query.search, join, &[]);
        let (page, page_size) = clamp_page(query.page, query.page_size);
        let (total, records) = self.repository.paginated(page, page_size, &filter).await?;

        let types = self.types_by_id(&records).await?;
        let data = records
            .into_iter()
            .map(|category| {
                let type_read = types.get(&category.type_id).cloned();
                CategoryRead::from_parts(category, type_read)
            })
            .collect();
        Ok(Page::new(data, page, page_size, total))
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<CategoryRead> {
        let category = self
            .repository
            .get_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found("A category with this slug does not exist."))?;
        let type_read = self
            .types
            .get_by_id(category.type_id)
            .await?
            .map(TypeRead::from);
        Ok(CategoryRead::from_parts(category, type_read))
    }

    pub async fn create(&self, category_in: CategoryCreate) -> Result<CategoryReadSimple> {
        if self
            .repository
            .get_by_name(&category_in.name)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(
                "Category with this name already exists",
                "name",
            ));
        }
        if self.types.get_by_id(category_in.type_id).await?.is_none() {
            return Err(AppError::not_found("A type with this id does not exist."));
        }
        let created = self.repository.create(category_in.into_insert()).await?;
        Ok(CategoryReadSimple::from(created))
    }

    pub async fn update(
        &self,
        id: i64,
        category_in: CategoryUpdate,
    ) -> Result<CategoryReadSimple> {
        let existing = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("A category with this id does not exist."))?;

        if let Some(name) = &category_in.name {
            if *name != existing.name && self.repository.get_by_name(name).await?.is_some() {
                return Err(AppError::conflict(
                    "Category with this name already exists",
                    "name",
                ));
            }
        }

        self.repository.update(id, category_in.to_patch()).await?;
        let updated = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("A category with this id does not exist."))?;
        Ok(CategoryReadSimple::from(updated))
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        self.repository.delete(id).await
    }

    async fn types_by_id(&self, records: &[Category]) -> Result<HashMap<i64, TypeRead>> {
        let mut ids: Vec<i64> = records.iter().map(|c| c.type_id).collect();
        ids.sort_unstable();
        ids.dedup();
        let types = self.types.list_by_ids(&ids).await?;
        Ok(types
            .into_iter()
            .map(|t| (t.id, TypeRead::from(t)))
            .collect())
    }
}
