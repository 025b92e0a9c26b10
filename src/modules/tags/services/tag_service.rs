use std::collections::HashMap;

use crate::core::pagination::{clamp_page, Page, PageQuery};
use crate::core::search::{parse_search, SearchJoin};
use crate::core::{AppError, Result};
use crate::modules::tags::models::{Tag, TagCreate, TagRead, TagReadSimple, TagUpdate};
use crate::modules::tags::repositories::TagRepository;
use crate::modules::types::models::TypeRead;
use crate::modules::types::repositories::TypeRepository;

/// Tag CRUD; reads embed the owning type.
pub struct TagService {
    repository: TagRepository,
    types: TypeRepository,
}

impl TagService {
    pub fn new(repository: TagRepository, types: TypeRepository) -> Self {
        Self { repository, types }
    }

    pub async fn paginated(&self, query: &PageQuery) -> Result<Page<TagRead>> {
        let join = SearchJoin::from_param(&query.search_join);
        let filter = parse_search(&query.search, join, &[]);
        let (page, page_size) = clamp_page(query.page, query.page_size);
        let (total, records) = self.repository.paginated(page, page_size, &filter).await?;

        let types = self.types_by_id(&records).await?;
        let data = records
            .into_iter()
            .map(|tag| {
                let type_read = types.get(&tag.type_id).cloned();
                TagRead::from_parts(tag, type_read)
            })
            .collect();
        Ok(Page::new(data, page, page_size, total))
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<TagRead> {
        let tag = self
            .repository
            .get_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found("A tag with this slug does not exist."))?;
        let type_read = self.types.get_by_id(tag.type_id).await?.map(TypeRead::from);
        Ok(TagRead::from_parts(tag, type_read))
    }

    pub async fn create(&self, tag_in: TagCreate) -> Result<TagReadSimple> {
        if self.repository.get_by_name(&tag_in.name).await?.is_some() {
            return Err(AppError::conflict(
                "Tag with this name already exists",
                "name",
            ));
        }
        if self.types.get_by_id(tag_in.type_id).await?.is_none() {
            return Err(AppError::not_found("A type with this id does not exist."));
        }
        let created = self.repository.create(tag_in.into_insert()).await?;
        Ok(TagReadSimple::from(created))
    }

    pub async fn update(&self, id: i64, tag_in: TagUpdate) -> Result<TagReadSimple> {
        let existing = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("A tag with this id does not exist."))?;

        if let Some(name) = &tag_in.name {
            if *name != existing.name && self.repository.get_by_name(name).await?.is_some() {
                return Err(AppError::conflict(
                    "Tag with this name already exists",
                    "name",
                ));
            }
        }

        self.repository.update(id, tag_in.to_patch()).await?;
        let updated = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("A tag with this id does not exist."))?;
        Ok(TagReadSimple::from(updated))
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        self.repository.delete(id).await
    }

    async fn types_by_id(&self, records: &[Tag]) -> Result<HashMap<i64, TypeRead>> {
        let mut ids: Vec<i64> = records.iter().map(|t| t.type_id).collect();
        ids.sort_unstable();
        ids.dedup();
        let types = self.types.list_by_ids(&ids).await?;
        Ok(types
            .into_iter()
            .map(|t| (t.id, TypeRead::from(t)))
            .collect())
    }
}
