use crate::core::pagination::{clamp_page, Page, PageQuery};
use crate::core::search::{parse_search, SearchJoin};
use crate::core::{AppError, Result};
use crate::modules::types::models::{TypeCreate, TypeRead, TypeUpdate};
use crate::modules::types::repositories::TypeRepository;

pub struct TypeService {
    repository: TypeRepository,
}

impl TypeService {
    pub fn new(repository: TypeRepository) -> Self {
        Self { repository }
    }

    pub async fn paginated(&self, query: &PageQuery) -> Result<Page<TypeRead>> {
        let join = SearchJoin::from_param(&query.search_join);
        let filter = parse_search(&query.search, join, &[]);
        let (page, page_size) = clamp_page(query.page, query.page_size);
        let (total, records) = self.repository.paginated(page, page_size, &filter).await?;
        let data = records.into_iter().map(TypeRead::from).collect();
        Ok(Page::new(data, page, page_size, total))
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<TypeRead> {
        self.repository
            .get_by_slug(slug)
            .await?
            .map(TypeRead::from)
            .ok_or_else(|| AppError::not_found("A type with this slug does not exist."))
    }

    pub async fn create(&self, type_in: TypeCreate) -> Result<TypeRead> {
        if self.repository.get_by_name(&type_in.name).await?.is_some() {
            return Err(AppError::conflict(
                "Type with this name already exists",
                "name",
            ));
        }
        let created = self.repository.create(type_in.into_insert()).await?;
        Ok(TypeRead::from(created))
    }

    pub async fn update(&self, id: i64, type_in: TypeUpdate) -> Result<TypeRead> {
        let existing = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("A type with this id does not exist."))?;

        if let Some(name) = &type_in.name {
            if *name != existing.name && self.repository.get_by_name(name).await?.is_some() {
                return Err(AppError::conflict(
                    "Type with this name already exists",
                    "name",
                ));
            }
        }

        self.repository.update(id, type_in.to_patch()).await?;
        let updated = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("A type with this id does not exist."))?;
        Ok(TypeRead::from(updated))
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        self.repository.delete(id).await
    }
}
