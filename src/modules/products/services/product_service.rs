use crate::core::pagination::{clamp_page, Page, PageQuery};
use crate::core::search::{parse_search, SearchJoin};
use crate::core::{AppError, Result};
use crate::modules::categories::models::CategoryReadSimple;
use crate::modules::products::models::{
    Product, ProductCreate, ProductRead, ProductUpdate,
};
use crate::modules::products::repositories::ProductRepository;
use crate::modules::tags::models::TagReadSimple;
use crate::modules::types::models::TypeRead;
use crate::modules::types::repositories::TypeRepository;

/// Product CRUD; reads embed the type and the category/tag link sets.
pub struct ProductService {
    repository: ProductRepository,
    types: TypeRepository,
}

impl ProductService {
    pub fn new(repository: ProductRepository, types: TypeRepository) -> Self {
        Self { repository, types }
    }

    pub async fn paginated(&self, query: &PageQuery) -> Result<Page<ProductRead>> {
        let join = SearchJoin::from_param(&query.search_join);
        let filter = parse_search(&query.search, join, &[]);
        let (page, page_size) = clamp_page(query.page, query.page_size);
        let (total, records) = self.repository.paginated(page, page_size, &filter).await?;

        let mut data = Vec::with_capacity(records.len());
        for product in records {
            data.push(self.read_for(product).await?);
        }
        Ok(Page::new(data, page, page_size, total))
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<ProductRead> {
        let product = self
            .repository
            .get_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found("A product with this slug does not exist."))?;
        self.read_for(product).await
    }

    pub async fn create(&self, product_in: ProductCreate) -> Result<ProductRead> {
        if self
            .repository
            .get_by_name(&product_in.name)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(
                "Product with this name already exists",
                "name",
            ));
        }
        if let Some(type_id) = product_in.type_id {
            if self.types.get_by_id(type_id).await?.is_none() {
                return Err(AppError::not_found("A type with this id does not exist."));
            }
        }

        let created = self
            .repository
            .create_with_relations(
                product_in.to_insert(),
                &product_in.category_ids,
                &product_in.tag_ids,
            )
            .await?;
        self.read_for(created).await
    }

    pub async fn update(&self, id: i64, product_in: ProductUpdate) -> Result<ProductRead> {
        let existing = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("A product with this id does not exist."))?;

        if let Some(name) = &product_in.name {
            if *name != existing.name && self.repository.get_by_name(name).await?.is_some() {
                return Err(AppError::conflict(
                    "Product with this name already exists",
                    "name",
                ));
            }
        }

        self.repository
            .update_with_relations(
                id,
                product_in.to_patch(),
                product_in.category_ids.as_deref(),
                product_in.tag_ids.as_deref(),
            )
            .await?;

        let updated = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("A product with this id does not exist."))?;
        self.read_for(updated).await
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        self.repository.delete(id).await
    }

    async fn read_for(&self, product: Product) -> Result<ProductRead> {
        let type_read = match product.type_id {
            Some(type_id) => self.types.get_by_id(type_id).await?.map(TypeRead::from),
            None => None,
        };
        let categories = self
            .repository
            .categories_for(product.id)
            .await?
            .into_iter()
            .map(CategoryReadSimple::from)
            .collect();
        let tags = self
            .repository
            .tags_for(product.id)
            .await?
            .into_iter()
            .map(TagReadSimple::from)
            .collect();
        Ok(ProductRead::from_parts(product, type_read, categories, tags))
    }
}
