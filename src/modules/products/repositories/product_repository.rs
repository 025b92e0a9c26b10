use sqlx::{MySql, MySqlPool, Transaction};

use crate::core::query::{bind_values, Filter, InsertSet, Order, UpdateSet};
use crate::core::repository::{map_constraint_err, BaseRepository, Entity};
use crate::core::{AppError, Result};
use crate::modules::categories::models::Category;
use crate::modules::products::models::Product;
use crate::modules::tags::models::Tag;

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository<Product>,
}

impl ProductRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            base: BaseRepository::new(pool),
        }
    }

    fn pool(&self) -> &MySqlPool {
        self.base.pool()
    }

    pub async fn paginated(
        &self,
        page: i64,
        page_size: i64,
        filter: &Filter,
    ) -> Result<(i64, Vec<Product>)> {
        self.base
            .paginated(page, page_size, filter, &Order::default())
            .await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Product>> {
        self.base.get(&Filter::eq("id", id)).await
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<Product>> {
        self.base.get(&Filter::eq("name", name)).await
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Product>> {
        self.base.get(&Filter::eq("slug", slug)).await
    }

    pub async fn exists(&self, id: i64) -> Result<bool> {
        self.base.exists(&Filter::eq("id", id)).await
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        self.base.delete(id).await
    }

    /// Insert the product and its category/tag links in one transaction.
    pub async fn create_with_relations(
        &self,
        insert: InsertSet,
        category_ids: &[i64],
        tag_ids: &[i64],
    ) -> Result<Product> {
        let mut tx = self.pool().begin().await.map_err(AppError::Database)?;

        let (columns, placeholders, values) = insert.to_sql(Product::COLUMNS)?;
        let sql = format!(
            "INSERT INTO `{}` ({columns}) VALUES ({placeholders})",
            Product::TABLE
        );
        let result = bind_values(sqlx::query(&sql), values)
            .execute(&mut *tx)
            .await
            .map_err(map_constraint_err)?;
        let product_id = result.last_insert_id() as i64;

        Self::insert_links(&mut tx, "product_category", "category_id", product_id, category_ids)
            .await?;
        Self::insert_links(&mut tx, "product_tag", "tag_id", product_id, tag_ids).await?;

        tx.commit().await.map_err(AppError::Database)?;

        self.get_by_id(product_id)
            .await?
            .ok_or_else(|| AppError::Database(sqlx::Error::RowNotFound))
    }

    /// Apply a scalar patch and, when requested, replace the link sets —
    /// all inside one transaction so a failure rolls back both.
    pub async fn update_with_relations(
        &self,
        id: i64,
        patch: UpdateSet,
        category_ids: Option<&[i64]>,
        tag_ids: Option<&[i64]>,
    ) -> Result<()> {
        let mut tx = self.pool().begin().await.map_err(AppError::Database)?;

        if !patch.is_empty() {
            let (assignments, mut values) = patch.to_sql(Product::COLUMNS)?;
            let sql = format!(
                "UPDATE `{}` SET {assignments} WHERE `id` = ?",
                Product::TABLE
            );
            values.push(id.into());
            bind_values(sqlx::query(&sql), values)
                .execute(&mut *tx)
                .await
                .map_err(map_constraint_err)?;
        }

        if let Some(category_ids) = category_ids {
            Self::replace_links(&mut tx, "product_category", "category_id", id, category_ids)
                .await?;
        }
        if let Some(tag_ids) = tag_ids {
            Self::replace_links(&mut tx, "product_tag", "tag_id", id, tag_ids).await?;
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }

    /// Categories linked to a product.
    pub async fn categories_for(&self, product_id: i64) -> Result<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>(
            r#"
            SELECT c.*
            FROM `category` c
            INNER JOIN `product_category` pc ON pc.`category_id` = c.`id`
            WHERE pc.`product_id` = ?
            ORDER BY c.`id`
            "#,
        )
        .bind(product_id)
        .fetch_all(self.pool())
        .await
        .map_err(AppError::Database)?;
        Ok(rows)
    }

    /// Tags linked to a product.
    pub async fn tags_for(&self, product_id: i64) -> Result<Vec<Tag>> {
        let rows = sqlx::query_as::<_, Tag>(
            r#"
            SELECT t.*
            FROM `tag` t
            INNER JOIN `product_tag` pt ON pt.`tag_id` = t.`id`
            WHERE pt.`product_id` = ?
            ORDER BY t.`id`
            "#,
        )
        .bind(product_id)
        .fetch_all(self.pool())
        .await
        .map_err(AppError::Database)?;
        Ok(rows)
    }

    async fn insert_links(
        tx: &mut Transaction<'_, MySql>,
        table: &str,
        link_column: &str,
        product_id: i64,
        linked_ids: &[i64],
    ) -> Result<()> {
        for linked_id in linked_ids {
            let sql =
                format!("INSERT INTO `{table}` (`product_id`, `{link_column}`) VALUES (?, ?)");
            sqlx::query(&sql)
                .bind(product_id)
                .bind(linked_id)
                .execute(&mut **tx)
                .await
                .map_err(map_constraint_err)?;
        }
        Ok(())
    }

    async fn replace_links(
        tx: &mut Transaction<'_, MySql>,
        table: &str,
        link_column: &str,
        product_id: i64,
        linked_ids: &[i64],
    ) -> Result<()> {
        let sql = format!("DELETE FROM `{table}` WHERE `product_id` = ?");
        sqlx::query(&sql)
            .bind(product_id)
            .execute(&mut **tx)
            .await
            .map_err(AppError::Database)?;
        Self::insert_links(tx, table, link_column, product_id, linked_ids).await
    }
}
