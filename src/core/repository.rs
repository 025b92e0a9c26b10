//! Generic persistence layer.
//!
//! Every domain repository wraps a [`BaseRepository`] parameterized by its
//! entity type, the same way each module's repository in this codebase wraps
//! the shared CRUD contract: create, point lookup by filter, list, paginated
//! search, partial update, delete-by-id and existence check.

use std::marker::PhantomData;

use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;

use crate::core::error::{AppError, Result};
use crate::core::pagination::clamp_page;
use crate::core::query::{
    bind_values, bind_values_as, bind_values_scalar, Filter, InsertSet, Order, SqlValue, UpdateSet,
};

/// A persisted entity type.
pub trait Entity: for<'r> sqlx::FromRow<'r, MySqlRow> + Send + Unpin {
    /// Table name.
    const TABLE: &'static str;

    /// Columns permitted in dynamic filters, orders, inserts and patches.
    const COLUMNS: &'static [&'static str];

    /// Primary key column.
    const ID: &'static str = "id";
}

/// Uniform CRUD + paginated-search over one entity type.
pub struct BaseRepository<E: Entity> {
    pool: MySqlPool,
    _entity: PhantomData<E>,
}

impl<E: Entity> Clone for BaseRepository<E> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> BaseRepository<E> {
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Insert a row and return the generated key (0 for tables whose key the
    /// caller supplies).
    pub async fn insert(&self, insert: InsertSet) -> Result<u64> {
        let (columns, placeholders, values) = insert.to_sql(E::COLUMNS)?;
        let sql = format!(
            "INSERT INTO `{}` ({columns}) VALUES ({placeholders})",
            E::TABLE
        );
        let result = bind_values(sqlx::query(&sql), values)
            .execute(&self.pool)
            .await
            .map_err(map_constraint_err)?;
        Ok(result.last_insert_id())
    }

    /// Insert a row with an auto-increment key and fetch it back.
    pub async fn create(&self, insert: InsertSet) -> Result<E> {
        let id = self.insert(insert).await?;
        self.get(&Filter::eq(E::ID, id as i64))
            .await?
            .ok_or_else(|| AppError::Database(sqlx::Error::RowNotFound))
    }

    /// First record matching the filter, or absence.
    pub async fn get(&self, filter: &Filter) -> Result<Option<E>> {
        let rendered = filter.to_sql(E::COLUMNS)?;
        let mut sql = format!("SELECT * FROM `{}`", E::TABLE);
        let mut values = Vec::new();
        if let Some((condition, bound)) = rendered {
            sql.push_str(&format!(" WHERE {condition}"));
            values = bound;
        }
        sql.push_str(" LIMIT 1");
        let entity = bind_values_as(sqlx::query_as::<_, E>(&sql), values)
            .fetch_optional(&self.pool)
            .await?;
        Ok(entity)
    }

    /// All records matching the filter, unbounded. Callers page large sets.
    pub async fn list(&self, filter: &Filter) -> Result<Vec<E>> {
        let rendered = filter.to_sql(E::COLUMNS)?;
        let mut sql = format!("SELECT * FROM `{}`", E::TABLE);
        let mut values = Vec::new();
        if let Some((condition, bound)) = rendered {
            sql.push_str(&format!(" WHERE {condition}"));
            values = bound;
        }
        sql.push_str(&format!(" ORDER BY `{}`", E::ID));
        let entities = bind_values_as(sqlx::query_as::<_, E>(&sql), values)
            .fetch_all(&self.pool)
            .await?;
        Ok(entities)
    }

    /// Count of all records matching the filter.
    pub async fn count(&self, filter: &Filter) -> Result<i64> {
        let rendered = filter.to_sql(E::COLUMNS)?;
        let mut sql = format!("SELECT COUNT(*) FROM `{}`", E::TABLE);
        let mut values = Vec::new();
        if let Some((condition, bound)) = rendered {
            sql.push_str(&format!(" WHERE {condition}"));
            values = bound;
        }
        let total = bind_values_scalar(sqlx::query_scalar::<_, i64>(&sql), values)
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    /// Existence check without materializing the record.
    pub async fn exists(&self, filter: &Filter) -> Result<bool> {
        Ok(self.count(filter).await? > 0)
    }

    /// Paginated search: total count over the whole filter, then the
    /// 1-indexed page slice. Out-of-range page/page_size clamp to 1.
    pub async fn paginated(
        &self,
        page: i64,
        page_size: i64,
        filter: &Filter,
        order: &Order,
    ) -> Result<(i64, Vec<E>)> {
        let (page, page_size) = clamp_page(page, page_size);
        let total = self.count(filter).await?;

        let rendered = filter.to_sql(E::COLUMNS)?;
        let mut sql = format!("SELECT * FROM `{}`", E::TABLE);
        let mut values = Vec::new();
        if let Some((condition, bound)) = rendered {
            sql.push_str(&format!(" WHERE {condition}"));
            values = bound;
        }
        match order.to_sql(E::COLUMNS)? {
            Some(order_sql) => sql.push_str(&format!(" ORDER BY {order_sql}")),
            // stable order when unspecified
            None => sql.push_str(&format!(" ORDER BY `{}`", E::ID)),
        }
        sql.push_str(" LIMIT ? OFFSET ?");
        values.push(SqlValue::I64(page_size));
        values.push(SqlValue::I64((page - 1) * page_size));

        let records = bind_values_as(sqlx::query_as::<_, E>(&sql), values)
            .fetch_all(&self.pool)
            .await?;
        Ok((total, records))
    }

    /// Merge only the supplied fields into the record. An empty patch is a
    /// no-op, not an error.
    pub async fn update(&self, id: impl Into<SqlValue>, patch: UpdateSet) -> Result<()> {
        if patch.is_empty() {
            return Ok(());
        }
        let (assignments, mut values) = patch.to_sql(E::COLUMNS)?;
        let sql = format!(
            "UPDATE `{}` SET {assignments} WHERE `{}` = ?",
            E::TABLE,
            E::ID
        );
        values.push(id.into());
        bind_values(sqlx::query(&sql), values)
            .execute(&self.pool)
            .await
            .map_err(map_constraint_err)?;
        Ok(())
    }

    /// Hard delete by id; `false` when no such record exists.
    pub async fn delete(&self, id: impl Into<SqlValue>) -> Result<bool> {
        let sql = format!("DELETE FROM `{}` WHERE `{}` = ?", E::TABLE, E::ID);
        let result = bind_values(sqlx::query(&sql), vec![id.into()])
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Surface duplicate-key violations as a distinguishable conflict; services
/// that pre-check names attach the offending field themselves.
pub fn map_constraint_err(e: sqlx::Error) -> AppError {
    if e.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
    {
        return AppError::Conflict {
            message: "A record with this value already exists".to_string(),
            field: None,
        };
    }
    AppError::Database(e)
}
