use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::query::{InsertSet, UpdateSet};
use crate::core::repository::Entity;
use crate::core::slug::slugify;
use crate::modules::categories::models::CategoryReadSimple;
use crate::modules::tags::models::TagReadSimple;
use crate::modules::types::models::TypeRead;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR(20)", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Publish,
    Draft,
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductStatus::Publish => write!(f, "publish"),
            ProductStatus::Draft => write!(f, "draft"),
        }
    }
}

/// Only simple products exist; variable products are a different catalog
/// model entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR(20)", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    Simple,
}

impl std::fmt::Display for ProductKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductKind::Simple => write!(f, "simple"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub sale_price: Option<Decimal>,
    pub status: ProductStatus,
    pub product_kind: ProductKind,
    pub image: Option<serde_json::Value>,
    pub gallery: Option<serde_json::Value>,
    #[sqlx(json)]
    pub translated_languages: Vec<String>,
    pub type_id: Option<i64>,
}

impl Entity for Product {
    const TABLE: &'static str = "product";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "slug",
        "description",
        "price",
        "sale_price",
        "status",
        "product_kind",
        "image",
        "gallery",
        "translated_languages",
        "type_id",
    ];
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub sale_price: Option<Decimal>,
    #[serde(default = "default_status")]
    pub status: ProductStatus,
    pub image: Option<serde_json::Value>,
    pub gallery: Option<serde_json::Value>,
    pub type_id: Option<i64>,
    #[serde(default = "default_languages")]
    pub translated_languages: Vec<String>,
    #[serde(default)]
    pub category_ids: Vec<i64>,
    #[serde(default)]
    pub tag_ids: Vec<i64>,
}

fn default_status() -> ProductStatus {
    ProductStatus::Publish
}

fn default_languages() -> Vec<String> {
    vec!["en".to_string()]
}

impl ProductCreate {
    pub fn to_insert(&self) -> InsertSet {
        let slug = slugify(&self.name);
        InsertSet::new()
            .set("name", self.name.clone())
            .set("slug", slug)
            .set("description", self.description.clone())
            .set("price", self.price)
            .set("sale_price", self.sale_price)
            .set("status", self.status.to_string())
            .set("product_kind", ProductKind::Simple.to_string())
            .set("image", self.image.clone())
            .set("gallery", self.gallery.clone())
            .set(
                "translated_languages",
                serde_json::json!(self.translated_languages),
            )
            .set("type_id", self.type_id)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub sale_price: Option<Decimal>,
    pub status: Option<ProductStatus>,
    pub image: Option<serde_json::Value>,
    pub gallery: Option<serde_json::Value>,
    pub type_id: Option<i64>,
    pub translated_languages: Option<Vec<String>>,
    /// When present, replaces the full category link set.
    pub category_ids: Option<Vec<i64>>,
    /// When present, replaces the full tag link set.
    pub tag_ids: Option<Vec<i64>>,
}

impl ProductUpdate {
    pub fn to_patch(&self) -> UpdateSet {
        UpdateSet::new()
            .set_if("name", self.name.clone())
            .set_if("description", self.description.clone())
            .set_if("price", self.price)
            .set_if("sale_price", self.sale_price)
            .set_if("status", self.status.map(|s| s.to_string()))
            .set_if("image", self.image.clone())
            .set_if("gallery", self.gallery.clone())
            .set_if("type_id", self.type_id)
            .set_if(
                "translated_languages",
                self.translated_languages
                    .as_ref()
                    .map(|langs| serde_json::json!(langs)),
            )
    }
}

/// Full read shape with type, categories and tags embedded.
#[derive(Debug, Clone, Serialize)]
pub struct ProductRead {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub sale_price: Option<Decimal>,
    pub status: ProductStatus,
    pub product_kind: ProductKind,
    pub image: Option<serde_json::Value>,
    pub gallery: Option<serde_json::Value>,
    pub translated_languages: Vec<String>,
    pub type_id: Option<i64>,
    #[serde(rename = "type")]
    pub type_read: Option<TypeRead>,
    pub categories: Vec<CategoryReadSimple>,
    pub tags: Vec<TagReadSimple>,
}

impl ProductRead {
    pub fn from_parts(
        product: Product,
        type_read: Option<TypeRead>,
        categories: Vec<CategoryReadSimple>,
        tags: Vec<TagReadSimple>,
    ) -> Self {
        Self {
            id: product.id,
            name: product.name,
            slug: product.slug,
            description: product.description,
            price: product.price,
            sale_price: product.sale_price,
            status: product.status,
            product_kind: product.product_kind,
            image: product.image,
            gallery: product.gallery,
            translated_languages: product.translated_languages,
            type_id: product.type_id,
            type_read,
            categories,
            tags,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductReadSimple {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub sale_price: Option<Decimal>,
    pub image: Option<serde_json::Value>,
}

impl From<Product> for ProductReadSimple {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            slug: product.slug,
            description: product.description,
            price: product.price,
            sale_price: product.sale_price,
            image: product.image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_update_patch_skips_relation_fields() {
        let update = ProductUpdate {
            price: Some(dec!(12.50)),
            category_ids: Some(vec![1, 2]),
            ..Default::default()
        };
        // relation replacement is not a column assignment
        assert_eq!(update.to_patch().len(), 1);
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&ProductStatus::Publish).unwrap(),
            "\"publish\""
        );
        let status: ProductStatus = serde_json::from_str("\"draft\"").unwrap();
        assert_eq!(status, ProductStatus::Draft);
    }
}
