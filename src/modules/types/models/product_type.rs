use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::query::{InsertSet, UpdateSet};
use crate::core::repository::Entity;
use crate::core::slug::slugify;

/// A product type groups categories, tags and products (e.g. "grocery").
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProductType {
    pub id: i64,
    pub name: String,
    pub icon: String,
    pub slug: String,
    #[sqlx(json)]
    pub translated_languages: Vec<String>,
}

impl Entity for ProductType {
    const TABLE: &'static str = "product_type";
    const COLUMNS: &'static [&'static str] =
        &["id", "name", "icon", "slug", "translated_languages"];
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeCreate {
    pub name: String,
    pub icon: String,
    #[serde(default)]
    pub translated_languages: Vec<String>,
}

impl TypeCreate {
    pub fn into_insert(self) -> InsertSet {
        let slug = slugify(&self.name);
        InsertSet::new()
            .set("name", self.name)
            .set("icon", self.icon)
            .set("slug", slug)
            .set(
                "translated_languages",
                serde_json::json!(self.translated_languages),
            )
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TypeUpdate {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub translated_languages: Option<Vec<String>>,
}

impl TypeUpdate {
    pub fn to_patch(&self) -> UpdateSet {
        UpdateSet::new()
            .set_if("name", self.name.clone())
            .set_if("icon", self.icon.clone())
            .set_if(
                "translated_languages",
                self.translated_languages
                    .as_ref()
                    .map(|langs| serde_json::json!(langs)),
            )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TypeRead {
    pub id: i64,
    pub name: String,
    pub icon: String,
    pub slug: String,
    pub translated_languages: Vec<String>,
}

impl From<ProductType> for TypeRead {
    fn from(t: ProductType) -> Self {
        Self {
            id: t.id,
            name: t.name,
            icon: t.icon,
            slug: t.slug,
            translated_languages: t.translated_languages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_derives_slug() {
        let insert = TypeCreate {
            name: "Home Appliances".to_string(),
            icon: "plug".to_string(),
            translated_languages: vec!["en".to_string()],
        }
        .into_insert();
        let (columns, _, _) = insert.to_sql(ProductType::COLUMNS).unwrap();
        assert!(columns.contains("`slug`"));
    }

    #[test]
    fn test_update_patch_is_partial() {
        let update = TypeUpdate {
            icon: Some("spark".to_string()),
            ..Default::default()
        };
        assert_eq!(update.to_patch().len(), 1);
    }
}
