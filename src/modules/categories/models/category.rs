use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::query::{InsertSet, UpdateSet};
use crate::core::repository::Entity;
use crate::core::slug::slugify;
use crate::modules::types::models::TypeRead;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub details: Option<String>,
    pub icon: String,
    pub image: Option<serde_json::Value>,
    #[sqlx(json)]
    pub translated_languages: Vec<String>,
    pub type_id: i64,
}

impl Entity for Category {
    const TABLE: &'static str = "category";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "slug",
        "details",
        "icon",
        "image",
        "translated_languages",
        "type_id",
    ];
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryCreate {
    pub name: String,
    pub details: Option<String>,
    pub icon: String,
    pub image: Option<serde_json::Value>,
    pub type_id: i64,
    #[serde(default = "default_languages")]
    pub translated_languages: Vec<String>,
}

fn default_languages() -> Vec<String> {
    vec!["en".to_string()]
}

impl CategoryCreate {
    pub fn into_insert(self) -> InsertSet {
        let slug = slugify(&self.name);
        InsertSet::new()
            .set("name", self.name)
            .set("slug", slug)
            .set("details", self.details)
            .set("icon", self.icon)
            .set("image", self.image)
            .set(
                "translated_languages",
                serde_json::json!(self.translated_languages),
            )
            .set("type_id", self.type_id)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub details: Option<String>,
    pub icon: Option<String>,
    pub image: Option<serde_json::Value>,
    pub type_id: Option<i64>,
    pub translated_languages: Option<Vec<String>>,
}

impl CategoryUpdate {
    pub fn to_patch(&self) -> UpdateSet {
        UpdateSet::new()
            .set_if("name", self.name.clone())
            .set_if("details", self.details.clone())
            .set_if("icon", self.icon.clone())
            .set_if("image", self.image.clone())
            .set_if("type_id", self.type_id)
            .set_if(
                "translated_languages",
                self.translated_languages
                    .as_ref()
                    .map(|langs| serde_json::json!(langs)),
            )
    }
}

/// Full read shape with the owning type embedded.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryRead {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub details: Option<String>,
    pub icon: String,
    pub image: Option<serde_json::Value>,
    pub translated_languages: Vec<String>,
    pub type_id: i64,
    #[serde(rename = "type")]
    pub type_read: Option<TypeRead>,
}

impl CategoryRead {
    pub fn from_parts(category: Category, type_read: Option<TypeRead>) -> Self {
        Self {
            id: category.id,
            name: category.name,
            slug: category.slug,
            details: category.details,
            icon: category.icon,
            image: category.image,
            translated_languages: category.translated_languages,
            type_id: category.type_id,
            type_read,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryReadSimple {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub details: Option<String>,
    pub icon: String,
    pub type_id: i64,
}

impl From<Category> for CategoryReadSimple {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            slug: category.slug,
            details: category.details,
            icon: category.icon,
            type_id: category.type_id,
        }
    }
}
