use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::query::{InsertSet, UpdateSet};
use crate::core::repository::Entity;
use crate::core::slug::slugify;
use crate::modules::types::models::TypeRead;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub icon: String,
    pub slug: String,
    pub type_id: i64,
}

impl Entity for Tag {
    const TABLE: &'static str = "tag";
    const COLUMNS: &'static [&'static str] = &["id", "name", "icon", "slug", "type_id"];
}

#[derive(Debug, Clone, Deserialize)]
pub struct TagCreate {
    pub name: String,
    pub icon: String,
    pub type_id: i64,
}

impl TagCreate {
    pub fn into_insert(self) -> InsertSet {
        let slug = slugify(&self.name);
        InsertSet::new()
            .set("name", self.name)
            .set("icon", self.icon)
            .set("slug", slug)
            .set("type_id", self.type_id)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagUpdate {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub type_id: Option<i64>,
}

impl TagUpdate {
    pub fn to_patch(&self) -> UpdateSet {
        UpdateSet::new()
            .set_if("name", self.name.clone())
            .set_if("icon", self.icon.clone())
            .set_if("type_id", self.type_id)
    }
}

/// Full read shape with the owning type embedded.
#[derive(Debug, Clone, Serialize)]
pub struct TagRead {
    pub id: i64,
    pub name: String,
    pub icon: String,
    pub slug: String,
    pub type_id: i64,
    #[serde(rename = "type")]
    pub type_read: Option<TypeRead>,
}

impl TagRead {
    pub fn from_parts(tag: Tag, type_read: Option<TypeRead>) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            icon: tag.icon,
            slug: tag.slug,
            type_id: tag.type_id,
            type_read,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TagReadSimple {
    pub id: i64,
    pub name: String,
    pub icon: String,
    pub slug: String,
    pub type_id: i64,
}

impl From<Tag> for TagReadSimple {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            icon: tag.icon,
            slug: tag.slug,
            type_id: tag.type_id,
        }
    }
}
