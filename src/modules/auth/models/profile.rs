use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::repository::Entity;

/// One-to-one user profile; removed with its user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: i64,
    pub avatar: Option<serde_json::Value>,
    pub bio: Option<String>,
    pub socials: Option<String>,
    pub contact: Option<String>,
    pub notifications: Option<serde_json::Value>,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Profile {
    const TABLE: &'static str = "profile";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "avatar",
        "bio",
        "socials",
        "contact",
        "notifications",
        "user_id",
        "created_at",
        "updated_at",
    ];
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileRead {
    pub bio: Option<String>,
    pub contact: Option<String>,
    pub notifications: Option<serde_json::Value>,
}

impl From<Profile> for ProfileRead {
    fn from(profile: Profile) -> Self {
        Self {
            bio: profile.bio,
            contact: profile.contact,
            notifications: profile.notifications,
        }
    }
}
