use chrono::Utc;
use sqlx::MySqlPool;

use crate::core::query::{Filter, InsertSet, Order, UpdateSet};
use crate::core::repository::BaseRepository;
use crate::core::{AppError, Result};
use crate::modules::auth::models::{Profile, ProfilePatch, User};

/// Persistence for users and their one-to-one profiles.
#[derive(Clone)]
pub struct UserRepository {
    users: BaseRepository<User>,
    profiles: BaseRepository<Profile>,
}

impl UserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            users: BaseRepository::new(pool.clone()),
            profiles: BaseRepository::new(pool),
        }
    }

    pub async fn paginated(
        &self,
        page: i64,
        page_size: i64,
        filter: &Filter,
    ) -> Result<(i64, Vec<User>)> {
        self.users
            .paginated(page, page_size, filter, &Order::default())
            .await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<User>> {
        self.users.get(&Filter::eq("id", id)).await
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        self.users.get(&Filter::eq("email", email)).await
    }

    pub async fn email_taken(&self, email: &str) -> Result<bool> {
        self.users.exists(&Filter::eq("email", email)).await
    }

    /// Insert with a caller-supplied UUID and fetch the record back.
    pub async fn create(&self, id: &str, insert: InsertSet) -> Result<User> {
        self.users.insert(insert).await?;
        self.get_by_id(id)
            .await?
            .ok_or_else(|| AppError::Database(sqlx::Error::RowNotFound))
    }

    pub async fn update(&self, id: &str, patch: UpdateSet) -> Result<User> {
        self.users.update(id, patch).await?;
        self.get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("A user with this id does not exist."))
    }

    pub async fn set_password(&self, id: &str, password_hash: String) -> Result<()> {
        self.users
            .update(id, UpdateSet::new().set("password", password_hash))
            .await
    }

    pub async fn touch_last_login(&self, id: &str) -> Result<()> {
        self.users
            .update(id, UpdateSet::new().set("last_login", Utc::now()))
            .await
    }

    pub async fn profile_for(&self, user_id: &str) -> Result<Option<Profile>> {
        self.profiles.get(&Filter::eq("user_id", user_id)).await
    }

    /// Create or partially update the user's profile.
    pub async fn upsert_profile(&self, user_id: &str, patch: &ProfilePatch) -> Result<()> {
        let now = Utc::now();
        match self.profile_for(user_id).await? {
            Some(existing) => {
                let update = UpdateSet::new()
                    .set_if("avatar", patch.avatar.clone())
                    .set_if("bio", patch.bio.clone())
                    .set_if("socials", patch.socials.clone())
                    .set_if("contact", patch.contact.clone())
                    .set_if("notifications", patch.notifications.clone())
                    .set("updated_at", now);
                self.profiles.update(existing.id, update).await
            }
            None => {
                let insert = InsertSet::new()
                    .set("user_id", user_id)
                    .set("avatar", patch.avatar.clone())
                    .set("bio", patch.bio.clone())
                    .set("socials", patch.socials.clone())
                    .set("contact", patch.contact.clone())
                    .set("notifications", patch.notifications.clone())
                    .set("created_at", now)
                    .set("updated_at", now);
                self.profiles.insert(insert).await?;
                Ok(())
            }
        }
    }
}
