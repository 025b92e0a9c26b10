use uuid::Uuid;

use crate::core::pagination::{clamp_page, Page, PageQuery};
use crate::core::query::Filter;
use crate::core::search::{parse_search, RoleFilterMode, SearchJoin};
use crate::core::{AppError, Result};
use crate::modules::auth::models::{
    ChangePasswordResponse, User, UserCreate, UserRead, UserReadSimple, UserUpdate,
    USER_SEARCH_MAPPINGS,
};
use crate::modules::auth::repositories::UserRepository;
use crate::modules::auth::services::password::{
    hash_password, validate_password_policy, verify_password,
};

/// User management on top of the repository.
pub struct UserService {
    repository: UserRepository,
    role_filter_mode: RoleFilterMode,
}

impl UserService {
    pub fn new(repository: UserRepository, role_filter_mode: RoleFilterMode) -> Self {
        Self {
            repository,
            role_filter_mode,
        }
    }

    /// Paginated search over users. A `role` parameter folds into the
    /// free-text predicate per the configured [`RoleFilterMode`].
    pub async fn paginated(&self, query: &PageQuery, role: Option<&str>) -> Result<Page<UserRead>> {
        let join = SearchJoin::from_param(&query.search_join);
        let mut filter = parse_search(&query.search, join, USER_SEARCH_MAPPINGS);
        if let Some(role) = role {
            filter = self
                .role_filter_mode
                .apply(filter, Filter::eq("role", role));
        }

        let (page, page_size) = clamp_page(query.page, query.page_size);
        let (total, users) = self.repository.paginated(page, page_size, &filter).await?;
        let data = users.into_iter().map(UserRead::from).collect();
        Ok(Page::new(data, page, page_size, total))
    }

    /// Admin-driven account creation.
    pub async fn create(&self, user_in: UserCreate) -> Result<UserRead> {
        if self.repository.email_taken(&user_in.email).await? {
            return Err(AppError::conflict(
                "User with this email already exists",
                "email",
            ));
        }
        validate_password_policy(&user_in.password)?;

        let id = Uuid::new_v4().to_string();
        let password_hash = hash_password(&user_in.password)?;
        let user = self
            .repository
            .create(&id, user_in.into_insert(&id, password_hash))
            .await?;
        Ok(UserRead::from(user))
    }

    /// Partial update; a nested profile payload upserts the profile.
    pub async fn update(&self, user_id: &str, user_in: UserUpdate) -> Result<UserRead> {
        let user = self
            .repository
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("A user with this id does not exist."))?;

        if let Some(email) = &user_in.email {
            if *email != user.email && self.repository.email_taken(email).await? {
                return Err(AppError::conflict(
                    "User with this email already exists",
                    "email",
                ));
            }
        }

        let patch = user_in.to_patch();
        let updated = if patch.is_empty() {
            user
        } else {
            self.repository.update(user_id, patch).await?
        };

        if let Some(profile_patch) = &user_in.profile {
            self.repository.upsert_profile(user_id, profile_patch).await?;
        }

        let profile = self.repository.profile_for(user_id).await?;
        Ok(UserRead::from_parts(updated, profile))
    }

    /// Self-service email change.
    pub async fn update_email(&self, current: &User, email: String) -> Result<UserReadSimple> {
        if !email.contains('@') {
            return Err(AppError::validation("Invalid email address"));
        }
        if email != current.email && self.repository.email_taken(&email).await? {
            return Err(AppError::conflict(
                "User with this email already exists",
                "email",
            ));
        }
        let update = UserUpdate {
            email: Some(email),
            ..Default::default()
        };
        let updated = self.repository.update(&current.id, update.to_patch()).await?;
        Ok(UserReadSimple::from(updated))
    }

    /// Self-service password change; verifies the old password first.
    pub async fn change_password(
        &self,
        current: &User,
        old_password: &str,
        new_password: &str,
    ) -> Result<ChangePasswordResponse> {
        if !verify_password(old_password, &current.password)? {
            return Err(AppError::validation("Current password is incorrect"));
        }
        validate_password_policy(new_password)?;

        let password_hash = hash_password(new_password)?;
        self.repository
            .set_password(&current.id, password_hash)
            .await?;

        Ok(ChangePasswordResponse {
            success: true,
            message: "Password updated successfully".to_string(),
        })
    }
}
