use uuid::Uuid;

use crate::config::AuthConfig;
use crate::core::{AppError, Result};
use crate::modules::auth::models::{JwtOut, User, UserLogin, UserRead, UserRegister};
use crate::modules::auth::repositories::UserRepository;
use crate::modules::auth::services::password::{
    hash_password, validate_password_policy, verify_password,
};
use crate::modules::auth::services::token::create_access_token;

/// Registration, login and session introspection.
pub struct AuthService {
    repository: UserRepository,
    auth: AuthConfig,
}

impl AuthService {
    pub fn new(repository: UserRepository, auth: AuthConfig) -> Self {
        Self { repository, auth }
    }

    /// Create an account and issue its first token.
    pub async fn register(&self, user_in: UserRegister) -> Result<JwtOut> {
        if !user_in.email.contains('@') {
            return Err(AppError::validation("Invalid email address"));
        }
        if self.repository.email_taken(&user_in.email).await? {
            return Err(AppError::conflict(
                "A user with this email already exists.",
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

        tracing::info!(user_id = %user.id, "registered new user");
        self.issue(user)
    }

    /// Verify credentials and issue a token.
    pub async fn login(&self, credentials: UserLogin) -> Result<JwtOut> {
        let user = self
            .repository
            .get_by_email(&credentials.email)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        if !verify_password(&credentials.password, &user.password)? {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        self.repository.touch_last_login(&user.id).await?;
        self.issue(user)
    }

    /// The authenticated user with their profile attached.
    pub async fn me(&self, user: User) -> Result<UserRead> {
        let profile = self.repository.profile_for(&user.id).await?;
        Ok(UserRead::from_parts(user, profile))
    }

    fn issue(&self, user: User) -> Result<JwtOut> {
        let token = create_access_token(&user.id, &user.email, &self.auth)?;
        Ok(JwtOut {
            token,
            email: user.email,
            username: user.username,
            role: user.role,
            permissions: vec![user.role.to_string()],
        })
    }
}
