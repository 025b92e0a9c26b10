use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::query::{InsertSet, UpdateSet};
use crate::core::repository::Entity;
use crate::core::search::SearchMapping;

use super::profile::{Profile, ProfileRead};

/// Closed role set; permission checks match exhaustively against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR(20)", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    SuperAdmin,
    Admin,
    Customer,
}

impl UserRole {
    /// Roles allowed through admin-gated operations.
    pub fn is_admin(&self) -> bool {
        match self {
            UserRole::SuperAdmin | UserRole::Admin => true,
            UserRole::Customer => false,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::SuperAdmin => write!(f, "super_admin"),
            UserRole::Admin => write!(f, "admin"),
            UserRole::Customer => write!(f, "customer"),
        }
    }
}

/// Persisted user record. The id is a UUID stored as CHAR(36).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub name: Option<String>,
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub name_with_initials: Option<String>,
    pub username: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub nic: Option<String>,
    #[serde(skip_serializing)]
    pub password: String,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub role: UserRole,
}

impl Entity for User {
    const TABLE: &'static str = "user";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "full_name",
        "first_name",
        "last_name",
        "name_with_initials",
        "username",
        "email",
        "phone",
        "nic",
        "password",
        "is_active",
        "last_login",
        "role",
    ];
}

/// Search keys that fan out over several user columns.
pub const USER_SEARCH_MAPPINGS: &[SearchMapping] = &[SearchMapping {
    key: "name",
    columns: &["first_name", "last_name", "email", "username"],
}];

// Request/response schemas

#[derive(Debug, Clone, Deserialize)]
pub struct UserLogin {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserRegister {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub name_with_initials: Option<String>,
    pub username: Option<String>,
    #[serde(default = "default_register_role")]
    pub role: UserRole,
}

fn default_register_role() -> UserRole {
    UserRole::Customer
}

impl UserRegister {
    /// Columns for the new record; the caller supplies the id and hash.
    pub fn into_insert(self, id: &str, password_hash: String) -> InsertSet {
        InsertSet::new()
            .set("id", id)
            .set("email", self.email)
            .set("password", password_hash)
            .set("full_name", self.full_name)
            .set("first_name", self.first_name)
            .set("last_name", self.last_name)
            .set("name_with_initials", self.name_with_initials)
            .set("username", self.username)
            .set("role", self.role.to_string())
            .set("is_active", true)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JwtOut {
    pub token: String,
    pub email: String,
    pub username: Option<String>,
    pub role: UserRole,
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserCreate {
    pub name: Option<String>,
    pub full_name: String,
    pub first_name: String,
    pub last_name: String,
    pub name_with_initials: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Option<UserRole>,
}

impl UserCreate {
    pub fn into_insert(self, id: &str, password_hash: String) -> InsertSet {
        InsertSet::new()
            .set("id", id)
            .set("name", self.name)
            .set("full_name", self.full_name)
            .set("first_name", self.first_name)
            .set("last_name", self.last_name)
            .set("name_with_initials", self.name_with_initials)
            .set("username", self.username)
            .set("email", self.email)
            .set("password", password_hash)
            .set(
                "role",
                self.role.unwrap_or(UserRole::Customer).to_string(),
            )
            .set("is_active", true)
    }
}

/// Partial profile payload nested in a user update.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfilePatch {
    pub avatar: Option<serde_json::Value>,
    pub bio: Option<String>,
    pub socials: Option<String>,
    pub contact: Option<String>,
    pub notifications: Option<serde_json::Value>,
}

/// Partial user update: absent fields keep their prior values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub name_with_initials: Option<String>,
    pub nic: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub profile: Option<ProfilePatch>,
}

impl UserUpdate {
    pub fn to_patch(&self) -> UpdateSet {
        UpdateSet::new()
            .set_if("name", self.name.clone())
            .set_if("full_name", self.full_name.clone())
            .set_if("first_name", self.first_name.clone())
            .set_if("last_name", self.last_name.clone())
            .set_if("name_with_initials", self.name_with_initials.clone())
            .set_if("nic", self.nic.clone())
            .set_if("username", self.username.clone())
            .set_if("email", self.email.clone())
            .set_if("role", self.role.map(|r| r.to_string()))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserRead {
    pub id: String,
    pub name: Option<String>,
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub name_with_initials: Option<String>,
    pub nic: Option<String>,
    pub username: Option<String>,
    pub email: String,
    pub role: UserRole,
    pub is_active: bool,
    pub profile: Option<ProfileRead>,
}

impl UserRead {
    pub fn from_parts(user: User, profile: Option<Profile>) -> Self {
        Self {
            id: user.id,
            name: user.name,
            full_name: user.full_name,
            first_name: user.first_name,
            last_name: user.last_name,
            name_with_initials: user.name_with_initials,
            nic: user.nic,
            username: user.username,
            email: user.email,
            role: user.role,
            is_active: user.is_active,
            profile: profile.map(ProfileRead::from),
        }
    }
}

impl From<User> for UserRead {
    fn from(user: User) -> Self {
        UserRead::from_parts(user, None)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserReadSimple {
    pub id: String,
    pub name: Option<String>,
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub name_with_initials: Option<String>,
    pub nic: Option<String>,
    pub username: Option<String>,
    pub email: String,
}

impl From<User> for UserReadSimple {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            full_name: user.full_name,
            first_name: user.first_name,
            last_name: user.last_name,
            name_with_initials: user.name_with_initials,
            nic: user.nic,
            username: user.username,
            email: user.email,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEmailInput {
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangePasswordInput {
    #[serde(rename = "oldPassword")]
    pub old_password: String,
    #[serde(rename = "newPassword")]
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChangePasswordResponse {
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_allow_set() {
        assert!(UserRole::SuperAdmin.is_admin());
        assert!(UserRole::Admin.is_admin());
        assert!(!UserRole::Customer.is_admin());
    }

    #[test]
    fn test_role_wire_format() {
        assert_eq!(
            serde_json::to_string(&UserRole::SuperAdmin).unwrap(),
            "\"super_admin\""
        );
        let role: UserRole = serde_json::from_str("\"customer\"").unwrap();
        assert_eq!(role, UserRole::Customer);
    }

    #[test]
    fn test_update_patch_only_carries_present_fields() {
        let update = UserUpdate {
            email: Some("new@example.com".to_string()),
            ..Default::default()
        };
        assert_eq!(update.to_patch().len(), 1);
    }

    #[test]
    fn test_register_defaults_to_customer() {
        let input: UserRegister = serde_json::from_str(
            r#"{"email": "a@b.c", "password": "Password1"}"#,
        )
        .unwrap();
        assert_eq!(input.role, UserRole::Customer);
    }

    #[test]
    fn test_user_serialization_hides_password() {
        let user = User {
            id: "u-1".to_string(),
            name: None,
            full_name: None,
            first_name: None,
            last_name: None,
            name_with_initials: None,
            username: None,
            email: "a@b.c".to_string(),
            phone: None,
            nic: None,
            password: "hash".to_string(),
            is_active: true,
            last_login: None,
            role: UserRole::Customer,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
    }
}
