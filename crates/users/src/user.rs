use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use smilodon_core::{Entity, EntityId};
use smilodon_store::{Patch, Record};

/// User identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub EntityId);

impl UserId {
    pub fn new() -> Self {
        Self(EntityId::new())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for UserId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// User role. Informational only; there is no authorization layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Manager,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
}

/// Internal user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub department: String,
    pub phone: String,
    pub status: UserStatus,
    pub last_login: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> UserId {
        self.id
    }
}

/// Fields supplied by the caller when adding a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub department: String,
    pub phone: String,
    pub status: UserStatus,
}

impl Default for UserDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            role: UserRole::User,
            department: String::new(),
            phone: String::new(),
            status: UserStatus::Active,
        }
    }
}

impl Record for User {
    type Draft = UserDraft;

    fn fresh_id() -> UserId {
        UserId::new()
    }

    fn hydrate(id: UserId, created_at: DateTime<Utc>, draft: UserDraft) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            role: draft.role,
            department: draft.department,
            phone: draft.phone,
            status: draft.status,
            last_login: created_at,
            created_at,
        }
    }
}

/// Shallow merge into a user. Set fields replace, unset fields keep.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub status: Option<UserStatus>,
    pub last_login: Option<DateTime<Utc>>,
}

impl Patch<User> for UserPatch {
    fn apply_to(self, record: &mut User) {
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(email) = self.email {
            record.email = email;
        }
        if let Some(role) = self.role {
            record.role = role;
        }
        if let Some(department) = self.department {
            record.department = department;
        }
        if let Some(phone) = self.phone {
            record.phone = phone;
        }
        if let Some(status) = self.status {
            record.status = status;
        }
        if let Some(last_login) = self.last_login {
            record.last_login = last_login;
        }
    }
}
