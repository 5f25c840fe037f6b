//! User directory service.

use smilodon_core::{DomainError, DomainResult};
use smilodon_store::{EntityStore, Subscription};

use crate::user::{User, UserDraft, UserId, UserPatch, UserStatus};

/// User directory.
///
/// Owns the authoritative user store; presentation code consumes the
/// subscription and goes through the mutation methods here.
#[derive(Debug, Default)]
pub struct UserDirectory {
    users: EntityStore<User>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory seeded with existing records (fixtures, tests).
    pub fn with_records(users: Vec<User>) -> Self {
        Self {
            users: EntityStore::with_records(users),
        }
    }

    /// Live user sequence (replay-latest on subscribe).
    pub fn users(&self) -> Subscription<Vec<User>> {
        self.users.subscribe()
    }

    pub fn users_snapshot(&self) -> Vec<User> {
        self.users.snapshot()
    }

    /// One-shot lookup.
    pub fn user_by_id(&self, id: UserId) -> Option<User> {
        self.users.find_by_id(id)
    }

    /// Add a user. Name, email, and department must be non-blank.
    pub fn add_user(&self, draft: UserDraft) -> DomainResult<User> {
        if draft.name.trim().is_empty()
            || draft.email.trim().is_empty()
            || draft.department.trim().is_empty()
        {
            return Err(DomainError::validation(
                "user requires name, email, and department",
            ));
        }
        Ok(self.users.insert(draft))
    }

    pub fn update_user(&self, id: UserId, patch: UserPatch) {
        self.users.update(id, patch);
    }

    /// Toggle active/inactive.
    pub fn set_status(&self, id: UserId, status: UserStatus) {
        self.users.update(
            id,
            UserPatch {
                status: Some(status),
                ..UserPatch::default()
            },
        );
    }

    pub fn remove_user(&self, id: UserId) {
        self.users.remove(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::UserRole;

    fn draft(name: &str) -> UserDraft {
        UserDraft {
            name: name.to_string(),
            email: format!("{}@smilodon.com", name.to_lowercase()),
            role: UserRole::User,
            department: "Vendas".to_string(),
            phone: "+244 925 000 000".to_string(),
            status: UserStatus::Active,
        }
    }

    #[test]
    fn add_user_round_trips_fields() {
        let directory = UserDirectory::new();
        let user = directory.add_user(draft("Pedro")).unwrap();

        assert_eq!(user.name, "Pedro");
        assert_eq!(user.role, UserRole::User);
        assert_eq!(user.status, UserStatus::Active);
        assert_eq!(directory.users_snapshot(), vec![user]);
    }

    #[test]
    fn blank_required_fields_are_rejected() {
        let directory = UserDirectory::new();

        for broken in [
            UserDraft {
                name: "  ".to_string(),
                ..draft("Pedro")
            },
            UserDraft {
                email: String::new(),
                ..draft("Pedro")
            },
            UserDraft {
                department: " ".to_string(),
                ..draft("Pedro")
            },
        ] {
            let err = directory.add_user(broken).unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }

        assert!(directory.users_snapshot().is_empty());
    }

    #[test]
    fn set_status_toggles_without_touching_other_fields() {
        let directory = UserDirectory::new();
        let user = directory.add_user(draft("Pedro")).unwrap();

        directory.set_status(user.id, UserStatus::Inactive);

        let updated = directory.user_by_id(user.id).unwrap();
        assert_eq!(updated.status, UserStatus::Inactive);
        assert_eq!(updated.name, "Pedro");
        assert_eq!(updated.last_login, user.last_login);
    }

    #[test]
    fn remove_user_filters_the_directory() {
        let directory = UserDirectory::new();
        let pedro = directory.add_user(draft("Pedro")).unwrap();
        directory.add_user(draft("Maria")).unwrap();

        directory.remove_user(pedro.id);

        let remaining = directory.users_snapshot();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "Maria");
    }
}
