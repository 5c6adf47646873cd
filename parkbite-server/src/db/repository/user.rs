//! User Repository

use shared::models::User;

use super::RepoResult;
use crate::db::MemoryStore;

#[derive(Debug, Clone)]
pub struct UserRepository {
    store: MemoryStore,
}

impl UserRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        Ok(self.store.tables().users.get(id).map(|u| u.clone()))
    }

    /// Find user by email (case-insensitive)
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let email = email.trim();
        Ok(self
            .store
            .tables()
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .map(|u| u.value().clone()))
    }

    pub async fn insert(&self, user: User) -> RepoResult<User> {
        self.store.tables().users.insert(user.id.clone(), user.clone());
        Ok(user)
    }
}
