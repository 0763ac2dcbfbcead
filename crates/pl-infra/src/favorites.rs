use std::collections::HashSet;
use std::sync::RwLock;

use async_trait::async_trait;
use pl_core::ids::UserId;
use pl_core::ports::{FavoriteError, FavoriteUsersPort};

/// Favorite set held in memory.
#[derive(Default)]
pub struct InMemoryFavoriteUsers {
    users: RwLock<HashSet<UserId>>,
}

impl InMemoryFavoriteUsers {
    pub fn new<I>(users: I) -> Self
    where
        I: IntoIterator<Item = UserId>,
    {
        Self {
            users: RwLock::new(users.into_iter().collect()),
        }
    }

    pub fn snapshot(&self) -> HashSet<UserId> {
        self.users
            .read()
            .map(|users| users.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl FavoriteUsersPort for InMemoryFavoriteUsers {
    fn contains(&self, user_id: &UserId) -> bool {
        self.users
            .read()
            .map(|users| users.contains(user_id))
            .unwrap_or(false)
    }

    async fn add(&self, user_id: &UserId) -> Result<(), FavoriteError> {
        self.users
            .write()
            .map_err(|e| FavoriteError::Storage(format!("favorite set lock poisoned: {}", e)))?
            .insert(user_id.clone());
        Ok(())
    }

    async fn remove(&self, user_id: &UserId) -> Result<(), FavoriteError> {
        self.users
            .write()
            .map_err(|e| FavoriteError::Storage(format!("favorite set lock poisoned: {}", e)))?
            .remove(user_id);
        Ok(())
    }
}
