use async_trait::async_trait;

use super::errors::FavoriteError;
use crate::ids::UserId;

/// Externally owned set of favorite users.
///
/// The field only reads membership at render time and forwards toggles; it
/// never keeps its own copy.
#[async_trait]
pub trait FavoriteUsersPort: Send + Sync {
    fn contains(&self, user_id: &UserId) -> bool;

    async fn add(&self, user_id: &UserId) -> Result<(), FavoriteError>;

    async fn remove(&self, user_id: &UserId) -> Result<(), FavoriteError>;
}
