use std::sync::Arc;

use pl_core::ports::{FavoriteError, FavoriteUsersPort};
use pl_core::principal::PrincipalRecord;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteToggle {
    Added,
    Removed,
}

/// Use case flipping the favorite state of a resolved user.
///
/// The favorite set is owned elsewhere; this only decides which of the two
/// external operations to call.
pub struct ToggleFavoriteUser {
    favorites: Arc<dyn FavoriteUsersPort>,
}

impl ToggleFavoriteUser {
    pub fn from_ports(favorites: Arc<dyn FavoriteUsersPort>) -> Self {
        Self { favorites }
    }

    /// Favorite state of `record`, or `None` when it cannot carry one (groups,
    /// users without a user id).
    pub fn state(&self, record: &PrincipalRecord) -> Option<bool> {
        if record.is_group {
            return None;
        }
        record
            .user_id
            .as_ref()
            .map(|user_id| self.favorites.contains(user_id))
    }

    /// Returns `Ok(None)` without calling anything for records that have no
    /// favorite control.
    #[tracing::instrument(
        name = "usecase.toggle_favorite_user.execute",
        skip_all,
        fields(identifier = %record.identifier)
    )]
    pub async fn execute(&self, record: &PrincipalRecord) -> Result<Option<FavoriteToggle>, FavoriteError> {
        let Some(user_id) = record.user_id.as_ref().filter(|_| !record.is_group) else {
            return Ok(None);
        };

        if self.favorites.contains(user_id) {
            self.favorites.remove(user_id).await?;
            info!(user_id = %user_id, "Removed favorite user");
            Ok(Some(FavoriteToggle::Removed))
        } else {
            self.favorites.add(user_id).await?;
            info!(user_id = %user_id, "Added favorite user");
            Ok(Some(FavoriteToggle::Added))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockFavorites;
    use mockall::predicate::eq;
    use pl_core::ids::UserId;

    #[tokio::test]
    async fn test_adds_when_not_favorite() {
        let mut favorites = MockFavorites::new();
        favorites.expect_contains().return_const(false);
        favorites
            .expect_add()
            .with(eq(UserId::from("1")))
            .times(1)
            .returning(|_| Ok(()));
        favorites.expect_remove().never();

        let uc = ToggleFavoriteUser::from_ports(Arc::new(favorites));
        let toggled = uc
            .execute(&PrincipalRecord::user("User:1", "Alice", 1u64))
            .await
            .unwrap();

        assert_eq!(toggled, Some(FavoriteToggle::Added));
    }

    #[tokio::test]
    async fn test_removes_when_favorite() {
        let mut favorites = MockFavorites::new();
        favorites.expect_contains().return_const(true);
        favorites.expect_add().never();
        favorites
            .expect_remove()
            .with(eq(UserId::from("1")))
            .times(1)
            .returning(|_| Ok(()));

        let uc = ToggleFavoriteUser::from_ports(Arc::new(favorites));
        let toggled = uc
            .execute(&PrincipalRecord::user("User:1", "Alice", 1u64))
            .await
            .unwrap();

        assert_eq!(toggled, Some(FavoriteToggle::Removed));
    }

    #[tokio::test]
    async fn test_groups_never_touch_favorites() {
        let mut favorites = MockFavorites::new();
        favorites.expect_contains().never();
        favorites.expect_add().never();
        favorites.expect_remove().never();

        let uc = ToggleFavoriteUser::from_ports(Arc::new(favorites));
        let group = PrincipalRecord::group("Group:5", "Staff");

        assert_eq!(uc.execute(&group).await.unwrap(), None);
        assert_eq!(uc.state(&group), None);
    }

    #[tokio::test]
    async fn test_propagates_favorite_errors() {
        let mut favorites = MockFavorites::new();
        favorites.expect_contains().return_const(false);
        favorites
            .expect_add()
            .returning(|_| Err(FavoriteError::Storage("offline".to_string())));

        let uc = ToggleFavoriteUser::from_ports(Arc::new(favorites));
        let err = uc
            .execute(&PrincipalRecord::user("User:1", "Alice", 1u64))
            .await
            .unwrap_err();

        assert_eq!(err, FavoriteError::Storage("offline".to_string()));
    }
}
