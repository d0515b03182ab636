use std::sync::Arc;

use tracing::info;

use crate::models::user::User;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use crate::repositories::user_repository::UserRepository;
use crate::services::errors::user_service_errors::UserServiceError;

pub struct UserService {
    repository: Arc<dyn UserRepository + Send + Sync>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository + Send + Sync>) -> Self {
        UserService { repository }
    }

    /// Returns the user record for a wallet address, creating it on first
    /// contact. The address is lowercased before lookup so the same wallet
    /// always maps to one record. Repeated calls are read-only.
    pub async fn resolve_user(&self, wallet_address: &str) -> Result<User, UserServiceError> {
        if wallet_address.trim().is_empty() {
            return Err(UserServiceError::ValidationError(
                "Wallet address cannot be empty".to_string(),
            ));
        }
        let wallet_address = wallet_address.to_lowercase();

        match self.repository.get_user_by_wallet(&wallet_address).await {
            Ok(user) => Ok(user),
            Err(UserRepositoryError::NotFound) => {
                let user = User::new(&wallet_address);
                info!("Creating user {} for wallet {}", user.id, wallet_address);
                self.repository.create_user(&user).await.map_err(|e| match e {
                    UserRepositoryError::AlreadyExists => UserServiceError::Conflict,
                    _ => UserServiceError::RepositoryError(e.to_string()),
                })?;
                Ok(user)
            }
            Err(e) => Err(UserServiceError::RepositoryError(e.to_string())),
        }
    }

    /// Lookup without the create-on-miss side effect, for read paths that
    /// should not mint a record for a wallet that never played.
    pub async fn find_by_wallet(
        &self,
        wallet_address: &str,
    ) -> Result<Option<User>, UserServiceError> {
        if wallet_address.trim().is_empty() {
            return Err(UserServiceError::ValidationError(
                "Wallet address cannot be empty".to_string(),
            ));
        }
        let wallet_address = wallet_address.to_lowercase();
        match self.repository.get_user_by_wallet(&wallet_address).await {
            Ok(user) => Ok(Some(user)),
            Err(UserRepositoryError::NotFound) => Ok(None),
            Err(e) => Err(UserServiceError::RepositoryError(e.to_string())),
        }
    }

    pub async fn get_user_by_id(&self, user_id: &str) -> Result<User, UserServiceError> {
        if user_id.is_empty() {
            return Err(UserServiceError::ValidationError(
                "User ID cannot be empty".to_string(),
            ));
        }
        self.repository
            .get_user_by_id(user_id)
            .await
            .map_err(|e| match e {
                UserRepositoryError::NotFound => UserServiceError::UserNotFound,
                _ => UserServiceError::RepositoryError(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::user_repository::MockUserRepository;

    #[tokio::test]
    async fn test_resolve_user_returns_existing_record() {
        let existing = User::new("0xabcdef0123456789abcdef0123456789abcdef01");
        let existing_clone = existing.clone();

        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_get_user_by_wallet()
            .returning(move |_| {
                let user = existing_clone.clone();
                Box::pin(async move { Ok(user) })
            });
        mock_repo.expect_create_user().never();

        let service = UserService::new(Arc::new(mock_repo));
        let user = service
            .resolve_user("0xABCDEF0123456789abcdef0123456789abcdef01")
            .await
            .unwrap();

        assert_eq!(user.id, existing.id);
    }

    #[tokio::test]
    async fn test_resolve_user_creates_on_first_contact() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_get_user_by_wallet()
            .returning(|_| Box::pin(async { Err(UserRepositoryError::NotFound) }));
        mock_repo
            .expect_create_user()
            .times(1)
            .returning(|_| Box::pin(async { Ok(()) }));

        let service = UserService::new(Arc::new(mock_repo));
        let user = service
            .resolve_user("0xAbCd000000000000000000000000000000001234")
            .await
            .unwrap();

        assert_eq!(
            user.wallet_address,
            "0xabcd000000000000000000000000000000001234"
        );
        assert_eq!(user.username, "Player1234");
    }

    #[tokio::test]
    async fn test_resolve_user_rejects_empty_address() {
        let mock_repo = MockUserRepository::new();
        let service = UserService::new(Arc::new(mock_repo));

        let result = service.resolve_user("   ").await;
        assert!(matches!(result, Err(UserServiceError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_resolve_user_maps_creation_race_to_conflict() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_get_user_by_wallet()
            .returning(|_| Box::pin(async { Err(UserRepositoryError::NotFound) }));
        mock_repo
            .expect_create_user()
            .returning(|_| Box::pin(async { Err(UserRepositoryError::AlreadyExists) }));

        let service = UserService::new(Arc::new(mock_repo));
        let result = service.resolve_user("0xaaa").await;
        assert!(matches!(result, Err(UserServiceError::Conflict)));
    }

    #[tokio::test]
    async fn test_find_by_wallet_does_not_create() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_get_user_by_wallet()
            .returning(|_| Box::pin(async { Err(UserRepositoryError::NotFound) }));
        mock_repo.expect_create_user().never();

        let service = UserService::new(Arc::new(mock_repo));
        let result = service.find_by_wallet("0xbbb").await.unwrap();
        assert!(result.is_none());
    }
}
