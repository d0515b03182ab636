use crate::models::user::User;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use serde_dynamo::{from_item, to_attribute_value, to_item};

#[cfg(test)]
use mockall::automock;

pub struct DynamoDbUserRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbUserRepository {
    pub fn new(client: Client) -> Self {
        let table_name =
            std::env::var("USERS_TABLE").expect("USERS_TABLE environment variable must be set");
        Self { client, table_name }
    }
}

#[async_trait]
#[cfg_attr(test, automock)]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: &User) -> Result<(), UserRepositoryError>;
    async fn get_user_by_id(&self, user_id: &str) -> Result<User, UserRepositoryError>;
    async fn get_user_by_wallet(&self, wallet_address: &str)
        -> Result<User, UserRepositoryError>;
}

#[async_trait]
impl UserRepository for DynamoDbUserRepository {
    async fn create_user(&self, user: &User) -> Result<(), UserRepositoryError> {
        let item = to_item(user).map_err(|e| UserRepositoryError::Serialization(e.to_string()))?;
        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(id)")
            .send()
            .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("ConditionalCheckFailedException") {
                    Err(UserRepositoryError::AlreadyExists)
                } else {
                    Err(UserRepositoryError::DynamoDb(error_str))
                }
            }
        }
    }

    async fn get_user_by_id(&self, user_id: &str) -> Result<User, UserRepositoryError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(
                "id",
                to_attribute_value(user_id)
                    .map_err(|e| UserRepositoryError::Serialization(e.to_string()))?,
            )
            .send()
            .await
            .map_err(|e| UserRepositoryError::DynamoDb(e.to_string()))?;
        if let Some(item) = output.item {
            let user: User =
                from_item(item).map_err(|e| UserRepositoryError::Serialization(e.to_string()))?;
            Ok(user)
        } else {
            Err(UserRepositoryError::NotFound)
        }
    }

    async fn get_user_by_wallet(
        &self,
        wallet_address: &str,
    ) -> Result<User, UserRepositoryError> {
        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name("GSI_UserByWallet")
            .key_condition_expression("wallet_address = :wallet_address")
            .expression_attribute_values(
                ":wallet_address",
                to_attribute_value(wallet_address)
                    .map_err(|e| UserRepositoryError::Serialization(e.to_string()))?,
            )
            .limit(1)
            .send()
            .await;
        match result {
            Ok(output) => {
                if let Some(item) = output.items.unwrap_or_default().into_iter().next() {
                    let user = from_item(item)
                        .map_err(|e| UserRepositoryError::Serialization(e.to_string()))?;
                    Ok(user)
                } else {
                    Err(UserRepositoryError::NotFound)
                }
            }
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("ResourceNotFoundException")
                    || error_str.contains("ValidationException")
                {
                    return Err(UserRepositoryError::DynamoDb("User wallet index not available. Please ensure the GSI 'GSI_UserByWallet' exists and is active.".to_string()));
                }
                Err(UserRepositoryError::DynamoDb(error_str))
            }
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::models::user::User;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory user store keyed by id with the same wallet-uniqueness
    /// behavior as the table plus its GSI.
    pub struct InMemoryUserRepository {
        pub users: Mutex<HashMap<String, User>>,
    }

    impl InMemoryUserRepository {
        pub fn new() -> Self {
            Self {
                users: Mutex::new(HashMap::new()),
            }
        }

        pub fn user_count(&self) -> usize {
            self.users.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl UserRepository for InMemoryUserRepository {
        async fn create_user(&self, user: &User) -> Result<(), UserRepositoryError> {
            let mut users = self.users.lock().unwrap();
            if users.contains_key(&user.id) {
                return Err(UserRepositoryError::AlreadyExists);
            }
            users.insert(user.id.clone(), user.clone());
            Ok(())
        }

        async fn get_user_by_id(&self, user_id: &str) -> Result<User, UserRepositoryError> {
            self.users
                .lock()
                .unwrap()
                .get(user_id)
                .cloned()
                .ok_or(UserRepositoryError::NotFound)
        }

        async fn get_user_by_wallet(
            &self,
            wallet_address: &str,
        ) -> Result<User, UserRepositoryError> {
            self.users
                .lock()
                .unwrap()
                .values()
                .find(|user| user.wallet_address == wallet_address)
                .cloned()
                .ok_or(UserRepositoryError::NotFound)
        }
    }

    #[test]
    fn test_error_display_messages() {
        assert_eq!(UserRepositoryError::NotFound.to_string(), "User not found");
        assert_eq!(
            UserRepositoryError::AlreadyExists.to_string(),
            "User already exists"
        );
    }
}
