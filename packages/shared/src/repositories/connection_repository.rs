use async_trait::async_trait;
use aws_sdk_apigatewaymanagement::{primitives::Blob, Client as ApiGatewayClient};
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use std::env;

use crate::repositories::errors::connection_repository_errors::ConnectionRepositoryError;

#[async_trait]
pub trait ConnectionRepository: Send + Sync {
    async fn store_connection(
        &self,
        connection_id: &str,
        wallet_address: Option<&str>,
    ) -> Result<(), ConnectionRepositoryError>;

    async fn remove_connection(&self, connection_id: &str)
        -> Result<(), ConnectionRepositoryError>;

    async fn list_connection_ids(&self) -> Result<Vec<String>, ConnectionRepositoryError>;

    async fn send_message(
        &self,
        connection_id: &str,
        message: &str,
    ) -> Result<(), ConnectionRepositoryError>;
}

pub struct DynamoDbConnectionRepository {
    dynamodb_client: DynamoDbClient,
    api_gateway_client: ApiGatewayClient,
    table_name: String,
}

impl DynamoDbConnectionRepository {
    pub fn new(dynamodb_client: DynamoDbClient, api_gateway_client: ApiGatewayClient) -> Self {
        let table_name = env::var("SUBSCRIBER_CONNECTIONS_TABLE")
            .expect("SUBSCRIBER_CONNECTIONS_TABLE environment variable must be set");
        Self {
            dynamodb_client,
            api_gateway_client,
            table_name,
        }
    }
}

#[async_trait]
impl ConnectionRepository for DynamoDbConnectionRepository {
    async fn store_connection(
        &self,
        connection_id: &str,
        wallet_address: Option<&str>,
    ) -> Result<(), ConnectionRepositoryError> {
        let mut request = self
            .dynamodb_client
            .put_item()
            .table_name(&self.table_name)
            .item(
                "connection_id",
                AttributeValue::S(connection_id.to_string()),
            );
        if let Some(wallet_address) = wallet_address {
            request = request.item(
                "wallet_address",
                AttributeValue::S(wallet_address.to_lowercase()),
            );
        }
        request
            .send()
            .await
            .map_err(|e| ConnectionRepositoryError::DynamoDb(e.to_string()))?;
        Ok(())
    }

    async fn remove_connection(
        &self,
        connection_id: &str,
    ) -> Result<(), ConnectionRepositoryError> {
        self.dynamodb_client
            .delete_item()
            .table_name(&self.table_name)
            .key(
                "connection_id",
                AttributeValue::S(connection_id.to_string()),
            )
            .send()
            .await
            .map_err(|e| ConnectionRepositoryError::DynamoDb(e.to_string()))?;
        Ok(())
    }

    async fn list_connection_ids(&self) -> Result<Vec<String>, ConnectionRepositoryError> {
        let output = self
            .dynamodb_client
            .scan()
            .table_name(&self.table_name)
            .projection_expression("connection_id")
            .send()
            .await
            .map_err(|e| ConnectionRepositoryError::DynamoDb(e.to_string()))?;
        let connection_ids = output
            .items
            .unwrap_or_default()
            .into_iter()
            .filter_map(|item| match item.get("connection_id") {
                Some(AttributeValue::S(id)) => Some(id.clone()),
                _ => None,
            })
            .collect();
        Ok(connection_ids)
    }

    async fn send_message(
        &self,
        connection_id: &str,
        message: &str,
    ) -> Result<(), ConnectionRepositoryError> {
        let result = self
            .api_gateway_client
            .post_to_connection()
            .connection_id(connection_id)
            .data(Blob::new(message.as_bytes()))
            .send()
            .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("GoneException") {
                    Err(ConnectionRepositoryError::ConnectionGone)
                } else {
                    Err(ConnectionRepositoryError::ApiGateway(error_str))
                }
            }
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::Mutex;

    /// In-memory connection store; "gone" connections reject sends the way
    /// API Gateway does for stale connection ids.
    pub struct InMemoryConnectionRepository {
        pub connections: Mutex<Vec<String>>,
        pub gone: Mutex<Vec<String>>,
        pub sent: Mutex<Vec<(String, String)>>,
    }

    impl InMemoryConnectionRepository {
        pub fn new() -> Self {
            Self {
                connections: Mutex::new(Vec::new()),
                gone: Mutex::new(Vec::new()),
                sent: Mutex::new(Vec::new()),
            }
        }

        pub fn with_connections(connection_ids: Vec<&str>) -> Self {
            let repository = Self::new();
            *repository.connections.lock().unwrap() =
                connection_ids.into_iter().map(String::from).collect();
            repository
        }

        pub fn mark_gone(&self, connection_id: &str) {
            self.gone.lock().unwrap().push(connection_id.to_string());
        }
    }

    #[async_trait]
    impl ConnectionRepository for InMemoryConnectionRepository {
        async fn store_connection(
            &self,
            connection_id: &str,
            _wallet_address: Option<&str>,
        ) -> Result<(), ConnectionRepositoryError> {
            self.connections
                .lock()
                .unwrap()
                .push(connection_id.to_string());
            Ok(())
        }

        async fn remove_connection(
            &self,
            connection_id: &str,
        ) -> Result<(), ConnectionRepositoryError> {
            self.connections
                .lock()
                .unwrap()
                .retain(|id| id != connection_id);
            Ok(())
        }

        async fn list_connection_ids(&self) -> Result<Vec<String>, ConnectionRepositoryError> {
            Ok(self.connections.lock().unwrap().clone())
        }

        async fn send_message(
            &self,
            connection_id: &str,
            message: &str,
        ) -> Result<(), ConnectionRepositoryError> {
            if self
                .gone
                .lock()
                .unwrap()
                .iter()
                .any(|id| id == connection_id)
            {
                return Err(ConnectionRepositoryError::ConnectionGone);
            }
            self.sent
                .lock()
                .unwrap()
                .push((connection_id.to_string(), message.to_string()));
            Ok(())
        }
    }
}
