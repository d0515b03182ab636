use std::sync::Arc;

use tracing::{info, warn};

use crate::models::change_event::ChangeEvent;
use crate::repositories::connection_repository::ConnectionRepository;
use crate::repositories::errors::connection_repository_errors::ConnectionRepositoryError;

/// Fans typed change events out to every subscribed WebSocket connection.
#[derive(Clone)]
pub struct NotificationService {
    repository: Arc<dyn ConnectionRepository>,
}

impl NotificationService {
    pub fn new(repository: Arc<dyn ConnectionRepository>) -> Self {
        Self { repository }
    }

    pub async fn store_connection(
        &self,
        connection_id: &str,
        wallet_address: Option<&str>,
    ) -> Result<(), ConnectionRepositoryError> {
        info!("Storing subscriber connection {}", connection_id);
        self.repository
            .store_connection(connection_id, wallet_address)
            .await
    }

    pub async fn remove_connection(
        &self,
        connection_id: &str,
    ) -> Result<(), ConnectionRepositoryError> {
        info!("Removing subscriber connection {}", connection_id);
        self.repository.remove_connection(connection_id).await
    }

    /// Sends the event to every registered connection. Connections that
    /// turn out to be gone are dropped from the table; other delivery
    /// failures are logged and skipped so one bad subscriber cannot stall
    /// the feed. Returns the number of successful deliveries.
    pub async fn broadcast(
        &self,
        event: &ChangeEvent,
    ) -> Result<usize, ConnectionRepositoryError> {
        let message = serde_json::to_string(event)
            .map_err(|e| ConnectionRepositoryError::Serialization(e.to_string()))?;
        let connection_ids = self.repository.list_connection_ids().await?;

        let mut delivered = 0;
        for connection_id in connection_ids {
            match self.repository.send_message(&connection_id, &message).await {
                Ok(()) => delivered += 1,
                Err(ConnectionRepositoryError::ConnectionGone) => {
                    info!("Pruning stale connection {}", connection_id);
                    if let Err(e) = self.repository.remove_connection(&connection_id).await {
                        warn!("Failed to prune connection {}: {}", connection_id, e);
                    }
                }
                Err(e) => {
                    warn!("Failed to notify connection {}: {}", connection_id, e);
                }
            }
        }
        Ok(delivered)
    }
}
