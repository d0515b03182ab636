use crate::models::game_participant::GameParticipant;
use crate::repositories::errors::participant_repository_errors::ParticipantRepositoryError;
use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use serde_dynamo::{from_item, from_items, to_attribute_value, to_item};

pub struct DynamoDbParticipantRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbParticipantRepository {
    pub fn new(client: Client) -> Self {
        let table_name = std::env::var("GAME_PARTICIPANTS_TABLE")
            .expect("GAME_PARTICIPANTS_TABLE environment variable must be set");
        Self { client, table_name }
    }
}

#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// Writes a stake record, rejecting a second record for the same
    /// (game, user) pair at the table itself.
    async fn add_participant(
        &self,
        participant: &GameParticipant,
    ) -> Result<(), ParticipantRepositoryError>;
    async fn remove_participant(
        &self,
        game_id: &str,
        user_id: &str,
    ) -> Result<(), ParticipantRepositoryError>;
    async fn find_participant(
        &self,
        game_id: &str,
        user_id: &str,
    ) -> Result<Option<GameParticipant>, ParticipantRepositoryError>;
    async fn list_by_game(
        &self,
        game_id: &str,
    ) -> Result<Vec<GameParticipant>, ParticipantRepositoryError>;
    async fn list_by_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<GameParticipant>, ParticipantRepositoryError>;
}

#[async_trait]
impl ParticipantRepository for DynamoDbParticipantRepository {
    async fn add_participant(
        &self,
        participant: &GameParticipant,
    ) -> Result<(), ParticipantRepositoryError> {
        let item = to_item(participant)
            .map_err(|e| ParticipantRepositoryError::Serialization(e.to_string()))?;
        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(game_id) AND attribute_not_exists(user_id)")
            .send()
            .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("ConditionalCheckFailedException") {
                    Err(ParticipantRepositoryError::AlreadyExists)
                } else {
                    Err(ParticipantRepositoryError::DynamoDb(error_str))
                }
            }
        }
    }

    async fn remove_participant(
        &self,
        game_id: &str,
        user_id: &str,
    ) -> Result<(), ParticipantRepositoryError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(
                "game_id",
                to_attribute_value(game_id)
                    .map_err(|e| ParticipantRepositoryError::Serialization(e.to_string()))?,
            )
            .key(
                "user_id",
                to_attribute_value(user_id)
                    .map_err(|e| ParticipantRepositoryError::Serialization(e.to_string()))?,
            )
            .send()
            .await
            .map_err(|e| ParticipantRepositoryError::DynamoDb(e.to_string()))?;
        Ok(())
    }

    async fn find_participant(
        &self,
        game_id: &str,
        user_id: &str,
    ) -> Result<Option<GameParticipant>, ParticipantRepositoryError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(
                "game_id",
                to_attribute_value(game_id)
                    .map_err(|e| ParticipantRepositoryError::Serialization(e.to_string()))?,
            )
            .key(
                "user_id",
                to_attribute_value(user_id)
                    .map_err(|e| ParticipantRepositoryError::Serialization(e.to_string()))?,
            )
            .send()
            .await
            .map_err(|e| ParticipantRepositoryError::DynamoDb(e.to_string()))?;
        if let Some(item) = output.item {
            let participant = from_item(item)
                .map_err(|e| ParticipantRepositoryError::Serialization(e.to_string()))?;
            Ok(Some(participant))
        } else {
            Ok(None)
        }
    }

    async fn list_by_game(
        &self,
        game_id: &str,
    ) -> Result<Vec<GameParticipant>, ParticipantRepositoryError> {
        let output = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("game_id = :game_id")
            .expression_attribute_values(
                ":game_id",
                to_attribute_value(game_id)
                    .map_err(|e| ParticipantRepositoryError::Serialization(e.to_string()))?,
            )
            .send()
            .await
            .map_err(|e| ParticipantRepositoryError::DynamoDb(e.to_string()))?;
        let items = output.items.unwrap_or_default();
        let participants: Vec<GameParticipant> = from_items(items)
            .map_err(|e| ParticipantRepositoryError::Serialization(e.to_string()))?;
        Ok(participants)
    }

    async fn list_by_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<GameParticipant>, ParticipantRepositoryError> {
        let output = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name("GSI_ParticipantByUser")
            .key_condition_expression("user_id = :user_id")
            .expression_attribute_values(
                ":user_id",
                to_attribute_value(user_id)
                    .map_err(|e| ParticipantRepositoryError::Serialization(e.to_string()))?,
            )
            .send()
            .await
            .map_err(|e| ParticipantRepositoryError::DynamoDb(e.to_string()))?;
        let items = output.items.unwrap_or_default();
        let participants: Vec<GameParticipant> = from_items(items)
            .map_err(|e| ParticipantRepositoryError::Serialization(e.to_string()))?;
        Ok(participants)
    }
}
