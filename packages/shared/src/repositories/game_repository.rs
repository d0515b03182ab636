use crate::models::game::Game;
use crate::repositories::errors::game_repository_errors::GameRepositoryError;
use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;
use serde_dynamo::{from_item, from_items, to_attribute_value, to_item};

pub struct DynamoDbGameRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbGameRepository {
    pub fn new(client: Client) -> Self {
        let table_name =
            std::env::var("GAMES_TABLE").expect("GAMES_TABLE environment variable must be set");
        Self { client, table_name }
    }
}

#[async_trait]
pub trait GameRepository: Send + Sync {
    async fn create_game(&self, game: &Game) -> Result<(), GameRepositoryError>;
    async fn delete_game(&self, game_id: &str) -> Result<(), GameRepositoryError>;
    async fn get_game(&self, game_id: &str) -> Result<Game, GameRepositoryError>;
    async fn get_game_by_invite_code(&self, invite_code: &str)
        -> Result<Game, GameRepositoryError>;
    async fn list_games(&self) -> Result<Vec<Game>, GameRepositoryError>;

    /// Atomically counts one more participant into a pending, non-full game
    /// and grows the pot by their deposit. The capacity and status checks
    /// live in the condition expression, so of two racing joiners exactly
    /// one wins; the loser sees `ConditionFailed`.
    async fn register_join(
        &self,
        game_id: &str,
        deposit_amount: f64,
    ) -> Result<Game, GameRepositoryError>;

    /// Flips a pending game to active once it is exactly at capacity.
    async fn activate_game(&self, game_id: &str) -> Result<Game, GameRepositoryError>;
}

#[async_trait]
impl GameRepository for DynamoDbGameRepository {
    async fn create_game(&self, game: &Game) -> Result<(), GameRepositoryError> {
        let item = to_item(game).map_err(|e| GameRepositoryError::Serialization(e.to_string()))?;
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| GameRepositoryError::DynamoDb(e.to_string()))?;
        Ok(())
    }

    async fn delete_game(&self, game_id: &str) -> Result<(), GameRepositoryError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(
                "id",
                to_attribute_value(game_id)
                    .map_err(|e| GameRepositoryError::Serialization(e.to_string()))?,
            )
            .send()
            .await
            .map_err(|e| GameRepositoryError::DynamoDb(e.to_string()))?;
        Ok(())
    }

    async fn get_game(&self, game_id: &str) -> Result<Game, GameRepositoryError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(
                "id",
                to_attribute_value(game_id)
                    .map_err(|e| GameRepositoryError::Serialization(e.to_string()))?,
            )
            .send()
            .await
            .map_err(|e| GameRepositoryError::DynamoDb(e.to_string()))?;
        if let Some(item) = output.item {
            let game: Game =
                from_item(item).map_err(|e| GameRepositoryError::Serialization(e.to_string()))?;
            Ok(game)
        } else {
            Err(GameRepositoryError::NotFound)
        }
    }

    async fn get_game_by_invite_code(
        &self,
        invite_code: &str,
    ) -> Result<Game, GameRepositoryError> {
        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name("GSI_GameByInviteCode")
            .key_condition_expression("invite_code = :invite_code")
            .expression_attribute_values(
                ":invite_code",
                to_attribute_value(invite_code)
                    .map_err(|e| GameRepositoryError::Serialization(e.to_string()))?,
            )
            .limit(1)
            .send()
            .await;
        match result {
            Ok(output) => {
                if let Some(item) = output.items.unwrap_or_default().into_iter().next() {
                    let game = from_item(item)
                        .map_err(|e| GameRepositoryError::Serialization(e.to_string()))?;
                    Ok(game)
                } else {
                    Err(GameRepositoryError::NotFound)
                }
            }
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("ResourceNotFoundException")
                    || error_str.contains("ValidationException")
                {
                    return Err(GameRepositoryError::DynamoDb("Invite code index not available. Please ensure the GSI 'GSI_GameByInviteCode' exists and is active.".to_string()));
                }
                Err(GameRepositoryError::DynamoDb(error_str))
            }
        }
    }

    async fn list_games(&self) -> Result<Vec<Game>, GameRepositoryError> {
        let output = self
            .client
            .scan()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(|e| GameRepositoryError::DynamoDb(e.to_string()))?;
        let items = output.items.unwrap_or_default();
        let games: Vec<Game> =
            from_items(items).map_err(|e| GameRepositoryError::Serialization(e.to_string()))?;
        Ok(games)
    }

    async fn register_join(
        &self,
        game_id: &str,
        deposit_amount: f64,
    ) -> Result<Game, GameRepositoryError> {
        // "status" is a DynamoDB reserved word, hence the #status alias.
        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(game_id.to_string()))
            .update_expression(
                "SET current_participants = current_participants + :one, \
                 total_pot = total_pot + :deposit",
            )
            .condition_expression(
                "#status = :pending AND current_participants < max_participants",
            )
            .expression_attribute_names("#status", "status")
            .expression_attribute_values(":one", AttributeValue::N("1".to_string()))
            .expression_attribute_values(":deposit", AttributeValue::N(deposit_amount.to_string()))
            .expression_attribute_values(":pending", AttributeValue::S("pending".to_string()))
            .return_values(ReturnValue::AllNew)
            .send()
            .await;
        match result {
            Ok(output) => {
                let attributes = output
                    .attributes
                    .ok_or_else(|| GameRepositoryError::NotFound)?;
                let game = from_item(attributes)
                    .map_err(|e| GameRepositoryError::Serialization(e.to_string()))?;
                Ok(game)
            }
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("ConditionalCheckFailedException") {
                    Err(GameRepositoryError::ConditionFailed)
                } else {
                    Err(GameRepositoryError::DynamoDb(error_str))
                }
            }
        }
    }

    async fn activate_game(&self, game_id: &str) -> Result<Game, GameRepositoryError> {
        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(game_id.to_string()))
            .update_expression("SET #status = :active")
            .condition_expression("#status = :pending AND current_participants = max_participants")
            .expression_attribute_names("#status", "status")
            .expression_attribute_values(":active", AttributeValue::S("active".to_string()))
            .expression_attribute_values(":pending", AttributeValue::S("pending".to_string()))
            .return_values(ReturnValue::AllNew)
            .send()
            .await;
        match result {
            Ok(output) => {
                let attributes = output
                    .attributes
                    .ok_or_else(|| GameRepositoryError::NotFound)?;
                let game = from_item(attributes)
                    .map_err(|e| GameRepositoryError::Serialization(e.to_string()))?;
                Ok(game)
            }
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("ConditionalCheckFailedException") {
                    Err(GameRepositoryError::ConditionFailed)
                } else {
                    Err(GameRepositoryError::DynamoDb(error_str))
                }
            }
        }
    }
}
