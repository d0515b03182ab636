use std::sync::Arc;

use tracing::{error, info};

use crate::models::game::{Game, GameSpec, GameStatus, MAX_PARTICIPANTS, MIN_PARTICIPANTS};
use crate::models::game_participant::GameParticipant;
use crate::repositories::errors::game_repository_errors::GameRepositoryError;
use crate::repositories::errors::participant_repository_errors::ParticipantRepositoryError;
use crate::repositories::game_repository::GameRepository;
use crate::repositories::participant_repository::ParticipantRepository;
use crate::services::errors::game_service_errors::GameServiceError;
use crate::services::invite_code::{generate_invite_code, MAX_INVITE_CODE_ATTEMPTS};
use crate::services::stats_service::{self, PlatformStats, UserStats};
use crate::services::user_service::UserService;

pub struct GameService {
    game_repository: Arc<dyn GameRepository + Send + Sync>,
    participant_repository: Arc<dyn ParticipantRepository + Send + Sync>,
    user_service: Arc<UserService>,
}

impl GameService {
    pub fn new(
        game_repository: Arc<dyn GameRepository + Send + Sync>,
        participant_repository: Arc<dyn ParticipantRepository + Send + Sync>,
        user_service: Arc<UserService>,
    ) -> Self {
        GameService {
            game_repository,
            participant_repository,
            user_service,
        }
    }

    /// Creates a game and auto-joins its creator as the first participant.
    /// Validation happens before any row is written. A failure between the
    /// game write and the participant write rolls the game back so no
    /// participant-less game is left behind.
    pub async fn create_game(
        &self,
        creator_address: &str,
        spec: &GameSpec,
    ) -> Result<Game, GameServiceError> {
        validate_spec(spec)?;

        let creator = self.user_service.resolve_user(creator_address).await?;
        let invite_code = self.unique_invite_code().await?;
        let game = Game::new(spec, &creator.id, &invite_code);

        self.game_repository
            .create_game(&game)
            .await
            .map_err(|e| GameServiceError::RepositoryError(e.to_string()))?;

        let participant = GameParticipant::new(&game.id, &creator.id, game.deposit_amount);
        if let Err(e) = self.participant_repository.add_participant(&participant).await {
            if let Err(delete_err) = self.game_repository.delete_game(&game.id).await {
                error!(
                    "Failed to roll back game {} after participant write failure: {}",
                    game.id, delete_err
                );
            }
            return Err(match e {
                ParticipantRepositoryError::AlreadyExists => GameServiceError::Conflict,
                _ => GameServiceError::RepositoryError(e.to_string()),
            });
        }

        info!(
            "Created game {} with invite code {}",
            game.id, game.invite_code
        );
        Ok(game)
    }

    /// Joins the caller into the game behind an invite code. Preconditions
    /// are checked in order, each with its own failure mode; the capacity
    /// and duplicate-join constraints are additionally enforced by the
    /// store, so a concurrent racer loses there rather than overfilling
    /// the game.
    pub async fn join_game(
        &self,
        wallet_address: &str,
        invite_code: &str,
    ) -> Result<Game, GameServiceError> {
        let invite_code = invite_code.trim().to_uppercase();
        if invite_code.is_empty() {
            return Err(GameServiceError::ValidationError(
                "Invite code cannot be empty".to_string(),
            ));
        }

        let game = match self
            .game_repository
            .get_game_by_invite_code(&invite_code)
            .await
        {
            Ok(game) => game,
            Err(GameRepositoryError::NotFound) => return Err(GameServiceError::InvalidCode),
            Err(e) => return Err(GameServiceError::RepositoryError(e.to_string())),
        };

        if game.status != GameStatus::Pending {
            return Err(GameServiceError::GameAlreadyStarted);
        }
        if game.is_full() {
            return Err(GameServiceError::GameFull);
        }

        let user = self.user_service.resolve_user(wallet_address).await?;

        let existing = self
            .participant_repository
            .find_participant(&game.id, &user.id)
            .await
            .map_err(|e| GameServiceError::RepositoryError(e.to_string()))?;
        if existing.is_some() {
            return Err(GameServiceError::AlreadyJoined);
        }

        let participant = GameParticipant::new(&game.id, &user.id, game.deposit_amount);
        self.participant_repository
            .add_participant(&participant)
            .await
            .map_err(|e| match e {
                ParticipantRepositoryError::AlreadyExists => GameServiceError::AlreadyJoined,
                _ => GameServiceError::RepositoryError(e.to_string()),
            })?;

        let updated = match self
            .game_repository
            .register_join(&game.id, game.deposit_amount)
            .await
        {
            Ok(updated) => updated,
            Err(e) => {
                // The stake record must not outlive a failed count update.
                if let Err(remove_err) = self
                    .participant_repository
                    .remove_participant(&game.id, &user.id)
                    .await
                {
                    error!(
                        "Failed to roll back participant {} in game {}: {}",
                        user.id, game.id, remove_err
                    );
                }
                return Err(match e {
                    GameRepositoryError::ConditionFailed => {
                        self.losing_join_error(&game.id).await
                    }
                    _ => GameServiceError::RepositoryError(e.to_string()),
                });
            }
        };

        info!(
            "User {} joined game {} ({}/{})",
            user.id, updated.id, updated.current_participants, updated.max_participants
        );

        if updated.current_participants == updated.max_participants {
            return self.activate(updated).await;
        }
        Ok(updated)
    }

    pub async fn list_games(&self) -> Result<Vec<Game>, GameServiceError> {
        self.game_repository
            .list_games()
            .await
            .map_err(|e| GameServiceError::RepositoryError(e.to_string()))
    }

    /// The caller's live (pending or active) games. A wallet that never
    /// played resolves to an empty list without creating a user record.
    pub async fn games_for(&self, wallet_address: &str) -> Result<Vec<Game>, GameServiceError> {
        let user = match self.user_service.find_by_wallet(wallet_address).await? {
            Some(user) => user,
            None => return Ok(Vec::new()),
        };
        let participations = self
            .participant_repository
            .list_by_user(&user.id)
            .await
            .map_err(|e| GameServiceError::RepositoryError(e.to_string()))?;

        let mut games = Vec::new();
        for participation in participations {
            match self.game_repository.get_game(&participation.game_id).await {
                Ok(game)
                    if matches!(game.status, GameStatus::Pending | GameStatus::Active) =>
                {
                    games.push(game)
                }
                Ok(_) | Err(GameRepositoryError::NotFound) => {}
                Err(e) => return Err(GameServiceError::RepositoryError(e.to_string())),
            }
        }
        Ok(games)
    }

    pub async fn participants_of(
        &self,
        game_id: &str,
    ) -> Result<Vec<GameParticipant>, GameServiceError> {
        match self.game_repository.get_game(game_id).await {
            Ok(_) => {}
            Err(GameRepositoryError::NotFound) => return Err(GameServiceError::GameNotFound),
            Err(e) => return Err(GameServiceError::RepositoryError(e.to_string())),
        }
        self.participant_repository
            .list_by_game(game_id)
            .await
            .map_err(|e| GameServiceError::RepositoryError(e.to_string()))
    }

    pub async fn platform_stats(&self) -> Result<PlatformStats, GameServiceError> {
        let games = self.list_games().await?;
        Ok(stats_service::platform_stats(&games))
    }

    pub async fn user_stats(&self, wallet_address: &str) -> Result<UserStats, GameServiceError> {
        let user = match self.user_service.find_by_wallet(wallet_address).await? {
            Some(user) => user,
            None => return Ok(stats_service::user_stats(&[], &[])),
        };
        let participations = self
            .participant_repository
            .list_by_user(&user.id)
            .await
            .map_err(|e| GameServiceError::RepositoryError(e.to_string()))?;

        let mut games = Vec::new();
        for participation in &participations {
            match self.game_repository.get_game(&participation.game_id).await {
                Ok(game) => games.push(game),
                Err(GameRepositoryError::NotFound) => {}
                Err(e) => return Err(GameServiceError::RepositoryError(e.to_string())),
            }
        }
        Ok(stats_service::user_stats(&participations, &games))
    }

    async fn unique_invite_code(&self) -> Result<String, GameServiceError> {
        for _ in 0..MAX_INVITE_CODE_ATTEMPTS {
            let code = generate_invite_code();
            match self.game_repository.get_game_by_invite_code(&code).await {
                Err(GameRepositoryError::NotFound) => return Ok(code),
                Ok(_) => continue,
                Err(e) => return Err(GameServiceError::RepositoryError(e.to_string())),
            }
        }
        Err(GameServiceError::Conflict)
    }

    /// Distinguishes why a guarded join update was rejected: the game
    /// either started in the meantime or filled up.
    async fn losing_join_error(&self, game_id: &str) -> GameServiceError {
        match self.game_repository.get_game(game_id).await {
            Ok(game) if game.status != GameStatus::Pending => GameServiceError::GameAlreadyStarted,
            Ok(_) => GameServiceError::GameFull,
            Err(_) => GameServiceError::GameFull,
        }
    }

    async fn activate(&self, filled: Game) -> Result<Game, GameServiceError> {
        match self.game_repository.activate_game(&filled.id).await {
            Ok(game) => {
                info!("Game {} is full and now active", game.id);
                Ok(game)
            }
            // Another writer flipped it first; the game is active either way.
            Err(GameRepositoryError::ConditionFailed) => self
                .game_repository
                .get_game(&filled.id)
                .await
                .map_err(|e| GameServiceError::RepositoryError(e.to_string())),
            Err(e) => Err(GameServiceError::RepositoryError(e.to_string())),
        }
    }
}

fn validate_spec(spec: &GameSpec) -> Result<(), GameServiceError> {
    if spec.name.trim().is_empty() {
        return Err(GameServiceError::ValidationError(
            "Game name cannot be empty".to_string(),
        ));
    }
    if !spec.deposit_amount.is_finite() || spec.deposit_amount <= 0.0 {
        return Err(GameServiceError::ValidationError(
            "Deposit amount must be greater than zero".to_string(),
        ));
    }
    if spec.max_participants < MIN_PARTICIPANTS || spec.max_participants > MAX_PARTICIPANTS {
        return Err(GameServiceError::ValidationError(format!(
            "Max participants must be between {} and {}",
            MIN_PARTICIPANTS, MAX_PARTICIPANTS
        )));
    }
    if spec.duration_seconds == 0 {
        return Err(GameServiceError::ValidationError(
            "Duration must be a positive number of seconds".to_string(),
        ));
    }
    Ok(())
}
