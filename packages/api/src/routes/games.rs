use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::{error::ApiError, middleware::wallet::WalletAddress, state::AppState};
use shared::models::game::{Game, GameSpec};
use shared::models::game_participant::GameParticipant;
use shared::models::requests::JoinGameRequest;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/games", post(create_game).get(list_games))
        .route("/games/join", post(join_game))
        .route("/games/mine", get(my_games))
        .route("/games/{game_id}/participants", get(game_participants))
}

async fn create_game(
    State(state): State<AppState>,
    wallet: WalletAddress,
    Json(spec): Json<GameSpec>,
) -> Result<(StatusCode, Json<Game>), ApiError> {
    let game = state
        .game_service
        .create_game(&wallet.address, &spec)
        .await?;
    Ok((StatusCode::CREATED, Json(game)))
}

async fn join_game(
    State(state): State<AppState>,
    wallet: WalletAddress,
    Json(payload): Json<JoinGameRequest>,
) -> Result<Json<Game>, ApiError> {
    let game = state
        .game_service
        .join_game(&wallet.address, &payload.invite_code)
        .await?;
    Ok(Json(game))
}

async fn list_games(State(state): State<AppState>) -> Result<Json<Vec<Game>>, ApiError> {
    let games = state.game_service.list_games().await?;
    Ok(Json(games))
}

async fn my_games(
    State(state): State<AppState>,
    wallet: WalletAddress,
) -> Result<Json<Vec<Game>>, ApiError> {
    let games = state.game_service.games_for(&wallet.address).await?;
    Ok(Json(games))
}

async fn game_participants(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<Vec<GameParticipant>>, ApiError> {
    let participants = state.game_service.participants_of(&game_id).await?;
    Ok(Json(participants))
}
