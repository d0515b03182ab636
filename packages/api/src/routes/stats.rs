use axum::{extract::State, routing::get, Json, Router};

use crate::{error::ApiError, middleware::wallet::WalletAddress, state::AppState};
use shared::services::stats_service::{PlatformStats, UserStats};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/stats/platform", get(platform_stats))
        .route("/stats/me", get(my_stats))
}

async fn platform_stats(State(state): State<AppState>) -> Result<Json<PlatformStats>, ApiError> {
    let stats = state.game_service.platform_stats().await?;
    Ok(Json(stats))
}

async fn my_stats(
    State(state): State<AppState>,
    wallet: WalletAddress,
) -> Result<Json<UserStats>, ApiError> {
    let stats = state.game_service.user_stats(&wallet.address).await?;
    Ok(Json(stats))
}
