use axum::{extract::State, routing::get, Json, Router};

use crate::{error::ApiError, middleware::wallet::WalletAddress, state::AppState};
use shared::models::user::User;

pub fn routes() -> Router<AppState> {
    Router::new().route("/users/me", get(me))
}

/// Resolves the caller's user record, creating it on first contact.
async fn me(
    State(state): State<AppState>,
    wallet: WalletAddress,
) -> Result<Json<User>, ApiError> {
    let user = state.user_service.resolve_user(&wallet.address).await?;
    Ok(Json(user))
}
