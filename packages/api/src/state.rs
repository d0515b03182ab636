use std::sync::Arc;

use shared::services::game_service::GameService;
use shared::services::user_service::UserService;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub game_service: Arc<GameService>,
}
