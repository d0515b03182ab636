use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::models::responses::ErrorResponse;
use shared::services::errors::{
    game_service_errors::GameServiceError, user_service_errors::UserServiceError,
};

#[derive(Debug)]
pub enum ApiError {
    UserService(UserServiceError),
    GameService(GameServiceError),
    MissingWalletAddress,
}

impl From<UserServiceError> for ApiError {
    fn from(error: UserServiceError) -> Self {
        ApiError::UserService(error)
    }
}

impl From<GameServiceError> for ApiError {
    fn from(error: GameServiceError) -> Self {
        ApiError::GameService(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::UserService(e @ UserServiceError::ValidationError(_)) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            ApiError::UserService(e @ UserServiceError::UserNotFound) => {
                (StatusCode::NOT_FOUND, e.to_string())
            }
            ApiError::UserService(e @ UserServiceError::Conflict) => {
                (StatusCode::CONFLICT, e.to_string())
            }
            ApiError::UserService(e @ UserServiceError::RepositoryError(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }

            ApiError::GameService(e @ GameServiceError::ValidationError(_)) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            ApiError::GameService(
                e @ (GameServiceError::InvalidCode | GameServiceError::GameNotFound),
            ) => (StatusCode::NOT_FOUND, e.to_string()),
            ApiError::GameService(
                e @ (GameServiceError::GameAlreadyStarted
                | GameServiceError::GameFull
                | GameServiceError::AlreadyJoined
                | GameServiceError::Conflict),
            ) => (StatusCode::CONFLICT, e.to_string()),
            ApiError::GameService(e @ GameServiceError::RepositoryError(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }

            ApiError::MissingWalletAddress => (
                StatusCode::UNAUTHORIZED,
                "Connect a wallet and retry".to_string(),
            ),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
