use crate::services::errors::user_service_errors::UserServiceError;

#[derive(Debug)]
pub enum GameServiceError {
    ValidationError(String),
    /// The invite code does not resolve to any game.
    InvalidCode,
    GameNotFound,
    GameAlreadyStarted,
    GameFull,
    AlreadyJoined,
    /// Lost a uniqueness race (invite code pool exhausted, concurrent
    /// creation).
    Conflict,
    RepositoryError(String),
}

impl std::fmt::Display for GameServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameServiceError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            GameServiceError::InvalidCode => write!(f, "Invalid invite code"),
            GameServiceError::GameNotFound => write!(f, "Game not found"),
            GameServiceError::GameAlreadyStarted => write!(f, "Game has already started"),
            GameServiceError::GameFull => write!(f, "Game is full"),
            GameServiceError::AlreadyJoined => write!(f, "You have already joined this game"),
            GameServiceError::Conflict => {
                write!(f, "Another request changed this game concurrently, please retry")
            }
            GameServiceError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for GameServiceError {}

impl From<UserServiceError> for GameServiceError {
    fn from(err: UserServiceError) -> Self {
        match err {
            UserServiceError::ValidationError(msg) => GameServiceError::ValidationError(msg),
            UserServiceError::Conflict => GameServiceError::Conflict,
            UserServiceError::UserNotFound => {
                GameServiceError::RepositoryError("User not found".to_string())
            }
            UserServiceError::RepositoryError(msg) => GameServiceError::RepositoryError(msg),
        }
    }
}
