#[derive(Debug)]
pub enum UserServiceError {
    ValidationError(String),
    UserNotFound,
    /// Two resolutions raced to create the same wallet's record and this
    /// one lost.
    Conflict,
    RepositoryError(String),
}

impl std::fmt::Display for UserServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserServiceError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            UserServiceError::UserNotFound => write!(f, "User not found"),
            UserServiceError::Conflict => {
                write!(f, "User record was created concurrently, please retry")
            }
            UserServiceError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for UserServiceError {}
