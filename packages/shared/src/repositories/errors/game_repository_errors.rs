#[derive(Debug)]
pub enum GameRepositoryError {
    NotFound,
    /// A guarded write lost: the row no longer satisfied the condition
    /// expression when the write landed.
    ConditionFailed,
    Serialization(String),
    DynamoDb(String),
}

impl std::fmt::Display for GameRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameRepositoryError::NotFound => write!(f, "Game not found"),
            GameRepositoryError::ConditionFailed => {
                write!(f, "Game no longer satisfies the update condition")
            }
            GameRepositoryError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            GameRepositoryError::DynamoDb(msg) => write!(f, "DynamoDB error: {}", msg),
        }
    }
}

impl std::error::Error for GameRepositoryError {}
