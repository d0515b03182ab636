#[derive(Debug)]
pub enum ParticipantRepositoryError {
    NotFound,
    AlreadyExists,
    Serialization(String),
    DynamoDb(String),
}

impl std::fmt::Display for ParticipantRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParticipantRepositoryError::NotFound => write!(f, "Participant not found"),
            ParticipantRepositoryError::AlreadyExists => {
                write!(f, "Participant already exists for this game")
            }
            ParticipantRepositoryError::Serialization(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            ParticipantRepositoryError::DynamoDb(msg) => write!(f, "DynamoDB error: {}", msg),
        }
    }
}

impl std::error::Error for ParticipantRepositoryError {}
