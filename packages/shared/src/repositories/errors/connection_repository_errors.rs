#[derive(Debug)]
pub enum ConnectionRepositoryError {
    /// The remote end is no longer reachable; the connection record should
    /// be dropped.
    ConnectionGone,
    Serialization(String),
    DynamoDb(String),
    ApiGateway(String),
}

impl std::fmt::Display for ConnectionRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionRepositoryError::ConnectionGone => write!(f, "Connection is gone"),
            ConnectionRepositoryError::Serialization(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            ConnectionRepositoryError::DynamoDb(msg) => write!(f, "DynamoDB error: {}", msg),
            ConnectionRepositoryError::ApiGateway(msg) => {
                write!(f, "API Gateway error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConnectionRepositoryError {}
