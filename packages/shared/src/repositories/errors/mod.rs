pub mod connection_repository_errors;
pub mod game_repository_errors;
pub mod participant_repository_errors;
pub mod user_repository_errors;
