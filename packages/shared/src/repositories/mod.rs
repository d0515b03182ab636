pub mod connection_repository;
pub mod errors;
pub mod game_repository;
pub mod participant_repository;
pub mod user_repository;
