pub mod errors;
pub mod game_service;
pub mod invite_code;
pub mod notification_service;
pub mod stats_service;
pub mod user_service;
