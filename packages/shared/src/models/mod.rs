pub mod change_event;
pub mod game;
pub mod game_participant;
pub mod requests;
pub mod responses;
pub mod user;
