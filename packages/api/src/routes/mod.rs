pub mod games;
pub mod health;
pub mod stats;
pub mod users;
