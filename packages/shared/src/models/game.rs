use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Network the simulated deposits are denominated on (Sepolia).
pub const DEFAULT_CHAIN_ID: u64 = 11155111;

pub const MIN_PARTICIPANTS: u32 = 2;
pub const MAX_PARTICIPANTS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Pending,
    Active,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WinnerSelection {
    Random,
    Vote,
}

/// Caller-supplied parameters for a new game. Validated by the game
/// service before any row is written.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GameSpec {
    pub name: String,
    pub deposit_amount: f64,
    pub max_participants: u32,
    pub duration_seconds: u64,
    pub winner_selection: WinnerSelection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub name: String,
    pub creator_id: String,
    pub deposit_amount: f64,
    pub max_participants: u32,
    pub current_participants: u32,
    pub duration_seconds: u64,
    pub winner_selection: WinnerSelection,
    pub status: GameStatus,
    pub total_pot: f64,
    pub invite_code: String,
    pub chain_id: u64,
    pub created_at: DateTime<Utc>,
}

impl Game {
    /// A new game starts pending with the creator already counted, so the
    /// pot is seeded with exactly one deposit.
    pub fn new(spec: &GameSpec, creator_id: &str, invite_code: &str) -> Self {
        Game {
            id: Uuid::new_v4().to_string(),
            name: spec.name.clone(),
            creator_id: creator_id.to_string(),
            deposit_amount: spec.deposit_amount,
            max_participants: spec.max_participants,
            current_participants: 1,
            duration_seconds: spec.duration_seconds,
            winner_selection: spec.winner_selection,
            status: GameStatus::Pending,
            total_pot: spec.deposit_amount,
            invite_code: invite_code.to_string(),
            chain_id: DEFAULT_CHAIN_ID,
            created_at: Utc::now(),
        }
    }

    pub fn is_full(&self) -> bool {
        self.current_participants >= self.max_participants
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> GameSpec {
        GameSpec {
            name: "Friday Night Stakes".to_string(),
            deposit_amount: 0.1,
            max_participants: 5,
            duration_seconds: 86400,
            winner_selection: WinnerSelection::Random,
        }
    }

    #[test]
    fn test_new_game_defaults() {
        let game = Game::new(&spec(), "creator-id", "AB12CD");

        assert_eq!(game.status, GameStatus::Pending);
        assert_eq!(game.current_participants, 1);
        assert_eq!(game.total_pot, 0.1);
        assert_eq!(game.invite_code, "AB12CD");
        assert_eq!(game.chain_id, DEFAULT_CHAIN_ID);
        assert!(!game.is_full());
    }

    #[test]
    fn test_game_id_uniqueness() {
        let game1 = Game::new(&spec(), "creator-id", "AB12CD");
        let game2 = Game::new(&spec(), "creator-id", "EF34GH");
        assert_ne!(game1.id, game2.id);
    }

    #[test]
    fn test_is_full_at_capacity() {
        let mut game = Game::new(&spec(), "creator-id", "AB12CD");
        game.current_participants = game.max_participants;
        assert!(game.is_full());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let serialized = serde_json::to_string(&GameStatus::Pending).unwrap();
        assert_eq!(serialized, "\"pending\"");
        let serialized = serde_json::to_string(&WinnerSelection::Vote).unwrap();
        assert_eq!(serialized, "\"vote\"");
    }

    #[test]
    fn test_game_serialization_roundtrip() {
        let game = Game::new(&spec(), "creator-id", "AB12CD");
        let serialized = serde_json::to_string(&game).unwrap();
        assert!(serialized.contains("\"invite_code\":\"AB12CD\""));
        assert!(serialized.contains("\"status\":\"pending\""));

        let deserialized: Game = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized.id, game.id);
        assert_eq!(deserialized.status, GameStatus::Pending);
    }
}
