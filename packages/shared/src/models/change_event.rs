use serde::{Deserialize, Serialize};

use crate::models::game::Game;
use crate::models::game_participant::GameParticipant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Insert,
    Modify,
    Remove,
}

impl ChangeKind {
    /// Maps a DynamoDB stream event name onto a change kind.
    pub fn from_event_name(event_name: &str) -> Option<Self> {
        match event_name {
            "INSERT" => Some(ChangeKind::Insert),
            "MODIFY" => Some(ChangeKind::Modify),
            "REMOVE" => Some(ChangeKind::Remove),
            _ => None,
        }
    }
}

/// Typed change notification pushed to subscribed clients. Carries the
/// changed row itself so consumers can patch their local state instead of
/// refetching every table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChangeEvent {
    GameChanged { kind: ChangeKind, game: Game },
    ParticipantChanged {
        kind: ChangeKind,
        participant: GameParticipant,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::game::{GameSpec, WinnerSelection};

    #[test]
    fn test_change_kind_from_event_name() {
        assert_eq!(
            ChangeKind::from_event_name("INSERT"),
            Some(ChangeKind::Insert)
        );
        assert_eq!(
            ChangeKind::from_event_name("MODIFY"),
            Some(ChangeKind::Modify)
        );
        assert_eq!(
            ChangeKind::from_event_name("REMOVE"),
            Some(ChangeKind::Remove)
        );
        assert_eq!(ChangeKind::from_event_name("UNKNOWN"), None);
    }

    #[test]
    fn test_change_event_tagged_serialization() {
        let spec = GameSpec {
            name: "Test".to_string(),
            deposit_amount: 0.1,
            max_participants: 2,
            duration_seconds: 86400,
            winner_selection: WinnerSelection::Random,
        };
        let game = Game::new(&spec, "creator-id", "AB12CD");
        let event = ChangeEvent::GameChanged {
            kind: ChangeKind::Modify,
            game,
        };

        let serialized = serde_json::to_string(&event).unwrap();
        assert!(serialized.contains("\"type\":\"game_changed\""));
        assert!(serialized.contains("\"kind\":\"modify\""));
    }
}
