use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::game::{Game, GameStatus};
use crate::models::game_participant::GameParticipant;

/// Fixed illustrative yield rate shown as "potential winnings"; not a real
/// yield computation.
pub const POTENTIAL_WINNINGS_RATE: f64 = 0.10;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlatformStats {
    pub total_deposited: f64,
    pub active_games: usize,
    pub total_players: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserStats {
    pub total_deposited: f64,
    pub potential_winnings: f64,
    pub active_games: usize,
}

/// Platform totals over the current snapshot of games. Pure; re-evaluated
/// on every call rather than cached.
pub fn platform_stats(games: &[Game]) -> PlatformStats {
    PlatformStats {
        total_deposited: games
            .iter()
            .map(|g| g.deposit_amount * f64::from(g.current_participants))
            .sum(),
        active_games: games
            .iter()
            .filter(|g| g.status == GameStatus::Active)
            .count(),
        total_players: games.iter().map(|g| g.current_participants).sum(),
    }
}

/// One user's totals over their stake records. Only stakes in live
/// (pending or active) games count.
pub fn user_stats(participations: &[GameParticipant], games: &[Game]) -> UserStats {
    let games_by_id: HashMap<&str, &Game> =
        games.iter().map(|g| (g.id.as_str(), g)).collect();

    let live: Vec<&GameParticipant> = participations
        .iter()
        .filter(|p| {
            games_by_id
                .get(p.game_id.as_str())
                .map(|g| matches!(g.status, GameStatus::Pending | GameStatus::Active))
                .unwrap_or(false)
        })
        .collect();

    let total_deposited: f64 = live.iter().map(|p| p.deposit_amount).sum();
    UserStats {
        total_deposited,
        potential_winnings: total_deposited * POTENTIAL_WINNINGS_RATE,
        active_games: live.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::game::{GameSpec, WinnerSelection};

    fn game(deposit: f64, participants: u32, status: GameStatus) -> Game {
        let spec = GameSpec {
            name: "Test".to_string(),
            deposit_amount: deposit,
            max_participants: 10,
            duration_seconds: 86400,
            winner_selection: WinnerSelection::Random,
        };
        let mut game = Game::new(&spec, "creator-id", "AB12CD");
        game.current_participants = participants;
        game.status = status;
        game
    }

    #[test]
    fn test_platform_totals() {
        let games = vec![
            game(0.1, 2, GameStatus::Active),
            game(0.5, 1, GameStatus::Pending),
        ];

        let stats = platform_stats(&games);

        assert!((stats.total_deposited - 0.7).abs() < 1e-9);
        assert_eq!(stats.active_games, 1);
        assert_eq!(stats.total_players, 3);
    }

    #[test]
    fn test_platform_stats_empty() {
        let stats = platform_stats(&[]);
        assert_eq!(stats.total_deposited, 0.0);
        assert_eq!(stats.active_games, 0);
        assert_eq!(stats.total_players, 0);
    }

    #[test]
    fn test_user_stats_counts_only_live_games() {
        let pending = game(0.1, 1, GameStatus::Pending);
        let active = game(0.25, 3, GameStatus::Active);
        let completed = game(1.0, 5, GameStatus::Completed);

        let participations = vec![
            GameParticipant::new(&pending.id, "user-1", 0.1),
            GameParticipant::new(&active.id, "user-1", 0.25),
            GameParticipant::new(&completed.id, "user-1", 1.0),
        ];
        let games = vec![pending, active, completed];

        let stats = user_stats(&participations, &games);

        assert!((stats.total_deposited - 0.35).abs() < 1e-9);
        assert!((stats.potential_winnings - 0.035).abs() < 1e-9);
        assert_eq!(stats.active_games, 2);
    }

    #[test]
    fn test_user_stats_ignores_unknown_games() {
        let participations = vec![GameParticipant::new("missing-game", "user-1", 0.5)];
        let stats = user_stats(&participations, &[]);

        assert_eq!(stats.total_deposited, 0.0);
        assert_eq!(stats.potential_winnings, 0.0);
        assert_eq!(stats.active_games, 0);
    }
}
