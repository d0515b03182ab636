use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct User {
    pub id: String,
    pub wallet_address: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Builds a fresh user record from a wallet address. The address is
    /// lowercased so that checksummed and plain hex spellings map to the
    /// same record, and the default username is derived from its tail.
    pub fn new(wallet_address: &str) -> Self {
        let wallet_address = wallet_address.to_lowercase();
        let username = default_username(&wallet_address);
        User {
            id: Uuid::new_v4().to_string(),
            wallet_address,
            username,
            created_at: Utc::now(),
        }
    }
}

/// "Player" followed by the last four characters of the address.
fn default_username(wallet_address: &str) -> String {
    let tail_start = wallet_address.len().saturating_sub(4);
    format!("Player{}", &wallet_address[tail_start..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation_lowercases_address() {
        let user = User::new("0xAbCdEf0123456789aBcDeF0123456789ABCDEF01");
        assert_eq!(
            user.wallet_address,
            "0xabcdef0123456789abcdef0123456789abcdef01"
        );
        assert!(!user.id.is_empty());
    }

    #[test]
    fn test_default_username_uses_address_tail() {
        let user = User::new("0xabcdef0123456789abcdef0123456789abcdBEEF");
        assert_eq!(user.username, "Playerbeef");
    }

    #[test]
    fn test_default_username_short_address() {
        let user = User::new("0xa");
        assert_eq!(user.username, "Player0xa");
    }

    #[test]
    fn test_user_id_uniqueness() {
        let user1 = User::new("0xaaa");
        let user2 = User::new("0xaaa");
        assert_ne!(user1.id, user2.id);
        assert_eq!(user1.wallet_address, user2.wallet_address);
    }

    #[test]
    fn test_user_serialization_roundtrip() {
        let user = User::new("0x1234567890abcdef1234567890abcdef12345678");
        let serialized = serde_json::to_string(&user).unwrap();
        assert!(serialized.contains("wallet_address"));

        let deserialized: User = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, user);
    }
}
