//! Players and the boost economy.
//!
//! ## PlayerId
//!
//! Opaque string identifier, unique and stable for a session.
//!
//! ## Boost points
//!
//! Every player holds 0-5 boost points. A session hands out 3 to each
//! player, fulfilling a card earns 1, and creating a boosted custom card
//! costs 2.

use serde::{Deserialize, Serialize};

/// Boost points every player starts a session with.
pub const STARTING_BOOST_POINTS: u8 = 3;

/// Upper bound on boost points.
pub const MAX_BOOST_POINTS: u8 = 5;

/// Cost of creating a boosted custom card.
pub const BOOST_COST: u8 = 2;

/// Points earned by fulfilling a card.
pub const FULFILL_REWARD: u8 = 1;

/// Player identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Create a player ID from any string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub boost_points: u8,
}

impl Player {
    /// Create a player with a generated ID and the starting allowance.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(PlayerId::generate(), name)
    }

    /// Create a player with a caller-chosen ID.
    pub fn with_id(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            boost_points: STARTING_BOOST_POINTS,
        }
    }

    /// Whether the player can pay for a boosted card.
    #[must_use]
    pub fn can_afford_boost(&self) -> bool {
        self.boost_points >= BOOST_COST
    }

    /// Add the fulfillment reward, capped at the maximum.
    pub fn reward(&mut self) {
        self.boost_points = self
            .boost_points
            .saturating_add(FULFILL_REWARD)
            .min(MAX_BOOST_POINTS);
    }

    /// Debit the boost cost. Returns false (and changes nothing) when the
    /// balance is insufficient.
    pub fn spend_boost(&mut self) -> bool {
        if !self.can_afford_boost() {
            return false;
        }
        self.boost_points -= BOOST_COST;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_starts_with_allowance() {
        let player = Player::new("Ana");

        assert_eq!(player.name, "Ana");
        assert_eq!(player.boost_points, STARTING_BOOST_POINTS);
        assert!(!player.id.as_str().is_empty());
    }

    #[test]
    fn test_generated_ids_differ() {
        assert_ne!(PlayerId::generate(), PlayerId::generate());
    }

    #[test]
    fn test_reward_caps_at_max() {
        let mut player = Player::with_id(PlayerId::new("p1"), "Ana");

        player.reward();
        assert_eq!(player.boost_points, 4);
        player.reward();
        player.reward();
        assert_eq!(player.boost_points, MAX_BOOST_POINTS);
    }

    #[test]
    fn test_spend_boost() {
        let mut player = Player::with_id(PlayerId::new("p1"), "Ana");

        assert!(player.spend_boost());
        assert_eq!(player.boost_points, 1);

        assert!(!player.spend_boost());
        assert_eq!(player.boost_points, 1);
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let player = Player::with_id(PlayerId::new("p1"), "Ana");
        let json = serde_json::to_value(&player).unwrap();

        assert_eq!(json["id"], "p1");
        assert_eq!(json["boostPoints"], 3);
    }
}
