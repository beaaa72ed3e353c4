//! Session state: the aggregate root.
//!
//! ## SessionState
//!
//! Everything a running session knows:
//! - Phase, mode and intensity tier
//! - The fixed roster and whose turn it is
//! - The live deck, the archive of resolved cards, and the card currently
//!   checked out
//!
//! The checked-out card stays in `available_cards` until it is resolved.
//! Passing puts nothing back because nothing was taken out.
//!
//! Roster and decks are `im` vectors, so cloning a state to build the next
//! one is cheap.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::player::{Player, PlayerId, MAX_BOOST_POINTS};
use crate::cards::{Card, CardId, Deck, IntensityLevel};

/// Session phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Setup,
    Playing,
}

impl Phase {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "setup" => Some(Self::Setup),
            "playing" => Some(Self::Playing),
            _ => None,
        }
    }
}

/// Table format. Fixed once a session starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Exactly two players.
    Casal,
    /// Three or more players.
    Grupo,
}

impl GameMode {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "casal" => Some(Self::Casal),
            "grupo" => Some(Self::Grupo),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Casal => "casal",
            Self::Grupo => "grupo",
        }
    }

    /// Whether a roster of `count` players fits this mode.
    #[must_use]
    pub const fn accepts(self, count: usize) -> bool {
        match self {
            Self::Casal => count == 2,
            Self::Grupo => count >= 3,
        }
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a roster cannot start a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("mode {mode} does not accept {count} players")]
    RosterSize { mode: GameMode, count: usize },

    #[error("player at seat {seat} has a blank name")]
    BlankName { seat: usize },

    #[error("player id {id} is used by more than one seat")]
    DuplicatePlayerId { id: PlayerId },
}

/// Check a roster against a mode: cardinality, non-blank names and
/// distinct ids.
pub fn validate_setup(mode: GameMode, players: &[Player]) -> Result<(), SetupError> {
    if !mode.accepts(players.len()) {
        return Err(SetupError::RosterSize {
            mode,
            count: players.len(),
        });
    }
    if let Some(seat) = players.iter().position(|p| p.name.trim().is_empty()) {
        return Err(SetupError::BlankName { seat });
    }
    if let Some(id) = first_repeat(players.iter().map(|p| &p.id)) {
        return Err(SetupError::DuplicatePlayerId { id: id.clone() });
    }
    Ok(())
}

fn first_repeat<'a, T, I>(items: I) -> Option<&'a T>
where
    T: Eq + std::hash::Hash + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut seen = FxHashSet::default();
    items.into_iter().find(|item| !seen.insert(*item))
}

/// A broken cross-field invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("playing phase without a game mode")]
    PlayingWithoutMode,

    #[error("playing phase without an intensity")]
    PlayingWithoutIntensity,

    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error("current player index {index} out of range for {players} players")]
    PlayerIndexOutOfRange { index: usize, players: usize },

    #[error("player {player} has {points} boost points")]
    BoostOutOfRange { player: String, points: u8 },

    #[error("card {card} is {found}, session is {expected}")]
    CardLevelMismatch {
        card: CardId,
        found: IntensityLevel,
        expected: IntensityLevel,
    },

    #[error("cards present without an active intensity")]
    CardsWithoutIntensity,

    #[error("checked-out card {card} is not in the deck")]
    CurrentCardNotInDeck { card: CardId },

    #[error("card {card} appears more than once")]
    DuplicateCard { card: CardId },
}

/// Complete session state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub phase: Phase,
    pub mode: Option<GameMode>,
    pub intensity: Option<IntensityLevel>,
    pub players: Vector<Player>,
    pub current_player_index: Option<usize>,
    pub available_cards: Deck,
    pub used_cards: Deck,
    pub current_card: Option<Card>,
}

impl SessionState {
    /// The empty setup state a process starts in and `reset` returns to.
    #[must_use]
    pub fn initial() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.current_player_index.and_then(|i| self.players.get(i))
    }

    /// Mutable access to the player whose turn it is.
    pub fn current_player_mut(&mut self) -> Option<&mut Player> {
        let index = self.current_player_index?;
        self.players.get_mut(index)
    }

    /// End the turn: nothing checked out, nobody selected.
    pub fn clear_turn(&mut self) {
        self.current_card = None;
        self.current_player_index = None;
    }

    /// Check every cross-field invariant.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        if self.phase == Phase::Playing {
            let mode = self.mode.ok_or(InvariantViolation::PlayingWithoutMode)?;
            if self.intensity.is_none() {
                return Err(InvariantViolation::PlayingWithoutIntensity);
            }
            if !mode.accepts(self.players.len()) {
                return Err(SetupError::RosterSize {
                    mode,
                    count: self.players.len(),
                }
                .into());
            }
        }

        if let Some(seat) = self.players.iter().position(|p| p.name.trim().is_empty()) {
            return Err(SetupError::BlankName { seat }.into());
        }

        if let Some(id) = first_repeat(self.players.iter().map(|p| &p.id)) {
            return Err(SetupError::DuplicatePlayerId { id: id.clone() }.into());
        }

        if let Some(index) = self.current_player_index {
            if index >= self.players.len() {
                return Err(InvariantViolation::PlayerIndexOutOfRange {
                    index,
                    players: self.players.len(),
                });
            }
        }

        if let Some(player) = self.players.iter().find(|p| p.boost_points > MAX_BOOST_POINTS) {
            return Err(InvariantViolation::BoostOutOfRange {
                player: player.id.to_string(),
                points: player.boost_points,
            });
        }

        match self.intensity {
            Some(expected) => {
                let off_level = self
                    .available_cards
                    .find_off_level(expected)
                    .or_else(|| self.used_cards.find_off_level(expected))
                    .or_else(|| self.current_card.as_ref().filter(|c| c.level != expected));
                if let Some(card) = off_level {
                    return Err(InvariantViolation::CardLevelMismatch {
                        card: card.id.clone(),
                        found: card.level,
                        expected,
                    });
                }
            }
            None => {
                if !self.available_cards.is_empty()
                    || !self.used_cards.is_empty()
                    || self.current_card.is_some()
                {
                    return Err(InvariantViolation::CardsWithoutIntensity);
                }
            }
        }

        let card_ids = self.available_cards.iter().chain(self.used_cards.iter()).map(|c| &c.id);
        if let Some(card) = first_repeat(card_ids) {
            return Err(InvariantViolation::DuplicateCard { card: card.clone() });
        }

        if let Some(card) = &self.current_card {
            if !self.available_cards.contains(&card.id) {
                return Err(InvariantViolation::CurrentCardNotInDeck {
                    card: card.id.clone(),
                });
            }
        }

        Ok(())
    }
}
