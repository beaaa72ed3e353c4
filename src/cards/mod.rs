//! Card system: definitions, decks, and the embedded fallback deck.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier issued by the card's source
//! - `CardType`: Truth or dare
//! - `IntensityLevel`: Severity tier (leve, medio, pesado, extremo)
//! - `Card`: Immutable prompt card
//! - `Deck`: Ordered card collection with draw-candidate queries

pub mod definition;
pub mod deck;
pub mod seed;

pub use definition::{is_valid_text, Card, CardId, CardType, IntensityLevel, MAX_CARD_TEXT_LEN};
pub use deck::{Deck, DeckFilter, DeckSummary};
pub use seed::{seed_deck, seed_deck_for};
