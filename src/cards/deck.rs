//! Card collections.
//!
//! `Deck` backs both the live pool (`available_cards`) and the archive of
//! resolved cards (`used_cards`). It wraps an `im::Vector` so cloning a
//! whole session state stays cheap.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::definition::{Card, CardId, CardType, IntensityLevel};

/// Counts shown by a deck inspection view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckSummary {
    pub total: usize,
    pub truths: usize,
    pub dares: usize,
    pub boosted: usize,
    pub custom: usize,
}

/// Filter for listing a deck.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeckFilter {
    #[default]
    All,
    Truth,
    Dare,
    Boosted,
    Custom,
}

impl DeckFilter {
    #[must_use]
    pub fn accepts(self, card: &Card) -> bool {
        match self {
            Self::All => true,
            Self::Truth => card.card_type == CardType::Truth,
            Self::Dare => card.card_type == CardType::Dare,
            Self::Boosted => card.is_boosted,
            Self::Custom => card.is_custom,
        }
    }
}

/// Ordered collection of cards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deck {
    cards: Vector<Card>,
}

impl Deck {
    /// Create an empty deck.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Append a card at the end.
    pub fn push(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    /// Whether a card with this ID is present.
    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.cards.iter().any(|c| &c.id == id)
    }

    /// Remove every card with this ID. Returns how many were removed.
    pub fn remove(&mut self, id: &CardId) -> usize {
        let before = self.cards.len();
        self.cards.retain(|c| &c.id != id);
        before - self.cards.len()
    }

    /// Cards of the given type and tier.
    #[must_use]
    pub fn candidates(&self, card_type: CardType, level: IntensityLevel) -> Vec<&Card> {
        self.cards.iter().filter(|c| c.matches(card_type, level)).collect()
    }

    /// Boosted cards of the given type and tier.
    #[must_use]
    pub fn boosted_candidates(&self, card_type: CardType, level: IntensityLevel) -> Vec<&Card> {
        self.cards
            .iter()
            .filter(|c| c.is_boosted && c.matches(card_type, level))
            .collect()
    }

    /// Cards accepted by `filter`, in deck order.
    #[must_use]
    pub fn filtered(&self, filter: DeckFilter) -> Vec<&Card> {
        self.cards.iter().filter(|c| filter.accepts(c)).collect()
    }

    /// First card whose level differs from `level`, if any.
    #[must_use]
    pub fn find_off_level(&self, level: IntensityLevel) -> Option<&Card> {
        self.cards.iter().find(|c| c.level != level)
    }

    #[must_use]
    pub fn summary(&self) -> DeckSummary {
        self.cards.iter().fold(DeckSummary::default(), |mut acc, card| {
            acc.total += 1;
            match card.card_type {
                CardType::Truth => acc.truths += 1,
                CardType::Dare => acc.dares += 1,
            }
            if card.is_boosted {
                acc.boosted += 1;
            }
            if card.is_custom {
                acc.custom += 1;
            }
            acc
        })
    }
}

impl FromIterator<Card> for Deck {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Card>> for Deck {
    fn from(cards: Vec<Card>) -> Self {
        cards.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str, card_type: CardType, level: IntensityLevel) -> Card {
        Card::new(CardId::new(id), card_type, format!("text {}", id), level)
    }

    fn sample_deck() -> Deck {
        Deck::from(vec![
            card("t1", CardType::Truth, IntensityLevel::Medio),
            card("d1", CardType::Dare, IntensityLevel::Medio),
            Card::custom(CardId::new("d2"), CardType::Dare, "boosted", IntensityLevel::Medio, true),
            Card::custom(CardId::new("t2"), CardType::Truth, "mine", IntensityLevel::Medio, false),
            card("x1", CardType::Dare, IntensityLevel::Leve),
        ])
    }

    #[test]
    fn test_candidates() {
        let deck = sample_deck();

        let dares = deck.candidates(CardType::Dare, IntensityLevel::Medio);
        assert_eq!(dares.len(), 2);

        let boosted = deck.boosted_candidates(CardType::Dare, IntensityLevel::Medio);
        assert_eq!(boosted.len(), 1);
        assert_eq!(boosted[0].id, CardId::new("d2"));

        assert!(deck.boosted_candidates(CardType::Truth, IntensityLevel::Medio).is_empty());
    }

    #[test]
    fn test_remove() {
        let mut deck = sample_deck();

        assert_eq!(deck.remove(&CardId::new("t1")), 1);
        assert!(!deck.contains(&CardId::new("t1")));
        assert_eq!(deck.len(), 4);

        assert_eq!(deck.remove(&CardId::new("missing")), 0);
    }

    #[test]
    fn test_summary() {
        let summary = sample_deck().summary();

        assert_eq!(
            summary,
            DeckSummary {
                total: 5,
                truths: 2,
                dares: 3,
                boosted: 1,
                custom: 2,
            }
        );
    }

    #[test]
    fn test_filtered() {
        let deck = sample_deck();

        assert_eq!(deck.filtered(DeckFilter::All).len(), 5);
        assert_eq!(deck.filtered(DeckFilter::Truth).len(), 2);
        assert_eq!(deck.filtered(DeckFilter::Custom).len(), 2);

        let boosted: Vec<_> = deck.filtered(DeckFilter::Boosted).iter().map(|c| c.id.clone()).collect();
        assert_eq!(boosted, vec![CardId::new("d2")]);
    }

    #[test]
    fn test_find_off_level() {
        let deck = sample_deck();

        assert_eq!(deck.find_off_level(IntensityLevel::Medio).map(|c| c.id.as_str()), Some("x1"));
        assert!(Deck::new().find_off_level(IntensityLevel::Leve).is_none());
    }

    #[test]
    fn test_clone_is_independent() {
        let deck = sample_deck();
        let mut copy = deck.clone();

        copy.remove(&CardId::new("d1"));

        assert_eq!(deck.len(), 5);
        assert_eq!(copy.len(), 4);
    }
}
