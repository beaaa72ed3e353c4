//! Card data.
//!
//! A `Card` is immutable once created. Its `is_boosted` flag is fixed at
//! creation time and only custom cards are ever created boosted.

use serde::{Deserialize, Serialize};

/// Longest card text accepted, in characters.
pub const MAX_CARD_TEXT_LEN: usize = 500;

/// Card identifier, unique within the source that issued it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    /// Create a card ID from any string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The two kinds of prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Truth,
    Dare,
}

impl CardType {
    /// Parse the wire name (`"truth"` / `"dare"`).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "truth" => Some(Self::Truth),
            "dare" => Some(Self::Dare),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Truth => "truth",
            Self::Dare => "dare",
        }
    }
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity tier. Ordered from mildest to strongest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntensityLevel {
    Leve,
    Medio,
    Pesado,
    Extremo,
}

impl IntensityLevel {
    /// All tiers, mildest first.
    pub const ALL: [IntensityLevel; 4] = [Self::Leve, Self::Medio, Self::Pesado, Self::Extremo];

    /// Parse the wire name (`"leve"`, `"medio"`, ...).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "leve" => Some(Self::Leve),
            "medio" => Some(Self::Medio),
            "pesado" => Some(Self::Pesado),
            "extremo" => Some(Self::Extremo),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Leve => "leve",
            Self::Medio => "medio",
            Self::Pesado => "pesado",
            Self::Extremo => "extremo",
        }
    }
}

impl std::fmt::Display for IntensityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A prompt card.
///
/// ## Example
///
/// ```
/// use truth_or_dare::cards::{Card, CardId, CardType, IntensityLevel};
///
/// let card = Card::new(CardId::new("c1"), CardType::Dare, "Sing a chorus.", IntensityLevel::Leve);
///
/// assert!(!card.is_boosted);
/// assert!(card.matches(CardType::Dare, IntensityLevel::Leve));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    #[serde(rename = "type")]
    pub card_type: CardType,
    pub text: String,
    pub level: IntensityLevel,
    pub is_boosted: bool,
    pub is_custom: bool,
}

impl Card {
    /// Create a plain (non-boosted, non-custom) card.
    pub fn new(id: CardId, card_type: CardType, text: impl Into<String>, level: IntensityLevel) -> Self {
        Self {
            id,
            card_type,
            text: text.into(),
            level,
            is_boosted: false,
            is_custom: false,
        }
    }

    /// Create a player-authored card.
    pub fn custom(
        id: CardId,
        card_type: CardType,
        text: impl Into<String>,
        level: IntensityLevel,
        boosted: bool,
    ) -> Self {
        Self {
            is_boosted: boosted,
            is_custom: true,
            ..Self::new(id, card_type, text, level)
        }
    }

    /// Whether the card is of the given type and tier.
    #[must_use]
    pub fn matches(&self, card_type: CardType, level: IntensityLevel) -> bool {
        self.card_type == card_type && self.level == level
    }
}

/// Whether `text` is an acceptable card body: 1..=500 characters.
#[must_use]
pub fn is_valid_text(text: &str) -> bool {
    let len = text.chars().count();
    (1..=MAX_CARD_TEXT_LEN).contains(&len)
}
