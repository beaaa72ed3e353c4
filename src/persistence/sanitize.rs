//! Defensive reconstruction of a persisted snapshot.
//!
//! The durable slot may hold anything: an older format, a truncated write,
//! hand-edited JSON. `sanitize` either rebuilds a `SessionState` that
//! satisfies every invariant or rejects the snapshot outright.
//!
//! Recoverable fields are coerced:
//! - `boostPoints` is rounded and clamped to 0..=5 (missing: 3)
//! - `isBoosted` / `isCustom` default to `false` when missing or not boolean
//!
//! Card identity and content are never defaulted. One malformed card
//! rejects the whole snapshot.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::cards::{is_valid_text, Card, CardId, CardType, Deck, IntensityLevel};
use crate::core::{
    GameMode, InvariantViolation, Phase, Player, PlayerId, SessionState, MAX_BOOST_POINTS,
    STARTING_BOOST_POINTS,
};

/// Why a single card record was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CardRejection {
    #[error("not an object")]
    NotAnObject,
    #[error("missing or empty id")]
    Id,
    #[error("type is not truth or dare")]
    Type,
    #[error("text is missing or not 1..=500 characters")]
    Text,
    #[error("unknown level")]
    Level,
}

/// Why a snapshot was discarded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("snapshot is not valid JSON: {0}")]
    Malformed(String),

    #[error("snapshot is not an object")]
    NotAnObject,

    #[error("required field `{0}` is missing")]
    MissingField(&'static str),

    #[error("field `{0}` has the wrong shape")]
    WrongShape(&'static str),

    #[error("field `{field}` has unknown value {value}")]
    UnknownValue { field: &'static str, value: String },

    #[error("player at seat {seat} is invalid")]
    InvalidPlayer { seat: usize },

    #[error("card in `{field}` is invalid: {reason}")]
    InvalidCard {
        field: &'static str,
        reason: CardRejection,
    },

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

/// Parse and sanitize a raw snapshot string.
pub fn sanitize_json(raw: &str) -> Result<SessionState, Rejection> {
    let value: Value = serde_json::from_str(raw).map_err(|e| Rejection::Malformed(e.to_string()))?;
    sanitize(&value)
}

/// Rebuild a session state from untrusted JSON.
pub fn sanitize(raw: &Value) -> Result<SessionState, Rejection> {
    let fields = raw.as_object().ok_or(Rejection::NotAnObject)?;

    let phase = match fields.get("phase") {
        None => return Err(Rejection::MissingField("phase")),
        Some(value) => parse_enum(value, "phase", Phase::parse)?,
    };

    let mode = optional_enum(fields, "mode", GameMode::parse)?;
    let intensity = optional_enum(fields, "intensity", IntensityLevel::parse)?;

    let players = required_array(fields, "players")?
        .iter()
        .enumerate()
        .map(|(seat, raw)| sanitize_player(raw).ok_or(Rejection::InvalidPlayer { seat }))
        .collect::<Result<_, _>>()?;

    let available_cards = sanitize_deck(fields, "availableCards")?;
    let used_cards = sanitize_deck(fields, "usedCards")?;

    let current_card = match fields.get("currentCard") {
        None | Some(Value::Null) => None,
        Some(value) => Some(sanitize_card(value).map_err(|reason| Rejection::InvalidCard {
            field: "currentCard",
            reason,
        })?),
    };

    let current_player_index = match fields.get("currentPlayerIndex") {
        None | Some(Value::Null) => None,
        Some(value) => Some(as_index(value).ok_or(Rejection::WrongShape("currentPlayerIndex"))?),
    };

    let state = SessionState {
        phase,
        mode,
        intensity,
        players,
        current_player_index,
        available_cards,
        used_cards,
        current_card,
    };
    state.validate()?;

    Ok(state)
}

/// Validate one card record.
///
/// Shared with the remote deck loader: remote records go through exactly
/// the same checks as persisted ones.
pub fn sanitize_card(raw: &Value) -> Result<Card, CardRejection> {
    let fields = raw.as_object().ok_or(CardRejection::NotAnObject)?;

    let id = fields
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .ok_or(CardRejection::Id)?;

    let card_type = fields
        .get("type")
        .and_then(Value::as_str)
        .and_then(CardType::parse)
        .ok_or(CardRejection::Type)?;

    let text = fields
        .get("text")
        .and_then(Value::as_str)
        .filter(|text| is_valid_text(text))
        .ok_or(CardRejection::Text)?;

    let level = fields
        .get("level")
        .and_then(Value::as_str)
        .and_then(IntensityLevel::parse)
        .ok_or(CardRejection::Level)?;

    Ok(Card {
        id: CardId::new(id),
        card_type,
        text: text.to_string(),
        level,
        is_boosted: flag(fields, "isBoosted"),
        is_custom: flag(fields, "isCustom"),
    })
}

/// Clamp a raw boost value into the legal range.
#[must_use]
pub fn clamp_boost_points(raw: f64) -> u8 {
    if !raw.is_finite() {
        return STARTING_BOOST_POINTS;
    }
    raw.round().clamp(0.0, f64::from(MAX_BOOST_POINTS)) as u8
}

fn sanitize_player(raw: &Value) -> Option<Player> {
    let fields = raw.as_object()?;

    let id = fields.get("id")?.as_str().filter(|id| !id.is_empty())?;
    let name = fields.get("name")?.as_str()?;

    let boost_points = fields
        .get("boostPoints")
        .and_then(Value::as_f64)
        .map_or(STARTING_BOOST_POINTS, clamp_boost_points);

    Some(Player {
        id: PlayerId::new(id),
        name: name.to_string(),
        boost_points,
    })
}

fn sanitize_deck(fields: &Map<String, Value>, field: &'static str) -> Result<Deck, Rejection> {
    required_array(fields, field)?
        .iter()
        .map(|raw| sanitize_card(raw).map_err(|reason| Rejection::InvalidCard { field, reason }))
        .collect()
}

fn required_array<'a>(fields: &'a Map<String, Value>, field: &'static str) -> Result<&'a Vec<Value>, Rejection> {
    fields
        .get(field)
        .ok_or(Rejection::MissingField(field))?
        .as_array()
        .ok_or(Rejection::WrongShape(field))
}

fn parse_enum<T>(value: &Value, field: &'static str, parse: fn(&str) -> Option<T>) -> Result<T, Rejection> {
    let text = value.as_str().ok_or(Rejection::WrongShape(field))?;
    parse(text).ok_or_else(|| Rejection::UnknownValue {
        field,
        value: text.to_string(),
    })
}

fn optional_enum<T>(
    fields: &Map<String, Value>,
    field: &'static str,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>, Rejection> {
    match fields.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => parse_enum(value, field, parse).map(Some),
    }
}

fn flag(fields: &Map<String, Value>, field: &str) -> bool {
    fields.get(field).and_then(Value::as_bool).unwrap_or(false)
}

// Accepts 2 as well as 2.0; rejects negatives and fractions.
fn as_index(value: &Value) -> Option<usize> {
    if let Some(index) = value.as_u64() {
        return usize::try_from(index).ok();
    }
    let float = value.as_f64()?;
    if float >= 0.0 && float.fract() == 0.0 && float <= usize::MAX as f64 {
        Some(float as usize)
    } else {
        None
    }
}
