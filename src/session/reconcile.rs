//! Deck loading: remote store first, embedded deck as fallback.
//!
//! 1. Fetch the tier from the remote store.
//! 2. If that failed or produced no valid card, use the fallback deck for
//!    the tier and say why.
//! 3. A non-empty remote deck replaces the fallback entirely; the two are
//!    never merged.
//! 4. An empty result is reported but still returned. The session can
//!    start without cards and grow through custom ones.
//!
//! Remote records are untrusted. Each must pass the same card checks as a
//! persisted snapshot, match the requested tier, and carry an ID not seen
//! earlier in the same fetch.

use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use crate::cards::{Card, IntensityLevel};
use crate::persistence::sanitize_card;
use crate::remote::{CardStore, StoreError};

/// Shown when the remote store could not be reached.
pub const FETCH_FAILED_MESSAGE: &str =
    "Não foi possível carregar as cartas online. Usamos o baralho padrão offline.";

/// Shown when the remote store answered with no usable card.
pub const REMOTE_EMPTY_MESSAGE: &str =
    "Nenhuma carta foi encontrada no baralho online para esse nível. Usamos o baralho padrão offline.";

/// Shown when no source has any card for the tier.
pub const NO_CARDS_MESSAGE: &str =
    "Não encontramos cartas disponíveis para este nível. Adicione cartas personalizadas para começar.";

/// Outcome of loading a deck.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeckLoad {
    pub cards: Vec<Card>,
    pub used_fallback: bool,
    pub error_message: Option<String>,
}

impl DeckLoad {
    /// True only when the remote deck was used and has cards.
    #[must_use]
    pub fn success(&self) -> bool {
        !self.used_fallback && !self.cards.is_empty()
    }
}

/// Load the deck for `level`.
///
/// `fallback` may hold cards of every tier; only `level` is kept.
/// Returns `Err` only for faults outside the store's failure model.
pub async fn load_deck(
    store: &dyn CardStore,
    level: IntensityLevel,
    fallback: &[Card],
) -> Result<DeckLoad, StoreError> {
    let fetch = store.fetch_by_intensity(level).await?;
    let remote = validate_records(&fetch.records, level);

    if !remote.is_empty() {
        debug!(level = %level, cards = remote.len(), "using remote deck");
        return Ok(DeckLoad {
            cards: remote,
            used_fallback: false,
            error_message: None,
        });
    }

    let cards: Vec<Card> = fallback.iter().filter(|c| c.level == level).cloned().collect();
    let message = if cards.is_empty() {
        NO_CARDS_MESSAGE
    } else if fetch.failed {
        FETCH_FAILED_MESSAGE
    } else {
        REMOTE_EMPTY_MESSAGE
    };

    warn!(
        level = %level,
        remote_failed = fetch.failed,
        fallback_cards = cards.len(),
        "remote deck unavailable, using fallback"
    );

    Ok(DeckLoad {
        cards,
        used_fallback: true,
        error_message: Some(message.to_string()),
    })
}

fn validate_records(records: &[serde_json::Value], level: IntensityLevel) -> Vec<Card> {
    let mut seen = FxHashSet::default();
    let mut cards = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let card = match sanitize_card(record) {
            Ok(card) => card,
            Err(reason) => {
                warn!(index, %reason, "dropping malformed remote card");
                continue;
            }
        };
        if card.level != level {
            warn!(index, card = %card.id, found = %card.level, "dropping remote card of another level");
            continue;
        }
        if !seen.insert(card.id.clone()) {
            warn!(index, card = %card.id, "dropping duplicate remote card");
            continue;
        }
        cards.push(card);
    }

    cards
}
