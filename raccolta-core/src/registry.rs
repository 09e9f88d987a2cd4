//! Registry of card metadata the host's card picker lists.

use std::collections::HashMap;

use serde::Serialize;

use crate::ports::CardError;

/// Type name the host uses to instantiate the card.
pub const CARD_TYPE: &str = "raccolta-differenziata-card";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Metadata describing a card for discovery.
pub struct CardInfo {
    /// Unique type name.
    #[serde(rename = "type")]
    pub card_type: String,
    /// Display name.
    pub name: String,
    /// Short description shown in the picker.
    pub description: String,
}

/// Metadata for the waste collection card.
#[must_use]
pub fn card_info() -> CardInfo {
    CardInfo {
        card_type: String::from(CARD_TYPE),
        name: String::from("Raccolta Differenziata Card"),
        description: String::from(
            "Card per visualizzare i prossimi conferimenti della raccolta differenziata",
        ),
    }
}

/// Registry that resolves card metadata by type name.
#[derive(Debug, Default)]
pub struct CardRegistry {
    cards: HashMap<String, CardInfo>,
}

impl CardRegistry {
    /// Build a registry from the provided metadata list.
    #[must_use]
    pub fn new(cards: Vec<CardInfo>) -> Self {
        let mut registry = Self::default();
        for info in cards {
            registry.register(info);
        }
        registry
    }

    /// Registry holding the built-in card.
    #[must_use]
    pub fn with_builtin() -> Self {
        Self::new(vec![card_info()])
    }

    /// Register a card, replacing any earlier entry of the same type.
    pub fn register(&mut self, info: CardInfo) {
        tracing::debug!(card_type = %info.card_type, "registered card");
        self.cards.insert(info.card_type.clone(), info);
    }

    /// Metadata for every registered card, sorted by type.
    #[must_use]
    pub fn cards(&self) -> Vec<CardInfo> {
        let mut cards: Vec<CardInfo> = self.cards.values().cloned().collect();
        cards.sort_by(|left, right| left.card_type.cmp(&right.card_type));
        cards
    }

    /// Look up a card by type name.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::UnknownCard`] when nothing is registered under `card_type`.
    pub fn card(&self, card_type: &str) -> Result<&CardInfo, CardError> {
        self.cards
            .get(card_type)
            .ok_or_else(|| CardError::UnknownCard(card_type.to_owned()))
    }
}
