//! Card and editor-state aggregates.
//!
//! # Responsibility
//! - Define the card record and the root `EditorState` aggregate.
//! - Define the export payload and its re-import path.
//!
//! # Invariants
//! - A fresh `EditorState` holds exactly one default card.
//! - Within a card, top-zone subcards are stored before bottom-zone ones.
//! - Card order is the authoritative render/export order.

use crate::model::id::{CardId, ContentId, SubCardId};
use crate::model::subcard::{SubCard, Zone};
use serde::{Deserialize, Serialize};

/// Unit of authored content: rich-text body plus typed subcards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    /// Rich-text markup, opaque to the core.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub subcards: Vec<SubCard>,
    /// Only the initial card carries this flag.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_default: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Card {
    /// Creates an empty, non-default card.
    pub fn new() -> Self {
        Self {
            id: ContentId::generate(),
            content: String::new(),
            subcards: Vec::new(),
            is_default: false,
        }
    }

    /// Creates the protected initial card.
    pub fn new_default() -> Self {
        Self {
            is_default: true,
            ..Self::new()
        }
    }

    /// Subcards of one zone in render order.
    pub fn zone(&self, zone: Zone) -> impl Iterator<Item = &SubCard> {
        self.subcards
            .iter()
            .filter(move |subcard| subcard.position == zone)
    }

    pub fn subcard(&self, subcard_id: &SubCardId) -> Option<&SubCard> {
        self.subcards
            .iter()
            .find(|subcard| &subcard.id == subcard_id)
    }

    /// Whether the rich-text body is blank after trim.
    pub fn has_blank_content(&self) -> bool {
        self.content.trim().is_empty()
    }
}

impl Default for Card {
    fn default() -> Self {
        Self::new()
    }
}

/// Partial card fields merged by `update_card`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl CardPatch {
    pub fn content(value: impl Into<String>) -> Self {
        Self {
            content: Some(value.into()),
        }
    }

    pub(crate) fn merge_into(&self, card: &mut Card) {
        if let Some(content) = &self.content {
            card.content = content.clone();
        }
    }
}

/// Full in-memory document being authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorState {
    pub cards: Vec<Card>,
}

/// Filtered, validated payload produced by submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedState {
    pub cards: Vec<Card>,
}

/// Identifier handling when importing an export as a new editor state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdPolicy {
    /// Keep every card/subcard id as exported.
    Keep,
    /// Mint fresh ids for every card and subcard.
    Regenerate,
}

impl EditorState {
    /// Initial state: one empty default card.
    pub fn new() -> Self {
        Self {
            cards: vec![Card::new_default()],
        }
    }

    /// Rebuilds an editor state from an export payload.
    ///
    /// Subcards are regrouped top-then-bottom (stable within each zone).
    /// When no card carries `isDefault`, the first card becomes default.
    /// An empty export yields a fresh initial state.
    pub fn from_export(export: ExportedState, ids: IdPolicy) -> Self {
        if export.cards.is_empty() {
            return Self::new();
        }

        let has_default = export.cards.iter().any(|card| card.is_default);
        let cards = export
            .cards
            .into_iter()
            .enumerate()
            .map(|(index, mut card)| {
                if ids == IdPolicy::Regenerate {
                    card.id = ContentId::generate();
                    for subcard in &mut card.subcards {
                        subcard.id = ContentId::generate();
                    }
                }
                if !has_default && index == 0 {
                    card.is_default = true;
                }
                card.subcards.sort_by_key(|subcard| subcard.position == Zone::Bottom);
                card
            })
            .collect();

        Self { cards }
    }

    pub fn card(&self, card_id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|card| &card.id == card_id)
    }

    pub(crate) fn card_index(&self, card_id: &CardId) -> Option<usize> {
        self.cards.iter().position(|card| &card.id == card_id)
    }

    /// Subcards of one zone of one card, in render order.
    pub fn zone_subcards(&self, card_id: &CardId, zone: Zone) -> Vec<&SubCard> {
        self.card(card_id)
            .map(|card| card.zone(zone).collect())
            .unwrap_or_default()
    }

    /// Finds a subcard anywhere in the document.
    pub fn find_subcard(&self, subcard_id: &SubCardId) -> Option<(&Card, &SubCard)> {
        self.cards
            .iter()
            .find_map(|card| card.subcard(subcard_id).map(|subcard| (card, subcard)))
    }

    pub fn subcard_count(&self) -> usize {
        self.cards.iter().map(|card| card.subcards.len()).sum()
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ExportedState> for EditorState {
    fn from(value: ExportedState) -> Self {
        Self::from_export(value, IdPolicy::Keep)
    }
}

#[cfg(test)]
mod tests {
    use super::{Card, CardPatch, EditorState, ExportedState, IdPolicy};
    use crate::model::subcard::{SubCard, SubCardKind, Zone};

    #[test]
    fn initial_state_has_one_empty_default_card() {
        let state = EditorState::new();
        assert_eq!(state.cards.len(), 1);
        assert!(state.cards[0].is_default);
        assert!(state.cards[0].content.is_empty());
        assert!(state.cards[0].subcards.is_empty());
    }

    #[test]
    fn default_flag_is_omitted_when_false() {
        let card = Card::new();
        let json = serde_json::to_value(&card).expect("card should serialize");
        assert!(json.get("isDefault").is_none());

        let default_json =
            serde_json::to_value(Card::new_default()).expect("card should serialize");
        assert_eq!(default_json["isDefault"], true);
    }

    #[test]
    fn patch_only_touches_given_fields() {
        let mut card = Card::new();
        card.content = "<p>keep</p>".to_string();
        CardPatch::default().merge_into(&mut card);
        assert_eq!(card.content, "<p>keep</p>");
        CardPatch::content("<p>new</p>").merge_into(&mut card);
        assert_eq!(card.content, "<p>new</p>");
    }

    #[test]
    fn import_regroups_zones_and_marks_first_card_default() {
        let mut card = Card::new();
        let bottom = SubCard::new(SubCardKind::Quote, Zone::Bottom);
        let top = SubCard::new(SubCardKind::Blurp, Zone::Top);
        card.subcards = vec![bottom.clone(), top.clone()];

        let state = EditorState::from_export(
            ExportedState {
                cards: vec![card.clone()],
            },
            IdPolicy::Keep,
        );
        assert!(state.cards[0].is_default);
        assert_eq!(state.cards[0].subcards[0].id, top.id);
        assert_eq!(state.cards[0].subcards[1].id, bottom.id);
    }

    #[test]
    fn import_of_empty_export_yields_initial_state() {
        let state = EditorState::from_export(ExportedState { cards: Vec::new() }, IdPolicy::Keep);
        assert_eq!(state.cards.len(), 1);
        assert!(state.cards[0].is_default);
    }
}
