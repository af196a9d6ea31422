//! Editor mutations as data.
//!
//! # Responsibility
//! - Name every state-machine mutation so hosts can send them as JSON.
//! - Apply one command to a snapshot and log the outcome.
//!
//! # Invariants
//! - `apply` never fails; stale references log `status=noop`.

use crate::model::card::{CardPatch, EditorState};
use crate::model::id::{CardId, SubCardId};
use crate::model::subcard::{MoveDirection, RelativePosition, SubCard, SubCardData};
use log::debug;
use serde::{Deserialize, Serialize};

/// One editor mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum EditorCommand {
    AddCard,
    UpdateCard {
        card_id: CardId,
        patch: CardPatch,
    },
    DeleteCard {
        card_id: CardId,
    },
    /// Completed drag gesture: `(source, target)`.
    ReorderCards {
        card_id: CardId,
        before_card_id: CardId,
    },
    AddSubCard {
        card_id: CardId,
        subcard: SubCard,
    },
    InsertSubCard {
        card_id: CardId,
        anchor_id: SubCardId,
        subcard: SubCard,
        relative: RelativePosition,
    },
    UpdateSubCard {
        card_id: CardId,
        subcard_id: SubCardId,
        data: SubCardData,
    },
    DeleteSubCard {
        card_id: CardId,
        subcard_id: SubCardId,
    },
    MoveSubCard {
        card_id: CardId,
        subcard_id: SubCardId,
        direction: MoveDirection,
    },
}

impl EditorCommand {
    /// Short stable name for log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddCard => "add_card",
            Self::UpdateCard { .. } => "update_card",
            Self::DeleteCard { .. } => "delete_card",
            Self::ReorderCards { .. } => "reorder_cards",
            Self::AddSubCard { .. } => "add_sub_card",
            Self::InsertSubCard { .. } => "insert_sub_card",
            Self::UpdateSubCard { .. } => "update_sub_card",
            Self::DeleteSubCard { .. } => "delete_sub_card",
            Self::MoveSubCard { .. } => "move_sub_card",
        }
    }

    /// Applies the command, returning the next snapshot.
    pub fn apply(&self, state: &EditorState) -> EditorState {
        let next = match self {
            Self::AddCard => state.add_card(),
            Self::UpdateCard { card_id, patch } => state.update_card(card_id, patch),
            Self::DeleteCard { card_id } => state.delete_card(card_id),
            Self::ReorderCards {
                card_id,
                before_card_id,
            } => state.reorder_cards(card_id, before_card_id),
            Self::AddSubCard { card_id, subcard } => state.add_sub_card(card_id, subcard.clone()),
            Self::InsertSubCard {
                card_id,
                anchor_id,
                subcard,
                relative,
            } => state.insert_sub_card(card_id, anchor_id, subcard.clone(), *relative),
            Self::UpdateSubCard {
                card_id,
                subcard_id,
                data,
            } => state.update_sub_card(card_id, subcard_id, data.clone()),
            Self::DeleteSubCard {
                card_id,
                subcard_id,
            } => state.delete_sub_card(card_id, subcard_id),
            Self::MoveSubCard {
                card_id,
                subcard_id,
                direction,
            } => state.move_sub_card(card_id, subcard_id, *direction),
        };

        let status = if next == *state { "noop" } else { "ok" };
        debug!(
            "event=command_applied module=editor command={} status={} cards={} subcards={}",
            self.name(),
            status,
            next.cards.len(),
            next.subcard_count()
        );
        next
    }
}
