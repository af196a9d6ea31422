//! Editor state machine transforms.
//!
//! # Responsibility
//! - Implement card/subcard add, update, delete, insert, move and reorder.
//! - Return a new `EditorState` snapshot for every call.
//!
//! # Invariants
//! - The receiver is never mutated.
//! - Stale or unknown ids yield an unchanged snapshot, never an error.
//! - Top-zone subcards stay ahead of bottom-zone ones after add/insert.
//! - Moves swap within one zone only; the other zone keeps its order.
//! - A subcard id already present anywhere in the state is never added twice.

use crate::model::card::{Card, CardPatch, EditorState};
use crate::model::id::{CardId, SubCardId};
use crate::model::subcard::{MoveDirection, RelativePosition, SubCard, SubCardData, Zone};

impl EditorState {
    /// Appends an empty, non-default card.
    pub fn add_card(&self) -> Self {
        let mut next = self.clone();
        next.cards.push(Card::new());
        next
    }

    /// Merges `patch` into the matching card.
    pub fn update_card(&self, card_id: &CardId, patch: &CardPatch) -> Self {
        self.edit_card(card_id, |card| patch.merge_into(card))
    }

    /// Removes the matching card, default or not.
    pub fn delete_card(&self, card_id: &CardId) -> Self {
        let mut next = self.clone();
        next.cards.retain(|card| &card.id != card_id);
        next
    }

    /// Moves `card_id` to sit immediately before `before_card_id`.
    pub fn reorder_cards(&self, card_id: &CardId, before_card_id: &CardId) -> Self {
        if card_id == before_card_id {
            return self.clone();
        }
        let (Some(from), Some(target)) = (self.card_index(card_id), self.card_index(before_card_id))
        else {
            return self.clone();
        };

        let mut next = self.clone();
        let moved = next.cards.remove(from);
        // Removal shifts the target left when the source sat before it.
        let target = if from < target { target - 1 } else { target };
        next.cards.insert(target, moved);
        next
    }

    /// Adds a subcard to its zone: first of the top zone, or last of the
    /// bottom zone.
    pub fn add_sub_card(&self, card_id: &CardId, subcard: SubCard) -> Self {
        if self.find_subcard(&subcard.id).is_some() {
            return self.clone();
        }
        self.edit_card(card_id, |card| {
            let (mut top, mut bottom): (Vec<SubCard>, Vec<SubCard>) = card
                .subcards
                .drain(..)
                .partition(|existing| existing.position == Zone::Top);
            match subcard.position {
                Zone::Top => top.insert(0, subcard),
                Zone::Bottom => bottom.push(subcard),
            }
            top.append(&mut bottom);
            card.subcards = top;
        })
    }

    /// Inserts a subcard right above or below an anchor subcard.
    ///
    /// The new subcard takes the anchor's zone, whatever it was created with.
    pub fn insert_sub_card(
        &self,
        card_id: &CardId,
        anchor_id: &SubCardId,
        subcard: SubCard,
        relative: RelativePosition,
    ) -> Self {
        if self.find_subcard(&subcard.id).is_some() {
            return self.clone();
        }
        self.edit_card(card_id, |card| {
            let Some(anchor) = card
                .subcards
                .iter()
                .position(|existing| &existing.id == anchor_id)
            else {
                return;
            };

            let mut subcard = subcard;
            subcard.position = card.subcards[anchor].position;
            let at = match relative {
                RelativePosition::Above => anchor,
                RelativePosition::Below => anchor + 1,
            };
            card.subcards.insert(at, subcard);
        })
    }

    /// Replaces the whole data mapping of the matching subcard.
    pub fn update_sub_card(
        &self,
        card_id: &CardId,
        subcard_id: &SubCardId,
        data: SubCardData,
    ) -> Self {
        self.edit_card(card_id, |card| {
            if let Some(subcard) = card
                .subcards
                .iter_mut()
                .find(|existing| &existing.id == subcard_id)
            {
                subcard.data = data;
            }
        })
    }

    pub fn delete_sub_card(&self, card_id: &CardId, subcard_id: &SubCardId) -> Self {
        self.edit_card(card_id, |card| {
            card.subcards.retain(|existing| &existing.id != subcard_id);
        })
    }

    /// Swaps a subcard with its neighbor inside its own zone.
    ///
    /// No wraparound and no crossing into the other zone.
    pub fn move_sub_card(
        &self,
        card_id: &CardId,
        subcard_id: &SubCardId,
        direction: MoveDirection,
    ) -> Self {
        self.edit_card(card_id, |card| {
            let Some(zone) = card.subcard(subcard_id).map(|subcard| subcard.position) else {
                return;
            };
            let slots: Vec<usize> = card
                .subcards
                .iter()
                .enumerate()
                .filter(|(_, subcard)| subcard.position == zone)
                .map(|(index, _)| index)
                .collect();
            let Some(rank) = slots
                .iter()
                .position(|&index| &card.subcards[index].id == subcard_id)
            else {
                return;
            };

            let neighbor = match direction {
                MoveDirection::Up => rank.checked_sub(1),
                MoveDirection::Down => Some(rank + 1).filter(|next| *next < slots.len()),
            };
            if let Some(neighbor) = neighbor {
                card.subcards.swap(slots[rank], slots[neighbor]);
            }
        })
    }

    fn edit_card(&self, card_id: &CardId, edit: impl FnOnce(&mut Card)) -> Self {
        let mut next = self.clone();
        if let Some(card) = next.cards.iter_mut().find(|card| &card.id == card_id) {
            edit(card);
        }
        next
    }
}
