//! Submission pipeline: validate, prune, export.
//!
//! # Responsibility
//! - Block submission while any subcard fails validation.
//! - Drop empty subcards, then cards left with no body and no subcards.
//! - Report the synthetic `general` error when nothing remains.
//!
//! # Invariants
//! - The input state is never mutated.
//! - Running `submit` on its own export yields the same export.

use crate::model::card::{Card, EditorState, ExportedState};
use crate::validation::rules::{is_empty, validate_state, ValidationError};
use log::info;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Submission was blocked; carries every error found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitError {
    pub errors: Vec<ValidationError>,
}

impl SubmitError {
    /// Whether the only problem is that nothing was authored.
    pub fn is_no_content(&self) -> bool {
        self.errors.len() == 1 && self.errors[0].is_general()
    }
}

impl Display for SubmitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_no_content() {
            return write!(f, "nothing to submit: {}", self.errors[0].message);
        }
        write!(
            f,
            "submission blocked by {} validation error(s)",
            self.errors.len()
        )
    }
}

impl Error for SubmitError {}

/// What pruning would remove from a state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PruneReport {
    pub removed_cards: usize,
    pub removed_subcards: usize,
}

impl PruneReport {
    pub fn is_noop(&self) -> bool {
        self.removed_cards == 0 && self.removed_subcards == 0
    }
}

/// Submission result for hosts that want to confirm pruning first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "payload", rename_all = "camelCase")]
pub enum SubmitOutcome {
    Success(ExportedState),
    /// Valid, but empty content would be dropped; ask before committing.
    NeedsConfirmation(PruneReport),
    ValidationFailed(Vec<ValidationError>),
}

/// Validates, prunes and exports `state`.
pub fn submit(state: &EditorState) -> Result<ExportedState, SubmitError> {
    let errors = validate_state(state);
    if !errors.is_empty() {
        info!(
            "event=submit module=submission status=rejected errors={}",
            errors.len()
        );
        return Err(SubmitError { errors });
    }

    let pruned = prune_empty(state);
    if pruned.cards.is_empty() {
        info!("event=submit module=submission status=no_content");
        return Err(SubmitError {
            errors: vec![ValidationError::no_content()],
        });
    }

    info!(
        "event=submit module=submission status=ok cards={} subcards={}",
        pruned.cards.len(),
        pruned.subcard_count()
    );
    Ok(ExportedState {
        cards: pruned.cards,
    })
}

/// Drops empty subcards, then cards with a blank body and no subcards left.
///
/// The result may hold zero cards.
pub fn prune_empty(state: &EditorState) -> EditorState {
    let cards = state
        .cards
        .iter()
        .map(|card| Card {
            subcards: card
                .subcards
                .iter()
                .filter(|subcard| !is_empty(subcard))
                .cloned()
                .collect(),
            ..card.clone()
        })
        .filter(|card| !card.has_blank_content() || !card.subcards.is_empty())
        .collect();
    EditorState { cards }
}

/// Counts what `prune_empty` would remove.
pub fn pruning_report(state: &EditorState) -> PruneReport {
    let pruned = prune_empty(state);
    PruneReport {
        removed_cards: state.cards.len() - pruned.cards.len(),
        removed_subcards: state.subcard_count() - pruned.subcard_count(),
    }
}
