//! JSON import of saved drafts and exports.
//!
//! # Responsibility
//! - Decode a `{ "cards": [...] }` payload into an editor state.
//! - Refuse payloads whose ids would break uniqueness.
//!
//! # Invariants
//! - Under `IdPolicy::Keep`, every card id and every subcard id is unique
//!   in the imported state and never equals the `general` error sentinel.
//! - Decoding failures never produce a partial state.

use crate::model::card::{EditorState, ExportedState, IdPolicy};
use crate::model::id::{ContentId, GENERAL_ERROR_ID};
use log::{info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Import failures.
#[derive(Debug)]
pub enum ImportError {
    Parse(serde_json::Error),
    DuplicateId(String),
    ReservedId(String),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid editor document: {err}"),
            Self::DuplicateId(id) => write!(f, "duplicate id `{id}` in editor document"),
            Self::ReservedId(id) => write!(f, "id `{id}` is reserved and cannot be imported"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::DuplicateId(_) | Self::ReservedId(_) => None,
        }
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Parses a JSON document and rebuilds an editor state from it.
///
/// Duplicate or reserved ids are only an error when they are kept;
/// `Regenerate` replaces them anyway.
pub fn import_json(raw: &str, ids: IdPolicy) -> Result<EditorState, ImportError> {
    let export: ExportedState = serde_json::from_str(raw).map_err(|err| {
        warn!("event=import module=import status=error reason=parse");
        ImportError::from(err)
    })?;

    if ids == IdPolicy::Keep {
        check_unique_ids(&export)?;
    }

    let state = EditorState::from_export(export, ids);
    info!(
        "event=import module=import status=ok cards={} subcards={}",
        state.cards.len(),
        state.subcard_count()
    );
    Ok(state)
}

fn check_unique_ids(export: &ExportedState) -> Result<(), ImportError> {
    check_id_set(export.cards.iter().map(|card| &card.id))?;
    check_id_set(
        export
            .cards
            .iter()
            .flat_map(|card| &card.subcards)
            .map(|subcard| &subcard.id),
    )
}

fn check_id_set<'a>(ids: impl Iterator<Item = &'a ContentId>) -> Result<(), ImportError> {
    let mut seen = HashSet::new();
    for id in ids {
        if id == GENERAL_ERROR_ID {
            return Err(ImportError::ReservedId(id.to_string()));
        }
        if !seen.insert(id.as_str()) {
            return Err(ImportError::DuplicateId(id.to_string()));
        }
    }
    Ok(())
}
