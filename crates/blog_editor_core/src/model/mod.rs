//! Editor domain model.
//!
//! # Responsibility
//! - Define the card/subcard records shared by the state machine,
//!   validation and export.
//! - Keep the export wire shape (`{ cards: Card[] }`) in one place.
//!
//! # Invariants
//! - Every card and subcard is identified by an opaque `ContentId`.
//! - Subcard ids are unique across the whole editor state.

pub mod card;
pub mod id;
pub mod subcard;
