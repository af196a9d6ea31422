//! Subcard validation engine.
//!
//! # Responsibility
//! - Decide whether a subcard is empty (scheduled for silent removal).
//! - Produce structured field-level errors for partially filled subcards.
//!
//! # Invariants
//! - Validation is pure; errors are never stored in `EditorState`.

pub mod report;
pub mod rules;
