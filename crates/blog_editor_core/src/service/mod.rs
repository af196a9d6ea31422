//! Editor use-case services.
//!
//! # Responsibility
//! - Apply state-machine mutations and name them as commands.
//! - Orchestrate validation, pruning and export at submit time.
//! - Keep presentation/binding layers decoupled from the model internals.

pub mod card_ops;
pub mod command;
pub mod image_upload;
pub mod import;
pub mod session;
pub mod submission;
