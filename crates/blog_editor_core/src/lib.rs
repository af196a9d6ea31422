//! Core editing logic for the card-based blog editor.
//! This crate is the single source of truth for document invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod service;
pub mod validation;

pub use config::{ConfigError, EditorConfig};
#[cfg(feature = "file-logging")]
pub use logging::{init_logging, logging_status};
pub use logging::{default_log_level, LoggingError};
pub use model::card::{Card, CardPatch, EditorState, ExportedState, IdPolicy};
pub use model::id::{generate_id, CardId, ContentId, SubCardId, GENERAL_ERROR_ID};
pub use model::subcard::{
    content_type_catalog, fields, ContentTypeEntry, FieldValue, KindParseError, MoveDirection,
    RelativePosition, SubCard, SubCardData, SubCardKind, Zone,
};
pub use service::command::EditorCommand;
pub use service::image_upload::{resolve_image_url, ImageUploader, ImageUrl, UploadError};
pub use service::import::{import_json, ImportError};
pub use service::session::EditorSession;
pub use service::submission::{
    prune_empty, pruning_report, submit, PruneReport, SubmitError, SubmitOutcome,
};
pub use validation::report::{group_errors_by_subcard, ErrorGroup};
pub use validation::rules::{is_empty, validate, validate_state, ValidationError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
