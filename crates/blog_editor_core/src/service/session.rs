//! Single-writer editor session.
//!
//! # Responsibility
//! - Own the current `EditorState` snapshot and apply commands one at a time.
//! - Hold the ephemeral validation-error list between submit attempts.
//! - Drive the confirm-then-commit submission flow.
//!
//! # Invariants
//! - Every state change goes through `apply` or a successful `submit`.
//! - Errors are replaced on each failed submit and cleared on success or
//!   dismissal.
//! - A successful submit commits the pruned state as the new snapshot.

use crate::config::EditorConfig;
use crate::model::card::{EditorState, ExportedState};
use crate::model::id::{CardId, SubCardId};
use crate::model::subcard::{fields, SubCardKind};
use crate::service::command::EditorCommand;
use crate::service::image_upload::{resolve_image_url, ImageUploader, ImageUrl};
use crate::service::submission::{pruning_report, submit, SubmitOutcome};
use crate::validation::report::{group_errors_by_subcard, ErrorGroup};
use crate::validation::rules::ValidationError;
use log::debug;

/// Editor session facade used by presentation layers.
#[derive(Debug, Clone)]
pub struct EditorSession {
    state: EditorState,
    errors: Vec<ValidationError>,
    config: EditorConfig,
}

impl EditorSession {
    /// Starts a session on a fresh state.
    pub fn new(config: EditorConfig) -> Self {
        Self::with_state(EditorState::new(), config)
    }

    /// Starts a session on an existing state (e.g. a re-imported export).
    pub fn with_state(state: EditorState, config: EditorConfig) -> Self {
        Self {
            state,
            errors: Vec::new(),
            config,
        }
    }

    /// Current snapshot.
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Applies one command and returns the new snapshot.
    pub fn apply(&mut self, command: &EditorCommand) -> &EditorState {
        self.state = command.apply(&self.state);
        &self.state
    }

    /// Errors from the last failed submit.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Errors grouped per subcard for the error panel.
    pub fn error_groups(&self) -> Vec<ErrorGroup> {
        group_errors_by_subcard(&self.errors)
    }

    /// Errors raised by one subcard, for inline field messages.
    pub fn errors_for(&self, subcard_id: &SubCardId) -> Vec<&ValidationError> {
        self.errors
            .iter()
            .filter(|error| &error.subcard_id == subcard_id)
            .collect()
    }

    pub fn dismiss_errors(&mut self) {
        self.errors.clear();
    }

    /// Whether the delete control should be offered for this card.
    ///
    /// The default card is protected here; `DeleteCard` itself removes any
    /// card it is given.
    pub fn can_delete_card(&self, card_id: &CardId) -> bool {
        self.state
            .card(card_id)
            .map(|card| !card.is_default)
            .unwrap_or(false)
    }

    /// Runs the submission pipeline.
    ///
    /// With `confirmPruning` on, a valid state that would lose empty content
    /// returns `NeedsConfirmation` until called again with `confirmed`.
    pub fn submit(&mut self, confirmed: bool) -> SubmitOutcome {
        let export = match submit(&self.state) {
            Ok(export) => export,
            Err(err) => {
                self.errors = err.errors.clone();
                return SubmitOutcome::ValidationFailed(err.errors);
            }
        };

        let report = pruning_report(&self.state);
        if self.config.confirm_pruning && !confirmed && !report.is_noop() {
            debug!(
                "event=submit_confirm module=session removed_cards={} removed_subcards={}",
                report.removed_cards, report.removed_subcards
            );
            self.errors.clear();
            return SubmitOutcome::NeedsConfirmation(report);
        }

        self.commit(&export);
        SubmitOutcome::Success(export)
    }

    /// Uploads an image and writes its URL into an image subcard.
    ///
    /// Other data fields are kept; unknown ids or non-image subcards leave
    /// the state unchanged.
    pub fn attach_image(
        &mut self,
        card_id: &CardId,
        subcard_id: &SubCardId,
        uploader: &dyn ImageUploader,
        bytes: &[u8],
        mime_type: &str,
    ) -> Option<ImageUrl> {
        let data = self
            .state
            .card(card_id)
            .and_then(|card| card.subcard(subcard_id))
            .filter(|subcard| subcard.kind == SubCardKind::Image)
            .map(|subcard| subcard.data.clone())?;

        let url = resolve_image_url(uploader, bytes, mime_type);
        let command = EditorCommand::UpdateSubCard {
            card_id: card_id.clone(),
            subcard_id: subcard_id.clone(),
            data: data.with(fields::URL, url.as_str()),
        };
        self.apply(&command);
        Some(url)
    }

    fn commit(&mut self, export: &ExportedState) {
        self.state = EditorState {
            cards: export.cards.clone(),
        };
        self.errors.clear();
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}
