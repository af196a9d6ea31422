//! Per-type subcard emptiness and required-field rules.
//!
//! # Invariants
//! - An empty subcard always validates clean; it is pruned at submit.
//! - Every failing rule yields exactly one error with a stable `field` key.
//! - Rules never mutate the subcard.

use crate::model::card::EditorState;
use crate::model::id::{SubCardId, GENERAL_ERROR_ID};
use crate::model::subcard::{fields, FieldValue, SubCard, SubCardKind};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

static HTTP_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^https?://.+").expect("valid http url regex"));

const NO_CONTENT_MESSAGE: &str = "Please add some content before submitting.";

/// Field-level validation failure for one subcard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub subcard_id: SubCardId,
    /// Wire tag of the subcard type, or `general` for the global error.
    pub subcard_type: String,
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn for_subcard(subcard: &SubCard, field: &str, message: &str) -> Self {
        Self {
            subcard_id: subcard.id.clone(),
            subcard_type: subcard.kind.as_str().to_string(),
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    /// Synthetic error raised when nothing is left to submit.
    pub fn no_content() -> Self {
        Self {
            subcard_id: SubCardId::from(GENERAL_ERROR_ID),
            subcard_type: GENERAL_ERROR_ID.to_string(),
            field: fields::CONTENT.to_string(),
            message: NO_CONTENT_MESSAGE.to_string(),
        }
    }

    /// Whether this is the global "nothing to submit" error.
    pub fn is_general(&self) -> bool {
        self.subcard_id == GENERAL_ERROR_ID && self.subcard_type == GENERAL_ERROR_ID
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} `{}`: {}",
            self.subcard_type, self.subcard_id, self.field, self.message
        )
    }
}

/// Returns whether no field of the subcard carries content.
///
/// Booleans never count as content; lists count only with a non-blank item.
pub fn is_empty(subcard: &SubCard) -> bool {
    !subcard.data.values().any(FieldValue::contributes_content)
}

/// Validates one subcard against its type's rules.
pub fn validate(subcard: &SubCard) -> Vec<ValidationError> {
    if is_empty(subcard) {
        return Vec::new();
    }

    let mut check = RuleCheck::new(subcard);
    match subcard.kind {
        SubCardKind::Text => check.require_text(fields::CONTENT, "Content is required"),
        SubCardKind::Blockquote => check.require_text(fields::TITLE, "Quote text is required"),
        SubCardKind::Cta => {
            check.require_text(fields::TITLE, "Title is required");
            check.require_http_url(
                fields::ACTION_URL,
                "Action URL is required",
                "Please enter a valid URL (must start with http:// or https://)",
            );
        }
        SubCardKind::Bigfact => check.require_text(fields::FACT, "Fact is required"),
        SubCardKind::Blurp => check.require_text(fields::CONTENT, "Content is required"),
        SubCardKind::Question => check.require_text(fields::QUESTION, "Question is required"),
        SubCardKind::Qa => {
            check.require_text(fields::QUESTION, "Question is required");
            check.require_text(fields::ANSWER, "Answer is required");
        }
        SubCardKind::Summary => {
            check.require_text(fields::TITLE, "Title is required");
            let points = subcard.data.list(fields::POINTS);
            if points.is_empty() {
                check.fail(fields::POINTS, "At least one point is required");
            } else if points.iter().any(|point| point.trim().is_empty()) {
                check.fail(fields::POINTS, "All points must have content");
            }
        }
        SubCardKind::Image => {
            check.require_text(fields::URL, "Image URL is required");
            check.require_text(fields::ALT, "Alt text is required for accessibility");
        }
        SubCardKind::Alsoread => {
            check.require_text(fields::TITLE, "Title is required");
            check.require_http_url(fields::URL, "URL is required", "Please enter a valid URL");
        }
        SubCardKind::Quote => {
            check.require_text(fields::QUOTE, "Quote text is required");
            check.require_text(fields::AUTHOR, "Author is required");
        }
        SubCardKind::Embed => check.require_text(fields::EMBED_CODE, "Embed code is required"),
        SubCardKind::Table => {
            if subcard.data.list(fields::HEADERS).is_empty() {
                check.fail(fields::HEADERS, "At least one header is required");
            }
            if subcard.data.row_count(fields::ROWS) == 0 {
                check.fail(fields::ROWS, "At least one row is required");
            }
        }
    }
    check.errors
}

/// Validates every subcard of every card, in document order.
pub fn validate_state(state: &EditorState) -> Vec<ValidationError> {
    state
        .cards
        .iter()
        .flat_map(|card| card.subcards.iter())
        .flat_map(validate)
        .collect()
}

struct RuleCheck<'a> {
    subcard: &'a SubCard,
    errors: Vec<ValidationError>,
}

impl<'a> RuleCheck<'a> {
    fn new(subcard: &'a SubCard) -> Self {
        Self {
            subcard,
            errors: Vec::new(),
        }
    }

    fn fail(&mut self, field: &str, message: &str) {
        self.errors
            .push(ValidationError::for_subcard(self.subcard, field, message));
    }

    fn require_text(&mut self, field: &str, message: &str) {
        if self.subcard.data.text(field).trim().is_empty() {
            self.fail(field, message);
        }
    }

    fn require_http_url(&mut self, field: &str, missing: &str, malformed: &str) {
        let value = self.subcard.data.text(field);
        if value.trim().is_empty() {
            self.fail(field, missing);
        } else if !HTTP_URL_RE.is_match(value) {
            self.fail(field, malformed);
        }
    }
}
