//! Browser-facing editor API.
//!
//! # Responsibility
//! - Expose one stateful `BlogEditor` handle to JavaScript.
//! - Exchange documents, commands and outcomes as JSON strings.
//!
//! # Invariants
//! - Exported functions must not panic across the wasm boundary.
//! - Plain-string results use `""` for success and a message for failure.
//! - Structured results are JSON; the schema matches the core serde types.

use blog_editor_core::{
    content_type_catalog, core_version as core_version_inner, generate_id, import_json,
    CardPatch, EditorCommand, EditorConfig, EditorSession, IdPolicy, RelativePosition, SubCard,
    SubCardKind, Zone,
};
use log::warn;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Result envelope for calls that create something.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    pub ok: bool,
    /// Id of the created card or subcard.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: String) -> Self {
        Self {
            ok: true,
            id: Some(id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }

    fn to_json(&self) -> String {
        to_json(self)
    }
}

/// Stateful editor handle owned by the page.
#[wasm_bindgen]
pub struct BlogEditor {
    session: EditorSession,
}

#[wasm_bindgen]
impl BlogEditor {
    /// Creates an editor with one empty default card.
    ///
    /// An invalid `config_json` falls back to defaults; call
    /// `validateConfig` first to surface the problem.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> BlogEditor {
        let config = EditorConfig::from_json_str(config_json).unwrap_or_else(|err| {
            warn!("event=editor_new module=wasm status=fallback reason={err}");
            EditorConfig::default()
        });
        BlogEditor {
            session: EditorSession::new(config),
        }
    }

    /// Current state as `{ "cards": [...] }`.
    #[wasm_bindgen(js_name = stateJson)]
    pub fn state_json(&self) -> String {
        to_json(self.session.state())
    }

    /// Replaces the document with a saved draft or export.
    ///
    /// Returns `""` on success. The current document is kept on failure.
    #[wasm_bindgen(js_name = loadJson)]
    pub fn load_json(&mut self, raw: &str, regenerate_ids: bool) -> String {
        let ids = if regenerate_ids {
            IdPolicy::Regenerate
        } else {
            IdPolicy::Keep
        };
        match import_json(raw, ids) {
            Ok(state) => {
                self.session = EditorSession::with_state(state, self.session.config().clone());
                String::new()
            }
            Err(err) => err.to_string(),
        }
    }

    /// Applies one JSON-encoded `EditorCommand`.
    ///
    /// Returns `""` on success, including stale-id no-ops.
    #[wasm_bindgen(js_name = applyCommand)]
    pub fn apply_command(&mut self, command_json: &str) -> String {
        match serde_json::from_str::<EditorCommand>(command_json) {
            Ok(command) => {
                self.session.apply(&command);
                String::new()
            }
            Err(err) => format!("invalid command: {err}"),
        }
    }

    /// Appends a card and returns its id.
    #[wasm_bindgen(js_name = addCard)]
    pub fn add_card(&mut self) -> String {
        self.session.apply(&EditorCommand::AddCard);
        self.session
            .state()
            .cards
            .last()
            .map(|card| card.id.to_string())
            .unwrap_or_default()
    }

    #[wasm_bindgen(js_name = updateCardContent)]
    pub fn update_card_content(&mut self, card_id: &str, content: &str) {
        self.session.apply(&EditorCommand::UpdateCard {
            card_id: card_id.into(),
            patch: CardPatch::content(content),
        });
    }

    /// Whether the delete control should be shown for `card_id`.
    #[wasm_bindgen(js_name = canDeleteCard)]
    pub fn can_delete_card(&self, card_id: &str) -> bool {
        self.session.can_delete_card(&card_id.into())
    }

    /// Adds an empty subcard of `kind` to a zone (`top` or `bottom`).
    ///
    /// Returns an `ActionResponse` JSON envelope.
    #[wasm_bindgen(js_name = addSubCard)]
    pub fn add_sub_card(&mut self, card_id: &str, kind: &str, zone: &str) -> String {
        let subcard = match new_subcard(kind, zone) {
            Ok(subcard) => subcard,
            Err(message) => return ActionResponse::failure(message).to_json(),
        };
        let subcard_id = subcard.id.clone();
        self.session.apply(&EditorCommand::AddSubCard {
            card_id: card_id.into(),
            subcard,
        });
        self.created_subcard_response(subcard_id.as_str())
    }

    /// Inserts an empty subcard `above` or `below` an anchor subcard.
    ///
    /// Returns an `ActionResponse` JSON envelope.
    #[wasm_bindgen(js_name = insertSubCard)]
    pub fn insert_sub_card(
        &mut self,
        card_id: &str,
        anchor_id: &str,
        kind: &str,
        relative: &str,
    ) -> String {
        let relative = match relative.trim() {
            "above" => RelativePosition::Above,
            "below" => RelativePosition::Below,
            other => {
                return ActionResponse::failure(format!("unknown relative position `{other}`"))
                    .to_json()
            }
        };
        let zone = match self
            .session
            .state()
            .card(&card_id.into())
            .and_then(|card| card.subcard(&anchor_id.into()))
        {
            Some(anchor) => anchor.position,
            None => return ActionResponse::failure("anchor subcard not found").to_json(),
        };
        let subcard = match SubCardKind::parse(kind) {
            Ok(kind) => SubCard::new(kind, zone),
            Err(err) => return ActionResponse::failure(err.to_string()).to_json(),
        };
        let subcard_id = subcard.id.clone();
        self.session.apply(&EditorCommand::InsertSubCard {
            card_id: card_id.into(),
            anchor_id: anchor_id.into(),
            subcard,
            relative,
        });
        self.created_subcard_response(subcard_id.as_str())
    }

    /// Runs submission; returns a `SubmitOutcome` JSON object.
    pub fn submit(&mut self, confirmed: bool) -> String {
        to_json(&self.session.submit(confirmed))
    }

    /// Errors from the last failed submit, as a JSON array.
    #[wasm_bindgen(js_name = errorsJson)]
    pub fn errors_json(&self) -> String {
        to_json(&self.session.errors())
    }

    /// Errors grouped per subcard, as a JSON array.
    #[wasm_bindgen(js_name = errorGroupsJson)]
    pub fn error_groups_json(&self) -> String {
        to_json(&self.session.error_groups())
    }

    #[wasm_bindgen(js_name = dismissErrors)]
    pub fn dismiss_errors(&mut self) {
        self.session.dismiss_errors();
    }
}

impl BlogEditor {
    fn created_subcard_response(&self, subcard_id: &str) -> String {
        let response = match self.session.state().find_subcard(&subcard_id.into()) {
            Some(_) => ActionResponse::success("subcard added", subcard_id.to_string()),
            None => ActionResponse::failure("card not found"),
        };
        response.to_json()
    }
}

/// Checks a config object; `""` when valid.
#[wasm_bindgen(js_name = validateConfig)]
pub fn validate_config(config_json: &str) -> String {
    match EditorConfig::from_json_str(config_json) {
        Ok(_) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Content-type picker entries as JSON.
#[wasm_bindgen(js_name = contentTypes)]
pub fn content_types() -> String {
    to_json(&content_type_catalog())
}

#[wasm_bindgen(js_name = generateId)]
pub fn generate_id_js() -> String {
    generate_id().to_string()
}

#[wasm_bindgen(js_name = coreVersion)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

fn new_subcard(kind: &str, zone: &str) -> Result<SubCard, String> {
    let kind = SubCardKind::parse(kind).map_err(|err| err.to_string())?;
    let zone = match zone.trim() {
        "top" => Zone::Top,
        "bottom" => Zone::Bottom,
        other => return Err(format!("unknown zone `{other}`")),
    };
    Ok(SubCard::new(kind, zone))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| {
        warn!("event=serialize module=wasm status=error reason={err}");
        String::from("null")
    })
}
