//! Subcard domain model.
//!
//! # Responsibility
//! - Define the closed set of subcard kinds and their wire tags.
//! - Hold per-subcard field data with default-returning typed readers.
//!
//! # Invariants
//! - `kind` never changes after creation.
//! - `position` (zone) is fixed at creation; no operation reassigns it.
//! - Missing fields read as type defaults (`""`, `[]`, `false`).

use crate::model::id::{ContentId, SubCardId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Field names used by the built-in subcard forms.
pub mod fields {
    pub const CONTENT: &str = "content";
    pub const TITLE: &str = "title";
    pub const ATTRIBUTE: &str = "attribute";
    pub const ACTION_URL: &str = "actionUrl";
    pub const IS_EXTERNAL: &str = "isExternal";
    pub const NO_FOLLOW: &str = "noFollow";
    pub const FACT: &str = "fact";
    pub const DESCRIPTION: &str = "description";
    pub const QUESTION: &str = "question";
    pub const ANSWER: &str = "answer";
    pub const POINTS: &str = "points";
    pub const URL: &str = "url";
    pub const ALT: &str = "alt";
    pub const CAPTION: &str = "caption";
    pub const CREDIT: &str = "credit";
    pub const QUOTE: &str = "quote";
    pub const AUTHOR: &str = "author";
    pub const SOURCE: &str = "source";
    pub const EMBED_CODE: &str = "embedCode";
    pub const EMBED_TYPE: &str = "type";
    pub const HEADERS: &str = "headers";
    pub const ROWS: &str = "rows";
}

/// Closed set of subcard content types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubCardKind {
    Text,
    Blockquote,
    Cta,
    Bigfact,
    Blurp,
    Question,
    Qa,
    Summary,
    Image,
    Alsoread,
    Quote,
    Embed,
    Table,
}

impl SubCardKind {
    /// Every kind, in declaration order.
    pub const ALL: [SubCardKind; 13] = [
        Self::Text,
        Self::Blockquote,
        Self::Cta,
        Self::Bigfact,
        Self::Blurp,
        Self::Question,
        Self::Qa,
        Self::Summary,
        Self::Image,
        Self::Alsoread,
        Self::Quote,
        Self::Embed,
        Self::Table,
    ];

    /// Stable wire tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Blockquote => "blockquote",
            Self::Cta => "cta",
            Self::Bigfact => "bigfact",
            Self::Blurp => "blurp",
            Self::Question => "question",
            Self::Qa => "qa",
            Self::Summary => "summary",
            Self::Image => "image",
            Self::Alsoread => "alsoread",
            Self::Quote => "quote",
            Self::Embed => "embed",
            Self::Table => "table",
        }
    }

    /// Human-readable label used in grouped error lists.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Blockquote => "Blockquote",
            Self::Cta => "Call to Action",
            Self::Bigfact => "Big Fact",
            Self::Blurp => "Blurp",
            Self::Question => "Question",
            Self::Qa => "Q&A",
            Self::Summary => "Summary",
            Self::Image => "Image",
            Self::Alsoread => "Also Read",
            Self::Quote => "Quote",
            Self::Embed => "Embed",
            Self::Table => "Table",
        }
    }

    /// Parses a wire tag. Surrounding whitespace is ignored; case is not.
    pub fn parse(value: &str) -> Result<Self, KindParseError> {
        let normalized = value.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| KindParseError(normalized.to_string()))
    }
}

impl Display for SubCardKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown subcard type tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindParseError(pub String);

impl Display for KindParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown content type: `{}`", self.0)
    }
}

impl Error for KindParseError {}

/// One entry of the content-type picker menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContentTypeEntry {
    #[serde(rename = "id")]
    pub kind: SubCardKind,
    #[serde(rename = "name")]
    pub label: &'static str,
    pub icon: &'static str,
}

const CONTENT_TYPE_CATALOG: &[ContentTypeEntry] = &[
    ContentTypeEntry { kind: SubCardKind::Blockquote, label: "Blockquote", icon: "Quote" },
    ContentTypeEntry { kind: SubCardKind::Cta, label: "CTA", icon: "ExternalLink" },
    ContentTypeEntry { kind: SubCardKind::Bigfact, label: "Big Fact", icon: "TrendingUp" },
    ContentTypeEntry { kind: SubCardKind::Blurp, label: "Blurp", icon: "MessageCircle" },
    ContentTypeEntry { kind: SubCardKind::Question, label: "Question", icon: "HelpCircle" },
    ContentTypeEntry { kind: SubCardKind::Qa, label: "Q & A", icon: "MessageSquare" },
    ContentTypeEntry { kind: SubCardKind::Summary, label: "Summary", icon: "List" },
    ContentTypeEntry { kind: SubCardKind::Image, label: "Image", icon: "Image" },
    ContentTypeEntry { kind: SubCardKind::Alsoread, label: "Also Read", icon: "BookOpen" },
    ContentTypeEntry { kind: SubCardKind::Quote, label: "Quote", icon: "Quote" },
    ContentTypeEntry { kind: SubCardKind::Embed, label: "Embed", icon: "Code" },
    ContentTypeEntry { kind: SubCardKind::Table, label: "Table", icon: "Table" },
];

/// Returns the picker menu entries in display order.
///
/// `text` is accepted as data but is not offered by the picker.
pub fn content_type_catalog() -> &'static [ContentTypeEntry] {
    CONTENT_TYPE_CATALOG
}

/// Which side of the card body a subcard renders on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Top,
    Bottom,
}

/// Insertion side relative to an anchor subcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelativePosition {
    Above,
    Below,
}

/// Direction for swapping a subcard with its zone neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

/// One field value inside subcard data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Flag(bool),
    /// Kept as parsed so integers re-export without a fraction.
    Number(serde_json::Number),
    Text(String),
    List(Vec<String>),
    Grid(Vec<Vec<String>>),
}

impl FieldValue {
    /// Whether this value makes its subcard count as filled in.
    ///
    /// Booleans never count. A grid counts as soon as it has a row, even a
    /// blank one.
    pub fn contributes_content(&self) -> bool {
        match self {
            Self::Null | Self::Flag(_) => false,
            Self::Number(value) => value.as_f64().map_or(true, |number| number != 0.0),
            Self::Text(value) => !value.trim().is_empty(),
            Self::List(items) => items.iter().any(|item| !item.trim().is_empty()),
            Self::Grid(rows) => !rows.is_empty(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

/// Non-finite values have no JSON form and become `Null`.
impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value).map_or(Self::Null, Self::Number)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(value: Vec<&str>) -> Self {
        Self::List(value.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<Vec<String>>> for FieldValue {
    fn from(value: Vec<Vec<String>>) -> Self {
        Self::Grid(value)
    }
}

/// Field map carried by one subcard.
///
/// Updates replace the whole map; there is no per-key patch path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubCardData(BTreeMap<String, FieldValue>);

impl SubCardData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.get(field)
    }

    /// Text field, or `""` when absent or not text.
    pub fn text(&self, field: &str) -> &str {
        match self.0.get(field) {
            Some(FieldValue::Text(value)) => value.as_str(),
            _ => "",
        }
    }

    /// String list field, or an empty slice.
    pub fn list(&self, field: &str) -> &[String] {
        match self.0.get(field) {
            Some(FieldValue::List(items)) => items.as_slice(),
            _ => &[],
        }
    }

    /// Tabular field, or an empty slice. An empty JSON array reads as an
    /// empty grid too.
    pub fn grid(&self, field: &str) -> &[Vec<String>] {
        match self.0.get(field) {
            Some(FieldValue::Grid(rows)) => rows.as_slice(),
            _ => &[],
        }
    }

    /// Number of rows in a tabular field, counting a `[]` literal as zero.
    pub fn row_count(&self, field: &str) -> usize {
        match self.0.get(field) {
            Some(FieldValue::Grid(rows)) => rows.len(),
            Some(FieldValue::List(items)) => items.len(),
            _ => 0,
        }
    }

    /// Boolean field, or `false`.
    pub fn flag(&self, field: &str) -> bool {
        matches!(self.0.get(field), Some(FieldValue::Flag(true)))
    }

    pub fn values(&self) -> impl Iterator<Item = &FieldValue> {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Typed content block attached to a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubCard {
    pub id: SubCardId,
    /// Serialized as `type` to match the export schema.
    #[serde(rename = "type")]
    pub kind: SubCardKind,
    #[serde(default)]
    pub data: SubCardData,
    pub position: Zone,
}

impl SubCard {
    /// Creates an empty subcard with a generated id, as the picker does.
    pub fn new(kind: SubCardKind, position: Zone) -> Self {
        Self {
            id: ContentId::generate(),
            kind,
            data: SubCardData::new(),
            position,
        }
    }

    /// Replaces the initial data mapping.
    pub fn with_data(mut self, data: SubCardData) -> Self {
        self.data = data;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{
        content_type_catalog, fields, FieldValue, SubCard, SubCardData, SubCardKind, Zone,
    };

    #[test]
    fn kind_tags_round_trip_through_parse() {
        for kind in SubCardKind::ALL {
            assert_eq!(SubCardKind::parse(kind.as_str()), Ok(kind));
        }
        assert!(SubCardKind::parse("carousel").is_err());
        assert!(SubCardKind::parse("CTA").is_err());
    }

    #[test]
    fn catalog_skips_text_and_starts_with_blockquote() {
        let catalog = content_type_catalog();
        assert_eq!(catalog.len(), 12);
        assert_eq!(catalog[0].kind, SubCardKind::Blockquote);
        assert!(catalog.iter().all(|entry| entry.kind != SubCardKind::Text));
    }

    #[test]
    fn readers_fall_back_to_defaults() {
        let data = SubCardData::new().with(fields::TITLE, 3.0);
        assert_eq!(data.text(fields::TITLE), "");
        assert!(data.list(fields::POINTS).is_empty());
        assert!(data.grid(fields::ROWS).is_empty());
        assert!(!data.flag(fields::IS_EXTERNAL));
    }

    #[test]
    fn field_values_decode_by_shape() {
        let data: SubCardData = serde_json::from_value(serde_json::json!({
            "headers": ["A", "B"],
            "rows": [["1", "2"]],
            "isExternal": true,
            "title": "T",
            "empty": [],
            "missing": null
        }))
        .expect("data should decode");

        assert_eq!(data.list(fields::HEADERS), ["A".to_string(), "B".to_string()]);
        assert_eq!(data.grid(fields::ROWS).len(), 1);
        assert!(data.flag(fields::IS_EXTERNAL));
        assert_eq!(data.get("empty"), Some(&FieldValue::List(Vec::new())));
        assert_eq!(data.get("missing"), Some(&FieldValue::Null));
    }

    #[test]
    fn integer_values_keep_their_json_form() {
        let data: SubCardData =
            serde_json::from_str(r#"{"views":5,"ratio":0.5,"zero":0}"#).expect("data should decode");
        let json = serde_json::to_string(&data).expect("data should encode");
        assert_eq!(json, r#"{"ratio":0.5,"views":5,"zero":0}"#);
        assert!(data.get("views").is_some_and(FieldValue::contributes_content));
        assert!(!data.get("zero").is_some_and(FieldValue::contributes_content));
        assert_eq!(FieldValue::from(f64::NAN), FieldValue::Null);
    }

    #[test]
    fn subcard_serializes_kind_as_type() {
        let subcard = SubCard::new(SubCardKind::Alsoread, Zone::Bottom);
        let json = serde_json::to_value(&subcard).expect("subcard should serialize");
        assert_eq!(json["type"], "alsoread");
        assert_eq!(json["position"], "bottom");
        assert_eq!(json["data"], serde_json::json!({}));
    }
}
