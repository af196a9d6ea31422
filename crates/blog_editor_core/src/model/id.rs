//! Opaque identifiers for cards and subcards.
//!
//! # Responsibility
//! - Mint short, random identifiers for newly created cards/subcards.
//! - Carry imported identifiers verbatim, whatever their shape.
//!
//! # Invariants
//! - Generated ids are 12 lowercase hex chars (48 random bits).
//! - Generated ids never equal the `general` error sentinel.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const GENERATED_ID_LEN: usize = 12;

/// Sentinel `subcardId` carried by the global "nothing to submit" error.
pub const GENERAL_ERROR_ID: &str = "general";

/// Opaque identifier shared by cards and subcards.
///
/// Serialized as a bare string to match the export wire shape.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(String);

/// Card identifier.
pub type CardId = ContentId;
/// Subcard identifier.
pub type SubCardId = ContentId;

impl ContentId {
    /// Generates a fresh identifier from a random v4 UUID.
    pub fn generate() -> Self {
        let mut raw = Uuid::new_v4().simple().to_string();
        raw.truncate(GENERATED_ID_LEN);
        Self(raw)
    }

    /// Returns the identifier text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Identifier generator entry point used by the editor.
pub fn generate_id() -> ContentId {
    ContentId::generate()
}

impl Display for ContentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<String> for ContentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ContentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for ContentId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl PartialEq<str> for ContentId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ContentId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::{generate_id, ContentId, GENERAL_ERROR_ID, GENERATED_ID_LEN};
    use std::collections::HashSet;

    #[test]
    fn generated_ids_are_short_lowercase_hex() {
        let id = generate_id();
        assert_eq!(id.as_str().len(), GENERATED_ID_LEN);
        assert!(id
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        assert_ne!(id, GENERAL_ERROR_ID);
    }

    #[test]
    fn generated_ids_do_not_repeat_within_a_session() {
        let ids: HashSet<ContentId> = (0..2_000).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 2_000);
    }

    #[test]
    fn imported_ids_are_kept_verbatim() {
        let id = ContentId::from("k3j9x0abc");
        assert_eq!(id.to_string(), "k3j9x0abc");
        assert_eq!(
            serde_json::to_value(&id).expect("id should serialize"),
            serde_json::json!("k3j9x0abc")
        );
    }
}
