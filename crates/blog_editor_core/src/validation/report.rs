//! Grouped view of validation errors for the error panel.

use crate::model::id::SubCardId;
use crate::model::subcard::SubCardKind;
use crate::validation::rules::ValidationError;
use serde::Serialize;

/// All errors raised by one subcard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorGroup {
    /// Scroll/highlight target for the presentation layer.
    pub subcard_id: SubCardId,
    pub subcard_type: String,
    /// Human label, e.g. `Call to Action`.
    pub label: String,
    pub errors: Vec<ValidationError>,
}

/// Groups errors by subcard, keeping first-seen order.
pub fn group_errors_by_subcard(errors: &[ValidationError]) -> Vec<ErrorGroup> {
    let mut groups: Vec<ErrorGroup> = Vec::new();
    for error in errors {
        match groups
            .iter_mut()
            .find(|group| group.subcard_id == error.subcard_id)
        {
            Some(group) => group.errors.push(error.clone()),
            None => groups.push(ErrorGroup {
                subcard_id: error.subcard_id.clone(),
                subcard_type: error.subcard_type.clone(),
                label: type_label(error.subcard_type.as_str()),
                errors: vec![error.clone()],
            }),
        }
    }
    groups
}

fn type_label(subcard_type: &str) -> String {
    SubCardKind::parse(subcard_type)
        .map(|kind| kind.display_name().to_string())
        .unwrap_or_else(|_| subcard_type.to_string())
}

#[cfg(test)]
mod tests {
    use super::group_errors_by_subcard;
    use crate::model::subcard::{fields, SubCard, SubCardData, SubCardKind, Zone};
    use crate::validation::rules::{validate, ValidationError};

    #[test]
    fn groups_keep_first_seen_order_and_labels() {
        let qa = SubCard::new(SubCardKind::Qa, Zone::Top)
            .with_data(SubCardData::new().with(fields::DESCRIPTION, "x"));
        let cta = SubCard::new(SubCardKind::Cta, Zone::Bottom)
            .with_data(SubCardData::new().with(fields::TITLE, "Go"));

        let mut errors = validate(&cta);
        errors.extend(validate(&qa));
        errors.push(ValidationError::no_content());

        let groups = group_errors_by_subcard(&errors);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].subcard_id, cta.id);
        assert_eq!(groups[0].label, "Call to Action");
        assert_eq!(groups[1].label, "Q&A");
        assert_eq!(groups[1].errors.len(), 2);
        assert_eq!(groups[2].label, "general");
    }
}
