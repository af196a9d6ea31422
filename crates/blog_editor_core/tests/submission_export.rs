use blog_editor_core::{
    fields, pruning_report, submit, CardPatch, EditorState, ExportedState, IdPolicy, SubCard,
    SubCardData, SubCardKind, Zone,
};

fn authored_state() -> EditorState {
    let state = EditorState::new();
    let first = state.cards[0].id.clone();
    let state = state
        .update_card(&first, &CardPatch::content("<p>Opening</p>"))
        .add_sub_card(
            &first,
            SubCard::new(SubCardKind::Quote, Zone::Bottom).with_data(
                SubCardData::new()
                    .with(fields::QUOTE, "Less is more.")
                    .with(fields::AUTHOR, "Mies"),
            ),
        )
        .add_sub_card(
            &first,
            SubCard::new(SubCardKind::Bigfact, Zone::Top)
                .with_data(SubCardData::new().with(fields::FACT, "42")),
        )
        .add_card();

    let second = state.cards[1].id.clone();
    state.add_sub_card(
        &second,
        SubCard::new(SubCardKind::Summary, Zone::Top).with_data(
            SubCardData::new()
                .with(fields::TITLE, "In short")
                .with(fields::POINTS, vec!["fast", "small"]),
        ),
    )
}

#[test]
fn empty_subcards_and_blank_cards_are_pruned_from_export() {
    let state = EditorState::new();
    let first = state.cards[0].id.clone();
    let state = state
        .update_card(&first, &CardPatch::content("<p>Hello</p>"))
        .add_sub_card(&first, SubCard::new(SubCardKind::Blurp, Zone::Top))
        .add_card();

    let report = pruning_report(&state);
    assert_eq!(report.removed_cards, 1);
    assert_eq!(report.removed_subcards, 1);

    let export = submit(&state).unwrap();
    assert_eq!(export.cards.len(), 1);
    assert_eq!(export.cards[0].id, first);
    assert!(export.cards[0].subcards.is_empty());
    assert_eq!(export.cards[0].content, "<p>Hello</p>");
}

#[test]
fn submitting_an_export_again_is_stable() {
    let export = submit(&authored_state()).unwrap();
    let again = submit(&EditorState::from(export.clone())).unwrap();
    assert_eq!(again, export);
}

#[test]
fn invalid_subcard_blocks_the_whole_submission() {
    let state = authored_state();
    let card_id = state.cards[1].id.clone();
    let broken = SubCard::new(SubCardKind::Alsoread, Zone::Bottom)
        .with_data(SubCardData::new().with(fields::URL, "ftp://example.com"));
    let state = state.add_sub_card(&card_id, broken.clone());

    let err = submit(&state).unwrap_err();
    assert!(!err.is_no_content());
    let fields: Vec<&str> = err.errors.iter().map(|error| error.field.as_str()).collect();
    assert_eq!(fields, vec!["title", "url"]);
    assert!(err.errors.iter().all(|error| error.subcard_id == broken.id));
}

#[test]
fn export_json_uses_camel_case_wire_keys() {
    let export = submit(&authored_state()).unwrap();
    let json = serde_json::to_value(&export).unwrap();

    let first = &json["cards"][0];
    assert_eq!(first["isDefault"], true);
    assert!(json["cards"][1].get("isDefault").is_none());
    assert_eq!(first["subcards"][0]["type"], "bigfact");
    assert_eq!(first["subcards"][0]["position"], "top");
    assert_eq!(first["subcards"][1]["type"], "quote");
    assert_eq!(first["subcards"][1]["data"]["author"], "Mies");
    assert_eq!(
        json["cards"][1]["subcards"][0]["data"]["points"],
        serde_json::json!(["fast", "small"])
    );
}

#[test]
fn reimport_with_fresh_ids_keeps_order_and_data() {
    let export = submit(&authored_state()).unwrap();
    let raw = serde_json::to_string(&export).unwrap();
    let decoded: ExportedState = serde_json::from_str(&raw).unwrap();
    assert_eq!(decoded, export);

    let imported = EditorState::from_export(decoded, IdPolicy::Regenerate);
    assert_eq!(imported.cards.len(), export.cards.len());
    for (fresh, original) in imported.cards.iter().zip(&export.cards) {
        assert_ne!(fresh.id, original.id);
        assert_eq!(fresh.content, original.content);
        assert_eq!(fresh.is_default, original.is_default);
        let kinds: Vec<SubCardKind> = fresh.subcards.iter().map(|sub| sub.kind).collect();
        let expected: Vec<SubCardKind> = original.subcards.iter().map(|sub| sub.kind).collect();
        assert_eq!(kinds, expected);
        for (fresh_sub, original_sub) in fresh.subcards.iter().zip(&original.subcards) {
            assert_ne!(fresh_sub.id, original_sub.id);
            assert_eq!(fresh_sub.data, original_sub.data);
        }
    }
}

#[test]
fn import_regroups_zones_and_marks_a_default_card() {
    let raw = r#"{
        "cards": [
            {
                "id": "c1",
                "content": "<p>Body</p>",
                "subcards": [
                    { "id": "s1", "type": "quote", "position": "bottom", "data": { "quote": "q", "author": "a" } },
                    { "id": "s2", "type": "bigfact", "position": "top", "data": { "fact": "1" } }
                ]
            }
        ]
    }"#;
    let export: ExportedState = serde_json::from_str(raw).unwrap();
    let state = EditorState::from_export(export, IdPolicy::Keep);

    let card = &state.cards[0];
    assert!(card.is_default);
    assert_eq!(card.id, "c1");
    let order: Vec<&str> = card.subcards.iter().map(|sub| sub.id.as_str()).collect();
    assert_eq!(order, vec!["s2", "s1"]);
}

#[test]
fn importing_an_empty_export_starts_fresh() {
    let state = EditorState::from_export(ExportedState { cards: Vec::new() }, IdPolicy::Keep);
    assert_eq!(state.cards.len(), 1);
    assert!(state.cards[0].is_default);
}
