//! End-to-end behaviour of the collection card as a host drives it.

use raccolta_core::{
    CardError, CollectionCard, EntityState, Node, SensorSlot, StateSnapshot, VisualTree,
    NO_SENSORS_TEXT,
};
use serde_json::{Value, json};

fn next_only(days_until: i64) -> StateSnapshot {
    serde_json::from_value(json!({
        "sensor.raccolta_differenziata_next": {
            "state": "Organic",
            "attributes": {
                "days_until": days_until,
                "date": "2024-05-06",
                "weekday": "Monday",
            },
        },
        "sun.sun": { "state": "above_horizon", "attributes": {} },
    }))
    .unwrap()
}

fn configured(raw: Value) -> CollectionCard {
    let mut card = CollectionCard::new();
    card.set_config(&raw).unwrap();
    card
}

fn badges(tree: &VisualTree) -> Vec<String> {
    tree.rows().map(|row| row.days_until_text.clone()).collect()
}

#[test]
fn should_render_italian_card_for_single_sensor() {
    let mut card = configured(json!({}));
    let tree = card.render(Some(&next_only(0)), Some("it"));

    assert_eq!(tree.header(), Some("Prossimo conferimento"));
    let rows: Vec<_> = tree.rows().collect();
    assert_eq!(rows.len(), 1);
    let row = rows.first().unwrap();
    assert_eq!(row.label, "Organic");
    assert_eq!(row.days_until_text, "oggi");
    assert_eq!(row.subtitle(), "Monday, 6/5/2024");
}

#[test]
fn should_render_day_count_in_english() {
    let mut card = configured(json!({}));
    let tree = card.render(Some(&next_only(5)), Some("en"));
    assert_eq!(badges(&tree), ["in 5 days"]);
}

#[test]
fn should_map_every_day_offset() {
    let mut card = configured(json!({}));
    for (days, expected) in [
        (0, "today"),
        (1, "tomorrow"),
        (2, "in 2 days"),
        (-1, "in -1 days"),
        (-7, "in -7 days"),
        (30, "in 30 days"),
    ] {
        let tree = card.render(Some(&next_only(days)), Some("en"));
        assert_eq!(badges(&tree), [expected], "days_until = {days}");
    }
}

#[test]
fn should_show_single_placeholder_without_sensors() {
    let mut card = configured(json!({ "show_count": 3 }));
    let snapshot: StateSnapshot =
        serde_json::from_value(json!({ "light.kitchen": { "state": "on" } })).unwrap();

    for language in ["it", "en", "de"] {
        let tree = card.render(Some(&snapshot), Some(language));
        assert!(card.sensors().is_empty());
        assert_eq!(
            tree.nodes(),
            &[Node::Placeholder {
                text: NO_SENSORS_TEXT.to_owned()
            }],
            "{language}"
        );
    }
}

#[test]
fn should_render_idempotently() {
    let mut card = configured(json!({ "show_count": 2, "title": "Bidoni" }));
    let snapshot = next_only(3);
    let first = card.render(Some(&snapshot), Some("it"));
    let second = card.render(Some(&snapshot), Some("it"));
    assert_eq!(first, second);
}

#[test]
fn should_fall_back_to_english_for_unknown_language() {
    let mut card = configured(json!({}));
    let snapshot = next_only(2);
    let french = card.render(Some(&snapshot), Some("fr"));
    let english = card.render(Some(&snapshot), Some("en"));
    let unset = card.render(Some(&snapshot), None);
    assert_eq!(french.header(), english.header());
    assert_eq!(badges(&french), badges(&english));
    assert_eq!(unset, english);
}

#[test]
fn should_format_dates_in_host_locale_when_texts_fall_back() {
    let mut card = configured(json!({}));
    let snapshot = next_only(2);

    let german = card.render(Some(&snapshot), Some("de"));
    assert_eq!(german.header(), Some("Next waste collection"));
    assert_eq!(german.rows().next().unwrap().subtitle(), "Monday, 6.5.2024");

    let regional = card.render(Some(&snapshot), Some("it-IT"));
    assert_eq!(badges(&regional), vec!["in 2 days".to_owned()]);
    assert_eq!(regional.rows().next().unwrap().subtitle(), "Monday, 6/5/2024");
}

#[test]
fn should_treat_degenerate_show_count_as_one() {
    let mut snapshot = next_only(0);
    snapshot.insert(SensorSlot::NextPlusOne, EntityState::default());
    snapshot.insert(SensorSlot::NextPlusTwo, EntityState::default());

    let mut baseline = configured(json!({ "show_count": 1 }));
    let expected = baseline.render(Some(&snapshot), Some("en"));
    assert_eq!(expected.nodes().len(), 1);

    for raw in [
        json!({ "show_count": 0 }),
        json!({ "show_count": -2 }),
        json!({}),
    ] {
        let mut card = configured(raw.clone());
        assert_eq!(card.render(Some(&snapshot), Some("en")), expected, "{raw}");
    }
}

#[test]
fn should_reject_null_configuration_and_stay_blank() {
    let mut card = CollectionCard::new();
    assert!(matches!(
        card.set_config(&Value::Null),
        Err(CardError::InvalidConfiguration)
    ));
    assert_eq!(card.render(Some(&next_only(0)), Some("en")), VisualTree::Empty);

    card.set_config(&json!({})).unwrap();
    assert_ne!(card.render(Some(&next_only(0)), Some("en")), VisualTree::Empty);
}

#[test]
fn should_render_blank_without_snapshot() {
    let mut card = configured(json!({}));
    assert_eq!(card.render(None, Some("en")), VisualTree::Empty);
}

#[test]
fn should_render_despite_malformed_unrelated_entities() {
    let mut card = configured(json!({}));
    let snapshot: StateSnapshot = serde_json::from_value(json!({
        "light.kitchen": { "state": "on", "attributes": null },
        "sensor.counter": { "state": 3 },
        "sensor.raccolta_differenziata_next": {
            "state": "Organic",
            "attributes": { "days_until": 1, "date": "2024-05-06" },
        },
    }))
    .unwrap();
    let tree = card.render(Some(&snapshot), Some("en"));
    assert_eq!(badges(&tree), vec!["tomorrow".to_owned()]);
}
