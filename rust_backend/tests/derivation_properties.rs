//! Property tests for attribute derivation and batch aggregation.

use deep_widgets::core::{AttributeValue, ComprehensiveView, Entry, EntryId, WidgetDefinition, WidgetKind};
use deep_widgets::error::WidgetError;
use deep_widgets::{build_comprehensive_views, derive_attribute};
use proptest::prelude::*;
use serde_json::{json, Value};

fn scale_widget(labels: &[String]) -> WidgetDefinition {
    let points: Vec<Value> = labels
        .iter()
        .enumerate()
        .map(|(i, label)| json!({"key": format!("k{}", i), "label": label}))
        .collect();
    WidgetDefinition::new("severity", WidgetKind::Scale, "Severity", json!({ "scale_units": points }))
}

fn range_widget() -> WidgetDefinition {
    WidgetDefinition::new("hours", WidgetKind::TimeRange, "Hours", Value::Null)
}

proptest! {
    #[test]
    fn prop_scale_selection_is_filtered_and_labelled(
        labels in prop::collection::vec("[A-Za-z ]{1,12}", 1..8),
        pick in any::<prop::sample::Index>(),
    ) {
        let widget = scale_widget(&labels);
        let i = pick.index(labels.len());
        let key = format!("k{}", i);

        let derived = derive_attribute(&widget, &AttributeValue::new("severity", json!(key))).unwrap();

        prop_assert_eq!(derived.filter.values, Some(vec![key]));
        let fragment = derived.export.report_fragment.unwrap();
        prop_assert_eq!(fragment.label, Some(labels[i].clone()));
    }

    #[test]
    fn prop_null_scale_selection_is_empty(labels in prop::collection::vec("[a-z]{1,6}", 1..5)) {
        let derived = derive_attribute(&scale_widget(&labels), &AttributeValue::new("severity", Value::Null)).unwrap();
        prop_assert_eq!(derived.filter.values, Some(vec![]));
        prop_assert!(derived.export.report_fragment.unwrap().is_empty());
    }

    #[test]
    fn prop_time_range_minutes(h1 in 0u32..24, m1 in 0u32..60, h2 in 0u32..24, m2 in 0u32..60) {
        let value = json!({"from": format!("{}:{}", h1, m1), "to": format!("{}:{}", h2, m2)});
        let derived = derive_attribute(&range_widget(), &AttributeValue::new("hours", value)).unwrap();

        let range = derived.filter.number_range.unwrap();
        prop_assert_eq!(range.from, Some(i64::from(h1 * 60 + m1)));
        prop_assert_eq!(range.to, Some(i64::from(h2 * 60 + m2)));

        let cell = serde_json::to_value(&derived.export.spreadsheet_cell).unwrap();
        prop_assert_eq!(
            &cell["value"],
            &json!([format!("{:02}:{:02}", h1, m1), format!("{:02}:{:02}", h2, m2)])
        );
    }

    #[test]
    fn prop_times_without_minutes_are_malformed(text in "[0-9a-z]{1,4}") {
        let value = json!({"from": text.clone(), "to": null});
        let err = derive_attribute(&range_widget(), &AttributeValue::new("hours", value)).unwrap_err();
        prop_assert_eq!(err, WidgetError::MalformedTime(text));
    }

    #[test]
    fn prop_one_malformed_entry_fails_alone(n in 1usize..20, bad in any::<prop::sample::Index>()) {
        let bad = bad.index(n);
        let entries: Vec<Entry> = (0..n)
            .map(|i| {
                let from = if i == bad { "ab:cd".to_string() } else { format!("{:02}:00", i) };
                Entry {
                    id: EntryId(i as i64),
                    attributes: vec![AttributeValue::new("hours", json!({"from": from, "to": "23:59"}))],
                }
            })
            .collect();

        let outcome = build_comprehensive_views(&[range_widget()], &entries).unwrap();

        let ids: Vec<i64> = outcome.views_for("hours").iter().map(|v| v.entry_id.0).collect();
        let expected: Vec<i64> = (0..n as i64).filter(|&i| i != bad as i64).collect();
        prop_assert_eq!(ids, expected);
        prop_assert_eq!(outcome.errors.len(), 1);
        prop_assert_eq!(outcome.errors[0].entry_id, EntryId(bad as i64));
    }

    #[test]
    fn prop_scale_bounds_are_isolated_per_batch(
        first in prop::collection::vec("[a-z]{1,6}", 1..6),
        second in prop::collection::vec("[A-Z]{1,6}", 1..6),
    ) {
        let entry = Entry {
            id: EntryId(1),
            attributes: vec![AttributeValue::new("severity", json!("k0"))],
        };

        for labels in [&first, &second] {
            let outcome = build_comprehensive_views(&[scale_widget(labels)], std::slice::from_ref(&entry)).unwrap();
            match &outcome.views_for("severity")[0].view {
                ComprehensiveView::Scale(view) => {
                    prop_assert_eq!(&view.min.label, &labels[0]);
                    prop_assert_eq!(&view.max.label, labels.last().unwrap());
                    prop_assert_eq!(view.index, Some(1));
                }
                other => prop_assert!(false, "expected scale view, got {:?}", other),
            }
        }
    }
}
