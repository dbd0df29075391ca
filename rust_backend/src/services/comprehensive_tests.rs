#[cfg(test)]
mod tests {
    use crate::config::PipelineConfig;
    use crate::core::{AttributeValue, ComprehensiveView, Entry, EntryId, WidgetDefinition, WidgetKind};
    use crate::error::WidgetError;
    use crate::services::comprehensive::{
        build_comprehensive_views, build_comprehensive_views_with, ComprehensiveViewBuilder,
    };
    use serde_json::{json, Value};

    fn severity(points: Value) -> WidgetDefinition {
        WidgetDefinition::new("severity", WidgetKind::Scale, "Severity", json!({ "scale_units": points }))
    }

    fn opening_hours() -> WidgetDefinition {
        WidgetDefinition::new("hours", WidgetKind::TimeRange, "Opening hours", Value::Null)
    }

    fn entry(id: i64, attributes: Vec<(&str, Value)>) -> Entry {
        Entry {
            id: EntryId(id),
            attributes: attributes
                .into_iter()
                .map(|(key, value)| AttributeValue::new(key, value))
                .collect(),
        }
    }

    fn low_high() -> Value {
        json!([{"key": "a", "label": "Low"}, {"key": "b", "label": "High"}])
    }

    #[test]
    fn test_views_follow_entry_order() {
        let widgets = vec![severity(low_high()), opening_hours()];
        let entries = vec![
            entry(3, vec![("severity", json!("b")), ("hours", json!({"from": "08:00", "to": "12:00"}))]),
            entry(1, vec![("severity", json!("a"))]),
            entry(2, vec![("severity", Value::Null)]),
        ];

        let outcome = build_comprehensive_views(&widgets, &entries).unwrap();

        let ids: Vec<i64> = outcome.views_for("severity").iter().map(|v| v.entry_id.0).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(outcome.views_for("hours").len(), 1);
        assert!(!outcome.has_errors());
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_every_supported_widget_has_a_view_list() {
        let widgets = vec![severity(low_high()), opening_hours()];
        let outcome = build_comprehensive_views(&widgets, &[]).unwrap();
        assert_eq!(outcome.views.len(), 2);
        assert!(outcome.views_for("hours").is_empty());
    }

    #[test]
    fn test_malformed_value_fails_only_its_entry() {
        let widgets = vec![opening_hours()];
        let entries = vec![
            entry(1, vec![("hours", json!({"from": "08:00", "to": "09:30"}))]),
            entry(2, vec![("hours", json!({"from": "9", "to": "10:00"}))]),
            entry(3, vec![("hours", json!({"from": "13:00", "to": "17:00"}))]),
        ];

        let outcome = build_comprehensive_views(&widgets, &entries).unwrap();

        let ids: Vec<i64> = outcome.views_for("hours").iter().map(|v| v.entry_id.0).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].entry_id, EntryId(2));
        assert_eq!(outcome.errors[0].widget_key, "hours");
        assert_eq!(outcome.errors[0].error, WidgetError::MalformedTime("9".to_string()));
    }

    #[test]
    fn test_definition_errors_abort_the_batch() {
        let widgets = vec![severity(json!([]))];
        let err = build_comprehensive_views(&widgets, &[entry(1, vec![("severity", json!("a"))])]).unwrap_err();
        assert!(err.is_definition_error());
        assert!(matches!(err, WidgetError::MissingWidgetOptions { .. }));
    }

    #[test]
    fn test_duplicate_widget_keys_are_rejected() {
        let widgets = vec![opening_hours(), opening_hours()];
        let err = build_comprehensive_views(&widgets, &[]).unwrap_err();
        assert_eq!(err, WidgetError::DuplicateWidgetKey("hours".to_string()));
    }

    #[test]
    fn test_unknown_widget_attributes_become_warnings() {
        let widgets = vec![opening_hours()];
        let entries = vec![entry(7, vec![("ghost", json!(1))])];

        let outcome = build_comprehensive_views(&widgets, &entries).unwrap();

        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].entry_id, EntryId(7));
        assert_eq!(outcome.warnings[0].error, WidgetError::UnknownWidget("ghost".to_string()));
        assert!(!outcome.has_errors());
    }

    #[test]
    fn test_repeated_widget_attribute_keeps_first_value() {
        let widgets = vec![WidgetDefinition::new("n", WidgetKind::Number, "Count", Value::Null)];
        let entries = vec![entry(1, vec![("n", json!(1)), ("n", json!(2))])];

        let outcome = build_comprehensive_views(&widgets, &entries).unwrap();

        assert_eq!(outcome.views_for("n").len(), 1);
        match &outcome.views_for("n")[0].view {
            ComprehensiveView::Number(view) => assert_eq!(view.value, Some(1)),
            other => panic!("expected number view, got {:?}", other),
        }
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].entry_id, EntryId(1));
        assert_eq!(outcome.warnings[0].error, WidgetError::DuplicateAttribute("n".to_string()));
        assert!(!outcome.has_errors());
    }

    #[test]
    fn test_same_widget_on_different_entries_is_not_a_repeat() {
        let widgets = vec![WidgetDefinition::new("n", WidgetKind::Number, "Count", Value::Null)];
        let entries = vec![entry(1, vec![("n", json!(1))]), entry(2, vec![("n", json!(2))])];

        let outcome = build_comprehensive_views(&widgets, &entries).unwrap();

        assert_eq!(outcome.views_for("n").len(), 2);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_unsupported_widget_attributes_are_skipped() {
        let widgets = vec![WidgetDefinition::new("excerpt", WidgetKind::Unsupported, "Excerpt", Value::Null)];
        let entries = vec![entry(1, vec![("excerpt", json!("quoted text"))])];

        let outcome = build_comprehensive_views(&widgets, &entries).unwrap();

        assert!(outcome.views.is_empty());
        assert!(outcome.warnings.is_empty());
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn test_unknown_scale_selection_is_a_warning() {
        let widgets = vec![severity(low_high())];
        let entries = vec![entry(4, vec![("severity", json!("removed"))])];

        let outcome = build_comprehensive_views(&widgets, &entries).unwrap();

        assert_eq!(outcome.views_for("severity").len(), 1);
        match &outcome.views_for("severity")[0].view {
            ComprehensiveView::Scale(view) => {
                assert_eq!(view.selected, None);
                assert_eq!(view.index, None);
            }
            other => panic!("expected scale view, got {:?}", other),
        }
        assert_eq!(
            outcome.warnings[0].error,
            WidgetError::UnknownSelection {
                widget_key: "severity".to_string(),
                selection: "removed".to_string(),
            }
        );
    }

    #[test]
    fn test_scale_bounds_do_not_leak_between_batches() {
        let first = vec![severity(low_high())];
        let second = vec![severity(json!([
            {"key": "x", "label": "Minor"},
            {"key": "y", "label": "Major"},
            {"key": "z", "label": "Critical"}
        ]))];

        let one = build_comprehensive_views(&first, &[entry(1, vec![("severity", json!("a"))])]).unwrap();
        let two = build_comprehensive_views(&second, &[entry(1, vec![("severity", json!("y"))])]).unwrap();

        let bounds = |outcome: &crate::services::BatchOutcome| match &outcome.views_for("severity")[0].view {
            ComprehensiveView::Scale(view) => (view.min.key.clone(), view.max.key.clone()),
            other => panic!("expected scale view, got {:?}", other),
        };
        assert_eq!(bounds(&one), ("a".to_string(), "b".to_string()));
        assert_eq!(bounds(&two), ("x".to_string(), "z".to_string()));
    }

    #[test]
    fn test_builder_can_stop_between_entries() {
        let widgets = vec![severity(low_high())];
        let config = PipelineConfig::default();
        let entries: Vec<Entry> = (1..=5).map(|id| entry(id, vec![("severity", json!("a"))])).collect();

        let mut builder = ComprehensiveViewBuilder::new(&config, &widgets).unwrap();
        for entry in entries.iter().take(2) {
            builder.add_entry(entry);
        }
        assert_eq!(builder.entries_seen(), 2);

        let outcome = builder.finish();
        assert_eq!(outcome.views_for("severity").len(), 2);
    }

    #[test]
    fn test_date_views_use_configured_format() {
        let config = PipelineConfig::from_toml_str("[export]\ndate_format = \"%Y/%m/%d\"\n").unwrap();
        let widgets = vec![WidgetDefinition::new("published", WidgetKind::Date, "Published", Value::Null)];
        let entries = vec![entry(1, vec![("published", json!("2021-05-03"))])];

        let outcome = build_comprehensive_views_with(&config, &widgets, &entries).unwrap();

        match &outcome.views_for("published")[0].view {
            ComprehensiveView::Date(view) => assert_eq!(view.formatted.as_deref(), Some("2021/05/03")),
            other => panic!("expected date view, got {:?}", other),
        }
    }

    #[test]
    fn test_outcome_serializes_issues_with_error_kind() {
        let widgets = vec![opening_hours()];
        let entries = vec![entry(9, vec![("hours", json!({"from": "ab:cd", "to": null}))])];

        let outcome = build_comprehensive_views(&widgets, &entries).unwrap();
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["errors"][0]["entry_id"], json!(9));
        assert_eq!(json["errors"][0]["error"]["kind"], json!("MalformedTime"));
        assert_eq!(json["views"]["hours"], json!([]));
    }
}
