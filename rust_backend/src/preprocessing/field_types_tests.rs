#[cfg(test)]
mod tests {
    use crate::config::PipelineConfig;
    use crate::preprocessing::field_types::{classify_cell, detect_field_types, FieldSpec, FieldType, GeoIndex};
    use serde_json::{json, Map, Value};

    fn rows(values: Value) -> Vec<Map<String, Value>> {
        serde_json::from_value(values).unwrap()
    }

    fn field(id: i64, default_type: Option<FieldType>) -> FieldSpec {
        FieldSpec { id, default_type }
    }

    fn geos() -> GeoIndex {
        GeoIndex::new(["Kathmandu", "Pokhara"], ["NP-BA"])
    }

    #[test]
    fn test_classify_cell_order() {
        let config = PipelineConfig::default();
        let geos = geos();
        assert_eq!(classify_cell(&json!(12), &geos, &config), FieldType::Number);
        assert_eq!(classify_cell(&json!("1,250.5"), &geos, &config), FieldType::Number);
        assert_eq!(classify_cell(&json!("0"), &geos, &config), FieldType::Number);
        assert_eq!(classify_cell(&json!("2021-05-03"), &geos, &config), FieldType::Datetime);
        assert_eq!(classify_cell(&json!("03/05/2021"), &geos, &config), FieldType::Datetime);
        assert_eq!(classify_cell(&json!("2021-05-03 10:30:00"), &geos, &config), FieldType::Datetime);
        assert_eq!(classify_cell(&json!(" kathmandu "), &geos, &config), FieldType::Geo);
        assert_eq!(classify_cell(&json!("np-ba"), &geos, &config), FieldType::Geo);
        assert_eq!(classify_cell(&json!("Flooding"), &geos, &config), FieldType::String);
        assert_eq!(classify_cell(&json!(true), &geos, &config), FieldType::String);
        assert_eq!(classify_cell(&json!("NaN"), &geos, &config), FieldType::String);
    }

    #[test]
    fn test_consistent_columns_keep_their_type() {
        let data = rows(json!([
            {"1": "10", "2": "2021-01-01", "3": "Kathmandu", "4": "Flood"},
            {"1": "2,000", "2": "2021-02-15", "3": "Pokhara", "4": "Earthquake"}
        ]));
        let fields = vec![field(1, None), field(2, None), field(3, None), field(4, None)];

        let types = detect_field_types(&data, &fields, &geos(), &PipelineConfig::default());

        assert_eq!(types[&1], FieldType::Number);
        assert_eq!(types[&2], FieldType::Datetime);
        assert_eq!(types[&3], FieldType::Geo);
        assert_eq!(types[&4], FieldType::String);
    }

    #[test]
    fn test_mixed_column_is_pinned_to_default_type() {
        let data = rows(json!([
            {"1": "10", "2": "10"},
            {"1": "ten", "2": "ten"},
            {"1": "20", "2": "20"}
        ]));
        let fields = vec![field(1, Some(FieldType::Number)), field(2, None)];

        let types = detect_field_types(&data, &fields, &geos(), &PipelineConfig::default());

        assert_eq!(types[&1], FieldType::Number);
        assert_eq!(types[&2], FieldType::String);
    }

    #[test]
    fn test_pinned_type_survives_later_rows() {
        let data = rows(json!([
            {"5": "2021-01-01"},
            {"5": "Pokhara"},
            {"5": "2021-01-02"},
            {"5": "2021-01-03"}
        ]));
        let fields = vec![field(5, Some(FieldType::Geo))];

        let types = detect_field_types(&data, &fields, &geos(), &PipelineConfig::default());
        assert_eq!(types[&5], FieldType::Geo);
    }

    #[test]
    fn test_empty_cells_are_skipped_by_default() {
        let data = rows(json!([{"1": ""}, {"1": null}, {"1": "42"}]));
        let fields = vec![field(1, None)];

        let types = detect_field_types(&data, &fields, &geos(), &PipelineConfig::default());
        assert_eq!(types[&1], FieldType::Number);
    }

    #[test]
    fn test_empty_cells_count_when_configured() {
        let config = PipelineConfig::from_toml_str("[tabular]\nskip_empty_cells = false\n").unwrap();
        let data = rows(json!([{"1": ""}, {"1": "42"}]));
        let fields = vec![field(1, Some(FieldType::Number))];

        let types = detect_field_types(&data, &fields, &geos(), &config);
        assert_eq!(types[&1], FieldType::Number);

        let types = detect_field_types(&data, &[field(1, None)], &geos(), &config);
        assert_eq!(types[&1], FieldType::String);
    }

    #[test]
    fn test_unknown_and_non_numeric_columns_are_ignored() {
        let data = rows(json!([{"1": "5", "label": "x", "99": "2021-01-01"}]));
        let fields = vec![field(1, None), field(2, None)];

        let types = detect_field_types(&data, &fields, &geos(), &PipelineConfig::default());

        assert_eq!(types.len(), 2);
        assert_eq!(types[&1], FieldType::Number);
        assert_eq!(types[&2], FieldType::String);
    }

    #[test]
    fn test_field_spec_and_geo_index_deserialize() {
        let fields: Vec<FieldSpec> = serde_json::from_value(json!([
            {"id": 1, "type": "datetime"},
            {"id": 2}
        ]))
        .unwrap();
        assert_eq!(fields[0].default_type, Some(FieldType::Datetime));
        assert_eq!(fields[1].default_type, None);

        let index: GeoIndex = serde_json::from_value(json!({"names": ["Bagmati"]})).unwrap();
        assert!(index.contains("BAGMATI"));
        assert!(!index.contains(""));
    }
}
