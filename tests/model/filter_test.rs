#[cfg(test)]
mod tests {
    use lsql::model::{
        Column, ColumnDataType, Filter, FilterKind, FilterOperator, FilterValue, GroupOperator,
        ValidationError, ValueKind,
    };

    fn region() -> Column {
        Column::new("\"Sales\".\"Region\"", "Region", ColumnDataType::Varchar)
            .with_subject_area("Sales")
            .with_id("c42")
    }

    #[test]
    fn test_every_operator_spelling_parses() {
        let spellings = [
            "equal",
            "notEqual",
            "in",
            "notIn",
            "greater",
            "greaterOrEqual",
            "less",
            "lessOrEqual",
            "top",
            "bottom",
            "like",
            "contains",
            "starts",
            "ends",
            "isNull",
            "isNotNull",
        ];
        for s in spellings {
            let op: FilterOperator = s.parse().unwrap();
            assert_eq!(op.to_string(), s);
        }
    }

    #[test]
    fn test_operator_outside_set_fails_construction() {
        let result = "between".parse::<FilterOperator>();
        assert!(matches!(result, Err(ValidationError::UnknownOperator(s)) if s == "between"));
    }

    #[test]
    fn test_filter_copies_column_identity() {
        let f = Filter::from_column(&region(), Some(vec!["East"].into())).unwrap();
        assert_eq!(f.code, "\"Sales\".\"Region\"");
        assert_eq!(f.column_id, "c42");
        assert_eq!(f.subject_area, "Sales");
        assert!(!f.global);
        assert!(!f.protected);
    }

    #[test]
    fn test_filter_kind_tracks_operator() {
        let f = Filter::new(
            &region(),
            Some("East".into()),
            FilterOperator::Equal,
            ValueKind::Value,
        )
        .unwrap();
        assert_eq!(f.kind(), FilterKind::Comparison);

        let f = Filter::from_column(&region(), Some("East".into())).unwrap();
        assert_eq!(f.kind(), FilterKind::List);
    }

    #[test]
    fn test_group_operator_strings() {
        assert_eq!("and".parse::<GroupOperator>().unwrap().to_string(), "and");
        assert!(matches!(
            "nand".parse::<GroupOperator>(),
            Err(ValidationError::UnknownGroupOperator(_))
        ));
    }

    #[test]
    fn test_usable_value_asymmetry() {
        use lsql::sql::has_usable_value;

        // isNull is usable with no value at all
        let date_col = Column::new("D", "D", ColumnDataType::Date);
        let f = Filter::new(&date_col, None, FilterOperator::IsNull, ValueKind::Value).unwrap();
        assert!(has_usable_value(&f.into()));

        // an empty string list is absent
        let f = Filter::from_column(&region(), Some(FilterValue::List(Vec::new()))).unwrap();
        assert!(!has_usable_value(&f.into()));

        // a decimal zero is present
        let amount = Column::new("N", "N", ColumnDataType::Numeric);
        let f = Filter::new(
            &amount,
            Some(0i64.into()),
            FilterOperator::Equal,
            ValueKind::Value,
        )
        .unwrap();
        assert!(has_usable_value(&f.into()));
    }

    #[test]
    fn test_filter_round_trips_through_json() {
        let f = Filter::from_column(&region(), Some(vec!["East", "West"].into()))
            .unwrap()
            .with_global(true);
        let json = serde_json::to_string(&f).unwrap();
        let back: Filter = serde_json::from_str(&json).unwrap();
        assert_eq!(back, f);
    }
}
