//! Property tests for row binding.

use hydrate_core::{Header, Hydratable, Hydrator, RecordBinder, Row, hydratable};
use proptest::prelude::*;

#[derive(Debug, Default, Clone, PartialEq)]
struct Sample {
    id: i64,
    name: Option<String>,
    score: f64,
}

hydratable! {
    Sample {
        id: i64,
        name: Option<String>,
        score: f64,
    }
}

/// Raw cell for `id`, possibly empty.
fn id_cell() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), any::<i64>().prop_map(|v| v.to_string())]
}

fn name_cell() -> impl Strategy<Value = String> {
    "[a-z ]{0,8}"
}

fn score_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        (-1.0e6f64..1.0e6).prop_map(|v| v.to_string())
    ]
}

fn row_cells() -> impl Strategy<Value = (String, String, String)> {
    (id_cell(), name_cell(), score_cell())
}

fn hydrate(lines: &[String]) -> Vec<Sample> {
    Hydrator::<Sample>::new()
        .expect("build hydrator")
        .hydrate_lines(lines)
        .expect("hydrate")
}

proptest! {
    #[test]
    fn binding_is_deterministic((id, name, score) in row_cells()) {
        let schema = Sample::schema().unwrap();
        let header = Header::parse("id,name,score", ",");
        let binder = RecordBinder::new(&schema, &header);
        let row = Row::new(2, vec![id, name, score]);
        let first = binder.bind(&row, Sample::default()).unwrap();
        let second = binder.bind(&row, Sample::default()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn empty_values_never_change_defaults((id, name, score) in row_cells()) {
        let line = format!("{id},{name},{score}");
        let records = hydrate(&["id,name,score".to_string(), line]);
        let record = &records[0];
        if id.is_empty() {
            prop_assert_eq!(record.id, 0);
        }
        if name.is_empty() {
            prop_assert_eq!(record.name.clone(), None);
        }
        if score.is_empty() {
            prop_assert_eq!(record.score, 0.0);
        }
    }

    #[test]
    fn unknown_columns_do_not_affect_fields(
        (id, name, score) in row_cells(),
        extra in "[a-z0-9 ]{0,6}",
        position in 0usize..4,
    ) {
        let mut columns = vec!["id", "name", "score"];
        let mut cells = vec![id.as_str(), name.as_str(), score.as_str()];
        let baseline = hydrate(&[columns.join(","), cells.join(",")]);

        columns.insert(position, "unmatched");
        cells.insert(position, extra.as_str());
        let widened = hydrate(&[columns.join(","), cells.join(",")]);

        prop_assert_eq!(baseline, widened);
    }

    #[test]
    fn one_record_per_line_in_order(ids in prop::collection::vec(any::<i64>(), 0..40)) {
        let mut lines = vec!["id".to_string()];
        lines.extend(ids.iter().map(i64::to_string));
        let records = hydrate(&lines);
        let hydrated: Vec<i64> = records.iter().map(|record| record.id).collect();
        prop_assert_eq!(hydrated, ids);
    }
}
