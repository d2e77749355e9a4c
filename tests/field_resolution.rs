use spend_ingest::resolve::FieldResolver;
use spend_ingest::types::{RawRow, Value};

fn row(pairs: &[(&str, Value)]) -> RawRow {
    RawRow::from_pairs(
        pairs
            .iter()
            .map(|(h, v)| (h.to_string(), v.clone()))
            .collect(),
    )
}

#[test]
fn resolves_case_and_whitespace_insensitively() {
    let row = row(&[("  CAMPAIGN name ", Value::Text("August Broad".into()))]);
    let fields = FieldResolver::new(&row);
    assert_eq!(
        fields.resolve_text(&["Campaign name"]),
        Some("August Broad".to_string())
    );
}

#[test]
fn candidate_order_encodes_preference() {
    let row = row(&[
        ("Date", Value::Text("2025-01-01".into())),
        ("Reporting ends", Value::Text("2025-08-17".into())),
    ]);
    let fields = FieldResolver::new(&row);
    assert_eq!(
        fields.resolve_text(&["Reporting ends", "Date"]),
        Some("2025-08-17".to_string())
    );
}

#[test]
fn empty_match_falls_through_to_next_candidate() {
    let row = row(&[
        ("Invoice Number", Value::Null),
        ("Order ID", Value::Text("ORD-7".into())),
    ]);
    let fields = FieldResolver::new(&row);
    assert_eq!(
        fields.resolve_text(&["Invoice Number", "Order ID"]),
        Some("ORD-7".to_string())
    );
}

#[test]
fn whitespace_only_text_counts_as_empty() {
    let row = row(&[("Ad name", Value::Text("   ".into()))]);
    let fields = FieldResolver::new(&row);
    assert_eq!(fields.resolve(&["Ad name"]), None);
}

#[test]
fn no_candidate_matches_returns_none() {
    let row = row(&[("Impressions", Value::Number(12000.0))]);
    let fields = FieldResolver::new(&row);
    assert_eq!(fields.resolve(&["Frequency", "CTR (all)"]), None);
}

#[test]
fn numeric_cells_render_without_trailing_decimal() {
    let row = row(&[("Invoice Number", Value::Number(10023.0))]);
    let fields = FieldResolver::new(&row);
    assert_eq!(
        fields.resolve_text(&["Invoice Number"]),
        Some("10023".to_string())
    );
}

#[test]
fn first_occurrence_wins_on_duplicate_headers() {
    let row = row(&[
        ("Results", Value::Number(4.0)),
        ("results", Value::Number(9.0)),
    ]);
    let fields = FieldResolver::new(&row);
    assert_eq!(fields.resolve(&["Results"]), Some(&Value::Number(4.0)));
}
