use rust_xlsxwriter::Workbook;

use spend_ingest::source::{load_rows, SourceFormat};
use spend_ingest::types::Value;

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[test]
fn mime_hint_dispatch() {
    assert_eq!(SourceFormat::from_mime_hint("text/csv"), SourceFormat::Csv);
    assert_eq!(
        SourceFormat::from_mime_hint("application/octet-stream"),
        SourceFormat::Csv
    );
    assert_eq!(
        SourceFormat::from_mime_hint("application/vnd.ms-excel"),
        SourceFormat::Excel
    );
    assert_eq!(SourceFormat::from_mime_hint(XLSX_MIME), SourceFormat::Excel);
}

#[test]
fn csv_rows_keep_headers_and_map_empty_cells_to_null() {
    let bytes = b"Campaign name,Amount spent (SGD),Ad name\nAugust Broad,10.5,\n";
    let rows = load_rows(bytes, "text/csv").unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0].get("Campaign name"),
        Some(&Value::Text("August Broad".to_string()))
    );
    assert_eq!(
        rows[0].get("Amount spent (SGD)"),
        Some(&Value::Text("10.5".to_string()))
    );
    assert_eq!(rows[0].get("Ad name"), Some(&Value::Null));
}

#[test]
fn csv_tolerates_ragged_rows() {
    let bytes = b"a,b\n1,2\nonly-one-field\n3,4\n";
    let rows = load_rows(bytes, "text/csv").unwrap();
    // Short rows are padded with nulls rather than failing the load.
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1].get("b"), Some(&Value::Null));
    assert_eq!(rows[2].get("a"), Some(&Value::Text("3".to_string())));
}

fn report_workbook_bytes() -> Vec<u8> {
    let mut wb = Workbook::new();

    // Decoy sheet first: the loader must still pick "Raw Data Report".
    let decoy = wb.add_worksheet();
    decoy.set_name("Summary").unwrap();
    decoy.write_string(0, 0, "nothing to see").unwrap();

    let ws = wb.add_worksheet();
    ws.set_name("Raw Data Report").unwrap();
    // Title/metadata rows above the real header, as the export writes them.
    ws.write_string(0, 0, "Meta Daily Report").unwrap();
    ws.write_string(1, 0, "Generated 2025-08-18").unwrap();
    ws.write_string(3, 0, "Reporting ends").unwrap();
    ws.write_string(3, 1, "Campaign name").unwrap();
    ws.write_string(3, 2, "Delivery level").unwrap();
    ws.write_string(3, 3, "Amount spent (SGD)").unwrap();
    ws.write_string(4, 0, "2025-08-17").unwrap();
    ws.write_string(4, 1, "August Broad").unwrap();
    ws.write_string(4, 2, "campaign").unwrap();
    ws.write_number(4, 3, 10).unwrap();
    ws.write_string(5, 0, "2025-08-17").unwrap();
    ws.write_string(5, 1, "August Broad").unwrap();
    ws.write_string(5, 2, "ad").unwrap();
    // spend cell left empty on the child row

    wb.save_to_buffer().unwrap()
}

#[test]
fn workbook_header_row_is_located_by_marker_scan() {
    let bytes = report_workbook_bytes();
    let rows = load_rows(&bytes, XLSX_MIME).unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[0].get("Campaign name"),
        Some(&Value::Text("August Broad".to_string()))
    );
    assert_eq!(
        rows[0].get("Amount spent (SGD)"),
        Some(&Value::Number(10.0))
    );
    assert_eq!(rows[1].get("Amount spent (SGD)"), Some(&Value::Null));
}

#[test]
fn workbook_without_marker_uses_first_row_as_header() {
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.set_name("Sheet1").unwrap();
    ws.write_string(0, 0, "Invoice Number").unwrap();
    ws.write_string(0, 1, "Creation Date").unwrap();
    ws.write_string(1, 0, "INV-1").unwrap();
    ws.write_string(1, 1, "17/08/2025").unwrap();
    let bytes = wb.save_to_buffer().unwrap();

    let rows = load_rows(&bytes, XLSX_MIME).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0].get("Invoice Number"),
        Some(&Value::Text("INV-1".to_string()))
    );
}

#[test]
fn unreadable_workbook_bytes_are_fatal() {
    let err = load_rows(b"definitely not a zip archive", XLSX_MIME).unwrap_err();
    assert!(!err.to_string().is_empty());
}
