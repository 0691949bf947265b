use rust_xlsxwriter::Workbook as XlsxWorkbook;
use std::fs;
use tabulator::{Selection, SelectionConfig, TabulatorError, Workbook, WorksheetSource};
use tempfile::tempdir;

// ===== CSV sources =====

#[test]
fn test_csv_file_is_one_worksheet() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("people.csv");
    fs::write(&path, "Full Name,Âge\nAda Lovelace,36\nAlan Turing\n").unwrap();

    let workbook = Workbook::from_csv(&path).unwrap();
    assert_eq!(workbook.worksheet_names(), vec!["people"]);

    let table = workbook.table("people", &Selection::default()).unwrap();
    assert_eq!(table.field_names(), vec!["full_name", "age"]);
    assert_eq!(table.len(), 2);
    assert!(!table.records()[1].contains_key("age"));
}

#[test]
fn test_csv_dir_loads_sorted_worksheets() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.csv"), "x\n1\n").unwrap();
    fs::write(dir.path().join("a.tsv"), "y\tz\n1\t2\n").unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let workbook = Workbook::open(dir.path()).unwrap();
    assert_eq!(workbook.worksheet_names(), vec!["a", "b"]);

    let table = workbook.table("a", &Selection::default()).unwrap();
    assert_eq!(table.field_names(), vec!["y", "z"]);
}

#[test]
fn test_csv_reader_with_selection_config() {
    let csv = "Report\nname;qty\napple;1\nTOTAL;1\n";
    let workbook = Workbook::from_csv_reader("stock", csv.as_bytes(), b';').unwrap();
    let selection = SelectionConfig::from_json_str(r#"{"header": 1, "reject": {"matching_cell": "TOTAL"}}"#)
        .unwrap()
        .to_selection()
        .unwrap();

    let table = workbook.table("stock", &selection).unwrap();
    assert_eq!(
        table.serialize(),
        "[\n  {\n    \"name\": \"apple\",\n    \"qty\": \"1\"\n  }\n]"
    );
}

#[test]
fn test_missing_file_is_source_unavailable() {
    let dir = tempdir().unwrap();
    let result = Workbook::from_csv(dir.path().join("missing.csv"));
    assert!(matches!(result, Err(TabulatorError::SourceUnavailable(_))));
}

#[test]
fn test_unknown_worksheet() {
    let workbook = Workbook::from_csv_reader("only", "a\n1\n".as_bytes(), b',').unwrap();
    assert!(matches!(
        workbook.table("other", &Selection::default()),
        Err(TabulatorError::WorksheetNotFound { .. })
    ));
}

// ===== Spreadsheet sources =====

#[test]
fn test_xlsx_worksheets() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("catalog.xlsx");

    let mut xlsx = XlsxWorkbook::new();
    let sheet = xlsx.add_worksheet();
    sheet.set_name("Tracks").unwrap();
    sheet.write_string(1, 0, "Title").unwrap();
    sheet.write_string(1, 1, "Duration (s)").unwrap();
    sheet.write_string(2, 0, "Intro").unwrap();
    sheet.write_number(2, 1, 95).unwrap();
    xlsx.add_worksheet().set_name("Empty").unwrap();
    xlsx.save(&path).unwrap();

    let workbook = Workbook::open(&path).unwrap();
    assert_eq!(workbook.worksheet_names(), vec!["Tracks", "Empty"]);

    // The blank first row is kept, so the header sits at position 1
    let table = workbook
        .table("Tracks", &Selection::new().with_header(1))
        .unwrap();
    assert_eq!(
        table.serialize(),
        "[\n  {\n    \"title\": \"Intro\",\n    \"duration_(s)\": \"95\"\n  }\n]"
    );

    let empty = workbook.table("Empty", &Selection::default()).unwrap();
    assert!(empty.is_empty());
}

#[test]
fn test_corrupt_spreadsheet_is_source_unavailable() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.xlsx");
    fs::write(&path, "not a zip archive").unwrap();

    assert!(matches!(
        Workbook::open(&path),
        Err(TabulatorError::SourceUnavailable(_))
    ));
}

// ===== Persistence =====

#[test]
fn test_persist_writes_serialized_output() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out.json");

    let workbook = Workbook::from_csv_reader("s", "a,b\n1,2\n".as_bytes(), b',').unwrap();
    let table = workbook.table("s", &Selection::default()).unwrap();
    table.persist(&out).unwrap();

    assert_eq!(fs::read_to_string(&out).unwrap(), table.serialize());
}

#[test]
fn test_persist_failure_is_reported() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("no-such-dir").join("out.json");

    let workbook = Workbook::from_csv_reader("s", "a\n1\n".as_bytes(), b',').unwrap();
    let table = workbook.table("s", &Selection::default()).unwrap();

    assert!(matches!(
        table.persist(&out),
        Err(TabulatorError::Persist { path, .. }) if path == out
    ));
}
