use copytext::load::csv::CsvReader;
use copytext::load::{load_from_path, CopyOptions, LoadFormat, SheetSelection};
use copytext::{Copy, CopyError};
use serde_json::json;

#[test]
fn load_csv_by_extension() {
    let copy = Copy::open("tests/fixtures/attribution.csv", &CopyOptions::default()).unwrap();

    assert_eq!(copy.sheet_names().collect::<Vec<_>>(), ["attribution"]);
    let sheet = copy.get("attribution").found().unwrap();
    assert_eq!(sheet.columns(), ["key", "value"]);
    // The `,` line has no values at all and is skipped.
    assert_eq!(sheet.len(), 3);
    assert_eq!(copy.get("attribution").get("byline").to_string(), "Jane Doe");
}

#[test]
fn csv_copy_serializes_by_shape() {
    let copy = load_from_path("tests/fixtures/items.csv", &CopyOptions::default()).unwrap();
    assert_eq!(
        copy.serialize(),
        json!({
            "items": [
                {"term": "jabberwocky", "definition": "Invented or meaningless language; nonsense."},
                {"term": "brillig", "definition": "Four o'clock, in the afternoon."},
            ]
        })
    );
}

#[test]
fn forced_format_and_custom_sheet_name() {
    let mut reader = CsvReader::open("tests/fixtures/items.csv")
        .unwrap()
        .with_sheet_name("glossary");
    let copy = Copy::from_reader(&mut reader, &CopyOptions::default()).unwrap();
    assert!(copy.get("glossary").is_found());

    let opts = CopyOptions {
        format: Some(LoadFormat::Csv),
        ..Default::default()
    };
    let copy = load_from_path("tests/fixtures/items.csv", &opts).unwrap();
    assert_eq!(copy.len(), 1);
}

#[test]
fn unknown_sheet_selection_is_rejected() {
    let opts = CopyOptions {
        sheets: SheetSelection::Only(vec!["nope".to_string()]),
        ..Default::default()
    };
    let err = load_from_path("tests/fixtures/items.csv", &opts).unwrap_err();
    assert!(matches!(err, CopyError::InvalidSource { .. }));
}

#[test]
fn missing_source_is_a_hard_failure() {
    let err = Copy::open("tests/fixtures/does_not_exist.csv", &CopyOptions::default()).unwrap_err();
    assert!(matches!(err, CopyError::SourceMissing { .. }));
    assert!(err.to_string().contains("does_not_exist.csv\" does not exist"));
    assert!(err.to_string().contains("Regenerate or download"));
}
