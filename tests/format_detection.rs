use dataset_ingestion::ingestion::{detect_format, ingest, IngestionFormat};
use dataset_ingestion::IngestError;

#[test]
fn detect_by_media_type() {
    assert_eq!(detect_format("text/csv", "x").unwrap(), IngestionFormat::DelimitedText);
    assert_eq!(
        detect_format("application/csv", "x").unwrap(),
        IngestionFormat::DelimitedText
    );
    assert_eq!(detect_format("application/json", "x").unwrap(), IngestionFormat::Json);
    assert_eq!(
        detect_format(
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            "x"
        )
        .unwrap(),
        IngestionFormat::Spreadsheet
    );
    assert_eq!(
        detect_format("application/vnd.ms-excel", "x").unwrap(),
        IngestionFormat::Spreadsheet
    );
}

#[test]
fn detect_ignores_media_type_parameters_and_case() {
    assert_eq!(
        detect_format("Text/CSV; charset=utf-8", "upload").unwrap(),
        IngestionFormat::DelimitedText
    );
    assert_eq!(
        detect_format(" application/json ;charset=UTF-8", "upload").unwrap(),
        IngestionFormat::Json
    );
}

#[test]
fn detect_falls_back_to_extension_case_insensitively() {
    let octet = "application/octet-stream";
    assert_eq!(detect_format(octet, "a.CSV").unwrap(), IngestionFormat::DelimitedText);
    assert_eq!(detect_format(octet, "a.Json").unwrap(), IngestionFormat::Json);
    assert_eq!(detect_format(octet, "a.xlsx").unwrap(), IngestionFormat::Spreadsheet);
    assert_eq!(detect_format("", "report.XLS").unwrap(), IngestionFormat::Spreadsheet);
}

#[test]
fn media_type_wins_over_extension() {
    assert_eq!(detect_format("application/json", "data.csv").unwrap(), IngestionFormat::Json);
    assert_eq!(
        detect_format("text/csv", "book.xlsx").unwrap(),
        IngestionFormat::DelimitedText
    );
}

#[test]
fn detect_rejects_unknown_metadata() {
    let err = detect_format("text/plain", "notes.txt").unwrap_err();
    assert!(matches!(err, IngestError::UnsupportedFormat { .. }));
    assert!(err.to_string().contains("notes.txt"));

    let err = detect_format("", "no_extension").unwrap_err();
    assert!(matches!(err, IngestError::UnsupportedFormat { .. }));
}

#[test]
fn txt_upload_fails_before_any_parser_runs() {
    // Valid CSV content, but neither the media type nor the extension names a parser.
    let err = ingest(b"a,b\n1,2\n", "data.txt", "text/plain").unwrap_err();
    assert!(matches!(err, IngestError::UnsupportedFormat { .. }));
}

#[test]
fn mislabeled_upload_fails_in_the_parser() {
    let err = ingest(b"a,b\n1,2\n", "data.json", "application/octet-stream").unwrap_err();
    assert!(matches!(err, IngestError::MalformedInput { .. }));
}

#[test]
fn file_type_labels() {
    assert_eq!(IngestionFormat::DelimitedText.file_type_label(), "csv");
    assert_eq!(IngestionFormat::Json.file_type_label(), "json");
    assert_eq!(IngestionFormat::Spreadsheet.file_type_label(), "xlsx");
}
