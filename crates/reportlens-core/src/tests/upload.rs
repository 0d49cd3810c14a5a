use crate::upload::{
    FAILURE_MESSAGE, SUCCESS_MESSAGE, UploadError, decode_upload_response, try_ingest_upload,
};
use crate::{MemoryStore, MetadataStore, UploadStatus, ingest_upload};
use serde_json::json;

fn envelope() -> String {
    json!({
        "message": "File processed successfully",
        "report_metadata": super::scenario_metadata_json()
    })
    .to_string()
}

#[test]
fn successful_upload_is_stored() {
    let mut store = MetadataStore::new(MemoryStore::new());
    let outcome = ingest_upload(&mut store, true, &envelope());
    assert_eq!(outcome.status, UploadStatus::Success);
    assert_eq!(outcome.message, SUCCESS_MESSAGE);
    assert_eq!(store.load(), Some(super::scenario_metadata()));
}

#[test]
fn bare_metadata_document_is_accepted() {
    let body = super::scenario_metadata_json().to_string();
    let metadata = decode_upload_response(&body).unwrap();
    assert_eq!(metadata, super::scenario_metadata());
}

#[test]
fn failed_uploads_keep_previous_metadata() {
    let mut store = MetadataStore::new(MemoryStore::new());
    let good = super::scenario_metadata();
    store.save(&good).unwrap();

    let cases = [
        (false, envelope()),
        (false, "<html>502</html>".to_string()),
        (true, "{\"message\": \"Failed to extract layout from PBIX file\"}".to_string()),
        (true, "{\"report_metadata\": {\"pages\": []}}".to_string()),
        (true, "not json".to_string()),
        (true, "{\"report_metadata\": {\"pages\": \"nope\"}}".to_string()),
    ];
    for (transport_ok, body) in cases {
        let outcome = ingest_upload(&mut store, transport_ok, &body);
        assert_eq!(outcome.status, UploadStatus::Error, "body: {body}");
        assert_eq!(outcome.message, FAILURE_MESSAGE);
        assert!(outcome.detail.is_some());
        assert_eq!(store.load().as_ref(), Some(&good));
    }
}

#[test]
fn upload_errors_are_classified() {
    let mut store = MetadataStore::new(MemoryStore::new());
    let err = try_ingest_upload(&mut store, false, "{\"message\": \"No selected file\"}")
        .unwrap_err();
    assert!(matches!(err, UploadError::Rejected { ref message } if message == "No selected file"));

    let err = try_ingest_upload(&mut store, true, "{\"message\": \"boom\"}").unwrap_err();
    assert!(matches!(err, UploadError::MissingMetadata { ref message } if message == "boom"));

    let err = try_ingest_upload(&mut store, true, "{\"pages\": []}").unwrap_err();
    assert!(matches!(err, UploadError::NoPages));

    let err = try_ingest_upload(&mut store, true, "[").unwrap_err();
    assert!(matches!(err, UploadError::Json(_)));
}

#[test]
fn outcome_serializes_status_in_snake_case() {
    let mut store = MetadataStore::new(MemoryStore::new());
    let outcome = ingest_upload(&mut store, true, &envelope());
    let value = serde_json::to_value(&outcome).unwrap();
    assert_eq!(
        value,
        json!({ "status": "success", "message": "File processed successfully!" })
    );
}
