use super::*;
use std::error::Error as StdError;

#[test]
fn test_auth_error() {
    let error = Error::AuthError("Invalid credentials".to_string());

    assert_eq!(
        error.to_string(),
        "Failed to authenticate with the issue tracker: Invalid credentials"
    );
    assert!(error.source().is_none());
    assert_eq!(error.status_code(), None);
}

#[test]
fn test_invalid_path_segment_error() {
    let error = Error::InvalidPathSegment("..".to_string());

    assert_eq!(
        error.to_string(),
        "'..' is not a valid path segment for a tracker request"
    );
    assert!(error.source().is_none());
    assert_eq!(error.status_code(), None);
}

#[test]
fn test_not_found_reports_404() {
    let error = Error::NotFound;

    assert_eq!(error.to_string(), "Resource not found");
    assert_eq!(error.status_code(), Some(404));
}

#[test]
fn test_unexpected_status_error() {
    let error = Error::UnexpectedStatus {
        status: 400,
        body: "{\"errorMessages\":[\"bad transition\"]}".to_string(),
    };

    assert_eq!(
        error.to_string(),
        "Issue tracker returned HTTP 400: {\"errorMessages\":[\"bad transition\"]}"
    );
    assert_eq!(error.status_code(), Some(400));
}

#[test]
fn test_deserialization_error_has_source() {
    let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let error = Error::from(json_err);

    assert!(error
        .to_string()
        .starts_with("Failed to deserialize tracker response"));
    assert!(error.source().is_some());
}

#[test]
fn test_error_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Error>();
}
