//! Tests for gate error types and their conversion from configuration errors.

use super::*;

#[test]
fn test_configuration_not_found_maps_to_not_found() {
    let error: GateError = ConfigurationError::NotFound {
        id: "abc".to_string(),
    }
    .into();

    assert_eq!(
        error,
        GateError::NotFound {
            id: "abc".to_string()
        }
    );
}

#[test]
fn test_invalid_configuration_maps_to_validation() {
    let error: GateError = ConfigurationError::InvalidConfiguration {
        field: "issueTypeIds".to_string(),
        reason: "must contain at least one issue type".to_string(),
    }
    .into();

    assert_eq!(
        error.to_string(),
        "Invalid issueTypeIds: must contain at least one issue type"
    );
}

#[test]
fn test_overlapping_scope_keeps_details() {
    let error: GateError = ConfigurationError::OverlappingScope {
        existing_id: "first".to_string(),
        project_id: "P1".to_string(),
        issue_type_ids: vec!["T1".to_string()],
    }
    .into();

    match error {
        GateError::OverlappingScope {
            existing_id,
            issue_type_ids,
            ..
        } => {
            assert_eq!(existing_id, "first");
            assert_eq!(issue_type_ids, vec!["T1".to_string()]);
        }
        other => panic!("Expected OverlappingScope, got {:?}", other),
    }
}

#[test]
fn test_store_failures_map_to_persistence() {
    for source in [
        ConfigurationError::StoreReadFailed {
            reason: "disk".to_string(),
        },
        ConfigurationError::StoreWriteFailed {
            reason: "disk".to_string(),
        },
        ConfigurationError::ParseError {
            reason: "bad json".to_string(),
        },
    ] {
        let error: GateError = source.into();
        assert!(matches!(error, GateError::Persistence { .. }));
        assert!(error.is_upstream());
    }
}

#[test]
fn test_remote_query_carries_tracker_status() {
    let tracker_error = tracker_client::Error::UnexpectedStatus {
        status: 503,
        body: "maintenance".to_string(),
    };

    let error = GateError::remote_query(&tracker_error);

    match error {
        GateError::RemoteQuery { status, reason } => {
            assert_eq!(status, Some(503));
            assert!(reason.contains("maintenance"));
        }
        other => panic!("Expected RemoteQuery, got {:?}", other),
    }
}

#[test]
fn test_illegal_transition_is_not_upstream() {
    let error = GateError::IllegalTransition {
        issue_key: "ISSUE-1".to_string(),
        transition_id: "31".to_string(),
    };

    assert!(!error.is_upstream());
    assert_eq!(
        error.to_string(),
        "Transition '31' is not currently available for issue ISSUE-1"
    );
}

#[test]
fn test_action_unavailable_names_action() {
    let error = GateError::ActionUnavailable {
        issue_key: "ISSUE-1".to_string(),
        action: GateAction::Deny,
    };

    assert_eq!(
        error.to_string(),
        "The deny action is not available for issue ISSUE-1"
    );
}
