use super::*;
use crate::StatusTransition;

fn valid_fields() -> ConfigurationFields {
    ConfigurationFields {
        configuration_name: "Access requests".to_string(),
        project_id: "P1".to_string(),
        project_name: "Operations".to_string(),
        issue_type_ids: vec!["T1".to_string(), "T2".to_string()],
        deny_transition_id: Some("99".to_string()),
        statuses_configuration: vec![
            StatusTransition::new("Review", "11"),
            StatusTransition::new("Open", "21"),
        ],
        approve_transition_id: Some("61".to_string()),
    }
}

fn assert_invalid_field(result: ConfigurationResult<()>, expected_field: &str) {
    match result {
        Err(ConfigurationError::InvalidConfiguration { field, .. }) => {
            assert_eq!(field, expected_field)
        }
        other => panic!("Expected InvalidConfiguration for {}, got {:?}", expected_field, other),
    }
}

#[test]
fn test_valid_fields_pass() {
    assert!(validate_fields(&valid_fields()).is_ok());
}

#[test]
fn test_minimal_fields_pass() {
    let fields = ConfigurationFields {
        project_id: "P1".to_string(),
        issue_type_ids: vec!["T1".to_string()],
        ..Default::default()
    };

    assert!(validate_fields(&fields).is_ok());
}

#[test]
fn test_empty_project_rejected() {
    let mut fields = valid_fields();
    fields.project_id = "  ".to_string();

    assert_invalid_field(validate_fields(&fields), "projectId");
}

#[test]
fn test_missing_issue_types_rejected() {
    let mut fields = valid_fields();
    fields.issue_type_ids.clear();

    assert_invalid_field(validate_fields(&fields), "issueTypeIds");
}

#[test]
fn test_duplicate_issue_types_rejected() {
    let mut fields = valid_fields();
    fields.issue_type_ids.push("T1".to_string());

    assert_invalid_field(validate_fields(&fields), "issueTypeIds");
}

#[test]
fn test_blank_deny_transition_rejected() {
    let mut fields = valid_fields();
    fields.deny_transition_id = Some(String::new());

    assert_invalid_field(validate_fields(&fields), "denyTransitionId");
}

#[test]
fn test_blank_approve_transition_rejected() {
    let mut fields = valid_fields();
    fields.approve_transition_id = Some(" ".to_string());

    assert_invalid_field(validate_fields(&fields), "approveTransitionId");
}

#[test]
fn test_duplicate_status_mapping_rejected() {
    let mut fields = valid_fields();
    fields
        .statuses_configuration
        .push(StatusTransition::new("Review", "31"));

    assert_invalid_field(validate_fields(&fields), "statusesConfiguration");
}

#[test]
fn test_status_names_differing_in_case_are_distinct() {
    let mut fields = valid_fields();
    fields
        .statuses_configuration
        .push(StatusTransition::new("review", "31"));

    assert!(validate_fields(&fields).is_ok());
}

#[test]
fn test_find_overlap_reports_shared_issue_types() {
    let existing = vec![
        Configuration::new(
            "other-project",
            ConfigurationFields {
                project_id: "P2".to_string(),
                issue_type_ids: vec!["T1".to_string()],
                ..Default::default()
            },
        ),
        Configuration::new(
            "same-project",
            ConfigurationFields {
                project_id: "P1".to_string(),
                issue_type_ids: vec!["T2".to_string(), "T3".to_string()],
                ..Default::default()
            },
        ),
    ];

    let (found, shared) = find_overlap(&existing, &valid_fields(), None).expect("overlap");

    assert_eq!(found.id, "same-project");
    assert_eq!(shared, vec!["T2".to_string()]);
}

#[test]
fn test_find_overlap_ignores_record_being_updated() {
    let existing = vec![Configuration::new("self", valid_fields())];

    assert!(find_overlap(&existing, &valid_fields(), Some("self")).is_none());
    assert!(find_overlap(&existing, &valid_fields(), None).is_some());
}
