use super::*;
use serde_json::{from_str, json, to_value};

#[test]
fn test_project_deserialization() {
    let json_str = r#"{
        "id": "10000",
        "key": "OPS",
        "name": "Operations",
        "projectTypeKey": "software",
        "simplified": false
    }"#;

    let project: Project = from_str(json_str).expect("Failed to deserialize Project");

    assert_eq!(project.id, "10000");
    assert_eq!(project.key, "OPS");
    assert_eq!(project.name, "Operations");
}

#[test]
fn test_issue_type_defaults_subtask_to_false() {
    let issue_type: IssueType =
        from_str(r#"{"id": "10001", "name": "Task"}"#).expect("Failed to deserialize IssueType");

    assert_eq!(issue_type.name, "Task");
    assert!(!issue_type.subtask);
}

#[test]
fn test_issue_status_reads_category() {
    let json_str = r#"{
        "self": "https://example.atlassian.net/rest/api/3/status/3",
        "id": "3",
        "name": "In Review",
        "statusCategory": { "id": 4, "key": "indeterminate", "name": "In Progress" }
    }"#;

    let status: IssueStatus = from_str(json_str).expect("Failed to deserialize IssueStatus");

    assert_eq!(status.name, "In Review");
    let category = status.status_category.expect("category should be present");
    assert_eq!(category.key, "indeterminate");
}

#[test]
fn test_transition_deserialization_with_target_status() {
    let json_str = r#"{
        "id": "61",
        "name": "Approve",
        "to": { "id": "10002", "name": "Approved" },
        "hasScreen": false
    }"#;

    let transition: Transition = from_str(json_str).expect("Failed to deserialize Transition");

    assert_eq!(transition.id, "61");
    assert_eq!(transition.to.map(|s| s.name), Some("Approved".to_string()));
}

#[test]
fn test_project_search_page_defaults_to_last_page() {
    let page: ProjectSearchPage = from_str(r#"{"values": []}"#).unwrap();

    assert!(page.is_last);
    assert!(page.values.is_empty());
}

#[test]
fn test_transition_request_serialization() {
    let request = TransitionRequest {
        transition: TransitionReference { id: "11" },
    };

    let value = to_value(&request).expect("Failed to serialize TransitionRequest");

    assert_eq!(value, json!({ "transition": { "id": "11" } }));
}
