use super::*;
use crate::test_support::configuration;

#[test]
fn test_deny_transition_for_listed_status() {
    let config = configuration("c1", "P1", &["T1"], &[("Review", "11"), ("Open", "21")]);

    assert_eq!(
        StatusTransitionResolver::resolve_deny_transition(&config, "Open"),
        Some("21")
    );
}

#[test]
fn test_deny_unavailable_for_unlisted_status() {
    let config = configuration("c1", "P1", &["T1"], &[("Review", "11")]);

    assert_eq!(
        StatusTransitionResolver::resolve_deny_transition(&config, "Done"),
        None
    );
}

#[test]
fn test_deny_transition_id_is_not_a_fallback() {
    let config = configuration("c1", "P1", &["T1"], &[]);
    assert!(config.fields.deny_transition_id.is_some());

    assert_eq!(
        StatusTransitionResolver::resolve_deny_transition(&config, "Review"),
        None
    );
}

#[test]
fn test_status_match_is_case_sensitive() {
    let config = configuration("c1", "P1", &["T1"], &[("Review", "11")]);

    assert_eq!(
        StatusTransitionResolver::resolve_deny_transition(&config, "review"),
        None
    );
    assert_eq!(
        StatusTransitionResolver::resolve_deny_transition(&config, "Review "),
        None
    );
}

#[test]
fn test_first_matching_entry_wins() {
    let config = configuration("c1", "P1", &["T1"], &[("Review", "11"), ("Review", "12")]);

    assert_eq!(
        StatusTransitionResolver::resolve_deny_transition(&config, "Review"),
        Some("11")
    );
}

#[test]
fn test_deny_resolution_matches_first_entry_for_every_status() {
    let entries = [("Open", "1"), ("Review", "2"), ("Blocked", "3")];
    let config = configuration("c1", "P1", &["T1"], &entries);

    for status in ["Open", "Review", "Blocked", "Done", "OPEN", ""] {
        let expected = entries
            .iter()
            .find(|(name, _)| *name == status)
            .map(|(_, id)| *id);
        assert_eq!(
            StatusTransitionResolver::resolve_deny_transition(&config, status),
            expected,
            "status '{}'",
            status
        );
    }
}

#[test]
fn test_approve_transition_is_optional() {
    let mut config = configuration("c1", "P1", &["T1"], &[]);
    assert_eq!(StatusTransitionResolver::resolve_approve_transition(&config), None);

    config.fields.approve_transition_id = Some("61".to_string());
    assert_eq!(
        StatusTransitionResolver::resolve_approve_transition(&config),
        Some("61")
    );
}
