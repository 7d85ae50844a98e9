//! Validation of authored configuration fields.

use std::collections::HashSet;

use crate::{Configuration, ConfigurationError, ConfigurationFields, ConfigurationResult};

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;

/// Checks that `fields` describe a meaningful rule.
///
/// # Errors
///
/// Returns `ConfigurationError::InvalidConfiguration` naming the first offending field.
pub fn validate_fields(fields: &ConfigurationFields) -> ConfigurationResult<()> {
    if fields.project_id.trim().is_empty() {
        return Err(ConfigurationError::invalid("projectId", "must not be empty"));
    }

    if fields.issue_type_ids.is_empty() {
        return Err(ConfigurationError::invalid(
            "issueTypeIds",
            "must contain at least one issue type",
        ));
    }

    let mut seen_types = HashSet::new();
    for issue_type in &fields.issue_type_ids {
        if issue_type.trim().is_empty() {
            return Err(ConfigurationError::invalid(
                "issueTypeIds",
                "must not contain empty identifiers",
            ));
        }
        if !seen_types.insert(issue_type.as_str()) {
            return Err(ConfigurationError::invalid(
                "issueTypeIds",
                format!("issue type '{}' is listed more than once", issue_type),
            ));
        }
    }

    if let Some(deny) = &fields.deny_transition_id {
        if deny.trim().is_empty() {
            return Err(ConfigurationError::invalid(
                "denyTransitionId",
                "must not be empty when set",
            ));
        }
    }

    if let Some(approve) = &fields.approve_transition_id {
        if approve.trim().is_empty() {
            return Err(ConfigurationError::invalid(
                "approveTransitionId",
                "must not be empty when set",
            ));
        }
    }

    let mut seen_statuses = HashSet::new();
    for entry in &fields.statuses_configuration {
        if entry.status_name.is_empty() || entry.transition_id.trim().is_empty() {
            return Err(ConfigurationError::invalid(
                "statusesConfiguration",
                "entries need both a status name and a transition id",
            ));
        }
        // Each status maps to exactly one deny transition.
        if !seen_statuses.insert(entry.status_name.as_str()) {
            return Err(ConfigurationError::invalid(
                "statusesConfiguration",
                format!("status '{}' is mapped more than once", entry.status_name),
            ));
        }
    }

    Ok(())
}

/// Finds the first existing configuration whose scope overlaps `fields`.
///
/// Two configurations overlap when they target the same project and share at least one
/// issue type. The record with id `ignore_id` (the one being updated) is skipped.
/// Returns the overlapping configuration together with the shared issue types.
pub fn find_overlap<'a>(
    existing: &'a [Configuration],
    fields: &ConfigurationFields,
    ignore_id: Option<&str>,
) -> Option<(&'a Configuration, Vec<String>)> {
    existing
        .iter()
        .filter(|c| Some(c.id.as_str()) != ignore_id)
        .filter(|c| c.project_id() == fields.project_id)
        .find_map(|c| {
            let shared: Vec<String> = fields
                .issue_type_ids
                .iter()
                .filter(|t| c.issue_type_ids().contains(*t))
                .cloned()
                .collect();
            (!shared.is_empty()).then_some((c, shared))
        })
}
