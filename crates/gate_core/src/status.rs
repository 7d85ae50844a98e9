//! Maps an issue's current status to the transition each gate action invokes.

use gate_config::Configuration;

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;

/// Picks transition ids out of a matched configuration.
pub struct StatusTransitionResolver;

impl StatusTransitionResolver {
    /// Transition id of the deny action while the issue is in `current_status`.
    ///
    /// Status names compare exactly and case-sensitively; the first matching entry of
    /// `statusesConfiguration` wins. `None` means the deny action is unavailable. The
    /// configuration's `denyTransitionId` is not used as a fallback.
    pub fn resolve_deny_transition<'a>(
        configuration: &'a Configuration,
        current_status: &str,
    ) -> Option<&'a str> {
        configuration
            .statuses()
            .iter()
            .find(|entry| entry.status_name == current_status)
            .map(|entry| entry.transition_id.as_str())
    }

    /// Transition id of the approve action, when the configuration defines one.
    pub fn resolve_approve_transition(configuration: &Configuration) -> Option<&str> {
        configuration.fields.approve_transition_id.as_deref()
    }
}
