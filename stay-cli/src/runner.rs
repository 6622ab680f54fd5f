//! Sequential scenario execution

use std::time::{Duration, Instant};
use stay_contract::{Scenario, ScenarioContext, ScenarioError, ScenarioPlugin, ScenarioRegistry, Suite};
use tracing::{info, warn};

/// Which scenarios to run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Only this suite
    pub suite: Option<Suite>,
    /// All of these tags must be present
    pub tags: Vec<String>,
    /// Name substring
    pub name: Option<String>,
}

impl Selection {
    pub fn matches(&self, plugin: &ScenarioPlugin) -> bool {
        self.suite.is_none_or(|suite| suite == plugin.suite)
            && self
                .tags
                .iter()
                .all(|tag| plugin.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)))
            && self
                .name
                .as_deref()
                .is_none_or(|name| plugin.name.contains(name))
    }
}

/// Outcome of one scenario
#[derive(Debug)]
pub struct ScenarioReport {
    pub name: &'static str,
    pub suite: Suite,
    pub outcome: Result<(), ScenarioError>,
    pub duration: Duration,
}

impl ScenarioReport {
    pub fn passed(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Short label for the kind of failure, `None` when passed
    pub fn failure_kind(&self) -> Option<&'static str> {
        match &self.outcome {
            Ok(()) => None,
            Err(ScenarioError::Assertions(_)) => Some("assertion"),
            Err(ScenarioError::Transport(_)) => Some("transport"),
            Err(ScenarioError::Fixture(_)) => Some("fixture"),
            Err(ScenarioError::Other(_)) => Some("other"),
        }
    }
}

/// Run a single scenario, timing it
pub fn run_scenario(scenario: &Scenario, context: &ScenarioContext<'_>) -> ScenarioReport {
    info!(scenario = scenario.name, suite = %scenario.suite, "scenario started");
    let start = Instant::now();
    let outcome = scenario.run(context);
    let duration = start.elapsed();

    match &outcome {
        Ok(()) => info!(scenario = scenario.name, ?duration, "scenario passed"),
        Err(e) => warn!(scenario = scenario.name, ?duration, error = %e, "scenario failed"),
    }

    ScenarioReport {
        name: scenario.name,
        suite: scenario.suite,
        outcome,
        duration,
    }
}

/// Run every registered scenario in order, handing each report to `on_report`
pub fn run_all<F>(
    registry: &ScenarioRegistry,
    context: &ScenarioContext<'_>,
    mut on_report: F,
) -> Vec<ScenarioReport>
where
    F: FnMut(&ScenarioReport),
{
    registry
        .iter()
        .map(|scenario| {
            let report = run_scenario(scenario, context);
            on_report(&report);
            report
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stay_contract::{AssertionErrors, AssertionFailure, ScenarioRegistryBuilder};
    use stay_http_client::{ApiClient, RoleCredentials};

    fn passes(_: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
        Ok(())
    }

    fn fails(_: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
        Err(AssertionErrors {
            checks: 1,
            failures: vec![AssertionFailure {
                message: "Alias mismatch".to_string(),
                location: "x.rs:1".to_string(),
            }],
        }
        .into())
    }

    fn needs_admin(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
        ctx.admin()?;
        Ok(())
    }

    fn plugin(name: &'static str, suite: Suite, tags: &'static [&'static str]) -> ScenarioPlugin {
        ScenarioPlugin {
            name,
            suite,
            tags,
            run: passes,
        }
    }

    #[test]
    fn test_empty_selection_matches_everything() {
        let selection = Selection::default();
        assert!(selection.matches(&plugin("a", Suite::Property, &[])));
        assert!(selection.matches(&plugin("b", Suite::Booking, &["negative"])));
    }

    #[test]
    fn test_selection_requires_all_tags() {
        let selection = Selection {
            tags: vec!["negative".to_string(), "Security".to_string()],
            ..Default::default()
        };
        assert!(selection.matches(&plugin("a", Suite::Property, &["negative", "security"])));
        assert!(!selection.matches(&plugin("b", Suite::Property, &["negative"])));
    }

    #[test]
    fn test_selection_by_suite_and_name() {
        let selection = Selection {
            suite: Some(Suite::Booking),
            name: Some("credentials".to_string()),
            ..Default::default()
        };
        assert!(selection.matches(&plugin(
            "list_bookings_with_invalid_credentials",
            Suite::Booking,
            &[]
        )));
        assert!(!selection.matches(&plugin(
            "create_property_with_invalid_credentials",
            Suite::Property,
            &[]
        )));
        assert!(!selection.matches(&plugin("retrieve_unknown_booking", Suite::Booking, &[])));
    }

    #[test]
    fn test_run_all_reports_in_registry_order() {
        let registry = ScenarioRegistryBuilder::new()
            .register("b_fails", Suite::Booking, &[], fails)
            .unwrap()
            .register("a_passes", Suite::Property, &[], passes)
            .unwrap()
            .register("c_needs_admin", Suite::Property, &[], needs_admin)
            .unwrap()
            .build();
        let client = ApiClient::new().unwrap();
        let credentials = RoleCredentials::new();
        let context = ScenarioContext::new(&client, &credentials);

        let mut seen = Vec::new();
        let reports = run_all(&registry, &context, |report| seen.push(report.name));

        assert_eq!(seen, vec!["a_passes", "c_needs_admin", "b_fails"]);
        let kinds: Vec<_> = reports.iter().map(ScenarioReport::failure_kind).collect();
        assert_eq!(kinds, vec![None, Some("fixture"), Some("assertion")]);
        assert!(reports[0].passed());
    }
}
