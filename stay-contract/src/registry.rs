//! Scenario registry and the context scenarios run against

use crate::error::{FixtureError, RegistrationError, ScenarioError};
use std::collections::BTreeMap;
use std::fmt;
use stay_http_client::{
    ApiClient, Auth, BookingService, PropertyService, Role, RoleCredentials,
};

// ============================================================================
// Suites
// ============================================================================

/// Resource a scenario exercises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suite {
    Property,
    Booking,
}

impl Suite {
    /// Every suite, in run order
    pub const ALL: [Suite; 2] = [Suite::Property, Suite::Booking];

    /// Lower-case name used on the command line
    pub fn name(self) -> &'static str {
        match self {
            Suite::Property => "property",
            Suite::Booking => "booking",
        }
    }

    /// Look up a suite by name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|suite| suite.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Context
// ============================================================================

/// Everything a scenario may use: the client and the configured credentials
///
/// Nothing here is mutable, so scenarios cannot leak state into each other.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioContext<'a> {
    client: &'a ApiClient,
    credentials: &'a RoleCredentials,
}

impl<'a> ScenarioContext<'a> {
    pub fn new(client: &'a ApiClient, credentials: &'a RoleCredentials) -> Self {
        Self {
            client,
            credentials,
        }
    }

    pub fn client(&self) -> &'a ApiClient {
        self.client
    }

    pub fn properties(&self) -> PropertyService<'a> {
        PropertyService::new(self.client)
    }

    pub fn bookings(&self) -> BookingService<'a> {
        BookingService::new(self.client)
    }

    /// Valid credentials for `role`
    ///
    /// A role without credentials is a setup gap, not a transport failure.
    pub fn auth(&self, role: Role) -> Result<Auth, FixtureError> {
        self.credentials
            .auth_for(role)
            .map_err(|_| FixtureError::MissingCredentials(role))
    }

    /// Valid admin credentials
    pub fn admin(&self) -> Result<Auth, FixtureError> {
        self.auth(Role::Admin)
    }
}

// ============================================================================
// Scenarios and plugins
// ============================================================================

/// Signature of a scenario body
pub type ScenarioFn = fn(&ScenarioContext<'_>) -> Result<(), ScenarioError>;

/// A registered scenario
#[derive(Clone, Copy)]
pub struct Scenario {
    pub name: &'static str,
    pub suite: Suite,
    pub tags: &'static [&'static str],
    run: ScenarioFn,
}

impl Scenario {
    /// Run the scenario body
    pub fn run(&self, context: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
        (self.run)(context)
    }

    /// Whether the scenario carries `tag`
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

impl fmt::Debug for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .field("suite", &self.suite)
            .field("tags", &self.tags)
            .finish_non_exhaustive()
    }
}

/// Scenario submitted for automatic registration
///
/// # Example
///
/// ```
/// use stay_contract::{ScenarioContext, ScenarioError, ScenarioPlugin, Suite};
///
/// fn list_properties(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
///     ctx.properties().retrieve_all(&ctx.admin()?)?;
///     Ok(())
/// }
///
/// # fn main() {}
/// stay_contract::inventory::submit! {
///     ScenarioPlugin {
///         name: "list_properties",
///         suite: Suite::Property,
///         tags: &["positive"],
///         run: list_properties,
///     }
/// }
/// ```
pub struct ScenarioPlugin {
    /// Unique scenario name
    pub name: &'static str,
    /// Resource the scenario exercises
    pub suite: Suite,
    /// Tags for filtering, e.g. `positive`, `security`
    pub tags: &'static [&'static str],
    /// Scenario body
    pub run: ScenarioFn,
}

inventory::collect!(ScenarioPlugin);

// ============================================================================
// Registry
// ============================================================================

/// Builder for a [`ScenarioRegistry`]; rejects duplicate names
///
/// # Example
///
/// ```no_run
/// # use stay_contract::ScenarioRegistryBuilder;
/// let registry = ScenarioRegistryBuilder::new()
///     .register_plugins(|plugin| plugin.tags.contains(&"security"))
///     .unwrap()
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct ScenarioRegistryBuilder {
    scenarios: BTreeMap<&'static str, Scenario>,
}

impl ScenarioRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scenario under a unique name
    pub fn register(
        mut self,
        name: &'static str,
        suite: Suite,
        tags: &'static [&'static str],
        run: ScenarioFn,
    ) -> Result<Self, RegistrationError> {
        if self.scenarios.contains_key(name) {
            return Err(RegistrationError::DuplicateScenario(name));
        }
        self.scenarios.insert(
            name,
            Scenario {
                name,
                suite,
                tags,
                run,
            },
        );
        Ok(self)
    }

    /// Register every submitted plugin
    pub fn register_all_plugins(self) -> Result<Self, RegistrationError> {
        self.register_plugins(|_| true)
    }

    /// Register the submitted plugins matching `filter`
    pub fn register_plugins<F>(mut self, filter: F) -> Result<Self, RegistrationError>
    where
        F: Fn(&ScenarioPlugin) -> bool,
    {
        for plugin in inventory::iter::<ScenarioPlugin>() {
            if filter(plugin) {
                self = self.register(plugin.name, plugin.suite, plugin.tags, plugin.run)?;
            }
        }
        Ok(self)
    }

    /// Freeze the registry, ordered by suite then name
    pub fn build(self) -> ScenarioRegistry {
        let mut scenarios: Vec<Scenario> = self.scenarios.into_values().collect();
        scenarios.sort_by_key(|scenario| (scenario.suite, scenario.name));
        ScenarioRegistry { scenarios }
    }
}

/// Immutable, ordered set of scenarios
#[derive(Debug, Default)]
pub struct ScenarioRegistry {
    scenarios: Vec<Scenario>,
}

impl ScenarioRegistry {
    pub fn iter(&self) -> impl Iterator<Item = &Scenario> + '_ {
        self.scenarios.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|scenario| scenario.name == name)
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}
