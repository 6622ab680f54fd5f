//! Booking API contract scenarios with automatic registration
//!
//! Each scenario is a plain function submitted to the scenario registry
//! through `inventory`. Linking this crate is enough for the CLI to find them.
//!
//! Tags follow the usual groups: `positive`, `negative`, `security` and
//! `regression`.

/// Submit a scenario function under its own name
macro_rules! scenario {
    ($suite:ident, $name:ident, [$($tag:literal),* $(,)?]) => {
        stay_contract::inventory::submit! {
            stay_contract::ScenarioPlugin {
                name: stringify!($name),
                suite: stay_contract::Suite::$suite,
                tags: &[$($tag),*],
                run: $name,
            }
        }
    };
}

#[cfg(feature = "booking")]
pub mod booking;

#[cfg(feature = "property")]
pub mod property;
