//! stay-check - Command-line runner for booking API contract scenarios

mod cli;
mod config;
mod error;
mod logging;
mod output;
mod runner;

// Import stay-scenarios to link the scenario plugins
use stay_scenarios as _;

use clap::Parser;
use cli::Args;
use config::Config;
use error::CliError;
use output::OutputFormatter;
use runner::Selection;
use stay_contract::{ScenarioContext, ScenarioRegistry, ScenarioRegistryBuilder};
use stay_http_client::ApiClient;
use tracing::info;

fn main() {
    let args = Args::parse();

    match run(args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Returns whether every selected scenario passed
fn run(args: Args) -> Result<bool, CliError> {
    logging::init(&args.log_level, args.log_file.as_deref())?;

    let selection = Selection {
        suite: args.suite.map(Into::into),
        tags: args.tags.clone(),
        name: args.name.clone(),
    };
    let registry = build_registry(&selection)?;
    if registry.is_empty() {
        println!("No scenarios found matching the specified filters.");
        return Ok(true);
    }

    if args.list {
        output::print_listing(&registry);
        return Ok(true);
    }

    let config = Config::from_args(&args)?;
    info!(
        base_url = %config.base_url,
        settings = %config.settings_path.display(),
        environment = %args.environment,
        "starting run"
    );

    let client = ApiClient::builder()
        .base_url(config.base_url.as_str())?
        .timeout(config.timeout)
        .build()?;
    let context = ScenarioContext::new(&client, &config.credentials);

    if !args.quiet {
        println!("Running {} scenario(s) against {}...", registry.len(), client.base_url());
    }

    let formatter = OutputFormatter::new(args.quiet);
    let reports = runner::run_all(&registry, &context, |report| formatter.print_report(report));
    formatter.print_summary(&reports);

    Ok(reports.iter().all(runner::ScenarioReport::passed))
}

/// Build the registry of scenarios matching `selection`
fn build_registry(selection: &Selection) -> Result<ScenarioRegistry, CliError> {
    Ok(ScenarioRegistryBuilder::new()
        .register_plugins(|plugin| selection.matches(plugin))?
        .build())
}
