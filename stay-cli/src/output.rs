//! Output formatting for scenario reports

use crate::runner::ScenarioReport;
use std::collections::BTreeMap;
use stay_contract::ScenarioRegistry;

/// Output formatter for scenario reports
pub struct OutputFormatter {
    quiet: bool,
    start_time: std::time::Instant,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: std::time::Instant::now(),
        }
    }

    /// Print a single report; failures go to stderr
    pub fn print_report(&self, report: &ScenarioReport) {
        let line = if self.quiet {
            render_quiet(report)
        } else {
            render_full(report)
        };
        if report.passed() {
            println!("{}", line);
        } else {
            eprintln!("{}", line);
        }
    }

    /// Print a summary after all reports
    pub fn print_summary(&self, reports: &[ScenarioReport]) {
        if self.quiet {
            return;
        }
        println!();
        print!("{}", render_summary(reports, self.start_time.elapsed()));
    }
}

/// Print the scenarios a run would execute
pub fn print_listing(registry: &ScenarioRegistry) {
    print!("{}", render_listing(registry));
}

fn render_quiet(report: &ScenarioReport) -> String {
    let status = if report.passed() { "PASS" } else { "FAIL" };
    format!("{} {}/{}", status, report.suite, report.name)
}

fn render_full(report: &ScenarioReport) -> String {
    let prefix = format!("{}/{}", report.suite, report.name);
    let timing = format_std_duration(report.duration);
    match &report.outcome {
        Ok(()) => format!("[PASS] {} ({})", prefix, timing),
        Err(e) => {
            let details: String = e
                .to_string()
                .lines()
                .map(|line| format!("\n    {}", line.trim_start()))
                .collect();
            format!("[FAIL] {} ({}){}", prefix, timing, details)
        }
    }
}

fn render_listing(registry: &ScenarioRegistry) -> String {
    let mut out = String::new();
    for scenario in registry.iter() {
        out.push_str(&format!("{}/{}", scenario.suite, scenario.name));
        if !scenario.tags.is_empty() {
            out.push_str(&format!(" [{}]", scenario.tags.join(", ")));
        }
        out.push('\n');
    }
    out.push_str(&format!("{} scenario(s)\n", registry.len()));
    out
}

fn render_summary(reports: &[ScenarioReport], elapsed: std::time::Duration) -> String {
    let total = reports.len();
    let passed = reports.iter().filter(|r| r.passed()).count();
    let failed = total - passed;

    let mut by_kind: BTreeMap<&str, usize> = BTreeMap::new();
    for kind in reports.iter().filter_map(ScenarioReport::failure_kind) {
        *by_kind.entry(kind).or_default() += 1;
    }

    let scenario_time: std::time::Duration = reports.iter().map(|r| r.duration).sum();
    let finished_at = chrono::Local::now().format("%H:%M:%S");

    let mut out = String::from("--- Summary ---\n");
    out.push_str(&format!("Scenarios: {} passed, {} failed\n", passed, failed));
    for (kind, count) in &by_kind {
        out.push_str(&format!("  {} failure(s): {}\n", kind, count));
    }
    out.push_str(&format!(
        "Total scenario time: {}\n",
        format_std_duration(scenario_time)
    ));
    out.push_str(&format!(
        "Elapsed wall-clock time: {} (finished {})\n",
        format_std_duration(elapsed),
        finished_at
    ));
    out
}

/// Format a std::time::Duration for display
fn format_std_duration(d: std::time::Duration) -> String {
    let micros = d.as_micros();
    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}
