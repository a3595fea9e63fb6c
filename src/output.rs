//! CLI output formatting for all commands.
//!
//! Each command has a `format_*` function that returns the lines to print
//! and a `print_*` wrapper that writes them to stdout. Format functions are
//! pure — no I/O, no side effects — so tests assert on exact lines without
//! capturing stdout.
//!
//! The display leads with what happened (counts, outcomes) and shows paths
//! as secondary context:
//!
//! ```text
//! $ sitekit build
//! Staged 12 files (3 directories)
//!     site → dist
//!
//! $ sitekit routes
//! Generated 5 routes → routes.json
//!
//! $ sitekit plugins
//! Ran 2 build hooks (1 plugin without one)
//!     ok  sitemap
//!     ok  feed
//!     --  analytics
//! ```

use crate::plugin::HookReport;
use crate::stage::StageSummary;
use std::path::Path;

// ============================================================================
// build
// ============================================================================

/// Format the staging result: counts first, the copied paths as context.
pub fn format_stage_output(summary: &StageSummary, source: &Path, output: &Path) -> Vec<String> {
    let mut lines = vec![
        format!("Staged {} files ({} directories)", summary.files, summary.dirs),
        format!("    {} → {}", source.display(), output.display()),
    ];
    if summary.minify {
        lines.push("    Minify: requested (no transform passes configured)".to_string());
    }
    lines
}

pub fn print_stage_output(summary: &StageSummary, source: &Path, output: &Path) {
    for line in format_stage_output(summary, source, output) {
        println!("{}", line);
    }
}

// ============================================================================
// db
// ============================================================================

pub fn format_migrate_output(database: &Path) -> Vec<String> {
    vec![
        "Users table ready".to_string(),
        format!("    Database: {}", database.display()),
    ]
}

pub fn print_migrate_output(database: &Path) {
    for line in format_migrate_output(database) {
        println!("{}", line);
    }
}

pub fn format_seed_output(inserted: usize, total: usize) -> Vec<String> {
    vec![format!(
        "Inserted {} fixture users ({} total)",
        inserted, total
    )]
}

pub fn print_seed_output(inserted: usize, total: usize) {
    for line in format_seed_output(inserted, total) {
        println!("{}", line);
    }
}

// ============================================================================
// routes
// ============================================================================

pub fn format_routes_output(count: usize, routes_file: &Path) -> Vec<String> {
    vec![format!(
        "Generated {} routes → {}",
        count,
        routes_file.display()
    )]
}

pub fn print_routes_output(count: usize, routes_file: &Path) {
    for line in format_routes_output(count, routes_file) {
        println!("{}", line);
    }
}

// ============================================================================
// plugins
// ============================================================================

/// Format a hook run: the invoked/skipped summary, then one line per plugin
/// in execution order (`ok` ran, `--` had no hook for the event).
pub fn format_plugins_output(report: &HookReport) -> Vec<String> {
    let skipped = report.skipped();
    let suffix = match skipped {
        0 => String::new(),
        1 => " (1 plugin without one)".to_string(),
        n => format!(" ({} plugins without one)", n),
    };

    let mut lines = vec![format!(
        "Ran {} {} hooks{}",
        report.invoked(),
        report.event,
        suffix
    )];
    for outcome in &report.outcomes {
        let marker = if outcome.invoked { "ok" } else { "--" };
        lines.push(format!("    {}  {}", marker, outcome.plugin));
    }
    lines
}

pub fn print_plugins_output(report: &HookReport) {
    for line in format_plugins_output(report) {
        println!("{}", line);
    }
}
