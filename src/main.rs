use clap::{CommandFactory, Parser, Subcommand};
use sitekit::plugin::{HookEvent, Registry};
use sitekit::store::RecordStore;
use sitekit::{config, output, routes, stage};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let hash = env!("SITEKIT_GIT_HASH");
    if hash.is_empty() {
        env!("CARGO_PKG_VERSION")
    } else {
        // Leaked once at startup — trivial, called exactly once
        Box::leak(format!("{} ({hash})", env!("CARGO_PKG_VERSION")).into_boxed_str())
    }
}

#[derive(Parser)]
#[command(name = "sitekit")]
#[command(about = "Build workflow helper for static sites")]
#[command(long_about = "\
Build workflow helper for static sites

Wraps the chores around a static site: staging the source tree into the
output directory, keeping the users table, generating the route list, and
running build plugins.

Project layout (paths configurable via sitekit.toml):

  sitekit.toml                 # Optional config (all keys optional)
  site/                        # Source tree — pages, components, assets
  dist/                        # Build output, replaced on every build
  routes.json                  # Generated route list
  data/database.db             # SQLite users table
  plugins/                     # Plugin libraries (*.so / *.dylib / *.dll)

Commands are independent and compose only through the filesystem; run them
in any order. The first error aborts the command with a non-zero exit.")]
#[command(version = version_string())]
struct Cli {
    /// Site source directory (overrides sitekit.toml)
    #[arg(long, global = true)]
    site: Option<PathBuf>,

    /// Build output directory (overrides sitekit.toml)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Replace the output directory with a copy of the site source
    Build {
        /// Post-process copied assets (extension point — currently a no-op)
        #[arg(long)]
        minify: bool,
    },
    /// Users database commands
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
    /// Generate the route list from the site source tree
    Routes,
    /// Load plugins and run their lifecycle hooks
    Plugins {
        /// Lifecycle event to dispatch
        #[arg(long, default_value = "build")]
        event: HookEvent,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Create the users table if it does not exist
    Migrate,
    /// Append the fixture user rows
    Seed,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // An unknown subcommand gets the usage help, same as no subcommand
        Err(err) if err.kind() == clap::error::ErrorKind::InvalidSubcommand => {
            Cli::command().print_help()?;
            return Ok(());
        }
        Err(err) => err.exit(),
    };

    let mut config = config::SiteConfig::load(Path::new("."))?;
    if let Some(site) = cli.site {
        config.site_dir = site;
    }
    if let Some(out) = cli.output {
        config.output_dir = out;
    }

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Command::Build { minify } => {
            let summary = stage::stage(&config.site_dir, &config.output_dir, minify)?;
            output::print_stage_output(&summary, &config.site_dir, &config.output_dir);
        }
        Command::Db { action } => {
            let store = RecordStore::open(&config.database_path)?;
            match action {
                DbAction::Migrate => {
                    store.ensure_schema()?;
                    output::print_migrate_output(&config.database_path);
                }
                DbAction::Seed => {
                    let inserted = store.seed_fixtures()?;
                    let total = store.user_count()?;
                    output::print_seed_output(inserted, total);
                }
            }
        }
        Command::Routes => {
            let count = routes::write_routes(&config.site_dir, &config.routes_file)?;
            output::print_routes_output(count, &config.routes_file);
        }
        Command::Plugins { event } => {
            let mut registry = Registry::new();
            registry.load_dir(&config.plugin_dir)?;
            let report = registry.run_hooks(event)?;
            output::print_plugins_output(&report);
        }
    }

    Ok(())
}
