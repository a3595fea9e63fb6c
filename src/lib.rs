//! # sitekit
//!
//! A thin command-line helper for a static site build workflow. The site
//! itself is plain files on disk; sitekit wraps the handful of chores that
//! surround it: staging the source tree into the output directory, keeping a
//! small user table, emitting the route list consumed by the dev server, and
//! running build plugins.
//!
//! # Commands
//!
//! ```text
//! sitekit build [--minify]      site/  →  dist/        (full replacement copy)
//! sitekit db <migrate|seed>     data/database.db       (users table)
//! sitekit routes                site/  →  routes.json  (page/component routes)
//! sitekit plugins [--event e]   plugins/               (lifecycle hooks)
//! ```
//!
//! The four commands are independent: none reads another's in-process state,
//! and they compose only through the filesystem. Every command is a single
//! synchronous pass that runs to completion or fails; there is no retry, no
//! partial rollback, and the first error aborts the command with a non-zero
//! exit.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`stage`] | Replaces the output directory with a copy of the site source |
//! | [`store`] | SQLite-backed user record table (schema + fixture rows) |
//! | [`routes`] | Walks the site tree and serializes the route list to JSON |
//! | [`plugin`] | Plugin registry, checked dynamic loading, lifecycle hooks |
//! | [`config`] | `sitekit.toml` loading — every path the commands touch |
//! | [`output`] | CLI output formatting — pure `format_*` + `print_*` wrappers |
//!
//! # Design Decisions
//!
//! ## Explicit Paths, No Process-Wide State
//!
//! Every directory and file a command touches comes from a [`config::SiteConfig`]
//! value passed in at the call site. Tests substitute temporary paths without
//! any environment or global setup.
//!
//! ## Deterministic Ordering
//!
//! Directory listing order is platform-dependent, so both the route walk and
//! plugin discovery sort entries lexicographically by file name. Route lists
//! and hook execution order are therefore stable across runs and platforms.
//!
//! ## Checked Plugin Registration
//!
//! Plugins are dynamic libraries, but loading is not open-ended execution:
//! each library must export a declaration under a fixed symbol (via
//! [`declare_plugin!`]), and the host verifies the symbol and API version
//! before any plugin code runs. Load failures are classified separately from
//! hook failures.

pub mod config;
pub mod output;
pub mod plugin;
pub mod routes;
pub mod stage;
pub mod store;

#[cfg(test)]
pub(crate) mod test_helpers;
