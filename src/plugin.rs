//! Plugin registry, checked dynamic loading, and lifecycle hooks.
//!
//! Plugins extend the build workflow without touching sitekit itself: drop a
//! dynamic library into the plugin directory and `sitekit plugins` will load
//! it and run its hook. A plugin crate builds with `crate-type = ["cdylib"]`,
//! depends on sitekit as a library, and exports its declaration with
//! [`declare_plugin!`]:
//!
//! ```ignore
//! use sitekit::plugin::{HookEvent, LifecycleHook, Plugin, PluginInfo, Registrar};
//!
//! struct Greeter;
//!
//! impl LifecycleHook for Greeter {
//!     fn run(&self) -> Result<(), sitekit::plugin::HookError> {
//!         println!("hello from the build hook");
//!         Ok(())
//!     }
//! }
//!
//! impl Plugin for Greeter {
//!     fn info(&self) -> PluginInfo {
//!         PluginInfo { name: "greeter".into(), version: Some("1.0.0".into()) }
//!     }
//!     fn hook(&self, event: HookEvent) -> Option<&dyn LifecycleHook> {
//!         (event == HookEvent::Build).then_some(self as &dyn LifecycleHook)
//!     }
//! }
//!
//! unsafe extern "C" fn register(registrar: &mut dyn Registrar) {
//!     registrar.register(Box::new(Greeter));
//! }
//!
//! sitekit::declare_plugin!(register);
//! ```
//!
//! ## Checked Registration
//!
//! Loading never executes arbitrary library code blindly. The host resolves
//! the fixed declaration symbol, checks [`PLUGIN_API_VERSION`], and only then
//! calls the declared `register` function. Failures are classified before any
//! hook runs: a file that isn't a loadable library ([`PluginError::Open`]), a
//! library without the declaration ([`PluginError::MissingDeclaration`]), or
//! one built against another API revision ([`PluginError::ApiVersionMismatch`]).
//!
//! ## Hooks
//!
//! A plugin may expose at most one hook per [`HookEvent`]; plugins without a
//! hook for the dispatched event are skipped silently. Hooks run in
//! registration order (discovery sorts library file names lexicographically).
//! No return value is collected, no isolation is provided — a hook runs with
//! full access to the host process, and the first hook error halts the
//! remaining plugins and surfaces with the plugin's name attached.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use libloading::Library;
use thiserror::Error;

/// Error type hooks return. Plugins bring their own error values.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Bumped whenever the `Plugin` trait or declaration layout changes.
/// Libraries built against another revision are rejected at load time.
pub const PLUGIN_API_VERSION: u32 = 1;

/// Symbol name every plugin library must export.
pub const DECLARATION_SYMBOL: &[u8] = b"SITEKIT_PLUGIN_DECLARATION";

#[derive(Error, Debug)]
pub enum PluginError {
    #[error("Plugin directory not found: {0}")]
    DirMissing(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to load plugin library {path}: {source}")]
    Open {
        path: PathBuf,
        source: libloading::Error,
    },
    #[error("No plugin declaration in {path}: {source}")]
    MissingDeclaration {
        path: PathBuf,
        source: libloading::Error,
    },
    #[error("Plugin {path} targets API version {found}, host supports {expected}")]
    ApiVersionMismatch {
        path: PathBuf,
        found: u32,
        expected: u32,
    },
    #[error("Plugin '{plugin}' failed during {event} hook: {source}")]
    Hook {
        plugin: String,
        event: HookEvent,
        source: HookError,
    },
}

/// A plugin's self-description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginInfo {
    pub name: String,
    pub version: Option<String>,
}

/// Lifecycle events a plugin can hook into. `Build` is the default the CLI
/// dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookEvent {
    Build,
    Serve,
    Deploy,
}

impl HookEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            HookEvent::Build => "build",
            HookEvent::Serve => "serve",
            HookEvent::Deploy => "deploy",
        }
    }
}

impl fmt::Display for HookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HookEvent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "build" => Ok(HookEvent::Build),
            "serve" => Ok(HookEvent::Serve),
            "deploy" => Ok(HookEvent::Deploy),
            other => Err(format!("unknown event '{other}' (build, serve, deploy)")),
        }
    }
}

/// A zero-argument lifecycle callable.
pub trait LifecycleHook {
    fn run(&self) -> Result<(), HookError>;
}

/// The capability interface every plugin implements.
///
/// `hook` is the single optional capability: return the callable for events
/// the plugin participates in, `None` for the rest. The default participates
/// in nothing.
pub trait Plugin {
    fn info(&self) -> PluginInfo;

    fn hook(&self, event: HookEvent) -> Option<&dyn LifecycleHook> {
        let _ = event;
        None
    }
}

/// Receives plugins from a library's `register` function.
pub trait Registrar {
    fn register(&mut self, plugin: Box<dyn Plugin>);
}

/// What a plugin library exports under [`DECLARATION_SYMBOL`].
#[derive(Copy, Clone)]
#[repr(C)]
pub struct PluginDeclaration {
    pub api_version: u32,
    pub register: unsafe extern "C" fn(&mut dyn Registrar),
}

/// Emit the declaration a plugin library must export. Takes the path of an
/// `unsafe extern "C" fn(&mut dyn Registrar)`.
#[macro_export]
macro_rules! declare_plugin {
    ($register:path) => {
        #[unsafe(no_mangle)]
        pub static SITEKIT_PLUGIN_DECLARATION: $crate::plugin::PluginDeclaration =
            $crate::plugin::PluginDeclaration {
                api_version: $crate::plugin::PLUGIN_API_VERSION,
                register: $register,
            };
    };
}

/// Outcome of one plugin during a hook run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookOutcome {
    pub plugin: String,
    pub invoked: bool,
}

/// Report of a full hook run, for the output layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookReport {
    pub event: HookEvent,
    pub outcomes: Vec<HookOutcome>,
}

impl HookReport {
    /// Plugins whose hook ran.
    pub fn invoked(&self) -> usize {
        self.outcomes.iter().filter(|o| o.invoked).count()
    }

    /// Plugins without a hook for the event.
    pub fn skipped(&self) -> usize {
        self.outcomes.len() - self.invoked()
    }
}

/// Holds registered plugins and keeps their libraries loaded.
///
/// Plugins registered in-process (tests, embedding hosts) and plugins loaded
/// from libraries share the same registration order; hooks run in that order.
#[derive(Default)]
pub struct Registry {
    plugins: Vec<Box<dyn Plugin>>,
    // Must outlive the plugins they registered; dropped last by field order.
    libraries: Vec<Library>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin directly, without dynamic loading.
    pub fn register(&mut self, plugin: Box<dyn Plugin>) {
        self.plugins.push(plugin);
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Info for every registered plugin, in registration order.
    pub fn infos(&self) -> Vec<PluginInfo> {
        self.plugins.iter().map(|p| p.info()).collect()
    }

    /// Discover and load every plugin library in `dir`.
    ///
    /// Files with the platform dynamic-library extension are loaded in
    /// lexicographic file-name order; everything else is ignored. Returns the
    /// number of libraries loaded. The first load failure aborts the scan.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, PluginError> {
        if !dir.is_dir() {
            return Err(PluginError::DirMissing(dir.to_path_buf()));
        }

        let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| is_plugin_library(p))
            .collect();
        paths.sort();

        for path in &paths {
            self.load_library(path)?;
        }
        Ok(paths.len())
    }

    /// Load one plugin library through its checked declaration.
    pub fn load_library(&mut self, path: &Path) -> Result<(), PluginError> {
        // SAFETY: loading a library runs its initializers. That is the plugin
        // contract — plugins are trusted code, no sandboxing is provided.
        let library = unsafe { Library::new(path) }.map_err(|source| PluginError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        // SAFETY: the symbol is read as a PluginDeclaration; layout is pinned
        // by #[repr(C)] and guarded by the api_version check below.
        let declaration = unsafe {
            library
                .get::<*const PluginDeclaration>(DECLARATION_SYMBOL)
                .map_err(|source| PluginError::MissingDeclaration {
                    path: path.to_path_buf(),
                    source,
                })?
                .read()
        };

        if declaration.api_version != PLUGIN_API_VERSION {
            return Err(PluginError::ApiVersionMismatch {
                path: path.to_path_buf(),
                found: declaration.api_version,
                expected: PLUGIN_API_VERSION,
            });
        }

        // The library must be owned before register runs, so the plugins it
        // adds never outlive their code.
        self.libraries.push(library);

        // SAFETY: version checked above; the register fn was produced by
        // declare_plugin! against the same trait definitions.
        unsafe { (declaration.register)(self) };

        Ok(())
    }

    /// Run every plugin's hook for `event`, in registration order.
    ///
    /// Plugins without a hook for the event are skipped. The first hook error
    /// halts the remaining plugins and propagates with the plugin's name.
    pub fn run_hooks(&self, event: HookEvent) -> Result<HookReport, PluginError> {
        let mut outcomes = Vec::with_capacity(self.plugins.len());
        for plugin in &self.plugins {
            let info = plugin.info();
            match plugin.hook(event) {
                Some(hook) => {
                    hook.run().map_err(|source| PluginError::Hook {
                        plugin: info.name.clone(),
                        event,
                        source,
                    })?;
                    outcomes.push(HookOutcome {
                        plugin: info.name,
                        invoked: true,
                    });
                }
                None => outcomes.push(HookOutcome {
                    plugin: info.name,
                    invoked: false,
                }),
            }
        }
        Ok(HookReport { event, outcomes })
    }
}

impl Registrar for Registry {
    fn register(&mut self, plugin: Box<dyn Plugin>) {
        Registry::register(self, plugin);
    }
}

fn is_plugin_library(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .map(|ext| ext == std::env::consts::DLL_EXTENSION)
            .unwrap_or(false)
}
