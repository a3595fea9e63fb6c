//! Route collection.
//!
//! Walks the site source tree and turns every servable page or component
//! file into a route string, then serializes the full list to `routes.json`.
//! The dev server reads that file to know which paths it can serve.
//!
//! ## Recognized Files
//!
//! Only files with a page or UI-component extension become routes:
//! `.html`, `.jsx`, `.tsx`. Everything else (stylesheets, images, data
//! files) is skipped. Matching is case-sensitive.
//!
//! ## Route Strings
//!
//! A route is the file's path relative to the site root, with platform
//! separators normalized to `/` and a single leading slash:
//!
//! ```text
//! site/index.html          →  /index.html
//! site/blog/post.html      →  /blog/post.html
//! site/components/nav.jsx  →  /components/nav.jsx
//! ```
//!
//! ## Ordering
//!
//! The walk sorts entries lexicographically by file name, so the generated
//! list is deterministic across runs and platforms. Raw directory listing
//! order is never exposed.
//!
//! The routes file is fully overwritten on each run — there is no merge with
//! a previous list. An empty site tree produces a valid `[]` file.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum RouteError {
    #[error("Site source directory not found: {0}")]
    RootMissing(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Extensions of files that become routes.
const ROUTE_EXTENSIONS: &[&str] = &["html", "jsx", "tsx"];

/// Collect all route strings under `root`, sorted by the walk order.
pub fn collect_routes(root: &Path) -> Result<Vec<String>, RouteError> {
    if !root.is_dir() {
        return Err(RouteError::RootMissing(root.to_path_buf()));
    }

    let mut routes = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_route_file(entry.path()) {
            continue;
        }
        let rel = entry.path().strip_prefix(root).unwrap();
        routes.push(route_string(rel));
    }
    Ok(routes)
}

/// Collect routes under `root` and write them to `routes_file` as a JSON
/// array of strings (2-space indentation), overwriting any previous content.
/// Returns the number of routes written.
pub fn write_routes(root: &Path, routes_file: &Path) -> Result<usize, RouteError> {
    let routes = collect_routes(root)?;
    let json = serde_json::to_string_pretty(&routes)?;
    fs::write(routes_file, json)?;
    Ok(routes.len())
}

fn is_route_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ROUTE_EXTENSIONS.iter().any(|e| ext == *e))
        .unwrap_or(false)
}

/// Build the route string for a root-relative path: forward slashes only,
/// one leading slash.
fn route_string(rel: &Path) -> String {
    let mut route = String::from("/");
    for (i, component) in rel.components().enumerate() {
        if i > 0 {
            route.push('/');
        }
        route.push_str(&component.as_os_str().to_string_lossy());
    }
    route
}
