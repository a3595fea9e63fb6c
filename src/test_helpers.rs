//! Shared test utilities for the sitekit test suite.
//!
//! Builds small site trees in temp directories and compares directory trees
//! byte-for-byte. No fixtures on disk — every test constructs exactly the
//! tree it needs.

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Build a representative site tree in a temp directory:
///
/// ```text
/// index.html
/// about.html
/// styles.css
/// components/
/// └── header.jsx
/// ```
pub fn setup_site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_file(tmp.path(), "index.html", "<h1>Home</h1>");
    write_file(tmp.path(), "about.html", "<h1>About</h1>");
    write_file(tmp.path(), "styles.css", "body { margin: 0; }");
    write_file(
        tmp.path(),
        "components/header.jsx",
        "export const Header = () => <header/>;",
    );
    tmp
}

/// Write `content` to `root/rel`, creating parent directories as needed.
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// All files under `root` as sorted `(relative path, contents)` pairs.
///
/// Two trees with equal entries are byte-for-byte identical.
pub fn tree_entries(root: &Path) -> Vec<(String, Vec<u8>)> {
    let mut entries = Vec::new();
    collect_files(root, root, &mut entries);
    entries.sort();
    entries
}

fn collect_files(dir: &Path, root: &Path, entries: &mut Vec<(String, Vec<u8>)>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            collect_files(&path, root, entries);
        } else {
            let rel = path
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .to_string();
            entries.push((rel, fs::read(&path).unwrap()));
        }
    }
}
