//! CLI integration tests using the real sitekit binary.
//!
//! Each test builds an isolated project directory and runs the binary with
//! that directory as the working directory, so the default `sitekit.toml`
//! paths resolve inside the temp tree.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
fn sitekit_cmd(project: &Path) -> Command {
    let mut cmd = Command::cargo_bin("sitekit").unwrap();
    cmd.current_dir(project);
    cmd
}

fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// A project with a small site tree, an empty plugin dir, and a data dir.
fn setup_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_file(tmp.path(), "site/index.html", "<h1>Home</h1>");
    write_file(tmp.path(), "site/notes.txt", "not a route");
    write_file(
        tmp.path(),
        "site/components/nav.jsx",
        "export const Nav = () => <nav/>;",
    );
    fs::create_dir_all(tmp.path().join("data")).unwrap();
    fs::create_dir_all(tmp.path().join("plugins")).unwrap();
    tmp
}

// =========================================================================
// Dispatcher
// =========================================================================

#[test]
fn no_subcommand_prints_help_and_succeeds() {
    let tmp = setup_project();
    sitekit_cmd(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("routes"))
        .stdout(predicate::str::contains("plugins"));
}

#[test]
fn unknown_subcommand_prints_help_and_succeeds() {
    let tmp = setup_project();
    sitekit_cmd(tmp.path())
        .arg("deploy")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn help_flag_lists_all_commands() {
    let tmp = setup_project();
    sitekit_cmd(tmp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("db"))
        .stdout(predicate::str::contains("routes"))
        .stdout(predicate::str::contains("plugins"));
}

// =========================================================================
// build
// =========================================================================

#[test]
fn build_copies_site_into_dist() {
    let tmp = setup_project();
    sitekit_cmd(tmp.path())
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("Staged 3 files"));

    let dist = tmp.path().join("dist");
    assert_eq!(
        fs::read_to_string(dist.join("index.html")).unwrap(),
        "<h1>Home</h1>"
    );
    assert!(dist.join("components/nav.jsx").is_file());
    assert!(dist.join("notes.txt").is_file());
}

#[test]
fn build_replaces_stale_output() {
    let tmp = setup_project();
    write_file(tmp.path(), "dist/leftover.html", "from an old build");

    sitekit_cmd(tmp.path()).arg("build").assert().success();

    assert!(!tmp.path().join("dist/leftover.html").exists());
}

#[test]
fn build_minify_does_not_change_bytes() {
    let tmp = setup_project();
    sitekit_cmd(tmp.path())
        .args(["build", "--minify"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Minify: requested"));

    assert_eq!(
        fs::read_to_string(tmp.path().join("dist/index.html")).unwrap(),
        "<h1>Home</h1>"
    );
}

#[test]
fn build_without_site_dir_fails() {
    let tmp = TempDir::new().unwrap();
    sitekit_cmd(tmp.path())
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("SourceMissing"));
}

#[test]
fn site_flag_overrides_source_directory() {
    let tmp = setup_project();
    write_file(tmp.path(), "elsewhere/only.html", "<p>elsewhere</p>");

    sitekit_cmd(tmp.path())
        .args(["build", "--site", "elsewhere"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Staged 1 files"));

    assert!(tmp.path().join("dist/only.html").is_file());
    assert!(!tmp.path().join("dist/index.html").exists());
}

// =========================================================================
// routes
// =========================================================================

#[test]
fn routes_writes_sorted_route_list() {
    let tmp = setup_project();
    sitekit_cmd(tmp.path())
        .arg("routes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 2 routes"));

    let content = fs::read_to_string(tmp.path().join("routes.json")).unwrap();
    assert_eq!(
        content,
        "[\n  \"/components/nav.jsx\",\n  \"/index.html\"\n]"
    );
}

#[test]
fn routes_without_site_dir_fails() {
    let tmp = TempDir::new().unwrap();
    sitekit_cmd(tmp.path())
        .arg("routes")
        .assert()
        .failure()
        .stderr(predicate::str::contains("RootMissing"));
}

#[test]
fn config_file_redirects_routes_source() {
    let tmp = setup_project();
    write_file(tmp.path(), "sitekit.toml", "site_dir = \"content\"\n");
    write_file(tmp.path(), "content/landing.html", "<h1>Landing</h1>");

    sitekit_cmd(tmp.path())
        .arg("routes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 1 routes"));

    let content = fs::read_to_string(tmp.path().join("routes.json")).unwrap();
    assert_eq!(content, "[\n  \"/landing.html\"\n]");
}

// =========================================================================
// db
// =========================================================================

#[test]
fn db_migrate_is_repeatable_and_seed_duplicates() {
    let tmp = setup_project();

    sitekit_cmd(tmp.path())
        .args(["db", "migrate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Users table ready"));
    sitekit_cmd(tmp.path())
        .args(["db", "migrate"])
        .assert()
        .success();

    sitekit_cmd(tmp.path())
        .args(["db", "seed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Inserted 2 fixture users (2 total)"));
    sitekit_cmd(tmp.path())
        .args(["db", "seed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Inserted 2 fixture users (4 total)"));

    let store = sitekit::store::RecordStore::open(&tmp.path().join("data/database.db")).unwrap();
    assert_eq!(store.user_count().unwrap(), 4);
}

#[test]
fn db_without_data_dir_fails() {
    let tmp = TempDir::new().unwrap();
    sitekit_cmd(tmp.path())
        .args(["db", "migrate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ParentMissing"));
}

// =========================================================================
// plugins
// =========================================================================

#[test]
fn plugins_with_empty_dir_runs_no_hooks() {
    let tmp = setup_project();
    sitekit_cmd(tmp.path())
        .arg("plugins")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ran 0 build hooks"));
}

#[test]
fn plugins_event_flag_selects_lifecycle() {
    let tmp = setup_project();
    sitekit_cmd(tmp.path())
        .args(["plugins", "--event", "deploy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ran 0 deploy hooks"));
}

#[test]
fn plugins_rejects_unknown_event() {
    let tmp = setup_project();
    sitekit_cmd(tmp.path())
        .args(["plugins", "--event", "publish"])
        .assert()
        .failure();
}

#[test]
fn plugins_without_plugin_dir_fails() {
    let tmp = TempDir::new().unwrap();
    sitekit_cmd(tmp.path())
        .arg("plugins")
        .assert()
        .failure()
        .stderr(predicate::str::contains("DirMissing"));
}

#[test]
fn plugins_with_garbage_library_fails_before_hooks() {
    let tmp = setup_project();
    let name = format!("plugins/broken.{}", std::env::consts::DLL_EXTENSION);
    write_file(tmp.path(), &name, "this is not a dynamic library");

    sitekit_cmd(tmp.path())
        .arg("plugins")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Open"));
}
