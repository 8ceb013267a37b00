use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn catalog_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("event-catalog"));
    for var in [
        "ATLAS_URI",
        "CATALOG_IN_MEMORY",
        "PASSWORD_HASH_COST",
        "NODE_ENV",
        "PORT",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

// =============================================================================
// Basic CLI
// =============================================================================

#[test]
fn test_help() {
    catalog_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("GraphQL backend"));
}

#[test]
fn test_version() {
    catalog_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("event-catalog"));
}

#[test]
fn test_serve_help_lists_env_vars() {
    catalog_cmd()
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ATLAS_URI"))
        .stdout(predicate::str::contains("PORT"))
        .stdout(predicate::str::contains("NODE_ENV"));
}

// =============================================================================
// Schema
// =============================================================================

#[test]
fn test_schema_prints_sdl() {
    catalog_cmd()
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("type Event"))
        .stdout(predicate::str::contains("type User"))
        .stdout(predicate::str::contains(
            "createUser(userInput: UserInput!): User!",
        ));
}

// =============================================================================
// Configuration errors
// =============================================================================

#[test]
fn test_serve_requires_database() {
    let temp_dir = TempDir::new().unwrap();

    catalog_cmd()
        .arg("serve")
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--database-url"));
}

#[test]
fn test_serve_rejects_out_of_range_hash_cost() {
    let temp_dir = TempDir::new().unwrap();

    catalog_cmd()
        .args(["serve", "--in-memory", "--hash-cost", "0"])
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("hash-cost"));
}

#[test]
fn test_serve_reports_unreachable_database() {
    let temp_dir = TempDir::new().unwrap();

    catalog_cmd()
        .args(["serve", "--database-url", "not-a-mongodb-uri"])
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to connect to MongoDB"));
}
