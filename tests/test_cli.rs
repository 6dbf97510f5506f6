//! Tests for CLI argument parsing and the non-interactive map run

#[path = "common/mod.rs"]
mod common;

use std::path::PathBuf;

use assert_cmd::Command;
use clap::{CommandFactory, Parser};
use predicates::prelude::*;

use common::{sample_records, write_map_fixture};
use cropsense::cli::{Cli, Commands, Mode, DEFAULT_SERVER_URL};
use cropsense::production::DataSource;

#[test]
fn test_cli_default_values() {
    let cli = Cli::parse_from(["cropsense"]);

    assert!(cli.command.is_none(), "No subcommand runs the wizard");
    assert_eq!(cli.server_url, DEFAULT_SERVER_URL);
    assert!(cli.log_level.is_none());
    assert!(cli.log_file.is_none());
}

#[test]
fn test_cli_advise_export_path() {
    let cli = Cli::parse_from(["cropsense", "advise", "--export", "/tmp/out.zip"]);

    match cli.settings().mode {
        Mode::Advise { export, no_confirm } => {
            assert_eq!(export, Some(PathBuf::from("/tmp/out.zip")));
            assert!(!no_confirm);
        }
        other => panic!("unexpected mode {:?}", other),
    }
}

#[test]
fn test_cli_map_sources() {
    let cli = Cli::parse_from([
        "cropsense",
        "map",
        "--boundaries",
        "https://example.org/states.geojson",
        "--data",
        "local/production.csv",
        "--region",
        "Punjab",
        "--no-confirm",
    ]);

    assert!(matches!(cli.command, Some(Commands::Map(_))));
    match cli.settings().mode {
        Mode::Map {
            boundaries,
            data,
            region,
            no_confirm,
            ..
        } => {
            assert_eq!(
                boundaries,
                DataSource::Url("https://example.org/states.geojson".to_string())
            );
            assert!(data.is_csv());
            assert_eq!(region.as_deref(), Some("Punjab"));
            assert!(no_confirm);
        }
        other => panic!("unexpected mode {:?}", other),
    }
}

#[test]
fn test_cli_server_url_reads_environment() {
    let command = Cli::command();
    let server_url = command
        .get_arguments()
        .find(|arg| arg.get_id() == "server_url")
        .expect("server_url argument exists");
    assert_eq!(
        server_url.get_env().and_then(|v| v.to_str()),
        Some("CROPSENSE_SERVER_URL")
    );
}

#[test]
fn test_cli_trims_trailing_slash() {
    let cli = Cli::parse_from(["cropsense", "--server-url", "http://10.0.0.5:8080/"]);
    assert_eq!(cli.settings().server_url, "http://10.0.0.5:8080");
}

#[test]
fn test_cli_rejects_unknown_subcommand() {
    assert!(Cli::try_parse_from(["cropsense", "harvest"]).is_err());
}

// ============================================================================
// Binary
// ============================================================================

#[test]
fn test_binary_help() {
    Command::cargo_bin("cropsense")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("advise"))
        .stdout(predicate::str::contains("map"));
}

#[test]
fn test_binary_version() {
    Command::cargo_bin("cropsense")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_binary_map_non_interactive() {
    let (_dir, boundaries, data) = write_map_fixture(&["Punjab", "Bihar"], &sample_records());

    Command::cargo_bin("cropsense")
        .unwrap()
        .args(["map", "--no-confirm", "--region", "Punjab", "--boundaries"])
        .arg(&boundaries)
        .arg("--data")
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("CROP PRODUCTION · Rice"))
        .stdout(predicate::str::contains("Production: 3.50 Lakh Tonnes"))
        .stdout(predicate::str::contains("TOP PRODUCERS"))
        .stdout(predicate::str::contains("Others").not());
}

#[test]
fn test_binary_map_missing_data_stays_inert() {
    let (dir, boundaries, _) = write_map_fixture(&["Punjab"], &sample_records());
    let missing = dir.path().join("nope.json");

    Command::cargo_bin("cropsense")
        .unwrap()
        .args(["map", "--no-confirm", "--boundaries"])
        .arg(&boundaries)
        .arg("--data")
        .arg(&missing)
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed to fetch"))
        .stdout(predicate::str::contains("TOP PRODUCERS").not());
}
