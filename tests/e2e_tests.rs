//! End-to-end tests for the pincheck CLI
//!
//! These tests verify:
//! - Text and JSON output for real manifests
//! - Exit codes for errors and outdated pins
//! - Lookups against a local mock release API

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn pincheck() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pincheck"));
    cmd.env_remove("RUST_LOG").env_remove("PINCHECK_API_URL");
    cmd
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Project whose manifests only pin raw URLs, so no network access is needed
fn raw_url_project() -> TempDir {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    write(
        temp_dir.path(),
        "SOURCES",
        "Sources:\n  - URL: https://example.com/a.tar.gz\n",
    );
    write(
        temp_dir.path(),
        "third_party/SOURCES",
        "Sources:\n  - URL: https://example.com/b.tar.gz\n",
    );
    temp_dir
}

mod text_output_tests {
    use super::*;

    #[test]
    fn test_raw_urls_reported() {
        let temp_dir = raw_url_project();

        pincheck()
            .arg(temp_dir.path())
            .arg("--no-color")
            .assert()
            .success()
            .stdout(predicate::str::contains("Found manifests:"))
            .stdout(predicate::str::contains(
                "Raw url specified, cannot check for currency: https://example.com/a.tar.gz",
            ))
            .stdout(predicate::str::contains(
                "Raw url specified, cannot check for currency: https://example.com/b.tar.gz",
            ))
            .stdout(predicate::str::contains("2 raw url"));
    }

    #[test]
    fn test_quiet_hides_raw_urls() {
        let temp_dir = raw_url_project();

        pincheck()
            .arg(temp_dir.path())
            .args(["--no-color", "-q"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Raw url specified").not())
            .stdout(predicate::str::contains("Checked 2 source(s)"));
    }

    #[test]
    fn test_empty_directory() {
        let temp_dir = tempfile::tempdir().unwrap();

        pincheck()
            .arg(temp_dir.path())
            .arg("--no-color")
            .assert()
            .success()
            .stdout(predicate::str::contains("No SOURCES manifests found"));
    }
}

mod json_output_tests {
    use super::*;

    #[test]
    fn test_json_output_schema() {
        let temp_dir = raw_url_project();

        let output = pincheck()
            .arg(temp_dir.path())
            .arg("--json")
            .output()
            .unwrap();
        assert!(output.status.success());

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["summary"]["discovered"], 2);
        assert_eq!(json["summary"]["raw_url"], 2);

        let manifests = json["manifests"].as_array().unwrap();
        assert_eq!(manifests.len(), 2);
        assert!(manifests[0]["path"].as_str().unwrap().ends_with("SOURCES"));
        assert_eq!(manifests[0]["results"][0]["status"], "raw_url");
        assert_eq!(
            manifests[0]["results"][0]["url"],
            "https://example.com/a.tar.gz"
        );
        assert!(json.get("errors").is_none());
    }
}

mod exit_code_tests {
    use super::*;

    #[test]
    fn test_exit_code_invalid_manifest() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(
            temp_dir.path(),
            "SOURCES",
            "Sources:\n  - Repo: github.com/a/b\n    URL: https://x\n",
        );

        pincheck()
            .arg(temp_dir.path())
            .arg("--no-color")
            .assert()
            .code(2)
            .stdout(predicate::str::contains("Failed to load"))
            .stdout(predicate::str::contains(
                "cannot define a url and a repo; pick one",
            ));
    }

    #[test]
    fn test_exit_code_nonexistent_path() {
        let temp_dir = tempfile::tempdir().unwrap();

        pincheck()
            .arg(temp_dir.path().join("does-not-exist"))
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Error:"));
    }

    #[test]
    fn test_exit_code_help() {
        pincheck()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("--fail-on-outdated"));
    }

    #[test]
    fn test_exit_code_version() {
        pincheck()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}

mod release_api_tests {
    use super::*;

    fn pinned_project() -> TempDir {
        let temp_dir = tempfile::tempdir().unwrap();
        write(
            temp_dir.path(),
            "SOURCES",
            "Sources:\n  - Repo: github.com/acme/widget\n    Tag: v1.2.0\n",
        );
        temp_dir
    }

    #[test]
    fn test_outdated_pin_with_mock_api() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/repos/acme/widget/releases/latest")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"name": "v1.3.0", "published_at": "2024-05-01T10:00:00Z"}"#)
            .create();

        let temp_dir = pinned_project();
        pincheck()
            .arg(temp_dir.path())
            .args(["--no-color", "--api-url", &server.url()])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "There is a newer version of: github.com/acme/widget",
            ))
            .stdout(predicate::str::contains("have: v1.2.0"))
            .stdout(predicate::str::contains("latest: v1.3.0"));

        mock.assert();
    }

    #[test]
    fn test_fail_on_outdated_exit_code() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/repos/acme/widget/releases/latest")
            .with_status(200)
            .with_body(r#"{"name": "1.3.0"}"#)
            .create();

        let temp_dir = pinned_project();
        pincheck()
            .arg(temp_dir.path())
            .args(["--fail-on-outdated", "--api-url", &server.url()])
            .assert()
            .code(3);
    }

    #[test]
    fn test_up_to_date_pin() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/repos/acme/widget/releases/latest")
            .with_status(200)
            .with_body(r#"{"name": "Release 1.2.0"}"#)
            .create();

        let temp_dir = pinned_project();
        pincheck()
            .arg(temp_dir.path())
            .args(["--no-color", "--fail-on-outdated", "--api-url", &server.url()])
            .assert()
            .success()
            .stdout(predicate::str::contains("Up to date: github.com/acme/widget"));
    }

    #[test]
    fn test_missing_release_name() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/repos/acme/widget/releases/latest")
            .with_status(200)
            .with_body(r#"{"name": null}"#)
            .create();

        let temp_dir = pinned_project();
        pincheck()
            .arg(temp_dir.path())
            .args(["--no-color", "--api-url", &server.url()])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "Unable to check currency, latest release undefined for github.com/acme/widget",
            ));
    }

    #[test]
    fn test_unknown_repository_is_entry_error() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/repos/acme/widget/releases/latest")
            .with_status(404)
            .with_body(r#"{"message": "Not Found"}"#)
            .create();

        let temp_dir = pinned_project();
        pincheck()
            .arg(temp_dir.path())
            .args(["--json", "--api-url", &server.url()])
            .assert()
            .code(2)
            .stdout(predicate::str::contains("\"status\": \"error\""));
    }
}
