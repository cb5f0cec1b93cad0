//! Integration tests for the `parkly` CLI binary.
//!
//! Argument parsing, help output, completions and local commands run with
//! no backend at all; backend-bound commands run against a wiremock server.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `parkly` binary with env isolation.
///
/// Clears all `PARKLY_*` env vars and points config and data directories
/// at `home` so tests never touch the user's real configuration.
fn parkly_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("parkly");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("PARKLY_PROFILE")
        .env_remove("PARKLY_SERVER")
        .env_remove("PARKLY_OUTPUT")
        .env_remove("PARKLY_INSECURE")
        .env_remove("PARKLY_TIMEOUT")
        .env_remove("PARKLY_EMAIL")
        .env_remove("PARKLY_PASSWORD")
        .env_remove("PARKLY_DEFAULT_PROFILE");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

async fn mount_json(server: &MockServer, verb: &str, route: &str, status: u16, body: serde_json::Value) {
    Mock::given(method(verb))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

fn user_me() -> serde_json::Value {
    json!({"name": "Asha", "email": "asha@example.com", "role": "user"})
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn no_args_shows_help() {
    let home = tempfile::tempdir().unwrap();
    let output = parkly_cmd(home.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn help_lists_commands() {
    let home = tempfile::tempdir().unwrap();
    parkly_cmd(home.path()).arg("--help").assert().success().stdout(
        predicate::str::contains("parking")
            .and(predicate::str::contains("lots"))
            .and(predicate::str::contains("book"))
            .and(predicate::str::contains("open")),
    );
}

#[test]
fn version_flag() {
    let home = tempfile::tempdir().unwrap();
    parkly_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("parkly"));
}

#[test]
fn completions_zsh() {
    let home = tempfile::tempdir().unwrap();
    parkly_cmd(home.path())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn invalid_output_format() {
    let home = tempfile::tempdir().unwrap();
    let output = parkly_cmd(home.path())
        .args(["--output", "invalid", "routes"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("possible values"),
        "Expected output format error:\n{text}"
    );
}

// ── Local commands ──────────────────────────────────────────────────

#[test]
fn routes_lists_every_page() {
    let home = tempfile::tempdir().unwrap();
    parkly_cmd(home.path()).arg("routes").assert().success().stdout(
        predicate::str::contains("/admin/dashboard")
            .and(predicate::str::contains("admin-dashboard"))
            .and(predicate::str::contains("/summary"))
            .and(predicate::str::contains("signed-in")),
    );
}

#[test]
fn routes_as_json() {
    let home = tempfile::tempdir().unwrap();
    let output = parkly_cmd(home.path())
        .args(["-o", "json", "routes"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let routes: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(routes.len(), 13);
    assert_eq!(routes[0]["path"], "/");
    assert_eq!(routes[0]["audience"], "anyone");
}

#[test]
fn open_unknown_page_fails_without_backend() {
    let home = tempfile::tempdir().unwrap();
    let output = parkly_cmd(home.path())
        .args(["open", "/nowhere"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    let text = combined_output(&output);
    assert!(text.contains("/nowhere"), "Expected the path in output:\n{text}");
}

#[test]
fn open_unknown_page_name_fails_without_backend() {
    let home = tempfile::tempdir().unwrap();
    let output = parkly_cmd(home.path())
        .args(["open", "nowhere"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn backend_command_without_config() {
    let home = tempfile::tempdir().unwrap();
    parkly_cmd(home.path())
        .arg("me")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No backend configured"));
}

#[test]
fn config_show_without_config() {
    let home = tempfile::tempdir().unwrap();
    parkly_cmd(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[defaults]"));
}

#[test]
fn config_set_then_use_profile() {
    let home = tempfile::tempdir().unwrap();
    parkly_cmd(home.path())
        .args(["-p", "campus", "config", "set", "server", "http://localhost:5000"])
        .assert()
        .success();
    parkly_cmd(home.path())
        .args(["config", "use", "campus"])
        .assert()
        .success();
    parkly_cmd(home.path())
        .args(["config", "profiles"])
        .assert()
        .success()
        .stdout(predicate::str::contains("campus *"));
}

#[test]
fn config_use_unknown_profile() {
    let home = tempfile::tempdir().unwrap();
    let output = parkly_cmd(home.path())
        .args(["config", "use", "ghost"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn connection_refused_exit_code() {
    let home = tempfile::tempdir().unwrap();
    let output = parkly_cmd(home.path())
        .args(["--server", "http://127.0.0.1:9", "me"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(7));
}

#[test]
fn login_without_credentials_off_terminal() {
    let home = tempfile::tempdir().unwrap();
    let output = parkly_cmd(home.path())
        .args(["--server", "http://127.0.0.1:9", "login"])
        .write_stdin("")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    assert!(combined_output(&output).contains("No credentials configured"));
}

// ── Against a mock backend ──────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn me_prints_identity() {
    let server = MockServer::start().await;
    mount_json(&server, "GET", "/api/auth/me", 200, user_me()).await;

    let home = tempfile::tempdir().unwrap();
    parkly_cmd(home.path())
        .args(["--server", &server.uri(), "-o", "json", "me"])
        .assert()
        .success()
        .stdout(predicate::str::contains("asha@example.com"));
}

#[tokio::test(flavor = "multi_thread")]
async fn login_session_is_reused_by_next_command() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "session=abc123; Path=/")
                .set_body_json(json!({"message": "ok", "role": "admin", "name": "Root"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("cookie", "session=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"name": "Root", "email": "admin@example.com", "role": "admin"}),
        ))
        .mount(&server)
        .await;
    mount_json(&server, "GET", "/api/admin/lots", 200, json!([])).await;

    let home = tempfile::tempdir().unwrap();
    parkly_cmd(home.path())
        .args(["--server", &server.uri(), "login", "--email", "admin@example.com"])
        .args(["--password", "secret"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Logged in as Root"));

    let saved = home
        .path()
        .join("data")
        .join("parkly")
        .join("sessions")
        .join("default.cookie");
    assert_eq!(std::fs::read_to_string(&saved).unwrap(), "session=abc123");

    parkly_cmd(home.path())
        .args(["--server", &server.uri(), "-o", "plain", "me"])
        .assert()
        .success()
        .stdout("admin@example.com\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn history_filters_active() {
    let server = MockServer::start().await;
    mount_json(&server, "GET", "/api/auth/me", 200, user_me()).await;
    mount_json(&server, "GET", "/api/user/lots", 200, json!([])).await;
    mount_json(
        &server,
        "GET",
        "/api/user/history",
        200,
        json!([
            {"id": "R7", "spot_id": "S3", "lot": "Central",
             "from": "2024-05-01T09:00:00", "to": null, "cost": null},
            {"id": "R8", "spot_id": "S1", "lot": "Central",
             "from": "2024-04-01T09:00:00", "to": "2024-04-01T10:00:00", "cost": 42}
        ]),
    )
    .await;

    let home = tempfile::tempdir().unwrap();
    parkly_cmd(home.path())
        .args(["--server", &server.uri(), "-o", "plain", "history", "--active"])
        .assert()
        .success()
        .stdout("R7\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_booking_shows_backend_reason() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "POST",
        "/api/user/book",
        400,
        json!({"error": "No spots available"}),
    )
    .await;

    let home = tempfile::tempdir().unwrap();
    let output = parkly_cmd(home.path())
        .args(["--server", &server.uri(), "book", "1"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("No spots available"));
}

#[tokio::test(flavor = "multi_thread")]
async fn logout_confirms_and_home_shows_hints() {
    let server = MockServer::start().await;
    mount_json(&server, "POST", "/api/auth/logout", 200, json!({"message": "bye"})).await;
    mount_json(&server, "GET", "/api/auth/me", 200, json!({"authenticated": false})).await;

    let home = tempfile::tempdir().unwrap();
    parkly_cmd(home.path())
        .args(["--server", &server.uri(), "logout"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Logged out"));
    parkly_cmd(home.path())
        .args(["--server", &server.uri(), "open", "home"])
        .assert()
        .success()
        .stderr(
            predicate::str::contains("Log in: parkly login")
                .and(predicate::str::contains("New here: parkly register")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn booking_is_reported_when_reload_fails() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "POST",
        "/api/user/book",
        200,
        json!({"message": "Booked", "spot_id": "S3", "reservation_id": "R7"}),
    )
    .await;
    mount_json(&server, "GET", "/api/user/lots", 500, json!({"error": "cache down"})).await;
    mount_json(&server, "GET", "/api/user/history", 200, json!([])).await;

    let home = tempfile::tempdir().unwrap();
    parkly_cmd(home.path())
        .args(["--server", &server.uri(), "book", "1"])
        .assert()
        .success()
        .stderr(predicate::str::contains("S3").and(predicate::str::contains("cache down")));
}

#[tokio::test(flavor = "multi_thread")]
async fn admin_page_as_user_surfaces_forbidden() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "GET",
        "/api/admin/users",
        403,
        json!({"error": "Admins only"}),
    )
    .await;

    let home = tempfile::tempdir().unwrap();
    let output = parkly_cmd(home.path())
        .args(["--server", &server.uri(), "open", "users"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(5));
    let text = combined_output(&output);
    assert!(text.contains("Admins only"));
    assert!(text.contains("/users is meant for admin accounts"), "Expected audience hint:\n{text}");
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_needs_confirmation_when_not_interactive() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/admin/lots/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "deleted"})))
        .expect(0)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let output = parkly_cmd(home.path())
        .args(["--server", &server.uri(), "lots", "delete", "3"])
        .write_stdin("")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("--yes"));
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_with_yes_reloads_lots() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/admin/lots/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "deleted"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/lots"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    parkly_cmd(home.path())
        .args(["--server", &server.uri(), "-y", "lots", "delete", "3"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Deleted lot 3"));
}
