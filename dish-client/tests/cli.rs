use std::net::TcpListener;

use assert_cmd::Command;
use predicates::prelude::*;

fn dish_client() -> Command {
    let mut cmd = Command::cargo_bin("dish-client").unwrap();
    for var in [
        "DISH_TRANSPORT",
        "DISH_SERVER",
        "DISH_USERNAME",
        "DISH_PASSWORD",
        "DISH_DATABASE",
        "DISH_TIMEOUT_SECS",
    ] {
        cmd.env_remove(var);
    }
    cmd.env("RUST_LOG", "off");
    cmd
}

fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

#[test]
fn missing_credentials_is_a_usage_error() {
    dish_client()
        .write_stdin("")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--username"));
}

#[test]
fn server_not_matching_transport_is_a_usage_error() {
    dish_client()
        .args(["--username", "test", "--password", "test"])
        .args(["--transport", "rpc", "--server", "http://localhost:5000/api"])
        .write_stdin("")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("HOST:PORT"));
}

#[test]
fn unopenable_database_aborts_with_storage_hint() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("missing").join("dishes.db");

    dish_client()
        .args(["--username", "test", "--password", "test"])
        .arg("--database")
        .arg(&db)
        .write_stdin("A1004292:1\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--database"));
}

#[test]
fn unreachable_http_server_aborts_with_endpoint_hint() {
    let dir = tempfile::tempdir().unwrap();
    let server = format!("http://127.0.0.1:{}/api", closed_port());

    dish_client()
        .args(["--username", "test", "--password", "test"])
        .args(["--server", &server, "--timeout-secs", "2"])
        .arg("--database")
        .arg(dir.path().join("dishes.db"))
        .write_stdin("A1004292:1\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--server").and(predicate::str::contains(server.as_str())));
}

#[test]
fn unreachable_rpc_server_aborts_with_endpoint_hint() {
    let dir = tempfile::tempdir().unwrap();
    let server = format!("127.0.0.1:{}", closed_port());

    dish_client()
        .args(["--username", "test", "--password", "test", "--transport", "rpc"])
        .args(["--server", &server, "--timeout-secs", "2"])
        .arg("--database")
        .arg(dir.path().join("dishes.db"))
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--server"));
}

#[test]
fn unresolvable_rpc_host_aborts_after_storage_with_endpoint_hint() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("dishes.db");

    dish_client()
        .args(["--username", "test", "--password", "test", "--transport", "rpc"])
        .args(["--server", "no-such-host.invalid:5001", "--timeout-secs", "2"])
        .arg("--database")
        .arg(&db)
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--server").and(predicate::str::contains("no-such-host.invalid:5001")));

    assert!(db.exists());
}
