//! Integration tests for the sheetdb-server binary.
//!
//! These tests start the real binary against a temporary data directory and
//! talk to it over HTTP.

use rusqlite::Connection;
use serde_json::Value;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tokio::process::{Child, ChildStdout, Command};

/// Create a data directory with a few datasets and sidecars.
fn create_test_env() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    for (name, ddl) in [
        ("census", "CREATE TABLE people (id INTEGER PRIMARY KEY, county TEXT);"),
        ("weather", "CREATE TABLE observations (station TEXT, temp REAL);"),
        ("airports", "CREATE TABLE airports (iata TEXT PRIMARY KEY, name TEXT);"),
    ] {
        let conn = Connection::open(temp_dir.path().join(format!("{}.db", name))).unwrap();
        conn.execute_batch(ddl).unwrap();
    }

    std::fs::write(
        temp_dir.path().join("census.json"),
        r#"{"title":"Census 2020","description":"Population counts by county","publisher":"Statistics Office"}"#,
    )
    .unwrap();
    std::fs::write(
        temp_dir.path().join("weather.json"),
        r#"{"title":"Daily Weather","publisher":"Met Service"}"#,
    )
    .unwrap();
    std::fs::write(temp_dir.path().join("airports.txt"), "IATA codes and runways\n").unwrap();

    temp_dir
}

/// A running server process, killed when dropped.
struct TestServer {
    _child: Child,
    port: u16,
}

/// Read stdout until the `SERVER_PORT=` line and return the port.
async fn read_port(lines: &mut Lines<BufReader<ChildStdout>>) -> Option<u16> {
    while let Ok(Some(line)) = lines.next_line().await {
        if let Some(value) = line.strip_prefix("SERVER_PORT=") {
            return value.trim().parse().ok();
        }
    }
    None
}

/// `/up` only answers 200 once the registry is published.
async fn wait_until_up(port: u16) -> bool {
    let client = reqwest::Client::new();
    let url = format!("http://127.0.0.1:{}/up", port);
    for _ in 0..150 {
        if let Ok(response) = client.get(&url).send().await {
            if response.status().is_success() {
                return true;
            }
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    false
}

async fn spawn_server(db_path: &Path) -> TestServer {
    let mut child = Command::new(env!("CARGO_BIN_EXE_sheetdb-server"))
        .args(["--host", "127.0.0.1", "--port", "0", "--db-path"])
        .arg(db_path)
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .expect("failed to spawn sheetdb-server");

    let stdout = child.stdout.take().expect("stdout is piped");
    let mut lines = BufReader::new(stdout).lines();
    let port = tokio::time::timeout(Duration::from_secs(20), read_port(&mut lines))
        .await
        .expect("timed out waiting for SERVER_PORT")
        .expect("server exited without printing SERVER_PORT");

    // Logs go to stdout too; keep the pipe drained.
    tokio::spawn(async move { while let Ok(Some(_)) = lines.next_line().await {} });

    assert!(wait_until_up(port).await, "server on port {} never became ready", port);
    TestServer {
        _child: child,
        port,
    }
}

async fn get_json(port: u16, path: &str) -> (u16, Value) {
    let response = reqwest::Client::new()
        .get(format!("http://127.0.0.1:{}{}", port, path))
        .timeout(Duration::from_secs(10))
        .send()
        .await
        .expect("request failed");
    let status = response.status().as_u16();
    let body = response.json::<Value>().await.expect("invalid JSON body");
    (status, body)
}

#[tokio::test]
async fn test_list_all_datasets() {
    let temp_dir = create_test_env();
    let server = spawn_server(temp_dir.path()).await;

    let (status, body) = get_json(server.port, "/").await;
    assert_eq!(status, 200);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["airports", "census", "weather"]);

    let airports = &body[0];
    assert_eq!(airports["endpoint"], "/airports");
    assert_eq!(airports["metadata"]["description"], "IATA codes and runways");
    assert_eq!(airports["metadata"]["title"], "");
}

#[tokio::test]
async fn test_search_ranks_results() {
    let temp_dir = create_test_env();
    let server = spawn_server(temp_dir.path()).await;

    let (status, body) = get_json(server.port, "/?search=census").await;
    assert_eq!(status, 200);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "census");
    assert_eq!(body[0]["metadata"]["title"], "Census 2020");

    let (_, body) = get_json(server.port, "/?search=met%20servce").await;
    assert_eq!(body[0]["name"], "weather");

    let (status, body) = get_json(server.port, "/?search=qqqqzzzz").await;
    assert_eq!(status, 200);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_dataset_and_not_found_routes() {
    let temp_dir = create_test_env();
    let server = spawn_server(temp_dir.path()).await;

    let (status, body) = get_json(server.port, "/weather").await;
    assert_eq!(status, 200);
    assert_eq!(body["metadata"]["publisher"], "Met Service");

    let (status, body) = get_json(server.port, "/zoning").await;
    assert_eq!(status, 404);
    assert_eq!(body["message"], "Database not found: zoning");

    let (status, body) = get_json(server.port, "/weather/public/observations").await;
    assert_eq!(status, 404);
    assert_eq!(body["message"], "Not Found");
}

#[tokio::test]
async fn test_missing_data_directory_exits_with_error() {
    let temp_dir = TempDir::new().unwrap();
    let status = Command::new(env!("CARGO_BIN_EXE_sheetdb-server"))
        .arg("--port")
        .arg("0")
        .arg("--db-path")
        .arg(temp_dir.path().join("does-not-exist"))
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .unwrap();
    assert!(!status.success());
}
