use std::io::Write;
use std::process::{Command, Output, Stdio};

use anyhow::Result;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;

use predict_form::error::VALIDATION_MESSAGE;
use predict_form::response::INVALID_RESPONSE_MESSAGE;

/// Runs the binary with an empty config dir and no `PREDICT_*` env.
fn predict_form(args: &[&str], stdin: Option<&str>) -> Result<Output> {
    let home = tempfile::tempdir()?;
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_predict-form"));
    cmd.args(args)
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env_remove("RUST_LOG")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    for (k, _) in std::env::vars() {
        if k.starts_with("PREDICT_") {
            cmd.env_remove(k);
        }
    }
    if stdin.is_some() {
        cmd.stdin(Stdio::piped());
    } else {
        cmd.stdin(Stdio::null());
    }

    let mut child = cmd.spawn()?;
    if let (Some(input), Some(mut pipe)) = (stdin, child.stdin.take()) {
        pipe.write_all(input.as_bytes())?;
    }
    Ok(child.wait_with_output()?)
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

async fn serve(status: StatusCode, reply: &'static str) -> Result<String> {
    let app = Router::new().route("/predict", post(move || async move { (status, reply) }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{}", addr))
}

#[test]
fn test_list_fields_prints_preset_controls() -> Result<()> {
    let out = predict_form(&["--list-fields", "--preset", "sepsis"], None)?;
    assert!(out.status.success());
    let names: Vec<String> = stdout(&out)
        .lines()
        .filter_map(|l| l.split_whitespace().next().map(str::to_string))
        .collect();
    assert_eq!(names, vec!["PRG", "PL", "BP", "SK", "TS", "BMI", "BD2", "Age"]);
    Ok(())
}

#[test]
fn test_dry_run_prints_request() -> Result<()> {
    let out = predict_form(
        &["--base-url", "http://127.0.0.1:9", "--dry-run", "-f", "feature1=5", "-f", "feature2=3"],
        None,
    )?;
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), "POST http://127.0.0.1:9/predict\n{\"feature1\":\"5\",\"feature2\":\"3\"}\n");
    Ok(())
}

#[test]
fn test_dry_run_with_unfilled_preset_fails_validation() -> Result<()> {
    let out = predict_form(&["--dry-run", "--preset", "sepsis", "-f", "PRG=6"], None)?;
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).is_empty());
    assert!(stderr(&out).contains(VALIDATION_MESSAGE));
    Ok(())
}

#[test]
fn test_flag_fields_override_stdin_fields() -> Result<()> {
    let out = predict_form(&["--dry-run", "-f", "b=3"], Some("# piped\na=1\nb=2\n"))?;
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out).lines().nth(1), Some(r#"{"a":"1","b":"3"}"#));
    Ok(())
}

#[test]
fn test_json_stdin_keeps_key_order() -> Result<()> {
    let out = predict_form(&["--dry-run"], Some(r#"{"feature2": "3", "feature1": "5"}"#))?;
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out).lines().nth(1), Some(r#"{"feature2":"3","feature1":"5"}"#));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_prediction_exits_zero() -> Result<()> {
    let base = serve(StatusCode::OK, r#"{"output": 42}"#).await?;
    let out = tokio::task::spawn_blocking(move || predict_form(&["--base-url", base.as_str(), "-f", "x=1"], None)).await??;
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), "42\n");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_invalid_response_exits_one() -> Result<()> {
    let base = serve(StatusCode::OK, "{}").await?;
    let out = tokio::task::spawn_blocking(move || predict_form(&["--base-url", base.as_str(), "-f", "x=1"], None)).await??;
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).is_empty());
    assert!(stderr(&out).contains(INVALID_RESPONSE_MESSAGE));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_error_exits_one() -> Result<()> {
    let base = serve(StatusCode::INTERNAL_SERVER_ERROR, "{}").await?;
    let out = tokio::task::spawn_blocking(move || predict_form(&["--base-url", base.as_str(), "-f", "x=1"], None)).await??;
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).is_empty());
    Ok(())
}
