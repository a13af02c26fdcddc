
use std::fs;

use tempfile::tempdir;

use support_single::{describe, run_loadgen, spawn_http_server_or_skip, spawn_status_server_or_skip};

#[test]
fn e2e_single_cli_basic() -> Result<(), String> {
    let Some((url, _server)) = spawn_http_server_or_skip()? else {
        return Ok(());
    };

    let output = run_loadgen(["-u", url.as_str(), "-n", "250", "-c", "8"])?;
    if !output.status.success() {
        return Err(describe(&output));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    for expected in [
        "Progress: 100/250 requests completed",
        "Progress: 250/250 requests completed",
        "LOAD TEST REPORT",
        "Total requests: 250",
        "Successful requests (200): 250",
        "Success rate: 100.00%",
        "200: 250 (100.00%)",
    ] {
        if !stdout.contains(expected) {
            return Err(format!("Missing {:?}\n{}", expected, describe(&output)));
        }
    }
    Ok(())
}

#[test]
fn e2e_single_non_200_is_not_success() -> Result<(), String> {
    let Some((url, _server)) = spawn_status_server_or_skip("404 Not Found")? else {
        return Ok(());
    };

    let output = run_loadgen(["-u", url.as_str(), "-n", "20", "-c", "4", "--no-progress"])?;
    if !output.status.success() {
        return Err(describe(&output));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    if stdout.contains("Progress:") {
        return Err(format!("Expected no progress lines\n{}", describe(&output)));
    }
    for expected in ["Successful requests (200): 0", "404: 20 (100.00%)"] {
        if !stdout.contains(expected) {
            return Err(format!("Missing {:?}\n{}", expected, describe(&output)));
        }
    }
    Ok(())
}

#[test]
fn e2e_single_json_report_to_file() -> Result<(), String> {
    let Some((url, _server)) = spawn_http_server_or_skip()? else {
        return Ok(());
    };
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let report_path = dir.path().join("out").join("report.json");
    let report_arg = report_path.to_string_lossy().into_owned();

    let output = run_loadgen([
        "-u",
        url.as_str(),
        "-n",
        "30",
        "-c",
        "50",
        "--output-format",
        "json",
        "--output",
        report_arg.as_str(),
    ])?;
    if !output.status.success() {
        return Err(describe(&output));
    }

    let raw = fs::read_to_string(&report_path)
        .map_err(|err| format!("read report failed: {}", err))?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).map_err(|err| format!("parse report failed: {}", err))?;
    if value["total_requests"] != 30 || value["success_requests"] != 30 {
        return Err(format!("Unexpected counts in report: {}", raw));
    }
    if value["completed"] != true {
        return Err(format!("Expected a completed run: {}", raw));
    }
    Ok(())
}

#[test]
fn e2e_single_config_file_supplies_target() -> Result<(), String> {
    let Some((url, _server)) = spawn_http_server_or_skip()? else {
        return Ok(());
    };
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let config_path = dir.path().join("run.toml");
    fs::write(
        &config_path,
        format!(
            "url = \"{}\"\nrequests = 12\nconcurrency = 3\nno_progress = true\n",
            url
        ),
    )
    .map_err(|err| format!("write config failed: {}", err))?;
    let config_arg = config_path.to_string_lossy().into_owned();

    let output = run_loadgen(["--config", config_arg.as_str()])?;
    if !output.status.success() {
        return Err(describe(&output));
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.contains("Total requests: 12") {
        return Err(describe(&output));
    }
    Ok(())
}

#[test]
fn e2e_single_rejects_zero_requests() -> Result<(), String> {
    let output = run_loadgen(["-u", "http://127.0.0.1:9", "-n", "0", "-c", "1"])?;
    if output.status.success() {
        return Err(format!("Expected failure\n{}", describe(&output)));
    }
    if String::from_utf8_lossy(&output.stdout).contains("LOAD TEST REPORT") {
        return Err(format!("Expected no report\n{}", describe(&output)));
    }
    Ok(())
}

#[test]
fn e2e_single_rejects_missing_url() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let output = std::process::Command::new(env!("CARGO_BIN_EXE_loadgen"))
        .args(["-n", "5", "-c", "1"])
        .current_dir(dir.path())
        .env("LOADGEN_LOG", "error")
        .env_remove("LOADGEN_URL")
        .output()
        .map_err(|err| format!("run loadgen failed: {}", err))?;
    if output.status.success() {
        return Err(format!("Expected failure\n{}", describe(&output)));
    }
    Ok(())
}
