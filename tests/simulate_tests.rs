use assert_cmd::assert::Assert;
use assert_fs::prelude::*;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::fs;
use std::sync::{Arc, Mutex};
use tokio::task;
use warp::Filter;

fn default_results() -> Value {
    json!({
        "results": {
            "monthly_savings": 1000,
            "cumulative_savings": 36000,
            "net_savings": -14000,
            "payback_months": 50,
            "roi_percentage": -28
        }
    })
}

async fn run_simulate(args: Vec<String>) -> Assert {
    let output = task::spawn_blocking(move || {
        let mut cmd = assert_cmd::cargo_bin_cmd!("roi-sim");
        cmd.env_remove("ROI_SIM_BASE_URL");
        cmd.arg("simulate").args(&args);
        cmd.output().unwrap()
    })
    .await
    .unwrap();
    Assert::new(output)
}

#[tokio::test]
async fn default_form_displays_service_results_verbatim() {
    let captured: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
    let sink = captured.clone();
    let response = default_results();
    let route = warp::path("simulate")
        .and(warp::post())
        .and(warp::body::json())
        .map(move |body: Value| {
            *sink.lock().unwrap() = Some(body);
            warp::reply::json(&response)
        });
    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    let assert = run_simulate(vec!["--base-url".into(), format!("http://{addr}")]).await;

    assert
        .success()
        .stdout(predicate::str::contains("Monthly Savings: $1000\n"))
        .stdout(predicate::str::contains("Cumulative Savings: $36000\n"))
        .stdout(predicate::str::contains("Net Savings: $-14000\n"))
        .stdout(predicate::str::contains("Payback (months): 50\n"))
        .stdout(predicate::str::contains("ROI (%): -28"));

    let body = captured.lock().unwrap().clone().unwrap();
    assert_eq!(body["monthly_invoice_volume"], json!(2000));
    assert_eq!(body["one_time_implementation_cost"], json!(50000.0));
    assert_eq!(body["scenario_name"], json!(""));
}

#[tokio::test]
async fn edited_fields_are_sent_and_output_is_written() {
    let captured: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
    let sink = captured.clone();
    let response = default_results();
    let route = warp::path("simulate")
        .and(warp::post())
        .and(warp::body::json())
        .map(move |body: Value| {
            *sink.lock().unwrap() = Some(body);
            warp::reply::json(&response)
        });
    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    let output_file = assert_fs::NamedTempFile::new("simulation.yaml").unwrap();
    let output_arg = output_file.path().to_str().unwrap().to_string();

    let assert = run_simulate(vec![
        "--base-url".into(),
        format!("http://{addr}/"),
        "--scenario-name".into(),
        "Q3 pilot".into(),
        "--num-ap-staff".into(),
        "5".into(),
        "--set".into(),
        "hourly_wage=32.5".into(),
        "-o".into(),
        output_arg.clone(),
    ])
    .await;

    assert
        .success()
        .stdout(predicate::str::contains("Scenario Name: Q3 pilot"))
        .stdout(predicate::str::contains("Simulation result written to"));

    let body = captured.lock().unwrap().clone().unwrap();
    assert_eq!(body["scenario_name"], json!("Q3 pilot"));
    assert_eq!(body["num_ap_staff"], json!(5));
    assert_eq!(body["hourly_wage"], json!(32.5));

    let output = fs::read_to_string(output_file.path()).unwrap();
    assert!(output.contains("generated_at:"));
    assert!(output.contains("scenario_name: Q3 pilot"));
    assert!(output.contains("roi_percentage: -28"));
}

#[tokio::test]
async fn server_error_reports_simulation_failed() {
    let route = warp::path("simulate").and(warp::post()).map(|| {
        warp::reply::with_status(
            warp::reply::json(&json!({ "error": "database down" })),
            warp::http::StatusCode::SERVICE_UNAVAILABLE,
        )
    });
    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    let assert = run_simulate(vec!["--base-url".into(), format!("http://{addr}")]).await;

    assert
        .failure()
        .stderr(predicate::str::contains("Simulation failed"))
        .stdout(predicate::str::contains("Monthly Savings").not());
}

#[tokio::test]
async fn unreachable_service_reports_simulation_failed() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let assert = run_simulate(vec!["--base-url".into(), format!("http://{addr}")]).await;

    assert
        .failure()
        .stderr(predicate::str::contains("Simulation failed"));
}

#[tokio::test]
async fn invalid_number_is_rejected_before_sending() {
    let hits = Arc::new(Mutex::new(0usize));
    let counter = hits.clone();
    let response = default_results();
    let route = warp::path("simulate").and(warp::post()).map(move || {
        *counter.lock().unwrap() += 1;
        warp::reply::json(&response)
    });
    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    let assert = run_simulate(vec![
        "--base-url".into(),
        format!("http://{addr}"),
        "--monthly-invoice-volume".into(),
        "lots".into(),
    ])
    .await;

    assert
        .failure()
        .stderr(predicate::str::contains("Invalid input: Monthly Invoice Volume"));
    assert_eq!(*hits.lock().unwrap(), 0);
}

#[tokio::test]
async fn base_url_can_come_from_config_file() {
    let response = default_results();
    let route = warp::path("simulate")
        .and(warp::post())
        .map(move || warp::reply::json(&response));
    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    let config_file = assert_fs::NamedTempFile::new("roi-sim.yaml").unwrap();
    config_file
        .write_str(&format!("base_url: http://{addr}\ntimeout_secs: 10\n"))
        .unwrap();
    let config_arg = config_file.path().to_str().unwrap().to_string();

    let assert = run_simulate(vec!["-c".into(), config_arg]).await;

    assert
        .success()
        .stdout(predicate::str::contains("ROI (%): -28"));
}

#[tokio::test]
async fn unknown_assignment_fails_without_request() {
    let assert = run_simulate(vec![
        "--base-url".into(),
        "http://127.0.0.1:9".into(),
        "--set".into(),
        "wage=30".into(),
    ])
    .await;

    assert
        .failure()
        .stderr(predicate::str::contains("unknown form field: wage"));
}

#[tokio::test]
async fn preformatted_and_null_figures_are_displayed() {
    let response = json!({
        "results": {
            "monthly_savings": "1000.00",
            "cumulative_savings": "36000.00",
            "net_savings": "-14000.00",
            "payback_months": null,
            "roi_percentage": "-28.00"
        }
    });
    let route = warp::path("simulate")
        .and(warp::post())
        .map(move || warp::reply::json(&response));
    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    let assert = run_simulate(vec!["--base-url".into(), format!("http://{addr}")]).await;

    assert
        .success()
        .stdout(predicate::str::contains("Monthly Savings: $1000.00\n"))
        .stdout(predicate::str::contains("Payback (months): n/a\n"))
        .stdout(predicate::str::contains("ROI (%): -28.00"))
        .stderr(predicate::str::contains("Simulation failed").not());
}
