//! `gateway-cli` against a running gateway.

mod common;

use std::process::Output;

use tokio::process::Command;

use common::{rejected_pay_body, start_gateway, start_happy_provider, start_mock_provider, success_body};

async fn run_cli(gateway_url: &str, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gateway-cli"))
        .arg("--url")
        .arg(gateway_url)
        .args(args)
        .output()
        .await
        .unwrap()
}

const PAY_ARGS: &[&str] = &[
    "pay",
    "--amount",
    "5",
    "--request-id",
    "order-1",
    "--access-token",
    "tok",
    "--customer-id",
    "cus-1",
    "--order-desc",
    "Tea",
    "--notify-url",
    "https://merchant.example/notify",
];

#[tokio::test]
async fn test_cli_health_succeeds() {
    let provider = start_happy_provider().await;
    let gateway = start_gateway(&provider.url(), 5_000).await;

    let output = run_cli(&gateway.url(), &["health"]).await;
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("superqi-proxy"));
}

#[tokio::test]
async fn test_cli_pay_success_prints_payment() {
    let provider = start_happy_provider().await;
    let gateway = start_gateway(&provider.url(), 5_000).await;

    let output = run_cli(&gateway.url(), PAY_ARGS).await;
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("pay-1"));
    assert_eq!(provider.last_call().params["paymentAmount"]["value"], "5000");
}

#[tokio::test]
async fn test_cli_rejected_payment_exits_nonzero() {
    let provider = start_mock_provider(|path, params| match path {
        "/v1/payments/pay" => (200, rejected_pay_body("insufficient funds").to_string()),
        _ => (200, success_body(path, params).to_string()),
    })
    .await;
    let gateway = start_gateway(&provider.url(), 5_000).await;

    let output = run_cli(&gateway.url(), PAY_ARGS).await;
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("422"));
    assert!(stderr.contains("insufficient funds"));
}

#[tokio::test]
async fn test_cli_payment_status_exits_nonzero() {
    let provider = start_happy_provider().await;
    let gateway = start_gateway(&provider.url(), 5_000).await;

    let output = run_cli(&gateway.url(), &["status", "pay-9"]).await;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("501"));
}
