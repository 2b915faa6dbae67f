//! tests/api/leads.rs

use crate::helpers::{api_client, received, upload, upload_with_delay, BASIC_AUTH};
use lemlist_cli::upload::{leads_reader, upload_leads};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{any, body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HEADER: &str = "email,firstName,lastName,companyName,campaignId,customOpeningLine\n";

fn csv(rows: &[&str]) -> Vec<u8> {
    let mut data = HEADER.to_string();
    for row in rows {
        data.push_str(row);
        data.push('\n');
    }
    data.into_bytes()
}

#[tokio::test]
async fn valid_row_is_posted_to_its_campaign() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/campaigns/cam_42/leads"))
        .and(header("authorization", BASIC_AUTH))
        .and(body_json(json!({
            "email": "ada@example.com",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "companyName": "Analytical Engines",
            "customVariables": {"customOpeningLine": "Saw your talk on engines"}
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    // Act
    let summary = upload(
        &server,
        &csv(&["ada@example.com,Ada,Lovelace,Analytical Engines,cam_42,Saw your talk on engines"]),
    )
    .await;

    // Assert
    assert_eq!(summary.total_processed, 1);
    assert_eq!(summary.successful, 1);
    assert_eq!(summary.failed, 0);
    assert!(summary.skipped_rows.is_empty());
}

#[tokio::test]
async fn missing_optional_fields_are_sent_as_null() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/campaigns/cam_1/leads"))
        .and(body_json(json!({
            "email": "grace@example.com",
            "firstName": "Grace",
            "lastName": null,
            "companyName": null,
            "customVariables": {"customOpeningLine": "Hi"}
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let summary = upload(&server, &csv(&["grace@example.com,Grace,,,cam_1,Hi"])).await;

    assert_eq!(summary.successful, 1);
}

#[tokio::test]
async fn rows_missing_required_fields_send_no_request() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let summary = upload(
        &server,
        &csv(&[
            ",Ada,Lovelace,ACME,cam_1,Hi",
            "ada@example.com,,Lovelace,ACME,cam_1,Hi",
            "ada@example.com,Ada,Lovelace,ACME,,Hi",
            "ada@example.com,Ada,Lovelace,ACME,cam_1,",
            "ada@example.com,Ada",
        ]),
    )
    .await;

    assert_eq!(summary.total_processed, 0);
    assert_eq!(summary.successful, 0);
    assert_eq!(summary.failed, 5);
    assert_eq!(summary.skipped_rows, vec![2, 3, 4, 5, 6]);
}

#[tokio::test]
async fn three_row_file_with_one_missing_email() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let summary = upload(
        &server,
        &csv(&[
            "ada@example.com,Ada,Lovelace,ACME,cam_1,Hi Ada",
            ",Bob,Builder,ACME,cam_1,Hi Bob",
            "grace@example.com,Grace,Hopper,Navy,cam_2,Hi Grace",
        ]),
    )
    .await;

    assert_eq!(summary.total_processed, 2);
    assert!(summary.successful <= 2);
    assert!(summary.failed >= 1);
    assert_eq!(summary.skipped_rows, vec![3]);

    let paths: Vec<_> = received(&server).await.into_iter().map(|(p, _)| p).collect();
    assert_eq!(paths, vec!["/campaigns/cam_1/leads", "/campaigns/cam_2/leads"]);
}

#[tokio::test]
async fn non_success_status_counts_as_failed_and_continues() {
    let server = MockServer::start().await;
    Mock::given(path("/campaigns/cam_bad/leads"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Lead already exists"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/campaigns/cam_ok/leads"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let summary = upload(
        &server,
        &csv(&[
            "ada@example.com,Ada,,,cam_bad,Hi",
            "grace@example.com,Grace,,,cam_ok,Hi",
        ]),
    )
    .await;

    assert_eq!(summary.total_processed, 2);
    assert_eq!(summary.successful, 1);
    assert_eq!(summary.failed, 1);
    assert!(summary.skipped_rows.is_empty());
}

#[tokio::test]
async fn unreadable_row_is_skipped() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut data = HEADER.as_bytes().to_vec();
    data.extend_from_slice(b"\xff\xfe@example.com,Ada,,,cam_1,Hi\n");
    data.extend_from_slice(b"grace@example.com,Grace,,,cam_1,Hi\n");

    let summary = upload(&server, &data).await;

    assert_eq!(summary.skipped_rows, vec![2]);
    assert_eq!(summary.total_processed, 1);
    assert_eq!(summary.successful, 1);
    assert_eq!(summary.failed, 1);
}

#[tokio::test]
async fn delay_follows_each_request_but_not_skipped_rows() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;
    let delay = Duration::from_millis(200);

    let (summary, elapsed) = upload_with_delay(
        &server,
        &csv(&[
            "ada@example.com,Ada,,,cam_1,Hi Ada",
            ",Bob,,,cam_1,Hi Bob",
            ",Carol,,,cam_1,Hi Carol",
            "grace@example.com,Grace,,,cam_1,Hi Grace",
        ]),
        delay,
    )
    .await;

    assert_eq!(summary.total_processed, 2);
    assert_eq!(summary.successful, 2);
    assert_eq!(summary.failed, 2);
    assert_eq!(summary.skipped_rows, vec![3, 4]);
    assert!(elapsed >= delay * 2, "finished too early: {:?}", elapsed);
    assert!(elapsed < delay * 3, "skipped rows were delayed: {:?}", elapsed);
}

#[test]
fn network_failure_counts_as_failed() {
    // Nothing listens on port 1.
    let client = api_client("http://127.0.0.1:1");
    let data = csv(&["ada@example.com,Ada,,,cam_1,Hi"]);
    let mut reader = leads_reader(data.as_slice());

    let summary = upload_leads(&client, &mut reader, Duration::ZERO);

    assert_eq!(summary.total_processed, 1);
    assert_eq!(summary.successful, 0);
    assert_eq!(summary.failed, 1);
}
