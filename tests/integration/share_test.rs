//! Integration tests for share creation, redemption, and download.

use chrono::{Duration, Utc};
use http::StatusCode;

use droplink_core::ShareCode;
use droplink_entity::share::CreateShare;
use droplink_repository::ShareRepository;

use crate::helpers::{MultipartPart, TestApp};

#[tokio::test]
async fn test_create_and_redeem_text_share() {
    let app = TestApp::new().await;
    let code = app.create_text_share("hello integration").await;

    assert_eq!(code.len(), 6);

    let response = app.request("GET", &format!("/api/shares/{code}")).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["text"], "hello integration");
    assert_eq!(response.body["data"]["download_count"], 1);
    assert!(response.body["data"]["file"].is_null());
}

#[tokio::test]
async fn test_create_returns_code_and_expiry() {
    let app = TestApp::new().await;

    let response = app
        .post_multipart(
            "/api/shares",
            &[
                MultipartPart::Text {
                    name: "text",
                    value: "with custom expiry",
                },
                MultipartPart::Text {
                    name: "expiry_hours",
                    value: "6",
                },
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let code = response.body["data"]["code"].as_str().unwrap();
    assert_eq!(code.len(), 6);
    assert!(response.body["data"]["expires_at"].is_string());
}

#[tokio::test]
async fn test_redemption_is_case_insensitive() {
    let app = TestApp::new().await;
    let code = app.create_text_share("mixed case").await;

    let response = app
        .request("GET", &format!("/api/shares/{}", code.to_lowercase()))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["code"], code);
}

#[tokio::test]
async fn test_download_count_accumulates() {
    let app = TestApp::new().await;
    let code = app.create_text_share("counted").await;

    app.request("GET", &format!("/api/shares/{code}")).await;
    app.request("GET", &format!("/api/shares/{code}")).await;
    let response = app.request("GET", &format!("/api/shares/{code}")).await;

    assert_eq!(response.body["data"]["download_count"], 3);
}

#[tokio::test]
async fn test_unknown_code_returns_404() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/shares/ZZZZ22").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_malformed_code_returns_400() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/shares/nope").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION");
}

#[tokio::test]
async fn test_empty_share_returns_400() {
    let app = TestApp::new().await;

    let response = app.post_multipart("/api/shares", &[]).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION");
}

#[tokio::test]
async fn test_expired_share_returns_410() {
    let app = TestApp::new().await;

    // Insert a record that expired an hour ago.
    let code = ShareCode::parse("EXPRDD").unwrap();
    app.repository
        .insert(&CreateShare {
            code: code.clone(),
            text: Some("too late".to_string()),
            file_name: None,
            file_size: None,
            file_type: None,
            blob_key: None,
            expires_at: Utc::now() - Duration::hours(1),
        })
        .await
        .unwrap();

    let response = app.request("GET", "/api/shares/EXPRDD").await;
    assert_eq!(response.status, StatusCode::GONE);
    assert_eq!(response.body["error"], "EXPIRED");
}

#[tokio::test]
async fn test_file_share_roundtrip_inline() {
    let app = TestApp::new().await;

    let response = app
        .post_multipart(
            "/api/shares",
            &[MultipartPart::File {
                name: "file",
                file_name: "report.csv",
                content_type: "text/csv",
                data: b"a,b\n1,2\n",
            }],
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let code = response.body["data"]["code"].as_str().unwrap().to_string();

    let response = app.request("GET", &format!("/api/shares/{code}")).await;
    assert_eq!(response.status, StatusCode::OK);

    let file = &response.body["data"]["file"];
    assert_eq!(file["name"], "report.csv");
    assert_eq!(file["mime_type"], "text/csv");
    assert_eq!(file["size"], 8);
    // Memory storage inlines the payload as a data URL.
    let data_url = file["data_url"].as_str().expect("data_url expected");
    assert!(data_url.starts_with("data:text/csv;base64,"));
}

#[tokio::test]
async fn test_non_ascii_filename_survives_roundtrip() {
    let app = TestApp::new().await;

    let response = app
        .post_multipart(
            "/api/shares",
            &[MultipartPart::File {
                name: "file",
                file_name: "résumé.pdf",
                content_type: "application/pdf",
                data: b"%PDF-1.4 stub",
            }],
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let code = response.body["data"]["code"].as_str().unwrap().to_string();

    let response = app.request("GET", &format!("/api/shares/{code}")).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["file"]["name"], "résumé.pdf");

    let response = app
        .request("GET", &format!("/api/shares/{code}/file"))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.bytes, b"%PDF-1.4 stub");
}

#[tokio::test]
async fn test_file_download_endpoint_streams_bytes() {
    let app = TestApp::new().await;

    let response = app
        .post_multipart(
            "/api/shares",
            &[MultipartPart::File {
                name: "file",
                file_name: "blob.bin",
                content_type: "application/octet-stream",
                data: b"raw bytes here",
            }],
        )
        .await;
    let code = response.body["data"]["code"].as_str().unwrap().to_string();

    let response = app
        .request("GET", &format!("/api/shares/{code}/file"))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.bytes, b"raw bytes here");
    assert_eq!(
        response.headers.get("content-type").unwrap(),
        "application/octet-stream"
    );
    let disposition = response.headers.get("content-disposition").unwrap();
    assert!(
        disposition
            .to_str()
            .unwrap()
            .contains("filename=\"blob.bin\"")
    );
}

#[tokio::test]
async fn test_file_download_does_not_bump_counter() {
    let app = TestApp::new().await;

    let response = app
        .post_multipart(
            "/api/shares",
            &[MultipartPart::File {
                name: "file",
                file_name: "quiet.txt",
                content_type: "text/plain",
                data: b"quiet",
            }],
        )
        .await;
    let code = response.body["data"]["code"].as_str().unwrap().to_string();

    app.request("GET", &format!("/api/shares/{code}/file"))
        .await;
    let response = app.request("GET", &format!("/api/shares/{code}")).await;

    // Only the redemption itself counts.
    assert_eq!(response.body["data"]["download_count"], 1);
}

#[tokio::test]
async fn test_text_and_file_together() {
    let app = TestApp::new().await;

    let response = app
        .post_multipart(
            "/api/shares",
            &[
                MultipartPart::Text {
                    name: "text",
                    value: "see attachment",
                },
                MultipartPart::File {
                    name: "file",
                    file_name: "attachment.txt",
                    content_type: "text/plain",
                    data: b"attached",
                },
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let code = response.body["data"]["code"].as_str().unwrap().to_string();

    let response = app.request("GET", &format!("/api/shares/{code}")).await;
    assert_eq!(response.body["data"]["text"], "see attachment");
    assert_eq!(response.body["data"]["file"]["name"], "attachment.txt");
}

#[tokio::test]
async fn test_expiry_out_of_range_returns_400() {
    let app = TestApp::new().await;

    let response = app
        .post_multipart(
            "/api/shares",
            &[
                MultipartPart::Text {
                    name: "text",
                    value: "short lived",
                },
                MultipartPart::Text {
                    name: "expiry_hours",
                    value: "9999",
                },
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
