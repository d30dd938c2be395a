//! Integration tests against a local stand-in for the document store
//! endpoint.
//!
//! Each test stands up an axum router on an ephemeral port that plays the
//! single-endpoint, `action`-discriminated API the client targets.

use std::collections::HashMap;
use std::io::Write;

use axum::body::Bytes;
use axum::extract::{Multipart, Query};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::json;
use tokio::sync::watch;

use docdrop_client::{
    DOCUMENT_VALUE_CODE, DOCUMENT_VALUE_TYPE_CODE, DocdropClient, Error, UploadProgress,
};

async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    format!("http://{addr}")
}

// -- listDocuments --------------------------------------------------------

#[tokio::test]
async fn list_documents_returns_raw_records() {
    async fn handler(Query(params): Query<HashMap<String, String>>) -> Response {
        if params.get("action").map(String::as_str) != Some("listDocuments") {
            return (StatusCode::BAD_REQUEST, "wrong action").into_response();
        }
        Json(json!({
            "documents": [
                {"key": "a", "fileName": "x.pdf", "size": 100, "lastModified": "2024-01-01T00:00:00Z"},
                {"key": "b", "fileName": "y.txt", "size": 50, "lastModified": "2024-02-01T00:00:00Z"},
            ]
        }))
        .into_response()
    }

    let endpoint = spawn_server(Router::new().route("/", get(handler))).await;
    let client = DocdropClient::new(endpoint);

    let documents = client.list_documents().await.expect("list should succeed");
    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0].key, "a");
    assert_eq!(documents[0].file_name, "x.pdf");
    assert_eq!(documents[0].size, 100);
    // The wire timestamp stays text; parsing belongs to the caller.
    assert_eq!(documents[1].last_modified, "2024-02-01T00:00:00Z");
}

#[tokio::test]
async fn list_documents_maps_server_failure() {
    async fn handler() -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response()
    }

    let endpoint = spawn_server(Router::new().route("/", get(handler))).await;
    let client = DocdropClient::new(endpoint);

    let err = client.list_documents().await.expect_err("must fail");
    match err {
        Error::Http { status, ref message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
    assert!(err.is_retryable());
}

#[tokio::test]
async fn list_documents_rejects_malformed_body() {
    async fn handler() -> Response {
        (StatusCode::OK, "not json").into_response()
    }

    let endpoint = spawn_server(Router::new().route("/", get(handler))).await;
    let client = DocdropClient::new(endpoint);

    let err = client.list_documents().await.expect_err("must fail");
    assert!(matches!(err, Error::Deserialization(_)), "got {err:?}");
}

// -- uploadFile -----------------------------------------------------------

async fn echo_upload(
    Query(params): Query<HashMap<String, String>>,
    mut multipart: Multipart,
) -> Response {
    if params.get("action").map(String::as_str) != Some("uploadFile") {
        return (StatusCode::BAD_REQUEST, "wrong action").into_response();
    }

    let mut file_name = None;
    let mut content_type = None;
    let mut file_size = 0;
    let mut fields = HashMap::new();
    while let Some(field) = multipart.next_field().await.expect("multipart field") {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            file_name = field.file_name().map(ToString::to_string);
            content_type = field.content_type().map(ToString::to_string);
            file_size = field.bytes().await.expect("file bytes").len();
        } else {
            fields.insert(name, field.text().await.expect("field text"));
        }
    }

    Json(json!({
        "fileName": file_name,
        "contentType": content_type,
        "fileSize": file_size,
        "fields": fields,
    }))
    .into_response()
}

#[tokio::test]
async fn upload_sends_multipart_with_fixed_fields() {
    let endpoint = spawn_server(Router::new().route("/", post(echo_upload))).await;
    let client = DocdropClient::new(endpoint);

    let payload = client
        .upload_file("report.pdf", vec![1, 2, 3, 4])
        .await
        .expect("upload should succeed");

    assert_eq!(payload["fileName"], "report.pdf");
    assert_eq!(payload["contentType"], "application/pdf");
    assert_eq!(payload["fileSize"], 4);
    assert_eq!(payload["fields"]["documentValueCode"], DOCUMENT_VALUE_CODE);
    assert_eq!(
        payload["fields"]["documentValueTypeCode"],
        DOCUMENT_VALUE_TYPE_CODE
    );
}

#[tokio::test]
async fn upload_failure_carries_body_verbatim() {
    async fn handler() -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, "upload exploded").into_response()
    }

    let endpoint = spawn_server(Router::new().route("/", post(handler))).await;
    let client = DocdropClient::new(endpoint);

    let err = client
        .upload_file("a.txt", b"hi".to_vec())
        .await
        .expect_err("must fail");
    match err {
        Error::Http { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "upload exploded");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn upload_path_streams_file_and_reports_progress() {
    let endpoint = spawn_server(Router::new().route("/", post(echo_upload))).await;
    let client = DocdropClient::new(endpoint);

    let content = vec![0xAB_u8; 64 * 1024];
    let mut file = tempfile::NamedTempFile::with_suffix(".png").expect("temp file");
    file.write_all(&content).expect("write fixture");
    file.flush().expect("flush fixture");

    let (tx, rx) = watch::channel(UploadProgress::default());
    let payload = client
        .upload_path(file.path(), Some(tx))
        .await
        .expect("upload should succeed");

    assert_eq!(payload["contentType"], "image/png");
    assert_eq!(payload["fileSize"], content.len());

    let last = *rx.borrow();
    assert_eq!(last.total, content.len() as u64);
    assert_eq!(last.sent, last.total);
    assert_eq!(last.percent(), 100);
}

#[tokio::test]
async fn upload_path_without_file_name_is_a_configuration_error() {
    let client = DocdropClient::new("http://localhost:1");
    let err = client
        .upload_path("/", None)
        .await
        .expect_err("must fail before any request");
    assert!(matches!(err, Error::Configuration(_)), "got {err:?}");
}

// -- downloadFile ---------------------------------------------------------

#[tokio::test]
async fn download_binary_sends_accept_and_returns_raw_body() {
    async fn handler(Query(params): Query<HashMap<String, String>>, headers: HeaderMap) -> Response {
        if params.get("action").map(String::as_str) != Some("downloadFile") {
            return (StatusCode::BAD_REQUEST, "wrong action").into_response();
        }
        if params.get("key").map(String::as_str) != Some("k-42") {
            return (StatusCode::NOT_FOUND, "unknown key").into_response();
        }
        if headers.get(header::ACCEPT).and_then(|v| v.to_str().ok()) != Some("application/pdf") {
            return (StatusCode::BAD_REQUEST, "missing accept").into_response();
        }
        Bytes::from_static(&[0x25, 0x50, 0x44, 0x46, 0x00, 0xFF]).into_response()
    }

    let endpoint = spawn_server(Router::new().route("/", get(handler))).await;
    let client = DocdropClient::new(endpoint);

    let bytes = client
        .download_file("k-42", "report.pdf")
        .await
        .expect("download should succeed");
    assert_eq!(bytes.as_ref(), &[0x25, 0x50, 0x44, 0x46, 0x00, 0xFF]);
}

fn text_envelope_router(content: &'static [u8]) -> Router {
    let encoded = BASE64.encode(content);
    Router::new().route(
        "/",
        get(move || {
            let encoded = encoded.clone();
            async move { Json(json!({ "fileContent": encoded })) }
        }),
    )
}

#[tokio::test]
async fn download_txt_round_trips_base64_exactly() {
    // Embedded nulls and non-UTF-8 bytes must survive the envelope.
    const CONTENT: &[u8] = b"line one\x00line two\xFF\x00";
    let endpoint = spawn_server(text_envelope_router(CONTENT)).await;
    let client = DocdropClient::new(endpoint);

    let bytes = client
        .download_file("k", "notes.txt")
        .await
        .expect("download should succeed");
    assert_eq!(bytes.as_ref(), CONTENT);
}

#[tokio::test]
async fn download_txt_handles_empty_content() {
    let endpoint = spawn_server(text_envelope_router(b"")).await;
    let client = DocdropClient::new(endpoint);

    let bytes = client
        .download_file("k", "empty.txt")
        .await
        .expect("download should succeed");
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn download_txt_malformed_base64_is_a_decode_error() {
    async fn handler() -> Response {
        Json(json!({ "fileContent": "%%%not-base64%%%" })).into_response()
    }

    let endpoint = spawn_server(Router::new().route("/", get(handler))).await;
    let client = DocdropClient::new(endpoint);

    let err = client
        .download_file("k", "notes.txt")
        .await
        .expect_err("must fail");
    assert!(matches!(err, Error::Decode(_)), "got {err:?}");
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn download_txt_missing_envelope_field_is_a_deserialization_error() {
    async fn handler() -> Response {
        Json(json!({ "unexpected": true })).into_response()
    }

    let endpoint = spawn_server(Router::new().route("/", get(handler))).await;
    let client = DocdropClient::new(endpoint);

    let err = client
        .download_file("k", "notes.txt")
        .await
        .expect_err("must fail");
    assert!(matches!(err, Error::Deserialization(_)), "got {err:?}");
}

#[tokio::test]
async fn download_failure_maps_status() {
    async fn handler() -> Response {
        (StatusCode::NOT_FOUND, "no such key").into_response()
    }

    let endpoint = spawn_server(Router::new().route("/", get(handler))).await;
    let client = DocdropClient::new(endpoint);

    let err = client
        .download_file("missing", "gone.pdf")
        .await
        .expect_err("must fail");
    assert_eq!(err.status(), Some(404));
}
