//! Integration tests for file uploads and theme assets.
//!
//! The staged upload target is served by the same mock server as the Admin
//! API, under a path of its own.

use std::path::PathBuf;

use serde_json::json;
use shopify_admin_tools::{
    AccessToken, AdminClient, AdminError, BaseUrl, ShopDomain, ShopifyConfig, TransportError,
    ValidationError,
};
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockBuilder, MockServer, ResponseTemplate};

const GRAPHQL_PATH: &str = "/admin/api/2024-01/graphql.json";
const STAGED_PATH: &str = "/staged-uploads/bucket";
const RESOURCE_URL: &str = "https://shopify-staged-uploads.storage.googleapis.com/tmp/logo.png";

fn client_for(server: &MockServer) -> AdminClient {
    let config = ShopifyConfig::builder()
        .shop(ShopDomain::new("test-shop").unwrap())
        .access_token(AccessToken::new("shpat_test_token").unwrap())
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();
    AdminClient::new(&config).unwrap()
}

fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn graphql(operation: &str) -> MockBuilder {
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains(format!("mutation {operation}(")))
}

async fn mount_staged_target(server: &MockServer) {
    graphql("stagedUploadsCreate")
        .and(body_partial_json(json!({
            "variables": {"input": [{
                "resource": "IMAGE",
                "filename": "logo.png",
                "mimeType": "image/png",
                "httpMethod": "POST",
                "fileSize": "10"
            }]}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"stagedUploadsCreate": {
                "stagedTargets": [{
                    "url": format!("{}{STAGED_PATH}", server.uri()),
                    "resourceUrl": RESOURCE_URL,
                    "parameters": [
                        {"name": "key", "value": "tmp/logo.png"},
                        {"name": "policy", "value": "signed-policy-value"}
                    ]
                }],
                "userErrors": []
            }}
        })))
        .expect(1)
        .mount(server)
        .await;
}

// ============================================================================
// Staged file upload
// ============================================================================

#[tokio::test]
async fn test_upload_file_runs_all_three_steps() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(&dir, "logo.png", b"0123456789");

    mount_staged_target(&server).await;
    Mock::given(method("POST"))
        .and(path(STAGED_PATH))
        .and(body_string_contains("signed-policy-value"))
        .and(body_string_contains("0123456789"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    graphql("fileCreate")
        .and(body_partial_json(json!({
            "variables": {"files": [{
                "originalSource": RESOURCE_URL,
                "contentType": "IMAGE",
                "alt": "Store logo"
            }]}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"fileCreate": {
                "files": [{
                    "id": "gid://shopify/MediaImage/11",
                    "fileStatus": "UPLOADED",
                    "alt": "Store logo",
                    "createdAt": "2024-03-01T12:00:00Z"
                }],
                "userErrors": []
            }}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let record = client_for(&server)
        .upload_file(&file, Some("Store logo".to_string()))
        .await
        .unwrap();

    assert_eq!(record.id, "gid://shopify/MediaImage/11");
    assert_eq!(record.file_status.as_deref(), Some("UPLOADED"));
    assert_eq!(record.alt.as_deref(), Some("Store logo"));
    assert!(record.created_at.is_some());
}

#[tokio::test]
async fn test_rejected_upload_skips_file_create() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(&dir, "logo.png", b"0123456789");

    mount_staged_target(&server).await;
    Mock::given(method("POST"))
        .and(path(STAGED_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("<Error>AccessDenied</Error>"))
        .expect(1)
        .mount(&server)
        .await;
    graphql("fileCreate")
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .upload_file(&file, None)
        .await
        .unwrap_err();

    match err {
        AdminError::Transport(TransportError::Status { status, body, .. }) => {
            assert_eq!(status, 403);
            assert!(body.contains("AccessDenied"));
        }
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_staged_upload_user_errors_stop_before_upload() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(&dir, "logo.png", b"0123456789");

    graphql("stagedUploadsCreate")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"stagedUploadsCreate": {
                "stagedTargets": [],
                "userErrors": [{"field": ["input", "0", "fileSize"], "message": "File size is too large"}]
            }}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(STAGED_PATH))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .upload_file(&file, None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "UserError");
    assert!(err.to_string().contains("input.0.fileSize: File size is too large"));
}

#[tokio::test]
async fn test_missing_local_file_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();

    let err = client_for(&server)
        .upload_file(&dir.path().join("absent.png"), None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AdminError::Validation(ValidationError::FileRead { .. })
    ));
}

// ============================================================================
// Theme assets
// ============================================================================

#[tokio::test]
async fn test_text_theme_asset_is_put_as_value() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(&dir, "site.css", b"body { margin: 0; }");

    Mock::given(method("PUT"))
        .and(path("/admin/api/2024-01/themes/42/assets.json"))
        .and(header("X-Shopify-Access-Token", "shpat_test_token"))
        .and(body_partial_json(json!({
            "asset": {"key": "assets/site.css", "value": "body { margin: 0; }"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "asset": {
                "key": "assets/site.css",
                "public_url": "https://cdn.shopify.com/s/files/1/0001/t/42/assets/site.css",
                "content_type": "text/css",
                "size": 19,
                "theme_id": 42,
                "updated_at": "2024-03-01T12:00:00-05:00"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let asset = client_for(&server)
        .upload_theme_asset(42, "assets/site.css", &file)
        .await
        .unwrap();

    assert_eq!(asset.key, "assets/site.css");
    assert_eq!(asset.theme_id, Some(42));
    assert_eq!(asset.size, Some(19));
    assert!(asset.updated_at.is_some());
}

#[tokio::test]
async fn test_binary_theme_asset_is_put_as_attachment() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(&dir, "logo.png", &[0x89, b'P', b'N', b'G']);

    Mock::given(method("PUT"))
        .and(path("/admin/api/2024-01/themes/7/assets.json"))
        .and(body_partial_json(json!({
            "asset": {"key": "assets/logo.png", "attachment": "iVBORw=="}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "asset": {"key": "assets/logo.png", "content_type": "image/png"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let asset = client_for(&server)
        .upload_theme_asset(7, "assets/logo.png", &file)
        .await
        .unwrap();
    assert_eq!(asset.content_type.as_deref(), Some("image/png"));
}

#[tokio::test]
async fn test_theme_asset_errors() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(&dir, "site.css", b"body {}");

    Mock::given(method("PUT"))
        .and(path("/admin/api/2024-01/themes/404/assets.json"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"errors": "Not Found"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/admin/api/2024-01/themes/5/assets.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": {"asset": ["key is invalid"]}
        })))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server);

    let err = client
        .upload_theme_asset(404, "assets/site.css", &file)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AdminError::Transport(TransportError::Status { status: 404, .. })
    ));

    let err = client
        .upload_theme_asset(5, "assets/site.css", &file)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "ApiError");

    let err = client
        .upload_theme_asset(0, "assets/site.css", &file)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AdminError::Validation(ValidationError::InvalidValue { field: "theme_id", .. })
    ));
}
