//! Staged uploads and file registration.
//!
//! Uploading a file to Shopify's Files section takes three calls:
//! `stagedUploadsCreate` reserves a pre-authorized target, the bytes are
//! posted to that target, and `fileCreate` registers the uploaded resource.
//! This module builds the two GraphQL calls and models their results.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{non_blank, require, Mutation};
use crate::error::ValidationError;

/// The `stagedUploadsCreate` document.
pub const STAGED_UPLOADS_CREATE_MUTATION: &str = r"mutation stagedUploadsCreate($input: [StagedUploadInput!]!) {
  stagedUploadsCreate(input: $input) {
    stagedTargets {
      url
      resourceUrl
      parameters {
        name
        value
      }
    }
    userErrors {
      field
      message
    }
  }
}";

/// The `fileCreate` document.
pub const FILE_CREATE_MUTATION: &str = r"mutation fileCreate($files: [FileCreateInput!]!) {
  fileCreate(files: $files) {
    files {
      id
      fileStatus
      alt
      createdAt
    }
    userErrors {
      field
      message
    }
  }
}";

/// What kind of resource a staged upload is for.
///
/// The same names are used as the `contentType` of `fileCreate`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UploadResource {
    /// Still images.
    Image,
    /// Video files.
    Video,
    /// 3D models such as `.glb`.
    #[serde(rename = "MODEL_3D")]
    Model3d,
    /// Anything else.
    File,
}

/// Infers the MIME type and upload resource from a file name's extension.
///
/// Unknown extensions upload as a generic [`UploadResource::File`] with
/// `application/octet-stream`.
///
/// # Example
///
/// ```rust
/// use shopify_admin_tools::mutations::{infer_upload_kind, UploadResource};
///
/// assert_eq!(infer_upload_kind("hero.JPG"), ("image/jpeg", UploadResource::Image));
/// assert_eq!(infer_upload_kind("notes"), ("application/octet-stream", UploadResource::File));
/// ```
#[must_use]
pub fn infer_upload_kind(file_name: &str) -> (&'static str, UploadResource) {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => ("image/jpeg", UploadResource::Image),
        "png" => ("image/png", UploadResource::Image),
        "gif" => ("image/gif", UploadResource::Image),
        "webp" => ("image/webp", UploadResource::Image),
        "heic" => ("image/heic", UploadResource::Image),
        "svg" => ("image/svg+xml", UploadResource::Image),
        "mp4" => ("video/mp4", UploadResource::Video),
        "mov" => ("video/quicktime", UploadResource::Video),
        "webm" => ("video/webm", UploadResource::Video),
        "glb" => ("model/gltf-binary", UploadResource::Model3d),
        "gltf" => ("model/gltf+json", UploadResource::Model3d),
        "usdz" => ("model/vnd.usdz+zip", UploadResource::Model3d),
        "pdf" => ("application/pdf", UploadResource::File),
        "txt" => ("text/plain", UploadResource::File),
        "csv" => ("text/csv", UploadResource::File),
        "json" => ("application/json", UploadResource::File),
        "zip" => ("application/zip", UploadResource::File),
        _ => ("application/octet-stream", UploadResource::File),
    }
}

/// One file to reserve a staged upload target for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedUploadInput {
    /// What the file will become.
    pub resource: UploadResource,
    /// File name without directories.
    pub filename: String,
    /// MIME type, e.g. `image/png`.
    pub mime_type: String,
    /// Size in bytes.
    pub file_size: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StagedUploadVariables<'a> {
    resource: UploadResource,
    filename: &'a str,
    mime_type: &'a str,
    http_method: &'static str,
    file_size: String,
}

/// A name/value pair to send as a form field with the upload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StagedUploadParameter {
    /// Form field name.
    pub name: String,
    /// Form field value.
    pub value: String,
}

/// A pre-authorized upload target.
///
/// Consumed by exactly one upload attempt; never cached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StagedUploadTarget {
    /// Where to POST the multipart form.
    pub url: String,
    /// What to pass to `fileCreate` once the upload succeeded.
    pub resource_url: String,
    /// Form fields to send before the file, in order.
    #[serde(default)]
    pub parameters: Vec<StagedUploadParameter>,
}

impl StagedUploadTarget {
    /// Returns the parameters as `(name, value)` form fields, in order.
    #[must_use]
    pub fn form_fields(&self) -> Vec<(String, String)> {
        self.parameters
            .iter()
            .map(|p| (p.name.clone(), p.value.clone()))
            .collect()
    }
}

/// A file registered with `fileCreate`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// Global id, e.g. `gid://shopify/MediaImage/1`.
    pub id: String,
    /// Processing state: `UPLOADED`, `PROCESSING`, `READY` or `FAILED`.
    #[serde(default)]
    pub file_status: Option<String>,
    /// Alt text.
    #[serde(default)]
    pub alt: Option<String>,
    /// When Shopify created the file.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Builds a `stagedUploadsCreate` call for a single file.
///
/// Always requests a `POST` target.
///
/// # Errors
///
/// Returns [`ValidationError::MissingField`] when `filename` or `mimeType` is
/// blank.
pub fn build_staged_uploads_create(input: &StagedUploadInput) -> Result<Mutation, ValidationError> {
    const OPERATION: &str = "stagedUploadsCreate";

    let variables = StagedUploadVariables {
        resource: input.resource,
        filename: require(OPERATION, "filename", &input.filename)?,
        mime_type: require(OPERATION, "mimeType", &input.mime_type)?,
        http_method: "POST",
        file_size: input.file_size.to_string(),
    };

    Ok(Mutation {
        operation: OPERATION,
        document: STAGED_UPLOADS_CREATE_MUTATION,
        variables: serde_json::json!({ "input": [variables] }),
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FileCreateInput<'a> {
    original_source: &'a str,
    content_type: UploadResource,
    #[serde(skip_serializing_if = "Option::is_none")]
    alt: Option<&'a str>,
}

/// Builds a `fileCreate` call registering an uploaded resource.
///
/// # Errors
///
/// Returns [`ValidationError::MissingField`] when `resource_url` is blank.
pub fn build_file_create(
    resource_url: &str,
    content_type: UploadResource,
    alt: Option<&String>,
) -> Result<Mutation, ValidationError> {
    const OPERATION: &str = "fileCreate";

    let file = FileCreateInput {
        original_source: require(OPERATION, "originalSource", resource_url)?,
        content_type,
        alt: non_blank(alt),
    };

    Ok(Mutation {
        operation: OPERATION,
        document: FILE_CREATE_MUTATION,
        variables: serde_json::json!({ "files": [file] }),
    })
}
