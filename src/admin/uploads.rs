//! File and theme asset uploads.

use std::path::Path;

use tracing::instrument;

use super::{decode, first_of, AdminClient};
use crate::clients::{DataType, FileUpload, HttpError, HttpMethod, HttpRequest};
use crate::error::{AdminError, ValidationError};
use crate::mutations::{
    build_file_create, build_staged_uploads_create, build_theme_asset, infer_upload_kind,
    AssetRecord, FileRecord, StagedUploadInput, StagedUploadTarget,
};
use crate::validation::{validate_rest, validate_upload_status, GraphqlExpectation};

const STAGED_UPLOADS_CREATE: GraphqlExpectation =
    GraphqlExpectation::new("stagedUploadsCreate", "stagedTargets");
const FILE_CREATE: GraphqlExpectation = GraphqlExpectation::new("fileCreate", "files");

impl AdminClient {
    /// Uploads a local file to the store's Files section.
    ///
    /// Runs `stagedUploadsCreate`, posts the file to the returned target and
    /// registers it with `fileCreate`. If the upload to the target is
    /// rejected, `fileCreate` is never sent and nothing is cleaned up.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Validation`] if the file cannot be read (nothing
    /// is sent), [`AdminError::Transport`] if the target rejects the upload,
    /// or whatever the validator reports for either GraphQL call.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub async fn upload_file(
        &self,
        path: &Path,
        alt: Option<String>,
    ) -> Result<FileRecord, AdminError> {
        let content = read_file(path).await?;
        let file_name = file_name_of(path)?;
        let (mime_type, resource) = infer_upload_kind(&file_name);

        let staged = build_staged_uploads_create(&StagedUploadInput {
            resource,
            filename: file_name.clone(),
            mime_type: mime_type.to_string(),
            file_size: content.len() as u64,
        })?;
        let targets = self.execute(staged, STAGED_UPLOADS_CREATE).await?;
        let target: StagedUploadTarget = decode(
            "stagedUploadsCreate",
            first_of("stagedUploadsCreate", "staged target", targets)?,
        )?;
        tracing::debug!(url = %target.url, "staged upload target reserved");

        let response = self
            .graphql
            .http_client()
            .post_multipart(
                &target.url,
                &target.form_fields(),
                FileUpload {
                    file_name,
                    mime_type: mime_type.to_string(),
                    content,
                },
            )
            .await?;
        validate_upload_status(&response, "stagedUpload")?;

        let register = build_file_create(&target.resource_url, resource, alt.as_ref())?;
        let files = self.execute(register, FILE_CREATE).await?;
        let record: FileRecord = decode("fileCreate", first_of("fileCreate", "file", files)?)?;

        tracing::info!(file_id = %record.id, "file uploaded");
        Ok(record)
    }

    /// Uploads a local file as a theme asset with one REST `PUT`.
    ///
    /// Creates the asset or replaces it if `key` already exists.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Validation`] for an unreadable file, a zero
    /// theme id or a blank key; otherwise whatever the validator reports.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub async fn upload_theme_asset(
        &self,
        theme_id: u64,
        key: &str,
        path: &Path,
    ) -> Result<AssetRecord, AdminError> {
        let content = read_file(path).await?;
        let asset = build_theme_asset(theme_id, key, &content)?;

        let request = HttpRequest::builder(HttpMethod::Put, asset.path)
            .body(asset.body)
            .body_type(DataType::Json)
            .build()
            .map_err(HttpError::from)?;
        let response = self.graphql.http_client().request(request).await?;

        let record: AssetRecord =
            decode("themeAssetUpdate", validate_rest(&response, "themeAssetUpdate", "asset")?)?;
        tracing::info!(key = %record.key, theme_id, "theme asset uploaded");
        Ok(record)
    }
}

async fn read_file(path: &Path) -> Result<Vec<u8>, ValidationError> {
    tokio::fs::read(path)
        .await
        .map_err(|e| ValidationError::FileRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
}

fn file_name_of(path: &Path) -> Result<String, ValidationError> {
    path.file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .map(ToString::to_string)
        .ok_or_else(|| ValidationError::InvalidValue {
            operation: "stagedUploadsCreate",
            field: "filename",
            reason: format!("'{}' has no usable file name", path.display()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_read_file_missing_is_validation_error() {
        let err = read_file(Path::new("/definitely/not/here.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, ValidationError::FileRead { .. }));
        assert!(err.to_string().contains("/definitely/not/here.png"));
    }

    #[tokio::test]
    async fn test_read_file_reads_whole_content() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"hello world").unwrap();

        let content = read_file(file.path()).await.unwrap();
        assert_eq!(content, b"hello world");
    }

    #[test]
    fn test_file_name_of() {
        assert_eq!(file_name_of(Path::new("/tmp/uploads/hero.png")).unwrap(), "hero.png");
        assert!(file_name_of(Path::new("/")).is_err());
    }
}
