//! Tool façade over [`AdminClient`].
//!
//! Every tool returns a [`ToolOutput`]: a human-readable report plus an error
//! flag. This is the only layer that turns [`AdminError`]s into text. Success
//! reports embed the returned resource as pretty-printed JSON; failures are a
//! single line starting with a stable prefix such as `Error creating product: `.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_admin_tools::{AdminClient, ProductSpec, ShopifyTools};
//!
//! let tools = ShopifyTools::new(AdminClient::new(&config)?);
//! let (result, output) = tools.create_product(&ProductSpec::new("Test Shirt")).await;
//! assert_eq!(result.success, !output.is_error);
//! println!("{}", output.text);
//! ```

mod definitions;
mod params;

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::admin::{AdminClient, OperationResult, WorkflowError};
use crate::error::AdminError;
use crate::mutations::ProductSpec;

pub use definitions::{
    tool_definitions, ToolDefinition, ATTACH_MEDIA, CREATE_PRODUCT, SET_METAFIELDS, UPLOAD_FILE,
    UPLOAD_THEME_ASSET,
};
pub use params::{AttachMediaParams, SetMetafieldsParams, UploadFileParams, UploadThemeAssetParams};

const CREATE_PRODUCT_ERROR: &str = "Error creating product";
const ATTACH_MEDIA_ERROR: &str = "Error attaching media";
const SET_METAFIELDS_ERROR: &str = "Error setting metafields";
const UPLOAD_FILE_ERROR: &str = "Error uploading file";
const UPLOAD_THEME_ASSET_ERROR: &str = "Error uploading theme asset";

/// The report produced by one tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// The report shown to the client.
    pub text: String,
    /// Whether the tool failed.
    pub is_error: bool,
}

impl ToolOutput {
    fn success(headline: &str, payload: &impl Serialize) -> Self {
        let json = serde_json::to_string_pretty(payload)
            .unwrap_or_else(|e| format!("<unserializable response: {e}>"));
        Self {
            text: format!("{headline}\nResponse: {json}"),
            is_error: false,
        }
    }

    /// Line breaks in `message` (e.g. an HTML error page) are collapsed so the
    /// report stays on one line.
    fn failure(prefix: &str, message: impl std::fmt::Display) -> Self {
        let message = message.to_string();
        let message = message.split_whitespace().collect::<Vec<_>>().join(" ");
        Self {
            text: format!("{prefix}: {message}"),
            is_error: true,
        }
    }
}

/// Returned by [`ShopifyTools::call`] for a name no tool answers to.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown tool: {0}")]
pub struct UnknownToolError(pub String);

/// The tools, bound to one store.
#[derive(Clone, Debug)]
pub struct ShopifyTools {
    client: AdminClient,
}

impl ShopifyTools {
    /// Wraps `client`.
    #[must_use]
    pub const fn new(client: AdminClient) -> Self {
        Self { client }
    }

    /// Invokes a tool by name with JSON arguments.
    ///
    /// Arguments that do not match the tool's schema produce an error report,
    /// not an `Err`.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownToolError`] if `name` is not one of
    /// [`tool_definitions`].
    pub async fn call(&self, name: &str, arguments: Value) -> Result<ToolOutput, UnknownToolError> {
        let output = match name {
            CREATE_PRODUCT => match parse::<ProductSpec>(CREATE_PRODUCT_ERROR, arguments) {
                Ok(spec) => self.create_product(&spec).await.1,
                Err(output) => output,
            },
            ATTACH_MEDIA => match parse::<AttachMediaParams>(ATTACH_MEDIA_ERROR, arguments) {
                Ok(params) => self.attach_media(&params).await,
                Err(output) => output,
            },
            SET_METAFIELDS => match parse::<SetMetafieldsParams>(SET_METAFIELDS_ERROR, arguments) {
                Ok(params) => self.set_metafields(&params).await,
                Err(output) => output,
            },
            UPLOAD_FILE => match parse::<UploadFileParams>(UPLOAD_FILE_ERROR, arguments) {
                Ok(params) => self.upload_file(params).await,
                Err(output) => output,
            },
            UPLOAD_THEME_ASSET => {
                match parse::<UploadThemeAssetParams>(UPLOAD_THEME_ASSET_ERROR, arguments) {
                    Ok(params) => self.upload_theme_asset(&params).await,
                    Err(output) => output,
                }
            }
            other => return Err(UnknownToolError(other.to_string())),
        };
        Ok(output)
    }

    /// Creates a product and reports the outcome.
    pub async fn create_product(&self, spec: &ProductSpec) -> (OperationResult, ToolOutput) {
        let outcome = self.client.create_product(spec).await;
        let result = OperationResult::from(&outcome);
        let output = match outcome {
            Ok(created) => ToolOutput::success("Product creation successful", &created.product),
            Err(error) => ToolOutput::failure(CREATE_PRODUCT_ERROR, describe_workflow_error(&error)),
        };
        (result, output)
    }

    /// Attaches media to an existing product and reports the outcome.
    pub async fn attach_media(&self, params: &AttachMediaParams) -> ToolOutput {
        report(
            "Media attached successfully",
            ATTACH_MEDIA_ERROR,
            self.client.attach_media(&params.product_id, &params.media).await,
        )
    }

    /// Sets metafields on an existing product and reports the outcome.
    pub async fn set_metafields(&self, params: &SetMetafieldsParams) -> ToolOutput {
        report(
            "Metafields set successfully",
            SET_METAFIELDS_ERROR,
            self.client
                .set_metafields(&params.product_id, &params.metafields)
                .await,
        )
    }

    /// Uploads a local file to Files and reports the outcome.
    pub async fn upload_file(&self, params: UploadFileParams) -> ToolOutput {
        report(
            "File upload successful",
            UPLOAD_FILE_ERROR,
            self.client
                .upload_file(Path::new(&params.path), params.alt)
                .await,
        )
    }

    /// Uploads a local file into a theme and reports the outcome.
    pub async fn upload_theme_asset(&self, params: &UploadThemeAssetParams) -> ToolOutput {
        report(
            "Theme asset upload successful",
            UPLOAD_THEME_ASSET_ERROR,
            self.client
                .upload_theme_asset(params.theme_id, &params.key, Path::new(&params.path))
                .await,
        )
    }
}

fn parse<T: DeserializeOwned>(prefix: &str, arguments: Value) -> Result<T, ToolOutput> {
    serde_json::from_value(arguments)
        .map_err(|e| ToolOutput::failure(prefix, format!("invalid arguments: {e}")))
}

fn report<T: Serialize>(headline: &str, prefix: &str, result: Result<T, AdminError>) -> ToolOutput {
    match result {
        Ok(payload) => ToolOutput::success(headline, &payload),
        Err(error) => {
            tracing::warn!(kind = error.kind(), %error, "tool call failed");
            ToolOutput::failure(prefix, error)
        }
    }
}

fn describe_workflow_error(error: &WorkflowError) -> String {
    let Some(product_id) = &error.product_id else {
        return error.source.to_string();
    };
    let pending = error
        .pending_compensations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{} (product {product_id} was created and not rolled back; pending: {pending})",
        error.source
    )
}
