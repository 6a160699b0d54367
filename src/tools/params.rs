//! Argument types for the tools.
//!
//! Names are camelCase to match the input schemas advertised to clients.

use serde::Deserialize;

use crate::mutations::{MediaItem, Metafield};

/// Arguments of `attach_product_media`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AttachMediaParams {
    /// Product GID, e.g. `gid://shopify/Product/1`.
    pub product_id: String,
    /// Media to attach, in order.
    pub media: Vec<MediaItem>,
}

/// Arguments of `set_product_metafields`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SetMetafieldsParams {
    /// Product GID, e.g. `gid://shopify/Product/1`.
    pub product_id: String,
    /// Metafields to set.
    pub metafields: Vec<Metafield>,
}

/// Arguments of `upload_shopify_file`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct UploadFileParams {
    /// Local path of the file to upload.
    pub path: String,
    /// Alt text for the created file.
    #[serde(default)]
    pub alt: Option<String>,
}

/// Arguments of `upload_theme_asset`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UploadThemeAssetParams {
    /// Numeric theme id; must not be zero.
    pub theme_id: u64,
    /// Asset key within the theme, e.g. `assets/site.css`.
    pub key: String,
    /// Local path of the file to upload.
    pub path: String,
}
