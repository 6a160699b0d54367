//! Request builders for Admin API operations.
//!
//! Each builder validates its input record and produces either a GraphQL
//! [`Mutation`] (document plus variables) or, for theme assets, a REST body.
//! Field names in the variables tree are the API's own (`descriptionHtml`,
//! `collectionsToJoin`, `ownerId`). Optional fields that were not supplied are
//! left out entirely: they never appear as `null` or as empty lists.
//!
//! Nothing in this module performs I/O.
//!
//! # Example
//!
//! ```rust
//! use shopify_admin_tools::mutations::{build_product_create, ProductSpec};
//!
//! let spec = ProductSpec::new("Test Shirt");
//! let mutation = build_product_create(&spec).unwrap();
//!
//! assert_eq!(mutation.operation, "productCreate");
//! assert_eq!(mutation.variables["input"]["title"], "Test Shirt");
//! assert!(mutation.variables["input"].get("vendor").is_none());
//! ```

mod files;
mod media;
mod metafield;
mod product;
mod theme_asset;

use serde_json::Value;

use crate::error::ValidationError;

pub use files::{
    build_file_create, build_staged_uploads_create, infer_upload_kind, FileRecord,
    StagedUploadInput, StagedUploadParameter, StagedUploadTarget, UploadResource,
    FILE_CREATE_MUTATION, STAGED_UPLOADS_CREATE_MUTATION,
};
pub(crate) use media::check_media;
pub(crate) use metafield::check_metafields;
pub use media::{build_product_create_media, MediaContentType, MediaItem, PRODUCT_CREATE_MEDIA_MUTATION};
pub use metafield::{build_metafields_set, Metafield, METAFIELDS_SET_LIMIT, METAFIELDS_SET_MUTATION};
pub use product::{
    build_product_create, ProductOption, ProductSpec, ProductStatus, ProductVariant, Seo,
    PRODUCT_CREATE_MUTATION,
};
pub use theme_asset::{build_theme_asset, is_text_asset, AssetRecord, ThemeAssetRequest};

/// A GraphQL mutation ready to be sent.
#[derive(Clone, Debug, PartialEq)]
pub struct Mutation {
    /// Root field of the mutation, e.g. `productCreate`.
    pub operation: &'static str,
    /// The GraphQL document.
    pub document: &'static str,
    /// The variables tree.
    pub variables: Value,
}

/// Returns `value` unchanged, or a [`ValidationError::MissingField`] when it
/// is blank.
pub(crate) fn require<'a>(
    operation: &'static str,
    field: &'static str,
    value: &'a str,
) -> Result<&'a str, ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField { operation, field })
    } else {
        Ok(value)
    }
}

/// Drops blank strings so they are omitted like absent ones.
pub(crate) fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.trim().is_empty())
}
