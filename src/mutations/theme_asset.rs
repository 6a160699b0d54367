//! Theme asset upload body for the REST `themes/{id}/assets.json` endpoint.
//!
//! Text assets are sent as `value`; anything else, or text that is not valid
//! UTF-8, is base64-encoded into `attachment`.

use base64::prelude::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::require;
use crate::error::ValidationError;

const OPERATION: &str = "themeAssetUpdate";

/// Extensions whose content is sent as text.
const TEXT_EXTENSIONS: [&str; 7] = ["liquid", "css", "js", "json", "scss", "txt", "svg"];

/// A theme asset as returned by the REST endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssetRecord {
    /// Path within the theme, e.g. `assets/site.css`.
    pub key: String,
    /// CDN URL, when the asset is public.
    #[serde(default)]
    pub public_url: Option<String>,
    /// MIME type.
    #[serde(default)]
    pub content_type: Option<String>,
    /// Size in bytes.
    #[serde(default)]
    pub size: Option<u64>,
    /// MD5 checksum of the content.
    #[serde(default)]
    pub checksum: Option<String>,
    /// The theme holding the asset.
    #[serde(default)]
    pub theme_id: Option<u64>,
    /// When the asset was first uploaded.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// When the asset last changed.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A ready-to-send asset upload: the path relative to the API version and
/// the JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeAssetRequest {
    /// e.g. `themes/42/assets.json`.
    pub path: String,
    /// The `{"asset": {...}}` body.
    pub body: Value,
}

/// Returns `true` if an asset with this key is uploaded as text.
#[must_use]
pub fn is_text_asset(key: &str) -> bool {
    key.rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .is_some_and(|ext| TEXT_EXTENSIONS.contains(&ext.as_str()))
}

/// Builds the `PUT themes/{theme_id}/assets.json` request for `content`.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidValue`] when `theme_id` is zero and
/// [`ValidationError::MissingField`] when `key` is blank.
pub fn build_theme_asset(
    theme_id: u64,
    key: &str,
    content: &[u8],
) -> Result<ThemeAssetRequest, ValidationError> {
    if theme_id == 0 {
        return Err(ValidationError::InvalidValue {
            operation: OPERATION,
            field: "theme_id",
            reason: "must be a positive integer".to_string(),
        });
    }
    let key = require(OPERATION, "key", key)?;

    let text = if is_text_asset(key) {
        std::str::from_utf8(content).ok()
    } else {
        None
    };
    let asset = match text {
        Some(value) => json!({ "key": key, "value": value }),
        None => json!({ "key": key, "attachment": BASE64_STANDARD.encode(content) }),
    };

    Ok(ThemeAssetRequest {
        path: format!("themes/{theme_id}/assets.json"),
        body: json!({ "asset": asset }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_asset_is_sent_as_value() {
        let request = build_theme_asset(42, "assets/site.css", b"body { margin: 0; }").unwrap();

        assert_eq!(request.path, "themes/42/assets.json");
        assert_eq!(
            request.body,
            json!({"asset": {"key": "assets/site.css", "value": "body { margin: 0; }"}})
        );
    }

    #[test]
    fn test_binary_asset_is_base64_attachment() {
        let bytes = [0x89, b'P', b'N', b'G', 0x00, 0xff];
        let request = build_theme_asset(42, "assets/logo.png", &bytes).unwrap();

        assert_eq!(request.body["asset"]["attachment"], BASE64_STANDARD.encode(bytes));
        assert!(request.body["asset"].get("value").is_none());
    }

    #[test]
    fn test_non_utf8_text_extension_falls_back_to_attachment() {
        let request = build_theme_asset(1, "assets/icon.svg", &[0xff, 0xfe]).unwrap();
        assert!(request.body["asset"].get("attachment").is_some());
    }

    #[test]
    fn test_text_extension_detection() {
        assert!(is_text_asset("templates/index.liquid"));
        assert!(is_text_asset("config/settings_data.JSON"));
        assert!(!is_text_asset("assets/font.woff2"));
        assert!(!is_text_asset("README"));
    }

    #[test]
    fn test_invalid_inputs_are_rejected() {
        assert!(matches!(
            build_theme_asset(0, "assets/a.css", b""),
            Err(ValidationError::InvalidValue { field: "theme_id", .. })
        ));
        assert!(matches!(
            build_theme_asset(1, "  ", b""),
            Err(ValidationError::MissingField { field: "key", .. })
        ));
    }

    #[test]
    fn test_asset_record_deserializes_rest_shape() {
        let record: AssetRecord = serde_json::from_value(json!({
            "key": "assets/site.css",
            "public_url": "https://cdn.shopify.com/s/files/1/site.css",
            "content_type": "text/css",
            "size": 19,
            "checksum": "d41d8cd98f00b204e9800998ecf8427e",
            "theme_id": 42,
            "created_at": "2024-01-15T10:30:00-05:00",
            "updated_at": "2024-01-15T10:30:00-05:00"
        }))
        .unwrap();

        assert_eq!(record.theme_id, Some(42));
        assert_eq!(record.content_type.as_deref(), Some("text/css"));
        assert!(record.updated_at.is_some());
    }
}
