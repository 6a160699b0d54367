//! Product media and the `productCreateMedia` mutation.

use serde::{Deserialize, Serialize};

use super::{non_blank, require, Mutation};
use crate::error::ValidationError;

const OPERATION: &str = "productCreateMedia";

/// The `productCreateMedia` document.
pub const PRODUCT_CREATE_MEDIA_MUTATION: &str = r"mutation productCreateMedia($productId: ID!, $media: [CreateMediaInput!]!) {
  productCreateMedia(productId: $productId, media: $media) {
    media {
      id
      mediaContentType
      alt
      status
    }
    mediaUserErrors {
      field
      message
    }
  }
}";

/// The kind of media being attached.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaContentType {
    /// An image URL.
    Image,
    /// A video file URL.
    Video,
    /// A YouTube or Vimeo link.
    ExternalVideo,
    /// A 3D model URL.
    #[serde(rename = "MODEL_3D")]
    Model3d,
}

/// A piece of media to attach to a product, by URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaItem {
    /// What the URL points at.
    #[serde(rename = "type")]
    pub media_type: MediaContentType,
    /// Publicly reachable source URL.
    pub src: String,
    /// Alternative text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateMediaInput<'a> {
    original_source: &'a str,
    media_content_type: MediaContentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    alt: Option<&'a str>,
}

/// Builds one batched `productCreateMedia` call for every item, in order.
///
/// # Errors
///
/// Returns [`ValidationError::MissingField`] when the product id is blank,
/// the list is empty, or any item has a blank `src`.
pub fn build_product_create_media(
    product_id: &str,
    items: &[MediaItem],
) -> Result<Mutation, ValidationError> {
    let product_id = require(OPERATION, "productId", product_id)?;
    let media = media_inputs(items)?;

    Ok(Mutation {
        operation: OPERATION,
        document: PRODUCT_CREATE_MEDIA_MUTATION,
        variables: serde_json::json!({
            "productId": product_id,
            "media": media,
        }),
    })
}

/// Checks `items` the way [`build_product_create_media`] would, without a
/// product id.
pub(crate) fn check_media(items: &[MediaItem]) -> Result<(), ValidationError> {
    media_inputs(items).map(drop)
}

fn media_inputs(items: &[MediaItem]) -> Result<Vec<CreateMediaInput<'_>>, ValidationError> {
    if items.is_empty() {
        return Err(ValidationError::MissingField {
            operation: OPERATION,
            field: "media",
        });
    }
    items
        .iter()
        .map(|item| {
            Ok(CreateMediaInput {
                original_source: require(OPERATION, "src", &item.src)?,
                media_content_type: item.media_type,
                alt: non_blank(item.alt.as_ref()),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn image(src: &str, alt: Option<&str>) -> MediaItem {
        MediaItem {
            media_type: MediaContentType::Image,
            src: src.to_string(),
            alt: alt.map(ToString::to_string),
        }
    }

    #[test]
    fn test_media_entries_use_api_names() {
        let items = vec![
            image("https://cdn.example.com/front.png", Some("Front")),
            MediaItem {
                media_type: MediaContentType::ExternalVideo,
                src: "https://youtu.be/abc".to_string(),
                alt: None,
            },
        ];
        let mutation = build_product_create_media("gid://shopify/Product/1", &items).unwrap();

        assert_eq!(mutation.operation, "productCreateMedia");
        assert_eq!(
            mutation.variables,
            json!({
                "productId": "gid://shopify/Product/1",
                "media": [
                    {"originalSource": "https://cdn.example.com/front.png", "mediaContentType": "IMAGE", "alt": "Front"},
                    {"originalSource": "https://youtu.be/abc", "mediaContentType": "EXTERNAL_VIDEO"}
                ]
            })
        );
    }

    #[test]
    fn test_model_3d_serializes_with_digit_suffix() {
        assert_eq!(
            serde_json::to_value(MediaContentType::Model3d).unwrap(),
            json!("MODEL_3D")
        );
        let parsed: MediaContentType = serde_json::from_value(json!("MODEL_3D")).unwrap();
        assert_eq!(parsed, MediaContentType::Model3d);
    }

    #[test]
    fn test_missing_inputs_are_rejected() {
        let items = vec![image("https://cdn.example.com/a.png", None)];
        assert!(matches!(
            build_product_create_media("", &items),
            Err(ValidationError::MissingField { field: "productId", .. })
        ));
        assert!(matches!(
            build_product_create_media("gid://shopify/Product/1", &[]),
            Err(ValidationError::MissingField { field: "media", .. })
        ));
        assert!(matches!(
            build_product_create_media("gid://shopify/Product/1", &[image(" ", None)]),
            Err(ValidationError::MissingField { field: "src", .. })
        ));
        assert!(check_media(&[image(" ", None)]).is_err());
        assert!(check_media(&items).is_ok());
    }
}
