//! Tool names, descriptions and JSON input schemas.

use serde::Serialize;
use serde_json::{json, Value};

/// Creates a product, then attaches media and sets metafields.
pub const CREATE_PRODUCT: &str = "create_shopify_product";
/// Attaches media to an existing product.
pub const ATTACH_MEDIA: &str = "attach_product_media";
/// Sets metafields on an existing product.
pub const SET_METAFIELDS: &str = "set_product_metafields";
/// Uploads a local file to the store's Files.
pub const UPLOAD_FILE: &str = "upload_shopify_file";
/// Uploads a local file into a theme.
pub const UPLOAD_THEME_ASSET: &str = "upload_theme_asset";

/// A tool as advertised by `tools/list`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    /// Name used in `tools/call`.
    pub name: &'static str,
    /// One-line summary for the client.
    pub description: &'static str,
    /// JSON Schema of the arguments.
    pub input_schema: Value,
}

fn media_item_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "type": {"type": "string", "enum": ["IMAGE", "VIDEO", "EXTERNAL_VIDEO", "MODEL_3D"]},
            "src": {"type": "string", "description": "Public URL of the media"},
            "alt": {"type": "string"}
        },
        "required": ["type", "src"]
    })
}

fn metafield_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "namespace": {"type": "string"},
            "key": {"type": "string"},
            "value": {"type": "string"},
            "type": {"type": "string", "description": "e.g. single_line_text_field"}
        },
        "required": ["namespace", "key", "value", "type"]
    })
}

fn string_list() -> Value {
    json!({"type": "array", "items": {"type": "string"}})
}

/// Returns every tool, in a stable order.
#[must_use]
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: CREATE_PRODUCT,
            description: "Create a product in the Shopify store, optionally attaching media and setting metafields.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "title": {"type": "string"},
                    "descriptionHtml": {"type": "string"},
                    "productType": {"type": "string"},
                    "vendor": {"type": "string"},
                    "handle": {"type": "string"},
                    "tags": string_list(),
                    "status": {"type": "string", "enum": ["ACTIVE", "DRAFT"], "default": "ACTIVE"},
                    "seo": {
                        "type": "object",
                        "properties": {
                            "title": {"type": "string"},
                            "description": {"type": "string"}
                        }
                    },
                    "options": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {"name": {"type": "string"}, "values": string_list()},
                            "required": ["name", "values"]
                        }
                    },
                    "variants": {"type": "array", "items": {"type": "object"}},
                    "media": {"type": "array", "items": media_item_schema()},
                    "giftCard": {"type": "boolean", "default": false},
                    "requiresSellingPlan": {"type": "boolean", "default": false},
                    "collectionsToJoin": string_list(),
                    "metafields": {"type": "array", "items": metafield_schema()}
                },
                "required": ["title"]
            }),
        },
        ToolDefinition {
            name: ATTACH_MEDIA,
            description: "Attach media (images, videos, 3D models) to an existing product.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "productId": {"type": "string", "description": "Product GID"},
                    "media": {"type": "array", "items": media_item_schema()}
                },
                "required": ["productId", "media"]
            }),
        },
        ToolDefinition {
            name: SET_METAFIELDS,
            description: "Set up to 25 metafields on an existing product.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "productId": {"type": "string", "description": "Product GID"},
                    "metafields": {"type": "array", "items": metafield_schema(), "maxItems": 25}
                },
                "required": ["productId", "metafields"]
            }),
        },
        ToolDefinition {
            name: UPLOAD_FILE,
            description: "Upload a local file to the store's Files section.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "path": {"type": "string", "description": "Local file path"},
                    "alt": {"type": "string"}
                },
                "required": ["path"]
            }),
        },
        ToolDefinition {
            name: UPLOAD_THEME_ASSET,
            description: "Upload a local file as an asset of a theme, replacing any asset with the same key.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "themeId": {"type": "integer", "minimum": 1},
                    "key": {"type": "string", "description": "e.g. assets/site.css"},
                    "path": {"type": "string", "description": "Local file path"}
                },
                "required": ["themeId", "key", "path"]
            }),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_names_are_unique_and_ordered() {
        let names: Vec<&str> = tool_definitions().iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec![CREATE_PRODUCT, ATTACH_MEDIA, SET_METAFIELDS, UPLOAD_FILE, UPLOAD_THEME_ASSET]
        );
    }

    #[test]
    fn test_definitions_serialize_input_schema_key() {
        let value = serde_json::to_value(&tool_definitions()[0]).unwrap();
        assert_eq!(value["name"], "create_shopify_product");
        assert_eq!(value["inputSchema"]["required"], json!(["title"]));
    }
}
