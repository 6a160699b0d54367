//! Product creation input and the `productCreate` mutation.

use serde::{Deserialize, Serialize};

use super::media::MediaItem;
use super::metafield::Metafield;
use super::{non_blank, require, Mutation};
use crate::error::ValidationError;

/// The `productCreate` document.
pub const PRODUCT_CREATE_MUTATION: &str = r"mutation productCreate($input: ProductInput!) {
  productCreate(input: $input) {
    product {
      id
      title
      handle
      description
      descriptionHtml
      productType
      vendor
      status
      tags
      options {
        id
        name
        values
      }
      variants(first: 100) {
        edges {
          node {
            id
            title
            sku
            price
            inventoryQuantity
          }
        }
      }
      media(first: 100) {
        edges {
          node {
            id
            mediaContentType
            alt
          }
        }
      }
      seo {
        title
        description
      }
      metafields(first: 100) {
        edges {
          node {
            id
            namespace
            key
            value
            type
          }
        }
      }
    }
    userErrors {
      field
      message
    }
  }
}";

/// Whether a product is visible to customers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    /// Visible on every sales channel it is published to.
    #[default]
    Active,
    /// Hidden until activated.
    Draft,
}

/// Search engine listing overrides.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Seo {
    /// Page title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Meta description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A product option such as Size or Color.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ProductOption {
    /// Option name.
    pub name: String,
    /// Allowed values, in display order.
    #[serde(default)]
    pub values: Vec<String>,
}

/// A variant to create alongside the product.
///
/// Every field is optional; only the ones that are set are sent.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    /// Price as a decimal string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,

    /// Stock keeping unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    /// Barcode (ISBN, UPC, GTIN).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,

    /// Original price, shown struck through.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_at_price: Option<String>,

    /// `DENY` or `CONTINUE` when out of stock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory_policy: Option<String>,

    /// Fulfillment service that tracks inventory, e.g. `SHOPIFY`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory_management: Option<String>,

    /// Whether the variant ships physically.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_shipping: Option<bool>,

    /// Whether tax is charged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxable: Option<bool>,

    /// Weight in `weight_unit`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    /// `GRAMS`, `KILOGRAMS`, `OUNCES` or `POUNDS`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_unit: Option<String>,

    /// Option values, one per product option.
    /// Option names such as `Size`, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,

    /// 1-based display position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
}

/// Everything needed to create a product and its follow-up records.
///
/// `media` and `metafields` are not part of `productCreate`; they are sent in
/// separate calls once the product exists.
///
/// Deserializes from the same camelCase names the API uses. Collections may be
/// given as `collections` or `collectionsToJoin`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductSpec {
    /// Product title. Required.
    pub title: String,

    /// Description as HTML.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_html: Option<String>,

    /// Merchant-defined category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,

    /// Brand or supplier name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,

    /// URL-friendly handle. Shopify derives one from the title when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,

    /// Search and filter tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Publication status; `DRAFT` unless given.
    #[serde(default)]
    pub status: ProductStatus,

    /// Search engine title and description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo: Option<Seo>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ProductOption>,

    /// Variants to create with the product.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<ProductVariant>,

    /// Media to attach after creation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<MediaItem>,

    /// Whether the product is a gift card.
    #[serde(default)]
    pub gift_card: bool,

    /// Whether it can only be sold through a selling plan.
    #[serde(default)]
    pub requires_selling_plan: bool,

    /// Collection ids to join.
    #[serde(
        default,
        rename = "collectionsToJoin",
        alias = "collections",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub collections: Vec<String>,

    /// Metafields to set after creation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metafields: Vec<Metafield>,
}

impl ProductSpec {
    /// Creates a spec with only a title; every other field takes its default.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// The `ProductInput` variables object. Borrowed from a [`ProductSpec`].
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductInput<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description_html: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    product_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vendor: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    handle: Option<&'a str>,
    #[serde(skip_serializing_if = "is_empty_slice")]
    tags: &'a [String],
    status: ProductStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    seo: Option<SeoInput<'a>>,
    #[serde(skip_serializing_if = "is_empty_slice")]
    options: &'a [ProductOption],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    variants: Vec<VariantInput<'a>>,
    gift_card: bool,
    requires_selling_plan: bool,
    #[serde(skip_serializing_if = "is_empty_slice")]
    collections_to_join: &'a [String],
}

#[derive(Serialize)]
struct SeoInput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

impl<'a> SeoInput<'a> {
    /// `None` when neither field has content.
    fn from_seo(seo: &'a Seo) -> Option<Self> {
        let input = Self {
            title: non_blank(seo.title.as_ref()),
            description: non_blank(seo.description.as_ref()),
        };
        (input.title.is_some() || input.description.is_some()).then_some(input)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VariantInput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    price: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sku: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    barcode: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    compare_at_price: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inventory_policy: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inventory_management: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    requires_shipping: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    taxable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    weight_unit: Option<&'a str>,
    // Positional, one per product option, so blanks are kept.
    #[serde(skip_serializing_if = "is_empty_slice")]
    options: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<i64>,
}

impl<'a> From<&'a ProductVariant> for VariantInput<'a> {
    fn from(variant: &'a ProductVariant) -> Self {
        Self {
            price: non_blank(variant.price.as_ref()),
            sku: non_blank(variant.sku.as_ref()),
            barcode: non_blank(variant.barcode.as_ref()),
            compare_at_price: non_blank(variant.compare_at_price.as_ref()),
            inventory_policy: non_blank(variant.inventory_policy.as_ref()),
            inventory_management: non_blank(variant.inventory_management.as_ref()),
            requires_shipping: variant.requires_shipping,
            taxable: variant.taxable,
            weight: variant.weight,
            weight_unit: non_blank(variant.weight_unit.as_ref()),
            options: &variant.options,
            position: variant.position,
        }
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_empty_slice<T>(items: &&[T]) -> bool {
    items.is_empty()
}

/// Builds the `productCreate` mutation for `spec`.
///
/// `title`, `status`, `giftCard` and `requiresSellingPlan` are always sent,
/// the title exactly as given. Blank optional strings, including those inside
/// `seo` and `variants`, and empty lists are treated as absent. `media` and
/// `metafields` are ignored here.
///
/// # Errors
///
/// Returns [`ValidationError::MissingField`] when the title is blank.
pub fn build_product_create(spec: &ProductSpec) -> Result<Mutation, ValidationError> {
    let title = require("productCreate", "title", &spec.title)?;

    let input = ProductInput {
        title,
        description_html: non_blank(spec.description_html.as_ref()),
        product_type: non_blank(spec.product_type.as_ref()),
        vendor: non_blank(spec.vendor.as_ref()),
        handle: non_blank(spec.handle.as_ref()),
        tags: &spec.tags,
        status: spec.status,
        seo: spec.seo.as_ref().and_then(SeoInput::from_seo),
        options: &spec.options,
        variants: spec.variants.iter().map(VariantInput::from).collect(),
        gift_card: spec.gift_card,
        requires_selling_plan: spec.requires_selling_plan,
        collections_to_join: &spec.collections,
    };

    let variables = serde_json::json!({ "input": input });

    Ok(Mutation {
        operation: "productCreate",
        document: PRODUCT_CREATE_MUTATION,
        variables,
    })
}
