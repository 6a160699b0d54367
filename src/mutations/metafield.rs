//! Metafields and the `metafieldsSet` mutation.

use serde::{Deserialize, Serialize};

use super::{require, Mutation};
use crate::error::ValidationError;

const OPERATION: &str = "metafieldsSet";

/// Most entries Shopify accepts in one `metafieldsSet` call.
pub const METAFIELDS_SET_LIMIT: usize = 25;

/// The `metafieldsSet` document.
pub const METAFIELDS_SET_MUTATION: &str = r"mutation metafieldsSet($metafields: [MetafieldsSetInput!]!) {
  metafieldsSet(metafields: $metafields) {
    metafields {
      id
      namespace
      key
      value
      type
    }
    userErrors {
      field
      message
    }
  }
}";

/// A custom field on a resource, identified by `(namespace, key)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Metafield {
    /// Grouping namespace, e.g. `custom`.
    pub namespace: String,
    /// Key within the namespace.
    pub key: String,
    /// Value encoded as a string, as `metafieldsSet` expects.
    pub value: String,
    /// Metafield type, e.g. `single_line_text_field`.
    #[serde(rename = "type")]
    pub metafield_type: String,
}

impl Metafield {
    /// Creates a metafield.
    #[must_use]
    pub fn new(
        namespace: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
        metafield_type: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            key: key.into(),
            value: value.into(),
            metafield_type: metafield_type.into(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MetafieldsSetInput<'a> {
    owner_id: &'a str,
    namespace: &'a str,
    key: &'a str,
    value: &'a str,
    #[serde(rename = "type")]
    metafield_type: &'a str,
}

/// Builds one batched `metafieldsSet` call, every entry owned by `owner_id`.
///
/// Every field is sent exactly as given; blank-ness is judged on the trimmed
/// text.
///
/// # Errors
///
/// Returns [`ValidationError::MissingField`] for a blank owner, an empty list
/// or a blank field, and [`ValidationError::TooMany`] above
/// [`METAFIELDS_SET_LIMIT`] entries.
pub fn build_metafields_set(
    owner_id: &str,
    fields: &[Metafield],
) -> Result<Mutation, ValidationError> {
    let owner_id = require(OPERATION, "ownerId", owner_id)?;
    let metafields = metafield_inputs(owner_id, fields)?;

    Ok(Mutation {
        operation: OPERATION,
        document: METAFIELDS_SET_MUTATION,
        variables: serde_json::json!({ "metafields": metafields }),
    })
}

/// Checks `fields` the way [`build_metafields_set`] would, without an owner.
pub(crate) fn check_metafields(fields: &[Metafield]) -> Result<(), ValidationError> {
    metafield_inputs("", fields).map(drop)
}

fn metafield_inputs<'a>(
    owner_id: &'a str,
    fields: &'a [Metafield],
) -> Result<Vec<MetafieldsSetInput<'a>>, ValidationError> {
    if fields.is_empty() {
        return Err(ValidationError::MissingField {
            operation: OPERATION,
            field: "metafields",
        });
    }
    if fields.len() > METAFIELDS_SET_LIMIT {
        return Err(ValidationError::TooMany {
            operation: OPERATION,
            max: METAFIELDS_SET_LIMIT,
            actual: fields.len(),
        });
    }

    fields
        .iter()
        .map(|field| {
            require(OPERATION, "value", &field.value)?;
            Ok(MetafieldsSetInput {
                owner_id,
                namespace: require(OPERATION, "namespace", &field.namespace)?,
                key: require(OPERATION, "key", &field.key)?,
                value: &field.value,
                metafield_type: require(OPERATION, "type", &field.metafield_type)?,
            })
        })
        .collect()
}
