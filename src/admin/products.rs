//! Product creation with follow-up media and metafield calls.

use serde_json::Value;
use tracing::instrument;

use super::workflow::{Compensation, CreatedProduct, Saga, WorkflowError, WorkflowState};
use super::AdminClient;
use crate::error::{AdminError, UserErrorDetail};
use crate::mutations::{
    build_metafields_set, build_product_create, build_product_create_media, check_media,
    check_metafields, MediaItem, Metafield, ProductSpec,
};
use crate::validation::GraphqlExpectation;

const PRODUCT_CREATE: GraphqlExpectation = GraphqlExpectation::new("productCreate", "product");
const PRODUCT_CREATE_MEDIA: GraphqlExpectation =
    GraphqlExpectation::new("productCreateMedia", "media").with_user_errors_key("mediaUserErrors");
const METAFIELDS_SET: GraphqlExpectation = GraphqlExpectation::new("metafieldsSet", "metafields");

impl AdminClient {
    /// Creates a product, then attaches its media and sets its metafields.
    ///
    /// Media and metafields are checked before anything is sent, then each
    /// sent as one batched call, and only when `spec` has any. On success
    /// the `product` node from `productCreate` is returned; the follow-up
    /// results are not merged into it.
    ///
    /// # Errors
    ///
    /// Returns a [`WorkflowError`] naming the state that failed. If the
    /// product had already been created its id is kept, together with the
    /// compensations that would undo the completed steps. None of them are
    /// executed.
    #[instrument(skip(self, spec), fields(title = %spec.title))]
    pub async fn create_product(&self, spec: &ProductSpec) -> Result<CreatedProduct, WorkflowError> {
        let mut saga = Saga::new();

        let mutation = build_product_create(spec).map_err(|e| saga.fail(e))?;
        if !spec.media.is_empty() {
            check_media(&spec.media).map_err(|e| saga.fail(e))?;
        }
        if !spec.metafields.is_empty() {
            check_metafields(&spec.metafields).map_err(|e| saga.fail(e))?;
        }
        saga.advance(WorkflowState::Submitted);

        let product = self
            .execute(mutation, PRODUCT_CREATE)
            .await
            .map_err(|e| saga.fail(e))?;
        let product_id = product_id_of(&product).map_err(|e| saga.fail(e))?;
        saga.created(&product_id);

        if !spec.media.is_empty() {
            saga.advance(WorkflowState::MediaAttaching);
            let media = self
                .attach_media(&product_id, &spec.media)
                .await
                .map_err(|e| saga.fail(e))?;
            saga.record(Compensation::DeleteMedia {
                product_id: product_id.clone(),
                media_ids: ids_of(&media),
            });
        }

        if !spec.metafields.is_empty() {
            saga.advance(WorkflowState::MetafieldsSetting);
            self.set_metafields(&product_id, &spec.metafields)
                .await
                .map_err(|e| saga.fail(e))?;
        }

        saga.advance(WorkflowState::Done);
        tracing::info!(product_id = %product_id, "product created");

        Ok(CreatedProduct {
            id: product_id,
            product,
        })
    }

    /// Attaches media to an existing product in one `productCreateMedia` call.
    ///
    /// Returns the `media` list from the response.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Validation`] before sending when the input is
    /// incomplete, otherwise whatever the validator reports.
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub async fn attach_media(
        &self,
        product_id: &str,
        items: &[MediaItem],
    ) -> Result<Value, AdminError> {
        let mutation = build_product_create_media(product_id, items)?;
        self.execute(mutation, PRODUCT_CREATE_MEDIA).await
    }

    /// Sets metafields on `owner_id` in one `metafieldsSet` call.
    ///
    /// Returns the `metafields` list from the response.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Validation`] before sending when the input is
    /// incomplete or too long, otherwise whatever the validator reports.
    #[instrument(skip(self, metafields), fields(count = metafields.len()))]
    pub async fn set_metafields(
        &self,
        owner_id: &str,
        metafields: &[Metafield],
    ) -> Result<Value, AdminError> {
        let mutation = build_metafields_set(owner_id, metafields)?;
        self.execute(mutation, METAFIELDS_SET).await
    }
}

fn product_id_of(product: &Value) -> Result<String, AdminError> {
    product
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(ToString::to_string)
        .ok_or_else(|| AdminError::User {
            operation: "productCreate".to_string(),
            errors: vec![UserErrorDetail::general("productCreate returned no product id")],
        })
}

fn ids_of(media: &Value) -> Vec<String> {
    media
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("id").and_then(Value::as_str))
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_id_of() {
        assert_eq!(
            product_id_of(&json!({"id": "gid://shopify/Product/1"})).unwrap(),
            "gid://shopify/Product/1"
        );
        assert!(product_id_of(&json!({"title": "x"})).is_err());
        assert!(product_id_of(&json!({"id": ""})).is_err());
    }

    #[test]
    fn test_ids_of_media_list() {
        let media = json!([{"id": "gid://shopify/MediaImage/1"}, {"alt": "no id"}, {"id": "gid://shopify/Video/2"}]);
        assert_eq!(
            ids_of(&media),
            vec!["gid://shopify/MediaImage/1", "gid://shopify/Video/2"]
        );
        assert!(ids_of(&json!(null)).is_empty());
    }
}
