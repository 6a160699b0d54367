//! Product creation workflow states and results.
//!
//! Creating a product with media and metafields takes up to three dependent
//! calls. Each completed step records the action that would undo it. Those
//! actions are never executed: when a later step fails they are returned as
//! pending in the [`WorkflowError`] so the caller can decide what to do with
//! the partially created product.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::error::{AdminError, UserErrorDetail};

/// Where a product creation workflow is.
///
/// ```text
/// Building -> Submitted -> Created -> MediaAttaching -> MetafieldsSetting -> Done
///     \____________\___________\____________\_________________\-----> Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WorkflowState {
    /// Validating input and building `productCreate`.
    Building,
    /// `productCreate` sent, response not yet validated.
    Submitted,
    /// The product exists and its id is known.
    Created,
    /// `productCreateMedia` in flight.
    MediaAttaching,
    /// `metafieldsSet` in flight.
    MetafieldsSetting,
    /// Every requested step succeeded.
    Done,
    /// A step failed; see [`WorkflowError::failed_in`] for where.
    Failed,
}

impl WorkflowState {
    /// Returns `true` for `Done` and `Failed`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Building => "Building",
            Self::Submitted => "Submitted",
            Self::Created => "Created",
            Self::MediaAttaching => "MediaAttaching",
            Self::MetafieldsSetting => "MetafieldsSetting",
            Self::Done => "Done",
            Self::Failed => "Failed",
        };
        f.write_str(name)
    }
}

/// An action that would undo a completed step. Never executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action")]
pub enum Compensation {
    /// Undo `productCreate`.
    #[serde(rename_all = "camelCase")]
    DeleteProduct { product_id: String },
    /// Undo `productCreateMedia`.
    #[serde(rename_all = "camelCase")]
    DeleteMedia {
        product_id: String,
        media_ids: Vec<String>,
    },
}

impl fmt::Display for Compensation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeleteProduct { product_id } => write!(f, "DeleteProduct({product_id})"),
            Self::DeleteMedia {
                product_id,
                media_ids,
            } => write!(f, "DeleteMedia({product_id}, [{}])", media_ids.join(", ")),
        }
    }
}

/// A product creation workflow that ended in `Failed`.
#[derive(Debug, Error)]
#[error("product creation failed during {failed_in}: {source}")]
pub struct WorkflowError {
    /// The state the workflow was in when the step failed.
    pub failed_in: WorkflowState,
    /// Id of the product, if `productCreate` had succeeded.
    pub product_id: Option<String>,
    /// Undo actions for completed steps, most recent first.
    pub pending_compensations: Vec<Compensation>,
    /// The error that stopped the workflow.
    #[source]
    pub source: AdminError,
}

/// A product created by a workflow that reached `Done`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedProduct {
    /// The product GID.
    pub id: String,
    /// The `product` node returned by `productCreate`.
    pub product: Value,
}

/// Summary of a workflow outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationResult {
    /// Whether the operation completed.
    pub success: bool,
    /// Id of the created entity, also set when a later step failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// User-facing errors, empty on success.
    pub errors: Vec<UserErrorDetail>,
}

impl From<&Result<CreatedProduct, WorkflowError>> for OperationResult {
    fn from(result: &Result<CreatedProduct, WorkflowError>) -> Self {
        match result {
            Ok(created) => Self {
                success: true,
                id: Some(created.id.clone()),
                errors: Vec::new(),
            },
            Err(error) => Self {
                success: false,
                id: error.product_id.clone(),
                errors: error.source.details(),
            },
        }
    }
}

/// Tracks one workflow run: its state, the product id and the undo log.
#[derive(Debug)]
pub(crate) struct Saga {
    state: WorkflowState,
    product_id: Option<String>,
    completed: Vec<Compensation>,
}

impl Saga {
    pub(crate) const fn new() -> Self {
        Self {
            state: WorkflowState::Building,
            product_id: None,
            completed: Vec::new(),
        }
    }

    #[cfg(test)]
    pub(crate) const fn state(&self) -> WorkflowState {
        self.state
    }

    pub(crate) fn advance(&mut self, next: WorkflowState) {
        tracing::debug!(from = %self.state, to = %next, "product workflow transition");
        self.state = next;
    }

    /// Records the product id and moves to `Created`.
    pub(crate) fn created(&mut self, product_id: &str) {
        self.product_id = Some(product_id.to_string());
        self.completed.push(Compensation::DeleteProduct {
            product_id: product_id.to_string(),
        });
        self.advance(WorkflowState::Created);
    }

    pub(crate) fn record(&mut self, compensation: Compensation) {
        self.completed.push(compensation);
    }

    /// Moves to `Failed` and returns the error describing where it stopped.
    pub(crate) fn fail(&mut self, source: impl Into<AdminError>) -> WorkflowError {
        let failed_in = self.state;
        let source = source.into();
        self.advance(WorkflowState::Failed);

        let pending_compensations: Vec<Compensation> =
            self.completed.iter().rev().cloned().collect();
        if !pending_compensations.is_empty() {
            tracing::warn!(
                state = %failed_in,
                product_id = ?self.product_id,
                pending = pending_compensations.len(),
                error = %source,
                "product workflow failed after partial success; nothing was rolled back"
            );
        }

        WorkflowError {
            failed_in,
            product_id: self.product_id.clone(),
            pending_compensations,
            source,
        }
    }
}
