//! Feed payload → Markdown digest.
//!
//! These functions never fail hard. A payload that is empty, not an array or
//! contains an invalid record yields `None` with a log entry explaining why.

use serde_json::Value;

use crate::formatters::render_markdown;
use crate::models::PaperBatch;

/// Validate a raw feed payload into a batch.
///
/// Returns `None` for a non-array or empty payload, and for any payload with
/// at least one invalid record. There is no partial batch.
#[must_use]
pub fn validate_and_normalize(raw: &Value) -> Option<PaperBatch> {
    match PaperBatch::from_feed(raw) {
        Ok(batch) => Some(batch),
        Err(e) if e.is_no_data() => {
            tracing::debug!(reason = %e, "Nothing to validate");
            None
        }
        Err(e) => {
            tracing::error!(error = %e, "Error validating paper metadata");
            None
        }
    }
}

/// Turn a raw feed payload into a Markdown digest.
#[must_use]
pub fn generate_digest(raw: &Value) -> Option<String> {
    let has_items = raw.as_array().is_some_and(|items| !items.is_empty());
    if !has_items {
        tracing::warn!("No valid JSON data provided for markdown generation");
        return None;
    }

    let Some(markdown) = validate_and_normalize(raw).and_then(|batch| render_markdown(&batch))
    else {
        tracing::warn!("No markdown content was generated");
        return None;
    };

    tracing::info!(bytes = markdown.len(), "Markdown digest generated");
    Some(markdown)
}
