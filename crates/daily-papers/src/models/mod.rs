//! Data models for the daily papers feed.
//!
//! Feed records use `#[serde(rename_all = "camelCase")]` to match API naming.
//! Unlike most API models, every field is required: a record that is missing
//! one is rejected rather than defaulted.

mod date;
mod paper;

pub use date::FeedDate;
pub use paper::{FeedEntry, PaperBatch, PaperRecord, parse_timestamp, timestamp_from_epoch};
