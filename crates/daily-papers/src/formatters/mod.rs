//! Output formatting for paper digests.

mod markdown;

pub use markdown::*;
