//! Markdown digest rendering.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::api;
use crate::models::{PaperBatch, PaperRecord};

// Unicode whitespace plus the ASCII separators U+001C..U+001F.
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\x1c-\x1f]+").expect("valid whitespace regex"));

fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Flatten text onto a single line.
///
/// Newlines become spaces, whitespace runs collapse to one space and the
/// result is trimmed. The file/group/record/unit separators count as
/// whitespace. Idempotent.
#[must_use]
pub fn clean_text(text: &str) -> String {
    let flattened = text.replace('\n', " ");
    WHITESPACE_RUN.replace_all(&flattened, " ").trim_matches(is_space).to_string()
}

/// Hugging Face paper page for an id.
#[must_use]
pub fn paper_page_url(id: &str) -> String {
    format!("{}/{id}", api::PAPER_PAGE_URL)
}

/// arXiv PDF link for an id.
#[must_use]
pub fn pdf_url(id: &str) -> String {
    format!("{}/{id}", api::PDF_URL)
}

/// Render a batch as a Markdown digest.
///
/// The header carries the publication date of the first paper. Returns
/// `None` for an empty batch.
#[must_use]
pub fn render_markdown(batch: &PaperBatch) -> Option<String> {
    let date = batch.first_date()?;

    let mut output = format!("# Daily Papers Summary for {}\n\n", date.format("%Y-%m-%d"));

    for paper in batch {
        output.push_str(&format_paper_section(paper));
    }

    Some(output)
}

/// Format a single paper section.
#[must_use]
pub fn format_paper_section(paper: &PaperRecord) -> String {
    format!(
        "## {}\n\n[Open in Hugging Face]({}) | [Open PDF]({})\n\n{}\n\n",
        clean_text(&paper.title),
        paper_page_url(&paper.id),
        pdf_url(&paper.id),
        clean_text(&paper.summary),
    )
}
