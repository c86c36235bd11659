//! Paper records as served by the Hugging Face daily papers feed.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ValidationError;

/// A single paper from the daily feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperRecord {
    /// arXiv identifier (e.g. "2401.01234"), shared by Hugging Face.
    pub id: String,

    /// Paper title.
    pub title: String,

    /// Paper abstract.
    pub summary: String,

    /// Publication timestamp, in the offset it was published with.
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub published_at: DateTime<FixedOffset>,
}

impl PaperRecord {
    /// Calendar date of publication.
    #[must_use]
    pub fn published_date(&self) -> NaiveDate {
        self.published_at.date_naive()
    }
}

/// One element of the feed array: the paper plus feed-level metadata we ignore.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedEntry {
    /// The nested paper object.
    pub paper: PaperRecord,
}

/// Papers for one calendar date, in feed order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaperBatch {
    papers: Vec<PaperRecord>,
}

impl PaperBatch {
    /// Wrap already-validated records.
    #[must_use]
    pub fn new(papers: Vec<PaperRecord>) -> Self {
        Self { papers }
    }

    /// Validate a raw feed payload.
    ///
    /// All-or-nothing: the first element that does not parse rejects the
    /// whole payload.
    pub fn from_feed(raw: &Value) -> Result<Self, ValidationError> {
        let items = raw.as_array().ok_or(ValidationError::NotAnArray)?;
        if items.is_empty() {
            return Err(ValidationError::Empty);
        }

        let papers = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                FeedEntry::deserialize(item)
                    .map(|entry| entry.paper)
                    .map_err(|source| ValidationError::Record { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { papers })
    }

    /// Number of papers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.papers.len()
    }

    /// True when there are no papers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }

    /// Papers in feed order.
    #[must_use]
    pub fn papers(&self) -> &[PaperRecord] {
        &self.papers
    }

    /// Iterate papers in feed order.
    pub fn iter(&self) -> std::slice::Iter<'_, PaperRecord> {
        self.papers.iter()
    }

    /// Publication date of the first paper, used as the digest date.
    #[must_use]
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.papers.first().map(PaperRecord::published_date)
    }

    /// Unwrap into the record list.
    #[must_use]
    pub fn into_inner(self) -> Vec<PaperRecord> {
        self.papers
    }
}

impl<'a> IntoIterator for &'a PaperBatch {
    type Item = &'a PaperRecord;
    type IntoIter = std::slice::Iter<'a, PaperRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.papers.iter()
    }
}

/// Epoch values above this magnitude are read as milliseconds.
const EPOCH_MILLIS_THRESHOLD: i64 = 20_000_000_000;

/// Parse a feed timestamp.
///
/// Accepts RFC 3339 (offset kept), `YYYY-MM-DD[T| ]HH:MM[:SS[.f]]` with an
/// optional `Z` or `±HH[:]MM` offset (UTC when absent), a bare `YYYY-MM-DD`
/// (midnight UTC) and epoch seconds written as a number.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts);
    }

    let mut normalized = raw.to_string();
    if normalized.as_bytes().get(10) == Some(&b' ') {
        normalized.replace_range(10..11, "T");
    }
    if normalized.ends_with(['Z', 'z']) {
        normalized.pop();
        normalized.push_str("+00:00");
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%z"] {
        if let Ok(ts) = DateTime::parse_from_str(&normalized, format) {
            return Some(ts);
        }
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }

    if let Some(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Some(date.and_utc().fixed_offset());
    }

    if raw.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '-') {
        return raw.parse::<f64>().ok().and_then(timestamp_from_epoch_float);
    }

    None
}

/// Convert integer epoch seconds (or milliseconds, past the threshold).
#[must_use]
pub fn timestamp_from_epoch(value: i64) -> Option<DateTime<FixedOffset>> {
    let ts = if value.unsigned_abs() > EPOCH_MILLIS_THRESHOLD.unsigned_abs() {
        DateTime::from_timestamp_millis(value)
    } else {
        DateTime::from_timestamp(value, 0)
    };
    ts.map(|ts| ts.fixed_offset())
}

fn timestamp_from_epoch_float(value: f64) -> Option<DateTime<FixedOffset>> {
    if !value.is_finite() {
        return None;
    }

    let secs = if value.abs() > EPOCH_MILLIS_THRESHOLD as f64 { value / 1000.0 } else { value };
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos).map(|ts| ts.fixed_offset())
}

/// Raw `publishedAt` value before it is read as a timestamp.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Int(i64),
    Float(f64),
    Text(String),
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawTimestamp::deserialize(deserializer).map_err(|_| {
        <D::Error as serde::de::Error>::custom("publishedAt must be a string or a number")
    })?;

    let parsed = match &raw {
        RawTimestamp::Int(value) => timestamp_from_epoch(*value),
        RawTimestamp::Float(value) => timestamp_from_epoch_float(*value),
        RawTimestamp::Text(text) => parse_timestamp(text),
    };

    parsed.ok_or_else(|| {
        let shown = match raw {
            RawTimestamp::Int(value) => value.to_string(),
            RawTimestamp::Float(value) => value.to_string(),
            RawTimestamp::Text(text) => format!("{text:?}"),
        };
        serde::de::Error::custom(format!("invalid publishedAt timestamp {shown}"))
    })
}
