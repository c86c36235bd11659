//! Date argument for feed requests.

use std::fmt;
use std::str::FromStr;

use crate::error::{FetchError, FetchResult};

/// A `YYYYMMDD` date as accepted by the fetcher.
///
/// Only the shape is checked (eight ASCII digits); the feed decides what a
/// date with no papers means.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeedDate(String);

impl FeedDate {
    /// Parse a `YYYYMMDD` string.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidInput`] unless the input is exactly eight digits.
    pub fn parse(raw: &str) -> FetchResult<Self> {
        if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FetchError::invalid_input(
                raw,
                "Invalid date format. Please use YYYYMMDD.",
            ));
        }
        Ok(Self(raw.to_string()))
    }

    /// Today's date on the process clock.
    #[must_use]
    pub fn today() -> Self {
        Self(chrono::Local::now().format("%Y%m%d").to_string())
    }

    /// The raw `YYYYMMDD` form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `YYYY-MM-DD` form sent as the `date` query parameter.
    #[must_use]
    pub fn to_query(&self) -> String {
        format!("{}-{}-{}", &self.0[..4], &self.0[4..6], &self.0[6..])
    }
}

impl FromStr for FeedDate {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FeedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let date = FeedDate::parse("20240102").unwrap();
        assert_eq!(date.as_str(), "20240102");
        assert_eq!(date.to_query(), "2024-01-02");
        assert_eq!(date.to_string(), "2024-01-02");
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        for raw in ["2024-1-2", "abcdefgh", "2024010", "202401021", "", "2024O102", "２０２４０１０２"] {
            let err = FeedDate::parse(raw).unwrap_err();
            assert!(matches!(err, FetchError::InvalidInput { .. }), "accepted {raw:?}");
        }
    }

    #[test]
    fn test_today_is_well_formed() {
        let today = FeedDate::today();
        assert!(FeedDate::parse(today.as_str()).is_ok());
    }

    #[test]
    fn test_from_str() {
        let date: FeedDate = "19991231".parse().unwrap();
        assert_eq!(date.to_query(), "1999-12-31");
    }
}
