use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::parse_error::{ParseError, Result};

/// Comparable chapter progress of a tracked title.
///
/// `Unset` means no chapter has ever been recorded for a source; it orders
/// below every concrete number. Concrete values compare numerically, so
/// "9" < "10" and "5.0" == "5".
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ChapterVersion {
    #[default]
    Unset,
    Number(f64),
}

impl ChapterVersion {
    /// The empty string is the on-disk sentinel for `Unset`; anything else
    /// must be a non-negative decimal number.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(ChapterVersion::Unset);
        }
        let number: f64 = raw
            .parse()
            .map_err(|_| ParseError::MalformedVersion(raw.to_owned()))?;
        if !number.is_finite() || number < 0.0 {
            return Err(ParseError::MalformedVersion(raw.to_owned()));
        }
        Ok(ChapterVersion::Number(number))
    }

    /// True iff `self` is a concrete version strictly ahead of `baseline`.
    ///
    /// An `Unset` candidate is never newer: it signals "could not determine",
    /// not "chapter 0".
    pub fn is_newer_than(&self, baseline: &ChapterVersion) -> bool {
        match (self, baseline) {
            (ChapterVersion::Unset, _) => false,
            (ChapterVersion::Number(_), ChapterVersion::Unset) => true,
            (ChapterVersion::Number(candidate), ChapterVersion::Number(baseline)) => {
                candidate > baseline
            }
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, ChapterVersion::Unset)
    }
}

impl PartialEq for ChapterVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ChapterVersion {}

impl PartialOrd for ChapterVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ChapterVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (ChapterVersion::Unset, ChapterVersion::Unset) => Ordering::Equal,
            (ChapterVersion::Unset, ChapterVersion::Number(_)) => Ordering::Less,
            (ChapterVersion::Number(_), ChapterVersion::Unset) => Ordering::Greater,
            // Parsing rejects NaN, so total_cmp agrees with numeric order.
            (ChapterVersion::Number(a), ChapterVersion::Number(b)) => a.total_cmp(b),
        }
    }
}

impl fmt::Display for ChapterVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChapterVersion::Unset => Ok(()),
            ChapterVersion::Number(number) => write!(f, "{}", number),
        }
    }
}

impl TryFrom<String> for ChapterVersion {
    type Error = ParseError;

    fn try_from(raw: String) -> Result<Self> {
        ChapterVersion::parse(&raw)
    }
}

impl From<ChapterVersion> for String {
    fn from(version: ChapterVersion) -> Self {
        version.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unset() {
        assert!(ChapterVersion::default().is_unset());
    }

    #[test]
    fn empty_string_is_unset() {
        assert!(ChapterVersion::parse("").unwrap().is_unset());
        assert!(ChapterVersion::parse("  ").unwrap().is_unset());
    }

    #[test]
    fn concrete_is_newer_than_unset() {
        let five = ChapterVersion::parse("5").unwrap();
        assert!(five.is_newer_than(&ChapterVersion::Unset));
        assert!(!ChapterVersion::Unset.is_newer_than(&five));
        assert!(!ChapterVersion::Unset.is_newer_than(&ChapterVersion::Unset));
    }

    #[test]
    fn ordering_is_numeric_not_lexical() {
        let nine = ChapterVersion::parse("9").unwrap();
        let ten = ChapterVersion::parse("10").unwrap();
        assert!(ten.is_newer_than(&nine));
        assert!(!nine.is_newer_than(&ten));
    }

    #[test]
    fn equality_is_numeric() {
        assert_eq!(
            ChapterVersion::parse("5.0").unwrap(),
            ChapterVersion::parse("5").unwrap()
        );
        assert!(!ChapterVersion::parse("5.0")
            .unwrap()
            .is_newer_than(&ChapterVersion::parse("5").unwrap()));
    }

    #[test]
    fn fractional_chapters() {
        let half = ChapterVersion::parse("123.5").unwrap();
        assert!(half.is_newer_than(&ChapterVersion::parse("123").unwrap()));
        assert!(ChapterVersion::parse("124").unwrap().is_newer_than(&half));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(ChapterVersion::parse("abc").is_err());
        assert!(ChapterVersion::parse("-3").is_err());
        assert!(ChapterVersion::parse("1.2.3").is_err());
    }

    #[test]
    fn unset_round_trips_through_display() {
        let unset = ChapterVersion::parse("").unwrap();
        assert_eq!(unset.to_string(), "");
        assert!(ChapterVersion::parse(&unset.to_string()).unwrap().is_unset());
    }

    #[test]
    fn display_keeps_shortest_form() {
        assert_eq!(ChapterVersion::parse("5").unwrap().to_string(), "5");
        assert_eq!(ChapterVersion::parse("123.5").unwrap().to_string(), "123.5");
    }
}
