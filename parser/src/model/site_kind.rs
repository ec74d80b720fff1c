use std::fmt;

use serde::{Deserialize, Serialize};

/// Supported sources. The derived `Ord` doubles as the deterministic
/// precedence used when arbitration has to break a tie: the id-keyed feed
/// wins over the scraped site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteKind {
    Mangadex,
    Mangakakalot,
}

impl fmt::Display for SiteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteKind::Mangadex => write!(f, "mangadex"),
            SiteKind::Mangakakalot => write!(f, "mangakakalot"),
        }
    }
}
