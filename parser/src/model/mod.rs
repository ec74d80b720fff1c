mod outcome;
mod site_kind;
mod version;

pub use outcome::FetchOutcome;
pub use site_kind::SiteKind;
pub use version::ChapterVersion;
