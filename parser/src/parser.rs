use async_trait::async_trait;

use crate::model::{FetchOutcome, SiteKind};
use crate::parse_error::Result;

/// One tracked source of a title.
///
/// Implementations are pure reads: they own the identity fields needed to
/// reach the remote site and turn its answer into a [`FetchOutcome`], but
/// never touch persisted state. Anything recoverable (network trouble, a
/// blocked response, an empty feed, a missing selector) comes back as an
/// `Err`, not a panic.
#[async_trait]
pub trait Parser {
    fn kind(&self) -> SiteKind;

    async fn fetch_latest(&self) -> Result<FetchOutcome>;
}
