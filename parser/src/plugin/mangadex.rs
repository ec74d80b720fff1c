use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;

use crate::model::{ChapterVersion, FetchOutcome, SiteKind};
use crate::parse_error::{ParseError, Result};
use crate::parser::Parser;
use crate::util;

pub const API_URL: &str = "https://api.mangadex.org";
pub const SITE_URL: &str = "https://mangadex.org";

#[derive(Deserialize)]
struct Feed {
    data: Vec<FeedChapter>,
}

#[derive(Deserialize)]
struct FeedChapter {
    id: String,
    attributes: FeedChapterAttributes,
}

#[derive(Deserialize)]
struct FeedChapterAttributes {
    // Oneshots and extras come back with a null chapter number.
    chapter: Option<String>,
}

/// Id-keyed feed source. The manga id and language filter select a feed the
/// remote service keeps sorted newest-first, so only the first entry is read.
pub struct MangaDex {
    manga_id: String,
    lang: String,
}

impl MangaDex {
    pub fn new(manga_id: impl Into<String>, lang: impl Into<String>) -> Self {
        MangaDex {
            manga_id: manga_id.into(),
            lang: lang.into(),
        }
    }

    fn feed_url(&self) -> Result<Url> {
        let raw = format!(
            "{}/manga/{}/feed?translatedLanguage[]={}&order[chapter]=desc&limit=1",
            API_URL, self.manga_id, self.lang
        );
        Url::parse(&raw).map_err(|_| ParseError::InvalidUrl(raw))
    }

    /// Feed body to candidate outcome; does not re-sort, only refuses an
    /// empty result set.
    fn latest_from_feed(&self, body: &str) -> Result<FetchOutcome> {
        let feed: Feed = serde_json::from_str(body)?;
        let entry = feed.data.first().ok_or(ParseError::EmptyFeed)?;
        let version = ChapterVersion::parse(entry.attributes.chapter.as_deref().unwrap_or(""))?;

        Ok(FetchOutcome {
            kind: SiteKind::Mangadex,
            chapter_ref: entry.id.clone(),
            version,
            url: format!("{}/chapter/{}", SITE_URL, entry.id),
        })
    }
}

#[async_trait]
impl Parser for MangaDex {
    fn kind(&self) -> SiteKind {
        SiteKind::Mangadex
    }

    async fn fetch_latest(&self) -> Result<FetchOutcome> {
        let url = self.feed_url()?;
        debug!("[mangadex] GET {}", url);

        let response = util::request(&url, None).await?;
        let body = response.text().await?;

        self.latest_from_feed(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> MangaDex {
        MangaDex::new("a96676e5-8ae2-425e-b549-7f15dd34a6d8", "en")
    }

    #[test]
    fn feed_entry_becomes_outcome() {
        let body = r#"{
            "result": "ok",
            "data": [
                {"id": "abc-123", "attributes": {"chapter": "107", "title": "whatever"}}
            ]
        }"#;

        let outcome = adapter().latest_from_feed(body).unwrap();
        assert_eq!(outcome.kind, SiteKind::Mangadex);
        assert_eq!(outcome.chapter_ref, "abc-123");
        assert_eq!(outcome.version, ChapterVersion::parse("107").unwrap());
        assert_eq!(outcome.url, "https://mangadex.org/chapter/abc-123");
    }

    #[test]
    fn empty_feed_is_an_error() {
        let body = r#"{"result": "ok", "data": []}"#;
        assert!(matches!(
            adapter().latest_from_feed(body),
            Err(ParseError::EmptyFeed)
        ));
    }

    #[test]
    fn null_chapter_number_is_unset_not_zero() {
        let body = r#"{"data": [{"id": "oneshot-1", "attributes": {"chapter": null}}]}"#;
        let outcome = adapter().latest_from_feed(body).unwrap();
        assert!(outcome.version.is_unset());
        assert_eq!(outcome.chapter_ref, "oneshot-1");
    }

    #[test]
    fn garbage_body_is_a_feed_error() {
        assert!(matches!(
            adapter().latest_from_feed("<html>Cloudflare</html>"),
            Err(ParseError::MalformedFeed(_))
        ));
    }

    #[test]
    fn feed_url_contains_id_and_language() {
        let url = adapter().feed_url().unwrap();
        assert_eq!(url.host_str(), Some("api.mangadex.org"));
        assert!(url.path().contains("a96676e5-8ae2-425e-b549-7f15dd34a6d8"));
        assert!(url.query().unwrap().contains("translatedLanguage[]=en"));
    }
}
