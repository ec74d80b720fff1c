use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;
use scraper::{Html, Selector};

use crate::model::{ChapterVersion, FetchOutcome, SiteKind};
use crate::parse_error::{ParseError, Result};
use crate::parser::Parser;
use crate::util;

/// `chapter-123` or `chapter-123-5`; only dash-joined digit groups are
/// captured, so a trailing dash or non-numeric suffix stays out of the number.
static CHAPTER_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"chapter-(\d+(?:-\d+)*)").unwrap());

/// Scraped source. The title page is fetched with browser-like headers and
/// the latest-chapter link is pulled out with a per-title CSS selector.
pub struct MangaKakalot {
    manga_url: String,
    selector: String,
}

impl MangaKakalot {
    pub fn new(manga_url: impl Into<String>, selector: impl Into<String>) -> Self {
        MangaKakalot {
            manga_url: manga_url.into(),
            selector: selector.into(),
        }
    }

    fn extract_latest(&self, page_url: &Url, html: &str) -> Result<FetchOutcome> {
        let document = Html::parse_document(html);
        let selector = Selector::parse(&self.selector)
            .map_err(|_| ParseError::InvalidSelector(self.selector.clone()))?;

        let link = document
            .select(&selector)
            .next()
            .ok_or_else(|| ParseError::MissingChapterHref(self.selector.clone()))?;
        let href = link
            .value()
            .attr("href")
            .ok_or_else(|| ParseError::MissingChapterHref(self.selector.clone()))?;

        let chapter_url = util::abs_url(page_url, href)?;
        let version = chapter_version_from_url(chapter_url.path())?;

        Ok(FetchOutcome {
            kind: SiteKind::Mangakakalot,
            // The canonical chapter URL doubles as the chapter identifier.
            chapter_ref: chapter_url.to_string(),
            version,
            url: chapter_url.to_string(),
        })
    }
}

#[async_trait]
impl Parser for MangaKakalot {
    fn kind(&self) -> SiteKind {
        SiteKind::Mangakakalot
    }

    async fn fetch_latest(&self) -> Result<FetchOutcome> {
        let page_url =
            Url::parse(&self.manga_url).map_err(|_| ParseError::InvalidUrl(self.manga_url.clone()))?;
        debug!("[mangakakalot] GET {}", page_url);

        let response = util::request(&page_url, None).await?;
        // Redirects can move the page; resolve hrefs against where we landed.
        let final_url = response.url().clone();
        let html = response.text().await?;

        self.extract_latest(&final_url, &html)
    }
}

/// Derives a chapter number from a chapter link path. One numeric group is an
/// integer chapter, a single dash-separated suffix is a fractional chapter
/// (`chapter-123-5` reads as 123.5). Anything else, volume-prefixed schemes
/// included, is malformed rather than silently truncated.
fn chapter_version_from_url(path: &str) -> Result<ChapterVersion> {
    let captures = CHAPTER_NUMBER
        .captures(path)
        .ok_or_else(|| ParseError::MalformedVersion(path.to_owned()))?;
    let raw = &captures[1];

    let parts: Vec<&str> = raw.split('-').collect();
    match parts.as_slice() {
        [major] => ChapterVersion::parse(major),
        [major, minor] => ChapterVersion::parse(&format!("{}.{}", major, minor)),
        _ => Err(ParseError::MalformedVersion(raw.to_owned())),
    }
}
