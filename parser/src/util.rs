use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode, Url};

use crate::parse_error::{ParseError, Result};

pub async fn request(url: &Url, builder: Option<RequestBuilder>) -> Result<Response> {
    let builder = if let Some(builder) = builder {
        builder
    } else {
        reqwest::Client::new().get(url.clone())
    };

    let response = builder
        .header(
            reqwest::header::USER_AGENT,
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:107.0) Gecko/20100101 Firefox/107.0",
        )
        .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
        .header("Referer", url.to_string())
        .timeout(Duration::from_secs(10))
        .send()
        .await?;

    // A blocked fetch is an error, never evidence that nothing changed.
    if response.status() == StatusCode::FORBIDDEN {
        return Err(ParseError::CloudflareIUAM);
    }
    if !response.status().is_success() {
        return Err(ParseError::NetworkError(response.status()));
    }

    Ok(response)
}

pub fn abs_url(base: &Url, href: &str) -> Result<Url> {
    Url::parse(href)
        .or_else(|_| base.join(href))
        .map_err(|_| ParseError::FailedToMakeAbsolute(href.to_owned()))
}
