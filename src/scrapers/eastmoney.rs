//! Eastmoney finance channel scraper.
//!
//! Scrapes headline listings from three pages of the Eastmoney finance
//! channel (securities news, market commentary, and the channel front page).
//! Listing entries are `div` elements whose class attribute contains the
//! `news-item` marker; each entry yields a title plus whatever publish time,
//! description, and link the page provides.
//!
//! # Rate limiting
//!
//! A uniform random 3–5 second delay precedes every request, and a response
//! only counts as valid when it is a 200 with a body longer than 1000
//! characters. Short bodies are rate-limit interstitials, not listings.

use crate::models::{NewsItem, NO_SUMMARY, UNKNOWN_TIME};
use itertools::Itertools;
use rand::{rng, Rng};
use scraper::{ElementRef, Html, Selector};
use std::error::Error;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument};
use url::Url;

/// Listing pages fetched on every run, in order.
pub const FINANCE_URLS: [&str; 3] = [
    "https://finance.eastmoney.com/a/czqyw.html",
    "https://finance.eastmoney.com/a/cgspl.html",
    "https://finance.eastmoney.com/",
];

/// Bodies at or below this length, counted in characters, are treated as
/// invalid responses.
const MIN_VALID_BODY_CHARS: usize = 1000;

const MIN_DELAY_SECS: f64 = 3.0;
const MAX_DELAY_SECS: f64 = 5.0;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Build the HTTP client used for listing fetches: browser user-agent,
/// bounded per-request timeout.
pub fn http_client() -> Result<reqwest::Client, Box<dyn Error>> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(FETCH_TIMEOUT)
        .build()?;
    Ok(client)
}

/// Fetch and parse all listing pages, returning de-duplicated news items.
///
/// Pages are fetched strictly in declaration order with a randomized delay
/// before each request. Failed pages are logged and skipped without failing
/// the batch; an empty result is valid and means "no news today" downstream.
#[instrument(level = "info", skip_all)]
pub async fn fetch_news(client: &reqwest::Client) -> Vec<NewsItem> {
    let mut items = Vec::new();

    for page_url in FINANCE_URLS {
        let delay_secs: f64 = rng().random_range(MIN_DELAY_SECS..=MAX_DELAY_SECS);
        debug!(url = page_url, delay_secs, "Sleeping before request");
        sleep(Duration::from_secs_f64(delay_secs)).await;

        match fetch_page(client, page_url).await {
            Ok(page_items) => {
                info!(url = page_url, count = page_items.len(), "Parsed listing page");
                items.extend(page_items);
            }
            Err(e) => {
                error!(url = page_url, error = %e, "Fetch failed; skipping page");
            }
        }
    }

    let unique = dedupe_by_title(items);
    info!(count = unique.len(), "Collected unique news items");
    unique
}

/// Drop items whose exact title was already seen, keeping first occurrences
/// in input order.
pub fn dedupe_by_title(items: Vec<NewsItem>) -> Vec<NewsItem> {
    items
        .into_iter()
        .unique_by(|item| item.title.clone())
        .collect()
}

/// Fetch a single listing page and parse its entries.
#[instrument(level = "info", skip_all, fields(url = %page_url))]
async fn fetch_page(
    client: &reqwest::Client,
    page_url: &str,
) -> Result<Vec<NewsItem>, Box<dyn Error>> {
    let response = client.get(page_url).send().await?;
    let status = response.status();
    if status != reqwest::StatusCode::OK {
        return Err(format!("unexpected status {status}").into());
    }

    let body = response.text().await?;
    let char_count = body.chars().count();
    if char_count <= MIN_VALID_BODY_CHARS {
        return Err(format!("body too short to be a listing ({char_count} chars)").into());
    }

    let base_url = Url::parse(page_url)?;
    Ok(parse_news_items(&body, &base_url))
}

/// Parse listing HTML into news items.
///
/// Selects elements whose class attribute contains `news-item`. The title
/// comes from the first anchor or heading descendant; entries without one,
/// or with an empty title after trimming, are skipped. Publish time and
/// description come from `.time` / `.desc` descendants with the fixed
/// placeholders substituted when absent, and relative links are resolved
/// against `base_url`. Every returned item has all four fields populated.
pub fn parse_news_items(html: &str, base_url: &Url) -> Vec<NewsItem> {
    let document = Html::parse_document(html);
    let item_selector = Selector::parse(r#"[class*="news-item"]"#).unwrap();
    let title_selector = Selector::parse("a, h1, h2, h3, h4").unwrap();
    let time_selector = Selector::parse(".time").unwrap();
    let desc_selector = Selector::parse(".desc").unwrap();

    let mut items = Vec::new();
    for element in document.select(&item_selector) {
        let Some(title_element) = element.select(&title_selector).next() else {
            debug!("Listing entry without anchor/heading; skipping");
            continue;
        };

        let title = element_text(&title_element);
        if title.is_empty() {
            debug!("Listing entry with empty title; skipping");
            continue;
        }

        let link = title_element
            .value()
            .attr("href")
            .and_then(|href| base_url.join(href).ok())
            .map(|resolved| resolved.to_string())
            .unwrap_or_default();

        let published_at = element
            .select(&time_selector)
            .next()
            .map(|el| element_text(&el))
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| UNKNOWN_TIME.to_string());

        let summary = element
            .select(&desc_selector)
            .next()
            .map(|el| element_text(&el))
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| NO_SUMMARY.to_string());

        items.push(NewsItem {
            title,
            published_at,
            summary,
            link,
        });
    }

    items
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<Vec<_>>().join(" ").trim().to_string()
}
