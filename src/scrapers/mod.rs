//! News source scrapers.
//!
//! Each scraper module exposes a `fetch_news` entry point that never fails
//! the caller: per-page fetch or parse errors are logged and that page is
//! skipped, so a bad source degrades the run to fewer (possibly zero) items
//! instead of aborting it.
//!
//! Currently the only source is Eastmoney ([`eastmoney`]), scraped from three
//! listing pages of its finance channel.

pub mod eastmoney;
