//! # Finance Digest
//!
//! A one-shot finance news digest pipeline: scrape headlines from the
//! Eastmoney finance channel, summarize them with the Zhipu GLM
//! chat-completion API, then deliver the summary three ways — stdout, a
//! timestamped text file, and an email to a fixed recipient.
//!
//! ## Usage
//!
//! ```sh
//! GLM_API_KEY=... QQ_EMAIL_AUTH_CODE=... finance_digest -s ./logs
//! ```
//!
//! ## Architecture
//!
//! The run is strictly sequential:
//! 1. **Fetching**: GET each listing page (with a randomized inter-request
//!    delay), parse `news-item` elements, de-duplicate by title
//! 2. **Summarization**: render the prompt and POST it to the GLM endpoint
//! 3. **Delivery**: print to stdout, write the summary file, send the email
//!
//! Every step is best-effort: failures are logged and the run continues with
//! fallback values. External scheduling (cron, CI timer) drives periodicity;
//! the process always performs exactly one cycle and exits.

use clap::Parser;
use std::error::Error;
use tracing::{error, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod api;
mod cli;
mod config;
mod mailer;
mod models;
mod outputs;
mod prompt;
mod scrapers;
mod utils;

use api::GlmClient;
use cli::Cli;
use config::Config;
use utils::beijing_now;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();

    let args = Cli::parse();
    let config = Config::from_cli(args);
    let run_time = beijing_now();
    info!(
        run_time = %run_time.format("%Y-%m-%d %H:%M:%S"),
        save_dir = %config.save_dir,
        "finance_digest starting up"
    );

    // ---- Fetch news ----
    let client = scrapers::eastmoney::http_client()?;
    let news = scrapers::eastmoney::fetch_news(&client).await;
    info!(count = news.len(), "Fetched news items");

    // ---- Summarize ----
    let glm = GlmClient::new(&config)?;
    let summary = glm.summarize(&news).await;

    let subject = format!(
        "{} 东方财富财经资讯要点整理",
        run_time.format("%Y-%m-%d %H:00")
    );

    println!("{}", "=".repeat(50));
    println!("{summary}");
    println!("{}", "=".repeat(50));

    // ---- Save to file ----
    match outputs::write_summary(&config.save_dir, &summary).await {
        Ok(path) => info!(path = %path.display(), "Summary saved"),
        Err(e) => error!(error = %e, "Failed to save summary; continuing"),
    }

    // ---- Send email ----
    if let Err(e) = mailer::send_email(&config, &subject, &summary) {
        error!(error = %e, "Failed to send email; continuing");
    }

    let elapsed = start_time.elapsed();
    info!(
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
