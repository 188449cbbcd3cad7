//! Command-line interface definitions for Finance Digest.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Credentials and addresses can be provided via command-line flags or the
//! environment variables the scheduler exports.

use clap::Parser;

/// Command-line arguments for the Finance Digest application.
///
/// Every run performs exactly one fetch → summarize → deliver cycle; these
/// options only adjust where output lands and which credentials are used.
///
/// # Examples
///
/// ```sh
/// # Basic usage, credentials from the environment
/// finance_digest
///
/// # Custom output directory
/// finance_digest -s ./summaries
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Output directory for summary text files
    #[arg(short, long, default_value = "./logs")]
    pub save_dir: String,

    /// Zhipu GLM API key for the summarization endpoint
    #[arg(long, env = "GLM_API_KEY", hide_env_values = true)]
    pub glm_api_key: Option<String>,

    /// SMTP authorization code for the sender mailbox
    #[arg(long, env = "QQ_EMAIL_AUTH_CODE", hide_env_values = true)]
    pub email_auth_code: Option<String>,

    /// Sender address (overrides the built-in default)
    #[arg(long, env = "EMAIL_FROM")]
    pub email_from: Option<String>,

    /// Recipient address (overrides the built-in default)
    #[arg(long, env = "EMAIL_TO")]
    pub email_to: Option<String>,
}
