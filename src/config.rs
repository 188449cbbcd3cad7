//! Runtime configuration assembled once at startup.
//!
//! All fixed endpoints and addresses live here together with the credentials
//! taken from the CLI/environment. The struct is built in `main` and passed
//! by reference into each component, so nothing reads the environment after
//! startup and tests can substitute arbitrary configs.

use crate::cli::Cli;

/// Zhipu GLM chat-completion endpoint.
pub const GLM_API_URL: &str = "https://open.bigmodel.cn/api/paas/v4/chat/completions";

/// Model requested for summarization.
pub const GLM_MODEL: &str = "glm-4-flash";

const SMTP_SERVER: &str = "smtp.qq.com";
const SMTP_PORT: u16 = 465;
const DEFAULT_EMAIL_FROM: &str = "439472808@qq.com";
const DEFAULT_EMAIL_TO: &str = "439472808@qq.com";

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Summarization API key; `None` means summarization degrades to the
    /// fixed missing-credential message.
    pub glm_api_key: Option<String>,
    /// Chat-completion endpoint URL.
    pub glm_api_url: String,
    /// Model name sent in the request payload.
    pub glm_model: String,
    /// SMTP relay host.
    pub smtp_server: String,
    /// SMTPS port (TLS-wrapped connection).
    pub smtp_port: u16,
    /// Sender mailbox, also used as the SMTP login name.
    pub email_from: String,
    /// Recipient mailbox.
    pub email_to: String,
    /// SMTP authorization code; `None` means mail delivery is skipped.
    pub email_auth_code: Option<String>,
    /// Directory summary files are written into.
    pub save_dir: String,
}

impl Config {
    /// Build the configuration from parsed CLI arguments, filling in the
    /// fixed defaults for anything not overridden.
    pub fn from_cli(cli: Cli) -> Self {
        Self {
            glm_api_key: cli.glm_api_key,
            glm_api_url: GLM_API_URL.to_string(),
            glm_model: GLM_MODEL.to_string(),
            smtp_server: SMTP_SERVER.to_string(),
            smtp_port: SMTP_PORT,
            email_from: cli.email_from.unwrap_or_else(|| DEFAULT_EMAIL_FROM.to_string()),
            email_to: cli.email_to.unwrap_or_else(|| DEFAULT_EMAIL_TO.to_string()),
            email_auth_code: cli.email_auth_code,
            save_dir: cli.save_dir,
        }
    }
}
