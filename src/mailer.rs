//! Email delivery over SMTPS.
//!
//! Sends the digest as a plain-text UTF-8 message through a TLS-wrapped
//! SMTP connection (port 465), authenticating with the sender address and
//! the mailbox authorization code. When no authorization code is configured
//! the step is skipped entirely; no connection is attempted.

use crate::config::Config;
use lettre::message::header;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use std::error::Error;
use tracing::{info, instrument, warn};

/// Send `body` to the configured recipient with the given subject line.
///
/// Missing credentials make this a no-op `Ok`. Any transport failure is
/// returned for the orchestrator to log; it never aborts the run.
#[instrument(level = "info", skip_all, fields(subject = %subject))]
pub fn send_email(config: &Config, subject: &str, body: &str) -> Result<(), Box<dyn Error>> {
    let Some(auth_code) = config.email_auth_code.as_deref().filter(|code| !code.is_empty())
    else {
        warn!("SMTP authorization code not configured; skipping email delivery");
        return Ok(());
    };

    let email = Message::builder()
        .from(config.email_from.parse()?)
        .to(config.email_to.parse()?)
        .subject(subject)
        .header(header::ContentType::TEXT_PLAIN)
        .body(body.to_string())?;

    let creds = Credentials::new(config.email_from.clone(), auth_code.to_string());
    let mailer = SmtpTransport::relay(&config.smtp_server)?
        .port(config.smtp_port)
        .credentials(creds)
        .build();

    mailer.send(&email)?;
    info!(to = %config.email_to, "Email sent");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GLM_API_URL, GLM_MODEL};

    // Built literally rather than from Cli: the env-backed clap args would
    // pick up a real QQ_EMAIL_AUTH_CODE from the host and open an SMTP
    // session from inside the test.
    fn config_without_auth_code() -> Config {
        Config {
            glm_api_key: None,
            glm_api_url: GLM_API_URL.to_string(),
            glm_model: GLM_MODEL.to_string(),
            smtp_server: "smtp.qq.com".to_string(),
            smtp_port: 465,
            email_from: "439472808@qq.com".to_string(),
            email_to: "439472808@qq.com".to_string(),
            email_auth_code: None,
            save_dir: "./logs".to_string(),
        }
    }

    #[test]
    fn test_missing_auth_code_skips_delivery() {
        let config = config_without_auth_code();
        // No credential configured: returns Ok without opening a connection.
        let result = send_email(&config, "主题", "正文");
        assert!(result.is_ok());
    }

    #[test]
    fn test_empty_auth_code_skips_delivery() {
        let mut config = config_without_auth_code();
        config.email_auth_code = Some(String::new());
        assert!(send_email(&config, "主题", "正文").is_ok());
    }

    #[test]
    fn test_message_builds_with_utf8_subject() {
        let config = config_without_auth_code();
        let email = Message::builder()
            .from(config.email_from.parse().unwrap())
            .to(config.email_to.parse().unwrap())
            .subject("2026-08-30 10:00 东方财富财经资讯要点整理")
            .header(header::ContentType::TEXT_PLAIN)
            .body("今日要点".to_string());
        assert!(email.is_ok());
    }
}
