//! Operator notifications over the Telegram Bot API.
//!
//! Every send is best effort: failures are logged and swallowed so a broken
//! notifier never hides the error being reported.

use anyhow::{Context, Result, bail};
use reqwest::multipart::{Form, Part};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, warn};

use crate::config::TelegramSection;

const API_BASE: &str = "https://api.telegram.org";
const SEND_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub enum Notifier {
    Telegram {
        client: reqwest::Client,
        token: String,
        chat_id: String,
    },
    Disabled,
}

impl Notifier {
    pub fn from_config(section: &TelegramSection) -> Self {
        match (&section.bot_token, &section.chat_id) {
            (Some(token), Some(chat_id)) if !token.is_empty() && !chat_id.is_empty() => {
                match reqwest::Client::builder().timeout(SEND_TIMEOUT).build() {
                    Ok(client) => Notifier::Telegram {
                        client,
                        token: token.clone(),
                        chat_id: chat_id.clone(),
                    },
                    Err(e) => {
                        warn!(error = %e, "telegram client unavailable; notifications disabled");
                        Notifier::Disabled
                    }
                }
            }
            _ => Notifier::Disabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Notifier::Telegram { .. })
    }

    pub async fn send_message(&self, text: &str) {
        match self {
            Notifier::Telegram {
                client,
                token,
                chat_id,
            } => {
                let form = [("chat_id", chat_id.as_str()), ("text", text)];
                let req = client.post(method_url(token, "sendMessage")).form(&form);
                if let Err(e) = deliver(req).await {
                    warn!(error = %e, "telegram sendMessage failed");
                }
            }
            Notifier::Disabled => debug!(text, "notification (disabled)"),
        }
    }

    /// Report a fatal error; also logged locally.
    pub async fn send_error(&self, text: &str) {
        error!("{text}");
        self.send_message(&format!("❌ {text}")).await;
    }

    pub async fn send_photo(&self, path: &Path, caption: &str) {
        match self {
            Notifier::Telegram {
                client,
                token,
                chat_id,
            } => {
                let form = match photo_form(chat_id, path, caption).await {
                    Ok(form) => form,
                    Err(e) => {
                        warn!(error = %e, "cannot attach photo");
                        return;
                    }
                };
                let req = client.post(method_url(token, "sendPhoto")).multipart(form);
                if let Err(e) = deliver(req).await {
                    warn!(error = %e, "telegram sendPhoto failed");
                }
            }
            Notifier::Disabled => debug!(path = %path.display(), "photo notification (disabled)"),
        }
    }
}

fn method_url(token: &str, method: &str) -> String {
    format!("{API_BASE}/bot{token}/{method}")
}

async fn photo_form(chat_id: &str, path: &Path, caption: &str) -> Result<Form> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("read {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("schedule.png")
        .to_string();
    let part = Part::bytes(bytes).file_name(file_name).mime_str("image/png")?;
    Ok(Form::new()
        .text("chat_id", chat_id.to_string())
        .text("caption", caption.to_string())
        .part("photo", part))
}

async fn deliver(req: reqwest::RequestBuilder) -> Result<()> {
    let resp = req.send().await.context("send request")?;
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        bail!("HTTP {status}: {body}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_without_credentials() {
        assert!(!Notifier::from_config(&TelegramSection::default()).is_enabled());

        let half = TelegramSection {
            bot_token: Some("123:abc".to_string()),
            chat_id: None,
        };
        assert!(!Notifier::from_config(&half).is_enabled());

        let blank = TelegramSection {
            bot_token: Some(String::new()),
            chat_id: Some("1".to_string()),
        };
        assert!(!Notifier::from_config(&blank).is_enabled());
    }

    #[test]
    fn test_enabled_with_credentials() {
        let full = TelegramSection {
            bot_token: Some("123:abc".to_string()),
            chat_id: Some("-100".to_string()),
        };
        assert!(Notifier::from_config(&full).is_enabled());
        assert_eq!(
            method_url("123:abc", "sendPhoto"),
            "https://api.telegram.org/bot123:abc/sendPhoto"
        );
    }

    #[tokio::test]
    async fn test_disabled_sends_are_noops() {
        let n = Notifier::Disabled;
        n.send_message("hello").await;
        n.send_error("boom").await;
        n.send_photo(Path::new("/nonexistent.png"), "caption").await;
    }

    #[tokio::test]
    async fn test_photo_form_requires_file() {
        assert!(photo_form("1", Path::new("/nonexistent.png"), "c").await.is_err());
    }
}
