use gpv_core::ScheduleError;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::SourceSection;

/// Download the announcements page as HTML.
///
/// Transport errors, non-success statuses, timeouts and empty bodies all
/// surface as `InputMissing`.
pub async fn fetch_page(source: &SourceSection) -> Result<String, ScheduleError> {
    let missing = |what: String| ScheduleError::InputMissing(format!("{}: {what}", source.url));

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(source.fetch_timeout_secs))
        .user_agent(source.user_agent.as_str())
        .build()
        .map_err(|e| missing(e.to_string()))?;

    info!(url = %source.url, "fetching schedule page");
    let resp = client
        .get(&source.url)
        .send()
        .await
        .map_err(|e| missing(e.to_string()))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(missing(format!("HTTP {status}")));
    }

    let body = resp.text().await.map_err(|e| missing(e.to_string()))?;
    if body.trim().is_empty() {
        return Err(missing("empty body".to_string()));
    }
    debug!(bytes = body.len(), "page received");
    Ok(body)
}
