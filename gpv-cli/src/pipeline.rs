use anyhow::{Context, Result};
use chrono::DateTime;
use chrono_tz::Tz;
use gpv_core::{ScheduleDocument, UpdateOutcome, diff_documents};
use gpv_ingest::{compile_document, find_date_blocks, html_to_text};
use gpv_render::FontSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::Config;
use crate::{fetch, state};

/// Plain text of the announcements page, fetched or read from `input`.
pub async fn load_page_text(cfg: &Config, input: Option<&Path>, html: bool) -> Result<String> {
    match input {
        Some(path) => {
            let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
            let is_html = html
                || path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("html") || e.eq_ignore_ascii_case("htm"));
            if is_html { html_to_text(&raw) } else { Ok(raw) }
        }
        None => {
            let page = fetch::fetch_page(&cfg.source).await?;
            html_to_text(&page)
        }
    }
}

/// Segment and compile `text`, then persist the document if its data changed.
pub fn update_from_text(cfg: &Config, text: &str, now: DateTime<Tz>) -> Result<UpdateOutcome> {
    let blocks = find_date_blocks(text, now.date_naive())?;
    let candidate = compile_document(&blocks, &cfg.source.region_id, now)?;

    let doc_path = &cfg.paths.document_file;
    let previous = state::read_document(doc_path)?;
    let outcome = diff_documents(previous.as_ref(), candidate);

    match &outcome {
        UpdateOutcome::Updated(doc) => {
            state::write_document(doc_path, doc)?;
            info!(dates = doc.fact.data.len(), update = %doc.fact.update, "schedule updated");
        }
        UpdateOutcome::Unchanged => info!("schedule data unchanged; document not rewritten"),
    }
    Ok(outcome)
}

pub async fn run_update(cfg: &Config, input: Option<&Path>, html: bool) -> Result<UpdateOutcome> {
    let tz = cfg.source.tz()?;
    let text = load_page_text(cfg, input, html).await?;
    update_from_text(cfg, &text, chrono::Utc::now().with_timezone(&tz))
}

/// Render `document` (or the newest document in `paths.out_dir`) to `output`.
pub fn run_render(cfg: &Config, document: Option<&Path>, output: Option<&Path>) -> Result<PathBuf> {
    let doc_path = match document {
        Some(p) => p.to_path_buf(),
        None => state::latest_document_path(&cfg.paths.out_dir)?,
    };
    info!(path = %doc_path.display(), "rendering document");

    let doc = state::read_document(&doc_path)?.ok_or_else(|| {
        gpv_core::ScheduleError::InputMissing(format!("{} not found", doc_path.display()))
    })?;

    let out = output.map(Path::to_path_buf).unwrap_or_else(|| cfg.paths.image_file.clone());
    render_document(cfg, &doc, &out)?;
    Ok(out)
}

fn render_document(cfg: &Config, doc: &ScheduleDocument, out: &Path) -> Result<()> {
    let fonts = FontSet::load(
        cfg.render.font_path.as_deref(),
        cfg.render.bold_font_path.as_deref(),
    );
    gpv_render::render_to_file(doc, &fonts, out)
        .with_context(|| format!("render {}", out.display()))?;
    Ok(())
}
