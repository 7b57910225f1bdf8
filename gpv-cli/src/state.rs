use anyhow::{Context, Result};
use gpv_core::{ScheduleDocument, ScheduleError};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info};

pub fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))
}

/// Previously persisted document, if any.
pub fn read_document(path: &Path) -> Result<Option<ScheduleDocument>> {
    if !path.exists() {
        debug!(path = %path.display(), "no previous document");
        return Ok(None);
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let doc = ScheduleDocument::from_json_str(&s)
        .with_context(|| format!("parse {}", path.display()))?;
    Ok(Some(doc))
}

/// Plain overwrite with pretty UTF-8 JSON.
pub fn write_document(path: &Path, doc: &ScheduleDocument) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let json = doc.to_json_pretty()?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), "document written");
    Ok(())
}

/// Most recently modified `*.json` directly inside `dir`.
pub fn latest_document_path(dir: &Path) -> Result<PathBuf> {
    let missing = || ScheduleError::InputMissing(format!("no JSON documents in {}", dir.display()));

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return Err(missing().into()),
    };

    let mut best: Option<(SystemTime, PathBuf)> = None;
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let modified = entry
            .metadata()
            .and_then(|m| m.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        if best.as_ref().is_none_or(|(t, _)| modified > *t) {
            best = Some((modified, path));
        }
    }

    best.map(|(_, p)| p).ok_or_else(|| missing().into())
}
