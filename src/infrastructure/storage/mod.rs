//! Filesystem catalog helpers for the media tree.
//!
//! Documents and photo galleries are plain files under the configured media
//! root; these helpers enumerate them and resolve request paths without ever
//! escaping the root.

use std::path::{Component, Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use tokio::fs;

#[derive(Debug)]
pub struct FileEntry {
    pub name: String,
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
}

/// First-level subdirectory names under `root`, sorted. A missing root is an
/// empty catalog, not an error.
pub async fn list_subdirs(root: &Path) -> anyhow::Result<Vec<String>> {
    let mut names = Vec::new();
    let mut rd = match fs::read_dir(root).await {
        Ok(rd) => rd,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(names),
        Err(e) => {
            return Err(e).with_context(|| format!("reading directory {}", root.display()));
        }
    };
    while let Some(entry) = rd
        .next_entry()
        .await
        .with_context(|| format!("reading directory {}", root.display()))?
    {
        let meta = entry.metadata().await?;
        if !meta.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        names.push(name);
    }
    names.sort();
    Ok(names)
}

/// Regular files directly under `dir`, sorted by name. Hidden files are
/// skipped. A missing directory is an empty catalog.
pub async fn list_files(dir: &Path) -> anyhow::Result<Vec<FileEntry>> {
    let mut entries = Vec::new();
    let mut rd = match fs::read_dir(dir).await {
        Ok(rd) => rd,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(entries),
        Err(e) => {
            return Err(e).with_context(|| format!("reading directory {}", dir.display()));
        }
    };
    while let Some(entry) = rd
        .next_entry()
        .await
        .with_context(|| format!("reading directory {}", dir.display()))?
    {
        let meta = entry.metadata().await?;
        if !meta.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        entries.push(FileEntry {
            name,
            size: meta.len(),
            modified: meta.modified().ok().map(DateTime::<Utc>::from),
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Safe join of a request-supplied relative path under `root`.
///
/// Every component must be a normal path segment, and the canonicalized
/// result must still live under the canonicalized root (symlinks included).
pub async fn resolve_under(root: &Path, relative: &str) -> anyhow::Result<PathBuf> {
    if relative.is_empty() {
        anyhow::bail!("empty path");
    }
    let rel = Path::new(relative);
    if !rel.components().all(|c| matches!(c, Component::Normal(_))) {
        anyhow::bail!("path escapes storage root");
    }
    let candidate = root.join(rel);
    let resolved = fs::canonicalize(&candidate)
        .await
        .with_context(|| format!("no such file: {}", candidate.display()))?;
    let root_resolved = fs::canonicalize(root)
        .await
        .with_context(|| format!("storage root missing: {}", root.display()))?;
    if !resolved.starts_with(&root_resolved) {
        anyhow::bail!("path escapes storage root");
    }
    Ok(resolved)
}

pub fn is_image(name: &str) -> bool {
    mime_guess::from_path(name)
        .first()
        .map(|m| m.type_() == mime_guess::mime::IMAGE)
        .unwrap_or(false)
}
