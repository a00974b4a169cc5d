// src/storage/mod.rs
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::error::StorageError;

pub const MANIFEST_FILENAME: &str = "run_manifest.json";

/// Which generated artifact is being written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Summary,
    Table,
}

impl ArtifactKind {
    pub fn label(&self) -> &'static str {
        match self {
            ArtifactKind::Summary => "summary",
            ArtifactKind::Table => "table",
        }
    }
}

/// Writes the per-company artifacts read by the viewer. Every write replaces
/// the previous file unconditionally.
pub struct ArtifactStore {
    context_dir: PathBuf,
    output_dir: PathBuf,
}

impl ArtifactStore {
    /// Creates a store. Directories are created lazily on first write so an
    /// unwritable destination surfaces as a per-write failure.
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(context_dir: P, output_dir: Q) -> Self {
        Self {
            context_dir: context_dir.as_ref().to_path_buf(),
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    pub fn context_path(&self, company: &str) -> PathBuf {
        self.context_dir.join(format!("{}_latest_context.txt", company))
    }

    pub fn artifact_path(&self, kind: ArtifactKind, company: &str, year: u32) -> PathBuf {
        let filename = match kind {
            ArtifactKind::Summary => format!("{}_summary_latest_{}.txt", company, year),
            ArtifactKind::Table => format!("{}_{}_table.txt", company, year),
        };
        self.output_dir.join(filename)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.output_dir.join(MANIFEST_FILENAME)
    }

    /// Saves the full extracted text as the company's latest context.
    pub fn persist_context(&self, company: &str, text: &str) -> Result<PathBuf, StorageError> {
        let path = self.context_path(company);
        write_file(&path, text.as_bytes())?;
        tracing::info!("Full text context saved to: {}", path.display());
        Ok(path)
    }

    /// Saves a generated summary or table keyed by company and year.
    pub fn save_artifact(
        &self,
        kind: ArtifactKind,
        company: &str,
        year: u32,
        content: &str,
    ) -> Result<PathBuf, StorageError> {
        let path = self.artifact_path(kind, company, year);
        write_file(&path, content.as_bytes())?;
        tracing::info!("{} saved to: {}", kind.label(), path.display());
        Ok(path)
    }

    /// Saves the JSON run manifest next to the generated artifacts.
    pub fn save_manifest<T: Serialize>(&self, manifest: &T) -> Result<PathBuf, StorageError> {
        let path = self.manifest_path();
        let json = serde_json::to_string_pretty(manifest)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        write_file(&path, json.as_bytes())?;
        tracing::info!("Saved run manifest to {}", path.display());
        Ok(path)
    }
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), StorageError> {
    let io_err = |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
    }
    fs::write(path, contents).map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn context_is_overwritten_each_time() {
        let tmp = TempDir::new().unwrap();
        let store = ArtifactStore::new(tmp.path().join("contexts"), tmp.path().join("summaries"));

        store.persist_context("ACME", "first run").unwrap();
        let path = store.persist_context("ACME", "second").unwrap();

        assert_eq!(path, tmp.path().join("contexts").join("ACME_latest_context.txt"));
        assert_eq!(fs::read_to_string(path).unwrap(), "second");
    }

    #[test]
    fn artifacts_are_keyed_by_company_and_year() {
        let tmp = TempDir::new().unwrap();
        let store = ArtifactStore::new(tmp.path().join("c"), tmp.path().join("s"));

        let summary = store.save_artifact(ArtifactKind::Summary, "ACME", 2025, "# Summary").unwrap();
        let table = store.save_artifact(ArtifactKind::Table, "ACME", 2025, "| Metric | Value |").unwrap();

        assert!(summary.ends_with("ACME_summary_latest_2025.txt"));
        assert!(table.ends_with("ACME_2025_table.txt"));
        assert_eq!(fs::read_to_string(table).unwrap(), "| Metric | Value |");
    }

    #[test]
    fn unwritable_destination_is_reported() {
        let tmp = TempDir::new().unwrap();
        // A regular file where the directory should be.
        let blocker = tmp.path().join("contexts");
        fs::write(&blocker, b"").unwrap();
        let store = ArtifactStore::new(&blocker, tmp.path().join("s"));

        let err = store.persist_context("ACME", "text").unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
    }
}
