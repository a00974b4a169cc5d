// src/discovery/folders.rs
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::DocumentSource;
use crate::corpus::{normalize_company, Document, SourceLocation};
use crate::utils::error::DiscoveryError;

/// Naming convention used by the download folders, e.g. `pdf_downloads_apple`.
pub const DOWNLOAD_FOLDER_PREFIX: &str = "pdf_downloads_";

/// Derives the company id for an input folder: the folder name with the
/// download prefix removed, upper-cased.
pub fn company_from_folder(folder: &Path) -> String {
    let name = folder
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stripped = name.strip_prefix(DOWNLOAD_FOLDER_PREFIX).unwrap_or(&name);
    normalize_company(stripped)
}

/// Scans download folders recursively for PDF files. The company of every
/// document is fixed here, from the input folder it was found under.
pub struct FolderSource {
    folders: Vec<PathBuf>,
}

impl FolderSource {
    pub fn new(folders: Vec<PathBuf>) -> Self {
        Self { folders }
    }

    fn scan_folder(&self, folder: &Path) -> Result<Vec<Document>, DiscoveryError> {
        if !folder.exists() {
            std::fs::create_dir_all(folder).map_err(|source| DiscoveryError::Io {
                path: folder.to_path_buf(),
                source,
            })?;
            tracing::info!("Created missing input folder {}", folder.display());
            return Ok(Vec::new());
        }

        let company = company_from_folder(folder);
        let mut docs = Vec::new();

        for entry in WalkDir::new(folder).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry under {}: {}", folder.display(), e);
                    continue;
                }
            };
            if !entry.file_type().is_file() || !is_pdf(entry.path()) {
                continue;
            }
            let filename = entry.file_name().to_string_lossy().into_owned();
            docs.push(Document::new(
                SourceLocation::Path(entry.into_path()),
                company.clone(),
                filename,
            ));
        }

        tracing::debug!("Found {} PDF files for {} in {}", docs.len(), company, folder.display());
        Ok(docs)
    }
}

impl DocumentSource for FolderSource {
    fn list(&self) -> Result<Vec<Document>, DiscoveryError> {
        let mut all = Vec::new();
        let mut failures = 0;

        for folder in &self.folders {
            match self.scan_folder(folder) {
                Ok(docs) => all.extend(docs),
                Err(e) => {
                    tracing::error!("Could not scan {}: {}", folder.display(), e);
                    failures += 1;
                }
            }
        }

        if failures > 0 && failures == self.folders.len() {
            return Err(DiscoveryError::NothingEnumerated(failures));
        }
        Ok(all)
    }
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}
