// src/discovery/harvest.rs
use once_cell::sync::Lazy;
use reqwest::Url;
use scraper::{Html, Selector};
use std::path::{Path, PathBuf};

use super::fetch::download;
use crate::config::HarvestTarget;
use crate::utils::error::FetchError;

static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("Failed to compile ANCHOR_SELECTOR"));

/// Counts for one harvested page.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HarvestStats {
    pub links: usize,
    pub downloaded: usize,
    pub already_present: usize,
    pub failed: usize,
}

/// Collects absolute URLs of every anchor pointing at a PDF, in page order,
/// without duplicates.
pub fn pdf_links(html: &str, base: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    let mut links: Vec<Url> = Vec::new();

    for anchor in document.select(&ANCHOR_SELECTOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !href.to_lowercase().contains(".pdf") {
            continue;
        }
        match base.join(href.trim()) {
            Ok(url) if !links.contains(&url) => links.push(url),
            Ok(_) => {}
            Err(e) => tracing::debug!("Ignoring unresolvable link '{}': {}", href, e),
        }
    }
    links
}

/// File name a link is saved under: last path segment, query dropped.
pub fn target_filename(url: &Url) -> Option<String> {
    url.path_segments()?
        .next_back()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Downloads every PDF linked from the target's page into its folder.
/// Files already on disk are left alone.
pub async fn harvest_target(
    client: &reqwest::Client,
    target: &HarvestTarget,
) -> Result<HarvestStats, FetchError> {
    tracing::info!("Scraping {} for {}", target.url, target.company);
    let base = Url::parse(&target.url).map_err(|e| FetchError::InvalidUrl(format!("{} ({})", target.url, e)))?;

    let page = download(client, &target.url).await?;
    let html = String::from_utf8_lossy(&page);
    let links = pdf_links(&html, &base);

    let mut stats = HarvestStats {
        links: links.len(),
        ..HarvestStats::default()
    };
    if links.is_empty() {
        tracing::warn!("No PDF links found on {}", target.url);
        return Ok(stats);
    }
    tracing::info!("Found {} PDF links.", links.len());

    tokio::fs::create_dir_all(&target.folder).await?;

    for link in links {
        let Some(name) = target_filename(&link) else {
            tracing::warn!("Cannot derive a file name from {}", link);
            stats.failed += 1;
            continue;
        };
        let dest = target.folder.join(&name);
        if dest.exists() {
            tracing::debug!("Already downloaded: {}", dest.display());
            stats.already_present += 1;
            continue;
        }
        match save_link(client, link.as_str(), &dest).await {
            Ok(path) => {
                tracing::info!("Downloaded: {}", path.display());
                stats.downloaded += 1;
            }
            Err(e) => {
                tracing::error!("Failed to download {}: {}", link, e);
                stats.failed += 1;
            }
        }
    }

    Ok(stats)
}

async fn save_link(client: &reqwest::Client, url: &str, dest: &Path) -> Result<PathBuf, FetchError> {
    let bytes = download(client, url).await?;
    tokio::fs::write(dest, bytes).await?;
    Ok(dest.to_path_buf())
}
