// src/corpus/select.rs
use serde::Serialize;

use super::{CorpusIndex, Document};

/// The one document standing in for a company's current period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedReport {
    pub company: String,
    pub year: u32,
    pub document: Document,
}

/// Picks, per company, the last document (by filename) of its latest year.
///
/// Output follows the index's company order. Companies with no years are
/// skipped rather than treated as an error.
pub fn select_latest(index: &CorpusIndex) -> Vec<SelectedReport> {
    index
        .companies()
        .filter_map(|entry| {
            let Some(year) = entry.latest_year() else {
                tracing::warn!("No reports found for {} in the configured window", entry.company);
                return None;
            };
            let document = entry.years.get(&year)?.last()?.clone();
            tracing::debug!("{}: latest report for {} is {}", entry.company, year, document.raw_filename);
            Some(SelectedReport {
                company: entry.company.clone(),
                year,
                document,
            })
        })
        .collect()
}
