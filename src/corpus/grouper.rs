// src/corpus/grouper.rs
use serde::Serialize;
use std::collections::BTreeMap;

use super::{normalize_company, Document};

/// Documents of one company, bucketed by inferred year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyDocuments {
    pub company: String,
    pub years: BTreeMap<u32, Vec<Document>>,
}

impl CompanyDocuments {
    pub fn latest_year(&self) -> Option<u32> {
        self.years.keys().next_back().copied()
    }
}

/// company -> year -> documents sorted by filename.
///
/// Companies keep the order in which their first retained document was seen.
/// A company with nothing inside the year window is never present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CorpusIndex {
    companies: Vec<CompanyDocuments>,
}

impl CorpusIndex {
    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.companies.len()
    }

    pub fn companies(&self) -> impl Iterator<Item = &CompanyDocuments> {
        self.companies.iter()
    }

    pub fn company(&self, company: &str) -> Option<&CompanyDocuments> {
        let key = normalize_company(company);
        self.companies.iter().find(|c| c.company == key)
    }

    pub fn years(&self, company: &str) -> Vec<u32> {
        self.company(company)
            .map(|c| c.years.keys().copied().collect())
            .unwrap_or_default()
    }

    pub fn documents(&self, company: &str, year: u32) -> &[Document] {
        self.company(company)
            .and_then(|c| c.years.get(&year))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn entry(&mut self, company: String) -> &mut CompanyDocuments {
        let pos = match self.companies.iter().position(|c| c.company == company) {
            Some(pos) => pos,
            None => {
                self.companies.push(CompanyDocuments {
                    company,
                    years: BTreeMap::new(),
                });
                self.companies.len() - 1
            }
        };
        &mut self.companies[pos]
    }
}

/// Groups discovered documents by company and inferred year, keeping only
/// those inside the inclusive `[start_year, end_year]` window.
///
/// Documents without an inferable year are dropped, not defaulted. An
/// inverted window simply retains nothing.
pub fn group(documents: &[Document], start_year: u32, end_year: u32) -> CorpusIndex {
    let mut index = CorpusIndex::default();

    for doc in documents {
        let company = normalize_company(&doc.origin_company);
        if company.is_empty() {
            tracing::debug!("Dropping {}: no origin company", doc.source_location);
            continue;
        }

        let year = match doc.inferred_period {
            Some(year) if start_year <= year && year <= end_year => year,
            Some(year) => {
                tracing::debug!("Dropping {}: year {} outside {}-{}", doc.raw_filename, year, start_year, end_year);
                continue;
            }
            None => {
                tracing::debug!("Dropping {}: no fiscal year in filename", doc.raw_filename);
                continue;
            }
        };

        index
            .entry(company)
            .years
            .entry(year)
            .or_default()
            .push(doc.clone());
    }

    // Filename order is the "latest" tie-break; location keeps identical
    // filenames in a stable order.
    for company in &mut index.companies {
        for docs in company.years.values_mut() {
            docs.sort_by(|a, b| {
                a.raw_filename
                    .cmp(&b.raw_filename)
                    .then_with(|| a.source_location.to_string().cmp(&b.source_location.to_string()))
            });
        }
    }

    index
}
