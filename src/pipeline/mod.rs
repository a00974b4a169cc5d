// src/pipeline/mod.rs
//
// Per-company enrichment: fetch -> extract -> persist context -> summary ->
// table. Each company runs to DONE or SKIPPED on its own; nothing that goes
// wrong for one company is allowed to stop the next.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

use crate::corpus::{group, infer_quarter, select_latest, CorpusIndex, Document, SelectedReport};
use crate::discovery::DocumentFetcher;
use crate::extract;
use crate::generate::{generate_or_placeholder, select_prompt, table_prompt, Generator};
use crate::storage::{ArtifactKind, ArtifactStore};

const SUMMARY_TASK: &str = "Markdown summary generation";

/// Pipeline states of one company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    Discovered,
    Extracted,
    ContextSaved,
    Summarized,
    Tabulated,
    Done,
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Nothing was selected for the company.
    NoReport,
    /// The selected document's bytes could not be obtained.
    FetchFailed,
    /// Extraction produced empty or whitespace-only text.
    EmptyText,
}

/// What happened to one company during a run.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyOutcome {
    pub company: String,
    pub year: Option<u32>,
    pub document: Option<String>,
    pub quarter_hint: Option<u8>,
    pub stage: Stage,
    /// Every state entered, starting at `Discovered`.
    pub history: Vec<Stage>,
    pub skip_reason: Option<SkipReason>,
    pub pages_ok: usize,
    pub pages_failed: usize,
    pub few_shot: bool,
    pub context_path: Option<PathBuf>,
    pub summary_path: Option<PathBuf>,
    pub table_path: Option<PathBuf>,
    pub summary_generated: bool,
    pub table_generated: bool,
    /// Non-fatal failures recorded along the way.
    pub errors: Vec<String>,
}

impl CompanyOutcome {
    fn new(company: &str) -> Self {
        Self {
            company: company.to_string(),
            year: None,
            document: None,
            quarter_hint: None,
            stage: Stage::Discovered,
            history: vec![Stage::Discovered],
            skip_reason: None,
            pages_ok: 0,
            pages_failed: 0,
            few_shot: false,
            context_path: None,
            summary_path: None,
            table_path: None,
            summary_generated: false,
            table_generated: false,
            errors: Vec::new(),
        }
    }

    fn advance(&mut self, next: Stage) {
        tracing::debug!("{}: {:?} -> {:?}", self.company, self.stage, next);
        self.stage = next;
        self.history.push(next);
    }

    fn skip(mut self, reason: SkipReason) -> Self {
        tracing::warn!("Skipping {}: {:?}", self.company, reason);
        self.skip_reason = Some(reason);
        self.advance(Stage::Skipped);
        self
    }

    pub fn is_done(&self) -> bool {
        self.stage == Stage::Done
    }
}

/// Everything a run did, written out as the run manifest.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub start_year: u32,
    pub end_year: u32,
    pub documents_discovered: usize,
    pub outcomes: Vec<CompanyOutcome>,
}

impl RunReport {
    pub fn completed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_done()).count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.iter().filter(|o| o.stage == Stage::Skipped).count()
    }

    pub fn outcome(&self, company: &str) -> Option<&CompanyOutcome> {
        self.outcomes.iter().find(|o| o.company == company)
    }
}

/// Groups the discovered documents and picks one report per company.
pub fn plan(documents: &[Document], start_year: u32, end_year: u32) -> (CorpusIndex, Vec<SelectedReport>) {
    let index = group(documents, start_year, end_year);
    let selected = select_latest(&index);
    (index, selected)
}

/// Sequential enrichment orchestrator. Owns artifact writes for the run.
pub struct Pipeline<'a> {
    fetcher: &'a dyn DocumentFetcher,
    generator: &'a dyn Generator,
    store: &'a ArtifactStore,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        fetcher: &'a dyn DocumentFetcher,
        generator: &'a dyn Generator,
        store: &'a ArtifactStore,
    ) -> Self {
        Self {
            fetcher,
            generator,
            store,
        }
    }

    /// Runs every company of the window, in index order, then writes the manifest.
    pub async fn run(&self, documents: &[Document], start_year: u32, end_year: u32) -> RunReport {
        let started_at = Utc::now();
        let (index, selected) = plan(documents, start_year, end_year);

        if index.is_empty() {
            tracing::info!("No PDF files found matching the year range {}-{}.", start_year, end_year);
        }

        let mut outcomes = Vec::with_capacity(index.len());
        for entry in index.companies() {
            tracing::info!("--- Processing company: {} ---", entry.company);
            let report = selected.iter().find(|s| s.company == entry.company);
            outcomes.push(self.process_company(&entry.company, report).await);
        }

        let report = RunReport {
            started_at,
            finished_at: Utc::now(),
            start_year,
            end_year,
            documents_discovered: documents.len(),
            outcomes,
        };

        if let Err(e) = self.store.save_manifest(&report) {
            tracing::error!("Failed to save run manifest: {}", e);
        }
        tracing::info!(
            "Process completed. Done: {}, Skipped: {}",
            report.completed(),
            report.skipped()
        );
        report
    }

    async fn process_company(&self, company: &str, selected: Option<&SelectedReport>) -> CompanyOutcome {
        let mut outcome = CompanyOutcome::new(company);

        let Some(report) = selected else {
            return outcome.skip(SkipReason::NoReport);
        };
        let doc = &report.document;
        outcome.year = Some(report.year);
        outcome.document = Some(doc.raw_filename.clone());
        outcome.quarter_hint = infer_quarter(&doc.raw_filename);
        tracing::info!("Identified newest report: {}", doc.raw_filename);

        // DISCOVERED -> EXTRACTED. A document that cannot be loaded still
        // passes through EXTRACTED, with no text.
        let extraction = match self.fetcher.fetch(&doc.source_location).await {
            Ok(bytes) => {
                tracing::info!("Extracting text from: {}", doc.source_location);
                Some(extract::extract(&bytes))
            }
            Err(e) => {
                tracing::error!("Could not load {}: {}", doc.source_location, e);
                outcome.errors.push(format!("fetch: {}", e));
                None
            }
        };
        outcome.advance(Stage::Extracted);
        let Some(extraction) = extraction else {
            return outcome.skip(SkipReason::FetchFailed);
        };
        outcome.pages_ok = extraction.pages_ok;
        outcome.pages_failed = extraction.pages_failed;

        if extraction.is_blank() {
            tracing::warn!("No text could be extracted from {}", doc.source_location);
            return outcome.skip(SkipReason::EmptyText);
        }
        let text = extraction.text;

        // EXTRACTED -> CONTEXT_SAVED, regardless of whether the write worked
        match self.store.persist_context(company, &text) {
            Ok(path) => outcome.context_path = Some(path),
            Err(e) => {
                tracing::error!("Error saving context file for {}: {}", company, e);
                outcome.errors.push(format!("context: {}", e));
            }
        }
        outcome.advance(Stage::ContextSaved);

        // CONTEXT_SAVED -> SUMMARIZED
        let template = select_prompt(company);
        outcome.few_shot = template.is_few_shot();
        let summary = generate_or_placeholder(self.generator, &template.render(company, &text), SUMMARY_TASK).await;
        outcome.summary_generated = summary.is_ok();
        let summary_path = self.save(&mut outcome, ArtifactKind::Summary, report.year, flatten(summary));
        outcome.summary_path = summary_path;
        outcome.advance(Stage::Summarized);

        // SUMMARIZED -> TABULATED
        let task = format!("Markdown table generation for {}", report.year);
        let table = generate_or_placeholder(self.generator, &table_prompt(report.year, &text), &task).await;
        outcome.table_generated = table.is_ok();
        let table_path = self.save(&mut outcome, ArtifactKind::Table, report.year, flatten(table));
        outcome.table_path = table_path;
        outcome.advance(Stage::Tabulated);

        outcome.advance(Stage::Done);
        outcome
    }

    fn save(&self, outcome: &mut CompanyOutcome, kind: ArtifactKind, year: u32, content: String) -> Option<PathBuf> {
        match self.store.save_artifact(kind, &outcome.company, year, &content) {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::error!("Error saving {} file for {}: {}", kind.label(), outcome.company, e);
                outcome.errors.push(format!("{}: {}", kind.label(), e));
                None
            }
        }
    }
}

/// Generated text on success, the error placeholder otherwise. Both are stored.
fn flatten(result: Result<String, String>) -> String {
    result.unwrap_or_else(|placeholder| placeholder)
}
