// src/lib.rs
//! Collects investor-relations PDFs per company, picks each company's latest
//! report, and turns it into a saved text context, a generated summary and a
//! key-metrics table.

pub mod config;
pub mod corpus;
pub mod discovery;
pub mod extract;
pub mod generate;
pub mod pipeline;
pub mod storage;
pub mod utils;

pub use config::Settings;
pub use corpus::{group, select_latest, CorpusIndex, Document, SelectedReport, SourceLocation};
pub use pipeline::{CompanyOutcome, Pipeline, RunReport, SkipReason, Stage};
pub use utils::AppError;
