// src/corpus/mod.rs
pub mod grouper;
pub mod period;
pub mod select;

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

pub use grouper::{group, CorpusIndex};
pub use period::{infer_quarter, infer_year};
pub use select::{select_latest, SelectedReport};

/// Where a document's bytes can be materialized from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum SourceLocation {
    Path(PathBuf),
    Url(String),
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLocation::Path(p) => write!(f, "{}", p.display()),
            SourceLocation::Url(u) => f.write_str(u),
        }
    }
}

/// One discovered report file. Immutable once discovered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub source_location: SourceLocation,
    pub origin_company: String,
    pub raw_filename: String,
    pub inferred_period: Option<u32>,
}

impl Document {
    /// Builds a document, inferring its fiscal year from the filename.
    pub fn new(
        source_location: SourceLocation,
        origin_company: impl Into<String>,
        raw_filename: impl Into<String>,
    ) -> Self {
        let raw_filename = raw_filename.into();
        Self {
            inferred_period: infer_year(&raw_filename),
            source_location,
            origin_company: origin_company.into(),
            raw_filename,
        }
    }
}

/// Canonical company key: trimmed and upper-cased.
pub fn normalize_company(company: &str) -> String {
    company.trim().to_uppercase()
}
