//! Posting catalog import for CSV and JSON exports of the company dashboard.

mod parser;

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use crate::matching::domain::{Posting, PostingId};
use crate::matching::repository::{PostingRepository, RepositoryError};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read posting catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid posting CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid posting JSON data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid posting on line {line}: {message}")]
    InvalidRow { line: u64, message: String },
    #[error("duplicate posting id '{0}'")]
    DuplicateId(PostingId),
}

/// Dashboard counts for a catalog.
///
/// Applicant figures only cover postings that report a count; the average is
/// `None` when none do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogSummary {
    pub total: usize,
    pub active: usize,
    pub closed: usize,
    pub total_applicants: u64,
    pub average_applicants: Option<f64>,
}

/// In-memory posting catalog with unique identifiers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostingCatalog {
    postings: Vec<Posting>,
}

impl PostingCatalog {
    pub fn new(postings: Vec<Posting>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for posting in &postings {
            if !seen.insert(&posting.id) {
                return Err(CatalogError::DuplicateId(posting.id.clone()));
            }
        }
        Ok(Self { postings })
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        Self::new(parser::parse_postings(reader)?)
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        Self::new(serde_json::from_str(raw)?)
    }

    /// Loads a `.json` array or a CSV export, chosen by file extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .map(|extension| extension.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            Self::from_json(&std::fs::read_to_string(path)?)
        } else {
            Self::from_reader(std::fs::File::open(path)?)
        }
    }

    pub fn postings(&self) -> &[Posting] {
        &self.postings
    }

    pub fn get(&self, id: &PostingId) -> Option<&Posting> {
        self.postings.iter().find(|posting| &posting.id == id)
    }

    pub fn active(&self) -> impl Iterator<Item = &Posting> {
        self.postings
            .iter()
            .filter(|posting| posting.status.is_active())
    }

    pub fn summary(&self) -> CatalogSummary {
        let active = self.active().count();
        let counts: Vec<u64> = self
            .postings
            .iter()
            .filter_map(|posting| posting.applicants.map(u64::from))
            .collect();
        let total_applicants: u64 = counts.iter().sum();
        CatalogSummary {
            total: self.postings.len(),
            active,
            closed: self.postings.len() - active,
            total_applicants,
            average_applicants: (!counts.is_empty())
                .then(|| total_applicants as f64 / counts.len() as f64),
        }
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}

impl PostingRepository for PostingCatalog {
    fn list(&self) -> Result<Vec<Posting>, RepositoryError> {
        Ok(self.postings.clone())
    }
}
