use super::domain::Posting;

/// Read-only source of postings owned by an external catalog store.
pub trait PostingRepository: Send + Sync {
    fn list(&self) -> Result<Vec<Posting>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("posting catalog unavailable: {0}")]
    Unavailable(String),
}
