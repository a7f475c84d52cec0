#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Already exists: {0}")]
    AlreadyExists(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Search error: {0}")]
    Search(String),
}

impl StoreError {
    /// Stable machine-readable code, surfaced to the execution engine as an
    /// error extension.
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::NotFound(_) => "NOT_FOUND",
            StoreError::AlreadyExists(_) => "ALREADY_EXISTS",
            StoreError::Storage(_) => "STORAGE",
            StoreError::Search(_) => "SEARCH",
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
