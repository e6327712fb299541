use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("cancelled after {processed} lines")]
    Cancelled { processed: usize },
}
