use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeHashError {
    #[error("File I/O error")]
    IOError(#[from] io::Error),

    #[error("finalize called twice without an intervening reset")]
    FinalizeAfterFinalize,

    #[error("Tree invariant broken : {0}")]
    TreeInvariantError(String),

    #[error("Bad conversion length: expected {expected} bytes, got {actual}")]
    BadConversionLength { expected: usize, actual: usize },
}

// Define our own result type here (this seems to be the standard).
pub type Result<T> = std::result::Result<T, TreeHashError>;
