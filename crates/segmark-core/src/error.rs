// crates/segmark-core/src/error.rs
//
// Error taxonomy for the annotation model.
//
//   ValidationError: a rejected mutation; the store is left untouched.
//   TimeCodeError  : a time string that could not be decoded.
//   SegmarkError   : everything that can come back from a file operation.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("segment {start}..{end} overlaps an existing segment")]
    Overlap { start: u64, end: u64 },
    #[error("segment end ({end} ms) must be after its start ({start} ms)")]
    EmptyRange { start: u64, end: u64 },
    #[error("no IN point has been marked")]
    MissingIn,
    #[error("OUT point ({out_ms} ms) is not after the IN point ({in_ms} ms)")]
    OutBeforeIn { in_ms: u64, out_ms: u64 },
    #[error("no action label is selected")]
    NoActionSelected,
    #[error("segment index {0} is out of range")]
    IndexOutOfRange(usize),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeCodeError {
    #[error("time code {0:?} has more than three fields")]
    TooManyFields(String),
    #[error("time code {text:?} has a non-numeric {field} field")]
    BadField { text: String, field: &'static str },
}

#[derive(Error, Debug)]
pub enum SegmarkError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("time code error: {0}")]
    TimeCode(#[from] TimeCodeError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("text is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
}

pub type Result<T> = std::result::Result<T, SegmarkError>;
