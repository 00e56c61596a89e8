use thiserror::Error;

/// # AdError
/// Failures surfaced by the differentiation engines.
///
/// Numeric-domain conditions (division by zero, overflow) are not errors:
/// they travel through the arithmetic as IEEE infinities and NaNs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AdError {
    #[error("Unsupported operation `{operation}`: {reason}")]
    Unsupported {
        operation: &'static str,
        reason: &'static str,
    },
    #[error("Node index {index} out of range (tape has {len} nodes)")]
    NodeOutOfRange { index: usize, len: usize },
    #[error("TapeVar #{index} outlived the tape it was recorded on")]
    DetachedVar { index: usize },
    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}

pub type Result<T> = std::result::Result<T, AdError>;

impl From<rayon::ThreadPoolBuildError> for AdError {
    fn from(e: rayon::ThreadPoolBuildError) -> Self {
        AdError::ThreadPool(e.to_string())
    }
}

impl From<AdError> for String {
    fn from(e: AdError) -> Self {
        e.to_string()
    }
}
