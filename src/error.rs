use nearest_resample::ResampleError;
use thiserror::Error;

/// Error for a single image moving through decode -> resize -> encode.
///
/// Batch processing reports one of these per failed image; it never aborts
/// the sibling images.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("PNG encode error: {0}")]
    Encode(String),

    #[error("Resize error: {0}")]
    Resample(#[from] ResampleError),

    #[error("Archive error: {0}")]
    Archive(String),

    #[error("Cancelled before start")]
    Cancelled,

    #[error("Worker task failed: {0}")]
    Task(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<zip::result::ZipError> for ProcessError {
    fn from(e: zip::result::ZipError) -> Self {
        ProcessError::Archive(e.to_string())
    }
}
