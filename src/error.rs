use std::path::PathBuf;

pub type KenBurnsResult<T> = Result<T, KenBurnsError>;

#[derive(thiserror::Error, Debug)]
pub enum KenBurnsError {
    #[error("invalid transition duration: {0} (must be finite and > 0)")]
    InvalidDuration(f32),

    #[error("image {index} could not be resolved: {reason}")]
    UnresolvableImage { index: usize, reason: String },

    #[error("no image files found in {}", .0.display())]
    EmptySource(PathBuf),

    #[error("failed to decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl KenBurnsError {
    pub fn unresolvable(index: usize, reason: impl Into<String>) -> Self {
        Self::UnresolvableImage {
            index,
            reason: reason.into(),
        }
    }

    pub fn decode(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Decode {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
