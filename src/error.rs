use thiserror::Error;

/// Everything that can go wrong decoding a TinyVG document.
#[non_exhaustive]
#[derive(Error, Clone, Debug, PartialEq)]
pub enum TinyVgError {
    #[error("invalid argument")]
    InvalidArg,
    #[error("decoder used out of sequence")]
    InvalidState,
    #[error("malformed TinyVG stream: {reason}")]
    InvalidFormat { reason: &'static str },
    #[error("failed to read from the underlying stream")]
    IoError,
    #[error("allocation failed")]
    OutOfMemory,
    #[error("unsupported TinyVG feature: {reason}")]
    NotSupported { reason: &'static str },
}

impl From<std::io::Error> for TinyVgError {
    fn from(_: std::io::Error) -> TinyVgError {
        TinyVgError::IoError
    }
}

pub type Result<T> = core::result::Result<T, TinyVgError>;
