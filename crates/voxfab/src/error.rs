use std::io;
use thiserror::Error;

/// Errors emitted by kernel, codec, mesher and scene operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A caller-supplied value is outside its documented domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An SBVX stream failed validation (magic, version, payload size, bounds).
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// Internal inconsistency that well-formed input can never produce.
    #[error("invariant violated: {0}")]
    Invariant(String),

    /// A declared but unimplemented code path was requested.
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
