use thiserror::Error;

/// Validation errors raised at call time.
///
/// Neither variant is recovered internally; the caller must supply a valid
/// configuration and a well-formed bar sequence.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
