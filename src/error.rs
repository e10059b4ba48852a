use thiserror::Error;

/// Errors from setting up or keying a Hell session.
///
/// `E` is the error type of the bound transmitter.
#[derive(Debug, Error)]
pub enum Error<E> {
    #[error("transmitter rejected command")]
    Transmitter(#[source] E),
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("session used before setup")]
    NotConfigured,
    #[error("rendering cancelled")]
    Cancelled,
}

pub type Result<T, E> = std::result::Result<T, Error<E>>;
