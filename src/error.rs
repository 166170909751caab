use thiserror::Error;

/// Errors reported by key generation, signing and verification.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid length: expected {0} bytes, found {1} bytes")]
    BadLength(usize, usize),
    #[error("Entropy source failed to provide random bytes")]
    EntropyFailure,
    #[error("WOTS+C checksum salt not found within the iteration bound")]
    ChecksumNotFound,
    #[error("Message digest salt not found within the iteration bound")]
    SignRetriesExhausted,
    #[error("Invalid chain range: start {start} + steps {steps} exceeds w - 1")]
    InvalidChainRange { start: usize, steps: usize },
    #[error("Signature verification failed")]
    VerificationFailed,
}

pub type Result<T> = core::result::Result<T, Error>;
