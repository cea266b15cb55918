use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Not logged in")]
    NoSession(),
    /// The stored session can't be decrypted or parsed; logging in again replaces it.
    #[error("Stored session is unreadable: {0}")]
    Corrupted(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
