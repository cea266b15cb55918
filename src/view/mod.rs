//! Headless view controllers. Each view keeps its own UI state (form fields,
//! loading flag, display error) and calls [`crate::HrApi`]; a renderer reads
//! the state back. Async operations take a [`CancellationToken`] and commit
//! their result only while the token is live, so a late response never lands
//! on a view that was navigated away from.

pub mod department;
pub mod login;
pub mod profile;
pub mod queries;
pub mod signup;

#[cfg(test)]
pub(crate) mod fake;

use std::future::Future;

use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::model::{self, error::ApiError, user::Role};

pub const LOAD_ERROR: &str = "Failed to load employee data. Please try again later.";

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("{0}")]
    Validation(String),
    #[error("Unhandled role: '{0}'")]
    UnhandledRole(Role),
    #[error("Department {0} not found")]
    NotFound(String),
    #[error("Nothing to {0}")]
    NoAction(&'static str),
    #[error("Cancelled")]
    Cancelled(),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Store(#[from] model::store::Error),
}

/// Runs `fut` unless `cancel` fires first. `None` means the result must be
/// dropped.
pub(crate) async fn guarded<F, T>(cancel: &CancellationToken, fut: F) -> Option<T>
where
    F: Future<Output = T>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        res = fut => (!cancel.is_cancelled()).then_some(res),
    }
}

pub(crate) fn required(value: &str, field: &str) -> Result<(), ViewError> {
    if value.trim().is_empty() {
        return Err(ViewError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_guarded_live() {
        let cancel = CancellationToken::new();
        assert_eq!(guarded(&cancel, async { 5 }).await, Some(5));
    }

    #[tokio::test]
    async fn test_guarded_cancelled() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        assert_eq!(guarded(&cancel, async { 5 }).await, None);
    }

    #[tokio::test]
    async fn test_guarded_cancelled_while_waiting() {
        let cancel = CancellationToken::new();
        let child = cancel.clone();
        let res = guarded(&cancel, async move {
            child.cancel();
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            5
        })
        .await;
        assert_eq!(res, None);
    }

    #[test]
    fn test_required() {
        assert!(required("x", "Email").is_ok());
        assert_eq!(
            required("  ", "Email").unwrap_err().to_string(),
            "Email is required"
        );
    }
}
