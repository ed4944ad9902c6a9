//! Error taxonomy for an upload run
//!
//! Validation failures and declined confirmations are reported as a single
//! line; everything else is printed with its full cause chain by `main`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("git is not available ({program}): {reason}")]
    GitUnavailable { program: String, reason: String },

    #[error("account identifier must not be empty")]
    EmptyAccount,

    #[error("access token must not be empty")]
    EmptyToken,

    #[error("hosting username must not be empty")]
    EmptyOwner,

    #[error("configuration cancelled")]
    Cancelled,

    #[error("create the remote repository first, then run again")]
    RemoteNotCreated,

    #[error("nothing to commit and the repository has no history")]
    NothingToCommit,

    #[error("push to remote '{remote}' failed")]
    PushFailed { remote: String },

    #[error("operation cancelled")]
    Interrupted,

    #[error("no remote named '{0}' is configured")]
    NoRemote(String),

    #[error("{command} failed: {stderr}")]
    Git { command: String, stderr: String },
}

impl UploadError {
    /// True for errors the operator caused or chose (bad input, a "no" answer).
    ///
    /// These are printed without a cause chain.
    pub fn is_operator_abort(&self) -> bool {
        matches!(
            self,
            UploadError::EmptyAccount
                | UploadError::EmptyToken
                | UploadError::EmptyOwner
                | UploadError::Cancelled
                | UploadError::RemoteNotCreated
                | UploadError::Interrupted
        )
    }
}
