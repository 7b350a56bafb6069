use synco_api::domain::TaskId;
use thiserror::Error;

use crate::api::ClientError;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Task text cannot be empty")]
    Validation,
    #[error("Session expired or missing. Run `synco login` to sign in again.")]
    Auth(ClientError),
    #[error("Failed to save task: {0}")]
    Remote(ClientError),
    #[error("Task {0} is not being edited")]
    NotEditing(TaskId),
    #[error("Task {0} has no save in progress")]
    NotCommitting(TaskId),
    #[error("Task has not been saved yet and cannot be edited")]
    Unpersisted,
}

impl SyncError {
    pub(super) fn from_client(e: ClientError) -> Self {
        if e.is_auth() {
            SyncError::Auth(e)
        } else {
            SyncError::Remote(e)
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, SyncError::Auth(_))
    }
}
