//! Inline editing of task text.
//!
//! A field moves `Display -> Editing -> Committing -> Display`. Sessions are
//! kept in one table keyed by task id, so a field can never have two open
//! edits. Every way out of `Editing` goes through [`FieldSynchronizer::commit`],
//! and every failure restores the text the edit started from.

mod error;
#[cfg(test)]
pub(crate) mod mock;
mod session;
mod synchronizer;

use async_trait::async_trait;
use synco_api::domain::{Task, TaskId, UpdateTask};

use crate::api::ClientError;

pub use error::SyncError;
pub use session::FieldPhase;
pub use synchronizer::{Activation, Commit, FieldSynchronizer};

/// The remote operation a commit needs: replace a task, get back the
/// server's version of it.
#[async_trait]
pub trait TaskUpdater: Send + Sync {
    async fn update_task(&self, id: TaskId, update: &UpdateTask) -> Result<Task, ClientError>;
}
