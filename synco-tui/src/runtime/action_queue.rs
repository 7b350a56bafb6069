use synco_api::domain::{Task, TaskId, UpdateTask};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::api::ClientError;

#[derive(Debug)]
pub(super) enum Action {
    Reload,
    CycleScope,
    CreateTask {
        text: String,
    },
    /// Send a committed inline edit. Runs in the background.
    SaveEdit {
        id: TaskId,
        update: UpdateTask,
    },
    /// The server answered a `SaveEdit`.
    ResolveEdit {
        id: TaskId,
        outcome: Result<Task, ClientError>,
    },
    ToggleCompleted {
        id: TaskId,
        update: UpdateTask,
    },
    ConfirmDelete,
}

pub(super) type ActionTx = UnboundedSender<Action>;
pub(super) type ActionRx = UnboundedReceiver<Action>;

pub(super) fn channel() -> (ActionTx, ActionRx) {
    mpsc::unbounded_channel()
}
