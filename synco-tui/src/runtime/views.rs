use crate::app::{App, View};
use crossterm::event::KeyEvent;
use synco_api::domain::{TaskId, UpdateTask};

use super::action_queue::{Action, ActionTx};

mod add_task;
mod confirm_delete;
mod tasks;

fn enqueue_action(action_tx: &ActionTx, action: Action) {
    let _ = action_tx.send(action);
}

/// Queue the save for an edit that produced a change.
fn enqueue_save(action_tx: &ActionTx, pending: Option<(TaskId, UpdateTask)>) {
    if let Some((id, update)) = pending {
        enqueue_action(action_tx, Action::SaveEdit { id, update });
    }
}

pub(super) fn handle_view_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match app.current_view {
        View::Tasks => tasks::handle_tasks_key(key, app, action_tx),
        View::AddTask => add_task::handle_add_task_key(key, app, action_tx),
        View::ConfirmDelete => confirm_delete::handle_confirm_delete_key(key, app, action_tx),
    }
}
