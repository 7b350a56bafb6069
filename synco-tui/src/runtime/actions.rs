use std::sync::Arc;
use synco_api::domain::{TaskId, UpdateTask};

use crate::api::ApiClient;
use crate::app::{App, View};
use crate::bootstrap::{load_groups, load_tasks};
use crate::sync::TaskUpdater;

use super::action_queue::{Action, ActionTx};

pub(super) async fn run_action(
    action: Action,
    app: &mut App,
    client: &ApiClient,
    action_tx: &ActionTx,
) {
    match action {
        Action::Reload => {
            load_groups(app, client).await;
            load_tasks(app, client).await;
        }
        Action::CycleScope => {
            app.scope = app.next_scope();
            load_tasks(app, client).await;
        }
        Action::CreateTask { text } => {
            handle_create_task(text, app, client).await;
        }
        Action::SaveEdit { id, update } => {
            spawn_save(Arc::new(client.clone()), id, update, action_tx);
        }
        Action::ResolveEdit { id, outcome } => {
            app.resolve_edit(id, outcome);
        }
        Action::ToggleCompleted { id, update } => match client.update_task(id, &update).await {
            Ok(task) => {
                app.apply_server_task(task);
                app.clear_status();
            }
            Err(e) => app.report_client_error("Error updating task", e),
        },
        Action::ConfirmDelete => {
            handle_confirm_delete(app, client).await;
        }
    }
}

/// Send a committed edit in the background. The field stays `Committing`
/// until the answer comes back through the queue as `ResolveEdit`; other
/// tasks remain editable meanwhile.
fn spawn_save(
    updater: Arc<dyn TaskUpdater>,
    id: TaskId,
    update: UpdateTask,
    action_tx: &ActionTx,
) {
    let tx = action_tx.clone();
    tokio::spawn(async move {
        let outcome = updater.update_task(id, &update).await;
        let _ = tx.send(Action::ResolveEdit { id, outcome });
    });
}

async fn handle_create_task(text: String, app: &mut App, client: &ApiClient) {
    let group = app.new_task_group();
    match client.create_task(&text, group).await {
        Ok(task) => {
            app.insert_created(task);
            app.clear_status();
        }
        Err(e) => app.report_client_error("Error adding task", e),
    }
}

async fn handle_confirm_delete(app: &mut App, client: &ApiClient) {
    app.current_view = View::Tasks;
    let Some(id) = app.pending_delete.take() else {
        return;
    };

    match client.delete_task(id).await {
        Ok(()) => {
            app.remove_task(id);
            app.clear_status();
        }
        Err(e) => app.report_client_error("Error deleting task", e),
    }
}
