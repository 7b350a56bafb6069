use crate::app::{App, View};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::{enqueue_action, enqueue_save};

pub(super) fn handle_tasks_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if app.editing_task_id().is_some() {
        handle_editing_key(key, app, action_tx);
        return;
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.move_focus(true),
        KeyCode::Down | KeyCode::Char('j') => app.move_focus(false),
        KeyCode::Enter | KeyCode::Char('e') | KeyCode::Char('E') => app.begin_edit(),
        KeyCode::Char(' ') => {
            if let Some((id, update)) = app.toggle_update() {
                enqueue_action(action_tx, Action::ToggleCompleted { id, update });
            }
        }
        KeyCode::Char('a') | KeyCode::Char('A') => {
            app.new_task_input.clear();
            app.current_view = View::AddTask;
        }
        KeyCode::Char('d') | KeyCode::Char('D') => app.request_delete(),
        KeyCode::Char('g') | KeyCode::Char('G') => enqueue_action(action_tx, Action::CycleScope),
        KeyCode::Char('r') | KeyCode::Char('R') => enqueue_action(action_tx, Action::Reload),
        KeyCode::Char('q') | KeyCode::Char('Q') => app.request_quit(),
        _ => {}
    }
}

/// Keys while the focused row is open for editing. Anything that takes the
/// focus away commits first.
fn handle_editing_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            enqueue_save(action_tx, app.commit_focused_edit());
            app.request_quit();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(buffer) = app.edit_buffer() {
                buffer.insert(c);
            }
        }
        KeyCode::Backspace => {
            if let Some(buffer) = app.edit_buffer() {
                buffer.backspace();
            }
        }
        KeyCode::Left => {
            if let Some(buffer) = app.edit_buffer() {
                buffer.move_left();
            }
        }
        KeyCode::Right => {
            if let Some(buffer) = app.edit_buffer() {
                buffer.move_right();
            }
        }
        KeyCode::Home => {
            if let Some(buffer) = app.edit_buffer() {
                buffer.home();
            }
        }
        KeyCode::End => {
            if let Some(buffer) = app.edit_buffer() {
                buffer.end();
            }
        }
        KeyCode::Enter | KeyCode::Esc | KeyCode::Tab => {
            enqueue_save(action_tx, app.commit_focused_edit());
        }
        KeyCode::Up => {
            enqueue_save(action_tx, app.commit_focused_edit());
            app.move_focus(true);
        }
        KeyCode::Down => {
            enqueue_save(action_tx, app.commit_focused_edit());
            app.move_focus(false);
        }
        _ => {}
    }
}
