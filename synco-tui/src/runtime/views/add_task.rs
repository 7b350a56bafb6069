use crate::app::{App, View};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_add_task_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.new_task_input.insert(c);
        }
        KeyCode::Backspace => app.new_task_input.backspace(),
        KeyCode::Left => app.new_task_input.move_left(),
        KeyCode::Right => app.new_task_input.move_right(),
        KeyCode::Home => app.new_task_input.home(),
        KeyCode::End => app.new_task_input.end(),
        KeyCode::Enter => {
            if let Some(text) = app.take_new_task_text() {
                enqueue_action(action_tx, Action::CreateTask { text });
            }
            app.current_view = View::Tasks;
        }
        KeyCode::Esc => {
            app.new_task_input.clear();
            app.current_view = View::Tasks;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::action_queue::channel;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn blank_input_queues_nothing() {
        let mut app = App::new(true);
        app.current_view = View::AddTask;
        let (tx, mut rx) = channel();

        handle_add_task_key(press(KeyCode::Char(' ')), &mut app, &tx);
        handle_add_task_key(press(KeyCode::Enter), &mut app, &tx);

        assert_eq!(app.current_view, View::Tasks);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn typed_text_is_queued_trimmed() {
        let mut app = App::new(true);
        app.current_view = View::AddTask;
        let (tx, mut rx) = channel();

        for c in " tea ".chars() {
            handle_add_task_key(press(KeyCode::Char(c)), &mut app, &tx);
        }
        handle_add_task_key(press(KeyCode::Enter), &mut app, &tx);

        match rx.try_recv() {
            Ok(Action::CreateTask { text }) => assert_eq!(text, "tea"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
