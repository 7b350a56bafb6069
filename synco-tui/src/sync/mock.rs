//! Scripted [`TaskUpdater`] for tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use synco_api::domain::{Task, TaskId, UpdateTask};

use super::TaskUpdater;
use crate::api::ClientError;

/// Replays scripted responses in order; once they run out it echoes the
/// update back as the server's answer.
#[derive(Default)]
pub(crate) struct MockUpdater {
    responses: Mutex<VecDeque<Result<Task, ClientError>>>,
    calls: Mutex<Vec<(TaskId, UpdateTask)>>,
}

impl MockUpdater {
    /// Echo every update back unchanged.
    pub fn echo() -> Self {
        Self::default()
    }

    pub fn with_sequence(responses: Vec<Result<Task, ClientError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn returning(task: Task) -> Self {
        Self::with_sequence(vec![Ok(task)])
    }

    pub fn failing(err: ClientError) -> Self {
        Self::with_sequence(vec![Err(err)])
    }

    pub fn calls(&self) -> Vec<(TaskId, UpdateTask)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl TaskUpdater for MockUpdater {
    async fn update_task(&self, id: TaskId, update: &UpdateTask) -> Result<Task, ClientError> {
        self.calls.lock().unwrap().push((id, update.clone()));

        let scripted = self.responses.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| {
            Ok(Task {
                id: Some(id),
                text: update.text.clone(),
                completed: update.completed,
                group: update.group,
                created_at: None,
            })
        })
    }
}
