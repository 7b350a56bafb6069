use std::sync::{Arc, Mutex, MutexGuard};
use synco_api::domain::{
    Group, GroupId, MemberRef, NewTask, Task, TaskId, TaskScope, UpdateTask,
};
use synco_api::ApiError;

/// Same limit the backend's task model enforces.
const MAX_TASK_TEXT: usize = 200;
const DEV_USER: &str = "dev";

/// In-memory stand-in for the tasks backend, used by `synco dev`.
#[derive(Debug, Clone)]
pub struct DevBackend {
    store: Arc<Mutex<DevStore>>,
}

#[derive(Debug)]
struct DevStore {
    tasks: Vec<Task>,
    groups: Vec<Group>,
    next_task_id: i64,
    next_group_id: i64,
}

fn rejected(message: impl Into<String>) -> ApiError {
    ApiError::Rejected {
        status: 400,
        message: message.into(),
    }
}

fn forbidden(message: impl Into<String>) -> ApiError {
    ApiError::Rejected {
        status: 403,
        message: message.into(),
    }
}

fn validate_text(text: &str) -> Result<String, ApiError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(rejected("text: This field may not be blank."));
    }
    if text.chars().count() > MAX_TASK_TEXT {
        return Err(rejected(format!(
            "text: Ensure this field has no more than {} characters.",
            MAX_TASK_TEXT
        )));
    }
    Ok(text.to_string())
}

impl DevBackend {
    pub fn new() -> Self {
        Self {
            store: Arc::new(Mutex::new(seed_dev_store())),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, DevStore>, ApiError> {
        self.store
            .lock()
            .map_err(|_| ApiError::ResponseError("dev store lock poisoned".to_string()))
    }

    pub fn list_tasks(&self, scope: &TaskScope) -> Result<Vec<Task>, ApiError> {
        let store = self.lock()?;
        let mut tasks: Vec<Task> = store
            .tasks
            .iter()
            .filter(|t| match scope {
                TaskScope::All => true,
                TaskScope::Personal => t.is_personal(),
                TaskScope::Group(id) => t.group == Some(*id),
            })
            .cloned()
            .collect();
        // Newest first, like the server.
        tasks.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(tasks)
    }

    pub fn create_task(&self, new_task: &NewTask) -> Result<Task, ApiError> {
        let text = validate_text(&new_task.text)?;
        let mut store = self.lock()?;
        if let Some(group) = new_task.group {
            if !store.groups.iter().any(|g| g.id == group) {
                return Err(forbidden(
                    "You do not have permission to add tasks to this group.",
                ));
            }
        }
        let task = Task {
            id: Some(TaskId(store.next_task_id)),
            text,
            completed: false,
            group: new_task.group,
            created_at: None,
        };
        store.next_task_id += 1;
        store.tasks.push(task.clone());
        Ok(task)
    }

    pub fn update_task(&self, id: TaskId, update: &UpdateTask) -> Result<Task, ApiError> {
        let text = validate_text(&update.text)?;
        let mut store = self.lock()?;
        let task = store
            .tasks
            .iter_mut()
            .find(|t| t.id == Some(id))
            .ok_or(ApiError::NotFound)?;
        task.text = text;
        task.completed = update.completed;
        task.group = update.group;
        Ok(task.clone())
    }

    pub fn delete_task(&self, id: TaskId) -> Result<(), ApiError> {
        let mut store = self.lock()?;
        let before = store.tasks.len();
        store.tasks.retain(|t| t.id != Some(id));
        if store.tasks.len() == before {
            return Err(ApiError::NotFound);
        }
        Ok(())
    }

    pub fn list_groups(&self) -> Result<Vec<Group>, ApiError> {
        Ok(self.lock()?.groups.clone())
    }

    pub fn create_group(&self, name: &str) -> Result<Group, ApiError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(rejected("name: This field may not be blank."));
        }
        let mut store = self.lock()?;
        let group = Group {
            id: GroupId(store.next_group_id),
            name: name.to_string(),
            members: vec![MemberRef::Username(DEV_USER.to_string())],
        };
        store.next_group_id += 1;
        store.groups.push(group.clone());
        Ok(group)
    }

    pub fn rename_group(&self, id: GroupId, name: &str) -> Result<Group, ApiError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(rejected("name: This field may not be blank."));
        }
        let mut store = self.lock()?;
        let group = store
            .groups
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(ApiError::NotFound)?;
        group.name = name.to_string();
        Ok(group.clone())
    }

    /// Deleting a group deletes its tasks too.
    pub fn delete_group(&self, id: GroupId) -> Result<(), ApiError> {
        let mut store = self.lock()?;
        let before = store.groups.len();
        store.groups.retain(|g| g.id != id);
        if store.groups.len() == before {
            return Err(ApiError::NotFound);
        }
        store.tasks.retain(|t| t.group != Some(id));
        Ok(())
    }

    pub fn list_members(&self, id: GroupId) -> Result<Vec<MemberRef>, ApiError> {
        let store = self.lock()?;
        store
            .groups
            .iter()
            .find(|g| g.id == id)
            .map(|g| g.members.clone())
            .ok_or(ApiError::NotFound)
    }

    pub fn add_member(&self, id: GroupId, username: &str) -> Result<(), ApiError> {
        let mut store = self.lock()?;
        let group = store
            .groups
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(ApiError::NotFound)?;
        if group.members.iter().any(|m| m.to_string() == username) {
            return Err(rejected(format!("{} is already a member.", username)));
        }
        group.members.push(MemberRef::Username(username.to_string()));
        Ok(())
    }

    pub fn remove_member(&self, id: GroupId, username: &str) -> Result<(), ApiError> {
        let mut store = self.lock()?;
        let group = store
            .groups
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(ApiError::NotFound)?;
        let before = group.members.len();
        group.members.retain(|m| m.to_string() != username);
        if group.members.len() == before {
            return Err(ApiError::NotFound);
        }
        Ok(())
    }
}

fn seed_dev_store() -> DevStore {
    let groups = vec![
        Group {
            id: GroupId(1),
            name: "Household".to_string(),
            members: vec![
                MemberRef::Username(DEV_USER.to_string()),
                MemberRef::Username("sam".to_string()),
            ],
        },
        Group {
            id: GroupId(2),
            name: "Side project".to_string(),
            members: vec![MemberRef::Username(DEV_USER.to_string())],
        },
    ];

    let seed = [
        ("buy milk", false, None),
        ("renew passport", false, None),
        ("call the dentist", true, None),
        ("clean the gutters", false, Some(GroupId(1))),
        ("pay electricity bill", true, Some(GroupId(1))),
        ("write release notes", false, Some(GroupId(2))),
    ];

    let tasks = seed
        .into_iter()
        .enumerate()
        .map(|(i, (text, completed, group))| Task {
            id: Some(TaskId(i as i64 + 1)),
            text: text.to_string(),
            completed,
            group,
            created_at: None,
        })
        .collect::<Vec<_>>();

    DevStore {
        next_task_id: tasks.len() as i64 + 1,
        next_group_id: groups.len() as i64 + 1,
        tasks,
        groups,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scopes_filter_seeded_tasks() {
        let dev = DevBackend::new();
        let all = dev.list_tasks(&TaskScope::All).unwrap();
        let personal = dev.list_tasks(&TaskScope::Personal).unwrap();
        let household = dev.list_tasks(&TaskScope::Group(GroupId(1))).unwrap();

        assert_eq!(all.len(), 6);
        assert!(personal.iter().all(|t| t.group.is_none()));
        assert_eq!(household.len(), 2);
        // Newest first.
        assert!(all.windows(2).all(|w| w[0].id > w[1].id));
    }

    #[test]
    fn update_trims_and_rejects_blank_text() {
        let dev = DevBackend::new();
        let update = UpdateTask {
            text: "  buy oat milk ".to_string(),
            completed: false,
            group: None,
        };
        let task = dev.update_task(TaskId(1), &update).unwrap();
        assert_eq!(task.text, "buy oat milk");

        let blank = UpdateTask {
            text: "   ".to_string(),
            ..update
        };
        assert!(matches!(
            dev.update_task(TaskId(1), &blank),
            Err(ApiError::Rejected { status: 400, .. })
        ));
    }

    #[test]
    fn overlong_text_is_rejected() {
        let dev = DevBackend::new();
        let update = UpdateTask {
            text: "x".repeat(MAX_TASK_TEXT + 1),
            completed: false,
            group: None,
        };
        assert!(dev.update_task(TaskId(1), &update).is_err());
        assert_eq!(
            dev.list_tasks(&TaskScope::All)
                .unwrap()
                .iter()
                .find(|t| t.id == Some(TaskId(1)))
                .map(|t| t.text.as_str()),
            Some("buy milk")
        );
    }

    #[test]
    fn creating_in_a_foreign_group_is_forbidden() {
        let dev = DevBackend::new();
        let new_task = NewTask {
            text: "sneak in".to_string(),
            group: Some(GroupId(42)),
        };
        match dev.create_task(&new_task) {
            Err(ApiError::Rejected { status, message }) => {
                assert_eq!(status, 403);
                assert!(message.contains("permission"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn deleting_a_group_removes_its_tasks() {
        let dev = DevBackend::new();
        dev.delete_group(GroupId(1)).unwrap();
        assert!(dev.list_tasks(&TaskScope::Group(GroupId(1))).unwrap().is_empty());
        assert!(matches!(dev.delete_group(GroupId(1)), Err(ApiError::NotFound)));
    }

    #[test]
    fn membership_changes() {
        let dev = DevBackend::new();
        dev.add_member(GroupId(2), "alex").unwrap();
        assert!(dev.add_member(GroupId(2), "alex").is_err());

        let members = dev.list_members(GroupId(2)).unwrap();
        assert!(members.iter().any(|m| m.to_string() == "alex"));

        dev.remove_member(GroupId(2), "alex").unwrap();
        assert!(matches!(
            dev.remove_member(GroupId(2), "alex"),
            Err(ApiError::NotFound)
        ));
    }
}
