use crate::api::ApiClient;
use crate::app::App;

pub async fn initialize_app_state(app: &mut App, client: &ApiClient) {
    app.is_loading = true;
    load_groups(app, client).await;
    load_tasks(app, client).await;
    app.is_loading = false;
}

pub async fn load_groups(app: &mut App, client: &ApiClient) {
    match client.list_groups().await {
        Ok(groups) => app.set_groups(groups),
        Err(e) => {
            tracing::warn!("Could not load groups: {}", e);
            app.report_client_error("Could not load groups", e);
        }
    }
}

pub async fn load_tasks(app: &mut App, client: &ApiClient) {
    match client.list_tasks(&app.scope).await {
        Ok(tasks) => {
            tracing::debug!(count = tasks.len(), scope = %app.scope_label(), "loaded tasks");
            app.replace_tasks(tasks);
        }
        Err(e) => {
            tracing::warn!("Could not load tasks: {}", e);
            app.report_client_error("Could not load tasks", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn initial_load_fills_groups_and_tasks() {
        let client = ApiClient::dev().await.unwrap();
        let mut app = App::new(true);
        initialize_app_state(&mut app, &client).await;

        assert!(!app.is_loading);
        assert_eq!(app.groups.len(), 2);
        assert_eq!(app.tasks.len(), 6);
        assert_eq!(app.focused_index, Some(0));
    }
}
