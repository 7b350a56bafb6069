use reqwest::{header::AUTHORIZATION, Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

use crate::{
    auth::{LoginRequest, RegisterResponse, TokenResponse},
    domain::{
        Group, GroupId, GroupName, MemberRef, MembershipChange, NewTask, Task, TaskId, TaskScope,
        UpdateTask,
    },
    ApiError, Credential, SyncoURL,
};

/// Typed access to the tasks backend.
///
/// The client holds no credential of its own; every authenticated call takes
/// the token it should use, so the caller decides where tokens live.
#[derive(Debug, Clone)]
pub struct SyncoClient {
    http: Client,
    base: SyncoURL,
}

impl SyncoClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let http = Client::builder()
            .build()
            .map_err(|e| ApiError::ResponseError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base: SyncoURL::new(base_url),
        })
    }

    pub fn base_url(&self) -> &SyncoURL {
        &self.base
    }

    fn task_url(&self, id: TaskId) -> SyncoURL {
        self.base.append_path(&format!("tasks/{}", id))
    }

    fn group_url(&self, id: GroupId) -> SyncoURL {
        self.base.append_path(&format!("groups/{}", id))
    }

    fn members_url(&self, id: GroupId) -> SyncoURL {
        self.base.append_path(&format!("groups/{}/members", id))
    }

    async fn execute(&self, request: RequestBuilder, call_name: &str) -> Result<Response, ApiError> {
        tracing::debug!("calling {}", call_name);

        let resp = request.send().await.map_err(|e| {
            ApiError::ResponseError(format!("Failed to call {}: {}", call_name, e))
        })?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let err = ApiError::from_status(status, &body);
        tracing::debug!("{} failed: {}", call_name, err);
        Err(err)
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<T, ApiError> {
        let resp = self.execute(request, call_name).await?;
        resp.json::<T>().await.map_err(|e| {
            ApiError::ParsingError(format!("Failed to parse {} response: {}", call_name, e))
        })
    }

    async fn send_without_body(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<(), ApiError> {
        let resp = self.execute(request, call_name).await?;
        let _ = resp.bytes().await;
        Ok(())
    }

    fn authorized(&self, request: RequestBuilder, credential: &Credential) -> RequestBuilder {
        request.header(AUTHORIZATION, credential.as_auth_header())
    }

    /// Exchange username and password for a session token.
    pub async fn obtain_token(&self, username: &str, password: &str) -> Result<Credential, ApiError> {
        let url = self.base.append_path("api-token-auth");
        let response: TokenResponse = self
            .fetch_json(
                self.http
                    .post(url.as_ref())
                    .json(&LoginRequest { username, password }),
                "POST api-token-auth/",
            )
            .await?;

        Credential::new(response.token)
            .ok_or_else(|| ApiError::ParsingError("Server returned an empty token".to_string()))
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<RegisterResponse, ApiError> {
        let url = self.base.append_path("register");
        self.fetch_json(
            self.http
                .post(url.as_ref())
                .json(&LoginRequest { username, password }),
            "POST register/",
        )
        .await
    }

    pub async fn list_tasks(
        &self,
        credential: &Credential,
        scope: &TaskScope,
    ) -> Result<Vec<Task>, ApiError> {
        let url = self.base.append_path("tasks").with_scope(scope);
        self.fetch_json(
            self.authorized(self.http.get(url.as_ref()), credential),
            "GET tasks/",
        )
        .await
    }

    pub async fn create_task(
        &self,
        credential: &Credential,
        new_task: &NewTask,
    ) -> Result<Task, ApiError> {
        let url = self.base.append_path("tasks");
        self.fetch_json(
            self.authorized(self.http.post(url.as_ref()), credential)
                .json(new_task),
            "POST tasks/",
        )
        .await
    }

    /// Replace a task. The returned task is the server's authoritative state.
    pub async fn update_task(
        &self,
        credential: &Credential,
        id: TaskId,
        update: &UpdateTask,
    ) -> Result<Task, ApiError> {
        let url = self.task_url(id);
        self.fetch_json(
            self.authorized(self.http.put(url.as_ref()), credential)
                .json(update),
            "PUT tasks/:id/",
        )
        .await
    }

    pub async fn delete_task(&self, credential: &Credential, id: TaskId) -> Result<(), ApiError> {
        let url = self.task_url(id);
        self.send_without_body(
            self.authorized(self.http.delete(url.as_ref()), credential),
            "DELETE tasks/:id/",
        )
        .await
    }

    pub async fn list_groups(&self, credential: &Credential) -> Result<Vec<Group>, ApiError> {
        let url = self.base.append_path("groups");
        self.fetch_json(
            self.authorized(self.http.get(url.as_ref()), credential),
            "GET groups/",
        )
        .await
    }

    pub async fn create_group(&self, credential: &Credential, name: &str) -> Result<Group, ApiError> {
        let url = self.base.append_path("groups");
        self.fetch_json(
            self.authorized(self.http.post(url.as_ref()), credential)
                .json(&GroupName { name }),
            "POST groups/",
        )
        .await
    }

    pub async fn rename_group(
        &self,
        credential: &Credential,
        id: GroupId,
        name: &str,
    ) -> Result<Group, ApiError> {
        let url = self.group_url(id);
        self.fetch_json(
            self.authorized(self.http.put(url.as_ref()), credential)
                .json(&GroupName { name }),
            "PUT groups/:id/",
        )
        .await
    }

    pub async fn delete_group(&self, credential: &Credential, id: GroupId) -> Result<(), ApiError> {
        let url = self.group_url(id);
        self.send_without_body(
            self.authorized(self.http.delete(url.as_ref()), credential),
            "DELETE groups/:id/",
        )
        .await
    }

    pub async fn list_members(
        &self,
        credential: &Credential,
        id: GroupId,
    ) -> Result<Vec<MemberRef>, ApiError> {
        let url = self.members_url(id);
        self.fetch_json(
            self.authorized(self.http.get(url.as_ref()), credential),
            "GET groups/:id/members/",
        )
        .await
    }

    pub async fn add_member(
        &self,
        credential: &Credential,
        id: GroupId,
        username: &str,
    ) -> Result<(), ApiError> {
        let url = self.members_url(id);
        self.send_without_body(
            self.authorized(self.http.post(url.as_ref()), credential)
                .json(&MembershipChange { username }),
            "POST groups/:id/members/",
        )
        .await
    }

    pub async fn remove_member(
        &self,
        credential: &Credential,
        id: GroupId,
        username: &str,
    ) -> Result<(), ApiError> {
        let url = self.members_url(id);
        self.send_without_body(
            self.authorized(self.http.delete(url.as_ref()), credential)
                .json(&MembershipChange { username }),
            "DELETE groups/:id/members/",
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_base_url() {
        let err = SyncoClient::new("not a url").unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn builds_resource_urls() {
        let client = SyncoClient::new("http://127.0.0.1:8000/api/").unwrap();
        assert_eq!(
            client.task_url(TaskId(7)).as_ref(),
            "http://127.0.0.1:8000/api/tasks/7/"
        );
        assert_eq!(
            client.members_url(GroupId(2)).as_ref(),
            "http://127.0.0.1:8000/api/groups/2/members/"
        );
    }

    #[tokio::test]
    async fn unreachable_server_is_a_response_error() {
        // Port 9 (discard) is not expected to serve HTTP on the test host.
        let client = SyncoClient::new("http://127.0.0.1:9/api").unwrap();
        let credential = Credential::new("token").unwrap();

        let err = client
            .list_tasks(&credential, &TaskScope::All)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::ResponseError(_)));
    }
}
