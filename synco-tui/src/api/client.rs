use async_trait::async_trait;
use synco_api::domain::{Group, GroupId, MemberRef, NewTask, Task, TaskId, TaskScope, UpdateTask};
use synco_api::{ApiError, Credential, SyncoClient};
use thiserror::Error;

use crate::api::dev_backend::DevBackend;
use crate::session_store::SessionStore;
use crate::sync::TaskUpdater;

const DEV_TOKEN: &str = "dev-session";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Not signed in. Run `synco login` to authenticate.")]
    SignedOut,
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("Session store error: {0:#}")]
    Session(anyhow::Error),
}

impl ClientError {
    /// Missing or rejected credential.
    pub fn is_auth(&self) -> bool {
        match self {
            ClientError::SignedOut => true,
            ClientError::Api(e) => e.is_unauthorized(),
            ClientError::Session(_) => false,
        }
    }
}

/// The application's view of the backend: the HTTP client plus the session
/// store every authenticated call reads its credential from.
#[derive(Clone)]
pub struct ApiClient {
    remote: SyncoClient,
    session: SessionStore,
    dev_backend: Option<DevBackend>,
}

impl ApiClient {
    pub fn new(base_url: &str, session: SessionStore) -> Result<Self, ClientError> {
        Ok(Self {
            remote: SyncoClient::new(base_url)?,
            session,
            dev_backend: None,
        })
    }

    /// Client backed by in-memory data and an in-memory, pre-signed-in session.
    pub async fn dev() -> Result<Self, ClientError> {
        let session = SessionStore::in_memory();
        if let Some(token) = Credential::new(DEV_TOKEN) {
            session.set(&token).await.map_err(ClientError::Session)?;
        }

        Ok(Self {
            remote: SyncoClient::new("http://localhost")?,
            session,
            dev_backend: Some(DevBackend::new()),
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    async fn credential(&self) -> Result<Credential, ClientError> {
        self.session
            .get()
            .await
            .map_err(ClientError::Session)?
            .ok_or(ClientError::SignedOut)
    }

    /// Exchange username/password for a token and store it.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ClientError> {
        let credential = if self.dev_backend.is_some() {
            Credential::new(DEV_TOKEN).ok_or(ClientError::SignedOut)?
        } else {
            self.remote.obtain_token(username, password).await?
        };
        self.session
            .set(&credential)
            .await
            .map_err(ClientError::Session)
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<String, ClientError> {
        if self.dev_backend.is_some() {
            return Ok("User created successfully.".to_string());
        }
        let response = self.remote.register(username, password).await?;
        Ok(response.message)
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        self.session.clear().await.map_err(ClientError::Session)
    }

    pub async fn list_tasks(&self, scope: &TaskScope) -> Result<Vec<Task>, ClientError> {
        let credential = self.credential().await?;
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.list_tasks(scope)?);
        }
        Ok(self.remote.list_tasks(&credential, scope).await?)
    }

    pub async fn create_task(
        &self,
        text: &str,
        group: Option<GroupId>,
    ) -> Result<Task, ClientError> {
        let credential = self.credential().await?;
        let new_task = NewTask {
            text: text.to_string(),
            group,
        };
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.create_task(&new_task)?);
        }
        Ok(self.remote.create_task(&credential, &new_task).await?)
    }

    pub async fn update_task(&self, id: TaskId, update: &UpdateTask) -> Result<Task, ClientError> {
        let credential = self.credential().await?;
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.update_task(id, update)?);
        }
        Ok(self.remote.update_task(&credential, id, update).await?)
    }

    pub async fn delete_task(&self, id: TaskId) -> Result<(), ClientError> {
        let credential = self.credential().await?;
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.delete_task(id)?);
        }
        Ok(self.remote.delete_task(&credential, id).await?)
    }

    pub async fn list_groups(&self) -> Result<Vec<Group>, ClientError> {
        let credential = self.credential().await?;
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.list_groups()?);
        }
        Ok(self.remote.list_groups(&credential).await?)
    }

    pub async fn create_group(&self, name: &str) -> Result<Group, ClientError> {
        let credential = self.credential().await?;
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.create_group(name)?);
        }
        Ok(self.remote.create_group(&credential, name).await?)
    }

    pub async fn rename_group(&self, id: GroupId, name: &str) -> Result<Group, ClientError> {
        let credential = self.credential().await?;
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.rename_group(id, name)?);
        }
        Ok(self.remote.rename_group(&credential, id, name).await?)
    }

    pub async fn delete_group(&self, id: GroupId) -> Result<(), ClientError> {
        let credential = self.credential().await?;
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.delete_group(id)?);
        }
        Ok(self.remote.delete_group(&credential, id).await?)
    }

    pub async fn list_members(&self, id: GroupId) -> Result<Vec<MemberRef>, ClientError> {
        let credential = self.credential().await?;
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.list_members(id)?);
        }
        Ok(self.remote.list_members(&credential, id).await?)
    }

    pub async fn add_member(&self, id: GroupId, username: &str) -> Result<(), ClientError> {
        let credential = self.credential().await?;
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.add_member(id, username)?);
        }
        Ok(self.remote.add_member(&credential, id, username).await?)
    }

    pub async fn remove_member(&self, id: GroupId, username: &str) -> Result<(), ClientError> {
        let credential = self.credential().await?;
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.remove_member(id, username)?);
        }
        Ok(self.remote.remove_member(&credential, id, username).await?)
    }
}

#[async_trait]
impl TaskUpdater for ApiClient {
    async fn update_task(&self, id: TaskId, update: &UpdateTask) -> Result<Task, ClientError> {
        ApiClient::update_task(self, id, update).await
    }
}
