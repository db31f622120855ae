//! HTTP client for the `/api/tasks` backend.

use reqwest::{Client, Response, Url};
use tracing::debug;

use crate::config::Config;
use crate::error::ApiError;
use crate::models::Task;

const TASKS_PATH: &str = "/api/tasks";

/// One shared client per process; screens hold it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct TaskClient {
    http: Client,
    base_url: String,
}
impl TaskClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| ApiError::InvalidBaseUrl(e.to_string()))?;
        let http = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, TASKS_PATH)
    }
    fn item_url(&self, id: i64) -> String {
        format!("{}{}/{}", self.base_url, TASKS_PATH, id)
    }

    /// All tasks, in the order the server returns them.
    pub async fn list(&self) -> Result<Vec<Task>, ApiError> {
        let response = self.http.get(self.collection_url()).send().await?;
        let response = check("GET", TASKS_PATH, response).await?;
        Ok(response.json().await?)
    }

    /// Persists a new task. Any `id` on `task` is dropped from the body.
    pub async fn create(&self, task: &Task) -> Result<Task, ApiError> {
        let body = Task {
            id: None,
            ..task.clone()
        };
        let response = self.http.post(self.collection_url()).json(&body).send().await?;
        let response = check("POST", TASKS_PATH, response).await?;
        Ok(response.json().await?)
    }

    /// Replaces the whole record stored under `id`.
    pub async fn update(&self, id: i64, task: &Task) -> Result<Task, ApiError> {
        let response = self.http.put(self.item_url(id)).json(task).send().await?;
        let response = check("PUT", &format!("{TASKS_PATH}/{id}"), response).await?;
        Ok(response.json().await?)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let response = self.http.delete(self.item_url(id)).send().await?;
        check("DELETE", &format!("{TASKS_PATH}/{id}"), response).await?;
        Ok(())
    }
}

async fn check(method: &str, path: &str, response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    debug!(method, path, %status, "task api response");
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status { status, body })
}

// Tests
#[cfg(test)]
mod tests {
    use anyhow::Result;
    use reqwest::StatusCode;

    use super::*;
    use crate::fake_backend::FakeBackend;

    async fn setup() -> Result<(FakeBackend, TaskClient)> {
        let backend = FakeBackend::start().await?;
        let client = TaskClient::new(&Config::with_base_url(backend.base_url()))?;
        Ok((backend, client))
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let result = TaskClient::new(&Config::with_base_url("not a url"));
        assert!(matches!(result, Err(ApiError::InvalidBaseUrl(_))));
    }

    #[test]
    fn test_trims_trailing_slash() -> Result<()> {
        let client = TaskClient::new(&Config::with_base_url("http://localhost:5000/"))?;
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.item_url(4), "http://localhost:5000/api/tasks/4");
        Ok(())
    }

    #[tokio::test]
    async fn test_list_keeps_server_order() -> Result<()> {
        let (backend, client) = setup().await?;
        backend.seed(vec![Task::new("b", ""), Task::new("a", ""), Task::new("c", "")]).await;
        let titles: Vec<_> = client.list().await?.into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["b", "a", "c"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_assigns_fresh_id() -> Result<()> {
        let (backend, client) = setup().await?;
        backend.seed(vec![Task::new("old", "")]).await;
        let before = client.list().await?;

        let created = client.create(&Task::new("Buy milk", "")).await?;
        let id = created.id.expect("server assigns an id");
        assert!(before.iter().all(|t| t.id != Some(id)));
        assert_eq!(created.title, "Buy milk");
        assert!(!created.is_completed);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_never_sends_client_id() -> Result<()> {
        let (backend, client) = setup().await?;
        let mut task = Task::new("x", "");
        task.id = Some(999);
        client.create(&task).await?;
        assert_eq!(backend.ids_sent_on_create().await, vec![None]);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_replaces_record() -> Result<()> {
        let (_backend, client) = setup().await?;
        let created = client.create(&Task::new("a", "old")).await?;
        let id = created.id.expect("id");
        let replacement = Task {
            description: "new".to_string(),
            is_completed: true,
            ..created
        };
        let updated = client.update(id, &replacement).await?;
        assert_eq!(updated, replacement);
        assert_eq!(client.list().await?, vec![replacement]);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_removes_task() -> Result<()> {
        let (_backend, client) = setup().await?;
        let id = client.create(&Task::new("a", "")).await?.id.expect("id");
        client.delete(id).await?;
        assert!(client.list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() -> Result<()> {
        let (_backend, client) = setup().await?;
        let err = client.delete(42).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status, .. } if status == StatusCode::NOT_FOUND));
        Ok(())
    }

    #[tokio::test]
    async fn test_server_failure_is_error() -> Result<()> {
        let (backend, client) = setup().await?;
        backend.set_failing(true).await;
        assert!(client.list().await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() -> Result<()> {
        let backend = FakeBackend::start().await?;
        let url = backend.base_url().to_string();
        backend.stop().await;
        let client = TaskClient::new(&Config::with_base_url(url))?;
        assert!(matches!(client.list().await, Err(ApiError::Http(_))));
        Ok(())
    }
}
