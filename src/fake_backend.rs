//! In-process backend speaking the `/api/tasks` contract, for tests.

use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tokio::{net::TcpListener, sync::RwLock, task::JoinHandle};

use crate::models::Task;

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    tasks: Vec<Task>,
    // `id` field of every create body received
    create_ids: Vec<Option<i64>>,
    failing: bool,
}
impl Store {
    fn assign(&mut self, mut task: Task) -> Task {
        self.next_id += 1;
        task.id = Some(self.next_id);
        task
    }
}

type SharedStore = Arc<RwLock<Store>>;

pub struct FakeBackend {
    base_url: String,
    state: SharedStore,
    server: JoinHandle<()>,
}
impl FakeBackend {
    /// Serves on an ephemeral localhost port until dropped or stopped.
    pub async fn start() -> Result<Self> {
        let state = SharedStore::default();
        let app = Router::new()
            .route("/api/tasks", get(list_tasks).post(create_task))
            .route("/api/tasks/:id", put(update_task).delete(delete_task))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let base_url = format!("http://{}", listener.local_addr()?);
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Ok(Self {
            base_url,
            state,
            server,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn seed(&self, tasks: Vec<Task>) {
        let mut store = self.state.write().await;
        for task in tasks {
            let task = store.assign(task);
            store.tasks.push(task);
        }
    }

    /// Stores records as given, so rows without an `id` are served back.
    pub async fn seed_unassigned(&self, tasks: Vec<Task>) {
        self.state.write().await.tasks.extend(tasks);
    }

    pub async fn tasks(&self) -> Vec<Task> {
        self.state.read().await.tasks.clone()
    }

    pub async fn ids_sent_on_create(&self) -> Vec<Option<i64>> {
        self.state.read().await.create_ids.clone()
    }

    pub async fn create_requests(&self) -> usize {
        self.state.read().await.create_ids.len()
    }

    /// While set, every route answers 500.
    pub async fn set_failing(&self, failing: bool) {
        self.state.write().await.failing = failing;
    }

    pub async fn stop(mut self) {
        self.server.abort();
        let _ = (&mut self.server).await;
    }
}
impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

// === Routes ===
async fn list_tasks(State(state): State<SharedStore>) -> Result<Json<Vec<Task>>, StatusCode> {
    let store = state.read().await;
    if store.failing {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    Ok(Json(store.tasks.clone()))
}

async fn create_task(
    State(state): State<SharedStore>,
    Json(task): Json<Task>,
) -> Result<(StatusCode, Json<Task>), StatusCode> {
    let mut store = state.write().await;
    if store.failing {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    store.create_ids.push(task.id);
    let task = store.assign(task);
    store.tasks.push(task.clone());
    Ok((StatusCode::CREATED, Json(task)))
}

async fn update_task(
    State(state): State<SharedStore>,
    Path(id): Path<i64>,
    Json(mut task): Json<Task>,
) -> Result<Json<Task>, StatusCode> {
    let mut store = state.write().await;
    if store.failing {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    let slot = store
        .tasks
        .iter_mut()
        .find(|t| t.id == Some(id))
        .ok_or(StatusCode::NOT_FOUND)?;
    task.id = Some(id);
    *slot = task.clone();
    Ok(Json(task))
}

async fn delete_task(State(state): State<SharedStore>, Path(id): Path<i64>) -> StatusCode {
    let mut store = state.write().await;
    if store.failing {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    let before = store.tasks.len();
    store.tasks.retain(|t| t.id != Some(id));
    if store.tasks.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}
