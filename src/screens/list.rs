//! The list/create screen.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::notice::Notices;
use super::Requests;
use super::edit::EditArgs;
use crate::api::TaskClient;
use crate::config::Config;
use crate::error::{ApiError, ValidationError};
use crate::models::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    Idle,
    Loading,
    /// An error notification is showing; reverts to idle when it expires.
    ErrorShown,
}

/// Completion of a request started by the list screen.
#[derive(Debug)]
pub enum ListEvent {
    Loaded(Result<Vec<Task>, ApiError>),
    Created(Result<Task, ApiError>),
    StatusChanged(Result<Task, ApiError>),
    Deleted(Result<(), ApiError>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Treatment {
    Completed,
    Pending,
}

/// What the per-item status button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAction {
    Complete,
    Reopen,
}
impl StatusAction {
    pub fn label(self) -> &'static str {
        match self {
            StatusAction::Complete => "Complete",
            StatusAction::Reopen => "Reopen",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow<'a> {
    pub task: &'a Task,
    pub treatment: Treatment,
    pub action: StatusAction,
}
impl<'a> TaskRow<'a> {
    pub fn new(task: &'a Task) -> Self {
        if task.is_completed {
            Self {
                task,
                treatment: Treatment::Completed,
                action: StatusAction::Reopen,
            }
        } else {
            Self {
                task,
                treatment: Treatment::Pending,
                action: StatusAction::Complete,
            }
        }
    }
}

#[derive(Debug)]
pub struct ListScreen {
    client: Arc<TaskClient>,
    tasks: Vec<Task>,
    title: String,
    description: String,
    notices: Notices,
    report_refresh_failures: bool,
    requests: Requests<ListEvent>,
}
impl ListScreen {
    pub fn new(client: Arc<TaskClient>, config: &Config) -> Self {
        Self {
            client,
            tasks: Vec::new(),
            title: String::new(),
            description: String::new(),
            notices: Notices::new(config.notice_ttl),
            report_refresh_failures: config.report_refresh_failures,
            requests: Requests::new(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }
    pub fn rows(&self) -> impl Iterator<Item = TaskRow<'_>> {
        self.tasks.iter().map(TaskRow::new)
    }
    pub fn title(&self) -> &str {
        &self.title
    }
    pub fn description(&self) -> &str {
        &self.description
    }
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }
    pub fn notices(&self) -> &Notices {
        &self.notices
    }
    pub fn in_flight(&self) -> usize {
        self.requests.in_flight()
    }

    pub fn state(&self) -> ListState {
        if self.notices.has_active_error() {
            ListState::ErrorShown
        } else if self.requests.in_flight() > 0 {
            ListState::Loading
        } else {
            ListState::Idle
        }
    }

    /// Screen became visible, initially or on return from editing.
    pub fn on_visible(&mut self) {
        self.reload();
    }

    fn reload(&mut self) {
        let client = Arc::clone(&self.client);
        self.requests
            .spawn(async move { client.list().await }, ListEvent::Loaded);
    }

    pub fn add(&mut self) -> Result<(), ValidationError> {
        if self.title.is_empty() {
            self.notices.error(ValidationError::EmptyTitle.to_string());
            return Err(ValidationError::EmptyTitle);
        }
        let task = Task::new(self.title.clone(), self.description.clone());
        let client = Arc::clone(&self.client);
        self.requests
            .spawn(async move { client.create(&task).await }, ListEvent::Created);
        Ok(())
    }

    /// Flips the completion flag of the row at `index`. Returns false if there is no such row.
    pub fn toggle_status(&mut self, index: usize) -> bool {
        let Some(task) = self.tasks.get(index) else {
            return false;
        };
        let updated = task.toggled();
        let client = Arc::clone(&self.client);
        self.requests.spawn(
            async move {
                let id = updated.id.ok_or(ApiError::MissingId)?;
                client.update(id, &updated).await
            },
            ListEvent::StatusChanged,
        );
        true
    }

    pub fn delete(&mut self, index: usize) -> bool {
        let Some(id) = self.tasks.get(index).map(|t| t.id) else {
            return false;
        };
        let client = Arc::clone(&self.client);
        self.requests.spawn(
            async move {
                let id = id.ok_or(ApiError::MissingId)?;
                client.delete(id).await
            },
            ListEvent::Deleted,
        );
        true
    }

    /// Everything the edit screen needs for the row at `index`.
    pub fn open(&self, index: usize) -> Option<EditArgs> {
        let task = self.tasks.get(index)?;
        Some(EditArgs {
            id: task.id?,
            title: task.title.clone(),
            description: task.description.clone(),
            is_completed: task.is_completed,
        })
    }

    pub async fn next_event(&mut self) -> Option<ListEvent> {
        self.requests.next().await
    }

    pub fn apply(&mut self, event: ListEvent) {
        match event {
            ListEvent::Loaded(Ok(tasks)) => {
                debug!(count = tasks.len(), "task list loaded");
                self.tasks = tasks;
            }
            ListEvent::Loaded(Err(e)) => {
                warn!(error = %e, "task list refresh failed");
                if self.report_refresh_failures {
                    self.notices.error(format!("Error: {e}"));
                }
            }
            ListEvent::Created(Ok(task)) => {
                info!(id = ?task.id, "task created");
                self.title.clear();
                self.description.clear();
                self.notices.info("Task added");
                self.reload();
            }
            ListEvent::Created(Err(e)) => {
                warn!(error = %e, "task create failed");
                self.notices.error(format!("Error: {e}"));
            }
            ListEvent::StatusChanged(Ok(task)) => {
                info!(id = ?task.id, completed = task.is_completed, "task status changed");
                self.reload();
            }
            ListEvent::StatusChanged(Err(e)) => {
                warn!(error = %e, "task status update failed");
                self.notices.error(format!("Update failed: {e}"));
            }
            ListEvent::Deleted(Ok(())) => {
                info!("task deleted");
                self.notices.info("Deleted");
                self.reload();
            }
            ListEvent::Deleted(Err(e)) => {
                warn!(error = %e, "task delete failed");
                self.notices.error(format!("Delete failed: {e}"));
            }
        }
    }

    /// Applies completions until no request is in flight, including the
    /// reloads that successful mutations trigger.
    pub async fn settle(&mut self) {
        while self.requests.in_flight() > 0 {
            match self.next_event().await {
                Some(event) => self.apply(event),
                None => break,
            }
        }
    }
}
