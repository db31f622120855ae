//! The edit screen: revises title and description of one persisted task.

use std::sync::Arc;

use tracing::{info, warn};

use super::notice::Notices;
use super::Requests;
use crate::api::TaskClient;
use crate::config::Config;
use crate::error::ApiError;
use crate::models::Task;

/// Fields handed over from the list screen, by value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditArgs {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub is_completed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    Editing,
    Saving,
    Closed,
}

#[derive(Debug)]
pub enum EditEvent {
    Saved(Result<Task, ApiError>),
}

#[derive(Debug)]
pub struct EditScreen {
    client: Arc<TaskClient>,
    id: i64,
    // carried through unchanged
    is_completed: bool,
    title: String,
    description: String,
    state: EditState,
    notices: Notices,
    requests: Requests<EditEvent>,
}
impl EditScreen {
    pub fn new(client: Arc<TaskClient>, config: &Config, args: EditArgs) -> Self {
        Self {
            client,
            id: args.id,
            is_completed: args.is_completed,
            title: args.title,
            description: args.description,
            state: EditState::Editing,
            notices: Notices::new(config.notice_ttl),
            requests: Requests::new(),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
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
    pub fn state(&self) -> EditState {
        self.state
    }
    pub fn is_closed(&self) -> bool {
        self.state == EditState::Closed
    }
    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    /// The record `save` submits.
    pub fn draft(&self) -> Task {
        Task {
            id: Some(self.id),
            title: self.title.clone(),
            description: self.description.clone(),
            is_completed: self.is_completed,
        }
    }

    pub fn save(&mut self) {
        let id = self.id;
        let task = self.draft();
        let client = Arc::clone(&self.client);
        self.state = EditState::Saving;
        self.requests
            .spawn(async move { client.update(id, &task).await }, EditEvent::Saved);
    }

    pub async fn next_event(&mut self) -> Option<EditEvent> {
        self.requests.next().await
    }

    pub fn apply(&mut self, event: EditEvent) {
        match event {
            EditEvent::Saved(Ok(_)) => {
                info!(id = self.id, "task saved");
                self.notices.info("Saved");
                self.state = EditState::Closed;
            }
            EditEvent::Saved(Err(e)) => {
                warn!(id = self.id, error = %e, "task save failed");
                self.notices.error(format!("Error: {e}"));
                if self.state != EditState::Closed {
                    self.state = EditState::Editing;
                }
            }
        }
    }

    pub async fn settle(&mut self) {
        while self.requests.in_flight() > 0 {
            match self.next_event().await {
                Some(event) => self.apply(event),
                None => break,
            }
        }
    }
}
