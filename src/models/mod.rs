use serde::{Deserialize, Serialize};

/// A to-do record as exchanged with the backend.
///
/// `id` is assigned by the server; a task built on the client has none until
/// it is created and the list is reloaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_completed: bool,
}
impl Task {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: description.into(),
            is_completed: false,
        }
    }

    // same record, status flipped
    pub fn toggled(&self) -> Self {
        Self {
            is_completed: !self.is_completed,
            ..self.clone()
        }
    }

    pub fn status_text(&self) -> &'static str {
        if self.is_completed {
            "Status: done"
        } else {
            "Status: in progress"
        }
    }
}
