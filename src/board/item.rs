use serde::{Deserialize, Serialize};

use crate::backend::BackendItem;

/// A unit of work tracked on the board.
///
/// `position` is the zero-based rank inside the containing lane and always
/// matches the item's index in that lane's sequence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub lane_id: String,
    pub position: i32,
    pub payload: ItemPayload,
}

/// Task fields echoed from the server.
///
/// The reorder logic never reads these; they ride along so a view layer can
/// render cards without a second fetch.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPayload {
    pub title: String,
    pub description: Option<String>,
    pub assignee: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<String>,
    pub tags: Vec<String>,
    pub created_at: Option<String>,
}

impl Item {
    /// Build an item from its backend representation, placed in `lane_id` at
    /// `position`.
    pub(crate) fn from_backend(backend: BackendItem, lane_id: &str, position: usize) -> Self {
        Self {
            id: backend.remote_id,
            lane_id: lane_id.to_string(),
            position: position as i32,
            payload: ItemPayload {
                title: backend.title,
                description: backend.description,
                assignee: backend.assignee,
                due_date: backend.due_date,
                priority: backend.priority,
                tags: backend.tags,
                created_at: backend.created_at,
            },
        }
    }
}
