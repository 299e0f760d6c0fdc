//! Backend abstraction layer for the remote item store.
//!
//! This module defines the interface the board synchronization layer uses to
//! talk to a remote task management service, along with common data types and
//! error handling. Transport failures and remote validation failures are both
//! surfaced as errors here; the board layer treats them uniformly as a
//! rejected operation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod rest;

/// Common error types for backend operations.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Backend error: {0}")]
    Other(String),
}

/// Backend-agnostic project representation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BackendProject {
    pub remote_id: String,
    pub name: String,
}

/// Backend-agnostic lane (board column) representation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BackendLane {
    pub remote_id: String,
    pub name: String,
    pub order_index: i32,
}

/// Backend-agnostic board item representation.
///
/// Everything except `remote_id`, `lane_remote_id`, and `order_index` is
/// payload echoed from the server; the board logic never interprets it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BackendItem {
    pub remote_id: String,
    pub title: String,
    pub description: Option<String>,
    pub project_remote_id: String,
    pub lane_remote_id: String,
    pub assignee: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<String>,
    pub tags: Vec<String>,
    pub created_at: Option<String>,
    pub order_index: Option<i32>,
}

/// Arguments for submitting a move to the remote store.
#[derive(Clone, Debug)]
pub struct MoveArgs {
    pub dest_lane_remote_id: String,
    pub dest_index: usize,
}

/// Backend trait that all remote item stores must implement.
///
/// This trait defines the contract the sync layer depends on. Implementations
/// exist for the management REST API; test suites provide in-memory mocks.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Returns the backend type identifier (e.g., "rest").
    fn backend_type(&self) -> &str;

    // Bulk fetch - the three requests a board view session loads from
    async fn fetch_project(&self, project_remote_id: &str) -> Result<BackendProject, BackendError>;
    async fn fetch_lanes(&self) -> Result<Vec<BackendLane>, BackendError>;
    async fn fetch_items(&self, project_remote_id: &str) -> Result<Vec<BackendItem>, BackendError>;

    /// Submit a move command for a single item.
    async fn submit_move(&self, item_remote_id: &str, args: MoveArgs) -> Result<(), BackendError>;
}
