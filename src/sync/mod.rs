//! Synchronization service module for the laneboard library.
//!
//! This module provides the [`BoardService`] struct which ties the in-memory
//! [`Board`] to a remote backend. It performs the bulk load a board view
//! session starts from, exposes fast read access for rendering, and carries
//! the optimistic move orchestration (see [`moves`]).
//!
//! The service acts as the data layer for a board view, offering:
//! - One bulk fetch (project + lane definitions + item list) per session
//! - Immediate, optimistic application of user-initiated moves
//! - Reconciliation with the remote store when move outcomes arrive

pub mod moves;

use anyhow::Result;
use log::{error, info};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::backend::{Backend, BackendProject};
use crate::board::{Board, Lane};
use crate::constants::{LOG_BOARD_READY, LOG_FETCHED_ITEMS, LOG_FETCHED_LANES, LOG_FETCHED_PROJECT};
use crate::logger::Logger;

/// Service that owns a board and keeps it consistent with a remote backend.
///
/// The `BoardService` is the single owner of the board for one view session:
/// it is constructed when the view opens, loaded once, driven by drag events
/// through [`moves`], and dropped when the view closes. Reads return cloned
/// snapshots so the rendering layer never holds the lock across a frame.
///
/// All board mutations funnel through this service on one logical thread of
/// execution; the asynchronous leg of a move (the network round trip) runs
/// with the board lock released, so further user interaction is never blocked
/// behind a slow server.
///
/// # Example
/// ```rust,no_run
/// use laneboard::backend::rest::RestBackend;
/// use laneboard::config::Config;
/// use laneboard::sync::BoardService;
/// use std::sync::Arc;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::load()?;
/// let backend = Arc::new(RestBackend::from_config(&config)?);
/// let service = BoardService::new(backend, "42");
///
/// service.load().await?;
/// let lanes = service.lanes().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct BoardService {
    backend: Arc<dyn Backend>,
    project_remote_id: String,
    board: Arc<Mutex<Option<Board>>>,
    project: Arc<Mutex<Option<BackendProject>>>,
    load_in_progress: Arc<Mutex<bool>>,
    logger: Logger,
}

/// Represents the current status of a load operation.
#[derive(Debug, Clone)]
pub enum SyncStatus {
    /// No load is running
    Idle,
    /// A load operation is currently in progress
    InProgress,
    /// The last load completed successfully
    Success,
    /// The last load failed with an error
    Error {
        /// Human-readable error message describing what went wrong
        message: String,
    },
}

impl BoardService {
    /// Creates a new `BoardService` for one project's board.
    ///
    /// The board is empty until [`BoardService::load`] runs.
    pub fn new(backend: Arc<dyn Backend>, project_remote_id: impl Into<String>) -> Self {
        Self {
            backend,
            project_remote_id: project_remote_id.into(),
            board: Arc::new(Mutex::new(None)),
            project: Arc::new(Mutex::new(None)),
            load_in_progress: Arc::new(Mutex::new(false)),
            logger: Logger::new(),
        }
    }

    /// Checks if a load operation is currently in progress.
    pub async fn is_loading(&self) -> bool {
        *self.load_in_progress.lock().await
    }

    /// Whether the board has been loaded.
    pub async fn is_loaded(&self) -> bool {
        self.board.lock().await.is_some()
    }

    /// The move telemetry log.
    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Performs the bulk fetch and (re)builds the board.
    ///
    /// Fetches the project metadata, the lane-definition list, and the
    /// project's items from the backend, then partitions everything into a
    /// fresh [`Board`]. Only one load can run at a time; a concurrent call
    /// reports `InProgress` without touching the board.
    ///
    /// # Returns
    /// A `SyncStatus` indicating the result of the load
    pub async fn load(&self) -> Result<SyncStatus> {
        // Check if a load is already in progress and acquire the guard
        let mut load_guard = self.load_in_progress.lock().await;
        if *load_guard {
            return Ok(SyncStatus::InProgress);
        }
        *load_guard = true;

        // Release the guard before performing the load to avoid holding it
        // across the network round trips
        drop(load_guard);

        let result = self.perform_load().await;

        {
            let mut load_guard = self.load_in_progress.lock().await;
            *load_guard = false;
        }

        result
    }

    /// Re-runs the bulk fetch, replacing the current board.
    ///
    /// The caller's escape hatch after a rejected move whose rollback target
    /// had gone stale: re-converges local state with the server.
    pub async fn reload(&self) -> Result<SyncStatus> {
        self.load().await
    }

    /// Internal load implementation
    async fn perform_load(&self) -> Result<SyncStatus> {
        info!("🔄 Loading board for project {}...", self.project_remote_id);

        let project = match self.backend.fetch_project(&self.project_remote_id).await {
            Ok(project) => {
                info!("✅ {} ({})", LOG_FETCHED_PROJECT, project.name);
                project
            }
            Err(e) => {
                error!("❌ Failed to fetch project: {e}");
                return Ok(SyncStatus::Error {
                    message: format!("Failed to fetch project: {e}"),
                });
            }
        };

        let lanes = match self.backend.fetch_lanes().await {
            Ok(lanes) => {
                info!("✅ {} ({})", LOG_FETCHED_LANES, lanes.len());
                lanes
            }
            Err(e) => {
                error!("❌ Failed to fetch lanes: {e}");
                return Ok(SyncStatus::Error {
                    message: format!("Failed to fetch lanes: {e}"),
                });
            }
        };

        let items = match self.backend.fetch_items(&self.project_remote_id).await {
            Ok(items) => {
                info!("✅ {} ({})", LOG_FETCHED_ITEMS, items.len());
                items
            }
            Err(e) => {
                error!("❌ Failed to fetch items: {e}");
                return Ok(SyncStatus::Error {
                    message: format!("Failed to fetch items: {e}"),
                });
            }
        };

        let board = match Board::initialize(lanes, items) {
            Ok(board) => board,
            Err(e) => {
                error!("❌ Failed to build board: {e}");
                return Ok(SyncStatus::Error {
                    message: format!("Failed to build board: {e}"),
                });
            }
        };

        info!("✅ {} ({} items)", LOG_BOARD_READY, board.item_count());
        *self.project.lock().await = Some(project);
        *self.board.lock().await = Some(board);

        Ok(SyncStatus::Success)
    }

    /// Project metadata from the last successful load.
    pub async fn project(&self) -> Option<BackendProject> {
        self.project.lock().await.clone()
    }

    /// Snapshot of all lanes in display order.
    ///
    /// # Errors
    /// Returns an error if the board has not been loaded yet
    pub async fn lanes(&self) -> Result<Vec<Lane>> {
        let board = self.board.lock().await;
        board
            .as_ref()
            .map(|b| b.lanes().to_vec())
            .ok_or_else(|| anyhow::anyhow!("Board not loaded"))
    }

    /// Identifier of the lane currently containing `item_id`.
    pub async fn lane_of(&self, item_id: &str) -> Option<String> {
        let board = self.board.lock().await;
        board.as_ref().and_then(|b| b.lane_of(item_id).map(String::from))
    }

    /// Total number of items across all lanes.
    pub async fn item_count(&self) -> usize {
        let board = self.board.lock().await;
        board.as_ref().map(Board::item_count).unwrap_or(0)
    }
}
