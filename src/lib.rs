//! Laneboard - optimistic kanban board state for remote task APIs
//!
//! This library provides the data layer for a kanban board view: lanes of
//! ordered items loaded from a remote task management API, with moves applied
//! optimistically on the client and reconciled against the server once the
//! network responds. The rendering layer (web, TUI, desktop) is intentionally
//! out of scope; a view session owns a [`sync::BoardService`] and drives it
//! with drag events.
//!
//! # Modules
//!
//! The library is organized into several key modules:
//!
//! * [`backend`] - Remote store abstraction and REST implementation
//! * [`board`] - In-memory board model and the move/rollback protocol
//! * [`config`] - Application configuration management
//! * [`logger`] - Logging utilities and the move telemetry log
//! * [`sync`] - Service tying the board to a remote backend

/// Backend abstraction layer for the remote item store
pub mod backend;

/// In-memory board model: lanes, items, and optimistic moves
pub mod board;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// Logging utilities for debugging and move telemetry
pub mod logger;

/// Synchronization service between the board and the remote backend
pub mod sync;

// Re-export the core types for convenient access
pub use board::{Board, BoardError, Item, ItemPayload, Lane, MoveHandle, MoveTicket};
pub use sync::BoardService;
