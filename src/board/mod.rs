//! In-memory board model and the optimistic move protocol.
//!
//! A [`Board`] partitions items into ordered lanes and applies moves
//! synchronously, before the remote store has confirmed them. Every applied
//! move captures a full snapshot of the prior lane arrangement keyed by an
//! opaque handle; when the remote store later reports the outcome, the move
//! is either confirmed (snapshot discarded) or rejected (snapshot restored,
//! unless a newer move has made it stale).

pub mod item;
pub mod lane;
pub mod moves;

pub use item::{Item, ItemPayload};
pub use lane::Lane;
pub use moves::{MoveHandle, MoveTicket, RejectOutcome};

use std::collections::{HashMap, HashSet};

use log::{debug, info, warn};
use thiserror::Error;

use crate::backend::{BackendItem, BackendLane};
use crate::constants::{SYNTHETIC_LANE_ID, SYNTHETIC_LANE_NAME};
use moves::PendingMove;

/// Errors raised by board operations.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Malformed initial data; fatal to `initialize`.
    #[error("Inconsistent board data: {0}")]
    InconsistentData(String),

    /// Unknown item or lane at call time; fatal to that call, no state change.
    #[error("Invalid move: {0}")]
    InvalidMove(String),

    /// The remote store declined the move; the board has been restored to its
    /// last known-good state (or left on a newer state if the rollback target
    /// was stale).
    #[error("Move rejected by remote store: {0}")]
    MoveRejected(String),
}

/// The set of all lanes plus a derived item-to-lane index.
///
/// The authoritative location of an item is whichever lane's sequence
/// contains it; the index is maintained alongside purely as a lookup
/// accelerator and is rebuilt whenever a snapshot is restored.
pub struct Board {
    lanes: Vec<Lane>,
    /// Derived index: item id -> containing lane id.
    index: HashMap<String, String>,
    /// Mutation counter; bumped by every applied move and every rollback.
    generation: u64,
    pending: HashMap<MoveHandle, PendingMove>,
}

impl Board {
    /// Build a board from server-provided lane definitions and items.
    ///
    /// Lanes are ordered by their display rank, items within each lane by the
    /// server-supplied sequence key (arrival order where absent). Items that
    /// reference a lane missing from `lanes` land in a synthetic lane ranked
    /// after all server lanes, so no data silently disappears.
    ///
    /// # Errors
    /// Returns [`BoardError::InconsistentData`] on duplicate lane or item
    /// identifiers.
    pub fn initialize(lanes: Vec<BackendLane>, items: Vec<BackendItem>) -> Result<Self, BoardError> {
        let mut board_lanes: Vec<Lane> = Vec::with_capacity(lanes.len());
        for lane in &lanes {
            if board_lanes.iter().any(|l| l.id == lane.remote_id) {
                return Err(BoardError::InconsistentData(format!(
                    "duplicate lane identifier: {}",
                    lane.remote_id
                )));
            }
            board_lanes.push(Lane::new(&lane.remote_id, &lane.name, lane.order_index));
        }
        board_lanes.sort_by_key(|lane| lane.rank);

        // Partition items into their declared lanes, preserving arrival order
        // for the ordering fallback below.
        let mut by_lane: HashMap<String, Vec<BackendItem>> = HashMap::new();
        let mut seen_items: HashSet<String> = HashSet::new();
        let mut needs_synthetic = false;
        for item in items {
            if !seen_items.insert(item.remote_id.clone()) {
                return Err(BoardError::InconsistentData(format!(
                    "duplicate item identifier: {}",
                    item.remote_id
                )));
            }
            let lane_id = if board_lanes.iter().any(|l| l.id == item.lane_remote_id) {
                item.lane_remote_id.clone()
            } else {
                warn!(
                    "item {} references unknown lane {}, placing in synthetic lane",
                    item.remote_id, item.lane_remote_id
                );
                needs_synthetic = true;
                SYNTHETIC_LANE_ID.to_string()
            };
            by_lane.entry(lane_id).or_default().push(item);
        }

        if needs_synthetic && !board_lanes.iter().any(|l| l.id == SYNTHETIC_LANE_ID) {
            let rank = board_lanes.iter().map(|l| l.rank).max().unwrap_or(0) + 1;
            board_lanes.push(Lane::new(SYNTHETIC_LANE_ID, SYNTHETIC_LANE_NAME, rank));
        }

        for lane in &mut board_lanes {
            let mut backend_items = by_lane.remove(&lane.id).unwrap_or_default();
            backend_items.sort_by_key(|item| item.order_index.unwrap_or(0));
            lane.items = backend_items
                .into_iter()
                .enumerate()
                .map(|(position, item)| Item::from_backend(item, &lane.id, position))
                .collect();
        }

        let mut board = Self {
            lanes: board_lanes,
            index: HashMap::new(),
            generation: 0,
            pending: HashMap::new(),
        };
        board.rebuild_index();
        Ok(board)
    }

    /// All lanes in display order.
    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    /// Look up a lane by identifier.
    pub fn lane(&self, lane_id: &str) -> Option<&Lane> {
        self.lanes.iter().find(|lane| lane.id == lane_id)
    }

    /// Identifier of the lane currently containing `item_id`.
    pub fn lane_of(&self, item_id: &str) -> Option<&str> {
        self.index.get(item_id).map(String::as_str)
    }

    /// Look up an item anywhere on the board.
    pub fn item(&self, item_id: &str) -> Option<&Item> {
        let lane_id = self.index.get(item_id)?;
        self.lane(lane_id)?.items.iter().find(|item| item.id == item_id)
    }

    /// Total number of items across all lanes.
    pub fn item_count(&self) -> usize {
        self.lanes.iter().map(Lane::len).sum()
    }

    /// Number of moves still awaiting a remote outcome.
    pub fn pending_moves(&self) -> usize {
        self.pending.len()
    }

    /// Apply a move optimistically.
    ///
    /// Removes the item from its current lane, inserts it into the
    /// destination lane at `dest_index` (clamped to the valid range), and
    /// renumbers position ranks in both affected lanes. The mutation is
    /// visible to readers immediately, before any network call; the prior
    /// arrangement is retained under the returned handle until the remote
    /// outcome arrives via [`Board::confirm_move`] or [`Board::reject_move`].
    ///
    /// Moving an item to its current lane and index is a no-op: the returned
    /// ticket has `changed == false` and nothing was captured or renumbered.
    ///
    /// # Errors
    /// Returns [`BoardError::InvalidMove`] for an unknown item or lane; the
    /// board is untouched in that case.
    pub fn move_item(
        &mut self,
        item_id: &str,
        dest_lane_id: &str,
        dest_index: usize,
    ) -> Result<MoveTicket, BoardError> {
        let source_lane_id = self
            .index
            .get(item_id)
            .cloned()
            .ok_or_else(|| BoardError::InvalidMove(format!("unknown item: {item_id}")))?;

        let dest_pos = self
            .lanes
            .iter()
            .position(|lane| lane.id == dest_lane_id)
            .ok_or_else(|| BoardError::InvalidMove(format!("unknown lane: {dest_lane_id}")))?;
        let clamped = dest_index.min(self.lanes[dest_pos].len());

        let source_pos = self
            .lanes
            .iter()
            .position(|lane| lane.id == source_lane_id)
            .ok_or_else(|| BoardError::InvalidMove(format!("unknown item: {item_id}")))?;
        let source_index = self.lanes[source_pos]
            .position_of(item_id)
            .ok_or_else(|| BoardError::InvalidMove(format!("unknown item: {item_id}")))?;

        if source_pos == dest_pos && source_index == clamped {
            debug!("move of {item_id} targets its current position, nothing to do");
            return Ok(MoveTicket {
                handle: MoveHandle::new(),
                changed: false,
            });
        }

        let prior = self.lanes.clone();

        let mut item = self.lanes[source_pos].items.remove(source_index);
        item.lane_id = dest_lane_id.to_string();

        let dest_lane = &mut self.lanes[dest_pos];
        // Removal may have shifted the valid range when staying in one lane.
        let insert_at = clamped.min(dest_lane.len());
        dest_lane.items.insert(insert_at, item);
        dest_lane.renumber();

        if source_pos != dest_pos {
            self.lanes[source_pos].renumber();
        }

        self.index.insert(item_id.to_string(), dest_lane_id.to_string());
        self.generation += 1;

        let handle = MoveHandle::new();
        self.pending.insert(
            handle,
            PendingMove {
                prior,
                generation: self.generation,
                item_id: item_id.to_string(),
            },
        );
        debug!("moved {item_id} to {dest_lane_id}[{insert_at}], awaiting remote outcome");

        Ok(MoveTicket { handle, changed: true })
    }

    /// The remote store acknowledged the move.
    ///
    /// No local state change, the optimistic mutation already happened; this
    /// drops the retained snapshot and serves as the telemetry hook.
    pub fn confirm_move(&mut self, handle: MoveHandle) {
        match self.pending.remove(&handle) {
            Some(pending) => debug!("move of {} confirmed by remote store", pending.item_id),
            None => warn!("confirmation for unknown or already-settled move handle"),
        }
    }

    /// The remote store declined the move.
    ///
    /// Restores the snapshot captured when the move was applied, unless a
    /// newer move has been applied since; such a snapshot is stale and
    /// restoring it would undo a later legitimate move. Staleness is decided
    /// by comparing the generation recorded on the pending move against the
    /// board's current generation, never by item identity.
    pub fn reject_move(&mut self, handle: MoveHandle) -> RejectOutcome {
        match self.pending.remove(&handle) {
            None => {
                warn!("rejection for unknown or already-settled move handle");
                RejectOutcome { rolled_back: false }
            }
            Some(pending) => {
                if pending.generation == self.generation {
                    self.lanes = pending.prior;
                    self.rebuild_index();
                    self.generation += 1;
                    info!("move of {} rejected, board restored to prior state", pending.item_id);
                    RejectOutcome { rolled_back: true }
                } else {
                    warn!(
                        "move of {} rejected but its snapshot is stale, keeping current state",
                        pending.item_id
                    );
                    RejectOutcome { rolled_back: false }
                }
            }
        }
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for lane in &self.lanes {
            for item in &lane.items {
                self.index.insert(item.id.clone(), lane.id.clone());
            }
        }
    }
}
