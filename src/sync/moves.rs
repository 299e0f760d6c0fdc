//! Optimistic move orchestration.
//!
//! The two-phase protocol lives here: apply the move to the local board
//! synchronously, release the lock, submit the move to the remote store, and
//! settle the pending handle with the outcome once the response arrives.

use log::{debug, error};

use crate::backend::MoveArgs;
use crate::board::BoardError;
use crate::sync::BoardService;

impl BoardService {
    /// Moves an item to `dest_lane_id` at `dest_index`.
    ///
    /// The local board is updated before the network call goes out, so
    /// readers see the new arrangement immediately. If the remote store
    /// declines the move, the board is restored to the state captured just
    /// before the optimistic mutation and [`BoardError::MoveRejected`] is
    /// returned for the interaction layer to surface.
    ///
    /// The board lock is not held across the network round trip; further
    /// moves may be issued while this one is in flight. Outcomes are matched
    /// to moves by handle, and a rejection whose rollback target has been
    /// superseded by a newer move leaves the newer state in place (use
    /// [`BoardService::reload`](crate::sync::BoardService::reload) to
    /// re-converge with the server in that case).
    ///
    /// # Errors
    /// [`BoardError::InvalidMove`] for an unknown item or lane (no state
    /// change, nothing submitted), [`BoardError::MoveRejected`] when the
    /// remote store fails or declines.
    pub async fn move_item(
        &self,
        item_id: &str,
        dest_lane_id: &str,
        dest_index: usize,
    ) -> Result<(), BoardError> {
        // Apply optimistically and capture the pending handle, then release
        // the lock before going to the network
        let ticket = {
            let mut guard = self.board.lock().await;
            let board = guard
                .as_mut()
                .ok_or_else(|| BoardError::InvalidMove("board not loaded".to_string()))?;
            board.move_item(item_id, dest_lane_id, dest_index)?
        };

        if !ticket.changed {
            debug!("move of {item_id} was a no-op, skipping remote submission");
            return Ok(());
        }

        let args = MoveArgs {
            dest_lane_remote_id: dest_lane_id.to_string(),
            dest_index,
        };

        match self.backend.submit_move(item_id, args).await {
            Ok(()) => {
                let mut guard = self.board.lock().await;
                if let Some(board) = guard.as_mut() {
                    board.confirm_move(ticket.handle);
                }
                self.logger
                    .log(format!("move confirmed: {item_id} -> {dest_lane_id}[{dest_index}]"));
                Ok(())
            }
            Err(e) => {
                error!("❌ Remote store rejected move of {item_id}: {e}");
                let rolled_back = {
                    let mut guard = self.board.lock().await;
                    match guard.as_mut() {
                        Some(board) => board.reject_move(ticket.handle).rolled_back,
                        None => false,
                    }
                };
                self.logger.log(format!(
                    "move rejected: {item_id} -> {dest_lane_id}[{dest_index}] (rolled back: {rolled_back})"
                ));
                Err(BoardError::MoveRejected(e.to_string()))
            }
        }
    }
}
