use uuid::Uuid;

use super::lane::Lane;

/// Opaque handle identifying one optimistic move.
///
/// Confirmations and rejections from the remote store are matched to their
/// originating move through this handle, never through item identity, so
/// out-of-order network responses cannot touch unrelated moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MoveHandle(Uuid);

impl MoveHandle {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Result of an optimistic move application.
///
/// `changed` is false when the move targeted the item's current lane and
/// index; nothing was mutated and no network call is needed for it.
#[derive(Clone, Copy, Debug)]
pub struct MoveTicket {
    pub handle: MoveHandle,
    pub changed: bool,
}

/// Result of a rejection: whether the prior snapshot was restored.
///
/// `rolled_back` is false when the snapshot had gone stale (a later move was
/// applied in the meantime) or the handle was already settled.
#[derive(Clone, Copy, Debug)]
pub struct RejectOutcome {
    pub rolled_back: bool,
}

/// A move awaiting its remote outcome.
///
/// `generation` is the board mutation counter right after this move was
/// applied; the snapshot may only be restored while it is still current.
pub(crate) struct PendingMove {
    pub prior: Vec<Lane>,
    pub generation: u64,
    pub item_id: String,
}
