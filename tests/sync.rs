use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use laneboard::backend::{Backend, BackendError, BackendItem, BackendLane, BackendProject, MoveArgs};
use laneboard::board::BoardError;
use laneboard::sync::{BoardService, SyncStatus};

fn lane(id: &str, name: &str, rank: i32) -> BackendLane {
    BackendLane {
        remote_id: id.to_string(),
        name: name.to_string(),
        order_index: rank,
    }
}

fn item(id: &str, lane_id: &str, order_index: Option<i32>) -> BackendItem {
    BackendItem {
        remote_id: id.to_string(),
        title: format!("Task {id}"),
        description: None,
        project_remote_id: "p1".to_string(),
        lane_remote_id: lane_id.to_string(),
        assignee: None,
        due_date: None,
        priority: None,
        tags: Vec::new(),
        created_at: None,
        order_index,
    }
}

fn fixture_lanes() -> Vec<BackendLane> {
    vec![lane("todo", "To Do", 0), lane("doing", "In Progress", 1), lane("done", "Done", 2)]
}

fn fixture_items() -> Vec<BackendItem> {
    vec![item("a", "todo", Some(0)), item("b", "todo", Some(1)), item("c", "doing", Some(0))]
}

/// In-memory backend with switchable failure modes.
struct MockBackend {
    lanes: Vec<BackendLane>,
    items: Vec<BackendItem>,
    fail_items: Mutex<bool>,
    fail_moves: Mutex<bool>,
    moves: Mutex<Vec<(String, String, usize)>>,
}

impl MockBackend {
    fn new() -> Self {
        Self {
            lanes: fixture_lanes(),
            items: fixture_items(),
            fail_items: Mutex::new(false),
            fail_moves: Mutex::new(false),
            moves: Mutex::new(Vec::new()),
        }
    }

    fn submitted_moves(&self) -> Vec<(String, String, usize)> {
        self.moves.lock().unwrap().clone()
    }
}

#[async_trait]
impl Backend for MockBackend {
    fn backend_type(&self) -> &str {
        "mock"
    }

    async fn fetch_project(&self, project_remote_id: &str) -> Result<BackendProject, BackendError> {
        Ok(BackendProject {
            remote_id: project_remote_id.to_string(),
            name: "Website Redesign".to_string(),
        })
    }

    async fn fetch_lanes(&self) -> Result<Vec<BackendLane>, BackendError> {
        Ok(self.lanes.clone())
    }

    async fn fetch_items(&self, _project_remote_id: &str) -> Result<Vec<BackendItem>, BackendError> {
        if *self.fail_items.lock().unwrap() {
            return Err(BackendError::Network("connection refused".to_string()));
        }
        Ok(self.items.clone())
    }

    async fn submit_move(&self, item_remote_id: &str, args: MoveArgs) -> Result<(), BackendError> {
        self.moves.lock().unwrap().push((
            item_remote_id.to_string(),
            args.dest_lane_remote_id.clone(),
            args.dest_index,
        ));
        if *self.fail_moves.lock().unwrap() {
            return Err(BackendError::InvalidData("target position out of range".to_string()));
        }
        Ok(())
    }
}

#[tokio::test]
async fn test_load_builds_board_from_bulk_fetch() {
    let backend = Arc::new(MockBackend::new());
    let service = BoardService::new(backend, "p1");

    assert!(!service.is_loaded().await);
    let status = service.load().await.unwrap();

    assert!(matches!(status, SyncStatus::Success));
    assert!(service.is_loaded().await);
    assert!(!service.is_loading().await);
    assert_eq!(service.item_count().await, 3);
    assert_eq!(service.project().await.unwrap().name, "Website Redesign");

    let lanes = service.lanes().await.unwrap();
    let ids: Vec<&str> = lanes.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["todo", "doing", "done"]);
}

#[tokio::test]
async fn test_load_reports_backend_failure() {
    let backend = Arc::new(MockBackend::new());
    *backend.fail_items.lock().unwrap() = true;
    let service = BoardService::new(backend, "p1");

    let status = service.load().await.unwrap();

    assert!(matches!(status, SyncStatus::Error { .. }));
    assert!(!service.is_loaded().await);
    assert!(service.lanes().await.is_err());
}

#[tokio::test]
async fn test_confirmed_move_keeps_optimistic_state() {
    let backend = Arc::new(MockBackend::new());
    let service = BoardService::new(backend.clone(), "p1");
    service.load().await.unwrap();

    service.move_item("a", "doing", 0).await.unwrap();

    assert_eq!(service.lane_of("a").await.as_deref(), Some("doing"));
    assert_eq!(
        backend.submitted_moves(),
        vec![("a".to_string(), "doing".to_string(), 0)]
    );
}

#[tokio::test]
async fn test_noop_move_skips_submission() {
    let backend = Arc::new(MockBackend::new());
    let service = BoardService::new(backend.clone(), "p1");
    service.load().await.unwrap();

    service.move_item("b", "todo", 1).await.unwrap();

    assert!(backend.submitted_moves().is_empty());
}

#[tokio::test]
async fn test_rejected_move_rolls_back() {
    let backend = Arc::new(MockBackend::new());
    *backend.fail_moves.lock().unwrap() = true;
    let service = BoardService::new(backend, "p1");
    service.load().await.unwrap();

    let result = service.move_item("a", "doing", 0).await;

    assert!(matches!(result, Err(BoardError::MoveRejected(_))));
    assert_eq!(service.lane_of("a").await.as_deref(), Some("todo"));

    let lanes = service.lanes().await.unwrap();
    let todo = lanes.iter().find(|l| l.id == "todo").unwrap();
    let ids: Vec<&str> = todo.items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);

    // The rejection went through the telemetry log
    assert!(!service.logger().get_logs().is_empty());
}

#[tokio::test]
async fn test_invalid_move_submits_nothing() {
    let backend = Arc::new(MockBackend::new());
    let service = BoardService::new(backend.clone(), "p1");
    service.load().await.unwrap();

    let result = service.move_item("ghost-id", "doing", 0).await;

    assert!(matches!(result, Err(BoardError::InvalidMove(_))));
    assert!(backend.submitted_moves().is_empty());
    assert_eq!(service.item_count().await, 3);
}

#[tokio::test]
async fn test_move_before_load_is_invalid() {
    let backend = Arc::new(MockBackend::new());
    let service = BoardService::new(backend, "p1");

    let result = service.move_item("a", "doing", 0).await;
    assert!(matches!(result, Err(BoardError::InvalidMove(_))));
}

/// Backend that parks the first move submission until released, so a second
/// move can complete while the first is still in flight.
struct RacyBackend {
    lanes: Vec<BackendLane>,
    items: Vec<BackendItem>,
    entered_first: Notify,
    release_first: Notify,
    calls: Mutex<usize>,
}

impl RacyBackend {
    fn new() -> Self {
        Self {
            lanes: fixture_lanes(),
            items: fixture_items(),
            entered_first: Notify::new(),
            release_first: Notify::new(),
            calls: Mutex::new(0),
        }
    }
}

#[async_trait]
impl Backend for RacyBackend {
    fn backend_type(&self) -> &str {
        "racy-mock"
    }

    async fn fetch_project(&self, project_remote_id: &str) -> Result<BackendProject, BackendError> {
        Ok(BackendProject {
            remote_id: project_remote_id.to_string(),
            name: "Website Redesign".to_string(),
        })
    }

    async fn fetch_lanes(&self) -> Result<Vec<BackendLane>, BackendError> {
        Ok(self.lanes.clone())
    }

    async fn fetch_items(&self, _project_remote_id: &str) -> Result<Vec<BackendItem>, BackendError> {
        Ok(self.items.clone())
    }

    async fn submit_move(&self, _item_remote_id: &str, _args: MoveArgs) -> Result<(), BackendError> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            *calls += 1;
            *calls
        };
        if call == 1 {
            self.entered_first.notify_one();
            self.release_first.notified().await;
            return Err(BackendError::Network("connection reset".to_string()));
        }
        Ok(())
    }
}

#[tokio::test]
async fn test_late_rejection_does_not_undo_newer_move() {
    let backend = Arc::new(RacyBackend::new());
    let service = BoardService::new(backend.clone(), "p1");
    service.load().await.unwrap();

    // First move goes out and its response hangs
    let racing = service.clone();
    let first = tokio::spawn(async move { racing.move_item("a", "doing", 0).await });
    backend.entered_first.notified().await;

    // Second move of the same item completes while the first is in flight
    service.move_item("a", "done", 0).await.unwrap();
    assert_eq!(service.lane_of("a").await.as_deref(), Some("done"));

    // Now the first move's rejection arrives; its snapshot is stale
    backend.release_first.notify_one();
    let result = first.await.unwrap();

    assert!(matches!(result, Err(BoardError::MoveRejected(_))));
    assert_eq!(service.lane_of("a").await.as_deref(), Some("done"));
    assert_eq!(service.item_count().await, 3);

    // A reload re-converges with whatever the server holds
    service.reload().await.unwrap();
    assert_eq!(service.lane_of("a").await.as_deref(), Some("todo"));
}
