//! Fake cluster serving the snapshot API on a local port

use std::collections::HashSet;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::Router;
use chrono::{Duration, Utc};
use parking_lot::Mutex;
use serde_json::{json, Value};

#[derive(Default)]
struct ClusterState {
    repository: String,
    snapshots: Vec<Value>,
    list_status: Option<StatusCode>,
    raw_body: Option<String>,
    failing_deletes: HashSet<String>,
    delete_requests: Vec<String>,
    list_requests: usize,
}

/// Snapshot repository backed by memory, served over HTTP
#[derive(Clone)]
pub struct FakeCluster {
    state: Arc<Mutex<ClusterState>>,
    endpoint: String,
}

impl FakeCluster {
    /// Serve `snapshots` as repository `repository` on 127.0.0.1
    pub async fn start(repository: &str, snapshots: Vec<Value>) -> Self {
        let state = Arc::new(Mutex::new(ClusterState {
            repository: repository.to_string(),
            snapshots,
            ..Default::default()
        }));

        let app = Router::new()
            .route("/_cat/snapshots/:repo", get(list))
            .route("/_snapshot/:repo/:id", delete(remove))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake cluster");
        let addr = listener.local_addr().expect("Fake cluster has no address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Fake cluster stopped");
        });

        Self {
            state,
            endpoint: addr.to_string(),
        }
    }

    /// `host:port` to pass as `--endpoint`
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Answer deletion of `id` with 500
    pub fn fail_delete(&self, id: &str) {
        self.state.lock().failing_deletes.insert(id.to_string());
    }

    /// Answer the list call with `status`
    pub fn fail_list(&self, status: StatusCode) {
        self.state.lock().list_status = Some(status);
    }

    /// Answer the list call with `body` verbatim
    pub fn serve_raw_body(&self, body: &str) {
        self.state.lock().raw_body = Some(body.to_string());
    }

    /// Ids of every DELETE received, in order
    pub fn delete_requests(&self) -> Vec<String> {
        self.state.lock().delete_requests.clone()
    }

    pub fn list_requests(&self) -> usize {
        self.state.lock().list_requests
    }

    /// Ids still stored
    pub fn remaining_ids(&self) -> Vec<String> {
        self.state
            .lock()
            .snapshots
            .iter()
            .filter_map(|s| s["id"].as_str().map(str::to_string))
            .collect()
    }
}

async fn list(State(state): State<Arc<Mutex<ClusterState>>>, Path(repo): Path<String>) -> Response {
    let mut state = state.lock();
    state.list_requests += 1;

    if repo != state.repository {
        return (
            StatusCode::NOT_FOUND,
            json!({"error": "repository_missing_exception", "status": 404}).to_string(),
        )
            .into_response();
    }
    if let Some(status) = state.list_status {
        return (status, json!({"error": "unavailable"}).to_string()).into_response();
    }
    if let Some(body) = &state.raw_body {
        return (StatusCode::OK, body.clone()).into_response();
    }

    (StatusCode::OK, Value::Array(state.snapshots.clone()).to_string()).into_response()
}

async fn remove(
    State(state): State<Arc<Mutex<ClusterState>>>,
    Path((repo, id)): Path<(String, String)>,
) -> Response {
    let mut state = state.lock();
    state.delete_requests.push(id.clone());

    if repo != state.repository {
        return StatusCode::NOT_FOUND.into_response();
    }
    if state.failing_deletes.contains(&id) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    let before = state.snapshots.len();
    state.snapshots.retain(|s| s["id"] != id.as_str());
    if state.snapshots.len() == before {
        return StatusCode::NOT_FOUND.into_response();
    }

    (StatusCode::OK, json!({"acknowledged": true}).to_string()).into_response()
}

/// Builders for `_cat/snapshots` records
pub struct SnapshotFixture;

impl SnapshotFixture {
    /// Record for a snapshot that ended `age` ago
    pub fn aged(id: &str, age: Duration) -> Value {
        let end = Utc::now() - age;
        let start = end - Duration::minutes(2);
        json!({
            "id": id,
            "status": "SUCCESS",
            "start_epoch": start.timestamp().to_string(),
            "start_time": start.format("%H:%M:%S").to_string(),
            "end_epoch": end.timestamp().to_string(),
            "end_time": end.format("%H:%M:%S").to_string(),
            "duration": "2m",
            "indices": "4",
            "successful_shards": "8",
            "failed_shards": "0",
            "total_shards": "8"
        })
    }

    /// `old` snapshots past `days` (oldest first) then `fresh` recent ones
    pub fn catalog(days: i64, old: usize, fresh: usize) -> Vec<Value> {
        let mut snapshots = Vec::with_capacity(old + fresh);
        for i in 0..old {
            snapshots.push(Self::aged(
                &format!("old-{i}"),
                Duration::days(days + 1 + i as i64),
            ));
        }
        for i in 0..fresh {
            snapshots.push(Self::aged(
                &format!("fresh-{i}"),
                Duration::hours(1 + i as i64),
            ));
        }
        snapshots
    }
}
