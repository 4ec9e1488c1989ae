use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

#[derive(Default)]
struct FakeState {
    rows: BTreeMap<String, String>,
    fail: bool,
    nodes: Value,
}

/// In-process stand-in for an rqlite node's HTTP API, understanding only
/// the statements the record store issues.
pub struct FakeRqlite {
    addr: SocketAddr,
    state: Arc<Mutex<FakeState>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl FakeRqlite {
    pub async fn start() -> Self {
        let state = Arc::new(Mutex::new(FakeState {
            nodes: json!({}),
            ..Default::default()
        }));

        let app = Router::new()
            .route("/db/execute", post(execute))
            .route("/db/query", post(query))
            .route("/nodes", get(nodes))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            state,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn set_failing(&self, fail: bool) {
        self.state.lock().unwrap().fail = fail;
    }

    pub fn set_nodes(&self, nodes: Value) {
        self.state.lock().unwrap().nodes = nodes;
    }

    pub fn row(&self, key: &str) -> Option<String> {
        self.state.lock().unwrap().rows.get(key).cloned()
    }
}

impl Drop for FakeRqlite {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn statement(body: &Value) -> (String, Vec<String>) {
    let parts = body[0].as_array().cloned().unwrap_or_default();
    let sql = parts
        .first()
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let args = parts
        .iter()
        .skip(1)
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect();
    (sql, args)
}

async fn execute(
    State(state): State<Arc<Mutex<FakeState>>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let mut state = state.lock().unwrap();
    if state.fail {
        return Json(json!({"results": [{"error": "database is locked"}]}));
    }

    let (sql, args) = statement(&body);
    if sql.starts_with("INSERT") {
        state.rows.insert(args[0].clone(), args[1].clone());
    } else if sql.starts_with("DELETE") {
        state.rows.remove(&args[0]);
    }
    Json(json!({"results": [{"rows_affected": 1}]}))
}

async fn query(
    State(state): State<Arc<Mutex<FakeState>>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let state = state.lock().unwrap();
    if state.fail {
        return Json(json!({"results": [{"error": "no leader"}]}));
    }

    let (sql, args) = statement(&body);
    let values: Vec<Value> = if sql.contains("WHERE key = ?") {
        state
            .rows
            .get(&args[0])
            .map(|v| vec![json!([v])])
            .unwrap_or_default()
    } else {
        state.rows.values().map(|v| json!([v])).collect()
    };

    if values.is_empty() {
        Json(json!({"results": [{"columns": ["value"], "types": ["text"]}]}))
    } else {
        Json(json!({"results": [{"columns": ["value"], "types": ["text"], "values": values}]}))
    }
}

async fn nodes(State(state): State<Arc<Mutex<FakeState>>>) -> Json<Value> {
    Json(state.lock().unwrap().nodes.clone())
}
