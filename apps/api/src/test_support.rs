//! Stub Anthropic endpoint for tests. Binds an ephemeral local port, answers every
//! request with a fixed status and body, and records what it received.

use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub api_key: Option<String>,
    pub version: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    reply: Value,
    seen: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct StubUpstream {
    addr: std::net::SocketAddr,
    seen: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubUpstream {
    pub async fn new(status: StatusCode, reply: Value) -> Self {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            status,
            reply,
            seen: seen.clone(),
        };
        let app = Router::new()
            .route("/v1/messages", post(handle_messages))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, seen }
    }

    /// A successful Messages API reply carrying a single text block.
    pub async fn text_reply(text: &str) -> Self {
        Self::new(
            StatusCode::OK,
            json!({
                "id": "msg_test",
                "type": "message",
                "role": "assistant",
                "content": [{ "type": "text", "text": text }],
                "usage": { "input_tokens": 12, "output_tokens": 34 }
            }),
        )
        .await
    }

    pub fn url(&self) -> String {
        format!("http://{}/v1/messages", self.addr)
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.seen.lock().await.clone()
    }
}

async fn handle_messages(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    state.seen.lock().await.push(RecordedRequest {
        api_key: header("x-api-key"),
        version: header("anthropic-version"),
        body,
    });
    (state.status, Json(state.reply.clone()))
}
