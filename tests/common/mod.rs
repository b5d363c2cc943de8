//! Mock nodes for integration tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

use ws_health_exporter::health::NodeEndpoint;
use ws_health_exporter::observability::metrics::GaugeSink;

/// A running mock node.
#[allow(dead_code)]
pub struct MockNode {
    pub endpoint: NodeEndpoint,
    /// Raw request texts received, in order.
    pub requests: Arc<Mutex<Vec<String>>>,
}

/// Start a websocket node answering `system_health` and `system_syncState`
/// with the given `result` members.
pub async fn start_node(health: Value, sync: Value) -> MockNode {
    start_scripted_node(move |method| match method {
        "system_health" => json!({"jsonrpc": "2.0", "id": 1, "result": health}).to_string(),
        "system_syncState" => json!({"jsonrpc": "2.0", "id": 1, "result": sync}).to_string(),
        other => json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": -32601, "message": format!("Method not found: {other}")}
        })
        .to_string(),
    })
    .await
}

/// Start a websocket node that answers each request with `reply(method)`.
pub async fn start_scripted_node<F>(reply: F) -> MockNode
where
    F: Fn(&str) -> String + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let reply = Arc::new(reply);

    let recorded = requests.clone();
    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            let reply = reply.clone();
            let recorded = recorded.clone();
            tokio::spawn(async move {
                let Ok(mut ws) = accept_async(socket).await else {
                    return;
                };
                while let Some(Ok(message)) = ws.next().await {
                    let Message::Text(text) = message else {
                        continue;
                    };
                    recorded.lock().unwrap().push(text.as_str().to_string());
                    let method = serde_json::from_str::<Value>(text.as_str())
                        .ok()
                        .and_then(|v| v["method"].as_str().map(String::from))
                        .unwrap_or_default();
                    if ws.send(Message::text(reply(&method))).await.is_err() {
                        break;
                    }
                }
            });
        }
    });

    MockNode {
        endpoint: endpoint(addr),
        requests,
    }
}

/// A node that accepts TCP connections but never completes the handshake.
#[allow(dead_code)]
pub async fn start_silent_node() -> NodeEndpoint {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    endpoint(addr)
}

/// A node that completes the websocket handshake, then reads requests and
/// never answers them.
#[allow(dead_code)]
pub async fn start_mute_node() -> MockNode {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));

    let recorded = requests.clone();
    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            let recorded = recorded.clone();
            tokio::spawn(async move {
                let Ok(mut ws) = accept_async(socket).await else {
                    return;
                };
                while let Some(Ok(message)) = ws.next().await {
                    if let Message::Text(text) = message {
                        recorded.lock().unwrap().push(text.as_str().to_string());
                    }
                }
            });
        }
    });

    MockNode {
        endpoint: endpoint(addr),
        requests,
    }
}

/// A healthy node that sends a Ping before every reply and drops the TCP
/// connection, without a close handshake, right after `system_syncState`.
#[allow(dead_code)]
pub async fn start_pinging_node(health: Value, sync: Value) -> MockNode {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));

    let recorded = requests.clone();
    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            let recorded = recorded.clone();
            let (health, sync) = (health.clone(), sync.clone());
            tokio::spawn(async move {
                let Ok(mut ws) = accept_async(socket).await else {
                    return;
                };
                while let Some(Ok(message)) = ws.next().await {
                    let Message::Text(text) = message else {
                        continue;
                    };
                    recorded.lock().unwrap().push(text.as_str().to_string());
                    let sync_request = text.as_str().contains("system_syncState");
                    let result = if sync_request { &sync } else { &health };
                    let reply = json!({"jsonrpc": "2.0", "id": 1, "result": result});

                    if ws.send(Message::Ping(b"keepalive".to_vec().into())).await.is_err()
                        || ws.send(Message::text(reply.to_string())).await.is_err()
                    {
                        return;
                    }
                    if sync_request {
                        // Dropping the stream closes the socket without a Close frame.
                        return;
                    }
                }
            });
        }
    });

    MockNode {
        endpoint: endpoint(addr),
        requests,
    }
}

/// An address nobody listens on.
#[allow(dead_code)]
pub async fn unreachable_endpoint() -> NodeEndpoint {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    endpoint(addr)
}

/// `system_health` result.
pub fn health(is_syncing: bool, peers: u64) -> Value {
    json!({"isSyncing": is_syncing, "peers": peers, "shouldHavePeers": true})
}

/// `system_syncState` result.
pub fn sync_state(highest: u64, current: u64) -> Value {
    json!({"startingBlock": 0, "highestBlock": highest, "currentBlock": current})
}

fn endpoint(addr: SocketAddr) -> NodeEndpoint {
    NodeEndpoint::new(format!("ws://{addr}"))
}

/// In-memory gauge sink. Clones share the recorded values.
#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct RecordingGauges {
    values: Arc<Mutex<Vec<(String, bool)>>>,
}

#[allow(dead_code)]
impl RecordingGauges {
    /// Latest value per URL.
    pub fn get(&self, endpoint: &NodeEndpoint) -> Option<bool> {
        self.values
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(url, _)| url == endpoint.as_str())
            .map(|(_, alive)| *alive)
    }
}

impl GaugeSink for RecordingGauges {
    fn set_node_alive(&self, endpoint: &NodeEndpoint, alive: bool) {
        self.values
            .lock()
            .unwrap()
            .push((endpoint.to_string(), alive));
    }
}
