//! Websocket probe of a single node.
//!
//! # Protocol
//! ```text
//! connect ──▶ system_health ──▶ system_syncState ──▶ close
//! ```
//! Every step is bounded by the configured timeout. Any failure along the way
//! turns into an unhealthy verdict; nothing escapes [`NodeProbe::probe`].

use std::future::Future;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::net::TcpStream;
use tokio::time;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::health::endpoint::NodeEndpoint;
use crate::health::rpc::{RpcRequest, RpcResponse, SyncState, SystemHealth};
use crate::health::status::{HealthThresholds, NodeStatus};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Why a probe could not produce a [`NodeStatus`].
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("connection failed: {0}")]
    Connect(#[source] tungstenite::Error),

    #[error("timed out after {timeout:?} while {stage}")]
    Timeout { stage: String, timeout: Duration },

    #[error("websocket error during {method}: {source}")]
    Transport {
        method: &'static str,
        #[source]
        source: tungstenite::Error,
    },

    #[error("connection closed before {0} response")]
    Closed(&'static str),

    #[error("malformed {method} response: {source}")]
    Malformed {
        method: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{method} failed: {detail}")]
    Rpc { method: &'static str, detail: String },
}

/// Something that can classify one node as healthy or not.
pub trait NodeProbe: Send + Sync {
    /// Never fails: errors are folded into `false`.
    fn probe(&self, endpoint: &NodeEndpoint) -> impl Future<Output = bool> + Send;
}

/// Production probe speaking JSON-RPC over websocket.
#[derive(Debug, Clone)]
pub struct WsProbe {
    thresholds: HealthThresholds,
}

impl WsProbe {
    pub fn new(thresholds: HealthThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &HealthThresholds {
        &self.thresholds
    }
}

impl NodeProbe for WsProbe {
    fn probe(&self, endpoint: &NodeEndpoint) -> impl Future<Output = bool> + Send {
        async move {
            let timeout = self.thresholds.timeout;
            match query_node(endpoint, timeout).await {
                Ok(status) => {
                    let healthy = status.is_healthy(&self.thresholds);
                    tracing::debug!(
                        url = %endpoint,
                        is_syncing = status.is_syncing,
                        peers = status.peers,
                        should_have_peers = status.should_have_peers,
                        highest_block = status.highest_block,
                        current_block = status.current_block,
                        unsynced_block_drift = %status.unsynced_block_drift(),
                        healthy,
                        "WebSocket check"
                    );
                    healthy
                }
                Err(e) => {
                    tracing::error!(
                        url = %endpoint,
                        timeout_secs = timeout.as_secs(),
                        error = %e,
                        "WebSocket request error"
                    );
                    tracing::debug!(url = %endpoint, error = ?e, "WebSocket request error detail");
                    false
                }
            }
        }
    }
}

/// Connect to `endpoint`, run both RPC calls and close.
pub async fn query_node(endpoint: &NodeEndpoint, timeout: Duration) -> Result<NodeStatus, ProbeError> {
    let (mut ws, _) = time::timeout(timeout, connect_async(endpoint.as_str()))
        .await
        .map_err(|_| ProbeError::Timeout {
            stage: "connecting".to_string(),
            timeout,
        })?
        .map_err(ProbeError::Connect)?;

    let outcome = exchange(&mut ws, timeout).await;

    // Best effort; the verdict is already decided.
    match time::timeout(timeout, ws.close(None)).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::debug!(url = %endpoint, error = %e, "WebSocket close failed"),
        Err(_) => tracing::debug!(url = %endpoint, "WebSocket close timed out"),
    }

    outcome
}

async fn exchange(ws: &mut WsStream, timeout: Duration) -> Result<NodeStatus, ProbeError> {
    let health: SystemHealth = call(ws, RpcRequest::system_health(), timeout).await?;
    let sync: SyncState = call(ws, RpcRequest::system_sync_state(), timeout).await?;
    Ok(NodeStatus::new(health, sync))
}

async fn call<T: DeserializeOwned>(
    ws: &mut WsStream,
    request: RpcRequest,
    timeout: Duration,
) -> Result<T, ProbeError> {
    let method = request.method;

    time::timeout(timeout, ws.send(Message::text(request.to_json())))
        .await
        .map_err(|_| ProbeError::Timeout {
            stage: format!("sending {method}"),
            timeout,
        })?
        .map_err(|source| ProbeError::Transport { method, source })?;

    let payload = recv_payload(ws, method, timeout).await?;

    let response: RpcResponse<T> = serde_json::from_slice(&payload)
        .map_err(|source| ProbeError::Malformed { method, source })?;

    response
        .into_result()
        .map_err(|detail| ProbeError::Rpc { method, detail })
}

/// Next text or binary frame, skipping control frames.
async fn recv_payload(
    ws: &mut WsStream,
    method: &'static str,
    timeout: Duration,
) -> Result<Vec<u8>, ProbeError> {
    loop {
        let next = time::timeout(timeout, ws.next())
            .await
            .map_err(|_| ProbeError::Timeout {
                stage: format!("awaiting {method} response"),
                timeout,
            })?;

        match next {
            None | Some(Ok(Message::Close(_))) => return Err(ProbeError::Closed(method)),
            Some(Err(source)) => return Err(ProbeError::Transport { method, source }),
            Some(Ok(message @ (Message::Text(_) | Message::Binary(_)))) => {
                return Ok(message.into_data().to_vec());
            }
            Some(Ok(_)) => continue,
        }
    }
}
