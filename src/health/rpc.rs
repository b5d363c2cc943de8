//! JSON-RPC 2.0 wire types for the two node health methods.
//!
//! # Requests
//! ```text
//! {"id":1,"jsonrpc":"2.0","method":"system_health","params":[]}
//! {"id":1,"jsonrpc":"2.0","method":"system_syncState","params":[false]}
//! ```

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

pub const SYSTEM_HEALTH: &str = "system_health";
pub const SYSTEM_SYNC_STATE: &str = "system_syncState";

/// Outgoing JSON-RPC request.
#[derive(Debug, Clone)]
pub struct RpcRequest {
    pub id: u64,
    pub jsonrpc: &'static str,
    pub method: &'static str,
    pub params: Value,
}

impl RpcRequest {
    pub fn new(method: &'static str, params: Value) -> Self {
        Self {
            id: 1,
            jsonrpc: "2.0",
            method,
            params,
        }
    }

    pub fn system_health() -> Self {
        Self::new(SYSTEM_HEALTH, Value::Array(Vec::new()))
    }

    pub fn system_sync_state() -> Self {
        Self::new(SYSTEM_SYNC_STATE, Value::Array(vec![Value::Bool(false)]))
    }

    /// Serialized request body.
    pub fn to_json(&self) -> String {
        serde_json::json!({
            "id": self.id,
            "jsonrpc": self.jsonrpc,
            "method": self.method,
            "params": self.params,
        })
        .to_string()
    }
}

/// Incoming JSON-RPC response envelope.
#[derive(Debug, Deserialize)]
pub struct RpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<Value>,
}

impl<T: DeserializeOwned> RpcResponse<T> {
    /// The `result` member, or a description of why there is none.
    pub fn into_result(self) -> Result<T, String> {
        match (self.result, self.error) {
            (_, Some(error)) => Err(error.to_string()),
            (Some(result), None) => Ok(result),
            (None, None) => Err("response has no result".to_string()),
        }
    }
}

/// `system_health` result.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemHealth {
    pub is_syncing: bool,
    pub peers: u64,
    pub should_have_peers: bool,
}

/// `system_syncState` result. Other members (`startingBlock`) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncState {
    pub highest_block: u64,
    pub current_block: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_format() {
        assert_eq!(
            RpcRequest::system_health().to_json(),
            r#"{"id":1,"jsonrpc":"2.0","method":"system_health","params":[]}"#
        );
        assert_eq!(
            RpcRequest::system_sync_state().to_json(),
            r#"{"id":1,"jsonrpc":"2.0","method":"system_syncState","params":[false]}"#
        );
    }

    #[test]
    fn test_parse_health_result() {
        let response: RpcResponse<SystemHealth> = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"result":{"isSyncing":false,"peers":12,"shouldHavePeers":true}}"#,
        )
        .unwrap();
        let health = response.into_result().unwrap();
        assert!(!health.is_syncing);
        assert_eq!(health.peers, 12);
        assert!(health.should_have_peers);
    }

    #[test]
    fn test_parse_sync_state_ignores_extra_fields() {
        let response: RpcResponse<SyncState> = serde_json::from_str(
            r#"{"result":{"startingBlock":0,"currentBlock":150,"highestBlock":200}}"#,
        )
        .unwrap();
        assert_eq!(
            response.into_result().unwrap(),
            SyncState {
                highest_block: 200,
                current_block: 150
            }
        );
    }

    #[test]
    fn test_missing_field_is_an_error() {
        let parsed: Result<RpcResponse<SystemHealth>, _> =
            serde_json::from_str(r#"{"result":{"isSyncing":false,"peers":12}}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_error_member_wins() {
        let response: RpcResponse<SyncState> = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32601,"message":"Method not found"}}"#,
        )
        .unwrap();
        let err = response.into_result().unwrap_err();
        assert!(err.contains("Method not found"));
    }

    #[test]
    fn test_missing_result() {
        let response: RpcResponse<SyncState> = serde_json::from_str(r#"{"id":1}"#).unwrap();
        assert_eq!(response.into_result().unwrap_err(), "response has no result");
    }
}
