//! JSON-RPC style message types for the line protocol.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GraphError;

pub const PARSE_ERROR: i32 = -32700;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;
/// Caller errors reported by the engine (unknown node, bad bandwidth, ...).
pub const ENGINE_ERROR: i32 = -32000;

#[derive(Debug, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct Response {
    pub jsonrpc: String,
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl Response {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Option<Value>, error: RpcError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
}

impl RpcError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<GraphError> for RpcError {
    fn from(e: GraphError) -> Self {
        let code = match e {
            GraphError::Poisoned(_) => INTERNAL_ERROR,
            _ => ENGINE_ERROR,
        };
        Self::new(code, e.to_string())
    }
}

impl From<serde_json::Error> for RpcError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(INVALID_PARAMS, format!("Invalid params: {}", e))
    }
}

/// Params for methods that only select a network.
#[derive(Debug, Default, Deserialize)]
pub struct NamespaceParams {
    pub namespace: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddNodeParams {
    pub namespace: Option<String>,
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct AddEdgeParams {
    pub namespace: Option<String>,
    pub from: String,
    pub to: String,
    pub cost: u32,
    pub bandwidth: u32,
}

#[derive(Debug, Deserialize)]
pub struct PathParams {
    pub namespace: Option<String>,
    pub from: String,
    pub to: String,
}

/// `connections` entries are `[device_a, device_b, cost]` with 1-based ids.
#[derive(Debug, Deserialize)]
pub struct PlanParams {
    pub devices: usize,
    pub standalone_costs: Vec<u32>,
    #[serde(default)]
    pub connections: Vec<(usize, usize, u32)>,
}
