//! Line-oriented command server: one JSON request per input line, one JSON
//! response per output line.

use anyhow::Result;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::io::{stdin, stdout, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use crate::optimizer::NetworkOptimizer;
use crate::protocol::{
    AddEdgeParams, AddNodeParams, NamespaceParams, PathParams, PlanParams, Request, Response,
    RpcError, METHOD_NOT_FOUND, PARSE_ERROR,
};
use crate::registry::NetworkRegistry;

pub const METHODS: &[&str] = &[
    "add_node",
    "add_edge",
    "mst",
    "spanning_forest",
    "shortest_path",
    "plan_modules",
    "describe",
    "list_namespaces",
    "drop_namespace",
    "methods",
];

/// Dispatches requests to a [`NetworkRegistry`].
#[derive(Clone)]
pub struct CommandServer {
    registry: NetworkRegistry,
    namespace: String,
}

impl CommandServer {
    pub fn new(registry: NetworkRegistry, namespace: impl Into<String>) -> Self {
        Self {
            registry,
            namespace: namespace.into(),
        }
    }

    pub fn registry(&self) -> &NetworkRegistry {
        &self.registry
    }

    /// Handle one raw input line. Blank lines produce no response.
    pub fn handle_line(&self, line: &str) -> Option<Response> {
        if line.trim().is_empty() {
            return None;
        }
        match serde_json::from_str::<Request>(line) {
            Ok(request) => Some(self.handle(request)),
            Err(e) => {
                warn!(error = %e, "unparseable request line");
                Some(Response::failure(None, RpcError::new(PARSE_ERROR, format!("Parse error: {}", e))))
            }
        }
    }

    pub fn handle(&self, request: Request) -> Response {
        debug!(method = %request.method, "request");
        match self.dispatch(&request.method, request.params) {
            Ok(result) => Response::success(request.id, result),
            Err(error) => {
                debug!(method = %request.method, code = error.code, message = %error.message, "request failed");
                Response::failure(request.id, error)
            }
        }
    }

    fn dispatch(&self, method: &str, params: Option<Value>) -> Result<Value, RpcError> {
        let params = params.unwrap_or_else(|| json!({}));

        match method {
            "add_node" => {
                let p: AddNodeParams = parse(params)?;
                let added = self
                    .registry
                    .write(self.ns(&p.namespace), |net| Ok(net.add_node(&p.id)))?;
                Ok(json!({ "added": added }))
            }
            "add_edge" => {
                let p: AddEdgeParams = parse(params)?;
                self.registry.write(self.ns(&p.namespace), |net| {
                    net.add_edge(&p.from, &p.to, p.cost, p.bandwidth)
                })?;
                Ok(json!({ "added": true }))
            }
            "mst" => {
                let p: NamespaceParams = parse(params)?;
                let tree = self
                    .registry
                    .read(self.ns(&p.namespace), |net| Ok(net.compute_mst()))?;
                let mut value = serde_json::to_value(&tree)?;
                value["spanning"] = json!(tree.is_spanning());
                Ok(value)
            }
            "spanning_forest" => {
                let p: NamespaceParams = parse(params)?;
                let forest = self
                    .registry
                    .read(self.ns(&p.namespace), |net| Ok(net.compute_spanning_forest()))?;
                Ok(serde_json::to_value(forest)?)
            }
            "shortest_path" => {
                let p: PathParams = parse(params)?;
                let outcome = self
                    .registry
                    .read(self.ns(&p.namespace), |net| net.compute_shortest_path(&p.from, &p.to))?;
                let mut value = serde_json::to_value(&outcome)?;
                value["cost"] = json!(outcome.cost_or_sentinel());
                value["latency"] = json!(outcome.latency_or_sentinel());
                Ok(value)
            }
            "plan_modules" => {
                let p: PlanParams = parse(params)?;
                let plan = NetworkOptimizer::plan_modules(p.devices, &p.standalone_costs, &p.connections)?;
                let mut value = serde_json::to_value(&plan)?;
                value["cost"] = json!(plan.cost_or_sentinel());
                Ok(value)
            }
            "describe" => {
                let p: NamespaceParams = parse(params)?;
                let ns = self.ns(&p.namespace).to_string();
                self.registry
                    .read(&ns, |net| {
                        Ok(json!({
                            "namespace": ns,
                            "nodes": net.labels(),
                            "node_count": net.node_count(),
                            "edge_count": net.edge_count(),
                        }))
                    })
                    .map_err(RpcError::from)
            }
            "list_namespaces" => {
                let namespaces = self.registry.namespaces()?;
                Ok(json!({ "namespaces": namespaces }))
            }
            "drop_namespace" => {
                let p: NamespaceParams = parse(params)?;
                let removed = self.registry.remove(self.ns(&p.namespace))?;
                Ok(json!({ "removed": removed }))
            }
            "methods" => Ok(json!({ "methods": METHODS })),
            other => Err(RpcError::new(METHOD_NOT_FOUND, format!("Method not found: {}", other))),
        }
    }

    fn ns<'a>(&'a self, requested: &'a Option<String>) -> &'a str {
        match requested.as_deref() {
            Some(ns) if !ns.is_empty() => ns,
            _ => &self.namespace,
        }
    }

    /// Serve until `reader` reaches end of input.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        let mut handled = 0usize;

        while let Some(line) = lines.next_line().await? {
            let Some(response) = self.handle_line(&line) else {
                continue;
            };
            let mut out = serde_json::to_vec(&response)?;
            out.push(b'\n');
            writer.write_all(&out).await?;
            writer.flush().await?;
            handled += 1;
        }

        info!(handled, "input closed");
        Ok(())
    }
}

fn parse<T: DeserializeOwned>(params: Value) -> Result<T, RpcError> {
    Ok(serde_json::from_value(params)?)
}

/// Serve requests from stdin, writing responses to stdout.
pub async fn run_stdio(server: CommandServer) -> Result<()> {
    server.serve(BufReader::new(stdin()), stdout()).await
}
