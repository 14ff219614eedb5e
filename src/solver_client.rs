//! Client for the frame solver endpoint

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

use crate::geometry::GeometryStore;
use crate::types::{ElementId, ElementProperties, LoadingBc, NodeId};

/// Client for the `/calculate` solver service
#[derive(Debug, Clone)]
pub struct SolveClient {
    endpoint: String,
    client: reqwest::Client,
}

impl SolveClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Submit the model; one POST, no retries
    pub async fn calculate(&self, request: &SolveRequest) -> Result<SolveResults, SolveError> {
        debug!(
            "POST {} ({} nodes, {} elements, scale {})",
            self.endpoint,
            request.nodes.len(),
            request.elements.len(),
            request.deformation_scale
        );

        let response = self.client.post(&self.endpoint).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Solver responded with status {}: {}", status.as_u16(), body);
            return Err(SolveError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: SolveResponse = response.json().await?;
        if let Some(message) = &body.message {
            info!("Solver: {}", message);
        }
        body.results.ok_or(SolveError::MissingResults)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SolveError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Server responded with status: {status}")]
    Status { status: u16, body: String },
    #[error("Server response contained no results")]
    MissingResults,
}

// ========================
// Request Types
// ========================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SolveRequest {
    pub nodes: Vec<NodeData>,
    pub elements: Vec<ElementData>,
    #[serde(rename = "deformationScale")]
    pub deformation_scale: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeData {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Empty object when the node has no record
    #[serde(rename = "loadingBC", default)]
    pub loading_bc: LoadingBc,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementData {
    pub id: ElementId,
    #[serde(rename = "nodeIds")]
    pub node_ids: [NodeId; 2],
    #[serde(default)]
    pub properties: ElementProperties,
}

impl SolveRequest {
    /// Snapshot of the store at submission time
    pub fn from_store(store: &GeometryStore, deformation_scale: f64) -> Self {
        let nodes = store
            .nodes()
            .iter()
            .map(|node| NodeData {
                id: node.id.clone(),
                x: node.x,
                y: node.y,
                z: node.z,
                loading_bc: store.loading_bc(&node.id).cloned().unwrap_or_default(),
            })
            .collect();

        let elements = store
            .elements()
            .iter()
            .map(|element| ElementData {
                id: element.id.clone(),
                node_ids: element.node_ids.clone(),
                properties: store.element_properties(&element.id).cloned().unwrap_or_default(),
            })
            .collect();

        Self {
            nodes,
            elements,
            deformation_scale,
        }
    }
}

// ========================
// Response Types
// ========================

#[derive(Debug, Clone, Deserialize)]
pub struct SolveResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub results: Option<SolveResults>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SolveResults {
    #[serde(default)]
    pub node_count: usize,
    #[serde(default)]
    pub element_count: usize,
    #[serde(default)]
    pub analysis_results: Option<AnalysisResults>,
    #[serde(default)]
    pub deformed_shapes: Option<Vec<DeformedShape>>,
}

impl SolveResults {
    pub fn displacements(&self) -> &[ResultRow] {
        self.analysis_results
            .as_ref()
            .and_then(|results| results.displacements.as_deref())
            .unwrap_or(&[])
    }

    pub fn reactions(&self) -> &[ResultRow] {
        self.analysis_results
            .as_ref()
            .and_then(|results| results.reactions.as_deref())
            .unwrap_or(&[])
    }

    pub fn deformed_shapes(&self) -> &[DeformedShape] {
        self.deformed_shapes.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResults {
    #[serde(default, deserialize_with = "lenient_table")]
    pub displacements: Option<Vec<ResultRow>>,
    #[serde(default, deserialize_with = "lenient_table")]
    pub reactions: Option<Vec<ResultRow>>,
}

/// The solver substitutes an error string when it cannot format a table
fn lenient_table<'de, D>(deserializer: D) -> Result<Option<Vec<ResultRow>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value::<Vec<ResultRow>>(value.clone()) {
        Ok(rows) => Ok(Some(rows)),
        Err(err) => {
            warn!("Ignoring malformed result table {}: {}", value, err);
            Ok(None)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultRow {
    pub node: NodeLabel,
    pub dof: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum NodeLabel {
    Index(u64),
    Name(String),
}

impl fmt::Display for NodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeLabel::Index(index) => write!(f, "{}", index),
            NodeLabel::Name(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeformedShape {
    pub element_index: usize,
    /// Polyline through the deformed element
    pub shape_data: Vec<[f64; 3]>,
    #[serde(default)]
    pub deformed_nodes: Vec<[f64; 3]>,
}

// ========================
// Sequencing
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SolveTicket(u64);

/// Issues tickets so that only the latest submission may apply its result
#[derive(Debug, Default)]
pub struct SolveTracker {
    issued: u64,
    outstanding: Option<SolveTicket>,
}

impl SolveTracker {
    pub fn begin(&mut self) -> SolveTicket {
        self.issued += 1;
        let ticket = SolveTicket(self.issued);
        self.outstanding = Some(ticket);
        ticket
    }

    /// True when `ticket` is the latest one issued
    pub fn complete(&mut self, ticket: SolveTicket) -> bool {
        if self.outstanding == Some(ticket) {
            self.outstanding = None;
            true
        } else {
            debug!("Discarding stale solve response {:?}", ticket);
            false
        }
    }

    /// Abandon the outstanding submission; its completion will be discarded
    pub fn cancel(&mut self) {
        if let Some(ticket) = self.outstanding.take() {
            debug!("Cancelled solve {:?}", ticket);
        }
    }

    pub fn is_busy(&self) -> bool {
        self.outstanding.is_some()
    }
}

/// Exponential notation with a signed exponent, e.g. `1.2345e+3`
pub fn format_exponential(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let formatted = format!("{:.*e}", digits, value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}
