use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult};

/// A uniquely named node of a flow graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlowNode {
    pub name: String,
}

/// Weighted, directed transition between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub source: String,
    pub target: String,
    pub value: u64,
}

/// Stage-to-stage navigation graph with a shared drop-off sink.
///
/// `source` is seeded externally with `seed` units of flow. `terminal` is the
/// last stage; whatever reaches it counts as converted. Every other stage
/// forwards exactly what it receives, split between the next stage and `sink`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowGraph {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
    pub source: String,
    pub terminal: String,
    pub sink: String,
    pub seed: u64,
}

impl FlowGraph {
    /// Sum of edge values entering `node`.
    pub fn inbound(&self, node: &str) -> u64 {
        self.edges
            .iter()
            .filter(|e| e.target == node)
            .map(|e| e.value)
            .sum()
    }

    /// Sum of edge values leaving `node`.
    pub fn outbound(&self, node: &str) -> u64 {
        self.edges
            .iter()
            .filter(|e| e.source == node)
            .map(|e| e.value)
            .sum()
    }

    /// Value of the edge `source -> target`, zero when absent.
    pub fn edge_value(&self, source: &str, target: &str) -> u64 {
        self.edges
            .iter()
            .filter(|e| e.source == source && e.target == target)
            .map(|e| e.value)
            .sum()
    }

    /// Flow that reached the terminal stage.
    pub fn converted(&self) -> u64 {
        if self.source == self.terminal {
            self.seed + self.inbound(&self.terminal)
        } else {
            self.inbound(&self.terminal)
        }
    }

    /// Flow that ended in the drop-off sink.
    pub fn dropped(&self) -> u64 {
        self.inbound(&self.sink)
    }

    /// Check exact conservation at every node that forwards flow.
    ///
    /// The source must emit its whole seed; every intermediate stage must emit
    /// exactly what it receives. The terminal and the sink only absorb.
    pub fn verify_conservation(&self) -> AnalyticsResult<()> {
        for node in &self.nodes {
            let name = node.name.as_str();
            if name == self.terminal || name == self.sink {
                continue;
            }
            let inbound = if name == self.source {
                self.seed + self.inbound(name)
            } else {
                self.inbound(name)
            };
            let outbound = self.outbound(name);
            if inbound != outbound {
                return Err(AnalyticsError::invariant(format!(
                    "flow not conserved at '{}': inbound {} != outbound {}",
                    name, inbound, outbound
                ))
                .with_component("flow"));
            }
        }
        if self.converted() + self.dropped() != self.seed {
            return Err(AnalyticsError::invariant(format!(
                "converted {} + dropped {} != seeded {}",
                self.converted(),
                self.dropped(),
                self.seed
            ))
            .with_component("flow"));
        }
        Ok(())
    }
}
