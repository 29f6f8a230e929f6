use serde::{Deserialize, Serialize};

use crate::error::AnalyticsResult;
use crate::models::{FlowGraph, Funnel, Segmentation};
use crate::services::AggregationFacade;

// =========================================================
// Conversion types + route
// =========================================================

/// A `{name, value}` pair used by funnel and distribution charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedValue {
    pub name: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SankeyNode {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SankeyLink {
    pub source: String,
    pub target: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SankeyData {
    pub nodes: Vec<SankeyNode>,
    pub links: Vec<SankeyLink>,
}

impl From<FlowGraph> for SankeyData {
    fn from(graph: FlowGraph) -> Self {
        Self {
            nodes: graph
                .nodes
                .into_iter()
                .map(|n| SankeyNode { name: n.name })
                .collect(),
            links: graph
                .edges
                .into_iter()
                .map(|e| SankeyLink {
                    source: e.source,
                    target: e.target,
                    value: e.value,
                })
                .collect(),
        }
    }
}

pub fn funnel_entries(funnel: Funnel) -> Vec<NamedValue> {
    funnel
        .stages
        .into_iter()
        .map(|s| NamedValue {
            name: s.name,
            value: s.volume,
        })
        .collect()
}

pub fn segment_entries(segmentation: Segmentation) -> Vec<NamedValue> {
    segmentation
        .buckets
        .into_iter()
        .map(|b| NamedValue {
            name: b.name,
            value: b.count,
        })
        .collect()
}

/// Complete conversion page payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionData {
    pub funnel: Vec<NamedValue>,
    pub sankey: SankeyData,
    pub event_distribution: Vec<NamedValue>,
}

/// Route path for conversion data
pub const GET_CONVERSION_DATA: &str = "/api/data/conversion";

pub fn get_conversion_data(facade: &AggregationFacade) -> AnalyticsResult<ConversionData> {
    facade.build_conversion()
}
