//! Multi-stage navigation flow (sankey) construction.
//!
//! Flow enters the first stage, and at each stage a fraction leaves for the
//! shared drop-off sink while the rest advances. Only the sink edge is
//! rounded; the advancing edge takes the exact remainder, so every stage
//! forwards exactly what it received.

use std::collections::HashSet;

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::models::{FlowEdge, FlowGraph, FlowNode};

/// Check stage names and drop rates before building a graph.
pub fn validate_flow<S: AsRef<str>>(stages: &[S], drop_rates: &[f64], sink: &str) -> AnalyticsResult<()> {
    if stages.is_empty() {
        return Err(AnalyticsError::configuration("flow graph needs at least one stage")
            .with_component("flow"));
    }
    if drop_rates.len() != stages.len() - 1 {
        return Err(AnalyticsError::configuration(format!(
            "{} stages need {} drop rates, got {}",
            stages.len(),
            stages.len() - 1,
            drop_rates.len()
        ))
        .with_component("flow"));
    }
    if let Some((i, rate)) = drop_rates
        .iter()
        .enumerate()
        .find(|(_, r)| !(r.is_finite() && (0.0..=1.0).contains(*r)))
    {
        return Err(AnalyticsError::configuration(format!(
            "drop rate #{} = {} is outside [0, 1]",
            i, rate
        ))
        .with_component("flow"));
    }

    let mut seen = HashSet::new();
    for name in stages.iter().map(|s| s.as_ref()).chain(std::iter::once(sink)) {
        if name.trim().is_empty() {
            return Err(AnalyticsError::configuration("flow node names must not be blank")
                .with_component("flow"));
        }
        if !seen.insert(name) {
            return Err(AnalyticsError::configuration(format!(
                "flow node '{}' appears more than once",
                name
            ))
            .with_component("flow"));
        }
    }
    Ok(())
}

/// Build a linear stage graph seeded with `total` units of flow.
///
/// `drop_rates[i]` is the share of stage `i`'s inbound flow that exits to
/// `sink`. The last stage keeps everything it receives. Zero-valued edges are
/// left out of the edge list; every node is always listed.
pub fn build_flow_graph<S: AsRef<str>>(
    stages: &[S],
    drop_rates: &[f64],
    total: u64,
    sink: &str,
) -> AnalyticsResult<FlowGraph> {
    validate_flow(stages, drop_rates, sink).map_err(|e| e.with_operation("build_flow_graph"))?;

    let mut nodes: Vec<FlowNode> = stages
        .iter()
        .map(|s| FlowNode {
            name: s.as_ref().to_string(),
        })
        .collect();
    nodes.push(FlowNode {
        name: sink.to_string(),
    });

    let mut edges = Vec::new();
    let mut inbound = total;
    for (i, rate) in drop_rates.iter().enumerate() {
        let from = stages[i].as_ref();
        let to = stages[i + 1].as_ref();
        let dropped = ((inbound as f64 * rate).round() as u64).min(inbound);
        let advanced = inbound - dropped;
        if advanced > 0 {
            edges.push(FlowEdge {
                source: from.to_string(),
                target: to.to_string(),
                value: advanced,
            });
        }
        if dropped > 0 {
            edges.push(FlowEdge {
                source: from.to_string(),
                target: sink.to_string(),
                value: dropped,
            });
        }
        inbound = advanced;
    }

    let graph = FlowGraph {
        nodes,
        edges,
        source: stages[0].as_ref().to_string(),
        terminal: stages[stages.len() - 1].as_ref().to_string(),
        sink: sink.to_string(),
        seed: total,
    };
    graph
        .verify_conservation()
        .map_err(|e| e.with_operation("build_flow_graph"))?;
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const STAGES: [&str; 6] = ["Home", "Product List", "Product Detail", "Cart", "Checkout", "Paid"];

    #[test]
    fn test_reference_graph_matches_expected_links() {
        let graph = build_flow_graph(&STAGES, &[0.2, 0.25, 0.5, 1.0 / 3.0, 0.1], 100_000, "Churned").unwrap();

        assert_eq!(graph.edge_value("Home", "Product List"), 80_000);
        assert_eq!(graph.edge_value("Home", "Churned"), 20_000);
        assert_eq!(graph.edge_value("Product List", "Product Detail"), 60_000);
        assert_eq!(graph.edge_value("Product List", "Churned"), 20_000);
        assert_eq!(graph.edge_value("Product Detail", "Cart"), 30_000);
        assert_eq!(graph.edge_value("Product Detail", "Churned"), 30_000);
        assert_eq!(graph.edge_value("Cart", "Checkout"), 20_000);
        assert_eq!(graph.edge_value("Cart", "Churned"), 10_000);
        assert_eq!(graph.edge_value("Checkout", "Paid"), 18_000);
        assert_eq!(graph.edge_value("Checkout", "Churned"), 2_000);

        assert_eq!(graph.converted(), 18_000);
        assert_eq!(graph.dropped(), 82_000);
        assert_eq!(graph.nodes.len(), 7);
        assert_eq!(graph.nodes.last().unwrap().name, "Churned");
    }

    #[test]
    fn test_zero_drop_rate_has_no_sink_edge() {
        let graph = build_flow_graph(&["a", "b", "c"], &[0.0, 0.0], 500, "lost").unwrap();
        assert_eq!(graph.edges.len(), 2);
        assert_eq!(graph.converted(), 500);
        assert_eq!(graph.dropped(), 0);
    }

    #[test]
    fn test_full_drop_rate_stops_flow() {
        let graph = build_flow_graph(&["a", "b", "c"], &[1.0, 0.5], 500, "lost").unwrap();
        assert_eq!(graph.edge_value("a", "lost"), 500);
        assert_eq!(graph.inbound("b"), 0);
        assert_eq!(graph.outbound("b"), 0);
        assert_eq!(graph.converted(), 0);
        assert_eq!(graph.nodes.len(), 4);
    }

    #[test]
    fn test_single_stage_converts_everything() {
        let graph = build_flow_graph(&["only"], &[], 10, "lost").unwrap();
        assert!(graph.edges.is_empty());
        assert_eq!(graph.source, "only");
        assert_eq!(graph.terminal, "only");
        assert_eq!(graph.converted(), 10);
    }

    #[test]
    fn test_invalid_configurations() {
        assert!(build_flow_graph(&["a", "b"], &[1.5], 10, "lost").is_err());
        assert!(build_flow_graph(&["a", "b"], &[-0.1], 10, "lost").is_err());
        assert!(build_flow_graph(&["a", "b"], &[0.1, 0.2], 10, "lost").is_err());
        assert!(build_flow_graph(&["a", "a"], &[0.1], 10, "lost").is_err());
        assert!(build_flow_graph(&["a", "lost"], &[0.1], 10, "lost").is_err());
        let err = build_flow_graph(&["a", "b"], &[f64::NAN], 10, "lost").unwrap_err();
        assert!(matches!(err, AnalyticsError::Configuration { .. }));
    }

    proptest! {
        #[test]
        fn prop_flow_is_conserved(
            total in 0u64..5_000_000_000,
            rates in proptest::collection::vec(
                prop_oneof![Just(0.0f64), Just(1.0f64), 0.0f64..=1.0],
                0..8,
            ),
        ) {
            let stages: Vec<String> = (0..=rates.len()).map(|i| format!("stage{}", i)).collect();
            let graph = build_flow_graph(&stages, &rates, total, "drop-off").unwrap();

            for stage in stages.iter().skip(1).take(stages.len().saturating_sub(2)) {
                prop_assert_eq!(graph.inbound(stage), graph.outbound(stage));
            }
            prop_assert_eq!(graph.outbound(&stages[0]), if stages.len() > 1 { total } else { 0 });
            prop_assert_eq!(graph.converted() + graph.dropped(), total);
            prop_assert!(graph.verify_conservation().is_ok());
        }
    }
}
