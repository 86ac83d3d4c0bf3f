//! Shape of the result graph: results as nodes, connections as edges.

use std::collections::HashMap;

use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use prism_core::models::{GraphInsights, InterResultConnection};

pub fn graph_insights(result_ids: &[&str], connections: &[InterResultConnection]) -> GraphInsights {
    let mut graph: UnGraph<&str, f64> = UnGraph::default();
    let mut index: HashMap<&str, NodeIndex> = HashMap::new();
    for &id in result_ids {
        index.entry(id).or_insert_with(|| graph.add_node(id));
    }
    for conn in connections {
        let (Some(&a), Some(&b)) = (
            index.get(conn.source_id.as_str()),
            index.get(conn.target_id.as_str()),
        ) else {
            continue;
        };
        graph.add_edge(a, b, conn.strength);
    }

    let nodes = graph.node_count();
    let edges = graph.edge_count();
    let density = if nodes < 2 {
        0.0
    } else {
        (2.0 * edges as f64 / (nodes * (nodes - 1)) as f64).min(1.0)
    };

    // First node wins ties; isolated nodes are never "most connected".
    let mut most_connected: Option<(usize, &str)> = None;
    for node in graph.node_indices() {
        let degree = graph.neighbors(node).count();
        if degree > 0 && most_connected.map_or(true, |(best, _)| degree > best) {
            most_connected = Some((degree, graph[node]));
        }
    }

    GraphInsights {
        node_count: nodes,
        edge_count: edges,
        density,
        connected_components: connected_components(&graph),
        most_connected: most_connected.map(|(_, id)| id.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::models::ConnectionKind;

    fn conn(a: &str, b: &str) -> InterResultConnection {
        InterResultConnection {
            source_id: a.to_string(),
            target_id: b.to_string(),
            kind: ConnectionKind::SharedEntities,
            strength: 0.5,
            shared_entities: vec!["x".to_string()],
        }
    }

    #[test]
    fn isolated_results_are_separate_components() {
        let insights = graph_insights(&["a", "b", "c"], &[]);
        assert_eq!(insights.node_count, 3);
        assert_eq!(insights.edge_count, 0);
        assert_eq!(insights.connected_components, 3);
        assert_eq!(insights.density, 0.0);
        assert_eq!(insights.most_connected, None);
    }

    #[test]
    fn hub_is_most_connected() {
        let insights = graph_insights(&["a", "b", "c", "d"], &[conn("b", "a"), conn("b", "c")]);
        assert_eq!(insights.edge_count, 2);
        assert_eq!(insights.connected_components, 2);
        assert_eq!(insights.most_connected.as_deref(), Some("b"));
        assert!((insights.density - 2.0 * 2.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn connections_to_unknown_ids_are_ignored() {
        let insights = graph_insights(&["a"], &[conn("a", "zz")]);
        assert_eq!(insights.edge_count, 0);
        assert_eq!(insights.connected_components, 1);
    }
}
