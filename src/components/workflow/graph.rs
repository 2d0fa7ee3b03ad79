//! Traversal helpers over the node and edge lists.
//!
//! Nodes and edges are plain vectors; lookups are linear scans. A canvas
//! holds a handful of nodes, so no index is kept.

use std::collections::HashSet;

use super::types::{FlowEdge, FlowNode};

/// Nodes with an edge pointing into `node_id`.
pub fn get_incomers<'a>(
	node_id: &str,
	nodes: &'a [FlowNode],
	edges: &[FlowEdge],
) -> Vec<&'a FlowNode> {
	let sources: HashSet<&str> = edges
		.iter()
		.filter(|e| e.target == node_id)
		.map(|e| e.source.as_str())
		.collect();
	nodes
		.iter()
		.filter(|n| sources.contains(n.id.as_str()))
		.collect()
}

/// Nodes that `node_id` has an edge pointing to.
pub fn get_outgoers<'a>(
	node_id: &str,
	nodes: &'a [FlowNode],
	edges: &[FlowEdge],
) -> Vec<&'a FlowNode> {
	let targets: HashSet<&str> = edges
		.iter()
		.filter(|e| e.source == node_id)
		.map(|e| e.target.as_str())
		.collect();
	nodes
		.iter()
		.filter(|n| targets.contains(n.id.as_str()))
		.collect()
}

/// Edges with either endpoint in `node_ids`.
pub fn get_connected_edges<'a>(node_ids: &[&str], edges: &'a [FlowEdge]) -> Vec<&'a FlowEdge> {
	edges
		.iter()
		.filter(|e| node_ids.iter().any(|id| e.touches(id)))
		.collect()
}

/// Whether an edge `source -> target` is present.
pub fn edge_exists(source: &str, target: &str, edges: &[FlowEdge]) -> bool {
	edges
		.iter()
		.any(|e| e.source == source && e.target == target)
}

/// Appends `edge` unless an edge with the same endpoints is already present.
/// Returns whether the edge was added.
pub fn add_edge(edge: FlowEdge, edges: &mut Vec<FlowEdge>) -> bool {
	if edge_exists(&edge.source, &edge.target, edges) {
		return false;
	}
	edges.push(edge);
	true
}

/// Edge list after deleting `deleted` from the graph: every edge touching a
/// deleted node is dropped and each deleted node's incomers are bridged to
/// its outgoers.
///
/// Deletions are applied one at a time against the running edge list, so a
/// deleted chain collapses into a single bridge.
pub fn rewire_deleted(deleted: &[&str], nodes: &[FlowNode], edges: &[FlowEdge]) -> Vec<FlowEdge> {
	deleted.iter().fold(edges.to_vec(), |acc, &node_id| {
		let incomers: Vec<String> = get_incomers(node_id, nodes, &acc)
			.into_iter()
			.map(|n| n.id.clone())
			.collect();
		let outgoers: Vec<String> = get_outgoers(node_id, nodes, &acc)
			.into_iter()
			.map(|n| n.id.clone())
			.collect();

		let connected: HashSet<String> = get_connected_edges(&[node_id], &acc)
			.into_iter()
			.map(|e| e.id.clone())
			.collect();

		let mut remaining: Vec<FlowEdge> = acc
			.into_iter()
			.filter(|e| !connected.contains(&e.id))
			.collect();

		for source in &incomers {
			for target in &outgoers {
				if source == target {
					continue;
				}
				add_edge(FlowEdge::between(source.as_str(), target.as_str()), &mut remaining);
			}
		}
		remaining
	})
}
