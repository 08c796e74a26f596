//! Undirected adjacency over string ids, shared by both dashboards.

use std::collections::{HashMap, HashSet};

/// Hovered node plus everything one hop away.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Neighborhood {
	pub nodes: HashSet<String>,
	pub edges: HashSet<String>,
}

#[derive(Clone, Debug, Default)]
pub struct GraphIndex {
	neighbors: HashMap<String, HashSet<String>>,
	degree: HashMap<String, usize>,
	edges: Vec<(String, String, String)>,
}

impl GraphIndex {
	/// Build from `(edge_id, source, target)` triples. Edges are treated as
	/// undirected; self-loops count once towards degree.
	pub fn new<'a, I>(edges: I) -> Self
	where
		I: IntoIterator<Item = (&'a str, &'a str, &'a str)>,
	{
		let mut index = GraphIndex::default();
		for (id, source, target) in edges {
			index
				.neighbors
				.entry(source.to_string())
				.or_default()
				.insert(target.to_string());
			index
				.neighbors
				.entry(target.to_string())
				.or_default()
				.insert(source.to_string());
			*index.degree.entry(source.to_string()).or_default() += 1;
			if source != target {
				*index.degree.entry(target.to_string()).or_default() += 1;
			}
			index
				.edges
				.push((id.to_string(), source.to_string(), target.to_string()));
		}
		index
	}

	/// Number of incident edges; parallel edges count separately.
	pub fn degree(&self, node: &str) -> usize {
		self.degree.get(node).copied().unwrap_or(0)
	}

	pub fn neighbors(&self, node: &str) -> impl Iterator<Item = &str> {
		self.neighbors
			.get(node)
			.into_iter()
			.flatten()
			.map(String::as_str)
	}

	/// `node` and its direct neighbours, and every edge whose two endpoints
	/// both lie in that set. Always computed from scratch.
	pub fn neighborhood(&self, node: &str) -> Neighborhood {
		let mut nodes: HashSet<String> = self.neighbors(node).map(str::to_string).collect();
		nodes.insert(node.to_string());
		let edges = self
			.edges
			.iter()
			.filter(|(_, s, t)| nodes.contains(s) && nodes.contains(t))
			.map(|(id, _, _)| id.clone())
			.collect();
		Neighborhood { nodes, edges }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn set(ids: &[&str]) -> HashSet<String> {
		ids.iter().map(|s| s.to_string()).collect()
	}

	fn sample() -> GraphIndex {
		// a - b - c - d, plus b - e and e - c
		GraphIndex::new([
			("ab", "a", "b"),
			("bc", "b", "c"),
			("cd", "c", "d"),
			("be", "b", "e"),
			("ec", "e", "c"),
		])
	}

	#[test]
	fn neighborhood_is_node_plus_one_hop() {
		let hood = sample().neighborhood("b");
		assert_eq!(hood.nodes, set(&["a", "b", "c", "e"]));
		// e-c joins two neighbours and is included; c-d leaves the set
		assert_eq!(hood.edges, set(&["ab", "bc", "be", "ec"]));
	}

	#[test]
	fn isolated_or_unknown_node_highlights_only_itself() {
		let hood = sample().neighborhood("zz");
		assert_eq!(hood.nodes, set(&["zz"]));
		assert!(hood.edges.is_empty());
	}

	#[test]
	fn neighborhood_matches_brute_force_with_parallel_edges_and_loops() {
		let edges = [
			("ab1", "a", "b"),
			("ab2", "b", "a"),
			("aa", "a", "a"),
			("bc", "b", "c"),
			("cc", "c", "c"),
			("cd", "c", "d"),
		];
		let index = GraphIndex::new(edges);
		for node in ["a", "b", "c", "d", "unknown"] {
			let mut expected = set(&[node]);
			for (_, s, t) in edges {
				if s == node {
					expected.insert(t.to_string());
				}
				if t == node {
					expected.insert(s.to_string());
				}
			}
			let expected_edges: HashSet<String> = edges
				.iter()
				.filter(|(_, s, t)| expected.contains(*s) && expected.contains(*t))
				.map(|(id, _, _)| id.to_string())
				.collect();

			let hood = index.neighborhood(node);
			assert_eq!(hood.nodes, expected, "nodes around {node}");
			assert_eq!(hood.edges, expected_edges, "edges around {node}");
		}
		assert_eq!(index.degree("a"), 3);
		assert_eq!(index.degree("c"), 3);
	}

	#[test]
	fn direction_is_ignored() {
		let index = GraphIndex::new([("x", "d", "a")]);
		assert_eq!(index.neighborhood("a").nodes, set(&["a", "d"]));
		assert_eq!(index.degree("a"), 1);
		assert_eq!(index.degree("d"), 1);
	}
}
