//! Index-addressed undirected graph arena.
//!
//! Nodes are the dense range `[0, node_count)`. Each node owns a neighbour
//! list; every edge is stored once in each endpoint's list so adjacency stays
//! symmetric. Lists are sorted ascending when construction completes, which
//! makes iteration order independent of insertion order.
//!
//! On the wire a graph is its neighbour lists alone. Deserialization rebuilds
//! the arena edge by edge, so a decoded graph upholds the same invariants as a
//! generated one.

use serde::{Deserialize, Serialize};

use crate::{error::GraphError, positions::Position};

/// Undirected simple graph over `[0, node_count)`.
///
/// # Examples
/// ```
/// use wavecast_core::Graph;
///
/// let graph = Graph::from_edges(3, &[(0, 1), (1, 2), (2, 1)]).expect("edges are valid");
/// assert_eq!(graph.edge_count(), 2);
/// assert_eq!(graph.neighbours(1), &[0, 2]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "AdjacencyLists", try_from = "AdjacencyLists")]
pub struct Graph {
    adjacency: Vec<Vec<usize>>,
    edge_count: usize,
}

impl Graph {
    /// Creates a graph with `node_count` isolated nodes.
    ///
    /// # Errors
    /// Returns [`GraphError::Empty`] when `node_count` is zero.
    pub fn with_nodes(node_count: usize) -> Result<Self, GraphError> {
        if node_count == 0 {
            return Err(GraphError::Empty);
        }
        Ok(Self {
            adjacency: vec![Vec::new(); node_count],
            edge_count: 0,
        })
    }

    /// Builds a graph from an edge list, ignoring repeated pairs in either
    /// orientation.
    ///
    /// # Errors
    /// Returns [`GraphError::Empty`] for zero nodes,
    /// [`GraphError::NodeOutOfRange`] when an endpoint is not a node, and
    /// [`GraphError::SelfLoop`] when an edge joins a node to itself.
    pub fn from_edges(node_count: usize, edges: &[(usize, usize)]) -> Result<Self, GraphError> {
        let mut graph = Self::with_nodes(node_count)?;
        for &(left, right) in edges {
            graph.insert_edge(left, right)?;
        }
        graph.finalise();
        Ok(graph)
    }

    /// Rebuilds a graph from per-node neighbour lists.
    ///
    /// Every entry must be mirrored in the neighbour's own list. Repeated
    /// entries collapse to one edge.
    ///
    /// # Errors
    /// Returns [`GraphError::Empty`] for no lists,
    /// [`GraphError::NodeOutOfRange`] or [`GraphError::SelfLoop`] for a bad
    /// entry, and [`GraphError::Asymmetric`] for an entry with no reverse.
    ///
    /// # Examples
    /// ```
    /// use wavecast_core::{Graph, GraphError};
    ///
    /// let path = Graph::from_adjacency(vec![vec![1], vec![2, 0], vec![1]]).expect("symmetric");
    /// assert_eq!(path.edge_count(), 2);
    /// assert_eq!(path.neighbours(1), &[0, 2]);
    ///
    /// let err = Graph::from_adjacency(vec![vec![1], vec![]]).expect_err("0 -> 1 has no reverse");
    /// assert_eq!(err, GraphError::Asymmetric { node: 0, neighbour: 1 });
    /// ```
    pub fn from_adjacency(adjacency: Vec<Vec<usize>>) -> Result<Self, GraphError> {
        let mut graph = Self::with_nodes(adjacency.len())?;
        for (node, neighbours) in adjacency.iter().enumerate() {
            for &neighbour in neighbours {
                graph.insert_edge(node, neighbour)?;
                if !adjacency[neighbour].contains(&node) {
                    return Err(GraphError::Asymmetric { node, neighbour });
                }
            }
        }
        graph.finalise();
        Ok(graph)
    }

    /// Inserts the undirected edge `(left, right)`.
    ///
    /// Returns `Ok(false)` when the edge already exists in either orientation.
    pub(crate) fn insert_edge(&mut self, left: usize, right: usize) -> Result<bool, GraphError> {
        let node_count = self.node_count();
        for node in [left, right] {
            if node >= node_count {
                return Err(GraphError::NodeOutOfRange { node, node_count });
            }
        }
        if left == right {
            return Err(GraphError::SelfLoop { node: left });
        }
        if self.contains_edge(left, right) {
            return Ok(false);
        }
        self.adjacency[left].push(right);
        self.adjacency[right].push(left);
        self.edge_count += 1;
        Ok(true)
    }

    /// Sorts every neighbour list so iteration is deterministic.
    pub(crate) fn finalise(&mut self) {
        for neighbours in &mut self.adjacency {
            neighbours.sort_unstable();
        }
    }

    /// Number of nodes in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges in the graph.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Neighbours of `node`; empty when `node` is out of range.
    #[must_use]
    pub fn neighbours(&self, node: usize) -> &[usize] {
        self.adjacency.get(node).map_or(&[], Vec::as_slice)
    }

    /// Degree of `node`; zero when `node` is out of range.
    #[must_use]
    pub fn degree(&self, node: usize) -> usize {
        self.neighbours(node).len()
    }

    /// Returns `true` when `left` and `right` share an edge.
    #[must_use]
    pub fn contains_edge(&self, left: usize, right: usize) -> bool {
        let (probe, target) = if self.degree(left) <= self.degree(right) {
            (left, right)
        } else {
            (right, left)
        };
        self.neighbours(probe).contains(&target)
    }

    /// Iterates every edge once as `(low, high)` with `low < high`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(node, neighbours)| {
                neighbours
                    .iter()
                    .copied()
                    .filter(move |&other| node < other)
                    .map(move |other| (node, other))
            })
    }

    /// Borrowed view of the full adjacency arena.
    #[must_use]
    pub fn adjacency(&self) -> &[Vec<usize>] {
        &self.adjacency
    }
}

/// Wire form of a [`Graph`].
#[derive(Serialize, Deserialize)]
struct AdjacencyLists {
    adjacency: Vec<Vec<usize>>,
}

impl From<Graph> for AdjacencyLists {
    fn from(graph: Graph) -> Self {
        Self {
            adjacency: graph.adjacency,
        }
    }
}

impl TryFrom<AdjacencyLists> for Graph {
    type Error = GraphError;

    fn try_from(lists: AdjacencyLists) -> Result<Self, Self::Error> {
        Self::from_adjacency(lists.adjacency)
    }
}

/// A generated network: topology plus the coordinates it was derived from.
///
/// Serializes as `{ "adjacency": [[ids]], "positions": [{ "x": .., "y": .. }] }`
/// for renderers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "NetworkRecord", try_from = "NetworkRecord")]
pub struct GeoNetwork {
    graph: Graph,
    positions: Vec<Position>,
}

impl GeoNetwork {
    pub(crate) const fn new(graph: Graph, positions: Vec<Position>) -> Self {
        Self { graph, positions }
    }

    /// The generated topology.
    #[must_use]
    pub const fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Node coordinates indexed by node id.
    #[must_use]
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Splits the network into its graph and positions.
    #[must_use]
    pub fn into_parts(self) -> (Graph, Vec<Position>) {
        (self.graph, self.positions)
    }
}

/// Wire form of a [`GeoNetwork`].
#[derive(Serialize, Deserialize)]
struct NetworkRecord {
    adjacency: Vec<Vec<usize>>,
    positions: Vec<Position>,
}

impl From<GeoNetwork> for NetworkRecord {
    fn from(network: GeoNetwork) -> Self {
        Self {
            adjacency: network.graph.adjacency,
            positions: network.positions,
        }
    }
}

impl TryFrom<NetworkRecord> for GeoNetwork {
    type Error = GraphError;

    fn try_from(record: NetworkRecord) -> Result<Self, Self::Error> {
        let graph = Graph::from_adjacency(record.adjacency)?;
        if record.positions.len() != graph.node_count() {
            return Err(GraphError::PositionCountMismatch {
                positions: record.positions.len(),
                node_count: graph.node_count(),
            });
        }
        Ok(Self::new(graph, record.positions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn rejects_empty_graph() {
        assert_eq!(Graph::with_nodes(0), Err(GraphError::Empty));
    }

    #[rstest]
    #[case::self_loop(&[(1, 1)], GraphError::SelfLoop { node: 1 })]
    #[case::out_of_range(&[(0, 4)], GraphError::NodeOutOfRange { node: 4, node_count: 3 })]
    fn rejects_invalid_edges(#[case] edges: &[(usize, usize)], #[case] expected: GraphError) {
        let err = Graph::from_edges(3, edges).expect_err("edge list must be rejected");
        assert_eq!(err, expected);
    }

    #[test]
    fn duplicate_edges_are_ignored_in_either_orientation() {
        let mut graph = Graph::with_nodes(3).expect("non-empty graph");
        assert_eq!(graph.insert_edge(0, 2), Ok(true));
        assert_eq!(graph.insert_edge(2, 0), Ok(false));
        assert_eq!(graph.insert_edge(0, 2), Ok(false));
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.neighbours(0), &[2]);
        assert_eq!(graph.neighbours(2), &[0]);
    }

    #[test]
    fn edges_are_reported_once_in_canonical_order() {
        let graph = Graph::from_edges(4, &[(3, 0), (1, 0), (2, 3)]).expect("edges are valid");
        let edges: Vec<_> = graph.edges().collect();
        assert_eq!(edges, vec![(0, 1), (0, 3), (2, 3)]);
    }

    #[test]
    fn out_of_range_queries_are_empty() {
        let graph = Graph::from_edges(2, &[(0, 1)]).expect("edges are valid");
        assert!(graph.neighbours(5).is_empty());
        assert_eq!(graph.degree(5), 0);
        assert!(!graph.contains_edge(0, 5));
    }

    #[test]
    fn graph_serializes_as_bare_adjacency() {
        let graph = Graph::from_edges(3, &[(2, 1), (0, 1)]).expect("edges are valid");
        let value = serde_json::to_value(&graph).expect("graph must serialize");
        assert_eq!(value, json!({ "adjacency": [[1], [0, 2], [1]] }));
        let decoded: Graph = serde_json::from_value(value).expect("graph must decode");
        assert_eq!(decoded, graph);
    }

    #[rstest]
    #[case::self_loop(r#"{"adjacency":[[0]]}"#, GraphError::SelfLoop { node: 0 })]
    #[case::out_of_range(
        r#"{"adjacency":[[5]]}"#,
        GraphError::NodeOutOfRange { node: 5, node_count: 1 }
    )]
    #[case::asymmetric(
        r#"{"adjacency":[[1],[]],"edge_count":7}"#,
        GraphError::Asymmetric { node: 0, neighbour: 1 }
    )]
    #[case::empty(r#"{"adjacency":[]}"#, GraphError::Empty)]
    #[case::loop_before_bad_id(
        r#"{"adjacency":[[0,5]],"edge_count":0}"#,
        GraphError::SelfLoop { node: 0 }
    )]
    fn decoding_rejects_invalid_adjacency(#[case] raw: &str, #[case] expected: GraphError) {
        let err = serde_json::from_str::<Graph>(raw).expect_err("adjacency must be rejected");
        assert!(
            err.to_string().contains(&expected.to_string()),
            "expected `{expected}`, got `{err}`"
        );
    }

    #[test]
    fn decoding_recounts_edges() {
        let graph: Graph = serde_json::from_str(r#"{"adjacency":[[1],[0]],"edge_count":7}"#)
            .expect("symmetric adjacency decodes");
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(0, 1)]);
    }

    #[test]
    fn decoding_sorts_neighbour_lists() {
        let graph: Graph = serde_json::from_str(r#"{"adjacency":[[2,1],[0],[0]]}"#)
            .expect("symmetric adjacency decodes");
        assert_eq!(graph.neighbours(0), &[1, 2]);
    }

    #[test]
    fn network_serializes_with_flat_exchange_fields() {
        let graph = Graph::from_edges(2, &[(0, 1)]).expect("edges are valid");
        let positions = vec![Position::new(0.25, 0.5), Position::new(0.75, 0.5)];
        let network = GeoNetwork::new(graph, positions);
        let value = serde_json::to_value(&network).expect("network must serialize");
        assert_eq!(
            value,
            json!({
                "adjacency": [[1], [0]],
                "positions": [{ "x": 0.25, "y": 0.5 }, { "x": 0.75, "y": 0.5 }],
            })
        );
        let decoded: GeoNetwork = serde_json::from_value(value).expect("network must decode");
        assert_eq!(decoded, network);
    }

    #[rstest]
    #[case::too_few(r#"{"adjacency":[[1],[0]],"positions":[{"x":0.1,"y":0.1}]}"#, 1, 2)]
    #[case::too_many(
        r#"{"adjacency":[[]],"positions":[{"x":0.1,"y":0.1},{"x":0.2,"y":0.2}]}"#,
        2,
        1
    )]
    fn network_decoding_requires_one_position_per_node(
        #[case] raw: &str,
        #[case] positions: usize,
        #[case] node_count: usize,
    ) {
        let err = serde_json::from_str::<GeoNetwork>(raw).expect_err("counts must agree");
        let expected = GraphError::PositionCountMismatch {
            positions,
            node_count,
        };
        assert!(err.to_string().contains(&expected.to_string()));
    }

    #[test]
    fn network_decoding_validates_the_graph() {
        let raw = r#"{"adjacency":[[0,5]],"positions":[{"x":0.1,"y":0.1}]}"#;
        let err = serde_json::from_str::<GeoNetwork>(raw).expect_err("self-loop must be rejected");
        assert!(err.to_string().contains(&GraphError::SelfLoop { node: 0 }.to_string()));
    }
}
