//! Canonical undirected topologies as `(low, high)` edge lists.

/// Ring over `node_count` nodes: `i -- (i + 1) % node_count`.
///
/// Rings need at least three nodes; smaller counts yield a path.
///
/// # Examples
/// ```
/// use wavecast_test_support::topology::cycle;
///
/// assert_eq!(cycle(4), vec![(0, 1), (1, 2), (2, 3), (0, 3)]);
/// ```
#[must_use]
pub fn cycle(node_count: usize) -> Vec<(usize, usize)> {
    let mut edges = path(node_count);
    if node_count >= 3 {
        edges.push((0, node_count - 1));
    }
    edges
}

/// Chain `0 -- 1 -- ... -- node_count - 1`.
#[must_use]
pub fn path(node_count: usize) -> Vec<(usize, usize)> {
    (1..node_count).map(|node| (node - 1, node)).collect()
}

/// Hub `0` linked to every other node.
#[must_use]
pub fn star(node_count: usize) -> Vec<(usize, usize)> {
    (1..node_count).map(|leaf| (0, leaf)).collect()
}

/// Every pair of distinct nodes.
#[must_use]
pub fn complete(node_count: usize) -> Vec<(usize, usize)> {
    (0..node_count)
        .flat_map(|low| (low + 1..node_count).map(move |high| (low, high)))
        .collect()
}

/// Disjoint cliques laid out on consecutive ids.
///
/// Returns the total node count alongside the edges.
///
/// # Examples
/// ```
/// use wavecast_test_support::topology::disjoint_cliques;
///
/// let (nodes, edges) = disjoint_cliques(&[3, 2]);
/// assert_eq!(nodes, 5);
/// assert_eq!(edges, vec![(0, 1), (0, 2), (1, 2), (3, 4)]);
/// ```
#[must_use]
pub fn disjoint_cliques(sizes: &[usize]) -> (usize, Vec<(usize, usize)>) {
    let mut offset = 0;
    let mut edges = Vec::new();
    for &size in sizes {
        edges.extend(
            complete(size)
                .into_iter()
                .map(|(low, high)| (low + offset, high + offset)),
        );
        offset += size;
    }
    (offset, edges)
}
