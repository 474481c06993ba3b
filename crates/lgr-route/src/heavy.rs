//! The heavy graph: the connectivity a routed circuit runs on.
//!
//! Built from a [`RootGraph`]: every wire keeps a node of its own, and every
//! clique cell of the root becomes an extra node adjacent to the wires that
//! meet in it. Two interacting wires are therefore always joined by a path
//! of exactly three nodes through the cell they share.

use std::collections::{BTreeMap, VecDeque};

use lgr_ir::QubitId;
use petgraph::graphmap::UnGraphMap;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::{RouteError, RouteResult};
use crate::line_graph::{CellId, RootGraph};

/// Identity of a heavy-graph node before relabeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HeavyNode {
    /// A wire of the coupling graph.
    Terminal(QubitId),
    /// A clique cell of the root graph.
    Cell(CellId),
}

/// Build the unlabeled heavy graph of `root`.
///
/// For every root edge the wire shared by its two cells is located. A
/// leaf-clique edge joins the wire to the clique node; a clique-clique edge
/// joins both clique nodes to the wire.
pub fn build_heavy_graph(root: &RootGraph) -> RouteResult<UnGraphMap<HeavyNode, ()>> {
    let mut graph = UnGraphMap::new();

    for (a, b) in root.edges() {
        let shared = root.shared_wires(a, b);
        let [wire] = shared.as_slice() else {
            return Err(RouteError::AmbiguousSharedNode {
                a: a.index(),
                b: b.index(),
                shared: shared.len(),
            });
        };
        let wire = *wire;

        let (Some(cell_a), Some(cell_b)) = (root.cell(a), root.cell(b)) else {
            return Err(RouteError::BuildFailure(format!(
                "root edge ({}, {}) refers to a missing cell",
                a.index(),
                b.index()
            )));
        };

        match (cell_a.is_leaf(), cell_b.is_leaf()) {
            (true, false) => {
                graph.add_edge(HeavyNode::Terminal(wire), HeavyNode::Cell(b), ());
            }
            (false, true) => {
                graph.add_edge(HeavyNode::Cell(a), HeavyNode::Terminal(wire), ());
            }
            (false, false) => {
                graph.add_edge(HeavyNode::Cell(a), HeavyNode::Terminal(wire), ());
                graph.add_edge(HeavyNode::Terminal(wire), HeavyNode::Cell(b), ());
            }
            (true, true) => {
                return Err(RouteError::BuildFailure(format!(
                    "wire {wire} joins two leaves"
                )));
            }
        }
    }

    let components = petgraph::algo::connected_components(&graph);
    if components > 1 {
        return Err(RouteError::BuildFailure(format!(
            "heavy graph has {components} connected components"
        )));
    }

    Ok(graph)
}

/// Heavy graph over integer labels.
///
/// Terminals keep their wire index. Clique nodes are numbered from one past
/// the highest wire, in order of their sorted wire lists, ties broken by cell
/// index.
#[derive(Debug, Clone, Default)]
pub struct HeavyGraph {
    graph: UnGraphMap<QubitId, ()>,
    labels: BTreeMap<QubitId, HeavyNode>,
}

impl HeavyGraph {
    /// Build and label the heavy graph of `root`.
    pub fn from_root(root: &RootGraph) -> RouteResult<Self> {
        let raw = build_heavy_graph(root)?;
        Self::label(&raw, root)
    }

    /// Assign integer labels to the nodes of `raw`.
    ///
    /// Fails if a clique label would fall outside the `u32` wire range.
    pub fn label(raw: &UnGraphMap<HeavyNode, ()>, root: &RootGraph) -> RouteResult<Self> {
        let mut next = 0u32;
        for node in raw.nodes() {
            if let HeavyNode::Terminal(w) = node {
                next = next.max(w.0.checked_add(1).ok_or_else(label_overflow)?);
            }
        }

        let mut cells: Vec<CellId> = raw
            .nodes()
            .filter_map(|n| match n {
                HeavyNode::Cell(id) => Some(id),
                HeavyNode::Terminal(_) => None,
            })
            .collect();
        cells.sort_by_key(|&id| (root.cell(id).map(|c| c.wires().to_vec()), id));

        let mut mapping: FxHashMap<HeavyNode, QubitId> = FxHashMap::default();
        let mut labels = BTreeMap::new();
        for node in raw.nodes() {
            if let HeavyNode::Terminal(w) = node {
                mapping.insert(node, w);
                labels.insert(w, node);
            }
        }
        for (offset, id) in cells.into_iter().enumerate() {
            let label = u32::try_from(offset)
                .ok()
                .and_then(|offset| next.checked_add(offset))
                .map(QubitId)
                .ok_or_else(label_overflow)?;
            mapping.insert(HeavyNode::Cell(id), label);
            labels.insert(label, HeavyNode::Cell(id));
        }

        let mut graph = UnGraphMap::new();
        for node in raw.nodes() {
            if let Some(&label) = mapping.get(&node) {
                graph.add_node(label);
            }
        }
        for (a, b, _) in raw.all_edges() {
            if let (Some(&la), Some(&lb)) = (mapping.get(&a), mapping.get(&b)) {
                graph.add_edge(la, lb, ());
            }
        }

        debug!(
            "Labeled heavy graph: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        Ok(Self { graph, labels })
    }

    /// Number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    pub fn num_edges(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node labels in ascending order.
    pub fn nodes(&self) -> Vec<QubitId> {
        self.labels.keys().copied().collect()
    }

    /// What a label stands for.
    pub fn node(&self, label: QubitId) -> Option<HeavyNode> {
        self.labels.get(&label).copied()
    }

    /// Register size needed to address every node.
    ///
    /// Fails if the highest label is `u32::MAX`, which no register can
    /// address.
    pub fn register_size(&self) -> RouteResult<u32> {
        match self.labels.keys().next_back() {
            Some(q) => q.0.checked_add(1).ok_or_else(label_overflow),
            None => Ok(0),
        }
    }

    /// Check whether `node` is in the graph.
    pub fn contains(&self, node: QubitId) -> bool {
        self.graph.contains_node(node)
    }

    /// Number of neighbours of `node`.
    pub fn degree(&self, node: QubitId) -> usize {
        self.graph.neighbors(node).count()
    }

    /// Neighbours of `node` in ascending order.
    pub fn neighbors(&self, node: QubitId) -> Vec<QubitId> {
        let mut nbrs: Vec<_> = self.graph.neighbors(node).collect();
        nbrs.sort_unstable();
        nbrs
    }

    /// Whether `node` is a leaf whose neighbour has no other leaf.
    pub fn is_lone_leaf(&self, node: QubitId) -> bool {
        if self.degree(node) != 1 {
            return false;
        }
        let Some(nbr) = self.graph.neighbors(node).next() else {
            return false;
        };
        self.graph
            .neighbors(nbr)
            .filter(|&sib| self.degree(sib) == 1)
            .count()
            == 1
    }

    /// Lone leaves in ascending order.
    pub fn lone_leaves(&self) -> Vec<QubitId> {
        self.labels
            .keys()
            .copied()
            .filter(|&n| self.is_lone_leaf(n))
            .collect()
    }

    /// Map from each lone leaf's neighbour to the lone leaf.
    pub fn lone_leaf_map(&self) -> BTreeMap<QubitId, QubitId> {
        self.lone_leaves()
            .into_iter()
            .filter_map(|leaf| self.graph.neighbors(leaf).next().map(|nbr| (nbr, leaf)))
            .collect()
    }

    /// Shortest path from `from` to `to`, both ends included.
    ///
    /// Breadth-first search over neighbours in ascending order, so ties
    /// resolve to the lowest labels.
    pub fn shortest_path(&self, from: QubitId, to: QubitId) -> Option<Vec<QubitId>> {
        if !self.contains(from) || !self.contains(to) {
            return None;
        }
        if from == to {
            return Some(vec![from]);
        }

        let mut visited: FxHashMap<QubitId, Option<QubitId>> = FxHashMap::default();
        let mut queue = VecDeque::new();

        visited.insert(from, None);
        queue.push_back(from);

        while let Some(current) = queue.pop_front() {
            for neighbor in self.neighbors(current) {
                if visited.contains_key(&neighbor) {
                    continue;
                }

                visited.insert(neighbor, Some(current));

                if neighbor == to {
                    let mut path = vec![to];
                    let mut node = to;
                    while let Some(Some(prev)) = visited.get(&node) {
                        path.push(*prev);
                        node = *prev;
                    }
                    path.reverse();
                    return Some(path);
                }

                queue.push_back(neighbor);
            }
        }

        None
    }

    /// Get a reference to the underlying graph.
    pub fn graph(&self) -> &UnGraphMap<QubitId, ()> {
        &self.graph
    }
}

fn label_overflow() -> RouteError {
    RouteError::BuildFailure("heavy-graph labels exceed the u32 wire range".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coupling::CouplingGraph;
    use crate::line_graph::Cell;

    fn heavy(edges: &[(u32, u32)]) -> HeavyGraph {
        let cg = CouplingGraph::from_edges(edges.iter().copied());
        let root = RootGraph::invert(&cg).unwrap();
        HeavyGraph::from_root(&root).unwrap()
    }

    #[test]
    fn test_single_edge_is_a_path() {
        let h = heavy(&[(0, 1)]);
        assert_eq!(h.nodes(), vec![QubitId(0), QubitId(1), QubitId(2)]);
        assert_eq!(h.neighbors(QubitId(2)), vec![QubitId(0), QubitId(1)]);
        assert_eq!(h.node(QubitId(2)), Some(HeavyNode::Cell(CellId(0))));
        assert!(h.lone_leaves().is_empty());
        assert_eq!(h.register_size().unwrap(), 3);
    }

    #[test]
    fn test_path_labels_and_lone_leaves() {
        let h = heavy(&[(0, 1), (1, 2)]);

        // 0 - 3 - 1 - 4 - 2
        assert_eq!(h.num_nodes(), 5);
        assert_eq!(h.neighbors(QubitId(3)), vec![QubitId(0), QubitId(1)]);
        assert_eq!(h.neighbors(QubitId(4)), vec![QubitId(1), QubitId(2)]);
        assert_eq!(h.lone_leaves(), vec![QubitId(0), QubitId(2)]);

        let map = h.lone_leaf_map();
        assert_eq!(map.get(&QubitId(3)), Some(&QubitId(0)));
        assert_eq!(map.get(&QubitId(4)), Some(&QubitId(2)));
    }

    #[test]
    fn test_triangle_is_a_star() {
        let h = heavy(&[(0, 1), (1, 2), (0, 2)]);
        assert_eq!(h.num_nodes(), 4);
        assert_eq!(h.degree(QubitId(3)), 3);
        assert!(h.lone_leaves().is_empty());
        assert_eq!(
            h.shortest_path(QubitId(0), QubitId(2)),
            Some(vec![QubitId(0), QubitId(3), QubitId(2)])
        );
    }

    #[test]
    fn test_single_wire() {
        let mut cg = CouplingGraph::default();
        cg.add_wire(QubitId(0));
        let root = RootGraph::invert(&cg).unwrap();
        let h = HeavyGraph::from_root(&root).unwrap();

        assert_eq!(h.num_nodes(), 3);
        assert_eq!(h.degree(QubitId(0)), 2);
        assert!(h.lone_leaves().is_empty());
    }

    #[test]
    fn test_interacting_wires_are_two_hops_apart() {
        let edges = [(0, 1), (0, 2), (1, 2), (1, 3), (2, 3), (3, 4)];
        let h = heavy(&edges);
        for (a, b) in edges {
            let path = h.shortest_path(QubitId(a), QubitId(b)).unwrap();
            assert_eq!(path.len(), 3, "path {a} -> {b}: {path:?}");
        }
    }

    #[test]
    fn test_leaf_leaf_edge_is_rejected() {
        let root = RootGraph::from_cells(vec![Cell::Leaf(QubitId(0)), Cell::Leaf(QubitId(0))]);
        assert!(matches!(
            build_heavy_graph(&root),
            Err(RouteError::BuildFailure(_))
        ));
    }

    #[test]
    fn test_ambiguous_shared_node() {
        let root = RootGraph::from_cells(vec![
            Cell::Clique(vec![QubitId(0), QubitId(1)]),
            Cell::Clique(vec![QubitId(0), QubitId(1)]),
        ]);
        assert!(matches!(
            build_heavy_graph(&root),
            Err(RouteError::AmbiguousSharedNode { shared: 2, .. })
        ));
    }

    #[test]
    fn test_labels_up_to_the_last_wire_fit() {
        // Cell label u32::MAX - 1, register u32::MAX.
        let h = heavy(&[(0, u32::MAX - 2)]);
        assert_eq!(
            h.node(QubitId(u32::MAX - 1)),
            Some(HeavyNode::Cell(CellId(0)))
        );
        assert_eq!(h.register_size().unwrap(), u32::MAX);
    }

    #[test]
    fn test_register_size_overflow_is_an_error() {
        // The cell takes label u32::MAX, so the register would need 2^32 wires.
        let h = heavy(&[(0, u32::MAX - 1)]);
        assert!(matches!(h.register_size(), Err(RouteError::BuildFailure(_))));
    }

    #[test]
    fn test_wire_at_u32_max_is_an_error() {
        let cg = CouplingGraph::from_edges([(0, u32::MAX)]);
        let root = RootGraph::invert(&cg).unwrap();
        assert!(matches!(
            HeavyGraph::from_root(&root),
            Err(RouteError::BuildFailure(_))
        ));
    }

    #[test]
    fn test_unreachable_path() {
        let h = heavy(&[(0, 1)]);
        assert_eq!(h.shortest_path(QubitId(0), QubitId(9)), None);
    }
}
