//! Root-graph reconstruction: inverting the line graph.
//!
//! Given a connected coupling graph `L`, [`RootGraph::invert`] finds a graph
//! `g` whose line graph is `L`: every wire of `L` becomes one edge of `g`, and
//! two wires interact exactly when their edges share an endpoint. The
//! endpoints of `g` are *cells*, groups of wires that pairwise interact.
//!
//! The reconstruction is Roussopoulos' clique partition. A starting cell is
//! picked from the lowest edge of `L`; the remaining cells are grown one vertex
//! at a time from the wires already partitioned. Every wire ends up in exactly
//! two cells; wires that found only one get a pendant [`Cell::Leaf`].
//!
//! Connected graphs have a unique root, with one exception: the triangle `K3`
//! is the line graph of both `K3` and the claw `K1,3`. The inversion always
//! returns the claw.

use std::collections::{BTreeMap, BTreeSet};

use lgr_ir::QubitId;
use petgraph::graphmap::UnGraphMap;
use tracing::{debug, trace};

use crate::coupling::CouplingGraph;
use crate::error::{RouteError, RouteResult};

type Adjacency = BTreeMap<QubitId, BTreeSet<QubitId>>;

/// Index of a cell in a [`RootGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellId(pub u32);

impl CellId {
    /// Position in [`RootGraph::cells`].
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A vertex of the root graph.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Cell {
    /// Pendant vertex: the free end of a single wire.
    Leaf(QubitId),
    /// Vertex where the edges of all listed wires meet. Wires are sorted.
    Clique(Vec<QubitId>),
}

impl Cell {
    /// Wires incident to this vertex.
    pub fn wires(&self) -> &[QubitId] {
        match self {
            Cell::Leaf(w) => std::slice::from_ref(w),
            Cell::Clique(ws) => ws,
        }
    }

    /// Check if this is a pendant vertex.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Cell::Leaf(_))
    }

    /// Check whether `wire` meets at this vertex.
    pub fn contains(&self, wire: QubitId) -> bool {
        self.wires().contains(&wire)
    }
}

/// A graph whose line graph is a given coupling graph.
#[derive(Debug, Clone, Default)]
pub struct RootGraph {
    cells: Vec<Cell>,
    graph: UnGraphMap<CellId, ()>,
}

impl RootGraph {
    /// Reconstruct the root graph of `coupling`.
    pub fn invert(coupling: &CouplingGraph) -> RouteResult<Self> {
        let wires = coupling.wires();
        match wires.as_slice() {
            [] => return Ok(Self::default()),
            [v] => {
                // A lone wire is one edge between two distinct vertices.
                return Ok(Self::from_cells(vec![
                    Cell::Clique(vec![*v]),
                    Cell::Clique(vec![*v]),
                ]));
            }
            _ => {}
        }

        let components = coupling.component_count();
        if components > 1 {
            return Err(RouteError::DisconnectedCouplingGraph { components });
        }

        let adj = coupling.adjacency();
        let (u, v) = lowest_edge(&adj).ok_or_else(|| {
            RouteError::NotALineGraph("graph with several wires has no edges".into())
        })?;

        let start = select_starting_cell(&adj, u, v)?;
        debug!("Starting cell from edge ({}, {}): {:?}", u, v, start);
        let partition = find_partition(&adj, start)?;

        let mut appearances: BTreeMap<QubitId, usize> = wires.iter().map(|&w| (w, 0)).collect();
        for cell in &partition {
            for w in cell {
                *appearances.entry(*w).or_insert(0) += 1;
            }
        }

        let mut cells: Vec<Cell> = partition.into_iter().map(Cell::Clique).collect();
        for (&wire, &count) in &appearances {
            match count {
                1 => cells.push(Cell::Leaf(wire)),
                2 => {}
                0 => {
                    return Err(RouteError::NotALineGraph(format!(
                        "wire {wire} is not covered by any cell"
                    )));
                }
                _ => {
                    return Err(RouteError::NotALineGraph(format!(
                        "wire {wire} lies in {count} cells"
                    )));
                }
            }
        }

        let root = Self::from_cells(cells);
        for (a, b) in root.edges() {
            let shared = root.shared_wires(a, b);
            if shared.len() > 1 {
                return Err(RouteError::NotALineGraph(format!(
                    "cells {} and {} share {} wires",
                    a.0,
                    b.0,
                    shared.len()
                )));
            }
        }
        debug!(
            "Inverted line graph with {} wires into root graph with {} cells",
            wires.len(),
            root.num_cells()
        );
        Ok(root)
    }

    /// Build a root graph whose vertices are `cells`, joining any two cells
    /// that share a wire.
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_cells(cells: Vec<Cell>) -> Self {
        let mut graph = UnGraphMap::new();
        let mut incident: BTreeMap<QubitId, Vec<CellId>> = BTreeMap::new();
        for (idx, cell) in cells.iter().enumerate() {
            let id = CellId(idx as u32);
            graph.add_node(id);
            for &w in cell.wires() {
                incident.entry(w).or_default().push(id);
            }
        }
        for ids in incident.values() {
            for (i, &a) in ids.iter().enumerate() {
                for &b in &ids[i + 1..] {
                    graph.add_edge(a, b, ());
                }
            }
        }
        Self { cells, graph }
    }

    /// All cells, indexed by [`CellId`].
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Get a cell by id.
    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id.index())
    }

    /// Number of vertices.
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// Number of edges, which equals the number of wires.
    pub fn num_edges(&self) -> usize {
        self.graph.edge_count()
    }

    /// Check if the root graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Edges `(a, b)` with `a < b`, in ascending order.
    pub fn edges(&self) -> Vec<(CellId, CellId)> {
        let mut edges: Vec<_> = self
            .graph
            .all_edges()
            .map(|(a, b, _)| if a < b { (a, b) } else { (b, a) })
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Wires common to cells `a` and `b`.
    pub fn shared_wires(&self, a: CellId, b: CellId) -> Vec<QubitId> {
        match (self.cell(a), self.cell(b)) {
            (Some(ca), Some(cb)) => ca
                .wires()
                .iter()
                .copied()
                .filter(|&w| cb.contains(w))
                .collect(),
            _ => vec![],
        }
    }

    /// Number of leaf cells.
    pub fn num_leaves(&self) -> usize {
        self.cells.iter().filter(|c| c.is_leaf()).count()
    }

    /// The line graph of this root graph, with each edge named by the wire
    /// its two cells share.
    pub fn line_graph(&self) -> CouplingGraph {
        let mut by_cell: BTreeMap<CellId, Vec<QubitId>> = BTreeMap::new();
        for (a, b) in self.edges() {
            for w in self.shared_wires(a, b) {
                by_cell.entry(a).or_default().push(w);
                by_cell.entry(b).or_default().push(w);
            }
        }

        let mut line = CouplingGraph::default();
        for wires in by_cell.values() {
            for (i, &x) in wires.iter().enumerate() {
                line.add_wire(x);
                for &y in &wires[i + 1..] {
                    line.add_edge(x, y);
                }
            }
        }
        line
    }
}

/// Lowest `(u, v)` with `u < v`.
fn lowest_edge(adj: &Adjacency) -> Option<(QubitId, QubitId)> {
    adj.iter()
        .find_map(|(&u, nbrs)| nbrs.iter().copied().find(|&v| v > u).map(|v| (u, v)))
}

/// Triangles containing edge `(u, v)`, ordered by their third vertex.
fn triangles(adj: &Adjacency, u: QubitId, v: QubitId) -> Vec<[QubitId; 3]> {
    match (adj.get(&u), adj.get(&v)) {
        (Some(nu), Some(nv)) => nu.intersection(nv).map(|&x| [u, v, x]).collect(),
        _ => vec![],
    }
}

/// A triangle is odd when some vertex outside it is adjacent to exactly one
/// or exactly three of its vertices.
fn is_odd_triangle(adj: &Adjacency, triangle: &[QubitId; 3]) -> bool {
    let mut hits: BTreeMap<QubitId, usize> = BTreeMap::new();
    for t in triangle {
        if let Some(nbrs) = adj.get(t) {
            for &x in nbrs {
                if !triangle.contains(&x) {
                    *hits.entry(x).or_insert(0) += 1;
                }
            }
        }
    }
    hits.values().any(|&n| n == 1 || n == 3)
}

fn is_clique(adj: &Adjacency, nodes: &[QubitId]) -> bool {
    nodes.iter().enumerate().all(|(i, a)| {
        nodes[i + 1..]
            .iter()
            .all(|b| adj.get(a).is_some_and(|nbrs| nbrs.contains(b)))
    })
}

/// Pick the cell containing edge `(u, v)` from which the partition grows.
fn select_starting_cell(adj: &Adjacency, u: QubitId, v: QubitId) -> RouteResult<Vec<QubitId>> {
    let tris = triangles(adj, u, v);
    trace!("Edge ({}, {}) lies in {} triangles", u, v, tris.len());

    match tris.as_slice() {
        [] => Ok(vec![u, v]),
        [[a, b, c]] => {
            // The other two edges decide whether the triangle is a vertex
            // of the root or a triangle of it.
            if triangles(adj, *a, *c).len() != 1 {
                select_starting_cell(adj, *a, *c)
            } else if triangles(adj, *b, *c).len() != 1 {
                select_starting_cell(adj, *b, *c)
            } else {
                Ok(vec![*a, *b, *c])
            }
        }
        _ => {
            let r = tris.len();
            let odd: Vec<&[QubitId; 3]> = tris.iter().filter(|t| is_odd_triangle(adj, t)).collect();
            let s = odd.len();

            if r == 2 && s == 0 {
                // Either triangle is a valid cell.
                Ok(tris[r - 1].to_vec())
            } else if r - 1 <= s {
                let nodes: BTreeSet<QubitId> = odd.iter().flat_map(|t| t.iter().copied()).collect();
                let nodes: Vec<QubitId> = nodes.into_iter().collect();
                if is_clique(adj, &nodes) {
                    Ok(nodes)
                } else {
                    Err(RouteError::NotALineGraph(format!(
                        "odd triangles on edge ({u}, {v}) do not form a clique"
                    )))
                }
            } else {
                Err(RouteError::NotALineGraph(format!(
                    "edge ({u}, {v}) lies in {r} triangles of which only {s} are odd"
                )))
            }
        }
    }
}

/// Remove every edge among `cell` from `adj`, returning how many were removed.
fn remove_clique(adj: &mut Adjacency, cell: &[QubitId]) -> usize {
    let mut removed = 0;
    for (i, &a) in cell.iter().enumerate() {
        for &b in &cell[i + 1..] {
            let had = adj.get_mut(&a).is_some_and(|nbrs| nbrs.remove(&b));
            if let Some(nbrs) = adj.get_mut(&b) {
                nbrs.remove(&a);
            }
            if had {
                removed += 1;
            }
        }
    }
    removed
}

/// Partition the edges of `adj` into cliques, starting from `start`.
fn find_partition(adj: &Adjacency, start: Vec<QubitId>) -> RouteResult<Vec<Vec<QubitId>>> {
    let mut remaining = adj.clone();
    let mut edges_left = remaining.values().map(BTreeSet::len).sum::<usize>() / 2;

    edges_left -= remove_clique(&mut remaining, &start);
    let mut pending: Vec<QubitId> = start.clone();
    let mut partition = vec![start];

    while edges_left > 0 {
        let u = pending.pop().ok_or_else(|| {
            RouteError::NotALineGraph("edges left over after partitioning".into())
        })?;
        let Some(nbrs) = remaining.get(&u) else {
            continue;
        };
        if nbrs.is_empty() {
            continue;
        }

        let mut cell: Vec<QubitId> = std::iter::once(u).chain(nbrs.iter().copied()).collect();
        cell.sort_unstable();
        if !is_clique(&remaining, &cell) {
            return Err(RouteError::NotALineGraph(format!(
                "neighbourhood of {u} is not a clique"
            )));
        }
        trace!("Cell {:?} grown from {}", cell, u);

        edges_left -= remove_clique(&mut remaining, &cell);
        pending.extend(cell.iter().copied());
        partition.push(cell);
    }

    for cell in &mut partition {
        cell.sort_unstable();
    }
    Ok(partition)
}
