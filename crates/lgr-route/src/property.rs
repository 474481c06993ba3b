//! `PropertySet` for pass communication.
//!
//! Each routing call owns one [`PropertySet`]. The analysis passes fill in
//! the coupling, root and heavy graphs; the transformation passes read them
//! and record what they changed in [`RoutingStats`].
//!
//! ```
//! use lgr_route::PropertySet;
//!
//! let props = PropertySet::new();
//! assert!(props.heavy_graph.is_none());
//! assert_eq!(props.stats.swaps_inserted, 0);
//! ```

use serde::Serialize;

use crate::coupling::CouplingGraph;
use crate::heavy::HeavyGraph;
use crate::line_graph::RootGraph;

/// Counters filled in by the transformation passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoutingStats {
    /// Swaps emitted by the router.
    pub swaps_inserted: usize,
    /// `pad` operations consumed by the router.
    pub pads_consumed: usize,
    /// Swaps dropped because they touched a lone leaf.
    pub lone_leaf_swaps_dropped: usize,
    /// Swaps removed in back-to-back pairs.
    pub double_swaps_cancelled: usize,
    /// Swaps removed at the circuit boundary.
    pub outer_swaps_removed: usize,
    /// Wires removed from the final register.
    pub idle_wires_removed: usize,
}

/// Properties shared between the passes of one routing call.
#[derive(Debug, Clone, Default)]
pub struct PropertySet {
    /// Interaction graph of the input circuit.
    pub coupling_graph: Option<CouplingGraph>,
    /// Root graph whose line graph is the coupling graph.
    pub root_graph: Option<RootGraph>,
    /// Labeled heavy graph the circuit is routed on.
    pub heavy_graph: Option<HeavyGraph>,
    /// What the transformation passes did.
    pub stats: RoutingStats,
}

impl PropertySet {
    /// Create a new empty property set.
    pub fn new() -> Self {
        Self::default()
    }
}
