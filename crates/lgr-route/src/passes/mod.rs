//! Built-in routing passes.
//!
//! Listed in pipeline order:
//! - [`analysis`]: derive the coupling, root and heavy graphs
//! - [`layout`]: resize the register to the heavy graph
//! - [`routing`]: bracket every interaction with swaps
//! - [`lone_leaf`]: drop wires that only ever shuttle to one cell
//! - [`cleanup`]: remove redundant swaps
//! - [`compact`]: drop idle wires

pub mod analysis;
pub mod cleanup;
pub mod compact;
pub mod layout;
pub mod lone_leaf;
pub mod routing;

pub use analysis::{CouplingGraphExtraction, HeavyGraphConstruction, LineGraphInversion};
pub use cleanup::{DoubleSwapCancellation, OuterSwapRemoval};
pub use compact::IdleWireRemoval;
pub use layout::RegisterResize;
pub use lone_leaf::{LabelFix, LoneLeafElimination};
pub use routing::LineGraphRouting;
