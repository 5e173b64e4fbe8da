//! Concept graphs derived from plan steps, and their layouts.
//!
//! A [`ConceptGraph`] has one node per step (`s0`, `s1`, ...) and one edge
//! from each step to the next. It is never persisted. The layout modules
//! turn a graph into a positioned [`DiagramLayout`] that
//! [`crate::render`] paints:
//!
//! - [`LinearLayout`]: one row, left to right
//! - [`RadialLayout`]: steps around a central topic node
//! - [`TieredLayout`]: three horizontal tiers, top to bottom
//!
//! All layouts are deterministic: the same graph always yields the same
//! layout.

use serde::Serialize;

use crate::models::Step;

pub mod layout;
pub mod linear;
pub mod radial;
pub mod text;
pub mod tiered;

pub use layout::{
    DiagramLayout, Header, LayoutEdge, LayoutNodeBox, LayoutPoint, LayoutRect, Palette, Rgb,
};
pub use linear::LinearLayout;
pub use radial::RadialLayout;
pub use tiered::TieredLayout;

/// Prefix added to the label of the highlighted step.
pub const HIGHLIGHT_MARKER: &str = "⭐ ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
}

/// Node/edge view of a plan's step sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct ConceptGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

fn node_id(index: usize) -> String {
    format!("s{index}")
}

impl ConceptGraph {
    /// Builds the graph; an out-of-range `highlighted` index is ignored.
    pub fn build(steps: &[Step], highlighted: Option<usize>) -> Self {
        let nodes = steps
            .iter()
            .enumerate()
            .map(|(index, step)| GraphNode {
                id: node_id(index),
                label: if highlighted == Some(index) {
                    format!("{HIGHLIGHT_MARKER}{}", step.title)
                } else {
                    step.title.clone()
                },
            })
            .collect();
        let edges = (1..steps.len())
            .map(|index| GraphEdge {
                from: node_id(index - 1),
                to: node_id(index),
            })
            .collect();
        Self { nodes, edges }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node labels in step order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|node| node.label.as_str())
    }
}
