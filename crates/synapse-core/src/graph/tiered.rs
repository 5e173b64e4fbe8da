//! Three-tier top-to-bottom layout.
//!
//! Steps are split into an opening tier (the first two steps), a development
//! tier and a closing tier. Each node drops a vertical connector towards the
//! next tier; connectors never skip a tier.

use std::ops::Range;

use super::{
    layout::{DiagramLayout, Header, LayoutEdge, LayoutNodeBox, LayoutPoint, LayoutRect, Palette},
    text::{capacity, wrap_label},
    ConceptGraph,
};

/// Labels shown when a plan has no steps yet.
pub const PLACEHOLDER_TIERS: [&str; 3] = ["Introduction", "Development", "Synthesis"];

/// Splits `n` steps into three consecutive tiers.
///
/// Tier 0 holds the first two steps, tier 1 the next `max(2, n / 3)` and
/// tier 2 the rest. Trailing tiers may be empty.
pub fn partition(n: usize) -> [Range<usize>; 3] {
    let first_end = n.min(2);
    let mid = (n / 3).max(2);
    let second_end = (2 + mid).min(n);
    [0..first_end, first_end..second_end, second_end..n]
}

/// Tier holding step `index` of `n`.
pub fn tier_of(index: usize, n: usize) -> Option<usize> {
    partition(n).iter().position(|tier| tier.contains(&index))
}

/// Tiered layout parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TieredLayout {
    pub min_width: f64,
    pub min_height: f64,
    /// Left and right canvas margin
    pub margin: f64,
    /// y of the first tier
    pub top: f64,
    /// Vertical distance between tier tops
    pub tier_spacing: f64,
    pub node_width: f64,
    pub node_height: f64,
    /// Smallest horizontal gap before the canvas is widened
    pub min_gap: f64,
    /// Connectors stop this far above the next tier
    pub connector_clearance: f64,
}

impl Default for TieredLayout {
    fn default() -> Self {
        Self {
            min_width: 1000.0,
            min_height: 900.0,
            margin: 40.0,
            top: 100.0,
            tier_spacing: 220.0,
            node_width: 280.0,
            node_height: 80.0,
            min_gap: 20.0,
            connector_clearance: 20.0,
        }
    }
}

impl TieredLayout {
    /// y of the top of tier `t`.
    pub fn tier_y(&self, t: usize) -> f64 {
        self.top + t as f64 * self.tier_spacing
    }

    fn row_width(&self, cols: usize) -> f64 {
        let cols = cols as f64;
        2.0 * self.margin + cols * self.node_width + (cols - 1.0).max(0.0) * self.min_gap
    }

    /// x of each node in a row of `cols` nodes on a canvas `width` wide.
    fn row_xs(&self, cols: usize, width: f64) -> Vec<f64> {
        if cols == 1 {
            return vec![(width - self.node_width) / 2.0];
        }
        let free = width - 2.0 * self.margin - cols as f64 * self.node_width;
        let gap = free / (cols as f64 - 1.0);
        (0..cols)
            .map(|i| self.margin + i as f64 * (self.node_width + gap))
            .collect()
    }

    pub fn layout(&self, graph: &ConceptGraph, header: Option<&str>) -> DiagramLayout {
        // (step index, label) per tier
        let tiers: Vec<Vec<(Option<usize>, String)>> = if graph.is_empty() {
            PLACEHOLDER_TIERS
                .iter()
                .map(|label| vec![(None, (*label).to_string())])
                .collect()
        } else {
            let labels: Vec<&str> = graph.labels().collect();
            partition(graph.len())
                .into_iter()
                .map(|range| {
                    range
                        .map(|i| (Some(i), labels[i].to_string()))
                        .collect::<Vec<_>>()
                })
                .collect()
        };

        let widest = tiers.iter().map(Vec::len).max().unwrap_or(0);
        let width = self.min_width.max(self.row_width(widest));
        let last_tier = tiers.iter().rposition(|row| !row.is_empty()).unwrap_or(0);
        let height = self
            .min_height
            .max(self.tier_y(last_tier) + self.node_height + self.margin);

        let (max_chars, max_lines) = capacity(self.node_width, self.node_height);
        let mut nodes = Vec::new();
        let mut edges = Vec::new();
        for (t, row) in tiers.iter().enumerate() {
            if row.is_empty() {
                continue;
            }
            let y = self.tier_y(t);
            let next_has_nodes = tiers.get(t + 1).is_some_and(|next| !next.is_empty());
            for ((step, label), x) in row.iter().zip(self.row_xs(row.len(), width)) {
                let rect = LayoutRect::new(x, y, self.node_width, self.node_height);
                if next_has_nodes {
                    let cx = rect.center().x;
                    edges.push(LayoutEdge {
                        start: LayoutPoint::new(cx, rect.bottom()),
                        end: LayoutPoint::new(cx, self.tier_y(t + 1) - self.connector_clearance),
                        arrow: true,
                    });
                }
                nodes.push(LayoutNodeBox {
                    step: *step,
                    rect,
                    corner_radius: 12.0,
                    label_lines: wrap_label(label, max_chars, max_lines),
                });
            }
        }

        let header = header
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(|text| Header {
                rect: LayoutRect::new(20.0, 20.0, width - 40.0, 50.0),
                text: text.to_string(),
            });

        DiagramLayout {
            width: width.ceil() as u32,
            height: height.ceil() as u32,
            palette: Palette::light(),
            header,
            nodes,
            edges,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphNode;

    fn graph(n: usize) -> ConceptGraph {
        ConceptGraph {
            nodes: (0..n)
                .map(|i| GraphNode {
                    id: format!("s{i}"),
                    label: format!("Step {i}"),
                })
                .collect(),
            edges: vec![],
        }
    }

    #[test]
    fn test_partition_of_ten() {
        assert_eq!(partition(10), [0..2, 2..5, 5..10]);
        assert_eq!(tier_of(1, 10), Some(0));
        assert_eq!(tier_of(4, 10), Some(1));
        assert_eq!(tier_of(9, 10), Some(2));
        assert_eq!(tier_of(10, 10), None);
    }

    #[test]
    fn test_partition_small_plans() {
        assert_eq!(partition(0), [0..0, 0..0, 0..0]);
        assert_eq!(partition(1), [0..1, 1..1, 1..1]);
        assert_eq!(partition(3), [0..2, 2..3, 3..3]);
        assert_eq!(partition(4), [0..2, 2..4, 4..4]);
        assert_eq!(partition(12), [0..2, 2..6, 6..12]);
    }

    #[test]
    fn test_ten_steps_edges_cross_one_tier_boundary() {
        let layout = TieredLayout::default();
        let diagram = layout.layout(&graph(10), Some("Topic"));
        assert_eq!(diagram.nodes.len(), 10);
        // tiers 0 and 1 connect downwards, tier 2 has no tier below
        assert_eq!(diagram.edges.len(), 5);
        for edge in &diagram.edges {
            let from_tier = ((edge.start.y - layout.node_height - layout.top) / layout.tier_spacing)
                .round() as usize;
            assert!(edge.arrow);
            assert!(edge.end.y > edge.start.y);
            assert!(edge.end.y < layout.tier_y(from_tier + 1));
        }
        for node in diagram.step_nodes() {
            let tier = tier_of(node.step.unwrap(), 10).unwrap();
            assert_eq!(node.rect.y, layout.tier_y(tier));
        }
    }

    #[test]
    fn test_wide_tier_widens_canvas_without_overlap() {
        let diagram = TieredLayout::default().layout(&graph(10), None);
        // five boxes in the last tier
        assert!(diagram.width >= 1560);
        let last: Vec<&LayoutNodeBox> = diagram.nodes.iter().skip(5).collect();
        for pair in last.windows(2) {
            assert!(pair[0].rect.right() < pair[1].rect.x);
        }
        assert!(last[4].rect.right() <= f64::from(diagram.width) - 40.0 + 1e-9);
        assert!(diagram.header.is_none());
    }

    #[test]
    fn test_single_node_is_centred() {
        let diagram = TieredLayout::default().layout(&graph(1), None);
        assert_eq!(diagram.width, 1000);
        assert_eq!(diagram.nodes[0].rect.x, 360.0);
        assert!(diagram.edges.is_empty());
    }

    #[test]
    fn test_empty_plan_shows_placeholders() {
        let diagram = TieredLayout::default().layout(&graph(0), Some("  Empty  "));
        let labels: Vec<&str> = diagram
            .nodes
            .iter()
            .map(|n| n.label_lines[0].as_str())
            .collect();
        assert_eq!(labels, PLACEHOLDER_TIERS);
        assert_eq!(diagram.step_nodes().count(), 0);
        assert_eq!(diagram.edges.len(), 2);
        let header = diagram.header.unwrap();
        assert_eq!(header.text, "Empty");
        assert_eq!(header.rect, LayoutRect::new(20.0, 20.0, 960.0, 50.0));
    }
}
