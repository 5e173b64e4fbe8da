//! Single-row layout.

use super::{
    layout::{DiagramLayout, LayoutEdge, LayoutNodeBox, LayoutPoint, LayoutRect, Palette},
    text::{capacity, wrap_label},
    ConceptGraph,
};

/// Steps in one row, left to right, joined by horizontal arrows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearLayout {
    pub padding: f64,
    pub node_width: f64,
    pub node_height: f64,
    pub gap: f64,
}

impl Default for LinearLayout {
    fn default() -> Self {
        Self {
            padding: 20.0,
            node_width: 220.0,
            node_height: 48.0,
            gap: 40.0,
        }
    }
}

impl LinearLayout {
    /// Canvas size for `n` nodes; an empty graph still gets one slot.
    pub fn canvas_size(&self, n: usize) -> (f64, f64) {
        let slots = n.max(1) as f64;
        let width = self.padding * 2.0 + slots * (self.node_width + self.gap) - self.gap;
        let height = self.padding * 2.0 + self.node_height;
        (width, height)
    }

    pub fn layout(&self, graph: &ConceptGraph) -> DiagramLayout {
        let (width, height) = self.canvas_size(graph.len());
        let (max_chars, max_lines) = capacity(self.node_width, self.node_height);

        let nodes: Vec<LayoutNodeBox> = graph
            .labels()
            .enumerate()
            .map(|(i, label)| LayoutNodeBox {
                step: Some(i),
                rect: LayoutRect::new(
                    self.padding + i as f64 * (self.node_width + self.gap),
                    self.padding,
                    self.node_width,
                    self.node_height,
                ),
                corner_radius: 10.0,
                label_lines: wrap_label(label, max_chars, max_lines),
            })
            .collect();

        let mid_y = self.padding + self.node_height / 2.0;
        let edges = nodes
            .windows(2)
            .map(|pair| LayoutEdge {
                start: LayoutPoint::new(pair[0].rect.right(), mid_y),
                end: LayoutPoint::new(pair[1].rect.x, mid_y),
                arrow: true,
            })
            .collect();

        DiagramLayout {
            width: width.ceil() as u32,
            height: height.ceil() as u32,
            palette: Palette::dark(),
            header: None,
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
    fn test_canvas_width_formula() {
        let layout = LinearLayout::default();
        assert_eq!(layout.canvas_size(0), (260.0, 88.0));
        assert_eq!(layout.canvas_size(1), (260.0, 88.0));
        assert_eq!(layout.canvas_size(3), (20.0 * 2.0 + 3.0 * 260.0 - 40.0, 88.0));
    }

    #[test]
    fn test_connectors_run_right_mid_to_left_mid() {
        let diagram = LinearLayout::default().layout(&graph(3));
        assert_eq!(diagram.nodes.len(), 3);
        assert_eq!(diagram.edges.len(), 2);
        let edge = diagram.edges[0];
        assert_eq!(edge.start, LayoutPoint::new(240.0, 44.0));
        assert_eq!(edge.end, LayoutPoint::new(280.0, 44.0));
        assert!(edge.arrow);
        assert_eq!(diagram.width, 780);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let layout = LinearLayout::default();
        assert_eq!(layout.layout(&graph(5)), layout.layout(&graph(5)));
    }
}
