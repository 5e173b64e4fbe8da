//! Steps arranged on a circle around the plan topic.

use std::f64::consts::PI;

use super::{
    layout::{DiagramLayout, LayoutEdge, LayoutNodeBox, LayoutPoint, LayoutRect, Palette},
    text::{capacity, wrap_label},
    ConceptGraph,
};

/// Radial layout: a central topic box with one spoke per step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialLayout {
    pub width: f64,
    pub height: f64,
    pub center_width: f64,
    pub center_height: f64,
    pub node_width: f64,
    pub node_height: f64,
    /// Distance kept between the ring and the canvas edge
    pub margin: f64,
}

impl Default for RadialLayout {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 600.0,
            center_width: 260.0,
            center_height: 70.0,
            node_width: 220.0,
            node_height: 58.0,
            margin: 120.0,
        }
    }
}

/// Angle of node `index` out of `count`; node 0 sits at the top.
pub fn node_angle(index: usize, count: usize) -> f64 {
    let count = count.max(1) as f64;
    2.0 * PI * index as f64 / count - PI / 2.0
}

impl RadialLayout {
    pub fn center(&self) -> LayoutPoint {
        LayoutPoint::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn radius(&self) -> f64 {
        self.width.min(self.height) / 2.0 - self.margin
    }

    pub fn layout(&self, graph: &ConceptGraph, topic: &str) -> DiagramLayout {
        let center = self.center();
        let radius = self.radius();
        let count = graph.len();

        let center_rect = LayoutRect::centered(center, self.center_width, self.center_height);
        let (center_chars, center_lines) = capacity(self.center_width, self.center_height);
        let mut nodes = vec![LayoutNodeBox {
            step: None,
            rect: center_rect,
            corner_radius: 12.0,
            label_lines: wrap_label(topic, center_chars, center_lines),
        }];

        let (max_chars, max_lines) = capacity(self.node_width, self.node_height);
        let mut edges = Vec::with_capacity(count);
        for (i, label) in graph.labels().enumerate() {
            let angle = node_angle(i, count);
            let node_center = LayoutPoint::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            );
            let rect = LayoutRect::centered(node_center, self.node_width, self.node_height);
            edges.push(LayoutEdge {
                start: center_rect.border_toward(node_center),
                end: rect.border_toward(center),
                arrow: true,
            });
            nodes.push(LayoutNodeBox {
                step: Some(i),
                rect,
                corner_radius: 10.0,
                label_lines: wrap_label(label, max_chars, max_lines),
            });
        }

        DiagramLayout {
            width: self.width.ceil() as u32,
            height: self.height.ceil() as u32,
            palette: Palette::dark(),
            header: None,
            nodes,
            edges,
        }
    }
}
