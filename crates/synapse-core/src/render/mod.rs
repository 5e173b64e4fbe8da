//! Painting diagram layouts.
//!
//! [`paint`] walks a [`DiagramLayout`] and issues drawing calls against a
//! [`Canvas`]. Two canvases exist: [`svg`] always, and a PNG raster canvas
//! behind the `raster` feature. Both are pure functions of the layout.

use crate::graph::{
    text::LINE_HEIGHT, DiagramLayout, LayoutEdge, LayoutPoint, LayoutRect, Palette, Rgb,
};

#[cfg(feature = "raster")]
mod font;
#[cfg(feature = "raster")]
mod raster;
pub mod svg;

pub use svg::render_svg;

/// Arrowhead length along the edge.
pub const ARROW_LENGTH: f64 = 8.0;
/// Half of the arrowhead base width.
pub const ARROW_HALF_WIDTH: f64 = 4.0;
/// Corner radius of the header band.
const HEADER_RADIUS: f64 = 8.0;

/// Drawing surface used by [`paint`].
pub trait Canvas {
    /// Filled rounded rectangle with an optional outline.
    fn rounded_rect(&mut self, rect: LayoutRect, radius: f64, fill: Rgb, stroke: Option<Rgb>);

    fn line(&mut self, from: LayoutPoint, to: LayoutPoint, color: Rgb);

    /// Filled polygon.
    fn polygon(&mut self, points: &[LayoutPoint], color: Rgb);

    /// One line of text, centred on `center`.
    fn text(&mut self, center: LayoutPoint, text: &str, color: Rgb);
}

/// Triangle for an arrowhead pointing at `edge.end`, or `None` for a
/// zero-length edge.
pub fn arrowhead(edge: &LayoutEdge) -> Option<[LayoutPoint; 3]> {
    let (dx, dy) = (edge.end.x - edge.start.x, edge.end.y - edge.start.y);
    let len = dx.hypot(dy);
    if len == 0.0 {
        return None;
    }
    let (ux, uy) = (dx / len, dy / len);
    let base = LayoutPoint::new(edge.end.x - ux * ARROW_LENGTH, edge.end.y - uy * ARROW_LENGTH);
    let (px, py) = (-uy * ARROW_HALF_WIDTH, ux * ARROW_HALF_WIDTH);
    Some([
        edge.end,
        LayoutPoint::new(base.x + px, base.y + py),
        LayoutPoint::new(base.x - px, base.y - py),
    ])
}

/// Centres of `count` text lines stacked vertically in `rect`.
pub fn line_centers(rect: &LayoutRect, count: usize) -> Vec<LayoutPoint> {
    let block = count as f64 * LINE_HEIGHT;
    let top = rect.y + (rect.height - block) / 2.0;
    let cx = rect.center().x;
    (0..count)
        .map(|i| LayoutPoint::new(cx, top + (i as f64 + 0.5) * LINE_HEIGHT))
        .collect()
}

/// Draws header, edges, then nodes onto `canvas`.
pub fn paint<C: Canvas + ?Sized>(layout: &DiagramLayout, canvas: &mut C) {
    let Palette {
        node_fill,
        node_outline,
        edge: edge_color,
        text,
        header_fill,
        header_text,
        ..
    } = layout.palette;

    if let Some(header) = &layout.header {
        canvas.rounded_rect(header.rect, HEADER_RADIUS, header_fill, None);
        canvas.text(header.rect.center(), &header.text, header_text);
    }

    for edge in &layout.edges {
        canvas.line(edge.start, edge.end, edge_color);
        if edge.arrow {
            if let Some(head) = arrowhead(edge) {
                canvas.polygon(&head, edge_color);
            }
        }
    }

    for node in &layout.nodes {
        canvas.rounded_rect(node.rect, node.corner_radius, node_fill, Some(node_outline));
        for (line, center) in node
            .label_lines
            .iter()
            .zip(line_centers(&node.rect, node.label_lines.len()))
        {
            canvas.text(center, line, text);
        }
    }
}

/// Encodes the layout as PNG.
///
/// Returns `None` when the crate was built without the `raster` feature or
/// encoding fails.
pub fn render_png(layout: &DiagramLayout) -> Option<Vec<u8>> {
    #[cfg(feature = "raster")]
    {
        match raster::encode(layout) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                log::warn!("PNG encoding failed: {e}");
                None
            }
        }
    }
    #[cfg(not(feature = "raster"))]
    {
        let _ = layout;
        log::debug!("PNG requested but the raster feature is disabled");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{ConceptGraph, GraphNode, LinearLayout, TieredLayout};

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl Canvas for Recorder {
        fn rounded_rect(&mut self, _rect: LayoutRect, _r: f64, _fill: Rgb, stroke: Option<Rgb>) {
            self.calls
                .push(if stroke.is_some() { "node" } else { "band" }.to_string());
        }

        fn line(&mut self, _from: LayoutPoint, _to: LayoutPoint, _color: Rgb) {
            self.calls.push("line".to_string());
        }

        fn polygon(&mut self, points: &[LayoutPoint], _color: Rgb) {
            self.calls.push(format!("polygon{}", points.len()));
        }

        fn text(&mut self, _center: LayoutPoint, text: &str, _color: Rgb) {
            self.calls.push(format!("text:{text}"));
        }
    }

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
    fn test_arrowhead_points_at_end() {
        let edge = LayoutEdge {
            start: LayoutPoint::new(0.0, 0.0),
            end: LayoutPoint::new(100.0, 0.0),
            arrow: true,
        };
        let head = arrowhead(&edge).unwrap();
        assert_eq!(head[0], LayoutPoint::new(100.0, 0.0));
        assert_eq!(head[1], LayoutPoint::new(92.0, 4.0));
        assert_eq!(head[2], LayoutPoint::new(92.0, -4.0));

        let degenerate = LayoutEdge {
            start: edge.end,
            end: edge.end,
            arrow: true,
        };
        assert!(arrowhead(&degenerate).is_none());
    }

    #[test]
    fn test_line_centers_are_vertically_centred() {
        let rect = LayoutRect::new(0.0, 0.0, 100.0, 48.0);
        let centers = line_centers(&rect, 2);
        assert_eq!(centers[0], LayoutPoint::new(50.0, 16.0));
        assert_eq!(centers[1], LayoutPoint::new(50.0, 32.0));
    }

    #[test]
    fn test_paint_order() {
        let layout = LinearLayout::default().layout(&graph(2));
        let mut canvas = Recorder::default();
        paint(&layout, &mut canvas);
        assert_eq!(
            canvas.calls,
            vec!["line", "polygon3", "node", "text:Step 0", "node", "text:Step 1"]
        );
    }

    #[test]
    fn test_header_painted_first_and_connectors_with_arrows() {
        let layout = TieredLayout::default().layout(&graph(10), Some("Rust"));
        let mut canvas = Recorder::default();
        paint(&layout, &mut canvas);
        assert_eq!(canvas.calls[0], "band");
        assert_eq!(canvas.calls[1], "text:Rust");
        let lines = canvas.calls.iter().filter(|c| *c == "line").count();
        let heads = canvas.calls.iter().filter(|c| *c == "polygon3").count();
        assert_eq!(lines, 5);
        assert_eq!(heads, lines);
    }

    #[cfg(feature = "raster")]
    #[test]
    fn test_png_signature_and_determinism() {
        let layout = LinearLayout::default().layout(&graph(3));
        let png = render_png(&layout).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        assert_eq!(render_png(&layout).unwrap(), png);
    }
}
