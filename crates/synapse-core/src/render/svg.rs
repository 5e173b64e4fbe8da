//! SVG canvas.

use super::{paint, Canvas};
use crate::graph::{DiagramLayout, LayoutPoint, LayoutRect, Rgb};

const FONT_SIZE: u32 = 13;
const FONT_FAMILY: &str = "DejaVu Sans, Arial, sans-serif";
const STROKE_WIDTH: u32 = 2;

/// Formats a coordinate, dropping a zero fraction.
fn num(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        let text = format!("{value:.2}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Accumulates SVG elements.
#[derive(Debug, Default)]
pub struct SvgCanvas {
    body: String,
}

impl SvgCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps the accumulated elements in a document of the given size.
    pub fn finish(self, width: u32, height: u32, background: Rgb) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" \
             viewBox=\"0 0 {width} {height}\">\n\
             <rect x=\"0\" y=\"0\" width=\"{width}\" height=\"{height}\" fill=\"{background}\"/>\n\
             {}</svg>\n",
            self.body
        )
    }
}

impl Canvas for SvgCanvas {
    fn rounded_rect(&mut self, rect: LayoutRect, radius: f64, fill: Rgb, stroke: Option<Rgb>) {
        let stroke = match stroke {
            Some(color) => format!(" stroke=\"{color}\" stroke-width=\"{STROKE_WIDTH}\""),
            None => String::new(),
        };
        self.body.push_str(&format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{}\" fill=\"{fill}\"{stroke}/>\n",
            num(rect.x),
            num(rect.y),
            num(rect.width),
            num(rect.height),
            num(radius),
        ));
    }

    fn line(&mut self, from: LayoutPoint, to: LayoutPoint, color: Rgb) {
        self.body.push_str(&format!(
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{color}\" stroke-width=\"{STROKE_WIDTH}\"/>\n",
            num(from.x),
            num(from.y),
            num(to.x),
            num(to.y),
        ));
    }

    fn polygon(&mut self, points: &[LayoutPoint], color: Rgb) {
        let points = points
            .iter()
            .map(|p| format!("{},{}", num(p.x), num(p.y)))
            .collect::<Vec<_>>()
            .join(" ");
        self.body
            .push_str(&format!("<polygon points=\"{points}\" fill=\"{color}\"/>\n"));
    }

    fn text(&mut self, center: LayoutPoint, text: &str, color: Rgb) {
        self.body.push_str(&format!(
            "<text x=\"{}\" y=\"{}\" fill=\"{color}\" font-family=\"{FONT_FAMILY}\" \
             font-size=\"{FONT_SIZE}\" text-anchor=\"middle\" dominant-baseline=\"central\">{}</text>\n",
            num(center.x),
            num(center.y),
            escape(text),
        ));
    }
}

/// Renders the layout as a standalone SVG document.
pub fn render_svg(layout: &DiagramLayout) -> String {
    let mut canvas = SvgCanvas::new();
    paint(layout, &mut canvas);
    canvas.finish(layout.width, layout.height, layout.palette.background)
}
