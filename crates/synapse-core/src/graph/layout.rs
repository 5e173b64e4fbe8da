//! Layout output types shared by every layout and renderer.
//!
//! Coordinates are pixels with the origin at the top-left corner.

use std::fmt;

// ── Geometry ─────────────────────────────────────────────────────────

/// A point in layout space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutPoint {
    pub x: f64,
    pub y: f64,
}

impl LayoutPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: LayoutPoint) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// An axis-aligned rectangle in layout space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl LayoutRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given size centred on `center`.
    pub fn centered(center: LayoutPoint, width: f64, height: f64) -> Self {
        Self::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    #[must_use]
    pub fn center(&self) -> LayoutPoint {
        LayoutPoint::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn contains_point(&self, p: LayoutPoint) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Point where a ray from the centre towards `target` leaves the border.
    ///
    /// Returns the centre when `target` coincides with it.
    #[must_use]
    pub fn border_toward(&self, target: LayoutPoint) -> LayoutPoint {
        let c = self.center();
        let (dx, dy) = (target.x - c.x, target.y - c.y);
        if dx == 0.0 && dy == 0.0 {
            return c;
        }
        let tx = if dx == 0.0 {
            f64::INFINITY
        } else {
            (self.width / 2.0) / dx.abs()
        };
        let ty = if dy == 0.0 {
            f64::INFINITY
        } else {
            (self.height / 2.0) / dy.abs()
        };
        let t = tx.min(ty);
        LayoutPoint::new(c.x + dx * t, c.y + dy * t)
    }
}

// ── Colours ──────────────────────────────────────────────────────────

/// An 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    /// Formats as a CSS hex colour.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Colour scheme of a diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub node_fill: Rgb,
    pub node_outline: Rgb,
    pub edge: Rgb,
    pub text: Rgb,
    pub header_fill: Rgb,
    pub header_text: Rgb,
}

impl Palette {
    /// Dark scheme used by the linear and radial maps.
    pub const fn dark() -> Self {
        Self {
            background: Rgb(24, 24, 32),
            node_fill: Rgb(31, 31, 40),
            node_outline: Rgb(107, 107, 122),
            edge: Rgb(138, 138, 165),
            text: Rgb(230, 230, 240),
            header_fill: Rgb(107, 107, 122),
            header_text: Rgb(255, 255, 255),
        }
    }

    /// Light textbook-style scheme used by the tiered map.
    pub const fn light() -> Self {
        Self {
            background: Rgb(255, 255, 255),
            node_fill: Rgb(255, 247, 235),
            node_outline: Rgb(210, 150, 90),
            edge: Rgb(210, 150, 90),
            text: Rgb(40, 40, 40),
            header_fill: Rgb(236, 170, 70),
            header_text: Rgb(255, 255, 255),
        }
    }
}

// ── Layout output ────────────────────────────────────────────────────

/// Positioned node box.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNodeBox {
    /// Step index, `None` for decorative boxes (topic centre, placeholders)
    pub step: Option<usize>,
    pub rect: LayoutRect,
    pub corner_radius: f64,
    /// Label already wrapped to fit the box
    pub label_lines: Vec<String>,
}

/// A straight connector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutEdge {
    pub start: LayoutPoint,
    pub end: LayoutPoint,
    /// Draw an arrowhead at `end`
    pub arrow: bool,
}

/// Title band across the top of a diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub rect: LayoutRect,
    pub text: String,
}

/// Complete diagram layout result.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramLayout {
    pub width: u32,
    pub height: u32,
    pub palette: Palette,
    pub header: Option<Header>,
    pub nodes: Vec<LayoutNodeBox>,
    pub edges: Vec<LayoutEdge>,
}

impl DiagramLayout {
    /// Boxes that represent plan steps, in step order.
    pub fn step_nodes(&self) -> impl Iterator<Item = &LayoutNodeBox> {
        self.nodes.iter().filter(|node| node.step.is_some())
    }
}
