//! PNG canvas on top of `image::RgbImage`.

use std::io::Cursor;

use image::{ImageFormat, ImageResult, Rgb as Pixel, RgbImage};

use super::{
    font::{glyph, is_set, GLYPH_HEIGHT, GLYPH_WIDTH},
    paint, Canvas,
};
use crate::graph::{text::CHAR_ADVANCE, DiagramLayout, LayoutPoint, LayoutRect, Rgb};

const STROKE: f64 = 2.0;

fn pixel(color: Rgb) -> Pixel<u8> {
    Pixel([color.0, color.1, color.2])
}

/// Whether `p` lies inside a rectangle with corners rounded by `radius`.
fn in_rounded_rect(rect: &LayoutRect, radius: f64, p: LayoutPoint) -> bool {
    if !rect.contains_point(p) {
        return false;
    }
    let radius = radius.clamp(0.0, rect.width.min(rect.height) / 2.0);
    let cx = p.x.clamp(rect.x + radius, rect.right() - radius);
    let cy = p.y.clamp(rect.y + radius, rect.bottom() - radius);
    p.distance(LayoutPoint::new(cx, cy)) <= radius
}

/// Even-odd point-in-polygon test.
fn in_polygon(points: &[LayoutPoint], p: LayoutPoint) -> bool {
    let mut inside = false;
    let mut j = points.len().wrapping_sub(1);
    for (i, a) in points.iter().enumerate() {
        let b = points[j];
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

pub struct RasterCanvas {
    image: RgbImage,
}

impl RasterCanvas {
    pub fn new(width: u32, height: u32, background: Rgb) -> Self {
        Self {
            image: RgbImage::from_pixel(width.max(1), height.max(1), pixel(background)),
        }
    }

    fn put(&mut self, x: i64, y: i64, color: Rgb) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x < self.image.width() && y < self.image.height() {
            self.image.put_pixel(x, y, pixel(color));
        }
    }

    /// Sets every pixel whose centre satisfies `inside`, within `bounds`.
    fn fill_where(&mut self, bounds: LayoutRect, color: Rgb, inside: impl Fn(LayoutPoint) -> bool) {
        let x0 = bounds.x.floor().max(0.0) as i64;
        let y0 = bounds.y.floor().max(0.0) as i64;
        let x1 = bounds.right().ceil().min(f64::from(self.image.width())) as i64;
        let y1 = bounds.bottom().ceil().min(f64::from(self.image.height())) as i64;
        for y in y0..y1 {
            for x in x0..x1 {
                if inside(LayoutPoint::new(x as f64 + 0.5, y as f64 + 0.5)) {
                    self.put(x, y, color);
                }
            }
        }
    }

    pub fn encode(&self) -> ImageResult<Vec<u8>> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }
}

impl Canvas for RasterCanvas {
    fn rounded_rect(&mut self, rect: LayoutRect, radius: f64, fill: Rgb, stroke: Option<Rgb>) {
        let inner = match stroke {
            Some(outline) => {
                self.fill_where(rect, outline, |p| in_rounded_rect(&rect, radius, p));
                LayoutRect::new(
                    rect.x + STROKE,
                    rect.y + STROKE,
                    rect.width - 2.0 * STROKE,
                    rect.height - 2.0 * STROKE,
                )
            }
            None => rect,
        };
        let inner_radius = if stroke.is_some() {
            (radius - STROKE).max(0.0)
        } else {
            radius
        };
        self.fill_where(inner, fill, |p| in_rounded_rect(&inner, inner_radius, p));
    }

    fn line(&mut self, from: LayoutPoint, to: LayoutPoint, color: Rgb) {
        let steps = (from.distance(to) * 2.0).ceil().max(1.0) as usize;
        let half = STROKE / 2.0;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let x = from.x + (to.x - from.x) * t;
            let y = from.y + (to.y - from.y) * t;
            let (x0, y0) = ((x - half).round() as i64, (y - half).round() as i64);
            for dy in 0..STROKE as i64 {
                for dx in 0..STROKE as i64 {
                    self.put(x0 + dx, y0 + dy, color);
                }
            }
        }
    }

    fn polygon(&mut self, points: &[LayoutPoint], color: Rgb) {
        if points.len() < 3 {
            return;
        }
        let min_x = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_x = points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let max_y = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        let bounds = LayoutRect::new(min_x, min_y, max_x - min_x, max_y - min_y);
        self.fill_where(bounds, color, |p| in_polygon(points, p));
    }

    fn text(&mut self, center: LayoutPoint, text: &str, color: Rgb) {
        let count = text.chars().count() as f64;
        let left = (center.x - count * CHAR_ADVANCE / 2.0).round() as i64;
        let top = (center.y - f64::from(GLYPH_HEIGHT) / 2.0).round() as i64;
        let pad = ((CHAR_ADVANCE - f64::from(GLYPH_WIDTH)) / 2.0).floor() as i64;
        for (i, c) in text.chars().enumerate() {
            let bitmap = glyph(c);
            let origin = left + i as i64 * CHAR_ADVANCE as i64 + pad;
            for row in 0..GLYPH_HEIGHT {
                for col in 0..GLYPH_WIDTH {
                    if is_set(&bitmap, col, row) {
                        self.put(origin + i64::from(col), top + i64::from(row), color);
                    }
                }
            }
        }
    }
}

/// Paints `layout` and encodes it as PNG bytes.
pub fn encode(layout: &DiagramLayout) -> ImageResult<Vec<u8>> {
    let mut canvas = RasterCanvas::new(layout.width, layout.height, layout.palette.background);
    paint(layout, &mut canvas);
    canvas.encode()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb = Rgb(255, 255, 255);
    const RED: Rgb = Rgb(255, 0, 0);
    const BLUE: Rgb = Rgb(0, 0, 255);

    fn at(canvas: &RasterCanvas, x: u32, y: u32) -> Pixel<u8> {
        *canvas.image.get_pixel(x, y)
    }

    #[test]
    fn test_rounded_corners_stay_background() {
        let mut canvas = RasterCanvas::new(40, 40, WHITE);
        let rect = LayoutRect::new(0.0, 0.0, 40.0, 40.0);
        canvas.rounded_rect(rect, 10.0, RED, Some(BLUE));
        assert_eq!(at(&canvas, 0, 0), pixel(WHITE));
        assert_eq!(at(&canvas, 20, 0), pixel(BLUE));
        assert_eq!(at(&canvas, 20, 20), pixel(RED));
    }

    #[test]
    fn test_polygon_fill() {
        let mut canvas = RasterCanvas::new(20, 20, WHITE);
        let triangle = [
            LayoutPoint::new(0.0, 0.0),
            LayoutPoint::new(20.0, 0.0),
            LayoutPoint::new(0.0, 20.0),
        ];
        canvas.polygon(&triangle, RED);
        assert_eq!(at(&canvas, 2, 2), pixel(RED));
        assert_eq!(at(&canvas, 18, 18), pixel(WHITE));
    }

    #[test]
    fn test_offcanvas_drawing_is_clipped() {
        let mut canvas = RasterCanvas::new(10, 10, WHITE);
        canvas.line(
            LayoutPoint::new(-50.0, 5.0),
            LayoutPoint::new(50.0, 5.0),
            RED,
        );
        canvas.text(LayoutPoint::new(5.0, 5.0), "a long label", RED);
        assert_eq!(at(&canvas, 5, 5), pixel(RED));
    }
}
