//! Panel geometry: where cells, segments and annunciators go

use crate::lcd::cells::{Punct, CELL_COUNT};
use crate::lcd::font::Segment;

/// A point in SVG user units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// An axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Glyph width inside a cell
pub const GLYPH_WIDTH: f64 = 16.0;
/// Glyph height inside a cell
pub const GLYPH_HEIGHT: f64 = 28.0;
/// Segment stroke thickness
pub const THICKNESS: f64 = 2.5;
/// Horizontal advance from one cell to the next (glyph plus punctuation room)
pub const CELL_PITCH: f64 = 24.0;
/// Margin between the panel edge and the glyphs
pub const MARGIN: f64 = 6.0;
/// Radius of punctuation dots
pub const PUNCT_RADIUS: f64 = 1.75;
/// Height reserved for the annunciator row
pub const ANNUNCIATOR_ROW: f64 = 12.0;
/// Font size of annunciator labels
pub const ANNUNCIATOR_FONT_SIZE: f64 = 7.0;

/// Bounds of the whole panel
pub fn panel_bounds() -> BoundingBox {
    BoundingBox::new(
        0.0,
        0.0,
        2.0 * MARGIN + CELL_PITCH * CELL_COUNT as f64 - (CELL_PITCH - GLYPH_WIDTH),
        2.0 * MARGIN + GLYPH_HEIGHT + ANNUNCIATOR_ROW,
    )
}

/// Top-left corner of a cell's glyph box
pub fn cell_origin(index: usize) -> Point {
    Point::new(MARGIN + CELL_PITCH * index as f64, MARGIN)
}

fn bar(x1: f64, y1: f64, x2: f64, y2: f64) -> Vec<Point> {
    vec![
        Point::new(x1, y1),
        Point::new(x2, y1),
        Point::new(x2, y2),
        Point::new(x1, y2),
    ]
}

/// A slanted segment from `from` to `to`, `THICKNESS` wide horizontally
fn diagonal(from: Point, to: Point) -> Vec<Point> {
    let half = THICKNESS / 2.0;
    vec![
        from.offset(-half, 0.0),
        from.offset(half, 0.0),
        to.offset(half, 0.0),
        to.offset(-half, 0.0),
    ]
}

/// Polygon outline of a segment for the cell whose glyph box starts at `origin`
pub fn segment_polygon(segment: Segment, origin: Point) -> Vec<Point> {
    let (w, h, t) = (GLYPH_WIDTH, GLYPH_HEIGHT, THICKNESS);
    let mid = h / 2.0;
    let cx = w / 2.0;
    let gap = t / 2.0;

    let local = match segment {
        Segment::A => bar(t, 0.0, w - t, t),
        Segment::D => bar(t, h - t, w - t, h),
        Segment::F => bar(0.0, t, t, mid - gap),
        Segment::B => bar(w - t, t, w, mid - gap),
        Segment::E => bar(0.0, mid + gap, t, h - t),
        Segment::C => bar(w - t, mid + gap, w, h - t),
        Segment::G1 => bar(t, mid - gap, cx - gap, mid + gap),
        Segment::G2 => bar(cx + gap, mid - gap, w - t, mid + gap),
        Segment::I => bar(cx - gap, t, cx + gap, mid - gap),
        Segment::L => bar(cx - gap, mid + gap, cx + gap, h - t),
        Segment::H => diagonal(Point::new(t + gap, t), Point::new(cx - t, mid - gap)),
        Segment::J => diagonal(Point::new(w - t - gap, t), Point::new(cx + t, mid - gap)),
        Segment::K => diagonal(Point::new(cx - t, mid + gap), Point::new(t + gap, h - t)),
        Segment::M => diagonal(Point::new(cx + t, mid + gap), Point::new(w - t - gap, h - t)),
    };

    local
        .into_iter()
        .map(|p| p.offset(origin.x, origin.y))
        .collect()
}

/// Dots that make up a punctuation mark: (center, radius) pairs, plus the
/// comma tail when present
pub fn punct_marks(punct: Punct, origin: Point) -> (Vec<(Point, f64)>, Option<Vec<Point>>) {
    let r = PUNCT_RADIUS;
    let x = origin.x + GLYPH_WIDTH + (CELL_PITCH - GLYPH_WIDTH) / 2.0;
    let low = Point::new(x, origin.y + GLYPH_HEIGHT - r);
    match punct {
        Punct::Period => (vec![(low, r)], None),
        Punct::Comma => {
            let tail = vec![
                Point::new(x + r, low.y),
                Point::new(x - r, low.y + 3.0 * r),
                Point::new(x - 2.0 * r, low.y + 3.0 * r),
                Point::new(x - r, low.y),
            ];
            (vec![(low, r)], Some(tail))
        }
        Punct::Colon => {
            let high = Point::new(x, origin.y + GLYPH_HEIGHT / 2.0 - r);
            (vec![(high, r), (low, r)], None)
        }
    }
}

/// Baseline position of an annunciator label
pub fn annunciator_position(slot: f64) -> Point {
    Point::new(
        MARGIN + CELL_PITCH * slot,
        MARGIN + GLYPH_HEIGHT + ANNUNCIATOR_ROW - 2.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_fit_inside_panel() {
        let panel = panel_bounds();
        let last = cell_origin(CELL_COUNT - 1);
        assert!(last.x + GLYPH_WIDTH + MARGIN <= panel.right() + 1e-9);
        assert!(last.y + GLYPH_HEIGHT < panel.bottom());
    }

    #[test]
    fn test_segments_stay_in_glyph_box() {
        let origin = cell_origin(3);
        for segment in Segment::ALL {
            for p in segment_polygon(segment, origin) {
                assert!(p.x >= origin.x - THICKNESS && p.x <= origin.x + GLYPH_WIDTH + THICKNESS);
                assert!(p.y >= origin.y && p.y <= origin.y + GLYPH_HEIGHT);
            }
        }
    }

    #[test]
    fn test_colon_has_two_dots() {
        let (dots, tail) = punct_marks(Punct::Colon, cell_origin(0));
        assert_eq!(dots.len(), 2);
        assert!(tail.is_none());
    }

    #[test]
    fn test_comma_has_tail() {
        let (_, tail) = punct_marks(Punct::Comma, cell_origin(0));
        assert_eq!(tail.map(|t| t.len()), Some(4));
    }
}
