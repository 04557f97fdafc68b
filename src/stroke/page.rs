//! In-memory stroke page and the `.lines` v5 binary serializer.
//!
//! The wire format is fixed and little-endian:
//!
//! ```text
//! HEADER        : 43-byte ASCII identifier, space padded
//! LAYER_COUNT   : i32 = 1
//!   LINE_COUNT  : i32
//!   per line    : i32 brush, i32 color, i32 reserved,
//!                 f32 base size, f32 reserved, i32 point count
//!   per point   : f32 x, y, speed, direction, width, pressure
//! ```
//!
//! No checksum or length prefix wraps the stream; readers trust the
//! embedded counts.

/// Device page width in stroke units.
pub const X_MAX: f32 = 1404.0;
/// Device page height in stroke units.
pub const Y_MAX: f32 = 1872.0;

/// `.lines` file identifier, padded with trailing spaces to 43 bytes.
pub const HEADER_V5: &[u8; 43] = b"reMarkable .lines file, version=5          ";

/// Default brush type for generated strokes (fineliner).
const DEFAULT_BRUSH: i32 = 17;
/// Half-width of the degenerate dot emitted by [`Page::add_dot`].
const DOT_SPREAD: f32 = 0.01;

/// A point on a stroke.
///
/// Speed, direction, width and pressure are device rendering hints; the
/// conversion pipeline passes fixed values through and never computes
/// them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub direction: f32,
    pub width: f32,
    pub pressure: f32,
}

/// One continuous pen stroke: brush attributes plus an ordered point
/// sequence.
#[derive(Debug, Clone)]
pub struct Line {
    pub brush_type: i32,
    pub color: i32,
    reserved: i32,
    pub base_size: f32,
    reserved_attr: f32,
    points: Vec<Point>,
}

impl Line {
    pub fn new() -> Self {
        Self {
            brush_type: DEFAULT_BRUSH,
            color: 0,
            reserved: 0,
            base_size: 1.0,
            reserved_attr: 0.0,
            points: Vec::new(),
        }
    }

    /// Append a point with the fixed pass-through rendering hints.
    pub fn add_point(&mut self, x: f32, y: f32) {
        self.points.push(Point {
            x,
            y,
            speed: 0.1,
            direction: 0.0,
            width: 2.0,
            pressure: 1.0,
        });
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

impl Default for Line {
    fn default() -> Self {
        Self::new()
    }
}

/// A stroke page accumulating lines during one pipeline run.
///
/// Lines keep insertion order; the pipeline feeds them in row-major run
/// order, which makes the exported bytes deterministic. A page is
/// consumed by [`Page::export`] and not reused afterwards.
#[derive(Debug)]
pub struct Page {
    lines: Vec<Line>,
    page_height: f32,
}

impl Page {
    pub fn new() -> Self {
        Self { lines: Vec::new(), page_height: Y_MAX }
    }

    pub fn with_height(page_height: f32) -> Self {
        Self { lines: Vec::new(), page_height }
    }

    pub fn page_height(&self) -> f32 {
        self.page_height
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Append a finished line.
    pub fn add_line(&mut self, line: Line) {
        self.lines.push(line);
    }

    /// Add a horizontal stroke from `(x1, y1)` to `(x2, y2)`.
    pub fn add_segment(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        let mut line = Line::new();
        line.add_point(x1, y1);
        line.add_point(x2, y2);
        self.lines.push(line);
    }

    /// Add a single-pixel detection as a 3-point degenerate line.
    ///
    /// Two near-coincident points flank the exact coordinate so the dot
    /// stays visible at stroke-render resolution.
    pub fn add_dot(&mut self, x: f32, y: f32) {
        let mut line = Line::new();
        line.add_point(x - DOT_SPREAD, y);
        line.add_point(x, y);
        line.add_point(x + DOT_SPREAD, y);
        self.lines.push(line);
    }

    /// Serialize the page to `.lines` v5 bytes.
    ///
    /// Single forward pass, no backtracking. This is the terminal
    /// operation of a page's lifecycle, so it consumes the page.
    pub fn export(self) -> Vec<u8> {
        let point_total: usize = self.lines.iter().map(|l| l.points.len()).sum();
        let mut out = Vec::with_capacity(HEADER_V5.len() + 8 + self.lines.len() * 24 + point_total * 24);

        out.extend_from_slice(HEADER_V5);
        write_i32(&mut out, 1); // single layer
        write_i32(&mut out, self.lines.len() as i32);
        for line in &self.lines {
            write_line(&mut out, line);
        }
        out
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

fn write_line(out: &mut Vec<u8>, line: &Line) {
    write_i32(out, line.brush_type);
    write_i32(out, line.color);
    write_i32(out, line.reserved);
    write_f32(out, line.base_size);
    write_f32(out, line.reserved_attr);
    write_i32(out, line.points.len() as i32);
    for point in &line.points {
        write_f32(out, point.x);
        write_f32(out, point.y);
        write_f32(out, point.speed);
        write_f32(out, point.direction);
        write_f32(out, point.width);
        write_f32(out, point.pressure);
    }
}

#[inline]
fn write_i32(out: &mut Vec<u8>, v: i32) {
    out.extend_from_slice(&v.to_le_bytes());
}

#[inline]
fn write_f32(out: &mut Vec<u8>, v: f32) {
    out.extend_from_slice(&v.to_le_bytes());
}
