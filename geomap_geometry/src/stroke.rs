// Copyright 2025 the Geomap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Triangulating stroker.
//!
//! Turns a `MoveTo`/`LineTo` path into a single triangle strip of constant
//! pixel width. Subpaths are joined with degenerate triangles so the whole
//! path can be drawn with one strip.

use kurbo::{BezPath, PathEl, Point, Vec2};
use smallvec::SmallVec;

/// Shape at the open ends of a stroked subpath.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineCap {
    /// The stroke stops exactly at the end point.
    Butt,
    /// The stroke extends half the width beyond the end point.
    #[default]
    Square,
}

/// Shape at interior vertices of a stroked subpath.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum LineJoin {
    /// The outer corner is cut off with a straight edge.
    #[default]
    Bevel,
    /// The outer edges are extended until they meet, falling back to a bevel
    /// when the miter would be longer than `limit` half-widths.
    Miter {
        /// Maximum ratio of miter length to half the stroke width.
        limit: f64,
    },
}

/// Pen used to stroke lines and borders.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke width in pixels. Independent of the zoom level.
    pub width: f64,
    /// End cap.
    pub cap: LineCap,
    /// Join.
    pub join: LineJoin,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: 1.0,
            cap: LineCap::default(),
            join: LineJoin::default(),
        }
    }
}

impl StrokeStyle {
    /// A default pen of the given width.
    #[must_use]
    pub fn new(width: f64) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    /// Returns this pen with a different cap.
    #[must_use]
    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    /// Returns this pen with a different join.
    #[must_use]
    pub fn with_join(mut self, join: LineJoin) -> Self {
        self.join = join;
        self
    }
}

/// Strokes `path` into a triangle strip.
///
/// Every vertex `i >= 2` of the result closes the triangle
/// `(v[i-2], v[i-1], v[i])`. Subpaths whose first and last points coincide,
/// or that end in `ClosePath`, are stroked as closed rings without caps.
/// Returns an empty strip for a non-positive or non-finite width.
#[must_use]
pub fn stroke_path(path: &BezPath, style: &StrokeStyle) -> Vec<Point> {
    let mut strip = Vec::new();
    if !style.width.is_finite() || style.width <= 0.0 {
        return strip;
    }

    let mut points: Vec<Point> = Vec::new();
    let mut closed = false;
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                stroke_subpath(&mut points, closed, style, &mut strip);
                closed = false;
                points.push(p);
            }
            PathEl::LineTo(p) | PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => {
                if points.last() != Some(&p) {
                    points.push(p);
                }
            }
            PathEl::ClosePath => closed = true,
        }
    }
    stroke_subpath(&mut points, closed, style, &mut strip);
    strip
}

fn stroke_subpath(
    points: &mut Vec<Point>,
    mut closed: bool,
    style: &StrokeStyle,
    strip: &mut Vec<Point>,
) {
    if points.len() >= 3 && points.first() == points.last() {
        points.pop();
        closed = true;
    }
    if points.len() < 2 {
        points.clear();
        return;
    }

    let hw = style.width * 0.5;
    let n = points.len();
    let segment_count = if closed { n } else { n - 1 };
    let dirs: Vec<Vec2> = (0..segment_count)
        .map(|i| {
            let d = points[(i + 1) % n] - points[i];
            let len = d.hypot();
            if len > 0.0 { d / len } else { Vec2::new(1.0, 0.0) }
        })
        .collect();

    let mut pairs: Vec<(Point, Point)> = Vec::with_capacity(2 * n + 2);
    if closed {
        join(points[0], dirs[n - 1], dirs[0], hw, style.join, &mut pairs);
        for i in 1..n {
            join(points[i], dirs[i - 1], dirs[i], hw, style.join, &mut pairs);
        }
        // Close onto the first join.
        pairs.push(pairs[0]);
    } else {
        let cap = match style.cap {
            LineCap::Butt => 0.0,
            LineCap::Square => hw,
        };
        let first_dir = dirs[0];
        let last_dir = dirs[segment_count - 1];
        pairs.push(offset_pair(points[0] - first_dir * cap, first_dir, hw));
        for i in 1..n - 1 {
            join(points[i], dirs[i - 1], dirs[i], hw, style.join, &mut pairs);
        }
        pairs.push(offset_pair(points[n - 1] + last_dir * cap, last_dir, hw));
    }

    if let Some(&last) = strip.last() {
        // Degenerate connector from the previous subpath.
        strip.push(last);
        strip.push(pairs[0].0);
    }
    for (l, r) in pairs {
        strip.push(l);
        strip.push(r);
    }
    points.clear();
}

fn offset_pair(p: Point, dir: Vec2, hw: f64) -> (Point, Point) {
    let normal = Vec2::new(-dir.y, dir.x) * hw;
    (p + normal, p - normal)
}

fn join(
    p: Point,
    d_in: Vec2,
    d_out: Vec2,
    hw: f64,
    style: LineJoin,
    pairs: &mut Vec<(Point, Point)>,
) {
    if let LineJoin::Miter { limit } = style {
        let n_in = Vec2::new(-d_in.y, d_in.x);
        let n_out = Vec2::new(-d_out.y, d_out.x);
        let m = n_in + n_out;
        let m_len = m.hypot();
        if m_len > 1e-9 {
            let m = m / m_len;
            let cos = m.dot(n_in);
            let ratio = 1.0 / cos;
            if cos > 0.0 && ratio <= limit {
                let miter = m * hw * ratio;
                pairs.push((p + miter, p - miter));
                return;
            }
        }
    }
    pairs.push(offset_pair(p, d_in, hw));
    pairs.push(offset_pair(p, d_out, hw));
}

/// Iterates over the triangles of a triangle strip, skipping degenerate ones.
pub fn strip_triangles(strip: &[Point]) -> impl Iterator<Item = [Point; 3]> + '_ {
    strip
        .windows(3)
        .map(|w| [w[0], w[1], w[2]])
        .filter(|t| t[0] != t[1] && t[1] != t[2] && t[0] != t[2])
}

/// Builds a coarse outline of a stroke strip from a sliding four-point
/// window: once the window is full the oldest point is dropped and the
/// remaining three are added as a closed triangle.
#[must_use]
pub fn strip_outline(strip: &[Point]) -> BezPath {
    let mut outline = BezPath::new();
    let mut window: SmallVec<[Point; 4]> = SmallVec::new();
    for &p in strip {
        window.push(p);
        if window.len() == 4 {
            window.remove(0);
            outline.move_to(window[0]);
            outline.line_to(window[1]);
            outline.line_to(window[2]);
            outline.close_path();
        }
    }
    outline
}

/// Returns `true` if `p` lies inside or on the edge of `tri`, whatever its
/// orientation.
#[must_use]
pub fn triangle_contains(tri: [Point; 3], p: Point) -> bool {
    let side = |a: Point, b: Point| (b - a).cross(p - a);
    let (d0, d1, d2) = (side(tri[0], tri[1]), side(tri[1], tri[2]), side(tri[2], tri[0]));
    let has_neg = d0 < 0.0 || d1 < 0.0 || d2 < 0.0;
    let has_pos = d0 > 0.0 || d1 > 0.0 || d2 > 0.0;
    !(has_neg && has_pos)
}
