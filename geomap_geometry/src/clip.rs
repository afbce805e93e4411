// Copyright 2025 the Geomap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clipping of paths and rings against an axis-aligned viewport rectangle.
//!
//! Rectangles are expected to be normalized (`x0 <= x1`, `y0 <= y1`), with
//! `y0` the top edge in screen space.

use kurbo::{BezPath, PathEl, Point, Rect};

/// Distance by which a clipped endpoint is moved inside the boundary so that
/// it is not re-classified as lying on (or just outside) the edge.
pub const CLIP_NUDGE: f64 = 0.1;

// Cohen-Sutherland settles in at most two moves per endpoint; anything more
// means the nudged point keeps landing outside due to rounding.
const MAX_CLIP_STEPS: usize = 8;

bitflags::bitflags! {
    /// Position of a point relative to a clip rectangle.
    ///
    /// The empty set means "inside".
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct OutCode: u8 {
        /// Left of the rectangle.
        const LEFT   = 0b0001;
        /// Right of the rectangle.
        const RIGHT  = 0b0010;
        /// Below the rectangle (larger `y`).
        const BOTTOM = 0b0100;
        /// Above the rectangle (smaller `y`).
        const TOP    = 0b1000;
    }
}

/// Classifies `p` against `rect`.
#[must_use]
pub fn out_code(p: Point, rect: Rect) -> OutCode {
    let mut code = OutCode::empty();
    if p.x < rect.x0 {
        code |= OutCode::LEFT;
    } else if p.x > rect.x1 {
        code |= OutCode::RIGHT;
    }
    if p.y < rect.y0 {
        code |= OutCode::TOP;
    } else if p.y > rect.y1 {
        code |= OutCode::BOTTOM;
    }
    code
}

/// Clips the segment `p0 → p1` to `rect`.
///
/// Returns `None` if no part of the segment is inside. Endpoints that had to
/// be moved are placed [`CLIP_NUDGE`] inside the boundary they were clipped
/// against; endpoints already inside are returned untouched.
#[must_use]
pub fn clip_segment(mut p0: Point, mut p1: Point, rect: Rect) -> Option<(Point, Point)> {
    let mut c0 = out_code(p0, rect);
    let mut c1 = out_code(p1, rect);

    for _ in 0..MAX_CLIP_STEPS {
        if (c0 | c1).is_empty() {
            return Some((p0, p1));
        }
        if !(c0 & c1).is_empty() {
            return None;
        }

        let clip_first = !c0.is_empty();
        let outside = if clip_first { c0 } else { c1 };
        let (x, y) = if outside.contains(OutCode::BOTTOM) {
            (
                p0.x + (p1.x - p0.x) * (rect.y1 - p0.y) / (p1.y - p0.y),
                rect.y1 - CLIP_NUDGE,
            )
        } else if outside.contains(OutCode::TOP) {
            (
                p0.x + (p1.x - p0.x) * (rect.y0 - p0.y) / (p1.y - p0.y),
                rect.y0 + CLIP_NUDGE,
            )
        } else if outside.contains(OutCode::RIGHT) {
            (
                rect.x1 - CLIP_NUDGE,
                p0.y + (p1.y - p0.y) * (rect.x1 - p0.x) / (p1.x - p0.x),
            )
        } else {
            (
                rect.x0 + CLIP_NUDGE,
                p0.y + (p1.y - p0.y) * (rect.x0 - p0.x) / (p1.x - p0.x),
            )
        };

        if clip_first {
            p0 = Point::new(x, y);
            c0 = out_code(p0, rect);
        } else {
            p1 = Point::new(x, y);
            c1 = out_code(p1, rect);
        }
    }
    None
}

/// Clips every line segment of `path` against `rect`.
///
/// The output contains only `MoveTo` and `LineTo` elements. A `MoveTo` is
/// emitted whenever an accepted segment does not start where the previous
/// accepted segment ended. Curves are treated as straight lines to their end
/// point and `ClosePath` as a line back to the subpath start.
#[must_use]
pub fn clip_path_to_rect(path: &BezPath, rect: Rect) -> BezPath {
    let mut out = BezPath::new();
    let mut out_last: Option<Point> = None;
    let mut last = Point::ORIGIN;
    let mut start = Point::ORIGIN;

    let mut emit = |a: Point, b: Point, out: &mut BezPath| {
        match out_last {
            Some(prev) if fuzzy_eq(prev, a) => {}
            _ => out.move_to(a),
        }
        out.line_to(b);
        out_last = Some(b);
    };

    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                last = p;
                start = p;
            }
            PathEl::LineTo(p) | PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => {
                if let Some((a, b)) = clip_segment(last, p, rect) {
                    emit(a, b, &mut out);
                }
                last = p;
            }
            PathEl::ClosePath => {
                if let Some((a, b)) = clip_segment(last, start, rect) {
                    emit(a, b, &mut out);
                }
                last = start;
            }
        }
    }
    out
}

/// Clips a closed ring against `rect` (Sutherland-Hodgman).
///
/// The ring is implicitly closed; a repeated first point at the end is
/// harmless. The result is empty when the ring lies entirely outside.
#[must_use]
pub fn clip_polygon_to_rect(ring: &[Point], rect: Rect) -> Vec<Point> {
    let mut output: Vec<Point> = ring.to_vec();
    for edge in [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom] {
        if output.is_empty() {
            break;
        }
        let input = core::mem::take(&mut output);
        let mut prev = input[input.len() - 1];
        for &cur in &input {
            let cur_in = edge.inside(cur, rect);
            let prev_in = edge.inside(prev, rect);
            if cur_in {
                if !prev_in {
                    output.push(edge.intersect(prev, cur, rect));
                }
                output.push(cur);
            } else if prev_in {
                output.push(edge.intersect(prev, cur, rect));
            }
            prev = cur;
        }
    }
    output
}

#[derive(Clone, Copy)]
enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    fn inside(self, p: Point, rect: Rect) -> bool {
        match self {
            Self::Left => p.x >= rect.x0,
            Self::Right => p.x <= rect.x1,
            Self::Top => p.y >= rect.y0,
            Self::Bottom => p.y <= rect.y1,
        }
    }

    fn intersect(self, a: Point, b: Point, rect: Rect) -> Point {
        match self {
            Self::Left | Self::Right => {
                let x = if matches!(self, Self::Left) {
                    rect.x0
                } else {
                    rect.x1
                };
                let t = (x - a.x) / (b.x - a.x);
                Point::new(x, a.y + (b.y - a.y) * t)
            }
            Self::Top | Self::Bottom => {
                let y = if matches!(self, Self::Top) {
                    rect.y0
                } else {
                    rect.y1
                };
                let t = (y - a.y) / (b.y - a.y);
                Point::new(a.x + (b.x - a.x) * t, y)
            }
        }
    }
}

fn fuzzy_eq(a: Point, b: Point) -> bool {
    fn eq(p: f64, q: f64) -> bool {
        (p - q).abs() * 1e12 <= p.abs().min(q.abs())
    }
    eq(a.x, b.x) && eq(a.y, b.y)
}
