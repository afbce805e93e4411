// Copyright 2025 the Geomap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{BezPath, Point, Rect, Shape, Vec2};

use geomap_projection::GeoCoordinate;

use crate::stroke::{strip_triangles, triangle_contains};

/// How a consumer should assemble [`MapItemGeometry::vertices`] into
/// triangles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DrawingMode {
    /// Each vertex after the second closes a triangle with its two
    /// predecessors. Used for stroked lines and borders.
    #[default]
    TriangleStrip,
    /// Vertices are taken three at a time, or through
    /// [`MapItemGeometry::indices`] when those are present. Used for fills.
    Triangles,
    /// The first vertex is shared by every triangle. Used for circle fills.
    TriangleFan,
}

/// The on-screen shape of one map item, or of one part of it (fill or
/// border).
///
/// A buffer stores its projected source path as offsets relative to the
/// screen position of an origin coordinate. Two flags gate recomputation:
/// `source_dirty` means the geographic input changed and has to be
/// re-projected, `screen_dirty` means only the viewport moved and the stored
/// source path has to be clipped and triangulated again. Setting
/// `source_dirty` always sets `screen_dirty`.
///
/// The flags are cleared by [`mark_clean`](Self::mark_clean), which the
/// render consumer calls once it has copied the vertices.
#[derive(Clone, Debug)]
pub struct MapItemGeometry {
    pub(crate) source_dirty: bool,
    pub(crate) screen_dirty: bool,
    pub(crate) clip_to_viewport: bool,

    pub(crate) origin: GeoCoordinate,
    pub(crate) first_point_offset: Vec2,

    pub(crate) source_path: BezPath,
    pub(crate) source_bounds: Rect,

    pub(crate) screen_bounds: Rect,
    pub(crate) screen_outline: BezPath,
    pub(crate) screen_vertices: Vec<Point>,
    pub(crate) screen_indices: Vec<u32>,
    pub(crate) mode: DrawingMode,
}

impl Default for MapItemGeometry {
    fn default() -> Self {
        Self::new()
    }
}

impl MapItemGeometry {
    /// Creates an empty buffer with both dirty flags set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            source_dirty: true,
            screen_dirty: true,
            clip_to_viewport: true,
            origin: GeoCoordinate::INVALID,
            first_point_offset: Vec2::ZERO,
            source_path: BezPath::new(),
            source_bounds: Rect::ZERO,
            screen_bounds: Rect::ZERO,
            screen_outline: BezPath::new(),
            screen_vertices: Vec::new(),
            screen_indices: Vec::new(),
            mode: DrawingMode::default(),
        }
    }

    /// Marks the geographic input as changed. Implies a screen update.
    pub fn mark_source_dirty(&mut self) {
        self.source_dirty = true;
        self.screen_dirty = true;
    }

    /// Marks the viewport as changed while the geographic input is not.
    pub fn mark_screen_dirty(&mut self) {
        self.screen_dirty = true;
    }

    /// Clears both dirty flags.
    pub fn mark_clean(&mut self) {
        self.source_dirty = false;
        self.screen_dirty = false;
    }

    /// Returns `true` if the source path needs to be re-projected.
    #[must_use]
    pub fn is_source_dirty(&self) -> bool {
        self.source_dirty
    }

    /// Returns `true` if screen geometry needs to be rebuilt.
    #[must_use]
    pub fn is_screen_dirty(&self) -> bool {
        self.screen_dirty
    }

    /// Enables or disables clipping against the viewport during screen
    /// updates. Enabled by default.
    pub fn set_clip_to_viewport(&mut self, clip: bool) {
        if self.clip_to_viewport == clip {
            return;
        }
        self.clip_to_viewport = clip;
        self.mark_screen_dirty();
    }

    /// Returns `true` if screen updates clip against the viewport.
    #[must_use]
    pub fn clip_to_viewport(&self) -> bool {
        self.clip_to_viewport
    }

    /// The coordinate whose screen position is the local `(0, 0)` of the
    /// source path.
    #[must_use]
    pub fn origin(&self) -> GeoCoordinate {
        self.origin
    }

    /// Offset from the origin's screen position to the top-left of the
    /// screen geometry, after any translation.
    #[must_use]
    pub fn first_point_offset(&self) -> Vec2 {
        self.first_point_offset
    }

    /// The projected source path, relative to the origin.
    #[must_use]
    pub fn source_path(&self) -> &BezPath {
        &self.source_path
    }

    /// Bounds of [`source_path`](Self::source_path).
    #[must_use]
    pub fn source_bounds(&self) -> Rect {
        self.source_bounds
    }

    /// Bounds of the screen geometry in item-local coordinates.
    #[must_use]
    pub fn screen_bounds(&self) -> Rect {
        self.screen_bounds
    }

    /// Closed outline used for hit testing.
    #[must_use]
    pub fn screen_outline(&self) -> &BezPath {
        &self.screen_outline
    }

    /// Triangulated screen vertices in item-local coordinates.
    #[must_use]
    pub fn vertices(&self) -> &[Point] {
        &self.screen_vertices
    }

    /// Triangle indices into [`vertices`](Self::vertices). Empty unless the
    /// mode is [`DrawingMode::Triangles`] with shared vertices.
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.screen_indices
    }

    /// How to assemble the vertices.
    #[must_use]
    pub fn drawing_mode(&self) -> DrawingMode {
        self.mode
    }

    /// Returns `true` if there is nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.screen_vertices.is_empty()
    }

    /// Drops all screen geometry. Source data and flags are kept.
    pub fn clear(&mut self) {
        self.first_point_offset = Vec2::ZERO;
        self.screen_bounds = Rect::ZERO;
        self.screen_outline.truncate(0);
        self.screen_vertices.clear();
        self.screen_indices.clear();
    }

    /// Shifts screen vertices, outline, bounds and the first point offset.
    pub fn translate(&mut self, offset: Vec2) {
        for v in &mut self.screen_vertices {
            *v += offset;
        }
        self.screen_outline.apply_affine(kurbo::Affine::translate(offset));
        self.screen_bounds = self.screen_bounds + offset;
        self.first_point_offset += offset;
    }

    /// Aligns buffers that share one origin coordinate.
    ///
    /// Every buffer is moved by the difference between the elementwise
    /// maximum of all first point offsets and its own offset, so afterwards
    /// they all report the same offset. Returns the union of the resulting
    /// screen bounds, or [`Rect::ZERO`] for an empty slice.
    pub fn translate_to_common_origin(geometries: &mut [&mut Self]) -> Rect {
        let Some(first) = geometries.first() else {
            return Rect::ZERO;
        };
        debug_assert!(
            geometries
                .iter()
                .all(|g| g.origin == first.origin || !g.origin.is_valid()),
            "geometries aligned to a common origin must share their origin coordinate"
        );

        let mut max = first.first_point_offset;
        for g in geometries.iter() {
            max.x = max.x.max(g.first_point_offset.x);
            max.y = max.y.max(g.first_point_offset.y);
        }

        let mut bounds: Option<Rect> = None;
        for g in geometries.iter_mut() {
            let delta = max - g.first_point_offset;
            g.translate(delta);
            if !g.is_empty() {
                bounds = Some(bounds.map_or(g.screen_bounds, |b| b.union(g.screen_bounds)));
            }
        }
        bounds.unwrap_or(Rect::ZERO)
    }

    /// Returns `true` if `point` (item-local) lies inside the outline under
    /// the even-odd rule.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        if self.is_empty() {
            return false;
        }
        if self.screen_outline.is_empty() {
            return self.strip_contains(point);
        }
        self.screen_outline.winding(point) & 1 != 0
    }

    /// Returns `true` if `point` lies in any triangle of the vertex strip.
    pub(crate) fn strip_contains(&self, point: Point) -> bool {
        strip_triangles(&self.screen_vertices).any(|t| triangle_contains(t, point))
    }
}

/// Axis-aligned bounds of a set of points, or `None` when empty.
pub(crate) fn points_bounds(points: impl IntoIterator<Item = Point>) -> Option<Rect> {
    let mut iter = points.into_iter();
    let first = iter.next()?;
    Some(iter.fold(Rect::from_points(first, first), |r, p| r.union_pt(p)))
}
