// Copyright 2025 the Geomap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use geomap_geometry::DrawingMode;
use kurbo::Point;
use peniko::Color;

use crate::item::RenderPart;

/// GPU-ready copy of one geometry buffer.
///
/// This is the consumer end of the dirty-flag protocol: [`update`](Self::update)
/// copies a buffer only when its screen geometry changed, then marks the
/// buffer clean.
#[derive(Clone, Debug)]
pub struct GeometryNode {
    vertices: Vec<[f32; 2]>,
    indices: Vec<u32>,
    mode: DrawingMode,
    color: Color,
}

impl Default for GeometryNode {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            mode: DrawingMode::default(),
            color: Color::TRANSPARENT,
        }
    }
}

impl GeometryNode {
    /// Creates an empty node.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Syncs from `part`. Returns `true` if the vertex data was re-uploaded.
    pub fn update(&mut self, part: RenderPart<'_>) -> bool {
        self.color = part.color;
        let geometry = part.geometry;
        if !geometry.is_screen_dirty() {
            return false;
        }
        self.vertices.clear();
        self.vertices.extend(geometry.vertices().iter().copied().map(to_f32));
        self.indices.clear();
        self.indices.extend_from_slice(geometry.indices());
        self.mode = geometry.drawing_mode();
        geometry.mark_clean();
        true
    }

    /// Vertex positions in item-local pixels.
    #[must_use]
    pub fn vertices(&self) -> &[[f32; 2]] {
        &self.vertices
    }

    /// Triangle indices; empty unless the mode is [`DrawingMode::Triangles`].
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// How to assemble the vertices.
    #[must_use]
    pub fn drawing_mode(&self) -> DrawingMode {
        self.mode
    }

    /// Colour to draw with.
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns `true` if there is nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.color.components[3] <= 0.0
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "screen coordinates are well within f32 range"
)]
fn to_f32(p: Point) -> [f32; 2] {
    [p.x as f32, p.y as f32]
}
