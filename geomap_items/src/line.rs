// Copyright 2025 the Geomap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use geomap_geometry::StrokeStyle;
use peniko::Color;

/// Width and colour of a line or a shape border.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineProperties {
    /// Width in pixels.
    pub width: f64,
    /// Stroke colour.
    pub color: Color,
}

impl Default for LineProperties {
    fn default() -> Self {
        Self {
            width: 1.0,
            color: Color::BLACK,
        }
    }
}

impl LineProperties {
    /// Line of the given width and colour.
    #[must_use]
    pub const fn new(width: f64, color: Color) -> Self {
        Self { width, color }
    }

    /// Returns `true` if stroking this line would draw anything.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.width > 0.0 && self.color.components[3] > 0.0
    }

    /// The pen used to stroke this line.
    #[must_use]
    pub fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle::new(self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visibility() {
        assert!(LineProperties::default().is_visible());
        assert!(!LineProperties::new(0.0, Color::BLACK).is_visible());
        assert!(!LineProperties::new(3.0, Color::TRANSPARENT).is_visible());
    }
}
