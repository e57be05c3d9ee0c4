//! Cell borders.

use crate::types::Color;

/// How a border is stroked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyle {
    /// Reserve space but draw nothing.
    Empty,
    /// A solid line.
    #[default]
    Line,
    /// A dashed line, typically used for focus indicators.
    Dashed,
}

/// A uniform border around a cell component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Border {
    /// Stroke color (ignored for [`BorderStyle::Empty`]).
    pub color: Color,
    /// Stroke width in logical pixels.
    pub width: f32,
    /// Stroke style.
    pub style: BorderStyle,
}

impl Border {
    /// A solid line border.
    pub const fn line(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: BorderStyle::Line,
        }
    }

    /// A dashed line border.
    pub const fn dashed(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: BorderStyle::Dashed,
        }
    }

    /// An invisible border that only reserves space.
    pub const fn empty(width: f32) -> Self {
        Self {
            color: Color::TRANSPARENT,
            width,
            style: BorderStyle::Empty,
        }
    }

    /// Returns `true` if the border draws anything.
    pub fn is_visible(&self) -> bool {
        self.style != BorderStyle::Empty && self.width > 0.0 && self.color.a > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_border_visibility() {
        assert!(Border::line(Color::BLACK, 1.0).is_visible());
        assert!(!Border::empty(1.0).is_visible());
        assert!(!Border::line(Color::TRANSPARENT, 1.0).is_visible());
        assert!(!Border::dashed(Color::RED, 0.0).is_visible());
    }
}
