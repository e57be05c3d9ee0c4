//! Basic geometry and color types.
//!
//! Cell components are measured and fitted in logical pixels (`f32`), while
//! colors keep 8-bit channels so that contrast shifts are reproducible
//! bit-for-bit across platforms.

/// A point in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The origin point (0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
}

/// A size in 2D space (width and height).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Check if the size has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Component-wise maximum of two sizes.
    #[inline]
    pub fn max(self, other: Size) -> Size {
        Size::new(self.width.max(other.width), self.height.max(other.height))
    }
}

impl From<(f32, f32)> for Size {
    fn from((width, height): (f32, f32)) -> Self {
        Self { width, height }
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
        }
    }
}

/// A rectangle defined by origin and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    /// Create a new rectangle from origin and size.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }

    /// Empty rectangle at origin.
    pub const ZERO: Self = Self {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    /// Left edge x coordinate.
    #[inline]
    pub fn left(&self) -> f32 {
        self.origin.x
    }

    /// Top edge y coordinate.
    #[inline]
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    /// Right edge x coordinate.
    #[inline]
    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    /// Bottom edge y coordinate.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    /// Width of the rectangle.
    #[inline]
    pub fn width(&self) -> f32 {
        self.size.width
    }

    /// Height of the rectangle.
    #[inline]
    pub fn height(&self) -> f32 {
        self.size.height
    }

    /// Check if the rectangle is empty (zero or negative size).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }
}

/// Numerator of the alternating-row contrast shift factor (`242/255`, about 0.949).
///
/// Chosen so that a pure white background becomes `#F2F2F2`.
const SHIFT_NUMERATOR: u32 = 242;
/// Denominator of the alternating-row contrast shift factor.
const SHIFT_DENOMINATOR: u32 = 255;

/// An 8-bit RGBA color.
///
/// Colors are plain values: copying one out of a [`LookAndFeel`](crate::LookAndFeel)
/// or off a host widget never aliases the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create an opaque color from 8-bit RGB components.
    #[inline]
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color from 8-bit RGBA components.
    #[inline]
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from a 32-bit RGBA value (0xRRGGBBAA).
    #[inline]
    pub const fn from_u32(rgba: u32) -> Self {
        Self::from_rgba8(
            ((rgba >> 24) & 0xFF) as u8,
            ((rgba >> 16) & 0xFF) as u8,
            ((rgba >> 8) & 0xFF) as u8,
            (rgba & 0xFF) as u8,
        )
    }

    /// Create a color from a hex string (e.g., "#FF0000" or "#FF0000FF").
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        let len = hex.len();

        if len != 6 && len != 8 {
            return None;
        }

        let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
        let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
        let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
        let a = if len == 8 {
            u8::from_str_radix(hex.get(6..8)?, 16).ok()?
        } else {
            255
        };

        Some(Self::from_rgba8(r, g, b, a))
    }

    /// Format as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    /// Return a new color with modified alpha.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Perceptual brightness in `0.0..=1.0`.
    pub fn brightness(self) -> f64 {
        (0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64) / 255.0
    }

    /// Sum of the red, green and blue channels.
    #[inline]
    pub fn channel_sum(self) -> u32 {
        self.r as u32 + self.g as u32 + self.b as u32
    }

    /// A slightly darker variant, used for striping light backgrounds.
    pub fn darker(self) -> Self {
        let shift = |c: u8| (c as u32 * SHIFT_NUMERATOR / SHIFT_DENOMINATOR) as u8;
        Self::from_rgba8(shift(self.r), shift(self.g), shift(self.b), self.a)
    }

    /// A slightly brighter variant, used for striping dark backgrounds.
    ///
    /// Pure black would stay black under plain scaling, so it is lifted to a
    /// small gray first; likewise very dark non-zero channels are raised to
    /// the same floor before scaling. Saturated colors whose non-zero
    /// channels are already at 255 get their zero channels lifted instead.
    pub fn brighter(self) -> Self {
        let floor = SHIFT_DENOMINATOR / (SHIFT_DENOMINATOR - SHIFT_NUMERATOR);
        if self.r == 0 && self.g == 0 && self.b == 0 {
            let f = floor as u8;
            return Self::from_rgba8(f, f, f, self.a);
        }
        let shift = |c: u8| {
            let mut c = c as u32;
            if c > 0 && c < floor {
                c = floor;
            }
            (c * SHIFT_DENOMINATOR / SHIFT_NUMERATOR).min(255) as u8
        };
        let shifted = Self::from_rgba8(shift(self.r), shift(self.g), shift(self.b), self.a);
        if shifted != self {
            return shifted;
        }
        let lift = |c: u8| if c == 0 { shift(floor as u8) } else { c };
        Self::from_rgba8(lift(self.r), lift(self.g), lift(self.b), self.a)
    }

    /// Shift towards the opposite end of the brightness scale.
    ///
    /// Dark colors (brightness below one half) get brighter, light colors
    /// get darker.
    pub fn contrast_shifted(self) -> Self {
        if self.brightness() < 0.5 {
            self.brighter()
        } else {
            self.darker()
        }
    }

    // Common colors
    pub const TRANSPARENT: Self = Self::from_rgba8(0, 0, 0, 0);
    pub const BLACK: Self = Self::from_rgb8(0, 0, 0);
    pub const WHITE: Self = Self::from_rgb8(255, 255, 255);
    pub const RED: Self = Self::from_rgb8(255, 0, 0);
    pub const GREEN: Self = Self::from_rgb8(0, 255, 0);
    pub const BLUE: Self = Self::from_rgb8(0, 0, 255);
    pub const GRAY: Self = Self::from_rgb8(128, 128, 128);
    pub const DARK_GRAY: Self = Self::from_rgb8(64, 64, 64);
    pub const LIGHT_GRAY: Self = Self::from_rgb8(192, 192, 192);
}
