//! Minimal font description consumed by cell components.

/// Generic font family.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FontFamily {
    /// The platform's default sans-serif face.
    #[default]
    SansSerif,
    /// The platform's default serif face.
    Serif,
    /// The platform's default monospace face.
    Monospace,
    /// A specific named family.
    Named(String),
}

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// A font as seen by the cell engine: family, point size and weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    family: FontFamily,
    size: f32,
    weight: FontWeight,
}

impl Default for Font {
    fn default() -> Self {
        Self::new(FontFamily::SansSerif, 13.0)
    }
}

impl Font {
    /// Create a normal-weight font.
    pub fn new(family: FontFamily, size: f32) -> Self {
        Self {
            family,
            size,
            weight: FontWeight::Normal,
        }
    }

    /// Sets the weight.
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    /// Gets the family.
    pub fn family(&self) -> &FontFamily {
        &self.family
    }

    /// Gets the point size.
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Gets the weight.
    pub fn weight(&self) -> FontWeight {
        self.weight
    }
}
