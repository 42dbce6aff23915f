//! Perceived-brightness classification of RGB colors.

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Weighted luma estimate on a scale of `0..=8 * 255`.
    pub fn weighted_luma(self) -> u32 {
        luma(u32::from(self.r), u32::from(self.g), u32::from(self.b))
    }

    pub fn is_light(self) -> bool {
        self.weighted_luma() > LIGHT_THRESHOLD
    }
}

/// Weights sum to 8, so the midpoint of the scale is `8 * 128`.
const LIGHT_THRESHOLD: u32 = 8 * 128;

const fn luma(r: u32, g: u32, b: u32) -> u32 {
    5 * g + 2 * r + b
}

/// Determine if the color is perceived as light.
///
/// Each channel must be within `0..=255`; values outside that range are not
/// rejected and simply skew the estimate.
pub const fn is_light_color(r: u32, g: u32, b: u32) -> bool {
    luma(r, g, b) > LIGHT_THRESHOLD
}
