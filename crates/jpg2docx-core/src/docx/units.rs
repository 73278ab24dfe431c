//! DrawingML length units.
//!
//! Word measures drawing extents in English Metric Units (EMU), 914 400 per
//! inch.

use serde::{Deserialize, Serialize};

use crate::decode::ImageInfo;

/// EMU per inch.
pub const EMU_PER_INCH: u64 = 914_400;

/// A physical length stored as whole EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Length(u64);

impl Length {
    pub const fn from_emu(emu: u64) -> Self {
        Self(emu)
    }

    /// Convert from inches, rounding to the nearest EMU. Negative and NaN
    /// inputs collapse to zero.
    pub fn from_inches(inches: f64) -> Self {
        Self((inches * EMU_PER_INCH as f64).round().max(0.0) as u64)
    }

    pub const fn emu(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Scale this length by `numerator / denominator`, rounding half up.
    ///
    /// Returns `None` when `denominator` is zero.
    pub fn scale(self, numerator: u64, denominator: u64) -> Option<Self> {
        if denominator == 0 {
            return None;
        }
        let num = self.0 as u128 * numerator as u128;
        let den = denominator as u128;
        let scaled = (num + den / 2) / den;
        Some(Self(u64::try_from(scaled).unwrap_or(u64::MAX)))
    }
}

/// Height that keeps an image undistorted when it is drawn `width` wide.
///
/// Each axis is measured in inches at its own declared resolution, so a
/// 72 x 96 dpi image is drawn shorter than its pixel ratio alone suggests.
/// Returns `None` for a zero pixel width.
pub fn proportional_height(width: Length, info: &ImageInfo) -> Option<Length> {
    let numerator = u64::from(info.height) * u64::from(info.resolution.horizontal);
    let denominator = u64::from(info.width) * u64::from(info.resolution.vertical);
    width.scale(numerator, denominator)
}
