// ABOUTME: Perceptual luminance over 16-bit color channels
// ABOUTME: Weighted RGB sum rounded to whole brightness levels so white lands exactly on the top

use anyhow::{bail, Result};

/// Top of the brightness domain; channels and luminance live in `[0, MAX_BRIGHTNESS]`.
pub const MAX_BRIGHTNESS: u16 = u16::MAX;

/// Per-channel weights applied to red, green and blue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LumaWeights {
    red: f64,
    green: f64,
    blue: f64,
}

impl LumaWeights {
    /// ITU-R BT.601 luma coefficients.
    pub const REC601: LumaWeights = LumaWeights {
        red: 0.299,
        green: 0.587,
        blue: 0.114,
    };

    /// Weights must be finite and non-negative, otherwise luminance would
    /// stop being monotonic in each channel.
    pub fn new(red: f64, green: f64, blue: f64) -> Result<Self> {
        for (name, weight) in [("red", red), ("green", green), ("blue", blue)] {
            if !weight.is_finite() || weight < 0.0 {
                bail!("Invalid {} luma weight {}: must be a non-negative number", name, weight);
            }
        }
        Ok(Self { red, green, blue })
    }

    /// `L = wr*R + wg*G + wb*B`, rounded to the nearest whole level and
    /// clamped to the brightness domain. Rounding keeps full white at
    /// exactly `MAX_BRIGHTNESS` despite float error in the weighted sum.
    pub fn luminance(&self, [r, g, b]: [u16; 3]) -> f64 {
        let l = r as f64 * self.red + g as f64 * self.green + b as f64 * self.blue;
        l.round().clamp(0.0, MAX_BRIGHTNESS as f64)
    }
}

impl Default for LumaWeights {
    fn default() -> Self {
        Self::REC601
    }
}
