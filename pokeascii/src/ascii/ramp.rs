// ABOUTME: Glyph ramps mapping brightness levels to ASCII characters
// ABOUTME: Validates the palette and buckets luminance into glyph indices with a clamp

use anyhow::{bail, Result};
use std::fmt;

use super::luminance::MAX_BRIGHTNESS;

/// 92 glyphs, space first (lightest) through `@` (darkest).
pub const REFERENCE_GLYPHS: &str = " `.-':_,^=;><+!rc*/z?sLTv)J7(|Fi{C}fI31tlu[neoZ5Yxjya]2ESwqkP6h9d4VpOGbUAKXHm8RD#$Bg0MNWQ%&@";

/// Ordered, immutable palette. Index 0 is picked for luminance 0.
///
/// The domain `[0, MAX_BRIGHTNESS]` is split into `len - 1` buckets of
/// `MAX_BRIGHTNESS / (len - 1)` (integer division) and the bucket number is
/// the glyph index, clamped to the last glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphRamp {
    glyphs: String,
    unit: u32,
}

impl GlyphRamp {
    pub fn new(glyphs: &str) -> Result<Self> {
        let len = glyphs.len();
        if len < 2 {
            bail!("Glyph ramp needs at least 2 glyphs, got {}", len);
        }
        if len - 1 > MAX_BRIGHTNESS as usize {
            bail!(
                "Glyph ramp has {} glyphs, more than the {} brightness levels",
                len,
                MAX_BRIGHTNESS as usize + 1
            );
        }
        if let Some(bad) = glyphs.chars().find(|c| !(' '..='~').contains(c)) {
            bail!("Glyph ramp may only contain printable ASCII, found {:?}", bad);
        }

        Ok(Self {
            glyphs: glyphs.to_string(),
            unit: MAX_BRIGHTNESS as u32 / (len as u32 - 1),
        })
    }

    pub fn reference() -> Self {
        Self {
            glyphs: REFERENCE_GLYPHS.to_string(),
            unit: MAX_BRIGHTNESS as u32 / (REFERENCE_GLYPHS.len() as u32 - 1),
        }
    }

    /// Same glyphs in the opposite polarity.
    pub fn reversed(&self) -> Self {
        Self {
            glyphs: self.glyphs.chars().rev().collect(),
            unit: self.unit,
        }
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always false; a ramp holds at least two glyphs.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.glyphs
    }

    pub fn contains(&self, glyph: u8) -> bool {
        self.glyphs.as_bytes().contains(&glyph)
    }

    pub fn index_for(&self, luminance: f64) -> usize {
        let last = self.len() - 1;
        // `as` saturates: NaN and negatives land on 0
        let bucket = (luminance / self.unit as f64).floor() as usize;
        bucket.min(last)
    }

    pub fn glyph_for(&self, luminance: f64) -> u8 {
        self.glyphs.as_bytes()[self.index_for(luminance)]
    }
}

impl Default for GlyphRamp {
    fn default() -> Self {
        Self::reference()
    }
}

impl fmt::Display for GlyphRamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.glyphs)
    }
}
