// ABOUTME: Image-to-ASCII pipeline: luminance, glyph ramp mapping, and row rendering
// ABOUTME: Renders any PixelSource to a glyph grid or a byte sink, dropping blank rows

pub mod luminance;
pub mod pixels;
pub mod ramp;
pub mod renderer;

pub use luminance::{LumaWeights, MAX_BRIGHTNESS};
pub use pixels::PixelSource;
pub use ramp::{GlyphRamp, REFERENCE_GLYPHS};
pub use renderer::{AsciiRenderer, RenderOptions, RenderedGrid, RowBound};
