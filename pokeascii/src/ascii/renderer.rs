// ABOUTME: Raster to glyph-grid conversion with blank-row elision
// ABOUTME: Renders to an in-memory grid or streams rows to any io::Write sink

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::io::Write;

use super::luminance::LumaWeights;
use super::pixels::PixelSource;
use super::ramp::GlyphRamp;

const BLANK: u8 = b' ';

/// Which dimension bounds the row loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowBound {
    /// Rows `0..height`.
    #[default]
    Height,
    /// Rows `0..width`, the legacy square-image behavior. Rows past the
    /// real height read as transparent and are elided.
    Width,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOptions {
    pub ramp: GlyphRamp,
    pub weights: LumaWeights,
    pub row_bound: RowBound,
}

/// Rendered rows, blank rows already dropped. Every row is `columns` glyphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedGrid {
    columns: usize,
    rows: Vec<String>,
}

impl RenderedGrid {
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for RenderedGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct AsciiRenderer {
    options: RenderOptions,
}

impl AsciiRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn glyph_at<P: PixelSource + ?Sized>(&self, image: &P, x: u32, y: u32) -> u8 {
        let [r, g, b, _] = image.rgba16(x, y);
        let luminance = self.options.weights.luminance([r, g, b]);
        self.options.ramp.glyph_for(luminance)
    }

    fn row_count<P: PixelSource + ?Sized>(&self, image: &P) -> u32 {
        match self.options.row_bound {
            RowBound::Height => image.height(),
            RowBound::Width => image.width(),
        }
    }

    fn row_glyphs<P: PixelSource + ?Sized>(&self, image: &P, y: u32) -> Vec<u8> {
        let mut row = Vec::with_capacity(image.width() as usize + 1);
        row.extend((0..image.width()).map(|x| self.glyph_at(image, x, y)));
        row
    }

    /// Non-blank rows top to bottom, paired with their source row.
    fn rows<'a, P: PixelSource + ?Sized>(
        &'a self,
        image: &'a P,
    ) -> impl Iterator<Item = (u32, Vec<u8>)> + 'a {
        (0..self.row_count(image))
            .map(move |y| (y, self.row_glyphs(image, y)))
            .filter(|(_, row)| !is_blank(row))
    }

    pub fn render_grid<P: PixelSource + ?Sized>(&self, image: &P) -> RenderedGrid {
        // Ramp glyphs are ASCII, so the lossy conversion never replaces anything.
        let rows = self
            .rows(image)
            .map(|(_, row)| String::from_utf8_lossy(&row).into_owned())
            .collect();

        RenderedGrid {
            columns: image.width() as usize,
            rows,
        }
    }

    /// Write each non-blank row plus `\n` to `sink`, stopping at the first
    /// write error.
    pub fn render<P, W>(&self, image: &P, sink: &mut W) -> Result<()>
    where
        P: PixelSource + ?Sized,
        W: Write + ?Sized,
    {
        for (y, mut line) in self.rows(image) {
            line.push(b'\n');
            sink.write_all(&line)
                .with_context(|| format!("Failed to write row {} of rendered image", y))?;
        }

        sink.flush().context("Failed to flush rendered image")
    }
}

fn is_blank(row: &[u8]) -> bool {
    row.iter().all(|&glyph| glyph == BLANK)
}
