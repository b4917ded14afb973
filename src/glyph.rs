//! Glyph rendering - draws single characters onto a fixed monochrome canvas.

use crate::{LumasciiError, Result};
use fontdue::{Font, FontSettings};
use image::{GrayImage, Luma};
use std::path::Path;
use thiserror::Error;

/// Side of the square canvas every glyph is drawn on.
pub const CANVAS_SIZE: u32 = 50;
/// Font size that keeps representative glyphs inside the canvas.
pub const DEFAULT_FONT_SIZE: f32 = 40.0;

// Coverage at or above this is ink
const INK_THRESHOLD: u8 = 128;

/// DejaVu Sans Mono, used when no font file is given.
static EMBEDDED_FONT: &[u8] = include_bytes!("../assets/DejaVuSansMono.ttf");

/// A character the glyph source cannot draw.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphError {
    #[error("font has no glyph for {0:?}")]
    Missing(char),
    #[error("{0:?} is a control character")]
    Control(char),
}

/// Source of glyph bitmaps for the map builder.
///
/// Implementations must be deterministic: rendering the same character twice
/// yields identical bitmaps, drawn dark on a white background.
pub trait GlyphRenderer {
    fn render(&self, ch: char) -> std::result::Result<GrayImage, GlyphError>;
}

/// Renders glyphs from a TrueType/OpenType font with fontdue.
pub struct FontRenderer {
    font: Font,
    font_size: f32,
}

impl FontRenderer {
    /// Renderer backed by the bundled DejaVu Sans Mono.
    pub fn embedded() -> Result<Self> {
        Self::from_bytes(EMBEDDED_FONT)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let font = Font::from_bytes(data, FontSettings::default())
            .map_err(|e| LumasciiError::Font(e.to_string()))?;
        Ok(Self { font, font_size: DEFAULT_FONT_SIZE })
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }
}

impl GlyphRenderer for FontRenderer {
    fn render(&self, ch: char) -> std::result::Result<GrayImage, GlyphError> {
        if ch.is_control() {
            return Err(GlyphError::Control(ch));
        }
        if self.font.lookup_glyph_index(ch) == 0 {
            return Err(GlyphError::Missing(ch));
        }

        let mut img = GrayImage::from_pixel(CANVAS_SIZE, CANVAS_SIZE, Luma([255]));
        let (metrics, coverage) = self.font.rasterize(ch, self.font_size);
        if metrics.width == 0 || metrics.height == 0 {
            return Ok(img);
        }

        // Text is anchored at the top-left corner, so the baseline sits at the ascent
        let ascent = self
            .font
            .horizontal_line_metrics(self.font_size)
            .map_or(self.font_size, |m| m.ascent);
        let x_offset = metrics.xmin;
        let y_offset = ascent.round() as i32 - metrics.height as i32 - metrics.ymin;

        let size = CANVAS_SIZE as i32;
        for sy in 0..metrics.height {
            for sx in 0..metrics.width {
                let tx = x_offset + sx as i32;
                let ty = y_offset + sy as i32;
                if tx >= 0 && tx < size && ty >= 0 && ty < size
                    && coverage[sy * metrics.width + sx] >= INK_THRESHOLD
                {
                    img.put_pixel(tx as u32, ty as u32, Luma([0]));
                }
            }
        }

        Ok(img)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::luminance::mean_luminance;

    fn ink(img: &GrayImage) -> Vec<(u32, u32)> {
        img.enumerate_pixels()
            .filter(|(_, _, p)| p.0[0] == 0)
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    #[test]
    fn glyphs_are_monochrome_and_inked() {
        let renderer = FontRenderer::embedded().unwrap();
        let img = renderer.render('M').unwrap();
        assert_eq!(img.dimensions(), (CANVAS_SIZE, CANVAS_SIZE));
        assert!(img.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
        assert!(ink(&img).len() > 50);
    }

    #[test]
    fn glyphs_fit_the_canvas() {
        let renderer = FontRenderer::embedded().unwrap();
        let last = CANVAS_SIZE - 1;
        for ch in ['M', 'g', 'j', '@', 'Q', '_', '^'] {
            let img = renderer.render(ch).unwrap();
            let inked = ink(&img);
            assert!(!inked.is_empty(), "{ch:?} has no ink");
            assert!(
                inked.iter().all(|&(x, y)| y > 0 && y < last && x < last),
                "{ch:?} touches the canvas edge"
            );
        }
    }

    #[test]
    fn baseline_sits_at_ascent() {
        let renderer = FontRenderer::embedded().unwrap();
        let bottom = |ch| ink(&renderer.render(ch).unwrap()).iter().map(|&(_, y)| y).max();
        // 'x' rests on the baseline, 'p' descends below it
        let (x, p) = (bottom('x').unwrap(), bottom('p').unwrap());
        assert!(p > x + 3, "x ends at {x}, p at {p}");
        assert!(x > CANVAS_SIZE / 2);
    }

    #[test]
    fn space_is_blank() {
        let renderer = FontRenderer::embedded().unwrap();
        assert!(ink(&renderer.render(' ').unwrap()).is_empty());
    }

    #[test]
    fn dense_glyphs_are_darker() {
        let renderer = FontRenderer::embedded().unwrap();
        let dot = mean_luminance(&renderer.render('.').unwrap());
        let at = mean_luminance(&renderer.render('@').unwrap());
        assert!(at < dot, "'@' = {at}, '.' = {dot}");
    }

    #[test]
    fn rendering_is_deterministic() {
        let renderer = FontRenderer::embedded().unwrap();
        assert_eq!(renderer.render('&').unwrap(), renderer.render('&').unwrap());
    }

    #[test]
    fn unrenderable_characters_are_reported() {
        let renderer = FontRenderer::embedded().unwrap();
        assert_eq!(renderer.render('\u{7}'), Err(GlyphError::Control('\u{7}')));
        assert_eq!(renderer.render('\u{4E00}'), Err(GlyphError::Missing('\u{4E00}')));
    }

    #[test]
    fn garbage_font_data_is_rejected() {
        let err = FontRenderer::from_bytes(b"not a font").err();
        assert!(matches!(err, Some(LumasciiError::Font(_))));
    }

    #[test]
    fn missing_font_file_is_io_error() {
        let err = FontRenderer::from_file("/nonexistent/lumascii/font.ttf").err();
        assert!(matches!(err, Some(LumasciiError::Io(_))));
    }
}
