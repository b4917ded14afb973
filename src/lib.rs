//! Image to ASCII converter using measured glyph luminance.

pub mod compose;
pub mod glyph;
pub mod glyph_map;
pub mod logging;
pub mod luminance;
pub mod region;

pub use glyph::{FontRenderer, GlyphError, GlyphRenderer};
pub use glyph_map::{FillPolicy, GlyphMap, GlyphMapBuilder, DEFAULT_CHAR_RANGE};
pub use luminance::{Luminance, SCALE_MAX};
pub use region::{EdgeMode, Region, RegionSize};

use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LumasciiError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Font error: {0}")]
    Font(String),
    #[error(
        "glyph range yields {distinct} distinct luminance value(s), at least two are required"
    )]
    DegenerateGlyphRange { distinct: usize },
    #[error("invalid region size {width}x{height}")]
    InvalidRegion { width: u32, height: u32 },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Logging error: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, LumasciiError>;

/// Open an image of any supported format as grayscale.
pub fn load_image(path: impl AsRef<Path>) -> Result<image::GrayImage> {
    Ok(image::open(path)?.to_luma8())
}

/// Main converter: partitions images and maps each region to a glyph
pub struct Converter {
    map: GlyphMap,
    region: RegionSize,
    edges: EdgeMode,
}

impl Converter {
    pub fn new(map: GlyphMap) -> Self {
        Self { map, region: RegionSize::default(), edges: EdgeMode::default() }
    }

    /// Build the glyph map from `renderer` over the default character range.
    pub fn from_renderer<R: GlyphRenderer + ?Sized>(renderer: &R) -> Result<Self> {
        Ok(Self::new(GlyphMapBuilder::new(renderer).build()?))
    }

    pub fn with_region(mut self, region: RegionSize) -> Self {
        self.region = region;
        self
    }

    pub fn with_edge_mode(mut self, edges: EdgeMode) -> Self {
        self.edges = edges;
        self
    }

    pub fn glyph_map(&self) -> &GlyphMap {
        &self.map
    }

    pub fn convert(&self, image: &image::DynamicImage) -> String {
        self.convert_gray(&image.to_luma8())
    }

    pub fn convert_gray(&self, gray: &image::GrayImage) -> String {
        let regions = region::partition(gray.width(), gray.height(), self.region, self.edges);
        compose::compose(gray, &regions, self.region.width(), self.edges, &self.map)
    }
}
