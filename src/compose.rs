//! Compositing - turns image regions into rows of glyphs.

use crate::glyph_map::GlyphMap;
use crate::luminance::mean_luminance;
use crate::region::{EdgeMode, Region};
use image::{GenericImageView, GrayImage};
use rayon::prelude::*;

/// Glyph for every region, in region order.
pub fn region_glyphs(image: &GrayImage, regions: &[Region], map: &GlyphMap) -> Vec<char> {
    regions
        .par_iter()
        .map(|r| map.glyph(mean_luminance(&*image.view(r.x, r.y, r.width, r.height))))
        .collect()
}

/// Row width used to lay out `region_count` glyphs.
///
/// A padded grid has one region per started column. A truncated grid starts
/// from the number of whole regions across the image and drops one when the
/// regions don't fill the rows evenly, which is the case when the
/// partitioner left out the last column. Never less than 1.
pub fn column_count(
    image_width: u32,
    region_width: u32,
    region_count: usize,
    edges: EdgeMode,
) -> usize {
    let region_width = region_width.max(1);
    if edges == EdgeMode::Pad {
        return (image_width.div_ceil(region_width) as usize).max(1);
    }

    let columns = (image_width / region_width) as usize;
    if columns == 0 {
        return 1;
    }
    if region_count % columns != 0 {
        (columns - 1).max(1)
    } else {
        columns
    }
}

/// Lay `glyphs` out in rows of `columns`, newline terminated.
pub fn layout(glyphs: &[char], columns: usize) -> String {
    let columns = columns.max(1);
    let mut out = String::with_capacity(glyphs.len() + glyphs.len() / columns + 1);
    for (i, &glyph) in glyphs.iter().enumerate() {
        if i != 0 && i % columns == 0 {
            out.push('\n');
        }
        out.push(glyph);
    }
    out.push('\n');
    out
}

/// Render `regions` of `image` as text.
pub fn compose(
    image: &GrayImage,
    regions: &[Region],
    region_width: u32,
    edges: EdgeMode,
    map: &GlyphMap,
) -> String {
    let glyphs = region_glyphs(image, regions, map);
    let columns = column_count(image.width(), region_width, glyphs.len(), edges);
    tracing::debug!(glyphs = glyphs.len(), columns, "composing output");
    layout(&glyphs, columns)
}
