//! Image partitioning - splits an image into fixed-size regions, one per
//! output character.

use crate::{LumasciiError, Result};

/// Size of the image area sampled for each output character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionSize {
    width: u32,
    height: u32,
}

impl RegionSize {
    /// # Errors
    /// [`LumasciiError::InvalidRegion`] if either side is zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(LumasciiError::InvalidRegion { width, height });
        }
        Ok(Self { width, height })
    }

    /// Region twice as tall as it is wide, matching the terminal cell aspect.
    ///
    /// # Errors
    /// [`LumasciiError::InvalidRegion`] if `width` is zero.
    pub fn from_width(width: u32) -> Result<Self> {
        Self::new(width, width.saturating_mul(2))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl Default for RegionSize {
    fn default() -> Self {
        Self { width: 1, height: 2 }
    }
}

/// Treatment of the image's last row and column of regions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EdgeMode {
    /// Stop before any region that would reach the right or bottom edge.
    /// The last row and column are dropped even when the image divides
    /// evenly.
    #[default]
    Truncate,
    /// Cover the whole image; edge regions are clipped to its bounds.
    Pad,
}

/// Rectangle of the source image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Shrink to fit inside a `width` × `height` image. The origin must lie
    /// inside the image.
    fn clip(self, width: u32, height: u32) -> Self {
        Self {
            width: self.right().min(width) - self.x,
            height: self.bottom().min(height) - self.y,
            ..self
        }
    }
}

/// Regions of a `width` × `height` image in row-major order.
pub fn partition(width: u32, height: u32, size: RegionSize, edges: EdgeMode) -> Vec<Region> {
    let (rw, rh) = (size.width, size.height);
    let rows = axis_starts(height, rh, edges);
    let cols = axis_starts(width, rw, edges);

    let mut regions = Vec::with_capacity(rows.len() * cols.len());
    for &y in &rows {
        for &x in &cols {
            regions.push(Region { x, y, width: rw, height: rh }.clip(width, height));
        }
    }

    tracing::debug!(
        rows = rows.len(),
        columns = cols.len(),
        regions = regions.len(),
        ?edges,
        "partitioned image"
    );
    regions
}

fn axis_starts(extent: u32, step: u32, edges: EdgeMode) -> Vec<u32> {
    let keep = |start: u32| match edges {
        EdgeMode::Truncate => start.checked_add(step).is_some_and(|end| end < extent),
        EdgeMode::Pad => start < extent,
    };
    (0..extent).step_by(step as usize).take_while(|&s| keep(s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corners(regions: &[Region]) -> Vec<(u32, u32, u32, u32)> {
        regions.iter().map(|r| (r.x, r.y, r.right(), r.bottom())).collect()
    }

    #[test]
    fn zero_sized_regions_are_rejected() {
        assert!(matches!(
            RegionSize::from_width(0),
            Err(LumasciiError::InvalidRegion { width: 0, height: 0 })
        ));
        assert!(RegionSize::new(3, 0).is_err());
    }

    #[test]
    fn default_height_is_twice_width() {
        let size = RegionSize::from_width(3).unwrap();
        assert_eq!((size.width(), size.height()), (3, 6));
        assert_eq!(RegionSize::default(), RegionSize::from_width(1).unwrap());
    }

    #[test]
    fn truncate_drops_last_row_and_column() {
        let size = RegionSize::from_width(2).unwrap();
        let regions = partition(10, 10, size, EdgeMode::Truncate);
        assert_eq!(
            corners(&regions),
            vec![
                (0, 0, 2, 4),
                (2, 0, 4, 4),
                (4, 0, 6, 4),
                (6, 0, 8, 4),
                (0, 4, 2, 8),
                (2, 4, 4, 8),
                (4, 4, 6, 8),
                (6, 4, 8, 8),
            ]
        );
    }

    #[test]
    fn truncate_drops_exact_edges() {
        let size = RegionSize::from_width(1).unwrap();
        let regions = partition(4, 4, size, EdgeMode::Truncate);
        assert_eq!(corners(&regions), vec![(0, 0, 1, 2), (1, 0, 2, 2), (2, 0, 3, 2)]);
    }

    #[test]
    fn truncate_on_tiny_image_is_empty() {
        let size = RegionSize::from_width(4).unwrap();
        assert!(partition(3, 3, size, EdgeMode::Truncate).is_empty());
        assert!(partition(0, 0, size, EdgeMode::Truncate).is_empty());
    }

    #[test]
    fn pad_clips_edge_regions() {
        let size = RegionSize::from_width(2).unwrap();
        let regions = partition(10, 10, size, EdgeMode::Pad);
        assert_eq!(regions.len(), 15);
        assert_eq!(regions[0], Region { x: 0, y: 0, width: 2, height: 4 });
        assert_eq!(regions[14], Region { x: 8, y: 8, width: 2, height: 2 });

        let regions = partition(5, 3, size, EdgeMode::Pad);
        assert_eq!(corners(&regions), vec![(0, 0, 2, 3), (2, 0, 4, 3), (4, 0, 5, 3)]);
    }
}
