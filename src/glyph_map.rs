//! Luminance to glyph map construction.
//!
//! Building a map runs three phases in order:
//! 1. [`SampledGlyphs::load`] renders every character of a code point range
//!    and records the first character seen for each luminance value.
//! 2. [`SampledGlyphs::normalize`] rescales the recorded values so the darkest
//!    glyph sits at 0 and the lightest at [`SCALE_MAX`].
//! 3. [`NormalizedGlyphs::densify`] fills every remaining luminance value
//!    according to a [`FillPolicy`], yielding a total [`GlyphMap`].

use crate::glyph::GlyphRenderer;
use crate::luminance::{mean_luminance, Luminance, SCALE_MAX};
use crate::{LumasciiError, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::ops::Range;

/// Code points sampled by default. Reaches past 7-bit ASCII to harvest more
/// distinct glyph shapes.
pub const DEFAULT_CHAR_RANGE: Range<u32> = 33..750;

/// How luminance values with no recorded glyph are resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FillPolicy {
    /// Take the glyph of the nearest lower recorded value.
    #[default]
    LeftNearest,
    /// Take the glyph of the nearest recorded value in either direction,
    /// preferring the lower one on ties.
    Nearest,
}

/// Raw per-glyph luminance measurements, first character wins per value.
#[derive(Debug, Clone, Default)]
pub struct SampledGlyphs {
    entries: BTreeMap<Luminance, char>,
    skipped: usize,
}

impl SampledGlyphs {
    pub fn load<R>(renderer: &R, chars: Range<u32>) -> Self
    where
        R: GlyphRenderer + ?Sized,
    {
        let mut sampled = Self::default();
        for ch in chars.filter_map(char::from_u32) {
            match renderer.render(ch) {
                Ok(bitmap) => {
                    sampled.entries.entry(mean_luminance(&bitmap)).or_insert(ch);
                }
                Err(e) => {
                    tracing::trace!(%e, "skipping glyph");
                    sampled.skipped += 1;
                }
            }
        }
        sampled
    }

    /// Number of distinct luminance values recorded.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Characters the renderer could not draw.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn get(&self, luminance: Luminance) -> Option<char> {
        self.entries.get(&luminance).copied()
    }

    /// Rescale recorded values onto `0..=SCALE_MAX`.
    ///
    /// # Errors
    /// [`LumasciiError::DegenerateGlyphRange`] when fewer than two distinct
    /// luminance values were recorded.
    pub fn normalize(self) -> Result<NormalizedGlyphs> {
        let bounds = self.entries.keys().next().zip(self.entries.keys().next_back());
        let (min, max) = match bounds {
            Some((&min, &max)) if min < max => (u32::from(min), u32::from(max)),
            _ => return Err(LumasciiError::DegenerateGlyphRange { distinct: self.entries.len() }),
        };
        tracing::debug!(min, max, "normalizing glyph luminance");

        let span = max - min;
        let anchors = self
            .entries
            .into_iter()
            .map(|(v, ch)| {
                let scaled = u32::from(SCALE_MAX) * (u32::from(v) - min) / span;
                (scaled as Luminance, ch)
            })
            .collect();

        Ok(NormalizedGlyphs { anchors })
    }
}

/// Recorded glyphs rescaled so the first anchor is at 0 and the last at
/// [`SCALE_MAX`]. Sorted by luminance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedGlyphs {
    anchors: Vec<(Luminance, char)>,
}

impl NormalizedGlyphs {
    pub fn anchors(&self) -> &[(Luminance, char)] {
        &self.anchors
    }

    pub fn densify(self, policy: FillPolicy) -> GlyphMap {
        let anchors = &self.anchors;
        let glyphs = (0..=SCALE_MAX)
            .map(|v| {
                // anchors[0] is at 0, so there is always a lower neighbour
                let upper = anchors.partition_point(|&(k, _)| k <= v);
                let (lower_key, lower) = anchors[upper - 1];
                match (policy, anchors.get(upper)) {
                    (FillPolicy::Nearest, Some(&(upper_key, ch)))
                        if upper_key - v < v - lower_key => ch,
                    _ => lower,
                }
            })
            .collect();

        GlyphMap { glyphs, anchors: self.anchors }
    }
}

/// One line of a map dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MapEntry {
    pub luminance: Luminance,
    pub glyph: char,
}

/// Total lookup table from luminance to glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphMap {
    glyphs: Vec<char>,
    anchors: Vec<(Luminance, char)>,
}

impl GlyphMap {
    /// Glyph for `luminance`. Values above [`SCALE_MAX`] clamp.
    pub fn glyph(&self, luminance: Luminance) -> char {
        self.glyphs[usize::from(luminance.min(SCALE_MAX))]
    }

    /// Normalized luminance values that came from a measured glyph.
    pub fn anchors(&self) -> &[(Luminance, char)] {
        &self.anchors
    }

    pub fn entries(&self) -> impl Iterator<Item = MapEntry> + '_ {
        self.glyphs
            .iter()
            .zip(0..)
            .map(|(&glyph, luminance)| MapEntry { luminance, glyph })
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// Runs load, normalize and densify against a glyph renderer.
pub struct GlyphMapBuilder<'r, R: ?Sized> {
    renderer: &'r R,
    chars: Range<u32>,
    fill: FillPolicy,
}

impl<'r, R: GlyphRenderer + ?Sized> GlyphMapBuilder<'r, R> {
    pub fn new(renderer: &'r R) -> Self {
        Self { renderer, chars: DEFAULT_CHAR_RANGE, fill: FillPolicy::default() }
    }

    pub fn chars(mut self, chars: Range<u32>) -> Self {
        self.chars = chars;
        self
    }

    pub fn fill_policy(mut self, fill: FillPolicy) -> Self {
        self.fill = fill;
        self
    }

    /// # Errors
    /// Fails when the character range yields fewer than two distinct
    /// luminance values.
    pub fn build(&self) -> Result<GlyphMap> {
        let sampled = SampledGlyphs::load(self.renderer, self.chars.clone());
        tracing::info!(
            start = self.chars.start,
            end = self.chars.end,
            distinct = sampled.len(),
            skipped = sampled.skipped(),
            "sampled glyph luminance"
        );
        Ok(sampled.normalize()?.densify(self.fill))
    }
}
