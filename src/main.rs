//! lumascii CLI - Convert images to ASCII art

use clap::{CommandFactory, Parser, ValueEnum};
use lumascii::logging::{init_logging, LoggingConfig};
use lumascii::{
    load_image, Converter, EdgeMode, FillPolicy, FontRenderer, GlyphMap, GlyphMapBuilder,
    LumasciiError, RegionSize, DEFAULT_CHAR_RANGE,
};
use std::ops::Range;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "lumascii",
    about = "Convert images to ASCII art",
    after_help = "Example:\n    lumascii sample/face.jpg 2\n\n\
        Divides face.jpg into 2x4 pixel regions and prints one character per region."
)]
struct Args {
    /// Input image file. Supports many formats
    input: PathBuf,
    /// Width in pixels of the image regions converted to one character each.
    /// The height is twice the width unless --region-height is given
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,
    /// Height in pixels of each region
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    region_height: Option<u32>,
    /// Font file used to measure glyph darkness [default: bundled DejaVu Sans Mono]
    #[arg(short, long)]
    font: Option<PathBuf>,
    /// Font size in pixels for glyph measurement
    #[arg(long, default_value = "40.0")]
    font_size: f32,
    /// Code point range to sample glyphs from (e.g. 33..750 or 0x21..0x7f)
    #[arg(long, value_parser = parse_char_range)]
    chars: Option<Range<u32>>,
    /// Include the partial last row and column of the image
    #[arg(long)]
    pad_edges: bool,
    /// How luminance values without a measured glyph are filled
    #[arg(long, value_enum, default_value_t = Fill::LeftNearest)]
    fill: Fill,
    /// Invert the image
    #[arg(short, long)]
    invert: bool,
    /// Print the glyph map instead of converting
    #[arg(long, value_enum)]
    dump_map: Option<DumpFormat>,
    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum Fill {
    LeftNearest,
    Nearest,
}

impl From<Fill> for FillPolicy {
    fn from(fill: Fill) -> Self {
        match fill {
            Fill::LeftNearest => FillPolicy::LeftNearest,
            Fill::Nearest => FillPolicy::Nearest,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum DumpFormat {
    Text,
    Json,
}

fn parse_char_range(s: &str) -> Result<Range<u32>, String> {
    let (start, end) = s
        .split_once("..")
        .ok_or_else(|| format!("expected START..END, got '{s}'"))?;
    let parse = |v: &str| {
        let v = v.trim();
        match v.strip_prefix("0x").or_else(|| v.strip_prefix("0X")) {
            Some(hex) => u32::from_str_radix(hex, 16),
            None => v.parse(),
        }
        .map_err(|e| format!("invalid code point '{v}': {e}"))
    };
    let (start, end) = (parse(start)?, parse(end)?);
    if start >= end {
        return Err(format!("empty range {start}..{end}"));
    }
    Ok(start..end)
}

/// Parsed arguments, or `None` when they should be answered with usage text.
fn parse_args<I, T>(args: I) -> Option<Args>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Args::try_parse_from(args).ok()
}

fn print_usage() {
    println!("{}", Args::command().render_help());
}

fn dump_map(map: &GlyphMap, format: DumpFormat) -> Result<(), LumasciiError> {
    match format {
        DumpFormat::Text => {
            println!("Character Map:");
            for entry in map.entries() {
                println!("{} {}", entry.luminance, entry.glyph);
            }
            println!("Total items in the character map: {}", map.len());
        }
        DumpFormat::Json => {
            let entries: Vec<_> = map.entries().collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }
    Ok(())
}

fn converter(args: &Args) -> Result<Converter, LumasciiError> {
    let region = match args.region_height {
        Some(height) => RegionSize::new(args.width, height)?,
        None => RegionSize::from_width(args.width)?,
    };
    let edges = if args.pad_edges { EdgeMode::Pad } else { EdgeMode::Truncate };

    let renderer = match &args.font {
        Some(path) => FontRenderer::from_file(path)?,
        None => FontRenderer::embedded()?,
    }
    .with_font_size(args.font_size);
    let map = GlyphMapBuilder::new(&renderer)
        .chars(args.chars.clone().unwrap_or(DEFAULT_CHAR_RANGE))
        .fill_policy(args.fill.into())
        .build()?;

    Ok(Converter::new(map).with_region(region).with_edge_mode(edges))
}

fn main() -> Result<(), LumasciiError> {
    let Some(args) = parse_args(std::env::args_os()) else {
        print_usage();
        return Ok(());
    };

    init_logging(&LoggingConfig::from_env().verbosity(args.verbose))?;

    let converter = converter(&args)?;
    if let Some(format) = args.dump_map {
        return dump_map(converter.glyph_map(), format);
    }

    let mut image = image::DynamicImage::ImageLuma8(load_image(&args.input)?);
    if args.invert {
        image.invert();
    }

    print!("{}", converter.convert(&image));
    Ok(())
}
