//! Render a decorated icon to PNG.
//!
//! Usage:
//!   cargo run --features clap --bin icon-decorator -- \
//!     --icon folder.svg \
//!     --decorator star.svg \
//!     --position top-right \
//!     --scale 2 \
//!     -o folder-star.png
//!
//! Configuration can also come from a JSON profile (`--profile p.json`);
//! attributes given on the command line override the profile.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::info;

use icon_decorator::{
    Configurable, DecoratorError, DecoratorProfile, Document, ELEMENT_NAME, SlotName, SvgSource,
};

/// Inset a badge into a corner of an icon and write the result as PNG
#[derive(Parser, Debug)]
#[command(name = "icon-decorator")]
#[command(about = "Render an icon with a corner badge and circular cutout")]
struct Args {
    /// Icon SVG file
    #[arg(long)]
    icon: Option<PathBuf>,

    /// Decorator (badge) SVG file
    #[arg(long, conflicts_with = "emoji")]
    decorator: Option<PathBuf>,

    /// Emoji to use as the decorator (requires the `twemoji` feature)
    #[arg(long)]
    emoji: Option<String>,

    /// Corner: top-left, top-right, bottom-left or bottom-right
    #[arg(long)]
    position: Option<String>,

    /// Badge offset from the icon centre (e.g. "3px" or "10%")
    #[arg(long)]
    offset: Option<String>,

    /// Badge display scale
    #[arg(long)]
    size_ratio: Option<String>,

    /// Gap between the badge and the cutout edge (e.g. "2px")
    #[arg(long)]
    cutout_border: Option<String>,

    /// Padding inside the badge frame (e.g. "3px")
    #[arg(long)]
    decorator_padding: Option<String>,

    /// JSON profile applied before the other options
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Device pixel ratio of the output
    #[arg(long, default_value_t = 1.0)]
    scale: f32,

    /// Maximum number of frames to run before painting
    #[arg(long, default_value_t = 16)]
    max_frames: usize,

    /// Output PNG path
    #[arg(long, short = 'o')]
    output: PathBuf,
}

fn read_svg(path: &Path) -> Result<SvgSource, DecoratorError> {
    Ok(SvgSource::from_svg(fs::read_to_string(path)?))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,icon_decorator=info".into()),
        )
        .init();

    let args = Args::parse();

    let mut document = Document::new();
    let id = document.create_element(ELEMENT_NAME)?;

    if let Some(path) = &args.profile {
        let profile = DecoratorProfile::from_json(&fs::read_to_string(path)?)?;
        document.element_mut(id)?.apply_profile(&profile)?;
    }

    let overrides = [
        ("position", &args.position),
        ("offset", &args.offset),
        ("size-ratio", &args.size_ratio),
        ("cutout-border", &args.cutout_border),
        ("decorator-padding", &args.decorator_padding),
    ];
    for (name, value) in overrides {
        if let Some(value) = value {
            document.set_attribute(id, name, value)?;
        }
    }

    if let Some(path) = &args.icon {
        document.set_slot(id, SlotName::Icon, Some(read_svg(path)?))?;
    }
    if let Some(path) = &args.decorator {
        document.set_slot(id, SlotName::Decorator, Some(read_svg(path)?))?;
    }
    if let Some(emoji) = &args.emoji {
        document.set_slot(id, SlotName::Decorator, Some(SvgSource::Emoji(emoji.clone())))?;
    }

    if document.element(id)?.slot(SlotName::Icon).is_none() {
        return Err("no icon given (use --icon or a profile with an icon)".into());
    }

    document.append(id)?;
    let frames = document.run_until_idle(args.max_frames);
    info!(frames, "document settled");

    let image = document
        .paint(id, args.scale)?
        .ok_or("the icon has an empty box; nothing to paint")?;
    image.save_png(&args.output)?;

    let (width, height) = image.data.dimensions();
    info!(path = %args.output.display(), width, height, "wrote PNG");
    Ok(())
}
