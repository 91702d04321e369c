use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use ab_glyph::{FontVec, PxScale};
use anyhow::{anyhow, bail, Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use little_exif::exif_tag::ExifTag;
use little_exif::metadata::Metadata;

/// Top-left corner the label text is anchored to.
const TEXT_ANCHOR: (i32, i32) = (10, 10);

/// Padding of the backing rectangle around the rendered text.
const TEXT_PADDING: i32 = 6;

/// Text height as a fraction of the image height.
const FONT_HEIGHT_RATIO: f32 = 0.05;

const JPEG_QUALITY: u8 = 95;

/// The Exif character-code prefix declaring an ASCII user comment.
const ASCII_COMMENT_PREFIX: &[u8; 8] = b"ASCII\0\0\0";

/// Fonts probed after the configured one, in order.
const FONT_CANDIDATES: [&str; 4] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
];

/// Picks the font used for every label of the run: the configured
/// file when it loads, otherwise the first known system font that
/// does. Every rejected candidate is reported.
pub fn resolve_font(configured: Option<&Path>, verbose: bool) -> Result<FontVec> {
    if let Some(path) = configured {
        match load_font(path) {
            Ok(font) => {
                if verbose {
                    println!("Using font {:?}.", path);
                }
                return Ok(font);
            }
            Err(e) => eprintln!("Warning: {:#}. Trying the system fonts.", e),
        }
    }

    for candidate in FONT_CANDIDATES {
        let candidate = Path::new(candidate);

        if !candidate.is_file() {
            continue;
        }

        match load_font(candidate) {
            Ok(font) => {
                if verbose {
                    println!("Using font {:?}.", candidate);
                }
                return Ok(font);
            }
            Err(e) => eprintln!("Warning: {:#}.", e),
        }
    }

    bail!("no usable TrueType font found; pass one with --font")
}

fn load_font(path: &Path) -> Result<FontVec> {
    let bytes = std::fs::read(path).with_context(|| format!("couldn't read the font {:?}", path))?;

    FontVec::try_from_vec(bytes).map_err(|_| anyhow!("{:?} is not a valid font file", path))
}

/// Draws `label` over a copy of `input` saved into `output_dir`, then
/// stamps the label into the copy's Exif metadata. Returns the path
/// of the labeled file.
pub fn annotate(input: &Path, label: &str, output_dir: &Path, font: &FontVec) -> Result<PathBuf> {
    let image = image::open(input).with_context(|| format!("couldn't decode {:?}", input))?;
    let mut canvas: RgbImage = image.to_rgb8();

    let scale = PxScale::from((canvas.height() as f32 * FONT_HEIGHT_RATIO).max(1.0));
    let (text_width, text_height) = text_size(scale, font, label);

    let (x, y) = TEXT_ANCHOR;
    let backing = Rect::at(x - TEXT_PADDING, y - TEXT_PADDING).of_size(
        text_width + 2 * TEXT_PADDING as u32,
        text_height + 2 * TEXT_PADDING as u32,
    );
    draw_filled_rect_mut(&mut canvas, backing, Rgb([0, 0, 0]));
    draw_text_mut(&mut canvas, Rgb([255, 255, 255]), x, y, scale, font, label);

    let file_name = input
        .file_name()
        .with_context(|| format!("{:?} has no file name", input))?;
    let output = output_dir.join(file_name);

    let file =
        File::create(&output).with_context(|| format!("couldn't create {:?}", output))?;
    let mut writer = BufWriter::new(file);
    canvas
        .write_with_encoder(JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY))
        .with_context(|| format!("couldn't encode {:?}", output))?;
    writer
        .flush()
        .with_context(|| format!("couldn't write {:?}", output))?;

    write_label_fields(&output, label)
        .with_context(|| format!("couldn't write the Exif fields of {:?}", output))?;

    Ok(output)
}

/// Sets the saved copy's description and user-comment fields to the
/// label, overwriting any prior value.
fn write_label_fields(path: &Path, label: &str) -> Result<()> {
    let mut metadata = Metadata::new();

    metadata.set_tag(ExifTag::ImageDescription(label.to_string()));

    let mut comment = ASCII_COMMENT_PREFIX.to_vec();
    comment.extend_from_slice(label.as_bytes());
    metadata.set_tag(ExifTag::UserComment(comment));

    metadata.write_to_file(path)?;

    Ok(())
}
