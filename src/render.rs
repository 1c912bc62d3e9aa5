//! Composite rendering and file export.
//!
//! One routine, [`render`], produces the frame-sized raster used by both the
//! preview and the export path. The source is always re-read from disk so the
//! output reflects the file, not whatever the editor happened to display.

use std::fs::{self, File};
use std::io::{BufWriter, Cursor, Write};
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageDecoder, ImageFormat, ImageReader, Rgba, RgbImage, RgbaImage};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::frame::{OutputFrame, Size};
use crate::placement::PlacedImage;

/// JPEG quality used on export.
pub const JPEG_QUALITY: u8 = 95;

/// Resampling filter for the scaled source.
pub const RESIZE_FILTER: FilterType = FilterType::Lanczos3;

/// Suffix appended to the source stem for the default export name.
pub const EXPORT_SUFFIX: &str = "_c";

/// Output encodings chosen from the export path's extension.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Png,
    Jpeg,
    Bmp,
    WebP,
}

impl ExportFormat {
    /// Pick the format from the extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" | "jfif" => Some(Self::Jpeg),
            "bmp" => Some(Self::Bmp),
            "webp" => Some(Self::WebP),
            _ => None,
        }
    }
}

/// Decode `path` and rotate/flip it into display orientation, as RGBA.
pub fn load_oriented(path: &Path) -> Result<DynamicImage> {
    let decode_err = |source| Error::Decode {
        path: path.to_path_buf(),
        source,
    };
    let mut decoder = ImageReader::open(path)
        .map_err(|e| Error::io(path, e))?
        .with_guessed_format()
        .map_err(|e| Error::io(path, e))?
        .into_decoder()
        .map_err(decode_err)?;
    let orientation = decoder.orientation().map_err(decode_err)?;
    let mut decoded = DynamicImage::from_decoder(decoder).map_err(decode_err)?;
    decoded.apply_orientation(orientation);
    debug!(
        path = %path.display(),
        ?orientation,
        width = decoded.width(),
        height = decoded.height(),
        "decoded source image"
    );
    Ok(DynamicImage::ImageRgba8(decoded.into_rgba8()))
}

/// Display dimensions of an already oriented image.
pub fn display_size(image: &DynamicImage) -> Size {
    Size::new(image.width(), image.height())
}

/// Composite `source` (already oriented) onto a background-filled frame.
///
/// The source is resized to `round(w·s) × round(h·s)` (at least 1×1) and
/// alpha-blended at the rounded position; anything outside the frame is
/// clipped. Only the source pixels that reach the frame, plus the filter's
/// support, are resampled. The result is opaque.
pub fn composite(frame: &OutputFrame, source: &DynamicImage, placed: &PlacedImage) -> RgbImage {
    let mut canvas = background_canvas(frame);

    if display_size(source) != placed.source() {
        warn!(
            file = %display_size(source),
            placed = %placed.source(),
            "source dimensions changed since load; scaling the file as it is now"
        );
    }
    let scale = placed.scale();
    let w = scaled_dimension(source.width(), scale);
    let h = scaled_dimension(source.height(), scale);
    let p = placed.position();
    let (x, y) = (p.x.round() as i64, p.y.round() as i64);

    let cols = visible_span(x, w, frame.size.width, source.width());
    let rows = visible_span(y, h, frame.size.height, source.height());
    let (Some(cols), Some(rows)) = (cols, rows) else {
        debug!(w, h, x, y, "source lies outside the frame");
        return DynamicImage::ImageRgba8(canvas).into_rgb8();
    };

    let window = imageops::crop_imm(source, cols.start, rows.start, cols.len, rows.len).to_image();
    let resized = imageops::resize(&window, cols.scaled_len, rows.scaled_len, RESIZE_FILTER);
    imageops::overlay(&mut canvas, &resized, x + cols.offset, y + rows.offset);
    debug!(
        w,
        h,
        x,
        y,
        window_w = cols.len,
        window_h = rows.len,
        "composited source onto frame"
    );

    DynamicImage::ImageRgba8(canvas).into_rgb8()
}

/// Render the frame, re-reading the source from `image` when one is placed.
pub fn render(frame: &OutputFrame, image: Option<(&Path, &PlacedImage)>) -> Result<RgbImage> {
    match image {
        None => Ok(DynamicImage::ImageRgba8(background_canvas(frame)).into_rgb8()),
        Some((path, placed)) => {
            let source = load_oriented(path)?;
            Ok(composite(frame, &source, placed))
        }
    }
}

/// PNG-encode a rendered frame in memory, for previews.
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(Error::Encode)?;
    Ok(bytes)
}

/// Write a rendered frame to `path`, choosing the encoding from its extension.
///
/// The file is written next to the destination under a temporary name and
/// renamed into place, so a failed export never leaves a truncated file at
/// `path`.
pub fn export(image: &RgbImage, path: &Path) -> Result<ExportFormat> {
    let format = ExportFormat::from_path(path).ok_or_else(|| Error::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let tmp = temp_sibling(path);
    match write_encoded(image, &tmp, format) {
        Ok(()) => {
            fs::rename(&tmp, path).map_err(|e| {
                let _ = fs::remove_file(&tmp);
                Error::io(path, e)
            })?;
            info!(path = %path.display(), ?format, size = %display_size_rgb(image), "exported");
            Ok(format)
        }
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            Err(e)
        }
    }
}

/// `<stem>_c<suffix>` next to the source, or `~/output_c.png` without one.
pub fn default_export_path(source: Option<&Path>) -> PathBuf {
    match source {
        Some(src) => {
            let stem = src
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let suffix = src
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy()))
                .unwrap_or_default();
            src.with_file_name(format!("{stem}{EXPORT_SUFFIX}{suffix}"))
        }
        None => dirs::home_dir()
            .unwrap_or_default()
            .join(format!("output{EXPORT_SUFFIX}.png")),
    }
}

fn background_canvas(frame: &OutputFrame) -> RgbaImage {
    let bg = frame.background;
    RgbaImage::from_pixel(
        frame.size.width,
        frame.size.height,
        Rgba([bg.r, bg.g, bg.b, 255]),
    )
}

/// Source interval along one axis that contributes to the visible frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Span {
    /// First source pixel.
    start: u32,
    /// Source pixels in the window.
    len: u32,
    /// Window length after resampling.
    scaled_len: u32,
    /// Offset of the resampled window from the scaled image's origin.
    offset: i64,
}

/// Window of `source` pixels needed to draw the part of a `scaled`-long run
/// at `pos` that falls inside `0..frame`. `None` when nothing is visible.
fn visible_span(pos: i64, scaled: u32, frame: u32, source: u32) -> Option<Span> {
    let lo = (-pos).max(0);
    let hi = (i64::from(frame) - pos).min(i64::from(scaled));
    if lo >= hi {
        return None;
    }
    let ratio = f64::from(scaled) / f64::from(source);
    // Lanczos3 reaches three source pixels when enlarging, 3/ratio when shrinking.
    let margin = (3.0 / ratio.min(1.0)).ceil() as i64 + 1;
    let start = ((lo as f64 / ratio).floor() as i64 - margin).max(0);
    let end = ((hi as f64 / ratio).ceil() as i64 + margin).min(i64::from(source));
    let len = end - start;
    Some(Span {
        start: start as u32,
        len: len as u32,
        scaled_len: ((len as f64 * ratio).round() as u32).max(1),
        offset: (start as f64 * ratio).round() as i64,
    })
}

fn scaled_dimension(len: u32, scale: f64) -> u32 {
    ((f64::from(len) * scale).round() as u32).max(1)
}

fn display_size_rgb(image: &RgbImage) -> Size {
    Size::new(image.width(), image.height())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.partial"))
}

fn write_encoded(image: &RgbImage, path: &Path, format: ExportFormat) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut out = BufWriter::new(file);
    match format {
        ExportFormat::Jpeg => JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY)
            .encode_image(image)
            .map_err(Error::Encode)?,
        ExportFormat::Png => image
            .write_to(&mut out, ImageFormat::Png)
            .map_err(Error::Encode)?,
        ExportFormat::Bmp => image
            .write_to(&mut out, ImageFormat::Bmp)
            .map_err(Error::Encode)?,
        ExportFormat::WebP => image
            .write_to(&mut out, ImageFormat::WebP)
            .map_err(Error::Encode)?,
    }
    out.flush().map_err(|e| Error::io(path, e))
}
