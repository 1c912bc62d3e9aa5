//! The fixed output frame: dimensions, background color, presets, and guides.
//!
//! A frame is replaced wholesale whenever the user picks a new size or color;
//! nothing here is mutated in place.
//!
//! # Example
//!
//! ```
//! use framecrop::{OutputFrame, Rgb, Size};
//!
//! let frame = OutputFrame::new(1920, 1080, Rgb::WHITE).unwrap();
//! assert_eq!(frame.size, Size::new(1920, 1080));
//! assert_eq!(frame.background.to_hex(), "#FFFFFF");
//! ```

use core::fmt;
use core::str::FromStr;

use crate::placement::{PlacementError, Point};

/// Largest width or height accepted from custom size entry.
pub const MAX_CUSTOM_DIMENSION: u32 = 20_000;

/// How far the center guides extend past the frame edge, in frame pixels.
pub const GUIDE_BLEED: f64 = 40.0;

/// Distance of the taskbar guide from the bottom edge, in frame pixels.
pub const TASKBAR_HEIGHT: f64 = 48.0;

/// Width × height dimensions in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Parse `"WxH"` (also `X` or `×` as separator). Both sides must be positive.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let (w, h) = s
            .split_once(['x', 'X', '×'])
            .map(|(w, h)| (w.trim(), h.trim()))?;
        let width: u32 = w.parse().ok()?;
        let height: u32 = h.parse().ok()?;
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self { width, height })
    }

    /// Clamp both sides into `1..=MAX_CUSTOM_DIMENSION`.
    pub fn clamp_custom(self) -> Self {
        Self {
            width: self.width.clamp(1, MAX_CUSTOM_DIMENSION),
            height: self.height.clamp(1, MAX_CUSTOM_DIMENSION),
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Size {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("expected WIDTHxHEIGHT with positive sides, got {s:?}"))
    }
}

/// Opaque sRGB color, 8 bits per channel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// `#FFFFFF`.
    pub const WHITE: Self = Self::new(0xFF, 0xFF, 0xFF);
    /// `#000000`.
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RGB` / `RGB` or `#RRGGBB` / `RRGGBB`.
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let bytes = hex.as_bytes();
        match bytes.len() {
            3 => Some(Self {
                r: expand_nibble(bytes[0])?,
                g: expand_nibble(bytes[1])?,
                b: expand_nibble(bytes[2])?,
            }),
            6 => Some(Self {
                r: parse_byte(&bytes[0..2])?,
                g: parse_byte(&bytes[2..4])?,
                b: parse_byte(&bytes[4..6])?,
            }),
            _ => None,
        }
    }

    /// Uppercase `#RRGGBB`, the form recent colors are stored in.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Relative luminance in `0.0..=1.0` (Rec. 709 weights on gamma-encoded values).
    pub fn luminance(self) -> f64 {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;
        0.2126 * r + 0.7152 * g + 0.0722 * b
    }

    /// Black on light backgrounds, white on dark ones.
    pub fn contrasting(self) -> Self {
        if self.luminance() > 0.6 {
            Self::BLACK
        } else {
            Self::WHITE
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s).ok_or_else(|| format!("expected #RGB or #RRGGBB, got {s:?}"))
    }
}

/// Expand a single hex nibble: 'f' → 0xFF, 'a' → 0xAA.
fn expand_nibble(ch: u8) -> Option<u8> {
    let n = hex_val(ch)?;
    Some(n << 4 | n)
}

fn hex_val(ch: u8) -> Option<u8> {
    match ch {
        b'0'..=b'9' => Some(ch - b'0'),
        b'a'..=b'f' => Some(ch - b'a' + 10),
        b'A'..=b'F' => Some(ch - b'A' + 10),
        _ => None,
    }
}

fn parse_byte(pair: &[u8]) -> Option<u8> {
    let hi = hex_val(pair[0])?;
    let lo = hex_val(pair[1])?;
    Some(hi << 4 | lo)
}

/// Built-in output sizes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SizePreset {
    /// 1920×1080.
    Landscape,
    /// 1080×1920.
    Portrait,
}

impl SizePreset {
    pub const ALL: [Self; 2] = [Self::Landscape, Self::Portrait];

    pub const fn size(self) -> Size {
        match self {
            Self::Landscape => Size::new(1920, 1080),
            Self::Portrait => Size::new(1080, 1920),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Landscape => "1920×1080 (landscape)",
            Self::Portrait => "1080×1920 (portrait)",
        }
    }
}

/// Built-in background colors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BackgroundPreset {
    /// `#251E1C`.
    Dark,
    /// `#FFFFFF`.
    White,
}

impl BackgroundPreset {
    pub const ALL: [Self; 2] = [Self::Dark, Self::White];

    pub const fn color(self) -> Rgb {
        match self {
            Self::Dark => Rgb::new(0x25, 0x1E, 0x1C),
            Self::White => Rgb::WHITE,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Dark => "#251E1C (dark)",
            Self::White => "#FFFFFF (white)",
        }
    }
}

/// A line segment in frame coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

/// Editing guides for a frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Guides {
    /// Vertical line through the frame center, bleeding past top and bottom.
    pub center_vertical: Segment,
    /// Horizontal line through the frame center, bleeding past left and right.
    pub center_horizontal: Segment,
    /// Horizontal line [`TASKBAR_HEIGHT`] above the bottom edge, frame width only.
    pub taskbar: Segment,
    /// Stroke color for the guides and the frame outline.
    pub color: Rgb,
}

/// The fixed-size rectangle the exported image must exactly fill.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct OutputFrame {
    pub size: Size,
    pub background: Rgb,
}

impl Default for OutputFrame {
    fn default() -> Self {
        Self {
            size: SizePreset::Landscape.size(),
            background: Rgb::WHITE,
        }
    }
}

impl OutputFrame {
    /// Create a frame. Both dimensions must be non-zero.
    pub fn new(width: u32, height: u32, background: Rgb) -> Result<Self, PlacementError> {
        if width == 0 || height == 0 {
            return Err(PlacementError::ZeroFrameDimension);
        }
        Ok(Self {
            size: Size::new(width, height),
            background,
        })
    }

    /// The same frame with a different size.
    pub fn with_size(self, size: Size) -> Result<Self, PlacementError> {
        Self::new(size.width, size.height, self.background)
    }

    /// The same frame with a different background.
    pub fn with_background(self, background: Rgb) -> Self {
        Self { background, ..self }
    }

    pub fn width(&self) -> f64 {
        f64::from(self.size.width)
    }

    pub fn height(&self) -> f64 {
        f64::from(self.size.height)
    }

    /// Geometric center, the anchor for every rescale.
    pub fn center(&self) -> Point {
        Point::new(self.width() / 2.0, self.height() / 2.0)
    }

    pub fn guides(&self) -> Guides {
        let (w, h) = (self.width(), self.height());
        let c = self.center();
        let taskbar_y = h - TASKBAR_HEIGHT;
        Guides {
            center_vertical: Segment {
                from: Point::new(c.x, -GUIDE_BLEED),
                to: Point::new(c.x, h + GUIDE_BLEED),
            },
            center_horizontal: Segment {
                from: Point::new(-GUIDE_BLEED, c.y),
                to: Point::new(w + GUIDE_BLEED, c.y),
            },
            taskbar: Segment {
                from: Point::new(0.0, taskbar_y),
                to: Point::new(w, taskbar_y),
            },
            color: self.background.contrasting(),
        }
    }
}
