//! Place one image inside a fixed-size output frame and export the composite.
//!
//! The geometry is plain `f64` math over a frame of fixed pixel size: an
//! image is scaled uniformly, positioned by its top-left corner, and clamped
//! so at least a quarter of each scaled dimension stays over the frame.
//! Rendering re-reads the source, applies EXIF orientation, resamples with
//! Lanczos and flattens onto the background color.
//!
//! # Modules
//!
//! - [`frame`]: output frame, sizes, colors, presets and guide lines
//! - [`placement`]: scale/position state, fits, alignment, zoom, drag
//! - [`render`]: oriented decode, composite rendering, preview bytes, file export
//! - [`settings`]: persisted last directory and recent values
//! - [`command`]: named commands, labels and shortcuts
//! - [`session`]: the state machine a front-end drives
//!
//! # Example
//!
//! ```
//! use framecrop::{Align, OutputFrame, PlacedImage, Point, Rgb, Size};
//!
//! let frame = OutputFrame::new(1920, 1080, Rgb::WHITE).unwrap();
//! let mut placed = PlacedImage::new(Size::new(800, 600), &frame).unwrap();
//! assert_eq!(placed.scale(), 1.8);
//! assert_eq!(placed.position(), Point::new(240.0, 0.0));
//!
//! placed.align(Align::Left, &frame);
//! assert_eq!(placed.position(), Point::new(0.0, 0.0));
//! ```

#![forbid(unsafe_code)]

pub mod command;
pub mod error;
pub mod frame;
pub mod placement;
pub mod render;
pub mod session;
pub mod settings;

pub use command::{Action, Command};
pub use error::{Error, Result};
pub use frame::{BackgroundPreset, Guides, OutputFrame, Rgb, Size, SizePreset};
pub use placement::{Align, Axis, DragGesture, Fit, PlacedImage, PlacementError, Point, ZoomStep};
pub use render::ExportFormat;
pub use session::{Outcome, Session};
pub use settings::{Settings, SettingsStore};
