//! The editing session: one frame, at most one placed image, persisted settings.
//!
//! All state a front-end needs lives here and is mutated only through the
//! methods below (or [`Session::execute`]). Each method either succeeds or
//! returns an error with the session unchanged.

use std::path::{Path, PathBuf};

use image::RgbImage;
use tracing::{debug, info, warn};

use crate::command::{Action, Command};
use crate::error::{Error, Result};
use crate::frame::{Guides, OutputFrame, Rgb, Size};
use crate::placement::{Align, DragGesture, Fit, PlacedImage, Point, ZoomStep};
use crate::render::{self, ExportFormat};
use crate::settings::{Settings, SettingsStore};

/// What a command did, for the front-end to react to.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// State changed; redraw.
    Updated,
    /// Nothing to do (e.g. zoom already at its bound).
    Unchanged,
    Exported { path: PathBuf, format: ExportFormat },
    About(String),
}

/// A source file and its placement.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedImage {
    pub path: PathBuf,
    pub placement: PlacedImage,
}

#[derive(Debug)]
pub struct Session {
    frame: OutputFrame,
    image: Option<LoadedImage>,
    settings: Settings,
    store: SettingsStore,
    drag: Option<DragGesture>,
    center_guides: bool,
    taskbar_guide: bool,
}

impl Session {
    /// Start a session with settings read from `store`.
    pub fn new(store: SettingsStore) -> Self {
        let settings = store.load();
        Self {
            frame: OutputFrame::default(),
            image: None,
            settings,
            store,
            drag: None,
            center_guides: true,
            taskbar_guide: true,
        }
    }

    /// Session whose settings are never written anywhere.
    pub fn in_memory() -> Self {
        Self::new(SettingsStore::in_memory())
    }

    pub fn frame(&self) -> &OutputFrame {
        &self.frame
    }

    pub fn image(&self) -> Option<&LoadedImage> {
        self.image.as_ref()
    }

    pub fn placement(&self) -> Option<&PlacedImage> {
        self.image.as_ref().map(|i| &i.placement)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Current scale as a percentage, `None` without an image.
    pub fn scale_percent(&self) -> Option<f64> {
        self.placement().map(PlacedImage::scale_percent)
    }

    pub fn guides(&self) -> Guides {
        self.frame.guides()
    }

    pub fn center_guides_visible(&self) -> bool {
        self.center_guides
    }

    pub fn taskbar_guide_visible(&self) -> bool {
        self.taskbar_guide
    }

    // ── image lifecycle ─────────────────────────────────────────────────

    /// Decode `path` and place it. On failure the previous image stays.
    pub fn open_image(&mut self, path: &Path) -> Result<()> {
        let decoded = render::load_oriented(path)?;
        let placement = PlacedImage::new(render::display_size(&decoded), &self.frame)?;
        info!(
            path = %path.display(),
            size = %placement.source(),
            scale = placement.scale(),
            "opened image"
        );
        self.image = Some(LoadedImage {
            path: path.to_path_buf(),
            placement,
        });
        self.drag = None;
        self.settings.last_dir = Some(containing_dir(path));
        self.persist();
        Ok(())
    }

    /// Drop the current image. Returns whether there was one.
    pub fn clear_image(&mut self) -> bool {
        self.drag = None;
        self.image.take().is_some()
    }

    // ── frame ───────────────────────────────────────────────────────────

    /// Replace the frame size; a loaded image gets its initial placement again.
    pub fn set_output_size(&mut self, size: Size) -> Result<()> {
        self.frame = self.frame.with_size(size)?;
        let frame = self.frame;
        if let Some(img) = &mut self.image {
            img.placement.place_initial(&frame);
        }
        debug!(%size, "output size changed");
        Ok(())
    }

    /// Typed size: clamped to the custom range, applied and remembered.
    pub fn set_custom_size(&mut self, size: Size) -> Result<Size> {
        let size = size.clamp_custom();
        self.set_output_size(size)?;
        self.settings.recent_sizes.remember(size);
        self.persist();
        Ok(size)
    }

    pub fn set_background(&mut self, color: Rgb) {
        self.frame = self.frame.with_background(color);
        debug!(%color, "background changed");
    }

    /// Picked color: applied and remembered.
    pub fn set_custom_background(&mut self, color: Rgb) {
        self.set_background(color);
        self.settings.recent_colors.remember(color);
        self.persist();
    }

    pub fn clear_recent_sizes(&mut self) {
        self.settings.recent_sizes.clear();
        self.persist();
    }

    pub fn clear_recent_colors(&mut self) {
        self.settings.recent_colors.clear();
        self.persist();
    }

    // ── placement ───────────────────────────────────────────────────────

    pub fn fit(&mut self, fit: Fit) -> Result<()> {
        let frame = self.frame;
        self.placement_mut()?.fit(fit, &frame);
        Ok(())
    }

    pub fn align(&mut self, align: Align) -> Result<()> {
        let frame = self.frame;
        self.placement_mut()?.align(align, &frame);
        Ok(())
    }

    pub fn reset_placement(&mut self) -> Result<()> {
        let frame = self.frame;
        self.placement_mut()?.place_initial(&frame);
        Ok(())
    }

    pub fn reset_scale(&mut self) -> Result<()> {
        let frame = self.frame;
        self.placement_mut()?.reset_scale(&frame);
        Ok(())
    }

    /// One zoom notch. `Ok(false)` when already at the zoom bound.
    pub fn zoom(&mut self, zoom_in: bool, step: ZoomStep) -> Result<bool> {
        let frame = self.frame;
        Ok(self.placement_mut()?.zoom(zoom_in, step, &frame))
    }

    pub fn set_scale_percent(&mut self, percent: f64) -> Result<()> {
        let frame = self.frame;
        self.placement_mut()?.set_scale_percent(percent, &frame);
        Ok(())
    }

    /// Typed percentage text. Non-numeric input is ignored (`Ok(false)`).
    pub fn enter_scale_percent(&mut self, text: &str) -> Result<bool> {
        let text = text.trim().trim_end_matches('%').trim();
        match text.parse::<f64>() {
            Ok(p) if p.is_finite() => {
                self.set_scale_percent(p)?;
                Ok(true)
            }
            _ => {
                self.placement_mut()?;
                debug!(input = text, "ignoring non-numeric scale entry");
                Ok(false)
            }
        }
    }

    pub fn nudge_scale_percent(&mut self, delta: f64) -> Result<()> {
        let frame = self.frame;
        self.placement_mut()?.nudge_scale_percent(delta, &frame);
        Ok(())
    }

    pub fn nudge(&mut self, dx: f64, dy: f64) -> Result<()> {
        let frame = self.frame;
        self.placement_mut()?.nudge(dx, dy, &frame);
        Ok(())
    }

    /// Pointer pressed on the image at `pointer` (frame coordinates).
    pub fn begin_drag(&mut self, pointer: Point) -> Result<()> {
        let gesture = DragGesture::begin(pointer, self.placement_mut()?);
        self.drag = Some(gesture);
        Ok(())
    }

    /// Pointer moved. Ignored when no drag is in progress.
    pub fn drag_to(&mut self, pointer: Point, axis_lock: bool) -> Result<()> {
        let frame = self.frame;
        let Some(mut gesture) = self.drag else {
            return Ok(());
        };
        gesture.update(pointer, axis_lock, self.placement_mut()?, &frame);
        self.drag = Some(gesture);
        Ok(())
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    // ── output ──────────────────────────────────────────────────────────

    /// Render the composite from the source file on disk.
    pub fn render(&self) -> Result<RgbImage> {
        render::render(
            &self.frame,
            self.image.as_ref().map(|i| (i.path.as_path(), &i.placement)),
        )
    }

    /// PNG bytes of the composite.
    pub fn preview_png(&self) -> Result<Vec<u8>> {
        render::encode_png(&self.render()?)
    }

    pub fn default_export_path(&self) -> PathBuf {
        render::default_export_path(self.image.as_ref().map(|i| i.path.as_path()))
    }

    pub fn export(&self, path: &Path) -> Result<ExportFormat> {
        let rendered = self.render()?;
        render::export(&rendered, path)
    }

    // ── dispatch ────────────────────────────────────────────────────────

    pub fn execute(&mut self, command: Command) -> Result<Outcome> {
        let action = command.action();
        if action.requires_image() && self.image.is_none() {
            return Err(Error::NoImage);
        }
        debug!(?command, "execute");
        let outcome = match command {
            Command::OpenImage(path) => {
                self.open_image(&path)?;
                Outcome::Updated
            }
            Command::Export(path) => {
                let path = path.unwrap_or_else(|| self.default_export_path());
                let format = self.export(&path)?;
                Outcome::Exported { path, format }
            }
            Command::ClearImage => changed(self.clear_image()),
            Command::FitWidth => self.fit(Fit::Width).map(|()| Outcome::Updated)?,
            Command::FitHeight => self.fit(Fit::Height).map(|()| Outcome::Updated)?,
            Command::FitContain => self.fit(Fit::Contain).map(|()| Outcome::Updated)?,
            Command::ResetPlacement => self.reset_placement().map(|()| Outcome::Updated)?,
            Command::ResetScale => self.reset_scale().map(|()| Outcome::Updated)?,
            Command::Align(a) => self.align(a).map(|()| Outcome::Updated)?,
            Command::Zoom { zoom_in, step } => changed(self.zoom(zoom_in, step)?),
            Command::SetScalePercent(p) => self.set_scale_percent(p).map(|()| Outcome::Updated)?,
            Command::NudgeScalePercent(d) => {
                self.nudge_scale_percent(d).map(|()| Outcome::Updated)?
            }
            Command::Nudge { dx, dy } => self.nudge(dx, dy).map(|()| Outcome::Updated)?,
            Command::SetOutputSize(size) => {
                self.set_output_size(size)?;
                Outcome::Updated
            }
            Command::SetCustomSize(size) => {
                self.set_custom_size(size)?;
                Outcome::Updated
            }
            Command::SetBackground(color) => {
                self.set_background(color);
                Outcome::Updated
            }
            Command::SetCustomBackground(color) => {
                self.set_custom_background(color);
                Outcome::Updated
            }
            Command::ClearRecentSizes => {
                self.clear_recent_sizes();
                Outcome::Updated
            }
            Command::ClearRecentColors => {
                self.clear_recent_colors();
                Outcome::Updated
            }
            Command::ToggleCenterGuides => {
                self.center_guides = !self.center_guides;
                Outcome::Updated
            }
            Command::ToggleTaskbarGuide => {
                self.taskbar_guide = !self.taskbar_guide;
                Outcome::Updated
            }
            Command::About => Outcome::About(about_text()),
        };
        Ok(outcome)
    }

    /// Whether `action` can run right now.
    pub fn is_enabled(&self, action: Action) -> bool {
        !action.requires_image() || self.image.is_some()
    }

    fn placement_mut(&mut self) -> Result<&mut PlacedImage> {
        self.image
            .as_mut()
            .map(|i| &mut i.placement)
            .ok_or(Error::NoImage)
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.settings) {
            warn!(error = %e, "could not save settings");
        }
    }
}

/// Absolute directory holding `path`; a bare file name lives in the working directory.
fn containing_dir(path: &Path) -> PathBuf {
    let dir = path
        .parent()
        .filter(|d| !d.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    std::path::absolute(dir).unwrap_or_else(|_| dir.to_path_buf())
}

fn changed(did: bool) -> Outcome {
    if did { Outcome::Updated } else { Outcome::Unchanged }
}

fn about_text() -> String {
    format!(
        "{} {}\n{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_DESCRIPTION")
    )
}
