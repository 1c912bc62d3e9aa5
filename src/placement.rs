//! Placement of one source image inside a fixed output frame.
//!
//! Tracks scale and top-left position in frame coordinates, and computes fit,
//! align, zoom, and nudge placements. Every mutation ends by clamping the
//! position so that the image keeps overlapping the frame by at least
//! [`CLAMP_MARGIN`] of the frame's width and height.
//!
//! Pure geometry, no pixels.
//!
//! # Example
//!
//! ```
//! use framecrop::{OutputFrame, PlacedImage, Point, Rgb, Size};
//!
//! let frame = OutputFrame::new(1920, 1080, Rgb::WHITE).unwrap();
//! let image = PlacedImage::new(Size::new(800, 600), &frame).unwrap();
//!
//! // Initial placement fits the whole image and centers it.
//! assert!((image.scale() - 1.8).abs() < 1e-12);
//! assert_eq!(image.position(), Point::new(240.0, 0.0));
//! ```

use core::ops::{Add, Sub};

use crate::frame::{OutputFrame, Size};

/// Fraction of the frame's width (height) the image must keep covering.
pub const CLAMP_MARGIN: f64 = 0.25;

/// Scale range for step zoom.
pub const ZOOM_BOUNDS: ScaleBounds = ScaleBounds {
    min: 0.02,
    max: 50.0,
};

/// Percentage range for typed scale entry (100 % = scale 1.0).
pub const PERCENT_BOUNDS: ScaleBounds = ScaleBounds {
    min: 1.0,
    max: 5000.0,
};

/// Scale changes smaller than this are treated as no change.
const SCALE_EPSILON: f64 = 1e-12;

/// A point in frame (or image-local) coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Inclusive `[min, max]` range.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScaleBounds {
    pub min: f64,
    pub max: f64,
}

impl ScaleBounds {
    pub fn clamp(&self, v: f64) -> f64 {
        num_traits::clamp(v, self.min, self.max)
    }
}

/// Placement construction error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    /// Source image has zero width or height.
    #[error("source image has zero width or height")]
    ZeroSourceDimension,
    /// Output frame width or height is zero.
    #[error("output frame has zero width or height")]
    ZeroFrameDimension,
}

/// Step size for one zoom notch.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ZoomStep {
    /// ×1.15 per notch.
    #[default]
    Normal,
    /// ×1.03 per notch.
    Fine,
    /// ×1.01 per notch.
    Ultra,
}

impl ZoomStep {
    pub const fn factor(self) -> f64 {
        match self {
            Self::Normal => 1.15,
            Self::Fine => 1.03,
            Self::Ultra => 1.01,
        }
    }
}

/// Fit policy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Fit {
    /// Scaled width equals frame width; only the horizontal axis is placed.
    Width,
    /// Scaled height equals frame height; only the vertical axis is placed.
    Height,
    /// Whole image visible, centered on both axes.
    Contain,
}

/// Alignment against the frame edges or center, at the current scale.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Align {
    /// Center on both axes.
    Center,
    /// Center vertically, keep x.
    CenterVertical,
    /// Center horizontally, keep y.
    CenterHorizontal,
    /// Top edge at `y = 0`.
    Top,
    /// Bottom edge at the frame bottom.
    Bottom,
    /// Left edge at `x = 0`.
    Left,
    /// Right edge at the frame right.
    Right,
}

/// Axis a drag can be locked to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

/// Scale for the whole image to be visible inside the frame.
pub fn fit_contain_scale(source: Size, frame: &OutputFrame) -> f64 {
    let sx = frame.width() / f64::from(source.width);
    let sy = frame.height() / f64::from(source.height);
    sx.min(sy)
}

/// Clamp a top-left position for an image of `scaled` size inside `frame`.
///
/// `x ∈ [−w + fw·m, fw − fw·m]`, `y ∈ [−h + fh·m, fh − fh·m]` with
/// `m = CLAMP_MARGIN`. The lower bound never exceeds the upper one for
/// non-negative sizes.
pub fn clamp_position(position: Point, scaled: (f64, f64), frame: &OutputFrame) -> Point {
    let (fw, fh) = (frame.width(), frame.height());
    let (w, h) = scaled;
    let min_x = -w + fw * CLAMP_MARGIN;
    let max_x = fw - fw * CLAMP_MARGIN;
    let min_y = -h + fh * CLAMP_MARGIN;
    let max_y = fh - fh * CLAMP_MARGIN;
    Point::new(
        num_traits::clamp(position.x, min_x, max_x),
        num_traits::clamp(position.y, min_y, max_y),
    )
}

/// A loaded image with its scale and position relative to the frame origin.
///
/// Fields are private so that scale stays positive and position stays clamped;
/// every mutating method takes the current frame and re-clamps.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlacedImage {
    source: Size,
    scale: f64,
    position: Point,
}

impl PlacedImage {
    /// Create with the initial placement for `frame` (contain, centered).
    pub fn new(source: Size, frame: &OutputFrame) -> Result<Self, PlacementError> {
        if source.width == 0 || source.height == 0 {
            return Err(PlacementError::ZeroSourceDimension);
        }
        let mut image = Self {
            source,
            scale: 1.0,
            position: Point::ORIGIN,
        };
        image.place_initial(frame);
        Ok(image)
    }

    /// Source pixel dimensions (after orientation).
    pub fn source(&self) -> Size {
        self.source
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Scale as a percentage, `100.0` = one source pixel per frame pixel.
    pub fn scale_percent(&self) -> f64 {
        self.scale * 100.0
    }

    /// Top-left corner in frame coordinates.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Scaled width and height in frame pixels.
    pub fn scaled_size(&self) -> (f64, f64) {
        (
            f64::from(self.source.width) * self.scale,
            f64::from(self.source.height) * self.scale,
        )
    }

    /// Map a frame point into unscaled image-local coordinates.
    pub fn frame_to_local(&self, p: Point) -> Point {
        let d = p - self.position;
        Point::new(d.x / self.scale, d.y / self.scale)
    }

    /// Map an image-local point into frame coordinates.
    pub fn local_to_frame(&self, p: Point) -> Point {
        self.position + Point::new(p.x * self.scale, p.y * self.scale)
    }

    /// Re-apply the clamp rule for `frame`.
    pub fn clamp(&mut self, frame: &OutputFrame) {
        self.position = clamp_position(self.position, self.scaled_size(), frame);
    }

    /// Contain-fit and center. Used on load, on frame resize, and for reset.
    pub fn place_initial(&mut self, frame: &OutputFrame) {
        self.scale = fit_contain_scale(self.source, frame);
        self.center_both(frame);
        self.clamp(frame);
    }

    pub fn fit(&mut self, fit: Fit, frame: &OutputFrame) {
        match fit {
            Fit::Width => {
                self.scale = frame.width() / f64::from(self.source.width);
                self.position.x = 0.0;
            }
            Fit::Height => {
                self.scale = frame.height() / f64::from(self.source.height);
                self.position.y = 0.0;
            }
            Fit::Contain => {
                self.scale = fit_contain_scale(self.source, frame);
                self.center_both(frame);
            }
        }
        self.clamp(frame);
    }

    pub fn align(&mut self, align: Align, frame: &OutputFrame) {
        let (w, h) = self.scaled_size();
        let (fw, fh) = (frame.width(), frame.height());
        match align {
            Align::Center => self.center_both(frame),
            Align::CenterVertical => self.position.y = (fh - h) / 2.0,
            Align::CenterHorizontal => self.position.x = (fw - w) / 2.0,
            Align::Top => self.position.y = 0.0,
            Align::Bottom => self.position.y = fh - h,
            Align::Left => self.position.x = 0.0,
            Align::Right => self.position.x = fw - w,
        }
        self.clamp(frame);
    }

    /// Move the top-left corner to `position`, then clamp.
    ///
    /// Non-finite coordinates are ignored.
    pub fn set_position(&mut self, position: Point, frame: &OutputFrame) {
        if !(position.x.is_finite() && position.y.is_finite()) {
            return;
        }
        self.position = position;
        self.clamp(frame);
    }

    /// Move by `(dx, dy)` frame pixels, then clamp.
    pub fn nudge(&mut self, dx: f64, dy: f64, frame: &OutputFrame) {
        self.set_position(self.position + Point::new(dx, dy), frame);
    }

    /// Change scale keeping the image point under `anchor` fixed. No clamp.
    ///
    /// Non-positive or non-finite scales are ignored.
    pub fn rescale_about(&mut self, new_scale: f64, anchor: Point) {
        if !(new_scale.is_finite() && new_scale > 0.0) {
            return;
        }
        let local = self.frame_to_local(anchor);
        self.scale = new_scale;
        let moved = self.local_to_frame(local);
        self.position = self.position + (anchor - moved);
    }

    /// Set scale about the frame center, then clamp.
    pub fn set_scale(&mut self, new_scale: f64, frame: &OutputFrame) {
        self.rescale_about(new_scale, frame.center());
        self.clamp(frame);
    }

    /// One zoom notch about the frame center, bounded by [`ZOOM_BOUNDS`].
    ///
    /// Returns `false` when the bounded scale equals the current one.
    pub fn zoom(&mut self, zoom_in: bool, step: ZoomStep, frame: &OutputFrame) -> bool {
        let factor = if zoom_in {
            step.factor()
        } else {
            1.0 / step.factor()
        };
        let old = self.scale;
        let new = ZOOM_BOUNDS.clamp(old * factor);
        if (new - old).abs() < SCALE_EPSILON {
            return false;
        }
        self.set_scale(new, frame);
        true
    }

    /// Typed percentage entry, bounded by [`PERCENT_BOUNDS`].
    ///
    /// Non-finite input is ignored.
    pub fn set_scale_percent(&mut self, percent: f64, frame: &OutputFrame) {
        if !percent.is_finite() {
            return;
        }
        let p = PERCENT_BOUNDS.clamp(percent);
        self.set_scale(p / 100.0, frame);
    }

    /// Add `delta` percentage points to the current scale.
    pub fn nudge_scale_percent(&mut self, delta: f64, frame: &OutputFrame) {
        self.set_scale_percent(self.scale_percent() + delta, frame);
    }

    /// Scale to 100 % about the frame center.
    pub fn reset_scale(&mut self, frame: &OutputFrame) {
        self.set_scale(1.0, frame);
    }

    fn center_both(&mut self, frame: &OutputFrame) {
        let (w, h) = self.scaled_size();
        self.position = Point::new((frame.width() - w) / 2.0, (frame.height() - h) / 2.0);
    }
}

/// In-progress pointer drag of a placed image.
///
/// With axis lock held, the first movement picks the dominant axis and the
/// other component of the drag is discarded until the gesture ends.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragGesture {
    press_pointer: Point,
    press_position: Point,
    locked: Option<Axis>,
}

impl DragGesture {
    /// Start a drag with the pointer at `pointer` (frame coordinates).
    pub fn begin(pointer: Point, image: &PlacedImage) -> Self {
        Self {
            press_pointer: pointer,
            press_position: image.position(),
            locked: None,
        }
    }

    /// Axis chosen by the lock, if one was engaged.
    pub fn locked_axis(&self) -> Option<Axis> {
        self.locked
    }

    /// Apply the pointer at `pointer` to `image`.
    pub fn update(
        &mut self,
        pointer: Point,
        axis_lock: bool,
        image: &mut PlacedImage,
        frame: &OutputFrame,
    ) {
        if !(pointer.x.is_finite() && pointer.y.is_finite()) {
            return;
        }
        let mut delta = pointer - self.press_pointer;
        if axis_lock {
            let axis = *self.locked.get_or_insert(if delta.x.abs() >= delta.y.abs() {
                Axis::X
            } else {
                Axis::Y
            });
            match axis {
                Axis::X => delta.y = 0.0,
                Axis::Y => delta.x = 0.0,
            }
        }
        image.set_position(self.press_position + delta, frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Rgb;

    const EPS: f64 = 1e-9;

    fn frame(w: u32, h: u32) -> OutputFrame {
        OutputFrame::new(w, h, Rgb::WHITE).unwrap()
    }

    fn image(w: u32, h: u32, f: &OutputFrame) -> PlacedImage {
        PlacedImage::new(Size::new(w, h), f).unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    fn point_approx(a: Point, b: Point) -> bool {
        approx(a.x, b.x) && approx(a.y, b.y)
    }

    // ── construction ────────────────────────────────────────────────────

    #[test]
    fn zero_source_errors() {
        let f = frame(1920, 1080);
        assert_eq!(
            PlacedImage::new(Size::new(0, 10), &f),
            Err(PlacementError::ZeroSourceDimension)
        );
        assert_eq!(
            PlacedImage::new(Size::new(10, 0), &f),
            Err(PlacementError::ZeroSourceDimension)
        );
    }

    #[test]
    fn initial_placement_800x600_in_1920x1080() {
        let f = frame(1920, 1080);
        let img = image(800, 600, &f);
        assert!(approx(img.scale(), 1.8));
        assert!(point_approx(img.position(), Point::new(240.0, 0.0)));
        assert!(approx(img.scale_percent(), 180.0));
    }

    #[test]
    fn initial_placement_portrait_source() {
        // 1000×2000 in 1920×1080 → height constrains, s = 0.54, w = 540
        let f = frame(1920, 1080);
        let img = image(1000, 2000, &f);
        assert!(approx(img.scale(), 0.54));
        assert!(point_approx(img.position(), Point::new(690.0, 0.0)));
    }

    // ── clamp ───────────────────────────────────────────────────────────

    #[test]
    fn clamp_scenario_right_edge() {
        let f = frame(1920, 1080);
        let p = clamp_position(Point::new(2000.0, 0.0), (100.0, 100.0), &f);
        assert_eq!(p, Point::new(1440.0, 0.0));
    }

    #[test]
    fn clamp_lower_bounds() {
        // min_x = −100 + 480 = 380, min_y = −100 + 270 = 170
        let f = frame(1920, 1080);
        let p = clamp_position(Point::new(-5000.0, -5000.0), (100.0, 100.0), &f);
        assert_eq!(p, Point::new(380.0, 170.0));
    }

    #[test]
    fn clamp_leaves_inside_positions() {
        let f = frame(1920, 1080);
        let p = Point::new(100.0, -50.0);
        assert_eq!(clamp_position(p, (1000.0, 1000.0), &f), p);
    }

    #[test]
    fn clamp_is_idempotent() {
        let f = frame(1920, 1080);
        let positions = [-1e6, -3000.0, -500.0, 0.0, 333.3, 1500.0, 1e6];
        let sizes = [0.5, 10.0, 100.0, 1440.0, 5000.0];
        for &x in &positions {
            for &y in &positions {
                for &w in &sizes {
                    for &h in &sizes {
                        let once = clamp_position(Point::new(x, y), (w, h), &f);
                        let twice = clamp_position(once, (w, h), &f);
                        assert_eq!(once, twice, "({x},{y}) size ({w},{h})");
                    }
                }
            }
        }
    }

    #[test]
    fn clamp_keeps_quarter_overlap() {
        let f = frame(1920, 1080);
        for &(w, h) in &[(10.0, 10.0), (480.0, 270.0), (4000.0, 3000.0)] {
            for &x in &[-1e5, 1e5] {
                for &y in &[-1e5, 1e5] {
                    let p = clamp_position(Point::new(x, y), (w, h), &f);
                    // Image right edge stays right of 25 % of the frame, left
                    // edge stays left of 75 %.
                    assert!(p.x + w >= 480.0 - EPS);
                    assert!(p.x <= 1440.0 + EPS);
                    assert!(p.y + h >= 270.0 - EPS);
                    assert!(p.y <= 810.0 + EPS);
                }
            }
        }
    }

    // ── fit ─────────────────────────────────────────────────────────────

    #[test]
    fn fit_contain_invariants_over_grid() {
        let frames = [(1920, 1080), (1080, 1920), (1, 1), (500, 500), (3, 7001)];
        let sources = [1, 2, 3, 7, 100, 599, 800, 1920, 4000, 12345];
        for &(fw, fh) in &frames {
            let f = frame(fw, fh);
            for &iw in &sources {
                for &ih in &sources {
                    let mut img = image(iw, ih, &f);
                    img.fit(Fit::Contain, &f);
                    let (w, h) = img.scaled_size();
                    let tol = 1e-9 * f64::from(fw.max(fh));
                    let tag = format!("{iw}x{ih} in {fw}x{fh}");
                    assert!(w <= f.width() + tol, "{tag}: width {w}");
                    assert!(h <= f.height() + tol, "{tag}: height {h}");
                    assert!(
                        (w - f.width()).abs() <= tol || (h - f.height()).abs() <= tol,
                        "{tag}: neither axis fills ({w},{h})"
                    );
                    // Centered.
                    let p = img.position();
                    assert!((p.x - (f.width() - w) / 2.0).abs() <= tol, "{tag}");
                    assert!((p.y - (f.height() - h) / 2.0).abs() <= tol, "{tag}");
                }
            }
        }
    }

    #[test]
    fn fit_width_places_only_horizontal_axis() {
        let f = frame(1920, 1080);
        let mut img = image(800, 600, &f);
        img.nudge(0.0, 100.0, &f);
        let y_before = img.position().y;
        img.fit(Fit::Width, &f);
        assert!(approx(img.scale(), 2.4));
        assert!(approx(img.position().x, 0.0));
        assert!(approx(img.position().y, y_before));
    }

    #[test]
    fn fit_height_places_only_vertical_axis() {
        let f = frame(1920, 1080);
        let mut img = image(1000, 500, &f);
        img.nudge(50.0, 0.0, &f);
        let x_before = img.position().x;
        img.fit(Fit::Height, &f);
        assert!(approx(img.scale(), 2.16));
        assert!(approx(img.position().y, 0.0));
        assert!(approx(img.position().x, x_before));
    }

    #[test]
    fn fit_width_still_clamps() {
        // Tall image pushed far down: after fit-width the scaled height grows,
        // but y stays inside [−h + 270, 810].
        let f = frame(1920, 1080);
        let mut img = image(100, 1000, &f);
        img.set_position(Point::new(0.0, 800.0), &f);
        img.fit(Fit::Width, &f);
        assert!(img.position().y <= 810.0);
    }

    // ── align ───────────────────────────────────────────────────────────

    #[test]
    fn align_edges() {
        let f = frame(1920, 1080);
        let mut img = image(800, 600, &f);
        img.set_scale_percent(100.0, &f);
        let (w, h) = img.scaled_size();
        assert_eq!((w, h), (800.0, 600.0));

        img.align(Align::Top, &f);
        assert!(approx(img.position().y, 0.0));
        img.align(Align::Left, &f);
        assert!(approx(img.position().x, 0.0));
        img.align(Align::Bottom, &f);
        assert!(approx(img.position().y, 480.0));
        assert!(approx(img.position().x, 0.0), "bottom leaves x");
        img.align(Align::Right, &f);
        assert!(approx(img.position().x, 1120.0));
        assert!(approx(img.position().y, 480.0), "right leaves y");
    }

    #[test]
    fn align_centers() {
        let f = frame(1920, 1080);
        let mut img = image(800, 600, &f);
        img.set_scale_percent(100.0, &f);
        img.set_position(Point::new(10.0, 20.0), &f);

        img.align(Align::CenterHorizontal, &f);
        assert!(point_approx(img.position(), Point::new(560.0, 20.0)));

        img.set_position(Point::new(10.0, 20.0), &f);
        img.align(Align::CenterVertical, &f);
        assert!(point_approx(img.position(), Point::new(10.0, 240.0)));

        img.set_position(Point::new(10.0, 20.0), &f);
        img.align(Align::Center, &f);
        assert!(point_approx(img.position(), Point::new(560.0, 240.0)));
    }

    // ── anchor-preserving zoom ──────────────────────────────────────────

    #[test]
    fn zoom_keeps_center_fixed() {
        let f = frame(1920, 1080);
        let mut img = image(4000, 3000, &f);
        let center = f.center();
        for step in [ZoomStep::Normal, ZoomStep::Fine, ZoomStep::Ultra] {
            for zoom_in in [true, false] {
                let before = img.frame_to_local(center);
                assert!(img.zoom(zoom_in, step, &f));
                let after = img.frame_to_local(center);
                assert!(
                    (before.x - after.x).abs() < 1e-6 && (before.y - after.y).abs() < 1e-6,
                    "{step:?} in={zoom_in}: {before:?} vs {after:?}"
                );
            }
        }
    }

    #[test]
    fn zoom_step_factors() {
        let f = frame(1920, 1080);
        let mut img = image(1920, 1080, &f);
        assert!(approx(img.scale(), 1.0));
        img.zoom(true, ZoomStep::Normal, &f);
        assert!(approx(img.scale(), 1.15));
        img.zoom(false, ZoomStep::Normal, &f);
        assert!(approx(img.scale(), 1.0));
        img.zoom(true, ZoomStep::Fine, &f);
        assert!(approx(img.scale(), 1.03));
        img.zoom(false, ZoomStep::Fine, &f);
        img.zoom(false, ZoomStep::Ultra, &f);
        assert!(approx(img.scale(), 1.0 / 1.01));
    }

    #[test]
    fn zoom_saturates_at_bounds() {
        let f = frame(1920, 1080);
        let mut img = image(1920, 1080, &f);
        while img.zoom(true, ZoomStep::Normal, &f) {}
        assert!(approx(img.scale(), ZOOM_BOUNDS.max));
        assert!(!img.zoom(true, ZoomStep::Ultra, &f));

        while img.zoom(false, ZoomStep::Normal, &f) {}
        assert!(approx(img.scale(), ZOOM_BOUNDS.min));
        assert!(!img.zoom(false, ZoomStep::Fine, &f));
    }

    #[test]
    fn reset_scale_keeps_center_and_sets_100() {
        let f = frame(1920, 1080);
        let mut img = image(4000, 3000, &f);
        img.nudge(100.0, -50.0, &f);
        let before = img.frame_to_local(f.center());
        img.reset_scale(&f);
        assert!(approx(img.scale(), 1.0));
        let after = img.frame_to_local(f.center());
        assert!(point_approx(before, after));
    }

    #[test]
    fn rescale_about_arbitrary_anchor() {
        let f = frame(1920, 1080);
        let mut img = image(800, 600, &f);
        let anchor = Point::new(300.0, 400.0);
        let local = img.frame_to_local(anchor);
        img.rescale_about(3.7, anchor);
        assert!(point_approx(img.local_to_frame(local), anchor));
    }

    #[test]
    fn rescale_about_ignores_bad_scale() {
        let f = frame(1920, 1080);
        let mut img = image(800, 600, &f);
        let before = img;
        img.rescale_about(0.0, f.center());
        img.rescale_about(-1.0, f.center());
        img.rescale_about(f64::NAN, f.center());
        img.rescale_about(f64::INFINITY, f.center());
        assert_eq!(img, before);
    }

    // ── percent entry ───────────────────────────────────────────────────

    #[test]
    fn percent_entry_is_clamped() {
        let f = frame(1920, 1080);
        let mut img = image(800, 600, &f);
        img.set_scale_percent(0.1, &f);
        assert!(approx(img.scale(), 0.01));
        img.set_scale_percent(1e9, &f);
        assert!(approx(img.scale(), 50.0));
        img.set_scale_percent(250.0, &f);
        assert!(approx(img.scale(), 2.5));
    }

    #[test]
    fn percent_entry_ignores_non_numeric() {
        let f = frame(1920, 1080);
        let mut img = image(800, 600, &f);
        let before = img;
        img.set_scale_percent(f64::NAN, &f);
        assert_eq!(img, before);
    }

    #[test]
    fn nudge_scale_percent_adds_points() {
        let f = frame(1920, 1080);
        let mut img = image(800, 600, &f);
        img.nudge_scale_percent(10.0, &f);
        assert!(approx(img.scale_percent(), 190.0));
        img.nudge_scale_percent(-1000.0, &f);
        assert!(approx(img.scale_percent(), 1.0));
    }

    // ── nudge & drag ────────────────────────────────────────────────────

    #[test]
    fn nudge_moves_and_clamps() {
        let f = frame(1920, 1080);
        let mut img = image(800, 600, &f);
        img.nudge(10.0, 5.0, &f);
        assert!(point_approx(img.position(), Point::new(250.0, 5.0)));
        img.nudge(1e6, 0.0, &f);
        assert!(approx(img.position().x, 1440.0));
    }

    #[test]
    fn non_finite_moves_are_ignored() {
        let f = frame(1920, 1080);
        let mut img = image(800, 600, &f);
        img.nudge(f64::NAN, 0.0, &f);
        img.nudge(0.0, f64::INFINITY, &f);
        img.set_position(Point::new(f64::NEG_INFINITY, 3.0), &f);
        assert!(point_approx(img.position(), Point::new(240.0, 0.0)));

        let mut drag = DragGesture::begin(Point::new(500.0, 500.0), &img);
        drag.update(Point::new(f64::NAN, 510.0), true, &mut img, &f);
        assert!(point_approx(img.position(), Point::new(240.0, 0.0)));
        assert_eq!(drag.locked_axis(), None);
    }

    #[test]
    fn drag_free_follows_pointer() {
        let f = frame(1920, 1080);
        let mut img = image(800, 600, &f);
        let mut drag = DragGesture::begin(Point::new(500.0, 500.0), &img);
        drag.update(Point::new(530.0, 480.0), false, &mut img, &f);
        assert!(point_approx(img.position(), Point::new(270.0, -20.0)));
        assert_eq!(drag.locked_axis(), None);
    }

    #[test]
    fn drag_axis_lock_sticks_to_first_axis() {
        let f = frame(1920, 1080);
        let mut img = image(800, 600, &f);
        let mut drag = DragGesture::begin(Point::new(500.0, 500.0), &img);
        drag.update(Point::new(520.0, 505.0), true, &mut img, &f);
        assert_eq!(drag.locked_axis(), Some(Axis::X));
        assert!(point_approx(img.position(), Point::new(260.0, 0.0)));

        // Vertical movement now dominates, but x stays the locked axis.
        drag.update(Point::new(510.0, 700.0), true, &mut img, &f);
        assert_eq!(drag.locked_axis(), Some(Axis::X));
        assert!(point_approx(img.position(), Point::new(250.0, 0.0)));
    }

    #[test]
    fn drag_axis_lock_vertical() {
        let f = frame(1920, 1080);
        let mut img = image(800, 600, &f);
        let mut drag = DragGesture::begin(Point::new(0.0, 0.0), &img);
        drag.update(Point::new(3.0, -40.0), true, &mut img, &f);
        assert_eq!(drag.locked_axis(), Some(Axis::Y));
        assert!(point_approx(img.position(), Point::new(240.0, -40.0)));
    }

    #[test]
    fn drag_is_clamped() {
        let f = frame(1920, 1080);
        let mut img = image(800, 600, &f);
        let mut drag = DragGesture::begin(Point::ORIGIN, &img);
        drag.update(Point::new(-1e6, 1e6), false, &mut img, &f);
        // min_x = −1440 + 480, max_y = 810
        assert!(point_approx(img.position(), Point::new(-960.0, 810.0)));
    }
}
