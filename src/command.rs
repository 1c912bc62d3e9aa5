//! Named editor commands and their static labels and shortcuts.
//!
//! A front-end translates input events into [`Command`]s and hands them to
//! [`Session::execute`](crate::Session::execute). Menu text and the shortcut
//! overlay come from [`Action`], the payload-free view of a command.

use std::path::PathBuf;

use crate::frame::{Rgb, Size};
use crate::placement::{Align, ZoomStep};

/// One user action against the session.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    OpenImage(PathBuf),
    /// Export to the given path, or to the default `<stem>_c<suffix>` path.
    Export(Option<PathBuf>),
    ClearImage,
    FitWidth,
    FitHeight,
    FitContain,
    /// Re-run the initial contain-and-center placement.
    ResetPlacement,
    /// Scale to 100 % about the frame center.
    ResetScale,
    Align(Align),
    Zoom {
        zoom_in: bool,
        step: ZoomStep,
    },
    SetScalePercent(f64),
    NudgeScalePercent(f64),
    Nudge {
        dx: f64,
        dy: f64,
    },
    /// Switch to a preset or recent size. Not remembered.
    SetOutputSize(Size),
    /// Typed size entry: clamped, applied and remembered.
    SetCustomSize(Size),
    /// Switch to a preset or recent color. Not remembered.
    SetBackground(Rgb),
    /// Picked color: applied and remembered.
    SetCustomBackground(Rgb),
    ClearRecentSizes,
    ClearRecentColors,
    ToggleCenterGuides,
    ToggleTaskbarGuide,
    About,
}

impl Command {
    pub fn action(&self) -> Action {
        match self {
            Self::OpenImage(_) => Action::OpenImage,
            Self::Export(_) => Action::Export,
            Self::ClearImage => Action::ClearImage,
            Self::FitWidth => Action::FitWidth,
            Self::FitHeight => Action::FitHeight,
            Self::FitContain => Action::FitContain,
            Self::ResetPlacement => Action::ResetPlacement,
            Self::ResetScale => Action::ResetScale,
            Self::Align(a) => Action::Align(*a),
            Self::Zoom { zoom_in: true, .. } => Action::ZoomIn,
            Self::Zoom { zoom_in: false, .. } => Action::ZoomOut,
            Self::SetScalePercent(_) => Action::SetScalePercent,
            Self::NudgeScalePercent(_) => Action::NudgeScalePercent,
            Self::Nudge { .. } => Action::Nudge,
            Self::SetOutputSize(_) => Action::SetOutputSize,
            Self::SetCustomSize(_) => Action::SetCustomSize,
            Self::SetBackground(_) => Action::SetBackground,
            Self::SetCustomBackground(_) => Action::SetCustomBackground,
            Self::ClearRecentSizes => Action::ClearRecentSizes,
            Self::ClearRecentColors => Action::ClearRecentColors,
            Self::ToggleCenterGuides => Action::ToggleCenterGuides,
            Self::ToggleTaskbarGuide => Action::ToggleTaskbarGuide,
            Self::About => Action::About,
        }
    }
}

/// Payload-free command identity, for labels, shortcuts and enablement.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    OpenImage,
    Export,
    ClearImage,
    FitWidth,
    FitHeight,
    FitContain,
    ResetPlacement,
    ResetScale,
    Align(Align),
    ZoomIn,
    ZoomOut,
    SetScalePercent,
    NudgeScalePercent,
    Nudge,
    SetOutputSize,
    SetCustomSize,
    SetBackground,
    SetCustomBackground,
    ClearRecentSizes,
    ClearRecentColors,
    ToggleCenterGuides,
    ToggleTaskbarGuide,
    About,
}

impl Action {
    pub const fn label(self) -> &'static str {
        match self {
            Self::OpenImage => "Open image",
            Self::Export => "Export",
            Self::ClearImage => "Remove image",
            Self::FitWidth => "Fit to width",
            Self::FitHeight => "Fit to height",
            Self::FitContain => "Fit whole image",
            Self::ResetPlacement => "Reset to initial position",
            Self::ResetScale => "Set image size to 100%",
            Self::Align(Align::Center) => "Center",
            Self::Align(Align::CenterVertical) => "Center vertically",
            Self::Align(Align::CenterHorizontal) => "Center horizontally",
            Self::Align(Align::Top) => "Align to top edge",
            Self::Align(Align::Bottom) => "Align to bottom edge",
            Self::Align(Align::Left) => "Align to left edge",
            Self::Align(Align::Right) => "Align to right edge",
            Self::ZoomIn => "Zoom in",
            Self::ZoomOut => "Zoom out",
            Self::SetScalePercent => "Set image scale",
            Self::NudgeScalePercent => "Adjust image scale",
            Self::Nudge => "Move image",
            Self::SetOutputSize => "Output size",
            Self::SetCustomSize => "Custom size",
            Self::SetBackground => "Background color",
            Self::SetCustomBackground => "Pick background color",
            Self::ClearRecentSizes => "Clear recent sizes",
            Self::ClearRecentColors => "Clear recent colors",
            Self::ToggleCenterGuides => "Center guides",
            Self::ToggleTaskbarGuide => "Taskbar guide (48 px)",
            Self::About => "About",
        }
    }

    /// Keyboard shortcut as displayed in menus and the overlay.
    pub const fn shortcut(self) -> Option<&'static str> {
        match self {
            Self::OpenImage => Some("Ctrl+O"),
            Self::Export => Some("Ctrl+S"),
            Self::ClearImage => Some("Ctrl+Delete"),
            Self::FitWidth => Some("Ctrl+W"),
            Self::FitHeight => Some("Ctrl+H"),
            Self::FitContain => Some("Ctrl+Shift+F"),
            Self::ResetPlacement => Some("Ctrl+R"),
            Self::ResetScale => Some("Ctrl+0"),
            Self::ToggleCenterGuides => Some("Ctrl+G"),
            Self::ToggleTaskbarGuide => Some("Ctrl+T"),
            Self::About => Some("F1"),
            _ => None,
        }
    }

    /// Whether the command is meaningless without a loaded image.
    pub const fn requires_image(self) -> bool {
        matches!(
            self,
            Self::FitWidth
                | Self::FitHeight
                | Self::FitContain
                | Self::ResetPlacement
                | Self::ResetScale
                | Self::Align(_)
                | Self::ZoomIn
                | Self::ZoomOut
                | Self::SetScalePercent
                | Self::NudgeScalePercent
                | Self::Nudge
        )
    }
}

/// Overlay layout: file commands, image commands, view toggles.
/// `None` marks a separator.
pub const SHORTCUT_OVERLAY: &[Option<Action>] = &[
    Some(Action::OpenImage),
    Some(Action::Export),
    Some(Action::ClearImage),
    None,
    Some(Action::FitWidth),
    Some(Action::FitHeight),
    Some(Action::FitContain),
    Some(Action::ResetPlacement),
    Some(Action::ResetScale),
    None,
    Some(Action::ToggleCenterGuides),
    Some(Action::ToggleTaskbarGuide),
];

/// One overlay row: `(shortcut, label)`, or `None` for a separator.
pub type OverlayRow = Option<(&'static str, &'static str)>;

/// Rows for the shortcut overlay. Entries without a shortcut are skipped.
pub fn shortcut_overlay() -> Vec<OverlayRow> {
    SHORTCUT_OVERLAY
        .iter()
        .filter_map(|entry| match entry {
            None => Some(None),
            Some(a) => a.shortcut().map(|s| Some((s, a.label()))),
        })
        .collect()
}
