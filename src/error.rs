use std::path::PathBuf;

use crate::placement::PlacementError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure of a single user action. Prior session state is left intact.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not read image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("could not encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported output format for {} (expected .png, .jpg, .jpeg, .jfif, .bmp or .webp)", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("no image is loaded")]
    NoImage,

    #[error("settings file {} is invalid: {source}", path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Placement(#[from] PlacementError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
