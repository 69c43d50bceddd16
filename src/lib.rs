//! Skyview: an interactive celestial-sphere viewer core
//!
//! This crate holds everything behind a star-chart canvas except the canvas
//! itself: the view orientation as a single quaternion, orthographic
//! projection of the RA/Dec grid and constellation geometry into 2D drawing
//! commands, visibility culling, and the lookup of which IAU constellation
//! lies under the crosshairs.
//!
//! The main entry point is [`SkyView`], which owns the view state, the
//! loaded sky objects and catalogs, and produces one [`Frame`] of
//! [`DrawCommand`]s each time the view changes.

use thiserror::Error;

pub mod catalogs;
pub mod colors;
pub mod config;
pub mod constants;
pub mod constellation;
pub mod coordinates;
pub mod culling;
pub mod persist;
pub mod precessionlib;
pub mod projection;
pub mod quaternion;
pub mod sky;
pub mod skyview;
pub mod ui;
pub mod view;

// Re-export commonly used types
pub use config::ViewConfig;
pub use coordinates::RaDec;
pub use projection::DrawCommand;
pub use quaternion::Quaternion;
pub use skyview::{Frame, SkyView};
pub use ui::{UiFlags, UiToggle};
pub use view::{ViewState, Viewport};

/// Main error type for the skyview library
#[derive(Debug, Error)]
pub enum SkyViewError {
    #[error("Invalid quaternion: {0}")]
    InvalidQuaternion(String),

    #[error("Unknown color scheme: {0}")]
    UnknownColorScheme(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type for skyview operations
pub type Result<T> = std::result::Result<T, SkyViewError>;
