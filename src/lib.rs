//! # Polyround
//!
//! Interactive editing of a rounded regular polygon with undo/redo.
//!
//! ## Architecture
//!
//! Polyround is organized as a workspace with multiple crates:
//!
//! 1. **polyround-core** - Error types and configuration
//! 2. **polyround-designer** - Geometry, drag handles, history, canvas and editor session
//! 3. **polyround** - Logging setup and the headless demo binary
//!
//! ## Features
//!
//! - **Rounded Outline**: corner radius clamped so the outline never self-intersects
//! - **Drag Handles**: anchor-preserving corner resize, corner radius, vertex count
//! - **History**: bounded undo/redo that discards the redo branch on a new edit

pub use polyround_core::{config, error};
pub use polyround_designer as designer;

pub use polyround_core::{Config, Error, Result, RestoreError};
pub use polyround_designer::{
    Capabilities, Editor, HandleKind, History, Outline, Point, PolygonCanvas, ShapeParams,
    Snapshot, Transform,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty formatting on stderr, keeping stdout for output documents
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
