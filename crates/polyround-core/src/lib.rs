//! # Polyround Core
//!
//! Core types and utilities for Polyround.
//! Provides the error types shared by every layer and the application
//! configuration.

pub mod config;
pub mod error;

pub use config::{
    CanvasSettings, Config, HistorySettings, PlacementSettings, ShapeSettings, StyleSettings,
};
pub use error::{ConfigError, Error, GeometryError, RestoreError, Result};
