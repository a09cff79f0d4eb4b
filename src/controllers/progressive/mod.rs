//! Progressive render engine.
//!
//! Owns the background worker that renders the latest requested viewport at
//! increasing iteration ceilings, and the restart/abort protocol that keeps
//! the caller responsive.
//!
//! # Architecture
//!
//! The engine follows the ports & adapters pattern:
//! - **Input**: `RenderRequest` values passed to `submit`
//! - **Output**: the `ImageSink` port, called on the worker thread
//! - **Core**: pass rendering from `core/actions`

pub mod config;
mod engine;
pub mod errors;
pub mod pass_set;
pub mod ports;

pub use config::{ConfigError, EngineConfig};
pub use engine::ProgressiveRenderEngine;
pub use errors::SubmitError;
pub use ports::{ChannelSink, ImageSink};
