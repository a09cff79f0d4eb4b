//! Port definitions for the progressive engine.
//!
//! Contains the trait the engine uses to hand finished images to whatever
//! displays or stores them.

pub mod image_sink;

pub use image_sink::{ChannelSink, ImageSink};
