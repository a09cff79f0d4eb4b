mod controllers;
mod core;
mod presenters;

pub use crate::controllers::progressive::{
    ChannelSink, ConfigError, EngineConfig, ImageSink, ProgressiveRenderEngine, SubmitError,
};
pub use crate::core::actions::interruption::{InterruptSource, Interruption, Uninterrupted};
pub use crate::core::actions::pass_schedule::IterationCeiling;
pub use crate::core::actions::render_pass::{RenderPassError, RowScheduling};
pub use crate::core::colour_table::{ColourTable, ColourTableError, wavelength_to_colour};
pub use crate::core::data::colour::Colour;
pub use crate::core::data::render_request::{RenderRequest, RenderRequestError};
pub use crate::core::data::rendered_image::{RenderedImage, RenderedImageError};
pub use crate::core::escape_time::escape_iterations;
pub use crate::presenters::file::ppm::{PpmFilePresenter, write_ppm};
