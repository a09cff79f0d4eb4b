use rayon::prelude::*;

use crate::core::actions::interruption::{InterruptSource, Interruption};
use crate::core::colour_table::ColourTable;
use crate::core::data::colour::BLACK;
use crate::core::data::render_request::RenderRequest;
use crate::core::data::rendered_image::{RenderedImage, RenderedImageError};
use crate::core::escape_time::escape_iterations;
use std::error::Error;
use std::fmt;

/// How the rows of a single pass are distributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowScheduling {
    /// Rows computed in order on the calling thread.
    #[default]
    Serial,
    /// Rows spread over rayon's global pool.
    Parallel,
}

/// Error type for an interruptible refinement pass.
///
/// `Interrupted` is expected control flow and should not be reported to the
/// user as a failure.
#[derive(Debug)]
pub enum RenderPassError {
    Interrupted(Interruption),
    BufferAllocation { width: u32, height: u32 },
    Image(RenderedImageError),
}

impl fmt::Display for RenderPassError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interrupted(interruption) => write!(f, "{}", interruption),
            Self::BufferAllocation { width, height } => {
                write!(f, "could not allocate a {}x{} pixel buffer", width, height)
            }
            Self::Image(err) => write!(f, "image error: {}", err),
        }
    }
}

impl Error for RenderPassError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Image(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RenderedImageError> for RenderPassError {
    fn from(err: RenderedImageError) -> Self {
        Self::Image(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassParams {
    pub pass: u32,
    pub max_iterations: u32,
    pub escape_limit: f64,
}

#[derive(Debug)]
pub struct RenderedPass {
    pub image: RenderedImage,
    /// No pixel escaped within the pass's iteration ceiling.
    pub all_black: bool,
}

/// Computes one full image for `request` at `params.max_iterations`.
///
/// `interrupt` is polled before every row; the first interruption abandons the
/// pass and the partially written buffer is dropped.
pub fn render_pass<I: InterruptSource>(
    request: &RenderRequest,
    params: PassParams,
    colour_table: &ColourTable,
    scheduling: RowScheduling,
    interrupt: &I,
) -> Result<RenderedPass, RenderPassError> {
    let mut pixels = allocate_pixels(request)?;
    let width = request.width() as usize;

    let any_escaped = match scheduling {
        RowScheduling::Serial => {
            let mut any_escaped = false;

            for (row, line) in pixels.chunks_exact_mut(width).enumerate() {
                if let Some(interruption) = interrupt.poll() {
                    return Err(RenderPassError::Interrupted(interruption));
                }

                any_escaped |= render_row(request, row as u32, params, colour_table, line);
            }

            any_escaped
        }
        RowScheduling::Parallel => pixels
            .par_chunks_exact_mut(width)
            .enumerate()
            .map(|(row, line)| match interrupt.poll() {
                Some(interruption) => Err(RenderPassError::Interrupted(interruption)),
                None => Ok(render_row(request, row as u32, params, colour_table, line)),
            })
            .try_reduce(|| false, |a, b| Ok(a || b))?,
    };

    let image = RenderedImage::from_pixels(*request, params.pass, params.max_iterations, pixels)?;

    Ok(RenderedPass {
        image,
        all_black: !any_escaped,
    })
}

fn allocate_pixels(request: &RenderRequest) -> Result<Vec<u32>, RenderPassError> {
    let allocation_error = RenderPassError::BufferAllocation {
        width: request.width(),
        height: request.height(),
    };

    let Some(count) = (request.width() as usize).checked_mul(request.height() as usize) else {
        return Err(allocation_error);
    };

    let mut pixels = Vec::new();
    if pixels.try_reserve_exact(count).is_err() {
        return Err(allocation_error);
    }
    pixels.resize(count, BLACK);

    Ok(pixels)
}

/// Fills one row and reports whether any of its pixels escaped.
fn render_row(
    request: &RenderRequest,
    row: u32,
    params: PassParams,
    colour_table: &ColourTable,
    line: &mut [u32],
) -> bool {
    let mut any_escaped = false;

    for (column, pixel) in line.iter_mut().enumerate() {
        let c = request.plane_point(column as u32, row);

        *pixel = match escape_iterations(c, params.max_iterations, params.escape_limit) {
            Some(iterations) => {
                any_escaped = true;
                colour_table.lookup(iterations)
            }
            None => BLACK,
        };
    }

    any_escaped
}
