use crate::core::data::colour::Colour;
use crate::core::data::render_request::RenderRequest;
use std::error::Error;
use std::fmt;

fn request_to_pixel_count(request: &RenderRequest) -> usize {
    request.width() as usize * request.height() as usize
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderedImageError {
    BoundsMismatch {
        expected_pixels: usize,
        buffer_pixels: usize,
    },
}

impl fmt::Display for RenderedImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoundsMismatch {
                expected_pixels,
                buffer_pixels,
            } => {
                write!(
                    f,
                    "request needs {} pixels but buffer holds {}",
                    expected_pixels, buffer_pixels
                )
            }
        }
    }
}

impl Error for RenderedImageError {}

/// The output of one completed refinement pass.
///
/// Pixels are packed `0x00RRGGBB` values in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedImage {
    request: RenderRequest,
    pass: u32,
    max_iterations: u32,
    pixels: Vec<u32>,
}

impl RenderedImage {
    pub fn from_pixels(
        request: RenderRequest,
        pass: u32,
        max_iterations: u32,
        pixels: Vec<u32>,
    ) -> Result<Self, RenderedImageError> {
        let expected_pixels = request_to_pixel_count(&request);

        if expected_pixels != pixels.len() {
            return Err(RenderedImageError::BoundsMismatch {
                expected_pixels,
                buffer_pixels: pixels.len(),
            });
        }

        Ok(Self {
            request,
            pass,
            max_iterations,
            pixels,
        })
    }

    #[must_use]
    pub fn request(&self) -> &RenderRequest {
        &self.request
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.request.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.request.height()
    }

    #[must_use]
    pub fn scale_factor(&self) -> f64 {
        self.request.scale()
    }

    /// Index of the refinement pass that produced this image.
    #[must_use]
    pub fn pass(&self) -> u32 {
        self.pass
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    #[must_use]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    #[must_use]
    pub fn into_pixels(self) -> Vec<u32> {
        self.pixels
    }

    #[must_use]
    pub fn pixel(&self, column: u32, row: u32) -> Option<u32> {
        if column >= self.width() || row >= self.height() {
            return None;
        }

        let index = row as usize * self.width() as usize + column as usize;
        self.pixels.get(index).copied()
    }

    /// Unpacks into 3 bytes per pixel, the layout binary PPM expects.
    #[must_use]
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);

        for &packed in &self.pixels {
            let colour = Colour::from_packed(packed);
            bytes.extend_from_slice(&[colour.r, colour.g, colour.b]);
        }

        bytes
    }
}
