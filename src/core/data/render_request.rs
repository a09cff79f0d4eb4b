use crate::core::data::complex::Complex;
use std::error::Error;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum RenderRequestError {
    ZeroWidth,
    ZeroHeight,
    InvalidScale(f64),
    NonFiniteCentre { x: f64, y: f64 },
}

impl fmt::Display for RenderRequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroWidth => write!(f, "width must be greater than zero"),
            Self::ZeroHeight => write!(f, "height must be greater than zero"),
            Self::InvalidScale(scale) => {
                write!(f, "scale {} must be finite and greater than zero", scale)
            }
            Self::NonFiniteCentre { x, y } => {
                write!(f, "centre (x: {}, y: {}) must be finite", x, y)
            }
        }
    }
}

impl Error for RenderRequestError {}

/// An immutable snapshot of the viewport to render.
///
/// Only constructible through [`RenderRequest::new`], so every instance has
/// non-zero dimensions and a finite, positive scale.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderRequest {
    centre: Complex,
    scale: f64,
    width: u32,
    height: u32,
}

impl RenderRequest {
    pub fn new(
        centre_x: f64,
        centre_y: f64,
        scale: f64,
        width: u32,
        height: u32,
    ) -> Result<Self, RenderRequestError> {
        if width == 0 {
            return Err(RenderRequestError::ZeroWidth);
        }

        if height == 0 {
            return Err(RenderRequestError::ZeroHeight);
        }

        if !scale.is_finite() || scale <= 0.0 {
            return Err(RenderRequestError::InvalidScale(scale));
        }

        if !centre_x.is_finite() || !centre_y.is_finite() {
            return Err(RenderRequestError::NonFiniteCentre {
                x: centre_x,
                y: centre_y,
            });
        }

        Ok(Self {
            centre: Complex {
                real: centre_x,
                imag: centre_y,
            },
            scale,
            width,
            height,
        })
    }

    #[must_use]
    pub fn centre(&self) -> Complex {
        self.centre
    }

    /// Plane units per pixel.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Plane coordinate of the pixel at `column`, `row`.
    ///
    /// Offsets are measured from the integer half of each dimension, so the
    /// pixel at `(width / 2, height / 2)` lands exactly on the centre.
    #[must_use]
    pub fn plane_point(&self, column: u32, row: u32) -> Complex {
        let dx = i64::from(column) - i64::from(self.width / 2);
        let dy = i64::from(row) - i64::from(self.height / 2);

        Complex {
            real: self.centre.real + (dx as f64 * self.scale),
            imag: self.centre.imag + (dy as f64 * self.scale),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_valid_request() {
        let request = RenderRequest::new(-0.5, 0.25, 0.01, 640, 480).unwrap();

        assert_eq!(
            request.centre(),
            Complex {
                real: -0.5,
                imag: 0.25
            }
        );
        assert_eq!(request.scale(), 0.01);
        assert_eq!(request.width(), 640);
        assert_eq!(request.height(), 480);
    }

    #[test]
    fn test_new_rejects_zero_width() {
        let result = RenderRequest::new(0.0, 0.0, 1.0, 0, 10);
        assert_eq!(result, Err(RenderRequestError::ZeroWidth));
    }

    #[test]
    fn test_new_rejects_zero_height() {
        let result = RenderRequest::new(0.0, 0.0, 1.0, 10, 0);
        assert_eq!(result, Err(RenderRequestError::ZeroHeight));
    }

    #[test]
    fn test_new_rejects_zero_scale() {
        let result = RenderRequest::new(0.0, 0.0, 0.0, 10, 10);
        assert_eq!(result, Err(RenderRequestError::InvalidScale(0.0)));
    }

    #[test]
    fn test_new_rejects_negative_scale() {
        let result = RenderRequest::new(0.0, 0.0, -0.5, 10, 10);
        assert_eq!(result, Err(RenderRequestError::InvalidScale(-0.5)));
    }

    #[test]
    fn test_new_rejects_nan_scale() {
        let result = RenderRequest::new(0.0, 0.0, f64::NAN, 10, 10);
        assert!(matches!(result, Err(RenderRequestError::InvalidScale(_))));
    }

    #[test]
    fn test_new_rejects_infinite_centre() {
        let result = RenderRequest::new(f64::INFINITY, 0.0, 1.0, 10, 10);
        assert!(matches!(
            result,
            Err(RenderRequestError::NonFiniteCentre { .. })
        ));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            RenderRequestError::ZeroWidth.to_string(),
            "width must be greater than zero"
        );
        assert_eq!(
            RenderRequestError::InvalidScale(-1.0).to_string(),
            "scale -1 must be finite and greater than zero"
        );
    }

    #[test]
    fn test_plane_point_centre_pixel_maps_to_centre() {
        let request = RenderRequest::new(1.5, -2.0, 0.25, 8, 6).unwrap();

        assert_eq!(
            request.plane_point(4, 3),
            Complex {
                real: 1.5,
                imag: -2.0
            }
        );
    }

    #[test]
    fn test_plane_point_top_left_is_offset_by_half_dimensions() {
        let request = RenderRequest::new(0.0, 0.0, 0.5, 8, 6).unwrap();

        assert_eq!(
            request.plane_point(0, 0),
            Complex {
                real: -2.0,
                imag: -1.5
            }
        );
    }

    #[test]
    fn test_plane_point_single_pixel_is_centre() {
        let request = RenderRequest::new(0.0, 0.0, 1.0, 1, 1).unwrap();

        assert_eq!(request.plane_point(0, 0), Complex::ZERO);
    }

    #[test]
    fn test_plane_point_odd_dimensions_cover_last_row() {
        let request = RenderRequest::new(0.0, 0.0, 1.0, 3, 3).unwrap();

        assert_eq!(
            request.plane_point(2, 2),
            Complex {
                real: 1.0,
                imag: 1.0
            }
        );
    }
}
