//! Spectral colour lookup table.
//!
//! Iteration counts are coloured by sampling a visible-light wavelength model
//! at evenly spaced points between 380nm and 780nm. The table is built once and
//! indexed with `iterations % len`.

use crate::core::data::colour::Colour;
use std::error::Error;
use std::fmt;

pub const DEFAULT_COLOUR_TABLE_SIZE: usize = 512;

const SPECTRUM_START_NM: f64 = 380.0;
const SPECTRUM_WIDTH_NM: f64 = 400.0;
const GAMMA: f64 = 0.8;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ColourTableError {
    ZeroSize,
}

impl fmt::Display for ColourTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSize => write!(f, "colour table size must be greater than zero"),
        }
    }
}

impl Error for ColourTableError {}

/// Maps a wavelength in nanometres to an RGB colour.
///
/// Wavelengths outside `[380, 780]` are black. Intensity tapers to 30% towards
/// both ends of the spectrum, and each channel is gamma corrected before being
/// truncated to 8 bits.
#[must_use]
pub fn wavelength_to_colour(wavelength: f64) -> Colour {
    let (r, g, b) = raw_spectral_rgb(wavelength);
    let intensity = intensity_falloff(wavelength);

    Colour {
        r: quantise(r * intensity),
        g: quantise(g * intensity),
        b: quantise(b * intensity),
    }
}

fn raw_spectral_rgb(wavelength: f64) -> (f64, f64, f64) {
    let w = wavelength;

    if (380.0..=440.0).contains(&w) {
        (-(w - 440.0) / (440.0 - 380.0), 0.0, 1.0)
    } else if (440.0..=490.0).contains(&w) {
        (0.0, (w - 440.0) / (490.0 - 440.0), 1.0)
    } else if (490.0..=510.0).contains(&w) {
        (0.0, 1.0, -(w - 510.0) / (510.0 - 490.0))
    } else if (510.0..=580.0).contains(&w) {
        ((w - 510.0) / (580.0 - 510.0), 1.0, 0.0)
    } else if (580.0..=645.0).contains(&w) {
        (1.0, -(w - 645.0) / (645.0 - 580.0), 0.0)
    } else if (645.0..=780.0).contains(&w) {
        (1.0, 0.0, 0.0)
    } else {
        (0.0, 0.0, 0.0)
    }
}

fn intensity_falloff(wavelength: f64) -> f64 {
    if wavelength > 700.0 {
        0.3 + 0.7 * (780.0 - wavelength) / (780.0 - 700.0)
    } else if wavelength < 420.0 {
        0.3 + 0.7 * (wavelength - 380.0) / (420.0 - 380.0)
    } else {
        1.0
    }
}

fn quantise(channel: f64) -> u8 {
    // -0.0 from the descending ramps must stay 0 after the power
    (channel.powf(GAMMA) * 255.0) as u8
}

/// Immutable iteration-count to packed-colour table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColourTable {
    colours: Box<[u32]>,
}

impl ColourTable {
    pub fn build(size: usize) -> Result<Self, ColourTableError> {
        if size == 0 {
            return Err(ColourTableError::ZeroSize);
        }

        let colours = (0..size)
            .map(|i| {
                let wavelength = SPECTRUM_START_NM + (i as f64 * SPECTRUM_WIDTH_NM / size as f64);
                wavelength_to_colour(wavelength).packed()
            })
            .collect();

        Ok(Self { colours })
    }

    #[inline]
    #[must_use]
    pub fn lookup(&self, iterations: u32) -> u32 {
        self.colours[iterations as usize % self.colours.len()]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colours.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }

    #[must_use]
    pub fn colours(&self) -> &[u32] {
        &self.colours
    }
}
