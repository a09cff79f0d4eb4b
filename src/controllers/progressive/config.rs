use crate::core::actions::pass_schedule::{
    DEFAULT_BLACK_SKIP_PASS, DEFAULT_PASS_COUNT, IterationCeiling,
};
use crate::core::actions::render_pass::RowScheduling;
use crate::core::colour_table::{ColourTableError, DEFAULT_COLOUR_TABLE_SIZE};
use crate::core::escape_time::DEFAULT_ESCAPE_LIMIT;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    ZeroPassCount,
    ColourTable(ColourTableError),
    InvalidEscapeLimit(f64),
    CeilingOverflow { pass: u32 },
    SkipPassOutOfRange { skip_pass: u32, pass_count: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroPassCount => write!(f, "pass count must be greater than zero"),
            Self::ColourTable(err) => write!(f, "colour table error: {}", err),
            Self::InvalidEscapeLimit(limit) => {
                write!(f, "escape limit {} must be finite and greater than zero", limit)
            }
            Self::CeilingOverflow { pass } => {
                write!(f, "iteration ceiling for pass {} does not fit in 32 bits", pass)
            }
            Self::SkipPassOutOfRange {
                skip_pass,
                pass_count,
            } => {
                write!(
                    f,
                    "black skip pass {} must be in 1..{}",
                    skip_pass, pass_count
                )
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ColourTable(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ColourTableError> for ConfigError {
    fn from(err: ColourTableError) -> Self {
        Self::ColourTable(err)
    }
}

/// Tunables for a [`ProgressiveRenderEngine`](super::ProgressiveRenderEngine).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub pass_count: u32,
    pub colour_table_size: usize,
    /// Squared magnitude a point must exceed to count as escaped.
    pub escape_limit: f64,
    pub iteration_ceiling: IterationCeiling,
    /// Pass to jump to when pass 0 resolves nothing. `None` runs every pass.
    pub black_skip_pass: Option<u32>,
    pub row_scheduling: RowScheduling,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pass_count: DEFAULT_PASS_COUNT,
            colour_table_size: DEFAULT_COLOUR_TABLE_SIZE,
            escape_limit: DEFAULT_ESCAPE_LIMIT,
            iteration_ceiling: IterationCeiling::default(),
            black_skip_pass: Some(DEFAULT_BLACK_SKIP_PASS),
            row_scheduling: RowScheduling::default(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pass_count == 0 {
            return Err(ConfigError::ZeroPassCount);
        }

        if self.colour_table_size == 0 {
            return Err(ColourTableError::ZeroSize.into());
        }

        if !self.escape_limit.is_finite() || self.escape_limit <= 0.0 {
            return Err(ConfigError::InvalidEscapeLimit(self.escape_limit));
        }

        // ceilings grow with the pass index, so the last one is the largest
        let last_pass = self.pass_count - 1;
        if self.iteration_ceiling.for_pass(last_pass).is_none() {
            return Err(ConfigError::CeilingOverflow { pass: last_pass });
        }

        if let Some(skip_pass) = self.black_skip_pass {
            if skip_pass == 0 || skip_pass >= self.pass_count {
                return Err(ConfigError::SkipPassOutOfRange {
                    skip_pass,
                    pass_count: self.pass_count,
                });
            }
        }

        Ok(())
    }

    /// Iteration ceiling for `pass`; `None` only for configs that fail
    /// [`validate`](Self::validate).
    #[must_use]
    pub fn max_iterations(&self, pass: u32) -> Option<u32> {
        self.iteration_ceiling.for_pass(pass)
    }
}
