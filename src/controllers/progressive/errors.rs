use crate::core::data::render_request::RenderRequestError;
use std::error::Error;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum SubmitError {
    /// The viewport parameters were rejected before reaching the worker.
    InvalidRequest(RenderRequestError),
    /// The render worker thread could not be started.
    Spawn(io::Error),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRequest(err) => write!(f, "invalid render request: {}", err),
            Self::Spawn(err) => write!(f, "failed to spawn render worker: {}", err),
        }
    }
}

impl Error for SubmitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidRequest(err) => Some(err),
            Self::Spawn(err) => Some(err),
        }
    }
}

impl From<RenderRequestError> for SubmitError {
    fn from(err: RenderRequestError) -> Self {
        Self::InvalidRequest(err)
    }
}
