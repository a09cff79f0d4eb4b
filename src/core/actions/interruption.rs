use std::fmt;

/// Why in-flight work must stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interruption {
    /// A newer request superseded the one being rendered.
    Restart,
    /// The engine is shutting down.
    Abort,
}

impl fmt::Display for Interruption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Restart => write!(f, "render restarted"),
            Self::Abort => write!(f, "render aborted"),
        }
    }
}

/// Polled by long-running work at row granularity.
///
/// `Abort` takes precedence over `Restart` when both are pending.
pub trait InterruptSource: Send + Sync {
    fn poll(&self) -> Option<Interruption>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Uninterrupted;

impl InterruptSource for Uninterrupted {
    #[inline]
    fn poll(&self) -> Option<Interruption> {
        None
    }
}

impl<F> InterruptSource for F
where
    F: Fn() -> Option<Interruption> + Send + Sync,
{
    #[inline]
    fn poll(&self) -> Option<Interruption> {
        self()
    }
}
