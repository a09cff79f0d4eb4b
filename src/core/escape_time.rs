use crate::core::data::complex::Complex;

pub const DEFAULT_ESCAPE_LIMIT: f64 = 4.0;

/// Iterates `z ← z² + c` from `z = 0`.
///
/// Returns the iteration at which `|z|²` first exceeds `escape_limit`, or
/// `None` if the point is still bounded after `max_iterations` steps. An escape
/// detected on the final permitted step counts as bounded.
#[inline]
#[must_use]
pub fn escape_iterations(c: Complex, max_iterations: u32, escape_limit: f64) -> Option<u32> {
    let mut z = Complex::ZERO;

    for iteration in 1..=max_iterations {
        z = z.square() + c;

        if z.magnitude_squared() > escape_limit {
            return (iteration < max_iterations).then_some(iteration);
        }
    }

    None
}
