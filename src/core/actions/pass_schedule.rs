//! Which refinement passes run, and how many iterations each may spend.

pub const DEFAULT_PASS_COUNT: u32 = 8;
pub const DEFAULT_BLACK_SKIP_PASS: u32 = 4;

/// Iteration ceiling formula `(1 << (growth * pass + base_shift)) + offset`.
///
/// With the defaults each pass costs roughly four times the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationCeiling {
    pub base_shift: u32,
    pub growth: u32,
    pub offset: u32,
}

impl Default for IterationCeiling {
    fn default() -> Self {
        Self {
            base_shift: 6,
            growth: 2,
            offset: 32,
        }
    }
}

impl IterationCeiling {
    /// `None` if the ceiling for `pass` does not fit in a `u32`.
    #[must_use]
    pub fn for_pass(&self, pass: u32) -> Option<u32> {
        let shift = self.growth.checked_mul(pass)?.checked_add(self.base_shift)?;
        1u32.checked_shl(shift)?.checked_add(self.offset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassVerdict {
    Emit,
    /// Pass 0 came out entirely black; the schedule has jumped ahead and the
    /// image is not worth showing.
    SkipAhead,
}

/// Yields pass indices `0..pass_count`, jumping straight to `black_skip_pass`
/// when pass 0 resolves no pixel at all.
#[derive(Debug, Clone)]
pub struct PassSchedule {
    next: u32,
    pass_count: u32,
    black_skip_pass: Option<u32>,
}

impl PassSchedule {
    #[must_use]
    pub fn new(pass_count: u32, black_skip_pass: Option<u32>) -> Self {
        Self {
            next: 0,
            pass_count,
            black_skip_pass,
        }
    }

    /// Records the outcome of `pass` and decides whether its image is emitted.
    pub fn after_pass(&mut self, pass: u32, all_black: bool) -> PassVerdict {
        match self.black_skip_pass {
            Some(target) if pass == 0 && all_black => {
                self.next = self.next.max(target);
                PassVerdict::SkipAhead
            }
            _ => PassVerdict::Emit,
        }
    }
}

impl Iterator for PassSchedule {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.next >= self.pass_count {
            return None;
        }

        let pass = self.next;
        self.next += 1;
        Some(pass)
    }
}
