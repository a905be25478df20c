use crate::CellSource;

const MULTIPLIER: u32 = 1_103_515_245;
const INCREMENT: u32 = 12_345;

/// Linear congruential generator with the classic C library constants.
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    /// The 64-bit seed is folded into the 32-bit state.
    pub fn new(seed: u64) -> Self {
        Self {
            state: (seed ^ (seed >> 32)) as u32,
        }
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(INCREMENT);
        self.state
    }
}

impl CellSource for Lcg {
    /// Values fall in `[0, 32767]`.
    #[inline]
    fn next_cell(&mut self) -> i32 {
        ((self.next_u32() >> 16) & 0x7fff) as i32
    }
}
