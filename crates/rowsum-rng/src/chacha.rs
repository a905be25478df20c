use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::CellSource;

#[derive(Debug, Clone)]
pub struct ChaCha {
    rng: ChaCha8Rng,
}

impl ChaCha {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl CellSource for ChaCha {
    /// Values fall in `[0, i32::MAX]`.
    #[inline]
    fn next_cell(&mut self) -> i32 {
        (self.rng.next_u32() >> 1) as i32
    }
}
