//! Deterministic cell generators used to populate a matrix before a run.
//!
//! Every generator is a pure function of its seed, so two runs with the same
//! seed see the same matrix.

use core::fmt;
use core::str::FromStr;

pub mod chacha;
pub mod lcg;

pub use chacha::ChaCha;
pub use lcg::Lcg;

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 0x1234;

/// A stream of matrix cell values.
pub trait CellSource {
    fn next_cell(&mut self) -> i32;
}

impl<S: CellSource + ?Sized> CellSource for Box<S> {
    fn next_cell(&mut self) -> i32 {
        (**self).next_cell()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Generator {
    /// 32-bit LCG with `rand()`-style 15-bit output
    #[default]
    Lcg,
    /// ChaCha8 stream with 31-bit output
    ChaCha,
}

impl Generator {
    pub fn seeded(self, seed: u64) -> Box<dyn CellSource + Send> {
        match self {
            Generator::Lcg => Box::new(Lcg::new(seed)),
            Generator::ChaCha => Box::new(ChaCha::new(seed)),
        }
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Generator::Lcg => f.write_str("lcg"),
            Generator::ChaCha => f.write_str("chacha"),
        }
    }
}

impl FromStr for Generator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lcg" => Ok(Generator::Lcg),
            "chacha" => Ok(Generator::ChaCha),
            other => Err(format!("unknown generator '{other}' (expected lcg or chacha)")),
        }
    }
}

#[cfg(test)]
mod tests;
