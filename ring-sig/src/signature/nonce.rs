//! Randomness port for the signer's seed and filler responses.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use rand::RngCore;

/// Supplies the uniform draws on `[0, 2^bits)` that signing consumes.
pub trait NonceSource {
    fn next_below_power_of_two(&mut self, bits: usize) -> BigUint;
}

/// Draws nonces from any `rand` generator.
#[derive(Debug)]
pub struct RngNonces<R> {
    rng: R,
}

impl<R: RngCore> RngNonces<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RngCore> NonceSource for RngNonces<R> {
    fn next_below_power_of_two(&mut self, bits: usize) -> BigUint {
        if bits == 0 {
            return BigUint::zero();
        }

        let mut bytes = vec![0u8; bits.div_ceil(8)];
        self.rng.fill_bytes(&mut bytes);

        // clear the bits above `bits` in the leading byte
        let excess = bytes.len() * 8 - bits;
        bytes[0] &= 0xffu8 >> excess;

        BigUint::from_bytes_be(&bytes)
    }
}

/// Replays a fixed script of values, cycling when it runs out.
///
/// Each value is reduced modulo `2^bits` on the way out, so any script is
/// valid for any domain. An empty script yields zeros.
#[derive(Debug, Clone, Default)]
pub struct ScriptedNonces {
    script: Vec<BigUint>,
    cursor: usize,
}

impl ScriptedNonces {
    pub fn new<I: IntoIterator<Item = BigUint>>(values: I) -> Self {
        Self {
            script: values.into_iter().collect(),
            cursor: 0,
        }
    }

    /// How many draws have been taken so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl NonceSource for ScriptedNonces {
    fn next_below_power_of_two(&mut self, bits: usize) -> BigUint {
        if self.script.is_empty() {
            self.cursor += 1;
            return BigUint::zero();
        }

        let value = &self.script[self.cursor % self.script.len()];
        self.cursor += 1;

        value % (BigUint::one() << bits)
    }
}
