use crate::errors::RingSigError;
use crate::glue::primitive::HashChoice;

use serde::{Deserialize, Serialize};

/// Default width `L` of the shared permutation domain `[0, 2^L)`.
pub const DEFAULT_MODULUS_BITS: usize = 2048;

/// Construction parameters shared by the signer and every verifier of a ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RingParams {
    /// Bit width `L` of the common domain; no modulus may be wider.
    ///
    /// `L` should exceed the digest width of `hash`. Glue outputs are digest
    /// sized, so when `L` is no wider the signer's closing value always lies
    /// outside the split range, the permutation leaves it unchanged, and a
    /// signature can be forged without any private exponent.
    pub modulus_bits: usize,
    /// Digest used for the message key and the glue function.
    pub hash: HashChoice,
}

impl Default for RingParams {
    fn default() -> Self {
        Self {
            modulus_bits: DEFAULT_MODULUS_BITS,
            hash: HashChoice::default(),
        }
    }
}

impl RingParams {
    /// Creates parameters, rejecting a domain too narrow to sample from.
    pub fn try_with(modulus_bits: usize, hash: HashChoice) -> Result<Self, RingSigError> {
        let params = Self { modulus_bits, hash };
        params.validate()?;
        Ok(params)
    }

    /// `L` must be at least 2 so that `q = 2^(L-1)` leaves room for random draws.
    pub fn validate(&self) -> Result<(), RingSigError> {
        if self.modulus_bits < 2 {
            return Err(RingSigError::InvalidParameters(format!(
                "Modulus bit width must be >= 2, got {}",
                self.modulus_bits
            )));
        }

        Ok(())
    }
}
