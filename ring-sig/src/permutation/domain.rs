//! Domain-split trapdoor permutation `g` over `[0, 2^L)`.

use crate::errors::RingSigError;
use crate::keypair::TrapdoorKey;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;

/// The common `L`-bit domain every ring member's permutation is lifted onto.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    bits: usize,
    /// `2^L - 1`
    ceiling: BigUint,
}

impl Domain {
    /// Create a domain of `bits` bits.
    ///
    /// The width must be at least 1.
    pub fn try_with(bits: usize) -> Result<Self, RingSigError> {
        if bits == 0 {
            return Err(RingSigError::InvalidParameters(
                "Domain width must be at least 1 bit".to_string(),
            ));
        }

        let ceiling = (BigUint::one() << bits) - BigUint::one();
        Ok(Domain { bits, ceiling })
    }

    /// Returns the width `L` of the domain.
    ///
    /// # Example
    ///
    /// ```
    /// # use ring_sig::permutation::Domain;
    /// let domain = Domain::try_with(12).unwrap();
    /// assert_eq!(domain.bits(), 12);
    /// ```
    pub fn bits(&self) -> usize {
        self.bits
    }

    /// Bit count of the sampling bound `q = 2^(L-1)` for seeds and responses.
    pub fn sample_bits(&self) -> usize {
        self.bits - 1
    }

    /// Whether `x` falls in the sub-range where the modular exponentiation is
    /// applied, i.e. `x = q·n + r` with `(q + 1)·n <= 2^L - 1`.
    ///
    /// Outside that sub-range `g` is the identity.
    ///
    /// # Example
    ///
    /// ```
    /// # use num_bigint::BigUint;
    /// # use ring_sig::permutation::Domain;
    /// let domain = Domain::try_with(12).unwrap();
    /// let n = BigUint::from(3233u32);
    /// assert!(domain.is_split_safe(&BigUint::from(3232u32), &n));
    /// assert!(!domain.is_split_safe(&BigUint::from(3233u32), &n)); // 2·3233 > 4095
    /// ```
    pub fn is_split_safe(&self, x: &BigUint, modulus: &BigUint) -> bool {
        let (quotient, _) = x.div_rem(modulus);
        (quotient + 1u32) * modulus <= self.ceiling
    }

    /// Forward direction `g_e`, computable by anyone holding the public key.
    pub fn apply_public(&self, x: &BigUint, key: &TrapdoorKey) -> BigUint {
        self.apply(x, key.public_exponent(), key.modulus())
    }

    /// Inverse direction `g_d`, using the key's private exponent.
    ///
    /// # Errors
    ///
    /// Returns `RingSigError::MissingPrivateExponent` for a public-only key.
    pub fn apply_private(&self, x: &BigUint, key: &TrapdoorKey) -> Result<BigUint, RingSigError> {
        let exponent = key
            .private_exponent()
            .ok_or(RingSigError::MissingPrivateExponent)?;

        Ok(self.apply(x, exponent, key.modulus()))
    }

    fn apply(&self, x: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
        if !self.is_split_safe(x, modulus) {
            log::trace!("value outside the split range, passed through");
            return x.clone();
        }

        let (quotient, remainder) = x.div_rem(modulus);
        quotient * modulus + remainder.modpow(exponent, modulus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use quickcheck_macros::quickcheck;
    use std::collections::HashSet;

    // p = 61, q = 53
    fn textbook_key() -> TrapdoorKey {
        TrapdoorKey::try_private(
            BigUint::from(3233u32),
            BigUint::from(17u32),
            BigUint::from(2753u32),
        )
        .unwrap()
    }

    fn test_domain() -> Domain {
        Domain::try_with(12).unwrap()
    }

    #[test]
    fn test_domain_creation() {
        assert!(Domain::try_with(0).is_err());
        assert!(Domain::try_with(1).is_ok());
        assert!(Domain::try_with(2048).is_ok());
        assert_eq!(test_domain().sample_bits(), 11);
    }

    #[test]
    fn test_textbook_exponentiation() -> Result<(), RingSigError> {
        let domain = test_domain();
        let key = textbook_key();

        // 65^17 mod 3233 = 2790
        assert_eq!(
            domain.apply_public(&BigUint::from(65u32), &key),
            BigUint::from(2790u32)
        );
        assert_eq!(
            domain.apply_private(&BigUint::from(2790u32), &key)?,
            BigUint::from(65u32)
        );
        Ok(())
    }

    #[test]
    fn test_identity_outside_split_range() -> Result<(), RingSigError> {
        let domain = test_domain();
        let key = textbook_key();

        for raw in [3233u32, 4000, 4095, 4096, 1 << 20] {
            let x = BigUint::from(raw);
            assert_eq!(domain.apply_public(&x, &key), x);
            assert_eq!(domain.apply_private(&x, &key)?, x);
        }
        Ok(())
    }

    #[test]
    fn test_is_permutation_of_whole_domain() -> Result<(), RingSigError> {
        let domain = test_domain();
        let key = textbook_key();

        let mut images = HashSet::new();
        for raw in 0u32..4096 {
            let x = BigUint::from(raw);
            let y = domain.apply_public(&x, &key);
            assert!(y < BigUint::from(4096u32));
            assert_eq!(domain.apply_private(&y, &key)?, x);
            images.insert(y);
        }
        assert_eq!(images.len(), 4096);
        Ok(())
    }

    #[test]
    fn test_private_requires_exponent() {
        let domain = test_domain();
        let public = textbook_key().public_part();

        assert!(matches!(
            domain.apply_private(&BigUint::from(5u32), &public),
            Err(RingSigError::MissingPrivateExponent)
        ));
    }

    #[quickcheck]
    fn prop_public_undoes_private(raw: u16) -> bool {
        // p = 47, q = 59
        let key = TrapdoorKey::try_private(
            BigUint::from(2773u32),
            BigUint::from(17u32),
            BigUint::from(157u32),
        )
        .unwrap();
        let domain = test_domain();
        let x = BigUint::from(raw % 8192);

        let inverted = domain.apply_private(&x, &key).unwrap();
        domain.apply_public(&inverted, &key) == x
    }
}
