//! # Signature Module
//!
//! Signing and verification over a [`KeyRing`].
//!
//! Signing walks the ring starting just after the signer, gluing each
//! member's permuted response onto a running value, and closes the loop by
//! inverting the signer's own permutation. Verification replays the walk
//! from index 0 using only public keys and checks that it lands back on the
//! published value `c`.

pub mod nonce;
pub mod value;

pub use nonce::{NonceSource, RngNonces, ScriptedNonces};
pub use value::SignatureValue;

use crate::errors::RingSigError;
use crate::glue::GlueHash;
use crate::keypair::KeyRing;

use itertools::Itertools;

use num_bigint::BigUint;
use num_traits::Zero;

/// Positions the signer fills with random responses, in the order they are
/// glued: `[(z+1) % n, (z+2) % n, …, (z+n-1) % n]`.
///
/// # Example
///
/// ```
/// # use ring_sig::signature::lap_order;
/// assert_eq!(lap_order(0, 4), vec![1, 2, 3]);
/// assert_eq!(lap_order(2, 4), vec![3, 0, 1]);
/// assert_eq!(lap_order(3, 4), vec![0, 1, 2]);
/// ```
pub fn lap_order(signer: usize, size: usize) -> Vec<usize> {
    (1..size).map(|step| (signer + step) % size).collect()
}

impl KeyRing {
    /// Signs `message` as ring member `signer`, drawing nonces from the
    /// thread-local generator.
    pub fn sign(&self, message: &[u8], signer: usize) -> Result<SignatureValue, RingSigError> {
        self.sign_with(message, signer, &mut RngNonces::new(rand::rng()))
    }

    /// Signs `message` as ring member `signer` with an explicit nonce source.
    ///
    /// # Errors
    ///
    /// * `RingSigError::IndexOutOfRange` if `signer` is not a ring position.
    /// * `RingSigError::MissingPrivateExponent` if the signer's key is
    ///   public-only. No nonces are consumed in that case.
    pub fn sign_with<N: NonceSource + ?Sized>(
        &self,
        message: &[u8],
        signer: usize,
        nonces: &mut N,
    ) -> Result<SignatureValue, RingSigError> {
        let size = self.size();
        let signer_key = self.key_at(signer)?;
        if !signer_key.has_private_exponent() {
            return Err(RingSigError::MissingPrivateExponent);
        }

        log::debug!(
            "signing {} bytes over a ring of {} with {}",
            message.len(),
            size,
            self.hash().name()
        );

        let glue = GlueHash::for_message(message, self.hash());
        let domain = self.domain();
        let sample_bits = domain.sample_bits();

        let seed = nonces.next_below_power_of_two(sample_bits);
        let start = glue.combine(&seed);

        let mut responses = vec![BigUint::zero(); size];
        let (running, published) = lap_order(signer, size).into_iter().fold(
            (start.clone(), start),
            |(running, published), index| {
                let response = nonces.next_below_power_of_two(sample_bits);
                let image = domain.apply_public(&response, &self.keys()[index]);
                responses[index] = response;

                let next = glue.combine(&(running ^ image));
                // verification folds from index 0, so `c` is the value entering it
                let published = if index == size - 1 {
                    next.clone()
                } else {
                    published
                };

                (next, published)
            },
        );

        responses[signer] = domain.apply_private(&(running ^ &seed), signer_key)?;

        Ok(SignatureValue::new(published, responses))
    }

    /// Checks `signature` against `message` and this ring.
    ///
    /// A well-formed signature that does not verify is `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns `RingSigError::MalformedSignature` if the number of responses
    /// differs from the ring size.
    pub fn verify(
        &self,
        message: &[u8],
        signature: &SignatureValue,
    ) -> Result<bool, RingSigError> {
        if signature.ring_size() != self.size() {
            return Err(RingSigError::MalformedSignature(format!(
                "Ring has {} members but the signature carries {} responses",
                self.size(),
                signature.ring_size()
            )));
        }

        let glue = GlueHash::for_message(message, self.hash());
        let domain = self.domain();

        let closing = self
            .keys()
            .iter()
            .zip_eq(signature.responses())
            .enumerate()
            .fold(
                signature.glue_value().clone(),
                |running, (index, (key, response))| {
                    log::trace!("replaying position {}", index);
                    glue.combine(&(running ^ domain.apply_public(response, key)))
                },
            );

        let valid = &closing == signature.glue_value();
        log::debug!(
            "verified signature over a ring of {} with {}: {}",
            self.size(),
            self.hash().name(),
            if valid { "valid" } else { "invalid" }
        );

        Ok(valid)
    }

    /// Like [`KeyRing::verify`], with malformed signatures counted as invalid.
    pub fn is_valid(&self, message: &[u8], signature: &SignatureValue) -> bool {
        self.verify(message, signature).unwrap_or(false)
    }
}
