use crate::errors::RingSigError;
use crate::glue::primitive::{HashChoice, HashPrimitive};
use crate::keypair::keys::TrapdoorKey;
use crate::keypair::params::RingParams;
use crate::permutation::Domain;

use rsa::rand_core::OsRng;

use serde::{Deserialize, Serialize};

use std::sync::Arc;

/// The ordered list of ring members, validated once and read-only afterwards.
///
/// Index order is part of the protocol: signer and verifier must build the
/// ring from the same key sequence. A `KeyRing` can be shared by reference
/// across threads signing or verifying concurrently.
#[derive(Debug, Clone)]
pub struct KeyRing {
    keys: Vec<TrapdoorKey>,
    domain: Domain,
    hash: Arc<dyn HashPrimitive>,
    /// `None` when built around a custom primitive.
    hash_choice: Option<HashChoice>,
}

/// Serialisable form of a [`KeyRing`] built from a [`HashChoice`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRingDocument {
    pub params: RingParams,
    pub keys: Vec<TrapdoorKey>,
}

impl KeyRing {
    /// Builds a ring from configuration parameters.
    ///
    /// # Errors
    ///
    /// Returns `RingSigError::InvalidParameters` for an unusable bit width and
    /// `RingSigError::InvalidRing` if there are fewer than two keys or any
    /// modulus is wider than `params.modulus_bits`.
    pub fn try_with(keys: Vec<TrapdoorKey>, params: RingParams) -> Result<Self, RingSigError> {
        params.validate()?;

        let mut ring = Self::with_primitive(keys, params.modulus_bits, params.hash.primitive())?;
        ring.hash_choice = Some(params.hash);
        Ok(ring)
    }

    /// Builds a ring around an arbitrary hash primitive.
    pub fn with_primitive(
        keys: Vec<TrapdoorKey>,
        modulus_bits: usize,
        hash: Arc<dyn HashPrimitive>,
    ) -> Result<Self, RingSigError> {
        if modulus_bits < 2 {
            return Err(RingSigError::InvalidParameters(format!(
                "Modulus bit width must be >= 2, got {}",
                modulus_bits
            )));
        }

        if keys.len() < 2 {
            return Err(RingSigError::InvalidRing(format!(
                "A ring needs at least 2 keys, got {}",
                keys.len()
            )));
        }

        if let Some((index, key)) = keys
            .iter()
            .enumerate()
            .find(|(_, key)| key.modulus_bits() > modulus_bits as u64)
        {
            return Err(RingSigError::InvalidRing(format!(
                "Key {} has a {}-bit modulus, wider than the {}-bit domain",
                index,
                key.modulus_bits(),
                modulus_bits
            )));
        }

        if modulus_bits <= hash.output_bits() {
            log::warn!(
                "{}-bit domain is no wider than the {}-bit {} digest; signatures over this ring can be forged",
                modulus_bits,
                hash.output_bits(),
                hash.name()
            );
        }

        log::debug!(
            "built ring of {} keys over a {}-bit domain with {}",
            keys.len(),
            modulus_bits,
            hash.name()
        );

        Ok(Self {
            keys,
            domain: Domain::try_with(modulus_bits)?,
            hash,
            hash_choice: None,
        })
    }

    /// Generates `count` fresh RSA keys of `params.modulus_bits` bits from the
    /// operating system's generator and builds a ring over them.
    pub fn generate(count: usize, params: RingParams) -> Result<Self, RingSigError> {
        params.validate()?;

        let mut rng = OsRng;
        let keys = (0..count)
            .map(|_| TrapdoorKey::generate(&mut rng, params.modulus_bits))
            .collect::<Result<Vec<_>, _>>()?;

        Self::try_with(keys, params)
    }

    /// Number of ring members `n`.
    pub fn size(&self) -> usize {
        self.keys.len()
    }

    /// The key at position `index`.
    ///
    /// # Errors
    ///
    /// Returns `RingSigError::IndexOutOfRange` if `index >= size()`.
    pub fn key_at(&self, index: usize) -> Result<&TrapdoorKey, RingSigError> {
        self.keys.get(index).ok_or(RingSigError::IndexOutOfRange {
            index,
            size: self.keys.len(),
        })
    }

    pub fn keys(&self) -> &[TrapdoorKey] {
        &self.keys
    }

    /// The shared domain width `L`.
    pub fn modulus_bit_width(&self) -> usize {
        self.domain.bits()
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn hash(&self) -> &dyn HashPrimitive {
        self.hash.as_ref()
    }

    pub fn hash_choice(&self) -> Option<HashChoice> {
        self.hash_choice
    }

    /// A copy of the ring with every private exponent removed, fit to hand
    /// to verifiers.
    pub fn public_view(&self) -> Self {
        Self {
            keys: self.keys.iter().map(TrapdoorKey::public_part).collect(),
            domain: self.domain.clone(),
            hash: Arc::clone(&self.hash),
            hash_choice: self.hash_choice,
        }
    }

    /// Exports the ring for serialisation.
    ///
    /// # Errors
    ///
    /// Returns `RingSigError::InvalidParameters` for rings built around a
    /// custom primitive, which has no configuration name.
    pub fn to_document(&self) -> Result<KeyRingDocument, RingSigError> {
        let hash = self.hash_choice.ok_or_else(|| {
            RingSigError::InvalidParameters(format!(
                "Hash primitive '{}' cannot be exported",
                self.hash.name()
            ))
        })?;

        Ok(KeyRingDocument {
            params: RingParams {
                modulus_bits: self.domain.bits(),
                hash,
            },
            keys: self.keys.clone(),
        })
    }
}

impl TryFrom<KeyRingDocument> for KeyRing {
    type Error = RingSigError;

    fn try_from(document: KeyRingDocument) -> Result<Self, Self::Error> {
        KeyRing::try_with(document.keys, document.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use num_bigint::BigUint;

    fn tiny_keys() -> Vec<TrapdoorKey> {
        vec![
            TrapdoorKey::try_private(
                BigUint::from(3233u32),
                BigUint::from(17u32),
                BigUint::from(2753u32),
            )
            .unwrap(),
            TrapdoorKey::try_public(BigUint::from(2773u32), BigUint::from(17u32)).unwrap(),
        ]
    }

    #[test]
    fn test_ring_creation() -> Result<(), RingSigError> {
        let ring = KeyRing::try_with(tiny_keys(), RingParams::try_with(12, HashChoice::Sha1)?)?;

        assert_eq!(ring.size(), 2);
        assert_eq!(ring.modulus_bit_width(), 12);
        assert_eq!(ring.hash().name(), "sha1");
        assert_eq!(ring.key_at(1)?.modulus(), &BigUint::from(2773u32));
        Ok(())
    }

    #[test]
    fn test_rejects_small_ring() {
        let single = tiny_keys().into_iter().take(1).collect();
        assert!(matches!(
            KeyRing::try_with(single, RingParams::default()),
            Err(RingSigError::InvalidRing(_))
        ));
        assert!(matches!(
            KeyRing::try_with(Vec::new(), RingParams::default()),
            Err(RingSigError::InvalidRing(_))
        ));
    }

    #[test]
    fn test_rejects_modulus_wider_than_domain() -> Result<(), RingSigError> {
        // 3233 needs 12 bits
        let params = RingParams::try_with(11, HashChoice::Sha3_256)?;
        assert!(matches!(
            KeyRing::try_with(tiny_keys(), params),
            Err(RingSigError::InvalidRing(_))
        ));
        Ok(())
    }

    #[test]
    fn test_key_at_out_of_range() -> Result<(), RingSigError> {
        let ring = KeyRing::try_with(tiny_keys(), RingParams::try_with(12, HashChoice::Sha1)?)?;

        assert!(matches!(
            ring.key_at(2),
            Err(RingSigError::IndexOutOfRange { index: 2, size: 2 })
        ));
        Ok(())
    }

    #[test]
    fn test_public_view_and_document() -> Result<(), RingSigError> {
        let ring = KeyRing::try_with(tiny_keys(), RingParams::try_with(16, HashChoice::Sha1)?)?;
        let public = ring.public_view();

        assert!(ring.key_at(0)?.has_private_exponent());
        assert!(public.keys().iter().all(|key| !key.has_private_exponent()));

        let json = serde_json::to_string(&public.to_document()?)?;
        let restored = KeyRing::try_from(serde_json::from_str::<KeyRingDocument>(&json)?)?;
        assert_eq!(restored.keys(), public.keys());
        assert_eq!(restored.modulus_bit_width(), 16);
        assert_eq!(restored.hash_choice(), Some(HashChoice::Sha1));
        Ok(())
    }

    #[test]
    fn test_generated_ring_fits_domain() -> Result<(), RingSigError> {
        let ring = KeyRing::generate(2, RingParams::try_with(256, HashChoice::Sha3_256)?)?;

        assert_eq!(ring.size(), 2);
        assert!(ring.keys().iter().all(|key| key.modulus_bits() <= 256));
        assert!(ring.keys().iter().all(TrapdoorKey::has_private_exponent));

        assert!(matches!(
            KeyRing::generate(1, RingParams::try_with(256, HashChoice::Sha1)?),
            Err(RingSigError::InvalidRing(_))
        ));
        Ok(())
    }

    #[test]
    fn test_document_with_zero_modulus_is_rejected() {
        let json = r#"{
            "params": {"modulus_bits": 12, "hash": "sha1"},
            "keys": [
                {"modulus": "0", "public_exponent": "11"},
                {"modulus": "ad5", "public_exponent": "11"}
            ]
        }"#;

        assert!(matches!(
            serde_json::from_str::<KeyRingDocument>(json),
            Err(ref e) if e.to_string().contains("Modulus must be greater than 1")
        ));
    }

    #[test]
    fn test_custom_primitive_is_not_exportable() -> Result<(), RingSigError> {
        let primitive = Arc::new(crate::glue::primitive::DigestHash::<sha3::Sha3_256>::new(
            "custom",
        ));
        let ring = KeyRing::with_primitive(tiny_keys(), 12, primitive)?;

        assert_eq!(ring.hash_choice(), None);
        assert!(ring.to_document().is_err());
        Ok(())
    }
}
