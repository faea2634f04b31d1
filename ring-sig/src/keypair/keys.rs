use crate::codec::{biguint_hex, biguint_hex_opt};
use crate::errors::RingSigError;
use crate::keypair::helper::{from_rsa_uint, to_rsa_uint};

use num_bigint::BigUint;
use num_traits::{One, Zero};

use rsa::rand_core::CryptoRngCore;
use rsa::traits::{PrivateKeyParts, PublicKeyParts};
use rsa::{RsaPrivateKey, RsaPublicKey};

use serde::{Deserialize, Serialize};

/// One ring member's trapdoor permutation: an RSA modulus with its public
/// exponent and, for the signer's own slot, the private exponent.
///
/// Deserialisation goes through [`TrapdoorKey::try_public`] and
/// [`TrapdoorKey::try_private`], so a loaded key is validated like a
/// constructed one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTrapdoorKey")]
pub struct TrapdoorKey {
    #[serde(with = "biguint_hex")]
    modulus: BigUint,
    #[serde(with = "biguint_hex")]
    public_exponent: BigUint,
    #[serde(
        default,
        with = "biguint_hex_opt",
        skip_serializing_if = "Option::is_none"
    )]
    private_exponent: Option<BigUint>,
}

#[derive(Deserialize)]
struct RawTrapdoorKey {
    #[serde(with = "biguint_hex")]
    modulus: BigUint,
    #[serde(with = "biguint_hex")]
    public_exponent: BigUint,
    #[serde(default, with = "biguint_hex_opt")]
    private_exponent: Option<BigUint>,
}

impl TryFrom<RawTrapdoorKey> for TrapdoorKey {
    type Error = RingSigError;

    fn try_from(raw: RawTrapdoorKey) -> Result<Self, Self::Error> {
        match raw.private_exponent {
            Some(d) => Self::try_private(raw.modulus, raw.public_exponent, d),
            None => Self::try_public(raw.modulus, raw.public_exponent),
        }
    }
}

impl TrapdoorKey {
    /// Creates a verifier-side key from `(n, e)`.
    ///
    /// # Errors
    ///
    /// Returns `RingSigError::InvalidParameters` if the modulus is not greater
    /// than 1 or the exponent is zero.
    pub fn try_public(modulus: BigUint, public_exponent: BigUint) -> Result<Self, RingSigError> {
        if modulus <= BigUint::one() {
            return Err(RingSigError::InvalidParameters(format!(
                "Modulus must be greater than 1, got {}",
                modulus
            )));
        }
        if public_exponent.is_zero() {
            return Err(RingSigError::InvalidParameters(
                "Public exponent must be > 0".to_string(),
            ));
        }

        Ok(Self {
            modulus,
            public_exponent,
            private_exponent: None,
        })
    }

    /// Creates a signer-side key from `(n, e, d)`.
    ///
    /// The exponents are expected to satisfy `e·d ≡ 1 (mod φ(n))`; this is the
    /// key supplier's responsibility and is not re-checked here.
    pub fn try_private(
        modulus: BigUint,
        public_exponent: BigUint,
        private_exponent: BigUint,
    ) -> Result<Self, RingSigError> {
        if private_exponent.is_zero() {
            return Err(RingSigError::InvalidParameters(
                "Private exponent must be > 0".to_string(),
            ));
        }

        let mut key = Self::try_public(modulus, public_exponent)?;
        key.private_exponent = Some(private_exponent);
        Ok(key)
    }

    /// Generates a fresh RSA key pair of `bits` modulus bits.
    pub fn generate<R: CryptoRngCore + ?Sized>(
        rng: &mut R,
        bits: usize,
    ) -> Result<Self, RingSigError> {
        let private_key = RsaPrivateKey::new(rng, bits)?;
        log::debug!("generated {}-bit trapdoor key", bits);

        Ok(Self::from(&private_key))
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    pub fn public_exponent(&self) -> &BigUint {
        &self.public_exponent
    }

    pub fn private_exponent(&self) -> Option<&BigUint> {
        self.private_exponent.as_ref()
    }

    pub fn has_private_exponent(&self) -> bool {
        self.private_exponent.is_some()
    }

    /// Bit length of the modulus.
    pub fn modulus_bits(&self) -> u64 {
        self.modulus.bits()
    }

    /// Returns a copy without the private exponent.
    pub fn public_part(&self) -> Self {
        Self {
            modulus: self.modulus.clone(),
            public_exponent: self.public_exponent.clone(),
            private_exponent: None,
        }
    }

    /// Rebuilds the `rsa` crate's public key, which also runs its sanity checks.
    pub fn to_rsa_public_key(&self) -> Result<RsaPublicKey, RingSigError> {
        Ok(RsaPublicKey::new(
            to_rsa_uint(&self.modulus),
            to_rsa_uint(&self.public_exponent),
        )?)
    }
}

impl From<&RsaPublicKey> for TrapdoorKey {
    fn from(key: &RsaPublicKey) -> Self {
        Self {
            modulus: from_rsa_uint(key.n()),
            public_exponent: from_rsa_uint(key.e()),
            private_exponent: None,
        }
    }
}

impl From<&RsaPrivateKey> for TrapdoorKey {
    fn from(key: &RsaPrivateKey) -> Self {
        Self {
            modulus: from_rsa_uint(key.n()),
            public_exponent: from_rsa_uint(key.e()),
            private_exponent: Some(from_rsa_uint(key.d())),
        }
    }
}
