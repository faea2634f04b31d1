//! Pluggable hash primitives behind the glue function and the message key.

use crate::errors::RingSigError;

use digest::Digest;

use serde::{Deserialize, Serialize};

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use std::sync::Arc;

/// A hash function `bytes -> fixed-length digest`.
///
/// The ring protocol only ever sees this trait, so a new digest is added by
/// implementing it (or wrapping a RustCrypto hasher in [`DigestHash`]).
pub trait HashPrimitive: fmt::Debug + Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    fn digest(&self, data: &[u8]) -> Vec<u8>;

    /// Width of the digest in bits.
    fn output_bits(&self) -> usize {
        self.digest(&[]).len() * 8
    }
}

/// Adapts any [`digest::Digest`] implementation to [`HashPrimitive`].
pub struct DigestHash<D> {
    name: &'static str,
    _digest: PhantomData<fn() -> D>,
}

impl<D> DigestHash<D> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _digest: PhantomData,
        }
    }
}

impl<D> fmt::Debug for DigestHash<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigestHash").field("name", &self.name).finish()
    }
}

impl<D: Digest> HashPrimitive for DigestHash<D> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn digest(&self, data: &[u8]) -> Vec<u8> {
        D::digest(data).to_vec()
    }
}

/// The built-in primitives selectable from configuration.
#[derive(Default, Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum HashChoice {
    #[serde(rename = "sha1")]
    Sha1,
    #[default]
    #[serde(rename = "sha3_256")]
    Sha3_256,
}

impl HashChoice {
    pub const ALL: [HashChoice; 2] = [HashChoice::Sha1, HashChoice::Sha3_256];

    /// Builds the strategy object injected into a [`crate::KeyRing`].
    pub fn primitive(self) -> Arc<dyn HashPrimitive> {
        match self {
            HashChoice::Sha1 => Arc::new(DigestHash::<sha1::Sha1>::new(self.as_str())),
            HashChoice::Sha3_256 => Arc::new(DigestHash::<sha3::Sha3_256>::new(self.as_str())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HashChoice::Sha1 => "sha1",
            HashChoice::Sha3_256 => "sha3_256",
        }
    }
}

impl fmt::Display for HashChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashChoice {
    type Err = RingSigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha1" | "sha-1" => Ok(HashChoice::Sha1),
            "sha3_256" | "sha3-256" => Ok(HashChoice::Sha3_256),
            other => Err(RingSigError::InvalidParameters(format!(
                "Unknown hash primitive '{}', expected sha1 or sha3_256",
                other
            ))),
        }
    }
}
