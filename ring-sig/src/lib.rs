//! # RST ring signatures
//!
//! A signer holding one private trapdoor key out of a ring of `n` public
//! keys produces a signature `(c, s_0 … s_{n-1})` that verifies against the
//! whole ring without revealing which member signed.

pub mod codec;
pub mod errors;
pub mod glue;
pub mod keypair;
pub mod permutation;
pub mod signature;

pub use errors::RingSigError;
pub use glue::{GlueHash, MessageKey};
pub use glue::primitive::{DigestHash, HashChoice, HashPrimitive};
pub use keypair::{KeyRing, KeyRingDocument, RingParams, TrapdoorKey};
pub use permutation::Domain;
pub use signature::{NonceSource, RngNonces, ScriptedNonces, SignatureValue};
