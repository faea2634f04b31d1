//! # Glue Module
//!
//! The keyed combining function `E` that links consecutive ring positions,
//! and the [`MessageKey`] that binds it to one message.

pub mod primitive;

use primitive::HashPrimitive;

use num_bigint::BigUint;

/// The integer `p` derived from a single message.
///
/// Recomputed at the top of every sign and verify call, never cached
/// across messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageKey(BigUint);

impl MessageKey {
    /// Hashes the message bytes and reads the digest as a big-endian integer.
    ///
    /// # Example
    ///
    /// ```
    /// # use ring_sig::{HashChoice, MessageKey};
    /// # use ring_sig::codec::biguint_to_hex;
    /// let key = MessageKey::derive(b"hello", HashChoice::Sha1.primitive().as_ref());
    /// assert_eq!(biguint_to_hex(key.value()), "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d");
    /// ```
    pub fn derive(message: &[u8], primitive: &dyn HashPrimitive) -> Self {
        Self(BigUint::from_bytes_be(&primitive.digest(message)))
    }

    pub fn value(&self) -> &BigUint {
        &self.0
    }
}

/// `E(x) = H(decimal(x) || decimal(p))`, read back as an integer.
pub fn glue(x: &BigUint, key: &MessageKey, primitive: &dyn HashPrimitive) -> BigUint {
    let rendered = format!("{}{}", x, key.0);
    BigUint::from_bytes_be(&primitive.digest(rendered.as_bytes()))
}

/// The glue function with its message key already derived.
#[derive(Debug)]
pub struct GlueHash<'a> {
    primitive: &'a dyn HashPrimitive,
    key: MessageKey,
}

impl<'a> GlueHash<'a> {
    pub fn for_message(message: &[u8], primitive: &'a dyn HashPrimitive) -> Self {
        let key = MessageKey::derive(message, primitive);
        log::trace!("derived message key with {}", primitive.name());

        Self { primitive, key }
    }

    pub fn combine(&self, x: &BigUint) -> BigUint {
        glue(x, &self.key, self.primitive)
    }
}
