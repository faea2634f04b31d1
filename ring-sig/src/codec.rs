//! Text and binary encodings for the big integers carried by keys and signatures.

use crate::errors::RingSigError;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use num_bigint::BigUint;

// Each packed integer is preceded by its byte length.
const LENGTH_PREFIX_BYTES: usize = std::mem::size_of::<u32>();

/// Renders an integer as lower-case hexadecimal without a prefix.
///
/// # Example
///
/// ```
/// # use num_bigint::BigUint;
/// # use ring_sig::codec::biguint_to_hex;
/// assert_eq!(biguint_to_hex(&BigUint::from(3233u32)), "ca1");
/// assert_eq!(biguint_to_hex(&BigUint::from(0u32)), "0");
/// ```
pub fn biguint_to_hex(value: &BigUint) -> String {
    value.to_str_radix(16)
}

/// Parses hexadecimal text (an optional `0x` prefix is accepted).
///
/// # Errors
///
/// Returns `RingSigError::EncodingError` for empty or non-hexadecimal input.
pub fn hex_to_biguint(text: &str) -> Result<BigUint, RingSigError> {
    let digits = text.trim();
    let digits = digits.strip_prefix("0x").unwrap_or(digits);

    BigUint::parse_bytes(digits.as_bytes(), 16).ok_or_else(|| {
        RingSigError::EncodingError(format!("'{}' is not a hexadecimal integer", text))
    })
}

/// Packs integers into one base64 string: every value is written as a
/// 4-byte big-endian length followed by its big-endian magnitude.
pub fn pack_elements(values: &[BigUint]) -> Result<String, RingSigError> {
    let mut buffer = Vec::new();

    for value in values {
        let bytes = value.to_bytes_be();
        let length = u32::try_from(bytes.len()).map_err(|_| {
            RingSigError::EncodingError(format!(
                "Integer of {} bytes does not fit the length prefix",
                bytes.len()
            ))
        })?;

        buffer.extend_from_slice(&length.to_be_bytes());
        buffer.extend_from_slice(&bytes);
    }

    Ok(STANDARD.encode(buffer))
}

/// Reverses [`pack_elements`].
///
/// # Errors
///
/// Returns `RingSigError::EncodingError` if the text is not base64, and
/// `RingSigError::MalformedSignature` if the payload is truncated.
pub fn unpack_elements(encoded: &str) -> Result<Vec<BigUint>, RingSigError> {
    let buffer = STANDARD
        .decode(encoded.trim())
        .map_err(|e| RingSigError::EncodingError(format!("Base64 decoding failed: {}", e)))?;

    let mut values = Vec::new();
    let mut rest = buffer.as_slice();

    while !rest.is_empty() {
        if rest.len() < LENGTH_PREFIX_BYTES {
            return Err(RingSigError::MalformedSignature(format!(
                "Truncated length prefix after {} elements",
                values.len()
            )));
        }

        let (prefix, tail) = rest.split_at(LENGTH_PREFIX_BYTES);
        let mut length_bytes = [0u8; LENGTH_PREFIX_BYTES];
        length_bytes.copy_from_slice(prefix);
        let length = u32::from_be_bytes(length_bytes) as usize;

        if tail.len() < length {
            return Err(RingSigError::MalformedSignature(format!(
                "Element {} declares {} bytes but only {} remain",
                values.len(),
                length,
                tail.len()
            )));
        }

        let (magnitude, tail) = tail.split_at(length);
        values.push(BigUint::from_bytes_be(magnitude));
        rest = tail;
    }

    Ok(values)
}

/// Serde adapter: a `BigUint` as a hexadecimal string.
pub mod biguint_hex {
    use super::{biguint_to_hex, hex_to_biguint};

    use num_bigint::BigUint;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&biguint_to_hex(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        let text = String::deserialize(deserializer)?;
        hex_to_biguint(&text).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter: an optional `BigUint` as an optional hexadecimal string.
pub mod biguint_hex_opt {
    use super::{biguint_to_hex, hex_to_biguint};

    use num_bigint::BigUint;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<BigUint>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => serializer.serialize_some(&biguint_to_hex(value)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<BigUint>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|text| hex_to_biguint(&text).map_err(serde::de::Error::custom))
            .transpose()
    }
}

/// Serde adapter: a sequence of `BigUint` as hexadecimal strings.
pub mod biguint_hex_vec {
    use super::{biguint_to_hex, hex_to_biguint};

    use num_bigint::BigUint;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(values: &[BigUint], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(values.iter().map(biguint_to_hex))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<BigUint>, D::Error> {
        Vec::<String>::deserialize(deserializer)?
            .iter()
            .map(|text| hex_to_biguint(text).map_err(serde::de::Error::custom))
            .collect()
    }
}
