use crate::codec::{biguint_hex, biguint_hex_vec, pack_elements, unpack_elements};
use crate::errors::RingSigError;

use num_bigint::BigUint;

use serde::{Deserialize, Serialize};

/// A ring signature `(c, s_0 … s_{n-1})`.
///
/// Carries no reference to the ring it was made over; the verifier supplies
/// the ring separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureValue {
    #[serde(with = "biguint_hex")]
    glue_value: BigUint,
    #[serde(with = "biguint_hex_vec")]
    responses: Vec<BigUint>,
}

impl SignatureValue {
    pub fn new(glue_value: BigUint, responses: Vec<BigUint>) -> Self {
        Self {
            glue_value,
            responses,
        }
    }

    /// The published start value `c`.
    pub fn glue_value(&self) -> &BigUint {
        &self.glue_value
    }

    /// One response per ring position, in ring order.
    pub fn responses(&self) -> &[BigUint] {
        &self.responses
    }

    /// Size of the ring this signature claims to cover.
    pub fn ring_size(&self) -> usize {
        self.responses.len()
    }

    /// The flat tuple `[c, s_0, …, s_{n-1}]`.
    pub fn to_elements(&self) -> Vec<BigUint> {
        std::iter::once(self.glue_value.clone())
            .chain(self.responses.iter().cloned())
            .collect()
    }

    /// Rebuilds a signature from its flat tuple.
    ///
    /// # Errors
    ///
    /// Returns `RingSigError::MalformedSignature` if there is no response at all.
    pub fn from_elements(elements: Vec<BigUint>) -> Result<Self, RingSigError> {
        if elements.len() < 2 {
            return Err(RingSigError::MalformedSignature(format!(
                "A signature needs a glue value and at least one response, got {} elements",
                elements.len()
            )));
        }

        let mut elements = elements.into_iter();
        let glue_value = elements.next().unwrap_or_default();

        Ok(Self::new(glue_value, elements.collect()))
    }

    /// Compact base64 form, see [`crate::codec::pack_elements`].
    pub fn to_base64(&self) -> Result<String, RingSigError> {
        pack_elements(&self.to_elements())
    }

    pub fn from_base64(encoded: &str) -> Result<Self, RingSigError> {
        Self::from_elements(unpack_elements(encoded)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SignatureValue {
        SignatureValue::new(
            BigUint::from(0xdead_beefu32),
            vec![BigUint::from(1u32), BigUint::from(0u32), BigUint::from(65537u32)],
        )
    }

    #[test]
    fn test_elements_layout() -> Result<(), RingSigError> {
        let signature = sample();
        let elements = signature.to_elements();

        assert_eq!(elements.len(), 4);
        assert_eq!(elements[0], BigUint::from(0xdead_beefu32));
        assert_eq!(SignatureValue::from_elements(elements)?, signature);
        assert_eq!(signature.ring_size(), 3);
        Ok(())
    }

    #[test]
    fn test_too_few_elements() {
        assert!(matches!(
            SignatureValue::from_elements(vec![BigUint::from(1u32)]),
            Err(RingSigError::MalformedSignature(_))
        ));
        assert!(SignatureValue::from_elements(Vec::new()).is_err());
    }

    #[test]
    fn test_json_and_base64_forms() -> Result<(), RingSigError> {
        let signature = sample();

        let json = serde_json::to_string(&signature)?;
        assert_eq!(
            json,
            r#"{"glue_value":"deadbeef","responses":["1","0","10001"]}"#
        );
        assert_eq!(serde_json::from_str::<SignatureValue>(&json)?, signature);

        let compact = signature.to_base64()?;
        assert_eq!(SignatureValue::from_base64(&compact)?, signature);
        Ok(())
    }
}
