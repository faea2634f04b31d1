#[derive(thiserror::Error, Debug)]
pub enum RingSigError {
    /// Ring rejected at construction: fewer than two keys, or a modulus wider than the domain.
    #[error("InvalidRing: {0}")]
    InvalidRing(String),
    /// A signer or key index outside `[0, size)`.
    #[error("IndexOutOfRange: index {index} is not in a ring of size {size}")]
    IndexOutOfRange { index: usize, size: usize },
    /// The key has no private exponent, so its permutation cannot be inverted.
    #[error("MissingPrivateExponent: key carries only public components")]
    MissingPrivateExponent,
    /// The signature does not have the shape the ring expects.
    #[error("MalformedSignature: {0}")]
    MalformedSignature(String),

    #[error("InvalidParameters: {0}")]
    InvalidParameters(String),

    #[error("Key generation: {0}")]
    KeyGeneration(#[from] rsa::Error),

    #[error("Data serialization: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("EncodingError: {0}")]
    EncodingError(String),
}
