use num_bigint::BigUint;

/// Converts an integer from the `rsa` crate's bigint type into ours.
///
/// # Arguments
/// * `value` - A modulus or exponent read from an RSA key
///
/// # Returns
/// The same magnitude as a `num_bigint::BigUint`
pub fn from_rsa_uint(value: &rsa::BigUint) -> BigUint {
    BigUint::from_bytes_be(&value.to_bytes_be())
}

/// Converts one of our integers into the `rsa` crate's bigint type.
pub fn to_rsa_uint(value: &BigUint) -> rsa::BigUint {
    rsa::BigUint::from_bytes_be(&value.to_bytes_be())
}
