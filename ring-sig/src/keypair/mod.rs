//! Ring membership: trapdoor keys, construction parameters and the key ring.

pub mod helper;
pub mod key_ring;
pub mod keys;
pub mod params;

pub use key_ring::{KeyRing, KeyRingDocument};
pub use keys::TrapdoorKey;
pub use params::{DEFAULT_MODULUS_BITS, RingParams};
