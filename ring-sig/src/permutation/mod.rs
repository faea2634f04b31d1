//! # Permutation Module
//!
//! Provides the [`Domain`] struct, which applies RSA trapdoor permutations of
//! differing moduli as permutations over one common `L`-bit domain.

pub mod domain;

pub use domain::Domain;
