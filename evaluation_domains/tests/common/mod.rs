//! Fields and reference helpers shared by the integration tests.

#![allow(dead_code, unused_imports)]

use ark_poly::{univariate::DensePolynomial, DenseUVPolynomial, Polynomial};
use rand::Rng;

pub use evaluation_domains::test_support::{F97, FBabyBear, F13};

/// Naive reference evaluation of a dense coefficient vector at `x`.
pub fn evaluate<F: ark_ff::Field>(coeffs: &[F], x: F) -> F {
    DensePolynomial::from_coefficients_slice(coeffs).evaluate(&x)
}

/// Random coefficient vector of the given length.
pub fn random_coefficients<F: ark_ff::UniformRand>(len: usize, rng: &mut impl Rng) -> Vec<F> {
    (0..len).map(|_| F::rand(rng)).collect()
}
