//! Dense polynomial arithmetic over raw coefficient vectors.
//!
//! Polynomials are dense little-endian coefficient slices: `a[i]` is the
//! coefficient of `x^i`. Multiplication is the quadratic schoolbook
//! product — the subproduct tree splits its work into many small products,
//! and staying naive keeps the engine usable over fields whose two-adic
//! subgroup is too small to host an FFT of the product size.

use ark_ff::Field;

/// Multiply two dense coefficient vectors.
///
/// The product has length `a.len() + b.len() - 1`, or is empty when either
/// input is. Callers truncate when they only need the low-order terms.
pub fn polynomial_multiplication<F: Field>(a: &[F], b: &[F]) -> Vec<F> {
    if a.is_empty() || b.is_empty() {
        return vec![];
    }
    let mut product = vec![F::zero(); a.len() + b.len() - 1];
    for (i, ai) in a.iter().enumerate() {
        if ai.is_zero() {
            continue;
        }
        for (j, bj) in b.iter().enumerate() {
            product[i + j] += *ai * bj;
        }
    }
    product
}

/// Divide `p` by the monic polynomial `d`, returning `(quotient, remainder)`.
///
/// The remainder has at most `d.len() - 1` coefficients. `d` must be monic
/// and of degree at least one.
pub fn divide_by_monic<F: Field>(p: &[F], d: &[F]) -> (Vec<F>, Vec<F>) {
    let divisor_degree = d.len() - 1;
    debug_assert!(divisor_degree >= 1);
    debug_assert!(d[divisor_degree].is_one());

    if p.len() <= divisor_degree {
        return (vec![], p.to_vec());
    }

    let mut remainder = p.to_vec();
    let mut quotient = vec![F::zero(); p.len() - divisor_degree];
    for k in (0..quotient.len()).rev() {
        let leading = remainder[k + divisor_degree];
        if leading.is_zero() {
            continue;
        }
        quotient[k] = leading;
        for (j, dj) in d[..divisor_degree].iter().enumerate() {
            remainder[k + j] -= leading * dj;
        }
    }
    remainder.truncate(divisor_degree);
    (quotient, remainder)
}
