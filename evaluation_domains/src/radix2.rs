//! Evaluation domain over the `2^k`-th roots of unity.

use ark_ff::{batch_inversion, FftField};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::{
    domain::{ensure_len, EvaluationDomain},
    error::{DomainError, Result},
};

/// The classic radix-2 domain: `size` is a power of two, the evaluation
/// points are the powers of a primitive `size`-th root of unity `omega`
/// (in order `1, ω, ω², …`), and the transforms run an iterative
/// Cooley–Tukey butterfly with bit-reversal reordering.
#[serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Radix2Domain<F: FftField> {
    /// The size `m` of the domain.
    pub size: usize,
    /// `log2(size)`.
    pub log_size: u32,
    /// A primitive `size`-th root of unity.
    #[serde_as(as = "domain_utils::serialization::SerdeAs")]
    pub omega: F,
    /// Inverse of [Self::omega].
    #[serde_as(as = "domain_utils::serialization::SerdeAs")]
    pub omega_inv: F,
    /// Inverse of the size as a field element.
    #[serde_as(as = "domain_utils::serialization::SerdeAs")]
    pub size_inv: F,
}

impl<F: FftField> Radix2Domain<F> {
    /// Create a domain with the given power-of-two number of points.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 || !size.is_power_of_two() {
            return Err(DomainError::InvalidConfiguration(
                "radix-2 domains must have a power-of-two size",
            ));
        }
        let log_size = size.trailing_zeros();
        let omega = F::get_root_of_unity(size as u64).ok_or(DomainError::InvalidConfiguration(
            "the field has no root of unity of the requested order",
        ))?;
        let omega_inv = omega.inverse().ok_or(DomainError::DivisionByZero)?;
        let size_inv = F::from(size as u64)
            .inverse()
            .ok_or(DomainError::DivisionByZero)?;
        Ok(Radix2Domain {
            size,
            log_size,
            omega,
            omega_inv,
            size_inv,
        })
    }
}

impl<F: FftField> EvaluationDomain<F> for Radix2Domain<F> {
    fn size(&self) -> usize {
        self.size
    }

    fn fft(&self, a: &mut [F]) -> Result<()> {
        ensure_len(self.size, a.len())?;
        fft_in_place(a, self.omega, self.log_size);
        Ok(())
    }

    fn ifft(&self, a: &mut [F]) -> Result<()> {
        ensure_len(self.size, a.len())?;
        fft_in_place(a, self.omega_inv, self.log_size);
        for ai in a.iter_mut() {
            *ai *= self.size_inv;
        }
        Ok(())
    }

    fn coset_fft(&self, a: &mut [F], g: &F) -> Result<()> {
        ensure_len(self.size, a.len())?;
        multiply_by_coset(a, *g);
        self.fft(a)
    }

    fn coset_ifft(&self, a: &mut [F], g: &F) -> Result<()> {
        self.ifft(a)?;
        let g_inv = g.inverse().ok_or(DomainError::DivisionByZero)?;
        multiply_by_coset(a, g_inv);
        Ok(())
    }

    fn element(&self, idx: usize) -> F {
        self.omega.pow([idx as u64])
    }

    fn evaluate_all_lagrange_coefficients(&self, t: F) -> Vec<F> {
        lagrange_coefficients(self.size, self.size_inv, self.omega, t)
    }

    fn evaluate_vanishing_polynomial(&self, t: F) -> F {
        t.pow([self.size as u64]) - F::one()
    }

    fn add_vanishing_polynomial(&self, coeff: F, h: &mut [F]) -> Result<()> {
        ensure_len(self.size + 1, h.len())?;
        // Z(x) = x^m - 1
        h[self.size] += coeff;
        h[0] -= coeff;
        Ok(())
    }

    fn divide_by_vanishing_polynomial_on_coset(&self, p: &mut [F], g: &F) -> Result<()> {
        ensure_len(self.size, p.len())?;
        // On the coset g·H the vanishing polynomial is the constant g^m - 1.
        let z = self.evaluate_vanishing_polynomial(*g);
        let z_inv = z.inverse().ok_or(DomainError::DivisionByZero)?;
        p.par_iter_mut().for_each(|pi| *pi *= z_inv);
        Ok(())
    }
}

/// Iterative Cooley–Tukey over `a.len() == 2^log_size` entries: bit-reversal
/// reordering, then `log_size` rounds of butterflies.
pub(crate) fn fft_in_place<F: FftField>(a: &mut [F], omega: F, log_size: u32) {
    let n = a.len();
    debug_assert_eq!(n, 1 << log_size);

    for k in 0..n {
        let rk = bitreverse(k as u64, log_size) as usize;
        if k < rk {
            a.swap(k, rk);
        }
    }

    let mut m = 1;
    for _ in 0..log_size {
        let w_m = omega.pow([(n / (2 * m)) as u64]);
        for k in (0..n).step_by(2 * m) {
            let mut w = F::one();
            for j in 0..m {
                let t = w * a[k + j + m];
                a[k + j + m] = a[k + j] - t;
                a[k + j] += t;
                w *= w_m;
            }
        }
        m *= 2;
    }
}

/// Scale coefficient `i` by `g^i`, turning `p(x)` into `p(g·x)`.
pub(crate) fn multiply_by_coset<F: FftField>(a: &mut [F], g: F) {
    let mut shift = g;
    for ai in a.iter_mut().skip(1) {
        *ai *= shift;
        shift *= g;
    }
}

/// Lagrange coefficients of the `m`-th roots-of-unity domain at `t`:
/// `L_i(t) = ω^i (t^m - 1) / (m (t - ω^i))`, with the indicator shortcut
/// when `t` lands on the domain (the general formula would divide by zero
/// there). Shared with the step domain, which calls it on its two halves.
pub(crate) fn lagrange_coefficients<F: FftField>(m: usize, size_inv: F, omega: F, t: F) -> Vec<F> {
    if m == 1 {
        return vec![F::one()];
    }

    if t.pow([m as u64]).is_one() {
        let mut u = vec![F::zero(); m];
        let mut omega_i = F::one();
        for ui in u.iter_mut() {
            if omega_i == t {
                *ui = F::one();
                return u;
            }
            omega_i *= omega;
        }
        unreachable!("a primitive root generates every m-th root of unity");
    }

    let z = t.pow([m as u64]) - F::one();
    let mut denominators = Vec::with_capacity(m);
    let mut r = F::one();
    for _ in 0..m {
        denominators.push(t - r);
        r *= omega;
    }
    batch_inversion(&mut denominators);

    let mut l = z * size_inv;
    let mut u = Vec::with_capacity(m);
    for d in denominators {
        u.push(l * d);
        l *= omega;
    }
    u
}

fn bitreverse(mut n: u64, l: u32) -> u64 {
    let mut r = 0;
    for _ in 0..l {
        r = (r << 1) | (n & 1);
        n >>= 1;
    }
    r
}
