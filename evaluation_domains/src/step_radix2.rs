//! Evaluation domain for sizes that split into two powers of two.
//!
//! A size `m = big_m + small_m` (both parts powers of two, `big_m` the
//! largest power of two below `m`) is covered by gluing two radix-2
//! sub-domains: the `big_m`-th roots of unity, and the `small_m`-th roots
//! scaled by `omega`, a primitive `2·big_m`-th root. On the first point set
//! `x^big_m = 1`, on the second `x^big_m = -1`; that sign is what lets both
//! halves be reached from one coefficient vector with a single fold.
//!
//! The transforms index their output as the concatenation of the two
//! sub-domains — big-domain results first, then small — not as a merged
//! root ordering.

use ark_ff::{batch_inversion, FftField};
use domain_utils::math::ceil_log2;
use rayon::prelude::*;

use crate::{
    domain::{ensure_len, EvaluationDomain},
    error::{DomainError, Result},
    radix2::{self, Radix2Domain},
};

/// A domain glued from a dominant power-of-two sub-domain and a scaled
/// remainder sub-domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepRadix2Domain<F: FftField> {
    /// The size `m = big_m + small_m`.
    pub size: usize,
    /// A primitive `2·big_m`-th root of unity; scales the small sub-domain
    /// off the big one.
    pub omega: F,
    /// Inverse of [Self::omega].
    pub omega_inv: F,
    /// Sub-domain over the largest power of two below `m`.
    pub big: Radix2Domain<F>,
    /// Sub-domain over the remaining `m - big_m` points.
    pub small: Radix2Domain<F>,
}

impl<F: FftField> StepRadix2Domain<F> {
    /// Create a domain with `size` points. The remainder
    /// `size - 2^(ceil_log2(size) - 1)` must itself be a power of two,
    /// since it runs a radix-2 transform of its own.
    pub fn new(size: usize) -> Result<Self> {
        if size <= 1 {
            return Err(DomainError::InvalidConfiguration(
                "step radix-2 domains need at least two points",
            ));
        }
        let big_m = 1usize << (ceil_log2(size) - 1);
        let small_m = size - big_m;
        if !small_m.is_power_of_two() {
            return Err(DomainError::InvalidConfiguration(
                "the remainder of a step radix-2 domain must be a power of two",
            ));
        }
        let omega = F::get_root_of_unity(2 * big_m as u64).ok_or(
            DomainError::InvalidConfiguration(
                "the field has no root of unity of the requested order",
            ),
        )?;
        let omega_inv = omega.inverse().ok_or(DomainError::DivisionByZero)?;
        let big = Radix2Domain::new(big_m)?;
        let small = Radix2Domain::new(small_m)?;
        Ok(StepRadix2Domain {
            size,
            omega,
            omega_inv,
            big,
            small,
        })
    }
}

impl<F: FftField> EvaluationDomain<F> for StepRadix2Domain<F> {
    fn size(&self) -> usize {
        self.size
    }

    fn fft(&self, a: &mut [F]) -> Result<()> {
        ensure_len(self.size, a.len())?;
        let big_m = self.big.size;
        let small_m = self.small.size;

        // Fold onto the big sub-domain. On its points x^big_m = 1, so the
        // high coefficients wrap with sign +1 (the sums c); on the scaled
        // points x^big_m = -1, they wrap with sign -1 (the differences,
        // pre-scaled by ω^i to absorb the coset shift).
        let mut sums = vec![F::zero(); big_m];
        let mut diffs = vec![F::zero(); big_m];
        let mut omega_i = F::one();
        for i in 0..big_m {
            if i < small_m {
                sums[i] = a[i] + a[i + big_m];
                diffs[i] = omega_i * (a[i] - a[i + big_m]);
            } else {
                sums[i] = a[i];
                diffs[i] = omega_i * a[i];
            }
            omega_i *= self.omega;
        }

        // The scaled residue only needs small_m points: compress it by
        // wrapping indices modulo small_m (small_m divides big_m).
        let compression = big_m / small_m;
        let mut residue = vec![F::zero(); small_m];
        for i in 0..small_m {
            for j in 0..compression {
                residue[i] += diffs[i + j * small_m];
            }
        }

        self.big.fft(&mut sums)?;
        self.small.fft(&mut residue)?;

        a[..big_m].copy_from_slice(&sums);
        a[big_m..].copy_from_slice(&residue);
        Ok(())
    }

    fn ifft(&self, a: &mut [F]) -> Result<()> {
        ensure_len(self.size, a.len())?;
        let big_m = self.big.size;
        let small_m = self.small.size;

        let mut sums = a[..big_m].to_vec();
        let mut residue = a[big_m..].to_vec();
        self.big.ifft(&mut sums)?;
        self.small.ifft(&mut residue)?;

        // residue[i] currently holds Σ_j ω^(i+j·small_m) · d_(i+j·small_m),
        // where d is the pre-compression difference vector. Every term with
        // index at or beyond small_m equals the matching sum coefficient;
        // peeling those off isolates ω^i · d_i.
        let mut shifted = sums.clone();
        let mut omega_i = F::one();
        for s in shifted.iter_mut() {
            *s *= omega_i;
            omega_i *= self.omega;
        }
        let compression = big_m / small_m;
        for i in 0..small_m {
            for j in 1..compression {
                residue[i] -= shifted[i + j * small_m];
            }
        }
        let mut omega_inv_i = F::one();
        for r in residue.iter_mut() {
            *r *= omega_inv_i;
            omega_inv_i *= self.omega_inv;
        }

        // For i < small_m: sums[i] = a_i + a_(i+big_m) and
        // residue[i] = a_i - a_(i+big_m); un-mix the pair.
        let over_two = F::from(2u64)
            .inverse()
            .ok_or(DomainError::DivisionByZero)?;
        for i in 0..small_m {
            a[i] = (sums[i] + residue[i]) * over_two;
            a[i + big_m] = (sums[i] - residue[i]) * over_two;
        }
        a[small_m..big_m].copy_from_slice(&sums[small_m..]);
        Ok(())
    }

    fn coset_fft(&self, a: &mut [F], g: &F) -> Result<()> {
        ensure_len(self.size, a.len())?;
        radix2::multiply_by_coset(a, *g);
        self.fft(a)
    }

    fn coset_ifft(&self, a: &mut [F], g: &F) -> Result<()> {
        self.ifft(a)?;
        let g_inv = g.inverse().ok_or(DomainError::DivisionByZero)?;
        radix2::multiply_by_coset(a, g_inv);
        Ok(())
    }

    fn element(&self, idx: usize) -> F {
        if idx < self.big.size {
            self.big.omega.pow([idx as u64])
        } else {
            self.omega * self.small.omega.pow([(idx - self.big.size) as u64])
        }
    }

    fn evaluate_all_lagrange_coefficients(&self, t: F) -> Vec<F> {
        let big_m = self.big.size;
        let small_m = self.small.size;

        // Lagrange coefficients of each sub-domain on its own, then rescale
        // by the part of the full vanishing polynomial the sub-domain does
        // not see.
        let inner_big = radix2::lagrange_coefficients(big_m, self.big.size_inv, self.big.omega, t);
        let inner_small = radix2::lagrange_coefficients(
            small_m,
            self.small.size_inv,
            self.small.omega,
            t * self.omega_inv,
        );

        let omega_to_small_m = self.omega.pow([small_m as u64]);
        let big_omega_to_small_m = self.big.omega.pow([small_m as u64]);

        // Big block: multiply by Z_small(t) / Z_small(element_i), where
        // Z_small(x) = x^small_m - ω^small_m.
        let z_small_at_t = t.pow([small_m as u64]) - omega_to_small_m;
        let mut denominators = Vec::with_capacity(big_m + 1);
        let mut elt = F::one();
        for _ in 0..big_m {
            denominators.push(elt - omega_to_small_m);
            elt *= big_omega_to_small_m;
        }
        // Small block: Z_big(x) = x^big_m - 1 is the constant ω^big_m - 1
        // across the whole scaled sub-domain.
        denominators.push(self.omega.pow([big_m as u64]) - F::one());
        batch_inversion(&mut denominators);
        let (big_denominators, small_denominator) = denominators.split_at(big_m);

        let z_big_at_t = t.pow([big_m as u64]) - F::one();
        let small_scale = z_big_at_t * small_denominator[0];

        let mut result = Vec::with_capacity(self.size);
        for (li, d) in inner_big.into_iter().zip(big_denominators) {
            result.push(li * z_small_at_t * d);
        }
        for li in inner_small {
            result.push(li * small_scale);
        }
        result
    }

    fn evaluate_vanishing_polynomial(&self, t: F) -> F {
        let z_big = t.pow([self.big.size as u64]) - F::one();
        let z_small =
            t.pow([self.small.size as u64]) - self.omega.pow([self.small.size as u64]);
        z_big * z_small
    }

    fn add_vanishing_polynomial(&self, coeff: F, h: &mut [F]) -> Result<()> {
        ensure_len(self.size + 1, h.len())?;
        // Z(x) = (x^big_m - 1)(x^small_m - ω^small_m)
        //      = x^m - ω^small_m·x^big_m - x^small_m + ω^small_m
        let omega_to_small_m = self.omega.pow([self.small.size as u64]);
        h[self.size] += coeff;
        h[self.big.size] -= coeff * omega_to_small_m;
        h[self.small.size] -= coeff;
        h[0] += coeff * omega_to_small_m;
        Ok(())
    }

    fn divide_by_vanishing_polynomial_on_coset(&self, p: &mut [F], g: &F) -> Result<()> {
        ensure_len(self.size, p.len())?;
        let big_m = self.big.size;
        let small_m = self.small.size;
        let omega_to_small_m = self.omega.pow([small_m as u64]);

        // Big block: Z(g·ω_big^i) has a constant first factor g^big_m - 1
        // and a per-index second factor g^small_m·ω_big^(i·small_m) - ω^small_m.
        let z_big_factor = g.pow([big_m as u64]) - F::one();
        let g_to_small_m = g.pow([small_m as u64]);
        let big_omega_to_small_m = self.big.omega.pow([small_m as u64]);
        let mut denominators = Vec::with_capacity(big_m + 1);
        let mut elt = F::one();
        for _ in 0..big_m {
            denominators.push(z_big_factor * (g_to_small_m * elt - omega_to_small_m));
            elt *= big_omega_to_small_m;
        }
        // Small block: both factors of Z(g·ω·ω_small^i) are constant.
        let shifted = *g * self.omega;
        denominators.push(
            (shifted.pow([big_m as u64]) - F::one())
                * (shifted.pow([small_m as u64]) - omega_to_small_m),
        );
        if denominators.iter().any(|d| d.is_zero()) {
            return Err(DomainError::DivisionByZero);
        }
        batch_inversion(&mut denominators);
        let (big_inverses, small_inverse) = denominators.split_at(big_m);
        let small_inverse = small_inverse[0];

        let (p_big, p_small) = p.split_at_mut(big_m);
        p_big
            .par_iter_mut()
            .zip(big_inverses.par_iter())
            .for_each(|(pi, zi)| *pi *= *zi);
        p_small.par_iter_mut().for_each(|pi| *pi *= small_inverse);
        Ok(())
    }
}
