//! Evaluation domain over an arithmetic progression.
//!
//! This is the fallback for sizes no radix-2 strategy covers: the `m`
//! evaluation points are `0, g, 2g, …` for a designated non-zero generator
//! `g`. The transforms route through the Newton basis relative to those
//! points — a subproduct tree handles monomial ↔ Newton, and a single dense
//! convolution with a factorial scaling vector handles Newton ↔ evaluation.
//! More general than the radix-2 domains, at an `O(m log² m)` rather than
//! `O(m log m)` multiplication budget.

use ark_ff::{batch_inversion, FftField};
use log::debug;
use rayon::prelude::*;

use domain_utils::{math::ceil_log2, LazyCache};

use crate::{
    domain::{ensure_len, EvaluationDomain},
    error::{DomainError, Result},
    polynomial_arithmetic::polynomial_multiplication,
    radix2,
    subproduct_tree::SubproductTree,
};

/// Fields usable with [ArithmeticSequenceDomain].
///
/// The domain places its points on the progression `0, g, 2g, …` where `g`
/// is the field's designated arithmetic generator. Any non-zero element
/// works; the default is the multiplicative generator the field already
/// distinguishes.
pub trait ArithmeticSequenceField: FftField {
    /// The increment of the arithmetic progression. Must not be zero.
    fn arithmetic_generator() -> Self {
        Self::GENERATOR
    }
}

/// Tables derived from the size and generator, built once on first use.
#[derive(Debug)]
struct Precomputations<F: FftField> {
    /// `sequence[i] = generator · i`.
    sequence: Vec<F>,
    /// Subproduct tree over the progression, padded to the next power of
    /// two (the progression extends past `m` naturally, and divided
    /// differences beyond the polynomial degree vanish, so the padding is
    /// exact).
    tree: SubproductTree<F>,
}

/// Evaluation domain over the points `generator · i` for `i in [0, m)`.
///
/// The instance is immutable configuration plus a lazily-built table cache;
/// it is built per use-site and owns its tables exclusively.
#[derive(Debug)]
pub struct ArithmeticSequenceDomain<F: ArithmeticSequenceField> {
    /// The size `m` of the domain.
    pub size: usize,
    /// The progression increment.
    pub generator: F,
    precomputations: LazyCache<Precomputations<F>>,
}

impl<F: ArithmeticSequenceField> ArithmeticSequenceDomain<F> {
    /// Create a domain with `size > 1` points.
    ///
    /// The size must stay below the field characteristic: past it the
    /// progression wraps and the evaluation points collide.
    pub fn new(size: usize) -> Result<Self> {
        if size <= 1 {
            return Err(DomainError::InvalidConfiguration(
                "arithmetic-sequence domains need at least two points",
            ));
        }
        let generator = F::arithmetic_generator();
        if generator.is_zero() {
            return Err(DomainError::InvalidConfiguration(
                "the arithmetic generator must not be zero",
            ));
        }
        if !below_characteristic::<F>(size) {
            return Err(DomainError::InvalidConfiguration(
                "the domain size must be smaller than the field characteristic",
            ));
        }
        let precomputations = LazyCache::new(move || {
            let padded = 1usize << ceil_log2(size);
            let points: Vec<F> = (0..padded as u64).map(|i| generator * F::from(i)).collect();
            let tree = SubproductTree::build(&points);
            let mut sequence = points;
            sequence.truncate(size);
            debug!("arithmetic-sequence domain of size {size}: tables built");
            Precomputations { sequence, tree }
        });
        Ok(ArithmeticSequenceDomain {
            size,
            generator,
            precomputations,
        })
    }

    /// Running products `i! · gⁱ` and their inverses. The products undo the
    /// per-index scaling the convolution introduces; the inverses are the
    /// convolution kernel itself.
    fn scaling_vectors(&self) -> (Vec<F>, Vec<F>) {
        let mut products = vec![F::one(); self.size];
        let mut acc = F::one();
        for i in 1..self.size {
            acc *= self.generator * F::from(i as u64);
            products[i] = acc;
        }
        let mut inverses = products.clone();
        batch_inversion(&mut inverses);
        (products, inverses)
    }
}

impl<F: ArithmeticSequenceField> EvaluationDomain<F> for ArithmeticSequenceDomain<F> {
    fn size(&self) -> usize {
        self.size
    }

    fn fft(&self, a: &mut [F]) -> Result<()> {
        ensure_len(self.size, a.len())?;
        let tables = self.precomputations.get();

        tables.tree.monomial_to_newton_basis(a);

        // Newton to evaluation: p(g·i) = Σ_j c_j gʲ i!/(i-j)!, which is the
        // convolution of the Newton coefficients with S[i] = (i!·gⁱ)⁻¹,
        // re-scaled index-wise by (i!·gⁱ).
        let (products, inverses) = self.scaling_vectors();
        let mut convolved = polynomial_multiplication(a, &inverses);
        convolved.truncate(self.size);

        a.par_iter_mut()
            .zip(convolved.par_iter())
            .zip(products.par_iter())
            .for_each(|((ai, ci), scale)| *ai = *ci * scale);
        Ok(())
    }

    fn ifft(&self, a: &mut [F]) -> Result<()> {
        ensure_len(self.size, a.len())?;
        let tables = self.precomputations.get();

        // Evaluation to Newton. The weighted values pair with S before the
        // sign alternation; the alternated S is the inverse
        // finite-difference kernel, and the order of these two steps
        // matters.
        let (_, mut kernel) = self.scaling_vectors();
        let weighted: Vec<F> = a.iter().zip(&kernel).map(|(ai, si)| *ai * si).collect();
        for si in kernel.iter_mut().skip(1).step_by(2) {
            *si = -*si;
        }
        let mut newton = polynomial_multiplication(&weighted, &kernel);
        newton.truncate(self.size);
        a.copy_from_slice(&newton);

        tables.tree.newton_to_monomial_basis(a);
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
        self.precomputations.get().sequence[idx]
    }

    fn evaluate_all_lagrange_coefficients(&self, t: F) -> Vec<F> {
        let tables = self.precomputations.get();
        let sequence = &tables.sequence;
        let m = self.size;

        // If t lands on the progression, the answer is the indicator
        // vector; the general formula below would divide by zero.
        for (i, a_i) in sequence.iter().enumerate() {
            if *a_i == t {
                let mut res = vec![F::zero(); m];
                res[i] = F::one();
                return res;
            }
        }

        let shifts: Vec<F> = sequence.iter().map(|a_i| t - a_i).collect();
        let l_vanish: F = shifts.iter().product();
        let g_vanish: F = sequence.iter().skip(1).map(|a_i| -*a_i).product();

        // One batch inversion covers every denominator: the shifts, the
        // sequence entries the weight recurrence divides by, and g_vanish.
        let mut denominators = shifts.clone();
        denominators.extend_from_slice(&sequence[1..]);
        denominators.push(g_vanish);
        batch_inversion(&mut denominators);
        let (shift_inverses, rest) = denominators.split_at(m);
        let (sequence_inverses, g_vanish_inverse) = rest.split_at(m - 1);

        // Barycentric weights by the forward recurrence
        // w[i] = w[i-1]·(a[i-1] - a[m-1])/a[i]; strictly sequential, each
        // weight feeds the next.
        let mut res = Vec::with_capacity(m);
        let mut w = g_vanish_inverse[0];
        res.push(l_vanish * shift_inverses[0] * w);
        for i in 1..m {
            w *= (sequence[i - 1] - sequence[m - 1]) * sequence_inverses[i - 1];
            res.push(l_vanish * shift_inverses[i] * w);
        }
        res
    }

    fn evaluate_vanishing_polynomial(&self, t: F) -> F {
        let tables = self.precomputations.get();
        tables.sequence.iter().map(|a_i| t - a_i).product()
    }

    fn add_vanishing_polynomial(&self, coeff: F, h: &mut [F]) -> Result<()> {
        ensure_len(self.size + 1, h.len())?;
        let tables = self.precomputations.get();

        // Z as a coefficient vector, one linear factor at a time; each step
        // depends on the previous product.
        let mut z = vec![-tables.sequence[0], F::one()];
        for a_i in &tables.sequence[1..] {
            z = polynomial_multiplication(&z, &[-*a_i, F::one()]);
        }

        h.par_iter_mut()
            .zip(z.par_iter())
            .for_each(|(hi, zi)| *hi += *zi * coeff);
        Ok(())
    }

    fn divide_by_vanishing_polynomial_on_coset(&self, p: &mut [F], g: &F) -> Result<()> {
        ensure_len(self.size, p.len())?;
        let z = self.evaluate_vanishing_polynomial(*g);
        let z_inv = z.inverse().ok_or(DomainError::DivisionByZero)?;
        p.par_iter_mut().for_each(|pi| *pi *= z_inv);
        Ok(())
    }
}

/// Whether `size` is strictly below the field characteristic.
fn below_characteristic<F: FftField>(size: usize) -> bool {
    let characteristic = F::characteristic();
    characteristic.iter().skip(1).any(|limb| *limb != 0)
        || characteristic.first().is_some_and(|limb| *limb > size as u64)
}
