//! The evaluation-domain capability and its size-based dispatch.

use ark_ff::FftField;
use log::debug;

use crate::{
    arithmetic_sequence::{ArithmeticSequenceDomain, ArithmeticSequenceField},
    error::{DomainError, Result},
    radix2::Radix2Domain,
    step_radix2::StepRadix2Domain,
};

pub(crate) fn ensure_len(expected: usize, got: usize) -> Result<()> {
    if expected != got {
        return Err(DomainError::SizeMismatch { expected, got });
    }
    Ok(())
}

/// Capability shared by every domain strategy: move length-`m` coefficient
/// vectors to and from their evaluations over the domain's `m` points, and
/// evaluate the vanishing-polynomial and Lagrange data tied to those points.
///
/// Buffers are transformed in place and must have length exactly
/// [size](Self::size) — [size](Self::size)` + 1` for
/// [add_vanishing_polynomial](Self::add_vanishing_polynomial) — anything
/// else is rejected with [DomainError::SizeMismatch].
pub trait EvaluationDomain<F: FftField> {
    /// The number of evaluation points.
    fn size(&self) -> usize;

    /// Replace coefficients with evaluations at the domain points, in
    /// domain order.
    fn fft(&self, a: &mut [F]) -> Result<()>;

    /// Replace evaluations at the domain points with coefficients.
    fn ifft(&self, a: &mut [F]) -> Result<()>;

    /// [fft](Self::fft) over the coset `g · H`: evaluates at `g` times each
    /// domain point.
    fn coset_fft(&self, a: &mut [F], g: &F) -> Result<()>;

    /// Inverse of [coset_fft](Self::coset_fft).
    fn coset_ifft(&self, a: &mut [F], g: &F) -> Result<()>;

    /// The `idx`-th evaluation point, `idx < size`.
    fn element(&self, idx: usize) -> F;

    /// Evaluate every Lagrange basis polynomial of the domain at `t`: the
    /// weights expressing `p(t)` as a linear combination of the values of
    /// `p` over the domain.
    fn evaluate_all_lagrange_coefficients(&self, t: F) -> Vec<F>;

    /// Evaluate `Z(t) = Π_i (t - a_i)` over the domain points `a_i`.
    fn evaluate_vanishing_polynomial(&self, t: F) -> F;

    /// Add `coeff · Z` into the coefficient accumulator `h`, which must
    /// have room for the degree-`m` vanishing polynomial
    /// (`h.len() == size + 1`).
    fn add_vanishing_polynomial(&self, coeff: F, h: &mut [F]) -> Result<()>;

    /// Divide evaluations taken over the coset `g · H` by the vanishing
    /// polynomial's values there. `g` is the same shift that was passed to
    /// [coset_fft](Self::coset_fft); a shift landing on a domain point
    /// fails with [DomainError::DivisionByZero].
    fn divide_by_vanishing_polynomial_on_coset(&self, p: &mut [F], g: &F) -> Result<()>;
}

/// A domain of any supported size, dispatching to the cheapest strategy
/// that covers it. Selected once at construction, never re-selected.
#[derive(Debug)]
pub enum GeneralEvaluationDomain<F: ArithmeticSequenceField> {
    /// Power-of-two sizes.
    Radix2(Radix2Domain<F>),
    /// Sums of two powers of two.
    StepRadix2(StepRadix2Domain<F>),
    /// Any other size, as long as the field characteristic allows it.
    ArithmeticSequence(ArithmeticSequenceDomain<F>),
}

impl<F: ArithmeticSequenceField> GeneralEvaluationDomain<F> {
    /// Select a strategy for `size` points, cheapest first.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(DomainError::UnsupportedSize(0));
        }
        if size.is_power_of_two() {
            if let Ok(domain) = Radix2Domain::new(size) {
                debug!("domain of size {size}: radix-2");
                return Ok(GeneralEvaluationDomain::Radix2(domain));
            }
        }
        if let Ok(domain) = StepRadix2Domain::new(size) {
            debug!("domain of size {size}: step radix-2");
            return Ok(GeneralEvaluationDomain::StepRadix2(domain));
        }
        if let Ok(domain) = ArithmeticSequenceDomain::new(size) {
            debug!("domain of size {size}: arithmetic sequence");
            return Ok(GeneralEvaluationDomain::ArithmeticSequence(domain));
        }
        Err(DomainError::UnsupportedSize(size))
    }
}

macro_rules! delegate {
    ($self:ident, $domain:ident => $body:expr) => {
        match $self {
            GeneralEvaluationDomain::Radix2($domain) => $body,
            GeneralEvaluationDomain::StepRadix2($domain) => $body,
            GeneralEvaluationDomain::ArithmeticSequence($domain) => $body,
        }
    };
}

impl<F: ArithmeticSequenceField> EvaluationDomain<F> for GeneralEvaluationDomain<F> {
    fn size(&self) -> usize {
        delegate!(self, domain => domain.size())
    }

    fn fft(&self, a: &mut [F]) -> Result<()> {
        delegate!(self, domain => domain.fft(a))
    }

    fn ifft(&self, a: &mut [F]) -> Result<()> {
        delegate!(self, domain => domain.ifft(a))
    }

    fn coset_fft(&self, a: &mut [F], g: &F) -> Result<()> {
        delegate!(self, domain => domain.coset_fft(a, g))
    }

    fn coset_ifft(&self, a: &mut [F], g: &F) -> Result<()> {
        delegate!(self, domain => domain.coset_ifft(a, g))
    }

    fn element(&self, idx: usize) -> F {
        delegate!(self, domain => domain.element(idx))
    }

    fn evaluate_all_lagrange_coefficients(&self, t: F) -> Vec<F> {
        delegate!(self, domain => domain.evaluate_all_lagrange_coefficients(t))
    }

    fn evaluate_vanishing_polynomial(&self, t: F) -> F {
        delegate!(self, domain => domain.evaluate_vanishing_polynomial(t))
    }

    fn add_vanishing_polynomial(&self, coeff: F, h: &mut [F]) -> Result<()> {
        delegate!(self, domain => domain.add_vanishing_polynomial(coeff, h))
    }

    fn divide_by_vanishing_polynomial_on_coset(&self, p: &mut [F], g: &F) -> Result<()> {
        delegate!(self, domain => domain.divide_by_vanishing_polynomial_on_coset(p, g))
    }
}
