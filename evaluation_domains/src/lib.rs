#![doc = include_str!("../README.md")]

pub mod arithmetic_sequence;
pub mod domain;
pub mod error;
pub mod polynomial_arithmetic;
pub mod radix2;
pub mod step_radix2;
pub mod subproduct_tree;

pub use arithmetic_sequence::{ArithmeticSequenceDomain, ArithmeticSequenceField};
pub use domain::{EvaluationDomain, GeneralEvaluationDomain};
pub use error::DomainError;
pub use radix2::Radix2Domain;
pub use step_radix2::StepRadix2Domain;
pub use subproduct_tree::SubproductTree;

/// Test fields shared by the integration tests.
///
/// `ArithmeticSequenceField` impls for foreign field types must live in this
/// crate to satisfy the orphan rules, so the integration tests (which are
/// compiled as separate crates) re-export these rather than defining them
/// locally.
#[cfg(feature = "test-support")]
pub mod test_support {
    use ark_ff::fields::{Fp64, MontBackend, MontConfig};

    use crate::ArithmeticSequenceField;

    /// The thirteen-element field of the worked scenarios. 2 generates the
    /// multiplicative group; the arithmetic progressions use increment 3.
    #[derive(MontConfig)]
    #[modulus = "13"]
    #[generator = "2"]
    pub struct F13Config;
    pub type F13 = Fp64<MontBackend<F13Config, 1>>;

    impl ArithmeticSequenceField for F13 {
        fn arithmetic_generator() -> Self {
            Self::from(3u64)
        }
    }

    /// A slightly roomier prime, still small enough to audit by hand.
    #[derive(MontConfig)]
    #[modulus = "97"]
    #[generator = "5"]
    pub struct F97Config;
    pub type F97 = Fp64<MontBackend<F97Config, 1>>;

    impl ArithmeticSequenceField for F97 {}

    /// The 31-bit FFT-friendly prime `15·2^27 + 1` for production-shaped runs.
    #[derive(MontConfig)]
    #[modulus = "2013265921"]
    #[generator = "31"]
    pub struct FBabyBearConfig;
    pub type FBabyBear = Fp64<MontBackend<FBabyBearConfig, 1>>;

    impl ArithmeticSequenceField for FBabyBear {}
}
