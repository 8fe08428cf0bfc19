mod common;

use ark_ff::{One, UniformRand, Zero};
use domain_utils::tests::make_test_rng;
use evaluation_domains::{
    ArithmeticSequenceDomain, ArithmeticSequenceField, DomainError, EvaluationDomain,
};

use common::{evaluate, random_coefficients, F13, F97, FBabyBear};

#[test]
fn test_constant_polynomial_over_the_worked_sequence() {
    // m = 5, generator 3, p = 13: the points are {0, 3, 6, 9, 12}. The
    // constant polynomial 1 evaluates to 1 everywhere, and back.
    let domain = ArithmeticSequenceDomain::<F13>::new(5).unwrap();
    for (i, expected) in [0u64, 3, 6, 9, 12].into_iter().enumerate() {
        assert_eq!(domain.element(i), F13::from(expected));
    }

    let mut buffer = vec![
        F13::one(),
        F13::zero(),
        F13::zero(),
        F13::zero(),
        F13::zero(),
    ];
    domain.fft(&mut buffer).unwrap();
    assert_eq!(buffer, vec![F13::one(); 5]);

    domain.ifft(&mut buffer).unwrap();
    let mut expected = vec![F13::zero(); 5];
    expected[0] = F13::one();
    assert_eq!(buffer, expected);
}

#[test]
fn test_fft_evaluates_over_the_domain() {
    let mut rng = make_test_rng(None);
    for size in [2usize, 3, 5, 7, 11, 20] {
        let domain = ArithmeticSequenceDomain::<F97>::new(size).unwrap();
        let coeffs = random_coefficients::<F97>(size, &mut rng);

        let mut evals = coeffs.clone();
        domain.fft(&mut evals).unwrap();
        for (i, eval) in evals.iter().enumerate() {
            assert_eq!(*eval, evaluate(&coeffs, domain.element(i)));
        }
    }

    for size in [10usize, 33] {
        let domain = ArithmeticSequenceDomain::<FBabyBear>::new(size).unwrap();
        let coeffs = random_coefficients::<FBabyBear>(size, &mut rng);

        let mut evals = coeffs.clone();
        domain.fft(&mut evals).unwrap();
        for (i, eval) in evals.iter().enumerate() {
            assert_eq!(*eval, evaluate(&coeffs, domain.element(i)));
        }
    }
}

#[test]
fn test_fft_roundtrip() {
    let mut rng = make_test_rng(None);
    for size in [2usize, 3, 6, 9, 17, 32] {
        let domain = ArithmeticSequenceDomain::<FBabyBear>::new(size).unwrap();
        let coeffs = random_coefficients::<FBabyBear>(size, &mut rng);

        let mut buffer = coeffs.clone();
        domain.fft(&mut buffer).unwrap();
        domain.ifft(&mut buffer).unwrap();
        assert_eq!(buffer, coeffs);

        domain.ifft(&mut buffer).unwrap();
        domain.fft(&mut buffer).unwrap();
        assert_eq!(buffer, coeffs);
    }
}

#[test]
fn test_lagrange_coefficients() {
    let mut rng = make_test_rng(None);
    let domain = ArithmeticSequenceDomain::<FBabyBear>::new(9).unwrap();
    let t = FBabyBear::rand(&mut rng);

    let lagrange = domain.evaluate_all_lagrange_coefficients(t);
    assert_eq!(lagrange.iter().sum::<FBabyBear>(), FBabyBear::one());

    let coeffs = random_coefficients::<FBabyBear>(9, &mut rng);
    let mut evals = coeffs.clone();
    domain.fft(&mut evals).unwrap();
    let combined: FBabyBear = evals.iter().zip(&lagrange).map(|(e, l)| *e * l).sum();
    assert_eq!(combined, evaluate(&coeffs, t));

    // Exact hits on the progression short-circuit to indicator vectors.
    let lagrange = domain.evaluate_all_lagrange_coefficients(domain.element(4));
    for (i, l) in lagrange.iter().enumerate() {
        let expected = if i == 4 {
            FBabyBear::one()
        } else {
            FBabyBear::zero()
        };
        assert_eq!(*l, expected);
    }
}

#[test]
fn test_partition_of_unity_over_a_small_field() {
    let mut rng = make_test_rng(None);
    let domain = ArithmeticSequenceDomain::<F97>::new(7).unwrap();
    for _ in 0..20 {
        let t = F97::rand(&mut rng);
        let lagrange = domain.evaluate_all_lagrange_coefficients(t);
        assert_eq!(lagrange.iter().sum::<F97>(), F97::one());
    }
}

#[test]
fn test_vanishing_polynomial() {
    let mut rng = make_test_rng(None);
    let domain = ArithmeticSequenceDomain::<F97>::new(7).unwrap();

    for i in 0..7 {
        assert!(domain
            .evaluate_vanishing_polynomial(domain.element(i))
            .is_zero());
    }

    // Accumulating coeff·Z into a zeroed buffer exposes Z itself: monic of
    // degree m, vanishing on the whole progression.
    let mut z = vec![F97::zero(); 8];
    domain.add_vanishing_polynomial(F97::one(), &mut z).unwrap();
    assert_eq!(z[7], F97::one());
    for i in 0..7 {
        assert!(evaluate(&z, domain.element(i)).is_zero());
    }

    let h = random_coefficients::<F97>(8, &mut rng);
    let coeff = F97::rand(&mut rng);
    let mut accumulated = h.clone();
    domain.add_vanishing_polynomial(coeff, &mut accumulated).unwrap();
    let t = F97::rand(&mut rng);
    assert_eq!(
        evaluate(&accumulated, t),
        evaluate(&h, t) + coeff * domain.evaluate_vanishing_polynomial(t)
    );
}

#[test]
fn test_coset_operations() {
    let mut rng = make_test_rng(None);
    let domain = ArithmeticSequenceDomain::<F97>::new(7).unwrap();
    // The progression runs over {0, 5, 10, ...}; 2 stays off it.
    let shift = F97::from(2u64);
    let coeffs = random_coefficients::<F97>(7, &mut rng);

    let mut evals = coeffs.clone();
    domain.coset_fft(&mut evals, &shift).unwrap();
    for (i, eval) in evals.iter().enumerate() {
        assert_eq!(*eval, evaluate(&coeffs, shift * domain.element(i)));
    }

    domain.coset_ifft(&mut evals, &shift).unwrap();
    assert_eq!(evals, coeffs);

    // The division scales uniformly by Z at the coset representative.
    let mut scaled = coeffs.clone();
    domain
        .divide_by_vanishing_polynomial_on_coset(&mut scaled, &shift)
        .unwrap();
    let z = domain.evaluate_vanishing_polynomial(shift);
    for (s, original) in scaled.iter().zip(&coeffs) {
        assert_eq!(*s * z, *original);
    }

    // A representative on the progression has Z = 0 and must be refused.
    let on_domain = F97::arithmetic_generator();
    let mut buffer = coeffs.clone();
    assert_eq!(
        domain.divide_by_vanishing_polynomial_on_coset(&mut buffer, &on_domain),
        Err(DomainError::DivisionByZero)
    );
}

#[test]
fn test_precomputation_is_idempotent() {
    let domain = ArithmeticSequenceDomain::<F13>::new(5).unwrap();
    // Every entry point may trigger the table build; repeated access sees
    // the same sequence.
    assert_eq!(domain.element(1), F13::from(3u64));
    assert_eq!(domain.element(1), F13::from(3u64));
    assert_eq!(domain.generator, F13::from(3u64));
    assert_eq!(domain.size(), 5);
}

#[test]
fn test_buffers_of_the_wrong_size_are_rejected() {
    let domain = ArithmeticSequenceDomain::<F97>::new(7).unwrap();
    for len in [6, 8] {
        let mut buffer = vec![F97::one(); len];
        let expected = Err(DomainError::SizeMismatch {
            expected: 7,
            got: len,
        });
        assert_eq!(domain.fft(&mut buffer), expected);
        assert_eq!(domain.ifft(&mut buffer), expected);
    }
    let mut h = vec![F97::one(); 7];
    assert_eq!(
        domain.add_vanishing_polynomial(F97::one(), &mut h),
        Err(DomainError::SizeMismatch {
            expected: 8,
            got: 7
        })
    );
}

#[test]
fn test_unusable_configurations_are_rejected() {
    assert!(matches!(
        ArithmeticSequenceDomain::<F97>::new(0),
        Err(DomainError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        ArithmeticSequenceDomain::<F97>::new(1),
        Err(DomainError::InvalidConfiguration(_))
    ));
    // Past the characteristic the progression wraps onto itself.
    assert!(matches!(
        ArithmeticSequenceDomain::<F13>::new(13),
        Err(DomainError::InvalidConfiguration(_))
    ));
    assert!(ArithmeticSequenceDomain::<F13>::new(12).is_ok());
}
