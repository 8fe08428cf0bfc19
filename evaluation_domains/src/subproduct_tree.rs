//! Subproduct trees and monomial/Newton basis conversion.
//!
//! A subproduct tree over points `x_0, …, x_{n-1}` is a complete binary
//! tree of monic polynomials: leaf `j` holds `x - x_j`, every internal node
//! holds the product of its two children, and the root is the vanishing
//! polynomial of the whole point set. The tree is what makes conversion
//! between the monomial basis and the Newton (divided-difference) basis
//! relative to the ordered points fast: both directions are a single
//! traversal doing one division or one multiplication per node.

use ark_ff::Field;
use domain_utils::math::ceil_log2;

use crate::polynomial_arithmetic::{divide_by_monic, polynomial_multiplication};

/// A complete binary tree of subproduct polynomials, stored level by level.
///
/// Node `(level, j)` covers the points in `[j · 2^level, (j+1) · 2^level)`
/// and owns the coefficient vector of their subproduct polynomial (monic,
/// `2^level + 1` coefficients). Level `0` holds the leaves; the last level
/// holds only the root.
#[derive(Debug, Clone)]
pub struct SubproductTree<F: Field> {
    levels: Vec<Vec<Vec<F>>>,
}

impl<F: Field> SubproductTree<F> {
    /// Build the tree over the given points.
    ///
    /// # Panics
    ///
    /// Panics if `points.len()` is not a power of two; callers pad their
    /// point set first.
    pub fn build(points: &[F]) -> Self {
        let n = points.len();
        assert!(
            n.is_power_of_two(),
            "subproduct trees cover a power-of-two number of points"
        );
        let depth = ceil_log2(n);

        let mut levels = Vec::with_capacity(depth + 1);
        let leaves: Vec<Vec<F>> = points.iter().map(|x| vec![-*x, F::one()]).collect();
        levels.push(leaves);

        for level in 1..=depth {
            let children = &levels[level - 1];
            let mut nodes = Vec::with_capacity(children.len() / 2);
            for j in 0..children.len() / 2 {
                nodes.push(polynomial_multiplication(
                    &children[2 * j],
                    &children[2 * j + 1],
                ));
            }
            levels.push(nodes);
        }

        SubproductTree { levels }
    }

    /// The number of points the tree covers.
    pub fn num_points(&self) -> usize {
        self.levels[0].len()
    }

    /// The number of levels above the leaves.
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// The subproduct polynomial of node `(level, j)`.
    pub fn node(&self, level: usize, j: usize) -> &[F] {
        &self.levels[level][j]
    }

    /// The vanishing polynomial of the full point set.
    pub fn root(&self) -> &[F] {
        self.node(self.depth(), 0)
    }

    /// Rewrite monomial coefficients into Newton coefficients relative to
    /// the tree's points, in order.
    ///
    /// `a` may be shorter than the point count; missing high-order
    /// coefficients are zero, and divided differences of order beyond the
    /// degree vanish, so the truncation is exact.
    pub fn monomial_to_newton_basis(&self, a: &mut [F]) {
        let n = self.num_points();
        assert!(a.len() <= n, "more coefficients than points in the tree");
        let mut newton = vec![F::zero(); n];
        self.monomial_to_newton_at(self.depth(), 0, a.to_vec(), &mut newton);
        a.copy_from_slice(&newton[..a.len()]);
    }

    fn monomial_to_newton_at(&self, level: usize, j: usize, p: Vec<F>, out: &mut [F]) {
        if level == 0 {
            // p is reduced modulo the leaf: a constant, the Newton
            // coefficient of this point.
            out[0] = p.first().copied().unwrap_or_else(F::zero);
            return;
        }
        // Splitting p by the lower child separates the Newton coefficients:
        // the remainder carries the lower half, the quotient the upper.
        let (quotient, remainder) = divide_by_monic(&p, self.node(level - 1, 2 * j));
        let half = 1 << (level - 1);
        let (lo, hi) = out.split_at_mut(half);
        self.monomial_to_newton_at(level - 1, 2 * j, remainder, lo);
        self.monomial_to_newton_at(level - 1, 2 * j + 1, quotient, hi);
    }

    /// Rewrite Newton coefficients relative to the tree's points back into
    /// monomial coefficients. Inverse of [Self::monomial_to_newton_basis].
    pub fn newton_to_monomial_basis(&self, a: &mut [F]) {
        let n = self.num_points();
        assert!(a.len() <= n, "more coefficients than points in the tree");
        let mut newton = vec![F::zero(); n];
        newton[..a.len()].copy_from_slice(a);
        let monomial = self.newton_to_monomial_at(self.depth(), 0, &newton);
        a.copy_from_slice(&monomial[..a.len()]);
    }

    fn newton_to_monomial_at(&self, level: usize, j: usize, c: &[F]) -> Vec<F> {
        if level == 0 {
            return vec![c[0]];
        }
        let half = 1 << (level - 1);
        let lo = self.newton_to_monomial_at(level - 1, 2 * j, &c[..half]);
        let hi = self.newton_to_monomial_at(level - 1, 2 * j + 1, &c[half..]);
        // p = lo + Z_lower · hi
        let mut p = polynomial_multiplication(self.node(level - 1, 2 * j), &hi);
        for (pi, li) in p.iter_mut().zip(lo) {
            *pi += li;
        }
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::Fr;
    use ark_ff::UniformRand;

    #[test]
    fn test_root_is_vanishing_polynomial() {
        let points: Vec<Fr> = (1u64..=4).map(Fr::from).collect();
        let tree = SubproductTree::build(&points);

        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.num_points(), 4);

        // (x-1)(x-2)(x-3)(x-4) = 24 - 50x + 35x^2 - 10x^3 + x^4
        let expected = [
            Fr::from(24u64),
            -Fr::from(50u64),
            Fr::from(35u64),
            -Fr::from(10u64),
            Fr::from(1u64),
        ];
        assert_eq!(tree.root(), &expected[..]);
    }

    #[test]
    fn test_newton_roundtrip() {
        let mut rng = domain_utils::tests::make_test_rng(None);
        for log_n in 0..=4 {
            let n = 1 << log_n;
            let points: Vec<Fr> = (0..n).map(|_| Fr::rand(&mut rng)).collect();
            let tree = SubproductTree::build(&points);

            for len in [n / 2, n] {
                if len == 0 {
                    continue;
                }
                let coeffs: Vec<Fr> = (0..len).map(|_| Fr::rand(&mut rng)).collect();
                let mut buffer = coeffs.clone();
                tree.monomial_to_newton_basis(&mut buffer);
                tree.newton_to_monomial_basis(&mut buffer);
                assert_eq!(buffer, coeffs);
            }
        }
    }

    #[test]
    fn test_newton_coefficients_interpolate() {
        // Newton form of p relative to (x_0, x_1, ...):
        // p(x) = c_0 + c_1 (x - x_0) + c_2 (x - x_0)(x - x_1) + ...
        let mut rng = domain_utils::tests::make_test_rng(None);
        let points: Vec<Fr> = (0..8).map(|_| Fr::rand(&mut rng)).collect();
        let tree = SubproductTree::build(&points);

        let coeffs: Vec<Fr> = (0..8).map(|_| Fr::rand(&mut rng)).collect();
        let mut newton = coeffs.clone();
        tree.monomial_to_newton_basis(&mut newton);

        let x = Fr::rand(&mut rng);
        let direct = coeffs
            .iter()
            .rev()
            .fold(Fr::from(0u64), |acc, c| acc * x + c);
        let mut via_newton = Fr::from(0u64);
        let mut basis = Fr::from(1u64);
        for (ci, xi) in newton.iter().zip(&points) {
            via_newton += *ci * basis;
            basis *= x - xi;
        }
        assert_eq!(via_newton, direct);
    }
}
