//! Algebraic laws of the elimination algorithms, checked over exact rationals
//! and over symbolic expressions holding integer entries.

use num_traits::Zero;
use proptest::prelude::*;
use world_engine::{Elimination, Expr, Fraction, Matrix, MatrixGen, RingElement};

/// Strategy for small integer entries
fn entry_strategy() -> impl Strategy<Value = i64> {
    -5i64..=5
}

fn grid(rows: usize, cols: usize) -> impl Strategy<Value = MatrixGen<Fraction>> {
    prop::collection::vec(prop::collection::vec(entry_strategy(), cols), rows).prop_map(|lines| {
        MatrixGen::from_list(
            lines
                .into_iter()
                .map(|line| line.into_iter().map(Fraction::from).collect())
                .collect(),
        )
    })
}

fn matrix_strategy() -> impl Strategy<Value = MatrixGen<Fraction>> {
    (1usize..=4, 1usize..=4).prop_flat_map(|(rows, cols)| grid(rows, cols))
}

fn square_strategy() -> impl Strategy<Value = MatrixGen<Fraction>> {
    (1usize..=4).prop_flat_map(|n| grid(n, n))
}

fn same_shape_pair() -> impl Strategy<Value = (MatrixGen<Fraction>, MatrixGen<Fraction>)> {
    (1usize..=4, 1usize..=4).prop_flat_map(|(rows, cols)| (grid(rows, cols), grid(rows, cols)))
}

fn expr_matrix_strategy() -> impl Strategy<Value = Vec<Vec<i64>>> {
    (1usize..=4, 1usize..=4).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(prop::collection::vec(entry_strategy(), cols), rows)
    })
}

fn lift<T>(lines: &[Vec<i64>], f: fn(i64) -> T) -> Vec<Vec<T>> {
    lines
        .iter()
        .map(|line| line.iter().map(|&x| f(x)).collect())
        .collect()
}

fn lift_fractions(lines: Vec<Vec<Fraction>>) -> Vec<Vec<Expr>> {
    lines
        .into_iter()
        .map(|line| line.into_iter().map(Expr::num).collect())
        .collect()
}

fn column<T: RingElement>(v: &[T]) -> MatrixGen<T> {
    MatrixGen::from_list(v.iter().map(|x| vec![x.clone()]).collect())
}

proptest! {
    #[test]
    fn add_then_sub_round_trips((a, b) in same_shape_pair()) {
        let sum = (&a + &b).unwrap();
        prop_assert_eq!((&sum - &b).unwrap(), a);
    }

    #[test]
    fn transpose_is_an_involution(a in matrix_strategy()) {
        let t = a.transpose();
        prop_assert_eq!((t.rows, t.cols), (a.cols, a.rows));
        prop_assert_eq!(t.transpose(), a);
    }

    #[test]
    fn rref_is_idempotent(a in matrix_strategy()) {
        let r = a.rref();
        prop_assert!(r.is_rref());
        prop_assert_eq!(r.rref(), r);
    }

    #[test]
    fn kernel_vectors_are_annihilated(a in matrix_strategy()) {
        let kernel = a.kernel();
        prop_assert_eq!(kernel.len() + a.rank(), a.cols);
        for v in kernel {
            let product = (&a * &column(&v)).unwrap();
            prop_assert!(product.cells.iter().all(Zero::is_zero));
        }
    }

    #[test]
    fn image_has_rank_many_columns(a in matrix_strategy()) {
        let image = a.image();
        prop_assert_eq!(image.len(), a.rank());
        for (basis, col) in image.iter().zip(a.pivot_columns()) {
            prop_assert_eq!(basis, &a.column(col));
        }
    }

    #[test]
    fn determinant_zero_iff_singular(a in square_strategy()) {
        let det = a.determinant().unwrap();
        match a.inverse() {
            Ok(inv) => {
                prop_assert!(!det.is_zero());
                prop_assert_eq!((&a * &inv).unwrap(), MatrixGen::<Fraction>::identity(a.rows));
                prop_assert_eq!((&inv * &a).unwrap(), MatrixGen::<Fraction>::identity(a.rows));
            }
            Err(_) => prop_assert!(det.is_zero()),
        }
    }

    #[test]
    fn determinant_of_transpose(a in square_strategy()) {
        prop_assert_eq!(a.transpose().determinant().unwrap(), a.determinant().unwrap());
    }

    #[test]
    fn expr_rref_is_idempotent_and_matches_fractions(lines in expr_matrix_strategy()) {
        let a = MatrixGen::from_list(lift(&lines, Expr::int));
        let r = a.rref();
        prop_assert!(r.is_rref());
        prop_assert_eq!(r.rref(), r.clone());

        let exact = MatrixGen::from_list(lift(&lines, Fraction::from_integer)).rref();
        let exact = MatrixGen::from_list(lift_fractions(exact.to_list()));
        prop_assert_eq!(r, exact);
    }

    #[test]
    fn expr_kernel_vectors_are_annihilated(lines in expr_matrix_strategy()) {
        let a = MatrixGen::from_list(lift(&lines, Expr::int));
        let kernel = a.kernel();
        prop_assert_eq!(kernel.len() + a.rank(), a.cols);
        for v in kernel {
            let product = (&a * &column(&v)).unwrap();
            prop_assert!(product.cells.iter().all(Zero::is_zero));
        }
    }
}
