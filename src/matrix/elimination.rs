//! Row-reduction algorithms, written once against [`GenElement`].
//!
//! Pivots are chosen as the first entry that is not `is_zero()`: the element
//! type alone decides what counts as zero (exact for `f64`, structural for
//! symbolic expressions), so no magnitude ordering is required.

use log::{debug, trace};

use crate::error::MatrixError;
use crate::matrix::matrix::{Elimination, Matrix};
use crate::matrix::matrix_gen::{GenElement, MatrixGen};

fn require_square<T>(m: &MatrixGen<T>) -> Result<usize, MatrixError> {
    if m.rows != m.cols {
        return Err(MatrixError::NotSquare {
            rows: m.rows,
            cols: m.cols,
        });
    }
    Ok(m.rows)
}

/// First row at or below `from` whose entry in `col` is not zero.
fn find_pivot_row<T: GenElement>(m: &MatrixGen<T>, col: usize, from: usize) -> Option<usize> {
    (from..m.rows).find(|&r| !m[(r, col)].is_zero())
}

/// Divide row `row` by its entry in `col`.
fn normalize_row<T: GenElement>(m: &mut MatrixGen<T>, row: usize, col: usize) {
    let pivot = m.at(row, col);
    if pivot.is_one() {
        return;
    }
    for k in 0..m.cols {
        m[(row, k)] = m.at(row, k) / pivot.clone();
    }
}

/// Clear column `col` in every row except `pivot_row`, which must hold a unit pivot.
fn eliminate_column<T: GenElement>(m: &mut MatrixGen<T>, pivot_row: usize, col: usize) {
    for r in 0..m.rows {
        if r == pivot_row {
            continue;
        }
        let factor = m.at(r, col);
        if factor.is_zero() {
            continue;
        }
        for k in 0..m.cols {
            m[(r, k)] = m.at(r, k) - factor.clone() * m.at(pivot_row, k);
        }
    }
}

pub(crate) fn gauss_jordan_inverse<T: GenElement>(
    matrix: &MatrixGen<T>,
) -> Result<MatrixGen<T>, MatrixError> {
    let n = require_square(matrix)?;

    let mut augmented = MatrixGen::new(n, 2 * n);
    for i in 0..n {
        for j in 0..n {
            augmented[(i, j)] = matrix.at(i, j);
        }
        augmented[(i, n + i)] = T::one();
    }

    for i in 0..n {
        if augmented[(i, i)].is_zero() {
            let swap_row = match find_pivot_row(&augmented, i, i + 1) {
                Some(r) => r,
                None => {
                    debug!("inverse: no pivot in column {} of {}x{} matrix", i, n, n);
                    return Err(MatrixError::SingularMatrix);
                }
            };
            trace!("inverse: swapping rows {} and {}", i, swap_row);
            augmented.swap_rows(i, swap_row);
        }

        normalize_row(&mut augmented, i, i);
        eliminate_column(&mut augmented, i, i);
    }

    let mut inverse = MatrixGen::new(n, n);
    for i in 0..n {
        for j in 0..n {
            inverse[(i, j)] = augmented.at(i, j + n);
        }
    }
    Ok(inverse)
}

/// Gaussian elimination; a singular matrix yields `T::zero()`, not an error.
pub(crate) fn determinant<T: GenElement>(matrix: &MatrixGen<T>) -> Result<T, MatrixError> {
    let n = require_square(matrix)?;
    let mut mat = matrix.clone();
    let mut det = T::one();
    let mut negate = false;

    for i in 0..n {
        let pivot_row = match find_pivot_row(&mat, i, i) {
            Some(r) => r,
            None => {
                debug!("determinant: column {} is zero below the diagonal", i);
                return Ok(T::zero());
            }
        };
        if pivot_row != i {
            trace!("determinant: swapping rows {} and {}", i, pivot_row);
            mat.swap_rows(i, pivot_row);
            negate = !negate;
        }

        let pivot = mat.at(i, i);
        det = det * pivot.clone();

        for k in i + 1..n {
            let below = mat.at(k, i);
            if below.is_zero() {
                continue;
            }
            let factor = below / pivot.clone();
            for j in i..n {
                mat[(k, j)] = mat.at(k, j) - factor.clone() * mat.at(i, j);
            }
        }
    }

    if negate {
        det = T::zero() - det;
    }
    Ok(det)
}

pub(crate) fn reduced_row_echelon<T: GenElement>(matrix: &MatrixGen<T>) -> MatrixGen<T> {
    let mut m = matrix.clone();
    let mut lead = 0;

    for r in 0..m.rows {
        let found = loop {
            if lead >= m.cols {
                break None;
            }
            match find_pivot_row(&m, lead, r) {
                Some(i) => break Some(i),
                None => lead += 1,
            }
        };
        let Some(i) = found else {
            trace!("rref: columns exhausted at row {}", r);
            break;
        };

        m.swap_rows(i, r);
        normalize_row(&mut m, r, lead);
        eliminate_column(&mut m, r, lead);
        lead += 1;
    }

    m
}

/// Pivot columns of a matrix already in reduced row-echelon form, read off
/// row by row: the first non-zero entry of each row, if it is one.
pub(crate) fn pivot_columns<T: GenElement>(rref: &MatrixGen<T>) -> Vec<usize> {
    let mut pivots = vec![];
    let mut next_col = 0;

    for r in 0..rref.rows {
        let Some(c) = (next_col..rref.cols).find(|&c| !rref[(r, c)].is_zero()) else {
            break;
        };
        if !rref[(r, c)].is_one() {
            break;
        }
        pivots.push(c);
        next_col = c + 1;
    }
    pivots
}

pub(crate) fn kernel<T: GenElement>(matrix: &MatrixGen<T>) -> Vec<Vec<T>> {
    let rref = matrix.rref();
    let pivots = pivot_columns(&rref);

    (0..rref.cols)
        .filter(|c| !pivots.contains(c))
        .map(|free_col| {
            let mut v = vec![T::zero(); rref.cols];
            v[free_col] = T::one();
            for (row, &pivot_col) in pivots.iter().enumerate() {
                v[pivot_col] = T::zero() - rref.at(row, free_col);
            }
            v
        })
        .collect()
}

pub(crate) fn image<T: GenElement>(matrix: &MatrixGen<T>) -> Vec<Vec<T>> {
    pivot_columns(&matrix.rref())
        .into_iter()
        .map(|c| matrix.column(c))
        .collect()
}

pub(crate) fn rref_image<T: GenElement>(matrix: &MatrixGen<T>) -> Vec<Vec<T>> {
    let rref = matrix.rref();
    pivot_columns(&rref)
        .into_iter()
        .map(|c| rref.column(c))
        .collect()
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
