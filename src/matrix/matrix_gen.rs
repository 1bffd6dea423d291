use num_traits::{One, Zero};

use crate::error::MatrixError;
use crate::matrix::elimination;
use crate::matrix::matrix::{Elimination, Matrix};
use std::fmt;
use std::ops;
use std::ops::{Add, Div, Mul, Sub};

/// Ring arithmetic every matrix entry must supply. `Zero::zero` is the
/// explicit factory for empty cells.
pub trait RingElement:  // Avoid repeating all the traits
    Clone
    + Zero
    + One
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + std::iter::Sum<Self>
    + std::fmt::Display
    + std::fmt::Debug
{
}

impl<T> RingElement for T where
    T: Clone
        + Zero
        + One
        + PartialEq
        + Add<Output = T>
        + Sub<Output = T>
        + Mul<Output = T>
        + std::iter::Sum<T>
        + std::fmt::Display
        + std::fmt::Debug
{
}

/// Field entries: every value that is not `is_zero()` can be divided by.
/// Elimination picks pivots with `is_zero`/`is_one` and divides by them.
pub trait GenElement: RingElement + Div<Output = Self> {}

impl<T> GenElement for T where T: RingElement + Div<Output = T> {}

/// Dense row-major matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixGen<T> {
    pub cols: usize,
    pub rows: usize,
    pub cells: Vec<T>,
}

impl<T: RingElement> Matrix<T> for MatrixGen<T> {
    fn from_list(lines: Vec<Vec<T>>) -> Self {
        let cols = lines.iter().map(|l| l.len()).max().unwrap_or(0);
        let rows = lines.len();

        MatrixGen {
            rows,
            cols,
            cells: lines
                .into_iter()
                .flat_map(|l| {
                    let missing = cols - l.len();
                    l.into_iter()
                        .chain(std::iter::repeat_with(T::zero).take(missing))
                })
                .collect(),
        }
    }

    fn to_list(&self) -> Vec<Vec<T>> {
        if self.cols == 0 {
            return vec![vec![]; self.rows];
        }
        self.cells
            .chunks(self.cols)
            .map(|line| line.into())
            .collect()
    }

    fn identity(n: usize) -> MatrixGen<T> {
        MatrixGen {
            rows: n,
            cols: n,
            cells: (0..n)
                .flat_map(|i| (0..n).map(move |j| if i == j { T::one() } else { T::zero() }))
                .collect(),
        }
    }

    fn transpose(&self) -> MatrixGen<T> {
        MatrixGen {
            rows: self.cols,
            cols: self.rows,
            cells: (0..self.cols)
                .flat_map(|c| (0..self.rows).map(move |r| self.at(r, c)))
                .collect(),
        }
    }

    #[inline(always)]
    fn at(&self, row: usize, col: usize) -> T {
        self[(row, col)].clone()
    }

    fn is_rref(&self) -> bool {
        let mut lead = None;

        for i in 0..self.rows {
            let row = &self.cells[i * self.cols..(i + 1) * self.cols];
            let pivot_col_opt = row.iter().position(|x| !x.is_zero());

            match pivot_col_opt {
                None => {
                    for r in i + 1..self.rows {
                        let next_row = &self.cells[r * self.cols..(r + 1) * self.cols];
                        if next_row.iter().any(|x| !x.is_zero()) {
                            return false;
                        }
                    }
                    break;
                }
                Some(pivot_col) => {
                    if let Some(prev_lead) = lead {
                        if pivot_col <= prev_lead {
                            return false;
                        }
                    }
                    lead = Some(pivot_col);

                    if !row[pivot_col].is_one() {
                        return false;
                    }

                    for r in 0..self.rows {
                        if r != i && !self[(r, pivot_col)].is_zero() {
                            return false;
                        }
                    }
                }
            }
        }
        true
    }
}

impl<T: GenElement> Elimination<T> for MatrixGen<T> {
    fn rref(&self) -> MatrixGen<T> {
        elimination::reduced_row_echelon(self)
    }

    fn pivot_columns(&self) -> Vec<usize> {
        elimination::pivot_columns(&self.rref())
    }

    fn rank(&self) -> usize {
        self.pivot_columns().len()
    }

    fn inverse(&self) -> Result<MatrixGen<T>, MatrixError> {
        elimination::gauss_jordan_inverse(self)
    }

    fn determinant(&self) -> Result<T, MatrixError> {
        elimination::determinant(self)
    }

    fn kernel(&self) -> Vec<Vec<T>> {
        elimination::kernel(self)
    }

    fn image(&self) -> Vec<Vec<T>> {
        elimination::image(self)
    }

    fn rref_image(&self) -> Vec<Vec<T>> {
        elimination::rref_image(self)
    }
}

impl<T: RingElement> MatrixGen<T> {
    pub fn new(rows: usize, cols: usize) -> MatrixGen<T> {
        MatrixGen {
            rows,
            cols,
            cells: (0..(rows * cols)).map(|_| T::zero()).collect(),
        }
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self[(row, col)] = value;
    }

    pub fn row(&self, row: usize) -> Vec<T> {
        (0..self.cols).map(|c| self.at(row, c)).collect()
    }

    pub fn column(&self, col: usize) -> Vec<T> {
        (0..self.rows).map(|r| self.at(r, col)).collect()
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Element-wise product with a scalar.
    pub fn scale(&self, scalar: &T) -> MatrixGen<T> {
        MatrixGen {
            rows: self.rows,
            cols: self.cols,
            cells: self
                .cells
                .iter()
                .map(|c| c.clone() * scalar.clone())
                .collect(),
        }
    }

    pub(crate) fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for k in 0..self.cols {
            self.cells.swap(a * self.cols + k, b * self.cols + k);
        }
    }

    fn check_same_shape(&self, rhs: &MatrixGen<T>) -> Result<(), MatrixError> {
        if self.cols != rhs.cols || self.rows != rhs.rows {
            return Err(self.mismatch(rhs));
        }
        Ok(())
    }

    fn mismatch(&self, rhs: &MatrixGen<T>) -> MatrixError {
        MatrixError::DimensionMismatch {
            left_rows: self.rows,
            left_cols: self.cols,
            right_rows: rhs.rows,
            right_cols: rhs.cols,
        }
    }
}

impl<T> ops::Index<(usize, usize)> for MatrixGen<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of range for {}x{} matrix",
            row,
            col,
            self.rows,
            self.cols
        );
        &self.cells[row * self.cols + col]
    }
}

impl<T> ops::IndexMut<(usize, usize)> for MatrixGen<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of range for {}x{} matrix",
            row,
            col,
            self.rows,
            self.cols
        );
        &mut self.cells[row * self.cols + col]
    }
}

impl<T: RingElement> ops::Add<&MatrixGen<T>> for &MatrixGen<T> {
    type Output = Result<MatrixGen<T>, MatrixError>;

    fn add(self, rhs: &MatrixGen<T>) -> Result<MatrixGen<T>, MatrixError> {
        self.check_same_shape(rhs)?;

        Ok(MatrixGen {
            rows: self.rows,
            cols: self.cols,
            cells: self
                .cells
                .iter()
                .zip(rhs.cells.iter())
                .map(|(a, b)| a.to_owned() + b.to_owned())
                .collect(),
        })
    }
}

impl<T: RingElement> ops::Sub<&MatrixGen<T>> for &MatrixGen<T> {
    type Output = Result<MatrixGen<T>, MatrixError>;

    fn sub(self, rhs: &MatrixGen<T>) -> Result<MatrixGen<T>, MatrixError> {
        self.check_same_shape(rhs)?;

        Ok(MatrixGen {
            rows: self.rows,
            cols: self.cols,
            cells: self
                .cells
                .iter()
                .zip(rhs.cells.iter())
                .map(|(a, b)| a.to_owned() - b.to_owned())
                .collect(),
        })
    }
}

impl<T: RingElement> ops::Mul<&MatrixGen<T>> for &MatrixGen<T> {
    type Output = Result<MatrixGen<T>, MatrixError>;

    fn mul(self, rhs: &MatrixGen<T>) -> Result<MatrixGen<T>, MatrixError> {
        if self.cols != rhs.rows {
            return Err(self.mismatch(rhs));
        }

        Ok(MatrixGen {
            rows: self.rows,
            cols: rhs.cols,
            cells: (0..self.rows)
                .flat_map(|i| {
                    (0..rhs.cols)
                        .map(move |j| (0..self.cols).map(|k| self.at(i, k) * rhs.at(k, j)).sum())
                })
                .collect(),
        })
    }
}

impl<T: RingElement> fmt::Display for MatrixGen<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            let line: Vec<String> = self.row(r).iter().map(|c| c.to_string()).collect();
            writeln!(f, "[{}]", line.join(", "))?;
        }
        Ok(())
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
