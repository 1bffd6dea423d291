use crate::error::MatrixError;

/// Structural operations shared by every dense matrix in the crate. These
/// only need ring arithmetic from the entries.
pub trait Matrix<T>
where
    Self: Sized,
{
    fn from_list(lines: Vec<Vec<T>>) -> Self;
    fn to_list(&self) -> Vec<Vec<T>>;

    fn identity(n: usize) -> Self;
    fn transpose(&self) -> Self;
    fn at(&self, row: usize, col: usize) -> T;

    fn is_rref(&self) -> bool;
}

/// Row-reduction operations, available when the entries form a field.
///
/// Each algorithm works on its own copy; `&self` is never modified.
pub trait Elimination<T>: Matrix<T> {
    fn rref(&self) -> Self;
    /// Columns holding a pivot once the matrix is reduced.
    fn pivot_columns(&self) -> Vec<usize>;
    fn rank(&self) -> usize;

    fn inverse(&self) -> Result<Self, MatrixError>;
    fn determinant(&self) -> Result<T, MatrixError>;

    /// Null-space basis, one vector of length `cols` per free column.
    fn kernel(&self) -> Vec<Vec<T>>;
    /// Column-space basis taken from the original columns at the pivot positions.
    fn image(&self) -> Vec<Vec<T>>;
    /// Pivot columns of the reduced matrix itself (unit vectors).
    fn rref_image(&self) -> Vec<Vec<T>>;
}
