use crate::error::{MatrixError, SymbolicError};
use crate::matrix::matrix::{Elimination, Matrix};
use crate::matrix::matrix_gen::{GenElement, MatrixGen};
use crate::symbolic::expr::Expr;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyType;

impl From<MatrixError> for PyErr {
    fn from(error: MatrixError) -> PyErr {
        PyValueError::new_err(error.to_string())
    }
}

impl From<SymbolicError> for PyErr {
    fn from(error: SymbolicError) -> PyErr {
        PyValueError::new_err(error.to_string())
    }
}

/// How an element crosses the Python boundary.
trait PyElement: GenElement {
    type Py;

    fn from_py(value: Self::Py) -> PyResult<Self>;
    fn to_py(&self) -> Self::Py;
}

impl PyElement for f64 {
    type Py = f64;

    fn from_py(value: f64) -> PyResult<f64> {
        Ok(value)
    }

    fn to_py(&self) -> f64 {
        *self
    }
}

/// Symbolic entries travel as infix text, e.g. `"x^2/(1 + x)"`.
impl PyElement for Expr {
    type Py = String;

    fn from_py(value: String) -> PyResult<Expr> {
        Ok(Expr::parse(&value)?)
    }

    fn to_py(&self) -> String {
        self.to_string()
    }
}

fn matrix_from_py<T: PyElement>(lines: Vec<Vec<T::Py>>) -> PyResult<MatrixGen<T>> {
    let lines = lines
        .into_iter()
        .map(|line| line.into_iter().map(T::from_py).collect::<PyResult<Vec<T>>>())
        .collect::<PyResult<Vec<Vec<T>>>>()?;
    Ok(MatrixGen::from_list(lines))
}

fn vectors_to_py<T: PyElement>(vectors: Vec<Vec<T>>) -> Vec<Vec<T::Py>> {
    vectors
        .iter()
        .map(|v| v.iter().map(T::to_py).collect())
        .collect()
}

macro_rules! impl_matrix_pymethods {
    ($type:ident, $element:ty, $py:ty) => {
        #[pyclass(frozen)]
        #[derive(Debug, Clone)]
        pub struct $type {
            pub inner: MatrixGen<$element>,
        }

        #[pymethods]
        impl $type {
            #[classmethod]
            pub fn from_list(_cls: &Bound<PyType>, lines: Vec<Vec<$py>>) -> PyResult<Self> {
                Ok($type {
                    inner: matrix_from_py(lines)?,
                })
            }

            #[classmethod]
            pub fn identity(_cls: &Bound<PyType>, n: usize) -> Self {
                $type {
                    inner: MatrixGen::identity(n),
                }
            }

            pub fn to_list(&self) -> Vec<Vec<$py>> {
                vectors_to_py(self.inner.to_list())
            }

            pub fn __add__(&self, rhs: &$type) -> PyResult<$type> {
                Ok($type {
                    inner: (&self.inner + &rhs.inner)?,
                })
            }

            pub fn __sub__(&self, rhs: &$type) -> PyResult<$type> {
                Ok($type {
                    inner: (&self.inner - &rhs.inner)?,
                })
            }

            pub fn __mul__(&self, rhs: &$type) -> PyResult<$type> {
                Ok($type {
                    inner: (&self.inner * &rhs.inner)?,
                })
            }

            pub fn __str__(&self) -> String {
                self.inner.to_string()
            }

            #[allow(non_snake_case)]
            #[getter]
            pub fn T(&self) -> $type {
                $type {
                    inner: self.inner.transpose(),
                }
            }

            #[getter]
            pub fn rows(&self) -> usize {
                self.inner.rows
            }

            #[getter]
            pub fn cols(&self) -> usize {
                self.inner.cols
            }

            pub fn is_rref(&self) -> bool {
                self.inner.is_rref()
            }

            pub fn rref(&self) -> $type {
                $type {
                    inner: self.inner.rref(),
                }
            }

            pub fn pivot_columns(&self) -> Vec<usize> {
                self.inner.pivot_columns()
            }

            pub fn rank(&self) -> usize {
                self.inner.rank()
            }

            pub fn inverse(&self) -> PyResult<$type> {
                Ok($type {
                    inner: self.inner.inverse()?,
                })
            }

            pub fn determinant(&self) -> PyResult<$py> {
                Ok(self.inner.determinant()?.to_py())
            }

            pub fn kernel(&self) -> Vec<Vec<$py>> {
                vectors_to_py(self.inner.kernel())
            }

            pub fn image(&self) -> Vec<Vec<$py>> {
                vectors_to_py(self.inner.image())
            }

            pub fn rref_image(&self) -> Vec<Vec<$py>> {
                vectors_to_py(self.inner.rref_image())
            }
        }
    };
}

impl_matrix_pymethods!(MatrixF64, f64, f64);
impl_matrix_pymethods!(MatrixExpr, Expr, String);
