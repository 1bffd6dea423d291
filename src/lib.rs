#[cfg(feature = "python")]
use pyo3::prelude::*;

pub mod error;

pub mod formulas {
    pub mod ellipse;
    pub mod interest;
    pub mod pumps;
    pub mod thermodynamics;
}
pub mod matrix {
    pub mod elimination;
    pub mod matrix;
    pub mod matrix_gen;
}
pub mod rings {
    pub mod fraction;
}
pub mod symbolic {
    pub mod calculus;
    pub mod evaluator;
    pub mod expr;
    pub mod parse;
    pub mod vector3;
}

#[cfg(feature = "python")]
pub mod python;

pub use error::{EvaluatorError, FormulaError, MatrixError, SymbolicError};
pub use matrix::matrix::{Elimination, Matrix};
pub use matrix::matrix_gen::{GenElement, MatrixGen, RingElement};
pub use rings::fraction::Fraction;
pub use symbolic::evaluator::{EvaluatorConfig, SymbolicEvaluator, WolframEvaluator};
pub use symbolic::expr::Expr;
pub use symbolic::vector3::Vector3;

/// A Python module implemented in Rust.
#[cfg(feature = "python")]
#[pymodule]
fn world_engine(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<python::MatrixF64>()?;
    m.add_class::<python::MatrixExpr>()?;
    Ok(())
}
