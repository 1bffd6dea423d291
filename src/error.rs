use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    #[error("dimensions not compatible: {left_rows}x{left_cols} and {right_rows}x{right_cols}")]
    DimensionMismatch {
        left_rows: usize,
        left_cols: usize,
        right_rows: usize,
        right_cols: usize,
    },

    #[error("matrix is not square: {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("matrix is singular and cannot be inverted")]
    SingularMatrix,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolicError {
    #[error("parse error at {position}: {message}")]
    Parse { position: usize, message: String },

    #[error("undefined symbol: {0}")]
    UndefinedSymbol(String),

    #[error("unknown function: {0}")]
    UnknownFunction(String),

    #[error("cannot differentiate: {0}")]
    NotDifferentiable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluatorError {
    #[error("symbolic evaluator unavailable: {0}")]
    EvaluatorUnavailable(String),

    #[error("evaluator could not parse `{0}`")]
    ParseError(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    #[error("pumps must share density and gravity ({0} vs {1})")]
    IncompatiblePumps(String, String),

    #[error(transparent)]
    Evaluator(#[from] EvaluatorError),

    #[error(transparent)]
    Symbolic(#[from] SymbolicError),
}
