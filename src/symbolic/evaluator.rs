use crate::error::EvaluatorError;
use log::{debug, warn};
use std::process::Command;

/// Environment variable naming the evaluator executable.
pub const PROGRAM_ENV: &str = "WORLD_ENGINE_WOLFRAM";

/// External computer-algebra service. Every call is an independent
/// request/response; implementations may start a fresh process per call.
pub trait SymbolicEvaluator {
    /// Evaluate Wolfram Language input and return the printed result.
    fn evaluate(&self, expression: &str) -> Result<String, EvaluatorError>;

    fn simplify(&self, expression: &str) -> Result<String, EvaluatorError> {
        self.evaluate(&format!(
            "ToString[FullSimplify[{}], InputForm]",
            expression
        ))
    }

    fn to_tex(&self, expression: &str) -> Result<String, EvaluatorError> {
        self.evaluate(&format!("ToString[TeXForm[{}]]", expression))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluatorConfig {
    pub program: String,
    /// Arguments placed before the expression text.
    pub args: Vec<String>,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        EvaluatorConfig {
            program: "wolframscript".into(),
            args: vec!["-code".into()],
        }
    }
}

impl EvaluatorConfig {
    /// Default configuration with the program overridden by `WORLD_ENGINE_WOLFRAM`.
    pub fn from_env() -> Self {
        let mut config = EvaluatorConfig::default();
        if let Ok(program) = std::env::var(PROGRAM_ENV) {
            if !program.trim().is_empty() {
                config.program = program;
            }
        }
        config
    }
}

/// Runs one evaluator process per request.
#[derive(Debug, Clone, Default)]
pub struct WolframEvaluator {
    pub config: EvaluatorConfig,
}

impl WolframEvaluator {
    pub fn new(config: EvaluatorConfig) -> Self {
        WolframEvaluator { config }
    }
}

impl SymbolicEvaluator for WolframEvaluator {
    fn evaluate(&self, expression: &str) -> Result<String, EvaluatorError> {
        debug!("launching `{}` for `{}`", self.config.program, expression);

        let output = Command::new(&self.config.program)
            .args(&self.config.args)
            .arg(expression)
            .output()
            .map_err(|e| {
                EvaluatorError::EvaluatorUnavailable(format!("{}: {}", self.config.program, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!("`{}` exited with {}", self.config.program, output.status);
            return Err(EvaluatorError::EvaluatorUnavailable(format!(
                "{} exited with {}: {}",
                self.config.program, output.status, stderr
            )));
        }

        let answer = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if answer.contains("Syntax::") || answer == "$Failed" {
            return Err(EvaluatorError::ParseError(expression.to_string()));
        }
        Ok(answer)
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn echo() -> WolframEvaluator {
        WolframEvaluator::new(EvaluatorConfig {
            program: "echo".into(),
            args: vec![],
        })
    }

    #[test]
    fn test_evaluator_round_trip_through_process() {
        let evaluator = echo();
        assert_eq!(evaluator.evaluate("2+2").unwrap(), "2+2");
        assert_eq!(
            evaluator.simplify("1+1+1+1+1").unwrap(),
            "ToString[FullSimplify[1+1+1+1+1], InputForm]"
        );
        assert_eq!(evaluator.to_tex("x^2").unwrap(), "ToString[TeXForm[x^2]]");
    }

    #[test]
    fn test_evaluator_unavailable() {
        let missing = WolframEvaluator::new(EvaluatorConfig {
            program: "/nonexistent/wolframscript".into(),
            args: vec!["-code".into()],
        });
        assert!(matches!(
            missing.evaluate("2+2"),
            Err(EvaluatorError::EvaluatorUnavailable(_))
        ));

        let failing = WolframEvaluator::new(EvaluatorConfig {
            program: "false".into(),
            args: vec![],
        });
        assert!(matches!(
            failing.evaluate("2+2"),
            Err(EvaluatorError::EvaluatorUnavailable(_))
        ));
    }

    #[test]
    fn test_evaluator_parse_error() {
        assert_eq!(
            echo().evaluate("$Failed"),
            Err(EvaluatorError::ParseError("$Failed".into()))
        );
    }

    #[test]
    fn test_default_config() {
        let config = EvaluatorConfig::default();
        assert_eq!(config.program, "wolframscript");
        assert_eq!(config.args, vec!["-code".to_string()]);
    }
}
