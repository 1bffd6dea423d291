use crate::error::FormulaError;
use crate::symbolic::evaluator::SymbolicEvaluator;
use crate::symbolic::expr::Expr;
use log::debug;
use num_traits::One;
use std::f64::consts::PI;

#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse<T> {
    pub semi_major_axis_a: T,
    pub semi_minor_axis_b: T,
}

impl<T> Ellipse<T> {
    pub fn new(semi_major_axis_a: T, semi_minor_axis_b: T) -> Self {
        Ellipse {
            semi_major_axis_a,
            semi_minor_axis_b,
        }
    }
}

impl Ellipse<f64> {
    /// `sqrt(1 - (b/a)^2)`, taking the longer axis as the major one.
    pub fn eccentricity(&self) -> f64 {
        let (major, minor) = self.ordered_axes();
        let ratio = minor / major;
        (1.0 - ratio * ratio).sqrt()
    }

    /// `4 a E(e^2)`.
    pub fn perimeter(&self) -> f64 {
        let (major, _) = self.ordered_axes();
        let e = self.eccentricity();
        4.0 * major * complete_elliptic_e(e * e)
    }

    fn ordered_axes(&self) -> (f64, f64) {
        let (a, b) = (self.semi_major_axis_a.abs(), self.semi_minor_axis_b.abs());
        if b > a {
            (b, a)
        } else {
            (a, b)
        }
    }
}

impl Ellipse<Expr> {
    pub fn eccentricity(&self) -> Expr {
        let ratio = self.semi_minor_axis_b.clone() / self.semi_major_axis_a.clone();
        Expr::sqrt(Expr::one() - ratio.clone() * ratio)
    }

    /// Sends `N[4*a*EllipticE[e^2]]` to `evaluator` and parses the reply.
    pub fn perimeter(&self, evaluator: &impl SymbolicEvaluator) -> Result<Expr, FormulaError> {
        let e = self.eccentricity();
        let exact = Expr::int(4)
            * self.semi_major_axis_a.clone()
            * Expr::call("EllipticE", vec![e.clone() * e]);
        let request = format!("N[{}]", exact.to_wolfram());
        debug!("ellipse perimeter request: {}", request);

        let reply = evaluator.evaluate(&request)?;
        Ok(Expr::parse(&reply)?)
    }
}

/// Complete elliptic integral of the second kind `E(m)`, parameter `m = k^2`,
/// by the arithmetic-geometric mean.
pub fn complete_elliptic_e(m: f64) -> f64 {
    if m == 1.0 {
        return 1.0;
    }
    let mut a = 1.0;
    let mut g = (1.0 - m).sqrt();
    let mut weight = 0.5;
    let mut sum = weight * m;
    for _ in 0..64 {
        if (a - g).abs() <= f64::EPSILON * a {
            break;
        }
        let c = (a - g) / 2.0;
        let next_a = (a + g) / 2.0;
        g = (a * g).sqrt();
        a = next_a;
        weight *= 2.0;
        sum += weight * c * c;
    }
    PI / (2.0 * a) * (1.0 - sum)
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvaluatorError;
    use std::cell::RefCell;

    fn round(value: f64, digits: i32) -> f64 {
        let scale = 10f64.powi(digits);
        (value * scale).round() / scale
    }

    struct Canned {
        reply: Result<String, EvaluatorError>,
        requests: RefCell<Vec<String>>,
    }

    impl SymbolicEvaluator for Canned {
        fn evaluate(&self, expression: &str) -> Result<String, EvaluatorError> {
            self.requests.borrow_mut().push(expression.to_string());
            self.reply.clone()
        }
    }

    #[test]
    fn test_eccentricity() {
        assert_eq!(round(Ellipse::new(10.0, 5.0).eccentricity(), 3), 0.866);
        assert_eq!(Ellipse::new(5.0, 10.0).eccentricity(), Ellipse::new(10.0, 5.0).eccentricity());

        let e = Ellipse::new(Expr::int(15), Expr::int(5)).eccentricity();
        assert_eq!(e, Expr::parse("sqrt(8/9)").unwrap());
        assert_eq!(format!("{}", e), "sqrt(8/9)");
    }

    #[test]
    fn test_perimeter() {
        assert_eq!(round(Ellipse::new(10.0, 5.0).perimeter(), 2), 48.44);
        assert_eq!(round(Ellipse::new(15.0, 5.0).perimeter(), 2), 66.82);

        let circle = Ellipse::new(3.0, 3.0).perimeter();
        assert!((circle - 6.0 * PI).abs() < 1e-12);
        assert_eq!(Ellipse::new(2.0, 0.0).perimeter(), 8.0);
    }

    #[test]
    fn test_perimeter_through_evaluator() {
        let evaluator = Canned {
            reply: Ok("66.8245".into()),
            requests: RefCell::new(vec![]),
        };
        let p = Ellipse::new(Expr::int(15), Expr::int(5)).perimeter(&evaluator).unwrap();

        assert_eq!(p, Expr::parse("66.8245").unwrap());
        assert_eq!(*evaluator.requests.borrow(), vec!["N[60*EllipticE[8/9]]".to_string()]);
    }

    #[test]
    fn test_perimeter_evaluator_failures() {
        let ellipse = Ellipse::new(Expr::int(15), Expr::int(5));

        let offline = Canned {
            reply: Err(EvaluatorError::EvaluatorUnavailable("wolframscript".into())),
            requests: RefCell::new(vec![]),
        };
        assert!(matches!(
            ellipse.perimeter(&offline),
            Err(FormulaError::Evaluator(EvaluatorError::EvaluatorUnavailable(_)))
        ));

        let garbage = Canned {
            reply: Ok("66.8 ?".into()),
            requests: RefCell::new(vec![]),
        };
        assert!(matches!(ellipse.perimeter(&garbage), Err(FormulaError::Symbolic(_))));
    }
}
