use crate::error::SymbolicError;
use crate::matrix::matrix_gen::RingElement;
use crate::symbolic::expr::Expr;
use num_traits::{One, Zero};
use std::collections::HashMap;
use std::fmt;
use std::ops;

/// Three components combined component-wise, so a `Vector3<T>` is itself a
/// matrix entry whenever `T` is.
///
/// Vectors form a ring but not a field: `(1, 0, 1)` is non-zero yet cannot be
/// divided by. Matrices of vectors therefore multiply but do not row-reduce.
///
/// ```compile_fail
/// use world_engine::{Elimination, Matrix, MatrixGen, Vector3};
///
/// let m = MatrixGen::from_list(vec![vec![Vector3::new(1.0, 0.0, 1.0)]]);
/// let _ = m.rref();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Vector3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T: RingElement> Vector3<T> {
    pub fn new(x: T, y: T, z: T) -> Self {
        Vector3 { x, y, z }
    }

    pub fn splat(value: T) -> Self {
        Vector3::new(value.clone(), value.clone(), value)
    }

    pub fn cross(&self, rhs: &Vector3<T>) -> Vector3<T> {
        Vector3::new(
            self.y.clone() * rhs.z.clone() - self.z.clone() * rhs.y.clone(),
            self.z.clone() * rhs.x.clone() - self.x.clone() * rhs.z.clone(),
            self.x.clone() * rhs.y.clone() - self.y.clone() * rhs.x.clone(),
        )
    }

    pub fn dot(&self, rhs: &Vector3<T>) -> T {
        self.x.clone() * rhs.x.clone()
            + self.y.clone() * rhs.y.clone()
            + self.z.clone() * rhs.z.clone()
    }

    pub fn scale(&self, factor: &T) -> Vector3<T> {
        Vector3::new(
            self.x.clone() * factor.clone(),
            self.y.clone() * factor.clone(),
            self.z.clone() * factor.clone(),
        )
    }

    fn zip_with(self, rhs: Vector3<T>, f: impl Fn(T, T) -> T) -> Vector3<T> {
        Vector3::new(f(self.x, rhs.x), f(self.y, rhs.y), f(self.z, rhs.z))
    }
}

impl Vector3<Expr> {
    /// Position from distance `r(t)`, horizontal angle `theta(t)` and
    /// elevation `beta(t)`, all in radians.
    pub fn position_vector_approx(r: &Expr, theta: &Expr, beta: &Expr) -> Vector3<Expr> {
        let cos_beta = Expr::call("cos", vec![beta.clone()]);
        let sin_beta = Expr::call("sin", vec![beta.clone()]);
        let cos_theta = Expr::call("cos", vec![theta.clone()]);
        let sin_theta = Expr::call("sin", vec![theta.clone()]);

        Vector3::new(
            r.clone() * cos_beta.clone() * cos_theta,
            r.clone() * cos_beta * sin_theta,
            r.clone() * sin_beta,
        )
    }

    /// Velocity-aware form: the time derivative of
    /// [`Vector3::position_vector_approx`] with respect to `t`.
    pub fn position_vector(
        r: &Expr,
        theta: &Expr,
        beta: &Expr,
    ) -> Result<Vector3<Expr>, SymbolicError> {
        let cos_beta = Expr::call("cos", vec![beta.clone()]);
        let sin_beta = Expr::call("sin", vec![beta.clone()]);
        let cos_theta = Expr::call("cos", vec![theta.clone()]);
        let sin_theta = Expr::call("sin", vec![theta.clone()]);
        let r_dot = r.differentiate("t")?;
        let theta_dot = theta.differentiate("t")?;
        let beta_dot = beta.differentiate("t")?;

        let radial = Vector3::new(
            r_dot.clone() * cos_beta.clone() * cos_theta.clone(),
            r_dot.clone() * cos_beta.clone() * sin_theta.clone(),
            r_dot * sin_beta.clone(),
        );
        let azimuthal = Vector3::new(
            -(theta_dot.clone() * r.clone() * cos_beta.clone() * sin_theta.clone()),
            theta_dot * r.clone() * cos_beta.clone() * cos_theta.clone(),
            Expr::zero(),
        );
        let elevation = Vector3::new(
            -(beta_dot.clone() * r.clone() * sin_beta.clone() * cos_theta),
            -(beta_dot.clone() * r.clone() * sin_beta * sin_theta),
            beta_dot * r.clone() * cos_beta,
        );
        Ok(radial + azimuthal + elevation)
    }

    pub fn solve_at_time(&self, time: f64) -> Result<Vector3<f64>, SymbolicError> {
        let vars = HashMap::from([("t".to_string(), time)]);
        Ok(Vector3::new(
            self.x.evaluate(&vars)?,
            self.y.evaluate(&vars)?,
            self.z.evaluate(&vars)?,
        ))
    }

    /// Central difference `(f(t + dt/2) - f(t - dt/2)) / dt`.
    pub fn finite_central_difference(
        &self,
        time: f64,
        interval: f64,
    ) -> Result<Vector3<f64>, SymbolicError> {
        let ahead = self.solve_at_time(time + interval / 2.0)?;
        let behind = self.solve_at_time(time - interval / 2.0)?;
        Ok((ahead - behind).scale(&(1.0 / interval)))
    }
}

impl<T: RingElement> ops::Add for Vector3<T> {
    type Output = Vector3<T>;

    fn add(self, rhs: Vector3<T>) -> Vector3<T> {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl<T: RingElement> ops::Sub for Vector3<T> {
    type Output = Vector3<T>;

    fn sub(self, rhs: Vector3<T>) -> Vector3<T> {
        self.zip_with(rhs, |a, b| a - b)
    }
}

impl<T: RingElement> ops::Mul for Vector3<T> {
    type Output = Vector3<T>;

    fn mul(self, rhs: Vector3<T>) -> Vector3<T> {
        self.zip_with(rhs, |a, b| a * b)
    }
}

impl<T: RingElement> Zero for Vector3<T> {
    fn zero() -> Self {
        Vector3::splat(T::zero())
    }

    fn is_zero(&self) -> bool {
        self.x.is_zero() && self.y.is_zero() && self.z.is_zero()
    }
}

impl<T: RingElement> One for Vector3<T> {
    fn one() -> Self {
        Vector3::splat(T::one())
    }
}

impl<T: RingElement> std::iter::Sum<Vector3<T>> for Vector3<T> {
    fn sum<I: Iterator<Item = Vector3<T>>>(iter: I) -> Vector3<T> {
        iter.fold(Vector3::zero(), |acc, v| acc + v)
    }
}

impl<T: fmt::Display> fmt::Display for Vector3<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
