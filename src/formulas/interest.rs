use crate::symbolic::expr::Expr;
use num_traits::One;

#[derive(Debug, Clone, PartialEq)]
pub struct Interest<T> {
    pub principal: T,
    pub yearly_interest_rate: T,
}

impl<T> Interest<T> {
    pub fn new(principal: T, yearly_interest_rate: T) -> Self {
        Interest {
            principal,
            yearly_interest_rate,
        }
    }
}

impl Interest<f64> {
    /// Continuous compounding: `P e^(r n)`.
    pub fn balance_after_years(&self, years: f64) -> f64 {
        self.principal * (self.yearly_interest_rate * years).exp()
    }

    /// Equal annual payment recovering the principal over `years`:
    /// `P r (1+r)^n / ((1+r)^n - 1)`.
    pub fn annual_basis(&self, years: f64) -> f64 {
        let growth = (1.0 + self.yearly_interest_rate).powf(years);
        self.principal * (self.yearly_interest_rate * growth / (growth - 1.0))
    }
}

impl Interest<Expr> {
    pub fn balance_after_years(&self, years: &Expr) -> Expr {
        self.principal.clone() * Expr::exp(self.yearly_interest_rate.clone() * years.clone())
    }

    pub fn annual_basis(&self, years: &Expr) -> Expr {
        let rate = self.yearly_interest_rate.clone();
        let growth = Expr::pow(Expr::one() + rate.clone(), years.clone());
        self.principal.clone() * (rate * growth.clone() / (growth - Expr::one()))
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn round(value: f64, digits: i32) -> f64 {
        let scale = 10f64.powi(digits);
        (value * scale).round() / scale
    }

    #[test]
    fn test_balance_after_years() {
        let a = Interest::new(180_000.0, 0.07);
        assert_eq!(round(a.balance_after_years(10.0), 3), 362475.487);

        let b = Interest::new(Expr::int(180_000), Expr::parse("0.07").unwrap());
        let balance = b.balance_after_years(&Expr::int(10));
        assert_eq!(format!("{}", balance), "180000*exp(7/10)");
        assert_eq!(round(balance.evaluate(&HashMap::new()).unwrap(), 3), 362475.487);
    }

    #[test]
    fn test_annual_basis() {
        let a = Interest::new(180_000.0, 0.07);
        assert_eq!(round(a.annual_basis(10.0), 0), 25628.0);

        let b = Interest::new(Expr::int(180_000), Expr::parse("0.07").unwrap());
        let exact = b.annual_basis(&Expr::int(10));
        assert!(exact.as_num().is_some());
        assert!((exact.evaluate(&HashMap::new()).unwrap() - a.annual_basis(10.0)).abs() < 1e-6);
    }

    #[test]
    fn test_overhaul_break_even() {
        // $180,000 facility at 7% over 10 years, $5,500 per engine in-house
        // against $7,200 per engine outside: fewest engines a year that pays back.
        let upfront = Interest::new(Expr::int(180_000), Expr::parse("0.07").unwrap());
        let in_house = upfront.annual_basis(&Expr::int(10)) + Expr::parse("5500*X").unwrap();
        let external = Expr::parse("7200*X").unwrap();
        let difference = in_house - external;

        let mut off_by = f64::MAX;
        let mut answer = 0;
        for engines in 4..25 {
            let vars = HashMap::from([("X".to_string(), engines as f64)]);
            let result = difference.evaluate(&vars).unwrap();
            if result < 0.0 && -result < off_by {
                off_by = -result;
                answer = engines;
            }
        }
        assert_eq!(answer, 16);
    }
}
