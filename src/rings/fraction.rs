use crate::error::SymbolicError;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::fmt::Display;
use std::ops;
use std::str::FromStr;

/// Exact rational number, always reduced with a positive denominator.
#[derive(Debug, Clone)]
pub struct Fraction {
    pub num: BigInt,
    pub den: BigInt,
}

impl Fraction {
    pub fn new(num: BigInt, den: BigInt) -> Self {
        if den.is_zero() {
            panic!("Denominator cannot be zero");
        }

        let g = &num.gcd(&den);
        let num = num / g;
        let den = den / g;

        if den < BigInt::zero() {
            return Self {
                num: -num,
                den: -den,
            };
        }
        Self { num, den }
    }

    pub fn from_integer(value: i64) -> Self {
        Fraction {
            num: BigInt::from(value),
            den: BigInt::one(),
        }
    }

    pub fn is_integer(&self) -> bool {
        self.den.is_one()
    }

    pub fn is_negative(&self) -> bool {
        self.num.is_negative()
    }

    pub fn abs(&self) -> Fraction {
        Fraction {
            num: self.num.abs(),
            den: self.den.clone(),
        }
    }

    /// `None` for the reciprocal of zero.
    pub fn recip(&self) -> Option<Fraction> {
        if self.num.is_zero() {
            return None;
        }
        Some(Fraction::new(self.den.clone(), self.num.clone()))
    }

    /// Exact integer power. `None` when raising zero to a negative power.
    pub fn pow(&self, exp: i64) -> Option<Fraction> {
        let base = if exp < 0 { self.recip()? } else { self.clone() };
        let exp = u32::try_from(exp.unsigned_abs()).ok()?;
        Some(Fraction {
            num: num_traits::pow(base.num, exp as usize),
            den: num_traits::pow(base.den, exp as usize),
        })
    }

    pub fn to_i64(&self) -> Option<i64> {
        if !self.is_integer() {
            return None;
        }
        self.num.to_i64()
    }

    pub fn to_f64(&self) -> f64 {
        match (self.num.to_f64(), self.den.to_f64()) {
            (Some(n), Some(d)) => n / d,
            _ => f64::NAN,
        }
    }
}

impl From<i64> for Fraction {
    fn from(value: i64) -> Self {
        Fraction::from_integer(value)
    }
}

impl FromStr for Fraction {
    type Err = SymbolicError;

    /// Accepts `7`, `-3/4` and exact decimals such as `0.07`.
    fn from_str(s: &str) -> Result<Self, SymbolicError> {
        let invalid = |message: &str| SymbolicError::Parse {
            position: 0,
            message: format!("{} `{}`", message, s),
        };

        let mut parts = s.trim().split('/');
        let num = parse_decimal(parts.next().ok_or_else(|| invalid("no number in"))?)
            .ok_or_else(|| invalid("invalid number"))?;
        let den = match parts.next() {
            Some(den) => parse_decimal(den).ok_or_else(|| invalid("invalid number"))?,
            None => Fraction::one(),
        };
        if parts.next().is_some() {
            return Err(invalid("too many `/` in"));
        }
        if den.is_zero() {
            return Err(invalid("zero denominator in"));
        }
        Ok(num / den)
    }
}

fn parse_decimal(text: &str) -> Option<Fraction> {
    let text = text.trim();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.chars().chain(frac_part.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }

    let all_digits = format!("{}{}", int_part, frac_part);
    let num = BigInt::parse_bytes(all_digits.as_bytes(), 10)?;
    let den = num_traits::pow(BigInt::from(10), frac_part.len());
    let value = Fraction::new(num, den);
    Some(if negative { -value } else { value })
}

impl ops::Add for Fraction {
    type Output = Fraction;

    fn add(self, rhs: Fraction) -> Fraction {
        if self.den == rhs.den {
            return Fraction::new(self.num + rhs.num, self.den);
        }

        Fraction::new(
            &self.num * &rhs.den + &rhs.num * &self.den,
            &self.den * &rhs.den,
        )
    }
}

impl ops::Sub for Fraction {
    type Output = Fraction;

    fn sub(self, rhs: Fraction) -> Fraction {
        self + -rhs
    }
}

impl ops::Neg for Fraction {
    type Output = Fraction;

    fn neg(self) -> Fraction {
        Fraction {
            num: -self.num,
            den: self.den,
        }
    }
}

impl ops::Div for Fraction {
    type Output = Fraction;

    fn div(self, rhs: Fraction) -> Fraction {
        Fraction::new(self.num * rhs.den, self.den * rhs.num)
    }
}

impl ops::Mul for Fraction {
    type Output = Fraction;

    fn mul(self, rhs: Fraction) -> Fraction {
        Fraction::new(self.num * rhs.num, self.den * rhs.den)
    }
}

impl One for Fraction {
    fn one() -> Fraction {
        Fraction::from_integer(1)
    }
}

impl Zero for Fraction {
    fn zero() -> Fraction {
        Fraction::from_integer(0)
    }

    fn is_zero(&self) -> bool {
        self.num.is_zero()
    }
}

impl Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den.is_one() {
            return write!(f, "{}", self.num);
        }
        write!(f, "{}/{}", self.num, self.den)
    }
}

impl PartialEq<Fraction> for Fraction {
    fn eq(&self, rhs: &Fraction) -> bool {
        &self.num * &rhs.den == &rhs.num * &self.den
    }
}

impl PartialEq<i64> for Fraction {
    fn eq(&self, rhs: &i64) -> bool {
        self.num == &self.den * rhs
    }
}

impl PartialOrd<Fraction> for Fraction {
    fn partial_cmp(&self, rhs: &Fraction) -> Option<Ordering> {
        Some(self.cmp(rhs))
    }
}

impl Eq for Fraction {}
impl Ord for Fraction {
    fn cmp(&self, rhs: &Fraction) -> Ordering {
        let a = &self.num * &rhs.den;
        let b = &rhs.num * &self.den;
        a.cmp(&b)
    }
}

impl std::iter::Sum<Fraction> for Fraction {
    fn sum<I: Iterator<Item = Fraction>>(iter: I) -> Fraction {
        iter.fold(Fraction::zero(), |acc, f| acc + f)
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
