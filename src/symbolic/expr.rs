use crate::rings::fraction::Fraction;
use itertools::Itertools;
use num_traits::{One, Zero};
use std::collections::BTreeMap;
use std::fmt;
use std::ops;

/// Symbolic expression kept in normal form.
///
/// Values are only ever produced by the normalizing constructors
/// ([`Expr::sum`], [`Expr::product`], [`Expr::pow`], ...), so the derived
/// `PartialEq` is structural equality of normal forms. `Ord` gives the
/// canonical order of terms and factors.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Expr {
    Num(Fraction),
    Sym(String),
    Pow(Box<Expr>, Box<Expr>),
    Product(Vec<Expr>),
    Sum(Vec<Expr>),
    Call(String, Vec<Expr>),
}

impl Expr {
    pub fn num(value: Fraction) -> Expr {
        Expr::Num(value)
    }

    pub fn int(value: i64) -> Expr {
        Expr::Num(Fraction::from_integer(value))
    }

    pub fn sym(name: impl Into<String>) -> Expr {
        Expr::Sym(name.into())
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Expr {
        Expr::Call(name.into(), args)
    }

    pub fn as_num(&self) -> Option<&Fraction> {
        match self {
            Expr::Num(value) => Some(value),
            _ => None,
        }
    }

    fn as_integer(&self) -> Option<i64> {
        self.as_num().and_then(|n| n.to_i64())
    }

    pub fn sum(terms: Vec<Expr>) -> Expr {
        let mut constant = Fraction::zero();
        let mut collected: BTreeMap<Expr, Fraction> = BTreeMap::new();

        for term in flatten(terms, |e| match e {
            Expr::Sum(inner) => Ok(inner),
            other => Err(other),
        }) {
            match split_coefficient(term) {
                (c, None) => constant = constant + c,
                (c, Some(rest)) => {
                    let slot = collected.entry(rest).or_insert_with(Fraction::zero);
                    *slot = slot.clone() + c;
                }
            }
        }

        let mut out = vec![];
        if !constant.is_zero() {
            out.push(Expr::Num(constant));
        }
        out.extend(
            collected
                .into_iter()
                .filter(|(_, c)| !c.is_zero())
                .map(|(rest, c)| with_coefficient(c, rest)),
        );

        match out.len() {
            0 => Expr::zero(),
            1 => out.remove(0),
            _ => Expr::Sum(out),
        }
    }

    pub fn product(factors: Vec<Expr>) -> Expr {
        let mut coefficient = Fraction::one();
        let mut bases: BTreeMap<Expr, Vec<Expr>> = BTreeMap::new();

        for factor in flatten(factors, |e| match e {
            Expr::Product(inner) => Ok(inner),
            other => Err(other),
        }) {
            match factor {
                Expr::Num(c) => coefficient = coefficient * c,
                Expr::Pow(base, exp) => bases.entry(*base).or_default().push(*exp),
                other => bases.entry(other).or_default().push(Expr::one()),
            }
        }
        if coefficient.is_zero() {
            return Expr::zero();
        }

        let mut factors = vec![];
        let mut regroup = false;
        for (base, exps) in bases {
            match Expr::pow(base, Expr::sum(exps)) {
                Expr::Num(c) => coefficient = coefficient * c,
                Expr::Product(inner) => {
                    regroup = true;
                    factors.extend(inner);
                }
                other => factors.push(other),
            }
        }
        if regroup {
            factors.push(Expr::Num(coefficient));
            return Expr::product(factors);
        }
        if coefficient.is_zero() {
            return Expr::zero();
        }

        if factors.is_empty() {
            return Expr::Num(coefficient);
        }
        if !coefficient.is_one() && factors.len() == 1 {
            if let Expr::Sum(terms) = &factors[0] {
                return Expr::sum(
                    terms
                        .iter()
                        .map(|t| Expr::product(vec![Expr::Num(coefficient.clone()), t.clone()]))
                        .collect(),
                );
            }
        }
        if coefficient.is_one() && factors.len() == 1 {
            return factors.remove(0);
        }
        if !coefficient.is_one() {
            factors.insert(0, Expr::Num(coefficient));
        }
        Expr::Product(factors)
    }

    pub fn pow(base: Expr, exp: Expr) -> Expr {
        if exp.is_zero() {
            return Expr::one();
        }
        if exp.is_one() || base.is_one() {
            return base;
        }

        let integer_exp = exp.as_integer();
        match (&base, integer_exp) {
            (Expr::Num(b), Some(n)) if folds_exactly(b, n) => match b.pow(n) {
                Some(value) => Expr::Num(value),
                None => Expr::Pow(Box::new(base), Box::new(exp)),
            },
            (Expr::Num(b), None) if b.is_zero() && exp.as_num().is_some_and(is_positive) => {
                Expr::zero()
            }
            (Expr::Pow(inner_base, inner_exp), Some(_)) => Expr::pow(
                (**inner_base).clone(),
                Expr::product(vec![(**inner_exp).clone(), exp]),
            ),
            (Expr::Product(factors), Some(_)) => Expr::product(
                factors
                    .iter()
                    .map(|f| Expr::pow(f.clone(), exp.clone()))
                    .collect(),
            ),
            (Expr::Call(name, args), Some(n)) if is_sqrt(name, args) && n % 2 == 0 => {
                Expr::pow(args[0].clone(), Expr::int(n / 2))
            }
            _ => Expr::Pow(Box::new(base), Box::new(exp)),
        }
    }

    pub fn sqrt(value: Expr) -> Expr {
        Expr::call("sqrt", vec![value])
    }

    pub fn exp(value: Expr) -> Expr {
        Expr::call("exp", vec![value])
    }

    pub fn ln(value: Expr) -> Expr {
        Expr::call("ln", vec![value])
    }

    pub fn recip(self) -> Expr {
        Expr::pow(self, Expr::int(-1))
    }

    /// `true` when the leading numeric coefficient is negative.
    fn is_negative_term(&self) -> bool {
        match self {
            Expr::Num(c) => c.is_negative(),
            Expr::Product(factors) => factors
                .first()
                .and_then(Expr::as_num)
                .is_some_and(Fraction::is_negative),
            _ => false,
        }
    }

    /// Wolfram Language input form.
    pub fn to_wolfram(&self) -> String {
        self.render(Style::Wolfram)
    }

    fn render(&self, style: Style) -> String {
        match self {
            Expr::Num(value) => value.to_string(),
            Expr::Sym(name) => style.symbol(name),
            Expr::Sum(terms) => {
                let mut out = String::new();
                for (i, term) in terms.iter().enumerate() {
                    if i == 0 {
                        out.push_str(&term.render(style));
                    } else if term.is_negative_term() {
                        out.push_str(" - ");
                        out.push_str(&(-term.clone()).render(style));
                    } else {
                        out.push_str(" + ");
                        out.push_str(&term.render(style));
                    }
                }
                out
            }
            Expr::Product(factors) => render_product(factors, style),
            Expr::Pow(base, exp) => match exp.as_num() {
                Some(e) if e.is_negative() => {
                    let flipped = Expr::pow((**base).clone(), Expr::Num(-e.clone()));
                    format!("1/{}", flipped.render_operand(style, Precedence::Power))
                }
                _ => format!(
                    "{}^{}",
                    base.render_operand(style, Precedence::Atom),
                    exp.render_operand(style, Precedence::Atom)
                ),
            },
            Expr::Call(name, args) => {
                let args = args.iter().map(|a| a.render(style)).join(", ");
                match style {
                    Style::Plain => format!("{}({})", name, args),
                    Style::Wolfram => format!("{}[{}]", wolfram_function(name), args),
                }
            }
        }
    }

    /// Render, wrapping in parentheses when binding looser than `context`.
    fn render_operand(&self, style: Style, context: Precedence) -> String {
        let text = self.render(style);
        if self.precedence() < context {
            format!("({})", text)
        } else {
            text
        }
    }

    fn precedence(&self) -> Precedence {
        match self {
            Expr::Sum(_) => Precedence::Sum,
            Expr::Product(_) => Precedence::Product,
            Expr::Num(c) if c.is_negative() => Precedence::Sum,
            Expr::Num(c) if !c.is_integer() => Precedence::Product,
            Expr::Pow(_, exp) if exp.as_num().is_some_and(Fraction::is_negative) => {
                Precedence::Product
            }
            Expr::Pow(_, _) => Precedence::Power,
            Expr::Num(_) | Expr::Sym(_) | Expr::Call(_, _) => Precedence::Atom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Sum,
    Product,
    Power,
    Atom,
}

#[derive(Debug, Clone, Copy)]
enum Style {
    Plain,
    Wolfram,
}

impl Style {
    fn symbol(&self, name: &str) -> String {
        match (self, name) {
            (Style::Wolfram, "pi") => "Pi".into(),
            (Style::Wolfram, "e") => "E".into(),
            _ => name.into(),
        }
    }
}

fn wolfram_function(name: &str) -> String {
    match name {
        "sqrt" => "Sqrt".into(),
        "exp" => "Exp".into(),
        "ln" | "log" => "Log".into(),
        "sin" => "Sin".into(),
        "cos" => "Cos".into(),
        "tan" => "Tan".into(),
        "abs" => "Abs".into(),
        other => other.into(),
    }
}

/// Largest power, in bits, that numeric folding is allowed to produce.
const MAX_FOLDED_BITS: u64 = 1 << 16;

/// `base^exp` is folded to a number only while the result stays small.
fn folds_exactly(base: &Fraction, exp: i64) -> bool {
    let bits = base.num.bits().max(base.den.bits());
    bits <= 1 || bits.saturating_mul(exp.unsigned_abs()) <= MAX_FOLDED_BITS
}

fn is_positive(value: &Fraction) -> bool {
    !value.is_negative()
}

fn is_sqrt(name: &str, args: &[Expr]) -> bool {
    name == "sqrt" && args.len() == 1
}

fn render_product(factors: &[Expr], style: Style) -> String {
    let (coefficient, rest) = match factors.split_first() {
        Some((Expr::Num(c), rest)) => (c.clone(), rest),
        _ => (Fraction::one(), factors),
    };

    let mut numerator = vec![];
    let mut denominator = vec![];
    let magnitude = coefficient.abs();
    if !magnitude.den.is_one() {
        denominator.push(magnitude.den.to_string());
    }
    for factor in rest {
        match factor {
            Expr::Pow(base, exp) if exp.as_num().is_some_and(Fraction::is_negative) => {
                let flipped = Expr::pow((**base).clone(), -(**exp).clone());
                denominator.push(flipped.render_operand(style, Precedence::Power));
            }
            other => numerator.push(other.render_operand(style, Precedence::Product)),
        }
    }
    if !magnitude.num.is_one() || numerator.is_empty() {
        numerator.insert(0, magnitude.num.to_string());
    }

    let sign = if coefficient.is_negative() { "-" } else { "" };
    let numerator = numerator.join("*");
    match denominator.len() {
        0 => format!("{}{}", sign, numerator),
        1 => format!("{}{}/{}", sign, numerator, denominator[0]),
        _ => format!("{}{}/({})", sign, numerator, denominator.join("*")),
    }
}

/// Flatten one level of nesting recursively, `open` yielding the children of
/// a node of the same kind.
fn flatten(items: Vec<Expr>, open: fn(Expr) -> Result<Vec<Expr>, Expr>) -> Vec<Expr> {
    let mut out = vec![];
    let mut stack: Vec<Expr> = items.into_iter().rev().collect();
    while let Some(item) = stack.pop() {
        match open(item) {
            Ok(children) => stack.extend(children.into_iter().rev()),
            Err(leaf) => out.push(leaf),
        }
    }
    out
}

fn split_coefficient(term: Expr) -> (Fraction, Option<Expr>) {
    match term {
        Expr::Num(c) => (c, None),
        Expr::Product(factors) => {
            if let Some(Expr::Num(c)) = factors.first() {
                let c = c.clone();
                let mut rest = factors[1..].to_vec();
                let rest = if rest.len() == 1 {
                    rest.remove(0)
                } else {
                    Expr::Product(rest)
                };
                return (c, Some(rest));
            }
            (Fraction::one(), Some(Expr::Product(factors)))
        }
        other => (Fraction::one(), Some(other)),
    }
}

fn with_coefficient(coefficient: Fraction, rest: Expr) -> Expr {
    if coefficient.is_one() {
        return rest;
    }
    match rest {
        Expr::Product(factors) => Expr::Product(
            std::iter::once(Expr::Num(coefficient))
                .chain(factors)
                .collect(),
        ),
        other => Expr::Product(vec![Expr::Num(coefficient), other]),
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(Style::Plain))
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Expr::int(value)
    }
}

impl From<Fraction> for Expr {
    fn from(value: Fraction) -> Self {
        Expr::Num(value)
    }
}

impl Zero for Expr {
    fn zero() -> Expr {
        Expr::Num(Fraction::zero())
    }

    fn is_zero(&self) -> bool {
        matches!(self, Expr::Num(c) if c.is_zero())
    }
}

impl One for Expr {
    fn one() -> Expr {
        Expr::Num(Fraction::one())
    }
}

impl ops::Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Expr) -> Expr {
        Expr::sum(vec![self, rhs])
    }
}

impl ops::Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Expr) -> Expr {
        Expr::sum(vec![self, -rhs])
    }
}

impl ops::Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr::product(vec![Expr::int(-1), self])
    }
}

impl ops::Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Expr {
        Expr::product(vec![self, rhs])
    }
}

impl ops::Div for Expr {
    type Output = Expr;

    fn div(self, rhs: Expr) -> Expr {
        Expr::product(vec![self, rhs.recip()])
    }
}

impl std::iter::Sum<Expr> for Expr {
    fn sum<I: Iterator<Item = Expr>>(iter: I) -> Expr {
        Expr::sum(iter.collect())
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expr {
        Expr::sym("x")
    }

    fn y() -> Expr {
        Expr::sym("y")
    }

    #[test]
    fn test_expr_collects_terms() {
        assert_eq!("1 + x", format!("{}", x() + Expr::int(1)));
        assert_eq!("x", format!("{}", (x() + Expr::int(1)) - Expr::int(1)));
        assert_eq!("5 + 5*x", format!("{}", (x() + Expr::int(1)) * Expr::int(5)));

        let p = (y() * Expr::int(2) + Expr::int(3) + x()) * Expr::int(5);
        assert_eq!("15 + 5*x + 10*y", format!("{}", p));
        let p = p - x() * Expr::int(5);
        assert_eq!("15 + 10*y", format!("{}", p));
        assert!((p.clone() - p).is_zero());
    }

    #[test]
    fn test_expr_products_merge_powers() {
        assert_eq!("x^2", format!("{}", x() * x()));
        assert_eq!("x^2*y", format!("{}", x() * y() * x()));
        assert_eq!(Expr::one(), x() / x());
        assert_eq!(y(), (x() * y()) / x());
        assert_eq!("x/y", format!("{}", x() / y()));
        assert_eq!("1/x", format!("{}", Expr::one() / x()));
        assert_eq!("-x/2", format!("{}", -x() / Expr::int(2)));
        assert_eq!("x/(2*y)", format!("{}", x() / (Expr::int(2) * y())));
    }

    #[test]
    fn test_expr_sum_factors() {
        let s = x() + Expr::int(1);
        assert!((s.clone() - s.clone()).is_zero());
        assert_eq!(Expr::one(), s.clone() / s.clone());
        assert_eq!("x^2/(1 + x)", format!("{}", x() * x() / s.clone()));
        assert_eq!("y*(1 + x)", format!("{}", s.clone() * y()));
        assert_eq!("-1 - x", format!("{}", -s));
    }

    #[test]
    fn test_expr_numbers_are_exact() {
        let half = Expr::int(1) / Expr::int(2);
        assert_eq!("1/2", format!("{}", half));
        assert_eq!("-1/2", format!("{}", -half.clone()));
        assert_eq!(Expr::one(), half.clone() + half.clone());
        assert_eq!("1/4", format!("{}", Expr::pow(half, Expr::int(2))));
        assert!((Expr::int(0) * x()).is_zero());
    }

    #[test]
    fn test_expr_pow_rules() {
        assert_eq!(Expr::one(), Expr::pow(x(), Expr::zero()));
        assert_eq!(x(), Expr::pow(x(), Expr::one()));
        assert_eq!(
            Expr::pow(x(), Expr::int(6)),
            Expr::pow(Expr::pow(x(), Expr::int(2)), Expr::int(3))
        );
        let root = Expr::sqrt(Expr::int(2));
        assert_eq!(Expr::int(2), root.clone() * root);
        assert_eq!(
            Expr::int(8) / Expr::int(9),
            Expr::pow(Expr::sqrt(Expr::int(8) / Expr::int(9)), Expr::int(2))
        );
        assert_eq!("x^(1/2)", format!("{}", Expr::pow(x(), Expr::int(1) / Expr::int(2))));
    }

    #[test]
    fn test_expr_large_powers_stay_symbolic() {
        let start = std::time::Instant::now();
        let huge = Expr::parse("3^3000000").unwrap();
        assert!(start.elapsed() < std::time::Duration::from_secs(1));
        assert_eq!("3^3000000", format!("{}", huge));
        assert_eq!(huge.clone() * huge.clone(), Expr::parse("3^6000000").unwrap());

        assert_eq!(Expr::int(1024), Expr::parse("2^10").unwrap());
        assert_eq!(Expr::int(8), Expr::parse("(1/2)^(-3)").unwrap());
        assert_eq!(Expr::int(1), Expr::parse("(-1)^3000000").unwrap());
        assert!(Expr::parse("0^3000000").unwrap().is_zero());
    }

    #[test]
    fn test_expr_ordering_is_canonical() {
        assert_eq!(x() + y(), y() + x());
        assert_eq!(x() * y(), y() * x());
        assert_eq!(
            (x() + y()) * (x() - y()),
            (x() - y()) * (y() + x())
        );
    }

    #[test]
    fn test_expr_wolfram_form() {
        let e = Expr::sqrt(Expr::int(1) - x()) * Expr::sym("pi");
        assert_eq!("pi*sqrt(1 - x)", format!("{}", e));
        assert_eq!("Pi*Sqrt[1 - x]", e.to_wolfram());
        assert_eq!(
            "4*EllipticE[8/9]",
            (Expr::int(4) * Expr::call("EllipticE", vec![Expr::int(8) / Expr::int(9)])).to_wolfram()
        );
    }
}
