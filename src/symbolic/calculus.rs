use crate::error::SymbolicError;
use crate::symbolic::expr::Expr;
use num_traits::Zero;
use std::collections::HashMap;

impl Expr {
    /// Numeric value with the given variable bindings. Unbound `e` and `pi`
    /// take their mathematical values.
    pub fn evaluate(&self, vars: &HashMap<String, f64>) -> Result<f64, SymbolicError> {
        match self {
            Expr::Num(value) => Ok(value.to_f64()),
            Expr::Sym(name) => match (vars.get(name), name.as_str()) {
                (Some(value), _) => Ok(*value),
                (None, "e") => Ok(std::f64::consts::E),
                (None, "pi") => Ok(std::f64::consts::PI),
                (None, _) => Err(SymbolicError::UndefinedSymbol(name.clone())),
            },
            Expr::Sum(terms) => terms.iter().map(|t| t.evaluate(vars)).sum(),
            Expr::Product(factors) => factors.iter().map(|f| f.evaluate(vars)).product(),
            Expr::Pow(base, exp) => Ok(base.evaluate(vars)?.powf(exp.evaluate(vars)?)),
            Expr::Call(name, args) => {
                let args = args
                    .iter()
                    .map(|a| a.evaluate(vars))
                    .collect::<Result<Vec<_>, _>>()?;
                match (name.as_str(), args.as_slice()) {
                    ("sqrt", [x]) => Ok(x.sqrt()),
                    ("exp", [x]) => Ok(x.exp()),
                    ("ln" | "log", [x]) => Ok(x.ln()),
                    ("sin", [x]) => Ok(x.sin()),
                    ("cos", [x]) => Ok(x.cos()),
                    ("tan", [x]) => Ok(x.tan()),
                    ("abs", [x]) => Ok(x.abs()),
                    _ => Err(SymbolicError::UnknownFunction(name.clone())),
                }
            }
        }
    }

    /// Replace every occurrence of the symbol `name`, renormalizing on the way up.
    pub fn substitute(&self, name: &str, value: &Expr) -> Expr {
        match self {
            Expr::Sym(s) if s == name => value.clone(),
            Expr::Num(_) | Expr::Sym(_) => self.clone(),
            Expr::Sum(terms) => Expr::sum(
                terms
                    .iter()
                    .map(|t| t.substitute(name, value))
                    .collect(),
            ),
            Expr::Product(factors) => Expr::product(
                factors
                    .iter()
                    .map(|f| f.substitute(name, value))
                    .collect(),
            ),
            Expr::Pow(base, exp) => {
                Expr::pow(base.substitute(name, value), exp.substitute(name, value))
            }
            Expr::Call(f, args) => Expr::call(
                f.clone(),
                args.iter().map(|a| a.substitute(name, value)).collect(),
            ),
        }
    }

    pub fn depends_on(&self, var: &str) -> bool {
        match self {
            Expr::Num(_) => false,
            Expr::Sym(s) => s == var,
            Expr::Sum(items) | Expr::Product(items) | Expr::Call(_, items) => {
                items.iter().any(|i| i.depends_on(var))
            }
            Expr::Pow(base, exp) => base.depends_on(var) || exp.depends_on(var),
        }
    }

    pub fn differentiate(&self, var: &str) -> Result<Expr, SymbolicError> {
        if !self.depends_on(var) {
            return Ok(Expr::zero());
        }
        match self {
            Expr::Num(_) => Ok(Expr::zero()),
            Expr::Sym(_) => Ok(Expr::int(1)),
            Expr::Sum(terms) => Ok(Expr::sum(
                terms
                    .iter()
                    .map(|t| t.differentiate(var))
                    .collect::<Result<_, _>>()?,
            )),
            Expr::Product(factors) => {
                let mut terms = vec![];
                for (i, factor) in factors.iter().enumerate() {
                    let d = factor.differentiate(var)?;
                    if d.is_zero() {
                        continue;
                    }
                    let mut others = factors.clone();
                    others[i] = d;
                    terms.push(Expr::product(others));
                }
                Ok(Expr::sum(terms))
            }
            Expr::Pow(base, exp) => {
                let base = (**base).clone();
                let exp = (**exp).clone();
                let d_base = base.differentiate(var)?;
                if !exp.depends_on(var) {
                    return Ok(exp.clone()
                        * Expr::pow(base, exp - Expr::int(1))
                        * d_base);
                }
                let d_exp = exp.differentiate(var)?;
                let whole = Expr::pow(base.clone(), exp.clone());
                Ok(whole * (d_exp * Expr::ln(base.clone()) + exp * d_base / base))
            }
            Expr::Call(name, args) => {
                let [u] = args.as_slice() else {
                    return Err(SymbolicError::NotDifferentiable(self.to_string()));
                };
                let outer = match name.as_str() {
                    "sin" => Expr::call("cos", vec![u.clone()]),
                    "cos" => -Expr::call("sin", vec![u.clone()]),
                    "tan" => Expr::pow(Expr::call("cos", vec![u.clone()]), Expr::int(-2)),
                    "exp" => Expr::exp(u.clone()),
                    "ln" | "log" => u.clone().recip(),
                    "sqrt" => (Expr::int(2) * Expr::sqrt(u.clone())).recip(),
                    _ => return Err(SymbolicError::NotDifferentiable(self.to_string())),
                };
                Ok(outer * u.differentiate(var)?)
            }
        }
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
