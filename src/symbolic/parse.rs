use crate::error::SymbolicError;
use crate::rings::fraction::Fraction;
use crate::symbolic::expr::Expr;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(String),
    Ident(String),
    Op(char),
}

fn tokenize(input: &str) -> Result<Vec<(usize, Token)>, SymbolicError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = vec![];
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
        } else if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            tokens.push((start, Token::Number(chars[start..i].iter().collect())));
        } else if c.is_alphabetic() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            tokens.push((start, Token::Ident(chars[start..i].iter().collect())));
        } else if "+-*/^()[],".contains(c) {
            tokens.push((i, Token::Op(c)));
            i += 1;
        } else {
            return Err(SymbolicError::Parse {
                position: i,
                message: format!("unexpected character `{}`", c),
            });
        }
    }
    Ok(tokens)
}

/// Deepest nesting of parentheses, signs, powers and calls accepted.
const MAX_DEPTH: usize = 128;

/// Recursive descent over
///
/// ```text
/// expr  := term (('+' | '-') term)*
/// term  := unary (('*' | '/') unary)*
/// unary := '-' unary | '+' unary | power
/// power := atom ('^' unary)?
/// atom  := number | ident | ident '(' args ')' | ident '[' args ']' | '(' expr ')'
/// ```
struct Parser {
    tokens: Vec<(usize, Token)>,
    pos: usize,
    end: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(_, t)| t)
    }

    fn position(&self) -> usize {
        self.tokens.get(self.pos).map(|(p, _)| *p).unwrap_or(self.end)
    }

    fn error(&self, message: impl Into<String>) -> SymbolicError {
        SymbolicError::Parse {
            position: self.position(),
            message: message.into(),
        }
    }

    fn eat(&mut self, op: char) -> bool {
        if self.peek() == Some(&Token::Op(op)) {
            self.pos += 1;
            return true;
        }
        false
    }

    fn expect(&mut self, op: char) -> Result<(), SymbolicError> {
        if self.eat(op) {
            return Ok(());
        }
        Err(self.error(format!("expected `{}`", op)))
    }

    fn expr(&mut self) -> Result<Expr, SymbolicError> {
        let mut terms = vec![self.term()?];
        loop {
            if self.eat('+') {
                terms.push(self.term()?);
            } else if self.eat('-') {
                terms.push(-self.term()?);
            } else {
                return Ok(Expr::sum(terms));
            }
        }
    }

    fn term(&mut self) -> Result<Expr, SymbolicError> {
        let mut value = self.unary()?;
        loop {
            if self.eat('*') {
                value = value * self.unary()?;
            } else if self.eat('/') {
                value = value / self.unary()?;
            } else {
                return Ok(value);
            }
        }
    }

    /// Every recursive rule passes through here, so this bounds the stack.
    fn unary(&mut self) -> Result<Expr, SymbolicError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error("expression nested too deeply"));
        }
        self.depth += 1;
        let value = self.signed();
        self.depth -= 1;
        value
    }

    fn signed(&mut self) -> Result<Expr, SymbolicError> {
        if self.eat('-') {
            return Ok(-self.unary()?);
        }
        if self.eat('+') {
            return self.unary();
        }
        self.power()
    }

    fn power(&mut self) -> Result<Expr, SymbolicError> {
        let base = self.atom()?;
        if self.eat('^') {
            let exp = self.unary()?;
            return Ok(Expr::pow(base, exp));
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<Expr, SymbolicError> {
        let position = self.position();
        match self.tokens.get(self.pos).map(|(_, t)| t.clone()) {
            Some(Token::Number(text)) => {
                self.pos += 1;
                let value = Fraction::from_str(&text).map_err(|_| SymbolicError::Parse {
                    position,
                    message: format!("invalid number `{}`", text),
                })?;
                Ok(Expr::num(value))
            }
            Some(Token::Ident(name)) => {
                self.pos += 1;
                let close = if self.eat('(') {
                    ')'
                } else if self.eat('[') {
                    ']'
                } else {
                    return Ok(Expr::sym(name));
                };
                let mut args = vec![];
                if !self.eat(close) {
                    loop {
                        args.push(self.expr()?);
                        if self.eat(close) {
                            break;
                        }
                        self.expect(',')?;
                    }
                }
                Ok(Expr::call(name, args))
            }
            Some(Token::Op('(')) => {
                self.pos += 1;
                let inner = self.expr()?;
                self.expect(')')?;
                Ok(inner)
            }
            Some(Token::Op(op)) => Err(self.error(format!("unexpected `{}`", op))),
            None => Err(self.error("unexpected end of input")),
        }
    }
}

impl Expr {
    /// Parse infix text such as `3.0 / 2.0`, `x^2/(1 + x)` or `sqrt(8/9)`.
    /// Decimal literals are kept exact.
    pub fn parse(input: &str) -> Result<Expr, SymbolicError> {
        let mut parser = Parser {
            tokens: tokenize(input)?,
            pos: 0,
            end: input.chars().count(),
            depth: 0,
        };
        let value = parser.expr()?;
        if parser.pos != parser.tokens.len() {
            return Err(parser.error("trailing input"));
        }
        Ok(value)
    }
}

impl FromStr for Expr {
    type Err = SymbolicError;

    fn from_str(s: &str) -> Result<Self, SymbolicError> {
        Expr::parse(s)
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
