//! Gettext-style plural rule parsing and evaluation.
//!
//! A rule header looks like `nplurals=2; plural=(n != 1);`. The
//! `plural=` expression is the C integer expression subset gettext
//! allows: the variable `n`, decimal literals, `% + - * /`, relational
//! and logical operators, `!`, and the ternary `?:`. Evaluating it for
//! a count yields a zero-based plural-form index in `[0, nplurals)`.
//!
//! Parsing produces an owned AST so a rule can be validated over a
//! whole range of counts before the table it belongs to is trusted.

use std::fmt;
use thiserror::Error;

/// Counts checked by [`PluralRule::validate`].
pub const VALIDATION_BOUND: u64 = 200;

#[derive(Debug, Error)]
pub enum PluralRuleError {
    /// The header has no `nplurals=` field.
    #[error("plural rule header is missing 'nplurals='")]
    MissingNplurals,
    /// The `nplurals=` value is not a positive integer.
    #[error("invalid nplurals value '{value}'")]
    InvalidNplurals {
        /// The rejected value text.
        value: String,
    },
    /// The header has no `plural=` field.
    #[error("plural rule header is missing 'plural='")]
    MissingPlural,
    /// The expression failed to parse.
    #[error("plural expression syntax error at byte {offset}: expected {expected}")]
    Syntax {
        /// Byte offset into the expression text.
        offset: usize,
        /// What the parser was looking for.
        expected: &'static str,
    },
    /// Input remained after a complete expression.
    #[error("unexpected trailing input in plural expression at byte {offset}")]
    TrailingInput {
        /// Byte offset of the first unconsumed byte.
        offset: usize,
    },
    /// Evaluation hit a division or modulo by zero.
    #[error("plural expression divides by zero for n = {n}")]
    DivisionByZero {
        /// The count that triggered the division.
        n: u64,
    },
    /// Evaluation produced an index outside `[0, nplurals)`.
    #[error("plural expression yields index {index} for n = {n}, but nplurals = {nplurals}")]
    IndexOutOfRange {
        /// The offending count.
        n: u64,
        /// The index the expression produced.
        index: u64,
        /// Declared number of plural forms.
        nplurals: usize,
    },
}

/// Binary operators of the expression subset, in source spelling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BinOp {
    Or,
    And,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

/// Parsed expression tree over the count variable `n`.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Expr {
    Number(u64),
    N,
    Not(Box<Expr>),
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Ternary {
        cond: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
}

impl Expr {
    fn eval(&self, n: u64) -> Result<u64, PluralRuleError> {
        match self {
            Expr::Number(value) => Ok(*value),
            Expr::N => Ok(n),
            Expr::Not(inner) => Ok(u64::from(inner.eval(n)? == 0)),
            Expr::Binary { op, lhs, rhs } => {
                let l = lhs.eval(n)?;
                let r = rhs.eval(n)?;
                match op {
                    BinOp::Or => Ok(u64::from(l != 0 || r != 0)),
                    BinOp::And => Ok(u64::from(l != 0 && r != 0)),
                    BinOp::Eq => Ok(u64::from(l == r)),
                    BinOp::Ne => Ok(u64::from(l != r)),
                    BinOp::Lt => Ok(u64::from(l < r)),
                    BinOp::Gt => Ok(u64::from(l > r)),
                    BinOp::Le => Ok(u64::from(l <= r)),
                    BinOp::Ge => Ok(u64::from(l >= r)),
                    BinOp::Add => Ok(l.wrapping_add(r)),
                    BinOp::Sub => Ok(l.wrapping_sub(r)),
                    BinOp::Mul => Ok(l.wrapping_mul(r)),
                    BinOp::Div => l
                        .checked_div(r)
                        .ok_or(PluralRuleError::DivisionByZero { n }),
                    BinOp::Mod => l
                        .checked_rem(r)
                        .ok_or(PluralRuleError::DivisionByZero { n }),
                }
            },
            Expr::Ternary {
                cond,
                then,
                otherwise,
            } => {
                if cond.eval(n)? != 0 {
                    then.eval(n)
                } else {
                    otherwise.eval(n)
                }
            },
        }
    }
}

/// A parsed plural rule.
///
/// Keeps the verbatim header text so a table re-serializes to exactly
/// the bytes it was read from.
#[derive(Clone, Debug)]
pub struct PluralRule {
    nplurals: usize,
    expr: Expr,
    source: String,
}

impl PartialEq for PluralRule {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for PluralRule {}

impl PluralRule {
    /// Parse a `nplurals=N; plural=(expression);` header.
    pub fn parse(source: &str) -> Result<Self, PluralRuleError> {
        let nplurals = parse_nplurals(source)?;
        if nplurals == 0 {
            return Err(PluralRuleError::InvalidNplurals {
                value: "0".to_string(),
            });
        }

        let expr_text = plural_field(source).ok_or(PluralRuleError::MissingPlural)?;
        let mut parser = ExprParser::new(expr_text);
        let expr = parser.expression()?;
        parser.skip_whitespace();
        if !parser.at_end() {
            return Err(PluralRuleError::TrailingInput { offset: parser.pos });
        }

        Ok(Self {
            nplurals,
            expr,
            source: source.to_string(),
        })
    }

    /// Declared number of plural forms.
    pub fn nplurals(&self) -> usize {
        self.nplurals
    }

    /// The verbatim header text.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Evaluate the expression, surfacing division-by-zero.
    pub fn try_index(&self, n: u64) -> Result<usize, PluralRuleError> {
        Ok(self.expr.eval(n)? as usize)
    }

    /// Plural-form index for a count.
    ///
    /// Total: a division by zero (already refused by [`validate`]) maps
    /// to form 0 rather than panicking.
    ///
    /// [`validate`]: Self::validate
    pub fn index(&self, n: u64) -> usize {
        self.try_index(n).unwrap_or(0)
    }

    /// Check that every count in `0..=bound` yields an index inside
    /// `[0, nplurals)` and that evaluation never divides by zero.
    pub fn validate(&self, bound: u64) -> Result<(), PluralRuleError> {
        for n in 0..=bound {
            let index = self.expr.eval(n)?;
            if index as usize >= self.nplurals {
                return Err(PluralRuleError::IndexOutOfRange {
                    n,
                    index,
                    nplurals: self.nplurals,
                });
            }
        }
        Ok(())
    }
}

impl Default for PluralRule {
    /// The Germanic two-form rule, the conventional fallback when a
    /// header is absent or malformed.
    fn default() -> Self {
        Self::parse("nplurals=2; plural=(n != 1);")
            .unwrap_or_else(|_| unreachable!("default rule is well-formed"))
    }
}

impl fmt::Display for PluralRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn parse_nplurals(source: &str) -> Result<usize, PluralRuleError> {
    let rest = field_value(source, "nplurals").ok_or(PluralRuleError::MissingNplurals)?;
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        let value: String = rest.chars().take_while(|c| *c != ';').collect();
        return Err(PluralRuleError::InvalidNplurals {
            value: value.trim().to_string(),
        });
    }
    digits
        .parse::<usize>()
        .map_err(|_| PluralRuleError::InvalidNplurals { value: digits })
}

/// The text after `plural=`, with any trailing `;` stripped.
fn plural_field(source: &str) -> Option<&str> {
    let rest = field_value(source, "plural")?;
    let end = rest.rfind(';').unwrap_or(rest.len());
    Some(rest[..end].trim())
}

/// The text following `<name>=`, skipping whitespace around `=`.
///
/// Matches on identifier boundaries so looking up `plural` does not hit
/// the tail of `nplurals`.
fn field_value<'a>(source: &'a str, name: &str) -> Option<&'a str> {
    for (idx, _) in source.match_indices(name) {
        let preceded = source[..idx]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_alphanumeric());
        if preceded {
            continue;
        }
        let rest = source[idx + name.len()..].trim_start();
        if let Some(value) = rest.strip_prefix('=') {
            return Some(value.trim_start());
        }
    }
    None
}

/// Recursive-descent parser over the expression bytes, tracking the
/// byte offset for error reporting.
struct ExprParser<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ExprParser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    fn eat(&mut self, token: &[u8]) -> bool {
        self.skip_whitespace();
        if self.bytes[self.pos..].starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    /// `<or> ('?' <expr> ':' <expr>)?`, right-associative.
    fn expression(&mut self) -> Result<Expr, PluralRuleError> {
        let cond = self.or_expr()?;
        if self.eat(b"?") {
            let then = self.expression()?;
            if !self.eat(b":") {
                return Err(PluralRuleError::Syntax {
                    offset: self.pos,
                    expected: "':'",
                });
            }
            let otherwise = self.expression()?;
            return Ok(Expr::Ternary {
                cond: Box::new(cond),
                then: Box::new(then),
                otherwise: Box::new(otherwise),
            });
        }
        Ok(cond)
    }

    fn or_expr(&mut self) -> Result<Expr, PluralRuleError> {
        let mut lhs = self.and_expr()?;
        while self.eat(b"||") {
            let rhs = self.and_expr()?;
            lhs = binary(BinOp::Or, lhs, rhs);
        }
        Ok(lhs)
    }

    fn and_expr(&mut self) -> Result<Expr, PluralRuleError> {
        let mut lhs = self.equality()?;
        while self.eat(b"&&") {
            let rhs = self.equality()?;
            lhs = binary(BinOp::And, lhs, rhs);
        }
        Ok(lhs)
    }

    fn equality(&mut self) -> Result<Expr, PluralRuleError> {
        let mut lhs = self.relational()?;
        loop {
            if self.eat(b"==") {
                let rhs = self.relational()?;
                lhs = binary(BinOp::Eq, lhs, rhs);
            } else if self.eat(b"!=") {
                let rhs = self.relational()?;
                lhs = binary(BinOp::Ne, lhs, rhs);
            } else {
                return Ok(lhs);
            }
        }
    }

    fn relational(&mut self) -> Result<Expr, PluralRuleError> {
        let mut lhs = self.additive()?;
        loop {
            // Two-byte operators must be tried before their one-byte prefixes.
            if self.eat(b"<=") {
                let rhs = self.additive()?;
                lhs = binary(BinOp::Le, lhs, rhs);
            } else if self.eat(b">=") {
                let rhs = self.additive()?;
                lhs = binary(BinOp::Ge, lhs, rhs);
            } else if self.eat(b"<") {
                let rhs = self.additive()?;
                lhs = binary(BinOp::Lt, lhs, rhs);
            } else if self.eat(b">") {
                let rhs = self.additive()?;
                lhs = binary(BinOp::Gt, lhs, rhs);
            } else {
                return Ok(lhs);
            }
        }
    }

    fn additive(&mut self) -> Result<Expr, PluralRuleError> {
        let mut lhs = self.multiplicative()?;
        loop {
            if self.eat(b"+") {
                let rhs = self.multiplicative()?;
                lhs = binary(BinOp::Add, lhs, rhs);
            } else if self.eat(b"-") {
                let rhs = self.multiplicative()?;
                lhs = binary(BinOp::Sub, lhs, rhs);
            } else {
                return Ok(lhs);
            }
        }
    }

    fn multiplicative(&mut self) -> Result<Expr, PluralRuleError> {
        let mut lhs = self.unary()?;
        loop {
            if self.eat(b"*") {
                let rhs = self.unary()?;
                lhs = binary(BinOp::Mul, lhs, rhs);
            } else if self.eat(b"/") {
                let rhs = self.unary()?;
                lhs = binary(BinOp::Div, lhs, rhs);
            } else if self.eat(b"%") {
                let rhs = self.unary()?;
                lhs = binary(BinOp::Mod, lhs, rhs);
            } else {
                return Ok(lhs);
            }
        }
    }

    fn unary(&mut self) -> Result<Expr, PluralRuleError> {
        self.skip_whitespace();
        // `!` but not `!=`
        if self.peek() == Some(b'!') && self.bytes.get(self.pos + 1) != Some(&b'=') {
            self.pos += 1;
            let inner = self.unary()?;
            return Ok(Expr::Not(Box::new(inner)));
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Expr, PluralRuleError> {
        self.skip_whitespace();
        match self.peek() {
            Some(b'(') => {
                self.pos += 1;
                let inner = self.expression()?;
                if !self.eat(b")") {
                    return Err(PluralRuleError::Syntax {
                        offset: self.pos,
                        expected: "')'",
                    });
                }
                Ok(inner)
            },
            Some(b'n') => {
                self.pos += 1;
                Ok(Expr::N)
            },
            Some(c) if c.is_ascii_digit() => {
                let start = self.pos;
                while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                    self.pos += 1;
                }
                let digits = std::str::from_utf8(&self.bytes[start..self.pos])
                    .map_err(|_| PluralRuleError::Syntax {
                        offset: start,
                        expected: "number",
                    })?;
                let value = digits.parse::<u64>().map_err(|_| PluralRuleError::Syntax {
                    offset: start,
                    expected: "number",
                })?;
                Ok(Expr::Number(value))
            },
            _ => Err(PluralRuleError::Syntax {
                offset: self.pos,
                expected: "'n', number, or '('",
            }),
        }
    }
}

fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(header: &str) -> PluralRule {
        PluralRule::parse(header).unwrap()
    }

    #[test]
    fn germanic_two_form() {
        let rule = rule("nplurals=2; plural=(n != 1);");
        assert_eq!(rule.nplurals(), 2);
        assert_eq!(rule.index(0), 1);
        assert_eq!(rule.index(1), 0);
        assert_eq!(rule.index(2), 1);
    }

    #[test]
    fn french_zero_is_singular() {
        let rule = rule("nplurals=2; plural=(n > 1);");
        assert_eq!(rule.index(0), 0);
        assert_eq!(rule.index(1), 0);
        assert_eq!(rule.index(2), 1);
    }

    #[test]
    fn single_form_no_expression_parens() {
        let rule = rule("nplurals=1; plural=0;");
        for n in [0, 1, 5, 100] {
            assert_eq!(rule.index(n), 0);
        }
    }

    #[test]
    fn slavic_three_form() {
        let rule = rule(
            "nplurals=3; plural=(n%10==1 && n%100!=11 ? 0 : \
             n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2);",
        );
        assert_eq!(rule.index(1), 0);
        assert_eq!(rule.index(21), 0);
        assert_eq!(rule.index(2), 1);
        assert_eq!(rule.index(22), 1);
        assert_eq!(rule.index(5), 2);
        assert_eq!(rule.index(11), 2);
        assert_eq!(rule.index(12), 2);
        assert_eq!(rule.index(112), 2);
    }

    #[test]
    fn arabic_six_form() {
        let rule = rule(
            "nplurals=6; plural=(n==0 ? 0 : n==1 ? 1 : n==2 ? 2 : \
             n%100>=3 && n%100<=10 ? 3 : n%100>=11 && n%100<=99 ? 4 : 5);",
        );
        assert_eq!(rule.index(0), 0);
        assert_eq!(rule.index(1), 1);
        assert_eq!(rule.index(2), 2);
        assert_eq!(rule.index(3), 3);
        assert_eq!(rule.index(11), 4);
        assert_eq!(rule.index(100), 5);
        rule.validate(VALIDATION_BOUND).unwrap();
    }

    #[test]
    fn validate_catches_out_of_range() {
        let rule = rule("nplurals=2; plural=(n);");
        let err = rule.validate(VALIDATION_BOUND).unwrap_err();
        assert!(matches!(
            err,
            PluralRuleError::IndexOutOfRange { n: 2, index: 2, .. }
        ));
    }

    #[test]
    fn validate_catches_division_by_zero() {
        let rule = rule("nplurals=2; plural=(n % 0);");
        let err = rule.validate(VALIDATION_BOUND).unwrap_err();
        assert!(matches!(err, PluralRuleError::DivisionByZero { n: 0 }));
        // index() stays total regardless
        assert_eq!(rule.index(7), 0);
    }

    #[test]
    fn not_operator() {
        let rule = rule("nplurals=2; plural=(!(n == 1));");
        assert_eq!(rule.index(1), 0);
        assert_eq!(rule.index(3), 1);
    }

    #[test]
    fn missing_fields() {
        assert!(matches!(
            PluralRule::parse("plural=(n != 1);"),
            Err(PluralRuleError::MissingNplurals)
        ));
        assert!(matches!(
            PluralRule::parse("nplurals=2;"),
            Err(PluralRuleError::MissingPlural)
        ));
        assert!(matches!(
            PluralRule::parse("nplurals=zero; plural=0;"),
            Err(PluralRuleError::InvalidNplurals { .. })
        ));
        assert!(matches!(
            PluralRule::parse("nplurals=0; plural=0;"),
            Err(PluralRuleError::InvalidNplurals { .. })
        ));
    }

    #[test]
    fn syntax_error_reports_offset() {
        let err = PluralRule::parse("nplurals=2; plural=(n != );").unwrap_err();
        match err {
            PluralRuleError::Syntax { offset, .. } => assert!(offset > 0),
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn trailing_input_rejected() {
        assert!(matches!(
            PluralRule::parse("nplurals=2; plural=(n != 1) n;"),
            Err(PluralRuleError::TrailingInput { .. })
        ));
    }

    #[test]
    fn source_round_trips() {
        let header = "nplurals=4; plural=(n==1 ? 0 : n==2 ? 1 : (n>10 && n%10==0) ? 2 : 3);";
        let rule = rule(header);
        assert_eq!(rule.to_string(), header);
        rule.validate(VALIDATION_BOUND).unwrap();
    }

    #[test]
    fn default_is_germanic() {
        let rule = PluralRule::default();
        assert_eq!(rule.nplurals(), 2);
        assert_eq!(rule.index(1), 0);
        assert_eq!(rule.index(0), 1);
    }
}
