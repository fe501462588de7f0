//! Filter AST and its canonical rendering.
//!
//! The AST is schema-agnostic; field references are plain names until the
//! validator resolves them against a resource model. `Display` renders the
//! canonical form: upper-case keywords, `=` and `<>` as the only equality
//! spellings, and every boolean group parenthesised.

use std::fmt::{self, Write as _};

///
/// FilterExpr
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FilterExpr {
    Compare {
        lhs: Operand,
        op: CompareOp,
        rhs: Operand,
    },
    In {
        operand: Operand,
        negated: bool,
        list: Vec<Operand>,
    },
    Between {
        operand: Operand,
        negated: bool,
        low: Operand,
        high: Operand,
    },
    Pattern {
        operand: Operand,
        op: PatternOp,
        negated: bool,
        pattern: Operand,
    },
    IsNull {
        operand: Operand,
        negated: bool,
    },
    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),
}

impl FilterExpr {
    /// Canonical keyword of the top-level construct.
    #[must_use]
    pub fn operator(&self) -> String {
        let negate = |negated: bool, word: &str| {
            if negated {
                format!("NOT {word}")
            } else {
                word.to_string()
            }
        };

        match self {
            Self::Compare { op, .. } => op.symbol().to_string(),
            Self::In { negated, .. } => negate(*negated, "IN"),
            Self::Between { negated, .. } => negate(*negated, "BETWEEN"),
            Self::Pattern { op, negated, .. } => negate(*negated, op.keyword()),
            Self::IsNull { negated: false, .. } => "IS NULL".to_string(),
            Self::IsNull { negated: true, .. } => "IS NOT NULL".to_string(),
            Self::And(_) => "AND".to_string(),
            Self::Or(_) => "OR".to_string(),
            Self::Not(_) => "NOT".to_string(),
        }
    }

    /// Every operand of this node, excluding nested boolean children.
    pub(crate) fn operands(&self) -> Vec<&Operand> {
        match self {
            Self::Compare { lhs, rhs, .. } => vec![lhs, rhs],
            Self::In { operand, list, .. } => std::iter::once(operand).chain(list).collect(),
            Self::Between {
                operand, low, high, ..
            } => vec![operand, low, high],
            Self::Pattern {
                operand, pattern, ..
            } => vec![operand, pattern],
            Self::IsNull { operand, .. } => vec![operand],
            Self::And(_) | Self::Or(_) | Self::Not(_) => Vec::new(),
        }
    }
}

impl fmt::Display for FilterExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compare { lhs, op, rhs } => write!(f, "{lhs} {op} {rhs}"),
            Self::In { operand, list, .. } => {
                write!(f, "{operand} {} (", self.operator())?;
                for (i, item) in list.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_char(')')
            }
            Self::Between {
                operand, low, high, ..
            } => write!(f, "{operand} {} {low} AND {high}", self.operator()),
            Self::Pattern {
                operand, pattern, ..
            } => write!(f, "{operand} {} {pattern}", self.operator()),
            Self::IsNull { operand, .. } => write!(f, "{operand} {}", self.operator()),
            Self::And(children) => write_group(f, children, " AND "),
            Self::Or(children) => write_group(f, children, " OR "),
            Self::Not(inner) => write!(f, "NOT {inner}"),
        }
    }
}

fn write_group(f: &mut fmt::Formatter<'_>, children: &[FilterExpr], sep: &str) -> fmt::Result {
    f.write_char('(')?;
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{child}")?;
    }
    f.write_char(')')
}

///
/// Operand
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Operand {
    Field(String),
    Literal(Literal),
    Arith {
        op: ArithOp,
        lhs: Box<Self>,
        rhs: Box<Self>,
    },
    Neg(Box<Self>),
}

impl Operand {
    #[must_use]
    pub fn as_field(&self) -> Option<&str> {
        match self {
            Self::Field(name) => Some(name.as_str()),
            _ => None,
        }
    }

    /// Visit every field reference inside this operand.
    pub(crate) fn visit_fields<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Field(name) => out.push(name),
            Self::Literal(_) => {}
            Self::Arith { lhs, rhs, .. } => {
                lhs.visit_fields(out);
                rhs.visit_fields(out);
            }
            Self::Neg(inner) => inner.visit_fields(out),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.write_str(name),
            Self::Literal(literal) => write!(f, "{literal}"),
            Self::Arith { op, lhs, rhs } => write!(f, "({lhs} {op} {rhs})"),
            Self::Neg(inner) => {
                let inner = inner.to_string();
                // `--` would read back as a comment.
                if inner.starts_with('-') {
                    write!(f, "-({inner})")
                } else {
                    write!(f, "-{inner}")
                }
            }
        }
    }
}

impl From<Literal> for Operand {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

///
/// Literal
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Literal {
    Int(i64),
    /// Decimal literal kept as written.
    Decimal(String),
    Text(String),
    Bool(bool),
    Null,
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Decimal(v) => f.write_str(v),
            Self::Text(v) => {
                f.write_char('\'')?;
                f.write_str(&v.replace('\'', "''"))?;
                f.write_char('\'')
            }
            Self::Bool(true) => f.write_str("TRUE"),
            Self::Bool(false) => f.write_str("FALSE"),
            Self::Null => f.write_str("NULL"),
        }
    }
}

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl CompareOp {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

///
/// ArithOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl ArithOp {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
        }
    }
}

impl fmt::Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

///
/// PatternOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PatternOp {
    Like,
    Match,
    Regexp,
}

impl PatternOp {
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Like => "LIKE",
            Self::Match => "MATCH",
            Self::Regexp => "REGEXP",
        }
    }
}
