//! The `Logical` expression tree.
//!
//! One tagged union covers every formula the engine manipulates: compound
//! terms, variables and list-tail markers, literal values, lists, the two
//! flattened join kinds, negation, comparison constraints, and the reserved
//! keywords. Truth and falsity are not separate variants: `YES` is the
//! empty conjunction and `NO` the empty disjunction, so the join
//! constructors are the single source of both.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops;

use smol_str::SmolStr;

use crate::constraint::Constraint;

use super::compound::Term;
use super::rule::Rule;
use super::var::Var;

/// Reserved sentinel atoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// The cut marker recognized by the parser. Stored but given no commit
    /// semantics by the resolution procedures.
    Cut,
    /// The value an unbound variable resolves to inside a constraint.
    Free,
}

impl Keyword {
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Cut => "CUT",
            Keyword::Free => "FREE",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A float literal that stays `Eq + Hash` by comparing bit patterns.
#[derive(Debug, Clone, Copy)]
pub struct Float(pub f64);

impl Float {
    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for Float {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Float {}

impl Hash for Float {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl fmt::Display for Float {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A logical expression.
///
/// Immutable value tree: every operation builds a new expression. Equality
/// and hashing are structural throughout.
///
/// Invariants upheld by the constructors:
/// - a conjunction never directly contains a conjunction, nor a disjunction
///   a disjunction (same-kind joins are spliced on construction);
/// - `And([])` is the unique truth value `YES`, `Or([])` the unique
///   falsity `NO`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Logical {
    /// A named functor applied to arguments; zero arguments makes an atom.
    Term(Term),
    /// A logic variable.
    Var(Var),
    /// A list-tail marker: only meaningful as the last element of a list
    /// pattern, where it captures the remainder.
    Tail(Var),
    /// Integer literal.
    Int(i64),
    /// Float literal (bit-compared, so the tree stays hashable).
    Float(Float),
    /// String literal.
    Str(SmolStr),
    /// An ordered list of expressions.
    List(Vec<Logical>),
    /// Flattened conjunction; empty means `YES`.
    And(Vec<Logical>),
    /// Flattened disjunction; empty means `NO`.
    Or(Vec<Logical>),
    /// Negation as failure.
    Not(Box<Logical>),
    /// A comparison constraint over two sub-expressions.
    Constraint(Constraint),
    /// A reserved sentinel atom.
    Keyword(Keyword),
}

impl Logical {
    /// The truth value: the empty conjunction.
    pub fn yes() -> Logical {
        Logical::And(Vec::new())
    }

    /// The falsity value: the empty disjunction.
    pub fn no() -> Logical {
        Logical::Or(Vec::new())
    }

    pub fn is_yes(&self) -> bool {
        matches!(self, Logical::And(items) if items.is_empty())
    }

    pub fn is_no(&self) -> bool {
        matches!(self, Logical::Or(items) if items.is_empty())
    }

    /// Builds a conjunction, splicing in the children of any conjunction
    /// among `items`.
    pub fn and(items: impl IntoIterator<Item = Logical>) -> Logical {
        let mut merged = Vec::new();
        for item in items {
            match item {
                Logical::And(children) => merged.extend(children),
                other => merged.push(other),
            }
        }
        Logical::And(merged)
    }

    /// Builds a disjunction, splicing in the children of any disjunction
    /// among `items`.
    pub fn or(items: impl IntoIterator<Item = Logical>) -> Logical {
        let mut merged = Vec::new();
        for item in items {
            match item {
                Logical::Or(children) => merged.extend(children),
                other => merged.push(other),
            }
        }
        Logical::Or(merged)
    }

    /// Wraps an expression in negation-as-failure.
    pub fn negate(item: Logical) -> Logical {
        Logical::Not(Box::new(item))
    }

    pub fn list(items: impl IntoIterator<Item = Logical>) -> Logical {
        Logical::List(items.into_iter().collect())
    }

    /// First element of a join, if this is a non-empty join.
    pub fn first(&self) -> Option<&Logical> {
        match self {
            Logical::And(items) | Logical::Or(items) => items.first(),
            _ => None,
        }
    }

    /// The same join kind with the first element removed. The rest of a
    /// one-element join is the empty join of that kind.
    pub fn rest(&self) -> Option<Logical> {
        match self {
            Logical::And(items) => Some(Logical::And(
                items.get(1..).unwrap_or_default().to_vec(),
            )),
            Logical::Or(items) => Some(Logical::Or(
                items.get(1..).unwrap_or_default().to_vec(),
            )),
            _ => None,
        }
    }

    /// Structure-preserving traversal: leaves (variables, tails, keywords,
    /// literals) are replaced by `f(leaf)`; composite nodes are rebuilt
    /// with `map` applied to each child. Joins re-flatten on rebuild, so
    /// the join invariant survives any `f`.
    pub fn map(&self, f: &mut dyn FnMut(&Logical) -> Logical) -> Logical {
        match self {
            Logical::Var(_)
            | Logical::Tail(_)
            | Logical::Keyword(_)
            | Logical::Int(_)
            | Logical::Float(_)
            | Logical::Str(_) => f(self),
            Logical::Term(t) => Logical::Term(t.map(f)),
            Logical::List(items) => {
                Logical::List(items.iter().map(|i| i.map(&mut *f)).collect())
            }
            Logical::And(items) => Logical::and(items.iter().map(|i| i.map(&mut *f))),
            Logical::Or(items) => Logical::or(items.iter().map(|i| i.map(&mut *f))),
            Logical::Not(inner) => Logical::Not(Box::new(inner.map(f))),
            Logical::Constraint(c) => Logical::Constraint(c.map(f)),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Logical], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Logical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Logical::Term(t) => write!(f, "{t}"),
            Logical::Var(v) => write!(f, "{v}"),
            Logical::Tail(v) => write!(f, "+{}", v.name),
            Logical::Int(i) => write!(f, "{i}"),
            Logical::Float(x) => write!(f, "{x}"),
            Logical::Str(s) => write!(f, "\"{s}\""),
            Logical::List(items) => {
                f.write_str("[")?;
                write_joined(f, items, ", ")?;
                f.write_str("]")
            }
            Logical::And(items) if items.is_empty() => f.write_str("YES"),
            Logical::And(items) => write_joined(f, items, " & "),
            Logical::Or(items) if items.is_empty() => f.write_str("NO"),
            Logical::Or(items) => write_joined(f, items, " | "),
            Logical::Not(inner) => write!(f, "~{inner}"),
            Logical::Constraint(c) => write!(f, "{c}"),
            Logical::Keyword(k) => write!(f, "{k}"),
        }
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl From<Term> for Logical {
    fn from(t: Term) -> Logical {
        Logical::Term(t)
    }
}

impl From<Var> for Logical {
    fn from(v: Var) -> Logical {
        Logical::Var(v)
    }
}

impl From<Constraint> for Logical {
    fn from(c: Constraint) -> Logical {
        Logical::Constraint(c)
    }
}

impl From<Keyword> for Logical {
    fn from(k: Keyword) -> Logical {
        Logical::Keyword(k)
    }
}

impl From<i64> for Logical {
    fn from(i: i64) -> Logical {
        Logical::Int(i)
    }
}

// Lets integer literals land on `Int` without an explicit `i64` ascription.
impl From<i32> for Logical {
    fn from(i: i32) -> Logical {
        Logical::Int(i64::from(i))
    }
}

impl From<f64> for Logical {
    fn from(x: f64) -> Logical {
        Logical::Float(Float(x))
    }
}

// ============================================================================
// Operator sugar: `a & b`, `a | b`, `!a`, `head.when(body)`
// ============================================================================

impl<R: Into<Logical>> ops::BitAnd<R> for Logical {
    type Output = Logical;

    fn bitand(self, rhs: R) -> Logical {
        Logical::and([self, rhs.into()])
    }
}

impl<R: Into<Logical>> ops::BitOr<R> for Logical {
    type Output = Logical;

    fn bitor(self, rhs: R) -> Logical {
        Logical::or([self, rhs.into()])
    }
}

impl ops::Not for Logical {
    type Output = Logical;

    fn not(self) -> Logical {
        Logical::negate(self)
    }
}

impl<R: Into<Logical>> ops::BitAnd<R> for Term {
    type Output = Logical;

    fn bitand(self, rhs: R) -> Logical {
        Logical::from(self) & rhs.into()
    }
}

impl<R: Into<Logical>> ops::BitOr<R> for Term {
    type Output = Logical;

    fn bitor(self, rhs: R) -> Logical {
        Logical::from(self) | rhs.into()
    }
}

impl ops::Not for Term {
    type Output = Logical;

    fn not(self) -> Logical {
        Logical::negate(self.into())
    }
}

impl Term {
    /// Forms the rule `self <= body`.
    pub fn when(self, body: impl Into<Logical>) -> Rule {
        Rule::new(self, body)
    }
}
