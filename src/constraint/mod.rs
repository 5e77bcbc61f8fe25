//! Comparison constraints: host comparisons embedded in proofs.
//!
//! A constraint is a logical expression that, instead of being looked up
//! in a table, consults the current binding directly. `test` either passes
//! the binding through (possibly extended, for equality) or fails by
//! returning nothing.

use std::cmp::Ordering;
use std::fmt;

use crate::term::{Keyword, Logical};
use crate::unify::{resolve, unify, Binding};

/// The comparison operators constraints can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmpOp {
    Eq,
    Le,
    Lt,
    Ge,
    Gt,
}

impl CmpOp {
    pub fn symbol(self) -> &'static str {
        match self {
            CmpOp::Eq => "=",
            CmpOp::Le => "<=",
            CmpOp::Lt => "<",
            CmpOp::Ge => ">=",
            CmpOp::Gt => ">",
        }
    }

    fn admits(self, ordering: Ordering) -> bool {
        match self {
            CmpOp::Eq => ordering == Ordering::Equal,
            CmpOp::Le => ordering != Ordering::Greater,
            CmpOp::Lt => ordering == Ordering::Less,
            CmpOp::Ge => ordering != Ordering::Less,
            CmpOp::Gt => ordering == Ordering::Greater,
        }
    }
}

/// A comparison constraint over two sub-expressions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Constraint {
    pub op: CmpOp,
    pub lhs: Box<Logical>,
    pub rhs: Box<Logical>,
}

impl Constraint {
    pub fn new(op: CmpOp, lhs: impl Into<Logical>, rhs: impl Into<Logical>) -> Constraint {
        Constraint {
            op,
            lhs: Box::new(lhs.into()),
            rhs: Box::new(rhs.into()),
        }
    }

    /// Equality by unification, so free variables get bound.
    pub fn equals(lhs: impl Into<Logical>, rhs: impl Into<Logical>) -> Constraint {
        Constraint::new(CmpOp::Eq, lhs, rhs)
    }

    pub fn le(lhs: impl Into<Logical>, rhs: impl Into<Logical>) -> Constraint {
        Constraint::new(CmpOp::Le, lhs, rhs)
    }

    pub fn lt(lhs: impl Into<Logical>, rhs: impl Into<Logical>) -> Constraint {
        Constraint::new(CmpOp::Lt, lhs, rhs)
    }

    pub fn ge(lhs: impl Into<Logical>, rhs: impl Into<Logical>) -> Constraint {
        Constraint::new(CmpOp::Ge, lhs, rhs)
    }

    pub fn gt(lhs: impl Into<Logical>, rhs: impl Into<Logical>) -> Constraint {
        Constraint::new(CmpOp::Gt, lhs, rhs)
    }

    /// The bindings under which the constraint holds.
    ///
    /// Equality unifies the two sides, so the single returned binding may
    /// extend the input. The ordered operators resolve each side through
    /// the binding; a side that resolves to `FREE` fails, and so does any
    /// pair the host cannot order.
    pub fn test(&self, binding: &Binding) -> Vec<Binding> {
        match self.op {
            CmpOp::Eq => {
                let unified = unify(&self.lhs, &self.rhs, binding.clone());
                if unified.is_fail() {
                    Vec::new()
                } else {
                    vec![unified]
                }
            }
            _ => {
                let lhs = resolve(&self.lhs, binding);
                let rhs = resolve(&self.rhs, binding);
                if lhs == Logical::Keyword(Keyword::Free)
                    || rhs == Logical::Keyword(Keyword::Free)
                {
                    return Vec::new();
                }
                match compare(&lhs, &rhs) {
                    Some(ordering) if self.op.admits(ordering) => vec![binding.clone()],
                    _ => Vec::new(),
                }
            }
        }
    }

    /// Rebuilds the constraint with `f` mapped over both sides.
    pub fn map(&self, f: &mut dyn FnMut(&Logical) -> Logical) -> Constraint {
        Constraint {
            op: self.op,
            lhs: Box::new(self.lhs.map(&mut *f)),
            rhs: Box::new(self.rhs.map(f)),
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.lhs, self.op.symbol(), self.rhs)
    }
}

/// Native ordered comparison: numbers compare numerically (integer/float
/// cross-comparison allowed), strings lexicographically. Anything else is
/// incomparable.
fn compare(lhs: &Logical, rhs: &Logical) -> Option<Ordering> {
    match (lhs, rhs) {
        (Logical::Int(a), Logical::Int(b)) => Some(a.cmp(b)),
        (Logical::Int(a), Logical::Float(b)) => (*a as f64).partial_cmp(&b.value()),
        (Logical::Float(a), Logical::Int(b)) => a.value().partial_cmp(&(*b as f64)),
        (Logical::Float(a), Logical::Float(b)) => a.value().partial_cmp(&b.value()),
        (Logical::Str(a), Logical::Str(b)) => Some(a.cmp(b)),
        _ => None,
    }
}
