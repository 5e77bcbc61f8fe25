//! Horn-clause rules.

use std::fmt;

use smol_str::SmolStr;

use super::compound::Term;
use super::logical::Logical;

/// A Horn clause: a head term and a body expression.
///
/// A rule whose body is `YES` is a fact. Rules are value types, equal by
/// head and body, and displayed as `head <= body`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    pub head: Term,
    pub body: Logical,
}

impl Rule {
    pub fn new(head: Term, body: impl Into<Logical>) -> Rule {
        Rule {
            head,
            body: body.into(),
        }
    }

    /// The rule `head <= YES`.
    pub fn fact(head: Term) -> Rule {
        Rule {
            head,
            body: Logical::yes(),
        }
    }

    pub fn is_fact(&self) -> bool {
        self.body.is_yes()
    }

    /// The head's functor name.
    pub fn name(&self) -> &SmolStr {
        &self.head.name
    }

    /// Maps `f` over head and body (see [`Logical::map`]).
    pub fn map(&self, f: &mut dyn FnMut(&Logical) -> Logical) -> Rule {
        Rule {
            head: self.head.map(&mut *f),
            body: self.body.map(f),
        }
    }

    /// The rule with every variable renamed to carry one fresh id, so it
    /// can be consulted many times in the same proof without capture.
    pub fn standardize(&self) -> Rule {
        super::standardize_rule(self)
    }
}

impl From<Term> for Rule {
    fn from(head: Term) -> Rule {
        Rule::fact(head)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <= {}", self.head, self.body)
    }
}
