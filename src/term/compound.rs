//! Compound terms and their construction helpers.

use std::fmt;

use smol_str::SmolStr;

use crate::error::EngineError;
use crate::unify::Binding;

use super::logical::Logical;

/// A named functor with an ordered tuple of argument expressions.
///
/// A term with zero arguments is an atom. Terms are value types: equal iff
/// names and argument tuples are structurally equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Term {
    pub name: SmolStr,
    pub args: Vec<Logical>,
}

impl Term {
    pub fn new(name: impl Into<SmolStr>, args: impl IntoIterator<Item = Logical>) -> Term {
        Term {
            name: name.into(),
            args: args.into_iter().collect(),
        }
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    pub fn is_atom(&self) -> bool {
        self.args.is_empty()
    }

    /// Rebuilds the term with `f` mapped over every argument.
    pub fn map(&self, f: &mut dyn FnMut(&Logical) -> Logical) -> Term {
        Term {
            name: self.name.clone(),
            args: self.args.iter().map(|a| a.map(&mut *f)).collect(),
        }
    }

    /// The term with bound variables replaced by their values.
    pub fn substitute(&self, binding: &Binding) -> Term {
        self.map(&mut |leaf| match leaf {
            Logical::Var(v) => binding.get(v).cloned().unwrap_or_else(|| leaf.clone()),
            other => other.clone(),
        })
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.args.is_empty() {
            f.write_str("(")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

/// An atom: a term with no arguments.
pub fn atom(name: impl Into<SmolStr>) -> Term {
    Term::new(name, [])
}

/// A term builder for one functor, optionally arity-checked.
///
/// `Functor::apply` is the checked construction path: when an arity was
/// declared, applying the functor to the wrong number of arguments
/// surfaces [`EngineError::WrongArity`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Functor {
    name: SmolStr,
    arity: Option<usize>,
}

impl Functor {
    pub fn new(name: impl Into<SmolStr>) -> Functor {
        Functor {
            name: name.into(),
            arity: None,
        }
    }

    pub fn with_arity(name: impl Into<SmolStr>, arity: usize) -> Functor {
        Functor {
            name: name.into(),
            arity: Some(arity),
        }
    }

    pub fn name(&self) -> &SmolStr {
        &self.name
    }

    /// Builds `name(args...)`, checking the declared arity if any.
    pub fn apply(
        &self,
        args: impl IntoIterator<Item = Logical>,
    ) -> Result<Term, EngineError> {
        let args: Vec<Logical> = args.into_iter().collect();
        if let Some(expected) = self.arity {
            if args.len() != expected {
                return Err(EngineError::WrongArity {
                    name: self.name.clone(),
                    expected,
                    got: args.len(),
                });
            }
        }
        Ok(Term {
            name: self.name.clone(),
            args,
        })
    }
}

/// A functor with no arity check.
pub fn functor(name: impl Into<SmolStr>) -> Functor {
    Functor::new(name)
}

/// A functor that insists on `arity` arguments.
pub fn functor_n(name: impl Into<SmolStr>, arity: usize) -> Functor {
    Functor::with_arity(name, arity)
}
