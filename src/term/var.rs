//! Logic variables.

use std::fmt;

use smol_str::SmolStr;

use super::logical::Logical;

/// A logic variable: a name plus an optional rename id.
///
/// Two variables are equal iff both components match, so `X` and a
/// standardized-apart `X_1007` never capture one another. Variables with
/// `id: None` are the ones users and the parser create.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Var {
    pub name: SmolStr,
    pub id: Option<u64>,
}

impl Var {
    pub fn new(name: impl Into<SmolStr>) -> Var {
        Var {
            name: name.into(),
            id: None,
        }
    }

    /// The same variable carrying `id` instead of its current one.
    pub fn with_id(&self, id: Option<u64>) -> Var {
        Var {
            name: self.name.clone(),
            id,
        }
    }

    /// This variable as a list-tail marker, the `+V` of a tail pattern.
    pub fn tail(&self) -> Logical {
        Logical::Tail(self.clone())
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "{}_{}", self.name, id),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A fresh id-free variable named `name`.
pub fn var(name: impl Into<SmolStr>) -> Var {
    Var::new(name)
}

/// One fresh variable per character of `names`.
///
/// Convenient for tests and embedded rules: `variables("xyz")` gives the
/// variables `x`, `y` and `z`.
pub fn variables(names: &str) -> Vec<Var> {
    names.chars().map(|c| Var::new(c.to_string())).collect()
}
