//! The term model: logical expressions and the operations that preserve
//! their invariants.
//!
//! - [`Logical`] - the expression tree (terms, variables, literals, lists,
//!   flattened joins, negation, constraints, keywords)
//! - [`Term`], [`Functor`] - compound construction, arity-checked or not
//! - [`Var`] - variables and tail markers
//! - [`Rule`] - Horn clauses
//! - [`substitute`], [`standardize`], [`reset_ids`], [`variables_in`] -
//!   the `map`-derived whole-expression operations

mod compound;
mod logical;
mod rule;
mod var;

pub use compound::{atom, functor, functor_n, Functor, Term};
pub use logical::{Float, Keyword, Logical};
pub use rule::Rule;
pub use var::{var, variables, Var};

use rustc_hash::FxHashSet;

use crate::base::fresh_rename_id;
use crate::unify::Binding;

/// The set of variables appearing anywhere in `x`.
///
/// Tail markers are reported demoted to their variable form, so the result
/// is usable as a set of binding keys.
pub fn variables_in(x: &Logical) -> FxHashSet<Var> {
    let mut vars = FxHashSet::default();
    x.map(&mut |leaf| {
        if let Logical::Var(v) | Logical::Tail(v) = leaf {
            vars.insert(v.clone());
        }
        leaf.clone()
    });
    vars
}

fn rename(id: Option<u64>) -> impl FnMut(&Logical) -> Logical {
    move |leaf| match leaf {
        Logical::Var(v) => Logical::Var(v.with_id(id)),
        Logical::Tail(v) => Logical::Tail(v.with_id(id)),
        other => other.clone(),
    }
}

/// Renames every variable in `x` with one fresh id.
///
/// All variables in a single call share the id, so co-reference within the
/// expression is preserved; two separate calls can never produce colliding
/// variables.
pub fn standardize(x: &Logical) -> Logical {
    x.map(&mut rename(Some(fresh_rename_id())))
}

/// [`standardize`] over a whole rule.
pub fn standardize_rule(rule: &Rule) -> Rule {
    rule.map(&mut rename(Some(fresh_rename_id())))
}

/// Strips the rename id from every variable in `x`.
///
/// The reset mode of standardization: the parser uses it to keep textual
/// variable names readable.
pub fn reset_ids(x: &Logical) -> Logical {
    x.map(&mut rename(None))
}

/// [`reset_ids`] over a whole rule.
pub fn reset_ids_rule(rule: &Rule) -> Rule {
    rule.map(&mut rename(None))
}

/// Applies `binding` to `x`: every bound variable is replaced by its
/// value, everything else passes through unchanged.
pub fn substitute(x: &Logical, binding: &Binding) -> Logical {
    x.map(&mut |leaf| match leaf {
        Logical::Var(v) => binding.get(v).cloned().unwrap_or_else(|| leaf.clone()),
        other => other.clone(),
    })
}

/// [`substitute`] over a whole rule.
pub fn substitute_rule(rule: &Rule, binding: &Binding) -> Rule {
    Rule {
        head: rule.head.substitute(binding),
        body: substitute(&rule.body, binding),
    }
}
