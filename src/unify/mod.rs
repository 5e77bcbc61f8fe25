//! Unification: the two-sided binding algorithm at the heart of the
//! engine.
//!
//! `unify` extends a [`Binding`] to the most general unifier of two
//! expressions, or collapses to the failed binding. A list pattern may end
//! in a tail marker, which captures however much of the other list
//! remains.

mod binding;

pub use binding::{Binding, BindingMap};

use tracing::trace;

use crate::term::{Keyword, Logical, Term, Var};

/// The unification entry point, carrying the occurs-check toggle.
///
/// The default leaves the occurs check off, matching the permissive
/// behavior proofs expect; turning it on makes `unify-variable` reject a
/// binding whose value contains the variable itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unifier {
    pub occurs_check: bool,
}

impl Default for Unifier {
    fn default() -> Unifier {
        Unifier {
            occurs_check: false,
        }
    }
}

impl Unifier {
    pub fn new() -> Unifier {
        Unifier::default()
    }

    pub fn with_occurs_check() -> Unifier {
        Unifier { occurs_check: true }
    }

    /// Returns the most general unifier of `x` and `y` extending
    /// `binding`, or the failed binding. Commutative in `x` and `y`, and
    /// failure passes straight through, so unifiers compose:
    /// `unify(x, y, unify(u, v, b))`.
    pub fn unify(&self, x: &Logical, y: &Logical, binding: Binding) -> Binding {
        if binding.is_fail() {
            return Binding::Fail;
        }
        if x == y {
            return binding;
        }
        match (x, y) {
            (Logical::Var(v), _) => self.unify_variable(v, y, binding),
            (_, Logical::Var(v)) => self.unify_variable(v, x, binding),
            (Logical::Term(a), Logical::Term(b)) => self.unify_terms(a, b, binding),
            (Logical::List(a), Logical::List(b)) => self.unify_seq(a, b, binding),
            _ => Binding::Fail,
        }
    }

    /// Unifies two compound terms: names first, then arity, then the
    /// argument tuples elementwise.
    pub fn unify_terms(&self, a: &Term, b: &Term, binding: Binding) -> Binding {
        if a.name != b.name || a.args.len() != b.args.len() {
            return Binding::Fail;
        }
        self.unify_seq(&a.args, &b.args, binding)
    }

    /// Tuple unification. A sequence consisting of exactly one tail marker
    /// unifies its demoted variable against the other side as a list;
    /// otherwise heads unify first and the remainders recurse. A tail
    /// marker anywhere else fails.
    fn unify_seq(&self, xs: &[Logical], ys: &[Logical], binding: Binding) -> Binding {
        if let [Logical::Tail(t)] = xs {
            return self.unify_variable(t, &Logical::List(ys.to_vec()), binding);
        }
        if let [Logical::Tail(t)] = ys {
            return self.unify_variable(t, &Logical::List(xs.to_vec()), binding);
        }
        match (xs.split_first(), ys.split_first()) {
            (None, None) => binding,
            (None, Some(_)) | (Some(_), None) => Binding::Fail,
            (Some((x_head, x_rest)), Some((y_head, y_rest))) => {
                let binding = self.unify(x_head, y_head, binding);
                self.unify_seq(x_rest, y_rest, binding)
            }
        }
    }

    /// Binds `var`, consulting the forward map, then the inverse map, then
    /// (when enabled) the occurs check.
    fn unify_variable(&self, var: &Var, value: &Logical, binding: Binding) -> Binding {
        if binding.is_fail() {
            return Binding::Fail;
        }
        if let Some(bound) = binding.get(var) {
            let bound = bound.clone();
            return self.unify(&bound, value, binding);
        }
        if let Some(alias) = binding.var_for(value) {
            let alias = Logical::Var(alias.clone());
            return self.unify(&Logical::Var(var.clone()), &alias, binding);
        }
        if self.occurs_check && occurs(var, value) {
            return Binding::Fail;
        }
        trace!(var = %var, value = %value, "bind");
        binding.bind(var.clone(), value.clone())
    }
}

/// Unifies under the default [`Unifier`] (occurs check off).
pub fn unify(x: &Logical, y: &Logical, binding: Binding) -> Binding {
    Unifier::default().unify(x, y, binding)
}

/// Unifies two compound terms under the default [`Unifier`].
pub fn unify_terms(a: &Term, b: &Term, binding: Binding) -> Binding {
    Unifier::default().unify_terms(a, b, binding)
}

/// Whether `x` and `y` unify at all, discarding the binding.
pub fn unifiable(x: &Logical, y: &Logical) -> bool {
    !unify(x, y, Binding::empty()).is_fail()
}

/// Whether `var` appears anywhere inside `value`, recursing through
/// terms, lists, joins, negation, and constraint sides.
pub fn occurs(var: &Var, value: &Logical) -> bool {
    match value {
        Logical::Var(v) | Logical::Tail(v) => v == var,
        Logical::Term(t) => t.args.iter().any(|a| occurs(var, a)),
        Logical::List(items) | Logical::And(items) | Logical::Or(items) => {
            items.iter().any(|i| occurs(var, i))
        }
        Logical::Not(inner) => occurs(var, inner),
        Logical::Constraint(c) => occurs(var, &c.lhs) || occurs(var, &c.rhs),
        Logical::Int(_) | Logical::Float(_) | Logical::Str(_) | Logical::Keyword(_) => false,
    }
}

/// Follows the binding chain starting at `x` until a non-variable value
/// appears. An unbound variable resolves to the `FREE` keyword.
pub fn resolve(x: &Logical, binding: &Binding) -> Logical {
    let mut seen: Vec<&Var> = Vec::new();
    let mut current = x;
    loop {
        let var = match current {
            Logical::Var(v) | Logical::Tail(v) => v,
            other => return other.clone(),
        };
        if seen.contains(&var) {
            // bound into a cycle; report the variable itself
            return current.clone();
        }
        seen.push(var);
        match binding.get(var) {
            Some(next) => current = next,
            None => return Logical::Keyword(Keyword::Free),
        }
    }
}
