//! Bindings: substitutions with an absorbing failure value.

use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::term::{Logical, Var};

/// The paired maps of a successful binding.
///
/// The reverse map exists because unification needs a fast value → variable
/// lookup. Invariants: every key is a plain variable (never a tail), a
/// value stored forward is never itself a key, and no two keys share a
/// value. Equality considers the forward map only; the reverse map is
/// derived.
#[derive(Clone, Debug, Default)]
pub struct BindingMap {
    forward: FxHashMap<Var, Logical>,
    reverse: FxHashMap<Logical, Var>,
}

impl PartialEq for BindingMap {
    fn eq(&self, other: &Self) -> bool {
        self.forward == other.forward
    }
}

impl Eq for BindingMap {}

/// A finite mapping from variables to values, or the absorbing failure
/// value `NO`.
///
/// Every operation on a failed binding stays failed, so failure propagates
/// through a proof in-band without ever being an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Binding {
    Map(BindingMap),
    Fail,
}

impl Default for Binding {
    fn default() -> Binding {
        Binding::Map(BindingMap::default())
    }
}

impl Binding {
    /// The empty (everything-free) binding.
    pub fn empty() -> Binding {
        Binding::default()
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, Binding::Fail)
    }

    /// The value bound to `var`, if any.
    pub fn get(&self, var: &Var) -> Option<&Logical> {
        match self {
            Binding::Map(maps) => maps.forward.get(var),
            Binding::Fail => None,
        }
    }

    pub fn contains(&self, var: &Var) -> bool {
        self.get(var).is_some()
    }

    /// Inverse lookup: the variable bound to `value`, if any.
    pub fn var_for(&self, value: &Logical) -> Option<&Var> {
        match self {
            Binding::Map(maps) => maps.reverse.get(value),
            Binding::Fail => None,
        }
    }

    /// Extends the binding with `var ↦ value`. Absorbing on failure.
    pub fn bind(self, var: Var, value: Logical) -> Binding {
        match self {
            Binding::Fail => Binding::Fail,
            Binding::Map(mut maps) => {
                debug_assert!(
                    !maps.forward.contains_key(&var),
                    "rebinding {var}: callers must unify against the existing value"
                );
                debug_assert!(
                    !maps.reverse.contains_key(&value),
                    "value {value} already bound to another variable"
                );
                maps.reverse.insert(value.clone(), var.clone());
                maps.forward.insert(var, value);
                Binding::Map(maps)
            }
        }
    }

    /// Number of bound variables; zero for the failed binding.
    pub fn len(&self) -> usize {
        match self {
            Binding::Map(maps) => maps.forward.len(),
            Binding::Fail => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the forward pairs; empty for the failed binding.
    pub fn iter(&self) -> impl Iterator<Item = (&Var, &Logical)> {
        let maps = match self {
            Binding::Map(maps) => Some(maps),
            Binding::Fail => None,
        };
        maps.into_iter().flat_map(|m| m.forward.iter())
    }

    /// The binding restricted to `vars`, with chains followed and values
    /// deep-resolved.
    ///
    /// Answers handed back to callers carry only the query's own variables,
    /// each mapped to the most concrete value the proof established. A
    /// visited set guards the walk: with the occurs check off, a proof can
    /// bind a variable into its own value.
    pub fn project(&self, vars: &FxHashSet<Var>) -> Binding {
        match self {
            Binding::Fail => Binding::Fail,
            Binding::Map(maps) => {
                // built directly: an answer map may legitimately send two
                // variables to the same resolved value
                let mut out = BindingMap::default();
                for var in vars {
                    if maps.forward.contains_key(var) {
                        let mut seen = FxHashSet::default();
                        let value = self.deep_resolve(&Logical::Var(var.clone()), &mut seen);
                        out.reverse.insert(value.clone(), var.clone());
                        out.forward.insert(var.clone(), value);
                    }
                }
                Binding::Map(out)
            }
        }
    }

    fn deep_resolve(&self, x: &Logical, seen: &mut FxHashSet<Var>) -> Logical {
        match x {
            Logical::Var(v) => match self.get(v) {
                Some(value) if !seen.contains(v) => {
                    seen.insert(v.clone());
                    let out = self.deep_resolve(&value.clone(), seen);
                    seen.remove(v);
                    out
                }
                _ => x.clone(),
            },
            _ => x.map(&mut |leaf| match leaf {
                Logical::Var(_) => self.deep_resolve(leaf, seen),
                other => other.clone(),
            }),
        }
    }
}

impl FromIterator<(Var, Logical)> for Binding {
    fn from_iter<I: IntoIterator<Item = (Var, Logical)>>(iter: I) -> Binding {
        iter.into_iter()
            .fold(Binding::empty(), |b, (var, value)| b.bind(var, value))
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Fail => f.write_str("NO"),
            Binding::Map(maps) => {
                let mut pairs: Vec<_> = maps.forward.iter().collect();
                pairs.sort_by_key(|(var, _)| (*var).clone());
                f.write_str("{")?;
                for (i, (var, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{var}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::{atom, var};

    #[test]
    fn bind_maintains_both_directions() {
        let x = var("X");
        let leo = Logical::from(atom("leo"));
        let b = Binding::empty().bind(x.clone(), leo.clone());
        assert_eq!(b.get(&x), Some(&leo));
        assert_eq!(b.var_for(&leo), Some(&x));
    }

    #[test]
    fn failure_absorbs() {
        let b = Binding::Fail.bind(var("X"), Logical::Int(1));
        assert!(b.is_fail());
        assert_eq!(b.get(&var("X")), None);
    }

    #[test]
    fn equality_ignores_the_reverse_map() {
        let a = Binding::from_iter([(var("X"), Logical::Int(1))]);
        let b = Binding::from_iter([(var("X"), Logical::Int(1))]);
        assert_eq!(a, b);
        assert_ne!(a, Binding::empty());
        assert_ne!(a, Binding::Fail);
    }

    #[test]
    fn project_follows_chains() {
        let (x, y) = (var("X"), var("Y"));
        let b = Binding::empty()
            .bind(x.clone(), Logical::Var(y.clone()))
            .bind(y.clone(), Logical::from(atom("leo")));
        let projected = b.project(&FxHashSet::from_iter([x.clone()]));
        assert_eq!(projected.get(&x), Some(&Logical::from(atom("leo"))));
        assert_eq!(projected.get(&y), None);
    }

    #[test]
    fn project_resolves_inside_compound_values() {
        let (x, y) = (var("X"), var("Y"));
        let pair = crate::term::Term::new("pair", [Logical::Var(y.clone()), Logical::Int(2)]);
        let b = Binding::empty()
            .bind(x.clone(), Logical::Term(pair))
            .bind(y, Logical::Int(1));
        let projected = b.project(&FxHashSet::from_iter([x.clone()]));
        assert_eq!(
            projected.get(&x),
            Some(&Logical::Term(crate::term::Term::new(
                "pair",
                [Logical::Int(1), Logical::Int(2)]
            )))
        );
    }

    #[test]
    fn display_is_sorted_and_braced() {
        let b = Binding::from_iter([
            (var("Y"), Logical::Int(2)),
            (var("X"), Logical::Int(1)),
        ]);
        assert_eq!(b.to_string(), "{X: 1, Y: 2}");
        assert_eq!(Binding::Fail.to_string(), "NO");
    }
}
