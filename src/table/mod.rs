//! Clause tables: interchangeable storage strategies behind one contract.
//!
//! A table is an unordered multiset of rules. `tell` standardizes a rule
//! apart and inserts it; `fetch` lazily enumerates every stored rule whose
//! head unifies with a query, as `(binding, condition)` pairs. A fetch may
//! over-approximate internally, but candidates always go through full head
//! unification before being emitted, and result order is deterministic per
//! implementation.

mod heuristic;
mod linear;
mod predicate;
mod trie;

pub use heuristic::HeuristicIndex;
pub use linear::LinearTable;
pub use predicate::PredicateIndex;
pub use trie::TrieTable;

use crate::term::{substitute, Logical, Rule, Term};
use crate::unify::{unify_terms, Binding};

/// One fetch candidate: the unifying binding for the head, and the rule
/// body under that binding (`YES` for facts) as the residual condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    pub binding: Binding,
    pub condition: Logical,
}

/// The set-of-rules abstraction all resolution code is written against.
pub trait Table {
    /// Standardizes the rule apart and stores it. Telling the same rule
    /// twice stores two entries.
    fn tell(&mut self, rule: Rule);

    /// Every stored rule whose head unifies with `query`, under `binding`.
    /// With `conditional` false only facts are returned; with it true,
    /// rules too, carrying their instantiated bodies as conditions.
    fn fetch(
        &self,
        query: Term,
        conditional: bool,
        binding: Binding,
    ) -> Box<dyn Iterator<Item = FetchResult> + '_>;

    /// Full enumeration of the stored rules.
    fn rules(&self) -> Box<dyn Iterator<Item = &Rule> + '_>;

    /// Heads of the stored facts.
    fn facts(&self) -> Box<dyn Iterator<Item = &Term> + '_> {
        Box::new(self.rules().filter(|r| r.is_fact()).map(|r| &r.head))
    }

    fn len(&self) -> usize {
        self.rules().count()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Table + ?Sized> Table for Box<T> {
    fn tell(&mut self, rule: Rule) {
        (**self).tell(rule)
    }

    fn fetch(
        &self,
        query: Term,
        conditional: bool,
        binding: Binding,
    ) -> Box<dyn Iterator<Item = FetchResult> + '_> {
        (**self).fetch(query, conditional, binding)
    }

    fn rules(&self) -> Box<dyn Iterator<Item = &Rule> + '_> {
        (**self).rules()
    }

    fn facts(&self) -> Box<dyn Iterator<Item = &Term> + '_> {
        (**self).facts()
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

/// Tries `rule` against `query`: `None` when the head does not unify or a
/// conditional rule is asked for in facts-only mode.
pub(crate) fn match_rule(
    rule: &Rule,
    query: &Term,
    conditional: bool,
    binding: &Binding,
) -> Option<FetchResult> {
    if !conditional && !rule.is_fact() {
        return None;
    }
    let unified = unify_terms(&rule.head, query, binding.clone());
    if unified.is_fail() {
        return None;
    }
    let condition = substitute(&rule.body, &unified);
    Some(FetchResult {
        binding: unified,
        condition,
    })
}
