//! Predicate-bucketed table: one sub-table per functor name.

use indexmap::IndexMap;
use smol_str::SmolStr;
use tracing::trace;

use crate::term::{Rule, Term};
use crate::unify::Binding;

use super::{FetchResult, LinearTable, Table};

/// A table that routes every rule to a sub-table keyed by its head's
/// functor name.
///
/// Fetch consults only the bucket for the query's functor; a missing
/// bucket is an empty result, not an error. Buckets keep insertion order
/// (IndexMap), so enumeration stays deterministic.
#[derive(Debug, Clone, Default)]
pub struct PredicateIndex<T: Table + Default = LinearTable> {
    buckets: IndexMap<SmolStr, T>,
}

impl<T: Table + Default> PredicateIndex<T> {
    pub fn new() -> PredicateIndex<T> {
        PredicateIndex {
            buckets: IndexMap::new(),
        }
    }

    pub fn with_rules(rules: impl IntoIterator<Item = Rule>) -> PredicateIndex<T> {
        let mut table = PredicateIndex::new();
        for rule in rules {
            table.tell(rule);
        }
        table
    }

    /// Number of distinct predicates stored.
    pub fn predicate_count(&self) -> usize {
        self.buckets.len()
    }
}

impl<T: Table + Default> Table for PredicateIndex<T> {
    fn tell(&mut self, rule: Rule) {
        self.buckets
            .entry(rule.name().clone())
            .or_default()
            .tell(rule);
    }

    fn fetch(
        &self,
        query: Term,
        conditional: bool,
        binding: Binding,
    ) -> Box<dyn Iterator<Item = FetchResult> + '_> {
        match self.buckets.get(&query.name) {
            Some(bucket) => bucket.fetch(query, conditional, binding),
            None => {
                trace!(predicate = %query.name, "no bucket for predicate");
                Box::new(std::iter::empty())
            }
        }
    }

    fn rules(&self) -> Box<dyn Iterator<Item = &Rule> + '_> {
        Box::new(self.buckets.values().flat_map(|bucket| bucket.rules()))
    }

    fn len(&self) -> usize {
        self.buckets.values().map(|bucket| bucket.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::{atom, var, Logical, Term};

    fn guy(x: Logical) -> Term {
        Term::new("guy", [x])
    }

    fn magical(x: Logical) -> Term {
        Term::new("magical", [x])
    }

    #[test]
    fn rules_route_to_their_bucket() {
        let table: PredicateIndex = PredicateIndex::with_rules([
            Rule::fact(guy(atom("harry").into())),
            Rule::fact(magical(atom("harry").into())),
            Rule::fact(guy(atom("ron").into())),
        ]);
        assert_eq!(table.predicate_count(), 2);
        assert_eq!(table.len(), 3);

        let hits: Vec<_> = table
            .fetch(guy(var("X").into()), false, Binding::empty())
            .collect();
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn missing_bucket_is_empty_not_an_error() {
        let table: PredicateIndex = PredicateIndex::new();
        let hits: Vec<_> = table
            .fetch(guy(var("X").into()), true, Binding::empty())
            .collect();
        assert!(hits.is_empty());
    }

    #[test]
    fn enumeration_covers_every_bucket() {
        let table: PredicateIndex = PredicateIndex::with_rules([
            Rule::fact(guy(atom("harry").into())),
            Rule::fact(magical(atom("hermione").into())),
        ]);
        assert_eq!(table.rules().count(), 2);
        assert_eq!(table.facts().count(), 2);
    }
}
