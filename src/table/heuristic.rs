//! Heuristic reordering: a decorator that serves cheap conditions first.

use std::cell::RefCell;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::term::{Logical, Rule, Term};
use crate::unify::Binding;

use super::{FetchResult, LinearTable, Table};

/// Estimated cost of discharging a condition: truth is free, a single
/// term is one lookup, a disjunction a couple, a conjunction one per
/// conjunct, anything else is assumed unbounded.
fn estimate(condition: &Logical) -> u64 {
    match condition {
        Logical::And(items) => items.len() as u64,
        Logical::Term(_) => 1,
        Logical::Or(_) => 2,
        _ => u64::MAX,
    }
}

/// A table decorator that sorts conditional fetch results by the
/// estimated cost of their conditions, ascending.
///
/// Facts surface before rules, short bodies before long ones, so a
/// depth-first prover reaches cheap proofs first. The score is memoized
/// per condition; the cache sits behind a `RefCell`, which is fine in
/// this single-threaded engine.
#[derive(Debug, Clone, Default)]
pub struct HeuristicIndex<T: Table = LinearTable> {
    inner: T,
    scores: RefCell<FxHashMap<Logical, u64>>,
}

impl<T: Table> HeuristicIndex<T> {
    pub fn new(inner: T) -> HeuristicIndex<T> {
        HeuristicIndex {
            inner,
            scores: RefCell::new(FxHashMap::default()),
        }
    }

    pub fn into_inner(self) -> T {
        self.inner
    }

    fn score(&self, condition: &Logical) -> u64 {
        if let Some(&score) = self.scores.borrow().get(condition) {
            return score;
        }
        let score = estimate(condition);
        self.scores.borrow_mut().insert(condition.clone(), score);
        score
    }
}

impl<T: Table + Default> HeuristicIndex<T> {
    pub fn with_rules(rules: impl IntoIterator<Item = Rule>) -> HeuristicIndex<T> {
        let mut inner = T::default();
        for rule in rules {
            inner.tell(rule);
        }
        HeuristicIndex::new(inner)
    }
}

impl<T: Table> Table for HeuristicIndex<T> {
    fn tell(&mut self, rule: Rule) {
        self.inner.tell(rule);
    }

    fn fetch(
        &self,
        query: Term,
        conditional: bool,
        binding: Binding,
    ) -> Box<dyn Iterator<Item = FetchResult> + '_> {
        if !conditional {
            return self.inner.fetch(query, conditional, binding);
        }
        let mut results: Vec<FetchResult> = self.inner.fetch(query.clone(), true, binding).collect();
        // stable sort: equal costs keep the inner table's order
        results.sort_by_key(|result| self.score(&result.condition));
        trace!(query = %query, results = results.len(), "heuristic fetch reordered");
        Box::new(results.into_iter())
    }

    fn rules(&self) -> Box<dyn Iterator<Item = &Rule> + '_> {
        self.inner.rules()
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}
