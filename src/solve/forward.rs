//! Forward chaining: saturate the knowledge base, then fetch.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::error::EngineError;
use crate::kb::{check_query, KnowledgeBase};
use crate::table::Table;
use crate::term::{variables_in, Logical, Rule, Term};
use crate::unify::Binding;

/// Deduces every deducible fact, in place.
///
/// Each pass walks the conditional rules, evaluates their bodies against
/// facts only, and instantiates their heads; a head not already subsumed
/// by a stored fact is added. Passes repeat until one adds nothing.
/// Reaches a fixpoint for function-free, range-restricted programs; rules
/// that keep inventing new ground terms are the caller's responsibility.
pub fn forward_chain<T: Table>(kb: &mut KnowledgeBase<T>) {
    let mut pass = 0usize;
    loop {
        pass += 1;
        let rules: Vec<Rule> = kb.rules().filter(|r| !r.is_fact()).cloned().collect();
        let mut deduced: Vec<Term> = Vec::new();
        let mut batch: FxHashSet<Term> = FxHashSet::default();

        for rule in rules {
            let rule = rule.standardize();
            let bindings: Vec<Binding> = kb
                .fetch_unchecked(rule.body.clone(), false, Binding::empty())
                .filter(|r| !r.binding.is_fail())
                .map(|r| r.binding)
                .collect();
            for binding in bindings {
                let head = rule.head.substitute(&binding);
                if batch.contains(&head) || is_known(kb, &head) {
                    continue;
                }
                batch.insert(head.clone());
                deduced.push(head);
            }
        }

        if deduced.is_empty() {
            debug!(pass, "forward chaining reached fixpoint");
            return;
        }
        debug!(pass, new_facts = deduced.len(), "forward chaining pass");
        for fact in deduced {
            kb.table_mut().tell(Rule::fact(fact));
        }
    }
}

/// Whether an existing fact already fetch-matches `head`.
fn is_known<T: Table>(kb: &KnowledgeBase<T>, head: &Term) -> bool {
    kb.fetch_unchecked(Logical::Term(head.clone()), false, Binding::empty())
        .next()
        .is_some()
}

/// Saturates `kb`, then enumerates the query's answers from facts alone.
///
/// Mutates the knowledge base it is given; clone first for a
/// non-destructive ask.
pub fn fc_ask<'a, T: Table>(
    kb: &'a mut KnowledgeBase<T>,
    query: &Logical,
) -> Result<Box<dyn Iterator<Item = Binding> + 'a>, EngineError> {
    check_query(query)?;
    forward_chain(kb);
    let goal_vars = variables_in(query);
    let kb = &*kb;
    Ok(Box::new(
        kb.fetch_unchecked(query.clone(), false, Binding::empty())
            .filter(|r| !r.binding.is_fail())
            .map(move |r| r.binding.project(&goal_vars)),
    ))
}
