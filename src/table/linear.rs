//! The baseline table: a rule list scanned end to end.

use tracing::trace;

use crate::term::{Rule, Term};
use crate::unify::Binding;

use super::{match_rule, FetchResult, Table};

/// A table where fetch tries every stored rule in insertion order.
#[derive(Debug, Clone, Default)]
pub struct LinearTable {
    rules: Vec<Rule>,
}

impl LinearTable {
    pub fn new() -> LinearTable {
        LinearTable::default()
    }

    pub fn with_rules(rules: impl IntoIterator<Item = Rule>) -> LinearTable {
        let mut table = LinearTable::new();
        for rule in rules {
            table.tell(rule);
        }
        table
    }
}

impl Table for LinearTable {
    fn tell(&mut self, rule: Rule) {
        self.rules.push(rule.standardize());
    }

    fn fetch(
        &self,
        query: Term,
        conditional: bool,
        binding: Binding,
    ) -> Box<dyn Iterator<Item = FetchResult> + '_> {
        trace!(query = %query, conditional, "linear fetch");
        Box::new(
            self.rules
                .iter()
                .filter_map(move |rule| match_rule(rule, &query, conditional, &binding)),
        )
    }

    fn rules(&self) -> Box<dyn Iterator<Item = &Rule> + '_> {
        Box::new(self.rules.iter())
    }

    fn len(&self) -> usize {
        self.rules.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::{atom, var, Logical, Term};

    fn sibling(a: Logical, b: Logical) -> Term {
        Term::new("sibling", [a, b])
    }

    fn leo() -> Logical {
        atom("leo").into()
    }

    fn milo() -> Logical {
        atom("milo").into()
    }

    fn fixture() -> LinearTable {
        LinearTable::with_rules([
            sibling(leo(), var("x").into())
                .when(sibling(atom("declan").into(), var("x").into())),
            Rule::fact(sibling(leo(), milo())),
        ])
    }

    #[test]
    fn tell_standardizes_apart() {
        let table = fixture();
        let rules: Vec<_> = table.rules().collect();
        assert_eq!(rules.len(), 2);
        let stored_var = crate::term::variables_in(&Logical::Term(rules[0].head.clone()));
        assert!(stored_var.iter().all(|v| v.id.is_some()));
    }

    #[test]
    fn facts_only_fetch_skips_conditional_rules() {
        let table = fixture();
        let hits: Vec<_> = table
            .fetch(sibling(leo(), milo()), false, Binding::empty())
            .collect();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].condition.is_yes());
    }

    #[test]
    fn conditional_fetch_returns_both() {
        let table = fixture();
        let hits: Vec<_> = table
            .fetch(sibling(leo(), milo()), true, Binding::empty())
            .collect();
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn condition_is_the_instantiated_body() {
        let table = fixture();
        let hits: Vec<_> = table
            .fetch(sibling(leo(), atom("declan").into()), true, Binding::empty())
            .collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(
            hits[0].condition,
            Logical::Term(sibling(atom("declan").into(), atom("declan").into()))
        );
    }

    #[test]
    fn duplicates_are_kept() {
        let mut table = LinearTable::new();
        table.tell(Rule::fact(sibling(leo(), milo())));
        table.tell(Rule::fact(sibling(leo(), milo())));
        assert_eq!(table.len(), 2);
    }
}
