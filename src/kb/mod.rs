//! The knowledge-base facade: compound queries over any table.
//!
//! A [`KnowledgeBase`] owns one clause table and evaluates whole logical
//! expressions against it, dispatching on the query's shape: conjunction
//! and disjunction recurse, negation-as-failure probes for a single proof,
//! constraints consult the binding directly, and atomic terms go to the
//! table. Everything is lazy: each entry point returns an iterator that
//! searches only as far as the caller consumes.

use tracing::{debug, trace};

use crate::error::EngineError;
use crate::table::{FetchResult, PredicateIndex, Table};
use crate::term::{Logical, Rule, Term};
use crate::unify::Binding;

/// Anything `tell` accepts: a full rule, or a bare expression (a term
/// becomes a fact, a conjunction is told one conjunct at a time).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sentence {
    Rule(Rule),
    Expr(Logical),
}

impl From<Rule> for Sentence {
    fn from(rule: Rule) -> Sentence {
        Sentence::Rule(rule)
    }
}

impl From<Term> for Sentence {
    fn from(term: Term) -> Sentence {
        Sentence::Rule(Rule::fact(term))
    }
}

impl From<Logical> for Sentence {
    fn from(expr: Logical) -> Sentence {
        Sentence::Expr(expr)
    }
}

/// A body of rules behind one table, with compound-query evaluation.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase<T: Table = PredicateIndex> {
    table: T,
}

impl<T: Table + Default> KnowledgeBase<T> {
    pub fn new() -> KnowledgeBase<T> {
        KnowledgeBase {
            table: T::default(),
        }
    }

    /// A knowledge base pre-populated with rules, inserted without the
    /// body validation [`KnowledgeBase::tell`] performs; callers own the
    /// guarantee that every body is a fetchable shape.
    pub fn with_rules(rules: impl IntoIterator<Item = Rule>) -> KnowledgeBase<T> {
        let mut kb: KnowledgeBase<T> = KnowledgeBase::new();
        for rule in rules {
            kb.table.tell(rule);
        }
        kb
    }
}

impl<T: Table> KnowledgeBase<T> {
    pub fn with_table(table: T) -> KnowledgeBase<T> {
        KnowledgeBase { table }
    }

    pub fn table(&self) -> &T {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut T {
        &mut self.table
    }

    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.table.rules()
    }

    pub fn facts(&self) -> impl Iterator<Item = &Term> {
        self.table.facts()
    }

    /// Adds a sentence. Conjunctions are told conjunct by conjunct; a
    /// top-level disjunction (or any other non-definite shape) is rejected
    /// since this store holds Horn clauses only. Rule bodies are checked here
    /// so that every condition later met during resolution is a shape
    /// `fetch` can evaluate.
    pub fn tell(&mut self, sentence: impl Into<Sentence>) -> Result<(), EngineError> {
        match sentence.into() {
            Sentence::Rule(rule) => {
                check_query(&rule.body)?;
                debug!(rule = %rule, "tell");
                self.table.tell(rule);
                Ok(())
            }
            Sentence::Expr(expr) => self.tell_expr(expr),
        }
    }

    fn tell_expr(&mut self, expr: Logical) -> Result<(), EngineError> {
        match expr {
            Logical::Term(term) => self.tell(Rule::fact(term)),
            Logical::And(items) => {
                for item in items {
                    self.tell_expr(item)?;
                }
                Ok(())
            }
            other => Err(EngineError::NotHorn(other.to_string())),
        }
    }

    /// Evaluates `query` under `binding`, yielding `(binding, condition)`
    /// pairs. With `conditional` false, only unconditionally-true results
    /// surface. Fails fast with [`EngineError::UnsupportedQuery`] when the
    /// query contains a shape outside the dispatch table.
    pub fn fetch(
        &self,
        query: Logical,
        conditional: bool,
        binding: Binding,
    ) -> Result<Box<dyn Iterator<Item = FetchResult> + '_>, EngineError> {
        check_query(&query)?;
        Ok(self.fetch_unchecked(query, conditional, binding))
    }

    /// The dispatch itself, for queries already known to be well-shaped
    /// (validated queries, and conditions built from validated bodies).
    pub(crate) fn fetch_unchecked(
        &self,
        query: Logical,
        conditional: bool,
        binding: Binding,
    ) -> Box<dyn Iterator<Item = FetchResult> + '_> {
        trace!(query = %query, conditional, "fetch");

        // a failed binding is never evaluated
        if binding.is_fail() {
            return Box::new(std::iter::once(FetchResult {
                binding: Binding::Fail,
                condition: Logical::no(),
            }));
        }
        if query.is_yes() {
            return Box::new(std::iter::once(FetchResult {
                binding,
                condition: Logical::yes(),
            }));
        }
        if query.is_no() {
            return Box::new(std::iter::once(FetchResult {
                binding: Binding::Fail,
                condition: Logical::no(),
            }));
        }

        match query {
            Logical::Not(inner) => {
                // negation as failure: one counter-proof kills it, and a
                // success never captures bindings
                Box::new(
                    std::iter::once_with(move || {
                        let mut proofs =
                            self.fetch_unchecked((*inner).clone(), conditional, binding.clone());
                        if proofs.next().is_some() {
                            None
                        } else {
                            Some(FetchResult {
                                binding,
                                condition: Logical::yes(),
                            })
                        }
                    })
                    .flatten(),
                )
            }
            Logical::Constraint(constraint) => Box::new(
                constraint
                    .test(&binding)
                    .into_iter()
                    .map(|b| FetchResult {
                        binding: b,
                        condition: Logical::yes(),
                    }),
            ),
            Logical::Or(items) => Box::new(items.into_iter().flat_map(move |item| {
                self.fetch_unchecked(item, conditional, binding.clone())
            })),
            Logical::And(mut items) => {
                // non-empty here: the empty conjunction was YES above
                let head = items.remove(0);
                let rest = Logical::And(items);
                Box::new(
                    self.fetch_unchecked(head, conditional, binding)
                        .flat_map(move |first| {
                            let condition = first.condition;
                            self.fetch_unchecked(rest.clone(), conditional, first.binding)
                                .map(move |remaining| FetchResult {
                                    binding: remaining.binding,
                                    condition: Logical::and([
                                        condition.clone(),
                                        remaining.condition,
                                    ]),
                                })
                        }),
                )
            }
            Logical::Term(term) => self.table.fetch(term, conditional, binding),
            other => {
                debug_assert!(false, "unfetchable query shape: {other}");
                Box::new(std::iter::empty())
            }
        }
    }
}

impl<T: Table> From<T> for KnowledgeBase<T> {
    fn from(table: T) -> KnowledgeBase<T> {
        KnowledgeBase::with_table(table)
    }
}

/// Rejects expressions outside the shapes `fetch` evaluates: anything but
/// terms, constraints, joins and negation over those.
pub(crate) fn check_query(query: &Logical) -> Result<(), EngineError> {
    match query {
        Logical::Term(_) | Logical::Constraint(_) => Ok(()),
        Logical::And(items) | Logical::Or(items) => {
            items.iter().try_for_each(check_query)
        }
        Logical::Not(inner) => check_query(inner),
        other => Err(EngineError::UnsupportedQuery(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::Constraint;
    use crate::term::{atom, var, Logical, Term};

    fn sibling(a: Logical, b: Logical) -> Term {
        Term::new("sibling", [a, b])
    }

    fn leo() -> Logical {
        atom("leo").into()
    }

    fn declan() -> Logical {
        atom("declan").into()
    }

    fn fixture() -> KnowledgeBase {
        let mut kb = KnowledgeBase::new();
        kb.tell(sibling(leo(), declan())).unwrap();
        kb.tell(sibling(leo(), leo())).unwrap();
        kb
    }

    #[test]
    fn yes_yields_the_binding_once() {
        let kb = fixture();
        let hits: Vec<_> = kb
            .fetch(Logical::yes(), false, Binding::empty())
            .unwrap()
            .collect();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].condition.is_yes());
        assert!(!hits[0].binding.is_fail());
    }

    #[test]
    fn no_yields_failure_once() {
        let kb = fixture();
        let hits: Vec<_> = kb
            .fetch(Logical::no(), false, Binding::empty())
            .unwrap()
            .collect();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].binding.is_fail());
    }

    #[test]
    fn failed_bindings_pass_through_unevaluated() {
        let kb = fixture();
        let hits: Vec<_> = kb
            .fetch(Logical::Term(sibling(leo(), declan())), false, Binding::Fail)
            .unwrap()
            .collect();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].binding.is_fail());
    }

    #[test]
    fn conjunction_threads_bindings_left_to_right() {
        let kb = fixture();
        let x = var("X");
        let query = Logical::Term(sibling(leo(), x.clone().into()))
            & Logical::from(Constraint::equals(Logical::Var(x.clone()), leo()));
        let hits: Vec<_> = kb
            .fetch(query, false, Binding::empty())
            .unwrap()
            .collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].binding.get(&x), Some(&leo()));
    }

    #[test]
    fn disjunction_concatenates_branches() {
        let kb = fixture();
        let query = Logical::Term(sibling(leo(), declan()))
            | Logical::Term(sibling(leo(), leo()));
        let hits: Vec<_> = kb
            .fetch(query, false, Binding::empty())
            .unwrap()
            .collect();
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn negation_fails_when_a_proof_exists() {
        let kb = fixture();
        let hits: Vec<_> = kb
            .fetch(
                !Logical::Term(sibling(leo(), declan())),
                false,
                Binding::empty(),
            )
            .unwrap()
            .collect();
        assert!(hits.is_empty());
    }

    #[test]
    fn negation_succeeds_without_capturing() {
        let kb = fixture();
        let x = var("X");
        let hits: Vec<_> = kb
            .fetch(
                !Logical::Term(sibling(declan(), x.into())),
                false,
                Binding::empty(),
            )
            .unwrap()
            .collect();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].binding.is_empty());
        assert!(hits[0].condition.is_yes());
    }

    #[test]
    fn unsupported_shapes_are_rejected() {
        let kb = fixture();
        let err = kb
            .fetch(Logical::Var(var("X")), false, Binding::empty())
            .map(|_| ())
            .unwrap_err();
        assert!(matches!(err, EngineError::UnsupportedQuery(_)));
        assert!(kb
            .fetch(Logical::Int(3), false, Binding::empty())
            .map(|_| ())
            .is_err());
    }

    #[test]
    fn telling_a_disjunction_is_rejected() {
        let mut kb = fixture();
        let bad = Logical::Term(sibling(atom("a").into(), atom("b").into()))
            | Logical::Term(sibling(atom("b").into(), atom("c").into()));
        let err = kb.tell(bad).unwrap_err();
        assert!(matches!(err, EngineError::NotHorn(_)));
    }

    #[test]
    fn telling_a_conjunction_tells_each_conjunct() {
        let mut kb: KnowledgeBase = KnowledgeBase::new();
        let both = Logical::Term(sibling(leo(), declan())) & Logical::Term(sibling(declan(), leo()));
        kb.tell(both).unwrap();
        assert_eq!(kb.rules().count(), 2);
    }
}
