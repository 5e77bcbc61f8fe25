//! Backward chaining: depth-first search over proof trees.

use std::rc::Rc;

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::error::EngineError;
use crate::kb::{check_query, KnowledgeBase};
use crate::table::Table;
use crate::term::{substitute, variables_in, Logical, Var};
use crate::unify::Binding;

/// Search bounds for [`bc_ask_with`].
///
/// `patience` caps proof depth (unbounded when `None`); `min_depth` keeps
/// only answers whose proof is at least that deep; iterative deepening
/// sets both to the same level to emit each stratum exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BcOpts {
    pub patience: Option<usize>,
    pub min_depth: usize,
}

/// Enumerates bindings under which `query` is entailed, unbounded.
///
/// Answers come in the table's fetch order interleaved with depth-first
/// rule expansion, projected onto the query's own variables. Structural
/// duplicates are not removed, and left-recursive rule sets can make this
/// diverge; bound it with [`BcOpts::patience`], [`crate::solve::take`],
/// or use [`crate::solve::id_ask`].
pub fn bc_ask<'a, T: Table>(
    kb: &'a KnowledgeBase<T>,
    query: &Logical,
) -> Result<Box<dyn Iterator<Item = Binding> + 'a>, EngineError> {
    bc_ask_with(kb, query, BcOpts::default())
}

/// [`bc_ask`] with explicit search bounds.
pub fn bc_ask_with<'a, T: Table>(
    kb: &'a KnowledgeBase<T>,
    query: &Logical,
    opts: BcOpts,
) -> Result<Box<dyn Iterator<Item = Binding> + 'a>, EngineError> {
    check_query(query)?;
    let goal_vars = Rc::new(variables_in(query));
    Ok(bc(kb, query.clone(), Binding::empty(), 0, opts, goal_vars))
}

/// One layer of the proof search. Each candidate either closes the proof
/// (condition `YES`) or leaves a residual condition that becomes the next
/// layer's query, carrying the accumulated binding downward.
pub(crate) fn bc<'a, T: Table>(
    kb: &'a KnowledgeBase<T>,
    query: Logical,
    binding: Binding,
    depth: usize,
    opts: BcOpts,
    goal_vars: Rc<FxHashSet<Var>>,
) -> Box<dyn Iterator<Item = Binding> + 'a> {
    if binding.is_fail() {
        return Box::new(std::iter::empty());
    }
    trace!(depth, query = %query, "bc");
    Box::new(
        kb.fetch_unchecked(query, true, binding)
            .flat_map(move |candidate| -> Box<dyn Iterator<Item = Binding> + 'a> {
                if candidate.binding.is_fail() {
                    Box::new(std::iter::empty())
                } else if candidate.condition.is_yes() {
                    if depth >= opts.min_depth {
                        Box::new(std::iter::once(candidate.binding.project(&goal_vars)))
                    } else {
                        Box::new(std::iter::empty())
                    }
                } else if opts.patience.is_some_and(|patience| depth >= patience) {
                    // out of patience: no deeper expansion
                    Box::new(std::iter::empty())
                } else {
                    let next = substitute(&candidate.condition, &candidate.binding);
                    bc(
                        kb,
                        next,
                        candidate.binding,
                        depth + 1,
                        opts,
                        Rc::clone(&goal_vars),
                    )
                }
            }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::{atom, var, Term};

    fn human(x: Logical) -> Term {
        Term::new("human", [x])
    }

    fn mortal(x: Logical) -> Term {
        Term::new("mortal", [x])
    }

    fn kb() -> KnowledgeBase {
        let mut kb = KnowledgeBase::new();
        kb.tell(mortal(var("X").into()).when(human(var("X").into())))
            .unwrap();
        kb.tell(human(atom("socrates").into())).unwrap();
        kb
    }

    #[test]
    fn one_step_proof() {
        let kb = kb();
        let x = var("X");
        let answers: Vec<_> = bc_ask(&kb, &Logical::Term(mortal(x.clone().into())))
            .unwrap()
            .collect();
        assert_eq!(answers.len(), 1);
        assert_eq!(answers[0].get(&x), Some(&atom("socrates").into()));
    }

    #[test]
    fn answers_are_projected_onto_query_variables() {
        let kb = kb();
        let answers: Vec<_> = bc_ask(&kb, &Logical::Term(mortal(var("X").into())))
            .unwrap()
            .collect();
        // nothing but X in the answer, despite rule-internal variables
        assert_eq!(answers[0].len(), 1);
    }

    #[test]
    fn ground_queries_answer_with_the_empty_binding() {
        let kb = kb();
        let answers: Vec<_> = bc_ask(&kb, &Logical::Term(mortal(atom("socrates").into())))
            .unwrap()
            .collect();
        assert_eq!(answers, vec![Binding::empty()]);
    }

    #[test]
    fn zero_patience_cuts_rule_expansion() {
        let kb = kb();
        let opts = BcOpts {
            patience: Some(0),
            min_depth: 0,
        };
        let answers: Vec<_> = bc_ask_with(&kb, &Logical::Term(mortal(var("X").into())), opts)
            .unwrap()
            .collect();
        assert!(answers.is_empty(), "the proof needs one expansion");

        let direct: Vec<_> = bc_ask_with(&kb, &Logical::Term(human(var("X").into())), opts)
            .unwrap()
            .collect();
        assert_eq!(direct.len(), 1);
    }

    #[test]
    fn min_depth_filters_shallow_proofs() {
        let kb = kb();
        let opts = BcOpts {
            patience: None,
            min_depth: 1,
        };
        let answers: Vec<_> = bc_ask_with(&kb, &Logical::Term(human(var("X").into())), opts)
            .unwrap()
            .collect();
        assert!(answers.is_empty(), "the only proof is at depth 0");
    }

    #[test]
    fn unknown_predicates_exhaust_cleanly() {
        let kb = kb();
        let answers: Vec<_> = bc_ask(&kb, &Logical::Term(Term::new("god", [var("X").into()])))
            .unwrap()
            .collect();
        assert!(answers.is_empty());
    }
}
