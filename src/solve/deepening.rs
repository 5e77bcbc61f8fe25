//! Iterative deepening: breadth-complete search on a depth-first budget.

use std::rc::Rc;

use tracing::trace;

use crate::error::EngineError;
use crate::kb::{check_query, KnowledgeBase};
use crate::table::Table;
use crate::term::{variables_in, Logical};
use crate::unify::Binding;

use super::backward::{bc, BcOpts};

/// Runs backward chaining at patience 0, 1, 2, …, each level emitting only
/// the answers proved at exactly that depth.
///
/// This rescues queries plain depth-first chaining loops on: every proof
/// of depth `d` surfaces once level `d` runs, no matter what diverging
/// branches exist beyond it. The returned sequence never ends on its own;
/// consume it with `next`, [`crate::solve::take`], or a bounded loop.
pub fn id_ask<'a, T: Table>(
    kb: &'a KnowledgeBase<T>,
    query: &Logical,
) -> Result<Box<dyn Iterator<Item = Binding> + 'a>, EngineError> {
    check_query(query)?;
    let query = query.clone();
    let goal_vars = Rc::new(variables_in(&query));
    Ok(Box::new((0usize..).flat_map(move |level| {
        trace!(level, "iterative deepening");
        bc(
            kb,
            query.clone(),
            Binding::empty(),
            0,
            BcOpts {
                patience: Some(level),
                min_depth: level,
            },
            Rc::clone(&goal_vars),
        )
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solve::take;
    use crate::term::{atom, var, Term};

    #[test]
    fn first_answer_of_a_left_recursive_program() {
        let mut kb: KnowledgeBase = KnowledgeBase::new();
        kb.tell(atom("obvious_reality").when(Logical::Term(atom("obvious_reality"))))
            .unwrap();
        kb.tell(atom("obvious_reality")).unwrap();

        let mut answers = id_ask(&kb, &Logical::Term(atom("obvious_reality"))).unwrap();
        assert_eq!(answers.next(), Some(Binding::empty()));
    }

    #[test]
    fn levels_partition_answers_by_proof_depth() {
        let mut kb: KnowledgeBase = KnowledgeBase::new();
        let x = var("X");
        kb.tell(Term::new("mortal", [x.clone().into()]).when(Term::new("human", [x.into()])))
            .unwrap();
        kb.tell(Term::new("human", [atom("socrates").into()]))
            .unwrap();

        // the single proof lives at depth 1; level 0 contributes nothing
        // and level 1 finds it
        let answers = take(
            1,
            id_ask(&kb, &Logical::Term(Term::new("mortal", [var("X").into()]))).unwrap(),
        );
        assert_eq!(answers.len(), 1);
    }
}
