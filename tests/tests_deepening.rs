//! Iterative deepening on programs plain depth-first search loops on.

mod helpers;

use helpers::{declan, milo, sibling, sibling_kb};
use hornbase::{atom, id_ask, take, var, Binding, KnowledgeBase, Logical};

#[test]
fn left_recursive_trap_still_answers() {
    // obvious_reality <= obvious_reality would send plain backward
    // chaining into an infinite descent; deepening finds the fact first
    let mut kb: KnowledgeBase = KnowledgeBase::new();
    kb.tell(atom("obvious_reality").when(Logical::Term(atom("obvious_reality"))))
        .unwrap();
    kb.tell(atom("obvious_reality")).unwrap();

    let mut answers = id_ask(&kb, &Logical::Term(atom("obvious_reality"))).unwrap();
    assert_eq!(answers.next(), Some(Binding::empty()));
}

#[test]
fn take_bounds_the_endless_level_sequence() {
    let mut kb: KnowledgeBase = KnowledgeBase::new();
    kb.tell(atom("obvious_reality").when(Logical::Term(atom("obvious_reality"))))
        .unwrap();
    kb.tell(atom("obvious_reality")).unwrap();

    // the trap has a proof at every depth, so every level contributes;
    // take is what makes consuming the sequence safe
    let answers = take(
        3,
        id_ask(&kb, &Logical::Term(atom("obvious_reality"))).unwrap(),
    );
    assert_eq!(answers, vec![Binding::empty(); 3]);
}

#[test]
fn deepening_reaches_answers_at_increasing_depths() {
    let kb = sibling_kb();
    let x = var("X");
    let query = Logical::Term(sibling(x.clone().into(), milo()));

    let leo_answer = Binding::from_iter([(x.clone(), helpers::leo())]);
    let declan_answer = Binding::from_iter([(x, declan())]);

    let mut answers = id_ask(&kb, &query).unwrap();
    assert!(
        answers.by_ref().take(50).any(|b| b == leo_answer),
        "leo appears at level one"
    );
    let mut answers = id_ask(&kb, &query).unwrap();
    assert!(
        answers.by_ref().take(50).any(|b| b == declan_answer),
        "declan appears once level two runs"
    );
}
