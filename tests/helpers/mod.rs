//! Shared fixtures for the integration suites.

#![allow(dead_code)]

use hornbase::{atom, var, KnowledgeBase, Logical, Term};

/// `sibling(a, b)` as a term.
pub fn sibling(a: Logical, b: Logical) -> Term {
    Term::new("sibling", [a, b])
}

pub fn leo() -> Logical {
    atom("leo").into()
}

pub fn milo() -> Logical {
    atom("milo").into()
}

pub fn declan() -> Logical {
    atom("declan").into()
}

pub fn axel() -> Logical {
    atom("axel").into()
}

/// The sibling knowledge base: two facts, symmetry, and transitivity.
pub fn sibling_kb() -> KnowledgeBase {
    let (x, y, z) = (var("X"), var("Y"), var("Z"));
    let mut kb = KnowledgeBase::new();
    kb.tell(
        sibling(x.clone().into(), y.clone().into())
            .when(sibling(y.clone().into(), x.clone().into())),
    )
    .unwrap();
    kb.tell(
        sibling(x.clone().into(), y.clone().into()).when(
            Logical::Term(sibling(x.clone().into(), z.clone().into()))
                & Logical::Term(sibling(z.into(), y.into())),
        ),
    )
    .unwrap();
    kb.tell(sibling(milo(), leo())).unwrap();
    kb.tell(sibling(leo(), declan())).unwrap();
    kb
}

/// The Hogwarts program, in surface syntax.
pub const HOGWARTS: &str = "
wizard(X) :- guy(X), magical(X).
witch(X) :- girl(X), magical(X).
guy(harry). guy(ron). guy(dudley).
girl(hermione).
magical(harry). magical(ron). magical(hermione).
";
