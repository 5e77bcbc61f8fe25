//! Surface-syntax coverage: programs that must load, programs that must
//! not, and a parse → ask round trip.

use hornbase::{bc_ask, knowledge_base, parse_query, var, Binding, Logical};
use rstest::rstest;

#[rstest]
#[case("guy(harry).", "a fact")]
#[case("wizard(X) :- guy(X), magical(X).", "a conjunctive rule")]
#[case("cool(X) :- wizard(X) ; witch(X).", "a disjunctive body")]
#[case(r"muggle(X) :- guy(X), \+ magical(X).", "negation as failure")]
#[case("muggle(X) :- guy(X), not(magical(X)).", "the not(...) spelling")]
#[case("first([H | T], H).", "list patterns in heads")]
#[case("beats(scissors, paper). beats(paper, rock).", "several clauses on one line")]
#[case("answer(42).", "integer arguments")]
#[case("pi(3.14).", "float arguments")]
#[case("greeting(\"hello\").", "string arguments")]
#[case("go :- !.", "cut is recognized")]
#[case("always :- true.", "true maps to the empty conjunction")]
#[case("never :- fail.", "fail maps to the empty disjunction")]
#[case("% just a comment\ndeep(n(n(n(leaf)))).", "comments and nesting")]
fn valid_programs_load(#[case] source: &str, #[case] description: &str) {
    let result = hornbase::parse_program(source);
    assert!(result.is_ok(), "failed to parse {description}: {result:?}");
}

#[rstest]
#[case("guy(harry)", "missing terminator")]
#[case("guy(harry,).", "trailing comma")]
#[case(":- guy(X).", "missing head")]
#[case("42 :- guy(X).", "a number cannot head a clause")]
#[case("guy(@).", "unlexable input")]
#[case("first([1, 2 | 3], 1).", "tail must be a variable or list")]
fn invalid_programs_are_rejected(#[case] source: &str, #[case] description: &str) {
    assert!(
        hornbase::parse_program(source).is_err(),
        "{description} should not parse"
    );
}

#[test]
fn parsed_programs_answer_queries() {
    let kb = knowledge_base(
        "
        muggle(X) :- guy(X), \\+ magical(X).
        guy(harry). guy(dudley).
        magical(harry).
        ",
    )
    .unwrap();

    let query = parse_query("muggle(X)").unwrap();
    let answers: Vec<_> = bc_ask(&kb, &query).unwrap().collect();
    assert_eq!(
        answers,
        vec![Binding::from_iter([(
            var("X"),
            hornbase::atom("dudley").into()
        )])]
    );
}

#[test]
fn parsed_list_facts_unify_with_tail_queries() {
    let kb = knowledge_base("owns(leo, [hat, scarf, wand]).").unwrap();
    let query = parse_query("owns(leo, [First | Rest])").unwrap();
    let answers: Vec<_> = bc_ask(&kb, &query).unwrap().collect();
    assert_eq!(answers.len(), 1);
    assert_eq!(
        answers[0].get(&var("First")),
        Some(&hornbase::atom("hat").into())
    );
    assert_eq!(
        answers[0].get(&var("Rest")),
        Some(&Logical::List(vec![
            hornbase::atom("scarf").into(),
            hornbase::atom("wand").into()
        ]))
    );
}
