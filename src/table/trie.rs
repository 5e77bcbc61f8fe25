//! Trie-indexed table: rules keyed level by level on functor, then
//! argument positions.

use indexmap::IndexMap;
use smol_str::SmolStr;
use tracing::trace;

use crate::term::{variables_in, Logical, Rule, Term};
use crate::unify::{unifiable, Binding};

use super::{match_rule, FetchResult, Table};

/// One level key. Heads with different arities take disjoint paths, so a
/// terminal node is reached after exactly `arity` argument levels.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum TrieKey {
    /// Root-level key: functor name and arity.
    Functor(SmolStr, usize),
    /// A variable-free argument.
    Ground(Logical),
    /// An argument containing variables.
    Wild,
}

fn arg_key(arg: &Logical) -> TrieKey {
    if variables_in(arg).is_empty() {
        TrieKey::Ground(arg.clone())
    } else {
        TrieKey::Wild
    }
}

#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: IndexMap<TrieKey, TrieNode>,
    /// Rules stored at this terminal.
    rules: Vec<Rule>,
}

impl TrieNode {
    /// Collects the rules at every terminal reachable by descending in
    /// parallel with the remaining query arguments.
    fn gather<'a>(&'a self, args: &[Logical], out: &mut Vec<&'a Rule>) {
        let Some((head, rest)) = args.split_first() else {
            out.extend(self.rules.iter());
            return;
        };
        let head_is_var = matches!(head, Logical::Var(_) | Logical::Tail(_));
        for (key, child) in &self.children {
            let descend = match key {
                _ if head_is_var => true,
                TrieKey::Wild => true,
                TrieKey::Ground(ground) => unifiable(ground, head),
                TrieKey::Functor(..) => false,
            };
            if descend {
                child.gather(rest, out);
            }
        }
    }
}

/// A table storing rules in a tree keyed on (functor, then argument
/// positions).
///
/// `tell` descends by the head's path, creating nodes as needed. `fetch`
/// descends in parallel with the query: a variable query element opens
/// every branch; a concrete element opens wildcard branches plus ground
/// branches that unify with it. Candidates surviving the descent still go
/// through full head unification, so over-approximation is harmless.
/// Result order follows child insertion order, depth first, reproducible
/// for a given tell sequence.
#[derive(Debug, Clone, Default)]
pub struct TrieTable {
    root: TrieNode,
    len: usize,
}

impl TrieTable {
    pub fn new() -> TrieTable {
        TrieTable::default()
    }

    pub fn with_rules(rules: impl IntoIterator<Item = Rule>) -> TrieTable {
        let mut table = TrieTable::new();
        for rule in rules {
            table.tell(rule);
        }
        table
    }

    fn candidates(&self, query: &Term) -> Vec<&Rule> {
        let mut out = Vec::new();
        let functor = TrieKey::Functor(query.name.clone(), query.arity());
        if let Some(node) = self.root.children.get(&functor) {
            node.gather(&query.args, &mut out);
        }
        out
    }
}

impl Table for TrieTable {
    fn tell(&mut self, rule: Rule) {
        let rule = rule.standardize();
        let mut node = &mut self.root;
        let functor = TrieKey::Functor(rule.name().clone(), rule.head.arity());
        node = node.children.entry(functor).or_default();
        for arg in &rule.head.args {
            node = node.children.entry(arg_key(arg)).or_default();
        }
        node.rules.push(rule);
        self.len += 1;
    }

    fn fetch(
        &self,
        query: Term,
        conditional: bool,
        binding: Binding,
    ) -> Box<dyn Iterator<Item = FetchResult> + '_> {
        let candidates = self.candidates(&query);
        trace!(query = %query, candidates = candidates.len(), "trie fetch");
        Box::new(
            candidates
                .into_iter()
                .filter_map(move |rule| match_rule(rule, &query, conditional, &binding)),
        )
    }

    fn rules(&self) -> Box<dyn Iterator<Item = &Rule> + '_> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            out.extend(node.rules.iter());
            // reversed so the leftmost child is visited first
            stack.extend(node.children.values().rev());
        }
        Box::new(out.into_iter())
    }

    fn len(&self) -> usize {
        self.len
    }
}
