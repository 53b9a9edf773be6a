#![deny(warnings)]

use crate::error::GrammarError;
use crate::grammar::{Grammar, Rule, Symbol, SymbolId};
use crate::sets::{self, SymbolSet};
use log::debug;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use std::rc::Rc;

pub type FollowSets = BTreeMap<SymbolId, SymbolSet>;

/// Can `alpha` derive the empty string in zero or more steps.
///
/// Nonterminals already being expanded on the current derivation path count
/// as non-nullable, so `A -> A` or `A -> B`, `B -> A` terminate (with false).
pub fn epsilon(alpha: &[Rc<Symbol>], grammar: &Grammar) -> bool {
    nullable(alpha, grammar, &mut HashSet::new())
}

fn nullable(alpha: &[Rc<Symbol>], grammar: &Grammar, expanding: &mut HashSet<SymbolId>) -> bool {
    let Some((head, rest)) = alpha.split_first() else { return true };
    if head.is_terminal() || !expanding.insert(head.id) {
        return false;
    }
    let head_nullable = grammar.rules_for(head.id)
        .any(|rule| nullable(&rule.rhs, grammar, expanding));
    expanding.remove(&head.id);
    head_nullable && nullable(rest, grammar, expanding)
}

/// Terminals that can begin some derivation of `alpha`.
///
/// Left recursion is cut the same way as in `epsilon`: a nonterminal that's
/// already being expanded contributes nothing new along that path.
pub fn first(alpha: &[Rc<Symbol>], grammar: &Grammar) -> SymbolSet {
    first_of(alpha, grammar, &mut HashSet::new())
}

fn first_of(alpha: &[Rc<Symbol>], grammar: &Grammar, expanding: &mut HashSet<SymbolId>) -> SymbolSet {
    let Some((head, rest)) = alpha.split_first() else { return SymbolSet::new() };
    if head.is_terminal() {
        return [head.id].into();
    }
    let mut result = SymbolSet::new();
    if expanding.insert(head.id) {
        for rule in grammar.rules_for(head.id) {
            sets::union_into(&mut result, &first_of(&rule.rhs, grammar, expanding));
        }
        expanding.remove(&head.id);
    }
    // A *=> eps, whatever starts the rest can start alpha too
    if epsilon(&alpha[..1], grammar) {
        sets::union_into(&mut result, &first_of(rest, grammar, expanding));
    }
    result
}

/// FOLLOW set of every nonterminal, computed as a fixed point.
///
/// Sets only ever grow, so the sum of their sizes stops changing exactly
/// when nothing new was added in a full pass over the rules. That can take
/// at most one pass per (nonterminal, terminal) pair plus a final one, past
/// that the computation is reported as diverged.
pub fn follow_sets(grammar: &Grammar) -> Result<FollowSets, GrammarError> {
    let mut follow: FollowSets = grammar.nonterminals()
        .map(|nt| (nt.id, SymbolSet::new()))
        .collect();
    // Follow(S) = { $ }
    follow.entry(grammar.start.id).or_default().insert(grammar.eof.id);

    let max_passes = grammar.nonterminals().count() * grammar.terminals().count() + 1;
    let mut total = sets::cardinality(follow.values());

    for pass in 1..=max_passes {
        for rule in &grammar.rules {
            for (idx, x) in rule.rhs.iter().enumerate() {
                if x.is_terminal() {
                    continue;
                }
                // A -> alpha X beta
                // FIRST(beta) goes in even when beta is nullable, FOLLOW(A) is
                // added on top. For E -> T E' the `+` and `-` after T only come
                // from FIRST(E'), without them T' -> <e> is never predicted.
                let beta = &rule.rhs[idx + 1..];
                let mut extra = first(beta, grammar);
                if epsilon(beta, grammar) {
                    let follow_lhs = follow.get(&rule.lhs.id).cloned().unwrap_or_default();
                    sets::union_into(&mut extra, &follow_lhs);
                }
                sets::union_into(follow.entry(x.id).or_default(), &extra);
            }
        }
        let new_total = sets::cardinality(follow.values());
        debug!("FOLLOW pass {}: {} -> {} entries", pass, total, new_total);
        if new_total == total {
            return Ok(follow);
        }
        total = new_total;
    }
    Err(GrammarError::FollowDiverged{passes: max_passes})
}

/// Lookaheads that select `rule`: FIRST(rhs), plus FOLLOW(lhs) if rhs is nullable.
pub fn predict_set(rule: &Rule, grammar: &Grammar, follow: &FollowSets) -> SymbolSet {
    let mut predict = first(&rule.rhs, grammar);
    if epsilon(&rule.rhs, grammar) {
        if let Some(follow_lhs) = follow.get(&rule.lhs.id) {
            sets::union_into(&mut predict, follow_lhs);
        }
    }
    predict
}

/// All derived sets of a grammar, computed once.
pub struct Analysis {
    pub grammar: Grammar,
    pub nullable: BTreeSet<SymbolId>,
    pub first: BTreeMap<SymbolId, SymbolSet>,
    pub follow: FollowSets,
    // indexed by rule index
    pub predict: Vec<SymbolSet>,
}

impl Analysis {
    pub fn new(grammar: &Grammar) -> Result<Self, GrammarError> {
        let mut nullable = BTreeSet::new();
        let mut first_sets = BTreeMap::new();
        for nt in grammar.nonterminals() {
            let alpha = [nt.clone()];
            if epsilon(&alpha, grammar) {
                nullable.insert(nt.id);
            }
            first_sets.insert(nt.id, first(&alpha, grammar));
        }
        let follow = follow_sets(grammar)?;
        let predict = grammar.rules.iter()
            .map(|rule| predict_set(rule, grammar, &follow))
            .collect();
        debug!("Analyzed {} rules, nullable: {:?}", grammar.rules.len(), nullable);
        Ok(Analysis{grammar: grammar.clone(), nullable, first: first_sets, follow, predict})
    }

    pub fn is_nullable(&self, nonterm: SymbolId) -> bool {
        sets::contains(&self.nullable, &nonterm)
    }

    pub fn predict_for(&self, rule: &Rule) -> &SymbolSet {
        &self.predict[rule.index]
    }

    fn names(&self, set: &SymbolSet) -> String {
        set.iter()
            .map(|id| self.grammar.symbols[*id].name.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{:<12} {:<9} {:<24} FOLLOW", "", "nullable", "FIRST")?;
        for nt in self.grammar.nonterminals() {
            let empty = SymbolSet::new();
            writeln!(f, "{:<12} {:<9} {:<24} {}",
                     nt.name,
                     self.is_nullable(nt.id),
                     self.names(self.first.get(&nt.id).unwrap_or(&empty)),
                     self.names(self.follow.get(&nt.id).unwrap_or(&empty)))?;
        }
        writeln!(f)?;
        for rule in &self.grammar.rules {
            writeln!(f, "{:<36} PREDICT {}", rule.to_string(), self.names(self.predict_for(rule)))?;
        }
        Ok(())
    }
}
