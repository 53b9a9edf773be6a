#![deny(warnings)]

use crate::error::GrammarError;
use crate::grammar::{Grammar, Rule, Symbol, SymbolId};
use crate::predict::Analysis;
use log::debug;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// (nonterminal, lookahead terminal) -> rule to expand. Immutable once built.
pub struct ParseTable {
    grammar: Grammar,
    table: HashMap<(SymbolId, SymbolId), Rc<Rule>>,
}

impl ParseTable {
    pub fn new(grammar: &Grammar) -> Result<Self, GrammarError> {
        Self::from_analysis(&Analysis::new(grammar)?)
    }

    /// Fails on the first slot claimed by two different rules.
    pub fn from_analysis(analysis: &Analysis) -> Result<Self, GrammarError> {
        let grammar = &analysis.grammar;
        let mut table: HashMap<(SymbolId, SymbolId), Rc<Rule>> = HashMap::new();
        for rule in &grammar.rules {
            for lookahead in analysis.predict_for(rule) {
                let key = (rule.lhs.id, *lookahead);
                match table.get(&key) {
                    Some(existing) if existing != rule => {
                        return Err(GrammarError::Conflict{
                            nonterm: rule.lhs.name.clone(),
                            lookahead: grammar.symbols[*lookahead].name.clone(),
                            first: existing.to_string(),
                            second: rule.to_string(),
                        });
                    }
                    Some(_) => (),
                    None => {
                        table.insert(key, rule.clone());
                    }
                }
            }
        }
        debug!("Parse table has {} entries for {} rules", table.len(), grammar.rules.len());
        Ok(ParseTable{grammar: grammar.clone(), table})
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn get(&self, nonterm: SymbolId, lookahead: SymbolId) -> Option<&Rc<Rule>> {
        self.table.get(&(nonterm, lookahead))
    }

    /// Terminals that have an entry for `nonterm`, in declaration order.
    pub fn expected(&self, nonterm: SymbolId) -> Vec<&Rc<Symbol>> {
        self.grammar.terminals()
            .filter(|t| self.table.contains_key(&(nonterm, t.id)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl fmt::Display for ParseTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for nt in self.grammar.nonterminals() {
            for t in self.grammar.terminals() {
                if let Some(rule) = self.get(nt.id, t.id) {
                    writeln!(f, "[{}, {}] {}", nt.name, t.name, rule)?;
                }
            }
        }
        Ok(())
    }
}
