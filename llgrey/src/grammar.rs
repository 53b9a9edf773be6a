#![deny(warnings)]

use crate::error::GrammarError;
use std::collections::HashMap;
use std::rc::Rc;
use std::{fmt, hash};

/// Dense index of a symbol inside its grammar.
pub type SymbolId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Terminal,
    NonTerminal,
}

/// Symbols are interned by the builder, only `id` matters for identity.
#[derive(Clone)]
pub struct Symbol {
    pub id: SymbolId,
    pub kind: SymbolKind,
    pub name: String,
}

pub struct Rule {
    pub index: usize,
    pub lhs: Rc<Symbol>,
    pub rhs: Vec<Rc<Symbol>>,
}

#[derive(Clone, Debug)]
pub struct Grammar {
    pub start: Rc<Symbol>,
    pub eof: Rc<Symbol>,
    pub symbols: Vec<Rc<Symbol>>,
    pub rules: Vec<Rc<Rule>>,
    names: HashMap<String, SymbolId>,
}

#[derive(Default)]
pub struct GrammarBuilder {
    symbols: Vec<Rc<Symbol>>,
    names: HashMap<String, SymbolId>,
    rules: Vec<Rc<Rule>>,
    eof: Option<String>,
    error: Option<GrammarError>,
}


impl Symbol {
    pub fn is_terminal(&self) -> bool {
        self.kind == SymbolKind::Terminal
    }
}

impl hash::Hash for Symbol {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Symbol) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            SymbolKind::Terminal => write!(f, "Term({})", self.name),
            SymbolKind::NonTerminal => write!(f, "NonTerm({})", self.name),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

// Rules compare by shape, the index is just bookkeeping
impl PartialEq for Rule {
    fn eq(&self, other: &Rule) -> bool {
        self.lhs == other.lhs && self.rhs == other.rhs
    }
}

impl Eq for Rule {}

impl hash::Hash for Rule {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.lhs.hash(state);
        self.rhs.hash(state);
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} -> {}", self.lhs.name, self.rhs.iter().map(
                |s| s.name.as_str()).collect::<Vec<_>>().join(" "))
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl Grammar {
    pub fn symbol(&self, name: &str) -> Option<&Rc<Symbol>> {
        self.names.get(name).map(|id| &self.symbols[*id])
    }

    pub fn rules_for(&self, lhs: SymbolId) -> impl Iterator<Item=&Rc<Rule>> {
        self.rules.iter().filter(move |rule| rule.lhs.id == lhs)
    }

    pub fn terminals(&self) -> impl Iterator<Item=&Rc<Symbol>> {
        self.symbols.iter().filter(|s| s.is_terminal())
    }

    pub fn nonterminals(&self) -> impl Iterator<Item=&Rc<Symbol>> {
        self.symbols.iter().filter(|s| !s.is_terminal())
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rule in &self.rules {
            writeln!(f, "{}", rule)?;
        }
        Ok(())
    }
}

/// Builds a Grammar while validating existence of Symbols and checking rules.
/// The end-of-input terminal (`$` unless renamed with `eof`) is added on
/// `into_grammar`.
impl GrammarBuilder {
    fn fail(&mut self, error: GrammarError) {
        // keep the first problem, later ones are usually fallout
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    fn add_symbol(&mut self, name: String, kind: SymbolKind, quiet: bool) {
        // Check for duplicate symbols to avoid overwriting by mistake
        if !self.names.contains_key(&name) {
            let id = self.symbols.len();
            self.names.insert(name.clone(), id);
            self.symbols.push(Rc::new(Symbol{id, kind, name}));
        } else if !quiet {
            self.fail(GrammarError::DuplicateSymbol(name));
        }
    }

    pub fn nonterm(mut self, name: impl Into<String>) -> Self {
        self.add_symbol(name.into(), SymbolKind::NonTerminal, false);
        self
    }

    pub fn terminal(mut self, name: impl Into<String>) -> Self {
        self.add_symbol(name.into(), SymbolKind::Terminal, false);
        self
    }

    /// Rename the end-of-input terminal.
    pub fn eof(mut self, name: impl Into<String>) -> Self {
        self.eof = Some(name.into());
        self
    }

    // Quiet versions silently ignore pre-existent symbols and don't chain
    // so they can be invoked in loops.

    pub fn quiet_nonterm(&mut self, name: impl Into<String>) {
        self.add_symbol(name.into(), SymbolKind::NonTerminal, true);
    }

    pub fn quiet_terminal(&mut self, name: impl Into<String>) {
        self.add_symbol(name.into(), SymbolKind::Terminal, true);
    }

    fn lookup(&mut self, name: &str) -> Option<Rc<Symbol>> {
        match self.names.get(name) {
            Some(id) => Some(self.symbols[*id].clone()),
            None => {
                self.fail(GrammarError::MissingSymbol(name.to_string()));
                None
            }
        }
    }

    fn add_rule<S, S2>(&mut self, head: S, spec: &[S2], quiet: bool)
        where S: AsRef<str>, S2: AsRef<str>
    {
        let Some(lhs) = self.lookup(head.as_ref()) else { return };
        if lhs.is_terminal() {
            self.fail(GrammarError::TerminalHead(lhs.name.clone()));
            return;
        }
        let mut rhs = Vec::with_capacity(spec.len());
        for name in spec {
            let Some(symbol) = self.lookup(name.as_ref()) else { return };
            rhs.push(symbol);
        }
        let rule = Rc::new(Rule{index: self.rules.len(), lhs, rhs});
        // Check this rule is only added once. NOTE: `Rc`s equal on inner value
        if !self.rules.contains(&rule) {
            self.rules.push(rule);
        } else if !quiet {
            self.fail(GrammarError::DuplicateRule(rule.to_string()));
        }
    }

    pub fn rule<S, S2>(mut self, head: S, spec: &[S2]) -> Self
        where S: AsRef<str>, S2: AsRef<str>
    {
        self.add_rule(head, spec, false);
        self
    }

    pub fn quiet_rule<S, S2>(&mut self, head: S, spec: &[S2])
        where S: AsRef<str>, S2: AsRef<str>
    {
        self.add_rule(head, spec, true)
    }

    pub fn into_grammar(mut self, start: impl AsRef<str>) -> Result<Grammar, GrammarError> {
        let eof_name = self.eof.take().unwrap_or_else(|| "$".to_string());
        self.quiet_terminal(eof_name.clone());
        let eof = self.symbols[self.names[&eof_name]].clone();
        if !eof.is_terminal() {
            self.fail(GrammarError::DuplicateSymbol(eof_name));
        }
        let start = self.lookup(start.as_ref());
        if let Some(error) = self.error {
            return Err(error);
        }
        let start = start.ok_or_else(|| GrammarError::MissingSymbol(String::new()))?;
        if !self.rules.iter().any(|rule| rule.lhs == start) {
            return Err(GrammarError::NoStartRule(start.name.clone()));
        }
        Ok(Grammar{
            start,
            eof,
            symbols: self.symbols,
            rules: self.rules,
            names: self.names,
        })
    }
}

///////////////////////////////////////////////////////////////////////////////
