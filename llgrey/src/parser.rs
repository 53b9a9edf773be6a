#![deny(warnings)]

use crate::error::SyntaxError;
use crate::grammar::{Rule, Symbol, SymbolId};
use crate::table::ParseTable;
use crate::trees::Tree;
use log::trace;
use std::rc::Rc;

/// One lexeme, already classified as a terminal of the grammar.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub terminal: SymbolId,
    pub lexeme: String,
    // where the lexeme starts in the input
    pub offset: usize,
}

#[derive(Debug)]
pub enum ParseOutcome {
    AwaitingMore,
    TreeReady(Tree),
    SyntaxError(SyntaxError),
}

// Tree nodes are allocated as soon as a rule is expanded and filled in
// as their symbols get matched. Children are indexes into the same arena.
#[derive(Debug)]
enum Slot {
    Empty,
    Leaf(Rc<Symbol>, Token),
    Node(Rc<Rule>, Vec<usize>),
}

/// Table driven pushdown automaton. Fed one token at a time, it resets
/// itself after a complete tree or a syntax error so the next input starts
/// a fresh parse.
pub struct LL1Parser {
    table: Rc<ParseTable>,
    // symbols still to be matched, and the tree slot each one fills
    stack: Vec<(Rc<Symbol>, Option<usize>)>,
    slots: Vec<Slot>,
}

impl Token {
    pub fn new(terminal: SymbolId, lexeme: impl Into<String>, offset: usize) -> Self {
        Token{terminal, lexeme: lexeme.into(), offset}
    }
}

impl LL1Parser {
    pub fn new(table: Rc<ParseTable>) -> Self {
        let mut parser = LL1Parser{table, stack: Vec::new(), slots: Vec::new()};
        parser.reset();
        parser
    }

    pub fn table(&self) -> &ParseTable {
        &self.table
    }

    /// Drop any partial parse, stack becomes [$, S].
    pub fn reset(&mut self) {
        let grammar = self.table.grammar();
        self.stack = vec![(grammar.eof.clone(), None), (grammar.start.clone(), Some(0))];
        self.slots = vec![Slot::Empty];
    }

    fn terminal_name(&self, token: &Token) -> String {
        match self.table.grammar().symbols.get(token.terminal) {
            Some(sym) if sym.is_terminal() => sym.name.clone(),
            _ => token.lexeme.clone(),
        }
    }

    fn fail(&mut self, expected: Vec<String>, token: &Token) -> ParseOutcome {
        let error = SyntaxError{
            expected,
            found: self.terminal_name(token),
            position: token.offset,
        };
        trace!("Error {}", error);
        self.reset();
        ParseOutcome::SyntaxError(error)
    }

    pub fn feed(&mut self, token: Token) -> ParseOutcome {
        loop {
            let Some((top, slot)) = self.stack.last().cloned() else {
                // only reachable if a previous accept didn't reset
                self.reset();
                continue;
            };
            if top.is_terminal() {
                if top.id != token.terminal {
                    return self.fail(vec![top.name.clone()], &token);
                }
                self.stack.pop();
                trace!("Match {} {:?}", top, token.lexeme);
                let Some(slot) = slot else {
                    // matched the end marker with nothing else left
                    trace!("Accept");
                    let Some(tree) = self.take_tree() else {
                        // every slot is filled by the time $ matches
                        return self.fail(Vec::new(), &token);
                    };
                    self.reset();
                    return ParseOutcome::TreeReady(tree);
                };
                self.slots[slot] = Slot::Leaf(top, token);
                return ParseOutcome::AwaitingMore;
            }

            let Some(rule) = self.table.get(top.id, token.terminal).cloned() else {
                let expected = self.table.expected(top.id).iter()
                    .map(|t| t.name.clone())
                    .collect();
                return self.fail(expected, &token);
            };
            trace!("Expand {}", rule);
            self.stack.pop();
            let first_child = self.slots.len();
            let children: Vec<usize> = (first_child..first_child + rule.rhs.len()).collect();
            self.slots.extend(rule.rhs.iter().map(|_| Slot::Empty));
            // push in reverse so the leftmost rhs symbol is matched next
            for (sym, child) in rule.rhs.iter().zip(&children).rev() {
                self.stack.push((sym.clone(), Some(*child)));
            }
            if let Some(slot) = slot {
                self.slots[slot] = Slot::Node(rule, children);
            }
        }
    }

    // Children always sit at higher indexes than their parent, so building
    // from the back has every child ready before the node that owns it.
    fn take_tree(&mut self) -> Option<Tree> {
        let slots = std::mem::take(&mut self.slots);
        let mut built: Vec<Option<Tree>> = Vec::with_capacity(slots.len());
        built.resize_with(slots.len(), || None);
        for (idx, slot) in slots.into_iter().enumerate().rev() {
            let tree = match slot {
                Slot::Leaf(sym, token) => Some(Tree::Leaf(sym, token)),
                Slot::Node(rule, children) => children.into_iter()
                    .map(|child| built.get_mut(child).and_then(Option::take))
                    .collect::<Option<Vec<_>>>()
                    .map(|children| Tree::Node(rule, children)),
                Slot::Empty => None,
            };
            built[idx] = tree;
        }
        built.first_mut().and_then(Option::take)
    }

    /// Parse a whole token stream. An end marker is appended if the stream
    /// runs out before the tree is complete.
    pub fn parse<I>(&mut self, tokens: I) -> Result<Tree, SyntaxError>
            where I: IntoIterator<Item=Token> {
        self.reset();
        let mut end = 0;
        for token in tokens {
            end = token.offset + token.lexeme.chars().count();
            match self.feed(token) {
                ParseOutcome::AwaitingMore => (),
                ParseOutcome::TreeReady(tree) => return Ok(tree),
                ParseOutcome::SyntaxError(error) => return Err(error),
            }
        }
        let eof = Token::new(self.table.grammar().eof.id, "", end);
        match self.feed(eof) {
            ParseOutcome::TreeReady(tree) => Ok(tree),
            ParseOutcome::SyntaxError(error) => Err(error),
            // only if a rule lists the end marker itself
            ParseOutcome::AwaitingMore => {
                let eof = self.table.grammar().eof.name.clone();
                self.reset();
                Err(SyntaxError{expected: vec![eof.clone()], found: eof, position: end})
            }
        }
    }
}
