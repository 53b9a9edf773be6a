#![deny(warnings)]

use crate::scanner::Scanner;

static WHITE: &[char] = &[' ', '\n', '\r', '\t'];
static DIGITS: &[char] = &['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];
static OPS: &[char] = &['+', '-', '*', '/', '%', '^', '(', ')', ',', '='];

fn is_ident_start(c: &char) -> bool { c.is_alphabetic() || *c == '_' }
fn is_ident_char(c: &char) -> bool { c.is_alphanumeric() || *c == '_' }

impl<I: Iterator<Item=char>> Scanner<I> {
    pub fn extract_string(&mut self) -> String {
        self.extract().into_iter().collect()
    }

    /// Discard any whitespace ahead so the next lexeme starts clean.
    pub fn skip_whitespace(&mut self) {
        self.skip_all(WHITE);
        self.ignore();
    }

    // scan unsigned numbers like [0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)? or \.[0-9]+
    // Signs are left to the grammar as unary minus.
    pub fn scan_number(&mut self) -> Option<String> {
        let backtrack = self.pos();
        let integer = self.skip_all(DIGITS);
        // fractional part, ".5" is fine and so is "5."
        let dot = self.pos();
        if self.accept(&'.').is_some() && !self.skip_all(DIGITS) && !integer {
            self.set_pos(dot);
        }
        if self.pos() == backtrack {
            return None;
        }
        // exponent part, only if digits follow
        let backtrack = self.pos();
        if self.accept_any(&['e', 'E']).is_some() {
            self.accept_any(&['+', '-']);
            if !self.skip_all(DIGITS) {
                self.set_pos(backtrack);
            }
        }
        Some(self.extract_string())
    }

    pub fn scan_math_op(&mut self) -> Option<String> {
        self.accept_any(OPS)?;
        Some(self.extract_string())
    }

    // scan [a-zA-Z_][a-zA-Z0-9_]*
    pub fn scan_identifier(&mut self) -> Option<String> {
        let backtrack = self.pos();
        match self.next() {
            Some(c) if is_ident_start(&c) => (),
            _ => {
                self.set_pos(backtrack);
                return None;
            }
        }
        loop {
            let backtrack = self.pos();
            match self.next() {
                Some(c) if is_ident_char(&c) => (),
                _ => {
                    self.set_pos(backtrack);
                    break;
                }
            }
        }
        Some(self.extract_string())
    }
}

///////////////////////////////////////////////////////////////////////////////
