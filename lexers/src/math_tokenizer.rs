#![deny(warnings)]

use crate::scanner::Scanner;
use std::fmt;


#[derive(Clone, PartialEq, Debug)]
pub enum MathToken {
    Unknown(String),
    Number(String),
    Ident(String),
    Op(String),
    OParen, CParen, Comma,
}

/// A token and the char offset where it starts in the input.
#[derive(Clone, PartialEq, Debug)]
pub struct Lexeme {
    pub token: MathToken,
    pub offset: usize,
}

pub struct MathTokenizer<I: Iterator<Item=char>> {
    src: Scanner<I>,
}

impl MathToken {
    pub fn text(&self) -> &str {
        match self {
            MathToken::Unknown(s) | MathToken::Number(s) |
            MathToken::Ident(s) | MathToken::Op(s) => s,
            MathToken::OParen => "(",
            MathToken::CParen => ")",
            MathToken::Comma => ",",
        }
    }
}

impl fmt::Display for MathToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

impl<I: Iterator<Item=char>> MathTokenizer<I> {
    pub fn new(source: I) -> Self {
        MathTokenizer{src: Scanner::new(source)}
    }

    fn get_token(&mut self) -> Option<Lexeme> {
        self.src.skip_whitespace();
        let offset = self.src.offset();
        let token = if let Some(op) = self.src.scan_math_op() {
            match op.as_ref() {
                "(" => MathToken::OParen,
                ")" => MathToken::CParen,
                "," => MathToken::Comma,
                _ => MathToken::Op(op),
            }
        } else if let Some(id) = self.src.scan_identifier() {
            MathToken::Ident(id)
        } else if let Some(num) = self.src.scan_number() {
            MathToken::Number(num)
        } else if self.src.next().is_some() {
            MathToken::Unknown(self.src.extract_string())
        } else {
            return None;
        };
        Some(Lexeme{token, offset})
    }
}

impl<I: Iterator<Item=char>> Iterator for MathTokenizer<I> {
    type Item = Lexeme;
    fn next(&mut self) -> Option<Self::Item> {
        self.get_token()
    }
}

///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{Lexeme, MathToken, MathTokenizer};

    fn tokens(input: &str) -> Vec<MathToken> {
        MathTokenizer::new(input.chars()).map(|l| l.token).collect()
    }

    #[test]
    fn basic_ops() {
        let expect = vec![
            MathToken::Number(format!("3")),
            MathToken::Op(format!("+")),
            MathToken::Number(format!("4")),
            MathToken::Op(format!("*")),
            MathToken::Number(format!("2")),
            MathToken::Op(format!("/")),
            MathToken::Op(format!("-")),
            MathToken::OParen,
            MathToken::Number(format!("1")),
            MathToken::Op(format!("-")),
            MathToken::Number(format!("5")),
            MathToken::CParen,
            MathToken::Op(format!("^")),
            MathToken::Number(format!("2")),
        ];
        assert_eq!(tokens("3+4*2/-(1-5)^2"), expect);
    }

    #[test]
    fn functions_and_commas() {
        let expect = vec![
            MathToken::Number(format!("3.4e-2")),
            MathToken::Op(format!("*")),
            MathToken::Ident(format!("max")),
            MathToken::OParen,
            MathToken::Number(format!("2")),
            MathToken::Comma,
            MathToken::Ident(format!("x")),
            MathToken::CParen,
        ];
        assert_eq!(tokens("3.4e-2 * max(2, x)"), expect);
    }

    #[test]
    fn offsets() {
        let lexemes: Vec<_> = MathTokenizer::new(" 12 +  (x)".chars()).collect();
        assert_eq!(lexemes[0], Lexeme{token: MathToken::Number(format!("12")), offset: 1});
        assert_eq!(lexemes[1].offset, 4);
        assert_eq!(lexemes[2], Lexeme{token: MathToken::OParen, offset: 7});
        assert_eq!(lexemes[3].offset, 8);
        assert_eq!(lexemes[4].offset, 9);
        assert_eq!(lexemes.len(), 5);
    }

    #[test]
    fn unknown_chars() {
        assert_eq!(tokens("1 # 2"), vec![
            MathToken::Number(format!("1")),
            MathToken::Unknown(format!("#")),
            MathToken::Number(format!("2")),
        ]);
        assert_eq!(tokens("   "), vec![]);
    }
}
